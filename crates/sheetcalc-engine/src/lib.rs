//! sheetcalc_engine - Cell references, two-operand formulas and the dependency graph.

pub mod engine;
