//! Cell write orchestration and dependency propagation.

mod ops;
mod recalc;
mod state;

pub use ops::WriteOutcome;
pub use recalc::Propagation;
pub use state::CellService;
