//! Runs parsed commands against an in-memory cell service.

use sheetcalc_core::{
    CellRequest, CellService, CellStore, MemoryActivityLog, MemoryCellStore, ServiceConfig,
};

use crate::command::Command;
use crate::error::Result;

pub struct Session {
    service: CellService<MemoryCellStore, MemoryActivityLog>,
}

impl Session {
    pub fn new(config: ServiceConfig) -> Self {
        Session {
            service: CellService::new(MemoryCellStore::new(), MemoryActivityLog::new(), config),
        }
    }

    /// Execute one command, returning the lines to print.
    pub fn execute(&self, command: Command) -> Result<Vec<String>> {
        match command {
            Command::Set { cell, input } => {
                let mut request = CellRequest::new(cell.sheet, cell.row, cell.col.clone());
                match input {
                    Some(text) if text.starts_with('=') => request = request.with_formula(text),
                    Some(text) => request = request.with_value(text),
                    None => {}
                }
                let outcome = self.service.create_or_update(request)?;

                let mut lines = vec![match &outcome.cell {
                    Some(saved) => {
                        format!("{} = {}", cell, display_value(saved.computed_value.as_deref()))
                    }
                    None => format!("{} cleared", cell),
                }];
                for key in &outcome.propagation.recomputed {
                    let value = self.service.store().find(key).and_then(|c| c.computed_value);
                    lines.push(format!("  {} = {}", key, display_value(value.as_deref())));
                }
                for (key, err) in &outcome.propagation.skipped {
                    lines.push(format!("  {} #ERR {}", key, err));
                }
                Ok(lines)
            }
            Command::Get(cell) => {
                let found = self.service.get_cell(cell.sheet, cell.row, &cell.col)?;
                Ok(vec![display_value(found.computed_value.as_deref()).to_string()])
            }
            Command::Delete(cell) => {
                let propagation = self.service.delete_cell(cell.sheet, cell.row, &cell.col)?;
                let mut lines = vec![format!("{} deleted", cell)];
                for key in &propagation.recomputed {
                    let value = self.service.store().find(key).and_then(|c| c.computed_value);
                    lines.push(format!("  {} = {}", key, display_value(value.as_deref())));
                }
                Ok(lines)
            }
            Command::List(sheet) => Ok(self
                .service
                .cells_in_sheet(sheet)
                .iter()
                .map(|cell| {
                    format!(
                        "{}\t{}\t{}",
                        cell.key(),
                        display_value(cell.computed_value.as_deref()),
                        cell.formula.as_deref().unwrap_or("")
                    )
                })
                .collect()),
            Command::Activity => Ok(self
                .service
                .activity()
                .entries()
                .iter()
                .map(|entry| {
                    let cell = match (&entry.col, entry.row) {
                        (Some(col), Some(row)) => format!("{}{}", col, row),
                        _ => String::new(),
                    };
                    format!(
                        "{} {} {} {}",
                        entry.operation,
                        entry.entity_type,
                        cell,
                        display_value(entry.value.as_deref())
                    )
                })
                .collect()),
        }
    }
}

fn display_value(value: Option<&str>) -> &str {
    value.unwrap_or("")
}
