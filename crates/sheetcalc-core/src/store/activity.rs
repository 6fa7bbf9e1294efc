use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Mutex, PoisonError};

use sheetcalc_engine::engine::SheetId;

use crate::cell::Cell;
use crate::error::Result;

/// Kind of change an activity entry records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Add,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Add => "ADD",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        })
    }
}

/// Entity an activity entry is about. The cell service only emits `Cell`;
/// book and sheet entries come from the surrounding shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Book,
    Sheet,
    Cell,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntityType::Book => "BOOK",
            EntityType::Sheet => "SHEET",
            EntityType::Cell => "CELL",
        })
    }
}

/// One audit trail record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub sheet: SheetId,
    pub row: Option<u32>,
    pub col: Option<String>,
    pub value: Option<String>,
    pub formula: Option<String>,
    pub updated_by: String,
    pub updated_at: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
}

impl ActivityEntry {
    /// Entry for a change to `cell`, stamped now.
    pub fn for_cell(cell: &Cell, actor: &str, operation: Operation) -> ActivityEntry {
        ActivityEntry {
            sheet: cell.sheet,
            row: Some(cell.row),
            col: Some(cell.col.clone()),
            value: cell.computed_value.clone(),
            formula: cell.formula.clone(),
            updated_by: actor.to_string(),
            updated_at: Utc::now(),
            operation,
            entity_type: EntityType::Cell,
        }
    }
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} sheet={}",
            self.updated_at.to_rfc3339(),
            self.operation,
            self.entity_type,
            self.sheet
        )?;
        if let (Some(row), Some(col)) = (self.row, &self.col) {
            write!(f, " cell={}{}", col, row)?;
        }
        if let Some(value) = &self.value {
            write!(f, " value={:?}", value)?;
        }
        if let Some(formula) = &self.formula {
            write!(f, " formula={:?}", formula)?;
        }
        write!(f, " by={}", self.updated_by)
    }
}

/// Receives activity entries after a cell write succeeds.
///
/// Failures are reported back but never undo the write.
pub trait ActivitySink {
    fn record(&self, entry: ActivityEntry) -> Result<()>;
}

/// Append-only in-memory activity log.
#[derive(Debug, Default)]
pub struct MemoryActivityLog {
    entries: Mutex<Vec<ActivityEntry>>,
}

impl MemoryActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn with_operation(&self, operation: Operation) -> Vec<ActivityEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.operation == operation)
            .collect()
    }
}

impl ActivitySink for MemoryActivityLog {
    fn record(&self, entry: ActivityEntry) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        Ok(())
    }
}

/// Writes activity entries to the `log` facade at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogActivitySink;

impl ActivitySink for LogActivitySink {
    fn record(&self, entry: ActivityEntry) -> Result<()> {
        log::info!(target: "sheetcalc::activity", "{}", entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetcalc_engine::engine::CellKey;

    fn sample_cell() -> Cell {
        let mut cell = Cell::new(&CellKey::new(SheetId(3), 2, "B"));
        cell.formula = Some("=A1+A2".to_string());
        cell.computed_value = Some("5.0".to_string());
        cell
    }

    #[test]
    fn test_entry_for_cell() {
        let entry = ActivityEntry::for_cell(&sample_cell(), "SYSTEM", Operation::Update);
        assert_eq!(entry.sheet, SheetId(3));
        assert_eq!(entry.row, Some(2));
        assert_eq!(entry.col.as_deref(), Some("B"));
        assert_eq!(entry.value.as_deref(), Some("5.0"));
        assert_eq!(entry.entity_type, EntityType::Cell);
    }

    #[test]
    fn test_entry_display() {
        let entry = ActivityEntry::for_cell(&sample_cell(), "importer", Operation::Add);
        let text = entry.to_string();
        assert!(text.contains("ADD CELL sheet=3 cell=B2"));
        assert!(text.ends_with("value=\"5.0\" formula=\"=A1+A2\" by=importer"));
    }

    #[test]
    fn test_labels_match_wire_names() {
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(EntityType::Book.to_string(), "BOOK");
        assert_eq!(EntityType::Sheet.to_string(), "SHEET");
    }

    #[test]
    fn test_memory_log_filters_by_operation() {
        let log = MemoryActivityLog::new();
        let cell = sample_cell();
        log.record(ActivityEntry::for_cell(&cell, "SYSTEM", Operation::Add)).unwrap();
        log.record(ActivityEntry::for_cell(&cell, "SYSTEM", Operation::Delete)).unwrap();
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.with_operation(Operation::Delete).len(), 1);
        assert!(log.with_operation(Operation::Update).is_empty());
    }

    #[test]
    fn test_log_sink_accepts_entries() {
        let entry = ActivityEntry::for_cell(&sample_cell(), "SYSTEM", Operation::Add);
        assert!(LogActivitySink.record(entry).is_ok());
    }
}
