//! Command-mode parsing.
//!
//! One command per line:
//!
//! ```text
//! set <sheet> <cell> [input]   input starting with '=' is a formula; no input clears
//! get <sheet> <cell>
//! delete <sheet> <cell>
//! list <sheet>
//! activity
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::str::FromStr;

use sheetcalc_core::{CellKey, SheetId};

use crate::error::{AppError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Set {
        cell: CellKey,
        input: Option<String>,
    },
    Get(CellKey),
    Delete(CellKey),
    List(SheetId),
    Activity,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = split_word(line);
        match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (sheet, rest) = split_word(rest);
                let (cell, input) = split_word(rest);
                let cell = parse_cell(sheet, cell)?;
                let input = Some(input.to_string()).filter(|s| !s.is_empty());
                Ok(Command::Set { cell, input })
            }
            "get" => parse_cell_args(rest).map(Command::Get),
            "delete" | "del" => parse_cell_args(rest).map(Command::Delete),
            "list" => {
                let (sheet, extra) = split_word(rest);
                no_extra(extra)?;
                parse_sheet(sheet).map(Command::List)
            }
            "activity" => {
                no_extra(rest)?;
                Ok(Command::Activity)
            }
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

/// Parse a script into `(line number, command)` pairs.
pub fn parse_script(script: &str) -> Result<Vec<(usize, Command)>> {
    let mut commands = Vec::new();
    for (index, line) in script.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command = trimmed.parse::<Command>().map_err(|message| AppError::Parse {
            line: index + 1,
            message,
        })?;
        commands.push((index + 1, command));
    }
    Ok(commands)
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(end) => (&s[..end], s[end..].trim()),
        None => (s, ""),
    }
}

fn parse_sheet(text: &str) -> std::result::Result<SheetId, String> {
    if text.is_empty() {
        return Err("missing sheet id".to_string());
    }
    text.parse::<u32>()
        .map(SheetId)
        .map_err(|_| format!("invalid sheet id: {}", text))
}

fn parse_cell(sheet: &str, cell: &str) -> std::result::Result<CellKey, String> {
    let sheet = parse_sheet(sheet)?;
    if cell.is_empty() {
        return Err("missing cell reference".to_string());
    }
    CellKey::parse(sheet, cell).map_err(|e| e.to_string())
}

fn parse_cell_args(rest: &str) -> std::result::Result<CellKey, String> {
    let (sheet, rest) = split_word(rest);
    let (cell, extra) = split_word(rest);
    no_extra(extra)?;
    parse_cell(sheet, cell)
}

fn no_extra(extra: &str) -> std::result::Result<(), String> {
    if extra.is_empty() {
        Ok(())
    } else {
        Err(format!("unexpected argument: {}", extra))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_set_keeps_formula_with_spaces() {
        let command: Command = "set 1 B1 =A1 + A2".parse().unwrap();
        assert_eq!(
            command,
            Command::Set {
                cell: CellKey::new(SheetId(1), 1, "B"),
                input: Some("=A1 + A2".to_string()),
            }
        );
    }

    #[test]
    fn parse_set_without_input_clears() {
        let command: Command = "SET 2 C3".parse().unwrap();
        assert_eq!(
            command,
            Command::Set {
                cell: CellKey::new(SheetId(2), 3, "C"),
                input: None,
            }
        );
    }

    #[test]
    fn parse_get_delete_list() {
        assert_eq!(
            "get 1 A1".parse::<Command>().unwrap(),
            Command::Get(CellKey::new(SheetId(1), 1, "A"))
        );
        assert_eq!(
            "del 1 A1".parse::<Command>().unwrap(),
            Command::Delete(CellKey::new(SheetId(1), 1, "A"))
        );
        assert_eq!("list 4".parse::<Command>().unwrap(), Command::List(SheetId(4)));
        assert_eq!("activity".parse::<Command>().unwrap(), Command::Activity);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!("get 1".parse::<Command>().is_err());
        assert!("get x A1".parse::<Command>().is_err());
        assert!("get 1 1A".parse::<Command>().is_err());
        assert!("get 1 A1 extra".parse::<Command>().is_err());
        assert!("frobnicate".parse::<Command>().is_err());
    }

    #[test]
    fn parse_script_reports_line_numbers() {
        let script = "# setup\nset 1 A1 2\n\nbogus\n";
        match parse_script(script) {
            Err(AppError::Parse { line, message }) => {
                assert_eq!(line, 4);
                assert!(message.contains("bogus"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn parse_script_skips_comments() {
        let commands = parse_script("# c\nset 1 A1 2\nget 1 A1\n").unwrap();
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].0, 3);
    }
}
