//! sheetcalc - Command-mode driver for the cell formula engine

mod command;
mod config;
mod error;
mod session;

use anyhow::Context;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use command::parse_script;
use session::Session;

/// Evaluate cell commands against an in-memory sheet store.
#[derive(Parser, Debug)]
#[command(name = "sheetcalc", version, about)]
struct Cli {
    /// Command script to run (reads stdin when neither this nor --command is given)
    script: Option<PathBuf>,

    /// Run a single command (can be repeated)
    #[arg(short = 'c', long = "command")]
    commands: Vec<String>,

    /// Load service settings from a TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not read the user's default config.toml
    #[arg(long)]
    no_default_config: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Run every command; returns false when any command failed.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let (config, warnings) = config::load_config(cli.config.as_ref(), !cli.no_default_config);
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let script = if !cli.commands.is_empty() {
        cli.commands.join("\n")
    } else if let Some(path) = &cli.script {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?
    } else {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading commands from stdin")?;
        input
    };

    let commands = parse_script(&script)?;
    let session = Session::new(config);
    let mut ok = true;
    for (line, command) in commands {
        match session.execute(command) {
            Ok(lines) => {
                for out in lines {
                    println!("{}", out);
                }
            }
            Err(e) => {
                log::debug!("command on line {} failed: {}", line, e);
                println!("#ERR {}", e);
                ok = false;
            }
        }
    }
    Ok(ok)
}
