//! cmdterm line-oriented host.
//!
//! Reads command lines from stdin and runs them through the interpreter,
//! printing every log entry as it is appended. `QUIT` or end of input exits.
//! A line ending in a tab character prints completions instead of running.
//!
//! Usage: `cmdterm [config.toml]` (falls back to `$CMDTERM_CONFIG`).

mod console;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};

use cmdterm_terminal::Interpreter;
use cmdterm_types::config::TerminalConfig;
use console::Console;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = TerminalConfig::resolve(config_path).context("failed to load terminal config")?;
    log::info!(
        "Starting cmdterm (debug: {}, buffer: {})",
        config.debug,
        config.buffer_size
    );

    // Duplicate or malformed registrations abort startup here.
    let interp = Interpreter::new(&config).context("failed to register commands")?;

    console::install_panic_hook();
    let stdout = io::stdout();
    let ansi = stdout.is_terminal();
    let mut console = Console::new(interp, &config, stdout, ansi);
    console.banner();

    let mut lines = io::stdin().lock().lines();
    while console.running() {
        console.write_prompt()?;
        let Some(line) = lines.next() else {
            break;
        };
        console.submit(&line?);
    }

    log::info!("Exiting cmdterm");
    Ok(())
}
