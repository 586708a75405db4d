// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `taxnova shell` command implementation.
//!
//! Interactive REPL with a colored prompt and readline history persisted
//! under the user's data directory. Every line is routed independently;
//! nothing carries over between questions.

use std::path::{Path, PathBuf};

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use taxnova_config::TaxnovaConfig;
use taxnova_core::TaxnovaError;
use tracing::{debug, warn};

use crate::app::{build_router, primary_provider_config};
use crate::ask::print_response;

/// Shell-level commands recognized before routing.
#[derive(Debug, PartialEq, Eq)]
enum ShellInput<'a> {
    Quit,
    Skip,
    Verbose,
    Query(&'a str),
}

fn parse_input(line: &str) -> ShellInput<'_> {
    match line.trim() {
        "/quit" | "/exit" => ShellInput::Quit,
        "" => ShellInput::Skip,
        "/verbose" => ShellInput::Verbose,
        query => ShellInput::Query(query),
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("taxnova").join("history.txt"))
}

/// Runs the `taxnova shell` interactive REPL.
pub async fn run_shell(config: TaxnovaConfig) -> Result<(), TaxnovaError> {
    let router = build_router(&config)?;
    let primary = primary_provider_config(&config);

    let mut rl = DefaultEditor::new()
        .map_err(|e| TaxnovaError::Internal(format!("failed to initialize readline: {e}")))?;
    let history = history_path();
    if let Some(path) = &history {
        if rl.load_history(path).is_err() {
            debug!(path = %path.display(), "no shell history yet");
        }
    }

    println!("{}", "taxnova shell".bold().green());
    println!(
        "Ask about Pakistan income tax. Type {} to toggle details, {} to exit.\n",
        "/verbose".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "taxnova".green());
    let mut verbose = false;
    loop {
        match rl.readline(&prompt) {
            Ok(line) => match parse_input(&line) {
                ShellInput::Quit => break,
                ShellInput::Skip => continue,
                ShellInput::Verbose => {
                    verbose = !verbose;
                    let state = if verbose { "on" } else { "off" };
                    println!("{}", format!("details {state}").dimmed());
                }
                ShellInput::Query(query) => {
                    let _ = rl.add_history_entry(query);
                    let response = router.get_response(query, &primary).await;
                    print_response(&response, verbose);
                    println!();
                }
            },
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    if let Some(path) = &history {
        save_history(&mut rl, path);
    }
    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn save_history(rl: &mut DefaultEditor, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %e, "cannot create history directory");
            return;
        }
    }
    if let Err(e) = rl.save_history(path) {
        warn!(path = %path.display(), error = %e, "failed to save shell history");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_shell_commands() {
        assert_eq!(parse_input("/quit"), ShellInput::Quit);
        assert_eq!(parse_input("  /exit  "), ShellInput::Quit);
        assert_eq!(parse_input("   "), ShellInput::Skip);
        assert_eq!(parse_input("/verbose"), ShellInput::Verbose);
    }

    #[test]
    fn everything_else_is_a_query() {
        assert_eq!(
            parse_input("  what are the tax slabs?\n"),
            ShellInput::Query("what are the tax slabs?")
        );
        assert_eq!(parse_input("/help"), ShellInput::Query("/help"));
    }
}
