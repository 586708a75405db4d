// SPDX-FileCopyrightText: 2026 TaxNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `taxnova ask`: answer a single query and exit.

use colored::Colorize;
use taxnova_config::TaxnovaConfig;
use taxnova_core::{RoutedResponse, TaxnovaError};

use crate::app::{build_router, primary_provider_config};

pub async fn run_ask(config: &TaxnovaConfig, query: &str, verbose: bool) -> Result<(), TaxnovaError> {
    let router = build_router(config)?;
    let response = router
        .get_response(query, &primary_provider_config(config))
        .await;
    print_response(&response, verbose);
    Ok(())
}

/// Prints the answer text, and with `verbose` a dimmed provenance line.
pub fn print_response(response: &RoutedResponse, verbose: bool) {
    println!("{}", response.text);
    if verbose {
        println!("{}", provenance(response).dimmed());
    }
}

fn provenance(response: &RoutedResponse) -> String {
    let mut line = format!("source: {} | {} ms", response.source, response.latency_ms);
    if let Some(error) = &response.error {
        line.push_str(&format!(" | error: {}", error.kind));
    }
    line
}
