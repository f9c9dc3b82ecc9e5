//! `pagetable [url]`: fetch a page and print one of its tables.

use crate::cli::output::{self, Styled};
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::extractor::PageTableExtractor;
use crate::table::Table;
use anyhow::Result;
use std::time::Instant;

/// How a successful result is printed on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Text,
    /// `{ "columns": [...], "rows": [[...]] }`.
    Json,
    /// A list of objects keyed by column name.
    Records,
}

/// Run the extraction and print the table.
pub async fn run(config: &ExtractConfig, format: OutputFormat) -> Result<()> {
    let s = Styled::new();
    let start = Instant::now();

    if output::is_verbose() && !output::is_quiet() {
        output::print_header(&s);
        eprintln!("  url:      {}", config.url);
        eprintln!("  table id: {}", config.table_id);
        eprintln!("  status:   {:?}", config.status_policy);
        if let Some(timeout) = config.timeout {
            eprintln!("  timeout:  {}ms", timeout.as_millis());
        }
        eprintln!();
    }

    let extractor = PageTableExtractor::new(config)?;
    let table = extractor.extract(&config.url, &config.table_id).await?;

    // --json overrides a text format; an explicit json/records choice stands
    let format = match format {
        OutputFormat::Text if output::is_json() => OutputFormat::Json,
        other => other,
    };
    print!("{}", render(&table, format)?);

    if !output::is_quiet() {
        eprintln!(
            "  {} {} rows x {} columns from #{} {}",
            s.ok_sym(),
            table.len(),
            table.width(),
            config.table_id,
            s.dim(&output::format_elapsed(start.elapsed().as_millis()))
        );
    }

    Ok(())
}

/// Format a table for stdout.
pub fn render(table: &Table, format: OutputFormat) -> Result<String> {
    let text = match format {
        OutputFormat::Text => output::render_text(table),
        OutputFormat::Json => serde_json::to_string_pretty(table)? + "\n",
        OutputFormat::Records => serde_json::to_string_pretty(&table.records())? + "\n",
    };
    Ok(text)
}

/// JSON error payload; `message` carries the `Error: ` prefix.
pub fn error_json(err: &anyhow::Error) -> serde_json::Value {
    let kind = err
        .downcast_ref::<ExtractError>()
        .map(ExtractError::kind)
        .unwrap_or("internal");
    let status = err.downcast_ref::<ExtractError>().and_then(ExtractError::status);

    serde_json::json!({
        "error": kind,
        "message": user_message(err),
        "status": status,
    })
}

/// `Error: <details>` for any failure.
pub fn user_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ExtractError>() {
        Some(e) => e.user_message(),
        None => format!("Error: {err:#}"),
    }
}

/// Print a failure on stderr, or as JSON on stdout in --json mode.
pub fn report_error(err: &anyhow::Error) {
    if output::is_json() {
        output::print_json(&error_json(err));
        return;
    }
    let s = Styled::new();
    eprintln!("  {} {}", s.fail_sym(), s.red(&user_message(err)));
}
