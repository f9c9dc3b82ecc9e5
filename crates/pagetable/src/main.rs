//! pagetable: fetch a web page and print one of its HTML tables.

use anyhow::{Context, Result};
use clap::Parser;
use pagetable::cli::extract_cmd::{self, OutputFormat};
use pagetable::config::{ExtractConfig, StatusPolicy, DEFAULT_TABLE_ID, DEFAULT_URL};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pagetable", version, about = "Extract an HTML table from a web page")]
struct Cli {
    /// Page to fetch.
    #[arg(default_value = DEFAULT_URL)]
    url: String,

    /// `id` attribute of the table to extract.
    #[arg(short = 't', long, default_value = DEFAULT_TABLE_ID)]
    table_id: String,

    /// Output format for the extracted table.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Parse the body even when the server answers with a non-2xx status.
    #[arg(long)]
    ignore_status: bool,

    /// Abort the request after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// JSON output for results and errors.
    #[arg(long, global = true)]
    json: bool,

    /// Only print the table.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print request details and debug logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

impl Cli {
    fn extract_config(&self) -> ExtractConfig {
        let mut config = ExtractConfig::new(&self.url, &self.table_id);
        if self.ignore_status {
            config = config.with_status_policy(StatusPolicy::Ignore);
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        config
    }

    /// Export global flags for the output helpers.
    fn export_flags(&self) {
        if self.json {
            std::env::set_var("PAGETABLE_JSON", "1");
        }
        if self.quiet {
            std::env::set_var("PAGETABLE_QUIET", "1");
        }
        if self.verbose {
            std::env::set_var("PAGETABLE_VERBOSE", "1");
        }
        if self.no_color {
            std::env::set_var("PAGETABLE_NO_COLOR", "1");
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose { "pagetable=debug" } else { "pagetable=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color && std::env::var("NO_COLOR").is_err());

    if cli.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() {
    let cli = Cli::parse();
    // Before the runtime starts any threads.
    cli.export_flags();
    init_tracing(&cli);

    if let Err(e) = run(&cli) {
        extract_cmd::report_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(extract_cmd::run(&cli.extract_config(), cli.format))
}
