use anyhow::Result;
use clap::{Parser, Subcommand};
use logtop_cli::OutputFormat;
use logtop_cli::commands;
use logtop_cli::commands::analyze::AnalyzeOptions;
use logtop_core::Config;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Parser)]
#[command(name = "logtop")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Find the most time-costly URLs in nginx access logs",
    long_about = "logtop scans an nginx access log, groups request times by URL, and reports \
                  the URLs with the greatest total request time as an HTML table."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file (defaults to ./logtop.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the HTML report for the newest log in the configured log directory
    Report,

    /// Analyze a single log file and print the slowest URLs
    Analyze {
        /// Path to the access log (plain or .gz)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of URLs to show (overrides report_size)
        #[arg(long)]
        top: Option<usize>,

        /// Unparsed line percentage that aborts the run (overrides max_error_percent)
        #[arg(long)]
        max_error_percent: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging
    init_logging(cli.verbose, &config)?;
    tracing::debug!("Output format: {}", cli.format);

    // Execute the command
    match cli.command {
        Commands::Report => commands::report::execute(&config, cli.format),
        Commands::Analyze {
            file,
            top,
            max_error_percent,
        } => commands::analyze::execute(
            &file,
            &config,
            AnalyzeOptions {
                top,
                max_error_percent,
            },
            cli.format,
        ),
    }
}

fn init_logging(verbose: bool, config: &Config) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = if verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };
    let filter = EnvFilter::try_new(format!(
        "logtop={level},logtop_cli={level},logtop_core={level}"
    ))?;

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .without_time()
                .init();
        }
    }

    Ok(())
}
