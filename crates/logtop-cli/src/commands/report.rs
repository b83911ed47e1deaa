use crate::OutputFormat;
use anyhow::Result;
use logtop_core::Config;
use logtop_core::analysis::analyze_log;
use logtop_core::log::find_latest_log;
use logtop_core::report::{ReportRenderer, report_path};
use std::path::PathBuf;

/// What a report run ended up doing
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// A new report was written
    Written(PathBuf),
    /// The latest log already has a report
    AlreadyExists(PathBuf),
    /// No access log in the log directory
    NoLogs,
}

/// Build the HTML report for the newest log in `config.log_dir`
pub fn run_report(config: &Config) -> Result<ReportOutcome> {
    let Some(latest) = find_latest_log(&config.log_dir)? else {
        return Ok(ReportOutcome::NoLogs);
    };

    let path = report_path(&config.report_dir, latest.date);
    if path.exists() {
        tracing::info!("Report already exists: {}", path.display());
        return Ok(ReportOutcome::AlreadyExists(path));
    }

    // load the template before scanning so a bad template fails fast
    let renderer = ReportRenderer::from_file(&config.template)?;
    let report = analyze_log(&latest.path, config)?;
    renderer.to_file(&report.rows, &path)?;

    Ok(ReportOutcome::Written(path))
}

pub fn execute(config: &Config, format: OutputFormat) -> Result<()> {
    tracing::info!("Starting log analyzer");

    let outcome = match run_report(config) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Log analysis failed: {:#}", e);
            return Err(e);
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Table => match &outcome {
            ReportOutcome::Written(path) => println!("written,{}", path.display()),
            ReportOutcome::AlreadyExists(path) => println!("exists,{}", path.display()),
            ReportOutcome::NoLogs => println!("no_logs,"),
        },
        OutputFormat::Pretty => {
            use console::style;
            match &outcome {
                ReportOutcome::Written(path) => {
                    println!("{} {}", style("Report written:").green(), path.display())
                }
                ReportOutcome::AlreadyExists(path) => {
                    println!("{} {}", style("Report already exists:").yellow(), path.display())
                }
                ReportOutcome::NoLogs => println!(
                    "{} {}",
                    style("No access logs found in").yellow(),
                    config.log_dir.display()
                ),
            }
        }
    }

    tracing::info!("Log analyzer finished");
    Ok(())
}
