use crate::OutputFormat;
use anyhow::Result;
use logtop_core::Config;
use logtop_core::analysis::{AnalysisReport, analyze_log};
use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

/// Command-line overrides for a single analysis run
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyzeOptions {
    pub top: Option<usize>,
    pub max_error_percent: Option<f64>,
}

/// Analyze one log file and return structured results
pub fn analyze_file(
    file: &Path,
    config: &Config,
    options: AnalyzeOptions,
) -> Result<AnalysisReport> {
    let mut config = config.clone();
    if let Some(top) = options.top {
        config.report_size = top;
    }
    if let Some(max_error_percent) = options.max_error_percent {
        config.max_error_percent = max_error_percent;
    }
    config.validate()?;

    Ok(analyze_log(file, &config)?)
}

pub fn execute(
    file: &Path,
    config: &Config,
    options: AnalyzeOptions,
    format: OutputFormat,
) -> Result<()> {
    tracing::info!("Analyzing log file: {}", file.display());

    let report = analyze_file(file, config, options)?;

    match format {
        OutputFormat::Json => output_json(&report)?,
        OutputFormat::Table => write_table(&report, &mut io::stdout().lock())?,
        OutputFormat::Pretty => output_pretty(&report),
    }

    Ok(())
}

fn output_pretty(report: &AnalysisReport) {
    use console::style;

    println!("\n{}", style("Access Log Latency Report").bold().cyan());
    println!("{}", style("=========================").cyan());

    let stats = &report.stats;
    println!("\n{}", style("Summary:").bold());
    println!("  Total Lines:        {}", stats.total);
    println!("  Parsed Lines:       {}", stats.processed);
    println!("  Unique URLs:        {}", stats.unique_url_count);
    println!("  Total Request Time: {:.3} s", stats.all_req_time);

    if report.rows.is_empty() {
        println!("\n  No requests found.");
    } else {
        println!("\n{}", style("Slowest URLs (by total time):").bold());
        for (i, row) in report.rows.iter().enumerate() {
            println!(
                "  {}. [{:.3} s, {:.3}%] count={} avg={:.3} med={:.3} max={:.3} - {}",
                i + 1,
                row.time_sum,
                row.time_share,
                row.count,
                row.time_avg,
                row.time_median,
                row.time_max,
                row.url
            );
        }
    }

    println!(); // trailing newline
}

fn output_json(report: &AnalysisReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}

/// Write the rows as CSV with a header line
pub fn write_table<W: Write>(report: &AnalysisReport, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "url,count,count_perc,time_sum,time_perc,time_avg,time_max,time_med"
    )?;
    for row in &report.rows {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            csv_field(&row.url),
            row.count,
            row.count_share,
            row.time_sum,
            row.time_share,
            row.time_avg,
            row.time_max,
            row.time_median
        )?;
    }
    out.flush()
}

/// Quote a CSV field when it contains a separator, quote or line break
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}
