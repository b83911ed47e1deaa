mod aggregator;
mod summarizer;
mod top_n;

pub use aggregator::{Aggregation, Aggregator, HasParseStats, UrlAggregate};
pub use summarizer::{Summarizer, median, round3};
pub use top_n::TopNSelector;

use crate::log::{LineParser, LineSource};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Result of analyzing one log file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub stats: AggregateStats,
    /// Most time-costly URLs, greatest `time_sum` first
    pub rows: Vec<UrlSummary>,
}

/// File-wide counters collected during aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total: u64,
    pub processed: u64,
    pub unique_url_count: usize,
    /// Sum of every request time in the file
    pub all_req_time: f64,
}

/// Latency statistics for one URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlSummary {
    pub url: String,
    pub count: u64,
    /// Percentage of parsed lines hitting this URL
    pub count_share: f64,
    pub time_sum: f64,
    /// Percentage of the file-wide request time spent on this URL
    pub time_share: f64,
    pub time_avg: f64,
    pub time_max: f64,
    pub time_median: f64,
}

/// Run the whole pipeline on one log file
pub fn analyze_log(path: &Path, config: &Config) -> Result<AnalysisReport> {
    tracing::info!("Analyzing log file: {}", path.display());

    let parser = LineParser::from_pattern(config.log_pattern.as_deref())?;
    let source = LineSource::open(path, &parser)?.with_max_lines(config.max_lines);

    let aggregation = Aggregator::new(config.max_error_percent).aggregate(source)?;
    let stats = aggregation.stats;
    let summaries = Summarizer.summarize(aggregation);
    let rows = TopNSelector::new(config.report_size).select(&summaries);

    tracing::info!(
        "Analysis complete: {} lines, {} parsed, {} unique URLs, {:.3}s total request time",
        stats.total,
        stats.processed,
        stats.unique_url_count,
        stats.all_req_time
    );

    Ok(AnalysisReport { stats, rows })
}
