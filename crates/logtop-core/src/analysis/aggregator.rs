use super::AggregateStats;
use crate::log::{LineSource, ParseStats, ParsedRecord};
use crate::{Error, Result};
use std::collections::HashMap;

/// Request time samples collected for one URL
#[derive(Debug, Clone, PartialEq)]
pub struct UrlAggregate {
    pub url: String,
    /// Never empty: an aggregate is created on the first sample
    pub samples: Vec<f64>,
}

/// Per-URL samples of one log file plus the file-wide counters
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub urls: HashMap<String, UrlAggregate>,
    pub stats: AggregateStats,
}

/// Groups parsed records by URL in a single pass
pub struct Aggregator {
    max_error_percent: f64,
}

impl Aggregator {
    pub fn new(max_error_percent: f64) -> Self {
        Self { max_error_percent }
    }

    /// Consume a record source to exhaustion
    ///
    /// `source` is drained first; its line counters are read once it is
    /// exhausted. Fails on the first read error, or with
    /// [`Error::ParseQuality`] when too many lines did not match.
    pub fn aggregate<S>(&self, mut source: S) -> Result<Aggregation>
    where
        S: Iterator<Item = Result<ParsedRecord>> + HasParseStats,
    {
        let mut aggregation = Aggregation::default();

        for record in source.by_ref() {
            aggregation.push(record?);
        }

        let parse_stats = source.parse_stats();
        self.check_parse_quality(&parse_stats)?;

        aggregation.stats.total = parse_stats.total;
        aggregation.stats.processed = parse_stats.processed;

        tracing::debug!(
            "Aggregated {} unique URLs from {} records",
            aggregation.stats.unique_url_count,
            parse_stats.processed
        );

        Ok(aggregation)
    }

    /// Fail when the share of unparsed lines exceeds the configured threshold
    pub fn check_parse_quality(&self, stats: &ParseStats) -> Result<()> {
        let failed = stats.failed();
        let allowed = stats.total as f64 * (self.max_error_percent / 100.0);

        if failed as f64 > allowed {
            tracing::error!(
                "{} of {} lines could not be parsed (limit {}%)",
                failed,
                stats.total,
                self.max_error_percent
            );
            return Err(Error::ParseQuality {
                failed,
                total: stats.total,
                max_error_percent: self.max_error_percent,
            });
        }

        Ok(())
    }
}

impl Aggregation {
    fn push(&mut self, record: ParsedRecord) {
        self.stats.all_req_time += record.request_time;

        match self.urls.get_mut(&record.url) {
            Some(aggregate) => aggregate.samples.push(record.request_time),
            None => {
                self.stats.unique_url_count += 1;
                self.urls.insert(
                    record.url.clone(),
                    UrlAggregate {
                        url: record.url,
                        samples: vec![record.request_time],
                    },
                );
            }
        }
    }
}

/// Record sources that count the lines they scanned
pub trait HasParseStats {
    fn parse_stats(&self) -> ParseStats;
}

impl HasParseStats for LineSource<'_> {
    fn parse_stats(&self) -> ParseStats {
        self.stats()
    }
}
