use super::{AggregateStats, Aggregation, UrlAggregate, UrlSummary};

/// Progress is logged each time this percentage of URLs has been summarized
const PROGRESS_STEP_PERCENT: usize = 10;

/// Collapses per-URL sample lists into summary statistics
pub struct Summarizer;

impl Summarizer {
    /// Summarize every URL of an aggregation. The raw samples are dropped as
    /// soon as their URL is summarized.
    pub fn summarize(&self, aggregation: Aggregation) -> Vec<UrlSummary> {
        let Aggregation { urls, stats } = aggregation;
        let unique = urls.len();
        tracing::debug!("Summarizing {} URLs", unique);

        let mut progress = Milestones::new(unique);
        let mut summaries = Vec::with_capacity(unique);

        for (done, aggregate) in urls.into_values().enumerate() {
            summaries.push(summarize_url(aggregate, &stats));

            if let Some(percent) = progress.advance(done + 1) {
                tracing::info!("Summarized {}% of URLs", percent);
            }
        }

        summaries
    }
}

/// Tracks which progress percentages have already been reported
struct Milestones {
    total: usize,
    next: usize,
}

impl Milestones {
    fn new(total: usize) -> Self {
        Self {
            total,
            next: PROGRESS_STEP_PERCENT,
        }
    }

    /// Percentage to report once `done` items are finished, if a new
    /// milestone was crossed
    fn advance(&mut self, done: usize) -> Option<usize> {
        if self.total == 0 {
            return None;
        }

        let percent = done * 100 / self.total;
        if percent < self.next {
            return None;
        }

        self.next = (percent / PROGRESS_STEP_PERCENT + 1) * PROGRESS_STEP_PERCENT;
        Some(percent)
    }
}

fn summarize_url(aggregate: UrlAggregate, stats: &AggregateStats) -> UrlSummary {
    let UrlAggregate { url, mut samples } = aggregate;
    samples.sort_by(f64::total_cmp);

    let count = samples.len() as u64;
    let raw_sum: f64 = samples.iter().sum();
    let time_sum = round3(raw_sum);

    UrlSummary {
        url,
        count,
        count_share: share(count as f64, stats.total as f64),
        time_sum,
        time_share: share(time_sum, stats.all_req_time),
        time_avg: round3(raw_sum / count as f64),
        time_max: samples.last().copied().unwrap_or(0.0),
        time_median: round3(median(&samples)),
    }
}

/// Percentage of `part` in `whole`, rounded to 3 digits. Zero when `whole` is zero.
fn share(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    round3(part * 100.0 / whole)
}

/// Median of an ascending slice: the middle value, or the mean of the two
/// middle values for even lengths. Zero for an empty slice.
pub fn median(sorted: &[f64]) -> f64 {
    let len = sorted.len();
    if len == 0 {
        return 0.0;
    }

    let mid = len / 2;
    if len.is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
