use super::UrlSummary;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Picks the URLs with the greatest total request time
///
/// Output is ordered by `time_sum`, greatest first. Equal `time_sum` values
/// are ordered by URL, lexicographically ascending, so the result does not
/// depend on the order of the input.
pub struct TopNSelector {
    size: usize,
}

impl TopNSelector {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Select up to `size` entries without touching `summaries`
    pub fn select(&self, summaries: &[UrlSummary]) -> Vec<UrlSummary> {
        if self.size == 0 {
            return Vec::new();
        }

        // min-heap of the best `size` entries seen so far
        let mut heap: BinaryHeap<Reverse<Ranked<'_>>> = BinaryHeap::with_capacity(self.size + 1);

        for summary in summaries {
            heap.push(Reverse(Ranked(summary)));
            if heap.len() > self.size {
                heap.pop();
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(summary))| summary.clone())
            .collect()
    }
}

/// Ranking order: greater `time_sum` first, then smaller URL first
struct Ranked<'a>(&'a UrlSummary);

impl Ord for Ranked<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .time_sum
            .total_cmp(&other.0.time_sum)
            .then_with(|| other.0.url.cmp(&self.0.url))
    }
}

impl PartialOrd for Ranked<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked<'_> {}
