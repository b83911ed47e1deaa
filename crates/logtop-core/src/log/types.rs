use serde::{Deserialize, Serialize};

/// One successfully matched log line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecord {
    pub url: String,
    /// Request duration in seconds
    pub request_time: f64,
}

/// Line counters for one scan of a log file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Lines read from the file
    pub total: u64,
    /// Lines that matched the grammar
    pub processed: u64,
}

impl ParseStats {
    /// Lines that did not match the grammar
    pub fn failed(&self) -> u64 {
        self.total - self.processed
    }
}
