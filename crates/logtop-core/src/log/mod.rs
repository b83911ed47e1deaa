mod discovery;
mod parser;
mod source;
mod types;

pub use discovery::{LatestLog, find_latest_log};
pub use parser::LineParser;
pub use source::{LineSource, PROGRESS_INTERVAL};
pub use types::*;
