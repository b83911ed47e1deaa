mod renderer;

pub use renderer::{ReportRenderer, TABLE_PLACEHOLDER, report_path};
