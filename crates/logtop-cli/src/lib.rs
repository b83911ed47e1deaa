use clap::ValueEnum;
use std::fmt;

pub mod commands;

/// How command results are printed to stdout
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Styled summary for terminals
    #[default]
    Pretty,
    /// The full analysis as pretty-printed JSON
    Json,
    /// Ranked rows as CSV
    #[value(alias = "csv")]
    Table,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        };
        f.write_str(name)
    }
}
