use super::types::ParsedRecord;
use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;

/// Grammar of the `ui_short` nginx access log format:
///
/// ```text
/// $remote_addr  $remote_user $http_x_real_ip [$time_local] "$request"
/// $status $body_bytes_sent "$http_referer" "$http_user_agent"
/// "$http_x_forwarded_for" "$http_X_REQUEST_ID" "$http_X_RB_USER" $request_time
/// ```
pub const DEFAULT_PATTERN: &str = concat!(
    r"^(?P<remote_addr>\S+) +(?P<remote_user>\S+) +(?P<real_ip>\S+(?: +\S+)*?) ",
    r"+\[(?P<time_local>[^\]]*)\] ",
    r#"+"(?P<method>\S+) (?P<url>\S+) (?P<protocol>[^"]*)" "#,
    r"+(?P<status>\d+) +(?P<body_bytes_sent>\d+) ",
    r#"+"(?P<referer>.*?)" +"(?P<user_agent>.*?)" +"(?P<forwarded_for>.*?)" "#,
    r#"+"(?P<request_id>.*?)" +"(?P<rb_user>.*?)" "#,
    r"+(?P<request_time>\d+(?:\.\d+)?)$",
);

/// How much of an unmatched line ends up in the debug log
const ELIDED_LINE_LEN: usize = 64;

lazy_static! {
    static ref DEFAULT_GRAMMAR: Regex = Regex::new(DEFAULT_PATTERN).unwrap();
}

/// Matches raw log lines against a fixed grammar
#[derive(Debug, Clone)]
pub struct LineParser {
    grammar: Regex,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Parser for the built-in nginx grammar
    pub fn new() -> Self {
        Self {
            grammar: DEFAULT_GRAMMAR.clone(),
        }
    }

    /// Parser for a custom grammar
    ///
    /// The pattern must define the named groups `url` and `request_time`.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let grammar = Regex::new(pattern).map_err(|e| Error::InvalidGrammar(e.to_string()))?;

        for group in ["url", "request_time"] {
            if !grammar.capture_names().flatten().any(|name| name == group) {
                return Err(Error::InvalidGrammar(format!(
                    "pattern has no `{}` group",
                    group
                )));
            }
        }

        Ok(Self { grammar })
    }

    /// Parser for the configured grammar, falling back to the built-in one
    pub fn from_pattern(pattern: Option<&str>) -> Result<Self> {
        match pattern {
            Some(pattern) => Self::with_pattern(pattern),
            None => Ok(Self::new()),
        }
    }

    /// Match one line. Returns `None` when the line does not fit the grammar.
    pub fn parse(&self, line: &str) -> Option<ParsedRecord> {
        let Some(caps) = self.grammar.captures(line) else {
            tracing::debug!("Can't parse line: {}", elide(line));
            return None;
        };

        let url = caps.name("url")?.as_str();
        let request_time = caps
            .name("request_time")?
            .as_str()
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite() && *t >= 0.0);

        let Some(request_time) = request_time else {
            tracing::debug!("Bad request time in line: {}", elide(line));
            return None;
        };

        Some(ParsedRecord {
            url: url.to_string(),
            request_time,
        })
    }
}

fn elide(line: &str) -> String {
    match line.char_indices().nth(ELIDED_LINE_LEN) {
        Some((idx, _)) => format!("{}...", &line[..idx]),
        None => line.to_string(),
    }
}
