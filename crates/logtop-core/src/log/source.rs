use super::parser::LineParser;
use super::types::{ParseStats, ParsedRecord};
use crate::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Lines scanned between two progress messages
pub const PROGRESS_INTERVAL: u64 = 100_000;

/// Lazy, single-pass sequence of parsed records from one log file
///
/// Unmatched lines are skipped but counted. The counters are available from
/// [`LineSource::stats`] and are final once the iterator returns `None`.
/// The underlying file is closed when the source is dropped, whether the scan
/// finished, stopped early, or failed.
pub struct LineSource<'p> {
    reader: Box<dyn BufRead>,
    parser: &'p LineParser,
    stats: ParseStats,
    max_lines: Option<u64>,
    buf: Vec<u8>,
    exhausted: bool,
}

impl<'p> LineSource<'p> {
    /// Open a log file, decompressing it when the name ends in `.gz`
    pub fn open(path: &Path, parser: &'p LineParser) -> Result<Self> {
        tracing::debug!("Opening log file: {}", path.display());

        let file = File::open(path)?;
        let reader: Box<dyn BufRead> = if is_gzipped(path) {
            Box::new(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        Ok(Self::from_boxed(reader, parser))
    }

    /// Read lines from any buffered reader
    pub fn from_reader<R: BufRead + 'static>(reader: R, parser: &'p LineParser) -> Self {
        Self::from_boxed(Box::new(reader), parser)
    }

    fn from_boxed(reader: Box<dyn BufRead>, parser: &'p LineParser) -> Self {
        Self {
            reader,
            parser,
            stats: ParseStats::default(),
            max_lines: None,
            buf: Vec::new(),
            exhausted: false,
        }
    }

    /// Stop after `max_lines` lines have been scanned
    pub fn with_max_lines(mut self, max_lines: Option<u64>) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Counters so far; final once the sequence is exhausted
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn finish(&mut self) {
        self.exhausted = true;
        tracing::debug!(
            "Finished scanning: {} lines, {} parsed",
            self.stats.total,
            self.stats.processed
        );
    }
}

impl Iterator for LineSource<'_> {
    type Item = Result<ParsedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.exhausted {
                return None;
            }

            if self.max_lines.is_some_and(|max| self.stats.total >= max) {
                tracing::info!("Line limit of {} reached, stopping scan", self.stats.total);
                self.finish();
                return None;
            }

            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    self.finish();
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e.into()));
                }
            }

            self.stats.total += 1;
            if self.stats.total % PROGRESS_INTERVAL == 0 {
                tracing::info!("Scanned {} lines", self.stats.total);
            }

            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end_matches(['\n', '\r']);

            if let Some(record) = self.parser.parse(line) {
                self.stats.processed += 1;
                return Some(Ok(record));
            }
        }
    }
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}
