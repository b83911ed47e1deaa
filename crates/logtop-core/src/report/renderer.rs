use crate::analysis::UrlSummary;
use crate::{Error, Result};
use chrono::NaiveDate;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Marker in the HTML template replaced by the JSON array of report rows
pub const TABLE_PLACEHOLDER: &str = "$table_json";

/// Location of the report for a given log date
pub fn report_path(report_dir: &Path, date: NaiveDate) -> PathBuf {
    report_dir.join(format!("report-{}.html", date.format("%Y.%m.%d")))
}

/// Fills an HTML template with report rows
pub struct ReportRenderer {
    template: String,
}

impl ReportRenderer {
    /// Load a template from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading report template from: {}", path.display());

        let template = fs::read_to_string(path).map_err(|e| {
            Error::Template(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_template(template)
    }

    pub fn from_template(template: String) -> Result<Self> {
        if !template.contains(TABLE_PLACEHOLDER) {
            return Err(Error::Template(format!(
                "template has no {} placeholder",
                TABLE_PLACEHOLDER
            )));
        }
        Ok(Self { template })
    }

    /// Render the report to a string
    pub fn render(&self, rows: &[UrlSummary]) -> Result<String> {
        // keep "</script>" inside a URL from closing the script block
        let json = serde_json::to_string(rows)?.replace("</", "<\\/");
        Ok(self.template.replace(TABLE_PLACEHOLDER, &json))
    }

    /// Render the report and write it to `path`
    ///
    /// The report is written to a temporary file next to `path` and renamed
    /// into place, so `path` either holds a complete report or does not exist.
    pub fn to_file(&self, rows: &[UrlSummary], path: &Path) -> Result<()> {
        tracing::debug!("Writing report to: {}", path.display());

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let html = self.render(rows)?;
        let tmp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            writer.write_all(html.as_bytes())?;
            writer.flush()?;
        }
        tmp.persist(path).map_err(|e| e.error)?;

        tracing::info!(
            "Successfully wrote report with {} rows to {}",
            rows.len(),
            path.display()
        );

        Ok(())
    }
}
