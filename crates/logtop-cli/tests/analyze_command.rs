use logtop_cli::commands::analyze::{AnalyzeOptions, analyze_file};
use logtop_core::analysis::AnalysisReport;
use logtop_core::{Config, Error};
use std::io::Write;
use std::path::PathBuf;

/// Helper to get path to test fixtures
fn fixture_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join(filename)
}

fn lenient() -> AnalyzeOptions {
    AnalyzeOptions {
        top: None,
        max_error_percent: Some(20.0),
    }
}

/// Test that analyze_file reads a log file and returns the ranked URLs
#[test]
fn test_analyze_file_returns_ranked_urls() {
    // Arrange
    let fixture = fixture_path("sample.log");

    // Act
    let result = analyze_file(&fixture, &Config::default(), lenient());

    // Assert
    assert!(result.is_ok(), "Should successfully analyze log file");
    let report: AnalysisReport = result.unwrap();

    assert_eq!(report.stats.total, 9);
    assert_eq!(report.stats.processed, 8);
    assert_eq!(report.stats.unique_url_count, 5);
    assert!((report.stats.all_req_time - 2.782).abs() < 1e-9);

    let urls: Vec<&str> = report.rows.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "/api/v2/slot/4705/groups",
            "/api/v2/banner/25019354",
            "/api/v2/banner/16852664",
            "/api/v2/internal/banner/24294027/info",
            "/api/1/photogenic_banners/list/?server_name=WIN7RB4",
        ]
    );
}

/// Test the per-URL statistics of the hottest URL
#[test]
fn test_analyze_file_url_statistics() {
    let report = analyze_file(&fixture_path("sample.log"), &Config::default(), lenient()).unwrap();

    let banner = report
        .rows
        .iter()
        .find(|r| r.url == "/api/v2/banner/25019354")
        .unwrap();

    assert_eq!(banner.count, 3);
    assert_eq!(banner.time_sum, 1.1);
    assert_eq!(banner.time_avg, 0.367);
    assert_eq!(banner.time_median, 0.39);
    assert_eq!(banner.time_max, 0.61);
    assert_eq!(banner.count_share, 33.333);
    assert_eq!(banner.time_share, 39.54);
}

/// Test that --top limits the number of rows
#[test]
fn test_analyze_file_top_override() {
    let options = AnalyzeOptions {
        top: Some(2),
        max_error_percent: Some(20.0),
    };

    let report = analyze_file(&fixture_path("sample.log"), &Config::default(), options).unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].url, "/api/v2/slot/4705/groups");
}

/// One bad line out of nine is above the default 10% threshold
#[test]
fn test_analyze_file_parse_quality_failure() {
    let result = analyze_file(
        &fixture_path("sample.log"),
        &Config::default(),
        AnalyzeOptions::default(),
    );

    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::ParseQuality {
            failed: 1,
            total: 9,
            ..
        })
    ));
}

/// Test the end-to-end example from three short lines
#[test]
fn test_analyze_minimal_log() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for (url, time) in [("/a", "0.100"), ("/a", "0.300"), ("/b", "0.200")] {
        writeln!(
            file,
            r#"1.2.3.4 - -  - [DATE] "GET {url} HTTP/1.1" 200 10 "-" "-" "-" "-" "-" {time}"#
        )
        .unwrap();
    }

    let options = AnalyzeOptions {
        top: Some(1),
        max_error_percent: None,
    };
    let report = analyze_file(file.path(), &Config::default(), options).unwrap();

    assert_eq!(report.rows.len(), 1);
    let a = &report.rows[0];
    assert_eq!(a.url, "/a");
    assert_eq!(a.count, 2);
    assert_eq!(a.time_sum, 0.4);
    assert_eq!(a.time_avg, 0.2);
    assert_eq!(a.time_median, 0.2);
    assert_eq!(a.time_max, 0.3);
}

/// Missing files surface as I/O errors
#[test]
fn test_analyze_missing_file() {
    let result = analyze_file(
        &fixture_path("does-not-exist.log"),
        &Config::default(),
        AnalyzeOptions::default(),
    );

    let err = result.unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Io(_))));
}

/// Invalid overrides are rejected before the file is read
#[test]
fn test_analyze_rejects_zero_top() {
    let options = AnalyzeOptions {
        top: Some(0),
        max_error_percent: None,
    };

    let result = analyze_file(&fixture_path("sample.log"), &Config::default(), options);
    assert!(result.is_err());
}
