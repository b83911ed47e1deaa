use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_logtop_bin() -> PathBuf {
    assert_cmd::cargo::cargo_bin("logtop")
}

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

#[test]
fn test_help() {
    let mut cmd = Command::new(get_logtop_bin());
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_analyze_json_output() {
    let mut cmd = Command::new(get_logtop_bin());
    cmd.arg("--format")
        .arg("json")
        .arg("analyze")
        .arg(fixture_path("sample.log"))
        .arg("--top")
        .arg("2")
        .arg("--max-error-percent")
        .arg("20");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"unique_url_count\": 5"))
        .stdout(predicate::str::contains("/api/v2/slot/4705/groups"))
        .stdout(predicate::str::contains("/api/v2/banner/16852664").not());
}

#[test]
fn test_analyze_table_output() {
    let mut cmd = Command::new(get_logtop_bin());
    cmd.args(["-f", "table", "analyze"])
        .arg(fixture_path("sample.log"))
        .args(["--top", "1", "--max-error-percent", "20"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(
            "url,count,count_perc,time_sum,time_perc,time_avg,time_max,time_med",
        ))
        .stdout(predicate::str::contains("/api/v2/slot/4705/groups,2,22.222,1.204,"));
}

#[test]
fn test_analyze_parse_quality_exit_code() {
    let mut cmd = Command::new(get_logtop_bin());
    cmd.arg("analyze").arg(fixture_path("sample.log"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Too many unparsed lines"));
}

#[test]
fn test_report_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_dir = temp_dir.path().join("log");
    let report_dir = temp_dir.path().join("reports");
    fs::create_dir_all(&log_dir).unwrap();
    fs::copy(
        fixture_path("sample.log"),
        log_dir.join("nginx-access-ui.log-20170630"),
    )
    .unwrap();

    let template = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("templates")
        .join("report.html");
    let config_path = temp_dir.path().join("logtop.toml");
    fs::write(
        &config_path,
        format!(
            "log_dir = {:?}\nreport_dir = {:?}\ntemplate = {:?}\nmax_error_percent = 20.0\n",
            log_dir.display().to_string(),
            report_dir.display().to_string(),
            template.display().to_string()
        ),
    )
    .unwrap();

    let mut cmd = Command::new(get_logtop_bin());
    cmd.arg("--config").arg(&config_path).arg("report");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Report written"));
    assert!(report_dir.join("report-2017.06.30.html").exists());

    // second run finds the existing report
    let mut cmd = Command::new(get_logtop_bin());
    cmd.arg("--config").arg(&config_path).arg("report");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Report already exists"));
}

#[test]
fn test_missing_config_file() {
    let mut cmd = Command::new(get_logtop_bin());
    cmd.args(["--config", "/no/such/logtop.toml", "report"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}
