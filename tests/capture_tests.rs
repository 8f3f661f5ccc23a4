#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use chrono::{DateTime, Local, TimeDelta, TimeZone};
use common::project::TestProject;
use route_tester::capture::{CaptureMetadata, CaptureStore, PageDriver, TIMESTAMP_FORMAT, UNKNOWN};
use std::cell::Cell;
use std::fs;
use std::path::Path;

/// Driver whose screenshot and title calls fail, as with a headless rack driver
struct RackDriver {
    screenshots: Cell<usize>,
}

impl PageDriver for RackDriver {
    fn page_html(&self) -> anyhow::Result<String> {
        Ok("<!DOCTYPE html><html><head></head><body><script>alert('x')</script></body></html>".into())
    }

    fn save_screenshot(&self, _path: &Path) -> anyhow::Result<()> {
        self.screenshots.set(self.screenshots.get() + 1);
        anyhow::bail!("screenshots are not supported by this driver")
    }

    fn current_url(&self) -> anyhow::Result<String> {
        Ok("http://www.example.com/users?q=<b>".into())
    }

    fn title(&self) -> anyhow::Result<String> {
        anyhow::bail!("no title")
    }
}

fn noon() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 10, 19, 12, 0, 0).unwrap()
}

fn result_dir_name(prefix: &str, at: DateTime<Local>) -> String {
    format!("{prefix}_{}", at.format(TIMESTAMP_FORMAT))
}

#[test]
fn test_capture_under_configured_results_path() {
    let mut project = TestProject::new();
    project.config.results_path = "tmp/route_results".into();
    let store = CaptureStore::new(
        &project.config,
        RackDriver {
            screenshots: Cell::new(0),
        },
    );
    let artifact = store
        .capture_test_results_at("Users page: lists users", Some("after visit"), noon())
        .unwrap();

    assert_eq!(artifact.test_id, "Users_page__lists_users_20251019_120000_000");
    assert!(artifact
        .results_dir
        .starts_with(project.root().join("tmp/route_results")));
    assert_eq!(artifact.png_path, None);
    assert_eq!(store.driver().screenshots.get(), 1);

    let html = fs::read_to_string(&artifact.html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html><html><head></head><body>\n<!-- Test Capture Metadata:"));
    assert!(html.contains("<script>alert('x')</script>"));
    assert!(html.contains("http://www.example.com/users?q=&#60;b&#62;"));
    assert!(!html.contains("q=<b>"));

    let metadata: CaptureMetadata =
        serde_json::from_str(&fs::read_to_string(&artifact.metadata_path).unwrap()).unwrap();
    assert_eq!(metadata.page_title, UNKNOWN);
    assert_eq!(metadata.current_url, "http://www.example.com/users?q=<b>");
    assert_eq!(metadata.browser_info.user_agent, UNKNOWN);
    assert_eq!(metadata.files.png, None);
}

#[test]
fn test_retention_sweep() {
    let project = TestProject::new();
    let store = CaptureStore::new(
        &project.config,
        RackDriver {
            screenshots: Cell::new(0),
        },
    );
    let root = project.config.results_dir();

    let six_days = root.join(result_dir_name("recent", noon() - TimeDelta::days(6)));
    let eight_days = root.join(result_dir_name("old", noon() - TimeDelta::days(8)));
    let malformed = root.join("old_2025101_120000_000");
    let unparsable = root.join("old_20251019_250000_000");
    for dir in [&six_days, &eight_days, &malformed, &unparsable] {
        fs::create_dir_all(dir.join("nested")).unwrap();
    }

    let removed = store.cleanup_old_results_at(7, noon()).unwrap();
    assert_eq!(removed, vec![eight_days.clone()]);
    assert!(!eight_days.exists());
    assert!(six_days.is_dir());
    assert!(malformed.is_dir());
    assert!(unparsable.is_dir());

    assert!(store.cleanup_old_results_at(7, noon()).unwrap().is_empty());
    assert_eq!(store.cleanup_old_results_at(0, noon()).unwrap(), vec![six_days]);
}

#[test]
fn test_fresh_capture_survives_sweep() {
    let project = TestProject::new();
    let store = CaptureStore::new(
        &project.config,
        RackDriver {
            screenshots: Cell::new(0),
        },
    );
    let artifact = store.capture_test_results("smoke", None).unwrap();
    assert!(store.cleanup_old_results(7).unwrap().is_empty());
    assert!(artifact.metadata_path.is_file());
}
