//! # Capture Module
//!
//! Persists what the browser showed while a generated test ran, and sweeps
//! old results away.
//!
//! ## Overview
//!
//! A [`CaptureStore`] wraps a [`PageDriver`] (the browser session of the
//! running test) and a results root. Each capture gets its own directory:
//!
//! ```text
//! route_tests_results/
//! └── users_index_works_20251019_143005_123/
//!     ├── users_index_works_20251019_143005_123_I_visit.html
//!     ├── users_index_works_20251019_143005_123_I_visit.png
//!     └── users_index_works_20251019_143005_123_metadata.json
//! ```
//!
//! The test id is the example name with every non-alphanumeric character
//! replaced by `_`, followed by a millisecond timestamp. The same timestamp
//! suffix is what [`cleanup_results_dir`] parses to decide what is stale.
//!
//! ## Failure Handling
//!
//! The driver is consulted opportunistically. A driver call that fails is
//! logged at `warn` and replaced by a placeholder (empty markup, `"unknown"`
//! URL or title, no screenshot). Only failures to write the store's own
//! files are returned as errors.

#[cfg(test)]
mod tests;

use crate::config::TesterConfig;
use crate::error::{Result, TesterError};
use askama::Template;
use chrono::{DateTime, Local, NaiveDateTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// `strftime` format of the timestamp suffix on every test id
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";

/// Placeholder for driver values that could not be read
pub const UNKNOWN: &str = "unknown";

static RESULT_DIR_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_(\d{8}_\d{6}_\d{3})$").expect("result directory regex should be valid")
});

static BODY_OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<body[^>]*>").expect("body tag regex should be valid"));

/// Browser viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// The browser session a capture reads from.
///
/// Every method may fail; the store never aborts a capture because of it.
pub trait PageDriver {
    /// Current page markup
    fn page_html(&self) -> anyhow::Result<String>;

    /// Write a full-page screenshot to `path`
    fn save_screenshot(&self, path: &Path) -> anyhow::Result<()>;

    fn current_url(&self) -> anyhow::Result<String>;

    fn title(&self) -> anyhow::Result<String>;

    fn user_agent(&self) -> anyhow::Result<String> {
        anyhow::bail!("driver does not expose a user agent")
    }

    fn window_size(&self) -> anyhow::Result<WindowSize> {
        anyhow::bail!("driver does not expose a window size")
    }
}

/// Files written by one capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureArtifact {
    pub test_id: String,
    pub results_dir: PathBuf,
    pub html_path: PathBuf,
    /// `None` when the driver could not take a screenshot
    pub png_path: Option<PathBuf>,
    pub metadata_path: PathBuf,
}

/// Contents of `<test_id>_metadata.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    pub test_id: String,
    pub example_name: String,
    pub step_name: Option<String>,
    /// RFC 3339
    pub timestamp: String,
    pub current_url: String,
    pub page_title: String,
    pub files: CaptureFiles,
    pub browser_info: BrowserInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFiles {
    pub html: PathBuf,
    pub png: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserInfo {
    pub user_agent: String,
    pub window_size: Option<WindowSize>,
}

#[derive(Template)]
#[template(path = "capture_overlay.html")]
struct CaptureOverlay<'a> {
    test_id: &'a str,
    step_name: &'a str,
    time: String,
    current_url: &'a str,
}

/// Replace every character outside `[A-Za-z0-9]` with `_`
pub fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// `<slug(example_name)>_<timestamp>`
pub fn test_id(example_name: &str, now: DateTime<Local>) -> String {
    format!("{}_{}", slug(example_name), now.format(TIMESTAMP_FORMAT))
}

/// Breaks up `--` so a value cannot close the metadata comment early
fn comment_text(value: &str) -> String {
    let mut text = value.to_string();
    while text.contains("--") {
        text = text.replace("--", "- -");
    }
    text
}

/// Insert the metadata comment and the debug overlay after each `<body>` tag.
///
/// Markup without a body tag is returned unchanged. Overlay values are
/// HTML-escaped and comment values never contain `--`.
pub fn enhance_html(
    html: &str,
    test_id: &str,
    step_name: Option<&str>,
    current_url: &str,
    now: DateTime<Local>,
) -> Result<String> {
    let comment = format!(
        "<!-- Test Capture Metadata: test_id={}, step_name={}, timestamp={} -->",
        comment_text(test_id),
        comment_text(step_name.unwrap_or_default()),
        now.to_rfc3339()
    );
    let overlay = CaptureOverlay {
        test_id,
        step_name: step_name.unwrap_or("N/A"),
        time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        current_url,
    }
    .render()?;
    let enhanced = BODY_OPEN_TAG.replace_all(html, |caps: &Captures<'_>| {
        format!("{}\n{comment}\n{overlay}\n", &caps[0])
    });
    Ok(enhanced.into_owned())
}

/// Writes capture artifacts under one results root
#[derive(Debug)]
pub struct CaptureStore<D> {
    results_root: PathBuf,
    driver: D,
}

impl<D: PageDriver> CaptureStore<D> {
    /// Store rooted at the configured results directory
    pub fn new(config: &TesterConfig, driver: D) -> Self {
        Self::with_root(config.results_dir(), driver)
    }

    pub fn with_root(results_root: impl Into<PathBuf>, driver: D) -> Self {
        Self {
            results_root: results_root.into(),
            driver,
        }
    }

    pub fn results_root(&self) -> &Path {
        &self.results_root
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Capture markup, screenshot and metadata for the current page.
    ///
    /// # Errors
    ///
    /// Returns an error if the result directory, the HTML snapshot or the
    /// metadata file cannot be written.
    pub fn capture_test_results(
        &self,
        example_name: &str,
        step_name: Option<&str>,
    ) -> Result<CaptureArtifact> {
        self.capture_test_results_at(example_name, step_name, Local::now())
    }

    /// [`Self::capture_test_results`] with an explicit clock value
    pub fn capture_test_results_at(
        &self,
        example_name: &str,
        step_name: Option<&str>,
        now: DateTime<Local>,
    ) -> Result<CaptureArtifact> {
        let test_id = test_id(example_name, now);
        let results_dir = self.results_root.join(&test_id);
        fs::create_dir_all(&results_dir).map_err(|e| TesterError::io(&results_dir, e))?;

        let stem = match step_name {
            Some(step) => format!("{test_id}_{}", slug(step)),
            None => test_id.clone(),
        };

        let current_url = placeholder(self.driver.current_url(), "current_url", &test_id)
            .unwrap_or_else(|| UNKNOWN.to_string());
        let markup = placeholder(self.driver.page_html(), "page_html", &test_id).unwrap_or_default();
        let html_path = results_dir.join(format!("{stem}.html"));
        let enhanced = enhance_html(&markup, &test_id, step_name, &current_url, now)?;
        fs::write(&html_path, enhanced).map_err(|e| TesterError::io(&html_path, e))?;

        let screenshot = results_dir.join(format!("{stem}.png"));
        let png_path = placeholder(self.driver.save_screenshot(&screenshot), "screenshot", &test_id)
            .map(|()| screenshot);

        let metadata = CaptureMetadata {
            test_id: test_id.clone(),
            example_name: example_name.to_string(),
            step_name: step_name.map(str::to_string),
            timestamp: now.to_rfc3339(),
            current_url,
            page_title: placeholder(self.driver.title(), "title", &test_id)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            files: CaptureFiles {
                html: html_path.clone(),
                png: png_path.clone(),
            },
            browser_info: BrowserInfo {
                user_agent: self.driver.user_agent().unwrap_or_else(|e| {
                    debug!(test_id = %test_id, error = %e, "User agent unavailable");
                    UNKNOWN.to_string()
                }),
                window_size: self.driver.window_size().ok(),
            },
        };
        let metadata_path = results_dir.join(format!("{test_id}_metadata.json"));
        let json = serde_json::to_string_pretty(&metadata)?;
        fs::write(&metadata_path, json).map_err(|e| TesterError::io(&metadata_path, e))?;

        info!(test_id = %test_id, dir = %results_dir.display(), "Captured test results");
        Ok(CaptureArtifact {
            test_id,
            results_dir,
            html_path,
            png_path,
            metadata_path,
        })
    }

    /// Remove result directories older than `keep_days`
    pub fn cleanup_old_results(&self, keep_days: u32) -> Result<Vec<PathBuf>> {
        cleanup_results_dir(&self.results_root, keep_days, Local::now())
    }

    /// [`Self::cleanup_old_results`] with an explicit clock value
    pub fn cleanup_old_results_at(
        &self,
        keep_days: u32,
        now: DateTime<Local>,
    ) -> Result<Vec<PathBuf>> {
        cleanup_results_dir(&self.results_root, keep_days, now)
    }
}

fn placeholder<T>(result: anyhow::Result<T>, what: &str, test_id: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(test_id, collaborator = what, error = %e, "Page driver call failed, using placeholder");
            None
        }
    }
}

/// Timestamp encoded in a result directory name, if it has one
pub fn parse_result_timestamp(dir_name: &str) -> Option<NaiveDateTime> {
    let caps = RESULT_DIR_TIMESTAMP.captures(dir_name)?;
    NaiveDateTime::parse_from_str(&caps[1], TIMESTAMP_FORMAT).ok()
}

/// Delete every directory under `root` whose name timestamp is older than
/// `now - keep_days`.
///
/// Files, directories without a parsable timestamp and directories that
/// cannot be removed are left in place. A missing root yields an empty list.
///
/// # Errors
///
/// Returns an error if `root` exists but cannot be listed.
pub fn cleanup_results_dir(
    root: &Path,
    keep_days: u32,
    now: DateTime<Local>,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        debug!(root = %root.display(), "No results directory to clean");
        return Ok(Vec::new());
    }
    let Some(cutoff) = now
        .naive_local()
        .checked_sub_signed(TimeDelta::days(i64::from(keep_days)))
    else {
        return Ok(Vec::new());
    };

    let mut removed = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| TesterError::io(root, e))? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!(root = %root.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }
        let Some(stamp) = entry.file_name().to_str().and_then(parse_result_timestamp) else {
            debug!(path = %path.display(), "Result entry has no timestamp, keeping");
            continue;
        };
        if stamp >= cutoff {
            continue;
        }
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                info!(path = %path.display(), "Cleaned up old test results");
                removed.push(path);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove old test results"),
        }
    }
    removed.sort();
    Ok(removed)
}
