//! # Configuration Module
//!
//! Explicit configuration for the analyzer, generators and capture store.
//!
//! ## Overview
//!
//! A single [`TesterConfig`] value is built once (defaults, a config file, or
//! environment overrides) and passed by reference into every constructor. There
//! is no process-wide settings object.
//!
//! ## Defaults
//!
//! | key | default |
//! |---|---|
//! | `project_root` | `.` |
//! | `pom_base_path` | `spec/support/page_objects` |
//! | `spec_base_path` | `spec/features` |
//! | `features_base_path` | `features` |
//! | `results_path` | `route_tests_results` |
//! | `test_framework` | `rspec` |
//!
//! ## Environment Variables
//!
//! - `ROUTE_TESTER_PROJECT_ROOT`
//! - `ROUTE_TESTER_POM_PATH`
//! - `ROUTE_TESTER_SPEC_PATH`
//! - `ROUTE_TESTER_FEATURES_PATH`
//! - `ROUTE_TESTER_RESULTS_PATH`
//! - `ROUTE_TESTER_FRAMEWORK` (`rspec` or `cucumber`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use route_tester::config::TesterConfig;
//!
//! let config = TesterConfig::from_file("route_tester.yaml")?.with_env_overrides()?;
//! println!("page objects go to {}", config.pom_dir().display());
//! ```

use crate::error::{Result, TesterError};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which behavior-testing framework the project drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    /// RSpec feature specs
    #[default]
    Rspec,
    /// Cucumber features plus step definitions
    Cucumber,
}

impl FromStr for TestFramework {
    type Err = TesterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rspec" => Ok(TestFramework::Rspec),
            "cucumber" => Ok(TestFramework::Cucumber),
            other => Err(TesterError::Config(format!(
                "unknown test framework '{other}' (expected rspec or cucumber)"
            ))),
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestFramework::Rspec => write!(f, "rspec"),
            TestFramework::Cucumber => write!(f, "cucumber"),
        }
    }
}

/// Path prefixes and framework selection for one target project.
///
/// All `*_path` fields are relative to `project_root` unless they are absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TesterConfig {
    /// Root of the application whose tests are generated and analyzed
    pub project_root: PathBuf,
    /// Where page objects are written
    pub pom_base_path: PathBuf,
    /// Where RSpec feature specs are written
    pub spec_base_path: PathBuf,
    /// Where Cucumber features (and `step_definitions/`) are written
    pub features_base_path: PathBuf,
    /// Where capture artifacts are retained
    pub results_path: PathBuf,
    /// Framework used by [`crate::generator::generator_for`]
    pub test_framework: TestFramework,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            pom_base_path: PathBuf::from("spec/support/page_objects"),
            spec_base_path: PathBuf::from("spec/features"),
            features_base_path: PathBuf::from("features"),
            results_path: PathBuf::from("route_tests_results"),
            test_framework: TestFramework::Rspec,
        }
    }
}

impl TesterConfig {
    /// Default configuration rooted at `root`
    pub fn for_project(root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: root.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML, TOML or JSON file (chosen by extension).
    ///
    /// Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TesterError::io(path, e))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        let parsed = match ext.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            "toml" => toml::from_str(&content).map_err(|e| e.to_string()),
            _ => serde_json::from_str(&content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|msg| TesterError::Config(format!("{}: {msg}", path.display())))
    }

    /// Apply `ROUTE_TESTER_*` environment overrides on top of `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if `ROUTE_TESTER_FRAMEWORK` names an unknown framework.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(v) = lookup("ROUTE_TESTER_PROJECT_ROOT") {
            self.project_root = PathBuf::from(v);
        }
        if let Some(v) = lookup("ROUTE_TESTER_POM_PATH") {
            self.pom_base_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("ROUTE_TESTER_SPEC_PATH") {
            self.spec_base_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("ROUTE_TESTER_FEATURES_PATH") {
            self.features_base_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("ROUTE_TESTER_RESULTS_PATH") {
            self.results_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("ROUTE_TESTER_FRAMEWORK") {
            self.test_framework = v.parse()?;
        }
        Ok(self)
    }

    /// Join a project-relative path onto `project_root`
    pub fn resolve(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(rel)
    }

    /// Absolute-or-rooted page object directory
    pub fn pom_dir(&self) -> PathBuf {
        self.resolve(&self.pom_base_path)
    }

    /// Rooted RSpec feature directory
    pub fn spec_dir(&self) -> PathBuf {
        self.resolve(&self.spec_base_path)
    }

    /// Rooted Cucumber features directory
    pub fn features_dir(&self) -> PathBuf {
        self.resolve(&self.features_base_path)
    }

    /// Rooted capture results directory
    pub fn results_dir(&self) -> PathBuf {
        self.resolve(&self.results_path)
    }
}
