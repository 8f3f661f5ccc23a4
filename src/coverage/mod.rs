//! # Coverage Module
//!
//! Correlates routes with test files that already exist in the project.
//!
//! ## Matching
//!
//! For every framework a handful of filename globs keyed by the route's
//! controller and action select candidate files. A candidate only counts when
//! its content references the route (see [`ReferencePatterns`]); a file that
//! merely happens to be named `users_spec.rb` but never mentions users is
//! ignored. Matches are de-duplicated in first-seen order.
//!
//! ## Statistics
//!
//! [`CoverageAnalyzer::coverage_stats`] aggregates per-framework counts and
//! percentages rounded to two decimals. An empty route set produces all-zero
//! statistics.

mod glob;
mod reference;

pub use glob::{glob_files, glob_to_regex};
pub use reference::{file_contains_reference, ReferencePatterns};

use crate::config::TesterConfig;
use crate::naming::{file_name, ArtifactKind};
use crate::routes::Route;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Test frameworks searched for existing coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Rspec,
    Cucumber,
    Minitest,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::Rspec, Framework::Cucumber, Framework::Minitest];

    /// Project-relative globs for one `(controller, action)` pair
    pub fn patterns(self, controller: &str, action: &str) -> Vec<String> {
        let (c, a) = (controller, action);
        match self {
            Framework::Rspec => vec![
                format!("spec/**/*{c}*spec.rb"),
                format!("spec/**/*{a}*spec.rb"),
                format!("spec/**/*{c}_{a}*spec.rb"),
            ],
            Framework::Cucumber => vec![
                format!("features/**/*{c}*.feature"),
                format!("features/**/*{a}*.feature"),
                format!("features/**/*{c}_{a}*.feature"),
                format!("features/step_definitions/**/*{c}*steps.rb"),
                format!("features/step_definitions/**/*{a}*steps.rb"),
            ],
            Framework::Minitest => vec![
                format!("test/**/*{c}*test.rb"),
                format!("test/**/*{a}*test.rb"),
                format!("test/**/*{c}_{a}*test.rb"),
            ],
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::Rspec => write!(f, "rspec"),
            Framework::Cucumber => write!(f, "cucumber"),
            Framework::Minitest => write!(f, "minitest"),
        }
    }
}

/// Existing files that exercise one route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageRecord {
    pub rspec: Vec<PathBuf>,
    pub cucumber: Vec<PathBuf>,
    pub minitest: Vec<PathBuf>,
    /// Page objects present for the route (existence only, no content check)
    pub page_objects: Vec<PathBuf>,
}

impl CoverageRecord {
    pub fn for_framework(&self, framework: Framework) -> &[PathBuf] {
        match framework {
            Framework::Rspec => &self.rspec,
            Framework::Cucumber => &self.cucumber,
            Framework::Minitest => &self.minitest,
        }
    }

    /// True when at least one framework has a verified match
    pub fn has_tests(&self) -> bool {
        Framework::ALL
            .iter()
            .any(|f| !self.for_framework(*f).is_empty())
    }

    pub fn has_page_objects(&self) -> bool {
        !self.page_objects.is_empty()
    }
}

/// Aggregate coverage over a route set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub total_routes: usize,
    pub routes_with_rspec: usize,
    pub routes_with_cucumber: usize,
    pub routes_with_minitest: usize,
    pub routes_with_any_test: usize,
    pub rspec_coverage: f64,
    pub cucumber_coverage: f64,
    pub minitest_coverage: f64,
    pub overall_coverage: f64,
}

/// Percentage rounded to two decimals; `0.0` when `total` is zero
fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Filesystem-backed coverage search rooted at the project
#[derive(Debug, Clone)]
pub struct CoverageAnalyzer {
    project_root: PathBuf,
    pom_dir: PathBuf,
}

impl CoverageAnalyzer {
    pub fn new(config: &TesterConfig) -> Self {
        Self {
            project_root: config.project_root.clone(),
            pom_dir: config.pom_dir(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Every verified test file and page object for `route`
    pub fn find_related_tests(&self, route: &Route) -> CoverageRecord {
        let references = ReferencePatterns::for_route(route);
        let mut record = CoverageRecord {
            page_objects: self.find_page_objects(route),
            ..CoverageRecord::default()
        };
        for framework in Framework::ALL {
            let found = self.search(framework, route, &references);
            match framework {
                Framework::Rspec => record.rspec = found,
                Framework::Cucumber => record.cucumber = found,
                Framework::Minitest => record.minitest = found,
            }
        }
        record
    }

    /// Verified matches for a single framework
    pub fn find_framework_tests(&self, framework: Framework, route: &Route) -> Vec<PathBuf> {
        self.search(framework, route, &ReferencePatterns::for_route(route))
    }

    fn search(
        &self,
        framework: Framework,
        route: &Route,
        references: &ReferencePatterns,
    ) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = Vec::new();
        for pattern in framework.patterns(&route.controller, &route.action) {
            for candidate in glob_files(&self.project_root, &pattern) {
                if found.contains(&candidate) {
                    continue;
                }
                let verified = std::fs::read_to_string(&candidate)
                    .map(|content| references.matches(&content))
                    .unwrap_or(false);
                if verified {
                    found.push(candidate);
                } else {
                    debug!(
                        framework = %framework,
                        route = %route.full_path(),
                        path = %candidate.display(),
                        "Candidate does not reference route"
                    );
                }
            }
        }
        found
    }

    /// `<pom>/<c>_<a>_page.rb` and `<pom>/<c>_page.rb`, when present
    pub fn find_page_objects(&self, route: &Route) -> Vec<PathBuf> {
        let per_action = self.pom_dir.join(file_name(
            &route.controller,
            &route.action,
            ArtifactKind::PageObject,
        ));
        let per_controller = self.pom_dir.join(format!("{}_page.rb", route.controller));
        [per_action, per_controller]
            .into_iter()
            .filter(|p| p.is_file())
            .collect()
    }

    /// Whether the file at `path` references `route`
    pub fn file_contains_reference(&self, path: &Path, route: &Route) -> bool {
        file_contains_reference(path, route)
    }

    /// Per-framework and overall coverage over `routes`
    pub fn coverage_stats(&self, routes: &[Route]) -> CoverageStats {
        let records: Vec<CoverageRecord> =
            routes.iter().map(|r| self.find_related_tests(r)).collect();
        Self::stats_from_records(&records)
    }

    /// Aggregate already-computed records
    pub fn stats_from_records(records: &[CoverageRecord]) -> CoverageStats {
        let total = records.len();
        let count = |f: Framework| {
            records
                .iter()
                .filter(|r| !r.for_framework(f).is_empty())
                .count()
        };
        let rspec = count(Framework::Rspec);
        let cucumber = count(Framework::Cucumber);
        let minitest = count(Framework::Minitest);
        let any = records.iter().filter(|r| r.has_tests()).count();

        CoverageStats {
            total_routes: total,
            routes_with_rspec: rspec,
            routes_with_cucumber: cucumber,
            routes_with_minitest: minitest,
            routes_with_any_test: any,
            rspec_coverage: percentage(rspec, total),
            cucumber_coverage: percentage(cucumber, total),
            minitest_coverage: percentage(minitest, total),
            overall_coverage: percentage(any, total),
        }
    }
}
