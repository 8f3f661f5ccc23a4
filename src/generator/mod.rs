//! # Generator Module
//!
//! Writes test scaffolding for routes: page objects, RSpec feature specs and
//! Cucumber features with step definitions.
//!
//! ## Overview
//!
//! Every generator implements [`ArtifactGenerator`]:
//!
//! - [`ArtifactGenerator::generate_for_route`] renders and writes the files for
//!   one `(controller, action)` pair. An unknown pair is `Ok(None)`, not an error.
//! - [`ArtifactGenerator::generate_all`] runs over every route the analyzer
//!   knows. A failing route is logged with its controller and action and the
//!   batch moves on; the return value lists only the files that were written.
//! - [`ArtifactGenerator::generate_support_files`] bootstraps shared files
//!   (base page, helpers, Cucumber env). These are created only when absent
//!   and never overwritten.
//!
//! Per-route files are always overwritten. Their content is a pure function of
//! the route, so regenerating an unchanged route rewrites identical bytes.
//!
//! ## Generated Structure
//!
//! With the default configuration:
//!
//! ```text
//! spec/
//! ├── spec_helper.rb
//! ├── rails_helper.rb
//! ├── features/
//! │   └── users_index_spec.rb          # RspecGenerator
//! └── support/
//!     ├── feature_helper.rb
//!     └── page_objects/
//!         ├── base_page.rb
//!         └── users_index_page.rb      # PomGenerator
//! features/
//! ├── users_index.feature              # CucumberGenerator
//! ├── step_definitions/
//! │   ├── common_steps.rb
//! │   └── users_index_steps.rb
//! └── support/
//!     ├── env.rb
//!     └── world_extensions.rb
//! cucumber.yml
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use route_tester::config::TesterConfig;
//! use route_tester::generator::{generator_for, GenerationOptions};
//! use route_tester::routes::{RouteAnalyzer, RouteFile};
//!
//! let config = TesterConfig::for_project("/srv/app");
//! let analyzer = Arc::new(RouteAnalyzer::new(&RouteFile::new("tmp/routes.json"), &config));
//! let generator = generator_for(&config, analyzer);
//! let options = GenerationOptions::default();
//! generator.generate_support_files(&options)?;
//! let written = generator.generate_all(&options);
//! ```

mod cucumber;
mod page_object;
mod rspec;

pub use cucumber::CucumberGenerator;
pub use page_object::PomGenerator;
pub use rspec::RspecGenerator;

use crate::config::{TestFramework, TesterConfig};
use crate::error::{Result, TesterError};
use crate::naming::PathLayout;
use crate::routes::{ActionBucket, Route, RouteAnalyzer};
use crate::templates::SupportFile;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Decides whether a route's feature background signs a user in
pub type AuthPredicate = Arc<dyn Fn(&Route) -> bool + Send + Sync>;

/// Every bucket except `index` and `show` is assumed to need a signed-in user
pub fn default_requires_auth(route: &Route) -> bool {
    !matches!(route.bucket(), ActionBucket::Index | ActionBucket::Show)
}

/// Per-call generation options
#[derive(Clone)]
pub struct GenerationOptions {
    /// Override for the page object directory
    pub pom_dir: Option<PathBuf>,
    /// Override for the RSpec feature directory
    pub spec_dir: Option<PathBuf>,
    /// Override for the Cucumber features directory
    pub features_dir: Option<PathBuf>,
    /// Override for the step definitions directory
    pub step_definitions_dir: Option<PathBuf>,
    /// Authentication predicate
    pub requires_auth: AuthPredicate,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            pom_dir: None,
            spec_dir: None,
            features_dir: None,
            step_definitions_dir: None,
            requires_auth: Arc::new(default_requires_auth),
        }
    }
}

impl fmt::Debug for GenerationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationOptions")
            .field("pom_dir", &self.pom_dir)
            .field("spec_dir", &self.spec_dir)
            .field("features_dir", &self.features_dir)
            .field("step_definitions_dir", &self.step_definitions_dir)
            .finish_non_exhaustive()
    }
}

impl GenerationOptions {
    /// Replace the authentication predicate
    pub fn with_auth<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Route) -> bool + Send + Sync + 'static,
    {
        self.requires_auth = Arc::new(predicate);
        self
    }

    pub fn requires_authentication(&self, route: &Route) -> bool {
        (self.requires_auth)(route)
    }

    /// Configured layout with this call's overrides applied.
    ///
    /// Relative overrides resolve against the project root. Overriding the
    /// features directory moves the default step definitions directory with it.
    pub fn layout(&self, config: &TesterConfig) -> PathLayout {
        let mut layout = PathLayout::from_config(config);
        if let Some(dir) = &self.pom_dir {
            layout.pom_dir = config.resolve(dir);
        }
        if let Some(dir) = &self.spec_dir {
            layout.spec_dir = config.resolve(dir);
        }
        if let Some(dir) = &self.features_dir {
            layout.features_dir = config.resolve(dir);
            layout.step_definitions_dir = layout.features_dir.join("step_definitions");
        }
        if let Some(dir) = &self.step_definitions_dir {
            layout.step_definitions_dir = config.resolve(dir);
        }
        layout
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TesterError::io(parent, e))?;
    }
    Ok(())
}

/// Write a per-route artifact, replacing whatever is there
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|e| TesterError::io(path, e))?;
    info!(path = %path.display(), bytes = content.len(), "Wrote artifact");
    Ok(())
}

/// Write `content` only if nothing exists at `path`.
///
/// Uses an exclusive create, so two racing callers cannot both write. Returns
/// `true` when this call created the file.
pub fn create_if_absent(path: &Path, content: &str) -> Result<bool> {
    ensure_parent(path)?;
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(content.as_bytes())
                .map_err(|e| TesterError::io(path, e))?;
            info!(path = %path.display(), "Created support file");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            debug!(path = %path.display(), "Support file already present, skipping");
            Ok(false)
        }
        Err(e) => Err(TesterError::io(path, e)),
    }
}

/// Bootstrap `files` under `layout`, returning the ones created by this call
pub(crate) fn write_support_files(
    files: &[SupportFile],
    layout: &PathLayout,
    config: &TesterConfig,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for file in files {
        let path = file.path(layout);
        if path.exists() {
            debug!(path = %path.display(), "Support file already present, skipping");
            continue;
        }
        if create_if_absent(&path, &file.render(&config.results_path)?)? {
            written.push(path);
        }
    }
    Ok(written)
}

/// Shared contract of the page object, RSpec and Cucumber generators
pub trait ArtifactGenerator {
    /// Short name used in log events
    fn name(&self) -> &'static str;

    /// Routes this generator works over
    fn analyzer(&self) -> &RouteAnalyzer;

    /// Write every artifact for the first route matching the pair.
    ///
    /// Returns `Ok(None)` when no route matches.
    fn generate_for_route(
        &self,
        controller: &str,
        action: &str,
        options: &GenerationOptions,
    ) -> Result<Option<Vec<PathBuf>>>;

    /// Generate for every route, skipping (and logging) routes that fail.
    ///
    /// Routes sharing a `(controller, action)` pair all resolve to the first
    /// one, so such a pair is generated once per occurrence with identical
    /// output.
    fn generate_all(&self, options: &GenerationOptions) -> Vec<PathBuf> {
        let mut generated = Vec::new();
        for route in self.analyzer().list_routes() {
            match self.generate_for_route(&route.controller, &route.action, options) {
                Ok(Some(paths)) => generated.extend(paths),
                Ok(None) => {}
                Err(e) => {
                    error!(
                        generator = self.name(),
                        controller = %route.controller,
                        action = %route.action,
                        error = %e,
                        "Generation failed for route, continuing"
                    );
                }
            }
        }
        info!(generator = self.name(), files = generated.len(), "Batch generation finished");
        generated
    }

    /// Create shared bootstrap files that do not exist yet.
    ///
    /// Returns only the files created by this call; a second call writes nothing.
    fn generate_support_files(&self, options: &GenerationOptions) -> Result<Vec<PathBuf>>;
}

/// Generator for the configured test framework
pub fn generator_for(
    config: &TesterConfig,
    analyzer: Arc<RouteAnalyzer>,
) -> Box<dyn ArtifactGenerator + Send + Sync> {
    match config.test_framework {
        TestFramework::Rspec => Box::new(RspecGenerator::new(config, analyzer)),
        TestFramework::Cucumber => Box::new(CucumberGenerator::new(config, analyzer)),
    }
}
