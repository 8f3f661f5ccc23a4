//! # route_tester
//!
//! **route_tester** turns a Rails application's route table into browser-test
//! scaffolding, reports which routes already have tests, and manages the HTML
//! and screenshot captures those tests leave behind.
//!
//! ## Overview
//!
//! The crate is a synchronous library. A route dump (for example the JSON or
//! YAML written by a `rails routes` export task) is loaded into a
//! [`RouteAnalyzer`]; generators render per-route files from built-in
//! templates; the coverage analyzer scans the project tree for existing tests.
//!
//! ## Architecture
//!
//! - **[`routes`]** - Route model, action buckets and the route analyzer
//! - **[`naming`]** - Class and file names, directory layout, inflections
//! - **[`templates`]** - Per-bucket template sections and file skeletons
//! - **[`generator`]** - Page object, RSpec and Cucumber generators
//! - **[`coverage`]** - Test discovery and coverage statistics
//! - **[`capture`]** - Test-time HTML/screenshot capture and retention sweep
//! - **[`config`]** - Project paths and framework selection
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Source as RouteSource
//!     participant Analyzer as RouteAnalyzer
//!     participant Gen as ArtifactGenerator
//!     participant Tpl as templates
//!     participant FS as File System
//!
//!     Caller->>Analyzer: RouteAnalyzer::new(&source, &config)
//!     Analyzer->>Source: load_routes()
//!     Source-->>Analyzer: Vec<RawRoute>
//!     Analyzer->>Analyzer: drop entries without a controller
//!     Caller->>Gen: generate_support_files(&options)
//!     Gen->>FS: create missing base page / helpers
//!     Caller->>Gen: generate_all(&options)
//!     loop every route
//!         Gen->>Tpl: render sections for the route's bucket
//!         Tpl-->>Gen: file content
//!         Gen->>FS: overwrite per-route file
//!     end
//!     Gen-->>Caller: written paths
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use route_tester::config::TesterConfig;
//! use route_tester::generator::{generator_for, GenerationOptions};
//! use route_tester::routes::{RouteAnalyzer, RouteFile};
//!
//! route_tester::logging::init_logging(&route_tester::logging::LogConfig::from_env())?;
//!
//! let config = TesterConfig::for_project("/srv/app").with_env_overrides()?;
//! let analyzer = Arc::new(RouteAnalyzer::new(&RouteFile::new("/srv/app/tmp/routes.json"), &config));
//!
//! let stats = analyzer.coverage_stats();
//! println!("{:.2}% of routes have tests", stats.overall_coverage);
//!
//! let generator = generator_for(&config, Arc::clone(&analyzer));
//! let options = GenerationOptions::default();
//! generator.generate_support_files(&options)?;
//! for path in generator.generate_all(&options) {
//!     println!("wrote {}", path.display());
//! }
//! ```
//!
//! ## Error Handling
//!
//! Lookups that find nothing return `Ok(None)`. Batch operations log and skip
//! the items that fail. See [`error::TesterError`] for what is surfaced.

pub mod capture;
pub mod config;
pub mod coverage;
pub mod error;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod routes;
pub mod templates;

pub use capture::{CaptureArtifact, CaptureStore, PageDriver};
pub use config::{TestFramework, TesterConfig};
pub use coverage::{CoverageAnalyzer, CoverageRecord, CoverageStats};
pub use error::{Result, TesterError};
pub use generator::{
    generator_for, ArtifactGenerator, CucumberGenerator, GenerationOptions, PomGenerator,
    RspecGenerator,
};
pub use routes::{ActionBucket, RawRoute, Route, RouteAnalyzer, RouteFile, RouteSource};
