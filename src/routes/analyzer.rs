use super::{RawRoute, Route, RouteSource};
use crate::config::TesterConfig;
use crate::coverage::{CoverageAnalyzer, CoverageRecord, CoverageStats};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A route joined with the test files that exercise it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteCoverage {
    pub route: Route,
    pub coverage: CoverageRecord,
}

/// Normalized route list plus coverage queries against the project tree.
///
/// Routes are loaded once at construction; every query after that is a
/// read-only check of the filesystem.
#[derive(Debug, Clone)]
pub struct RouteAnalyzer {
    routes: Vec<Route>,
    coverage: CoverageAnalyzer,
}

impl RouteAnalyzer {
    /// Load and normalize routes from `source`.
    ///
    /// A failing source is not an error: it is logged and the analyzer starts
    /// with no routes, which makes every downstream batch a no-op.
    pub fn new<S: RouteSource + ?Sized>(source: &S, config: &TesterConfig) -> Self {
        let raw = match source.load_routes() {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Route source unavailable, continuing with no routes");
                Vec::new()
            }
        };
        Self::from_raw(raw, config)
    }

    /// Normalize already-loaded raw entries
    pub fn from_raw(raw: Vec<RawRoute>, config: &TesterConfig) -> Self {
        let total = raw.len();
        let routes: Vec<Route> = raw.into_iter().filter_map(Route::from_raw).collect();
        if routes.len() < total {
            debug!(
                dropped = total - routes.len(),
                "Dropped route entries without a controller"
            );
        }
        info!(routes = routes.len(), "Routes loaded");
        Self::from_routes(routes, config)
    }

    /// Wrap an already-normalized route list
    pub fn from_routes(routes: Vec<Route>, config: &TesterConfig) -> Self {
        Self {
            routes,
            coverage: CoverageAnalyzer::new(config),
        }
    }

    /// Every normalized route, in source order
    pub fn list_routes(&self) -> &[Route] {
        &self.routes
    }

    /// First route with the given pair; later duplicates are never returned
    pub fn find_route(&self, controller: &str, action: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.matches(controller, action))
    }

    pub fn coverage_analyzer(&self) -> &CoverageAnalyzer {
        &self.coverage
    }

    /// Every route with its coverage record
    pub fn routes_with_tests(&self) -> Vec<RouteCoverage> {
        self.routes
            .iter()
            .map(|route| RouteCoverage {
                route: route.clone(),
                coverage: self.coverage.find_related_tests(route),
            })
            .collect()
    }

    /// Routes with no rspec, cucumber or minitest match
    pub fn routes_without_tests(&self) -> Vec<RouteCoverage> {
        self.routes_with_tests()
            .into_iter()
            .filter(|rc| !rc.coverage.has_tests())
            .collect()
    }

    /// Routes with no page object on disk
    pub fn routes_without_poms(&self) -> Vec<RouteCoverage> {
        self.routes_with_tests()
            .into_iter()
            .filter(|rc| !rc.coverage.has_page_objects())
            .collect()
    }

    /// Coverage statistics over every route
    pub fn coverage_stats(&self) -> CoverageStats {
        let records: Vec<CoverageRecord> = self
            .routes
            .iter()
            .map(|r| self.coverage.find_related_tests(r))
            .collect();
        CoverageAnalyzer::stats_from_records(&records)
    }
}
