//! # Routes Module
//!
//! The route data model and the [`RouteAnalyzer`] that lists, looks up and
//! cross-references routes against existing test files.
//!
//! ## Overview
//!
//! Route discovery itself happens outside this crate. A [`RouteSource`]
//! hands over raw entries (`name`, `verb`, `path`, `controller`, `action`,
//! `requirements`, `constraints`), which are normalized into [`Route`]s:
//!
//! - entries without a controller are not routable and are dropped
//! - the optional-format suffix `(.:format)` and the leading `/` are stripped
//! - a missing name is displayed as `"unnamed"`
//!
//! Each route maps onto an [`ActionBucket`] by exact action-name match. The
//! bucket selects which scaffolding template the generators use.
//!
//! ## Identity
//!
//! Generators key routes by `(controller, action)`. Several routes may share a
//! pair (e.g. `PATCH` and `PUT` both mapped to `update`); lookups always return
//! the first one in source order.
//!
//! ## Sources
//!
//! ```rust,ignore
//! use route_tester::routes::{RouteAnalyzer, RouteFile};
//! use route_tester::config::TesterConfig;
//!
//! let config = TesterConfig::default();
//! let analyzer = RouteAnalyzer::new(&RouteFile::new("tmp/routes.yaml"), &config);
//! for route in analyzer.list_routes() {
//!     println!("{} {} → {}", route.verb, route.path, route.full_path());
//! }
//! ```

mod analyzer;
#[cfg(test)]
mod tests;

pub use analyzer::{RouteAnalyzer, RouteCoverage};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Route entry as supplied by the routing collaborator, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRoute {
    /// Named-route identifier, if any
    pub name: Option<String>,
    /// HTTP method(s), e.g. `GET` or `GET|POST`
    pub verb: String,
    /// URL pattern, e.g. `/users/:id(.:format)`
    pub path: String,
    /// Resource name; entries without one are dropped
    pub controller: Option<String>,
    /// Operation name
    pub action: Option<String>,
    /// Opaque routing metadata, passed through untouched
    pub requirements: Value,
    /// Opaque routing metadata, passed through untouched
    pub constraints: Value,
}

/// Normalized route record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Named-route identifier (`None` when the route is anonymous)
    pub name: Option<String>,
    /// HTTP method(s)
    pub verb: String,
    /// Path without `(.:format)` and without the leading slash
    pub path: String,
    /// Resource name
    pub controller: String,
    /// Operation name
    pub action: String,
    /// Opaque routing metadata
    pub requirements: Value,
    /// Opaque routing metadata
    pub constraints: Value,
}

impl Route {
    /// Normalize a raw entry; `None` when it has no controller.
    pub fn from_raw(raw: RawRoute) -> Option<Self> {
        let controller = raw.controller.filter(|c| !c.is_empty())?;
        Some(Route {
            name: raw.name.filter(|n| !n.is_empty()),
            verb: raw.verb,
            path: clean_path(&raw.path),
            controller,
            action: raw.action.unwrap_or_default(),
            requirements: raw.requirements,
            constraints: raw.constraints,
        })
    }

    /// Convenience constructor for a minimal `GET` route
    pub fn new(controller: &str, action: &str) -> Self {
        Route {
            name: None,
            verb: "GET".to_string(),
            path: controller.to_string(),
            controller: controller.to_string(),
            action: action.to_string(),
            requirements: Value::Null,
            constraints: Value::Null,
        }
    }

    /// Name for display, `"unnamed"` when absent
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }

    /// `controller#action`
    pub fn full_path(&self) -> String {
        format!("{}#{}", self.controller, self.action)
    }

    /// Template bucket for this route's action
    pub fn bucket(&self) -> ActionBucket {
        ActionBucket::from_action(&self.action)
    }

    /// Ruby expression for the route's path: `users_path`, or a literal when anonymous
    pub fn path_helper(&self) -> String {
        match &self.name {
            Some(name) => format!("{name}_path"),
            None => format!("'/{}'", self.path),
        }
    }

    /// Ruby expression for the route's absolute URL
    pub fn url_helper(&self) -> String {
        match &self.name {
            Some(name) => format!("{name}_url"),
            None => format!("root_url + '{}'", self.path),
        }
    }

    /// True when this route has the given identity pair
    pub fn matches(&self, controller: &str, action: &str) -> bool {
        self.controller == controller && self.action == action
    }
}

/// Strip the optional-format suffix and the leading slash
pub fn clean_path(path: &str) -> String {
    let path = path.strip_suffix("(.:format)").unwrap_or(path);
    path.strip_prefix('/').unwrap_or(path).to_string()
}

/// Canonical CRUD-style action names used to pick a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionBucket {
    Index,
    Show,
    New,
    Create,
    Edit,
    Update,
    Destroy,
    /// Anything that is not one of the seven resourceful actions
    Other,
}

impl ActionBucket {
    /// Every bucket, in resourceful order
    pub const ALL: [ActionBucket; 8] = [
        ActionBucket::Index,
        ActionBucket::Show,
        ActionBucket::New,
        ActionBucket::Create,
        ActionBucket::Edit,
        ActionBucket::Update,
        ActionBucket::Destroy,
        ActionBucket::Other,
    ];

    /// Exact, case-sensitive match; unknown actions fall into [`ActionBucket::Other`]
    pub fn from_action(action: &str) -> Self {
        match action {
            "index" => ActionBucket::Index,
            "show" => ActionBucket::Show,
            "new" => ActionBucket::New,
            "create" => ActionBucket::Create,
            "edit" => ActionBucket::Edit,
            "update" => ActionBucket::Update,
            "destroy" => ActionBucket::Destroy,
            _ => ActionBucket::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionBucket::Index => "index",
            ActionBucket::Show => "show",
            ActionBucket::New => "new",
            ActionBucket::Create => "create",
            ActionBucket::Edit => "edit",
            ActionBucket::Update => "update",
            ActionBucket::Destroy => "destroy",
            ActionBucket::Other => "other",
        }
    }

    /// Buckets that operate on one existing record
    pub fn targets_member(self) -> bool {
        matches!(
            self,
            ActionBucket::Show | ActionBucket::Edit | ActionBucket::Update | ActionBucket::Destroy
        )
    }
}

impl fmt::Display for ActionBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supplier of raw route entries (the application's routing introspection).
pub trait RouteSource {
    /// Every raw route entry known to the source, in routing order
    fn load_routes(&self) -> anyhow::Result<Vec<RawRoute>>;
}

impl RouteSource for Vec<RawRoute> {
    fn load_routes(&self) -> anyhow::Result<Vec<RawRoute>> {
        Ok(self.clone())
    }
}

impl RouteSource for [RawRoute] {
    fn load_routes(&self) -> anyhow::Result<Vec<RawRoute>> {
        Ok(self.to_vec())
    }
}

/// A route dump on disk: a YAML (`.yaml`/`.yml`) or JSON list of raw entries
#[derive(Debug, Clone)]
pub struct RouteFile {
    path: PathBuf,
}

impl RouteFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RouteSource for RouteFile {
    fn load_routes(&self) -> anyhow::Result<Vec<RawRoute>> {
        use anyhow::Context;

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read route dump {:?}", self.path))?;
        let is_yaml = self
            .path
            .extension()
            .map(|s| s == "yaml" || s == "yml")
            .unwrap_or(false);
        let parsed: std::result::Result<Vec<RawRoute>, String> = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        };
        let routes = parsed.map_err(|message| crate::error::TesterError::RouteSource {
            path: self.path.clone(),
            message,
        })?;
        Ok(routes)
    }
}
