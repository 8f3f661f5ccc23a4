//! Content checks that decide whether a glob hit actually exercises a route.
//!
//! A file named `users_spec.rb` is only counted when its text mentions the
//! route. The check is a fixed, ordered list of regex predicates; it has no
//! understanding of Ruby and is not meant to.

use crate::naming::camelize;
use crate::routes::Route;
use regex::{Regex, RegexBuilder};
use std::path::Path;
use tracing::debug;

/// HTTP helpers that count as a request against the controller
const VERB_HELPERS: [&str; 6] = ["visit", "get", "post", "put", "patch", "delete"];

/// Ordered reference predicates for one route
#[derive(Debug, Clone)]
pub struct ReferencePatterns {
    patterns: Vec<Regex>,
}

impl ReferencePatterns {
    pub fn for_route(route: &Route) -> Self {
        let controller = regex::escape(&route.controller);
        let action = regex::escape(&route.action);
        let constant = regex::escape(&camelize(&route.controller));

        let mut patterns = Vec::new();
        for literal in [&controller, &action] {
            if literal.is_empty() {
                continue;
            }
            if let Ok(re) = RegexBuilder::new(literal).case_insensitive(true).build() {
                patterns.push(re);
            }
        }

        let mut sources = vec![
            constant.clone(),
            format!("{constant}Controller"),
            format!("{controller}_path"),
            format!("{controller}_url"),
        ];
        sources.extend(VERB_HELPERS.iter().map(|verb| format!("{verb}.*{controller}")));
        patterns.extend(
            sources
                .iter()
                .filter(|s| !s.is_empty())
                .filter_map(|s| Regex::new(s).ok()),
        );

        Self { patterns }
    }

    /// True when any predicate matches `content`
    pub fn matches(&self, content: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(content))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Read `path` and check it against the route's predicates.
///
/// Unreadable files (missing, binary, permission denied) do not match.
pub fn file_contains_reference(path: &Path, route: &Route) -> bool {
    match std::fs::read_to_string(path) {
        Ok(content) => ReferencePatterns::for_route(route).matches(&content),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Unreadable coverage candidate");
            false
        }
    }
}
