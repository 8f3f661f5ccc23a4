//! # Templates Module
//!
//! Text generation for every artifact kind, driven by the route's
//! [`ActionBucket`](crate::routes::ActionBucket).
//!
//! ## Architecture
//!
//! Rendering happens in two layers:
//!
//! 1. **Sections.** Each kind owns a registry: an exhaustive `match` from
//!    bucket to a record of four section lists (e.g. elements, actions,
//!    validations and helpers for page objects). Every entry is a small
//!    MiniJinja source interpolated against a [`ScaffoldContext`] with strict
//!    undefined-variable checking, so a typo in a section is an error rather
//!    than an empty string.
//! 2. **Skeletons.** The rendered sections are indented and slotted into an
//!    Askama file template from `templates/`, which fixes the overall file
//!    layout (requires, class header, describe block, feature header).
//!
//! Output depends only on the route and the path layout; nothing here reads
//! the clock or the filesystem, so rendering the same route twice yields
//! identical text.

pub mod behavior_spec;
pub mod feature;
pub mod page_object;
pub mod steps;
pub mod support;

pub use support::SupportFile;

use crate::error::Result;
use crate::naming::{camelize, class_name, humanize, singularize, ArtifactKind};
use crate::routes::Route;
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;

/// Values interpolated into section sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldContext {
    /// Raw controller, e.g. `blog_posts`
    pub controller: String,
    /// Raw action, e.g. `index`
    pub action: String,
    /// Singular controller, e.g. `blog_post`
    pub singular: String,
    /// Controller as prose, e.g. `blog posts`
    pub plural_phrase: String,
    /// Singular controller as prose, e.g. `blog post`
    pub singular_phrase: String,
    /// Action as prose, e.g. `export csv`
    pub action_phrase: String,
    /// Humanized controller, e.g. `Blog posts`
    pub controller_title: String,
    /// Humanized action, e.g. `Export csv`
    pub action_title: String,
    /// Identifier-safe controller for helpers and tags, e.g. `admin_users`
    pub route_key: String,
    /// Identifier-safe singular for factories and ivars, e.g. `admin_user`
    pub singular_key: String,
    /// Model constant, e.g. `BlogPost`
    pub model: String,
    /// Page object class, e.g. `BlogPostsIndexPage`
    pub page_class: String,
    pub verb: String,
    pub path: String,
    pub path_helper: String,
    pub url_helper: String,
    /// Whether the bucket operates on one existing record
    pub member: bool,
    /// Whether the feature background signs a user in
    pub requires_auth: bool,
}

impl ScaffoldContext {
    pub fn new(route: &Route, requires_auth: bool) -> Self {
        let singular = singularize(&route.controller);
        let phrase = |s: &str| s.replace(['/', '_'], " ");
        let key = |s: &str| s.replace('/', "_");
        Self {
            controller: route.controller.clone(),
            action: route.action.clone(),
            plural_phrase: phrase(&route.controller),
            singular_phrase: phrase(&singular),
            action_phrase: phrase(&route.action),
            controller_title: humanize(&phrase(&route.controller)),
            action_title: humanize(&phrase(&route.action)),
            route_key: key(&route.controller),
            singular_key: key(&singular),
            model: camelize(&singular),
            page_class: class_name(&route.controller, &route.action, ArtifactKind::PageObject),
            verb: route.verb.clone(),
            path: route.path.clone(),
            path_helper: route.path_helper(),
            url_helper: route.url_helper(),
            member: route.bucket().targets_member(),
            requires_auth,
            singular,
        }
    }
}

/// Strict MiniJinja environment for section sources
pub struct SectionRenderer {
    env: Environment<'static>,
}

impl Default for SectionRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Interpolate one section source
    pub fn render(&self, source: &str, ctx: &ScaffoldContext) -> Result<String> {
        Ok(self.env.render_str(source, ctx)?)
    }

    /// Interpolate every source, join with `separator`, then indent.
    ///
    /// Sources that render to whitespace only are dropped, so conditional
    /// entries leave no blank gaps behind.
    pub fn render_section(
        &self,
        sources: &[&str],
        ctx: &ScaffoldContext,
        separator: &str,
        spaces: usize,
    ) -> Result<String> {
        let mut parts = Vec::with_capacity(sources.len());
        for source in sources {
            let rendered = self.render(source, ctx)?;
            let trimmed = rendered.trim_matches('\n');
            if !trimmed.trim().is_empty() {
                parts.push(trimmed.to_string());
            }
        }
        Ok(indent(&parts.join(separator), spaces))
    }
}

/// Prefix every non-empty line with `spaces` spaces
pub fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize a rendered file: no trailing whitespace runs, one final newline
pub(crate) fn finish(text: String) -> String {
    let mut out = text.trim_end().to_string();
    out.push('\n');
    out
}
