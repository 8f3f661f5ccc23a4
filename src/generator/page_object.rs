use super::{write_artifact, write_support_files, ArtifactGenerator, GenerationOptions};
use crate::config::TesterConfig;
use crate::error::Result;
use crate::naming::{ArtifactKind, PathLayout};
use crate::routes::{Route, RouteAnalyzer};
use crate::templates::{page_object, ScaffoldContext, SectionRenderer, SupportFile};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Writes `<pom>/<controller>_<action>_page.rb` and the shared `BasePage`
pub struct PomGenerator {
    config: TesterConfig,
    analyzer: Arc<RouteAnalyzer>,
    renderer: SectionRenderer,
}

impl PomGenerator {
    pub fn new(config: &TesterConfig, analyzer: Arc<RouteAnalyzer>) -> Self {
        Self {
            config: config.clone(),
            analyzer,
            renderer: SectionRenderer::new(),
        }
    }

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    pub(crate) fn renderer(&self) -> &SectionRenderer {
        &self.renderer
    }

    /// Page object source for `route`
    pub fn render_page_object(&self, route: &Route, options: &GenerationOptions) -> Result<String> {
        self.render_in_layout(route, &options.layout(&self.config), options)
    }

    fn render_in_layout(
        &self,
        route: &Route,
        layout: &PathLayout,
        options: &GenerationOptions,
    ) -> Result<String> {
        let ctx = ScaffoldContext::new(route, options.requires_authentication(route));
        let base_page_require = layout.base_page_require(&route.controller, &route.action);
        page_object::render(&self.renderer, &ctx, route.bucket(), &base_page_require)
    }

    /// Render and write the page object for an already-resolved route
    pub(crate) fn write_page_object(
        &self,
        route: &Route,
        layout: &PathLayout,
        options: &GenerationOptions,
    ) -> Result<PathBuf> {
        let content = self.render_in_layout(route, layout, options)?;
        let path = layout.file_path(&route.controller, &route.action, ArtifactKind::PageObject);
        write_artifact(&path, &content)?;
        debug!(controller = %route.controller, action = %route.action, "Page object generated");
        Ok(path)
    }
}

impl ArtifactGenerator for PomGenerator {
    fn name(&self) -> &'static str {
        "page_object"
    }

    fn analyzer(&self) -> &RouteAnalyzer {
        &self.analyzer
    }

    fn generate_for_route(
        &self,
        controller: &str,
        action: &str,
        options: &GenerationOptions,
    ) -> Result<Option<Vec<PathBuf>>> {
        let Some(route) = self.analyzer.find_route(controller, action) else {
            debug!(controller, action, "No route for page object");
            return Ok(None);
        };
        let layout = options.layout(&self.config);
        Ok(Some(vec![self.write_page_object(route, &layout, options)?]))
    }

    fn generate_support_files(&self, options: &GenerationOptions) -> Result<Vec<PathBuf>> {
        write_support_files(
            &[SupportFile::BasePage],
            &options.layout(&self.config),
            &self.config,
        )
    }
}
