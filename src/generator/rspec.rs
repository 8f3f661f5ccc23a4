use super::{write_artifact, write_support_files, ArtifactGenerator, GenerationOptions, PomGenerator};
use crate::config::TesterConfig;
use crate::error::Result;
use crate::naming::ArtifactKind;
use crate::routes::{Route, RouteAnalyzer};
use crate::templates::{behavior_spec, ScaffoldContext, SupportFile};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Writes RSpec feature specs; each spec also refreshes its page object
pub struct RspecGenerator {
    pom: PomGenerator,
}

impl RspecGenerator {
    pub fn new(config: &TesterConfig, analyzer: Arc<RouteAnalyzer>) -> Self {
        Self {
            pom: PomGenerator::new(config, analyzer),
        }
    }

    /// Spec source for `route`, requiring its page object from `require_path`
    pub fn render_spec(
        &self,
        route: &Route,
        options: &GenerationOptions,
        require_path: &str,
    ) -> Result<String> {
        let ctx = ScaffoldContext::new(route, options.requires_authentication(route));
        behavior_spec::render(self.pom.renderer(), &ctx, route.bucket(), require_path)
    }
}

impl ArtifactGenerator for RspecGenerator {
    fn name(&self) -> &'static str {
        "rspec"
    }

    fn analyzer(&self) -> &RouteAnalyzer {
        self.pom.analyzer()
    }

    fn generate_for_route(
        &self,
        controller: &str,
        action: &str,
        options: &GenerationOptions,
    ) -> Result<Option<Vec<PathBuf>>> {
        let Some(route) = self.analyzer().find_route(controller, action) else {
            debug!(controller, action, "No route for feature spec");
            return Ok(None);
        };
        let layout = options.layout(self.pom.config());
        self.pom.write_page_object(route, &layout, options)?;

        let require_path = layout.page_object_require(controller, action, ArtifactKind::BehaviorSpec);
        let content = self.render_spec(route, options, &require_path)?;
        let path = layout.file_path(controller, action, ArtifactKind::BehaviorSpec);
        write_artifact(&path, &content)?;
        Ok(Some(vec![path]))
    }

    fn generate_support_files(&self, options: &GenerationOptions) -> Result<Vec<PathBuf>> {
        write_support_files(
            &SupportFile::RSPEC,
            &options.layout(self.pom.config()),
            self.pom.config(),
        )
    }
}
