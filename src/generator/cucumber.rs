use super::{write_artifact, write_support_files, ArtifactGenerator, GenerationOptions, PomGenerator};
use crate::config::TesterConfig;
use crate::error::Result;
use crate::naming::ArtifactKind;
use crate::routes::{Route, RouteAnalyzer};
use crate::templates::{feature, steps, ScaffoldContext, SupportFile};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Writes a `.feature` file and its step definitions per route; each also
/// refreshes the route's page object
pub struct CucumberGenerator {
    pom: PomGenerator,
}

impl CucumberGenerator {
    pub fn new(config: &TesterConfig, analyzer: Arc<RouteAnalyzer>) -> Self {
        Self {
            pom: PomGenerator::new(config, analyzer),
        }
    }

    /// Feature source for `route`
    pub fn render_feature(&self, route: &Route, options: &GenerationOptions) -> Result<String> {
        let ctx = ScaffoldContext::new(route, options.requires_authentication(route));
        feature::render(self.pom.renderer(), &ctx, route.bucket())
    }

    /// Step definitions for `route`, requiring its page object from `require_path`
    pub fn render_steps(
        &self,
        route: &Route,
        options: &GenerationOptions,
        require_path: &str,
    ) -> Result<String> {
        let ctx = ScaffoldContext::new(route, options.requires_authentication(route));
        steps::render(self.pom.renderer(), &ctx, route.bucket(), require_path)
    }
}

impl ArtifactGenerator for CucumberGenerator {
    fn name(&self) -> &'static str {
        "cucumber"
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
            debug!(controller, action, "No route for feature");
            return Ok(None);
        };
        let layout = options.layout(self.pom.config());
        self.pom.write_page_object(route, &layout, options)?;

        let feature_path = layout.file_path(controller, action, ArtifactKind::FeatureFile);
        write_artifact(&feature_path, &self.render_feature(route, options)?)?;

        let require_path =
            layout.page_object_require(controller, action, ArtifactKind::StepDefinitions);
        let steps_path = layout.file_path(controller, action, ArtifactKind::StepDefinitions);
        write_artifact(&steps_path, &self.render_steps(route, options, &require_path)?)?;

        Ok(Some(vec![feature_path, steps_path]))
    }

    fn generate_support_files(&self, options: &GenerationOptions) -> Result<Vec<PathBuf>> {
        write_support_files(
            &SupportFile::CUCUMBER,
            &options.layout(self.pom.config()),
            self.pom.config(),
        )
    }
}
