//! Shared bootstrap files written once per project.

use super::finish;
use crate::error::Result;
use crate::naming::PathLayout;
use askama::Template;
use std::path::{Path, PathBuf};

/// Retention window baked into the generated Cucumber `at_exit` hook
pub const DEFAULT_KEEP_DAYS: u32 = 7;

#[derive(Template)]
#[template(path = "base_page.rb.txt", escape = "none")]
struct BasePageTemplate;

#[derive(Template)]
#[template(path = "spec_helper.rb.txt", escape = "none")]
struct SpecHelperTemplate;

#[derive(Template)]
#[template(path = "rails_helper.rb.txt", escape = "none")]
struct RailsHelperTemplate;

#[derive(Template)]
#[template(path = "feature_helper.rb.txt", escape = "none")]
struct FeatureHelperTemplate;

#[derive(Template)]
#[template(path = "cucumber.yml.txt", escape = "none")]
struct CucumberConfigTemplate;

#[derive(Template)]
#[template(path = "env.rb.txt", escape = "none")]
struct CucumberEnvTemplate<'a> {
    results_path: &'a str,
    keep_days: u32,
}

#[derive(Template)]
#[template(path = "world_extensions.rb.txt", escape = "none")]
struct WorldExtensionsTemplate;

#[derive(Template)]
#[template(path = "common_steps.rb.txt", escape = "none")]
struct CommonStepsTemplate;

/// Every shared file a generator may bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportFile {
    /// `BasePage` with the `element`/`elements` locator macros
    BasePage,
    SpecHelper,
    RailsHelper,
    FeatureHelper,
    CucumberConfig,
    CucumberEnv,
    WorldExtensions,
    CommonSteps,
}

impl SupportFile {
    /// Files the RSpec generator bootstraps, in write order
    pub const RSPEC: [SupportFile; 4] = [
        SupportFile::BasePage,
        SupportFile::SpecHelper,
        SupportFile::RailsHelper,
        SupportFile::FeatureHelper,
    ];

    /// Files the Cucumber generator bootstraps, in write order
    pub const CUCUMBER: [SupportFile; 5] = [
        SupportFile::BasePage,
        SupportFile::CucumberConfig,
        SupportFile::CucumberEnv,
        SupportFile::WorldExtensions,
        SupportFile::CommonSteps,
    ];

    /// Location under the layout
    pub fn path(self, layout: &PathLayout) -> PathBuf {
        match self {
            SupportFile::BasePage => layout.pom_dir.join("base_page.rb"),
            SupportFile::SpecHelper => layout.project_root.join("spec/spec_helper.rb"),
            SupportFile::RailsHelper => layout.project_root.join("spec/rails_helper.rb"),
            SupportFile::FeatureHelper => layout.support_dir.join("feature_helper.rb"),
            SupportFile::CucumberConfig => layout.project_root.join("cucumber.yml"),
            SupportFile::CucumberEnv => layout.features_dir.join("support/env.rb"),
            SupportFile::WorldExtensions => {
                layout.features_dir.join("support/world_extensions.rb")
            }
            SupportFile::CommonSteps => layout.step_definitions_dir.join("common_steps.rb"),
        }
    }

    /// File content; `results_path` is the capture root the Cucumber env
    /// hands to the capture store
    pub fn render(self, results_path: &Path) -> Result<String> {
        let text = match self {
            SupportFile::BasePage => BasePageTemplate.render()?,
            SupportFile::SpecHelper => SpecHelperTemplate.render()?,
            SupportFile::RailsHelper => RailsHelperTemplate.render()?,
            SupportFile::FeatureHelper => FeatureHelperTemplate.render()?,
            SupportFile::CucumberConfig => CucumberConfigTemplate.render()?,
            SupportFile::CucumberEnv => CucumberEnvTemplate {
                results_path: &results_path.to_string_lossy(),
                keep_days: DEFAULT_KEEP_DAYS,
            }
            .render()?,
            SupportFile::WorldExtensions => WorldExtensionsTemplate.render()?,
            SupportFile::CommonSteps => CommonStepsTemplate.render()?,
        };
        Ok(finish(text))
    }
}
