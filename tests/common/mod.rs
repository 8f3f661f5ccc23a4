#![allow(dead_code)]

pub mod project {
    use route_tester::config::TesterConfig;
    use route_tester::routes::{RawRoute, RouteAnalyzer};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// Throwaway application tree plus a config rooted at it
    pub struct TestProject {
        pub dir: TempDir,
        pub config: TesterConfig,
    }

    impl TestProject {
        pub fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let config = TesterConfig::for_project(dir.path());
            Self { dir, config }
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        /// Write `content` at a project-relative path, creating parents
        pub fn write(&self, rel: &str, content: &str) {
            let path = self.root().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        pub fn read(&self, rel: &str) -> String {
            fs::read_to_string(self.root().join(rel)).unwrap()
        }

        pub fn analyzer(&self, routes: Vec<RawRoute>) -> RouteAnalyzer {
            RouteAnalyzer::from_raw(routes, &self.config)
        }
    }
}

pub mod routes {
    use route_tester::routes::RawRoute;

    /// `rails routes`-style entry for `controller#action`
    pub fn raw(name: Option<&str>, verb: &str, path: &str, controller: &str, action: &str) -> RawRoute {
        RawRoute {
            name: name.map(str::to_string),
            verb: verb.to_string(),
            path: path.to_string(),
            controller: Some(controller.to_string()),
            action: Some(action.to_string()),
            ..RawRoute::default()
        }
    }

    /// The seven resourceful routes for `resources :<plural>`
    pub fn resources(plural: &str, singular: &str) -> Vec<RawRoute> {
        let collection = format!("/{plural}(.:format)");
        let member = format!("/{plural}/:id(.:format)");
        vec![
            raw(Some(plural), "GET", &collection, plural, "index"),
            raw(None, "POST", &collection, plural, "create"),
            raw(Some(&format!("new_{singular}")), "GET", &format!("/{plural}/new(.:format)"), plural, "new"),
            raw(Some(&format!("edit_{singular}")), "GET", &format!("/{plural}/:id/edit(.:format)"), plural, "edit"),
            raw(Some(singular), "GET", &member, plural, "show"),
            raw(None, "PATCH", &member, plural, "update"),
            raw(None, "DELETE", &member, plural, "destroy"),
        ]
    }
}
