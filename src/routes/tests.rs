#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::config::TesterConfig;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn raw(name: Option<&str>, verb: &str, path: &str, controller: Option<&str>, action: &str) -> RawRoute {
    RawRoute {
        name: name.map(str::to_string),
        verb: verb.to_string(),
        path: path.to_string(),
        controller: controller.map(str::to_string),
        action: Some(action.to_string()),
        ..RawRoute::default()
    }
}

struct FailingSource;

impl RouteSource for FailingSource {
    fn load_routes(&self) -> anyhow::Result<Vec<RawRoute>> {
        anyhow::bail!("routing table not loaded")
    }
}

#[test]
fn test_clean_path() {
    assert_eq!(clean_path("/users(.:format)"), "users");
    assert_eq!(clean_path("/users/:id/edit(.:format)"), "users/:id/edit");
    assert_eq!(clean_path("/"), "");
    assert_eq!(clean_path("users"), "users");
}

#[test]
fn test_from_raw_normalizes() {
    let route = Route::from_raw(raw(Some("users"), "GET", "/users(.:format)", Some("users"), "index")).unwrap();
    assert_eq!(route.path, "users");
    assert_eq!(route.display_name(), "users");
    assert_eq!(route.full_path(), "users#index");
    assert_eq!(route.bucket(), ActionBucket::Index);
}

#[test]
fn test_from_raw_rejects_missing_controller() {
    assert!(Route::from_raw(raw(None, "GET", "/up", None, "show")).is_none());
    assert!(Route::from_raw(raw(None, "GET", "/up", Some(""), "show")).is_none());
}

#[test]
fn test_unnamed_route() {
    let route = Route::from_raw(raw(None, "POST", "/users(.:format)", Some("users"), "create")).unwrap();
    assert_eq!(route.name, None);
    assert_eq!(route.display_name(), "unnamed");
    assert_eq!(route.path_helper(), "'/users'");
    assert_eq!(route.url_helper(), "root_url + 'users'");
}

#[test]
fn test_named_route_helpers() {
    let route = Route::from_raw(raw(Some("new_user"), "GET", "/users/new", Some("users"), "new")).unwrap();
    assert_eq!(route.path_helper(), "new_user_path");
    assert_eq!(route.url_helper(), "new_user_url");
}

#[test]
fn test_action_bucket_exact_match() {
    assert_eq!(ActionBucket::from_action("destroy"), ActionBucket::Destroy);
    assert_eq!(ActionBucket::from_action("Destroy"), ActionBucket::Other);
    assert_eq!(ActionBucket::from_action("export"), ActionBucket::Other);
    assert_eq!(ActionBucket::from_action(""), ActionBucket::Other);
    for bucket in ActionBucket::ALL {
        if bucket != ActionBucket::Other {
            assert_eq!(ActionBucket::from_action(bucket.as_str()), bucket);
        }
    }
}

#[test]
fn test_metadata_passes_through() {
    let mut entry = raw(Some("user"), "GET", "/users/:id", Some("users"), "show");
    entry.requirements = json!({ "id": "\\d+" });
    let route = Route::from_raw(entry).unwrap();
    assert_eq!(route.requirements, json!({ "id": "\\d+" }));
    assert_eq!(route.constraints, serde_json::Value::Null);
}

#[test]
fn test_analyzer_first_match_wins() {
    let config = TesterConfig::default();
    let analyzer = RouteAnalyzer::new(
        &vec![
            raw(Some("user"), "PATCH", "/users/:id", Some("users"), "update"),
            raw(None, "PUT", "/users/:id", Some("users"), "update"),
            raw(None, "GET", "/up", None, "show"),
        ],
        &config,
    );
    assert_eq!(analyzer.list_routes().len(), 2);
    let found = analyzer.find_route("users", "update").unwrap();
    assert_eq!(found.verb, "PATCH");
    assert!(analyzer.find_route("users", "index").is_none());
}

#[test]
fn test_failing_source_yields_empty() {
    let analyzer = RouteAnalyzer::new(&FailingSource, &TesterConfig::default());
    assert!(analyzer.list_routes().is_empty());
    assert!(analyzer.routes_with_tests().is_empty());
    assert_eq!(analyzer.coverage_stats().total_routes, 0);
}

#[test]
fn test_route_file_yaml_and_json() {
    let dir = TempDir::new().unwrap();
    let yaml = dir.path().join("routes.yaml");
    fs::write(
        &yaml,
        "- name: users\n  verb: GET\n  path: /users(.:format)\n  controller: users\n  action: index\n\
         - verb: GET\n  path: /assets\n",
    )
    .unwrap();
    let json_path = dir.path().join("routes.json");
    fs::write(
        &json_path,
        r#"[{"name":"user","verb":"GET","path":"/users/:id(.:format)","controller":"users","action":"show"}]"#,
    )
    .unwrap();

    let config = TesterConfig::default();
    let from_yaml = RouteAnalyzer::new(&RouteFile::new(&yaml), &config);
    assert_eq!(from_yaml.list_routes().len(), 1);
    assert_eq!(from_yaml.list_routes()[0].path, "users");

    let from_json = RouteAnalyzer::new(&RouteFile::new(&json_path), &config);
    assert_eq!(from_json.list_routes()[0].path, "users/:id");
}

#[test]
fn test_route_file_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("routes.json");
    fs::write(&path, "not json").unwrap();
    let err = RouteFile::new(&path).load_routes().unwrap_err();
    assert!(err.to_string().contains("routes.json"));
}

#[test]
fn test_without_tests_and_poms() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let spec = root.join("spec/features/users_index_spec.rb");
    fs::create_dir_all(spec.parent().unwrap()).unwrap();
    fs::write(&spec, "visit users_path\n").unwrap();

    let config = TesterConfig::for_project(root);
    let analyzer = RouteAnalyzer::from_routes(
        vec![Route::new("users", "index"), Route::new("orders", "index")],
        &config,
    );

    let untested: Vec<String> = analyzer
        .routes_without_tests()
        .iter()
        .map(|rc| rc.route.full_path())
        .collect();
    assert_eq!(untested, vec!["orders#index"]);
    assert_eq!(analyzer.routes_without_poms().len(), 2);

    let stats = analyzer.coverage_stats();
    assert_eq!(stats.routes_with_rspec, 1);
    assert_eq!(stats.overall_coverage, 50.0);
}
