#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::project::TestProject;
use common::routes::{raw, resources};
use route_tester::coverage::{CoverageAnalyzer, CoverageStats, Framework};
use route_tester::routes::{RouteAnalyzer, RouteFile};

fn sample_project() -> (TestProject, RouteAnalyzer) {
    let project = TestProject::new();
    project.write(
        "spec/features/users_index_spec.rb",
        "RSpec.describe 'Users listing' do\n  it { visit users_path }\nend\n",
    );
    project.write("spec/requests/users_destroy_spec.rb", "# placeholder file\n");
    project.write(
        "features/posts.feature",
        "Feature: Posts\n  Scenario: browsing\n    When I visit the posts page\n",
    );
    project.write(
        "test/controllers/posts_controller_test.rb",
        "class PostsControllerTest < ActionDispatch::IntegrationTest\n  def test_it\n    get posts_url\n  end\nend\n",
    );
    project.write("spec/support/page_objects/users_page.rb", "class UsersPage; end\n");
    project.write("spec/support/page_objects/users_index_page.rb", "class UsersIndexPage; end\n");

    let mut routes = resources("users", "user");
    routes.push(raw(Some("posts"), "GET", "/posts(.:format)", "posts", "index"));
    routes.push(raw(Some("comments"), "GET", "/comments(.:format)", "comments", "index"));
    let analyzer = project.analyzer(routes);
    (project, analyzer)
}

#[test]
fn test_coverage_stats_over_project() {
    let (_project, analyzer) = sample_project();
    let stats = analyzer.coverage_stats();
    assert_eq!(
        stats,
        CoverageStats {
            total_routes: 9,
            routes_with_rspec: 7,
            routes_with_cucumber: 1,
            routes_with_minitest: 1,
            routes_with_any_test: 8,
            rspec_coverage: 77.78,
            cucumber_coverage: 11.11,
            minitest_coverage: 11.11,
            overall_coverage: 88.89,
        }
    );

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["total_routes"], 9);
    assert_eq!(json["overall_coverage"], 88.89);
}

#[test]
fn test_content_check_rejects_name_only_matches() {
    let (project, analyzer) = sample_project();
    let destroy = analyzer.find_route("users", "destroy").unwrap();
    let record = analyzer.coverage_analyzer().find_related_tests(destroy);
    assert_eq!(
        record.rspec,
        vec![project.root().join("spec/features/users_index_spec.rb")]
    );
    assert!(record.cucumber.is_empty());
    assert!(record.minitest.is_empty());
    assert_eq!(
        record.page_objects,
        vec![project.root().join("spec/support/page_objects/users_page.rb")]
    );
}

#[test]
fn test_uncovered_routes() {
    let (project, analyzer) = sample_project();

    let without_tests = analyzer.routes_without_tests();
    assert_eq!(without_tests.len(), 1);
    assert_eq!(without_tests[0].route.full_path(), "comments#index");

    let without_poms: Vec<String> = analyzer
        .routes_without_poms()
        .iter()
        .map(|rc| rc.route.full_path())
        .collect();
    assert_eq!(without_poms, vec!["posts#index", "comments#index"]);

    let index = analyzer.find_route("users", "index").unwrap();
    let record = analyzer.coverage_analyzer().find_related_tests(index);
    assert_eq!(
        record.page_objects,
        vec![
            project.root().join("spec/support/page_objects/users_index_page.rb"),
            project.root().join("spec/support/page_objects/users_page.rb"),
        ]
    );
}

#[test]
fn test_framework_search_is_independent() {
    let (project, analyzer) = sample_project();
    let coverage = CoverageAnalyzer::new(&project.config);
    let posts = analyzer.find_route("posts", "index").unwrap();
    assert!(coverage.find_framework_tests(Framework::Rspec, posts).is_empty());
    assert_eq!(
        coverage.find_framework_tests(Framework::Cucumber, posts),
        vec![project.root().join("features/posts.feature")]
    );
    assert_eq!(
        coverage.find_framework_tests(Framework::Minitest, posts),
        vec![project.root().join("test/controllers/posts_controller_test.rb")]
    );
}

#[test]
fn test_unreadable_route_dump_gives_empty_stats() {
    let project = TestProject::new();
    project.write("tmp/routes.yaml", "- controller: [unclosed\n");
    let analyzer = RouteAnalyzer::new(
        &RouteFile::new(project.root().join("tmp/routes.yaml")),
        &project.config,
    );
    assert!(analyzer.list_routes().is_empty());
    assert_eq!(analyzer.coverage_stats(), CoverageStats::default());
    assert!(analyzer.routes_without_tests().is_empty());
}
