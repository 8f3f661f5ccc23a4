#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use chrono::TimeZone;
use tempfile::TempDir;

struct FakePage {
    html: &'static str,
    url: &'static str,
}

impl PageDriver for FakePage {
    fn page_html(&self) -> anyhow::Result<String> {
        Ok(self.html.to_string())
    }

    fn save_screenshot(&self, path: &Path) -> anyhow::Result<()> {
        fs::write(path, b"\x89PNG")?;
        Ok(())
    }

    fn current_url(&self) -> anyhow::Result<String> {
        Ok(self.url.to_string())
    }

    fn title(&self) -> anyhow::Result<String> {
        Ok("Users".to_string())
    }

    fn window_size(&self) -> anyhow::Result<WindowSize> {
        Ok(WindowSize {
            width: 1400,
            height: 900,
        })
    }
}

struct BrokenPage;

impl PageDriver for BrokenPage {
    fn page_html(&self) -> anyhow::Result<String> {
        anyhow::bail!("session closed")
    }

    fn save_screenshot(&self, _path: &Path) -> anyhow::Result<()> {
        anyhow::bail!("rack_test cannot take screenshots")
    }

    fn current_url(&self) -> anyhow::Result<String> {
        anyhow::bail!("session closed")
    }

    fn title(&self) -> anyhow::Result<String> {
        anyhow::bail!("session closed")
    }
}

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap() + TimeDelta::milliseconds(i64::from(ms))
}

fn users_page() -> FakePage {
    FakePage {
        html: "<html><body class=\"users\"><h1>Users</h1></body></html>",
        url: "http://localhost/users",
    }
}

#[test]
fn test_slug_replaces_non_alphanumerics() {
    assert_eq!(slug("Users index works!"), "Users_index_works_");
    assert_eq!(slug("a/b-c.d"), "a_b_c_d");
    assert_eq!(slug("héllo"), "h_llo");
}

#[test]
fn test_id_carries_millisecond_timestamp() {
    let now = at(2025, 10, 19, 14, 30, 5, 7);
    assert_eq!(test_id("lists users", now), "lists_users_20251019_143005_007");
}

#[test]
fn test_enhance_html_after_body_tag() {
    let now = at(2025, 10, 19, 14, 30, 5, 0);
    let html = enhance_html(
        "<html><body class=\"x\"><p>hi</p></body></html>",
        "t_1",
        Some("I visit"),
        "http://localhost/users?a=1&b=2",
        now,
    )
    .unwrap();
    let body_end = html.find("<body class=\"x\">").unwrap() + "<body class=\"x\">".len();
    let rest = &html[body_end..];
    assert!(rest.starts_with("\n<!-- Test Capture Metadata: test_id=t_1, step_name=I visit, timestamp="));
    assert!(rest.contains("<strong>Step:</strong> I visit<br>"));
    assert!(rest.contains("<strong>Time:</strong> 2025-10-19 14:30:05<br>"));
    assert!(rest.contains("http://localhost/users?a=1&#38;b=2"));
    assert!(!rest.contains("a=1&b=2"));
    assert!(html.ends_with("<p>hi</p></body></html>"));
}

#[test]
fn test_enhance_html_without_step_or_body() {
    let now = at(2025, 1, 1, 0, 0, 0, 0);
    let html = enhance_html("<body>", "t", None, "$0 $1", now).unwrap();
    assert!(html.contains("step_name=, timestamp="));
    assert!(html.contains("<strong>Step:</strong> N/A<br>"));
    assert!(html.contains("<strong>URL:</strong> $0 $1"));

    let fragment = "<div>no body here</div>";
    assert_eq!(enhance_html(fragment, "t", None, "u", now).unwrap(), fragment);
}

#[test]
fn test_enhance_html_keeps_metadata_comment_closed() {
    let now = at(2025, 1, 1, 0, 0, 0, 0);
    let html = enhance_html("<body>", "a---b", Some("x --> <script>"), "u", now).unwrap();
    let comment_end = html.find("-->").unwrap();
    let comment = &html[..comment_end];
    assert!(comment.contains("test_id=a- - -b, step_name=x - -> <script>, timestamp="));
    assert!(!comment["<body>\n<!--".len()..].contains("--"));
    assert!(html[comment_end..].contains("<strong>Step:</strong> x --&#62; &#60;script&#62;<br>"));
    assert_eq!(html.matches("<script>").count(), 1);
}

#[test]
fn test_capture_writes_all_files() {
    let dir = TempDir::new().unwrap();
    let store = CaptureStore::with_root(dir.path(), users_page());
    let now = at(2025, 10, 19, 14, 30, 5, 123);
    let artifact = store
        .capture_test_results_at("lists users", Some("I visit the page"), now)
        .unwrap();

    let id = "lists_users_20251019_143005_123";
    assert_eq!(artifact.test_id, id);
    assert_eq!(artifact.results_dir, dir.path().join(id));
    assert_eq!(
        artifact.html_path,
        artifact.results_dir.join(format!("{id}_I_visit_the_page.html"))
    );
    assert_eq!(
        artifact.png_path,
        Some(artifact.results_dir.join(format!("{id}_I_visit_the_page.png")))
    );
    assert_eq!(
        artifact.metadata_path,
        artifact.results_dir.join(format!("{id}_metadata.json"))
    );
    assert!(artifact.png_path.as_ref().unwrap().is_file());

    let html = fs::read_to_string(&artifact.html_path).unwrap();
    assert!(html.contains(&format!("test_id={id}, step_name=I visit the page")));

    let metadata: CaptureMetadata =
        serde_json::from_str(&fs::read_to_string(&artifact.metadata_path).unwrap()).unwrap();
    assert_eq!(metadata.example_name, "lists users");
    assert_eq!(metadata.step_name.as_deref(), Some("I visit the page"));
    assert_eq!(metadata.current_url, "http://localhost/users");
    assert_eq!(metadata.page_title, "Users");
    assert_eq!(metadata.timestamp, now.to_rfc3339());
    assert_eq!(metadata.files.html, artifact.html_path);
    assert_eq!(metadata.browser_info.user_agent, UNKNOWN);
    assert_eq!(
        metadata.browser_info.window_size,
        Some(WindowSize {
            width: 1400,
            height: 900
        })
    );
}

#[test]
fn test_capture_without_step_uses_bare_test_id() {
    let dir = TempDir::new().unwrap();
    let store = CaptureStore::with_root(dir.path(), users_page());
    let artifact = store
        .capture_test_results_at("x", None, at(2025, 10, 19, 8, 0, 0, 0))
        .unwrap();
    assert_eq!(
        artifact.html_path.file_name().unwrap(),
        "x_20251019_080000_000.html"
    );
}

#[test]
fn test_driver_failures_become_placeholders() {
    let dir = TempDir::new().unwrap();
    let store = CaptureStore::with_root(dir.path(), BrokenPage);
    let artifact = store
        .capture_test_results_at("broken", Some("step"), at(2025, 10, 19, 8, 0, 0, 0))
        .unwrap();

    assert_eq!(artifact.png_path, None);
    assert_eq!(fs::read_to_string(&artifact.html_path).unwrap(), "");

    let metadata: CaptureMetadata =
        serde_json::from_str(&fs::read_to_string(&artifact.metadata_path).unwrap()).unwrap();
    assert_eq!(metadata.current_url, UNKNOWN);
    assert_eq!(metadata.page_title, UNKNOWN);
    assert_eq!(metadata.files.png, None);
    assert_eq!(metadata.browser_info.window_size, None);
}

#[test]
fn test_parse_result_timestamp() {
    let parsed = parse_result_timestamp("users_index_20251019_143005_123").unwrap();
    assert_eq!(parsed.format(TIMESTAMP_FORMAT).to_string(), "20251019_143005_123");
    assert!(parse_result_timestamp("notes").is_none());
    assert!(parse_result_timestamp("x_20251019_143005").is_none());
    assert!(parse_result_timestamp("x_20251399_143005_123").is_none());
}

#[test]
fn test_cleanup_respects_keep_days() {
    let dir = TempDir::new().unwrap();
    let now = at(2025, 10, 19, 12, 0, 0, 0);
    let fresh = dir.path().join("fresh_20251013_120000_000");
    let stale = dir.path().join("stale_20251011_120000_000");
    let bogus = dir.path().join("stale_20259999_120000_000");
    let plain = dir.path().join("keep_me");
    for d in [&fresh, &stale, &bogus, &plain] {
        fs::create_dir(d).unwrap();
    }
    fs::write(stale.join("page.html"), "<html>").unwrap();
    fs::write(dir.path().join("old_20200101_000000_000"), "a file").unwrap();

    let removed = cleanup_results_dir(dir.path(), 7, now).unwrap();
    assert_eq!(removed, vec![stale.clone()]);
    assert!(!stale.exists());
    assert!(fresh.is_dir());
    assert!(bogus.is_dir());
    assert!(plain.is_dir());
    assert!(dir.path().join("old_20200101_000000_000").is_file());
}

#[test]
fn test_cleanup_missing_root_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = CaptureStore::with_root(dir.path().join("absent"), BrokenPage);
    assert!(store
        .cleanup_old_results_at(7, at(2025, 10, 19, 0, 0, 0, 0))
        .unwrap()
        .is_empty());
}
