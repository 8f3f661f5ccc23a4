//! Minimal filename globbing over a project tree.
//!
//! Supports the three wildcards the coverage patterns use: `**` (any number
//! of directories), `*` (any run of characters within one path segment) and
//! `?` (one character within a segment). Everything else matches literally.

use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Compile a `/`-separated glob into an anchored regex
pub fn glob_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut out = String::from("^");
    let segments: Vec<&str> = pattern.split('/').collect();
    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        if *segment == "**" {
            if last {
                out.push_str(".*");
            } else {
                out.push_str("(?:[^/]*/)*");
            }
            continue;
        }
        for ch in segment.chars() {
            match ch {
                '*' => out.push_str("[^/]*"),
                '?' => out.push_str("[^/]"),
                c => out.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4]))),
            }
        }
        if !last {
            out.push('/');
        }
    }
    out.push('$');
    Regex::new(&out)
}

/// Leading directory of `pattern` that contains no wildcard
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut prefix = PathBuf::new();
    let segments: Vec<&str> = pattern.split('/').collect();
    for segment in &segments[..segments.len().saturating_sub(1)] {
        if segment.contains(['*', '?']) {
            break;
        }
        prefix.push(segment);
    }
    prefix
}

/// Files under `root` whose root-relative path matches `pattern`, sorted by path.
///
/// A missing search directory or an invalid pattern yields no matches.
pub fn glob_files(root: &Path, pattern: &str) -> Vec<PathBuf> {
    let re = match glob_to_regex(pattern) {
        Ok(re) => re,
        Err(e) => {
            debug!(pattern, error = %e, "Skipping unparseable glob");
            return Vec::new();
        }
    };
    let start = root.join(literal_prefix(pattern));
    if !start.is_dir() {
        return Vec::new();
    }

    WalkDir::new(&start)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .map(|rel| {
                    let rel = rel
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    re.is_match(&rel)
                })
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}
