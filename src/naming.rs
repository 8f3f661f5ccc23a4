//! # Naming Module
//!
//! Pure functions that turn a `(controller, action)` pair into class names,
//! file names and file locations for every artifact kind, plus the small set
//! of English inflections the templates interpolate (singular, humanized and
//! Ruby constant forms).
//!
//! Nothing here touches the filesystem. For a given pair and kind the output is
//! always the same, and distinct pairs only collide if the source application
//! itself uses ambiguous controller/action names (e.g. `a_b` + `c` versus
//! `a` + `b_c`).
//!
//! ```rust
//! use route_tester::naming::{class_name, file_name, ArtifactKind};
//!
//! assert_eq!(class_name("users", "index", ArtifactKind::PageObject), "UsersIndexPage");
//! assert_eq!(file_name("users", "index", ArtifactKind::PageObject), "users_index_page.rb");
//! ```

use crate::config::TesterConfig;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// The kinds of file this crate writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Page-object model class
    PageObject,
    /// RSpec feature spec
    BehaviorSpec,
    /// Cucumber `.feature` file
    FeatureFile,
    /// Cucumber step definitions
    StepDefinitions,
    /// Shared bootstrap file (base page, helpers, env)
    SharedSupport,
}

impl ArtifactKind {
    /// Kinds written once per route
    pub const PER_ROUTE: [ArtifactKind; 4] = [
        ArtifactKind::PageObject,
        ArtifactKind::BehaviorSpec,
        ArtifactKind::FeatureFile,
        ArtifactKind::StepDefinitions,
    ];

    /// Suffix appended to the PascalCase class name
    pub fn class_suffix(self) -> &'static str {
        match self {
            ArtifactKind::PageObject => "Page",
            ArtifactKind::BehaviorSpec => "Spec",
            ArtifactKind::FeatureFile => "Feature",
            ArtifactKind::StepDefinitions => "Steps",
            ArtifactKind::SharedSupport => "Support",
        }
    }

    /// Suffix (including extension) appended to `<controller>_<action>`
    pub fn file_suffix(self) -> &'static str {
        match self {
            ArtifactKind::PageObject => "_page.rb",
            ArtifactKind::BehaviorSpec => "_spec.rb",
            ArtifactKind::FeatureFile => ".feature",
            ArtifactKind::StepDefinitions => "_steps.rb",
            ArtifactKind::SharedSupport => "_support.rb",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::PageObject => "page_object",
            ArtifactKind::BehaviorSpec => "behavior_spec",
            ArtifactKind::FeatureFile => "feature_file",
            ArtifactKind::StepDefinitions => "step_definitions",
            ArtifactKind::SharedSupport => "shared_support",
        };
        write!(f, "{s}")
    }
}

/// `PascalCase(controller) + PascalCase(action) + kind suffix`
pub fn class_name(controller: &str, action: &str, kind: ArtifactKind) -> String {
    format!(
        "{}{}{}",
        pascal_case(controller),
        pascal_case(action),
        kind.class_suffix()
    )
}

/// `<controller>_<action><suffix>`, e.g. `users_index_page.rb`
pub fn file_name(controller: &str, action: &str, kind: ArtifactKind) -> String {
    format!("{controller}_{action}{}", kind.file_suffix())
}

/// Directory layout for every artifact kind, rooted at the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathLayout {
    /// Project root that support files are placed under
    pub project_root: PathBuf,
    /// Page objects
    pub pom_dir: PathBuf,
    /// RSpec feature specs
    pub spec_dir: PathBuf,
    /// Cucumber features
    pub features_dir: PathBuf,
    /// Cucumber step definitions
    pub step_definitions_dir: PathBuf,
    /// Shared support files
    pub support_dir: PathBuf,
}

impl PathLayout {
    /// Layout implied by the configured base paths
    pub fn from_config(config: &TesterConfig) -> Self {
        let features_dir = config.features_dir();
        Self {
            project_root: config.project_root.clone(),
            pom_dir: config.pom_dir(),
            spec_dir: config.spec_dir(),
            step_definitions_dir: features_dir.join("step_definitions"),
            features_dir,
            support_dir: config.resolve("spec/support"),
        }
    }

    /// Base directory for a kind
    pub fn dir_for(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::PageObject => &self.pom_dir,
            ArtifactKind::BehaviorSpec => &self.spec_dir,
            ArtifactKind::FeatureFile => &self.features_dir,
            ArtifactKind::StepDefinitions => &self.step_definitions_dir,
            ArtifactKind::SharedSupport => &self.support_dir,
        }
    }

    /// Deterministic location of one artifact
    pub fn file_path(&self, controller: &str, action: &str, kind: ArtifactKind) -> PathBuf {
        self.dir_for(kind).join(file_name(controller, action, kind))
    }

    /// `require_relative` argument that loads the route's page object from a
    /// file of `kind`.
    ///
    /// Namespaced controllers (`admin/users`) nest both files one level
    /// deeper, so the path is taken from the requiring file's own directory.
    pub fn page_object_require(&self, controller: &str, action: &str, kind: ArtifactKind) -> String {
        let target = self.file_path(controller, action, ArtifactKind::PageObject);
        let from = self.file_path(controller, action, kind);
        ruby_require_path(from.parent().unwrap_or(self.dir_for(kind)), &target)
    }

    /// `require_relative` argument that loads the shared `BasePage` from the
    /// route's page object
    pub fn base_page_require(&self, controller: &str, action: &str) -> String {
        let from = self.file_path(controller, action, ArtifactKind::PageObject);
        ruby_require_path(
            from.parent().unwrap_or(&self.pom_dir),
            &self.pom_dir.join("base_page.rb"),
        )
    }
}

/// Relative path from `from_dir` to `target`, `/`-separated and without the
/// `.rb` extension, as Ruby's `require_relative` expects.
///
/// When only one side is absolute, both are made absolute against the
/// current directory first.
pub fn ruby_require_path(from_dir: &Path, target: &Path) -> String {
    if from_dir.is_absolute() != target.is_absolute() {
        if let (Ok(from), Ok(to)) = (std::path::absolute(from_dir), std::path::absolute(target)) {
            return ruby_require_path(&from, &to);
        }
    }
    let from: Vec<Component<'_>> = from_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component<'_>> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend((common..from.len()).map(|_| "..".to_string()));
    parts.extend(
        to[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    let joined = parts.join("/");
    match joined.strip_suffix(".rb") {
        Some(stem) => stem.to_string(),
        None => joined,
    }
}

/// Identifier-safe PascalCase: `user_posts` → `UserPosts`, `admin/users` → `AdminUsers`
pub fn pascal_case(s: &str) -> String {
    s.split(['_', '-', '/', ' '])
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Ruby constant form: namespaces become `::`, e.g. `admin/users` → `Admin::Users`
pub fn camelize(s: &str) -> String {
    s.split('/').map(pascal_case).collect::<Vec<_>>().join("::")
}

/// Human-readable form: `user_posts` → `User posts`, `author_id` → `Author`
pub fn humanize(s: &str) -> String {
    let base = s.strip_suffix("_id").unwrap_or(s);
    let spaced = base.replace('_', " ").trim().to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "news",
    "jeans",
    "police",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("oxen", "ox"),
];

/// English singular of the last path segment: `users` → `user`,
/// `admin/categories` → `admin/category`
pub fn singularize(s: &str) -> String {
    match s.rsplit_once('/') {
        Some((ns, last)) => format!("{ns}/{}", singularize_word(last)),
        None => singularize_word(s),
    }
}

/// Plurals formed by a plain `s` on a singular ending in `e`
const PLURAL_OF_E: &[&str] = &[
    "caches",
    "niches",
    "headaches",
    "avalanches",
    "mustaches",
    "moustaches",
    "cliches",
    "quiches",
    "movies",
    "cookies",
    "zombies",
    "rookies",
    "selfies",
    "calories",
    "brownies",
    "hoodies",
    "goalies",
    "smoothies",
    "pies",
    "ties",
    "lies",
];

/// `word` is `name` or ends in `_name`
fn is_word(lower: &str, name: &str) -> bool {
    lower == name
        || lower
            .strip_suffix(name)
            .is_some_and(|prefix| prefix.ends_with('_'))
}

fn singularize_word(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if !word.is_ascii() || UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
        return word.to_string();
    }
    for (plural, singular) in IRREGULAR {
        if lower == *plural {
            return (*singular).to_string();
        }
        if let Some(prefix) = lower.strip_suffix(&format!("_{plural}")) {
            return format!("{prefix}_{singular}");
        }
    }

    let cut = |n: usize, tail: &str| format!("{}{tail}", &word[..word.len() - n]);
    if PLURAL_OF_E.iter().any(|p| is_word(&lower, p)) {
        cut(1, "")
    } else if lower.len() > 3 && lower.ends_with("ies") {
        cut(3, "y")
    } else if ["sses", "ches", "shes", "xes", "statuses", "buses", "aliases"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        cut(2, "")
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.to_string()
    } else if lower.ends_with('s') {
        cut(1, "")
    } else {
        word.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_class_name_per_kind() {
        assert_eq!(class_name("users", "index", ArtifactKind::PageObject), "UsersIndexPage");
        assert_eq!(class_name("blog_posts", "show", ArtifactKind::BehaviorSpec), "BlogPostsShowSpec");
        assert_eq!(class_name("users", "new", ArtifactKind::FeatureFile), "UsersNewFeature");
        assert_eq!(class_name("users", "edit", ArtifactKind::StepDefinitions), "UsersEditSteps");
    }

    #[test]
    fn test_class_name_is_pascal_concat() {
        for (c, a) in [("users", "index"), ("admin/reports", "export_csv"), ("pages", "home")] {
            for kind in ArtifactKind::PER_ROUTE {
                assert_eq!(
                    class_name(c, a, kind),
                    format!("{}{}{}", pascal_case(c), pascal_case(a), kind.class_suffix())
                );
            }
        }
    }

    #[test]
    fn test_file_path_is_deterministic() {
        let layout = PathLayout::from_config(&TesterConfig::for_project("/app"));
        for kind in ArtifactKind::PER_ROUTE {
            assert_eq!(
                layout.file_path("users", "index", kind),
                layout.file_path("users", "index", kind)
            );
        }
        assert_eq!(
            layout.file_path("users", "index", ArtifactKind::PageObject),
            PathBuf::from("/app/spec/support/page_objects/users_index_page.rb")
        );
        assert_eq!(
            layout.file_path("users", "index", ArtifactKind::FeatureFile),
            PathBuf::from("/app/features/users_index.feature")
        );
        assert_eq!(
            layout.file_path("users", "index", ArtifactKind::StepDefinitions),
            PathBuf::from("/app/features/step_definitions/users_index_steps.rb")
        );
    }

    #[test]
    fn test_distinct_pairs_do_not_collide() {
        let layout = PathLayout::from_config(&TesterConfig::default());
        let pairs = [
            ("users", "index"),
            ("users", "show"),
            ("posts", "index"),
            ("pages", "about"),
        ];
        for kind in ArtifactKind::PER_ROUTE {
            let mut paths: Vec<PathBuf> = pairs
                .iter()
                .map(|(c, a)| layout.file_path(c, a, kind))
                .collect();
            paths.sort();
            paths.dedup();
            assert_eq!(paths.len(), pairs.len());
        }
    }

    #[test]
    fn test_require_paths() {
        let layout = PathLayout::from_config(&TesterConfig::default());
        assert_eq!(
            layout.page_object_require("users", "index", ArtifactKind::BehaviorSpec),
            "../support/page_objects/users_index_page"
        );
        assert_eq!(
            layout.page_object_require("users", "index", ArtifactKind::StepDefinitions),
            "../../spec/support/page_objects/users_index_page"
        );
        assert_eq!(
            layout.page_object_require("admin/users", "edit", ArtifactKind::BehaviorSpec),
            "../../support/page_objects/admin/users_edit_page"
        );
        assert_eq!(layout.base_page_require("users", "index"), "base_page");
        assert_eq!(layout.base_page_require("admin/users", "index"), "../base_page");
    }

    /// Lexically resolve `rel` against `base`, dropping `..` components
    fn resolve_lexically(base: &Path, rel: &str) -> PathBuf {
        let mut out = PathBuf::new();
        for c in base.join(rel).components() {
            match c {
                Component::ParentDir => {
                    out.pop();
                }
                Component::CurDir => {}
                other => out.push(other),
            }
        }
        out
    }

    #[test]
    fn test_require_path_mixed_absolute_and_relative() {
        let cwd = std::env::current_dir().unwrap();
        let target = Path::new("/abs/poms/users_index_page.rb");
        let relative_from = Path::new("./spec/features");

        let require = ruby_require_path(relative_from, target);
        assert!(!require.contains("//"), "{require}");
        assert!(require.ends_with("abs/poms/users_index_page"));
        assert_eq!(
            resolve_lexically(&cwd.join("spec/features"), &format!("{require}.rb")),
            target
        );

        let require = ruby_require_path(Path::new("/abs/poms"), Path::new("spec/support/base_page.rb"));
        assert!(!require.contains("//"), "{require}");
        assert_eq!(
            resolve_lexically(Path::new("/abs/poms"), &format!("{require}.rb")),
            cwd.join("spec/support/base_page.rb")
        );
    }

    #[test]
    fn test_inflections() {
        assert_eq!(pascal_case("user_posts"), "UserPosts");
        assert_eq!(pascal_case(""), "");
        assert_eq!(camelize("admin/users"), "Admin::Users");
        assert_eq!(humanize("user_posts"), "User posts");
        assert_eq!(humanize("author_id"), "Author");
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("admin/users"), "admin/user");
        assert_eq!(singularize("news"), "news");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("pages"), "page");
        assert_eq!(singularize("houses"), "house");
        assert_eq!(singularize("caches"), "cache");
        assert_eq!(singularize("movies"), "movie");
        assert_eq!(singularize("admin/cookies"), "admin/cookie");
        assert_eq!(singularize("page_caches"), "page_cache");
        assert_eq!(singularize("parties"), "party");
        assert_eq!(singularize("batches"), "batch");
    }
}
