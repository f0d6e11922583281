//! The route registry: every navigable page, grouped into ordered sections.
//!
//! The registry lives in `routes.toml` at the content root:
//!
//! ```toml
//! [[section]]
//! title = "Basic"
//! slug = "basic_examples"          # optional: generates /basic_examples/
//!
//! [[section.entry]]
//! route = "/basic_examples/hello_world"
//! title = "Hello World"
//! description = "Learn how to use the console output"
//! ```
//!
//! Section order and entry order within a section are display order. Nothing
//! else is sorted.
//!
//! ## Data quality
//!
//! Entries are taken as written. Placeholder routes (`"/"`) and duplicate
//! routes are legal: they render as links that go nowhere useful or that
//! highlight together. [`RouteRegistry::validate`] reports them so `check`
//! can flag them, but nothing is merged or dropped.
//!
//! Routes and slugs become file paths, so a route with a `.` or `..` segment
//! never gets a page, and a slug like that never gets an index page. A
//! section index at the same path as an entry page gives way to the page.

use serde::{Deserialize, Serialize};
use crate::segments::{is_safe_route, normalize_route};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the registry inside the content root.
pub const REGISTRY_FILENAME: &str = "routes.toml";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Registry parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("No {REGISTRY_FILENAME} found in {0}")]
    Missing(PathBuf),
}

/// A single navigable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    /// Absolute path of the page, e.g. `/basic_examples/hello_world`.
    pub route: String,
    /// Display label in the sidebar and on cards.
    pub title: String,
    /// Short summary shown on section cards.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A named, ordered group of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteSection {
    pub title: String,
    /// Path segment of the section's index page, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, rename = "entry")]
    pub entries: Vec<RouteEntry>,
}

impl RouteSection {
    /// Absolute route of the section index page (`/<slug>`), if the slug
    /// is a usable path.
    pub fn index_route(&self) -> Option<String> {
        self.slug
            .as_deref()
            .map(normalize_route)
            .filter(|route| route != "/" && is_safe_route(route))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRegistry {
    #[serde(default, rename = "section")]
    sections: Vec<RouteSection>,
}

/// A non-fatal data-quality finding in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryIssue {
    /// Entry points at `/` instead of a real page.
    Placeholder { section: String, title: String },
    /// More than one entry uses the same route.
    Duplicate {
        route: String,
        /// `(section title, entry title)` for every entry using the route.
        uses: Vec<(String, String)>,
    },
    /// Route does not start with `/`.
    Relative {
        section: String,
        title: String,
        route: String,
    },
    /// Entry has no title to display.
    EmptyTitle { section: String, route: String },
    /// Route has `.`, `..` or backslash segments; it gets no page.
    UnsafeRoute {
        section: String,
        title: String,
        route: String,
    },
    /// Slug is empty or not a plain path; the section gets no index page.
    UnsafeSlug { section: String, slug: String },
    /// Section index would be written where another page already is.
    IndexConflict {
        section: String,
        route: String,
        /// `Section › Entry` or `section Title` holding the path.
        owner: String,
    },
}

impl fmt::Display for RegistryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryIssue::Placeholder { section, title } => {
                write!(f, "{section} › {title}: placeholder route \"/\"")
            }
            RegistryIssue::Duplicate { route, uses } => {
                let names: Vec<String> = uses.iter().map(|(s, t)| format!("{s} › {t}")).collect();
                write!(f, "{route} is used by {} entries: {}", uses.len(), names.join(", "))
            }
            RegistryIssue::Relative {
                section,
                title,
                route,
            } => write!(f, "{section} › {title}: route \"{route}\" is not absolute"),
            RegistryIssue::EmptyTitle { section, route } => {
                write!(f, "{section} › {route}: entry has no title")
            }
            RegistryIssue::UnsafeRoute {
                section,
                title,
                route,
            } => write!(f, "{section} › {title}: route \"{route}\" is not a plain path"),
            RegistryIssue::UnsafeSlug { section, slug } => {
                write!(f, "{section}: slug \"{slug}\" is not a plain path")
            }
            RegistryIssue::IndexConflict {
                section,
                route,
                owner,
            } => write!(f, "{section}: index page {route} conflicts with {owner}"),
        }
    }
}

impl RouteRegistry {
    pub fn new(sections: Vec<RouteSection>) -> Self {
        Self { sections }
    }

    /// Sections in display order.
    pub fn sections(&self) -> &[RouteSection] {
        &self.sections
    }

    /// Every entry, section by section, in display order.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    /// First entry whose route equals `route` after normalization.
    pub fn find(&self, route: &str) -> Option<&RouteEntry> {
        let wanted = normalize_route(route);
        self.entries().find(|e| normalize_route(&e.route) == wanted)
    }

    /// Section whose index page lives at `slug`.
    pub fn section_by_slug(&self, slug: &str) -> Option<&RouteSection> {
        self.sections
            .iter()
            .find(|s| s.slug.as_deref() == Some(slug))
    }

    /// Report placeholder, duplicate, relative, unsafe and untitled entries,
    /// and section slugs that are unsafe or collide with another page.
    ///
    /// Issues are ordered: per-entry findings in registry order, then slug
    /// findings in section order, then duplicates sorted by route.
    pub fn validate(&self) -> Vec<RegistryIssue> {
        let mut issues = Vec::new();
        let mut by_route: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();

        for section in &self.sections {
            for entry in &section.entries {
                let normalized = normalize_route(&entry.route);
                if normalized == "/" {
                    issues.push(RegistryIssue::Placeholder {
                        section: section.title.clone(),
                        title: entry.title.clone(),
                    });
                } else if !is_safe_route(&normalized) {
                    issues.push(RegistryIssue::UnsafeRoute {
                        section: section.title.clone(),
                        title: entry.title.clone(),
                        route: entry.route.clone(),
                    });
                } else {
                    by_route
                        .entry(normalized)
                        .or_default()
                        .push((section.title.clone(), entry.title.clone()));
                }
                if !entry.route.starts_with('/') {
                    issues.push(RegistryIssue::Relative {
                        section: section.title.clone(),
                        title: entry.title.clone(),
                        route: entry.route.clone(),
                    });
                }
                if entry.title.trim().is_empty() {
                    issues.push(RegistryIssue::EmptyTitle {
                        section: section.title.clone(),
                        route: entry.route.clone(),
                    });
                }
            }
        }

        let mut index_owners: HashMap<String, &str> = HashMap::new();
        for section in &self.sections {
            let Some(slug) = &section.slug else { continue };
            let Some(route) = section.index_route() else {
                issues.push(RegistryIssue::UnsafeSlug {
                    section: section.title.clone(),
                    slug: slug.clone(),
                });
                continue;
            };
            let owner = match by_route.get(&route).and_then(|uses| uses.first()) {
                Some((entry_section, entry_title)) => Some(format!("{entry_section} › {entry_title}")),
                None => index_owners.get(&route).map(|title| format!("section {title}")),
            };
            match owner {
                Some(owner) => issues.push(RegistryIssue::IndexConflict {
                    section: section.title.clone(),
                    route,
                    owner,
                }),
                None => {
                    index_owners.insert(route, &section.title);
                }
            }
        }

        issues.extend(
            by_route
                .into_iter()
                .filter(|(_, uses)| uses.len() > 1)
                .map(|(route, uses)| RegistryIssue::Duplicate { route, uses }),
        );
        issues
    }
}

/// Parse a registry from TOML text.
pub fn parse_registry(content: &str) -> Result<RouteRegistry, RegistryError> {
    Ok(toml::from_str(content)?)
}

/// Load `routes.toml` from the content root.
pub fn load_registry(root: &Path) -> Result<RouteRegistry, RegistryError> {
    let path = root.join(REGISTRY_FILENAME);
    if !path.exists() {
        return Err(RegistryError::Missing(root.to_path_buf()));
    }
    let content = fs::read_to_string(&path)?;
    let registry = parse_registry(&content)?;
    tracing::debug!(
        sections = registry.sections.len(),
        entries = registry.entries().count(),
        "loaded route registry"
    );
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[[section]]
title = "Getting Started"
slug = "getting_started"

[[section.entry]]
route = "/getting_started/installation"
title = "Installation"
description = "Set up the toolchain"

[[section]]
title = "Basic"
slug = "basic_examples"

[[section.entry]]
route = "/basic_examples/hello_world"
title = "Hello World"
description = "Learn how to use the console output"

[[section.entry]]
route = "/basic_examples/bytes_in_bytes_out"
title = "Bytes In, Bytes Out"

[[section.entry]]
route = "/"
title = "First App"

[[section.entry]]
route = "/"
title = "Variables"
"#;

    fn sample() -> RouteRegistry {
        parse_registry(SAMPLE).unwrap()
    }

    #[test]
    fn sections_keep_file_order() {
        let registry = sample();
        let titles: Vec<&str> = registry.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Getting Started", "Basic"]);
    }

    #[test]
    fn entries_keep_insertion_order() {
        let registry = sample();
        let titles: Vec<&str> = registry.entries().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Installation",
                "Hello World",
                "Bytes In, Bytes Out",
                "First App",
                "Variables"
            ]
        );
    }

    #[test]
    fn description_defaults_to_empty() {
        let registry = sample();
        let entry = registry.find("/basic_examples/bytes_in_bytes_out").unwrap();
        assert_eq!(entry.description, "");
    }

    #[test]
    fn find_normalizes_trailing_slash() {
        let registry = sample();
        let entry = registry.find("/basic_examples/hello_world/").unwrap();
        assert_eq!(entry.title, "Hello World");
    }

    #[test]
    fn section_index_route_from_slug() {
        let registry = sample();
        assert_eq!(
            registry.sections()[1].index_route().as_deref(),
            Some("/basic_examples")
        );
        let no_slug = RouteSection {
            title: "Misc".to_string(),
            slug: None,
            entries: vec![],
        };
        assert_eq!(no_slug.index_route(), None);
    }

    #[test]
    fn section_by_slug_lookup() {
        let registry = sample();
        assert_eq!(
            registry.section_by_slug("getting_started").unwrap().title,
            "Getting Started"
        );
        assert!(registry.section_by_slug("applications").is_none());
    }

    #[test]
    fn placeholders_are_reported_not_merged() {
        let registry = sample();
        let issues = registry.validate();
        let placeholders: Vec<_> = issues
            .iter()
            .filter(|i| matches!(i, RegistryIssue::Placeholder { .. }))
            .collect();
        assert_eq!(placeholders.len(), 2);
        // Both placeholder entries are still present
        assert_eq!(registry.entries().filter(|e| e.route == "/").count(), 2);
    }

    #[test]
    fn duplicates_list_every_use() {
        let registry = parse_registry(
            r#"
[[section]]
title = "Basic"
[[section.entry]]
route = "/basic_examples/proxy"
title = "Proxy"

[[section]]
title = "Applications"
[[section.entry]]
route = "/basic_examples/proxy/"
title = "Upgradeable Proxy"
"#,
        )
        .unwrap();
        let issues = registry.validate();
        assert_eq!(
            issues,
            vec![RegistryIssue::Duplicate {
                route: "/basic_examples/proxy".to_string(),
                uses: vec![
                    ("Basic".to_string(), "Proxy".to_string()),
                    ("Applications".to_string(), "Upgradeable Proxy".to_string()),
                ],
            }]
        );
    }

    #[test]
    fn relative_and_untitled_entries_reported() {
        let registry = parse_registry(
            r#"
[[section]]
title = "Basic"
[[section.entry]]
route = "basic_examples/events"
title = " "
"#,
        )
        .unwrap();
        let issues = registry.validate();
        assert!(issues
            .iter()
            .any(|i| matches!(i, RegistryIssue::Relative { .. })));
        assert!(issues
            .iter()
            .any(|i| matches!(i, RegistryIssue::EmptyTitle { .. })));
    }

    #[test]
    fn clean_registry_has_no_issues() {
        let registry = parse_registry(
            r#"
[[section]]
title = "Basic"
[[section.entry]]
route = "/basic_examples/hello_world"
title = "Hello World"
"#,
        )
        .unwrap();
        assert!(registry.validate().is_empty());
    }

    #[test]
    fn issue_display_names_entries() {
        let issue = RegistryIssue::Placeholder {
            section: "Basic".to_string(),
            title: "First App".to_string(),
        };
        assert_eq!(issue.to_string(), "Basic › First App: placeholder route \"/\"");
    }

    #[test]
    fn unknown_entry_key_rejected() {
        let result = parse_registry(
            r#"
[[section]]
title = "Basic"
[[section.entry]]
route = "/a"
title = "A"
summary = "typo for description"
"#,
        );
        assert!(matches!(result, Err(RegistryError::Toml(_))));
    }

    #[test]
    fn load_registry_missing_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_registry(tmp.path());
        assert!(matches!(result, Err(RegistryError::Missing(_))));
    }

    #[test]
    fn load_registry_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(REGISTRY_FILENAME), SAMPLE).unwrap();
        let registry = load_registry(tmp.path()).unwrap();
        assert_eq!(registry.sections().len(), 2);
    }

    #[test]
    fn empty_file_is_empty_registry() {
        let registry = parse_registry("").unwrap();
        assert!(registry.sections().is_empty());
        assert!(registry.validate().is_empty());
    }

    #[test]
    fn dot_segments_reported_as_unsafe() {
        let registry = parse_registry(
            r#"
[[section]]
title = "Basic"
slug = "../outside"
[[section.entry]]
route = "/../secret"
title = "Secret"
"#,
        )
        .unwrap();
        assert_eq!(
            registry.validate(),
            vec![
                RegistryIssue::UnsafeRoute {
                    section: "Basic".to_string(),
                    title: "Secret".to_string(),
                    route: "/../secret".to_string(),
                },
                RegistryIssue::UnsafeSlug {
                    section: "Basic".to_string(),
                    slug: "../outside".to_string(),
                },
            ]
        );
        assert_eq!(registry.sections()[0].index_route(), None);
    }

    #[test]
    fn empty_slug_gets_no_index() {
        let registry = parse_registry("[[section]]\ntitle = \"Misc\"\nslug = \"/\"\n").unwrap();
        assert_eq!(registry.sections()[0].index_route(), None);
        assert!(matches!(
            registry.validate().as_slice(),
            [RegistryIssue::UnsafeSlug { .. }]
        ));
    }

    #[test]
    fn slug_colliding_with_entry_reported() {
        let registry = parse_registry(
            r#"
[[section]]
title = "Basic"
slug = "basic_examples"
[[section.entry]]
route = "/basic_examples/"
title = "Overview"
"#,
        )
        .unwrap();
        let issues = registry.validate();
        assert_eq!(
            issues,
            vec![RegistryIssue::IndexConflict {
                section: "Basic".to_string(),
                route: "/basic_examples".to_string(),
                owner: "Basic › Overview".to_string(),
            }]
        );
        assert_eq!(
            issues[0].to_string(),
            "Basic: index page /basic_examples conflicts with Basic › Overview"
        );
    }

    #[test]
    fn repeated_slug_owned_by_first_section() {
        let registry = parse_registry(
            r#"
[[section]]
title = "Basic"
slug = "examples"

[[section]]
title = "More"
slug = "examples/"
"#,
        )
        .unwrap();
        assert_eq!(
            registry.validate(),
            vec![RegistryIssue::IndexConflict {
                section: "More".to_string(),
                route: "/examples".to_string(),
                owner: "section Basic".to_string(),
            }]
        );
    }
}
