//! Content scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Reads the route registry, finds the
//! markdown for every entry and produces a [`Manifest`] that generation
//! consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                             # Content root
//! ├── config.toml                      # Site configuration (optional)
//! ├── routes.toml                      # Route registry (required)
//! ├── index.md                         # Home page intro (optional)
//! ├── assets/                          # Copied to the output root
//! ├── basic_examples/
//! │   ├── index.md                     # Section intro (optional)
//! │   ├── hello_world.md               # Page for /basic_examples/hello_world
//! │   └── bytes_in_bytes_out.md
//! └── example_code/                    # Sources pulled in with `file=`
//!     └── hello_world/src/main.rs
//! ```
//!
//! ## Pages
//!
//! An entry's page lives at `<content>/<route>.md`. The page title is the
//! first `# heading`, falling back to the entry title; the description
//! comes from the registry.
//!
//! Nothing in the registry is fatal here. Placeholder routes get no page,
//! the first of several duplicate entries owns the page, and an entry with
//! no markdown is reported in [`Manifest::missing_pages`]. Routes with `.` or
//! `..` segments are never read; validation reports them.

use crate::code_panel::CodeBlock;
use crate::config::{self, SiteConfig};
use crate::markdown::{self, MarkdownError};
use crate::registry::{self, RegistryIssue, RouteRegistry};
use crate::segments::{is_safe_route, normalize_route};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("{path}: {source}")]
    Markdown {
        path: PathBuf,
        source: MarkdownError,
    },
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub registry: RouteRegistry,
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<Intro>,
    /// Section intros keyed by section slug.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub section_intros: BTreeMap<String, Intro>,
    #[serde(default)]
    pub issues: Vec<RegistryIssue>,
    /// Routes with a registry entry but no markdown.
    #[serde(default)]
    pub missing_pages: Vec<String>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn page(&self, route: &str) -> Option<&Page> {
        let wanted = normalize_route(route);
        self.pages.iter().find(|p| p.route == wanted)
    }
}

/// An example page backed by a registry entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Normalized route, e.g. `/basic_examples/hello_world`.
    pub route: String,
    /// Title of the registry section the entry belongs to.
    pub section: String,
    /// Title from the first `# heading`, or the entry title.
    pub title: String,
    /// Whether the markdown supplies its own `# heading`.
    pub has_heading: bool,
    pub description: String,
    /// Raw markdown.
    pub body: String,
    /// Markdown file relative to the content root.
    pub source_path: String,
    /// Code blocks in document order, includes resolved.
    pub code_blocks: Vec<CodeBlock>,
}

/// Optional markdown shown above a card grid (home page, section index).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intro {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub body: String,
    pub source_path: String,
    pub code_blocks: Vec<CodeBlock>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;
    let registry = registry::load_registry(root)?;

    let issues = registry.validate();
    for issue in &issues {
        tracing::warn!(%issue, "route registry");
    }

    let mut pages = Vec::new();
    let mut missing_pages = Vec::new();
    let mut seen = HashSet::new();

    for section in registry.sections() {
        for entry in &section.entries {
            let route = normalize_route(&entry.route);
            if route == "/" || !is_safe_route(&route) || !seen.insert(route.clone()) {
                continue;
            }

            let relative = page_source_path(&route);
            let path = root.join(&relative);
            if !path.is_file() {
                tracing::warn!(route = %route, expected = %relative, "no markdown for route");
                missing_pages.push(route);
                continue;
            }

            let body = fs::read_to_string(&path)?;
            let heading = markdown::extract_title(&body);
            let code_blocks = read_code_blocks(&body, root, &path, &config)?;
            tracing::debug!(route = %route, blocks = code_blocks.len(), "scanned page");

            pages.push(Page {
                route,
                section: section.title.clone(),
                has_heading: heading.is_some(),
                title: heading.unwrap_or_else(|| entry.title.clone()),
                description: entry.description.clone(),
                body,
                source_path: relative,
                code_blocks,
            });
        }
    }

    let home = read_intro(root, "index.md", &config)?;

    let mut section_intros = BTreeMap::new();
    for section in registry.sections() {
        if let (Some(slug), Some(route)) = (&section.slug, section.index_route()) {
            let relative = format!("{}/index.md", route.trim_start_matches('/'));
            if let Some(intro) = read_intro(root, &relative, &config)? {
                section_intros.entry(slug.clone()).or_insert(intro);
            }
        }
    }

    Ok(Manifest {
        registry,
        pages,
        home,
        section_intros,
        issues,
        missing_pages,
        config,
    })
}

/// `/basic_examples/hello_world` → `basic_examples/hello_world.md`
pub fn page_source_path(route: &str) -> String {
    format!("{}.md", normalize_route(route).trim_start_matches('/'))
}

fn read_code_blocks(
    body: &str,
    root: &Path,
    path: &Path,
    config: &SiteConfig,
) -> Result<Vec<CodeBlock>, ScanError> {
    markdown::extract_code_blocks(body, root, &config.code).map_err(|source| ScanError::Markdown {
        path: path.to_path_buf(),
        source,
    })
}

fn read_intro(root: &Path, relative: &str, config: &SiteConfig) -> Result<Option<Intro>, ScanError> {
    let path = root.join(relative);
    if !path.is_file() {
        return Ok(None);
    }
    let body = fs::read_to_string(&path)?;
    Ok(Some(Intro {
        title: markdown::extract_title(&body),
        code_blocks: read_code_blocks(&body, root, &path, config)?,
        body,
        source_path: relative.to_string(),
    }))
}
