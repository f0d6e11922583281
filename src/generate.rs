//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the
//! finished static site.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): optional intro, then every section as a card grid
//! - **Section index** (`/{slug}/index.html`): one per section with a slug
//! - **Example pages** (`/{route}/index.html`): one per page in the manifest
//!
//! Every page shares one layout: top bar, sidebar, breadcrumbs, content.
//!
//! Each output path is written once. An example page owns its path; a
//! section index whose path is already taken (by a page, or by an earlier
//! section) is skipped, and a route that is not a plain path is never
//! written.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── style.3f9a1c2e.css             # Fingerprinted stylesheet
//! ├── site.8b0d44aa.js               # Fingerprinted page script
//! ├── favicon.svg                    # From content/assets/
//! ├── basic_examples/
//! │   ├── index.html                 # Section index
//! │   └── hello_world/
//! │       └── index.html             # Example page
//! └── ...
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Layout and components (colors injected from config)
//! - `static/site.js`: Theme menu, copy buttons
//! - `static/theme-init.js`: Inlined in `<head>` so the stored theme applies
//!   before first paint
//!
//! The stylesheet is assembled from config colors, the generated link rules,
//! and the highlighter palettes for both variants, then fingerprinted with
//! SHA-256 so URLs change whenever content does.
//!
//! ## Theme
//!
//! Pages are rendered once. `<html data-theme>` carries the build-time
//! variant (`--theme` or `theme.default`; `system` resolves to light without
//! a browser). The page script re-resolves from `localStorage` and
//! `prefers-color-scheme` and rewrites `data-theme` and every `data-variant`.

use crate::breadcrumbs::render_breadcrumbs;
use crate::code_panel::{
    CodeBlock, HighlightError, Highlighter, SyntectHighlighter, render_code_panel,
};
use crate::config::{self, SiteConfig};
use crate::markdown;
use crate::nav::{render_sidebar, render_top_nav};
use crate::registry::{RouteEntry, RouteSection};
use crate::scan::{Intro, Manifest, Page};
use crate::segments::{SegmentPath, is_safe_route};
use crate::theme::{ThemeContext, ThemePreference, ThemeVariant};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset copy failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Highlighter setup failed: {0}")]
    Highlight(#[from] HighlightError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");
const THEME_INIT_JS: &str = include_str!("../static/theme-init.js");

/// What kind of page was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Section,
    Example,
}

/// One written HTML file.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub kind: PageKind,
    pub route: String,
    pub title: String,
    /// Path relative to the output directory.
    pub output: String,
}

/// Summary of a generate run, for CLI output.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub stylesheet: String,
    pub script: String,
    pub assets_copied: usize,
    pub theme: ThemePreference,
    pub variant: ThemeVariant,
}

/// Fingerprinted asset URLs shared by every page.
struct AssetUrls {
    stylesheet: String,
    script: String,
}

/// Everything a page renderer reads.
struct RenderContext<'a> {
    manifest: &'a Manifest,
    theme: &'a ThemeContext,
    highlighter: &'a dyn Highlighter,
    assets: &'a AssetUrls,
}

enum RenderJob<'a> {
    Home,
    Section(&'a RouteSection, String),
    Example(&'a Page),
}

pub fn generate(
    manifest_path: &Path,
    source_dir: &Path,
    output_dir: &Path,
    theme_override: Option<ThemePreference>,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_from_manifest(&manifest, source_dir, output_dir, theme_override)
}

pub fn generate_from_manifest(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
    theme_override: Option<ThemePreference>,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let preference = theme_override.unwrap_or(config.theme.default);
    let theme = ThemeContext::fixed(preference);
    let highlighter = SyntectHighlighter::new()?;

    fs::create_dir_all(output_dir)?;

    let css = build_stylesheet(config, &highlighter);
    let assets = AssetUrls {
        stylesheet: write_fingerprinted(output_dir, "style", "css", &css)?,
        script: write_fingerprinted(output_dir, "site", "js", JS)?,
    };
    let assets_copied = copy_assets(&source_dir.join(&config.assets_dir), output_dir)?;

    let ctx = RenderContext {
        manifest,
        theme: &theme,
        highlighter: &highlighter,
        assets: &assets,
    };

    let jobs = plan_jobs(manifest);
    let rendered: Vec<(GeneratedPage, Markup)> = jobs
        .par_iter()
        .map(|(job, output)| render_job(&ctx, job, output))
        .collect();

    let mut pages = Vec::with_capacity(rendered.len());
    for (page, markup) in rendered {
        let path = output_dir.join(&page.output);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, markup.into_string())?;
        tracing::debug!(route = %page.route, output = %page.output, "wrote page");
        pages.push(page);
    }

    tracing::info!(pages = pages.len(), output = %output_dir.display(), "site generated");

    Ok(GenerateReport {
        pages,
        stylesheet: assets.stylesheet,
        script: assets.script,
        assets_copied,
        theme: preference,
        variant: theme.variant(),
    })
}

/// Home, then section indexes, then example pages, each with the output
/// path it will be written to. Example pages claim their paths first.
fn plan_jobs(manifest: &Manifest) -> Vec<(RenderJob<'_>, String)> {
    let mut claimed: HashSet<String> = HashSet::from(["index.html".to_string()]);
    let mut examples = Vec::new();
    for page in &manifest.pages {
        match output_path(&page.route) {
            Some(output) if claimed.insert(output.clone()) => {
                examples.push((RenderJob::Example(page), output));
            }
            Some(output) => {
                tracing::warn!(route = %page.route, %output, "output path already written, skipping page");
            }
            None => tracing::warn!(route = %page.route, "route is not a plain path, skipping page"),
        }
    }

    let mut jobs = vec![(RenderJob::Home, "index.html".to_string())];
    for section in manifest.registry.sections() {
        let Some(route) = section.index_route() else { continue };
        let Some(output) = output_path(&route) else { continue };
        if claimed.insert(output.clone()) {
            jobs.push((RenderJob::Section(section, route), output));
        } else {
            tracing::warn!(section = %section.title, %route, "index path taken by another page, skipping section index");
        }
    }
    jobs.extend(examples);
    jobs
}

fn render_job(
    ctx: &RenderContext<'_>,
    job: &RenderJob<'_>,
    output: &str,
) -> (GeneratedPage, Markup) {
    match job {
        RenderJob::Home => {
            let page = GeneratedPage {
                kind: PageKind::Home,
                route: "/".to_string(),
                title: ctx.manifest.config.title.clone(),
                output: output.to_string(),
            };
            (page, render_home(ctx))
        }
        RenderJob::Section(section, route) => {
            let page = GeneratedPage {
                kind: PageKind::Section,
                route: route.clone(),
                title: section.title.clone(),
                output: output.to_string(),
            };
            (page, render_section_page(ctx, section, route))
        }
        RenderJob::Example(example) => {
            let page = GeneratedPage {
                kind: PageKind::Example,
                route: example.route.clone(),
                title: example.title.clone(),
                output: output.to_string(),
            };
            (page, render_example_page(ctx, example))
        }
    }
}

/// `/basic_examples/hello_world` → `basic_examples/hello_world/index.html`.
/// `None` for routes that are not a plain path.
pub fn output_path(route: &str) -> Option<String> {
    if !is_safe_route(route) {
        return None;
    }
    let route = SegmentPath::parse(route);
    Some(if route.is_root() {
        "index.html".to_string()
    } else {
        format!("{}/index.html", route.segments().join("/"))
    })
}

/// Config colors, link rules, highlight palettes, then the static stylesheet.
pub fn build_stylesheet(config: &SiteConfig, highlighter: &dyn Highlighter) -> String {
    let mut css = String::new();
    css.push_str(&config::generate_color_css(&config.colors));
    css.push('\n');
    css.push_str(&config::generate_link_css(&config.colors));
    css.push('\n');
    for variant in ThemeVariant::ALL {
        css.push_str(&highlighter.stylesheet(variant));
        css.push('\n');
    }
    css.push_str(CSS_STATIC);
    css
}

/// First 8 hex digits of the SHA-256 of `content`.
pub fn fingerprint(content: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(content.as_bytes()));
    digest[..8].to_string()
}

fn write_fingerprinted(
    output_dir: &Path,
    stem: &str,
    extension: &str,
    content: &str,
) -> Result<String, GenerateError> {
    let name = format!("{stem}.{}.{extension}", fingerprint(content));
    fs::write(output_dir.join(&name), content)?;
    Ok(format!("/{name}"))
}

/// Copy the assets directory into the output root. Returns the file count.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(assets_dir) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(assets_dir)
            .map(PathBuf::from)
            .unwrap_or_default();
        let target = output_dir.join(&relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(ctx: &RenderContext<'_>, title: &str, description: &str, content: Markup) -> Markup {
    let config = &ctx.manifest.config;
    let full_title = if title == config.title {
        title.to_string()
    } else {
        format!("{title} | {}", config.title)
    };
    html! {
        (DOCTYPE)
        html lang="en"
            data-theme=(ctx.theme.variant().as_str())
            data-theme-preference=(ctx.theme.preference().as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                @if !description.is_empty() {
                    meta name="description" content=(description);
                }
                script { (PreEscaped(THEME_INIT_JS)) }
                link rel="stylesheet" href=(ctx.assets.stylesheet);
                script src=(ctx.assets.script) defer {}
            }
            body {
                (content)
            }
        }
    }
}

/// Top bar, sidebar, breadcrumbs and the page content.
fn layout(ctx: &RenderContext<'_>, current: &SegmentPath, content: Markup) -> Markup {
    let config = &ctx.manifest.config;
    let registry = &ctx.manifest.registry;
    html! {
        (render_top_nav(config, registry, current, ctx.theme))
        div.layout {
            (render_sidebar(registry, current, ctx.theme.variant()))
            main.content {
                (render_breadcrumbs(current, &config.breadcrumbs))
                (content)
            }
        }
    }
}

fn render_body(ctx: &RenderContext<'_>, body: &str, blocks: &[CodeBlock]) -> Markup {
    let code = &ctx.manifest.config.code;
    let variant = ctx.theme.variant();
    let html = markdown::render_markdown(body, blocks, code, |block| {
        render_code_panel(block, variant, ctx.highlighter, code)
    });
    PreEscaped(html)
}

fn render_intro(ctx: &RenderContext<'_>, intro: &Intro) -> Markup {
    html! {
        div.prose.intro {
            (render_body(ctx, &intro.body, &intro.code_blocks))
        }
    }
}

/// Grid of title + description cards linking to each entry.
fn card_grid(entries: &[RouteEntry]) -> Markup {
    html! {
        div.card-grid {
            @for entry in entries {
                a.card href=(entry.route) {
                    h3.card-title { (entry.title) }
                    @if !entry.description.is_empty() {
                        p.card-description { (entry.description) }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(ctx: &RenderContext<'_>) -> Markup {
    let config = &ctx.manifest.config;
    let content = html! {
        @match &ctx.manifest.home {
            Some(intro) => {
                @if intro.title.is_none() {
                    h1.page-title { (config.title) }
                }
                (render_intro(ctx, intro))
            }
            None => {
                h1.page-title { (config.title) }
                @if !config.description.is_empty() {
                    p.lead { (config.description) }
                }
            }
        }
        @for section in ctx.manifest.registry.sections() {
            section.home-section {
                h2.section-title {
                    @if let Some(route) = section.index_route() {
                        a href=(route) { (section.title) }
                    } @else {
                        (section.title)
                    }
                }
                (card_grid(&section.entries))
            }
        }
    };
    base_document(
        ctx,
        &config.title,
        &config.description,
        layout(ctx, &SegmentPath::root(), content),
    )
}

fn render_section_page(ctx: &RenderContext<'_>, section: &RouteSection, route: &str) -> Markup {
    let intro = section
        .slug
        .as_ref()
        .and_then(|slug| ctx.manifest.section_intros.get(slug));
    let content = html! {
        @if intro.is_none_or(|i| i.title.is_none()) {
            h1.page-title { (section.title) }
        }
        @if let Some(intro) = intro {
            (render_intro(ctx, intro))
        }
        (card_grid(&section.entries))
    };
    base_document(
        ctx,
        &section.title,
        "",
        layout(ctx, &SegmentPath::parse(route), content),
    )
}

fn render_example_page(ctx: &RenderContext<'_>, page: &Page) -> Markup {
    let content = html! {
        article.prose {
            @if !page.has_heading {
                h1 { (page.title) }
            }
            (render_body(ctx, &page.body, &page.code_blocks))
        }
    };
    base_document(
        ctx,
        &page.title,
        &page.description,
        layout(ctx, &SegmentPath::parse(&page.route), content),
    )
}

// ============================================================================
// Tests
// ============================================================================
