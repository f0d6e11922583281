//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (section,
//! entry, page) leads with its positional index and title, with routes and
//! source files as indented context lines. The output reads as an inventory
//! of the site while still letting users trace each page to its markdown.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Sections
//! 001 Basic (3 entries)
//!     Index: /basic_examples
//!     001 Hello World → /basic_examples/hello_world
//!         Source: basic_examples/hello_world.md (1 code block)
//!     002 First App → /
//!         Placeholder
//!     003 Variables → /basic_examples/variables
//!         Missing: basic_examples/variables.md
//!
//! Issues
//!     Basic › First App: placeholder route "/"
//!
//! Config
//!     config.toml
//!     routes.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!
//! Sections
//! 001 Basic → basic_examples/index.html
//!
//! Pages
//! 001 Hello World → basic_examples/hello_world/index.html
//!
//! Assets
//!     /style.3f9a1c2e.css
//!     /site.8b0d44aa.js
//!     1 file copied from content
//!
//! Theme: system (renders light)
//! Generated 3 pages
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure,
//! with the exception of the `Config` block, which checks which files exist.

use crate::generate::{GenerateReport, PageKind};
use crate::registry::{REGISTRY_FILENAME, RegistryIssue, RouteRegistry};
use crate::scan::{Manifest, page_source_path};
use crate::segments::normalize_route;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

/// Format an entity header: positional index + title, with optional entry count.
///
/// ```text
/// 001 Basic (3 entries)
/// 001 Hello World
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!(
            "{} {} ({})",
            format_index(index),
            title,
            plural(n, "entry", "entries")
        ),
        None => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

fn issue_lines(issues: &[RegistryIssue]) -> Vec<String> {
    if issues.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Issues".to_string()];
    lines.extend(issues.iter().map(|issue| format!("{}{}", indent(1), issue)));
    lines
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered site structure.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Sections".to_string()];

    for (i, section) in manifest.registry.sections().iter().enumerate() {
        lines.push(entity_header(i + 1, &section.title, Some(section.entries.len())));
        if let Some(route) = section.index_route() {
            let intro = section
                .slug
                .as_ref()
                .and_then(|slug| manifest.section_intros.get(slug));
            match intro {
                Some(intro) => lines.push(format!(
                    "{}Index: {route} (intro: {})",
                    indent(1),
                    intro.source_path
                )),
                None => lines.push(format!("{}Index: {route}", indent(1))),
            }
        }

        for (j, entry) in section.entries.iter().enumerate() {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                entity_header(j + 1, &entry.title, None),
                entry.route
            ));
            let route = normalize_route(&entry.route);
            let context = if route == "/" {
                "Placeholder".to_string()
            } else if let Some(page) = manifest.page(&route) {
                let blocks = page.code_blocks.len();
                if blocks == 0 {
                    format!("Source: {}", page.source_path)
                } else {
                    format!(
                        "Source: {} ({})",
                        page.source_path,
                        plural(blocks, "code block", "code blocks")
                    )
                }
            } else {
                format!("Missing: {}", page_source_path(&route))
            };
            lines.push(format!("{}{}", indent(2), context));
        }
    }

    if let Some(home) = &manifest.home {
        lines.push(String::new());
        lines.push("Home".to_string());
        lines.push(format!("{}Source: {}", indent(1), home.source_path));
    }

    lines.extend(issue_lines(&manifest.issues));

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    lines.push(format!("{}{}", indent(1), REGISTRY_FILENAME));
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("{}{}/", indent(1), manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing the written HTML files.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for page in report.pages.iter().filter(|p| p.kind == PageKind::Home) {
        lines.push(format!("Home \u{2192} {}", page.output));
    }

    for (heading, kind) in [("Sections", PageKind::Section), ("Pages", PageKind::Example)] {
        let pages: Vec<_> = report.pages.iter().filter(|p| p.kind == kind).collect();
        if pages.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.to_string());
        for (i, page) in pages.iter().enumerate() {
            lines.push(format!(
                "{} \u{2192} {}",
                entity_header(i + 1, &page.title, None),
                page.output
            ));
        }
    }

    lines.push(String::new());
    lines.push("Assets".to_string());
    lines.push(format!("{}{}", indent(1), report.stylesheet));
    lines.push(format!("{}{}", indent(1), report.script));
    if report.assets_copied > 0 {
        lines.push(format!(
            "{}{} copied from content",
            indent(1),
            plural(report.assets_copied, "file", "files")
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Theme: {} (renders {})",
        report.theme, report.variant
    ));
    lines.push(format!(
        "Generated {}",
        plural(report.pages.len(), "page", "pages")
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check and routes
// ============================================================================

/// Format the result of `check`: issues and missing pages, then a verdict.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    if !manifest.missing_pages.is_empty() {
        lines.push("Missing pages".to_string());
        for route in &manifest.missing_pages {
            lines.push(format!(
                "{}{route} (expected {})",
                indent(1),
                page_source_path(route)
            ));
        }
    }
    let mut issues = issue_lines(&manifest.issues);
    if lines.is_empty() && !issues.is_empty() {
        issues.remove(0);
    }
    lines.extend(issues);

    let warnings = manifest.issues.len() + manifest.missing_pages.len();
    if warnings == 0 {
        lines.push("Content is valid".to_string());
    } else {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!(
            "Content is valid ({})",
            plural(warnings, "warning", "warnings")
        ));
    }
    lines
}

pub fn print_check_output(manifest: &Manifest) {
    for line in format_check_output(manifest) {
        println!("{}", line);
    }
}

/// Format the route registry as a table of contents.
pub fn format_routes(registry: &RouteRegistry) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, section) in registry.sections().iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(entity_header(i + 1, &section.title, Some(section.entries.len())));
        for (j, entry) in section.entries.iter().enumerate() {
            lines.push(format!(
                "{}{} {}",
                indent(1),
                format_index(j + 1),
                entry.route
            ));
            lines.push(format!("{}{}", indent(2), entry.title));
            if !entry.description.is_empty() {
                lines.push(format!(
                    "{}{}",
                    indent(2),
                    truncate_desc(&entry.description, 60)
                ));
            }
        }
    }
    lines
}

pub fn print_routes(registry: &RouteRegistry) {
    for line in format_routes(registry) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::registry::{RouteEntry, RouteSection};
    use crate::scan::scan;
    use crate::test_helpers::*;
    use crate::theme::{ThemePreference, ThemeVariant};

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(999), "999");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(1), "    ");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_with_count() {
        assert_eq!(entity_header(1, "Basic", Some(3)), "001 Basic (3 entries)");
        assert_eq!(entity_header(2, "Solo", Some(1)), "002 Solo (1 entry)");
    }

    #[test]
    fn entity_header_without_count() {
        assert_eq!(entity_header(5, "Hello World", None), "005 Hello World");
    }

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("short", 60), "short");
    }

    #[test]
    fn truncate_desc_long() {
        assert_eq!(truncate_desc("abcdefghij", 5), "abcde...");
    }

    #[test]
    fn truncate_desc_multibyte() {
        assert_eq!(truncate_desc("héllo wörld", 4), "héll...");
    }

    // =========================================================================
    // Scan
    // =========================================================================

    #[test]
    fn scan_output_lists_sections_and_entries() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Sections");
        assert!(lines.contains(&"002 Basic (4 entries)".to_string()));
        assert!(lines.contains(&"    Index: /basic_examples (intro: basic_examples/index.md)".to_string()));
        assert!(lines.contains(
            &"    001 Hello World \u{2192} /basic_examples/hello_world".to_string()
        ));
        assert!(lines.contains(
            &"        Source: basic_examples/hello_world.md (2 code blocks)".to_string()
        ));
        assert!(lines.contains(&"        Placeholder".to_string()));
        assert!(lines.contains(
            &"        Missing: basic_examples/primitive_data_types.md".to_string()
        ));
    }

    #[test]
    fn scan_output_shows_issues_and_config() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        let issues = lines.iter().position(|l| l == "Issues").unwrap();
        assert_eq!(
            lines[issues + 1],
            "    Basic \u{203a} First App: placeholder route \"/\""
        );
        let config = lines.iter().position(|l| l == "Config").unwrap();
        assert_eq!(
            &lines[config + 1..],
            &["    config.toml", "    routes.toml", "    assets/"]
        );
    }

    // =========================================================================
    // Generate
    // =========================================================================

    fn report() -> GenerateReport {
        let page = |kind, route: &str, title: &str, output: &str| GeneratedPage {
            kind,
            route: route.to_string(),
            title: title.to_string(),
            output: output.to_string(),
        };
        GenerateReport {
            pages: vec![
                page(PageKind::Home, "/", "Stylus by Example", "index.html"),
                page(PageKind::Section, "/basic_examples", "Basic", "basic_examples/index.html"),
                page(
                    PageKind::Example,
                    "/basic_examples/hello_world",
                    "Hello World",
                    "basic_examples/hello_world/index.html",
                ),
            ],
            stylesheet: "/style.3f9a1c2e.css".to_string(),
            script: "/site.8b0d44aa.js".to_string(),
            assets_copied: 1,
            theme: ThemePreference::System,
            variant: ThemeVariant::Light,
        }
    }

    #[test]
    fn generate_output_format() {
        let lines = format_generate_output(&report());
        assert_eq!(
            lines,
            vec![
                "Home \u{2192} index.html",
                "",
                "Sections",
                "001 Basic \u{2192} basic_examples/index.html",
                "",
                "Pages",
                "001 Hello World \u{2192} basic_examples/hello_world/index.html",
                "",
                "Assets",
                "    /style.3f9a1c2e.css",
                "    /site.8b0d44aa.js",
                "    1 file copied from content",
                "",
                "Theme: system (renders light)",
                "Generated 3 pages",
            ]
        );
    }

    #[test]
    fn generate_output_skips_empty_groups() {
        let mut report = report();
        report.pages.retain(|p| p.kind == PageKind::Home);
        report.assets_copied = 0;
        let lines = format_generate_output(&report);
        assert!(!lines.contains(&"Sections".to_string()));
        assert!(!lines.contains(&"Pages".to_string()));
        assert!(!lines.iter().any(|l| l.contains("copied")));
        assert_eq!(lines.last().unwrap(), "Generated 1 page");
    }

    // =========================================================================
    // Check and routes
    // =========================================================================

    #[test]
    fn check_output_lists_warnings() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_check_output(&manifest);
        assert_eq!(
            lines,
            vec![
                "Missing pages",
                "    /basic_examples/primitive_data_types (expected basic_examples/primitive_data_types.md)",
                "",
                "Issues",
                "    Basic \u{203a} First App: placeholder route \"/\"",
                "",
                "Content is valid (2 warnings)",
            ]
        );
    }

    #[test]
    fn check_output_lists_path_conflicts() {
        let tmp = setup_fixtures();
        let routes = std::fs::read_to_string(tmp.path().join("routes.toml")).unwrap()
            + "\n[[section]]\ntitle = \"Extra\"\nslug = \"basic_examples\"\n\n[[section.entry]]\nroute = \"/../secret\"\ntitle = \"Secret\"\n";
        std::fs::write(tmp.path().join("routes.toml"), routes).unwrap();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_check_output(&manifest);

        assert!(lines.contains(
            &"    Extra \u{203a} Secret: route \"/../secret\" is not a plain path".to_string()
        ));
        assert!(lines.contains(
            &"    Extra: index page /basic_examples conflicts with section Basic".to_string()
        ));
        assert_eq!(lines.last().unwrap(), "Content is valid (4 warnings)");
    }

    #[test]
    fn check_output_clean() {
        let tmp = setup_fixtures();
        let mut manifest = scan(tmp.path()).unwrap();
        manifest.issues.clear();
        manifest.missing_pages.clear();
        assert_eq!(format_check_output(&manifest), vec!["Content is valid"]);
    }

    #[test]
    fn routes_table() {
        let registry = RouteRegistry::new(vec![RouteSection {
            title: "Basic".to_string(),
            slug: None,
            entries: vec![
                RouteEntry {
                    route: "/basic_examples/hello_world".to_string(),
                    title: "Hello World".to_string(),
                    description: "Learn how to use the console output".to_string(),
                },
                RouteEntry {
                    route: "/".to_string(),
                    title: "First App".to_string(),
                    description: String::new(),
                },
            ],
        }]);
        assert_eq!(
            format_routes(&registry),
            vec![
                "001 Basic (2 entries)",
                "    001 /basic_examples/hello_world",
                "        Hello World",
                "        Learn how to use the console output",
                "    002 /",
                "        First App",
            ]
        );
    }
}
