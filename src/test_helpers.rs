//! Shared test utilities for the by-example test suite.
//!
//! Provides fixture setup and lookup helpers that work with scan-phase data
//! structures (`Manifest`, `Page`).
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let page = find_page(&manifest, "/basic_examples/hello_world");
//! assert_eq!(page.title, "Hello World");
//! ```

use std::path::Path;
use std::sync::OnceLock;
use tempfile::TempDir;

use crate::code_panel::SyntectHighlighter;
use crate::scan::{Manifest, Page};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups (panic with the available routes on a miss)
// =========================================================================

/// Find a page by route. Panics if not found.
pub fn find_page<'a>(manifest: &'a Manifest, route: &str) -> &'a Page {
    manifest.page(route).unwrap_or_else(|| {
        let routes = page_routes(manifest);
        panic!("page '{route}' not found. Available: {routes:?}")
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All page routes in manifest order.
pub fn page_routes(manifest: &Manifest) -> Vec<&str> {
    manifest.pages.iter().map(|p| p.route.as_str()).collect()
}

// =========================================================================
// Highlighting
// =========================================================================

/// Highlighter shared across tests; loading the grammars is slow.
pub fn highlighter() -> &'static SyntectHighlighter {
    static HIGHLIGHTER: OnceLock<SyntectHighlighter> = OnceLock::new();
    HIGHLIGHTER.get_or_init(|| SyntectHighlighter::new().unwrap())
}
