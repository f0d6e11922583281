//! Segment paths and active-route resolution.
//!
//! Every rendered page knows its own location as a [`SegmentPath`]: the
//! non-empty, slash-delimited tokens of its route. The sidebar and the
//! breadcrumb trail both decide what to highlight from that path alone.
//!
//! An entry is active when its normalized route equals the page's full path:
//!
//! ```text
//! segments  ["basic_examples", "hello_world"]   → "/basic_examples/hello_world"
//! route     "/basic_examples/hello_world/"      → "/basic_examples/hello_world"   active
//! route     "/basic_examples"                   → "/basic_examples"               not active
//! ```
//!
//! The home page has an empty path and nothing is active there, including
//! placeholder entries whose route is `/`. Entries sharing a route are all
//! active together.

use crate::naming::path_segments;
use crate::registry::{RouteEntry, RouteSection};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The ordered segments of the page being rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentPath(Vec<String>);

impl SegmentPath {
    /// The home page.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a route like `/basic_examples/hello_world` into segments.
    pub fn parse(path: &str) -> Self {
        Self(path_segments(path).into_iter().map(str::to_string).collect())
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `"/" + segments.join("/")`; `"/"` for the home page.
    pub fn to_route(&self) -> String {
        format!("/{}", self.0.join("/"))
    }

    /// Route of the first `depth` segments (`depth` ≥ 1).
    pub fn prefix_route(&self, depth: usize) -> String {
        let depth = depth.min(self.0.len());
        format!("/{}", self.0[..depth].join("/"))
    }
}

impl fmt::Display for SegmentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_route())
    }
}

/// Canonical form of a route: leading slash, no empty or trailing segments.
pub fn normalize_route(route: &str) -> String {
    format!("/{}", path_segments(route).join("/"))
}

/// Whether every segment of `route` is a plain path component.
///
/// `.`, `..` and segments with a backslash would resolve outside the content
/// or output directory when the route is turned into a file path.
pub fn is_safe_route(route: &str) -> bool {
    path_segments(route)
        .iter()
        .all(|s| *s != "." && *s != ".." && !s.contains('\\'))
}

/// Whether `route` is the page at `current`.
pub fn is_active(current: &SegmentPath, route: &str) -> bool {
    !current.is_root() && normalize_route(route) == current.to_route()
}

/// An entry paired with its highlight decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight<'a> {
    pub entry: &'a RouteEntry,
    pub active: bool,
}

/// Highlight decisions for one section, in entry order.
pub fn resolve_section<'a>(section: &'a RouteSection, current: &SegmentPath) -> Vec<Highlight<'a>> {
    section
        .entries
        .iter()
        .map(|entry| Highlight {
            entry,
            active: is_active(current, &entry.route),
        })
        .collect()
}
