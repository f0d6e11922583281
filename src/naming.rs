//! Display labels for path segments.
//!
//! Routes are written with underscores (`/basic_examples/hello_world`).
//! Breadcrumbs and menu labels go through [`segment_label`] so the conversion
//! is consistent:
//!
//! - `basic_examples` → "basic examples" (`LabelCase::None`)
//! - `basic_examples` → "Basic examples" (`LabelCase::First`)
//! - `basic_examples` → "Basic Examples" (`LabelCase::Words`)
//! - `basic_examples` → "BASIC EXAMPLES" (`LabelCase::Upper`)

use serde::{Deserialize, Serialize};

/// Capitalization applied to a segment label after underscores become spaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelCase {
    /// Keep the segment's own casing.
    #[default]
    None,
    /// Uppercase the first character only.
    First,
    /// Uppercase the first character of every word.
    Words,
    /// Uppercase everything.
    Upper,
}

/// Convert a path segment into its display label.
pub fn segment_label(segment: &str, case: LabelCase) -> String {
    let spaced = segment.replace('_', " ");
    match case {
        LabelCase::None => spaced,
        LabelCase::First => capitalize(&spaced),
        LabelCase::Words => spaced
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
        LabelCase::Upper => spaced.to_uppercase(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a raw path into its non-empty segments.
///
/// `"/basic_examples//hello_world/"` → `["basic_examples", "hello_world"]`
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
