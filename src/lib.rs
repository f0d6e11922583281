//! # By Example
//!
//! A static site generator for code-by-example SDK documentation. A route
//! registry lists every example, markdown files hold the prose, example
//! sources are pulled into highlighted code panels, and the output is a
//! plain HTML site with a sidebar, breadcrumbs and a light/dark theme.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (registry + markdown → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON you can inspect between stages, and
//! each stage can be tested without the other.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | `routes.toml`: ordered sections of route entries, validation |
//! | [`segments`] | Current-page segment path and the active-entry decision |
//! | [`nav`] | Sidebar, top bar, mobile overlay, link styles |
//! | [`breadcrumbs`] | Trail from home to the current page |
//! | [`code_panel`] | Highlighted code with a copy button and its state machine |
//! | [`theme`] | Light/dark/system preference, store and render context |
//! | [`markdown`] | Page bodies, fence info, `file=` includes |
//! | [`scan`] | Stage 1: content directory to manifest |
//! | [`generate`] | Stage 2: manifest to HTML with Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`naming`] | Segment-to-label formatting |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## The Registry Is the Site
//!
//! Navigation is not derived from the filesystem. `routes.toml` is the single
//! ordered list of what the site contains; the sidebar, the home page cards
//! and the section indexes are all renderings of it. Entries are taken as
//! written: a placeholder route (`"/"`) or two entries sharing a route are
//! reported by `check` and otherwise rendered as-is.
//!
//! ## One Render, Two Themes
//!
//! Each page is rendered once. Colors are CSS custom properties keyed on
//! `data-theme`, code palettes are keyed on each panel's `data-variant`, and
//! the page script flips those attributes. Switching theme never changes the
//! document's content.
//!
//! ## Theme State Is Passed, Not Global
//!
//! Renderers receive a [`theme::ThemeContext`] by shared reference. Only its
//! owner holds `&mut` and can change the preference, which goes through an
//! injected [`theme::ThemeStore`].
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed templates are build errors, template variables are
//! Rust expressions, and all interpolation is auto-escaped.

pub mod breadcrumbs;
pub mod code_panel;
pub mod config;
pub mod generate;
pub mod icons;
pub mod markdown;
pub mod naming;
pub mod nav;
pub mod output;
pub mod registry;
pub mod scan;
pub mod segments;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;
