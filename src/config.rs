//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and overrides stock defaults key by key; anything left out
//! keeps its default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Stylus by Example"
//! description = "An introduction to Arbitrum Stylus with simple code examples"
//! assets_dir = "assets"     # Copied verbatim to the output root
//!
//! [theme]
//! default = "system"        # light | dark | system
//!
//! [code]
//! default_language = "rust" # Language of code panels that name none
//! fence_language = "txt"    # Language of markdown fences with no info string
//! copy_reset_ms = 1000      # How long the copy button shows its pressed state
//! line_numbers = true
//!
//! [breadcrumbs]
//! separator = "=>"
//! home_label = "home"
//! label_case = "none"       # none | first | words | upper
//!
//! [colors.light]
//! background = "#fafaf9"
//! surface = "#ffffff"       # Sidebar and top bar
//! text = "#000000"
//! text_muted = "#78716c"    # Inactive links, breadcrumbs
//! border = "#d6d3d1"
//! accent = "#f472b6"        # Hover color
//! code_background = "#f5f5f4"
//!
//! [colors.dark]
//! background = "#292524"
//! surface = "#1b1b1d"
//! text = "#ffffff"
//! text_muted = "#a8a29e"
//! border = "#444950"
//! accent = "#f472b6"
//! code_background = "#282828"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::naming::LabelCase;
use crate::nav::link_style;
use crate::theme::{ThemePreference, ThemeVariant};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name, shown in the top bar and page titles.
    pub title: String,
    /// Meta description for every page.
    pub description: String,
    /// Directory (relative to the content root) copied to the output root.
    pub assets_dir: String,
    pub theme: ThemeConfig,
    pub code: CodeConfig,
    pub breadcrumbs: BreadcrumbConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Stylus by Example".to_string(),
            description: "An introduction to Arbitrum Stylus with simple code examples in Rust and WASM"
                .to_string(),
            assets_dir: "assets".to_string(),
            theme: ThemeConfig::default(),
            code: CodeConfig::default(),
            breadcrumbs: BreadcrumbConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.code.default_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "code.default_language must not be empty".into(),
            ));
        }
        if self.code.fence_language.trim().is_empty() {
            return Err(ConfigError::Validation(
                "code.fence_language must not be empty".into(),
            ));
        }
        if self.code.copy_reset_ms == 0 {
            return Err(ConfigError::Validation(
                "code.copy_reset_ms must be greater than 0".into(),
            ));
        }
        if self.breadcrumbs.separator.trim().is_empty() {
            return Err(ConfigError::Validation(
                "breadcrumbs.separator must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Theme defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Preference a first-time visitor starts with.
    pub default: ThemePreference,
}

/// Code panel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodeConfig {
    /// Language of a code panel built without one.
    pub default_language: String,
    /// Language of a markdown fence without an info string.
    pub fence_language: String,
    /// Milliseconds before the copy button returns to idle.
    pub copy_reset_ms: u64,
    /// Number the lines of every code panel.
    pub line_numbers: bool,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            default_language: "rust".to_string(),
            fence_language: "txt".to_string(),
            copy_reset_ms: 1000,
            line_numbers: true,
        }
    }
}

/// Breadcrumb trail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BreadcrumbConfig {
    /// Glyph between crumbs.
    pub separator: String,
    /// Label of the first crumb.
    pub home_label: String,
    /// Capitalization of segment labels.
    pub label_case: LabelCase,
}

impl Default for BreadcrumbConfig {
    fn default() -> Self {
        Self {
            separator: "=>".to_string(),
            home_label: "home".to_string(),
            label_case: LabelCase::None,
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode color scheme.
    pub light: ColorScheme,
    /// Dark mode color scheme.
    pub dark: ColorScheme,
}

impl ColorConfig {
    pub fn scheme(&self, variant: ThemeVariant) -> &ColorScheme {
        match variant {
            ThemeVariant::Light => &self.light,
            ThemeVariant::Dark => &self.dark,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    /// Page background.
    pub background: String,
    /// Sidebar and top bar background.
    pub surface: String,
    /// Primary text color, also used for the active link.
    pub text: String,
    /// Muted text color (inactive links, breadcrumbs).
    pub text_muted: String,
    /// Border color.
    pub border: String,
    /// Hover color.
    pub accent: String,
    /// Code panel background.
    pub code_background: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fafaf9".to_string(),
            surface: "#ffffff".to_string(),
            text: "#000000".to_string(),
            text_muted: "#78716c".to_string(),
            border: "#d6d3d1".to_string(),
            accent: "#f472b6".to_string(),
            code_background: "#f5f5f4".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#292524".to_string(),
            surface: "#1b1b1d".to_string(),
            text: "#ffffff".to_string(),
            text_muted: "#a8a29e".to_string(),
            border: "#444950".to_string(),
            accent: "#f472b6".to_string(),
            code_background: "#282828".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the content root, merged over the stock defaults
/// and validated. A missing file means stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    let config: SiteConfig = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        let overlay: toml::Value = toml::from_str(&content)?;
        merge_toml(stock_defaults_value()?, overlay).try_into()?
    } else {
        tracing::debug!(root = %root.display(), "no config.toml, using stock defaults");
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# by-example Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Site name, shown in the top bar and in every page title.
title = "Stylus by Example"

# Meta description for every page.
description = "An introduction to Arbitrum Stylus with simple code examples in Rust and WASM"

# Directory inside the content root copied verbatim to the output root
# (logos, favicons, fonts).
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# Preference a first-time visitor starts with: "light", "dark" or "system".
# Visitors' own choices are remembered by their browser.
default = "system"

# ---------------------------------------------------------------------------
# Code panels
# ---------------------------------------------------------------------------
[code]
# Language of a code panel that names none.
default_language = "rust"

# Language of a markdown fence without an info string.
fence_language = "txt"

# Milliseconds the copy button stays in its pressed (or failed) state.
copy_reset_ms = 1000

# Number the lines of every code panel.
line_numbers = true

# ---------------------------------------------------------------------------
# Breadcrumbs
# ---------------------------------------------------------------------------
[breadcrumbs]
separator = "=>"
home_label = "home"
# Capitalization of path segments: "none", "first", "words" or "upper".
label_case = "none"

# ---------------------------------------------------------------------------
# Colors - Light mode
# ---------------------------------------------------------------------------
[colors.light]
background = "#fafaf9"
surface = "#ffffff"         # Sidebar and top bar
text = "#000000"            # Body text and the active link
text_muted = "#78716c"      # Inactive links, breadcrumbs
border = "#d6d3d1"
accent = "#f472b6"          # Hover color
code_background = "#f5f5f4"

# ---------------------------------------------------------------------------
# Colors - Dark mode
# ---------------------------------------------------------------------------
[colors.dark]
background = "#292524"
surface = "#1b1b1d"
text = "#ffffff"
text_muted = "#a8a29e"
border = "#444950"
accent = "#f472b6"
code_background = "#282828"
"##
}

fn scheme_variables(scheme: &ColorScheme) -> String {
    format!(
        r#"    --color-bg: {bg};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
    --color-accent: {accent};
    --color-code-bg: {code_bg};"#,
        bg = scheme.background,
        surface = scheme.surface,
        text = scheme.text,
        text_muted = scheme.text_muted,
        border = scheme.border,
        accent = scheme.accent,
        code_bg = scheme.code_background,
    )
}

/// Generate CSS custom properties from color config.
///
/// Light values apply by default and under `data-theme="light"`; dark values
/// under `data-theme="dark"`. Pages are generated with `data-theme` already
/// set, and the page script rewrites it when the reader's choice differs.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let light = scheme_variables(&colors.light);
    let dark = scheme_variables(&colors.dark);
    format!(
        r#":root,
[data-theme="light"] {{
{light}
}}

[data-theme="dark"] {{
{dark}
}}"#
    )
}

/// Generate the sidebar and breadcrumb link rules for both variants.
///
/// Each rule comes from [`link_style`], so the stylesheet and the renderer
/// agree on what "active" looks like.
pub fn generate_link_css(colors: &ColorConfig) -> String {
    let mut rules = Vec::new();
    for variant in ThemeVariant::ALL {
        let scheme = colors.scheme(variant);
        for active in [false, true] {
            let style = link_style(active, variant);
            let selector = if active {
                ".nav-link.active, .crumb.current"
            } else {
                ".nav-link, .crumb"
            };
            let mut rule = format!(
                "[data-theme=\"{variant}\"] :is({selector}) {{\n    color: {};\n    text-decoration: {};\n    font-weight: {};\n}}",
                style.color.value(scheme),
                style.decoration.as_css(),
                style.weight,
            );
            if let Some(hover) = style.hover {
                rule.push_str(&format!(
                    "\n[data-theme=\"{variant}\"] :is({selector}):hover {{\n    color: {};\n}}",
                    hover.value(scheme)
                ));
            }
            rules.push(rule);
        }
    }
    rules.join("\n\n")
}
