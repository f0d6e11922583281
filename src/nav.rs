//! Sidebar, top bar and mobile navigation overlay.
//!
//! The sidebar walks the registry section by section: a plain heading, then
//! one link per entry, in registry order. Whether a link is active comes from
//! [`crate::segments`]; how an active or inactive link looks comes from
//! [`link_style`], which is also what the stylesheet rules are generated from.
//!
//! On narrow screens the sidebar is hidden and the same list renders inside
//! an overlay opened from the top bar. The overlay is a checkbox toggle:
//! every page load starts it closed, so navigating away always dismisses it.

use crate::config::{ColorScheme, SiteConfig};
use crate::icons;
use crate::registry::RouteRegistry;
use crate::segments::{SegmentPath, resolve_section};
use crate::theme::{ThemeContext, ThemePreference, ThemeStore, ThemeVariant};
use maud::{Markup, PreEscaped, html};

/// Named color slot of a [`ColorScheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Text,
    Muted,
    Accent,
}

impl ColorRole {
    pub fn value(self, scheme: &ColorScheme) -> &str {
        match self {
            ColorRole::Text => &scheme.text,
            ColorRole::Muted => &scheme.text_muted,
            ColorRole::Accent => &scheme.accent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    None,
    Underline,
}

impl Decoration {
    pub fn as_css(self) -> &'static str {
        match self {
            Decoration::None => "none",
            Decoration::Underline => "underline",
        }
    }
}

/// Visual weight of a navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStyle {
    pub color: ColorRole,
    pub decoration: Decoration,
    pub weight: u16,
    /// Color on hover, if the link reacts to it.
    pub hover: Option<ColorRole>,
}

/// Style of a sidebar or breadcrumb link.
///
/// Active links use the full text color, an underline and a heavier weight;
/// light text on a dark background reads heavier, so dark uses one step less.
/// Inactive links are muted and turn to the accent color on hover.
pub fn link_style(active: bool, variant: ThemeVariant) -> LinkStyle {
    if active {
        LinkStyle {
            color: ColorRole::Text,
            decoration: Decoration::Underline,
            weight: match variant {
                ThemeVariant::Light => 600,
                ThemeVariant::Dark => 500,
            },
            hover: None,
        }
    } else {
        LinkStyle {
            color: ColorRole::Muted,
            decoration: Decoration::None,
            weight: 400,
            hover: Some(ColorRole::Accent),
        }
    }
}

/// Grouped link list for every section.
pub fn render_sidebar_links(registry: &RouteRegistry, current: &SegmentPath) -> Markup {
    html! {
        @for section in registry.sections() {
            section.sidebar-section {
                h2.sidebar-heading { (section.title) }
                ul.sidebar-links {
                    @for highlight in resolve_section(section, current) {
                        li {
                            a.nav-link.active[highlight.active]
                                href=(highlight.entry.route)
                                aria-current=[highlight.active.then_some("page")] {
                                (highlight.entry.title)
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The desktop sidebar.
pub fn render_sidebar(
    registry: &RouteRegistry,
    current: &SegmentPath,
    variant: ThemeVariant,
) -> Markup {
    html! {
        aside.sidebar data-variant=(variant.as_str()) {
            nav aria-label="Examples" {
                (render_sidebar_links(registry, current))
            }
        }
    }
}

/// Light / dark / system menu. The page script applies and remembers the choice.
pub fn render_mode_toggle(preference: ThemePreference) -> Markup {
    html! {
        details.mode-toggle {
            summary.icon-button aria-label="Toggle theme" {
                (PreEscaped(icons::SUN))
                (PreEscaped(icons::MOON))
            }
            ul.mode-menu role="menu" {
                @for choice in ThemePreference::ALL {
                    li role="none" {
                        button.mode-choice type="button" role="menuitemradio"
                            data-theme-choice=(choice.as_str())
                            aria-checked=(if choice == preference { "true" } else { "false" }) {
                            (capitalized(choice.as_str()))
                        }
                    }
                }
            }
        }
    }
}

fn capitalized(s: &str) -> String {
    crate::naming::segment_label(s, crate::naming::LabelCase::First)
}

/// Top bar with the site title, theme menu and the overlay trigger.
pub fn render_top_nav<S: ThemeStore>(
    config: &SiteConfig,
    registry: &RouteRegistry,
    current: &SegmentPath,
    theme: &ThemeContext<S>,
) -> Markup {
    html! {
        header.top-bar data-variant=(theme.variant().as_str()) {
            a.brand href="/" { (config.title) }
            div.top-actions {
                (render_mode_toggle(theme.preference()))
                label.icon-button.nav-trigger for="nav-overlay-toggle" aria-label="Open navigation" {
                    (PreEscaped(icons::HAMBURGER))
                }
            }
        }
        (render_nav_overlay(registry, current))
    }
}

/// Mobile overlay holding the same link list as the sidebar.
pub fn render_nav_overlay(registry: &RouteRegistry, current: &SegmentPath) -> Markup {
    html! {
        input.nav-overlay-toggle type="checkbox" id="nav-overlay-toggle" autocomplete="off";
        div.nav-overlay {
            label.nav-overlay-close for="nav-overlay-toggle" aria-label="Close navigation" { "×" }
            nav aria-label="Examples" {
                (render_sidebar_links(registry, current))
            }
        }
    }
}
