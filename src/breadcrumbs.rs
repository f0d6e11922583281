//! Breadcrumb trail from the home page to the current page.
//!
//! For the path `["basic_examples", "hello_world"]` the trail is:
//!
//! ```text
//! home => basic examples => hello world
//! /       /basic_examples   /basic_examples/hello_world   (current)
//! ```
//!
//! Only the last crumb is current. It stays a link to itself.

use crate::config::BreadcrumbConfig;
use crate::icons;
use crate::naming::{LabelCase, segment_label};
use crate::segments::SegmentPath;
use maud::{Markup, PreEscaped, html};

/// One step of the trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub label: String,
    pub href: String,
    pub current: bool,
    pub home: bool,
}

/// Build the trail: the home crumb, then one crumb per segment prefix.
pub fn trail(current: &SegmentPath, home_label: &str, case: LabelCase) -> Vec<Crumb> {
    let last = current.len();
    let mut crumbs = Vec::with_capacity(last + 1);
    crumbs.push(Crumb {
        label: home_label.to_string(),
        href: "/".to_string(),
        current: false,
        home: true,
    });
    crumbs.extend(current.segments().iter().enumerate().map(|(i, segment)| Crumb {
        label: segment_label(segment, case),
        href: current.prefix_route(i + 1),
        current: i + 1 == last,
        home: false,
    }));
    crumbs
}

pub fn render_breadcrumbs(current: &SegmentPath, config: &BreadcrumbConfig) -> Markup {
    let crumbs = trail(current, &config.home_label, config.label_case);
    html! {
        nav.breadcrumbs aria-label="Breadcrumb" {
            ol {
                @for (i, crumb) in crumbs.iter().enumerate() {
                    li {
                        @if i > 0 {
                            span.crumb-separator aria-hidden="true" { " " (config.separator) " " }
                        }
                        a.crumb.current[crumb.current]
                            href=(crumb.href)
                            aria-current=[crumb.current.then_some("page")] {
                            @if crumb.home {
                                (PreEscaped(icons::HOME))
                            }
                            (crumb.label)
                        }
                    }
                }
            }
        }
    }
}
