//! Code panels: highlighted source with a copy button.
//!
//! The module is split into:
//! - **Highlight**: [`Highlighter`] trait + [`SyntectHighlighter`]
//! - **Copy**: [`CopyAffordance`] state machine + [`Clipboard`] trait
//!
//! A panel is rendered once. Its palette comes from the stylesheet rules for
//! the panel's `data-variant`, so switching theme only changes that attribute
//! and never the highlighted markup. The copy button carries the trimmed
//! payload in `data-copy`; the page script writes it with
//! `navigator.clipboard.writeText` and drives `data-state`.

mod copy;
pub mod highlight;

pub use copy::{Clipboard, ClipboardError, CopyAffordance, CopyState, StdoutClipboard};
pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};

use crate::config::CodeConfig;
use crate::icons;
use crate::theme::ThemeVariant;
use maud::{Markup, PreEscaped, html};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Source shown in a code panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub content: String,
    pub language: String,
}

impl CodeBlock {
    /// Block in `language`, or `default_language` when none is given.
    pub fn new(content: impl Into<String>, language: Option<&str>, default_language: &str) -> Self {
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(default_language);
        Self {
            content: content.into(),
            language: language.to_ascii_lowercase(),
        }
    }

    /// Lines as displayed: trailing newlines dropped so there is no empty last row.
    pub fn display_source(&self) -> &str {
        self.content.trim_end_matches(['\n', '\r'])
    }

    pub fn copy_affordance(&self, config: &CodeConfig) -> CopyAffordance {
        CopyAffordance::new(&self.content, Duration::from_millis(config.copy_reset_ms))
    }
}

pub fn render_code_panel(
    block: &CodeBlock,
    variant: ThemeVariant,
    highlighter: &dyn Highlighter,
    config: &CodeConfig,
) -> Markup {
    let copy = block.copy_affordance(config);
    let lines = highlighter.highlight(block.display_source(), &block.language);
    html! {
        figure.code-panel data-variant=(variant.as_str()) data-language=(block.language) {
            button.copy-button type="button"
                data-state=(copy.state().as_str())
                data-copy=(copy.payload())
                data-reset-ms=(copy.reset_after().as_millis())
                aria-label="Copy code" {
                (PreEscaped(icons::COPY))
                (PreEscaped(icons::CHECK))
                (PreEscaped(icons::CROSS))
            }
            pre.code.numbered[config.line_numbers] {
                code class={ "language-" (block.language) } {
                    @for (i, line) in lines.into_iter().enumerate() {
                        span.line {
                            @if config.line_numbers {
                                span.line-number aria-hidden="true" { (i + 1) }
                            }
                            (line)
                        }
                        "\n"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::copy::tests::MemoryClipboard;
    use super::*;
    use crate::test_helpers::highlighter;
    use std::time::Instant;

    fn render(block: &CodeBlock, variant: ThemeVariant) -> String {
        render_code_panel(block, variant, highlighter(), &CodeConfig::default()).into_string()
    }

    #[test]
    fn missing_language_uses_default() {
        let block = CodeBlock::new("fn main() {}", None, "rust");
        assert_eq!(block.language, "rust");
        let block = CodeBlock::new("x", Some("  "), "rust");
        assert_eq!(block.language, "rust");
        let block = CodeBlock::new("x", Some("TOML"), "rust");
        assert_eq!(block.language, "toml");
    }

    #[test]
    fn copy_payload_is_trimmed_source() {
        let block = CodeBlock::new("fn main() {}\n  ", None, "rust");
        let html = render(&block, ThemeVariant::Light);
        assert!(html.contains(r#"data-copy="fn main() {}""#));
        assert!(html.contains(r#"data-state="idle""#));
        assert!(html.contains(r#"data-reset-ms="1000""#));
    }

    #[test]
    fn variant_switch_keeps_content() {
        let block = CodeBlock::new("#[entrypoint]\nfn main() { let x = 1; }\n", None, "rust");
        let light = render(&block, ThemeVariant::Light);
        let dark = render(&block, ThemeVariant::Dark);
        assert_ne!(light, dark);
        assert_eq!(
            light.replace(r#"data-variant="light""#, ""),
            dark.replace(r#"data-variant="dark""#, "")
        );
    }

    #[test]
    fn lines_numbered_without_trailing_empty_line() {
        let block = CodeBlock::new("a\nb\n", Some("txt"), "rust");
        let html = render(&block, ThemeVariant::Light);
        assert_eq!(html.matches(r#"<span class="line">"#).count(), 2);
        assert!(html.contains(r#"<span class="line-number" aria-hidden="true">2</span>b"#));
        assert!(html.contains(r#"class="code numbered""#));
    }

    #[test]
    fn line_numbers_can_be_disabled() {
        let config = CodeConfig {
            line_numbers: false,
            ..CodeConfig::default()
        };
        let block = CodeBlock::new("a", None, "rust");
        let html = render_code_panel(&block, ThemeVariant::Dark, highlighter(), &config)
            .into_string();
        assert!(!html.contains("line-number"));
        assert!(html.contains(r#"<pre class="code">"#));
    }

    #[test]
    fn language_class_on_code_element() {
        let block = CodeBlock::new("echo hi", Some("sh"), "rust");
        let html = render(&block, ThemeVariant::Light);
        assert!(html.contains(r#"<code class="language-sh">"#));
        assert!(html.contains(r#"data-language="sh""#));
    }

    #[test]
    fn payload_attribute_escaped() {
        let block = CodeBlock::new(r#"let s = "<tag>";"#, None, "rust");
        let html = render(&block, ThemeVariant::Light);
        assert!(html.contains(r#"data-copy="let s = &quot;&lt;tag&gt;&quot;;""#));
    }

    #[test]
    fn affordance_copies_rendered_payload() {
        let block = CodeBlock::new("\nfn main() {}\n", None, "rust");
        let mut copy = block.copy_affordance(&CodeConfig::default());
        let mut clipboard = MemoryClipboard::default();
        copy.copy_to(&mut clipboard, Instant::now());
        assert_eq!(clipboard.contents.as_deref(), Some("fn main() {}"));
        assert_eq!(clipboard.writes, 1);
    }
}
