//! Syntax highlighting behind the [`Highlighter`] trait.
//!
//! [`SyntectHighlighter`] parses with syntect's bundled Sublime grammars and
//! emits class-based spans (`hl-` prefixed scope names), never inline colors.
//! The gruvbox palettes in `static/*.tmTheme` become one stylesheet per
//! variant, each scoped to `.code-panel[data-variant=...]`, so the markup is
//! identical for both variants.
//!
//! Output is one [`Markup`] per source line. Spans still open at a line end
//! (a block comment, a multi-line string) are closed there and reopened on
//! the next line. Languages syntect does not know render as escaped text.

use crate::theme::ThemeVariant;
use maud::{Markup, PreEscaped, html};
use std::fmt::Write;
use std::io::Cursor;
use syntect::highlighting::{Color, Theme, ThemeSet};
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

const GRUVBOX_LIGHT: &str = include_str!("../../static/gruvbox-light.tmTheme");
const GRUVBOX_DARK: &str = include_str!("../../static/gruvbox-dark.tmTheme");

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("cannot load {variant} theme: {source}")]
    Theme {
        variant: ThemeVariant,
        source: syntect::LoadingError,
    },
}

pub trait Highlighter: Sync {
    /// Highlight `content` as `language`, one markup fragment per line.
    fn highlight(&self, content: &str, language: &str) -> Vec<Markup>;

    /// CSS rules coloring the highlighted tokens for `variant`.
    fn stylesheet(&self, variant: ThemeVariant) -> String;
}

/// Default highlighter: syntect grammars with gruvbox palettes.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    light: Theme,
    dark: Theme,
}

impl SyntectHighlighter {
    pub fn new() -> Result<Self, HighlightError> {
        Ok(Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            light: load_theme(GRUVBOX_LIGHT, ThemeVariant::Light)?,
            dark: load_theme(GRUVBOX_DARK, ThemeVariant::Dark)?,
        })
    }

    fn theme(&self, variant: ThemeVariant) -> &Theme {
        match variant {
            ThemeVariant::Light => &self.light,
            ThemeVariant::Dark => &self.dark,
        }
    }

    /// Grammar for a fence language. Plain text counts as no grammar.
    fn syntax_for(&self, language: &str) -> Option<&SyntaxReference> {
        let token = match language {
            "shell" | "console" | "zsh" => "bash",
            other => other,
        };
        self.syntaxes
            .find_syntax_by_token(token)
            .filter(|syntax| syntax.name != "Plain Text")
    }

    fn classed_html(&self, content: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, CLASS_STYLE);
        for line in LinesWithEndings::from(content) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

fn load_theme(plist: &str, variant: ThemeVariant) -> Result<Theme, HighlightError> {
    ThemeSet::load_from_reader(&mut Cursor::new(plist.as_bytes()))
        .map_err(|source| HighlightError::Theme { variant, source })
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, content: &str, language: &str) -> Vec<Markup> {
        let content = content.replace("\r\n", "\n");
        let Some(syntax) = self.syntax_for(language) else {
            return plain_lines(&content);
        };
        match self.classed_html(&content, syntax) {
            Ok(html) => split_lines(&html).into_iter().map(PreEscaped).collect(),
            Err(err) => {
                tracing::warn!(%language, error = %err, "highlighting failed, rendering plain text");
                plain_lines(&content)
            }
        }
    }

    fn stylesheet(&self, variant: ThemeVariant) -> String {
        let theme = self.theme(variant);
        let scope = format!(".code-panel[data-variant=\"{}\"]", variant.as_str());
        let mut css = match css_for_theme_with_class_style(theme, CLASS_STYLE) {
            Ok(css) => scope_rules(&css, &scope),
            Err(err) => {
                tracing::warn!(%variant, error = %err, "cannot build highlight stylesheet");
                String::new()
            }
        };
        if let Some(gutter) = theme.settings.gutter_foreground {
            let _ = writeln!(css, "{scope} .line-number {{ color: {}; }}", hex(gutter));
        }
        css
    }
}

fn plain_lines(content: &str) -> Vec<Markup> {
    content.split('\n').map(|line| html! { (line) }).collect()
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Split highlighted HTML at newlines. Spans open at a line end are closed
/// there and reopened at the start of the next line, so every line is
/// balanced on its own.
fn split_lines(html: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut open: Vec<&str> = Vec::new();
    let mut line = String::new();
    let mut rest = html;

    while let Some(pos) = rest.find(['<', '\n']) {
        line.push_str(&rest[..pos]);
        rest = &rest[pos..];
        if let Some(after) = rest.strip_prefix('\n') {
            line.push_str(&"</span>".repeat(open.len()));
            lines.push(std::mem::take(&mut line));
            line.extend(open.iter().copied());
            rest = after;
        } else {
            let end = rest.find('>').map_or(rest.len(), |i| i + 1);
            let tag = &rest[..end];
            if tag.starts_with("</") {
                open.pop();
            } else {
                open.push(tag);
            }
            line.push_str(tag);
            rest = &rest[end..];
        }
    }
    line.push_str(rest);
    line.push_str(&"</span>".repeat(open.len()));
    lines.push(line);
    lines
}

/// Prefix every selector in `css` with `scope`. The generator's `.hl-code`
/// rule becomes the panel's `pre`, without its background so the configured
/// code background stays in charge.
fn scope_rules(css: &str, scope: &str) -> String {
    let mut out = String::new();
    for rule in strip_comments(css).split('}') {
        let Some((selectors, body)) = rule.split_once('{') else {
            continue;
        };
        let selectors: Vec<&str> = selectors
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if selectors.is_empty() {
            continue;
        }

        let declarations: Vec<&str> = body
            .split(';')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .filter(|d| selectors != [".hl-code"] || !d.starts_with("background"))
            .collect();
        if declarations.is_empty() {
            continue;
        }

        let scoped: Vec<String> = selectors
            .iter()
            .map(|s| match *s {
                ".hl-code" => format!("{scope} pre"),
                s => format!("{scope} {s}"),
            })
            .collect();
        let _ = writeln!(
            out,
            "{} {{ {}; }}",
            scoped.join(", "),
            declarations.join("; ")
        );
    }
    out
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = match rest[start..].find("*/") {
            Some(end) => &rest[start + end + 2..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::highlighter;

    /// Text runs of one rendered line, each with whether a comment span
    /// encloses it.
    fn runs(line: &str) -> Vec<(bool, String)> {
        let mut runs = Vec::new();
        let mut open: Vec<bool> = Vec::new();
        let mut rest = line;
        while !rest.is_empty() {
            if rest.starts_with('<') {
                let end = rest.find('>').unwrap() + 1;
                let tag = &rest[..end];
                if tag.starts_with("</") {
                    open.pop();
                } else {
                    open.push(tag.contains("hl-comment"));
                }
                rest = &rest[end..];
            } else {
                let end = rest.find('<').unwrap_or(rest.len());
                runs.push((open.contains(&true), rest[..end].to_string()));
                rest = &rest[end..];
            }
        }
        runs
    }

    fn render(code: &str, language: &str) -> Vec<String> {
        highlighter()
            .highlight(code, language)
            .into_iter()
            .map(Markup::into_string)
            .collect()
    }

    // =========================================================================
    // Highlighting
    // =========================================================================

    #[test]
    fn rust_gets_scope_classes() {
        let lines = render("// entry\nfn main() {}", "rust");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("hl-comment"));
        assert!(lines[1].contains("hl-rust"));
    }

    #[test]
    fn nested_block_comment_stays_a_comment() {
        let lines = render("/* a /* b */ c */ fn x() {}", "rust");
        let runs = runs(&lines[0]);
        assert!(runs.iter().filter(|(_, t)| t.contains(" c ")).all(|(c, _)| *c));
        assert!(runs.iter().any(|(_, t)| t.contains(" c ")));
        assert!(runs.iter().filter(|(_, t)| t.contains('x')).all(|(c, _)| !*c));
    }

    #[test]
    fn multi_line_comment_reopened_per_line() {
        let lines = render("/* one\ntwo */\nlet x = 1;", "rust");
        assert_eq!(lines.len(), 3);
        for line in &lines {
            assert_eq!(line.matches("<span").count(), line.matches("</span>").count());
        }
        assert!(runs(&lines[1]).iter().any(|(c, t)| *c && t.contains("two")));
        assert!(!runs(&lines[2]).iter().any(|(c, _)| *c));
    }

    #[test]
    fn unknown_language_is_escaped_text() {
        let lines = render("a < b\nc", "klingon");
        assert_eq!(lines, vec!["a &lt; b", "c"]);
    }

    #[test]
    fn plain_text_fence_has_no_spans() {
        let lines = render("just text", "txt");
        assert_eq!(lines, vec!["just text"]);
    }

    #[test]
    fn shell_aliases_use_bash_grammar() {
        let lines = render("# install\necho hi", "console");
        assert!(lines[0].contains("hl-comment"));
    }

    #[test]
    fn crlf_source_has_no_carriage_returns() {
        let lines = render("let a = 1;\r\nlet b = 2;", "rust");
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| !l.contains('\r')));
    }

    // =========================================================================
    // Stylesheet
    // =========================================================================

    #[test]
    fn stylesheet_scoped_to_variant() {
        let css = highlighter().stylesheet(ThemeVariant::Dark);
        assert!(css.contains(r#".code-panel[data-variant="dark"] .hl-comment"#));
        assert!(css.contains("#fb4934"));
        assert!(css.contains(r#".code-panel[data-variant="dark"] .line-number { color: #7c6f64; }"#));
        assert!(!css.contains(r#"[data-variant="light"]"#));
        assert!(!css.contains("/*"));
    }

    #[test]
    fn palettes_differ_between_variants() {
        let light = highlighter().stylesheet(ThemeVariant::Light);
        let dark = highlighter().stylesheet(ThemeVariant::Dark);
        assert!(light.contains("#9d0006"));
        assert!(!light.contains("#fb4934"));
        assert!(dark.contains("#b8bb26"));
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn split_lines_reopens_spans() {
        let html = r#"<span class="a"><span class="b">x
y</span></span>z"#;
        assert_eq!(
            split_lines(html),
            vec![
                r#"<span class="a"><span class="b">x</span></span>"#,
                r#"<span class="a"><span class="b">y</span></span>z"#,
            ]
        );
    }

    #[test]
    fn scope_rules_prefixes_and_drops_code_background() {
        let css = "/* theme */\n.hl-code {\n color: #111;\n background-color: #fff;\n}\n\n.hl-comment, .hl-string.hl-quoted {\n color: #222;\n}\n";
        assert_eq!(
            scope_rules(css, ".p"),
            ".p pre { color: #111; }\n.p .hl-comment, .p .hl-string.hl-quoted { color: #222; }\n"
        );
    }
}
