//! Markdown pages with code panels.
//!
//! Two passes over the same source. At scan time [`extract_code_blocks`]
//! pulls every fenced block out as a [`CodeBlock`], reading `file=` includes
//! from the content root. At generate time [`render_markdown`] renders the
//! prose and swaps the n-th code block for the n-th rendered panel.
//!
//! Fence info is `language [key=value ...]`:
//!
//! ````markdown
//! ```rust file=example_code/hello_world/src/main.rs
//! ```
//! ````
//!
//! A fence without a language gets `code.fence_language`.

use crate::code_panel::CodeBlock;
use crate::config::CodeConfig;
use maud::Markup;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarkdownError {
    #[error("cannot include {path}: {source}")]
    Include {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("include must be a relative path inside the content root: {0}")]
    IncludeOutsideRoot(PathBuf),
}

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Parse fence info into language and attributes.
pub fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_string();

    let mut attrs = HashMap::new();
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            let value = value.trim_matches('"').trim_matches('\'');
            attrs.insert(key.to_string(), value.to_string());
        }
    }

    (language, attrs)
}

/// A code block as written in the markdown, before includes.
struct RawBlock {
    info: String,
    text: String,
}

fn raw_blocks(source: &str) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<RawBlock> = None;
    for event in Parser::new_ext(source, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                current = Some(RawBlock {
                    info: fence_info(&kind),
                    text: String::new(),
                });
            }
            Event::Text(text) => {
                if let Some(block) = current.as_mut() {
                    block.text.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => blocks.extend(current.take()),
            _ => {}
        }
    }
    blocks
}

fn fence_info(kind: &CodeBlockKind<'_>) -> String {
    match kind {
        CodeBlockKind::Fenced(info) => info.to_string(),
        CodeBlockKind::Indented => String::new(),
    }
}

fn to_code_block(raw: &RawBlock, config: &CodeConfig) -> (CodeBlock, Option<String>) {
    let (language, mut attrs) = parse_fence_info(&raw.info);
    let language = (!language.is_empty()).then_some(language.as_str());
    let block = CodeBlock::new(raw.text.clone(), language, &config.fence_language);
    (block, attrs.remove("file"))
}

/// Every code block in `source`, in document order, with includes read from
/// `content_root`.
pub fn extract_code_blocks(
    source: &str,
    content_root: &Path,
    config: &CodeConfig,
) -> Result<Vec<CodeBlock>, MarkdownError> {
    raw_blocks(source)
        .iter()
        .map(|raw| {
            let (mut block, include) = to_code_block(raw, config);
            if let Some(file) = include {
                let path = resolve_include(content_root, &file)?;
                tracing::debug!(path = %path.display(), "including example source");
                block.content = std::fs::read_to_string(&path)
                    .map_err(|source| MarkdownError::Include { path, source })?;
            }
            Ok(block)
        })
        .collect()
}

fn resolve_include(content_root: &Path, file: &str) -> Result<PathBuf, MarkdownError> {
    let relative = Path::new(file);
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if file.is_empty() || escapes {
        return Err(MarkdownError::IncludeOutsideRoot(relative.to_path_buf()));
    }
    Ok(content_root.join(relative))
}

/// Plain text of the first level-one heading.
pub fn extract_title(source: &str) -> Option<String> {
    let mut title: Option<String> = None;
    for event in Parser::new_ext(source, options()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => title = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(t) = title.as_mut() {
                    t.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                return title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }
    None
}

/// Render `source` to HTML. The n-th code block is replaced by
/// `code_panel(&blocks[n])`.
pub fn render_markdown(
    source: &str,
    blocks: &[CodeBlock],
    config: &CodeConfig,
    mut code_panel: impl FnMut(&CodeBlock) -> Markup,
) -> String {
    let mut events = Vec::new();
    let mut current: Option<RawBlock> = None;
    let mut index = 0;

    for event in Parser::new_ext(source, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                current = Some(RawBlock {
                    info: fence_info(&kind),
                    text: String::new(),
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                let Some(raw) = current.take() else { continue };
                let panel = match blocks.get(index) {
                    Some(block) => code_panel(block),
                    None => {
                        tracing::warn!(index, "code block missing from scan, rendering fence text");
                        code_panel(&to_code_block(&raw, config).0)
                    }
                };
                index += 1;
                events.push(Event::Html(CowStr::from(panel.into_string())));
            }
            Event::Text(text) if current.is_some() => {
                if let Some(raw) = current.as_mut() {
                    raw.text.push_str(&text);
                }
            }
            other if current.is_none() => events.push(other),
            _ => {}
        }
    }

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, events.into_iter());
    html
}
