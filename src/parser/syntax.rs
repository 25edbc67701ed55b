//! Immutable markdown syntax tree with source spans.
//!
//! `pulldown-cmark` produces a flat event stream. This module folds it into a
//! tree of block and inline nodes, each remembering the byte range it was
//! parsed from, so callers can reconstruct text from the spans that survive a
//! transformation instead of editing strings.

use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag};

/// What a syntax node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxKind {
    Heading(u8),
    List { ordered: bool },
    Item,
    Link { href: String },
    CodeBlock,
    Paragraph,
    /// Text, inline code, breaks and other leaf events.
    Inline,
    Other,
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub span: Range<usize>,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    fn new(kind: SyntaxKind, span: Range<usize>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Heading depth, if this node is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            SyntaxKind::Heading(level) => Some(level),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, SyntaxKind::List { .. })
    }
}

/// A parsed markdown document.
#[derive(Debug, Clone)]
pub struct SyntaxTree<'a> {
    source: &'a str,
    blocks: Vec<SyntaxNode>,
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn kind_of(tag: &Tag<'_>) -> SyntaxKind {
    match tag {
        Tag::Heading { level, .. } => SyntaxKind::Heading(*level as u8),
        Tag::List(start) => SyntaxKind::List {
            ordered: start.is_some(),
        },
        Tag::Item => SyntaxKind::Item,
        Tag::Link { dest_url, .. } => SyntaxKind::Link {
            href: dest_url.to_string(),
        },
        Tag::CodeBlock(_) => SyntaxKind::CodeBlock,
        Tag::Paragraph => SyntaxKind::Paragraph,
        _ => SyntaxKind::Other,
    }
}

impl<'a> SyntaxTree<'a> {
    /// Parse `source` into a tree of top-level blocks.
    pub fn parse(source: &'a str) -> Self {
        let mut blocks = Vec::new();
        let mut stack: Vec<SyntaxNode> = Vec::new();

        for (event, span) in Parser::new_ext(source, options()).into_offset_iter() {
            let finished = match event {
                Event::Start(tag) => {
                    stack.push(SyntaxNode::new(kind_of(&tag), span));
                    None
                }
                Event::End(_) => stack.pop(),
                Event::Rule => Some(SyntaxNode::new(SyntaxKind::Other, span)),
                _ => Some(SyntaxNode::new(SyntaxKind::Inline, span)),
            };

            if let Some(node) = finished {
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => blocks.push(node),
                }
            }
        }

        Self { source, blocks }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Top-level blocks in document order.
    pub fn blocks(&self) -> &[SyntaxNode] {
        &self.blocks
    }

    /// Raw source of the node's inline content.
    ///
    /// For a heading `# Hello **world**` this is `Hello **world**`. Nodes
    /// without children yield an empty string.
    pub fn inline_text(&self, node: &SyntaxNode) -> &'a str {
        match (node.children.first(), node.children.last()) {
            (Some(first), Some(last)) => self
                .source
                .get(first.span.start..last.span.end)
                .unwrap_or_default(),
            _ => "",
        }
    }

    /// Byte offset where the top-level block at `index` begins, widened to the
    /// start of its line so indentation travels with the block.
    fn segment_start(&self, index: usize) -> usize {
        if index == 0 {
            return 0;
        }
        let start = self.blocks[index].span.start;
        self.source[..start].rfind('\n').map_or(0, |newline| newline + 1)
    }

    /// Source owned by the top-level block at `index`: from its start up to
    /// the start of the next block. The first block also owns any prefix.
    pub fn segment(&self, index: usize) -> &'a str {
        let start = self.segment_start(index);
        let end = if index + 1 < self.blocks.len() {
            self.segment_start(index + 1)
        } else {
            self.source.len()
        };
        &self.source[start..end]
    }
}
