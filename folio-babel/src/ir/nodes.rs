//! Core data structures for the document model.

use serde::Serialize;

/// Number of heading levels the markup can express (`+` through `++++++++`).
pub const SECTION_LEVELS: usize = 8;

/// Represents the root of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub title: Vec<InlineContent>,
    pub author: Vec<InlineContent>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Section(section) => Some(section),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(table) => Some(table),
            _ => None,
        })
    }
}

/// A top-level content block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Section(Section),
    Paragraph(Paragraph),
    Table(Table),
}

/// A heading opening a section.
///
/// `level` is zero-based (0 = part, 7 = finest). `ordinal` counts the sections opened at this
/// level since an ancestor last reset it, starting at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub level: usize,
    pub title: Vec<InlineContent>,
    pub ordinal: usize,
}

/// Represents a paragraph of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: Vec<InlineContent>,
}

/// Represents a table. Every row has the same number of cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Represents inline content: plain text or an author comment, which may nest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineContent {
    Text(String),
    Comment(Vec<InlineContent>),
}

impl InlineContent {
    pub fn text(value: impl Into<String>) -> Self {
        InlineContent::Text(value.into())
    }
}

/// Concatenated text with comment spans removed.
pub fn plain_text(content: &[InlineContent]) -> String {
    let mut out = String::new();
    for inline in content {
        if let InlineContent::Text(text) = inline {
            out.push_str(text);
        }
    }
    out
}

/// Whether any comment span occurs in `content`.
pub fn has_comments(content: &[InlineContent]) -> bool {
    content
        .iter()
        .any(|inline| matches!(inline, InlineContent::Comment(_)))
}
