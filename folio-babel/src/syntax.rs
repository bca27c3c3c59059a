//! The folio manuscript markup: glyphs, markers and line classification.
//!
//! Both stages consult this module so that the normalizer passes through exactly the lines the
//! compiler treats as structure.

use crate::ir::nodes::{InlineContent, SECTION_LEVELS};

/// A line consisting of exactly this text opens or closes a table.
pub const TABLE_FENCE: &str = "---";
/// Repeated at the start of a line to mark a heading; the count selects the level.
pub const SECTION_MARKER: char = '+';
/// Separates the fields of a table row.
pub const COLUMN_SEPARATOR: char = '|';
pub const COMMENT_OPEN: char = '（';
pub const COMMENT_CLOSE: char = '）';
pub const OPEN_QUOTE: char = '“';
pub const CLOSE_QUOTE: char = '”';

/// Glyphs after which a paragraph may end.
pub const TERMINALS: [char; 6] = ['。', '”', '？', '！', '）', '》'];

pub fn is_terminal(ch: char) -> bool {
    TERMINALS.contains(&ch)
}

pub fn is_quote(ch: char) -> bool {
    ch == OPEN_QUOTE || ch == CLOSE_QUOTE
}

pub fn is_fence(text: &str) -> bool {
    text == TABLE_FENCE
}

pub fn is_heading(text: &str) -> bool {
    text.starts_with(SECTION_MARKER)
}

/// A heading line split into marker depth and title text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingMarker<'a> {
    /// Number of leading marker glyphs
    pub depth: usize,
    pub title: &'a str,
}

impl HeadingMarker<'_> {
    /// Zero-based section level, if the depth is one the markup supports.
    pub fn level(&self) -> Option<usize> {
        (1..=SECTION_LEVELS)
            .contains(&self.depth)
            .then(|| self.depth - 1)
    }
}

pub fn split_heading(text: &str) -> HeadingMarker<'_> {
    let title = text.trim_start_matches(SECTION_MARKER);
    let depth = text[..text.len() - title.len()].chars().count();
    HeadingMarker { depth, title }
}

/// Splits a table row into trimmed fields.
pub fn split_row(text: &str) -> Vec<String> {
    text.split(COLUMN_SEPARATOR)
        .map(|field| field.trim().to_string())
        .collect()
}

/// An opening comment glyph that never found its partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnclosedComment {
    /// 1-based character column of the opening glyph
    pub column: usize,
}

/// Splits text into plain runs and (possibly nested) comment spans.
///
/// A closing glyph with no open comment is kept as literal text.
pub fn parse_inline(text: &str) -> Result<Vec<InlineContent>, UnclosedComment> {
    let mut open: Vec<(usize, Vec<InlineContent>)> = Vec::new();
    let mut current = Vec::new();
    let mut run = String::new();

    for (index, ch) in text.chars().enumerate() {
        match ch {
            COMMENT_OPEN => {
                flush_run(&mut run, &mut current);
                open.push((index + 1, std::mem::take(&mut current)));
            }
            COMMENT_CLOSE => match open.pop() {
                Some((_, mut parent)) => {
                    flush_run(&mut run, &mut current);
                    parent.push(InlineContent::Comment(std::mem::take(&mut current)));
                    current = parent;
                }
                None => {
                    log::warn!("Stray comment closer kept as text: {text}");
                    run.push(ch);
                }
            },
            _ => run.push(ch),
        }
    }

    if let Some((column, _)) = open.first() {
        return Err(UnclosedComment { column: *column });
    }
    flush_run(&mut run, &mut current);
    Ok(current)
}

fn flush_run(run: &mut String, into: &mut Vec<InlineContent>) {
    if !run.is_empty() {
        into.push(InlineContent::Text(std::mem::take(run)));
    }
}
