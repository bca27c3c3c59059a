//! Defines the flat event stream representation of a document.

use crate::ir::nodes::{InlineContent, Paragraph, Section};

/// Represents a single event in the document stream.
///
/// The compiler produces these in source order while it parses, so an emitter sees a table row
/// only after that row has been validated.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartDocument,
    FrontMatter {
        title: Vec<InlineContent>,
        author: Vec<InlineContent>,
    },
    Section(Section),
    Paragraph(Paragraph),
    StartTable {
        columns: usize,
    },
    TableRow(Vec<String>),
    EndTable,
    EndDocument,
}

impl Event {
    /// Short tag used by `inspect events`.
    pub fn name(&self) -> &'static str {
        match self {
            Event::StartDocument => "start-document",
            Event::FrontMatter { .. } => "front-matter",
            Event::Section(_) => "section",
            Event::Paragraph(_) => "paragraph",
            Event::StartTable { .. } => "start-table",
            Event::TableRow(_) => "table-row",
            Event::EndTable => "end-table",
            Event::EndDocument => "end-document",
        }
    }
}
