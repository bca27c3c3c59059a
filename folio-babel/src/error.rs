//! Error types for normalization and compilation
//!
//! Two families matter to callers. Resource errors (an input that cannot be opened, an output
//! that cannot be created) only cost the batch one file. Structural errors describe a manuscript
//! that cannot be converted and stop the current file at the first offending line.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Where in the source a structural violation was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 1-based line ordinal in the source file
    Line(usize),
    /// The violation only became visible once the input was exhausted
    EndOfInput,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Line(number) => write!(f, "line {number}"),
            Location::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// The kinds of malformed input that abort a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("unterminated quotation")]
    UnterminatedQuote,
    #[error("paragraph never reached terminal punctuation")]
    DanglingParagraph,
    #[error("table or heading interrupts an unfinished paragraph")]
    TableInterruptsParagraph,
    #[error("table row has {found} columns, expected {expected}")]
    ColumnMismatch { expected: usize, found: usize },
    #[error("unknown heading depth {depth}")]
    UnknownHeading { depth: usize },
    #[error("heading marker without heading text")]
    EmptyHeading,
    #[error("comment opened at column {column} is never closed")]
    UnterminatedComment { column: usize },
    #[error("table is never closed")]
    UnterminatedTable,
    #[error("document ended before title and author")]
    MissingFrontMatter,
}

/// A fatal problem with the manuscript itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error @{location}: {violation}: {content}")]
pub struct StructuralError {
    pub location: Location,
    /// The offending (trimmed) line, empty at end of input
    pub content: String,
    pub violation: Violation,
}

impl StructuralError {
    pub fn at_line(number: usize, content: impl Into<String>, violation: Violation) -> Self {
        Self {
            location: Location::Line(number),
            content: content.into(),
            violation,
        }
    }

    pub fn at_end(violation: Violation) -> Self {
        Self {
            location: Location::EndOfInput,
            content: String::new(),
            violation,
        }
    }
}

/// Errors that can occur while converting a file
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Failed to open {} for read: {source}", path.display())]
    OpenInput { path: PathBuf, source: io::Error },

    #[error("Failed to open {} for write: {source}", path.display())]
    CreateOutput { path: PathBuf, source: io::Error },

    #[error("Refusing to convert {}: output would overwrite the input", path.display())]
    OutputIsInput { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Structural(#[from] StructuralError),
}

impl FolioError {
    /// Whether a batch should simply skip the file and move on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FolioError::OpenInput { .. }
                | FolioError::CreateOutput { .. }
                | FolioError::OutputIsInput { .. }
        )
    }

    pub fn as_structural(&self) -> Option<&StructuralError> {
        match self {
            FolioError::Structural(err) => Some(err),
            _ => None,
        }
    }
}
