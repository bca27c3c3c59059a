//! Manuscript normalization
//!
//! Raw manuscripts arrive with blank lines between paragraphs, sentences hard-wrapped across
//! several lines, assorted Unicode spaces and a single quotation glyph used for both opening and
//! closing. The [`Normalizer`] rewrites such text into canonical form: one paragraph, table row
//! or heading per line, every quotation paired.
//!
//! The pass is streaming. Each input line yields at most one output line, and the only state
//! carried between lines is the pending paragraph plus a handful of flags.

use crate::error::{FolioError, StructuralError, Violation};
use crate::reader::{Line, LineReader};
use crate::syntax::{self, CLOSE_QUOTE, OPEN_QUOTE};
use std::io::{BufRead, Write};

/// Streaming normalizer state.
#[derive(Debug, Default)]
pub struct Normalizer {
    title: Option<String>,
    author: Option<String>,
    in_table: bool,
    /// Quote State: inside an open quotation
    in_quote: bool,
    /// The last character pushed to the buffer was a collapsed space
    is_space: bool,
    /// The last character pushed to the buffer may end a paragraph
    could_end: bool,
    buffer: String,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn in_quote(&self) -> bool {
        self.in_quote
    }

    /// Feeds one trimmed line, returning the canonical line it completes, if any.
    pub fn push(&mut self, line: &Line) -> Result<Option<String>, StructuralError> {
        let text = line.text.as_str();
        if text.is_empty() {
            return Ok(None);
        }

        if self.title.is_none() {
            log::info!("Title: {text}");
            self.title = Some(text.to_string());
            return Ok(Some(text.to_string()));
        }
        if self.author.is_none() {
            log::info!("Author: {text}");
            self.author = Some(text.to_string());
            return Ok(Some(text.to_string()));
        }

        if syntax::is_fence(text) {
            self.in_table = !self.in_table;
            self.ensure_settled(line)?;
            return Ok(Some(text.to_string()));
        }
        if self.in_table || syntax::is_heading(text) {
            self.ensure_settled(line)?;
            return Ok(Some(text.to_string()));
        }

        self.scan(text);
        if self.could_end && !self.in_quote {
            Ok(Some(self.flush()))
        } else {
            Ok(None)
        }
    }

    /// Checks the end-of-stream invariants: nothing pending, no quote open.
    pub fn finish(&self) -> Result<(), StructuralError> {
        if self.in_quote {
            Err(StructuralError::at_end(Violation::UnterminatedQuote))
        } else if !self.buffer.is_empty() {
            Err(StructuralError::at_end(Violation::DanglingParagraph))
        } else {
            Ok(())
        }
    }

    /// Hands out whatever partial paragraph is buffered, for diagnosis after a failure.
    pub fn take_pending(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.flush())
        }
    }

    fn ensure_settled(&self, line: &Line) -> Result<(), StructuralError> {
        if self.buffer.is_empty() && !self.in_quote {
            Ok(())
        } else {
            Err(StructuralError::at_line(
                line.number,
                line.text.clone(),
                Violation::TableInterruptsParagraph,
            ))
        }
    }

    fn scan(&mut self, text: &str) {
        for ch in text.chars() {
            let ch = if ch.is_whitespace() {
                if self.is_space {
                    continue;
                }
                self.is_space = true;
                ' '
            } else {
                self.is_space = false;
                ch
            };

            let ch = if syntax::is_quote(ch) {
                let canonical = if self.in_quote { CLOSE_QUOTE } else { OPEN_QUOTE };
                self.in_quote = !self.in_quote;
                canonical
            } else {
                ch
            };

            self.buffer.push(ch);
            self.could_end = syntax::is_terminal(ch);
        }
    }

    fn flush(&mut self) -> String {
        self.is_space = false;
        self.could_end = false;
        std::mem::take(&mut self.buffer)
    }
}

/// What a successful normalization saw.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizeSummary {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Canonical lines written
    pub lines: usize,
}

/// Normalizes `reader` into `writer`, one canonical line per output line.
///
/// On a structural failure the partial paragraph is still written out before the error is
/// returned, so the output shows where processing stopped.
pub fn normalize<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
) -> Result<NormalizeSummary, FolioError> {
    let mut normalizer = Normalizer::new();
    let mut written = 0;

    for line in LineReader::new(reader) {
        let line = line?;
        match normalizer.push(&line) {
            Ok(Some(out)) => {
                writeln!(writer, "{out}")?;
                written += 1;
            }
            Ok(None) => {}
            Err(err) => return Err(abort(&mut normalizer, writer, err)),
        }
    }
    if let Err(err) = normalizer.finish() {
        return Err(abort(&mut normalizer, writer, err));
    }
    writer.flush()?;

    Ok(NormalizeSummary {
        title: normalizer.title,
        author: normalizer.author,
        lines: written,
    })
}

fn abort<W: Write>(normalizer: &mut Normalizer, writer: &mut W, err: StructuralError) -> FolioError {
    if let Some(pending) = normalizer.take_pending() {
        if let Err(io) = writeln!(writer, "{pending}").and_then(|_| writer.flush()) {
            return io.into();
        }
    }
    err.into()
}

/// Normalizes in-memory lines, discarding partial output on failure.
pub fn normalize_lines<I>(lines: I) -> Result<Vec<String>, StructuralError>
where
    I: IntoIterator<Item = Line>,
{
    let mut normalizer = Normalizer::new();
    let mut out = Vec::new();
    for line in lines {
        out.extend(normalizer.push(&line)?);
    }
    normalizer.finish()?;
    Ok(out)
}

/// Normalizes source text held in memory.
pub fn normalize_str(source: &str) -> Result<Vec<String>, StructuralError> {
    normalize_lines(crate::reader::lines_of(source))
}
