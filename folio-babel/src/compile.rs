//! Structural compilation
//!
//! The [`Compiler`] reads canonical lines and builds a [`Document`]. At the same moment it
//! streams [`Event`]s to an [`Emitter`].
//!
//! States, in order:
//!
//!     AwaitingTitle -> AwaitingAuthor -> Body <-> InTable
//!
//! Blank lines are skipped in every state. In `Body` a line is checked against the table fence
//! first, then against the section marker (only when it starts with one), and is otherwise a
//! paragraph.

use crate::emitter::Emitter;
use crate::error::{FolioError, StructuralError, Violation};
use crate::ir::events::Event;
use crate::ir::nodes::{
    plain_text, Block, Document, InlineContent, Paragraph, Section, Table, SECTION_LEVELS,
};
use crate::reader::{Line, LineReader};
use crate::syntax::{self, TABLE_FENCE};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingTitle,
    AwaitingAuthor,
    Body,
    /// Inside a table opened by the fence on `opened_at`
    InTable { opened_at: usize },
}

/// Per-level heading counters and the last title seen at each level.
#[derive(Debug, Default)]
struct SectionTracker {
    counters: [usize; SECTION_LEVELS],
    titles: [Option<String>; SECTION_LEVELS],
}

impl SectionTracker {
    /// Opens a section, returning its ordinal, or `None` when it repeats the previous title at
    /// that level.
    fn open(&mut self, level: usize, title: &str) -> Option<usize> {
        if self.titles[level].as_deref() == Some(title) {
            return None;
        }
        self.counters[level] += 1;
        self.titles[level] = Some(title.to_string());
        for deeper in level + 1..SECTION_LEVELS {
            self.counters[deeper] = 0;
            self.titles[deeper] = None;
        }
        Some(self.counters[level])
    }
}

/// Streaming compiler from canonical lines to events plus a document model.
pub struct Compiler<E> {
    emitter: E,
    state: State,
    document: Document,
    sections: SectionTracker,
    table: Table,
}

impl<E: Emitter> Compiler<E> {
    /// Creates a compiler and emits the start of the document.
    pub fn start(mut emitter: E) -> Result<Self, FolioError> {
        log::debug!("Compiling to {}", emitter.name());
        emitter.emit(&Event::StartDocument)?;
        Ok(Self {
            emitter,
            state: State::AwaitingTitle,
            document: Document::default(),
            sections: SectionTracker::default(),
            table: Table::default(),
        })
    }

    /// Feeds one trimmed canonical line.
    pub fn push(&mut self, line: &Line) -> Result<(), FolioError> {
        if line.is_blank() {
            return Ok(());
        }

        match self.state {
            State::AwaitingTitle => {
                self.document.title = inline(line, &line.text, 0)?;
                log::info!("Title: {}", line.text);
                self.state = State::AwaitingAuthor;
            }
            State::AwaitingAuthor => {
                self.document.author = inline(line, &line.text, 0)?;
                log::info!("Author: {}", line.text);
                self.emitter.emit(&Event::FrontMatter {
                    title: self.document.title.clone(),
                    author: self.document.author.clone(),
                })?;
                self.state = State::Body;
            }
            State::Body => {
                if syntax::is_fence(&line.text) {
                    self.state = State::InTable {
                        opened_at: line.number,
                    };
                } else if syntax::is_heading(&line.text) {
                    self.open_section(line)?;
                } else {
                    let paragraph = Paragraph {
                        content: inline(line, &line.text, 0)?,
                    };
                    self.emitter.emit(&Event::Paragraph(paragraph.clone()))?;
                    self.document.blocks.push(Block::Paragraph(paragraph));
                }
            }
            State::InTable { opened_at } => {
                if syntax::is_fence(&line.text) {
                    self.close_table(opened_at)?;
                } else {
                    self.push_row(line)?;
                }
            }
        }
        Ok(())
    }

    /// Ends the input, emitting the end of the document.
    pub fn finish(&mut self) -> Result<Document, FolioError> {
        match self.state {
            State::AwaitingTitle | State::AwaitingAuthor => {
                return Err(StructuralError::at_end(Violation::MissingFrontMatter).into());
            }
            State::InTable { opened_at } => {
                return Err(StructuralError::at_line(
                    opened_at,
                    TABLE_FENCE,
                    Violation::UnterminatedTable,
                )
                .into());
            }
            State::Body => {}
        }
        self.emitter.emit(&Event::EndDocument)?;
        Ok(std::mem::take(&mut self.document))
    }

    pub fn into_emitter(self) -> E {
        self.emitter
    }

    /// Lets the emitter record a structural failure.
    pub fn abort(&mut self, error: &StructuralError) -> Result<(), FolioError> {
        self.emitter.abort(error)
    }

    fn open_section(&mut self, line: &Line) -> Result<(), FolioError> {
        let marker = syntax::split_heading(&line.text);
        let level = marker.level().ok_or_else(|| {
            StructuralError::at_line(
                line.number,
                line.text.clone(),
                Violation::UnknownHeading {
                    depth: marker.depth,
                },
            )
        })?;
        if marker.title.is_empty() {
            return Err(
                StructuralError::at_line(line.number, line.text.clone(), Violation::EmptyHeading)
                    .into(),
            );
        }
        let title = inline(line, marker.title, marker.depth)?;

        let Some(ordinal) = self.sections.open(level, marker.title) else {
            log::debug!("Skipping repeated heading at line {}: {}", line.number, line.text);
            return Ok(());
        };
        log::debug!(
            "Section level {level} #{ordinal}: {}",
            plain_text(&title)
        );

        let section = Section {
            level,
            title,
            ordinal,
        };
        self.emitter.emit(&Event::Section(section.clone()))?;
        self.document.blocks.push(Block::Section(section));
        Ok(())
    }

    fn push_row(&mut self, line: &Line) -> Result<(), FolioError> {
        let fields = syntax::split_row(&line.text);
        if self.table.rows.is_empty() {
            self.emitter.emit(&Event::StartTable {
                columns: fields.len(),
            })?;
        } else if fields.len() != self.table.columns() {
            return Err(StructuralError::at_line(
                line.number,
                line.text.clone(),
                Violation::ColumnMismatch {
                    expected: self.table.columns(),
                    found: fields.len(),
                },
            )
            .into());
        }
        self.emitter.emit(&Event::TableRow(fields.clone()))?;
        self.table.rows.push(fields);
        Ok(())
    }

    fn close_table(&mut self, opened_at: usize) -> Result<(), FolioError> {
        self.state = State::Body;
        let table = std::mem::take(&mut self.table);
        if table.rows.is_empty() {
            log::warn!("Ignoring empty table opened at line {opened_at}");
            return Ok(());
        }
        log::debug!(
            "Table at line {opened_at}: {} rows x {} columns",
            table.rows.len(),
            table.columns()
        );
        self.emitter.emit(&Event::EndTable)?;
        self.document.blocks.push(Block::Table(table));
        Ok(())
    }
}

/// Parses the inline content of `text`, which starts `offset` characters into `line`.
fn inline(line: &Line, text: &str, offset: usize) -> Result<Vec<InlineContent>, StructuralError> {
    syntax::parse_inline(text).map_err(|unclosed| {
        StructuralError::at_line(
            line.number,
            line.text.clone(),
            Violation::UnterminatedComment {
                column: unclosed.column + offset,
            },
        )
    })
}

/// Compiles everything `reader` yields, streaming events to `emitter`.
///
/// The first structural error stops compilation. The emitter's `abort` hook runs before the
/// error is returned.
pub fn compile<R: BufRead, E: Emitter>(reader: R, emitter: E) -> Result<Document, FolioError> {
    compile_lines(LineReader::new(reader), emitter)
}

/// Like [`compile`] for lines already in memory or from another reader.
pub fn compile_lines<I, E>(lines: I, emitter: E) -> Result<Document, FolioError>
where
    I: IntoIterator<Item = std::io::Result<Line>>,
    E: Emitter,
{
    let mut compiler = Compiler::start(emitter)?;
    for line in lines {
        let line = line?;
        if let Err(err) = compiler.push(&line) {
            return Err(fail(&mut compiler, err));
        }
    }
    compiler.finish().map_err(|err| fail(&mut compiler, err))
}

/// Compiles source text held in memory.
pub fn compile_str<E: Emitter>(source: &str, emitter: E) -> Result<Document, FolioError> {
    compile_lines(crate::reader::lines_of(source).into_iter().map(Ok), emitter)
}

fn fail<E: Emitter>(compiler: &mut Compiler<E>, err: FolioError) -> FolioError {
    if let FolioError::Structural(structural) = &err {
        if let Err(io) = compiler.abort(structural) {
            return io;
        }
    }
    err
}
