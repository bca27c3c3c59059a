//! LaTeX serialization (event stream → XeLaTeX source)

use super::LatexOptions;
use crate::emitter::Emitter;
use crate::error::{FolioError, StructuralError};
use crate::ir::events::Event;
use crate::ir::nodes::{has_comments, plain_text, InlineContent, Section, SECTION_LEVELS};
use std::io::Write;

/// Heading command per zero-based section level.
pub const SECTION_COMMANDS: [&str; SECTION_LEVELS] = [
    "part",
    "chapter",
    "section",
    "subsection",
    "subsubsection",
    "paragraph",
    "subparagraph",
    "minisec",
];

/// Level whose headings start on a fresh leaf.
const CHAPTER_LEVEL: usize = 1;

/// `\minisec` takes no optional TOC argument.
const MINISEC_LEVEL: usize = SECTION_LEVELS - 1;

const COMMENT_SIZE: &str = "\\footnotesize";

/// Streams LaTeX to a writer as events arrive.
pub struct LatexEmitter<W: Write> {
    writer: W,
    options: LatexOptions,
}

impl<W: Write> LatexEmitter<W> {
    pub fn new(writer: W, options: LatexOptions) -> Self {
        Self { writer, options }
    }

    pub fn options(&self) -> &LatexOptions {
        &self.options
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_preamble(&mut self) -> Result<(), FolioError> {
        let o = &self.options;
        let w = &mut self.writer;
        writeln!(w, "\\documentclass[fontsize={}pt]{{scrbook}}", o.font_size)?;
        writeln!(w, "\\usepackage{{hyperref}}")?;
        writeln!(w, "\\usepackage{{indentfirst}}")?;
        writeln!(w, "\\usepackage{{longtable}}")?;
        match &o.fallback_font {
            Some(fallback) => {
                writeln!(w, "\\usepackage[AutoFallBack=true]{{xeCJK}}")?;
                writeln!(w, "\\setCJKmainfont{{{}}}", o.main_font)?;
                writeln!(w, "\\setCJKfallbackfamilyfont{{\\CJKrmdefault}}{{{fallback}}}")?;
            }
            None => {
                writeln!(w, "\\usepackage{{xeCJK}}")?;
                writeln!(w, "\\setCJKmainfont{{{}}}", o.main_font)?;
            }
        }
        writeln!(w, "\\setCJKfamilyfont{{heading}}{{{}}}", o.heading_font)?;
        writeln!(w, "\\addtokomafont{{disposition}}{{\\CJKfamily{{heading}}}}")?;
        writeln!(w, "\\XeTeXlinebreaklocale \"{}\"", o.linebreak_locale)?;
        writeln!(w, "\\XeTeXlinebreakskip 0pt plus 1pt")?;
        writeln!(w, "\\setcounter{{secnumdepth}}{{-1}}")?;
        writeln!(w, "\\setcounter{{tocdepth}}{{{}}}", o.toc_depth)?;
        writeln!(w, "\\linespread{{{}}}", o.line_spread)?;
        writeln!(w, "\\setlength{{\\parindent}}{{{}}}", o.paragraph_indent)?;
        writeln!(w, "\\sloppy")?;
        writeln!(w, "\\begin{{document}}")?;
        Ok(())
    }

    fn write_front_matter(
        &mut self,
        title: &[InlineContent],
        author: &[InlineContent],
    ) -> Result<(), FolioError> {
        let w = &mut self.writer;
        writeln!(w, "\\begin{{titlepage}}")?;
        writeln!(w, "\\begin{{center}}")?;
        writeln!(w, "\\vspace*{{\\fill}}")?;
        writeln!(
            w,
            "{{\\CJKfamily{{heading}}\\textbf{{\\huge {}}}}}\\\\[0.5cm]",
            render_inline(title)
        )?;
        writeln!(w, "{{\\large {}}}\\\\[1.5cm]", render_inline(author))?;
        writeln!(w, "{{\\today}}")?;
        writeln!(w, "\\vspace*{{\\fill}}")?;
        writeln!(w, "\\end{{center}}")?;
        writeln!(w, "\\end{{titlepage}}")?;
        writeln!(w, "\\tableofcontents")?;
        Ok(())
    }

    fn write_section(&mut self, section: &Section) -> Result<(), FolioError> {
        let w = &mut self.writer;
        if section.level == CHAPTER_LEVEL {
            writeln!(w, "\\cleardoublepage")?;
            writeln!(w, "\\phantomsection")?;
        }
        let command = SECTION_COMMANDS[section.level];
        let title = render_inline(&section.title);
        if has_comments(&section.title) && section.level != MINISEC_LEVEL {
            let toc = escape_latex(&plain_text(&section.title));
            writeln!(w, "\\{command}[{{{toc}}}]{{{title}}}")?;
        } else {
            writeln!(w, "\\{command}{{{title}}}")?;
        }
        Ok(())
    }
}

impl<W: Write> Emitter for LatexEmitter<W> {
    fn name(&self) -> &str {
        "latex"
    }

    fn emit(&mut self, event: &Event) -> Result<(), FolioError> {
        match event {
            Event::StartDocument => self.write_preamble()?,
            Event::FrontMatter { title, author } => self.write_front_matter(title, author)?,
            Event::Section(section) => self.write_section(section)?,
            Event::Paragraph(paragraph) => {
                writeln!(self.writer, "\\par")?;
                writeln!(self.writer, "{}", render_inline(&paragraph.content))?;
            }
            Event::StartTable { columns } => {
                let layout = "l|".repeat(*columns);
                writeln!(self.writer, "\\begin{{longtable}}{{|{layout}}}")?;
                writeln!(self.writer, "\\hline")?;
            }
            Event::TableRow(fields) => {
                let cells: Vec<String> = fields.iter().map(|f| escape_latex(f)).collect();
                writeln!(self.writer, "{} \\\\", cells.join(" & "))?;
                writeln!(self.writer, "\\hline")?;
            }
            Event::EndTable => writeln!(self.writer, "\\end{{longtable}}")?,
            Event::EndDocument => {
                writeln!(self.writer, "\\end{{document}}")?;
                self.writer.flush()?;
            }
        }
        Ok(())
    }

    fn abort(&mut self, error: &StructuralError) -> Result<(), FolioError> {
        writeln!(self.writer, "% folio: conversion aborted. {error}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Renders inline content, turning comment spans into small type.
pub fn render_inline(content: &[InlineContent]) -> String {
    let mut out = String::new();
    push_inline(&mut out, content);
    out
}

fn push_inline(out: &mut String, content: &[InlineContent]) {
    for inline in content {
        match inline {
            InlineContent::Text(text) => out.push_str(&escape_latex(text)),
            InlineContent::Comment(children) => {
                out.push('{');
                out.push_str(COMMENT_SIZE);
                out.push(' ');
                push_inline(out, children);
                out.push('}');
            }
        }
    }
}

/// Escapes LaTeX special characters in manuscript text.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' | '}' | '$' | '&' | '#' | '_' | '%' => {
                out.push('\\');
                out.push(ch);
            }
            '^' => out.push_str("\\textasciicircum{}"),
            '~' => out.push_str("\\textasciitilde{}"),
            _ => out.push(ch),
        }
    }
    out
}
