//! LaTeX format implementation
//!
//! This module renders the compiler's event stream as a XeLaTeX document built on KOMA-Script's
//! `scrbook` class, with `xeCJK` doing the CJK font selection and line breaking.
//!
//! # Element Mapping Table
//!
//! | Folio Element     | LaTeX Equivalent                                         | Notes                                      |
//! |-------------------|----------------------------------------------------------|--------------------------------------------|
//! | Document          | preamble + `\begin{document}` … `\end{document}`         | Fonts and sizes come from [`LatexOptions`] |
//! | Title / Author    | `titlepage` environment, then `\tableofcontents`         | Title set in the heading font              |
//! | Section level 0   | `\part`                                                  |                                            |
//! | Section level 1   | `\cleardoublepage` `\phantomsection` `\chapter`          | Chapters start on a fresh leaf             |
//! | Section level 2–6 | `\section` … `\subparagraph`                             |                                            |
//! | Section level 7   | `\minisec`                                               | KOMA-Script's finest heading               |
//! | Paragraph         | `\par` + text                                            |                                            |
//! | Table             | `longtable`, ruled `l` columns and `\hline` rules        | One `a & b \\` line per row                |
//! | Comment           | `{\footnotesize …}`                                      | Parentheses are dropped                    |
//!
//! Headings whose title carries comments get a comment-free optional argument, so the table of
//! contents shows only the heading text.
//!
//! # Escaping
//!
//! Text from the manuscript is escaped for the ten LaTeX special characters. Configuration
//! values (font names, lengths) are written verbatim into the preamble.

mod serializer;

pub use serializer::{escape_latex, render_inline, LatexEmitter, SECTION_COMMANDS};

/// Typesetting parameters for the LaTeX preamble.
///
/// None of these influence parsing; they are passed straight through to the output.
#[derive(Debug, Clone, PartialEq)]
pub struct LatexOptions {
    /// Main CJK font
    pub main_font: String,
    /// Font used for glyphs missing from the main font
    pub fallback_font: Option<String>,
    /// CJK font for the title page and headings
    pub heading_font: String,
    /// Base font size in points
    pub font_size: u32,
    pub line_spread: f64,
    pub paragraph_indent: String,
    /// Value of the `tocdepth` counter
    pub toc_depth: i32,
    /// XeTeX line-breaking locale
    pub linebreak_locale: String,
}

impl Default for LatexOptions {
    fn default() -> Self {
        Self {
            main_font: "SimSun".to_string(),
            fallback_font: None,
            heading_font: "KaiTi".to_string(),
            font_size: 16,
            line_spread: 1.2,
            paragraph_indent: "3em".to_string(),
            toc_depth: 0,
            linebreak_locale: "zh".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LatexOptions::default();
        assert_eq!(options.main_font, "SimSun");
        assert_eq!(options.heading_font, "KaiTi");
        assert_eq!(options.font_size, 16);
        assert!(options.fallback_font.is_none());
    }
}
