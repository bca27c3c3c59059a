//! Line reader shared by the normalizer and the compiler.

use std::io::{self, BufRead};

/// One trimmed source line together with its 1-based ordinal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub text: String,
}

impl Line {
    pub fn new(number: usize, text: impl AsRef<str>) -> Self {
        Self {
            number,
            text: text.as_ref().trim().to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Iterator adapter turning a buffered reader into trimmed [`Line`]s.
///
/// Blank lines are yielded too; each stage decides what to skip.
pub struct LineReader<R> {
    inner: io::Lines<R>,
    number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            number: 0,
        }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        self.number += 1;
        Some(raw.map(|text| Line::new(self.number, text)))
    }
}

/// Convenience for in-memory sources (tests, `inspect`).
pub fn lines_of(source: &str) -> Vec<Line> {
    source
        .lines()
        .enumerate()
        .map(|(index, text)| Line::new(index + 1, text))
        .collect()
}
