//! Structural failures while compiling.

use crate::common::manuscript;
use folio_babel::error::{Location, Violation};
use folio_babel::formats::latex::{LatexEmitter, LatexOptions};
use folio_babel::{compile, compile_str, EventLog};

#[test]
fn short_row_reports_line_and_content() {
    let source = manuscript(&["---", "a|b|c", "d|e|f", "g|h", "---"]);
    let mut log = EventLog::new();
    let err = compile_str(&source, &mut log).unwrap_err();

    let structural = err.as_structural().expect("structural error");
    assert_eq!(
        structural.violation,
        Violation::ColumnMismatch {
            expected: 3,
            found: 2
        }
    );
    assert_eq!(structural.location, Location::Line(6));
    assert_eq!(structural.content, "g|h");
    assert_eq!(
        log.names(),
        vec![
            "start-document",
            "front-matter",
            "start-table",
            "table-row",
            "table-row",
        ]
    );
}

#[test]
fn partial_latex_keeps_rows_before_the_failure() {
    let source = manuscript(&["开篇。", "---", "a|b|c", "d|e|f", "g|h", "---"]);
    let mut out = Vec::new();
    let err = compile(
        source.as_bytes(),
        LatexEmitter::new(&mut out, LatexOptions::default()),
    )
    .unwrap_err();
    let latex = String::from_utf8(out).unwrap();

    assert!(err.to_string().starts_with("Error @line 7: "));
    assert!(latex.contains("\\par\n开篇。\n\\begin{longtable}{|l|l|l|}\n"));
    assert!(latex.contains("d & e & f \\\\\n\\hline\n"));
    assert!(!latex.contains("g & h"));
    assert!(!latex.contains("\\end{document}"));
    assert!(latex.ends_with(&format!("% folio: conversion aborted. {err}\n")));
}

#[test]
fn unclosed_table_reports_opening_fence() {
    let source = manuscript(&["正文。", "---", "a|b"]);
    let err = compile_str(&source, EventLog::new()).unwrap_err();
    let structural = err.as_structural().expect("structural error");
    assert_eq!(structural.violation, Violation::UnterminatedTable);
    assert_eq!(structural.location, Location::Line(4));
}

#[test]
fn heading_too_deep() {
    let source = manuscript(&["+++++++++九"]);
    let err = compile_str(&source, EventLog::new()).unwrap_err();
    assert_eq!(
        err.as_structural().map(|e| &e.violation),
        Some(&Violation::UnknownHeading { depth: 9 })
    );
}

#[test]
fn unclosed_comment_in_paragraph() {
    let source = manuscript(&["甲（乙"]);
    let err = compile_str(&source, EventLog::new()).unwrap_err();
    let structural = err.as_structural().expect("structural error");
    assert_eq!(
        structural.violation,
        Violation::UnterminatedComment { column: 2 }
    );
    assert_eq!(structural.location, Location::Line(3));
}

#[test]
fn missing_author() {
    let err = compile_str("只有书名\n", EventLog::new()).unwrap_err();
    assert_eq!(
        err.as_structural().map(|e| &e.violation),
        Some(&Violation::MissingFrontMatter)
    );
}
