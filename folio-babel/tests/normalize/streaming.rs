//! Normalization through the streaming reader/writer API.

use crate::common::manuscript;
use folio_babel::error::{Location, Violation};
use folio_babel::normalize;

fn run(source: &str) -> (String, Result<(), folio_babel::FolioError>) {
    let mut out = Vec::new();
    let result = normalize(source.as_bytes(), &mut out).map(|_| ());
    (String::from_utf8(out).unwrap(), result)
}

#[test]
fn wrapped_manuscript_becomes_canonical() {
    let source = "\n史记\n\n司马迁\n\n+++五帝本纪\n\n黄帝者，少典之子，\n姓公孙，名曰轩辕。\n\n\
                  帝曰：”咨！\n四岳。”\n\n---\n帝 | 在位\n黄帝 |  百年\n---\n";
    let (out, result) = run(source);
    result.unwrap();
    assert_eq!(
        out,
        "史记\n司马迁\n+++五帝本纪\n黄帝者，少典之子，姓公孙，名曰轩辕。\n\
         帝曰：“咨！四岳。”\n---\n帝 | 在位\n黄帝 |  百年\n---\n"
    );
}

#[test]
fn canonical_text_also_compiles() {
    let (out, result) = run(&manuscript(&["++卷一", "甲", "乙。", "---", "a|b", "---"]));
    result.unwrap();
    let names = crate::common::event_names(&out);
    assert_eq!(
        names,
        vec![
            "start-document",
            "front-matter",
            "section",
            "paragraph",
            "start-table",
            "table-row",
            "end-table",
            "end-document",
        ]
    );
}

#[test]
fn crlf_input_is_accepted() {
    let (out, result) = run("T\r\nA\r\n一。\r\n");
    result.unwrap();
    assert_eq!(out, "T\nA\n一。\n");
}

#[test]
fn unfinished_paragraph_before_fence_reports_fence_line() {
    let (out, result) = run(&manuscript(&["完。", "未完", "---"]));
    let err = result.unwrap_err();
    let structural = err.as_structural().expect("structural error");
    assert_eq!(structural.violation, Violation::TableInterruptsParagraph);
    assert_eq!(structural.location, Location::Line(5));
    assert_eq!(out, "书名\n作者\n完。\n未完\n");
}

#[test]
fn open_quote_at_end_flushes_what_was_read() {
    let (out, result) = run(&manuscript(&["曰：“吾闻之。", "善。"]));
    let err = result.unwrap_err();
    assert_eq!(
        err.as_structural().map(|e| &e.violation),
        Some(&Violation::UnterminatedQuote)
    );
    assert!(err.to_string().starts_with("Error @end of input"));
    assert_eq!(out, "书名\n作者\n曰：“吾闻之。善。\n");
}
