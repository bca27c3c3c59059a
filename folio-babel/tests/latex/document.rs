//! Full LaTeX documents produced from canonical manuscripts.

use crate::common::{event_names, manuscript, ROUND_TRIP};
use folio_babel::formats::latex::LatexOptions;
use folio_babel::transforms::{compile_to_events, compile_to_latex, manuscript_to_latex};
use insta::assert_snapshot;

#[test]
fn round_trip_document() {
    let latex = compile_to_latex(ROUND_TRIP, &LatexOptions::default()).unwrap();
    assert_snapshot!(latex, @r#"
\documentclass[fontsize=16pt]{scrbook}
\usepackage{hyperref}
\usepackage{indentfirst}
\usepackage{longtable}
\usepackage{xeCJK}
\setCJKmainfont{SimSun}
\setCJKfamilyfont{heading}{KaiTi}
\addtokomafont{disposition}{\CJKfamily{heading}}
\XeTeXlinebreaklocale "zh"
\XeTeXlinebreakskip 0pt plus 1pt
\setcounter{secnumdepth}{-1}
\setcounter{tocdepth}{0}
\linespread{1.2}
\setlength{\parindent}{3em}
\sloppy
\begin{document}
\begin{titlepage}
\begin{center}
\vspace*{\fill}
{\CJKfamily{heading}\textbf{\huge T}}\\[0.5cm]
{\large A}\\[1.5cm]
{\today}
\vspace*{\fill}
\end{center}
\end{titlepage}
\tableofcontents
\cleardoublepage
\phantomsection
\chapter{Ch1}
\par
Hello
\begin{longtable}{|l|l|}
\hline
a & b \\
\hline
c & d \\
\hline
\end{longtable}
\end{document}
"#);
}

#[test]
fn round_trip_events() {
    assert_eq!(
        event_names(ROUND_TRIP),
        vec![
            "start-document",
            "front-matter",
            "section",
            "paragraph",
            "start-table",
            "table-row",
            "table-row",
            "end-table",
            "end-document",
        ]
    );
}

#[test]
fn front_matter_only() {
    let latex = compile_to_latex("T\nA\n", &LatexOptions::default()).unwrap();
    assert!(latex.contains("\\tableofcontents\n\\end{document}\n"));
}

#[test]
fn sections_track_ordinals_and_skip_repeats() {
    let source = manuscript(&["++卷一", "+++甲", "+++甲", "+++乙", "++卷二", "+++甲"]);
    let (document, _) = compile_to_events(&source).unwrap();
    let sections: Vec<(usize, usize)> = document
        .sections()
        .map(|section| (section.level, section.ordinal))
        .collect();
    assert_eq!(sections, vec![(1, 1), (2, 1), (2, 2), (1, 2), (2, 1)]);
}

#[test]
fn comments_shrink_in_body_and_headings() {
    let source = manuscript(&["+++五帝（节选）", "黄帝者（少典之子）。"]);
    let latex = compile_to_latex(&source, &LatexOptions::default()).unwrap();
    assert!(latex.contains("\\section[{五帝}]{五帝{\\footnotesize 节选}}\n"));
    assert!(latex.contains("\\par\n黄帝者{\\footnotesize 少典之子}。\n"));
}

#[test]
fn deepest_commented_heading_is_valid_latex() {
    let source = manuscript(&["++++++++细目（注）"]);
    let latex = compile_to_latex(&source, &LatexOptions::default()).unwrap();
    assert!(latex.contains("\\minisec{细目{\\footnotesize 注}}\n"));
    assert!(!latex.contains("\\minisec["));
}

#[test]
fn special_characters_are_escaped() {
    let source = manuscript(&["100% & $5", "---", "a_b | #1", "---"]);
    let latex = compile_to_latex(&source, &LatexOptions::default()).unwrap();
    assert!(latex.contains("\\par\n100\\% \\& \\$5\n"));
    assert!(latex.contains("a\\_b & \\#1 \\\\\n"));
}

#[test]
fn raw_manuscript_goes_through_both_stages() {
    let latex = manuscript_to_latex(
        "史记\n\n司马迁\n\n++本纪\n\n黄帝者，\n少典之子。\n",
        &LatexOptions::default(),
    )
    .unwrap();
    assert!(latex.contains("\\chapter{本纪}\n\\par\n黄帝者，少典之子。\n"));
}
