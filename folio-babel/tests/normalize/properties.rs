//! Properties of the normalizer over generated manuscripts.

use folio_babel::error::Violation;
use folio_babel::normalize_str;
use proptest::prelude::*;

fn word() -> impl Strategy<Value = String> {
    "[甲乙丙丁]{1,4}"
}

fn spaces() -> impl Strategy<Value = String> {
    "[ \t\u{3000}\u{00A0}]{1,3}"
}

proptest! {
    #[test]
    fn whitespace_runs_collapse_to_one_space(
        first in word(),
        rest in prop::collection::vec((spaces(), word()), 0..6),
    ) {
        let mut line = first.clone();
        let mut expected = first;
        for (gap, word) in &rest {
            line.push_str(gap);
            line.push_str(word);
            expected.push(' ');
            expected.push_str(word);
        }
        line.push('。');
        expected.push('。');

        let out = normalize_str(&format!("T\nA\n{line}\n")).unwrap();
        prop_assert_eq!(out, vec!["T".to_string(), "A".to_string(), expected]);
    }

    #[test]
    fn quotes_pair_up_or_fail(glyphs in prop::collection::vec(prop::bool::ANY, 0..8)) {
        let mut line = String::from("曰");
        for open in &glyphs {
            line.push(if *open { '“' } else { '”' });
            line.push('甲');
        }
        line.push('。');

        let result = normalize_str(&format!("T\nA\n{line}\n"));
        if glyphs.len() % 2 == 0 {
            let out = result.unwrap();
            let quotes: Vec<char> = out[2].chars().filter(|c| *c == '“' || *c == '”').collect();
            for (index, quote) in quotes.iter().enumerate() {
                let expected = if index % 2 == 0 { '“' } else { '”' };
                prop_assert_eq!(*quote, expected);
            }
        } else {
            prop_assert_eq!(result.unwrap_err().violation, Violation::UnterminatedQuote);
        }
    }

    #[test]
    fn normalization_is_idempotent(
        paragraphs in prop::collection::vec(
            prop::collection::vec("[甲乙丙]{1,3}( [甲乙丙]{1,3})?", 1..4),
            1..5,
        ),
    ) {
        let mut source = String::from("T\n\nA\n");
        for fragments in &paragraphs {
            for fragment in fragments {
                source.push_str(fragment);
                source.push('\n');
            }
            source.pop();
            source.push_str("。\n\n");
        }

        let once = normalize_str(&source).unwrap();
        let twice = normalize_str(&once.join("\n")).unwrap();
        prop_assert_eq!(once.len(), paragraphs.len() + 2);
        prop_assert_eq!(twice, once);
    }
}
