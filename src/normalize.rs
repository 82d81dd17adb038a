//! Text sanitisation.
//!
//! Every piece of text that reaches a page goes through [normalize] first. The
//! output only ever contains characters for which [is_encodable] holds, which is
//! exactly the set of characters every [Font](crate::Font) is required to cover.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Whether a character survives normalization: printable ASCII plus newline and tab
pub fn is_encodable(ch: char) -> bool {
    matches!(ch, ' '..='~' | '\n' | '\t')
}

/// Maps arbitrary text into the encodable character set.
///
/// * `None` becomes the empty string
/// * accented letters collapse to their base letter (NFD, then combining marks are dropped)
/// * typographic quotes, dashes, ellipses, bullets and exotic spaces map to ASCII
/// * control characters other than `\n` and `\t` are dropped; `\r\n` and `\r` become `\n`
/// * anything else outside the encodable set is dropped
/// * leading and trailing whitespace is trimmed
///
/// `normalize(Some(&normalize(x))) == normalize(x)` for every `x`.
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let text = text.replace("\r\n", "\n");
    let mut out = String::with_capacity(text.len());
    let mut dropped = 0usize;

    for ch in text.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => out.push('"'),
            '\u{2012}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' | '\u{2023}' | '\u{2043}' | '\u{25CF}' | '\u{00B7}' => out.push('-'),
            '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' => {
                out.push(' ')
            }
            '\r' => out.push('\n'),
            ch if is_encodable(ch) => out.push(ch),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        log::trace!("normalize dropped {dropped} unencodable characters");
    }

    out.trim().to_string()
}

/// Joins the whitespace-separated words of `text` with single spaces, so that
/// newlines and tabs in paragraphs don't survive into wrapped lines
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_text_is_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some(" \n\t ")), "");
    }

    #[test]
    fn diacritics_and_typographic_punctuation() {
        assert_eq!(
            normalize(Some("caf\u{e9}\u{2019}s \u{2014} \u{201c}plan\u{201d}")),
            "cafe's - \"plan\""
        );
        assert_eq!(normalize(Some("Tr\u{e9}sorAI")), "TresorAI");
        assert_eq!(normalize(Some("wait\u{2026}")), "wait...");
        assert_eq!(normalize(Some("\u{2022} first")), "- first");
        assert_eq!(normalize(Some("10\u{2013}20")), "10-20");
        assert_eq!(normalize(Some("\u{2018}single\u{2019}")), "'single'");
    }

    #[test]
    fn decomposed_input_matches_precomposed() {
        assert_eq!(normalize(Some("e\u{301}te\u{301}")), "ete");
        assert_eq!(normalize(Some("\u{e9}t\u{e9}")), "ete");
        assert_eq!(normalize(Some("\u{c5}ngstr\u{f6}m")), "Angstrom");
    }

    #[test]
    fn controls_are_stripped_but_newline_and_tab_survive() {
        assert_eq!(normalize(Some("a\u{0}b\u{7}c")), "abc");
        assert_eq!(normalize(Some("one\r\ntwo\rthree")), "one\ntwo\nthree");
        assert_eq!(normalize(Some("col\tcol")), "col\tcol");
        assert_eq!(normalize(Some("\u{1b}[31mred")), "[31mred");
    }

    #[test]
    fn unencodable_characters_are_dropped() {
        assert_eq!(normalize(Some("Bloom \u{1f338}\u{2728} daily")), "Bloom  daily");
        assert_eq!(normalize(Some("\u{1f338}")), "");
        assert_eq!(normalize(Some("\u{4e2d}\u{6587} text")), "text");
        assert_eq!(normalize(Some("\u{20ac}15-\u{20ac}25")), "15-25");
        assert_eq!(normalize(Some("non\u{a0}breaking")), "non breaking");
    }

    #[test]
    fn output_is_always_encodable() {
        let samples = [
            "Manifestation \u{2728} journal \u{2014} 30 days",
            "\u{feff}BOM and zero\u{200b}width",
            "R\u{e9}sum\u{e9} na\u{ef}ve co\u{f6}perate \u{fb01}",
            "\u{201e}Anf\u{fc}hrung\u{201c}",
            "tab\tnew\nline\u{85}next",
        ];
        for sample in samples {
            let out = normalize(Some(sample));
            assert!(out.chars().all(is_encodable), "{out:?}");
        }
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "  padded  ",
            "caf\u{e9}\u{2019}s \u{2014} \u{201c}plan\u{201d}",
            "\u{2026}\u{2026}",
            "line\r\n\r\n\tindented",
            "\u{3000}ideographic space\u{3000}",
            "\u{1f338} leading emoji",
            "mixed \u{2022} bullets \u{25cf} and \u{b7} dots",
        ];
        for sample in samples {
            let once = normalize(Some(sample));
            assert_eq!(normalize(Some(&once)), once, "{sample:?}");
        }
    }

    #[test]
    fn collapsing_whitespace() {
        assert_eq!(collapse_whitespace("a\n\nb\t c  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
