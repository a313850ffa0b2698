use unicode_normalization::char::{compose, decompose_canonical};
use unicode_normalization::UnicodeNormalization as _;

use crate::error::ContextError;

/// Maps a character onto its byte in `WinAnsiEncoding` (Windows code page 1252), which is the
/// encoding declared by the standard fonts of the documents produced by this crate.
pub fn win_ansi_byte(character: char) -> Option<u8> {
    let byte = match character {
        // Printable ASCII
        '\u{0020}'..='\u{007E}' => character as u8,
        // Latin-1 supplement
        '\u{00A0}'..='\u{00FF}' => character as u8,
        // The extensions of code page 1252 in the range 0x80..=0x9F
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };

    Some(byte)
}

/// Makes the text safe to be placed in a content stream. The text is first normalized in the
/// NFC form, then every character is mapped to its closest representable value in
/// `WinAnsiEncoding`: either itself, the base letter with its first accent (so that `ế` becomes
/// `ê`), or the bare base letter (so that `ā` becomes `a`). Tabs become spaces, everything
/// else is silently dropped.
///
/// This function never fails and never returns more characters than it was given.
pub fn sanitize(text: &str) -> String {
    text.nfc().filter_map(closest_representable).collect()
}

fn closest_representable(character: char) -> Option<char> {
    if character == '\t' {
        return Some(' ');
    }
    if win_ansi_byte(character).is_some() {
        return Some(character);
    }

    // The first character of the decomposition is the base letter, the rest are marks
    let mut decomposition = Vec::new();
    decompose_canonical(character, |decomposed| decomposition.push(decomposed));
    let base_character = decomposition
        .first()
        .copied()
        .filter(|base_character| *base_character != character)?;

    // Keep the first mark when the encoding has the letter carrying it, so that `ǖ` becomes `ü`
    decomposition
        .get(1)
        .and_then(|first_mark| compose(base_character, *first_mark))
        .into_iter()
        .chain(std::iter::once(base_character))
        .find(|candidate| win_ansi_byte(*candidate).is_some())
}

/// Converts already sanitized text into the bytes of a PDF string in `WinAnsiEncoding`.
/// Fails on the first character which has no representation in the encoding.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>, ContextError> {
    text.chars()
        .map(|character| {
            win_ansi_byte(character).ok_or(ContextError::with_context(format!(
                "The character {:?} cannot be represented in WinAnsiEncoding",
                character
            )))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_latin_text_untouched() {
        assert_eq!(sanitize("José Müller – Café"), "José Müller – Café");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn sanitize_drops_unrepresentable_characters() {
        assert_eq!(sanitize("Rust 🚀 developer"), "Rust  developer");
        assert_eq!(sanitize("東京 office"), " office");
        assert_eq!(sanitize("line\u{0007}bell"), "linebell");
    }

    #[test]
    fn sanitize_composes_and_falls_back_to_base_letters() {
        // A decomposed "e" with a combining acute accent is composed into "é"
        assert_eq!(sanitize("Re\u{0301}sume\u{0301}"), "Résumé");
        // Letters outside of the encoding fall back to their base letter
        assert_eq!(sanitize("Łódź Gdańsk"), "ódz Gdansk");
        assert_eq!(sanitize("a\tb"), "a b");
    }

    #[test]
    fn sanitize_keeps_the_first_accent_when_it_can() {
        assert_eq!(sanitize("ǖ"), "ü");
        assert_eq!(sanitize("Nguyễn Thị Ánh"), "Nguyên Thi Ánh");
        assert_eq!(sanitize("ế"), "ê");
        // No accented "a" with a macron in the encoding, the bare letter remains
        assert_eq!(sanitize("ā"), "a");
    }

    #[test]
    fn encode_win_ansi_maps_the_extended_range() {
        assert_eq!(encode_win_ansi("• €").unwrap(), vec![0x95, 0x20, 0x80]);
        assert_eq!(encode_win_ansi("é").unwrap(), vec![0xE9]);
    }

    #[test]
    fn encode_win_ansi_rejects_unsanitized_text() {
        let error = encode_win_ansi("ok 🚀").unwrap_err();
        assert!(error.context.contains("WinAnsiEncoding"));
    }
}
