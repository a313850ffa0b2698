use crate::layout::FontFace;

/// Advance widths of the bytes 0x20..=0xFF of Helvetica in `WinAnsiEncoding`, in 1/1000 em,
/// as given by the Adobe font metrics of the standard 14 fonts. The bytes left undefined by
/// the encoding (0x81, 0x8D, 0x8F, 0x90 and 0x9D) have no width.
const HELVETICA_WIDTHS: [u16; 224] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..='/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..='?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..='O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..='_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..='o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0, // 'p'..=0x7F
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80..=0x8F
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667, // 0x90..=0x9F
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0..=0xAF
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0..=0xBF
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0..=0xCF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0..=0xDF
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0..=0xEF
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 0xF0..=0xFF
];

/// Same as `HELVETICA_WIDTHS`, but for Helvetica-Bold.
const HELVETICA_BOLD_WIDTHS: [u16; 224] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..='/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..='?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..='O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..='_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..='o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 0, // 'p'..=0x7F
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 0x80..=0x8F
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667, // 0x90..=0x9F
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 0xA0..=0xAF
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 0xB0..=0xBF
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 0xC0..=0xCF
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 0xD0..=0xDF
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // 0xE0..=0xEF
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // 0xF0..=0xFF
];

/// Width of a single byte of `WinAnsiEncoding` text in the given face, in 1/1000 em.
/// Control bytes have no width.
pub fn glyph_width(face: FontFace, byte: u8) -> u16 {
    let widths = match face {
        FontFace::Regular => &HELVETICA_WIDTHS,
        FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match byte {
        0x20..=0xFF => widths[usize::from(byte - 0x20)],
        _ => 0,
    }
}

/// Width in points of the encoded text when set in the given face and size.
pub fn text_width(face: FontFace, font_size: f32, encoded_text: &[u8]) -> f32 {
    let total_width: u32 = encoded_text
        .iter()
        .map(|byte| u32::from(glyph_width(face, *byte)))
        .sum();

    total_width as f32 * font_size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::encode_win_ansi;

    #[test]
    fn widths_follow_the_font_metrics() {
        assert_eq!(glyph_width(FontFace::Regular, b' '), 278);
        assert_eq!(glyph_width(FontFace::Regular, b'W'), 944);
        assert_eq!(glyph_width(FontFace::Bold, b'a'), 556);
        assert_eq!(glyph_width(FontFace::Bold, b'~'), 584);
        assert_eq!(glyph_width(FontFace::Regular, b'\n'), 0);
    }

    #[test]
    fn the_upper_half_has_its_own_widths() {
        let widths = |text: &str, face: FontFace| -> Vec<u16> {
            encode_win_ansi(text)
                .unwrap()
                .into_iter()
                .map(|byte| glyph_width(face, byte))
                .collect()
        };

        assert_eq!(
            widths("—™…Ø•é", FontFace::Regular),
            vec![1000, 1000, 1000, 778, 350, 556]
        );
        assert_eq!(
            widths("—™…Øñç", FontFace::Bold),
            vec![1000, 1000, 1000, 778, 611, 556]
        );
        assert_eq!(widths("Æ", FontFace::Regular), vec![1000]);
    }

    #[test]
    fn text_width_scales_with_the_font_size() {
        // "Hi" is 722 + 222 units wide in Helvetica
        assert!((text_width(FontFace::Regular, 10.0, b"Hi") - 9.44).abs() < 1e-4);
        assert!((text_width(FontFace::Regular, 20.0, b"Hi") - 18.88).abs() < 1e-4);
    }
}
