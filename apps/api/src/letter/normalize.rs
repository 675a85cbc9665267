//! Character normalization for the PDF base fonts.
//!
//! The standard Type1 fonts only cover WinAnsiEncoding. Typographic punctuation
//! is mapped to ASCII through a fixed table first; anything still outside the
//! encoding becomes `?`.

/// Substitute for characters the encoding cannot represent.
pub const PLACEHOLDER: char = '?';

/// Typographic characters and their ASCII stand-ins.
const SUBSTITUTIONS: &[(char, &str)] = &[
    ('\u{2018}', "'"),  // left single quote
    ('\u{2019}', "'"),  // right single quote / apostrophe
    ('\u{201A}', "'"),  // single low-9 quote
    ('\u{201B}', "'"),  // single high-reversed-9 quote
    ('\u{2032}', "'"),  // prime
    ('\u{201C}', "\""), // left double quote
    ('\u{201D}', "\""), // right double quote
    ('\u{201E}', "\""), // double low-9 quote
    ('\u{201F}', "\""), // double high-reversed-9 quote
    ('\u{2033}', "\""), // double prime
    ('\u{2012}', "-"),  // figure dash
    ('\u{2013}', "-"),  // en dash
    ('\u{2014}', "-"),  // em dash
    ('\u{2212}', "-"),  // minus sign
    ('\u{2022}', "*"),  // bullet
    ('\u{2219}', "*"),  // bullet operator
    ('\u{00A0}', " "),  // no-break space
    ('\u{202F}', " "),  // narrow no-break space
    ('\u{2026}', "..."),
    ('\t', " "),
];

/// WinAnsiEncoding code points 0x80..=0x9F that differ from Latin-1.
const WIN_ANSI_HIGH: &[(char, u8)] = &[
    ('\u{20AC}', 0x80),
    ('\u{0192}', 0x83),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Maps typographic punctuation to ASCII, drops control characters other than
/// `\n`, and replaces anything the encoding cannot hold with `PLACEHOLDER`.
///
/// The result only contains characters for which `win_ansi_byte` is `Some`,
/// plus `\n`.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some((_, replacement)) = SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
            out.push_str(replacement);
        } else if c == '\n' {
            out.push('\n');
        } else if c.is_control() {
            continue;
        } else if win_ansi_byte(c).is_some() {
            out.push(c);
        } else {
            out.push(PLACEHOLDER);
        }
    }
    out
}

/// The WinAnsiEncoding byte for a printable character, if it has one.
pub fn win_ansi_byte(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(from, _)| *from == c)
            .map(|(_, byte)| *byte),
    }
}

/// Encodes normalized text for a PDF string operand. Anything unencodable
/// (normalization was skipped) becomes the placeholder byte.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(PLACEHOLDER as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_quotes_become_straight() {
        assert_eq!(
            normalize_text("\u{201C}Acme\u{2019}s\u{201D} \u{2018}best\u{2019}"),
            "\"Acme's\" 'best'"
        );
    }

    #[test]
    fn test_dashes_bullets_and_spaces() {
        assert_eq!(
            normalize_text("2019\u{2013}2024 \u{2014} pricing\u{00A0}\u{2022} R\u{2026}"),
            "2019-2024 - pricing * R..."
        );
    }

    #[test]
    fn test_latin1_passes_through() {
        assert_eq!(normalize_text("Zürich café"), "Zürich café");
        assert_eq!(encode_win_ansi("Zürich"), b"Z\xFCrich".to_vec());
    }

    #[test]
    fn test_win_ansi_high_range() {
        assert_eq!(normalize_text("€5 ™"), "€5 ™");
        assert_eq!(encode_win_ansi("€"), vec![0x80]);
    }

    #[test]
    fn test_unrepresentable_becomes_placeholder() {
        assert_eq!(normalize_text("📍 Mumbai 北京"), "? Mumbai ??");
    }

    #[test]
    fn test_controls_dropped_newlines_kept() {
        assert_eq!(normalize_text("a\r\nb\tc\u{0007}"), "a\nb c");
    }

    #[test]
    fn test_printable_ascii_is_unchanged() {
        let ascii: String = (0x20u8..=0x7E).map(char::from).collect();
        assert_eq!(normalize_text(&ascii), ascii);
        assert_eq!(encode_win_ansi(&ascii), ascii.as_bytes());
    }

    #[test]
    fn test_normalized_output_is_always_encodable() {
        let normalized = normalize_text("\u{201C}naïve\u{201D} — 👋 \u{2122}\n\u{FEFF}x");
        assert!(normalized
            .chars()
            .all(|c| c == '\n' || win_ansi_byte(c).is_some()));
    }
}
