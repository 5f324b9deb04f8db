/// Background candidates, indexed by `hash % PALETTE.len()`.
pub const PALETTE: [&str; 19] = [
    "#F44336", "#E91E63", "#9C27B0", "#673AB7", "#3F51B5", "#2196F3", "#03A9F4", "#00BCD4",
    "#009688", "#4CAF50", "#8BC34A", "#CDDC39", "#FFEB3B", "#FFC107", "#FF9800", "#FF5722",
    "#795548", "#9E9E9E", "#607D8B",
];

pub const BLACK: &str = "#000000";
pub const WHITE: &str = "#FFFFFF";

/// Backgrounds brighter than this get black text.
pub const LUMINANCE_THRESHOLD: f64 = 128.0;

/// 31-multiplier string hash over UTF-16 code units, wrapping at 32 bits.
///
/// The absolute value is taken at the end, so `i32::MIN` maps to `2^31`.
pub fn string_to_hash(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

pub fn color_from_hash(hash: u32) -> &'static str {
    PALETTE[hash as usize % PALETTE.len()]
}

/// BT.709 luminance of a `#RRGGBB` color on the 0..=255 scale, no gamma correction.
///
/// Returns `None` when the input is not a well-formed hex color.
pub fn luminance(hex_color: &str) -> Option<f64> {
    let digits = hex_color.strip_prefix('#')?;
    let [r, g, b]: [u8; 3] = hex::decode(digits).ok()?.try_into().ok()?;

    Some(0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b))
}

/// Picks black or white, whichever reads better on `background`.
///
/// Malformed colors are the caller's problem; they fall through to white.
pub fn contrasting_text_color(background: &str) -> &'static str {
    match luminance(background) {
        Some(l) if l > LUMINANCE_THRESHOLD => BLACK,
        _ => WHITE,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_hash_empty_is_zero() {
        assert_eq!(string_to_hash(""), 0);
    }

    #[test]
    fn test_hash_known_values() {
        assert_eq!(string_to_hash("a"), 97);
        assert_eq!(string_to_hash("ab"), 97 * 31 + 98);
        // "hello".hashCode() in the usual 31-multiplier scheme
        assert_eq!(string_to_hash("hello"), 99162322);
    }

    #[test]
    fn test_hash_wraps_and_stays_non_negative() {
        // Overflows i32 several times over
        let long = "The quick brown fox jumps over the lazy dog".repeat(8);
        let first = string_to_hash(&long);
        assert_eq!(first, string_to_hash(&long));

        // "polygenelubricants".hashCode() == i32::MIN
        assert_eq!(string_to_hash("polygenelubricants"), 2_147_483_648);
    }

    #[test]
    fn test_hash_uses_utf16_code_units() {
        // U+1F600 is a surrogate pair: 0xD83D, 0xDE00
        let expected = (0xD83Di32).wrapping_mul(31).wrapping_add(0xDE00).unsigned_abs();
        assert_eq!(string_to_hash("😀"), expected);
    }

    #[test]
    fn test_color_from_hash_is_palette_member() {
        for hash in [0, 1, 18, 19, 20, 12345, u32::MAX] {
            let color = color_from_hash(hash);
            assert_eq!(color, PALETTE[hash as usize % PALETTE.len()]);
        }
        assert_eq!(color_from_hash(0), "#F44336");
        assert_eq!(color_from_hash(19), "#F44336");
        assert_eq!(color_from_hash(18), "#607D8B");
    }

    #[rstest]
    #[case("#FFFFFF", BLACK)]
    #[case("#000000", WHITE)]
    #[case("#ffeb3b", BLACK)]
    #[case("#F44336", WHITE)]
    #[case("#FF0000", WHITE)]
    #[case("#00FF00", BLACK)]
    fn test_contrasting_text_color(#[case] background: &str, #[case] expected: &str) {
        assert_eq!(contrasting_text_color(background), expected);
    }

    #[test]
    fn test_grays_flip_around_threshold() {
        assert_eq!(contrasting_text_color("#7F7F7F"), WHITE);
        assert_eq!(contrasting_text_color("#818181"), BLACK);
    }

    #[rstest]
    #[case("")]
    #[case("FFFFFF")]
    #[case("#FFF")]
    #[case("#GGGGGG")]
    #[case("#FFFFFFFF")]
    fn test_malformed_color_does_not_panic(#[case] background: &str) {
        assert_eq!(luminance(background), None);
        assert_eq!(contrasting_text_color(background), WHITE);
    }
}
