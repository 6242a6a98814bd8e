/// The three built-in PDF faces the invoice layout uses. Built-in fonts
/// are guaranteed available in all viewers without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Font {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl Font {
    /// Resource name used in content streams. Fixed mapping.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "F1",
            Font::HelveticaBold => "F2",
            Font::HelveticaOblique => "F3",
        }
    }

    /// PDF BaseFont name.
    pub fn base_name(&self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
            Font::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    pub fn all() -> [Font; 3] {
        [Font::Helvetica, Font::HelveticaBold, Font::HelveticaOblique]
    }
}

/// Character widths for Helvetica (ASCII 32..=126) in 1/1000 em.
/// Helvetica-Oblique shares these widths. Source: Adobe AFM data.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, // A..P
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // Q..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, // a..p
    556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // q..z
    334, 260, 334, 584, // {..~
];

/// Character widths for Helvetica-Bold (ASCII 32..=126) in 1/1000 em.
/// Source: Adobe AFM data.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, // A..P
    778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // Q..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, // a..p
    611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // q..z
    389, 280, 389, 584, // {..~
];

/// Width used for characters outside the mapped ASCII range.
const DEFAULT_WIDTH: u16 = 278;

/// Width of one character in 1/1000 em units.
pub fn char_width(font: Font, ch: char) -> u16 {
    let code = ch as u32;
    if !(32..=126).contains(&code) {
        return DEFAULT_WIDTH;
    }
    let index = (code - 32) as usize;
    match font {
        Font::Helvetica | Font::HelveticaOblique => HELVETICA_WIDTHS[index],
        Font::HelveticaBold => HELVETICA_BOLD_WIDTHS[index],
    }
}

/// Measured width of a string in points at the given size. This is the
/// single measurement primitive: the layout engine computes centering,
/// right-alignment and underline extents from it, and layout tests
/// recompute the same quantity to verify placement.
pub fn text_width(text: &str, font: Font, size: f64) -> f64 {
    let total: u32 = text.chars().map(|ch| char_width(font, ch) as u32).sum();
    total as f64 * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_share_width() {
        let zero = char_width(Font::Helvetica, '0');
        for d in '1'..='9' {
            assert_eq!(char_width(Font::Helvetica, d), zero);
        }
    }

    #[test]
    fn oblique_shares_regular_widths() {
        for ch in ' '..='~' {
            assert_eq!(
                char_width(Font::Helvetica, ch),
                char_width(Font::HelveticaOblique, ch),
            );
        }
    }

    #[test]
    fn text_width_scales_linearly() {
        let at_12 = text_width("Invoice", Font::Helvetica, 12.0);
        let at_24 = text_width("Invoice", Font::Helvetica, 24.0);
        assert!((at_24 - 2.0 * at_12).abs() < 1e-9);
    }

    #[test]
    fn bold_is_wider_for_lowercase() {
        assert!(
            text_width("total", Font::HelveticaBold, 12.0)
                > text_width("total", Font::Helvetica, 12.0)
        );
    }

    #[test]
    fn non_ascii_uses_default_width() {
        assert_eq!(char_width(Font::Helvetica, 'é'), DEFAULT_WIDTH);
    }
}
