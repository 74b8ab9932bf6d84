//! Metrics for the two standard Type 1 faces the PDF report uses. Widths are
//! in 1/1000 em for WinAnsi code points 32..=126.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub fn resource_name(self) -> &'static [u8] {
        match self {
            Font::Regular => b"F1",
            Font::Bold => b"F2",
        }
    }

    pub fn base_font(self) -> &'static [u8] {
        match self {
            Font::Regular => b"Helvetica",
            Font::Bold => b"Helvetica-Bold",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Regular => &HELVETICA,
            Font::Bold => &HELVETICA_BOLD,
        }
    }
}

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Maps text onto WinAnsi bytes. Latin-1 supplement passes through unchanged;
/// anything else becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            cp @ 0x20..=0x7E => cp as u8,
            cp @ 0xA0..=0xFF => cp as u8,
            _ => b'?',
        })
        .collect()
}

/// Width of `text` in points when set in `font` at `size` points.
pub fn text_width_pt(font: Font, text: &str, size: f64) -> f64 {
    let table = font.widths();
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| match b {
            0x20..=0x7E => u32::from(table[usize::from(b - 0x20)]),
            _ => u32::from(FALLBACK_WIDTH),
        })
        .sum();
    f64::from(units) * size / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_ascii_and_latin1() {
        assert_eq!(encode_win_ansi("Zoë"), vec![b'Z', b'o', 0xEB]);
        assert_eq!(encode_win_ansi("小明"), b"??".to_vec());
    }

    #[test]
    fn widths_follow_afm_tables() {
        // "Yes" = 667 + 556 + 500
        assert!((text_width_pt(Font::Regular, "Yes", 10.0) - 17.23).abs() < 1e-9);
        // Bold "No" = 722 + 611
        assert!((text_width_pt(Font::Bold, "No", 12.0) - 15.996).abs() < 1e-9);
        assert_eq!(text_width_pt(Font::Regular, "", 12.0), 0.0);
    }
}
