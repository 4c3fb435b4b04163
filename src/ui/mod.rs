//! Plain-text rendering for the terminal: tables, charts and calculator output.

pub mod calculator;
pub mod chart;
pub mod table;

/// Terminal columns taken by `text`; CJK, full-width forms and emoji count
/// double, combining marks and zero-width joiners take none. Ambiguous-width
/// symbols such as `★` are treated as narrow.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    match ch as u32 {
        0x0300..=0x036F
        | 0x1AB0..=0x1AFF
        | 0x1DC0..=0x1DFF
        | 0x200B..=0x200F
        | 0x20D0..=0x20FF
        | 0xFE00..=0xFE0F
        | 0xFE20..=0xFE2F => 0,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x231A..=0x231B
        | 0x23E9..=0x23EC
        | 0x2705
        | 0x270A..=0x270B
        | 0x274C
        | 0x2753..=0x2755
        | 0x2B50
        | 0x1F300..=0x1F64F
        | 0x1F900..=0x1F9FF
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}

/// Right-pads `text` with spaces to `width` terminal columns.
pub fn pad_right(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(display_width(text));
    format!("{text}{}", " ".repeat(padding))
}

pub fn heading(title: &str) -> String {
    format!("== {title} ==\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_counts_double() {
        assert_eq!(display_width("AK-47"), 5);
        assert_eq!(display_width("弯刀｜传说"), 10);
        assert_eq!(display_width("★ Vice"), 6);
    }

    #[test]
    fn marks_and_emoji() {
        assert_eq!(display_width("★"), 1);
        assert_eq!(display_width("e\u{301}"), 1);
        assert_eq!(display_width("✅ 已更新"), 9);
        assert_eq!(display_width("❌"), 2);
        assert_eq!(display_width("🔪刀"), 4);
        assert_eq!(display_width("a\u{200D}b"), 2);
    }

    #[test]
    fn pads_to_columns() {
        assert_eq!(pad_right("刀", 4), "刀  ");
        assert_eq!(pad_right("toolong", 3), "toolong");
    }
}
