use pulldown_cmark::Alignment;
use unicode_width::UnicodeWidthStr;

/// Pad `s` with spaces to `width` display columns according to the
/// column alignment. Text already wider than `width` is returned as is.
pub fn pad_to_width(s: &str, width: usize, align: Option<&Alignment>) -> String {
    let pad = width.saturating_sub(UnicodeWidthStr::width(s));
    let (left, right) = match align {
        Some(Alignment::Right) => (pad, 0),
        Some(Alignment::Center) => (pad / 2, pad - pad / 2),
        _ => (0, pad),
    };
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

/// Delimiter cell for a table column of `width` columns (at least 3).
pub fn delimiter_cell(width: usize, align: Option<&Alignment>) -> String {
    match align {
        Some(Alignment::Left) => format!(":{}", "-".repeat(width - 1)),
        Some(Alignment::Right) => format!("{}:", "-".repeat(width - 1)),
        Some(Alignment::Center) => format!(":{}:", "-".repeat(width - 2)),
        _ => "-".repeat(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_by_alignment() {
        assert_eq!(pad_to_width("ab", 5, None), "ab   ");
        assert_eq!(pad_to_width("ab", 5, Some(&Alignment::Right)), "   ab");
        assert_eq!(pad_to_width("ab", 5, Some(&Alignment::Center)), " ab  ");
        assert_eq!(pad_to_width("abcdef", 3, None), "abcdef");
    }

    #[test]
    fn delimiters_mark_alignment() {
        assert_eq!(delimiter_cell(3, Some(&Alignment::Left)), ":--");
        assert_eq!(delimiter_cell(4, Some(&Alignment::Center)), ":--:");
        assert_eq!(delimiter_cell(3, None), "---");
    }
}
