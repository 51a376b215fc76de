use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to truncated text.
const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns (CJK and emoji count as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates a string to fit within `max_width` terminal columns.
///
/// Appends "..." when text is cut. Widths of 3 or less have no room for an
/// ellipsis, so the result is simply the longest prefix that fits.
/// Returns `Cow::Borrowed` whenever the input already fits.
///
/// ```
/// use campusfeed::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Campus News", 20), "Campus News");
/// assert_eq!(truncate_to_width("Campus News", 9), "Campus...");
/// assert_eq!(truncate_to_width("Campus", 2), "Ca");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if max_width == 0 {
        return Cow::Borrowed("");
    }

    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    if max_width <= ELLIPSIS_WIDTH {
        return Cow::Owned(prefix_within(s, max_width).to_string());
    }

    let head = prefix_within(s, max_width - ELLIPSIS_WIDTH);
    Cow::Owned(format!("{}{}", head, ELLIPSIS))
}

/// Longest prefix of `s` whose display width does not exceed `width`.
fn prefix_within(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_ascii_and_wide() {
        assert_eq!(display_width("Tech"), 4);
        assert_eq!(display_width("新闻"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_fits_is_borrowed() {
        let out = truncate_to_width("Sports", 6);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "Sports");
    }

    #[test]
    fn test_truncates_with_ellipsis() {
        assert_eq!(
            truncate_to_width("Student Futsal League: A Dramatic Semifinal", 16),
            "Student Futsa..."
        );
    }

    #[test]
    fn test_truncated_output_never_exceeds_width() {
        let title = "Women's Basketball Team Takes the National Inter-University Title";
        for width in 0..70 {
            assert!(display_width(&truncate_to_width(title, width)) <= width);
        }
    }

    #[test]
    fn test_wide_chars_are_not_split() {
        // Each CJK char is 2 columns; 7 columns leaves room for 2 chars + "...".
        assert_eq!(truncate_to_width("校园新闻速递", 7), "校园...");
    }

    #[test]
    fn test_narrow_widths_have_no_ellipsis() {
        assert_eq!(truncate_to_width("Campus", 0), "");
        assert_eq!(truncate_to_width("Campus", 1), "C");
        assert_eq!(truncate_to_width("Campus", 3), "Cam");
    }
}
