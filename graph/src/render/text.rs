use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "...";

/// Display width of a string in terminal columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Longest prefix of `text` that fits in `max_width` columns, cut on grapheme boundaries
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut current_width = 0;
    let mut end = 0;

    for (offset, grapheme) in text.grapheme_indices(true) {
        let grapheme_width = UnicodeWidthStr::width(grapheme);
        if current_width + grapheme_width > max_width {
            break;
        }
        current_width += grapheme_width;
        end = offset + grapheme.len();
    }

    &text[..end]
}

/// Fixed-width name column.
///
/// Names that would leave fewer than two columns of gap are cut and marked
/// with an ellipsis; everything is padded with trailing spaces to `width`.
pub fn name_field(name: &str, width: usize) -> String {
    let shown = if display_width(name) > width.saturating_sub(2) {
        let cut = truncate_to_width(name, width.saturating_sub(2 + ELLIPSIS.len()));
        format!("{cut}{ELLIPSIS}")
    } else {
        name.to_string()
    };

    let padding = width.saturating_sub(display_width(&shown));
    format!("{}{}", shown, " ".repeat(padding))
}
