use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a rendered column may get before cells are truncated.
pub(crate) const MAX_COL_WIDTH: usize = 28;

pub(crate) fn display_width(s: &str) -> usize {
    s.width()
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Longest prefix of `s` that fits in `budget` display columns.
fn fitting_prefix(s: &str, budget: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in s.char_indices() {
        used += char_width(ch);
        if used > budget {
            return &s[..idx];
        }
    }
    s
}

/// Shorten a cell to `width` columns. Anything cut gets a ".." marker when there is room for one.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    match width {
        _ if display_width(s) <= width => s.to_string(),
        0..=2 => fitting_prefix(s, width).chars().take(1).collect(),
        _ => format!("{}..", fitting_prefix(s, width - 2)),
    }
}

/// Left-align within `width` columns, cutting long cells.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let fill = width.saturating_sub(display_width(&cut));
    cut + &" ".repeat(fill)
}

/// Right-align within `width` columns (numbers).
pub(crate) fn pad_left(s: &str, width: usize) -> String {
    let sw = display_width(s);
    if sw >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - sw), s)
    }
}

/// Render rows as an aligned text table with a dashed rule under the header.
///
/// Columns listed in `numeric` are right-aligned.
pub(crate) fn render_table(headers: &[String], rows: &[Vec<String>], numeric: &[usize]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let cells = rows.iter().filter_map(|r| r.get(i)).map(|c| display_width(c));
            cells.chain(std::iter::once(display_width(h))).max().unwrap_or(0).min(MAX_COL_WIDTH)
        })
        .collect();

    let render_row = |cells: &[String]| -> String {
        let parts: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                if numeric.contains(&i) {
                    pad_left(&truncate_display(cell, w), w)
                } else {
                    pad_right(cell, w)
                }
            })
            .collect();
        parts.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&render_row(headers));
    out.push('\n');
    let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule));
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

/// Null cells render as an empty string, like a blank spreadsheet cell.
pub(crate) fn cell(value: Option<&str>) -> String {
    value.unwrap_or("").to_string()
}

pub(crate) fn fmt_ratio(value: f64) -> String {
    format!("{value:.3}")
}

pub(crate) fn fmt_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_accented() {
        assert_eq!(display_width("Crème"), 5);
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("表"), 2);
    }

    #[test]
    fn truncate_adds_dots() {
        assert_eq!(truncate_display("Robe Élégance", 8), "Robe É..");
        assert_eq!(truncate_display("short", 8), "short");
        assert_eq!(truncate_display("abc", 1), "a");
    }

    #[test]
    fn pad_both_ways() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_left("12", 4), "  12");
        assert_eq!(pad_left("12345", 4), "12345");
    }

    #[test]
    fn table_alignment() {
        let headers = vec!["Color".to_string(), "Qty".to_string()];
        let rows = vec![
            vec!["Crème".to_string(), "3".to_string()],
            vec!["".to_string(), "12".to_string()],
        ];
        let out = render_table(&headers, &rows, &[1]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Color  Qty");
        assert_eq!(lines[1], "----------");
        assert_eq!(lines[2], "Crème    3");
        assert_eq!(lines[3], "        12");
    }

    #[test]
    fn number_formats() {
        assert_eq!(fmt_ratio(0.4), "0.400");
        assert_eq!(fmt_percent(0.25), "25.0%");
    }
}
