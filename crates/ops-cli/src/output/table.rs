const MIN_COLUMN: usize = 4;

/// Render left-aligned columns separated by two spaces, with a dashed rule
/// under the header. Numeric cells are right-aligned. When `max_width` is
/// set, the widest columns shrink first and overlong cells end in `…`.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> String {
    let mut widths = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    if let Some(max_width) = max_width {
        shrink(&mut widths, max_width);
    }

    let header = format_line(headers.iter().copied(), &widths);
    let rule = "-".repeat(widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header);
    lines.push(rule);
    for row in rows {
        let cells = (0..headers.len()).map(|index| row.get(index).map_or("-", String::as_str));
        lines.push(format_line(cells, &widths));
    }
    lines.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(text, width)| pad(&truncate(text, *width), *width))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

fn shrink(widths: &mut [usize], max_width: usize) {
    let separators = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + separators > max_width {
        let Some((index, _)) = widths
            .iter()
            .enumerate()
            .filter(|(_, width)| **width > MIN_COLUMN)
            .max_by_key(|(_, width)| **width)
        else {
            break;
        };
        widths[index] -= 1;
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out = text.chars().take(width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    if is_numeric(text) {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

fn is_numeric(text: &str) -> bool {
    text.chars().any(|ch| ch.is_ascii_digit())
        && text
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.'))
}
