//! ASCII table rendering for list screens.

/// Render a header row plus data rows as an ASCII table.
/// Cells wider than the per-column cap are truncated with an ellipsis.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let cap = max_col_width();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len().min(cap)).collect();
    for r in rows {
        for (i, cell) in r.iter().enumerate().take(widths.len()) {
            let w = cell.len();
            if w > widths[i] { widths[i] = w.min(cap); }
        }
    }

    let sep = build_separator(&widths);
    println!("{}", sep);
    println!("{}", build_row(&headers.iter().map(|h| h.to_string()).collect::<Vec<_>>(), &widths, cap));
    println!("{}", sep);
    for r in rows {
        println!("{}", build_row(r, &widths, cap));
    }
    println!("{}", sep);
    println!("rows: {}", rows.len());
}

/// Render label/value pairs as a two-column block (detail screens).
pub fn print_record(pairs: &[(&str, String)]) {
    let label_w = pairs.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (label, value) in pairs {
        println!("  {:<label_w$}  {}", label, value, label_w = label_w);
    }
}

// Cap columns to keep output readable on narrow terminals.
fn max_col_width() -> usize {
    match terminal_size::terminal_size() {
        Some((terminal_size::Width(w), _)) if w > 40 => (w as usize / 2).min(60),
        _ => 60,
    }
}

fn build_separator(widths: &[usize]) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.push_str(&"-".repeat(w + 2));
        s.push('+');
    }
    s
}

fn build_row(cells: &[String], widths: &[usize], cap: usize) -> String {
    let mut s = String::from("|");
    for (i, w) in widths.iter().enumerate() {
        let cell = cells.get(i).map(|c| c.as_str()).unwrap_or("");
        s.push_str(&format!(" {:<w$} |", clip(cell, cap), w = *w));
    }
    s
}

fn clip(cell: &str, cap: usize) -> String {
    if cell.len() <= cap {
        return cell.to_string();
    }
    let mut out = String::new();
    for ch in cell.chars() {
        if out.len() + ch.len_utf8() >= cap {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_matches_widths() {
        assert_eq!(build_separator(&[2, 3]), "+----+-----+");
    }

    #[test]
    fn row_pads_and_handles_missing_cells() {
        let row = build_row(&["ab".to_string()], &[4, 3], 60);
        assert_eq!(row, "| ab   |     |");
    }

    #[test]
    fn long_cells_truncate() {
        let long = "x".repeat(100);
        let row = build_row(&[long], &[10], 10);
        assert!(row.len() < 120);
        assert!(row.contains('…'));
    }
}
