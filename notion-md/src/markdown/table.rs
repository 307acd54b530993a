//! Pipe table rendering.
//!
//! The first row is the header. Columns are padded to their widest cell (minimum 3, so the
//! separator row always reads as a delimiter row), short rows are padded with empty cells,
//! and cell text is escaped so it cannot break the row structure.

/// Render rows of already-rendered cell strings as a pipe table.
pub fn pipe_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..columns)
                .map(|i| row.get(i).map(|cell| escape_cell(cell)).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut col_widths = vec![3; columns];
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            col_widths[i] = col_widths[i].max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(cells.len() + 1);
    let (header, body) = cells.split_at(1);
    lines.push(format_row(&header[0], &col_widths));
    lines.push(separator_row(&col_widths));
    for row in body {
        lines.push(format_row(row, &col_widths));
    }
    lines.join("\n")
}

fn format_row(row: &[String], col_widths: &[usize]) -> String {
    let mut output = String::from("|");
    for (text, width) in row.iter().zip(col_widths) {
        output.push_str(&format!(" {text:width$} |"));
    }
    output
}

fn separator_row(col_widths: &[usize]) -> String {
    let mut output = String::from("|");
    for width in col_widths {
        output.push_str(&format!(" {} |", "-".repeat(*width)));
    }
    output
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', "<br>")
}
