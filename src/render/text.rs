//! Plain-text rendering, for terminals and logs

use std::fmt::Write;

use super::{GridView, BlockView, CellView, PLACEHOLDER};

const DEVELOPER_HEADER: &str = "Developer";
/// Prefix of blocks that continue a task from an earlier day
const CONTINUATION_MARK: &str = "> ";

fn block_text(block: &BlockView) -> String {
    if block.continuation {
        format!("{}{}", CONTINUATION_MARK, block.label)
    } else {
        block.label.clone()
    }
}

fn cell_text(cell: &CellView) -> String {
    if cell.is_empty() {
        return PLACEHOLDER.to_string();
    }
    cell.blocks.iter()
        .map(block_text)
        .collect::<Vec<_>>()
        .join(", ")
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Render a grid as a table, one line per developer
pub fn render(view: &GridView) -> String {
    let rows: Vec<(&str, Vec<String>)> = view.rows.iter()
        .map(|row| (row.developer.as_str(), row.cells.iter().map(cell_text).collect()))
        .collect();

    let mut widths = Vec::with_capacity(view.columns.len() + 1);
    widths.push(rows.iter()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once(DEVELOPER_HEADER.len()))
        .max()
        .unwrap_or(0));
    for (i, column) in view.columns.iter().enumerate() {
        widths.push(rows.iter()
            .map(|(_, cells)| cells.get(i).map(|cell| cell.chars().count()).unwrap_or(0))
            .chain(std::iter::once(column.title.chars().count()))
            .max()
            .unwrap_or(0));
    }

    let mut out = String::new();
    let header: Vec<String> = std::iter::once(DEVELOPER_HEADER)
        .chain(view.columns.iter().map(|c| c.title.as_str()))
        .zip(&widths)
        .map(|(title, width)| pad(title, *width))
        .collect();
    let _ = writeln!(out, "{}", header.join(" | ").trim_end());

    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", separator.join("-+-"));

    for (name, cells) in &rows {
        let line: Vec<String> = std::iter::once(*name)
            .chain(cells.iter().map(|c| c.as_str()))
            .zip(&widths)
            .map(|(text, width)| pad(text, *width))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    }
    out
}

/// A debug utility that pretty-prints a grid
pub fn print_grid(view: &GridView) {
    print!("{}", render(view));
}
