//! Rendering of an [`AssignmentGrid`]
//!
//! A grid is first turned into a [`GridView`], that contains everything that is displayed (truncated labels, tooltips, colors, continuation flags).
//! The view can then be rendered as a plain-text table ([`text`]), as an HTML table ([`html`]), or serialized as JSON.

pub mod text;
pub mod html;

use serde::Serialize;

use crate::entry::{EntryKind, ScheduleEntry};
use crate::grid::AssignmentGrid;

/// What an empty cell displays
pub const PLACEHOLDER: &str = "-";
/// Labels longer than this (in characters) are truncated
pub const MAX_LABEL_CHARS: usize = 15;
/// Appended to truncated labels
pub const ELLIPSIS: &str = "...";

/// Shorten a label to [`MAX_LABEL_CHARS`] characters (plus an ellipsis) if it is longer than that
pub fn truncate_label(label: &str) -> String {
    match label.char_indices().nth(MAX_LABEL_CHARS) {
        None => label.to_string(),
        Some((cut, _)) => format!("{}{}", &label[..cut], ELLIPSIS),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Holiday,
    Leave,
    Task,
}

/// A single colored block inside a cell
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BlockView {
    pub kind: BlockKind,
    /// The (possibly truncated) label
    pub label: String,
    /// Hover text: the full label, the points and the developer
    pub tooltip: String,
    /// CSS hex color
    pub color: String,
    /// Whether this block continues a task that already appeared on an earlier day
    pub continuation: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellView {
    /// `yyyy-MM-dd`
    pub date: String,
    pub blocks: Vec<BlockView>,
}

impl CellView {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowView {
    pub developer: String,
    pub cells: Vec<CellView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnView {
    /// `yyyy-MM-dd`
    pub date: String,
    /// e.g. `Mon 07 Apr`
    pub title: String,
}

/// Everything that is needed to display a grid
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridView {
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
}

impl GridView {
    pub fn from_grid(grid: &AssignmentGrid) -> Self {
        let columns = grid.days().iter()
            .map(|day| ColumnView {
                date: day.format("%Y-%m-%d").to_string(),
                title: day.format("%a %d %b").to_string(),
            })
            .collect();

        let rows = grid.developers().iter()
            .map(|developer| {
                let cells = grid.days().iter()
                    .map(|day| CellView {
                        date: day.format("%Y-%m-%d").to_string(),
                        blocks: grid.cell(developer, *day).iter()
                            .map(|entry| block_view(grid, entry))
                            .collect(),
                    })
                    .collect();
                RowView { developer: developer.clone(), cells }
            })
            .collect();

        Self { columns, rows }
    }
}

fn block_view(grid: &AssignmentGrid, entry: &ScheduleEntry) -> BlockView {
    let kind = match entry.kind() {
        EntryKind::Holiday{..} => BlockKind::Holiday,
        EntryKind::Leave => BlockKind::Leave,
        EntryKind::Task{..} => BlockKind::Task,
    };
    let color = entry.color()
        .map(|color| color.to_hex_string())
        .unwrap_or_default();

    BlockView {
        kind,
        label: truncate_label(entry.label()),
        tooltip: format!("{} ({} pts) - {}", entry.label(), entry.points(), entry.developer()),
        color,
        continuation: grid.is_continuation(entry.developer(), entry.date(), entry.label()),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation() {
        assert_eq!(truncate_label("Short"), "Short");
        assert_eq!(truncate_label("Exactly fifteen"), "Exactly fifteen");
        assert_eq!(truncate_label("Implement OAuth2 login flow"), "Implement OAuth...");
        // Counted in characters, not bytes
        assert_eq!(truncate_label("Équipe été à côté"), "Équipe été à cô...");
    }
}
