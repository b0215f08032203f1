//! HTML rendering
//!
//! The output is a self-contained fragment (a `<style>` and a `<table>`), meant to be embedded in the dashboard page.
//! The header row and the developer column stay visible when the table is scrolled.

use maud::{html, Markup, PreEscaped};

use super::{BlockKind, BlockView, GridView, PLACEHOLDER};

const CSS: &str = r#"
.sprint-grid { overflow: auto; max-height: 32rem; }
.sprint-grid table { border-collapse: separate; border-spacing: 0; font-size: 0.75rem; }
.sprint-grid th, .sprint-grid td { border-bottom: 1px solid #e5e7eb; padding: 0.25rem; vertical-align: top; min-width: 7rem; }
.sprint-grid thead th { position: sticky; top: 0; z-index: 2; background: #f9fafb; }
.sprint-grid th.developer { position: sticky; left: 0; z-index: 1; background: #ffffff; text-align: left; }
.sprint-grid thead th.developer { z-index: 3; background: #f9fafb; }
.sprint-grid .block { color: #ffffff; border-radius: 0.25rem; padding: 0.125rem 0.375rem; margin-bottom: 0.125rem; white-space: nowrap; }
.sprint-grid .block.continuation { border-top-left-radius: 0; border-bottom-left-radius: 0; margin-left: -0.25rem; }
.sprint-grid .empty { color: #9ca3af; text-align: center; }
"#;

fn block_class(block: &BlockView) -> String {
    let kind = match block.kind {
        BlockKind::Holiday => "holiday",
        BlockKind::Leave => "leave",
        BlockKind::Task => "task",
    };
    if block.continuation {
        format!("block {} continuation", kind)
    } else {
        format!("block {}", kind)
    }
}

fn render_block(block: &BlockView) -> Markup {
    html! {
        div class=(block_class(block)) style={"background-color: " (block.color)} title=(block.tooltip) {
            (block.label)
        }
    }
}

/// The grid as an HTML fragment. Every text coming from the feeds is escaped.
pub fn grid_markup(view: &GridView) -> Markup {
    html! {
        style { (PreEscaped(CSS)) }
        div class="sprint-grid" {
            table {
                thead {
                    tr {
                        th class="developer" { "Developer" }
                        @for column in &view.columns {
                            th data-date=(column.date) { (column.title) }
                        }
                    }
                }
                tbody {
                    @for row in &view.rows {
                        tr {
                            th class="developer" { (row.developer) }
                            @for cell in &row.cells {
                                @if cell.is_empty() {
                                    td class="empty" data-date=(cell.date) { (PLACEHOLDER) }
                                } @else {
                                    td data-date=(cell.date) {
                                        @for block in &cell.blocks {
                                            (render_block(block))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Render a grid as an HTML table
pub fn render(view: &GridView) -> String {
    grid_markup(view).into_string()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CellView, ColumnView, RowView};

    #[test]
    fn labels_are_escaped() {
        let view = GridView {
            columns: vec![ColumnView{ date: "2025-04-07".into(), title: "Mon 07 Apr".into() }],
            rows: vec![RowView {
                developer: "Bob".into(),
                cells: vec![CellView{ date: "2025-04-07".into(), blocks: vec![BlockView {
                    kind: BlockKind::Task,
                    label: "<b>R&D</b>".into(),
                    tooltip: r#"Fix "R&D" page (1 pts) - Bob"#.into(),
                    color: "#22c55e".into(),
                    continuation: false,
                }]}],
            }],
        };

        let html = render(&view);
        assert!(html.contains(">&lt;b&gt;R&amp;D&lt;/b&gt;</div>"));
        assert!(html.contains(r#"title="Fix &quot;R&amp;D&quot; page (1 pts) - Bob""#));
        assert!(html.contains("<b>") == false);
    }

    #[test]
    fn blocks_and_placeholders() {
        let view = GridView {
            columns: vec![
                ColumnView{ date: "2025-04-07".into(), title: "Mon 07 Apr".into() },
                ColumnView{ date: "2025-04-08".into(), title: "Tue 08 Apr".into() },
            ],
            rows: vec![RowView {
                developer: "Alice <QA>".into(),
                cells: vec![
                    CellView{ date: "2025-04-07".into(), blocks: Vec::new() },
                    CellView{ date: "2025-04-08".into(), blocks: vec![BlockView {
                        kind: BlockKind::Task,
                        label: "Implement OAuth...".into(),
                        tooltip: "Implement OAuth2 login flow (3 pts) - Alice".into(),
                        color: "#22c55e".into(),
                        continuation: true,
                    }]},
                ],
            }],
        };

        let html = render(&view);
        assert!(html.contains("position: sticky"));
        assert!(html.contains(r#"<th class="developer">Alice &lt;QA&gt;</th>"#));
        assert!(html.contains(r#"<td class="empty" data-date="2025-04-07">-</td>"#));
        assert!(html.contains(r#"class="block task continuation""#));
        assert!(html.contains(r#"title="Implement OAuth2 login flow (3 pts) - Alice""#));
        assert!(html.contains(">Implement OAuth...</div>"));
    }
}
