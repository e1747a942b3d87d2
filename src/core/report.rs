use crate::domain::model::{BoardSummary, GroupSummary};
use std::fmt;

const PREVIEW_ITEMS: usize = 3;
const PREVIEW_CELLS: usize = 2;

/// Human readable overview of an assembled board, printed after an export.
pub struct SummaryReport<'a>(pub &'a BoardSummary);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        let info = &summary.board_info;

        writeln!(f, "Tablero: {}", info.name)?;
        writeln!(f, "Descripción: {}", info.description.as_deref().unwrap_or(""))?;
        writeln!(f, "Total de elementos: {}", summary.total_items)?;
        writeln!(f, "Total de grupos: {}", summary.total_groups)?;

        writeln!(f, "\n=== COLUMNAS ({}) ===", summary.columns.len())?;
        for column in &summary.columns {
            writeln!(
                f,
                "- {} (ID: {}, Tipo: {})",
                column.title,
                column.id,
                column.column_type.as_deref().unwrap_or("N/A")
            )?;
        }

        writeln!(f, "\n=== GRUPOS Y ELEMENTOS ===")?;
        for group in &summary.groups {
            write_group(f, group)?;
        }

        Ok(())
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, group: &GroupSummary) -> fmt::Result {
    writeln!(f, "\nGrupo: {} (ID: {})", group.group_title, group.group_id)?;
    writeln!(f, "   Color: {}", group.group_color.as_deref().unwrap_or("N/A"))?;
    writeln!(f, "   Elementos: {}", group.items_count)?;

    for item in group.items.iter().take(PREVIEW_ITEMS) {
        writeln!(f, "   └─ {} (ID: {})", item.name, item.id)?;
        let filled = item
            .column_data
            .iter()
            .take(PREVIEW_CELLS)
            .filter_map(|(title, cell)| {
                cell.text
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map(|t| (title, t))
            });
        for (title, text) in filled {
            writeln!(f, "      └─ {}: {}", title, text)?;
        }
    }

    if group.items.len() > PREVIEW_ITEMS {
        writeln!(
            f,
            "   └─ ... y {} elementos más",
            group.items.len() - PREVIEW_ITEMS
        )?;
    }

    Ok(())
}

pub fn render_summary(summary: &BoardSummary) -> String {
    SummaryReport(summary).to_string()
}
