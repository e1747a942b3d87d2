use crate::core::Storage;
use crate::domain::model::BoardSummary;
use crate::utils::error::{ExportError, Result};
use std::collections::BTreeSet;

/// Leading CSV columns, before the per-board column titles.
pub const FIXED_CSV_FIELDS: [&str; 6] = ["Grupo", "ID", "Nombre", "Estado", "Creado", "Actualizado"];

pub fn json_filename(board_id: &str) -> String {
    format!("monday_board_{}_con_grupos.json", board_id)
}

pub fn default_csv_filename(summary: &BoardSummary) -> String {
    let name = summary.board_info.name.trim();
    let name = if name.is_empty() { "tablero" } else { name };
    let name: String = name
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("monday_{}_con_grupos.csv", name)
}

/// Pretty printed JSON. Non-ASCII text is written as UTF-8, not escaped.
pub fn to_json(summary: &BoardSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// The six fixed fields followed by the sorted titles that carry a value on
/// at least one item. Schema columns no item has a value for are not listed.
pub fn csv_header(summary: &BoardSummary) -> Vec<String> {
    let titles: BTreeSet<&str> = summary
        .items()
        .flat_map(|(_, item)| item.column_data.keys().map(String::as_str))
        .collect();

    let mut header: Vec<String> = FIXED_CSV_FIELDS.iter().map(|f| f.to_string()).collect();
    header.extend(titles.into_iter().map(str::to_string));
    header
}

/// One row per item across all groups. Column cells only carry the
/// human-readable text. `None` when the board has no items.
pub fn to_csv(summary: &BoardSummary) -> Result<Option<String>> {
    if summary.items().next().is_none() {
        return Ok(None);
    }

    let header = csv_header(summary);
    let titles = &header[FIXED_CSV_FIELDS.len()..];

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;

    for (group, item) in summary.items() {
        let mut row: Vec<&str> = vec![
            group.group_title.as_str(),
            item.id.as_str(),
            item.name.as_str(),
            item.state.as_deref().unwrap_or(""),
            item.created_at.as_deref().unwrap_or(""),
            item.updated_at.as_deref().unwrap_or(""),
        ];
        row.extend(titles.iter().map(|title| {
            item.column_data
                .get(title)
                .and_then(|cell| cell.text.as_deref())
                .unwrap_or("")
        }));
        writer.write_record(&row)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| ExportError::IoError(e.into_error()))?;
    Ok(Some(String::from_utf8_lossy(&data).into_owned()))
}

/// Writes the JSON and CSV renditions of a summary through a [`Storage`].
pub struct BoardExporter<S: Storage> {
    storage: S,
}

impl<S: Storage> BoardExporter<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn export_json(&self, summary: &BoardSummary) -> Result<String> {
        let filename = json_filename(&summary.board_info.id);
        let json = to_json(summary)?;

        tracing::debug!("Writing {} ({} bytes)", filename, json.len());
        self.storage.write_file(&filename, json.as_bytes()).await?;
        Ok(self.storage.display_path(&filename))
    }

    /// Returns `None` without writing anything when there are no items.
    pub async fn export_csv(
        &self,
        summary: &BoardSummary,
        filename: Option<&str>,
    ) -> Result<Option<String>> {
        let filename = filename
            .map(str::to_string)
            .unwrap_or_else(|| default_csv_filename(summary));

        let Some(csv) = to_csv(summary)? else {
            tracing::warn!("No items to export, skipping {}", filename);
            return Ok(None);
        };

        tracing::debug!("Writing {} ({} bytes)", filename, csv.len());
        self.storage.write_file(&filename, csv.as_bytes()).await?;
        Ok(Some(self.storage.display_path(&filename)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assembler::assemble;
    use crate::domain::model::{Board, Column, ColumnValue, Group, GroupRef, Item};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn display_path(&self, path: &str) -> String {
            format!("mock/{}", path)
        }
    }

    fn value(id: &str, text: Option<&str>) -> ColumnValue {
        ColumnValue {
            id: id.to_string(),
            column_type: Some("text".to_string()),
            text: text.map(str::to_string),
            value: None,
        }
    }

    fn item(id: &str, group: &str, values: Vec<ColumnValue>) -> Item {
        Item {
            id: id.to_string(),
            name: format!("Tarea {}", id),
            state: Some("active".to_string()),
            created_at: Some("2025-06-01".to_string()),
            updated_at: Some("2025-06-02".to_string()),
            group: Some(GroupRef {
                id: Some(group.to_string()),
                title: None,
            }),
            column_values: values,
        }
    }

    fn sample_board(items: Vec<Item>) -> Board {
        Board {
            id: "9518409013".to_string(),
            name: "Facturas DCM".to_string(),
            description: None,
            state: Some("active".to_string()),
            columns: vec![
                Column {
                    id: "c1".to_string(),
                    title: "Status".to_string(),
                    ..Default::default()
                },
                Column {
                    id: "c2".to_string(),
                    title: "Cliente".to_string(),
                    ..Default::default()
                },
                Column {
                    id: "c3".to_string(),
                    title: "Notas".to_string(),
                    ..Default::default()
                },
            ],
            groups: vec![
                Group {
                    id: "A".to_string(),
                    title: "Pendientes".to_string(),
                    ..Default::default()
                },
                Group {
                    id: "B".to_string(),
                    title: "Hechos".to_string(),
                    ..Default::default()
                },
            ],
            items,
        }
    }

    #[test]
    fn test_filenames() {
        let summary = assemble(&sample_board(vec![]));
        assert_eq!(json_filename("9518409013"), "monday_board_9518409013_con_grupos.json");
        assert_eq!(default_csv_filename(&summary), "monday_Facturas_DCM_con_grupos.csv");

        let mut unnamed = summary.clone();
        unnamed.board_info.name = String::new();
        assert_eq!(default_csv_filename(&unnamed), "monday_tablero_con_grupos.csv");
    }

    #[test]
    fn test_default_csv_filename_strips_path_separators() {
        let mut summary = assemble(&Board::default());
        summary.board_info.name = "a/../../b".to_string();
        let name = default_csv_filename(&summary);

        assert_eq!(name, "monday_a_.._.._b_con_grupos.csv");
        assert_eq!(std::path::Path::new(&name).components().count(), 1);

        summary.board_info.name = r"C:\tmp\x".to_string();
        assert_eq!(default_csv_filename(&summary), "monday_C__tmp_x_con_grupos.csv");
    }

    #[test]
    fn test_csv_header_is_union_of_titles_seen_on_items() {
        let summary = assemble(&sample_board(vec![
            item("1", "A", vec![value("c2", Some("ACME"))]),
            item("2", "B", vec![value("c1", Some("Done")), value("c9", None)]),
        ]));

        // "Notas" is in the schema but no item has it
        assert_eq!(
            csv_header(&summary),
            vec!["Grupo", "ID", "Nombre", "Estado", "Creado", "Actualizado", "Cliente", "Column_c9", "Status"]
        );
    }

    #[test]
    fn test_csv_row_uses_text_only() {
        let summary = assemble(&sample_board(vec![item("1", "A", vec![value("c1", Some("Done"))])]));
        let csv = to_csv(&summary).unwrap().unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(rows.len(), 1);
        let status_index = headers.iter().position(|h| h == "Status").unwrap();
        assert_eq!(&rows[0][status_index], "Done");
        assert_eq!(&rows[0][0], "Pendientes");
        assert_eq!(&rows[0][1], "1");
        assert_eq!(&rows[0][2], "Tarea 1");
    }

    #[test]
    fn test_csv_missing_cells_are_empty() {
        let summary = assemble(&sample_board(vec![
            item("1", "A", vec![value("c1", Some("Done"))]),
            item("2", "B", vec![value("c2", None)]),
        ]));
        let csv = to_csv(&summary).unwrap().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Grupo,ID,Nombre,Estado,Creado,Actualizado,Cliente,Status");
        assert_eq!(lines[1], "Pendientes,1,Tarea 1,active,2025-06-01,2025-06-02,,Done");
        assert_eq!(lines[2], "Hechos,2,Tarea 2,active,2025-06-01,2025-06-02,,");
    }

    #[test]
    fn test_csv_quotes_commas_and_keeps_utf8() {
        let summary = assemble(&sample_board(vec![item(
            "1",
            "A",
            vec![value("c2", Some("Pérez, Año 2025"))],
        )]));
        let csv = to_csv(&summary).unwrap().unwrap();
        assert!(csv.contains("\"Pérez, Año 2025\""));
    }

    #[test]
    fn test_csv_none_without_items() {
        let summary = assemble(&sample_board(vec![]));
        assert!(to_csv(&summary).unwrap().is_none());
    }

    #[test]
    fn test_json_keeps_non_ascii_and_field_order() {
        let mut board = sample_board(vec![item("1", "A", vec![value("c1", Some("Señal ✓"))])]);
        board.description = Some("Facturación".to_string());
        let json = to_json(&assemble(&board)).unwrap();

        assert!(json.contains("Señal ✓"));
        assert!(json.contains("Facturación"));
        assert!(!json.contains("\\u"));

        let board_info = json.find("\"board_info\"").unwrap();
        let columns = json.find("\"columns\"").unwrap();
        let groups = json.find("\"groups\"").unwrap();
        let total_groups = json.find("\"total_groups\"").unwrap();
        assert!(board_info < columns && columns < groups && groups < total_groups);
        assert!(json.starts_with("{\n  \"board_info\""));
    }

    #[tokio::test]
    async fn test_exporter_writes_both_files() {
        let storage = MockStorage::new();
        let exporter = BoardExporter::new(storage.clone());
        let summary = assemble(&sample_board(vec![item("1", "A", vec![value("c1", Some("Done"))])]));

        let json_path = exporter.export_json(&summary).await.unwrap();
        let csv_path = exporter.export_csv(&summary, None).await.unwrap();

        assert_eq!(json_path, "mock/monday_board_9518409013_con_grupos.json");
        assert_eq!(csv_path.as_deref(), Some("mock/monday_Facturas_DCM_con_grupos.csv"));

        let json = storage
            .get_file("monday_board_9518409013_con_grupos.json")
            .await
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed["total_items"], 1);
        assert_eq!(parsed["groups"][0]["items"][0]["column_data"]["Status"]["text"], "Done");
    }

    #[tokio::test]
    async fn test_exporter_custom_csv_name_and_empty_board() {
        let storage = MockStorage::new();
        let exporter = BoardExporter::new(storage.clone());

        let summary = assemble(&sample_board(vec![item("1", "A", vec![])]));
        let path = exporter.export_csv(&summary, Some("salida.csv")).await.unwrap();
        assert_eq!(path.as_deref(), Some("mock/salida.csv"));
        assert!(storage.get_file("salida.csv").await.is_some());

        let empty = assemble(&sample_board(vec![]));
        assert!(exporter.export_csv(&empty, Some("vacio.csv")).await.unwrap().is_none());
        assert!(storage.get_file("vacio.csv").await.is_none());
    }
}
