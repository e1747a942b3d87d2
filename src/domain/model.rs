use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// GraphQL sends `null` for empty lists and strings; treat it like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Column {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "type", default)]
    pub column_type: Option<String>,
    #[serde(default)]
    pub settings_str: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// The group reference carried by an item. Either side may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ColumnValue {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub column_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Raw JSON-encoded value as returned by the API.
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub group: Option<GroupRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_values: Vec<ColumnValue>,
}

/// Read-only snapshot of a board. Items are flat, as the API returns them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub state: Option<String>,
    pub columns: Vec<Column>,
    pub groups: Vec<Group>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BoardInfo {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnCell {
    pub column_id: String,
    #[serde(rename = "type")]
    pub column_type: Option<String>,
    pub text: Option<String>,
    pub raw_value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedItem {
    pub id: String,
    pub name: String,
    pub state: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub group_info: GroupRef,
    /// Keyed by column title. Duplicate titles keep the last value seen.
    pub column_data: BTreeMap<String, ColumnCell>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupSummary {
    pub group_id: String,
    pub group_title: String,
    pub group_color: Option<String>,
    pub items_count: usize,
    pub items: Vec<FormattedItem>,
}

/// Output of the assembler, serialized verbatim by the JSON exporter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardSummary {
    pub board_info: BoardInfo,
    pub columns: Vec<Column>,
    pub column_mapping: BTreeMap<String, String>,
    pub groups: Vec<GroupSummary>,
    pub total_items: usize,
    pub total_groups: usize,
}

impl BoardSummary {
    pub fn items(&self) -> impl Iterator<Item = (&GroupSummary, &FormattedItem)> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter().map(move |item| (group, item)))
    }
}

/// Paths of the files written by one export run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    pub json_path: String,
    pub csv_path: Option<String>,
    pub summary: BoardSummary,
}
