use crate::domain::model::{
    Board, BoardInfo, BoardSummary, ColumnCell, FormattedItem, Group, GroupSummary, Item,
};
use std::collections::{BTreeMap, HashMap};

pub const UNGROUPED_ID: &str = "sin_grupo";
pub const UNGROUPED_TITLE: &str = "Sin Grupo";
pub const UNGROUPED_COLOR: &str = "#808080";

/// Label used for a column value whose column id is not in the board schema.
pub fn fallback_column_title(column_id: &str) -> String {
    format!("Column_{}", column_id)
}

struct Bucket<'a> {
    id: &'a str,
    title: &'a str,
    color: Option<&'a str>,
    items: Vec<FormattedItem>,
}

/// Groups a board's flat item list by group and re-keys every item's column
/// values by column title.
///
/// Items whose group reference is missing or points at an unknown group land
/// in the synthesized `sin_grupo` bucket. Buckets that end up empty, the
/// ungrouped one included, are left out of the summary.
pub fn assemble(board: &Board) -> BoardSummary {
    let column_mapping: BTreeMap<String, String> = board
        .columns
        .iter()
        .map(|c| (c.id.clone(), c.title.clone()))
        .collect();

    let group_index: HashMap<&str, usize> = board
        .groups
        .iter()
        .enumerate()
        .map(|(i, g)| (g.id.as_str(), i))
        .collect();

    let existing_ungrouped = group_index.get(UNGROUPED_ID).copied();
    let mut buckets: Vec<Bucket> = board.groups.iter().map(bucket_for).collect();
    let mut ungrouped = Bucket {
        id: UNGROUPED_ID,
        title: UNGROUPED_TITLE,
        color: Some(UNGROUPED_COLOR),
        items: Vec::new(),
    };

    for item in &board.items {
        let formatted = format_item(item, &column_mapping);
        let target = item
            .group
            .as_ref()
            .and_then(|g| g.id.as_deref())
            .and_then(|id| group_index.get(id).copied());

        // a real group already using the ungrouped id takes the stray items
        match target.or(existing_ungrouped) {
            Some(index) => buckets[index].items.push(formatted),
            None => {
                tracing::debug!("Item {} has no known group, using '{}'", item.id, UNGROUPED_ID);
                ungrouped.items.push(formatted);
            }
        }
    }

    buckets.push(ungrouped);

    let groups: Vec<GroupSummary> = buckets
        .into_iter()
        .filter(|b| !b.items.is_empty())
        .map(|b| GroupSummary {
            group_id: b.id.to_string(),
            group_title: b.title.to_string(),
            group_color: b.color.map(str::to_string),
            items_count: b.items.len(),
            items: b.items,
        })
        .collect();

    BoardSummary {
        board_info: BoardInfo {
            id: board.id.clone(),
            name: board.name.clone(),
            description: board.description.clone(),
            state: board.state.clone(),
        },
        columns: board.columns.clone(),
        column_mapping,
        total_items: board.items.len(),
        total_groups: groups.len(),
        groups,
    }
}

fn bucket_for(group: &Group) -> Bucket<'_> {
    Bucket {
        id: &group.id,
        title: &group.title,
        color: group.color.as_deref(),
        items: Vec::new(),
    }
}

fn format_item(item: &Item, column_mapping: &BTreeMap<String, String>) -> FormattedItem {
    let mut column_data = BTreeMap::new();

    for value in &item.column_values {
        let title = column_mapping
            .get(&value.id)
            .cloned()
            .unwrap_or_else(|| fallback_column_title(&value.id));

        // 標題重複時，後面的值覆蓋前面的
        column_data.insert(
            title,
            ColumnCell {
                column_id: value.id.clone(),
                column_type: value.column_type.clone(),
                text: value.text.clone(),
                raw_value: value.value.clone(),
            },
        );
    }

    FormattedItem {
        id: item.id.clone(),
        name: item.name.clone(),
        state: item.state.clone(),
        created_at: item.created_at.clone(),
        updated_at: item.updated_at.clone(),
        group_info: item.group.clone().unwrap_or_default(),
        column_data,
    }
}
