use crate::domain::model::{null_as_default, Board, Column, Group, Item};
use crate::utils::error::{ExportError, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.monday.com/v2";

/// monday.com rejects `items_page` limits above this.
pub const MAX_PAGE_SIZE: usize = 500;

const GROUPS_QUERY: &str = r#"
query ($board_id: [ID!]) {
    boards(ids: $board_id) {
        groups {
            id
            title
            color
            position
        }
    }
}
"#;

const BOARD_QUERY: &str = r#"
query ($board_id: [ID!], $limit: Int!) {
    boards(ids: $board_id) {
        id
        name
        description
        state
        columns {
            id
            title
            type
            settings_str
        }
        groups {
            id
            title
            color
            position
        }
        items_page(limit: $limit) {
            cursor
            items {
                id
                name
                state
                created_at
                updated_at
                group {
                    id
                    title
                }
                column_values {
                    id
                    type
                    text
                    value
                }
            }
        }
    }
}
"#;

const NEXT_ITEMS_QUERY: &str = r#"
query ($cursor: String!, $limit: Int!) {
    next_items_page(cursor: $cursor, limit: $limit) {
        cursor
        items {
            id
            name
            state
            created_at
            updated_at
            group {
                id
                title
            }
            column_values {
                id
                type
                text
                value
            }
        }
    }
}
"#;

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Value>,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<GraphQlErrorEntry>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

#[derive(Deserialize)]
struct BoardsData<B> {
    #[serde(default = "Vec::new")]
    boards: Vec<B>,
}

#[derive(Deserialize)]
struct GroupsOnly {
    #[serde(default, deserialize_with = "null_as_default")]
    groups: Vec<Group>,
}

#[derive(Deserialize)]
struct RawBoard {
    id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    columns: Vec<Column>,
    #[serde(default, deserialize_with = "null_as_default")]
    groups: Vec<Group>,
    #[serde(default, deserialize_with = "null_as_default")]
    items_page: ItemsPage,
}

#[derive(Deserialize, Default)]
struct ItemsPage {
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    items: Vec<Item>,
}

impl ItemsPage {
    fn next_cursor(&mut self) -> Option<String> {
        self.cursor.take().filter(|c| !c.is_empty())
    }
}

#[derive(Deserialize)]
struct NextPageData {
    #[serde(default, deserialize_with = "null_as_default")]
    next_items_page: ItemsPage,
}

/// Thin client over the monday.com GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct MondayClient {
    client: Client,
    api_url: String,
    api_token: String,
}

impl MondayClient {
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_token: api_token.into(),
        })
    }

    /// Sends one query and returns the parsed response body as-is.
    pub async fn execute_query(&self, query: &str, variables: Option<Value>) -> Result<Value> {
        tracing::debug!("POST {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .header(AUTHORIZATION, &self.api_token)
            .header(CONTENT_TYPE, "application/json")
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExportError::Request {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Runs a query and unwraps the `{data, errors}` envelope into `T`.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: Option<Value>) -> Result<T> {
        let raw = self.execute_query(query, variables).await?;
        let envelope: GraphQlResponse<T> = serde_json::from_value(raw)?;

        let mut messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        messages.extend(envelope.error_message);
        if !messages.is_empty() {
            return Err(ExportError::GraphQl { messages });
        }

        envelope.data.ok_or_else(|| ExportError::DataShape {
            message: "response has no data field".to_string(),
        })
    }

    /// Groups of a board; empty when the board does not exist.
    pub async fn fetch_groups(&self, board_id: &str) -> Result<Vec<Group>> {
        let data: BoardsData<GroupsOnly> = self
            .query(GROUPS_QUERY, Some(json!({ "board_id": [board_id] })))
            .await?;

        Ok(data
            .boards
            .into_iter()
            .next()
            .map(|board| board.groups)
            .unwrap_or_default())
    }

    /// Fetches columns, groups and every item of a board, following the
    /// items cursor until it runs out. `None` when the board does not exist.
    ///
    /// With `max_items` set, a board holding more items than that fails with
    /// [`ExportError::Truncated`] instead of being cut short.
    pub async fn fetch_board(
        &self,
        board_id: &str,
        page_size: usize,
        max_items: Option<usize>,
    ) -> Result<Option<Board>> {
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let data: BoardsData<RawBoard> = self
            .query(
                BOARD_QUERY,
                Some(json!({ "board_id": [board_id], "limit": page_size })),
            )
            .await?;

        let Some(mut raw) = data.boards.into_iter().next() else {
            return Ok(None);
        };

        let mut cursor = raw.items_page.next_cursor();
        let mut items = std::mem::take(&mut raw.items_page.items);
        check_item_cap(items.len(), max_items)?;

        let mut pages = 1;
        while let Some(current) = cursor {
            let mut next: NextPageData = self
                .query(
                    NEXT_ITEMS_QUERY,
                    Some(json!({ "cursor": current, "limit": page_size })),
                )
                .await?;

            pages += 1;
            cursor = next.next_items_page.next_cursor();
            items.append(&mut next.next_items_page.items);
            check_item_cap(items.len(), max_items)?;
        }

        tracing::debug!("Fetched {} items in {} page(s)", items.len(), pages);

        Ok(Some(Board {
            id: raw.id,
            name: raw.name,
            description: raw.description,
            state: raw.state,
            columns: raw.columns,
            groups: raw.groups,
            items,
        }))
    }
}

fn check_item_cap(fetched: usize, max_items: Option<usize>) -> Result<()> {
    match max_items {
        Some(limit) if fetched > limit => Err(ExportError::Truncated { limit }),
        _ => Ok(()),
    }
}
