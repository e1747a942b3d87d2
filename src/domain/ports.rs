use crate::domain::model::{Board, BoardSummary, ExportOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location a written file ends up at, for reporting.
    fn display_path(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn api_url(&self) -> &str;
    fn api_token(&self) -> &str;
    fn board_id(&self) -> &str;
    fn csv_filename(&self) -> Option<&str>;
    fn page_size(&self) -> usize;
    fn max_items(&self) -> Option<usize>;
    fn timeout(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Board>;
    async fn transform(&self, board: Board) -> Result<BoardSummary>;
    async fn load(&self, summary: BoardSummary) -> Result<ExportOutcome>;
}
