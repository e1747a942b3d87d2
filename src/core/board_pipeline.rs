use crate::core::assembler::assemble;
use crate::core::client::MondayClient;
use crate::core::export::BoardExporter;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{Board, BoardSummary, ExportOutcome};
use crate::utils::error::{ExportError, Result};

/// Fetch → assemble → export for one board.
pub struct BoardPipeline<S: Storage, C: ConfigProvider> {
    exporter: BoardExporter<S>,
    config: C,
    client: MondayClient,
}

impl<S: Storage, C: ConfigProvider> BoardPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = MondayClient::new(config.api_url(), config.api_token(), config.timeout())?;
        Ok(Self {
            exporter: BoardExporter::new(storage),
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BoardPipeline<S, C> {
    async fn extract(&self) -> Result<Board> {
        let board_id = self.config.board_id();
        tracing::debug!(
            "Fetching board {} (page size {}, max items {:?})",
            board_id,
            self.config.page_size(),
            self.config.max_items()
        );

        self.client
            .fetch_board(board_id, self.config.page_size(), self.config.max_items())
            .await?
            .ok_or_else(|| ExportError::BoardNotFound {
                board_id: board_id.to_string(),
            })
    }

    async fn transform(&self, board: Board) -> Result<BoardSummary> {
        Ok(assemble(&board))
    }

    async fn load(&self, summary: BoardSummary) -> Result<ExportOutcome> {
        let json_path = self.exporter.export_json(&summary).await?;
        let csv_path = self
            .exporter
            .export_csv(&summary, self.config.csv_filename())
            .await?;

        Ok(ExportOutcome {
            json_path,
            csv_path,
            summary,
        })
    }
}
