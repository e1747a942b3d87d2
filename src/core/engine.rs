use crate::core::Pipeline;
use crate::domain::model::ExportOutcome;
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ExportOutcome> {
        tracing::info!("Starting board export...");

        // Extract
        let board = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched board '{}': {} columns, {} groups, {} items",
            board.name,
            board.columns.len(),
            board.groups.len(),
            board.items.len()
        );

        // Transform
        let summary = self.pipeline.transform(board).await?;
        tracing::info!(
            "Assembled {} items into {} non-empty groups",
            summary.total_items,
            summary.total_groups
        );

        // Load
        let outcome = self.pipeline.load(summary).await?;
        tracing::info!("JSON saved to: {}", outcome.json_path);
        match &outcome.csv_path {
            Some(path) => tracing::info!("CSV saved to: {}", path),
            None => tracing::info!("CSV skipped, board has no items"),
        }

        Ok(outcome)
    }
}
