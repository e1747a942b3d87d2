pub mod assembler;
pub mod board_pipeline;
pub mod client;
pub mod engine;
pub mod export;
pub mod report;
pub mod sync;

pub use crate::domain::model::{Board, BoardSummary, ExportOutcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
