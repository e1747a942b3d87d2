pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig, ExportConfig};

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};

pub use crate::core::{
    assembler::assemble, board_pipeline::BoardPipeline, client::MondayClient,
    engine::ExportEngine, sync::SyncTrigger,
};
pub use crate::utils::error::{ExportError, Result, SyncError};
