pub mod cli;
pub mod toml_config;

use crate::core::client::{DEFAULT_API_URL, MAX_PAGE_SIZE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_numeric_id, validate_path, validate_range,
    validate_required_field, validate_url, Validate,
};
use std::time::Duration;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fully resolved settings for one board export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub api_url: String,
    pub api_token: Option<String>,
    pub board_id: Option<String>,
    pub output_path: String,
    pub csv_filename: Option<String>,
    pub page_size: usize,
    pub max_items: Option<usize>,
    pub timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            board_id: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            csv_filename: None,
            page_size: MAX_PAGE_SIZE,
            max_items: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ExportConfig {
    /// Copy safe to log: the token is masked.
    pub fn redacted(mut self) -> Self {
        if self.api_token.is_some() {
            self.api_token = Some("***".to_string());
        }
        self
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_url)?;

        let token = validate_required_field("api_token", &self.api_token)?;
        validate_non_empty_string("api_token", token)?;

        let board_id = validate_required_field("board_id", &self.board_id)?;
        validate_numeric_id("board_id", board_id)?;

        validate_path("output_path", &self.output_path)?;
        if let Some(name) = &self.csv_filename {
            validate_path("csv_filename", name)?;
        }

        validate_range("page_size", self.page_size, 1, MAX_PAGE_SIZE)?;
        if let Some(max_items) = self.max_items {
            validate_range("max_items", max_items, 1, usize::MAX)?;
        }
        validate_range("timeout_secs", self.timeout_secs, 1, 3600)?;

        Ok(())
    }
}

// Token and board id are checked by `validate` before a pipeline is built.
impl ConfigProvider for ExportConfig {
    fn api_url(&self) -> &str {
        &self.api_url
    }

    fn api_token(&self) -> &str {
        self.api_token.as_deref().unwrap_or_default()
    }

    fn board_id(&self) -> &str {
        self.board_id.as_deref().unwrap_or_default()
    }

    fn csv_filename(&self) -> Option<&str> {
        self.csv_filename.as_deref()
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn max_items(&self) -> Option<usize> {
        self.max_items
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(feature = "cli")]
pub use cli_args::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli_args {
    use super::{ExportConfig, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS};
    use crate::config::toml_config::TomlConfig;
    use crate::core::client::{DEFAULT_API_URL, MAX_PAGE_SIZE};
    use crate::utils::error::Result;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "board-export")]
    #[command(about = "Export a monday.com board, grouped by board group, to JSON and CSV")]
    pub struct CliConfig {
        #[command(subcommand)]
        pub command: Option<Command>,

        /// TOML config file; replaces the connection and output flags below
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        #[arg(long, env = "MONDAY_API_URL", default_value = DEFAULT_API_URL)]
        pub api_url: String,

        #[arg(long, env = "MONDAY_API_TOKEN", hide_env_values = true)]
        pub api_token: Option<String>,

        #[arg(long, env = "MONDAY_BOARD_ID")]
        pub board_id: Option<String>,

        #[arg(long, env = "BOARD_EXPORT_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
        pub output_path: String,

        /// CSV file name; defaults to one derived from the board name
        #[arg(long)]
        pub csv_filename: Option<String>,

        #[arg(long, default_value_t = MAX_PAGE_SIZE)]
        pub page_size: usize,

        /// Fail instead of exporting when the board holds more items than this
        #[arg(long)]
        pub max_items: Option<usize>,

        #[arg(long, env = "MONDAY_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        pub timeout_secs: u64,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Log as JSON lines")]
        pub log_json: bool,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Fetch the board and write the JSON and CSV files (default)
        Export,
        /// Only list the board's groups
        Groups,
    }

    impl CliConfig {
        pub fn command(&self) -> Command {
            self.command.clone().unwrap_or(Command::Export)
        }

        /// Settings from `--config` when given, otherwise from flags and environment.
        pub fn resolve(&self) -> Result<ExportConfig> {
            match &self.config {
                Some(path) => Ok(TomlConfig::from_file(path)?.into_export_config()),
                None => Ok(ExportConfig {
                    api_url: self.api_url.clone(),
                    api_token: self.api_token.clone(),
                    board_id: self.board_id.clone(),
                    output_path: self.output_path.clone(),
                    csv_filename: self.csv_filename.clone(),
                    page_size: self.page_size,
                    max_items: self.max_items,
                    timeout_secs: self.timeout_secs,
                }),
            }
        }
    }
}
