use crate::config::{ExportConfig, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECS};
use crate::core::client::{DEFAULT_API_URL, MAX_PAGE_SIZE};
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub api: ApiConfig,
    pub board: BoardConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub id: String,
    pub page_size: Option<usize>,
    pub max_items: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub csv_filename: Option<String>,
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExportError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MONDAY_API_TOKEN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn into_export_config(self) -> ExportConfig {
        ExportConfig {
            api_url: self.api.url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_token: self.api.token.filter(|t| !t.starts_with("${")),
            board_id: Some(self.board.id),
            output_path: self
                .output
                .path
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            csv_filename: self.output.csv_filename,
            page_size: self.board.page_size.unwrap_or(MAX_PAGE_SIZE),
            max_items: self.board.max_items,
            timeout_secs: self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_export_config().validate()
    }
}
