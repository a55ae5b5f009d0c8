use crate::adapters::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_socket_addr, validate_url,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Environment variables consulted, in order, when `chat.api_key` is unset.
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub chat: ChatConfig,
    pub preferences: PreferencesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    /// 前端建置輸出目錄，掛在 `/static`
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub enabled: bool,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    pub path: String,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: "./.portfolio/preferences.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"))
}

/// 設定值為空或仍是未替換的 `${VAR}` 時，依序改查環境變數
fn resolve_api_key<F>(configured: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .filter(|key| !key.trim().is_empty() && !env_var_pattern().is_match(key))
        .map(str::to_string)
        .or_else(|| {
            API_KEY_ENV_VARS
                .iter()
                .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
        })
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PortfolioError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Reads `path` if it exists; a missing file means "all defaults".
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            tracing::info!(path = %path.display(), "Loading site configuration");
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// 替換環境變數 (例如 ${GEMINI_API_KEY})；未定義的變數保留原文
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_socket_addr("server.bind_address", &self.server.bind_address)?;

        if let Some(dir) = &self.server.static_dir {
            validate_path("server.static_dir", dir)?;
        }
        if let Some(path) = &self.content.path {
            validate_path("content.path", path)?;
        }
        validate_path("preferences.path", &self.preferences.path)?;

        if self.chat.enabled {
            validate_non_empty_string("chat.model", &self.chat.model)?;
            validate_url("chat.base_url", &self.chat.base_url)?;
            validate_range("chat.timeout_seconds", self.chat.timeout_seconds, 1, 300)?;
        }

        Ok(())
    }
}

impl ConfigProvider for SiteConfig {
    fn bind_address(&self) -> &str {
        &self.server.bind_address
    }

    fn content_path(&self) -> Option<&str> {
        self.content.path.as_deref()
    }

    fn preferences_path(&self) -> &str {
        &self.preferences.path
    }

    fn chat_enabled(&self) -> bool {
        self.chat.enabled
    }

    fn chat_model(&self) -> &str {
        &self.chat.model
    }

    fn chat_base_url(&self) -> &str {
        &self.chat.base_url
    }

    fn chat_timeout_seconds(&self) -> u64 {
        self.chat.timeout_seconds
    }

    fn api_key(&self) -> Option<String> {
        resolve_api_key(self.chat.api_key.as_deref(), |name| std::env::var(name).ok())
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
