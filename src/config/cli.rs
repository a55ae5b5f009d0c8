use crate::config::toml_config::SiteConfig;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_socket_addr, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "portfolio")]
#[command(about = "Serves the portfolio site and its chat assistant")]
pub struct CliConfig {
    #[arg(long, default_value = "portfolio.toml", help = "Site configuration file")]
    pub config: String,

    #[arg(long, help = "Override server.bind_address")]
    pub bind: Option<String>,

    #[arg(long, help = "Override content.path")]
    pub content: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Validate configuration and content, then exit")]
    pub check: bool,
}

impl CliConfig {
    /// 命令列參數優先於設定檔
    pub fn apply_overrides(&self, site: &mut SiteConfig) {
        if let Some(bind) = &self.bind {
            site.server.bind_address = bind.clone();
        }
        if let Some(content) = &self.content {
            site.content.path = Some(content.clone());
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;
        if let Some(bind) = &self.bind {
            validate_socket_addr("bind", bind)?;
        }
        if let Some(content) = &self.content {
            validate_path("content", content)?;
        }
        Ok(())
    }
}
