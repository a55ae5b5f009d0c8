use clap::Parser;
use portfolio_site::adapters::storage::FilePreferenceStore;
use portfolio_site::app::{create_router, AppState};
use portfolio_site::config::{CliConfig, LogFormat, SiteConfig};
use portfolio_site::core::assistant::create_chat_session;
use portfolio_site::domain::ports::ConfigProvider;
use portfolio_site::utils::{logger, validation::Validate};
use portfolio_site::{ContentStore, PortfolioError};
use std::sync::Arc;

fn exit_code(e: &PortfolioError) -> i32 {
    match e.exit_code() {
        0 => 1,
        code => code,
    }
}

/// 日誌尚未初始化，只能寫到 stderr
fn exit_before_logging(e: &PortfolioError) -> ! {
    eprintln!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

/// 啟動階段的錯誤一律結束程式，結束碼依嚴重程度決定
fn exit_with(e: &PortfolioError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定檔決定日誌格式，因此先載入設定再初始化日誌
    let mut site = SiteConfig::load(&cli.config).unwrap_or_else(|e| exit_before_logging(&e));
    cli.apply_overrides(&mut site);

    match site.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting portfolio site");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = cli.validate().and_then(|_| site.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let content =
        Arc::new(ContentStore::load(site.content_path()).unwrap_or_else(|e| exit_with(&e)));

    if cli.check {
        tracing::info!("✅ Configuration and content are valid");
        println!("✅ Configuration and content are valid");
        return Ok(());
    }

    let chat = create_chat_session(&site, &content);
    if chat.is_none() {
        tracing::warn!("Chat assistant unavailable; /api/chat will answer 503");
    }

    let preferences = FilePreferenceStore::new(site.preferences_path());
    let state = Arc::new(AppState::new(content, chat, preferences).await);
    let app = create_router(state, site.server.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(site.bind_address()).await?;
    tracing::info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
