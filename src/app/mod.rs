//! HTTP surface: shared state, routing and JSON views.
//!
//! Routes:
//! - `/`, `/blog`, `/blog/:slug`, `/projects`, `/projects/:id` page views
//! - `/api/chat` visitor chat assistant
//! - `/api/theme`, `/api/theme/cycle` theme preference
//! - `/api/sections/active`, `/api/toc/active` scroll tracking
//! - `/resume`, `/health`

pub mod handlers;
pub mod views;

use crate::core::assistant::ChatSession;
use crate::core::query::Portfolio;
use crate::core::theme::{ColorScheme, ThemeController};
use crate::data::ContentStore;
use crate::domain::ports::PreferenceStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// State shared across handlers. Content is read-only; the theme controller
/// is the only mutable piece.
pub struct AppState<S: PreferenceStore> {
    pub portfolio: Portfolio,
    pub chat: Option<ChatSession>,
    pub theme: Mutex<ThemeController<S>>,
}

pub type SharedState<S> = Arc<AppState<S>>;

impl<S: PreferenceStore> AppState<S> {
    /// 啟動時讀取儲存的主題；系統偏好在收到客戶端回報前視為淺色
    pub async fn new(store: Arc<ContentStore>, chat: Option<ChatSession>, preferences: S) -> Self {
        let theme = ThemeController::load(preferences, ColorScheme::default()).await;
        Self {
            portfolio: Portfolio::new(store),
            chat,
            theme: Mutex::new(theme),
        }
    }
}

/// Create the site router
pub fn create_router<S>(state: SharedState<S>, static_dir: Option<&str>) -> Router
where
    S: PreferenceStore + 'static,
{
    let router = Router::new()
        // Pages
        .route("/", get(handlers::home::<S>))
        .route("/blog", get(handlers::blog_list::<S>))
        .route("/blog/:slug", get(handlers::blog_post::<S>))
        .route("/projects", get(handlers::project_list::<S>))
        .route("/projects/:id", get(handlers::project_detail::<S>))
        .route("/resume", get(handlers::resume::<S>))
        // API endpoints
        .route(
            "/api/chat",
            get(handlers::chat_status::<S>).post(handlers::chat::<S>),
        )
        .route(
            "/api/theme",
            get(handlers::get_theme::<S>).put(handlers::set_theme::<S>),
        )
        .route("/api/theme/cycle", post(handlers::cycle_theme::<S>))
        .route("/api/sections/active", post(handlers::active_section))
        .route("/api/toc/active", post(handlers::active_heading))
        // Health check
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found::<S>);

    let router = match static_dir {
        Some(dir) => {
            tracing::info!(dir, "Serving static assets under /static");
            router.nest_service("/static", ServeDir::new(dir))
        }
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}
