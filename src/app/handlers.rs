//! Route handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::views::{self, NotFoundKind};
use super::SharedState;
use crate::core::query::{BlogFilter, ProjectFilter};
use crate::core::sections::{SectionBounds, SectionId, SectionTracker};
use crate::core::theme::{ColorScheme, Theme};
use crate::core::toc;
use crate::domain::chat::ChatTurn;
use crate::domain::ports::PreferenceStore;
use crate::utils::error::{PortfolioError, Result};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    category: String,
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        let status = match &self {
            PortfolioError::NotFoundError { .. } => StatusCode::NOT_FOUND,
            PortfolioError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            PortfolioError::ChatUnavailableError { .. } => StatusCode::SERVICE_UNAVAILABLE,
            PortfolioError::ApiError(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            PortfolioError::ApiError(_) | PortfolioError::ExternalServiceError { .. } => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                category = ?self.category(),
                status = status.as_u16(),
                "Request failed"
            );
        }

        let body = ErrorResponse {
            error: self.user_friendly_message(),
            category: format!("{:?}", self.category()),
        };
        (status, Json(body)).into_response()
    }
}

fn not_found_response<S: PreferenceStore>(
    state: &SharedState<S>,
    kind: NotFoundKind,
) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(views::not_found(&state.portfolio, kind)),
    )
        .into_response()
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// GET /
pub async fn home<S: PreferenceStore + 'static>(State(state): State<SharedState<S>>) -> Response {
    Json(views::home(&state.portfolio)).into_response()
}

/// GET /blog?category&tag&page&per_page
pub async fn blog_list<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
    Query(filter): Query<BlogFilter>,
) -> Response {
    Json(views::blog_list(&state.portfolio, filter)).into_response()
}

/// GET /blog/:slug
pub async fn blog_post<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(slug): Path<String>,
) -> Response {
    match views::blog_post(&state.portfolio, &slug) {
        Some(view) => Json(view).into_response(),
        None => {
            tracing::debug!(%slug, "Blog post not found");
            not_found_response(&state, NotFoundKind::Post)
        }
    }
}

/// GET /projects?category&featured
pub async fn project_list<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
    Query(filter): Query<ProjectFilter>,
) -> Response {
    Json(views::project_list(&state.portfolio, filter)).into_response()
}

/// GET /projects/:id
pub async fn project_detail<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
    Path(id): Path<String>,
) -> Response {
    match views::project_detail(&state.portfolio, &id) {
        Some(view) => Json(view).into_response(),
        None => {
            tracing::debug!(%id, "Project not found");
            not_found_response(&state, NotFoundKind::Project)
        }
    }
}

/// GET /resume
pub async fn resume<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Result<Redirect> {
    match state.portfolio.profile().data.resume_link() {
        Some(url) => Ok(Redirect::temporary(url)),
        None => {
            tracing::warn!("Resume URL not available");
            Err(PortfolioError::NotFoundError {
                resource: "Resume".to_string(),
                key: state.portfolio.profile().data.full_name.clone(),
            })
        }
    }
}

/// Fallback for unknown paths
pub async fn not_found<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Response {
    not_found_response(&state, NotFoundKind::Page)
}

// === Chat ===

#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    pub messages: Vec<ChatTurn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ChatStatusResponse {
    pub available: bool,
    pub model: Option<String>,
}

/// GET /api/chat
pub async fn chat_status<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Json<ChatStatusResponse> {
    Json(ChatStatusResponse {
        available: state.chat.is_some(),
        model: state.chat.as_ref().map(|session| session.model().to_string()),
    })
}

/// POST /api/chat
pub async fn chat<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
    Json(payload): Json<ChatPayload>,
) -> Result<Json<ChatResponse>> {
    let session = state
        .chat
        .as_ref()
        .ok_or_else(|| PortfolioError::ChatUnavailableError {
            reason: "chat client not initialized".to_string(),
        })?;

    let turn = session.reply(payload.messages).await?;
    Ok(Json(ChatResponse {
        reply: turn.content,
    }))
}

// === Theme ===

#[derive(Debug, Deserialize)]
pub struct ThemeQuery {
    pub prefers_dark: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct SetThemeRequest {
    pub theme: String,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub system: ColorScheme,
    pub applied: ColorScheme,
}

/// GET /api/theme?prefers_dark=bool
pub async fn get_theme<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
    Query(query): Query<ThemeQuery>,
) -> Json<ThemeResponse> {
    let controller = state.theme.lock().await;
    // 只影響這次回應，其他客戶端的系統偏好不會被覆寫
    let system = query
        .prefers_dark
        .map(ColorScheme::from_prefers_dark)
        .unwrap_or_else(|| controller.system());
    let theme = controller.theme();

    Json(ThemeResponse {
        theme,
        system,
        applied: theme.resolve(system),
    })
}

/// PUT /api/theme
pub async fn set_theme<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
    Json(request): Json<SetThemeRequest>,
) -> Result<Json<ThemeResponse>> {
    let theme: Theme = request.theme.parse()?;
    let mut controller = state.theme.lock().await;
    controller.set(theme).await?;

    Ok(Json(ThemeResponse {
        theme: controller.theme(),
        system: controller.system(),
        applied: controller.applied(),
    }))
}

/// POST /api/theme/cycle
pub async fn cycle_theme<S: PreferenceStore + 'static>(
    State(state): State<SharedState<S>>,
) -> Result<Json<ThemeResponse>> {
    let mut controller = state.theme.lock().await;
    controller.cycle().await?;

    Ok(Json(ThemeResponse {
        theme: controller.theme(),
        system: controller.system(),
        applied: controller.applied(),
    }))
}

// === Scroll tracking ===

#[derive(Debug, Deserialize)]
pub struct ActiveSectionRequest {
    pub scroll_y: f64,
    pub viewport_height: f64,
    /// 目前高亮的區塊，落在區塊之間時沿用
    #[serde(default)]
    pub current: Option<SectionId>,
    pub sections: HashMap<SectionId, SectionBounds>,
}

#[derive(Debug, Serialize)]
pub struct ActiveSectionResponse {
    pub active: SectionId,
}

/// POST /api/sections/active
pub async fn active_section(
    Json(request): Json<ActiveSectionRequest>,
) -> Json<ActiveSectionResponse> {
    let mut tracker = request
        .current
        .map(SectionTracker::starting_at)
        .unwrap_or_default();
    let active = tracker.on_scroll(request.scroll_y, request.viewport_height, |section| {
        request.sections.get(&section).copied()
    });
    Json(ActiveSectionResponse { active })
}

#[derive(Debug, Deserialize)]
pub struct HeadingPosition {
    pub id: String,
    pub top: f64,
}

#[derive(Debug, Deserialize)]
pub struct ActiveHeadingRequest {
    pub headings: Vec<HeadingPosition>,
}

#[derive(Debug, Serialize)]
pub struct ActiveHeadingResponse {
    pub active: Option<String>,
}

/// POST /api/toc/active
pub async fn active_heading(
    Json(request): Json<ActiveHeadingRequest>,
) -> Json<ActiveHeadingResponse> {
    let positions: Vec<(&str, f64)> = request
        .headings
        .iter()
        .map(|h| (h.id.as_str(), h.top))
        .collect();
    Json(ActiveHeadingResponse {
        active: toc::active_heading(&positions).map(str::to_string),
    })
}
