use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::signal;

use crate::{
    app::{AppError, QueryService},
    config::Config,
    query::PostfixNode,
};

#[derive(Clone)]
struct SharedState {
    service: QueryService,
}

pub fn router(service: QueryService) -> Router {
    let shared_state = Arc::new(SharedState { service });

    Router::new()
        .route("/api/query/translate", post(translate))
        .route("/api/query/postfix", post(postfix))
        .route("/api/config", get(get_config))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(shared_state)
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        log::error!("failed to install Ctrl+C handler: {err}");
        std::future::pending::<()>().await;
    }
    log::warn!("shutting down");
}

async fn start_app(service: QueryService, addr: String) -> anyhow::Result<()> {
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Serve the translation API until Ctrl+C. `addr` overrides `listen_addr`.
pub fn start_daemon(config: Config, addr: Option<String>) -> anyhow::Result<()> {
    let addr = addr.unwrap_or_else(|| config.listen_addr.clone());
    let service = QueryService::new(config);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async { start_app(service, addr).await })
}

#[derive(Debug)]
struct HttpError(AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = if self.0.is_bad_input() {
            axum::http::StatusCode::BAD_REQUEST
        } else {
            log::error!("{self:?}");
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({"error": self.0.to_string()}))).into_response()
    }
}

impl<E> From<E> for HttpError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslateRequest {
    pub query: String,

    /// Overrides the configured default field.
    #[serde(default)]
    pub field: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub query: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostfixRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostfixResponse {
    pub postfix: Vec<PostfixNode>,
}

async fn translate(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, HttpError> {
    log::debug!("payload: {payload:?}");

    let query = state
        .service
        .translate(&payload.query, payload.field.as_deref())?;
    Ok(Json(TranslateResponse { query }))
}

async fn postfix(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<PostfixRequest>,
) -> Result<Json<PostfixResponse>, HttpError> {
    log::debug!("payload: {payload:?}");

    let postfix = state.service.postfix(&payload.query)?;
    Ok(Json(PostfixResponse { postfix }))
}

async fn get_config(State(state): State<Arc<SharedState>>) -> Json<Config> {
    Json(state.service.config().clone())
}
