use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use jobmatch_core::{MatchError, Posting, Recommendation, Recommender};
use jobmatch_sources::{load_postings, load_resume_text, Settings};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct RecommendRequest {
    pub resume_text: String,
    pub top_k: Option<usize>,
    pub min_similarity: Option<f64>,
}

#[derive(Deserialize)]
pub struct UploadParams {
    pub filename: Option<String>,
    pub top_k: Option<usize>,
    pub min_similarity: Option<f64>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<RecommendationHit>,
}

#[derive(Serialize)]
pub struct RecommendationHit {
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub similarity: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub description: String,
    pub skills: String,
}

impl From<Recommendation<'_>> for RecommendationHit {
    fn from(rec: Recommendation<'_>) -> Self {
        let similarity = rec.rounded_similarity();
        let job = rec.posting;
        Self {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            similarity,
            matched_skills: rec.matched_skills,
            missing_skills: rec.missing_skills,
            description: job.description.clone(),
            skills: job.skills.clone(),
        }
    }
}

/// Engine errors rendered as JSON.
pub struct ApiError(MatchError);

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self { Self(err) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            MatchError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            MatchError::State(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STATE_ERROR"),
            MatchError::Data(_) => (StatusCode::UNPROCESSABLE_ENTITY, "DATA_ERROR"),
        };
        tracing::warn!(error = %self.0, "request failed");
        (status, Json(serde_json::json!({ "error": { "code": code, "message": self.0.to_string() } }))).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Swapped whole on rebuild; readers clone the inner `Arc` and never see a half-built engine.
    pub recommender: Arc<RwLock<Arc<Recommender>>>,
    pub settings: Arc<Settings>,
    pub admin_token: Option<String>,
}

impl AppState {
    pub fn new(recommender: Recommender, settings: Settings, admin_token: Option<String>) -> Self {
        Self {
            recommender: Arc::new(RwLock::new(Arc::new(recommender))),
            settings: Arc::new(settings),
            admin_token,
        }
    }

    pub fn current(&self) -> Arc<Recommender> { self.recommender.read().clone() }
}

pub fn build_app(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/jobs", get(jobs_handler))
        .route("/recommend", post(recommend_handler))
        .route("/recommend/upload", post(upload_handler))
        .route("/index/rebuild", post(rebuild_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn jobs_handler(State(state): State<AppState>) -> Json<Vec<Posting>> {
    Json(state.current().postings().to_vec())
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    Ok(Json(run(&state, req.resume_text, req.top_k, req.min_similarity).await?))
}

pub async fn upload_handler(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    body: Bytes,
) -> Result<Json<RecommendResponse>, ApiError> {
    let text = load_resume_text(&body, params.filename.as_deref())?;
    Ok(Json(run(&state, text, params.top_k, params.min_similarity).await?))
}

/// Ranking is CPU-bound, so it runs on the blocking pool against a snapshot of the engine.
async fn run(state: &AppState, resume_text: String, top_k: Option<usize>, min_similarity: Option<f64>) -> Result<RecommendResponse, MatchError> {
    let engine = state.current();
    blocking(move || {
        let start = std::time::Instant::now();
        let results: Vec<RecommendationHit> = engine
            .recommend(&resume_text, top_k, min_similarity)?
            .into_iter()
            .map(RecommendationHit::from)
            .collect();
        Ok(RecommendResponse { took_s: start.elapsed().as_secs_f64(), total_hits: results.len(), results })
    })
    .await
}

async fn blocking<T, F>(f: F) -> Result<T, MatchError>
where
    F: FnOnce() -> Result<T, MatchError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| MatchError::State(format!("worker task failed: {e}")))?
}

async fn rebuild_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<serde_json::Value>, Response> {
    authorize(&state, &headers).map_err(IntoResponse::into_response)?;
    let postings = load_postings(&state.settings).await.map_err(|e| ApiError(e).into_response())?;
    let config = state.settings.recommender;
    let fresh = blocking(move || Ok(Recommender::new(postings, config)))
        .await
        .map_err(|e| ApiError(e).into_response())?;
    let num_postings = fresh.postings().len();
    *state.recommender.write() = Arc::new(fresh);
    tracing::info!(num_postings, "corpus rebuilt");
    Ok(Json(serde_json::json!({ "num_postings": num_postings })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
