use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{
    ErrorResponse, FindRecommendationsRequest, HealthResponse, HistoryQuery, HistoryResponse,
    InvalidateResponse, JobPosting, RankRequest, RecommendationsResponse, SeniorPreferenceProfile,
};
use crate::services::{BackendClient, BackendError, CacheKey, CacheManager, PostgresClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub cache: Arc<CacheManager>,
    /// Recommendation log; `None` when no database is configured
    pub postgres: Option<Arc<PostgresClient>>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

/// Configure all recommendation-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations/find", web::post().to(find_recommendations))
        .route("/recommendations/rank", web::post().to(rank_postings))
        .route("/recommendations/history", web::get().to(recommendation_history))
        .route("/cache/invalidate", web::post().to(invalidate_cache));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = match &state.postgres {
        Some(pg) => pg.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.stats(),
    })
}

/// Postings snapshot, served from cache when fresh
async fn load_postings(state: &AppState) -> Result<Vec<JobPosting>, BackendError> {
    let key = CacheKey::postings();

    if let Ok(postings) = state.cache.get::<Vec<JobPosting>>(&key).await {
        return Ok(postings);
    }

    let postings = state.backend.list_postings().await?;

    if let Err(e) = state.cache.set(&key, &postings).await {
        tracing::warn!("Failed to cache postings: {}", e);
    }

    Ok(postings)
}

/// Find recommendations endpoint
///
/// POST /api/v1/recommendations/find
///
/// Request body:
/// ```json
/// {
///   "seniorId": "string",
///   "limit": 20
/// }
/// ```
async fn find_recommendations(
    state: web::Data<AppState>,
    req: web::Json<FindRecommendationsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let senior_id = &req.senior_id;
    let limit = state.matching.resolve_limit(req.limit);

    tracing::info!("Finding recommendations for senior: {}, limit: {}", senior_id, limit);

    let profile = match state.backend.get_profile(senior_id).await {
        Ok(profile) => profile,
        Err(BackendError::NotFound(msg)) => {
            tracing::warn!("{}, ranking with an empty profile", msg);
            SeniorPreferenceProfile::default()
        }
        Err(e) => {
            tracing::error!("Failed to fetch profile for {}: {}", senior_id, e);
            return error_response(
                actix_web::http::StatusCode::BAD_GATEWAY,
                "Failed to fetch senior profile",
                e.to_string(),
            );
        }
    };

    let cache_key = CacheKey::recommendations(senior_id, &profile, limit);
    if let Ok(cached) = state.cache.get::<RecommendationsResponse>(&cache_key).await {
        tracing::debug!("Serving cached recommendations for {}", senior_id);
        return HttpResponse::Ok().json(cached);
    }

    let postings = match load_postings(&state).await {
        Ok(postings) => postings,
        Err(e) => {
            tracing::error!("Failed to fetch postings: {}", e);
            return error_response(
                actix_web::http::StatusCode::BAD_GATEWAY,
                "Failed to fetch job postings",
                e.to_string(),
            );
        }
    };

    let result = state.matcher.find_recommendations(&profile, &postings, limit);

    if let Some(pg) = &state.postgres {
        if let Err(e) = pg.record_recommendations(senior_id, &result.recommendations).await {
            tracing::warn!("Failed to log recommendations for {}: {}", senior_id, e);
        }
    }

    let response = RecommendationsResponse {
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
        eligible_candidates: result.eligible_candidates,
    };

    if let Err(e) = state.cache.set(&cache_key, &response).await {
        tracing::warn!("Failed to cache recommendations: {}", e);
    }

    tracing::info!(
        "Returning {} recommendations for senior {} (from {} postings, {} approved)",
        response.recommendations.len(),
        senior_id,
        response.total_candidates,
        response.eligible_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Rank caller-supplied postings
///
/// POST /api/v1/recommendations/rank
///
/// Request body:
/// ```json
/// {
///   "profile": { "preferredLocation": "서울 강남구", ... },
///   "postings": [ { "id": "job_001", ... } ],
///   "limit": 20
/// }
/// ```
async fn rank_postings(
    state: web::Data<AppState>,
    req: web::Json<RankRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let limit = state.matching.resolve_limit(req.limit);
    let result = state.matcher.find_recommendations(&req.profile, &req.postings, limit);

    tracing::debug!(
        "Ranked {} supplied postings, returning {}",
        result.total_candidates,
        result.recommendations.len()
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        recommendations: result.recommendations,
        total_candidates: result.total_candidates,
        eligible_candidates: result.eligible_candidates,
    })
}

/// Get logged recommendations for a senior
///
/// GET /api/v1/recommendations/history?seniorId={seniorId}&limit={limit}
async fn recommendation_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "Validation failed",
            errors.to_string(),
        );
    }

    let Some(pg) = &state.postgres else {
        return error_response(
            actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
            "Recommendation log disabled",
            "No database is configured".to_string(),
        );
    };

    match pg.get_history(&query.senior_id, query.limit as usize).await {
        Ok(records) => HttpResponse::Ok().json(HistoryResponse {
            senior_id: query.senior_id.clone(),
            count: records.len(),
            recommendations: records,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch history for {}: {}", query.senior_id, e);
            error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch recommendation history",
                e.to_string(),
            )
        }
    }
}

/// Drop cached postings and recommendations
///
/// POST /api/v1/cache/invalidate
///
/// Called after a posting is created, approved or rejected so the next
/// request sees the new snapshot.
async fn invalidate_cache(state: web::Data<AppState>) -> impl Responder {
    for pattern in [CacheKey::POSTINGS_PATTERN, CacheKey::RECOMMENDATIONS_PATTERN] {
        if let Err(e) = state.cache.invalidate_pattern(pattern).await {
            tracing::error!("Failed to invalidate {}: {}", pattern, e);
            return error_response(
                actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to invalidate cache",
                e.to_string(),
            );
        }
    }

    tracing::info!("Cache invalidated");
    HttpResponse::Ok().json(InvalidateResponse { success: true })
}
