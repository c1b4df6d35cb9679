use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::SizeEngine;
use crate::models::{
    ErrorResponse, GetRecommendationQuery, HealthResponse, RecommendRequest,
    RecommendationResponse, SaveRecommendationRequest, SizeLabel,
};
use crate::services::{RecommendationStore, StoreError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecommendationStore>,
    pub engine: SizeEngine,
}

/// Configure all size-recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/size/recommend", web::post().to(recommend))
        .route("/size/save", web::post().to(save_recommendation))
        .route("/size/get", web::get().to(get_recommendation));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Compute a size recommendation
///
/// POST /api/v1/size/recommend
///
/// Request body:
/// ```json
/// {
///   "measurements": { "bust": 95, "waist": "78", "hip": 103, "height": 168, "weight": 62 },
///   "fitPreference": { "general": "regular", "perRegion": { "waist": "loose" } }
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    match state
        .engine
        .compute_recommendation(&req.measurements, &req.fit_preference)
    {
        Ok(result) => {
            tracing::info!(
                "Recommended size {} with {}% confidence",
                result.recommended_size,
                result.overall_confidence_percent
            );
            HttpResponse::Ok().json(result)
        }
        Err(e) => {
            tracing::info!("Rejected measurements: {}", e);
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "Validation failed".to_string(),
                message: e.to_string(),
                status_code: 422,
                fields: e.fields,
            })
        }
    }
}

/// Save a recommendation for an owner, replacing any previous one
///
/// POST /api/v1/size/save
///
/// Request body:
/// ```json
/// {
///   "ownerId": "string",
///   "answers": { ... },
///   "recommendedSize": "XS|S|M|L|XL"
/// }
/// ```
async fn save_recommendation(
    state: web::Data<AppState>,
    req: web::Json<SaveRecommendationRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    let size = match req.recommended_size.parse::<SizeLabel>() {
        Ok(size) => size,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid size",
                format!("{}; expected one of XS, S, M, L, XL", e),
                400,
            ));
        }
    };

    match state.store.save(&req.owner_id, &req.answers, size).await {
        Ok(recommendation) => {
            tracing::info!("Saved size {} for owner {}", size, req.owner_id);
            HttpResponse::Ok().json(RecommendationResponse {
                success: true,
                message: Some("Size recommendation saved".to_string()),
                recommendation,
            })
        }
        Err(e) => store_error_response(&req.owner_id, e),
    }
}

/// Get the stored recommendation for an owner
///
/// GET /api/v1/size/get?ownerId={ownerId}
async fn get_recommendation(
    state: web::Data<AppState>,
    query: web::Query<GetRecommendationQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "Validation failed",
            errors.to_string(),
            400,
        ));
    }

    match state.store.get(&query.owner_id).await {
        Ok(recommendation) => HttpResponse::Ok().json(RecommendationResponse {
            success: true,
            message: None,
            recommendation,
        }),
        Err(e) => store_error_response(&query.owner_id, e),
    }
}

fn store_error_response(owner_id: &str, err: StoreError) -> HttpResponse {
    match err {
        StoreError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Not found",
            format!("No size recommendation stored for {}", owner_id),
            404,
        )),
        e => {
            tracing::error!("Recommendation store failed for {}: {}", owner_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "Recommendation store unavailable",
                e.to_string(),
                500,
            ))
        }
    }
}
