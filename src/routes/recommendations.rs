use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use crate::models::{ErrorResponse, HealthResponse, RecommendRequest};
use crate::services::{RecommendError, Recommender};

/// Application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub recommender: Recommender,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Rank lockers endpoint
///
/// POST /api/v1/recommendations
///
/// Request body:
/// ```json
/// {
///   "classifier": "stored",
///   "records": [{"id": 1, "latitude": 46.05, "longitude": 14.50,
///                "lockerType": "navadni", "accessible": true,
///                "parking": false, "suitability": 0.9}],
///   "filters": {"requireAccessible": true, "requireParking": false, "typeFilter": "any"},
///   "topN": 5,
///   "userLocation": {"latitude": 46.0569, "longitude": 14.5058},
///   "evaluate": false
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    match state.recommender.recommend(&req) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &RecommendError) -> HttpResponse {
    let status_code = err.status_code();
    if status_code >= 500 {
        tracing::error!("Recommendation request failed: {}", err);
    } else {
        tracing::info!("Recommendation request rejected: {}", err);
    }

    HttpResponse::build(StatusCode::from_u16(status_code).unwrap_or(StatusCode::BAD_REQUEST))
        .json(ErrorResponse {
            error: err.kind().to_string(),
            message: err.to_string(),
            status_code,
        })
}
