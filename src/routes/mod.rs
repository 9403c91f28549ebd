// Route exports
pub mod recommendations;

pub use recommendations::AppState;

use actix_web::{error, web, HttpRequest, HttpResponse, ResponseError};
use crate::models::ErrorResponse;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(recommendations::configure),
    );
}

/// JSON extractor settings: body size limit in bytes plus JSON error bodies
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(handle_json_payload_error)
}

/// Handle JSON payload errors
fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);

    let status = err.status_code();
    let kind = match &err {
        error::JsonPayloadError::Overflow { .. }
        | error::JsonPayloadError::OverflowKnownLength { .. } => "payload_too_large",
        _ => "invalid_json",
    };
    let response = HttpResponse::build(status).json(ErrorResponse {
        error: kind.to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: status.as_u16(),
    });

    error::InternalError::from_response(err, response).into()
}
