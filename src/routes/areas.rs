use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Advisor, DatasetStore, EngineError};
use crate::models::{
    AffordabilityQuery, AffordabilityResponse, ErrorResponse, HealthResponse, SuggestRequest,
    SuggestResponse, TransportResponse,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub advisor: Advisor,
}

/// Configure all area-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/affordability", web::get().to(affordability))
        .route("/transport", web::get().to(transport))
        .route("/suggest", web::post().to(suggest));
}

fn engine_error_response(err: &EngineError) -> HttpResponse {
    match err {
        EngineError::InvalidArgument(msg) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid argument".to_string(),
            message: msg.clone(),
            status_code: 400,
        }),
        EngineError::NoStopsAvailable => HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "No transit stops".to_string(),
            message: err.to_string(),
            status_code: 503,
        }),
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.store.stops().is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        listings: state.store.listings().len(),
        stops: state.store.stops().len(),
    })
}

/// Affordability endpoint
///
/// GET /api/affordability?profession=Teacher&amenities=school,park&bedrooms=2
///
/// Scores every listing passing the filters by the profession's average
/// income relative to its price.
async fn affordability(
    state: web::Data<AppState>,
    query: web::Query<AffordabilityQuery>,
) -> impl Responder {
    let filters = match query.to_filters() {
        Ok(filters) => filters,
        Err(e) => {
            tracing::info!("Rejected affordability query: {}", e);
            return engine_error_response(&e);
        }
    };
    let profession = query.profession();

    let result = state
        .advisor
        .compute_affordability(&state.store, &filters, &profession);

    tracing::info!(
        "Returning {} areas for profession {}",
        result.areas.len(),
        result.profession
    );

    HttpResponse::Ok().json(AffordabilityResponse {
        areas: result.areas,
        profession: result.profession,
    })
}

/// Transport stops endpoint
///
/// GET /api/transport
async fn transport(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(TransportResponse {
        stops: state.advisor.compute_transport_stops(&state.store),
    })
}

/// Suggestion endpoint
///
/// POST /api/suggest
///
/// Request body:
/// ```json
/// {
///   "income": 100000,
///   "family": 1,
///   "amenities": ["school"],
///   "proximity": 10,
///   "property_type": "Apartment",
///   "bedrooms": "2",
///   "furnished": true
/// }
/// ```
async fn suggest(
    state: web::Data<AppState>,
    req: web::Json<SuggestRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for suggest request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = match req.to_query() {
        Ok(query) => query,
        Err(e) => {
            tracing::info!("Rejected suggest request: {}", e);
            return engine_error_response(&e);
        }
    };

    match state.advisor.compute_suggestions(&state.store, &query) {
        Ok(result) => {
            tracing::info!(
                "Returning {} suggestions from {} scored areas",
                result.suggested.len(),
                result.all.len()
            );
            HttpResponse::Ok().json(SuggestResponse {
                suggested: result.suggested,
                all: result.all,
            })
        }
        Err(e) => {
            tracing::warn!("Suggestion computation failed: {}", e);
            engine_error_response(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_maps_to_bad_request() {
        let response = engine_error_response(&EngineError::InvalidArgument("bad".to_string()));
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_stops_maps_to_unavailable() {
        let response = engine_error_response(&EngineError::NoStopsAvailable);
        assert_eq!(response.status(), actix_web::http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
