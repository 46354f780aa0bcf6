//! myeloma-server
//!
//! HTTP surface over the engine. Routes parse the request, call one engine
//! operation, and map its error; there is no clinical logic here.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Guideline catalogue (static data)
        .route("/guidelines", get(routes::guidelines::list_guidelines))
        // Patients
        .route("/patients", post(routes::patients::register_patient))
        .route(
            "/patients/{patient_id}",
            get(routes::patients::get_patient).delete(routes::patients::delete_patient),
        )
        .route(
            "/patients/{patient_id}/profile",
            put(routes::patients::update_profile),
        )
        // Diagnostics and derived views
        .route(
            "/patients/{patient_id}/diagnostics",
            post(routes::diagnostics::submit_diagnostics)
                .get(routes::diagnostics::list_diagnostics),
        )
        .route(
            "/patients/{patient_id}/next-tests",
            get(routes::diagnostics::next_tests),
        )
        .route(
            "/patients/{patient_id}/staging",
            get(routes::diagnostics::staging),
        )
        .route(
            "/patients/{patient_id}/treatment-recommendations",
            get(routes::treatment::treatment_recommendations),
        )
        // Monitoring
        .route(
            "/patients/{patient_id}/monitoring",
            post(routes::monitoring::submit_monitoring)
                .get(routes::monitoring::list_monitoring),
        )
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state)
}
