//! Facilities Directory API Library
//!
//! Core functionality for the facilities directory: facility records keyed
//! by facility code, their on-site amenities and transportation options,
//! and the filtered, geo, and paged retrieval surface on top of them.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;
pub mod validation;

use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use utoipa::ToSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
            errors: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some("Validation failed".to_string()),
            errors: Some(errors),
            meta: Some(ResponseMeta::capture()),
        }
    }
}

#[cfg(test)]
mod response_tests {
    use super::*;
    use chrono::DateTime;

    #[tokio::test]
    async fn success_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-123"), async {
                ApiResponse::success("ok")
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-123"));
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }

    #[tokio::test]
    async fn error_response_includes_request_metadata() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("meta-err"), async {
                ApiResponse::<()>::error("oops".into())
            })
            .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-err"));
        assert!(!meta.timestamp.is_empty());
    }

    #[tokio::test]
    async fn validation_errors_response_includes_metadata() {
        let response = crate::tracing::scope_request_id(
            crate::tracing::RequestId::new("meta-validation"),
            async { ApiResponse::<()>::validation_errors(vec!["missing".into()]) },
        )
        .await;

        let meta = response.meta.expect("metadata expected");
        assert_eq!(meta.request_id.as_deref(), Some("meta-validation"));
        assert!(response.errors.is_some());
        DateTime::parse_from_rfc3339(&meta.timestamp).expect("timestamp should parse");
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

// API v1 routes. Static segments are registered before parameterized
// siblings so /facilities/paged never falls into /facilities/:id.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        // Status and health endpoints
        .route("/status", get(api_status))
        .route("/health", get(health_check))
        // Facilities API
        .route(
            "/facilities",
            get(handlers::facilities::list_facilities).post(handlers::facilities::save_facility),
        )
        .route(
            "/facilities/paged",
            get(handlers::facilities::page_facilities),
        )
        .route(
            "/facilities/:id",
            get(handlers::facilities::get_facility)
                .put(handlers::facilities::update_facility)
                .delete(handlers::facilities::delete_facility),
        )
        .route(
            "/facilities/:id/amenities",
            get(handlers::amenities::facility_amenities),
        )
        .route(
            "/facilities/:id/transportations",
            get(handlers::transportations::facility_transportations),
        )
        // Amenities API
        .route(
            "/amenities",
            get(handlers::amenities::list_amenities).post(handlers::amenities::create_amenity),
        )
        .route(
            "/amenities/:id",
            get(handlers::amenities::get_amenity)
                .put(handlers::amenities::update_amenity)
                .delete(handlers::amenities::delete_amenity),
        )
        // Transportation API
        .route(
            "/transportations",
            get(handlers::transportations::list_transportations)
                .post(handlers::transportations::create_transportation),
        )
        .route(
            "/transportations/:id",
            get(handlers::transportations::get_transportation)
                .put(handlers::transportations::update_transportation)
                .delete(handlers::transportations::delete_transportation),
        )
        // Type registries
        .route(
            "/amenity-types",
            get(handlers::amenity_types::list_amenity_types)
                .post(handlers::amenity_types::create_amenity_type),
        )
        .route(
            "/amenity-types/:id",
            get(handlers::amenity_types::get_amenity_type)
                .put(handlers::amenity_types::update_amenity_type)
                .delete(handlers::amenity_types::delete_amenity_type),
        )
        .route(
            "/transportation-types",
            get(handlers::transportation_types::list_transportation_types)
                .post(handlers::transportation_types::create_transportation_type),
        )
        .route(
            "/transportation-types/:id",
            get(handlers::transportation_types::get_transportation_type)
                .put(handlers::transportation_types::update_transportation_type)
                .delete(handlers::transportation_types::delete_transportation_type),
        )
}

async fn api_status(State(state): State<AppState>) -> ApiResult<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let git = option_env!("GIT_HASH").unwrap_or("unknown");
    let build_time = option_env!("BUILD_TIME").unwrap_or("unknown");
    let status_data = json!({
        "status": "ok",
        "version": version,
        "git": git,
        "build_time": build_time,
        "service": "facilities-api",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.config.environment,
    });

    Ok(Json(ApiResponse::success(status_data)))
}

async fn health_check(State(state): State<AppState>) -> ApiResult<Value> {
    // Check database connectivity
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    let health_data = json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "timestamp": Utc::now().to_rfc3339(),
    });

    Ok(Json(ApiResponse::success(health_data)))
}

pub mod prelude {
    pub use crate::db::*;
    pub use crate::errors::*;
    pub use crate::events::*;
    pub use crate::openapi::*;
    pub use crate::services::*;
    pub use crate::tracing::*;
}
