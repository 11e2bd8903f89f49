use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::services::transportations::{SaveTransportationRequest, TransportationResponse};
use crate::{errors::ServiceError, ApiResponse, AppState};

/// List all transportation options
#[utoipa::path(
    get,
    path = "/api/v1/transportations",
    summary = "List transportation options",
    description = "Get every transportation option in creation order",
    responses(
        (status = 200, description = "Transportation options retrieved successfully", body = ApiResponse<Vec<TransportationResponse>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_transportations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransportationResponse>>>, ServiceError> {
    let options = state.services.transportations.list_transportations().await?;
    Ok(Json(ApiResponse::success(options)))
}

/// List the transportation options of one facility
#[utoipa::path(
    get,
    path = "/api/v1/facilities/{id}/transportations",
    summary = "List facility transportation options",
    params(
        ("id" = String, Path, description = "Facility code"),
    ),
    responses(
        (status = 200, description = "Transportation options retrieved successfully", body = ApiResponse<Vec<TransportationResponse>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn facility_transportations(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<TransportationResponse>>>, ServiceError> {
    let options = state
        .services
        .transportations
        .list_for_facility(&id)
        .await?;
    Ok(Json(ApiResponse::success(options)))
}

/// Get transportation option by ID
#[utoipa::path(
    get,
    path = "/api/v1/transportations/{id}",
    summary = "Get transportation option",
    params(
        ("id" = Uuid, Path, description = "Transportation ID"),
    ),
    responses(
        (status = 200, description = "Transportation option retrieved successfully", body = ApiResponse<TransportationResponse>),
        (status = 404, description = "Transportation option not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_transportation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TransportationResponse>>, ServiceError> {
    match state.services.transportations.get_transportation(id).await? {
        Some(option) => Ok(Json(ApiResponse::success(option))),
        None => Err(ServiceError::NotFound(format!(
            "Transportation with ID {} not found",
            id
        ))),
    }
}

/// Create a new transportation option
#[utoipa::path(
    post,
    path = "/api/v1/transportations",
    summary = "Create transportation option",
    description = "Attach a transportation option to a facility. Off-site options must \
                   carry an address and operational hours; duplicates of an existing \
                   option at the same facility are rejected.",
    request_body = SaveTransportationRequest,
    responses(
        (status = 201, description = "Transportation option created successfully", body = ApiResponse<TransportationResponse>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Facility or transportation type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate transportation option", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_transportation(
    State(state): State<AppState>,
    Json(request): Json<SaveTransportationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransportationResponse>>), ServiceError> {
    let option = state
        .services
        .transportations
        .create_transportation(request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(option))))
}

/// Update an existing transportation option
#[utoipa::path(
    put,
    path = "/api/v1/transportations/{id}",
    summary = "Update transportation option",
    params(
        ("id" = Uuid, Path, description = "Transportation ID"),
    ),
    request_body = SaveTransportationRequest,
    responses(
        (status = 200, description = "Transportation option updated successfully", body = ApiResponse<TransportationResponse>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Transportation option not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate transportation option", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_transportation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveTransportationRequest>,
) -> Result<Json<ApiResponse<TransportationResponse>>, ServiceError> {
    let option = state
        .services
        .transportations
        .update_transportation(id, request)
        .await?;
    Ok(Json(ApiResponse::success(option)))
}

/// Delete a transportation option
#[utoipa::path(
    delete,
    path = "/api/v1/transportations/{id}",
    summary = "Delete transportation option",
    params(
        ("id" = Uuid, Path, description = "Transportation ID"),
    ),
    responses(
        (status = 204, description = "Transportation option deleted successfully"),
        (status = 404, description = "Transportation option not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_transportation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .transportations
        .delete_transportation(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
