use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::services::transportation_types::{
    SaveTransportationTypeRequest, TransportationTypeResponse,
};
use crate::{errors::ServiceError, ApiResponse, AppState};

/// List the transportation type registry
#[utoipa::path(
    get,
    path = "/api/v1/transportation-types",
    summary = "List transportation types",
    responses(
        (status = 200, description = "Transportation types retrieved successfully", body = ApiResponse<Vec<TransportationTypeResponse>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_transportation_types(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransportationTypeResponse>>>, ServiceError> {
    let types = state
        .services
        .transportation_types
        .list_transportation_types()
        .await?;
    Ok(Json(ApiResponse::success(types)))
}

/// Get transportation type by ID
#[utoipa::path(
    get,
    path = "/api/v1/transportation-types/{id}",
    summary = "Get transportation type",
    params(
        ("id" = Uuid, Path, description = "Transportation type ID"),
    ),
    responses(
        (status = 200, description = "Transportation type retrieved successfully", body = ApiResponse<TransportationTypeResponse>),
        (status = 404, description = "Transportation type not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_transportation_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TransportationTypeResponse>>, ServiceError> {
    match state
        .services
        .transportation_types
        .get_transportation_type(id)
        .await?
    {
        Some(transportation_type) => Ok(Json(ApiResponse::success(transportation_type))),
        None => Err(ServiceError::NotFound(format!(
            "Transportation type with ID {} not found",
            id
        ))),
    }
}

/// Register a new transportation type
#[utoipa::path(
    post,
    path = "/api/v1/transportation-types",
    summary = "Create transportation type",
    description = "Register a new transportation type. Names are uppercased and must be unique.",
    request_body = SaveTransportationTypeRequest,
    responses(
        (status = 201, description = "Transportation type created successfully", body = ApiResponse<TransportationTypeResponse>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 409, description = "Transportation type already exists", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_transportation_type(
    State(state): State<AppState>,
    Json(request): Json<SaveTransportationTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransportationTypeResponse>>), ServiceError> {
    let transportation_type = state
        .services
        .transportation_types
        .create_transportation_type(request)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(transportation_type)),
    ))
}

/// Rename or re-describe a transportation type
#[utoipa::path(
    put,
    path = "/api/v1/transportation-types/{id}",
    summary = "Update transportation type",
    description = "Rename a transportation type. The new name is fanned out to every \
                   transportation option that references the type.",
    params(
        ("id" = Uuid, Path, description = "Transportation type ID"),
    ),
    request_body = SaveTransportationTypeRequest,
    responses(
        (status = 200, description = "Transportation type updated successfully", body = ApiResponse<TransportationTypeResponse>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Transportation type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Transportation type name already taken", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_transportation_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveTransportationTypeRequest>,
) -> Result<Json<ApiResponse<TransportationTypeResponse>>, ServiceError> {
    let transportation_type = state
        .services
        .transportation_types
        .update_transportation_type(id, request)
        .await?;
    Ok(Json(ApiResponse::success(transportation_type)))
}

/// Delete a transportation type
#[utoipa::path(
    delete,
    path = "/api/v1/transportation-types/{id}",
    summary = "Delete transportation type",
    description = "Delete a transportation type. Fails while any transportation option \
                   still references it.",
    params(
        ("id" = Uuid, Path, description = "Transportation type ID"),
    ),
    responses(
        (status = 204, description = "Transportation type deleted successfully"),
        (status = 404, description = "Transportation type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Transportation type still referenced", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_transportation_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state
        .services
        .transportation_types
        .delete_transportation_type(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
