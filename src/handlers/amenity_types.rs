use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::services::amenity_types::{AmenityTypeResponse, SaveAmenityTypeRequest};
use crate::{errors::ServiceError, ApiResponse, AppState};

/// List the amenity type registry
#[utoipa::path(
    get,
    path = "/api/v1/amenity-types",
    summary = "List amenity types",
    description = "Get the amenity type registry in name order",
    responses(
        (status = 200, description = "Amenity types retrieved successfully", body = ApiResponse<Vec<AmenityTypeResponse>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_amenity_types(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AmenityTypeResponse>>>, ServiceError> {
    let types = state.services.amenity_types.list_amenity_types().await?;
    Ok(Json(ApiResponse::success(types)))
}

/// Get amenity type by ID
#[utoipa::path(
    get,
    path = "/api/v1/amenity-types/{id}",
    summary = "Get amenity type",
    params(
        ("id" = Uuid, Path, description = "Amenity type ID"),
    ),
    responses(
        (status = 200, description = "Amenity type retrieved successfully", body = ApiResponse<AmenityTypeResponse>),
        (status = 404, description = "Amenity type not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_amenity_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AmenityTypeResponse>>, ServiceError> {
    match state.services.amenity_types.get_amenity_type(id).await? {
        Some(amenity_type) => Ok(Json(ApiResponse::success(amenity_type))),
        None => Err(ServiceError::NotFound(format!(
            "Amenity type with ID {} not found",
            id
        ))),
    }
}

/// Register a new amenity type
#[utoipa::path(
    post,
    path = "/api/v1/amenity-types",
    summary = "Create amenity type",
    description = "Register a new amenity type. Names are uppercased and must be unique.",
    request_body = SaveAmenityTypeRequest,
    responses(
        (status = 201, description = "Amenity type created successfully", body = ApiResponse<AmenityTypeResponse>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 409, description = "Amenity type already exists", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_amenity_type(
    State(state): State<AppState>,
    Json(request): Json<SaveAmenityTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AmenityTypeResponse>>), ServiceError> {
    let amenity_type = state
        .services
        .amenity_types
        .create_amenity_type(request)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(amenity_type))))
}

/// Rename or re-describe an amenity type
#[utoipa::path(
    put,
    path = "/api/v1/amenity-types/{id}",
    summary = "Update amenity type",
    description = "Rename an amenity type. The new name is fanned out to every \
                   amenity that references the type.",
    params(
        ("id" = Uuid, Path, description = "Amenity type ID"),
    ),
    request_body = SaveAmenityTypeRequest,
    responses(
        (status = 200, description = "Amenity type updated successfully", body = ApiResponse<AmenityTypeResponse>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Amenity type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Amenity type name already taken", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_amenity_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveAmenityTypeRequest>,
) -> Result<Json<ApiResponse<AmenityTypeResponse>>, ServiceError> {
    let amenity_type = state
        .services
        .amenity_types
        .update_amenity_type(id, request)
        .await?;
    Ok(Json(ApiResponse::success(amenity_type)))
}

/// Delete an amenity type
#[utoipa::path(
    delete,
    path = "/api/v1/amenity-types/{id}",
    summary = "Delete amenity type",
    description = "Delete an amenity type. Fails while any amenity still references it.",
    params(
        ("id" = Uuid, Path, description = "Amenity type ID"),
    ),
    responses(
        (status = 204, description = "Amenity type deleted successfully"),
        (status = 404, description = "Amenity type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Amenity type still referenced", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_amenity_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.amenity_types.delete_amenity_type(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
