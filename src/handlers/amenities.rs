use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::services::amenities::{AmenityResponse, SaveAmenityRequest};
use crate::{errors::ServiceError, ApiResponse, AppState};

/// List all amenities
#[utoipa::path(
    get,
    path = "/api/v1/amenities",
    summary = "List amenities",
    description = "Get every amenity in creation order",
    responses(
        (status = 200, description = "Amenities retrieved successfully", body = ApiResponse<Vec<AmenityResponse>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_amenities(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AmenityResponse>>>, ServiceError> {
    let amenities = state.services.amenities.list_amenities().await?;
    Ok(Json(ApiResponse::success(amenities)))
}

/// List the amenities of one facility
#[utoipa::path(
    get,
    path = "/api/v1/facilities/{id}/amenities",
    summary = "List facility amenities",
    description = "Get the amenities attached to a facility",
    params(
        ("id" = String, Path, description = "Facility code"),
    ),
    responses(
        (status = 200, description = "Amenities retrieved successfully", body = ApiResponse<Vec<AmenityResponse>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn facility_amenities(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<AmenityResponse>>>, ServiceError> {
    let amenities = state.services.amenities.list_for_facility(&id).await?;
    Ok(Json(ApiResponse::success(amenities)))
}

/// Get amenity by ID
#[utoipa::path(
    get,
    path = "/api/v1/amenities/{id}",
    summary = "Get amenity",
    params(
        ("id" = Uuid, Path, description = "Amenity ID"),
    ),
    responses(
        (status = 200, description = "Amenity retrieved successfully", body = ApiResponse<AmenityResponse>),
        (status = 404, description = "Amenity not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_amenity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AmenityResponse>>, ServiceError> {
    match state.services.amenities.get_amenity(id).await? {
        Some(amenity) => Ok(Json(ApiResponse::success(amenity))),
        None => Err(ServiceError::NotFound(format!(
            "Amenity with ID {} not found",
            id
        ))),
    }
}

/// Create a new amenity
#[utoipa::path(
    post,
    path = "/api/v1/amenities",
    summary = "Create amenity",
    description = "Attach an amenity to a facility. Off-site amenities must carry an \
                   address and operational hours; duplicates of an existing amenity \
                   at the same facility are rejected.",
    request_body = SaveAmenityRequest,
    responses(
        (status = 201, description = "Amenity created successfully", body = ApiResponse<AmenityResponse>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Facility or amenity type not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate amenity", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn create_amenity(
    State(state): State<AppState>,
    Json(request): Json<SaveAmenityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AmenityResponse>>), ServiceError> {
    let amenity = state.services.amenities.create_amenity(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(amenity))))
}

/// Update an existing amenity
#[utoipa::path(
    put,
    path = "/api/v1/amenities/{id}",
    summary = "Update amenity",
    params(
        ("id" = Uuid, Path, description = "Amenity ID"),
    ),
    request_body = SaveAmenityRequest,
    responses(
        (status = 200, description = "Amenity updated successfully", body = ApiResponse<AmenityResponse>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Amenity not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate amenity", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_amenity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveAmenityRequest>,
) -> Result<Json<ApiResponse<AmenityResponse>>, ServiceError> {
    let amenity = state.services.amenities.update_amenity(id, request).await?;
    Ok(Json(ApiResponse::success(amenity)))
}

/// Delete an amenity
#[utoipa::path(
    delete,
    path = "/api/v1/amenities/{id}",
    summary = "Delete amenity",
    params(
        ("id" = Uuid, Path, description = "Amenity ID"),
    ),
    responses(
        (status = 204, description = "Amenity deleted successfully"),
        (status = 404, description = "Amenity not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_amenity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.amenities.delete_amenity(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
