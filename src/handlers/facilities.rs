use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::services::facilities::{
    FacilityPage, FacilityResponse, PageParams, PageRequest, SaveFacilityRequest,
    UpdateFacilityRequest,
};
use crate::services::facility_filter::{FacilityFilter, FacilityFilterParams};
use crate::{errors::ServiceError, ApiResponse, AppState};

/// List facilities matching the given filter
#[utoipa::path(
    get,
    path = "/api/v1/facilities",
    summary = "List facilities",
    description = "Get every facility matching the filter; results are unpaginated. \
                   With a longitude/latitude pair the list is ordered nearest first.",
    params(FacilityFilterParams),
    responses(
        (status = 200, description = "Facilities retrieved successfully", body = ApiResponse<Vec<FacilityResponse>>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid filter parameters", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn list_facilities(
    State(state): State<AppState>,
    Query(params): Query<FacilityFilterParams>,
) -> Result<Json<ApiResponse<Vec<FacilityResponse>>>, ServiceError> {
    let filter = FacilityFilter::from_params(params)?;
    let facilities = state.services.facilities.list_facilities(&filter).await?;
    Ok(Json(ApiResponse::success(facilities)))
}

/// List one page of facilities matching the given filter
#[utoipa::path(
    get,
    path = "/api/v1/facilities/paged",
    summary = "List facilities paged",
    description = "Get a slice of the facilities matching the filter, with a flag \
                   reporting whether rows remain past the slice.",
    params(FacilityFilterParams, PageParams),
    responses(
        (status = 200, description = "Facility page retrieved successfully", body = ApiResponse<FacilityPage>),
        (status = 400, description = "Invalid filter parameters", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn page_facilities(
    State(state): State<AppState>,
    Query(filter_params): Query<FacilityFilterParams>,
    Query(page_params): Query<PageParams>,
) -> Result<Json<ApiResponse<FacilityPage>>, ServiceError> {
    let filter = FacilityFilter::from_params(filter_params)?;
    let page = state
        .services
        .facilities
        .page_facilities(&filter, PageRequest::from_params(page_params))
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// Get facility by ID
#[utoipa::path(
    get,
    path = "/api/v1/facilities/{id}",
    summary = "Get facility",
    description = "Get a facility by its code; the code is matched case-insensitively",
    params(
        ("id" = String, Path, description = "Facility code"),
    ),
    responses(
        (status = 200, description = "Facility retrieved successfully", body = ApiResponse<FacilityResponse>),
        (status = 404, description = "Facility not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn get_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<FacilityResponse>>, ServiceError> {
    let id = id.trim().to_uppercase();
    match state.services.facilities.get_facility(&id).await? {
        Some(facility) => Ok(Json(ApiResponse::success(facility))),
        None => Err(ServiceError::NotFound(format!(
            "Facility with ID {} not found",
            id
        ))),
    }
}

/// Save (create or replace) a facility
#[utoipa::path(
    post,
    path = "/api/v1/facilities",
    summary = "Save facility",
    description = "Create a facility, or replace the stored document when the id already exists",
    request_body = SaveFacilityRequest,
    responses(
        (status = 200, description = "Facility saved successfully", body = ApiResponse<FacilityResponse>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn save_facility(
    State(state): State<AppState>,
    Json(request): Json<SaveFacilityRequest>,
) -> Result<Json<ApiResponse<FacilityResponse>>, ServiceError> {
    let facility = state.services.facilities.save_facility(request).await?;
    Ok(Json(ApiResponse::success(facility)))
}

/// Update an existing facility
#[utoipa::path(
    put,
    path = "/api/v1/facilities/{id}",
    summary = "Update facility",
    description = "Replace an existing facility; fails when the id is unknown",
    params(
        ("id" = String, Path, description = "Facility code"),
    ),
    request_body = UpdateFacilityRequest,
    responses(
        (status = 200, description = "Facility updated successfully", body = ApiResponse<FacilityResponse>),
        (status = 400, description = "Invalid request data", body = crate::errors::ErrorResponse),
        (status = 404, description = "Facility not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn update_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateFacilityRequest>,
) -> Result<Json<ApiResponse<FacilityResponse>>, ServiceError> {
    let facility = state
        .services
        .facilities
        .update_facility(&id, request)
        .await?;
    Ok(Json(ApiResponse::success(facility)))
}

/// Delete a facility and everything attached to it
#[utoipa::path(
    delete,
    path = "/api/v1/facilities/{id}",
    summary = "Delete facility",
    description = "Delete a facility after removing its amenities, transportation options, \
                   operations, spaces, and notifications in one transaction",
    params(
        ("id" = String, Path, description = "Facility code"),
    ),
    responses(
        (status = 204, description = "Facility deleted successfully"),
        (status = 404, description = "Facility not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    )
)]
pub async fn delete_facility(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    state.services.facilities.delete_facility(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
