use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Facilities Directory API",
        version = "0.2.0",
        description = r#"
# Facilities Directory API

Directory of company facilities with their on-site amenities and nearby
transportation options.

## Features

- **Facilities**: save, update, and delete facility records keyed by facility code
- **Filtered search**: combine campus, type, hoteling, proximity, and open-on-date filters
- **Geo queries**: find facilities within a mile radius of a coordinate, nearest first
- **Pagination**: `skip`/`take` paged listing with a `hasMore` continuation flag
- **Amenities & transportation**: per-facility extras backed by editable type registries

## Error Handling

Errors use a consistent envelope with appropriate HTTP status codes:

```json
{
  "error": "Not Found",
  "message": "Facility with ID XX0 not found",
  "request_id": "req-abc123xyz",
  "timestamp": "2025-06-09T10:30:00.000Z"
}
```

## Pagination

`GET /api/v1/facilities/paged` accepts:
- `skip`: rows to skip (default: 0)
- `take`: page size (default: 25, max: 50)
        "#,
        contact(
            name = "Facilities Platform Team",
            email = "facilities-platform@example.com"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development"),
        (url = "https://facilities.example.com", description = "Production server")
    ),
    tags(
        (name = "facilities", description = "Facility directory endpoints"),
        (name = "amenities", description = "Facility amenity endpoints"),
        (name = "transportations", description = "Facility transportation endpoints"),
        (name = "amenity_types", description = "Amenity type registry endpoints"),
        (name = "transportation_types", description = "Transportation type registry endpoints")
    ),
    paths(
        // Facilities
        crate::handlers::facilities::list_facilities,
        crate::handlers::facilities::page_facilities,
        crate::handlers::facilities::get_facility,
        crate::handlers::facilities::save_facility,
        crate::handlers::facilities::update_facility,
        crate::handlers::facilities::delete_facility,

        // Amenities
        crate::handlers::amenities::list_amenities,
        crate::handlers::amenities::facility_amenities,
        crate::handlers::amenities::get_amenity,
        crate::handlers::amenities::create_amenity,
        crate::handlers::amenities::update_amenity,
        crate::handlers::amenities::delete_amenity,

        // Transportation options
        crate::handlers::transportations::list_transportations,
        crate::handlers::transportations::facility_transportations,
        crate::handlers::transportations::get_transportation,
        crate::handlers::transportations::create_transportation,
        crate::handlers::transportations::update_transportation,
        crate::handlers::transportations::delete_transportation,

        // Type registries
        crate::handlers::amenity_types::list_amenity_types,
        crate::handlers::amenity_types::get_amenity_type,
        crate::handlers::amenity_types::create_amenity_type,
        crate::handlers::amenity_types::update_amenity_type,
        crate::handlers::amenity_types::delete_amenity_type,
        crate::handlers::transportation_types::list_transportation_types,
        crate::handlers::transportation_types::get_transportation_type,
        crate::handlers::transportation_types::create_transportation_type,
        crate::handlers::transportation_types::update_transportation_type,
        crate::handlers::transportation_types::delete_transportation_type,

        // Status & health intentionally omitted from the OpenAPI paths
    ),
    components(
        schemas(
            // Common types
            crate::ApiResponse<serde_json::Value>,

            // Facility types
            crate::services::facilities::FacilityResponse,
            crate::services::facilities::SaveFacilityRequest,
            crate::services::facilities::UpdateFacilityRequest,
            crate::services::facilities::LocationInput,
            crate::services::facilities::FacilityPage,
            crate::models::address::Address,
            crate::models::geo_location::GeoLocation,
            crate::models::operational_hours::OperationalHoursEntry,
            crate::models::operational_hours::Weekday,
            crate::models::facility::FacilityType,
            crate::models::facility::OperationalStatus,
            crate::models::facility::ClassificationType,

            // Amenity types
            crate::services::amenities::AmenityResponse,
            crate::services::amenities::SaveAmenityRequest,
            crate::services::amenities::AmenityTypeRef,
            crate::services::amenity_types::AmenityTypeResponse,
            crate::services::amenity_types::SaveAmenityTypeRequest,

            // Transportation types
            crate::services::transportations::TransportationResponse,
            crate::services::transportations::SaveTransportationRequest,
            crate::services::transportations::TransportationTypeRef,
            crate::services::transportation_types::TransportationTypeResponse,
            crate::services::transportation_types::SaveTransportationTypeRequest,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
