//! Deleting a facility removes every dependent record with it, and type
//! registry entries refuse deletion while anything still points at them.

mod common;

use axum::http::{Method, StatusCode};
use common::{amenity_payload, body_json, transportation_payload, TestApp};

#[tokio::test]
async fn deleting_a_facility_removes_its_dependents() {
    let app = TestApp::new().await;
    app.seed_facility("CAS10").await;
    let amenity_type = app.seed_amenity_type("Cafeteria").await;
    let transportation_type = app.seed_transportation_type("Parking").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/amenities",
            Some(amenity_payload("CAS10", &amenity_type)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let amenity_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            Method::POST,
            "/api/v1/transportations",
            Some(transportation_payload("CAS10", &transportation_type)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let transportation_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(Method::DELETE, "/api/v1/facilities/CAS10", None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The facility and both dependents are gone
    let response = app
        .request(Method::GET, "/api/v1/facilities/CAS10", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/amenities/{amenity_id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/transportations/{transportation_id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Scoped listings answer with empty collections rather than an error
    let response = app
        .request(Method::GET, "/api/v1/facilities/CAS10/amenities", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    let response = app
        .request(
            Method::GET,
            "/api/v1/facilities/CAS10/transportations",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // The registry entries themselves are untouched
    let response = app
        .request(
            Method::GET,
            &format!("/api/v1/amenity-types/{amenity_type}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn referenced_amenity_types_cannot_be_deleted() {
    let app = TestApp::new().await;
    app.seed_facility("CAS20").await;
    let type_id = app.seed_amenity_type("Fitness Center").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/amenities",
            Some(amenity_payload("CAS20", &type_id)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let amenity_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/amenity-types/{type_id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("still referenced"));

    // Once the referencing amenity is gone the type can be removed
    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/amenities/{amenity_id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/amenity-types/{type_id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn referenced_transportation_types_cannot_be_deleted() {
    let app = TestApp::new().await;
    app.seed_facility("CAS30").await;
    let type_id = app.seed_transportation_type("Bike Share").await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/transportations",
            Some(transportation_payload("CAS30", &type_id)),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::DELETE,
            &format!("/api/v1/transportation-types/{type_id}"),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("still referenced"));
}
