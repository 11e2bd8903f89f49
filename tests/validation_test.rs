//! Request validation behavior across the write endpoints: schema-level
//! checks, the blank-field walker, and the cross-field address rules.

mod common;

use axum::http::{Method, StatusCode};
use common::{amenity_payload, body_json, facility_payload, TestApp};
use serde_json::json;

#[tokio::test]
async fn empty_name_is_rejected() {
    let app = TestApp::new().await;

    let mut payload = facility_payload("VAL10");
    payload["name"] = json!("");
    let response = app
        .request(Method::POST, "/api/v1/facilities", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("name is required"));
}

#[tokio::test]
async fn whitespace_only_fields_are_rejected() {
    let app = TestApp::new().await;

    // Passes the length check but trips the blank-field walker
    let mut payload = facility_payload("VAL11");
    payload["name"] = json!("   ");
    let response = app
        .request(Method::POST, "/api/v1/facilities", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("name"));
    assert!(message.contains("blank"));
}

#[tokio::test]
async fn nested_blank_fields_are_reported_by_name() {
    let app = TestApp::new().await;

    let mut payload = facility_payload("VAL12");
    payload["address"]["city"] = json!("\t ");
    let response = app
        .request(Method::POST, "/api/v1/facilities", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("city"));
}

#[tokio::test]
async fn missing_required_field_fails_deserialization() {
    let app = TestApp::new().await;

    let mut payload = facility_payload("VAL13");
    payload.as_object_mut().unwrap().remove("name");
    let response = app
        .request(Method::POST, "/api/v1/facilities", Some(payload))
        .await;
    // The body never reaches the service layer
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_operational_hour_days_are_rejected() {
    let app = TestApp::new().await;

    let mut payload = facility_payload("VAL14");
    payload["operationalHours"] = json!([
        { "day": "MONDAY", "openTime": "08:00", "closeTime": "12:00" },
        { "day": "MONDAY", "openTime": "13:00", "closeTime": "17:00" }
    ]);
    let response = app
        .request(Method::POST, "/api/v1/facilities", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("duplicate days found"));
}

#[tokio::test]
async fn us_addresses_require_two_character_state_codes() {
    let app = TestApp::new().await;

    let mut payload = facility_payload("VAL15");
    payload["address"]["stateCode"] = json!("V");
    let response = app
        .request(Method::POST, "/api/v1/facilities", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("stateCode"));

    // The same shape is fine outside the US
    let mut payload = facility_payload("YEG10");
    payload["address"] = json!({
        "street1": "10065 Jasper Ave",
        "city": "Edmonton",
        "zipCode": "T5J 3B1",
        "countryCode": "CAN"
    });
    let response = app
        .request(Method::POST, "/api/v1/facilities", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["address"]["country"], "Canada");

    // A one-character province passes the update path: the US rule does
    // not apply and short codes skip the reference lookup entirely
    let mut payload = facility_payload("YEG10");
    payload.as_object_mut().unwrap().remove("id");
    payload["address"] = json!({
        "street1": "10065 Jasper Ave",
        "city": "Edmonton",
        "zipCode": "T5J 3B1",
        "stateCode": "A",
        "countryCode": "CAN"
    });
    let response = app
        .request(Method::PUT, "/api/v1/facilities/YEG10", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["address"]["stateCode"], "A");
    assert!(body["data"]["address"].get("state").is_none());
}

#[tokio::test]
async fn amenity_contact_email_is_validated() {
    let app = TestApp::new().await;
    app.seed_facility("VAL20").await;
    let type_id = app.seed_amenity_type("Cafeteria").await;

    let mut payload = amenity_payload("VAL20", &type_id);
    payload["contactEmail"] = json!("not-an-email");
    let response = app
        .request(Method::POST, "/api/v1/amenities", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("contactEmail must be a valid email address"));
}

#[tokio::test]
async fn offsite_amenities_require_address_and_hours() {
    let app = TestApp::new().await;
    app.seed_facility("VAL21").await;
    let type_id = app.seed_amenity_type("Gym").await;

    let mut payload = amenity_payload("VAL21", &type_id);
    payload["onsite"] = json!(false);
    let response = app
        .request(Method::POST, "/api/v1/amenities", Some(payload.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("address is required for offsite"));

    payload["address"] = json!({
        "street1": "600 Congress Ave",
        "city": "Austin",
        "zipCode": "78701",
        "stateCode": "TX",
        "countryCode": "USA"
    });
    let response = app
        .request(Method::POST, "/api/v1/amenities", Some(payload.clone()))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("operationalHours is required"));

    payload["operationalHours"] = json!([
        { "day": "SATURDAY", "openTime": "09:00", "closeTime": "13:00" }
    ]);
    let response = app
        .request(Method::POST, "/api/v1/amenities", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
