use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use facilities_api::{
    config::AppConfig,
    db,
    events::{self},
    handlers::AppServices,
    AppState,
};

/// Helper harness for spinning up an application state backed by an
/// in-memory SQLite database.
pub struct TestApp {
    router: Router,
    #[allow(dead_code)]
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    ///
    /// The pool is pinned to a single connection so `sqlite::memory:`
    /// behaves like one database instead of one per connection.
    pub async fn new() -> Self {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");

        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let (event_sender, event_rx) = events::create_event_channel(64);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), Some(Arc::new(event_sender.clone())));

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = Router::new()
            .nest("/api/v1", facilities_api::api_v1_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// POST a facility payload and return the saved facility data.
    pub async fn seed_facility(&self, id: &str) -> Value {
        let response = self
            .request(Method::POST, "/api/v1/facilities", Some(facility_payload(id)))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "failed to seed facility {id}");
        body_json(response).await["data"].clone()
    }

    /// Register an amenity type and return its id as a string.
    pub async fn seed_amenity_type(&self, name: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/v1/amenity-types",
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(
            response.status(),
            StatusCode::CREATED,
            "failed to seed amenity type {name}"
        );
        body_json(response).await["data"]["id"]
            .as_str()
            .expect("amenity type id")
            .to_string()
    }

    /// Register a transportation type and return its id as a string.
    pub async fn seed_transportation_type(&self, name: &str) -> String {
        let response = self
            .request(
                Method::POST,
                "/api/v1/transportation-types",
                Some(json!({ "name": name })),
            )
            .await;
        assert_eq!(
            response.status(),
            StatusCode::CREATED,
            "failed to seed transportation type {name}"
        );
        body_json(response).await["data"]["id"]
            .as_str()
            .expect("transportation type id")
            .to_string()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

/// Decode a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not valid json")
}

/// A complete, valid facility save payload for the given facility code.
pub fn facility_payload(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Facility {id}"),
        "campusCode": "AUS",
        "address": {
            "street1": "501 Congress Ave",
            "city": "Austin",
            "zipCode": "78701",
            "stateCode": "TX",
            "countryCode": "USA"
        },
        "timeZone": "America/Chicago",
        "hotelingSite": true,
        "operationalHours": [
            { "day": "MONDAY", "openTime": "08:00", "closeTime": "17:00" },
            { "day": "FRIDAY", "openTime": "08:00", "closeTime": "15:00" }
        ]
    })
}

/// An amenity create payload tied to the given facility and type.
#[allow(dead_code)]
pub fn amenity_payload(facility_id: &str, type_id: &str) -> Value {
    json!({
        "facilityId": facility_id,
        "typeId": type_id,
        "description": "Third floor cafeteria",
        "contactEmail": "cafeteria@example.com",
        "onsite": true
    })
}

/// A transportation create payload tied to the given facility and type.
#[allow(dead_code)]
pub fn transportation_payload(facility_id: &str, type_id: &str) -> Value {
    json!({
        "facilityId": facility_id,
        "typeId": type_id,
        "description": "Garage level B1",
        "onsite": true
    })
}
