use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use budgetary_server::{
    api::app_router,
    build_state,
    config::{Config, StorageKind},
};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

async fn sqlite_app() -> (TempDir, Router) {
    let tmp = tempdir().unwrap();
    let config = Config {
        db_path: tmp.path().join("api.db").to_string_lossy().to_string(),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    (tmp, app_router(state, &config))
}

async fn memory_app() -> Router {
    let config = Config {
        storage: StorageKind::Memory,
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    app_router(state, &config)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    Response {
        status,
        headers,
        body,
    }
}

fn amount(value: &Value) -> f64 {
    value["amount"].as_f64().unwrap()
}

async fn create(app: &Router, path: &str, body: Value) -> String {
    let created = send(app, Method::POST, path, Some(body)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    created.json()["id"].as_str().unwrap().to_string()
}

/// Create, read, update, read, delete, read for one child collection.
async fn child_lifecycle(app: &Router, path: &str, entity: &str) {
    let created = send(app, Method::POST, path, Some(json!({"amount": 1.0}))).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json();
    let id = body["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(amount(&body), 1.0);
    assert_eq!(
        created.headers[header::LOCATION],
        format!("{}/{}", path, id).as_str()
    );
    assert_eq!(
        created.headers["x-budgetaryapp-alert"],
        format!("budgetaryApp.{}.created", entity).as_str()
    );
    assert_eq!(created.headers["x-budgetaryapp-params"], id.as_str());

    let item_uri = format!("{}/{}", path, id);
    let fetched = send(app, Method::GET, &item_uri, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(amount(&fetched.json()), 1.0);

    let updated = send(
        app,
        Method::PUT,
        path,
        Some(json!({"id": id, "amount": 2.0})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(amount(&updated.json()), 2.0);
    assert_eq!(
        updated.headers["x-budgetaryapp-alert"],
        format!("budgetaryApp.{}.updated", entity).as_str()
    );

    let listed = send(app, Method::GET, path, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let all = listed.json();
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(amount(&all[0]), 2.0);

    let deleted = send(app, Method::DELETE, &item_uri, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.body.is_empty());
    assert_eq!(
        deleted.headers["x-budgetaryapp-alert"],
        format!("budgetaryApp.{}.deleted", entity).as_str()
    );

    let gone = send(app, Method::GET, &item_uri, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert!(gone.body.is_empty());
}

#[tokio::test]
async fn income_lifecycle_on_sqlite() {
    let (_tmp, app) = sqlite_app().await;
    child_lifecycle(&app, "/api/incomes", "income").await;
}

#[tokio::test]
async fn outcome_lifecycle_on_sqlite() {
    let (_tmp, app) = sqlite_app().await;
    child_lifecycle(&app, "/api/outcomes", "outcome").await;
}

#[tokio::test]
async fn income_lifecycle_in_memory() {
    let app = memory_app().await;
    child_lifecycle(&app, "/api/incomes", "income").await;
}

#[tokio::test]
async fn budget_create_and_update() {
    let (_tmp, app) = sqlite_app().await;
    let created = send(
        &app,
        Method::POST,
        "/api/budgets",
        Some(json!({"title": "Household", "description": "Monthly"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let body = created.json();
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["title"], "Household");
    assert_eq!(body["incomes"], json!([]));

    let updated = send(
        &app,
        Method::PUT,
        "/api/budgets",
        Some(json!({"id": id, "title": "Household 2025"})),
    )
    .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["title"], "Household 2025");

    let fetched = send(&app, Method::GET, &format!("/api/budgets/{}", id), None).await;
    assert_eq!(fetched.json()["title"], "Household 2025");
    assert_eq!(fetched.json()["description"], Value::Null);
}

#[tokio::test]
async fn create_with_id_is_rejected() {
    let app = memory_app().await;
    let response = send(
        &app,
        Method::POST,
        "/api/incomes",
        Some(json!({"id": "existing", "amount": 1.0})),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.headers["x-budgetaryapp-error"], "error.idexists");
    assert_eq!(response.headers["x-budgetaryapp-params"], "income");
    let body = response.json();
    assert_eq!(body["errorKey"], "idexists");
    assert_eq!(body["entityName"], "income");
    assert_eq!(body["message"], "A new income cannot already have an ID");

    let listed = send(&app, Method::GET, "/api/incomes", None).await;
    assert_eq!(listed.json(), json!([]));
}

#[tokio::test]
async fn update_without_id_is_rejected() {
    let app = memory_app().await;
    let response = send(
        &app,
        Method::PUT,
        "/api/budgets",
        Some(json!({"title": "No id"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.headers["x-budgetaryapp-error"], "error.idnull");
    assert_eq!(response.headers["x-budgetaryapp-params"], "budget");
    assert_eq!(response.json()["message"], "Invalid id");
}

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let app = memory_app().await;

    let outcome = send(&app, Method::POST, "/api/outcomes", Some(json!({}))).await;
    assert_eq!(outcome.status, StatusCode::BAD_REQUEST);
    assert_eq!(outcome.headers["x-budgetaryapp-error"], "error.validation");
    assert_eq!(outcome.headers["x-budgetaryapp-params"], "outcome");

    let budget = send(
        &app,
        Method::POST,
        "/api/budgets",
        Some(json!({"title": "   "})),
    )
    .await;
    assert_eq!(budget.status, StatusCode::BAD_REQUEST);
    assert_eq!(budget.json()["errorKey"], "validation");

    let listed = send(&app, Method::GET, "/api/outcomes", None).await;
    assert_eq!(listed.json(), json!([]));
}

#[tokio::test]
async fn mistyped_bodies_are_bad_requests() {
    let app = memory_app().await;

    for body in [
        json!({"amount": "abc"}),
        json!({"id": 5, "amount": 1}),
        json!({"amount": 1e30}),
    ] {
        let response = send(&app, Method::POST, "/api/incomes", Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.headers["x-budgetaryapp-error"], "error.badrequest");
        assert_eq!(response.headers["x-budgetaryapp-params"], "income");
        let error = response.json();
        assert_eq!(error["code"], 400);
        assert_eq!(error["errorKey"], "badrequest");
        assert_eq!(error["entityName"], "income");
        assert!(!error["message"].as_str().unwrap().is_empty());
    }

    let update = send(
        &app,
        Method::PUT,
        "/api/budgets",
        Some(json!({"id": "b-1", "title": ["not", "text"]})),
    )
    .await;
    assert_eq!(update.status, StatusCode::BAD_REQUEST);
    assert_eq!(update.json()["entityName"], "budget");

    let listed = send(&app, Method::GET, "/api/incomes", None).await;
    assert_eq!(listed.json(), json!([]));
}

#[tokio::test]
async fn missing_entities() {
    let app = memory_app().await;

    let fetched = send(&app, Method::GET, "/api/budgets/nope", None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);
    assert!(fetched.body.is_empty());

    let deleted = send(&app, Method::DELETE, "/api/budgets/nope", None).await;
    assert_eq!(deleted.status, StatusCode::OK);
}

#[tokio::test]
async fn linking_updates_both_sides() {
    let (_tmp, app) = sqlite_app().await;
    let budget_id = create(&app, "/api/budgets", json!({"title": "Trip"})).await;
    let income_id = create(&app, "/api/incomes", json!({"amount": 100.5})).await;
    let outcome_id = create(&app, "/api/outcomes", json!({"amount": 20.0})).await;

    let linked = send(
        &app,
        Method::PUT,
        &format!("/api/budgets/{}/incomes/{}", budget_id, income_id),
        None,
    )
    .await;
    assert_eq!(linked.status, StatusCode::OK);
    assert_eq!(linked.json()["incomes"], json!([{"id": income_id}]));

    let linked = send(
        &app,
        Method::PUT,
        &format!("/api/budgets/{}/outcomes/{}", budget_id, outcome_id),
        None,
    )
    .await;
    assert_eq!(linked.json()["outcomes"], json!([{"id": outcome_id}]));

    let income = send(&app, Method::GET, &format!("/api/incomes/{}", income_id), None).await;
    assert_eq!(income.json()["budget"], json!({"id": budget_id}));
    let outcome = send(
        &app,
        Method::GET,
        &format!("/api/outcomes/{}", outcome_id),
        None,
    )
    .await;
    assert_eq!(outcome.json()["budget"], json!({"id": budget_id}));

    let unlinked = send(
        &app,
        Method::DELETE,
        &format!("/api/budgets/{}/incomes/{}", budget_id, income_id),
        None,
    )
    .await;
    assert_eq!(unlinked.status, StatusCode::OK);
    assert_eq!(unlinked.json()["incomes"], json!([]));

    let income = send(&app, Method::GET, &format!("/api/incomes/{}", income_id), None).await;
    assert!(income.json().get("budget").is_none());
}

#[tokio::test]
async fn linking_a_missing_child_is_not_found() {
    let app = memory_app().await;
    let budget_id = create(&app, "/api/budgets", json!({"title": "Trip"})).await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/budgets/{}/incomes/ghost", budget_id),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let budget = send(&app, Method::GET, &format!("/api/budgets/{}", budget_id), None).await;
    assert_eq!(budget.json()["incomes"], json!([]));
}
