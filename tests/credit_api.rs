use std::{collections::HashSet, sync::Arc};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use credit_api::store::memory::MemoryStore;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    credit_api::app(Arc::new(MemoryStore::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_text(app, method, uri, body.map(|json| json.to_string())).await
}

async fn send_text(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(text)
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn customer_body(cpf: &str, email: &str) -> Value {
    json!({
        "firstName": "nome",
        "lastName": "sobrenome",
        "cpf": cpf,
        "email": email,
        "password": "senhaconfiavel",
        "zipCode": "986412",
        "street": "rua tranquila",
        "income": 1000.0
    })
}

fn credit_body(customer_id: i64) -> Value {
    json!({
        "creditValue": 500.0,
        "dayFirstOfInstallment": "2024-04-22",
        "numberOfInstallments": 4,
        "customerId": customer_id
    })
}

/// Decimal fields may come back as JSON strings or numbers.
fn decimal_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn raw_credit_body(credit_value: &str, customer_id: i64) -> String {
    format!(
        r#"{{"creditValue":{credit_value},"dayFirstOfInstallment":"2024-04-22","numberOfInstallments":4,"customerId":{customer_id}}}"#
    )
}

async fn create_customer(app: &Router, cpf: &str, email: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/customers",
        Some(customer_body(cpf, email)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn create_credit(app: &Router, customer_id: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/credits",
        Some(credit_body(customer_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["creditCode"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn should_create_credit_and_return_201() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;
    assert_eq!(customer_id, 1);

    let (status, body) = send(&app, Method::POST, "/api/credits", Some(credit_body(1))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["customerId"], 1);
    assert_eq!(body["numberOfInstallments"], 4);
    assert_eq!(body["dayFirstOfInstallment"], "2024-04-22");
    assert_eq!(body["status"], "IN_PROGRESS");
    assert_eq!(body["emailCustomer"], "joe@gmail.com");
    assert!(Uuid::parse_str(body["creditCode"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn customer_minimal_payload_is_accepted() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(json!({
            "firstName": "nome",
            "lastName": "sobrenome",
            "cpf": "78240212034",
            "email": "joe@gmail.com",
            "income": 1000.0
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn should_not_create_credit_given_invalid_customer_id_and_return_400() {
    let app = app();
    create_customer(&app, "78240212034", "joe@gmail.com").await;

    let (status, body) = send(&app, Method::POST, "/api/credits", Some(credit_body(72))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, body) = send(&app, Method::GET, "/api/credits?customerId=72", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn should_find_all_by_customer_id_and_return_200() {
    let app = app();
    let joe = create_customer(&app, "78240212034", "joe@gmail.com").await;
    let ann = create_customer(&app, "52998224725", "ann@gmail.com").await;
    let first = create_credit(&app, joe).await;
    let second = create_credit(&app, joe).await;
    create_credit(&app, ann).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/credits?customerId={joe}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let codes: HashSet<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["creditCode"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, HashSet::from([first, second]));
}

#[tokio::test]
async fn should_find_by_credit_code_and_return_200() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;
    let code = create_credit(&app, customer_id).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/credits/{code}?customerId={customer_id}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["creditCode"], code);
    assert_eq!(body["customerId"], customer_id);
}

#[tokio::test]
async fn should_not_find_by_invalid_credit_code_and_return_400() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/credits/{}?customerId={customer_id}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/credits/not-a-uuid?customerId={customer_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_not_find_credit_by_different_customer_id_and_return_400() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;
    let code = create_credit(&app, customer_id).await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/credits/{code}?customerId=64"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("does not belong")
    );
}

#[tokio::test]
async fn missing_customer_id_query_is_rejected() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/api/credits", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_customer_fields_return_400() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(customer_body("12345678900", "joe@gmail.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(customer_body("78240212034", "not-an-email")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_customer_is_rejected() {
    let app = app();
    create_customer(&app, "78240212034", "joe@gmail.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/customers",
        Some(customer_body("782.402.120-34", "other@gmail.com")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_customer_by_id() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/customers/{customer_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "nome");
    assert_eq!(body["zipCode"], "986412");

    let (status, _) = send(&app, Method::GET, "/api/customers/99", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn too_many_installments_return_400() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;

    let mut body = credit_body(customer_id);
    body["numberOfInstallments"] = json!(49);
    let (status, _) = send(&app, Method::POST, "/api/credits", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_backend() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "memory");
}

#[tokio::test]
async fn credit_value_keeps_its_exact_decimal_digits() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;

    let (status, body) = send_text(
        &app,
        Method::POST,
        "/api/credits",
        Some(raw_credit_body("0.1", customer_id)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(decimal_text(&body["creditValue"]), "0.1");
}

#[tokio::test]
async fn credit_values_that_do_not_fit_two_decimals_return_400() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;

    for value in ["0.001", "1e20"] {
        let (status, body) = send_text(
            &app,
            Method::POST,
            "/api/credits",
            Some(raw_credit_body(value, customer_id)),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "creditValue {value}");
        assert_eq!(body["error"]["code"], "validation_error");
    }

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/credits?customerId={customer_id}"),
        None,
    )
    .await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn missing_customer_id_in_body_returns_validation_error() {
    let app = app();
    create_customer(&app, "78240212034", "joe@gmail.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/credits",
        Some(json!({
            "creditValue": 500.0,
            "dayFirstOfInstallment": "2024-04-22",
            "numberOfInstallments": 4
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(
        body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("customerId")
    );
}

#[tokio::test]
async fn malformed_bodies_return_validation_error() {
    let app = app();
    let customer_id = create_customer(&app, "78240212034", "joe@gmail.com").await;

    let mut bad_date = credit_body(customer_id);
    bad_date["dayFirstOfInstallment"] = json!("2024-13-40");
    let (status, body) = send(&app, Method::POST, "/api/credits", Some(bad_date)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");

    let (status, body) = send_text(
        &app,
        Method::POST,
        "/api/customers",
        Some("{not json".to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
}
