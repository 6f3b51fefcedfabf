//! End-to-end booking flow driven through the HTTP router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{json, Value};
use tower::ServiceExt;

use barbershop::config::AppConfig;
use barbershop::infrastructure::storage::DEFAULT_PUBLIC_BASE_URL;
use barbershop::infrastructure::{
    connect_and_migrate, DatabaseConfig, InMemoryMailer, InMemoryObjectStore,
};
use barbershop::server::{build_app_state, prometheus_handle, Adapters};
use barbershop::create_api_router;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

struct TestApp {
    router: Router,
    mailer: Arc<InMemoryMailer>,
    objects: Arc<InMemoryObjectStore>,
}

async fn app() -> TestApp {
    let db = connect_and_migrate(&DatabaseConfig::in_memory())
        .await
        .expect("in-memory database");
    let mailer = Arc::new(InMemoryMailer::new());
    let objects = Arc::new(InMemoryObjectStore::new());
    let config = AppConfig::default();
    let adapters = Adapters {
        objects: objects.clone(),
        mailer: mailer.clone(),
        clock: Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        )),
    };
    let state = build_app_state(db, &config, adapters, prometheus_handle());
    TestApp {
        router: create_api_router(state),
        mailer,
        objects,
    }
}

async fn call(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register_and_login(router: &Router, name: &str, email: &str, role: &str) -> String {
    let (status, _) = call(
        router,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "name": name, "email": email, "password": "secret123", "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        router,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": email, "password": "secret123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn client_books_and_cancels_an_appointment() {
    let TestApp { router, .. } = app().await;

    let client = register_and_login(&router, "Ana", "ana@example.com", "client").await;
    let owner = register_and_login(&router, "Bruno", "bruno@example.com", "shop_owner").await;

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/barbershops",
        Some(&owner),
        Some(json!({ "name": "Navalha", "address": "Rua A, 10" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let shop_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/services",
        Some(&owner),
        Some(json!({ "name": "Corte", "description": "Corte simples", "price": 50.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let service_id = body["data"]["id"].as_i64().unwrap();

    let booking = json!({ "scheduled_at": "2025-06-10T10:00:00Z", "service_id": service_id });
    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/appointments",
        Some(&client),
        Some(booking.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["barbershop_id"].as_i64(), Some(shop_id));
    let appointment_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/appointments",
        Some(&client),
        Some(booking),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["error"].as_str(),
        Some("Já existe um agendamento nesse horário.")
    );

    let (status, body) = call(
        &router,
        "GET",
        "/api/v1/appointments/barbershop",
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = call(
        &router,
        "GET",
        "/api/v1/appointments/client?finalized=0",
        Some(&client),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let upcoming = body["data"].as_array().unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["service"]["name"], "Corte");
    assert_eq!(upcoming[0]["barbershop"]["name"], "Navalha");

    let (status, body) = call(
        &router,
        "GET",
        &format!(
            "/api/v1/barbershops/{}/appointments?date=2025-06-10T00:00:00Z",
            shop_id
        ),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = call(
        &router,
        "DELETE",
        &format!("/api/v1/appointments/{}", appointment_id),
        Some(&client),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &router,
        "GET",
        "/api/v1/appointments/barbershop",
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let TestApp { router, .. } = app().await;

    let (status, body) = call(&router, "GET", "/api/v1/appointments/barbershop", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = call(&router, "GET", "/api/v1/barbershops", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &router,
        "GET",
        "/api/v1/barbershops",
        Some("not-a-token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn client_cannot_open_a_barbershop() {
    let TestApp { router, .. } = app().await;
    let client = register_and_login(&router, "Caio", "caio@example.com", "client").await;

    let (status, _) = call(
        &router,
        "POST",
        "/api/v1/barbershops",
        Some(&client),
        Some(json!({ "name": "Pirata", "address": "Rua B" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_without_shop_cannot_list_appointments() {
    let TestApp { router, .. } = app().await;
    let owner = register_and_login(&router, "Davi", "davi@example.com", "shop_owner").await;

    let (status, _) = call(
        &router,
        "GET",
        "/api/v1/appointments/barbershop",
        Some(&owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn password_reset_round_trip() {
    let TestApp { router, mailer, .. } = app().await;
    register_and_login(&router, "Eva", "eva@example.com", "client").await;

    let (status, _) = call(
        &router,
        "POST",
        "/api/v1/auth/password-reset",
        None,
        Some(json!({ "email": "eva@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let token = mailer.sent().last().unwrap().token.clone();
    let (status, _) = call(
        &router,
        "POST",
        "/api/v1/auth/password-reset/confirm",
        None,
        Some(json!({ "email": "eva@example.com", "token": token, "new_password": "novasenha" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(
        &router,
        "POST",
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "eva@example.com", "password": "novasenha" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_and_metrics_are_public() {
    let TestApp { router, .. } = app().await;

    let (status, body) = call(&router, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let response = router
        .clone()
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn client_supplied_photo_keys_are_ignored() {
    let TestApp { router, objects, .. } = app().await;
    let victim = register_and_login(&router, "Gil", "gil@example.com", "shop_owner").await;
    let intruder = register_and_login(&router, "Ivo", "ivo@example.com", "shop_owner").await;
    let victim_url = format!("{}shops/gil.jpg", DEFAULT_PUBLIC_BASE_URL);

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/barbershops",
        Some(&victim),
        Some(json!({ "name": "Gil", "address": "Rua G", "photo_url": &victim_url })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["photo"]["key"], "shops/gil.jpg");

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/barbershops",
        Some(&intruder),
        Some(json!({
            "name": "Ivo",
            "address": "Rua I",
            "photo_url": "https://elsewhere.com/ivo.jpg",
            "photo_key": "shops/gil.jpg"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["photo"]["key"], "");
    let intruder_shop = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(
        &router,
        "PUT",
        "/api/v1/barbershops",
        Some(&intruder),
        Some(json!({
            "id": intruder_shop,
            "name": "Ivo",
            "address": "Rua I",
            "photo_url": &victim_url
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&router, "DELETE", "/api/v1/barbershops", Some(&intruder), None).await;
    assert_eq!(status, StatusCode::OK);

    assert!(objects.deleted_keys().is_empty());
}

#[tokio::test]
async fn deleted_account_cannot_book() {
    let TestApp { router, .. } = app().await;
    let client = register_and_login(&router, "Hugo", "hugo@example.com", "client").await;
    let owner = register_and_login(&router, "Iris", "iris@example.com", "shop_owner").await;

    call(
        &router,
        "POST",
        "/api/v1/barbershops",
        Some(&owner),
        Some(json!({ "name": "Tesoura", "address": "Rua T" })),
    )
    .await;
    let (_, body) = call(
        &router,
        "POST",
        "/api/v1/services",
        Some(&owner),
        Some(json!({ "name": "Barba", "price": 30.0 })),
    )
    .await;
    let service_id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(&router, "DELETE", "/api/v1/users/me", Some(&client), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        &router,
        "POST",
        "/api/v1/appointments",
        Some(&client),
        Some(json!({ "scheduled_at": "2025-06-10T10:00:00Z", "service_id": service_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);
}
