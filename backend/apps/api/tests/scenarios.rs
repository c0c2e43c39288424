//! End-to-end scenarios against the assembled router (in-memory stores)

use std::sync::Arc;

use api::{AdminSeed, AppState, build_router, seed_admin};
use auth::{AuthConfig, InMemoryUserRepository};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use donation::{DonationConfig, InMemoryDonationRepository};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app() -> Router {
    let users = Arc::new(InMemoryUserRepository::new());
    let auth = Arc::new(AuthConfig::development());

    seed_admin(
        users.clone(),
        auth.clone(),
        &AdminSeed {
            username: "admin".into(),
            password: "password".into(),
            name: Some("Relief Admin".into()),
        },
    )
    .await
    .unwrap();

    build_router(AppState {
        users,
        donations: Arc::new(InMemoryDonationRepository::new()),
        auth,
        donation: Arc::new(DonationConfig::default()),
    })
}

fn json_post(uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// `name=value` of the session cookie
async fn sign_in(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_post(
            "/api/auth/signin",
            json!({"username": "admin", "password": "password"}),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn kpay_donation(currency: &str) -> Value {
    json!({
        "amount": 100,
        "currency": currency,
        "method": "KPay",
        "dateTime": "2025-04-01T10:00"
    })
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn unauthenticated_register_is_rejected() {
    let response = app()
        .await
        .oneshot(json_post(
            "/api/auth/register",
            json!({"name": "Alice", "username": "alice", "password": "secret1"}),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["message"],
        "Unauthorized. Only authenticated users can create new accounts."
    );
}

#[tokio::test]
async fn authenticated_kpay_mmk_donation_is_stored() {
    let app = app().await;
    let cookie = sign_in(&app).await;

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/admin/donations",
            kpay_donation("MMK"),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Donation added successfully");

    let id = body["donation"]["id"].as_i64().unwrap();
    let stored = app
        .oneshot(get(&format!("/api/admin/donations/{id}"), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(stored.status(), StatusCode::OK);
    assert_eq!(body_json(stored).await["currency"], "MMK");
}

#[tokio::test]
async fn kpay_vnd_donation_fails_on_currency() {
    let app = app().await;
    let cookie = sign_in(&app).await;

    let response = app
        .oneshot(json_post(
            "/api/admin/donations",
            kpay_donation("VND"),
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["errors"]["currency"].is_array());
}

#[tokio::test]
async fn unauthenticated_admin_page_redirects_to_login() {
    let response = app()
        .await
        .oneshot(get("/admin/donations", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        "/auth/login?redirect_to=%2Fadmin%2Fdonations"
    );
}

#[tokio::test]
async fn unknown_admin_path_is_guarded_too() {
    let app = app().await;

    let anonymous = app
        .clone()
        .oneshot(get("/admin/reports?year=2025", None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&anonymous),
        "/auth/login?redirect_to=%2Fadmin%2Freports%3Fyear%3D2025"
    );

    let cookie = sign_in(&app).await;
    let signed_in = app
        .oneshot(get("/admin/reports", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(signed_in.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = app().await;
    let cookie = sign_in(&app).await;
    let body = json!({"name": "Second", "username": "second", "password": "secret1"});

    let first = app
        .clone()
        .oneshot(json_post("/api/auth/register", body.clone(), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(json_post("/api/auth/register", body, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = app().await;

    let wrong_password = app
        .clone()
        .oneshot(json_post(
            "/api/auth/signin",
            json!({"username": "admin", "password": "not-it"}),
            None,
        ))
        .await
        .unwrap();
    let unknown_user = app
        .oneshot(json_post(
            "/api/auth/signin",
            json!({"username": "nobody", "password": "password"}),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), unknown_user.status());
    assert_eq!(body_json(wrong_password).await, body_json(unknown_user).await);
}

#[tokio::test]
async fn admin_api_requires_session() {
    let app = app().await;

    let anonymous = app
        .clone()
        .oneshot(json_post("/api/admin/donations", kpay_donation("MMK"), None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(anonymous).await["message"], "Unauthorized");

    let tampered = app
        .oneshot(get("/api/admin/donations", Some("relief_session=abc.def")))
        .await
        .unwrap();
    assert_eq!(tampered.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn login_form_redirects_to_local_target_only() {
    let app = app().await;

    let local = app
        .clone()
        .oneshot(form_post(
            "/auth/login",
            "username=admin&password=password&redirect_to=%2Fadmin%2Fdonations",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(local.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&local), "/admin/donations");
    assert!(local.headers().contains_key(header::SET_COOKIE));

    let foreign = app
        .oneshot(form_post(
            "/auth/login",
            "username=admin&password=password&redirect_to=https%3A%2F%2Fevil.example",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(location(&foreign), "/admin");
}

#[tokio::test]
async fn login_form_shows_banner_on_failure() {
    let response = app()
        .await
        .oneshot(form_post("/auth/login", "username=admin&password=nope", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response).await.contains("Invalid username or password"));
}

#[tokio::test]
async fn create_form_uses_shared_validator() {
    let app = app().await;
    let cookie = sign_in(&app).await;

    let invalid = app
        .clone()
        .oneshot(form_post(
            "/admin/donations/create",
            "donorName=&amount=50&currency=MMK&method=BIDV&dateTime=2025-04-01T10%3A00",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_text(invalid)
            .await
            .contains("Currency must match payment method (KPay uses MMK, BIDV uses VND)")
    );

    let valid = app
        .clone()
        .oneshot(form_post(
            "/admin/donations/create",
            "donorName=Ko+Aung&amount=50&currency=VND&method=BIDV&dateTime=2025-04-01T10%3A00",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(valid.status(), StatusCode::OK);
    assert!(body_text(valid).await.contains("Donation added successfully"));

    let listing = app
        .oneshot(get("/admin/donations", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
    assert!(body_text(listing).await.contains("Ko Aung"));
}

#[tokio::test]
async fn home_page_hides_donor_names() {
    let app = app().await;
    let cookie = sign_in(&app).await;

    let mut named = kpay_donation("MMK");
    named["donorName"] = json!("Secret Donor");
    app.clone()
        .oneshot(json_post("/api/admin/donations", named, Some(&cookie)))
        .await
        .unwrap();

    let home = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(home.status(), StatusCode::OK);
    let html = body_text(home).await;
    assert!(html.contains("Donor-1"));
    assert!(html.contains("100.00 Ks"));
    assert!(!html.contains("Secret Donor"));

    let stats = app.oneshot(get("/api/stats", None)).await.unwrap();
    let body = body_json(stats).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["byMethod"]["KPay"], 1);
}

#[tokio::test]
async fn dashboard_lists_administrators() {
    let app = app().await;
    let cookie = sign_in(&app).await;

    let response = app.oneshot(get("/admin", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Relief Admin"));
    assert!(html.contains("No donations yet."));
}

#[tokio::test]
async fn logout_clears_cookie() {
    let response = app()
        .await
        .oneshot(form_post("/auth/logout", "", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn health_check() {
    let response = app().await.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
