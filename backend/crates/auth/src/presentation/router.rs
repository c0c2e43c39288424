//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router (mounted under `/api/auth`)
pub fn auth_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState { repo, config };

    Router::new()
        .route("/signin", post(handlers::sign_in::<R>))
        .route("/signout", post(handlers::sign_out::<R>))
        .route("/session", get(handlers::session_status::<R>))
        .route("/register", post(handlers::register::<R>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::user::NewUser;
    use crate::domain::value_object::{
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use crate::infra::memory::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    async fn app() -> Router {
        let repo = InMemoryUserRepository::new();
        let raw = RawPassword::new("password".to_string()).unwrap();
        repo.create(&NewUser {
            user_name: UserName::new("alice").unwrap(),
            display_name: None,
            password: UserPassword::from_raw(&raw, None).unwrap(),
        })
        .await
        .unwrap();

        auth_router(Arc::new(repo), Arc::new(AuthConfig::development()))
    }

    fn json_post(uri: &str, body: serde_json::Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn sign_in_cookie(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(json_post(
                "/signin",
                serde_json::json!({"username": "alice", "password": "password"}),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_sign_in_sets_cookie() {
        let app = app().await;
        let cookie = sign_in_cookie(&app).await;
        assert!(cookie.starts_with("relief_session="));
    }

    #[tokio::test]
    async fn test_sign_in_wrong_password() {
        let response = app()
            .await
            .oneshot(json_post(
                "/signin",
                serde_json::json!({"username": "alice", "password": "nope"}),
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let body = body_json(response).await;
        assert_eq!(body["message"], "Invalid username or password");
    }

    #[tokio::test]
    async fn test_session_status() {
        let app = app().await;

        let anonymous = app
            .clone()
            .oneshot(Request::get("/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(anonymous).await["authenticated"], false);

        let cookie = sign_in_cookie(&app).await;
        let signed_in = app
            .oneshot(
                Request::get("/session")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(signed_in).await;
        assert_eq!(body["authenticated"], true);
        assert_eq!(body["user"]["username"], "alice");
    }

    #[tokio::test]
    async fn test_register_requires_session() {
        let response = app()
            .await
            .oneshot(json_post(
                "/register",
                serde_json::json!({"name": "Bob", "username": "bob", "password": "secret1"}),
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
    async fn test_register_then_duplicate() {
        let app = app().await;
        let cookie = sign_in_cookie(&app).await;
        let body = serde_json::json!({"name": "Bob", "username": "bob", "password": "secret1"});

        let created = app
            .clone()
            .oneshot(json_post("/register", body.clone(), Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        assert_eq!(body_json(created).await["message"], "User registered successfully");

        let duplicate = app
            .oneshot(json_post("/register", body, Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(duplicate).await["message"], "Username already taken");
    }

    #[tokio::test]
    async fn test_register_validation_errors() {
        let app = app().await;
        let cookie = sign_in_cookie(&app).await;

        let response = app
            .oneshot(json_post(
                "/register",
                serde_json::json!({"name": "B", "username": "bo", "password": "123"}),
                Some(&cookie),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["name"][0], "Name must be at least 2 characters");
        assert_eq!(body["errors"]["username"][0], "Username must be at least 3 characters");
        assert_eq!(body["errors"]["password"][0], "Password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_register_wrongly_typed_fields() {
        let app = app().await;
        let cookie = sign_in_cookie(&app).await;

        let response = app
            .oneshot(json_post(
                "/register",
                serde_json::json!({"name": 1, "username": "bob", "password": true}),
                Some(&cookie),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["name"][0], "Name must be at least 2 characters");
        assert_eq!(body["errors"]["password"][0], "Password must be at least 6 characters");
        assert!(body["errors"]["username"].is_null());
    }

    #[tokio::test]
    async fn test_sign_out_clears_cookie() {
        let response = app()
            .await
            .oneshot(Request::post("/signout").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
    }
}
