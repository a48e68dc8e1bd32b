//! 인증 경계 통합 테스트
//!
//! 공유 인증 모듈로 보호된 라우터에서 가드가 핸들러와 DTO 검증보다 먼저
//! 실행되는지, 거부 응답이 사유와 무관하게 동일한지 확인합니다.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    routing::get,
    Router,
};
use chrono::Utc;
use compta_api::{
    create_api_router, AppState, AuthModule, AuthUser, InMemoryTypeRepository,
};
use compta_core::{AuthConfig, Role, Session};
use tower::ServiceExt;

const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";
const OTHER_SECRET: &str = "another-secret-key-for-testing-minimum-32-chars";

fn auth_module(secret: &str) -> AuthModule {
    AuthModule::from_config(&AuthConfig::with_secret(secret)).unwrap()
}

fn app(auth: &AuthModule) -> Router {
    let state = Arc::new(AppState::new(Arc::new(
        InMemoryTypeRepository::with_defaults(),
    )));
    create_api_router(auth).with_state(state)
}

/// 호출 횟수를 세는 보호된 라우터.
fn counting_app(auth: &AuthModule, calls: Arc<AtomicUsize>) -> Router {
    let router = Router::new().route(
        "/protected",
        get(move |AuthUser(claims): AuthUser| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                claims.username
            }
        }),
    );
    auth.protect(router)
}

fn get_with(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn missing_credential_never_invokes_handler() {
    let auth = auth_module(TEST_SECRET);
    let calls = Arc::new(AtomicUsize::new(0));
    let app = counting_app(&auth, calls.clone());

    let response = app.oneshot(get_with("/protected", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_credential_invokes_handler_once() {
    let auth = auth_module(TEST_SECRET);
    let calls = Arc::new(AtomicUsize::new(0));
    let app = counting_app(&auth, calls.clone());
    let token = auth
        .issue_token("u1", "alice", Role::User, Utc::now().timestamp())
        .unwrap();

    let response = app
        .oneshot(get_with("/protected", Some(&format!("Bearer {}", token))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"alice");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn every_denial_has_identical_body() {
    let auth = auth_module(TEST_SECRET);
    let calls = Arc::new(AtomicUsize::new(0));
    let now = Utc::now().timestamp();

    let forged = auth_module(OTHER_SECRET)
        .issue_token("u1", "mallory", Role::Admin, now)
        .unwrap();
    let expired = auth
        .issue_token("u1", "alice", Role::Admin, now - 2 * 3600)
        .unwrap();

    let cases = [
        None,
        Some("Basic dXNlcjpwYXNz".to_string()),
        Some("Bearer not-a-token".to_string()),
        Some(format!("Bearer {}", forged)),
        Some(format!("Bearer {}", expired)),
    ];

    let mut bodies = Vec::new();
    for authorization in cases {
        let response = counting_app(&auth, calls.clone())
            .oneshot(get_with("/protected", authorization.as_deref()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(body_bytes(response).await);
    }

    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
    let body: serde_json::Value = serde_json::from_slice(&bodies[0]).unwrap();
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn guard_runs_before_dto_validation() {
    let auth = auth_module(TEST_SECRET);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/declaration-types/1/months")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"months": [0, 5, 13]}"#))
        .unwrap();

    let response = app(&auth).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn feature_routers_share_one_verification_policy() {
    let auth = auth_module(TEST_SECRET);
    let token = auth
        .issue_token("u1", "alice", Role::User, Utc::now().timestamp())
        .unwrap();
    let forged = auth_module(OTHER_SECRET)
        .issue_token("u1", "alice", Role::User, Utc::now().timestamp())
        .unwrap();

    for uri in [
        "/api/v1/auth/session",
        "/api/v1/livre-types",
        "/api/v1/declaration-types",
    ] {
        let ok = app(&auth)
            .oneshot(get_with(uri, Some(&format!("Bearer {}", token))))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK, "{uri}");

        let denied = app(&auth)
            .oneshot(get_with(uri, Some(&format!("Bearer {}", forged))))
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn session_endpoint_returns_verified_claims() {
    let auth = auth_module(TEST_SECRET);
    let now = Utc::now().timestamp();
    let token = auth
        .issue_token("u42", "bob", Role::Accountant, now)
        .unwrap();

    let response = app(&auth)
        .oneshot(get_with(
            "/api/v1/auth/session",
            Some(&format!("Bearer {}", token)),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let session: Session = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(session.user_id, "u42");
    assert_eq!(session.role, Role::Accountant);
    assert_eq!(session.expires_at, now + 3600);
}

#[tokio::test]
async fn health_is_public() {
    let auth = auth_module(TEST_SECRET);
    let response = app(&auth)
        .oneshot(get_with("/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
