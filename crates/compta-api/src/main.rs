//! 회계 관리 API 서버.
//!
//! 설정을 로드하고 공유 인증 모듈을 한 번 생성한 뒤 Axum 서버를 시작합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, Router};
use compta_core::{init_logging, AppConfig};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use compta_api::repository::InMemoryTypeRepository;
use compta_api::routes::create_api_router;
use compta_api::state::AppState;
use compta_api::AuthModule;

/// 라우터 생성.
fn create_router(state: Arc<AppState>, auth: &AuthModule, config: &AppConfig) -> Router {
    create_api_router(auth)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_secs),
        ))
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config_path =
        std::env::var("COMPTA_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let config = AppConfig::load(&config_path)
        .with_context(|| format!("설정 로드 실패: {}", config_path))?;

    init_logging(&config.logging)?;
    info!("Starting Compta API server...");

    // 모든 라우터가 공유하는 단일 인증 모듈
    let auth = AuthModule::from_config(&config.auth)?;
    info!(
        leeway_secs = config.auth.leeway_secs,
        issuer = ?config.auth.issuer,
        "Auth module initialized"
    );

    let state = Arc::new(AppState::new(Arc::new(
        InMemoryTypeRepository::with_defaults(),
    )));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "소켓 주소가 유효하지 않습니다: {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let app = create_router(state, &auth, &config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
