//! Vitalink Web Server
//!
//! Axum-based HTTP API for device readings and user registration, plus the
//! WebSocket channel dashboards watch for live readings.

pub mod auth;
pub mod response;
pub mod routes;
pub mod state;
pub mod websocket;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use state::AppState;

/// Network and CORS settings for [`run_server`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Dashboard origin allowed to call the API with credentials. Any origin
    /// is allowed, without credentials, when unset.
    pub frontend_url: Option<String>,
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, permissive_cors())
}

fn create_router_with_cors(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/readings", post(routes::readings::ingest))
        .route("/users", get(routes::users::list_users).post(routes::users::register_user))
        .route(
            "/users/{id}",
            get(routes::users::get_user).post(routes::users::update_health_status),
        )
        .route("/ws", get(websocket::ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn permissive_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

fn cors_layer(frontend_url: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origin) = frontend_url else {
        return Ok(permissive_cors());
    };

    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Run the web server.
pub async fn run_server(state: AppState, config: ServerConfig) -> anyhow::Result<()> {
    let cors = cors_layer(config.frontend_url.as_deref())?;
    let app = create_router_with_cors(state, cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
