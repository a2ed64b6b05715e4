use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::Key};

use crate::constants::*;
use crate::state::AppState;
use crate::{auth, budget, transactions};

/// Builds the API router with sessions, request tracing and, when an origin
/// is given, credentialed CORS for that origin.
pub fn build_router(
    state: AppState,
    session_secret: &str,
    cors_origin: Option<&str>,
) -> anyhow::Result<Router> {
    let key = Key::try_from(session_secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("Invalid session secret: {}", e))?;

    // TODO: swap MemoryStore for a persistent store so sessions survive restarts
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_name(SESSION_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_EXPIRY_DAYS)))
        .with_signed(key);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/summary", get(budget::get_home_summary))
        .route("/budget", get(budget::get_budget).put(budget::set_budget))
        .route(
            "/transactions",
            get(transactions::get_transactions).post(transactions::create_transaction),
        )
        .route(
            "/transactions/{id}",
            put(transactions::update_transaction).delete(transactions::delete_transaction),
        )
        .layer(session_layer)
        .with_state(state);

    if let Some(origin) = cors_origin {
        let origin = HeaderValue::from_str(origin)
            .with_context(|| format!("Invalid CORS origin {origin:?}"))?;
        router = router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_credentials(true)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    Ok(router.layer(TraceLayer::new_for_http()))
}

async fn root() -> &'static str {
    "Budget tracker is running"
}
