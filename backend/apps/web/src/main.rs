//! Web Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors are rendered by the
//! feature crates.

mod app;
mod config;

use auth::{AuthAppState, SupabaseAuth};
use family::{FamilyAppState, SupabaseFamilyStore};
use platform::supabase::SupabaseClient;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::WebConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web=info,auth=info,family=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WebConfig::from_env()?;

    let client = SupabaseClient::new(config.supabase.clone())?;
    tracing::info!(url = %config.supabase.url, "Supabase client ready");

    let auth_state = AuthAppState::new(SupabaseAuth::new(client.clone()), config.auth.clone());
    let family_state = FamilyAppState::new(
        SupabaseFamilyStore::new(client),
        auth_state.backend.clone(),
        config.onboarding.clone(),
    );

    let cors = app::cors_layer(&config.frontend_origins, &config.auth.gate.redirect_header);

    let app = app::build_router(auth_state, family_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
