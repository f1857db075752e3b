//! The visita API server: accounts, provider directories, and appointment
//! booking over REST.

use axum::{
    http::header::AUTHORIZATION,
    routing::{delete, get, post},
    Router,
};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::{iter::once, time::Duration};
use tokio::net::TcpListener;
use tower_http::{compression, limit, sensitive_headers, timeout, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Database connections.
mod conn;

/// The error type all handlers return.
mod error;

/// One module per route.
mod handlers;

/// Issuing and checking tokens.
mod jwt;

/// Shared request state.
mod state;

/// Server configuration, from flags or the environment.
#[derive(Debug, Parser)]
struct Config {
    /// Address to listen on
    #[clap(long, env, default_value = "127.0.0.1:3000")]
    address: String,

    /// Request body size limit, in bytes
    #[clap(long, env, default_value = "5242880")]
    body_limit: usize,

    /// Request timeout, in seconds
    #[clap(long, env, default_value = "5", value_parser = duration_parser)]
    request_timeout: Duration,

    /// Postgres connection string
    #[clap(long, env)]
    database_url: String,

    /// Base64-encoded secret for signing JWTs
    #[clap(long, env)]
    jwt_secret: String,

    /// How long issued tokens live, in seconds
    #[clap(long, env, default_value = "86400")]
    token_ttl: i64,
}

/// Parse a whole number of seconds into a `Duration`.
fn duration_parser(s: &str) -> Result<Duration, std::num::ParseIntError> {
    s.parse().map(Duration::from_secs)
}

#[tokio::main]
async fn main() {
    let options = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = PgPoolOptions::new()
        .connect(&options.database_url)
        .await
        .expect("could not connect to the database");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("could not run migrations");

    let state = state::State::new(pool, &options.jwt_secret, options.token_ttl)
        .expect("could not build state (is the JWT secret valid base64?)");

    let app = Router::new()
        .route("/health", get(handlers::health::handler))
        .route("/auth/register", post(handlers::register::handler))
        .route("/auth/jwt/login", post(handlers::login::handler))
        .route("/users/me", get(handlers::me::handler))
        .route(
            "/providers",
            get(handlers::providers::handler).post(handlers::enroll::handler),
        )
        .route(
            "/providers/:id/availability",
            get(handlers::availability::handler),
        )
        .route("/availability", post(handlers::add_slot::handler))
        .route(
            "/appointments",
            get(handlers::appointments::handler).post(handlers::book::handler),
        )
        .route("/appointments/:id", delete(handlers::cancel::handler))
        .layer(trace::TraceLayer::new_for_http())
        .layer(compression::CompressionLayer::new())
        .layer(limit::RequestBodyLimitLayer::new(options.body_limit))
        .layer(sensitive_headers::SetSensitiveHeadersLayer::new(once(
            AUTHORIZATION,
        )))
        .layer(timeout::TimeoutLayer::new(options.request_timeout))
        .with_state(state);

    let listener = TcpListener::bind(options.address).await.unwrap();
    tracing::info!(address = ?listener.local_addr(), "listening");

    axum::serve(listener, app).await.unwrap();
}
