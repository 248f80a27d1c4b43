//! Clinic API server
//!
//! Startup uses `anyhow`; request-level errors go through `kernel::error::AppError`.

mod app;
mod config;
mod contacts;

use std::net::SocketAddr;

use chrono::Utc;
use identity::{MemoryCredentialStore, PgCredentialStore};
use otp::{MemoryOtpRepository, OtpRepository, PgOtpRepository};
use platform::mail::MailTransport;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{Services, build_router};
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "clinic_api=info,identity=info,otp=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(token_ttl = ?config.auth.token_ttl, "Configuration loaded");

    let mailer = MailTransport::from_config(config.smtp.clone())?;
    if matches!(mailer, MailTransport::Log(_)) {
        tracing::warn!("SMTP_HOST not set; outgoing mail is logged, not sent");
    }

    let services = Services {
        auth: config.auth,
        otp: config.otp,
        mailer,
        frontend_origins: config.frontend_origins,
    };

    let app = match config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;
            tracing::info!("Migrations completed");

            let otp_store = PgOtpRepository::new(pool.clone());
            // Housekeeping only; a failure here must not block startup
            if let Err(e) = otp_store.delete_expired_before(Utc::now()).await {
                tracing::warn!(error = %e, "OTP cleanup failed, continuing anyway");
            }

            build_router(PgCredentialStore::new(pool), otp_store, services)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores, data is lost on exit");
            build_router(
                MemoryCredentialStore::new(),
                MemoryOtpRepository::new(),
                services,
            )
        }
    };

    tracing::info!(addr = %config.bind_addr, "Listening");
    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
