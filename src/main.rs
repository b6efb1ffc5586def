use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{build_router, AppState};
use mailer::{HttpMailer, HttpMailerConfig};
use plaudit_core::{FeedbackStore, IntakeConfig, IntakeService};

const DEFAULT_MAIL_API_URL: &str = "https://api.resend.com";

/// Main entry point for the plaudit testimonial service.
///
/// Resolves configuration from the environment once at startup, wires the
/// feedback store and the email collaborator together behind the REST
/// router, and serves until shutdown.
///
/// # Environment Variables
/// - `PLAUDIT_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MAIL_API_URL`: email provider base URL (default: Resend)
/// - `MAIL_API_KEY`: email provider API key (required)
/// - `FEEDBACK_RECIPIENT`: address feedback notifications are sent to (required)
/// - `FEEDBACK_FROM`: from-address for notifications (required)
/// - `ADMIN_API_KEY`: key for the moderation routes (optional; moderation
///   is disabled when unset)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration or startup fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plaudit_run=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("PLAUDIT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let mail_api_url =
        std::env::var("MAIL_API_URL").unwrap_or_else(|_| DEFAULT_MAIL_API_URL.into());
    let mail_api_key =
        std::env::var("MAIL_API_KEY").map_err(|_| anyhow::anyhow!("MAIL_API_KEY must be set"))?;
    let recipient = std::env::var("FEEDBACK_RECIPIENT")
        .map_err(|_| anyhow::anyhow!("FEEDBACK_RECIPIENT must be set"))?;
    let from_address = std::env::var("FEEDBACK_FROM")
        .map_err(|_| anyhow::anyhow!("FEEDBACK_FROM must be set"))?;

    let admin_api_key = std::env::var("ADMIN_API_KEY").ok();
    if admin_api_key.is_none() {
        tracing::warn!("ADMIN_API_KEY is not set; moderation routes are disabled");
    }

    let mailer = Arc::new(HttpMailer::new(HttpMailerConfig {
        api_url: mail_api_url,
        api_key: mail_api_key,
        timeout: None,
    })?);
    let intake = Arc::new(IntakeService::new(
        mailer,
        IntakeConfig::new(recipient, from_address)?,
    ));

    let store = Arc::new(FeedbackStore::new());
    let _changes = store.subscribe(|records| {
        tracing::debug!(total = records.len(), "testimonial store changed");
    });

    tracing::info!("++ Starting plaudit REST on {}", addr);

    let app = build_router(AppState::new(store, intake, admin_api_key));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
