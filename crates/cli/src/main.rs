//! `outreach` -- interactive terminal client for the faculty directory.
//!
//! Browses professors, opens their details, composes an outreach draft
//! and saves corrected email addresses through the directory backend.
//! Logs go to stderr; rendered output goes to stdout.
//!
//! # Environment variables
//!
//! | Variable                         | Required | Default                 | Description                             |
//! |----------------------------------|----------|-------------------------|-----------------------------------------|
//! | `OUTREACH_API_URL`               | no       | `http://localhost:8000` | Directory backend base URL              |
//! | `OUTREACH_HTTP_TIMEOUT_SECS`     | no       | `15`                    | Per-request HTTP timeout                |
//! | `OUTREACH_PAGE_SIZE`             | no       | `20`                    | Professors per page                     |
//! | `OUTREACH_DRAFT_RESET_ON_SELECT` | no       | `false`                 | Regenerate edited drafts on new selection |
//! | `RUST_LOG`                       | no       | see below               | `tracing` filter directives             |

use std::sync::Arc;

use outreach_cli::app;
use outreach_cli::config::CliConfig;
use outreach_client::DirectoryApi;
use outreach_session::SessionController;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "outreach_cli=info,outreach_session=info,outreach_client=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CliConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        api_url = %config.api_url,
        page_size = config.page_size,
        timeout_secs = config.http_timeout_secs,
        "Starting outreach client",
    );

    let api = DirectoryApi::with_timeout(config.api_url.clone(), config.http_timeout())?;
    let controller = Arc::new(SessionController::new(api, config.session_options())?);

    app::run(controller).await
}
