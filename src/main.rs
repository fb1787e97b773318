//! Quiz Chain · staged puzzle pages + answer grader
//!
//! - Axum HTTP API: index, four stage pages, grading endpoint
//! - Stage pages embed base64(JSON) instructions decoded client-side
//! - Static files under /static (./static by default)
//!
//! Important env variables:
//!   PORT                  : u16 (default 8000)
//!   RAILWAY_PUBLIC_DOMAIN : public domain; base URL becomes https://<domain>
//!   PUBLIC_BASE_URL       : explicit base URL override
//!   STATIC_DIR            : directory served under /static
//!   QUIZ_CONFIG_PATH      : TOML with expected answers + grading policy
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod config;
mod domain;
mod error;
mod logic;
mod pages;
mod protocol;
mod routes;
mod seeds;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::QuizConfig;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing().map_err(|e| e as Box<dyn std::error::Error>)?;

  let config = QuizConfig::from_env();
  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

  let state = Arc::new(AppState::new(config));
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quiz_chain", %addr, "HTTP server listening");
  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  info!(target: "quiz_chain", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(target: "quiz_chain", error = %e, "Failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(target: "quiz_chain", error = %e, "Failed to install SIGTERM handler");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => {},
    _ = terminate => {},
  }
  info!(target: "quiz_chain", "Shutdown signal received");
}
