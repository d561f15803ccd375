//! JSON API over [`GameSession`](crate::riddle_engine::GameSession)s.
//!
//! Each browser tab creates a session with `POST /api/session` and then
//! drives it through the `/api/session/{id}/…` routes. Riddle payloads never
//! carry the answer.

pub mod handler;
pub mod routes;
pub mod state;

use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::error::Result;
use crate::riddle_engine::{Backends, SessionSettings};

pub use routes::router;
pub use state::AppState;

/// Bind `config.server.bind` and serve until the process is stopped.
pub async fn serve(config: &AppConfig, backends: Backends) -> Result<()> {
    let settings = SessionSettings::from_config(config)?;
    tracing::info!(
        companion = backends.companion.name(),
        safety = backends.safety.name(),
        max_sessions = config.server.max_sessions,
        "starting riddle server"
    );
    let state = AppState::new(backends, settings, config.server.max_sessions);
    let app = router(state);

    let listener = TcpListener::bind(config.server.bind.as_str()).await?;
    tracing::info!("🧠 Riddle server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
