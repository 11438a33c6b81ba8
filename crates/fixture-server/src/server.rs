//! `FixtureServer`: router construction and listener.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use fixture_settings::{AuthSettings, FixtureSettings};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::cookies::CookiePolicy;
use crate::handlers;
use crate::session::SessionStore;
use crate::shutdown::ShutdownCoordinator;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Live sessions.
    pub sessions: Arc<SessionStore>,
    /// The accepted credential pair.
    pub auth: Arc<AuthSettings>,
    /// Cookie names and attributes.
    pub cookies: Arc<CookiePolicy>,
}

/// The cookie fixture server.
pub struct FixtureServer {
    settings: FixtureSettings,
    state: AppState,
    shutdown: Arc<ShutdownCoordinator>,
}

impl FixtureServer {
    /// Create a server with an empty session table.
    pub fn new(settings: FixtureSettings) -> Self {
        let state = AppState {
            sessions: Arc::new(SessionStore::new()),
            auth: Arc::new(settings.auth.clone()),
            cookies: Arc::new(CookiePolicy::from_settings(&settings.cookies)),
        };
        Self {
            settings,
            state,
            shutdown: Arc::new(ShutdownCoordinator::new()),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/login", post(handlers::login))
            .route("/api/protected", get(handlers::protected))
            .route("/logout", post(handlers::logout))
            .method_not_allowed_fallback(handlers::method_not_allowed)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve in a background task.
    ///
    /// Returns the bound address (useful with port `0`) and the server task.
    /// The task finishes once [`ShutdownCoordinator::shutdown`] is called and
    /// in-flight requests complete.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let host = self.settings.server.host.as_str();
        let listener = TcpListener::bind((host, self.settings.server.port)).await?;
        let addr = listener.local_addr()?;

        let router = self.router();
        let token = self.shutdown.token();
        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router)
                .with_graceful_shutdown(token.cancelled_owned())
                .await
            {
                error!(error = %e, "server stopped with error");
            }
            info!("server stopped");
        });

        info!(%addr, "cookie fixture listening");
        Ok((addr, handle))
    }

    /// Live sessions.
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.state.sessions
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }
}
