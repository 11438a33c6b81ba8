//! # cookie-fixture
//!
//! Cookie/session fixture server binary: loads settings, starts the HTTP
//! server and runs until Ctrl-C.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use fixture_server::FixtureServer;
use fixture_settings::{FixtureSettings, load_settings_from_path};

/// Cookie/session fixture server.
#[derive(Parser, Debug)]
#[command(name = "cookie-fixture", about = "Cookie/session fixture server")]
struct Cli {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, 0 for auto-assign (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Path to a JSON settings file.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is unset (overrides settings).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Load settings and apply flag overrides on top.
    fn resolve_settings(&self) -> Result<FixtureSettings> {
        let mut settings = load_settings_from_path(self.settings.as_deref())
            .context("Failed to load settings")?;
        if let Some(ref host) = self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(ref level) = self.log_level {
            settings.logging.level.clone_from(level);
        }
        settings.validate().context("Invalid settings")?;
        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let settings = args.resolve_settings()?;

    fixture_core::logging::init_subscriber(&settings.logging.level);

    let shutdown_timeout = Duration::from_secs(settings.server.shutdown_timeout_secs);
    let server = FixtureServer::new(settings);
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;

    tracing::info!("Starting cookie test server on http://{addr}");
    tracing::info!("  POST /login          - Login with username/password");
    tracing::info!("  GET  /api/protected  - Access protected resource");
    tracing::info!("  POST /logout         - Logout");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    if !server.shutdown().drain(handle, shutdown_timeout).await {
        tracing::warn!("server did not stop within {shutdown_timeout:?}");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_bind_all_interfaces_on_5555() {
        let cli = Cli::parse_from(["cookie-fixture"]);
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 5555);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn flags_override_settings() {
        let cli = Cli::parse_from([
            "cookie-fixture",
            "--host",
            "127.0.0.1",
            "--port",
            "0",
            "--log-level",
            "debug",
        ]);
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 0);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn flags_win_over_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"server":{"port":7000},"auth":{"username":"alice"}}"#)
            .unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::parse_from(["cookie-fixture", "--settings", path, "--port", "7001"]);
        let settings = cli.resolve_settings().unwrap();
        assert_eq!(settings.server.port, 7001);
        assert_eq!(settings.auth.username, "alice");
    }

    #[test]
    fn missing_settings_file_is_an_error() {
        let cli = Cli::parse_from(["cookie-fixture", "--settings", "/nonexistent/fixture.json"]);
        assert!(cli.resolve_settings().is_err());
    }

    #[test]
    fn blank_host_flag_is_rejected() {
        let cli = Cli::parse_from(["cookie-fixture", "--host", " "]);
        assert!(cli.resolve_settings().is_err());
    }

    #[test]
    fn port_flag_rejects_out_of_range() {
        assert!(Cli::try_parse_from(["cookie-fixture", "--port", "70000"]).is_err());
    }
}
