//! Settings types.
//!
//! Every struct uses `#[serde(default)]` so a settings file only needs to
//! name the keys it changes.

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixtureSettings {
    /// Network binding and shutdown.
    pub server: ServerSettings,
    /// The single accepted credential pair.
    pub auth: AuthSettings,
    /// Cookie names and attributes.
    pub cookies: CookieSettings,
    /// Log filtering.
    pub logging: LoggingSettings,
}

impl FixtureSettings {
    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(invalid("server.host must not be empty"));
        }
        if self.auth.username.is_empty() {
            return Err(invalid("auth.username must not be empty"));
        }
        if self.auth.password.is_empty() {
            return Err(invalid("auth.password must not be empty"));
        }
        if !is_cookie_name(&self.cookies.session_cookie) {
            return Err(invalid("cookies.sessionCookie is not a valid cookie name"));
        }
        if !is_cookie_name(&self.cookies.preference_cookie) {
            return Err(invalid(
                "cookies.preferenceCookie is not a valid cookie name",
            ));
        }
        if self.cookies.session_cookie == self.cookies.preference_cookie {
            return Err(invalid(
                "cookies.sessionCookie and cookies.preferenceCookie must differ",
            ));
        }
        if !self.cookies.path.starts_with('/') {
            return Err(invalid("cookies.path must start with '/'"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SettingsError {
    SettingsError::InvalidValue(msg.to_owned())
}

/// RFC 6265 token: visible ASCII without separators.
fn is_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        })
}

/// Server network settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port (`0` for auto-assign).
    pub port: u16,
    /// How long to wait for in-flight requests on shutdown.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5555,
            shutdown_timeout_secs: 5,
        }
    }
}

/// The credential pair `/login` accepts.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthSettings {
    /// Accepted username.
    pub username: String,
    /// Accepted password.
    pub password: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            username: "testuser".to_string(),
            password: "testpass".to_string(),
        }
    }
}

impl std::fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSettings")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Cookie names and attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieSettings {
    /// Cookie carrying the session identifier.
    pub session_cookie: String,
    /// Extra cookie issued alongside the session on login.
    pub preference_cookie: String,
    /// Value of the preference cookie.
    pub preference_value: String,
    /// `Path` attribute for every issued cookie.
    pub path: String,
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self {
            session_cookie: "session_id".to_string(),
            preference_cookie: "user_pref".to_string(),
            preference_value: "theme_dark".to_string(),
            path: "/".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
