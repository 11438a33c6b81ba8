//! # fixture-settings
//!
//! Settings for the cookie fixture server, loaded in layers:
//! 1. **Compiled defaults** — [`FixtureSettings::default()`]
//! 2. **Settings file** — optional JSON, deep-merged over defaults
//! 3. **CLI flags** — applied by the binary after loading
//!
//! The defaults reproduce the fixture's fixed behaviour: bind
//! `0.0.0.0:5555`, accept `testuser`/`testpass`, issue `session_id` and
//! `user_pref=theme_dark` cookies.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings_from_path};
pub use types::*;
