//! # fixture-server
//!
//! Axum HTTP server used as a cookie/session fixture for client tests.
//!
//! - `POST /login`: check credentials, issue `session_id` and `user_pref` cookies
//! - `GET /api/protected`: require a live `session_id` cookie
//! - `POST /logout`: drop the session and clear the cookie
//!
//! Sessions live in an in-memory [`SessionStore`] owned by the server state.
//! They never expire and are lost when the process exits.

#![deny(unsafe_code)]

pub mod cookies;
pub mod errors;
pub mod handlers;
pub mod server;
pub mod session;
pub mod shutdown;

pub use cookies::CookiePolicy;
pub use errors::ApiError;
pub use server::{AppState, FixtureServer};
pub use session::{SessionRecord, SessionStore};
pub use shutdown::ShutdownCoordinator;
