//! # fixture-core
//!
//! Foundation types shared by the fixture crates:
//!
//! - [`ids::SessionId`]: the opaque token handed out at login
//! - [`logging`]: `tracing` subscriber setup and log capture for tests

#![deny(unsafe_code)]

pub mod ids;
pub mod logging;

pub use ids::SessionId;
