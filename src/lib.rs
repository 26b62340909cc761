//! wasend - send WhatsApp messages from the terminal
//!
//! Drives WhatsApp Web through a persistent Chrome profile: wait for the
//! page to be ready, type the message, submit. Also carries a small
//! self-update path against the release endpoint.

pub mod browser;
pub mod config;
pub mod contacts;
pub mod dispatch;
pub mod error;
pub mod page;
pub mod readiness;
pub mod release;
pub mod upgrade;
pub mod version;

pub use error::{Error, Result};
