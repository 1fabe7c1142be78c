//! abacus - terminal calculator over a remote math evaluation service
//!
//! The binary wires the input state machine (`abacus-core`), the evaluation
//! client (`abacus-api`), and the persisted history (`abacus-history`)
//! together under a ratatui front-end. The session driver lives in the
//! library so integration tests can run whole key sequences headlessly.

pub mod cli;
pub mod config;
pub mod keymap;
pub mod session;
pub mod tui;

/// Unified Result type; the binary reports errors through anyhow.
pub type Result<T> = anyhow::Result<T>;

/// Application info
pub const APP_NAME: &str = "abacus";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use anyhow::{anyhow, bail, Context};
