//! Library crate for userdeck.
//!
//! This crate exposes the building blocks of the TUI:
//! - Users API client and wire model (`api`)
//! - Application state, timers and update loop (`app`)
//! - Command line configuration (`config`)
//! - Error and result types (`error`)
//! - Platform link opener (`sys`)
//! - UI rendering and layout (`ui`)
//!
//! It is used by the `userdeck` binary and by tests.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod sys;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, FetchError, Result};
