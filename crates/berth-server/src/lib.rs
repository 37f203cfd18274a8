//! # berth-server
//!
//! The HTTP face of berth: a JSON API over the registry and the group
//! operations engine, plus an embedded single-page UI served at `/`.
//!
//! The server is a thin caller — every operation it exposes is a direct
//! delegation to [`berth_registry::Registry`] or
//! [`berth_runtime::Engine`].

pub mod api;
pub mod error;
pub mod ui;

pub use api::{AppState, router, serve};
