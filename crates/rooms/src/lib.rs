//! Game rooms for the chess rule engine
//!
//! This crate provides the glue an embedding service needs around
//! `chess_core`:
//! - A [`GameStore`] trait for persisting games, with in-memory and
//!   JSON-directory implementations
//! - A [`RoomService`] that serializes access per room and logs game events
//! - TOML configuration for the console front end
//!
//! # Usage
//!
//! ```bash
//! # Play in the terminal with the default in-memory store
//! cargo run -p rooms --bin chess_console
//!
//! # Keep games on disk and resume a room later
//! cargo run -p rooms --bin chess_console -- rooms.toml --room QWERTY
//! ```

mod config;
mod error;
mod service;
mod store;

pub use config::*;
pub use error::*;
pub use service::*;
pub use store::*;
