//! # Tunegraph Common Library
//!
//! Shared code for the Tunegraph recommendation engine and its hosting
//! services including:
//! - Domain models (Song, insert outcomes)
//! - Common error types
//! - Engine configuration loading

pub mod config;
pub mod error;
pub mod models;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use models::{InsertOutcome, Song};
