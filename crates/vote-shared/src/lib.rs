//! # Vote Shared
//!
//! Configuration, telemetry, and constants shared by the music vote crates.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
