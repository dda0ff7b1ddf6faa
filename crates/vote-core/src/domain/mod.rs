//! # Vote Core - Domain Module
//!
//! Domain entities for the music vote site.

pub mod account;
pub mod track;

pub use account::Account;
pub use track::{Track, TrackDraft};
