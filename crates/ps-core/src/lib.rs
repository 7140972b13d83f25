//! # ps-core
//!
//! Core domain models and business logic for Photostream.
//!
//! This crate contains pure domain types and port definitions without any
//! infrastructure dependencies.

pub mod config;
pub mod feed;
pub mod messages;
pub mod photo;
pub mod ports;
pub mod text;

// Re-export commonly used types at the crate root
pub use config::CatalogConfig;
pub use feed::{FeedSnapshot, FeedState, LoadState};
pub use photo::{Photo, PhotoDetail};
