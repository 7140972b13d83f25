//! Photostream application orchestration layer
//!
//! This crate contains the feed engine, the scroll restoration
//! coordinator, and the detail loader. It talks to the outside world
//! only through the ports defined in `ps-core`.

pub mod deps;
pub mod detail;
pub mod feed;
pub mod scroll;

#[cfg(test)]
pub(crate) mod testing;

pub use deps::AppDeps;
pub use detail::{DetailState, PhotoDetailLoader};
pub use feed::PhotoFeed;
pub use scroll::ScrollRestorer;
