//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (feed engine,
//! coordinators) and infrastructure implementations. This follows
//! Hexagonal Architecture principles, allowing the core logic to remain
//! independent of HTTP clients, storage backends, and UI toolkits.

mod catalog;
mod clock;
mod scroll_session;
mod snapshot_store;
mod viewport;

pub use catalog::{CatalogError, CatalogPort};
pub use clock::ClockPort;
pub use scroll_session::ScrollSessionPort;
pub use snapshot_store::SnapshotStorePort;
pub use viewport::{ViewportMetrics, ViewportPort};
