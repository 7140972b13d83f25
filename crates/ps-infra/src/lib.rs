//! Infrastructure adapters for Photostream.
//!
//! Concrete implementations of the ports defined in `ps-core`: the
//! Picsum HTTP catalog client, the two-tier session store, and the
//! system clock.

pub mod catalog;
pub mod session;
pub mod time;

pub use catalog::PicsumCatalogClient;
pub use session::SessionStore;
pub use time::SystemClock;
