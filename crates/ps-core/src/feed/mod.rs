//! Feed domain: load-state machine, session state, persisted snapshot.

mod snapshot;
mod state;

pub use snapshot::FeedSnapshot;
pub use state::{FeedState, LoadState};
