use serde::{Deserialize, Serialize};

use crate::messages;
use crate::photo::Photo;

/// Load status of an asynchronous resource.
///
/// Design principle: this is a pure type with only state definitions and
/// query helpers. Runtime behaviors like prefetching and retries are
/// handled by the application layer (ps-app).
///
/// State transitions:
///
/// ```text
/// Idle ──→ Loading ──→ Success
///            │      └─→ Error
///            ▲
/// Success/Error ──(load / refresh)──┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Nothing requested yet
    Idle,

    /// A fetch is in flight
    Loading,

    /// The last fetch completed successfully
    Success,

    /// The last fetch failed; a message is recorded alongside
    Error,
}

impl LoadState {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    pub fn is_loading(self) -> bool {
        self == Self::Loading
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn is_error(self) -> bool {
        self == Self::Error
    }

    /// Check whether the state allows starting a new load.
    ///
    /// Loads may start from any state except an in-flight one; the engine
    /// enforces this rather than trusting callers to gate on it.
    pub fn can_start_load(self) -> bool {
        !self.is_loading()
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Published view of the feed engine's list session state.
///
/// A cheap clone handed to observers; mutating it has no effect on the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedState {
    /// Ordered, append-only photo collection (page order = relevance order).
    pub items: Vec<Photo>,

    /// Last successfully loaded page, 1-based. 0 means nothing loaded yet.
    pub cursor: u32,

    /// False once a fetch returned an empty page; reset only by refresh.
    pub has_more: bool,

    pub status: LoadState,

    /// Present only in `Error` status.
    pub error: Option<String>,
}

impl FeedState {
    /// User-facing notice once the feed is exhausted, shown in place of
    /// the load-more affordance. `None` while more pages may exist or
    /// while a load is unsettled.
    pub fn end_notice(&self) -> Option<&'static str> {
        (!self.has_more && self.status.is_success()).then_some(messages::NO_MORE_PHOTOS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        assert_eq!(LoadState::default(), LoadState::Idle);
    }

    #[test]
    fn test_queries() {
        assert!(LoadState::Idle.is_idle());
        assert!(LoadState::Loading.is_loading());
        assert!(LoadState::Success.is_success());
        assert!(LoadState::Error.is_error());
    }

    #[test]
    fn test_can_start_load() {
        assert!(LoadState::Idle.can_start_load());
        assert!(LoadState::Success.can_start_load());
        assert!(LoadState::Error.can_start_load());
        assert!(!LoadState::Loading.can_start_load());
    }

    #[test]
    fn test_end_notice_only_for_settled_exhausted_feed() {
        let mut state = FeedState {
            has_more: false,
            status: LoadState::Success,
            ..FeedState::default()
        };
        assert_eq!(state.end_notice(), Some(messages::NO_MORE_PHOTOS));

        state.has_more = true;
        assert_eq!(state.end_notice(), None);

        state.has_more = false;
        state.status = LoadState::Loading;
        assert_eq!(state.end_notice(), None);
    }
}
