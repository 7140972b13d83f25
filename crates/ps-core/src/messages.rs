//! User-facing message constants.
//!
//! These are the only strings the UI layer is expected to show for
//! failures; transport-level detail stays in logs.

pub const FETCH_PHOTOS_FAILED: &str = "Could not load the photo list. Please try again.";
pub const FETCH_PHOTO_DETAIL_FAILED: &str = "Could not load the photo details. Please try again.";
pub const NO_MORE_PHOTOS: &str = "You have seen every photo.";
pub const PHOTO_NOT_FOUND: &str = "This photo does not exist.";
