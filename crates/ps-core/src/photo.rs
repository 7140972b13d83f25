use serde::{Deserialize, Serialize};

use crate::text;

/// A single catalog entry as returned by the list endpoint.
///
/// Immutable once fetched. `id` is opaque but stable and doubles as the
/// URL path segment for detail and image requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub author: String,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub download_url: String,
}

/// A photo enriched with a derived title and description.
///
/// The catalog's detail response carries no title or description fields,
/// so both are generated client-side from the author and dimensions.
/// Never merged back into the list collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetail {
    pub photo: Photo,
    pub title: String,
    pub description: String,
}

impl PhotoDetail {
    /// Derive the presentation fields from a raw catalog photo.
    pub fn derive(photo: Photo) -> Self {
        let title = text::photo_title(&photo.author, &photo.id);
        let description = text::photo_description(&photo.author, photo.width, photo.height);
        Self {
            photo,
            title,
            description,
        }
    }
}
