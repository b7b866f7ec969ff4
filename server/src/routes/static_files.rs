//! Static hosting of the single-page app bundle.

use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

const ENTRY_DOCUMENT: &str = "index.html";

/// Serves files under `root` as-is. Paths with no matching file get the
/// bundle's `index.html` with a 200 status so client-side routing works.
///
/// A path naming a directory without a trailing slash (`/assets`) answers
/// `307` to the slashed form. `/assets/` then serves `assets/index.html`
/// when the bundle has one and the root `index.html` otherwise.
pub fn spa_service(root: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(root).fallback(ServeFile::new(root.join(ENTRY_DOCUMENT)))
}
