//! Serves the built portfolio page (HTML, images, résumé) next to the relay.

use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

/// File service for `dir`, falling back to `index.html` for client-side
/// routes. Returns `None` when `dir` does not exist, leaving the relay API-only.
#[must_use]
pub fn static_site(dir: &Path) -> Option<ServeDir<ServeFile>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Static directory not found, serving the API only");
        return None;
    }

    info!(dir = %dir.display(), "Serving static site");
    Some(ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_disables_static_site() {
        assert!(static_site(Path::new("/definitely/not/here")).is_none());
    }

    #[test]
    fn existing_directory_is_served() {
        let dir = tempfile::tempdir().unwrap();
        assert!(static_site(dir.path()).is_some());
    }
}
