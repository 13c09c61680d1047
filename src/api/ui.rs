//! Pre-built web UI bundle, served as a fallback behind the API

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

/// Static file service for `dist_dir` with unknown paths answered by
/// `index.html`. `None` when no bundle is present.
pub fn ui_service(dist_dir: &Path) -> Option<ServeDir<ServeFile>> {
    if !dist_dir.is_dir() {
        warn!(
            "{} not found; API will run without serving the UI",
            dist_dir.display()
        );
        return None;
    }

    info!("Serving UI from {}", dist_dir.display());
    let index = dist_dir.join("index.html");
    Some(ServeDir::new(dist_dir).fallback(ServeFile::new(index)))
}
