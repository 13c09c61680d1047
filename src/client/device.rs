//! Persistent anonymous device identity

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

/// File name of the stored identity
pub const DEVICE_ID_KEY: &str = "concept2-training-device-id";

/// Device id kept in a file under a state directory. Generated once on
/// first use, then reused by every later session.
#[derive(Debug, Clone)]
pub struct DeviceIdStore {
    path: PathBuf,
}

impl DeviceIdStore {
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(DEVICE_ID_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored id, if any
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let id = raw.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", self.path.display())),
        }
    }

    /// Read the stored id, creating and persisting a fresh one if absent
    pub fn load_or_create(&self) -> Result<String> {
        if let Some(id) = self.load()? {
            return Ok(id);
        }

        let id = Uuid::new_v4().to_string();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, &id)
            .with_context(|| format!("writing {}", self.path.display()))?;
        info!("Generated new device id {}", id);

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_once_then_reuses() {
        let dir = tempfile::tempdir().unwrap();
        let store = DeviceIdStore::new(dir.path().join("state"));

        assert!(store.load().unwrap().is_none());
        let first = store.load_or_create().unwrap();
        let second = store.load_or_create().unwrap();

        assert_eq!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert!(store.path().ends_with(DEVICE_ID_KEY));
    }

    #[test]
    fn test_existing_id_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEVICE_ID_KEY), "my-phone\n").unwrap();

        let store = DeviceIdStore::new(dir.path());
        assert_eq!(store.load_or_create().unwrap(), "my-phone");
    }

    #[test]
    fn test_blank_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DEVICE_ID_KEY), "  ").unwrap();

        let store = DeviceIdStore::new(dir.path());
        let id = store.load_or_create().unwrap();
        assert!(!id.trim().is_empty());
        assert_eq!(store.load().unwrap(), Some(id));
    }
}
