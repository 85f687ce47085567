// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Storage backends for finished documents

use anyhow::{ensure, Context as _};
use std::path::{Path, PathBuf};

/// Publishes a written file and returns where it can be fetched
pub trait StorageBackend {
    fn name(&self) -> &'static str;

    /// Upload a local file, returning its download URL (or path)
    fn upload(&self, local_path: &Path) -> anyhow::Result<String>;

    /// Directory new files are written to before upload
    fn staging_dir(&self) -> &Path;
}

/// Keeps files on the local filesystem; the "URL" is the file path
pub struct LocalBackend {
    dir: PathBuf,
}

impl LocalBackend {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl StorageBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    fn upload(&self, local_path: &Path) -> anyhow::Result<String> {
        ensure!(local_path.is_file(), "No file at {}", local_path.display());
        let path = local_path
            .canonicalize()
            .with_context(|| format!("resolve '{}'", local_path.display()))?;
        log::info!("Stored {}", path.display());
        Ok(path.display().to_string())
    }

    fn staging_dir(&self) -> &Path {
        &self.dir
    }
}

/// Write `bytes` as `filename` in the backend's staging directory and upload it
pub fn store(backend: &dyn StorageBackend, filename: &str, bytes: &[u8]) -> anyhow::Result<String> {
    let dir = backend.staging_dir();
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    backend.upload(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_store_returns_path() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path().join("out"));
        let url = store(&backend, "bim_test.ifc", b"ISO-10303-21;").unwrap();
        assert!(url.ends_with("bim_test.ifc"));
        assert_eq!(std::fs::read(&url).unwrap(), b"ISO-10303-21;");
    }

    #[test]
    fn test_upload_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path().to_path_buf());
        assert!(backend.upload(&dir.path().join("nope.ifc")).is_err());
    }
}
