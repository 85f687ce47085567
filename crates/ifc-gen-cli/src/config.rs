// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Environment configuration

use crate::storage::{LocalBackend, StorageBackend};
use anyhow::bail;
use std::path::PathBuf;

/// Where finished documents are stored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    Gcs,
    S3,
}

impl StorageKind {
    fn parse(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "local" => Ok(StorageKind::Local),
            "gcs" => Ok(StorageKind::Gcs),
            "s3" => Ok(StorageKind::S3),
            other => bail!("Unknown STORAGE_BACKEND '{}' (expected local, gcs or s3)", other),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    pub storage_backend: StorageKind,
    pub storage_dir: PathBuf,
}

impl ServiceConfig {
    /// Read `STORAGE_BACKEND` and `STORAGE_DIR`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => StorageKind::parse(&value)?,
            None => StorageKind::Local,
        };
        let storage_dir = lookup("STORAGE_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Ok(Self {
            storage_backend,
            storage_dir,
        })
    }

    /// Instantiate the configured backend
    pub fn backend(&self) -> anyhow::Result<Box<dyn StorageBackend>> {
        match self.storage_backend {
            StorageKind::Local => Ok(Box::new(LocalBackend::new(self.storage_dir.clone()))),
            StorageKind::Gcs | StorageKind::S3 => bail!(
                "STORAGE_BACKEND {:?} needs remote upload, which this build does not include; use 'local'",
                self.storage_backend
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<ServiceConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_to_local_temp_dir() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.storage_backend, StorageKind::Local);
        assert_eq!(cfg.storage_dir, std::env::temp_dir());
        assert_eq!(cfg.backend().unwrap().name(), "local");
    }

    #[test]
    fn test_backend_names_case_insensitive() {
        let cfg = config(&[("STORAGE_BACKEND", "GCS"), ("STORAGE_DIR", "/srv/ifc")]).unwrap();
        assert_eq!(cfg.storage_backend, StorageKind::Gcs);
        assert_eq!(cfg.storage_dir, PathBuf::from("/srv/ifc"));
        assert!(cfg.backend().is_err());
        assert_eq!(config(&[("STORAGE_BACKEND", "s3")]).unwrap().storage_backend, StorageKind::S3);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(config(&[("STORAGE_BACKEND", "ftp")]).is_err());
    }
}
