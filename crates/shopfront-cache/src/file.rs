//! File-backed key-value store.
//!
//! Each key is a file inside the store directory. Keys are escaped so any
//! string (including `:` namespaces) maps to a portable file name.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{CacheError, KeyValueStore};

const VALUE_EXTENSION: &str = "json";

/// Durable store rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| CacheError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root, quota: None })
    }

    /// Limit the size of any single value written to the store.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// The directory backing this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", encode_key(key), VALUE_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<(), CacheError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(CacheError::QuotaExceeded {
                    needed: value.len(),
                    quota,
                });
            }
        }

        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            if let Some(key) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(decode_key)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Escape a key into a file-name-safe form.
fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// Reverse of [`encode_key`].
fn decode_key(encoded: &str) -> Option<String> {
    urlencoding::decode(encoded).ok().map(|key| key.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_encoding() {
        assert_eq!(encode_key("shopfront:cart"), "shopfront%3Acart");
        assert_eq!(decode_key("shopfront%3Acart").as_deref(), Some("shopfront:cart"));
        assert_eq!(encode_key("a/b c"), "a%2Fb%20c");
        assert_eq!(decode_key("a%2Fb%20c").as_deref(), Some("a/b c"));
        assert_eq!(decode_key("%FF%FE").as_deref(), None);
    }

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set_raw("shopfront:cart", r#"[{"id":"a"}]"#).unwrap();
        assert_eq!(
            store.get_raw("shopfront:cart").unwrap().as_deref(),
            Some(r#"[{"id":"a"}]"#)
        );
        assert_eq!(store.keys().unwrap(), vec!["shopfront:cart".to_string()]);

        // A second handle on the same directory sees the same data.
        let reopened = FileStore::open(dir.path()).unwrap();
        assert!(reopened.exists("shopfront:cart").unwrap());

        reopened.delete("shopfront:cart").unwrap();
        assert!(store.get_raw("shopfront:cart").unwrap().is_none());
    }

    #[test]
    fn test_keys_with_separators_stay_in_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.set_raw("../escape", "1").unwrap();
        store.set_raw("carrinho do joão", "2").unwrap();
        assert!(!dir.path().parent().unwrap().join("escape.json").exists());
        assert_eq!(
            store.keys().unwrap(),
            vec!["../escape".to_string(), "carrinho do joão".to_string()]
        );
    }

    #[test]
    fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.get_raw("nope").unwrap().is_none());
        store.delete("nope").unwrap();
    }

    #[test]
    fn test_quota() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap().with_quota(4);
        assert!(store.set_raw("k", "1234").is_ok());
        assert!(matches!(
            store.set_raw("k", "12345"),
            Err(CacheError::QuotaExceeded { needed: 5, quota: 4 })
        ));
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).unwrap();
        assert!(store.root().is_dir());
    }
}
