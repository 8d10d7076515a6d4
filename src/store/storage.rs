//! Persistent string key-value storage, the shape of a browser's `localStorage`.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::foundation::error::{HeliographError, HeliographResult};

/// String key-value storage with `localStorage`-like semantics.
///
/// Methods take `&self`; implementations use interior mutability where needed.
pub trait KeyValueStorage {
    /// Read `key`; `Ok(None)` when absent.
    fn get_item(&self, key: &str) -> HeliographResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> HeliographResult<()>;

    /// Remove `key`; removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> HeliographResult<()>;
}

/// In-memory storage with switchable failure injection.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    quota_bytes: Cell<Option<usize>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `key = value`.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::default();
        storage.items.borrow_mut().insert(key.into(), value.into());
        storage
    }

    /// Make every subsequent read fail (storage unavailable).
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make every subsequent write fail (storage unavailable).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Reject writes whose total stored size would exceed `bytes`.
    pub fn set_quota(&self, bytes: Option<usize>) {
        self.quota_bytes.set(bytes);
    }

    /// Raw stored value, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> HeliographResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(HeliographError::storage("storage unavailable"));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> HeliographResult<()> {
        if self.fail_writes.get() {
            return Err(HeliographError::storage("storage unavailable"));
        }
        if let Some(quota) = self.quota_bytes.get() {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(HeliographError::storage(format!(
                    "quota exceeded: {needed} > {quota} bytes"
                )));
            }
        }
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> HeliographResult<()> {
        if self.fail_writes.get() {
            return Err(HeliographError::storage("storage unavailable"));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Directory-backed storage: each key is one `<key>.json` file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`; the directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> HeliographResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(HeliographError::storage(format!(
                "read '{}': {err}",
                path.display()
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> HeliographResult<()> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|err| {
            HeliographError::storage(format!("create dir '{}': {err}", self.dir.display()))
        })?;

        // Write-then-rename so a failed write never leaves a truncated record behind.
        let tmp = path.with_extension("json.tmp");
        if let Err(err) = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path)) {
            if let Err(cleanup) = fs::remove_file(&tmp)
                && cleanup.kind() != ErrorKind::NotFound
            {
                tracing::warn!(path = %tmp.display(), %cleanup, "failed to remove temp record");
            }
            return Err(HeliographError::storage(format!(
                "write '{}': {err}",
                path.display()
            )));
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> HeliographResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(HeliographError::storage(format!(
                "remove '{}': {err}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/storage.rs"]
mod tests;
