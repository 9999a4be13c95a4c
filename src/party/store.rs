use std::collections::HashMap;

use web_sys::Storage;

use crate::error::StoreError;

/// Key → score persistence.
pub trait HighScoreStore {
    fn load(&self, key: &str) -> Option<u32>;
    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError>;
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn load(&self, key: &str) -> Option<u32> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        (**self).save(key, value)
    }
}

/// In-memory store: tests, and browsers with storage disabled.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Option<u32> {
        self.values.get(key).copied()
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Browser `localStorage`; values are decimal strings.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// `None` when the page has no storage (privacy mode, sandboxed iframe).
    pub fn from_window(win: &web_sys::Window) -> Option<Self> {
        win.local_storage().ok().flatten().map(Self::new)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self, key: &str) -> Option<u32> {
        let raw = self.storage.get_item(key).ok().flatten()?;
        match parse_score(&raw) {
            Some(v) => Some(v),
            None => {
                log::warn!("ignoring unreadable high score {raw:?} under `{key}`");
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: u32) -> Result<(), StoreError> {
        self.storage.set_item(key, &value.to_string()).map_err(|e| StoreError::Write {
            key: key.to_owned(),
            reason: e.as_string().unwrap_or_else(|| format!("{e:?}")),
        })
    }
}

/// Stored scores are plain integers; anything else reads as absent.
pub fn parse_score(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut s = MemoryStore::new();
        assert_eq!(s.load("highScore"), None);
        s.save("highScore", 42).unwrap();
        assert_eq!(s.load("highScore"), Some(42));
    }

    #[test]
    fn parse_score_rejects_garbage() {
        assert_eq!(parse_score("17"), Some(17));
        assert_eq!(parse_score(" 17\n"), Some(17));
        assert_eq!(parse_score("-1"), None);
        assert_eq!(parse_score("lots"), None);
        assert_eq!(parse_score(""), None);
    }
}
