//! キー・バリュー永続化層
//!
//! 本番では `window.localStorage`、テストでは `MemoryStorage` を使う。

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    /// localStorage が無効、または window が存在しない
    #[error("ストレージが利用できません")]
    Unavailable,

    /// 容量超過など、書き込み時の例外
    #[error("ストレージ操作失敗: {0}")]
    Operation(String),
}

/// 文字列キー → 文字列値の永続化媒体
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage` のラッパー
#[derive(Clone)]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    /// localStorage を取得（無効な環境では None）
    pub fn local() -> Option<Self> {
        let window = web_sys::window()?;
        let storage = window.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Operation(format!("{:?}", e)))
    }
}

/// メモリ上の媒体。localStorage が使えない時のフォールバックとテスト用
#[derive(Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// true の間、set/remove が容量超過のように失敗する
    #[cfg(test)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Operation("QuotaExceededError".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// localStorage が無ければメモリ媒体で代替する
pub enum AppStorage {
    Browser(BrowserStorage),
    Memory(MemoryStorage),
}

impl AppStorage {
    pub fn detect() -> Self {
        match BrowserStorage::local() {
            Some(storage) => AppStorage::Browser(storage),
            None => {
                log::warn!("localStorage が利用できないため、履歴はこのタブ内のみ保持されます");
                AppStorage::Memory(MemoryStorage::new())
            }
        }
    }
}

impl KeyValueStorage for AppStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            AppStorage::Browser(s) => s.get_item(key),
            AppStorage::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            AppStorage::Browser(s) => s.set_item(key, value),
            AppStorage::Memory(s) => s.set_item(key, value),
        }
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match self {
            AppStorage::Browser(s) => s.remove_item(key),
            AppStorage::Memory(s) => s.remove_item(key),
        }
    }
}
