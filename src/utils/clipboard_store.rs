//! クリップボード履歴ストア
//!
//! localStorage 上のレイアウト:
//! - `ids_clipboards_items` … レコードIDの JSON 配列（新しい順）
//! - `<id>` … `ClipboardRecord` の JSON
//! - 設定キー … `SettingsOptions` の JSON
//!
//! 追加はレコード → インデックスの順に書き込む。トランザクションは無いので、
//! インデックス書き込みに失敗するとレコードだけが残る。一覧側は欠けた
//! レコードを削除済みとして読み飛ばす。

use crate::models::{ClipboardRecord, SettingsOptions};
use crate::utils::codec::is_valid_json;
use crate::utils::storage::{KeyValueStorage, StorageError};
use crate::utils::{make_id, now_label};

/// インデックスの予約キー
pub const ID_CLIPBOARDS_ITEMS: &str = "ids_clipboards_items";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("レコードがありません: {0}")]
    Missing(String),

    #[error("レコードが壊れています ({key}): {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("シリアライズ失敗: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct ClipboardStore<S> {
    storage: S,
    clock: fn() -> String,
    make_id: fn() -> String,
}

impl<S: KeyValueStorage> ClipboardStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_sources(storage, now_label, make_id)
    }

    /// 時刻とID生成を差し替える（テスト用）
    pub fn with_sources(storage: S, clock: fn() -> String, make_id: fn() -> String) -> Self {
        Self { storage, clock, make_id }
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read_index(&self) -> Result<Vec<String>, StoreError> {
        let Some(raw) = self.storage.get_item(ID_CLIPBOARDS_ITEMS)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: ID_CLIPBOARDS_ITEMS.to_string(),
            source,
        })
    }

    fn write_index(&self, ids: &[String]) -> Result<(), StoreError> {
        let json = serde_json::to_string(ids).map_err(StoreError::Serialize)?;
        self.storage.set_item(ID_CLIPBOARDS_ITEMS, &json)?;
        Ok(())
    }

    /// レコードID一覧（新しい順）。読めなければ空
    pub fn list_ids(&self) -> Vec<String> {
        self.read_index().unwrap_or_else(|e| {
            log::warn!("インデックスを読み込めません: {}", e);
            Vec::new()
        })
    }

    pub fn try_get(&self, id: &str) -> Result<ClipboardRecord, StoreError> {
        let raw = self
            .storage
            .get_item(id)?
            .ok_or_else(|| StoreError::Missing(id.to_string()))?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: id.to_string(),
            source,
        })
    }

    /// レコード取得。無い・壊れている場合は空レコード
    pub fn get(&self, id: &str) -> ClipboardRecord {
        match self.try_get(id) {
            Ok(record) => record,
            Err(StoreError::Missing(_)) => ClipboardRecord::default(),
            Err(e) => {
                log::warn!("{}", e);
                ClipboardRecord::default()
            }
        }
    }

    /// インデックス順にレコードを展開する。欠けたレコードは読み飛ばす
    pub fn list_records(&self) -> Vec<ClipboardRecord> {
        self.list_ids()
            .into_iter()
            .filter_map(|id| match self.try_get(&id) {
                Ok(record) => Some(ClipboardRecord { id, ..record }),
                Err(e) => {
                    log::debug!("一覧から除外: {}", e);
                    None
                }
            })
            .collect()
    }

    pub fn try_add(&self, data: &str, title: &str) -> Result<ClipboardRecord, StoreError> {
        let id = (self.make_id)();
        let record = ClipboardRecord {
            id: id.clone(),
            time: (self.clock)(),
            data: data.to_string(),
            title: title.to_string(),
        };
        let json = serde_json::to_string(&record).map_err(StoreError::Serialize)?;
        self.storage.set_item(&id, &json)?;

        let mut ids = self.list_ids();
        ids.insert(0, id);
        self.write_index(&ids)?;
        Ok(record)
    }

    /// 履歴に追加。途中で失敗しても巻き戻しはしない
    pub fn add(&self, data: &str, title: &str) -> bool {
        match self.try_add(data, title) {
            Ok(record) => {
                log::info!("履歴に追加: {} ({})", record.id, record.title);
                true
            }
            Err(e) => {
                log::error!("履歴の追加に失敗: {}", e);
                false
            }
        }
    }

    pub fn try_delete(&self, id: &str) -> Result<Vec<String>, StoreError> {
        self.storage.remove_item(id)?;
        let remaining: Vec<String> = self.list_ids().into_iter().filter(|i| i != id).collect();
        self.write_index(&remaining)?;
        Ok(remaining)
    }

    /// 削除後の一覧を返す。失敗時は削除前の一覧
    pub fn delete(&self, id: &str) -> Vec<String> {
        let known = self.list_ids();
        match self.try_delete(id) {
            Ok(remaining) => {
                log::info!("履歴を削除: {}", id);
                remaining
            }
            Err(e) => {
                log::error!("履歴の削除に失敗: {}", e);
                known
            }
        }
    }

    /// 値が存在し、JSONとして読めるか
    pub fn exists(&self, id: &str) -> bool {
        matches!(self.storage.get_item(id), Ok(Some(raw)) if is_valid_json(&raw))
    }

    /// レコードが欠けた・壊れたIDをインデックスから取り除く。取り除いた件数を返す
    ///
    /// 媒体の読み込みエラーでは何も消さずに中断する。
    pub fn repair_index(&self) -> usize {
        let ids = self.list_ids();
        let mut kept = Vec::with_capacity(ids.len());
        for id in &ids {
            match self.try_get(id) {
                Ok(_) => kept.push(id.clone()),
                Err(StoreError::Missing(_)) | Err(StoreError::Corrupt { .. }) => {}
                Err(e) => {
                    log::warn!("インデックス修復を中断: {}", e);
                    return 0;
                }
            }
        }
        let dropped = ids.len() - kept.len();
        if dropped == 0 {
            return 0;
        }
        match self.write_index(&kept) {
            Ok(()) => {
                log::info!("インデックスを修復: {}件除外", dropped);
                dropped
            }
            Err(e) => {
                log::warn!("インデックス修復に失敗: {}", e);
                0
            }
        }
    }

    pub fn get_settings(&self, key: &str) -> SettingsOptions {
        self.storage
            .get_item(key)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn set_settings(&self, key: &str, value: SettingsOptions) -> bool {
        let result = serde_json::to_string(&value)
            .map_err(StoreError::Serialize)
            .and_then(|json| Ok(self.storage.set_item(key, &json)?));
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("設定を保存できません ({}): {}", key, e);
                false
            }
        }
    }
}
