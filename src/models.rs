//! データ構造体モジュール

use serde::{Deserialize, Serialize};

// ============================================
// クリップボード履歴用データ構造
// ============================================

/// クリップボード履歴の1レコード
///
/// localStorage 上では id をキーとして JSON で保存される。
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ClipboardRecord {
    #[serde(default)]
    pub id: String,
    /// `"<日付>-<時刻>"` 形式のローカル時刻
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub title: String,
}

/// チェックボックス状態（保存形式は `"checked"` か `""`）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum CheckboxStatus {
    #[serde(rename = "checked")]
    Checked,
    #[default]
    #[serde(rename = "")]
    Unchecked,
}

impl CheckboxStatus {
    pub fn is_checked(self) -> bool {
        self == CheckboxStatus::Checked
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked {
            CheckboxStatus::Checked
        } else {
            CheckboxStatus::Unchecked
        }
    }
}

/// UI設定1件分
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SettingsOptions {
    pub value: CheckboxStatus,
}

// ============================================
// 変換処理
// ============================================

/// JSON整形モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// 空白なし
    Minify,
    /// タブインデント
    Pretty,
}

/// Base64変換の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecFlow {
    Encode,
    Decode,
}

/// 右ペインのボタン操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneAction {
    /// システムクリップボードへコピー
    Copy,
    /// 左ペインへ移動
    Move,
}

// ============================================
// ビューモード
// ============================================

#[derive(Clone, PartialEq, Default)]
pub enum ViewMode {
    #[default]
    Workspace,
    History,
    HistoryDetail {
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_serialized_like_checkbox() {
        let checked = SettingsOptions { value: CheckboxStatus::Checked };
        assert_eq!(serde_json::to_string(&checked).unwrap(), r#"{"value":"checked"}"#);

        let unchecked = SettingsOptions::default();
        assert_eq!(serde_json::to_string(&unchecked).unwrap(), r#"{"value":""}"#);
    }

    #[test]
    fn test_record_missing_fields_default_to_empty() {
        let record: ClipboardRecord = serde_json::from_str(r#"{"data":"x"}"#).unwrap();
        assert_eq!(record.data, "x");
        assert!(record.id.is_empty());
        assert!(record.title.is_empty());
    }

    #[test]
    fn test_checkbox_from_checked() {
        assert!(CheckboxStatus::from_checked(true).is_checked());
        assert!(!CheckboxStatus::from_checked(false).is_checked());
    }
}
