//! ユーティリティモジュール

pub mod clipboard;
pub mod clipboard_store;
pub mod codec;
pub mod log_trace;
pub mod resize;
pub mod storage;

// 共通ヘルパー

/// レコードID生成（UUID v4 の32桁hex）
pub fn make_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// 履歴用タイムスタンプ（例: `2026/10/16-14:03:09`）
pub fn now_label() -> String {
    chrono::Local::now().format("%Y/%m/%d-%H:%M:%S").to_string()
}
