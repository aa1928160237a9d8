//! ビューモジュール

pub mod history;
pub mod workspace;

pub use history::{HistoryDetail, HistoryView};
pub use workspace::Workspace;
