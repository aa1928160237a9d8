//! UIコンポーネントモジュール

pub mod action_button;
pub mod editor_pane;
pub mod record_card;
pub mod resizable_panels;
pub mod settings_toggle;

pub use action_button::ActionButton;
pub use editor_pane::{EditorPane, PaneState};
pub use record_card::RecordCard;
pub use resizable_panels::ResizablePanels;
pub use settings_toggle::SettingsToggle;
