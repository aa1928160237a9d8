//! 設定チェックボックス（localStorage に保存）

use leptos::*;

use crate::models::{CheckboxStatus, SettingsOptions};
use crate::utils::clipboard_store::ClipboardStore;
use crate::utils::storage::KeyValueStorage;
use crate::AppContext;

/// 設定を保存し、保存後に有効な状態を返す。失敗時は保存済みの値
pub fn apply_toggle<S: KeyValueStorage>(store: &ClipboardStore<S>, key: &str, requested: bool) -> bool {
    let options = SettingsOptions { value: CheckboxStatus::from_checked(requested) };
    if store.set_settings(key, options) {
        requested
    } else {
        store.get_settings(key).value.is_checked()
    }
}

#[component]
pub fn SettingsToggle(settings_key: &'static str, label: &'static str) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let (checked, set_checked) = create_signal(ctx.store.get_settings(settings_key).value.is_checked());

    let on_change = move |ev| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let effective = apply_toggle(&*ctx.store, settings_key, input.checked());
        // ブラウザが先に切り替えた表示を保存結果に合わせる
        input.set_checked(effective);
        set_checked.set(effective);
    };

    view! {
        <label class="settings-toggle">
            <input type="checkbox" prop:checked=move || checked.get() on:change=on_change />
            " " {label}
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    #[test]
    fn test_apply_toggle_persists() {
        let store = ClipboardStore::new(MemoryStorage::new());
        assert!(apply_toggle(&store, "opt", true));
        assert!(store.get_settings("opt").value.is_checked());
        assert!(!apply_toggle(&store, "opt", false));
        assert!(!store.get_settings("opt").value.is_checked());
    }

    #[test]
    fn test_apply_toggle_failure_keeps_stored_state() {
        let store = ClipboardStore::new(MemoryStorage::new());
        assert!(apply_toggle(&store, "opt", true));

        store.storage().set_fail_writes(true);
        assert!(apply_toggle(&store, "opt", false));

        let fresh = ClipboardStore::new(MemoryStorage::new());
        fresh.storage().set_fail_writes(true);
        assert!(!apply_toggle(&fresh, "opt", true));
    }
}
