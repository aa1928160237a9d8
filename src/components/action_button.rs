//! 操作ボタン

use leptos::*;

const ENABLED_CLASSES: &str = "bg-purple-300 hover:bg-purple-200 cursor-pointer";
const DISABLED_CLASSES: &str = "bg-gray-300 cursor-not-allowed";

/// 有効/無効に応じたボタンのクラス
pub fn button_classes(enabled: bool) -> &'static str {
    if enabled {
        ENABLED_CLASSES
    } else {
        DISABLED_CLASSES
    }
}

/// 有効状態に連動してスタイルが切り替わるボタン
#[component]
pub fn ActionButton<E, F>(label: &'static str, enabled: E, on_click: F) -> impl IntoView
where
    E: Fn() -> bool + Copy + 'static,
    F: Fn() + 'static,
{
    view! {
        <button
            class=move || format!("action-btn {}", button_classes(enabled()))
            disabled=move || !enabled()
            on:click=move |_| {
                if enabled() {
                    on_click();
                }
            }
        >
            {label}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_exclusive() {
        let on = button_classes(true);
        let off = button_classes(false);
        assert!(on.contains("cursor-pointer"));
        assert!(off.contains("cursor-not-allowed"));
        assert!(on.split(' ').all(|c| !off.split(' ').any(|o| o == c)));
    }
}
