//! エディタペインコンポーネント

use leptos::*;

use crate::utils::codec::is_valid_json;

/// 1ペイン分の状態（テキストと、そこから導出するJSON妥当性）
#[derive(Clone, Copy)]
pub struct PaneState {
    pub text: RwSignal<String>,
    pub json_valid: Memo<bool>,
}

impl PaneState {
    pub fn new() -> Self {
        let text = create_rw_signal(String::new());
        let json_valid = create_memo(move |_| text.with(|t| is_valid_json(t)));
        Self { text, json_valid }
    }

    /// 空白のみなら None
    pub fn non_blank(&self) -> Option<String> {
        let text = self.text.get_untracked();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// テキストエリア1枚とヘッダー
#[component]
pub fn EditorPane(
    label: &'static str,
    state: PaneState,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    let char_count = move || state.text.with(|t| t.chars().count());

    view! {
        <div class="editor-pane">
            <div class="pane-header">
                <span class="pane-label">{label}</span>
                <span class=move || if state.json_valid.get() { "json-badge valid" } else { "json-badge" }>
                    {move || if state.json_valid.get() { "JSON" } else { "" }}
                </span>
                <span class="char-count">{char_count}" 文字"</span>
            </div>
            <textarea
                class="editor-textarea"
                spellcheck="false"
                placeholder=placeholder
                prop:value=move || state.text.get()
                on:input=move |ev| state.text.set(event_target_value(&ev))
            ></textarea>
        </div>
    }
}
