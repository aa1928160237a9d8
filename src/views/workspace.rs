//! 2ペインのエディタ画面

use leptos::*;

use crate::components::{ActionButton, EditorPane, ResizablePanels};
use crate::models::{CodecFlow, FormatMode, PaneAction};
use crate::utils::clipboard::copy_to_clipboard;
use crate::utils::codec::{format_json, transcode, CodecError};
use crate::{AppContext, SETTINGS_AUTO_SAVE_KEY};

/// コピー完了表示を戻すまでの時間
const COPY_FEEDBACK_MS: u32 = 2000;

const AUTO_SAVE_TITLE: &str = "コピー";

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[component]
pub fn Workspace() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let input = ctx.input;
    let output = ctx.output;

    let (title, set_title) = create_signal(String::new());
    let (copy_success, set_copy_success) = create_signal(false);
    // (エラーかどうか, メッセージ)
    let (notice, set_notice) = create_signal(None::<(bool, String)>);

    // Base64 変換
    let run_codec = move |flow: CodecFlow| match transcode(flow, &input.text.get_untracked()) {
        Ok(result) => {
            output.text.set(result);
            set_notice.set(None);
        }
        Err(CodecError::EmptyInput) => alert("テキストを入力してください"),
        Err(e) => {
            log::warn!("{}", e);
            set_notice.set(Some((true, e.to_string())));
        }
    };

    // JSON 整形（無効なJSONでは何もしない）
    let run_format = move |mode: FormatMode| {
        if !input.json_valid.get_untracked() {
            return;
        }
        match format_json(&input.text.get_untracked(), mode) {
            Ok(formatted) => output.text.set(formatted),
            Err(e) => log::warn!("整形をスキップ: {}", e),
        }
    };

    // 右ペインのコピー/移動
    let pane_action = {
        let ctx = ctx.clone();
        move |action: PaneAction| {
            let Some(value) = output.non_blank() else {
                return;
            };
            match action {
                PaneAction::Copy => {
                    copy_to_clipboard(value.clone());
                    set_copy_success.set(true);
                    spawn_local(async move {
                        gloo::timers::future::TimeoutFuture::new(COPY_FEEDBACK_MS).await;
                        set_copy_success.set(false);
                    });
                    if ctx.store.get_settings(SETTINGS_AUTO_SAVE_KEY).value.is_checked() && ctx.store.add(&value, AUTO_SAVE_TITLE) {
                        ctx.touch_history();
                    }
                }
                PaneAction::Move => input.text.set(value),
            }
        }
    };
    let on_copy = {
        let pane_action = pane_action.clone();
        move || pane_action(PaneAction::Copy)
    };
    let on_move = move || pane_action(PaneAction::Move);

    // 履歴に保存（右ペインが空なら左ペイン）
    let save_to_history = {
        let ctx = ctx.clone();
        move |_| {
            let Some(data) = output.non_blank().or_else(|| input.non_blank()) else {
                alert("テキストを入力してください");
                return;
            };
            if ctx.store.add(&data, title.get_untracked().trim()) {
                ctx.touch_history();
                set_title.set(String::new());
                set_notice.set(Some((false, "履歴に保存しました".to_string())));
            } else {
                set_notice.set(Some((true, "履歴の保存に失敗しました".to_string())));
            }
        }
    };

    let json_ready = move || input.json_valid.get();
    let output_ready = move || output.text.with(|t| !t.trim().is_empty());

    let left = view! {
        <div class="pane-column">
            <EditorPane label="入力" state=input placeholder="テキスト / Base64 / JSON" />
            <div class="pane-options">
                <ActionButton label="エンコード" enabled=|| true on_click=move || run_codec(CodecFlow::Encode) />
                <ActionButton label="デコード" enabled=|| true on_click=move || run_codec(CodecFlow::Decode) />
                <ActionButton label="圧縮" enabled=json_ready on_click=move || run_format(FormatMode::Minify) />
                <ActionButton label="整形" enabled=json_ready on_click=move || run_format(FormatMode::Pretty) />
            </div>
        </div>
    }
    .into_view();

    let right = view! {
        <div class="pane-column">
            <EditorPane label="出力" state=output />
            <div class="pane-options">
                <ActionButton label="コピー" enabled=output_ready on_click=on_copy />
                <ActionButton label="← 移動" enabled=output_ready on_click=on_move />
                {move || copy_success.get().then(|| view! { <span class="copy-feedback">"コピーしました!"</span> })}
            </div>
        </div>
    }
    .into_view();

    view! {
        <div class="workspace">
            <ResizablePanels left=left right=right />

            <div class="save-section">
                <input type="text" class="title-input" placeholder="履歴のタイトル"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
                <button class="save-btn" on:click=save_to_history>"履歴に保存"</button>
            </div>

            {move || notice.get().map(|(is_error, msg)| {
                let class = if is_error { "status error" } else { "status success" };
                view! { <p class=class>{msg}</p> }
            })}
        </div>
    }
}
