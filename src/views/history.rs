//! クリップボード履歴画面

use leptos::*;

use crate::components::{RecordCard, SettingsToggle};
use crate::models::ViewMode;
use crate::utils::clipboard::copy_to_clipboard;
use crate::utils::clipboard_store::StoreError;
use crate::utils::log_trace;
use crate::{AppContext, SETTINGS_AUTO_SAVE_KEY};

// ============================================
// 履歴一覧
// ============================================

#[component]
pub fn HistoryView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");

    let records = move || {
        ctx.history_rev.get();
        ctx.store.list_records()
    };

    view! {
        <div class="history-view">
            <div class="history-header">
                <h2>"クリップボード履歴"</h2>
                <SettingsToggle settings_key=SETTINGS_AUTO_SAVE_KEY label="コピー時に履歴へ保存" />
            </div>

            <div class="record-list">
                {move || {
                    let list = records();
                    if list.is_empty() {
                        view! { <p class="empty">"履歴はありません"</p> }.into_view()
                    } else {
                        list.into_iter().map(|r| view! { <RecordCard record=r /> }).collect_view()
                    }
                }}
            </div>

            <LogPanel />
        </div>
    }
}

// ============================================
// 履歴詳細
// ============================================

#[component]
pub fn HistoryDetail(id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let set_view_mode = ctx.set_view_mode;

    let back = move |_| set_view_mode.set(ViewMode::History);

    let record = match ctx.store.try_get(&id) {
        Ok(record) => record,
        Err(e) => {
            if !matches!(e, StoreError::Missing(_)) {
                log::warn!("{}", e);
            }
            return view! {
                <div class="history-detail">
                    <button class="back-btn" on:click=back>"← 戻る"</button>
                    <p class="status error">"レコードが見つかりません"</p>
                </div>
            }
            .into_view();
        }
    };

    let data = record.data.clone();
    let load = {
        let data = data.clone();
        let input = ctx.input;
        move |_| {
            input.text.set(data.clone());
            set_view_mode.set(ViewMode::Workspace);
        }
    };

    let copy = {
        let data = data.clone();
        move |_| copy_to_clipboard(data.clone())
    };

    let delete = {
        let ctx = ctx.clone();
        move |_| {
            ctx.store.delete(&id);
            ctx.touch_history();
            set_view_mode.set(ViewMode::History);
        }
    };

    view! {
        <div class="history-detail">
            <div class="detail-header">
                <button class="back-btn" on:click=back>"← 戻る"</button>
                <h3>{if record.title.is_empty() { "(無題)".to_string() } else { record.title.clone() }}</h3>
                <span class="record-time">{record.time.clone()}</span>
            </div>
            <pre class="detail-data">{data}</pre>
            <div class="detail-actions">
                <button on:click=load>"入力ペインに読み込む"</button>
                <button on:click=copy>"コピー"</button>
                <button class="delete-btn" on:click=delete>"削除"</button>
            </div>
        </div>
    }
    .into_view()
}

// ============================================
// トレースログ操作
// ============================================

#[component]
fn LogPanel() -> impl IntoView {
    view! {
        <details class="log-panel">
            <summary>"ログ"</summary>
            <div class="log-actions">
                <button on:click=move |_| copy_to_clipboard(log_trace::get_logs_json())>"ログをコピー"</button>
                <button on:click=move |_| log_trace::download_logs()>"ダウンロード"</button>
                <button on:click=move |_| log_trace::clear_logs()>"クリア"</button>
            </div>
        </details>
    }
}
