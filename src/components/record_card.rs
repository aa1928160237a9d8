//! 履歴カードコンポーネント

use leptos::*;

use crate::models::{ClipboardRecord, ViewMode};
use crate::AppContext;

const PREVIEW_CHARS: usize = 80;

/// 一覧用に先頭だけ切り出す
fn preview(data: &str) -> String {
    let mut chars = data.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}

/// 履歴1件。クリックで詳細を開く
#[component]
pub fn RecordCard(record: ClipboardRecord) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let title = if record.title.is_empty() { "(無題)".to_string() } else { record.title.clone() };
    let id = record.id.clone();

    let open = move |_| {
        ctx.set_view_mode.set(ViewMode::HistoryDetail { id: id.clone() });
    };

    view! {
        <div class="record-card" on:click=open>
            <div class="record-header">
                <h4>{title}</h4>
                <span class="record-time">{record.time}</span>
            </div>
            <pre class="record-preview">{preview(&record.data)}</pre>
        </div>
    }
}
