use leptos::*;
use std::rc::Rc;

mod components;
mod models;
mod utils;
mod views;

use components::PaneState;
use models::ViewMode;
use utils::clipboard_store::ClipboardStore;
use utils::storage::AppStorage;
use views::{HistoryDetail, HistoryView, Workspace};

/// 「コピー時に履歴へ保存」設定のキー
pub const SETTINGS_AUTO_SAVE_KEY: &str = "settings_auto_save_copy";

pub type Store = ClipboardStore<AppStorage>;

// ============================================
// アプリ共有状態
// ============================================

/// 画面間で共有する状態。各ペインの状態は PaneState として個別に持つ
#[derive(Clone)]
pub struct AppContext {
    pub store: Rc<Store>,
    pub input: PaneState,
    pub output: PaneState,
    pub set_view_mode: WriteSignal<ViewMode>,
    /// 履歴の変更通知（一覧の再読込に使う）
    pub history_rev: RwSignal<u32>,
}

impl AppContext {
    pub fn touch_history(&self) {
        self.history_rev.update(|n| *n = n.wrapping_add(1));
    }
}

// ============================================
// メインアプリ（タブ切り替え）
// ============================================

#[component]
fn App() -> impl IntoView {
    let store = Rc::new(ClipboardStore::new(AppStorage::detect()));
    store.repair_index();

    let (view_mode, set_view_mode) = create_signal(ViewMode::Workspace);
    let ctx = AppContext {
        store,
        input: PaneState::new(),
        output: PaneState::new(),
        set_view_mode,
        history_rev: create_rw_signal(0),
    };
    provide_context(ctx.clone());

    let history_count = {
        let ctx = ctx.clone();
        move || {
            ctx.history_rev.get();
            ctx.store.list_ids().len()
        }
    };

    let is_workspace = move || view_mode.get() == ViewMode::Workspace;

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Base64 / JSON ツール"</h1>
                <nav class="tabs">
                    <button
                        class=move || if is_workspace() { "active" } else { "" }
                        on:click=move |_| set_view_mode.set(ViewMode::Workspace)
                    >
                        "エディタ"
                    </button>
                    <button
                        class=move || if is_workspace() { "" } else { "active" }
                        on:click=move |_| set_view_mode.set(ViewMode::History)
                    >
                        "履歴 (" {history_count} ")"
                    </button>
                </nav>
            </header>

            <main class="container">
                {move || match view_mode.get() {
                    ViewMode::Workspace => view! { <Workspace /> }.into_view(),
                    ViewMode::History => view! { <HistoryView /> }.into_view(),
                    ViewMode::HistoryDetail { id } => view! { <HistoryDetail id=id /> }.into_view(),
                }}
            </main>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    utils::log_trace::init(log::LevelFilter::Info);
    log::info!("起動");
    mount_to_body(App);
}
