//! ドラッグで幅を変えられる左右ペイン

use leptos::*;

use crate::utils::resize::panel_widths;

#[component]
pub fn ResizablePanels(left: View, right: View) -> impl IntoView {
    let container = create_node_ref::<html::Div>();
    let divider = create_node_ref::<html::Div>();

    // ドラッグ中フラグはこのコンポーネント内だけで持つ
    let resizing = create_rw_signal(false);
    let widths = create_rw_signal(None::<(f64, f64)>);

    let move_handle = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        if !resizing.get_untracked() {
            return;
        }
        let (Some(container), Some(divider)) = (container.get_untracked(), divider.get_untracked()) else {
            return;
        };
        let container_width = container.offset_width() as f64;
        let divider_width = divider.offset_width() as f64;
        let pointer_x = ev.client_x() as f64 - container.get_bounding_client_rect().left();
        if let Some(next) = panel_widths(container_width, pointer_x, divider_width) {
            widths.set(Some(next));
        }
    });
    let up_handle = window_event_listener(ev::mouseup, move |_| {
        if resizing.get_untracked() {
            resizing.set(false);
        }
    });
    on_cleanup(move || {
        move_handle.remove();
        up_handle.remove();
    });

    let left_style = move || widths.get().map(|(l, _)| format!("width: {}px; flex: none;", l)).unwrap_or_default();
    let right_style = move || widths.get().map(|(_, r)| format!("width: {}px; flex: none;", r)).unwrap_or_default();

    view! {
        <div class=move || if resizing.get() { "panels resizing" } else { "panels" } node_ref=container>
            <div class="panel panel-left" style=left_style>{left}</div>
            <div
                class="resizer"
                node_ref=divider
                on:mousedown=move |ev| {
                    ev.prevent_default();
                    resizing.set(true);
                }
            ></div>
            <div class="panel panel-right" style=right_style>{right}</div>
        </div>
    }
}
