//! システムクリップボードへの書き込み

use wasm_bindgen_futures::{spawn_local, JsFuture};

/// `navigator.clipboard.writeText` を待って結果を返す
pub async fn write_text_async(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("windowが利用できません")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| format!("クリップボードへのコピー失敗: {:?}", e))
}

/// 投げっぱなしのコピー。成否はログのみ
pub fn copy_to_clipboard(text: String) {
    spawn_local(async move {
        match write_text_async(&text).await {
            Ok(()) => log::info!("クリップボードにコピーしました ({}文字)", text.chars().count()),
            Err(e) => log::error!("{}", e),
        }
    });
}
