//! ペイン幅の計算

/// どちらのペインもこれ以下には縮めない
pub const MIN_PANEL_WIDTH: f64 = 200.0;

/// ドラッグ位置から左右ペインの幅を求める。
/// どちらかが最小幅以下になる場合は None（幅を変えない）
pub fn panel_widths(container_width: f64, pointer_x: f64, divider_width: f64) -> Option<(f64, f64)> {
    let left = pointer_x;
    let right = container_width - left - divider_width;
    (left > MIN_PANEL_WIDTH && right > MIN_PANEL_WIDTH).then_some((left, right))
}
