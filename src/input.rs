use glam::Vec2;
use web_sys as web;

/// Position of a client-space point as a ratio of a `size` box anchored at
/// `origin`. Clamped to the unit square; an empty box reports its centre.
#[inline]
pub fn client_ratio(client: Vec2, origin: Vec2, size: Vec2) -> Vec2 {
    if !(size.x > 0.0 && size.y > 0.0) || !client.is_finite() {
        return Vec2::splat(0.5);
    }
    ((client - origin) / size).clamp(Vec2::ZERO, Vec2::ONE)
}

/// Pointer position as a ratio of the viewport (the tunnel reacts to the
/// whole window, not just the canvas).
#[inline]
pub fn pointer_viewport_ratio(ev: &web::PointerEvent, window: &web::Window) -> Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    client_ratio(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::ZERO,
        Vec2::new(w, h),
    )
}

/// Backing-store size for a CSS size and device pixel ratio, never below
/// `min_px` on either axis.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64, max_dpr: f64, min_px: u32) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 {
        dpr.min(max_dpr)
    } else {
        1.0
    };
    let w = (css_w.max(0.0) * dpr) as u32;
    let h = (css_h.max(0.0) * dpr) as u32;
    (w.max(min_px), h.max(min_px))
}
