/// Largest size with the source aspect ratio that fits inside the canvas.
///
/// Returns `(floor(src_w * s), floor(src_h * s))` with
/// `s = min(canvas_w / src_w, canvas_h / src_h)`, clamped to at least 1x1.
/// Integer arithmetic keeps the fitted edge exactly on the canvas edge.
pub fn fit_within(canvas_w: u32, canvas_h: u32, src_w: u32, src_h: u32) -> (u32, u32) {
    let iw = u64::from(src_w.max(1));
    let ih = u64::from(src_h.max(1));
    let cw = u64::from(canvas_w.max(1));
    let ch = u64::from(canvas_h.max(1));
    // cw/iw <= ch/ih  <=>  cw*ih <= ch*iw
    let (w, h) = if cw * ih <= ch * iw {
        (cw, ih * cw / iw)
    } else {
        (iw * ch / ih, ch)
    };
    (clamp_dim(w), clamp_dim(h))
}

pub fn center_offset(inner_w: u32, inner_h: u32, outer_w: u32, outer_h: u32) -> (u32, u32) {
    let ox = outer_w.saturating_sub(inner_w) / 2;
    let oy = outer_h.saturating_sub(inner_h) / 2;
    (ox, oy)
}

fn clamp_dim(v: u64) -> u32 {
    u32::try_from(v.max(1)).unwrap_or(u32::MAX)
}
