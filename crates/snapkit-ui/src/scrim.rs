//! Values derived from the live offset for rendering the backdrop and the
//! pinned sheet footer.

use crate::config::SheetChrome;

/// Backdrop opacity for a surface at `offset`, where `terminal_offset` is the
/// fully hidden position. More open means more opaque.
pub fn scrim_opacity(offset: f32, terminal_offset: f32, max_opacity: f32) -> f32 {
    if terminal_offset <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (max_opacity * (1.0 - offset / terminal_offset)).clamp(0.0, max_opacity.max(0.0))
}

/// How far a pinned footer is pushed down, in `[0, footer_height]`.
///
/// The footer stays put while the sheet's top edge is above
/// `extent - header - footer` and is fully hidden once only the header is
/// left on screen.
pub fn footer_offset(offset: f32, extent: f32, chrome: SheetChrome) -> f32 {
    let footer = chrome.footer_height;
    if footer <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    let start = extent - chrome.header_height - footer;
    (offset - start).clamp(0.0, footer)
}
