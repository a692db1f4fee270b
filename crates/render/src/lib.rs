//! Rasterized previews of syntax-highlighting themes.
//! 語法醒目提示佈景主題的點陣預覽。

pub mod combine;
pub mod display;
pub mod encode;
pub mod font;
pub mod preview;
pub mod surface;
pub mod thumbnail;

pub use combine::{combine_preview, combine_side_by_side, side_by_side_font_size};
pub use display::{Bounds, DisplayCommand, DisplayList, GlyphRun};
pub use encode::{encode_png, RenderError};
pub use font::{FamilyFaces, FontCatalog, SYSTEM_FONT_FAMILY};
pub use preview::ThemePreview;
pub use surface::{Surface, MAX_SURFACE_DIMENSION};
pub use thumbnail::{
    build_display_list, render_thumbnail, render_thumbnail_with, thumbnail_lines, PixelSize,
    ThumbnailOptions, BADGE_SIZE, DEFAULT_ACCENT, THUMBNAIL_INSET,
};
