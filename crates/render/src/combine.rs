//! Previews pairing a light and a dark theme.

use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use qlthemes_theme::{FontRequest, FontVariants, Theme};

use crate::font::SYSTEM_FONT_FAMILY;
use crate::surface::{blend_pixel, Surface};
use crate::thumbnail::{render_thumbnail, PixelSize};

/// Smallest font size used for side-by-side thumbnails.
pub const MIN_SIDE_BY_SIDE_FONT_SIZE: f32 = 3.0;

/// Splits one canvas along the anti-diagonal: the light image fills the
/// upper-left triangle and the dark image is drawn over the lower-right one.
///
/// The canvas takes the light image's size, or the dark one's when there is no
/// light image, in which case the dark image covers everything. A dark image of
/// another size is scaled to the canvas first.
pub fn combine_preview(light: Option<&RgbaImage>, dark: Option<&RgbaImage>) -> Option<RgbaImage> {
    let Some(light) = light else {
        return dark.cloned();
    };
    let mut canvas = light.clone();
    let Some(dark) = dark else {
        return Some(canvas);
    };

    let dark = if dark.dimensions() == canvas.dimensions() {
        Cow::Borrowed(dark)
    } else {
        Cow::Owned(imageops::resize(
            dark,
            canvas.width(),
            canvas.height(),
            FilterType::Triangle,
        ))
    };

    let width = u64::from(canvas.width());
    let height = u64::from(canvas.height());
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        if u64::from(x) * height + u64::from(y) * width < width * height {
            continue;
        }
        blend_pixel(pixel, *dark.get_pixel(x, y));
    }
    Some(canvas)
}

/// Renders both themes as `size` x `size` thumbnails next to each other,
/// separated by `spacing` pixels.
pub fn combine_side_by_side(
    light: Option<&Theme>,
    dark: Option<&Theme>,
    size: u32,
    spacing: u32,
    fonts: &dyn FontVariants,
) -> Option<RgbaImage> {
    if light.is_none() && dark.is_none() {
        return None;
    }
    let width = size.checked_mul(2)?.checked_add(spacing)?;
    let mut surface = Surface::new(width, size)?;
    let font = FontRequest::new(SYSTEM_FONT_FAMILY, side_by_side_font_size(size));

    let panels = [(light, 0), (dark, size + spacing)];
    for (theme, x) in panels {
        if let Some(theme) = theme {
            let thumbnail = render_thumbnail(theme, PixelSize::square(size), &font, fonts)?;
            surface.overlay(&thumbnail, x, 0);
        }
    }
    Some(surface.into_image())
}

/// Font size of each side-by-side thumbnail: a sixth of its side.
pub fn side_by_side_font_size(size: u32) -> f32 {
    (size as f32 / 6.0).max(MIN_SIDE_BY_SIDE_FONT_SIZE)
}
