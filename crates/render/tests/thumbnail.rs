use std::error::Error;
use std::fs;

use qlthemes_render::{
    combine_preview, encode_png, render_thumbnail, render_thumbnail_with, FontCatalog, PixelSize,
    ThemePreview, ThumbnailOptions, DEFAULT_ACCENT,
};
use qlthemes_theme::{FontRequest, OwnedNativeTheme, NativeProperty, Rgba, Theme, TokenKind};
use tempfile::tempdir;

fn font() -> FontRequest {
    FontRequest::new("ui-monospace", 8.0)
}

#[test]
fn custom_theme_thumbnail_round_trips_through_png() -> Result<(), Box<dyn Error>> {
    let theme = OwnedNativeTheme::new("Paper")
        .property(TokenKind::Plain, NativeProperty::with_color("#333333"))
        .property(TokenKind::Canvas, NativeProperty::with_color("#fdf6e3"))
        .to_theme();
    let image = render_thumbnail(&theme, PixelSize::square(100), &font(), &FontCatalog::system())
        .ok_or("thumbnail surface")?;

    let dir = tempdir()?;
    let path = dir.path().join("paper.png");
    fs::write(&path, encode_png(&image)?)?;
    let decoded = image::open(&path)?.to_rgba8();

    assert_eq!(decoded.dimensions(), (100, 100));
    assert_eq!(decoded.get_pixel(99, 2).0, [0xfd, 0xf6, 0xe3, 0xff]);
    assert_eq!(decoded.get_pixel(99, 99).0, DEFAULT_ACCENT.to_array());
    assert!(decoded.pixels().any(|pixel| pixel.0 == [0x33, 0x33, 0x33, 0xff]));
    Ok(())
}

#[test]
fn standalone_theme_with_custom_accent_has_no_badge() -> Result<(), Box<dyn Error>> {
    let mut theme = Theme::new("Bundled");
    theme.set_standalone(true);
    let accent = Rgba::new(0xff, 0x00, 0x80, 0xff);
    let options = ThumbnailOptions::new(PixelSize::square(64), font()).with_accent(accent);
    let image = render_thumbnail_with(&theme, &options, &FontCatalog::system())
        .ok_or("thumbnail surface")?;
    assert!(image.pixels().all(|pixel| pixel.0 != accent.to_array()));

    theme.set_standalone(false);
    let image = render_thumbnail_with(&theme, &options, &FontCatalog::system())
        .ok_or("thumbnail surface")?;
    assert_eq!(image.get_pixel(63, 63).0, accent.to_array());
    Ok(())
}

#[test]
fn unset_canvas_leaves_background_transparent() {
    let mut theme = Theme::new("Clear");
    theme.set_standalone(true);
    theme
        .update_style(TokenKind::Canvas, |style| style.color = None)
        .unwrap();
    let image =
        render_thumbnail(&theme, PixelSize::square(40), &font(), &FontCatalog::system()).unwrap();
    assert_eq!(image.get_pixel(0, 0).0[3], 0);
}

#[test]
fn previews_combine_into_a_split_icon() {
    let fonts = FontCatalog::system();
    let mut light = ThemePreview::new(Theme::new("Light"));
    let mut dark_theme = Theme::new("Dark");
    dark_theme
        .update_style(TokenKind::Canvas, |style| style.color = Some("#1e1e1e".into()))
        .unwrap();
    let mut dark = ThemePreview::new(dark_theme);

    let light_image = light.image(&fonts).cloned();
    let dark_image = dark.image(&fonts).cloned();
    let combined = combine_preview(light_image.as_ref(), dark_image.as_ref()).unwrap();
    assert_eq!(combined.dimensions(), (100, 100));
    assert_eq!(combined.get_pixel(1, 1).0, [0xff, 0xff, 0xff, 0xff]);
    assert_eq!(combined.get_pixel(99, 2).0, [0x1e, 0x1e, 0x1e, 0xff]);
}
