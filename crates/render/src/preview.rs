use image::RgbaImage;
use qlthemes_theme::{FontRequest, FontVariants, Theme};

use crate::font::SYSTEM_FONT_FAMILY;
use crate::thumbnail::{render_thumbnail, PixelSize};

pub const DEFAULT_THUMBNAIL_SIZE: PixelSize = PixelSize::square(100);
pub const DEFAULT_THUMBNAIL_FONT_SIZE: f32 = 8.0;

/// A theme paired with its lazily rendered thumbnail.
/// 佈景主題與其延遲繪製的縮圖。
#[derive(Debug, Clone)]
pub struct ThemePreview {
    theme: Theme,
    size: PixelSize,
    font: FontRequest,
    /// Outer `None` means not rendered yet; inner `None` is a cached failure.
    image: Option<Option<RgbaImage>>,
}

impl ThemePreview {
    pub fn new(theme: Theme) -> Self {
        Self::with_thumbnail(
            theme,
            DEFAULT_THUMBNAIL_SIZE,
            FontRequest::new(SYSTEM_FONT_FAMILY, DEFAULT_THUMBNAIL_FONT_SIZE),
        )
    }

    pub fn with_thumbnail(theme: Theme, size: PixelSize, font: FontRequest) -> Self {
        Self {
            theme,
            size,
            font,
            image: None,
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Mutable access to the theme; drops the cached thumbnail.
    pub fn theme_mut(&mut self) -> &mut Theme {
        self.invalidate_image();
        &mut self.theme
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn font(&self) -> &FontRequest {
        &self.font
    }

    /// Thumbnail, rendered on first access and cached afterwards.
    /// 第一次存取時繪製縮圖，之後使用快取。
    pub fn image(&mut self, fonts: &dyn FontVariants) -> Option<&RgbaImage> {
        if self.image.is_none() {
            let rendered = render_thumbnail(&self.theme, self.size, &self.font, fonts);
            self.image = Some(rendered);
        }
        self.image.as_ref().and_then(Option::as_ref)
    }

    pub fn has_cached_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn invalidate_image(&mut self) {
        self.image = None;
    }

    /// Name, plus the description on a second line when there is one.
    pub fn title(&self) -> String {
        let description = self.theme.description();
        if description.is_empty() {
            self.theme.name().to_string()
        } else {
            format!("{}\n{}", self.theme.name(), description)
        }
    }

    /// Preview of an unsaved copy of the theme, with the same thumbnail settings.
    pub fn duplicate(&self) -> ThemePreview {
        Self::with_thumbnail(self.theme.duplicate(), self.size, self.font.clone())
    }
}
