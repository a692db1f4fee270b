use image::RgbaImage;
use qlthemes_theme::{FontRequest, FontVariants, RenderStyle, Rgba, Theme, TokenKind, Underline};

use crate::display::{
    Bounds, DisplayCommand, DisplayList, GlyphRun, Point, Rectangle, Size, Stroke, Triangle,
};
use crate::surface::Surface;

/// Margin between the surface edges and the text area.
/// 表面邊緣與文字區域之間的邊距。
pub const THUMBNAIL_INSET: f32 = 6.0;

/// Leg length of the custom theme badge.
/// 自訂佈景主題標記三角形的邊長。
pub const BADGE_SIZE: f32 = 20.0;

pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Accent used for the badge when the host supplies none.
pub const DEFAULT_ACCENT: Rgba = Rgba::new(0x00, 0x7a, 0xff, 0xff);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// Parameters of one thumbnail rendering.
/// 單次縮圖繪製的參數。
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailOptions {
    pub size: PixelSize,
    pub font: FontRequest,
    pub accent: Rgba,
    /// Icons skip underline decorations.
    pub for_icon: bool,
}

impl ThumbnailOptions {
    pub fn new(size: PixelSize, font: FontRequest) -> Self {
        Self {
            size,
            font,
            accent: DEFAULT_ACCENT,
            for_icon: true,
        }
    }

    pub fn with_accent(mut self, accent: Rgba) -> Self {
        self.accent = accent;
        self
    }

    pub fn for_icon(mut self, for_icon: bool) -> Self {
        self.for_icon = for_icon;
        self
    }
}

/// One resolved line per kind in thumbnail order, then the keywords.
/// 依縮圖順序解析每種標記的樣式，最後是關鍵字。
pub fn thumbnail_lines(
    theme: &Theme,
    font: &FontRequest,
    for_icon: bool,
    fonts: &dyn FontVariants,
) -> Vec<RenderStyle> {
    let plain_color = theme.plain().color();
    theme
        .styles_in(&TokenKind::THUMBNAIL_ORDER)
        .map(|(kind, style)| {
            style.render_style(&kind.display_name(), font, plain_color, for_icon, fonts)
        })
        .collect()
}

/// Lays out the thumbnail as drawing commands.
/// 將縮圖排版為繪製指令。
pub fn build_display_list(
    theme: &Theme,
    options: &ThumbnailOptions,
    fonts: &dyn FontVariants,
) -> DisplayList {
    let width = options.size.width as f32;
    let height = options.size.height as f32;
    let mut list = DisplayList::default();

    if let Some(canvas) = theme.canvas().color() {
        match Rgba::parse(canvas) {
            Ok(color) => list.push(DisplayCommand::FillRect(Rectangle {
                origin: Point::new(0.0, 0.0),
                size: Size { width, height },
                color,
            })),
            Err(err) => tracing::warn!(color = canvas, %err, "leaving thumbnail canvas transparent"),
        }
    }

    let text_area = Bounds {
        origin: Point::new(THUMBNAIL_INSET, THUMBNAIL_INSET),
        size: Size {
            width: (width - 2.0 * THUMBNAIL_INSET).max(0.0),
            height: (height - 2.0 * THUMBNAIL_INSET).max(0.0),
        },
    };
    let line_height = options.font.size * LINE_HEIGHT_FACTOR;
    let mut y = THUMBNAIL_INSET;
    for line in thumbnail_lines(theme, &options.font, options.for_icon, fonts) {
        if y >= text_area.bottom() {
            break;
        }
        let run = GlyphRun {
            text: line.text,
            font: line.font,
            position: Point::new(THUMBNAIL_INSET, y),
            color: line.color.unwrap_or(Rgba::BLACK),
            clip: Some(text_area),
        };
        let underline = line.underline.filter(|_| !options.for_icon);
        if let Some(Underline::Double) = underline {
            let end = (THUMBNAIL_INSET + run.estimated_width()).min(text_area.right());
            let baseline = run.baseline() + 1.0;
            list.push(DisplayCommand::Underline {
                start: Point::new(THUMBNAIL_INSET, baseline),
                end: Point::new(end, baseline),
                stroke: Stroke {
                    width: 1.0,
                    color: line.underline_color.unwrap_or(run.color),
                },
                double: true,
            });
        }
        list.push(DisplayCommand::GlyphRun(run));
        y += line_height;
    }

    if !theme.is_standalone() {
        list.push(DisplayCommand::FillTriangle(Triangle {
            points: [
                Point::new(width - BADGE_SIZE, height),
                Point::new(width, height),
                Point::new(width, height - BADGE_SIZE),
            ],
            color: options.accent,
        }));
    }

    list
}

/// Renders a thumbnail with the default accent and icon settings.
pub fn render_thumbnail(
    theme: &Theme,
    size: PixelSize,
    font: &FontRequest,
    fonts: &dyn FontVariants,
) -> Option<RgbaImage> {
    render_thumbnail_with(theme, &ThumbnailOptions::new(size, font.clone()), fonts)
}

/// Renders a thumbnail, or `None` when no surface of that size can exist.
/// 繪製縮圖；無法建立該尺寸的表面時回傳 `None`。
pub fn render_thumbnail_with(
    theme: &Theme,
    options: &ThumbnailOptions,
    fonts: &dyn FontVariants,
) -> Option<RgbaImage> {
    let mut surface = Surface::new(options.size.width, options.size.height)?;
    let list = build_display_list(theme, options, fonts);
    surface.draw(&list);
    tracing::debug!(
        theme = theme.name(),
        width = options.size.width,
        height = options.size.height,
        commands = list.commands.len(),
        "rendered theme thumbnail"
    );
    Some(surface.into_image())
}
