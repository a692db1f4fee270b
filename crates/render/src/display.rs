use qlthemes_theme::{FontFace, Rgba};

/// Ordered drawing commands for one thumbnail.
/// 單張縮圖的繪製指令序列。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pub commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Append a command to the display list.
    /// 將指令加入繪製清單。
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn glyph_runs(&self) -> impl Iterator<Item = &GlyphRun> {
        self.commands.iter().filter_map(|command| match command {
            DisplayCommand::GlyphRun(run) => Some(run),
            _ => None,
        })
    }
}

/// Low-level drawing commands rasterized by a [`crate::Surface`].
/// 由 [`crate::Surface`] 點陣化的低階繪製指令。
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    FillRect(Rectangle),
    FillTriangle(Triangle),
    GlyphRun(GlyphRun),
    Underline {
        start: Point,
        end: Point,
        stroke: Stroke,
        double: bool,
    },
}

/// One line of sample text in a resolved font.
/// 以解析後字型繪製的一行範例文字。
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub text: String,
    pub font: FontFace,
    /// Top-left corner of the line box.
    pub position: Point,
    pub color: Rgba,
    /// Glyph pixels outside this area are not drawn.
    /// 超出此區域的字形像素不繪製。
    pub clip: Option<Bounds>,
}

impl GlyphRun {
    /// Horizontal advance of one character.
    /// 單一字元的水平步進寬度。
    pub fn advance(&self) -> f32 {
        self.font.size.max(1.0) * 0.6
    }

    /// Width of the text without trailing whitespace.
    pub fn estimated_width(&self) -> f32 {
        self.text.trim_end().chars().count() as f32 * self.advance()
    }

    pub fn baseline(&self) -> f32 {
        self.position.y + self.font.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub origin: Point,
    pub size: Size,
    pub color: Rgba,
}

/// Axis-aligned area without paint, used for clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }
}

/// Filled triangle, used for the custom theme badge.
/// 填滿的三角形，用於自訂佈景主題標記。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub points: [Point; 3],
    pub color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Rgba,
}
