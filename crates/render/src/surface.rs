use image::RgbaImage;
use qlthemes_theme::Rgba;

use crate::display::{
    Bounds, DisplayCommand, DisplayList, GlyphRun, Point, Rectangle, Stroke, Triangle,
};

/// Largest width or height a surface may have.
/// 繪圖表面允許的最大寬度或高度。
pub const MAX_SURFACE_DIMENSION: u32 = 8192;

/// Share of a character cell covered by its glyph block.
const GLYPH_FILL: f32 = 0.8;
/// Share of the font size used as glyph height.
const CAP_HEIGHT: f32 = 0.7;
/// Horizontal shift per pixel of height for italic blocks.
const ITALIC_SHEAR: f32 = 0.2;

/// An owned RGBA drawing target. Dropping it releases the pixels.
/// 擁有像素資料的 RGBA 繪圖表面，釋放時即回收資源。
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Transparent surface, or `None` for empty or oversized dimensions.
    /// 建立透明表面；尺寸為零或過大時回傳 `None`。
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0
            || height == 0
            || width > MAX_SURFACE_DIMENSION
            || height > MAX_SURFACE_DIMENSION
        {
            tracing::debug!(width, height, "refusing to allocate surface");
            return None;
        }
        Some(Self {
            image: RgbaImage::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Rasterizes `list` in order.
    /// 依序點陣化繪製清單。
    pub fn draw(&mut self, list: &DisplayList) {
        for command in &list.commands {
            match command {
                DisplayCommand::FillRect(rect) => self.fill_rect(rect),
                DisplayCommand::FillTriangle(triangle) => self.fill_triangle(triangle),
                DisplayCommand::GlyphRun(run) => self.draw_glyph_run(run),
                DisplayCommand::Underline {
                    start,
                    end,
                    stroke,
                    double,
                } => {
                    self.draw_horizontal_line(*start, *end, stroke);
                    if *double {
                        let gap = stroke.width.max(1.0) * 2.0;
                        self.draw_horizontal_line(
                            Point::new(start.x, start.y + gap),
                            Point::new(end.x, end.y + gap),
                            stroke,
                        );
                    }
                }
            }
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Composites `source` with its top-left corner at `(x, y)`.
    pub fn overlay(&mut self, source: &RgbaImage, x: u32, y: u32) {
        for (sx, sy, pixel) in source.enumerate_pixels() {
            let (tx, ty) = (x + sx, y + sy);
            if tx < self.width() && ty < self.height() {
                blend_pixel(self.image.get_pixel_mut(tx, ty), *pixel);
            }
        }
    }

    fn fill_rect(&mut self, rect: &Rectangle) {
        let x = rect.origin.x.round() as i32;
        let y = rect.origin.y.round() as i32;
        let width = rect.size.width.ceil() as i32;
        let height = rect.size.height.ceil() as i32;
        let area = self.area(None);
        self.fill_block(x, y, width, height, 0.0, rect.color, area);
    }

    /// Pixel area `[left, top, right, bottom)` covered by `clip`, or the whole surface.
    fn area(&self, clip: Option<&Bounds>) -> [i32; 4] {
        let (width, height) = (self.width() as i32, self.height() as i32);
        match clip {
            None => [0, 0, width, height],
            Some(bounds) => [
                (bounds.origin.x.round() as i32).clamp(0, width),
                (bounds.origin.y.round() as i32).clamp(0, height),
                (bounds.right().round() as i32).clamp(0, width),
                (bounds.bottom().round() as i32).clamp(0, height),
            ],
        }
    }

    /// Fills a `width` x `height` block inside `area`, shifting each row right
    /// by `shear` pixels per row above the bottom edge.
    #[allow(clippy::too_many_arguments)]
    fn fill_block(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        shear: f32,
        color: Rgba,
        [left, top, right, bottom]: [i32; 4],
    ) {
        if width <= 0 || height <= 0 {
            return;
        }
        let y0 = y.clamp(top, bottom.max(top));
        let y1 = (y + height).clamp(top, bottom.max(top));
        let pixel = image::Rgba(color.to_array());
        for yy in y0..y1 {
            let offset = ((y + height - 1 - yy) as f32 * shear).round() as i32;
            let x0 = (x + offset).clamp(left, right.max(left));
            let x1 = (x + offset + width).clamp(left, right.max(left));
            for xx in x0..x1 {
                blend_pixel(self.image.get_pixel_mut(xx as u32, yy as u32), pixel);
            }
        }
    }

    fn fill_triangle(&mut self, triangle: &Triangle) {
        let [a, b, c] = triangle.points;
        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
        let max_x = (a.x.max(b.x).max(c.x).ceil().max(0.0) as u32).min(self.width());
        let max_y = (a.y.max(b.y).max(c.y).ceil().max(0.0) as u32).min(self.height());
        let pixel = image::Rgba(triangle.color.to_array());
        for yy in min_y..max_y {
            for xx in min_x..max_x {
                let center = Point::new(xx as f32 + 0.5, yy as f32 + 0.5);
                if contains(triangle.points, center) {
                    blend_pixel(self.image.get_pixel_mut(xx, yy), pixel);
                }
            }
        }
    }

    fn draw_glyph_run(&mut self, run: &GlyphRun) {
        let advance = run.advance();
        let block_width = (advance * GLYPH_FILL).round().max(1.0) as i32 + i32::from(run.font.bold);
        let block_height = (run.font.size * CAP_HEIGHT).round().max(1.0) as i32;
        let shear = if run.font.italic { ITALIC_SHEAR } else { 0.0 };
        let top = (run.baseline() - block_height as f32).round() as i32;
        let area = self.area(run.clip.as_ref());
        for (column, ch) in run.text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = (run.position.x + column as f32 * advance).round() as i32;
            self.fill_block(x, top, block_width, block_height, shear, run.color, area);
        }
    }

    fn draw_horizontal_line(&mut self, start: Point, end: Point, stroke: &Stroke) {
        let x = start.x.min(end.x).round() as i32;
        let width = (start.x - end.x).abs().round() as i32;
        let thickness = stroke.width.round().max(1.0) as i32;
        let area = self.area(None);
        self.fill_block(x, start.y.round() as i32, width, thickness, 0.0, stroke.color, area);
    }
}

fn edge(from: Point, to: Point, point: Point) -> f32 {
    (to.x - from.x) * (point.y - from.y) - (to.y - from.y) * (point.x - from.x)
}

fn contains([a, b, c]: [Point; 3], point: Point) -> bool {
    let ab = edge(a, b, point);
    let bc = edge(b, c, point);
    let ca = edge(c, a, point);
    (ab >= 0.0 && bc >= 0.0 && ca >= 0.0) || (ab <= 0.0 && bc <= 0.0 && ca <= 0.0)
}

/// Source-over compositing of straight-alpha pixels.
pub(crate) fn blend_pixel(target: &mut image::Rgba<u8>, source: image::Rgba<u8>) {
    let source_alpha = source[3] as f32 / 255.0;
    if source_alpha >= 1.0 {
        *target = source;
        return;
    }
    if source_alpha <= 0.0 {
        return;
    }
    let target_alpha = target[3] as f32 / 255.0;
    let out_alpha = source_alpha + target_alpha * (1.0 - source_alpha);
    for channel in 0..3 {
        let value = (source[channel] as f32 * source_alpha
            + target[channel] as f32 * target_alpha * (1.0 - source_alpha))
            / out_alpha;
        target[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    target[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}
