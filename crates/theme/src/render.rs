//! Resolution of a style record into concrete rendering attributes.
//!
//! Glyph rasterization belongs to the host; this module only answers which
//! color, decoration and font variant a line of sample text should use.

use crate::color::Rgba;
use crate::style::StyleAttributes;

/// Base font requested by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FontRequest {
    pub family: String,
    pub size: f32,
}

impl FontRequest {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// Trait mask passed to the font provider; unset traits keep the base value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontTraits {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl FontTraits {
    pub fn is_empty(&self) -> bool {
        self.bold.is_none() && self.italic.is_none()
    }
}

/// A concrete font chosen for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
}

impl FontFace {
    pub fn regular(request: &FontRequest) -> Self {
        Self {
            family: request.family.clone(),
            size: request.size,
            bold: false,
            italic: false,
        }
    }
}

/// Looks up styled variants of a font family on the host platform.
pub trait FontVariants {
    /// Returns `None` when the family has no face with the requested traits.
    fn variant(&self, family: &str, traits: FontTraits, size: f32) -> Option<FontFace>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Underline {
    Double,
    /// Any inherited underline is removed.
    Removed,
}

/// Effective attributes of one rendered line.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub text: String,
    pub color: Option<Rgba>,
    pub underline: Option<Underline>,
    pub underline_color: Option<Rgba>,
    pub font: FontFace,
}

impl StyleAttributes {
    /// Resolves the rendering attributes for `label`.
    ///
    /// The color falls back to `plain_color` when unset. Underline decorations
    /// are skipped for icons.
    pub fn render_style(
        &self,
        label: &str,
        font: &FontRequest,
        plain_color: Option<&str>,
        for_icon: bool,
        fonts: &dyn FontVariants,
    ) -> RenderStyle {
        let color = self
            .color()
            .or(plain_color.filter(|plain| !plain.trim().is_empty()))
            .and_then(resolve_color);

        let mut underline = None;
        let mut underline_color = None;
        if !for_icon {
            if let Some(flag) = self.underline {
                underline = Some(if flag {
                    Underline::Double
                } else {
                    Underline::Removed
                });
                underline_color = color;
            }
        }

        let traits = FontTraits {
            bold: self.bold,
            italic: self.italic,
        };
        let face = if traits.is_empty() {
            FontFace::regular(font)
        } else {
            fonts
                .variant(&font.family, traits, font.size)
                .unwrap_or_else(|| FontFace::regular(font))
        };

        RenderStyle {
            text: format!("{label}\n"),
            color,
            underline,
            underline_color,
            font: face,
        }
    }
}

fn resolve_color(value: &str) -> Option<Rgba> {
    match Rgba::parse(value) {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::warn!(color = value, %err, "ignoring unparseable color");
            None
        }
    }
}
