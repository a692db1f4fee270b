use std::collections::HashMap;

use qlthemes_theme::{FontFace, FontTraits, FontVariants};

/// Family used when no font is configured.
/// 未設定字型時使用的字族。
pub const SYSTEM_FONT_FAMILY: &str = "ui-monospace";

/// Styled faces a family ships with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilyFaces {
    pub bold: bool,
    pub italic: bool,
    pub bold_italic: bool,
}

impl FamilyFaces {
    pub const ALL: FamilyFaces = FamilyFaces {
        bold: true,
        italic: true,
        bold_italic: true,
    };

    pub const REGULAR_ONLY: FamilyFaces = FamilyFaces {
        bold: false,
        italic: false,
        bold_italic: false,
    };

    fn supports(&self, bold: bool, italic: bool) -> bool {
        match (bold, italic) {
            (false, false) => true,
            (true, false) => self.bold,
            (false, true) => self.italic,
            (true, true) => self.bold_italic,
        }
    }
}

/// Table of known families and their styled faces.
/// 已知字族與其樣式字面的對照表。
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    families: HashMap<String, FamilyFaces>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Monospaced families commonly installed on desktop systems.
    pub fn system() -> Self {
        let mut catalog = Self::new();
        for family in [
            SYSTEM_FONT_FAMILY,
            "Menlo",
            "Monaco",
            "SF Mono",
            "Courier",
            "Courier New",
            "DejaVu Sans Mono",
            "JetBrains Mono",
        ] {
            catalog.insert(family, FamilyFaces::ALL);
        }
        catalog
    }

    pub fn insert(&mut self, family: impl Into<String>, faces: FamilyFaces) {
        self.families.insert(family.into().to_lowercase(), faces);
    }

    pub fn contains(&self, family: &str) -> bool {
        self.families.contains_key(&family.to_lowercase())
    }
}

impl FontVariants for FontCatalog {
    fn variant(&self, family: &str, traits: FontTraits, size: f32) -> Option<FontFace> {
        let faces = self.families.get(&family.to_lowercase())?;
        let bold = traits.bold.unwrap_or(false);
        let italic = traits.italic.unwrap_or(false);
        if !faces.supports(bold, italic) {
            return None;
        }
        Some(FontFace {
            family: family.to_string(),
            size,
            bold,
            italic,
        })
    }
}
