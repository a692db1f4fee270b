use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::{AttributeName, AttributeValue, StyleAttributes, StyleError};
use crate::token::{TokenKind, FIXED_KIND_COUNT, MAX_KEYWORDS};

/// Light/dark classification used to pair themes with the system appearance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    #[default]
    Undefined,
    Light,
    Dark,
}

impl Appearance {
    /// Maps the native tri-state code; unknown codes are undefined.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Appearance::Light,
            2 => Appearance::Dark,
            _ => Appearance::Undefined,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Appearance::Undefined => 0,
            Appearance::Light => 1,
            Appearance::Dark => 2,
        }
    }

    /// Category name written to theme files.
    pub fn category(self) -> Option<&'static str> {
        match self {
            Appearance::Undefined => None,
            Appearance::Light => Some("light"),
            Appearance::Dark => Some("dark"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("a theme supports at most {limit} keyword classes")]
    TooManyKeywords { limit: usize },
    #[error("keyword {index} does not exist (theme has {len})")]
    KeywordOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A named syntax-highlighting theme.
#[derive(Debug, Clone)]
pub struct Theme {
    name: String,
    description: String,
    path: Option<PathBuf>,
    appearance: Appearance,
    is_standalone: bool,
    is_base16: bool,
    is_dirty: bool,
    fixed: [StyleAttributes; FIXED_KIND_COUNT],
    keywords: Vec<StyleAttributes>,
}

impl Theme {
    /// Empty theme: black text on white, everything else inherited.
    pub fn new(name: impl Into<String>) -> Self {
        let mut fixed: [StyleAttributes; FIXED_KIND_COUNT] = Default::default();
        fixed[TokenKind::Plain.index()] = StyleAttributes::with_color("#000000");
        fixed[TokenKind::Canvas.index()] = StyleAttributes::with_color("#ffffff");
        Self {
            name: name.into(),
            description: String::new(),
            path: None,
            appearance: Appearance::Undefined,
            is_standalone: false,
            is_base16: false,
            is_dirty: false,
            fixed,
            keywords: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn appearance(&self) -> Appearance {
        self.appearance
    }

    pub fn is_standalone(&self) -> bool {
        self.is_standalone
    }

    pub fn is_base16(&self) -> bool {
        self.is_base16
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Identity used by theme lists: same name and same bundled/custom origin.
    pub fn same_identity(&self, other: &Theme) -> bool {
        self.name == other.name && self.is_standalone == other.is_standalone
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.name != name {
            self.name = name;
            self.is_dirty = true;
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        if self.description != description {
            self.description = description;
            self.is_dirty = true;
        }
    }

    pub fn set_appearance(&mut self, appearance: Appearance) {
        if self.appearance != appearance {
            self.appearance = appearance;
            self.is_dirty = true;
        }
    }

    pub fn set_standalone(&mut self, standalone: bool) {
        if self.is_standalone != standalone {
            self.is_standalone = standalone;
            self.is_dirty = true;
        }
    }

    pub fn set_base16(&mut self, base16: bool) {
        if self.is_base16 != base16 {
            self.is_base16 = base16;
            self.is_dirty = true;
        }
    }

    /// Location of the theme file; not a styling change, so the theme stays clean.
    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    pub fn mark_clean(&mut self) {
        self.is_dirty = false;
    }

    pub fn style(&self, kind: TokenKind) -> Option<&StyleAttributes> {
        match kind {
            TokenKind::Keyword(slot) => self.keywords.get(slot.index()),
            fixed => Some(&self.fixed[fixed.index()]),
        }
    }

    pub fn plain(&self) -> &StyleAttributes {
        &self.fixed[TokenKind::Plain.index()]
    }

    pub fn canvas(&self) -> &StyleAttributes {
        &self.fixed[TokenKind::Canvas.index()]
    }

    pub fn keywords(&self) -> &[StyleAttributes] {
        &self.keywords
    }

    pub fn keyword_kinds(&self) -> impl Iterator<Item = TokenKind> + '_ {
        (0..self.keywords.len()).filter_map(TokenKind::keyword)
    }

    /// Fixed kinds in `order`, followed by every keyword, paired with their styles.
    pub fn styles_in<'a>(
        &'a self,
        order: &'a [TokenKind],
    ) -> impl Iterator<Item = (TokenKind, &'a StyleAttributes)> + 'a {
        order
            .iter()
            .map(move |kind| (*kind, &self.fixed[kind.index()]))
            .chain(self.keyword_kinds().zip(self.keywords.iter()))
    }

    /// Edits the style of `kind`, marking the theme dirty if anything changed.
    pub fn update_style<F>(&mut self, kind: TokenKind, op: F) -> Result<(), ThemeError>
    where
        F: FnOnce(&mut StyleAttributes),
    {
        let len = self.keywords.len();
        let style = match kind {
            TokenKind::Keyword(slot) => self
                .keywords
                .get_mut(slot.index())
                .ok_or(ThemeError::KeywordOutOfRange {
                    index: slot.index(),
                    len,
                })?,
            fixed => &mut self.fixed[fixed.index()],
        };
        let before = style.clone();
        op(style);
        style.normalize();
        if *style != before {
            self.is_dirty = true;
        }
        Ok(())
    }

    pub fn set_style(&mut self, kind: TokenKind, style: StyleAttributes) -> Result<(), ThemeError> {
        self.update_style(kind, |current| *current = style)
    }

    pub fn set_attribute(
        &mut self,
        kind: TokenKind,
        name: AttributeName,
        value: AttributeValue,
    ) -> Result<(), ThemeError> {
        let mut result = Ok(());
        self.update_style(kind, |style| result = style.set(name, value))?;
        result.map_err(ThemeError::from)
    }

    /// Appends a keyword class and returns its kind.
    pub fn push_keyword(&mut self, mut style: StyleAttributes) -> Result<TokenKind, ThemeError> {
        let kind = TokenKind::keyword(self.keywords.len()).ok_or(ThemeError::TooManyKeywords {
            limit: MAX_KEYWORDS,
        })?;
        style.normalize();
        self.keywords.push(style);
        self.is_dirty = true;
        Ok(kind)
    }

    /// Removes a keyword class; later keywords shift down one class letter.
    pub fn remove_keyword(&mut self, index: usize) -> Result<StyleAttributes, ThemeError> {
        if index >= self.keywords.len() {
            return Err(ThemeError::KeywordOutOfRange {
                index,
                len: self.keywords.len(),
            });
        }
        self.is_dirty = true;
        Ok(self.keywords.remove(index))
    }

    pub(crate) fn fixed_mut(&mut self, kind: TokenKind) -> &mut StyleAttributes {
        debug_assert!(!kind.is_keyword());
        &mut self.fixed[kind.index()]
    }

    pub(crate) fn replace_keywords(&mut self, keywords: Vec<StyleAttributes>) {
        debug_assert!(keywords.len() <= MAX_KEYWORDS);
        self.keywords = keywords;
    }

    pub(crate) fn set_flags(&mut self, appearance: Appearance, standalone: bool, base16: bool) {
        self.appearance = appearance;
        self.is_standalone = standalone;
        self.is_base16 = base16;
    }

    /// Unsaved, independent copy sharing name, description and all styles.
    ///
    /// Path, appearance and the standalone/base16 flags start from the
    /// defaults of [`Theme::new`].
    pub fn duplicate(&self) -> Theme {
        let mut copy = Theme::new(self.name.clone());
        copy.description = self.description.clone();
        for kind in TokenKind::FIXED {
            let source = &self.fixed[kind.index()];
            let target = copy.fixed_mut(kind);
            target.color = source.color.clone();
            target.bold = source.bold;
            target.italic = source.italic;
            target.underline = source.underline;
        }
        copy.keywords = self.keywords.to_vec();
        copy.is_dirty = false;
        copy
    }
}
