//! Syntax-highlighting theme model and its text exports.

pub mod color;
mod css;
mod json;
pub mod native;
pub mod render;
pub mod store;
pub mod style;
pub mod theme;
mod theme_file;
pub mod token;

pub use color::{ColorParseError, Rgba};
pub use native::{HTheme, HThemeProperty, NativeProperty, NativeThemeRef, OwnedNativeTheme};
pub use render::{FontFace, FontRequest, FontTraits, FontVariants, RenderStyle, Underline};
pub use store::{
    duplicate_and_notify, save_and_notify, SaveError, SubscriptionId, ThemeEvent, ThemeEvents, ThemeSaved,
    THEME_FILE_EXTENSION,
};
pub use style::{AttributeName, AttributeValue, StyleAttributes, StyleError};
pub use theme::{Appearance, Theme, ThemeError};
pub use theme_file::escape_lua;
pub use token::{KeywordSlot, TokenKind, FIXED_KIND_COUNT, MAX_KEYWORDS};
