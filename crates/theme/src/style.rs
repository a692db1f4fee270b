use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Optional style overrides for one token kind.
///
/// Every field is tri-state: `None` inherits from the plain style, `Some(false)`
/// explicitly turns the attribute off. An empty color string is the same as
/// an unset color.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleAttributes {
    #[serde(deserialize_with = "deserialize_color")]
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

/// Attribute addressed by keyed access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    Italic,
    Bold,
    Underline,
    Color,
}

impl AttributeName {
    pub const ALL: [AttributeName; 4] = [
        AttributeName::Italic,
        AttributeName::Bold,
        AttributeName::Underline,
        AttributeName::Color,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeName::Italic => "italic",
            AttributeName::Bold => "bold",
            AttributeName::Underline => "underline",
            AttributeName::Color => "color",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(value))
    }

    fn is_flag(self) -> bool {
        !matches!(self, AttributeName::Color)
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value read from or written to a keyed attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Bool(bool),
    Text(String),
    Unset,
}

impl AttributeValue {
    fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Text(_) => "text",
            AttributeValue::Unset => "unset",
        }
    }
}

impl From<Option<bool>> for AttributeValue {
    fn from(value: Option<bool>) -> Self {
        value.map(AttributeValue::Bool).unwrap_or(AttributeValue::Unset)
    }
}

impl From<Option<String>> for AttributeValue {
    fn from(value: Option<String>) -> Self {
        value.map(AttributeValue::Text).unwrap_or(AttributeValue::Unset)
    }
}

/// Drops blank colors so they read as unset.
pub(crate) fn non_empty_color(color: Option<String>) -> Option<String> {
    color.filter(|color| !color.trim().is_empty())
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(non_empty_color)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("attribute '{attribute}' expects a {expected} value, got {found}")]
    TypeMismatch {
        attribute: AttributeName,
        expected: &'static str,
        found: &'static str,
    },
}

impl StyleAttributes {
    pub fn new(
        color: Option<String>,
        italic: Option<bool>,
        bold: Option<bool>,
        underline: Option<bool>,
    ) -> Self {
        Self {
            color: non_empty_color(color),
            bold,
            italic,
            underline,
        }
    }

    pub fn with_color(color: impl Into<String>) -> Self {
        Self {
            color: non_empty_color(Some(color.into())),
            ..Self::default()
        }
    }

    /// The color, or `None` when it is unset or blank.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref().filter(|color| !color.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.color().is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
    }

    /// Turns a blank color into an unset one.
    pub fn normalize(&mut self) {
        self.color = non_empty_color(self.color.take());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn get(&self, name: AttributeName) -> AttributeValue {
        match name {
            AttributeName::Italic => self.italic.into(),
            AttributeName::Bold => self.bold.into(),
            AttributeName::Underline => self.underline.into(),
            AttributeName::Color => self.color().map(str::to_string).into(),
        }
    }

    /// Assigns a keyed attribute. `Unset` clears it; a value of the wrong type
    /// is rejected and leaves the record untouched.
    pub fn set(&mut self, name: AttributeName, value: AttributeValue) -> Result<(), StyleError> {
        match (name, value) {
            (AttributeName::Italic, AttributeValue::Bool(flag)) => self.italic = Some(flag),
            (AttributeName::Bold, AttributeValue::Bool(flag)) => self.bold = Some(flag),
            (AttributeName::Underline, AttributeValue::Bool(flag)) => self.underline = Some(flag),
            (AttributeName::Color, AttributeValue::Text(color)) => {
                self.color = non_empty_color(Some(color))
            }
            (AttributeName::Italic, AttributeValue::Unset) => self.italic = None,
            (AttributeName::Bold, AttributeValue::Unset) => self.bold = None,
            (AttributeName::Underline, AttributeValue::Unset) => self.underline = None,
            (AttributeName::Color, AttributeValue::Unset) => self.color = None,
            (name, value) => {
                return Err(StyleError::TypeMismatch {
                    attribute: name,
                    expected: if name.is_flag() { "bool" } else { "text" },
                    found: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// CSS declarations for the set fields, each terminated by `"; "`.
    pub fn to_css_declarations(&self) -> String {
        let mut css = String::new();
        if let Some(italic) = self.italic {
            css.push_str(if italic {
                "font-style: italic; "
            } else {
                "font-style: normal; "
            });
        }
        if let Some(bold) = self.bold {
            css.push_str(if bold {
                "font-weight: bold; "
            } else {
                "font-weight: normal; "
            });
        }
        if let Some(underline) = self.underline {
            css.push_str(if underline {
                "text-decoration: underline; "
            } else {
                "text-decoration: none; "
            });
        }
        if let Some(color) = self.color() {
            css.push_str("color: ");
            css.push_str(color);
            css.push_str("; ");
        }
        css
    }

    /// Compact token form, e.g. `italic nobold #ff0000`.
    pub fn to_export_tokens(&self) -> String {
        let mut tokens: Vec<&str> = Vec::with_capacity(4);
        if let Some(italic) = self.italic {
            tokens.push(if italic { "italic" } else { "noitalic" });
        }
        if let Some(bold) = self.bold {
            tokens.push(if bold { "bold" } else { "nobold" });
        }
        if let Some(underline) = self.underline {
            tokens.push(if underline { "underline" } else { "nounderline" });
        }
        if let Some(color) = self.color() {
            tokens.push(color.trim());
        }
        tokens.join(" ")
    }

    /// Reads back the output of [`Self::to_export_tokens`].
    ///
    /// Flag keywords are only recognized at the front, in the order they are
    /// written. The trimmed remainder is the color, so colors may hold spaces.
    pub fn parse_export_tokens(input: &str) -> Self {
        let mut style = Self::default();
        let mut rest = input.trim_start();
        let flags: [(&str, &str, fn(&mut Self, bool)); 3] = [
            ("italic", "noitalic", |style, flag| style.italic = Some(flag)),
            ("bold", "nobold", |style, flag| style.bold = Some(flag)),
            ("underline", "nounderline", |style, flag| style.underline = Some(flag)),
        ];
        for (on, off, apply) in flags {
            let (token, remainder) = split_token(rest);
            if token == on {
                apply(&mut style, true);
            } else if token == off {
                apply(&mut style, false);
            } else {
                continue;
            }
            rest = remainder;
        }
        style.color = non_empty_color(Some(rest.trim().to_string()));
        style
    }
}

fn split_token(input: &str) -> (&str, &str) {
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim_start()),
        None => (input, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> StyleAttributes {
        StyleAttributes::new(Some("#ff0000".into()), Some(true), Some(false), None)
    }

    #[test]
    fn unset_record_produces_no_output() {
        let style = StyleAttributes::default();
        assert!(style.is_empty());
        assert_eq!(style.to_css_declarations(), "");
        assert_eq!(style.to_export_tokens(), "");
    }

    #[test]
    fn css_declarations_follow_fixed_order() {
        let style = StyleAttributes::new(Some("blue".into()), Some(false), Some(true), Some(true));
        assert_eq!(
            style.to_css_declarations(),
            "font-style: normal; font-weight: bold; text-decoration: underline; color: blue; "
        );
        assert_eq!(sample().to_css_declarations(), "font-style: italic; font-weight: normal; color: #ff0000; ");
    }

    #[test]
    fn export_tokens_distinguish_false_from_unset() {
        assert_eq!(sample().to_export_tokens(), "italic nobold #ff0000");
        let style = StyleAttributes {
            underline: Some(false),
            ..StyleAttributes::default()
        };
        assert_eq!(style.to_export_tokens(), "nounderline");
    }

    #[test]
    fn export_tokens_read_back() {
        let styles = [
            sample(),
            StyleAttributes::new(None, None, None, Some(true)),
            StyleAttributes::new(Some("#010203".into()), Some(false), Some(true), Some(false)),
            StyleAttributes::default(),
        ];
        for style in styles {
            assert_eq!(StyleAttributes::parse_export_tokens(&style.to_export_tokens()), style);
        }
    }

    #[test]
    fn keyed_access_reads_and_writes() {
        let mut style = StyleAttributes::default();
        style.set(AttributeName::Bold, AttributeValue::Bool(true)).unwrap();
        style
            .set(AttributeName::Color, AttributeValue::Text("#abcdef".into()))
            .unwrap();
        assert_eq!(style.get(AttributeName::Bold), AttributeValue::Bool(true));
        assert_eq!(style.get(AttributeName::Color), AttributeValue::Text("#abcdef".into()));
        assert_eq!(style.get(AttributeName::Italic), AttributeValue::Unset);

        style.set(AttributeName::Bold, AttributeValue::Unset).unwrap();
        assert_eq!(style.bold, None);
    }

    #[test]
    fn keyed_access_rejects_wrong_types() {
        let mut style = sample();
        let err = style
            .set(AttributeName::Color, AttributeValue::Bool(true))
            .unwrap_err();
        assert_eq!(
            err,
            StyleError::TypeMismatch {
                attribute: AttributeName::Color,
                expected: "text",
                found: "bool",
            }
        );
        assert!(style
            .set(AttributeName::Italic, AttributeValue::Text("yes".into()))
            .is_err());
        assert_eq!(style, sample());
    }

    #[test]
    fn attribute_names_parse() {
        assert_eq!(AttributeName::parse("Underline"), Some(AttributeName::Underline));
        assert_eq!(AttributeName::parse("weight"), None);
    }

    #[test]
    fn colors_with_spaces_read_back() {
        let style = StyleAttributes::with_color("rgb(1, 2, 3)");
        assert_eq!(style.to_export_tokens(), "rgb(1, 2, 3)");
        assert_eq!(StyleAttributes::parse_export_tokens("rgb(1, 2, 3)"), style);

        let flagged = StyleAttributes::new(Some("rgb(1, 2, 3)".into()), Some(true), None, Some(false));
        let tokens = flagged.to_export_tokens();
        assert_eq!(tokens, "italic nounderline rgb(1, 2, 3)");
        assert_eq!(StyleAttributes::parse_export_tokens(&tokens), flagged);
    }

    #[test]
    fn flags_after_the_color_belong_to_it() {
        let style = StyleAttributes::parse_export_tokens("  bold  #fff italic ");
        assert_eq!(style.bold, Some(true));
        assert_eq!(style.italic, None);
        assert_eq!(style.color.as_deref(), Some("#fff italic"));
    }

    #[test]
    fn blank_colors_are_unset() {
        assert_eq!(StyleAttributes::with_color(""), StyleAttributes::default());
        assert_eq!(
            StyleAttributes::new(Some("  ".into()), None, Some(true), None).color,
            None
        );

        let mut style = sample();
        style
            .set(AttributeName::Color, AttributeValue::Text(String::new()))
            .unwrap();
        assert_eq!(style.color, None);
        assert_eq!(style.get(AttributeName::Color), AttributeValue::Unset);

        let written = StyleAttributes {
            color: Some(String::new()),
            bold: Some(true),
            ..StyleAttributes::default()
        };
        assert_eq!(written.color(), None);
        assert_eq!(written.to_css_declarations(), "font-weight: bold; ");
        assert_eq!(written.to_export_tokens(), "bold");
        assert!(StyleAttributes {
            color: Some(String::new()),
            ..StyleAttributes::default()
        }
        .is_empty());

        let parsed: StyleAttributes = serde_json::from_str(r#"{ "color": "", "italic": false }"#).unwrap();
        assert_eq!(parsed, StyleAttributes::new(None, Some(false), None, None));
    }

    fn flag() -> impl Strategy<Value = Option<bool>> {
        prop_oneof![Just(None), Just(Some(false)), Just(Some(true))]
    }

    fn color() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            "#[0-9a-f]{6}".prop_map(Some),
            (0u8..=255, 0u8..=255, 0u8..=255)
                .prop_map(|(r, g, b)| Some(format!("rgb({r}, {g}, {b})"))),
            "[a-z]{3,12}"
                .prop_filter("flag keyword", |name| {
                    !name.starts_with("no")
                        && !["italic", "bold", "underline"].contains(&name.as_str())
                })
                .prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn export_tokens_recover_every_field(
            color in color(),
            italic in flag(),
            bold in flag(),
            underline in flag(),
        ) {
            let style = StyleAttributes::new(color, italic, bold, underline);
            let tokens = style.to_export_tokens();
            prop_assert_eq!(StyleAttributes::parse_export_tokens(&tokens), style);
        }
    }
}
