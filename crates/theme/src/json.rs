use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::style::StyleAttributes;
use crate::theme::{Appearance, Theme, ThemeError};
use crate::token::{TokenKind, MAX_KEYWORDS};

#[derive(Debug, Serialize, Deserialize)]
struct ThemeDocument {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    appearance: Appearance,
    #[serde(default)]
    standalone: bool,
    #[serde(default)]
    base16: bool,
    #[serde(default)]
    styles: BTreeMap<String, StyleAttributes>,
    #[serde(default)]
    keywords: Vec<StyleAttributes>,
}

fn style_key(kind: TokenKind) -> Option<&'static str> {
    Some(match kind {
        TokenKind::Plain => "plain",
        TokenKind::Canvas => "canvas",
        TokenKind::Number => "number",
        TokenKind::String => "string",
        TokenKind::Escape => "escape",
        TokenKind::PreProcessor => "pre_processor",
        TokenKind::StringPreProc => "string_pre_proc",
        TokenKind::BlockComment => "block_comment",
        TokenKind::LineComment => "line_comment",
        TokenKind::LineNum => "line_num",
        TokenKind::Operator => "operator",
        TokenKind::Interpolation => "interpolation",
        TokenKind::Keyword(_) => return None,
    })
}

fn kind_for_key(key: &str) -> Option<TokenKind> {
    TokenKind::FIXED
        .into_iter()
        .find(|kind| style_key(*kind) == Some(key))
}

impl Theme {
    /// Pretty JSON document; the file path is not part of it.
    pub fn to_json_string(&self) -> Result<String, ThemeError> {
        let styles = TokenKind::FIXED
            .into_iter()
            .filter_map(|kind| Some((style_key(kind)?.to_string(), self.style(kind)?.clone())))
            .collect();
        let document = ThemeDocument {
            name: self.name().to_string(),
            description: self.description().to_string(),
            appearance: self.appearance(),
            standalone: self.is_standalone(),
            base16: self.is_base16(),
            styles,
            keywords: self.keywords().to_vec(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Parses a JSON document into a clean theme. Styles missing from the
    /// document are unset, including plain and canvas.
    pub fn from_json_str(input: &str) -> Result<Theme, ThemeError> {
        let document: ThemeDocument = serde_json::from_str(input)?;
        if document.keywords.len() > MAX_KEYWORDS {
            return Err(ThemeError::TooManyKeywords {
                limit: MAX_KEYWORDS,
            });
        }

        let mut theme = Theme::new(document.name);
        theme.set_description(document.description);
        theme.set_flags(document.appearance, document.standalone, document.base16);
        for kind in TokenKind::FIXED {
            *theme.fixed_mut(kind) = StyleAttributes::default();
        }
        for (key, style) in document.styles {
            let kind = kind_for_key(&key).ok_or_else(|| {
                serde_json::Error::custom(format!("unknown style `{key}`"))
            })?;
            *theme.fixed_mut(kind) = style;
        }
        theme.replace_keywords(document.keywords);
        theme.mark_clean();
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn document_round_trips_styles_and_flags() {
        let mut theme = Theme::new("Harbor");
        theme.set_description("sea and fog");
        theme.set_appearance(Appearance::Dark);
        theme.set_base16(true);
        theme
            .set_style(
                TokenKind::LineComment,
                StyleAttributes::new(Some("#5c6370".into()), Some(true), None, None),
            )
            .unwrap();
        theme.push_keyword(StyleAttributes::with_color("#c678dd")).unwrap();
        theme.set_path(Some(PathBuf::from("/themes/harbor.theme")));

        let json = theme.to_json_string().unwrap();
        assert!(!json.contains("harbor.theme"));
        let loaded = Theme::from_json_str(&json).unwrap();
        assert_eq!(loaded.name(), "Harbor");
        assert_eq!(loaded.description(), "sea and fog");
        assert_eq!(loaded.appearance(), Appearance::Dark);
        assert!(loaded.is_base16());
        assert!(!loaded.is_standalone());
        assert!(!loaded.is_dirty());
        assert!(loaded.path().is_none());
        for kind in TokenKind::FIXED {
            assert_eq!(loaded.style(kind), theme.style(kind));
        }
        assert_eq!(loaded.keywords(), theme.keywords());
    }

    #[test]
    fn missing_fields_default_to_unset() {
        let theme = Theme::from_json_str(
            r##"{ "name": "Sparse", "styles": { "number": { "color": "#ff0000", "bold": true } } }"##,
        )
        .unwrap();
        assert_eq!(theme.description(), "");
        assert_eq!(theme.appearance(), Appearance::Undefined);
        assert!(theme.plain().is_empty());
        assert!(theme.canvas().is_empty());
        let number = theme.style(TokenKind::Number).unwrap();
        assert_eq!(number.color.as_deref(), Some("#ff0000"));
        assert_eq!(number.bold, Some(true));
        assert_eq!(number.italic, None);
    }

    #[test]
    fn empty_colors_load_as_unset() {
        let theme = Theme::from_json_str(
            r#"{ "name": "Blank", "styles": { "number": { "color": "" } }, "keywords": [{ "color": "", "bold": true }] }"#,
        )
        .unwrap();
        assert!(theme.style(TokenKind::Number).unwrap().is_empty());
        assert_eq!(theme.keywords()[0], StyleAttributes::new(None, None, Some(true), None));
        assert!(!theme.to_css().contains("color: ;"));
    }

    #[test]
    fn too_many_keywords_are_rejected() {
        let keywords = vec!["{}"; MAX_KEYWORDS + 1].join(",");
        let json = format!(r#"{{ "name": "Crowded", "keywords": [{keywords}] }}"#);
        assert!(matches!(
            Theme::from_json_str(&json),
            Err(ThemeError::TooManyKeywords { .. })
        ));
    }

    #[test]
    fn unknown_style_keys_are_rejected() {
        let err = Theme::from_json_str(r#"{ "name": "Odd", "styles": { "bogus": {} } }"#)
            .unwrap_err();
        assert!(matches!(err, ThemeError::Json(_)));
        assert!(err.to_string().contains("bogus"));
    }
}
