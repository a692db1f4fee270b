use qlthemes_theme::{
    Appearance, NativeProperty, OwnedNativeTheme, Theme, TokenKind, MAX_KEYWORDS,
};

fn property(color: &str, bold: i32, italic: i32, underline: i32) -> NativeProperty {
    NativeProperty {
        color: Some(color.to_string()),
        bold,
        italic,
        underline,
    }
}

#[test]
fn imports_every_field_of_the_native_record() {
    let native = OwnedNativeTheme::new("Solarized Dark")
        .description("Ethan Schoonover")
        .path("/usr/share/highlight/themes/solarized-dark.theme")
        .appearance(2)
        .standalone(1)
        .base16(0)
        .property(TokenKind::Plain, property("#839496", -1, -1, -1))
        .property(TokenKind::Canvas, property("#002b36", -1, -1, -1))
        .property(TokenKind::BlockComment, property("#586e75", 0, 1, -1))
        .property(TokenKind::Operator, property("#859900", 1, 0, 0))
        .keyword(property("#b58900", 1, -1, -1))
        .keyword(NativeProperty::unset());

    let theme = native.to_theme();
    assert_eq!(theme.name(), "Solarized Dark");
    assert_eq!(theme.description(), "Ethan Schoonover");
    assert_eq!(
        theme.path().and_then(|path| path.file_name()).and_then(|name| name.to_str()),
        Some("solarized-dark.theme")
    );
    assert_eq!(theme.appearance(), Appearance::Dark);
    assert!(theme.is_standalone());
    assert!(!theme.is_base16());
    assert!(!theme.is_dirty());

    let comment = theme.style(TokenKind::BlockComment).unwrap();
    assert_eq!(comment.color.as_deref(), Some("#586e75"));
    assert_eq!(comment.bold, Some(false));
    assert_eq!(comment.italic, Some(true));
    assert_eq!(comment.underline, None);

    let operator = theme.style(TokenKind::Operator).unwrap();
    assert_eq!(operator.bold, Some(true));
    assert_eq!(operator.underline, Some(false));

    assert!(theme.style(TokenKind::Number).unwrap().is_empty());
    assert_eq!(theme.keywords().len(), 2);
    assert_eq!(theme.keywords()[0].bold, Some(true));
    assert!(theme.keywords()[1].is_empty());
}

#[test]
fn null_keyword_entries_are_skipped() {
    let theme = OwnedNativeTheme::new("Gaps")
        .keyword(property("#111111", -1, -1, -1))
        .null_keyword()
        .keyword(property("#333333", -1, -1, -1))
        .to_theme();
    let colors: Vec<_> = theme
        .keywords()
        .iter()
        .map(|style| style.color.as_deref())
        .collect();
    assert_eq!(colors, vec![Some("#111111"), Some("#333333")]);
}

#[test]
fn keywords_past_the_class_limit_are_dropped() {
    let mut native = OwnedNativeTheme::new("Overflow");
    for index in 0..MAX_KEYWORDS + 4 {
        native = native.keyword(property(&format!("#0000{index:02x}"), -1, -1, -1));
    }
    let theme = native.to_theme();
    assert_eq!(theme.keywords().len(), MAX_KEYWORDS);
    assert_eq!(theme.keywords()[25].color.as_deref(), Some("#000019"));
}

#[test]
fn unknown_appearance_codes_are_undefined_and_empty_path_is_none() {
    let theme = OwnedNativeTheme::new("Odd").appearance(9).path("").to_theme();
    assert_eq!(theme.appearance(), Appearance::Undefined);
    assert!(theme.path().is_none());
}

#[test]
fn borrowed_record_can_be_imported_directly() {
    let owned = OwnedNativeTheme::new("Direct").property(TokenKind::Number, property("#ff00ff", 1, 1, 1));
    let native = owned.as_native();
    let theme = unsafe { Theme::from_native(&native) };
    let number = theme.style(TokenKind::Number).unwrap();
    assert_eq!(number.color.as_deref(), Some("#ff00ff"));
    assert_eq!((number.bold, number.italic, number.underline), (Some(true), Some(true), Some(true)));
}
