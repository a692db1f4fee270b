use qlthemes_settings::{PreviewSettings, SettingsError, SettingsStore};
use std::fs;
use tempfile::tempdir;

#[test]
fn load_missing_file_returns_defaults() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("settings.json");

    let store = SettingsStore::load(&path).expect("load defaults");
    assert_eq!(store.settings(), &PreviewSettings::default());
    assert!(!path.exists());
}

#[test]
fn save_and_reload_roundtrip() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("nested/config/settings.json");
    let themes = temp.path().join("themes");

    let mut store = SettingsStore::new(path.clone(), PreviewSettings::default());
    store
        .update(|settings| {
            settings.themes_folder = Some(themes.clone());
            settings.thumbnail.size = 128;
            settings.thumbnail.font_family = "Menlo".to_string();
        })
        .expect("save");

    let reloaded = SettingsStore::load(&path).expect("reload");
    assert_eq!(reloaded.settings().themes_folder.as_deref(), Some(themes.as_path()));
    assert_eq!(reloaded.settings().thumbnail.size, 128);
    assert_eq!(reloaded.settings().thumbnail.font_family, "Menlo");
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn out_of_range_values_are_sanitized_on_load() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("settings.json");
    fs::write(
        &path,
        r#"{
            "version": 0,
            "thumbnail": { "size": 2, "font_family": "", "font_size": 1.0, "spacing": 12 }
        }"#,
    )
    .expect("write legacy settings");

    let store = SettingsStore::load(&path).expect("load legacy file");
    let settings = store.settings();
    assert_eq!(settings.version, 1);
    assert_eq!(settings.thumbnail.size, 16);
    assert_eq!(settings.thumbnail.font_family, "ui-monospace");
    assert_eq!(settings.thumbnail.font_size, 3.0);
    assert_eq!(settings.thumbnail.spacing, 12);
}

#[test]
fn malformed_file_reports_parse_error_with_path() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("settings.json");
    fs::write(&path, "{ not json").expect("write");

    let err = SettingsStore::load(&path).expect_err("parse failure");
    assert!(matches!(err, SettingsError::Parse { .. }));
    assert!(err.to_string().contains("settings.json"));
}
