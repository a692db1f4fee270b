use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const SETTINGS_VERSION: u32 = 1;

pub const MIN_THUMBNAIL_SIZE: u32 = 16;
pub const MAX_THUMBNAIL_SIZE: u32 = 1024;
pub const MIN_FONT_SIZE: f32 = 3.0;
pub const MAX_FONT_SIZE: f32 = 72.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to prepare directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Folder receiving newly saved themes.
    #[serde(default)]
    pub themes_folder: Option<PathBuf>,
    #[serde(default)]
    pub thumbnail: ThumbnailSettings,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            themes_folder: None,
            thumbnail: ThumbnailSettings::default(),
        }
    }
}

impl PreviewSettings {
    pub fn sanitize(&mut self) {
        if self.version == 0 {
            self.version = SETTINGS_VERSION;
        }
        if self
            .themes_folder
            .as_ref()
            .is_some_and(|folder| folder.as_os_str().is_empty())
        {
            self.themes_folder = None;
        }
        self.thumbnail.sanitize();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailSettings {
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Gap between the two panels of a side-by-side preview.
    #[serde(default = "default_spacing")]
    pub spacing: u32,
}

fn default_size() -> u32 {
    100
}

fn default_font_family() -> String {
    "ui-monospace".to_string()
}

fn default_font_size() -> f32 {
    8.0
}

fn default_spacing() -> u32 {
    8
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            size: default_size(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            spacing: default_spacing(),
        }
    }
}

impl ThumbnailSettings {
    fn sanitize(&mut self) {
        self.size = self.size.clamp(MIN_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE);
        if !self.font_size.is_finite() {
            self.font_size = default_font_size();
        }
        self.font_size = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        if self.font_family.trim().is_empty() {
            self.font_family = default_font_family();
        }
    }
}

#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    data: PreviewSettings,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>, settings: PreviewSettings) -> Self {
        Self {
            path: path.into(),
            data: settings,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "settings file missing, using defaults");
            let mut data = PreviewSettings::default();
            data.sanitize();
            return Ok(Self { path, data });
        }

        let contents = fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.clone(),
            source,
        })?;
        let mut data: PreviewSettings =
            serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.clone(),
                source,
            })?;
        data.sanitize();
        Ok(Self { path, data })
    }

    pub fn settings(&self) -> &PreviewSettings {
        &self.data
    }

    pub fn update<F>(&mut self, mut op: F) -> Result<(), SettingsError>
    where
        F: FnMut(&mut PreviewSettings),
    {
        op(&mut self.data);
        self.data.sanitize();
        self.save()
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = serde_json::to_string_pretty(&self.data).map_err(|source| {
            SettingsError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, payload.as_bytes()).map_err(|source| SettingsError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
