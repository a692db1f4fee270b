use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::theme::Theme;

pub const THEME_FILE_EXTENSION: &str = "theme";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("missing themes folder for a new theme")]
    MissingThemeFolder,
    #[error("failed to write theme {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returned by [`Theme::save`] once the file is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSaved {
    pub name: String,
    pub path: PathBuf,
}

impl Theme {
    /// Writes the theme file.
    ///
    /// A theme without a path gets a fresh `<uuid>.theme` inside
    /// `themes_folder`. On failure the path and dirty flag are left as they were.
    pub fn save(&mut self, themes_folder: Option<&Path>) -> Result<ThemeSaved, SaveError> {
        let target = match self.path() {
            Some(path) => path.to_path_buf(),
            None => {
                let folder = themes_folder.ok_or(SaveError::MissingThemeFolder)?;
                fs::create_dir_all(folder).map_err(|source| SaveError::Write {
                    path: folder.to_path_buf(),
                    source,
                })?;
                folder.join(format!("{}.{THEME_FILE_EXTENSION}", Uuid::new_v4()))
            }
        };

        let payload = self.to_theme_file_text();
        let tmp_path = target.with_extension("tmp");
        fs::write(&tmp_path, payload.as_bytes()).map_err(|source| SaveError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp_path, &target) {
            let _ = fs::remove_file(&tmp_path);
            return Err(SaveError::Write {
                path: target,
                source,
            });
        }

        tracing::debug!(theme = self.name(), path = %target.display(), "saved theme");
        self.set_path(Some(target.clone()));
        self.mark_clean();
        Ok(ThemeSaved {
            name: self.name().to_string(),
            path: target,
        })
    }
}

/// Notifications a theme host listens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    Saved(ThemeSaved),
    Added { name: String },
    Deleted { name: String },
    CurrentChanged { name: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ThemeEvent)>;

/// Explicit observer registry; listeners run in subscription order.
#[derive(Default)]
pub struct ThemeEvents {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl ThemeEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ThemeEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &ThemeEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ThemeEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeEvents")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Saves `theme` and announces the result to `events`.
pub fn save_and_notify(
    theme: &mut Theme,
    themes_folder: Option<&Path>,
    events: &mut ThemeEvents,
) -> Result<ThemeSaved, SaveError> {
    let saved = theme.save(themes_folder)?;
    events.emit(&ThemeEvent::Saved(saved.clone()));
    Ok(saved)
}

/// Duplicates `theme` and announces the new, still unsaved copy.
pub fn duplicate_and_notify(theme: &Theme, events: &mut ThemeEvents) -> Theme {
    let copy = theme.duplicate();
    events.emit(&ThemeEvent::Added {
        name: copy.name().to_string(),
    });
    copy
}
