pub mod preview;

pub use preview::{PreviewSettings, SettingsError, SettingsStore, ThumbnailSettings};
