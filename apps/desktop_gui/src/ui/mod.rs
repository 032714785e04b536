//! UI layer: app shell, the three phase screens, and shared widgets.

pub mod anchor;
pub mod app;
pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod notifications;
pub mod splash;
pub mod theme;
pub mod widgets;

pub use app::{DesktopGuiApp, PersistedSettings, SETTINGS_STORAGE_KEY};
