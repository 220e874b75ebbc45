// Platform-agnostic grouping, cache and settings model live in themecore
pub use themecore::{cache, color, grouping, height, settings, types};

pub mod bridge;
pub mod channel;
pub mod config;
pub mod dom;
pub mod error;
pub mod layout;
pub mod panel;
pub mod plugin;
pub mod recompute;
pub mod scheduler;
pub mod style;
pub mod watcher;

pub use config::ThemeConfig;
pub use error::{Result, ThemeError};
pub use plugin::ThemePlugin;
