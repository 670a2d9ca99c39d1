//! Cross-cutting helpers: configuration and display formatting.

pub mod config;
pub mod format;

pub use config::{ChartConfig, ConfigError, DashboardConfig, SourceEntry};
