//! Dashboard configuration: data sources for the instance menu and the chart
//! geometry shared by layout, rendering and export.
//!
//! Everything has a built-in default. Desktop builds may override it with a
//! `dashboard.json` in the platform config directory, e.g.
//!
//! ```json
//! { "sources": [ { "label": "Nightly", "url": "https://ci.example/nightly.json" } ],
//!   "chart": { "column_max_height": 240 } }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("couldn't parse dashboard config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("couldn't read dashboard config: {0}")]
    Io(#[from] std::io::Error),
    #[error("dashboard config lists no data sources")]
    Empty,
}

/// Geometry and threshold constants for the columns chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Total drawable height.
    pub chart_height: f64,
    /// Tallest a bar may render.
    pub column_max_height: f64,
    pub column_width: f64,
    pub gap: f64,
    /// Rail height above the tallest possible bar.
    pub arrow_offset: f64,
    pub min_visible_height: f64,
    /// Smallest rendered height that still carries an in-bar label.
    pub label_threshold: f64,
    /// Spread beyond which the chart switches to a log scale.
    pub log_trigger_ratio: f64,
    /// Horizontal shift of an incoming connector at a column that also emits one.
    pub connector_nudge: f64,
    /// Gap left between a connector end and the bar top for the arrowhead.
    pub arrowhead_clearance: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_height: 336.0,
            column_max_height: 265.0,
            column_width: 80.0,
            gap: 60.0,
            arrow_offset: 62.0,
            min_visible_height: 2.0,
            label_threshold: 14.0,
            log_trigger_ratio: 100.0,
            connector_nudge: 10.0,
            arrowhead_clearance: 2.0,
        }
    }
}

impl ChartConfig {
    /// Center x of the slot at `index`.
    pub fn slot_center(&self, index: usize) -> f64 {
        index as f64 * (self.column_width + self.gap) + self.column_width / 2.0
    }

    /// Shared y of the horizontal connector segment.
    pub fn rail_y(&self) -> f64 {
        self.chart_height - self.column_max_height - self.arrow_offset
    }

    /// Width covered by `slots` columns and the gaps between them.
    pub fn chart_width(&self, slots: usize) -> f64 {
        if slots == 0 {
            return 0.0;
        }
        slots as f64 * self.column_width + (slots - 1) as f64 * self.gap
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub label: String,
    pub url: String,
}

impl SourceEntry {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub sources: Vec<SourceEntry>,
    /// Index into `sources` fetched on startup.
    pub default_source: usize,
    pub chart: ChartConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sources: vec![
                SourceEntry::new("OS Doors", "https://rcslabs.ru/ttrp1.json"),
                SourceEntry::new("OS Bombuntu", "https://rcslabs.ru/ttrp2.json"),
                SourceEntry::new("Mibre Office", "https://rcslabs.ru/ttrp3.json"),
                SourceEntry::new("LoWtEx", "https://rcslabs.ru/ttrp4.json"),
                SourceEntry::new("W$ POS", "https://rcslabs.ru/ttrp5.json"),
            ],
            default_source: 0,
            chart: ChartConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Parses an override document. Missing fields keep their defaults; an
    /// out-of-range `default_source` is clamped to the last source.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        if config.sources.is_empty() {
            return Err(ConfigError::Empty);
        }
        if config.default_source >= config.sources.len() {
            tracing::warn!(
                default_source = config.default_source,
                sources = config.sources.len(),
                "default source out of range; using the last one"
            );
            config.default_source = config.sources.len() - 1;
        }
        Ok(config)
    }

    pub fn default_url(&self) -> Option<&str> {
        self.sources
            .get(self.default_source)
            .map(|source| source.url.as_str())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn config_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("com", "Stageboard", "Stageboard")
        .map(|dirs| dirs.config_dir().join("dashboard.json"))
}

/// Loads the desktop override file if present, falling back to defaults.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_desktop_config() -> DashboardConfig {
    let Some(path) = config_path() else {
        return DashboardConfig::default();
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no dashboard config file; using defaults");
        return DashboardConfig::default();
    }

    let loaded = std::fs::read_to_string(&path)
        .map_err(ConfigError::from)
        .and_then(|raw| DashboardConfig::from_json(&raw));
    match loaded {
        Ok(config) => {
            tracing::info!(path = %path.display(), sources = config.sources.len(), "loaded dashboard config");
            config
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "{err}; using defaults");
            DashboardConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_first_source() {
        let config = DashboardConfig::default();
        assert_eq!(config.sources.len(), 5);
        assert_eq!(config.default_url(), Some("https://rcslabs.ru/ttrp1.json"));
    }

    #[test]
    fn partial_override_keeps_chart_defaults() {
        let config = DashboardConfig::from_json(
            r#"{ "sources": [ { "label": "A", "url": "https://a.test/a.json" } ],
                 "chart": { "column_max_height": 240 } }"#,
        )
        .unwrap();
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.chart.column_max_height, 240.0);
        assert_eq!(config.chart.chart_height, 336.0);
    }

    #[test]
    fn empty_source_list_is_rejected() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{ "sources": [] }"#),
            Err(ConfigError::Empty)
        ));
    }

    #[test]
    fn default_source_is_clamped() {
        let config = DashboardConfig::from_json(
            r#"{ "sources": [ { "label": "A", "url": "a" }, { "label": "B", "url": "b" } ],
                 "default_source": 9 }"#,
        )
        .unwrap();
        assert_eq!(config.default_url(), Some("b"));
    }

    #[test]
    fn geometry_helpers_match_layout_constants() {
        let chart = ChartConfig::default();
        assert_eq!(chart.slot_center(0), 40.0);
        assert_eq!(chart.slot_center(1), 180.0);
        assert_eq!(chart.rail_y(), 9.0);
        assert_eq!(chart.chart_width(4), 500.0);
    }
}
