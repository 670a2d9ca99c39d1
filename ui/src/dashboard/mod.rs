//! Dashboard widgets and the request flow that feeds them.

mod columns;
pub mod export;
mod labels;
mod legend;
mod menu;
pub mod state;

pub use columns::ColumnsDisplay;
pub use export::{ExportError, SnapshotExport};
pub use legend::Legend;
pub use menu::InstanceMenu;
pub use state::{DashboardState, RequestTicket, ViewState};

pub(crate) use labels::{heading_text, use_chart_config};

use dioxus::prelude::*;

use crate::core::DashboardConfig;
use crate::data::{DataSource, Fetch};

/// Points the dashboard at `url`. Cache hits settle immediately; misses are
/// fetched in the background and only applied if no newer request was made.
pub fn request_dataset<F: Fetch + 'static>(
    mut state: Signal<DashboardState>,
    source: DataSource<F>,
    url: String,
) {
    let ticket = state.write().begin(&url);

    if let Some(hit) = source.cached(&url) {
        tracing::debug!(url = %url, "dataset served from cache");
        state.write().settle(ticket, Ok(hit));
        return;
    }

    spawn(async move {
        let outcome = source.load(&url).await;
        state.write().settle(ticket, outcome);
    });
}

/// URL to fetch when the dashboard first mounts: the configured default,
/// and only while nothing has been requested yet.
pub fn startup_url(state: &DashboardState, config: &DashboardConfig) -> Option<String> {
    if *state.view() != ViewState::Idle {
        return None;
    }
    let url = config.default_url().map(str::to_string);
    if url.is_none() {
        tracing::warn!("no data source configured");
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_fetches_default_source_once() {
        let config = DashboardConfig::default();
        let mut state = DashboardState::default();
        assert_eq!(
            startup_url(&state, &config).as_deref(),
            Some("https://rcslabs.ru/ttrp1.json")
        );

        state.begin("https://rcslabs.ru/ttrp3.json");
        assert_eq!(startup_url(&state, &config), None);
    }

    #[test]
    fn startup_without_sources_requests_nothing() {
        let config = DashboardConfig {
            sources: Vec::new(),
            ..DashboardConfig::default()
        };
        assert_eq!(startup_url(&DashboardState::default(), &config), None);
    }
}
