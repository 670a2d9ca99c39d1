use dioxus::prelude::*;

use crate::core::{ChartConfig, DashboardConfig};
use crate::data::{Component, GroupKind};
use crate::t;

pub(crate) fn group_label(kind: GroupKind) -> String {
    match kind {
        GroupKind::Dev => t!("group-dev"),
        GroupKind::Test => t!("group-test"),
        GroupKind::Prod => t!("group-prod"),
        GroupKind::Norm => t!("group-norm"),
    }
}

pub(crate) fn component_label(component: Component) -> String {
    match component {
        Component::Front => t!("legend-front"),
        Component::Back => t!("legend-back"),
        Component::Db => t!("legend-db"),
    }
}

/// Heading above the chart; empty titles fall back to a placeholder.
pub(crate) fn heading_text(title: &str) -> String {
    let title = if title.trim().is_empty() {
        t!("dashboard-title-empty")
    } else {
        title.to_string()
    };
    t!("dashboard-title", title = title.as_str())
}

/// Chart geometry from the provided dashboard config, or the defaults.
pub(crate) fn use_chart_config() -> ChartConfig {
    try_use_context::<DashboardConfig>()
        .map(|config| config.chart)
        .unwrap_or_default()
}
