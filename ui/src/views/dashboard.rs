use dioxus::prelude::*;

use crate::chart::{compute_layout, ChartView, Scale};
use crate::core::DashboardConfig;
use crate::dashboard::{
    heading_text, request_dataset, startup_url, use_chart_config, ColumnsDisplay, DashboardState,
    InstanceMenu, Legend, SnapshotExport, ViewState,
};
use crate::data::{DataSource, HttpFetcher, LoadedDataset};
use crate::i18n;
use crate::t;

/// Instance menu plus the chart for the currently selected data source.
#[component]
pub fn Dashboard() -> Element {
    i18n::init();

    // Re-render on language change.
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let config: DashboardConfig = try_use_context::<DashboardConfig>().unwrap_or_default();
    let source = use_hook(|| DataSource::new(HttpFetcher::new()));
    let state = use_signal(DashboardState::default);

    {
        let source = source.clone();
        let config = config.clone();
        use_effect(move || {
            let startup = startup_url(&state.peek(), &config);
            if let Some(url) = startup {
                request_dataset(state, source.clone(), url);
            }
        });
    }

    let on_select = {
        let source = source.clone();
        move |url: String| request_dataset(state, source.clone(), url)
    };

    let active_url = state.read().active_url().map(str::to_string);
    let view = state.read().view().clone();
    let body = match view {
        ViewState::Idle | ViewState::Loading { .. } => rsx! {
            p { class: "dashboard__status", {t!("dashboard-loading")} }
        },
        ViewState::Failed { message, .. } => rsx! {
            p {
                class: "dashboard__status dashboard__status--error",
                role: "alert",
                {t!("dashboard-error", message = message.as_str())}
            }
        },
        ViewState::Loaded { data, .. } => rsx! {
            LoadedChart { data }
        },
    };

    rsx! {
        div { class: "page dashboard",
            div { style: "display:none", "{_lang_marker}" }
            InstanceMenu {
                sources: config.sources.clone(),
                active_url,
                on_select,
            }
            section { class: "dashboard__chart", {body} }
        }
    }
}

#[component]
fn LoadedChart(data: std::rc::Rc<LoadedDataset>) -> Element {
    let chart = use_chart_config();
    let heading = heading_text(&data.raw.title);

    match compute_layout(&data, &chart) {
        ChartView::NoData => rsx! {
            h1 { class: "dashboard__title", "{heading}" }
            p { class: "dashboard__status", {t!("dashboard-no-data")} }
        },
        ChartView::Chart(layout) => {
            let (badge_class, badge) = match layout.scale {
                Scale::Logarithmic => ("scale-badge scale-badge--log", t!("dashboard-scale-log")),
                Scale::Linear => ("scale-badge", t!("dashboard-scale-linear")),
            };
            rsx! {
                header { class: "dashboard__header",
                    h1 { class: "dashboard__title", "{heading}" }
                    span { class: "{badge_class}", "{badge}" }
                }
                ColumnsDisplay { layout: layout.clone() }
                Legend {}
                SnapshotExport { layout }
            }
        }
    }
}
