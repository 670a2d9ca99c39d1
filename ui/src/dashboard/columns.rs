use dioxus::prelude::*;

use crate::chart::svg::connector_overlay;
use crate::chart::{ChartLayout, GroupLayout, LabelPlacement, Segment};
use crate::core::format::{format_coord, format_count};
use crate::data::GroupKind;

use super::labels::{component_label, group_label, use_chart_config};

/// Stacked columns with the connector overlay drawn on top.
#[component]
pub fn ColumnsDisplay(layout: ChartLayout) -> Element {
    let config = use_chart_config();
    let overlay = connector_overlay(&layout, &config);
    let width = format_coord(config.chart_width(layout.groups.len()));
    let height = format_coord(config.chart_height);
    let gap = format_coord(config.gap);
    let column_width = format_coord(config.column_width);

    rsx! {
        div {
            class: "columns-container",
            style: "width: {width}px",
            div {
                class: "columns__overlay",
                style: "height: {height}px",
                dangerous_inner_html: "{overlay}",
            }
            div { class: "columns", style: "gap: {gap}px",
                for group in layout.groups.iter() {
                    {column(group, &height, &column_width)}
                }
            }
        }
    }
}

fn column(group: &GroupLayout, height: &str, column_width: &str) -> Element {
    let label = group_label(group.kind);
    let modifier = if group.kind == GroupKind::Norm {
        " column--norm"
    } else {
        ""
    };
    let notes: Vec<String> = group.below_labels().map(below_note).collect();

    rsx! {
        div { key: "{group.slot}", class: "column{modifier}", style: "width: {column_width}px",
            div { class: "column__wrapper", style: "height: {height}px",
                for segment in group.segments.iter() {
                    {bar(segment)}
                }
            }
            p { class: "column__label", "{label}" }
            if !notes.is_empty() {
                ul { class: "column__notes",
                    for note in notes {
                        li { class: "column__note", "{note}" }
                    }
                }
            }
        }
    }
}

fn bar(segment: &Segment) -> Element {
    let height = format_coord(segment.bar.height_px);
    let value = format_count(segment.bar.display_value);
    let (modifier, color) = match segment.component {
        Some(component) => (component.key(), component.color()),
        None => ("norm", "var(--color-norm)"),
    };
    let zero = if segment.bar.is_zero { " column__bar--zero" } else { "" };

    rsx! {
        div {
            class: "column__bar column__bar--{modifier}{zero}",
            style: "height: {height}px; background-color: {color}",
            title: "{value}",
            if segment.bar.placement == LabelPlacement::InBar {
                span { class: "column__value", "{value}" }
            }
        }
    }
}

fn below_note(segment: &Segment) -> String {
    let value = format_count(segment.bar.display_value);
    match segment.component {
        Some(component) => format!("{}: {value}", component_label(component)),
        None => value,
    }
}
