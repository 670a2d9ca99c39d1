//! SVG rendering of a computed layout.
//!
//! [`connector_overlay`] is drawn over the HTML columns on screen;
//! [`snapshot_document`] is a self-contained chart used for export.

use std::fmt::Write as _;

use crate::core::format::{format_coord, format_count};
use crate::core::ChartConfig;
use crate::data::Component;

use super::delta::{Delta, Trend};
use super::height::LabelPlacement;
use super::layout::{ChartLayout, GroupLayout};

const CONNECTOR_COLOR: &str = "#898290";
const FAVORABLE_COLOR: &str = "#2E9E5B";
const UNFAVORABLE_COLOR: &str = "#D64545";
const NORM_COLOR: &str = "#C9C6CC";
const TEXT_COLOR: &str = "#2B2733";

const ARROW_MARKER: &str = r##"<defs><marker id="arrow" markerWidth="8" markerHeight="5" refX="4" refY="4" orient="0"><path d="M0.6,0.8 L4,4 L7.4,0.8" stroke="#898290" stroke-width="1.2" stroke-linecap="round" stroke-linejoin="round" fill="none"/></marker></defs>"##;

/// Localized strings baked into an exported snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotText {
    pub heading: String,
    /// Dev, Test, Prod, Norm.
    pub group_labels: [String; 4],
    /// Front, Back, Db.
    pub component_labels: [String; 3],
    /// Shown when the log scale is active.
    pub log_note: String,
}

impl SnapshotText {
    fn component_label(&self, component: Component) -> &str {
        let index = Component::ALL
            .iter()
            .position(|candidate| *candidate == component)
            .unwrap_or(0);
        &self.component_labels[index]
    }
}

pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn trend_color(delta: &Delta) -> &'static str {
    match delta.trend {
        Trend::Favorable => FAVORABLE_COLOR,
        Trend::Unfavorable => UNFAVORABLE_COLOR,
    }
}

/// Connector paths and delta badges, positioned in chart coordinates.
fn write_connectors(out: &mut String, layout: &ChartLayout, config: &ChartConfig) {
    for connector in &layout.connectors {
        let _ = write!(
            out,
            r#"<path class="columns__connector" d="{}" stroke="{CONNECTOR_COLOR}" stroke-width="2" fill="none" marker-end="url(#arrow)"/>"#,
            connector.path()
        );
    }

    for (connector, delta) in layout.connectors.iter().zip(layout.deltas.iter()) {
        let [_, up, across, _] = connector.points;
        let x = (up.x + across.x) / 2.0;
        let y = config.rail_y() - 4.0;
        let text = match delta.arrow_glyph() {
            Some(glyph) => format!("{glyph} {}", delta.label()),
            None => delta.label(),
        };
        let _ = write!(
            out,
            r#"<text class="delta {}" x="{}" y="{}" text-anchor="middle" font-size="13" font-weight="600" fill="{}">{}</text>"#,
            delta.css_modifier(),
            format_coord(x),
            format_coord(y),
            trend_color(delta),
            escape_xml(&text)
        );
    }
}

/// Overlay drawn above the HTML columns.
pub fn connector_overlay(layout: &ChartLayout, config: &ChartConfig) -> String {
    let width = config.chart_width(layout.groups.len());
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="columns__lines" width="{}" height="{}" viewBox="0 0 {} {}" overflow="visible">"#,
        format_coord(width),
        format_coord(config.chart_height),
        format_coord(width),
        format_coord(config.chart_height)
    );
    out.push_str(ARROW_MARKER);
    write_connectors(&mut out, layout, config);
    out.push_str("</svg>");
    out
}

fn segment_color(component: Option<Component>) -> &'static str {
    component.map(Component::color).unwrap_or(NORM_COLOR)
}

fn write_group(out: &mut String, group: &GroupLayout, text: &SnapshotText, config: &ChartConfig) {
    let left = group.x_center - config.column_width / 2.0;
    let mut floor = config.chart_height;

    // Segments are listed top to bottom; stack them upwards from the floor.
    for segment in group.segments.iter().rev() {
        let top = floor - segment.bar.height_px;
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            format_coord(left),
            format_coord(top),
            format_coord(config.column_width),
            format_coord(segment.bar.height_px),
            segment_color(segment.component)
        );
        if segment.bar.placement == LabelPlacement::InBar {
            let _ = write!(
                out,
                r##"<text x="{}" y="{}" text-anchor="middle" font-size="12" fill="#FFFFFF">{}</text>"##,
                format_coord(group.x_center),
                format_coord(top + segment.bar.height_px / 2.0 + 4.0),
                format_count(segment.bar.display_value)
            );
        }
        floor = top;
    }

    let mut line_y = config.chart_height + 20.0;
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="14" font-weight="600" fill="{TEXT_COLOR}">{}</text>"#,
        format_coord(group.x_center),
        format_coord(line_y),
        escape_xml(&text.group_labels[group.slot.min(3)])
    );
    for segment in group.below_labels() {
        line_y += 16.0;
        let label = match segment.component {
            Some(component) => format!(
                "{}: {}",
                text.component_label(component),
                format_count(segment.bar.display_value)
            ),
            None => format_count(segment.bar.display_value),
        };
        let _ = write!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="11" fill="{TEXT_COLOR}">{}</text>"#,
            format_coord(group.x_center),
            format_coord(line_y),
            escape_xml(&label)
        );
    }
}

/// Standalone chart document: heading, bars, connectors, deltas and legend.
pub fn snapshot_document(layout: &ChartLayout, config: &ChartConfig, text: &SnapshotText) -> String {
    const PADDING: f64 = 32.0;
    const HEADER: f64 = 56.0;
    const FOOTER: f64 = 120.0;

    let chart_width = config.chart_width(layout.groups.len());
    let width = chart_width + PADDING * 2.0;
    let height = HEADER + config.chart_height + FOOTER;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Inter, Arial, sans-serif">"#,
        w = format_coord(width),
        h = format_coord(height)
    );
    out.push_str(ARROW_MARKER);
    let _ = write!(
        out,
        r##"<rect width="100%" height="100%" fill="#FFFFFF"/><text x="{}" y="34" font-size="18" font-weight="700" fill="{TEXT_COLOR}">{}</text>"##,
        format_coord(PADDING),
        escape_xml(&text.heading)
    );
    if layout.scale.is_logarithmic() {
        let _ = write!(
            out,
            r#"<text x="{}" y="34" text-anchor="end" font-size="12" fill="{CONNECTOR_COLOR}">{}</text>"#,
            format_coord(width - PADDING),
            escape_xml(&text.log_note)
        );
    }

    let _ = write!(
        out,
        r#"<g transform="translate({},{})">"#,
        format_coord(PADDING),
        format_coord(HEADER)
    );
    for group in &layout.groups {
        write_group(&mut out, group, text, config);
    }
    write_connectors(&mut out, layout, config);
    out.push_str("</g>");

    let legend_y = height - 24.0;
    let mut legend_x = PADDING;
    for component in Component::ALL {
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="12" height="12" rx="2" fill="{}"/><text x="{}" y="{}" font-size="12" fill="{TEXT_COLOR}">{}</text>"#,
            format_coord(legend_x),
            format_coord(legend_y - 10.0),
            component.color(),
            format_coord(legend_x + 18.0),
            format_coord(legend_y),
            escape_xml(text.component_label(component))
        );
        legend_x += 150.0;
    }

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::layout::{compute_layout, ChartView};
    use crate::data::{Dataset, EnvironmentBreakdown as B, LoadedDataset};

    fn layout() -> ChartLayout {
        let dataset = Dataset {
            title: "R&D <beta>".into(),
            dev: B::new(66.0, 100.0, 31.0),
            test: B::new(60.0, 80.0, 85.0),
            prod: B::new(66.0, 0.0, 31.0),
            norm: 150.0,
        };
        match compute_layout(&LoadedDataset::new(dataset), &ChartConfig::default()) {
            ChartView::Chart(layout) => layout,
            ChartView::NoData => panic!("expected chart"),
        }
    }

    fn text() -> SnapshotText {
        SnapshotText {
            heading: "Passed tests \"R&D\"".into(),
            group_labels: ["Dev", "Test", "Prod", "Norm"].map(String::from),
            component_labels: ["Front-end", "Back-end", "Database"].map(String::from),
            log_note: "log scale".into(),
        }
    }

    #[test]
    fn overlay_carries_both_connectors_with_arrowheads() {
        let layout = layout();
        let svg = connector_overlay(&layout, &ChartConfig::default());
        assert_eq!(svg.matches("marker-end=\"url(#arrow)\"").count(), 2);
        for path in layout.connector_paths() {
            assert!(svg.contains(&path));
        }
        assert!(svg.contains("+28"));
        assert!(svg.contains("-128"));
    }

    #[test]
    fn snapshot_escapes_text_and_lists_zero_below() {
        let svg = snapshot_document(&layout(), &ChartConfig::default(), &text());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("Passed tests &quot;R&amp;D&quot;"));
        assert!(svg.contains("Back-end: 0"));
        assert!(!svg.contains("log scale"));
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }
}
