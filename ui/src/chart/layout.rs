//! Full per-render layout: scale, bar heights, connectors and deltas.
//!
//! Everything is recomputed from the loaded dataset on each render; nothing
//! here is cached beyond the dataset's own log view.
//!
//! On the log scale a group's height is `log10(1 + total)` and its segments
//! split that height in proportion to their share of the raw total, so the
//! order of bars always follows the order of the real totals.

use crate::core::ChartConfig;
use crate::data::{Component, GroupKind, GroupValue, LoadedDataset};

use super::connector::{connectors, Connector};
use super::delta::{deltas, Delta};
use super::height::{BarHeight, HeightMapper, LabelPlacement};
use super::scale::{select_scale, Scale};

/// One stacked segment of a bar group. `component` is `None` for the norm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub component: Option<Component>,
    pub bar: BarHeight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupLayout {
    pub kind: GroupKind,
    pub slot: usize,
    pub x_center: f64,
    /// Height of the whole group; connectors attach to its top.
    pub height_px: f64,
    pub total: f64,
    /// In key order: front, back, db.
    pub segments: Vec<Segment>,
}

impl GroupLayout {
    /// Segments whose label is listed under the group instead of inside the bar.
    pub fn below_labels(&self) -> impl Iterator<Item = &Segment> {
        self.segments
            .iter()
            .filter(|segment| segment.bar.placement == LabelPlacement::BelowGroup)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub scale: Scale,
    pub groups: Vec<GroupLayout>,
    pub connectors: Vec<Connector>,
    pub deltas: [Delta; 2],
}

impl ChartLayout {
    pub fn group_heights(&self) -> Vec<f64> {
        self.groups.iter().map(|group| group.height_px).collect()
    }

    pub fn connector_paths(&self) -> Vec<String> {
        self.connectors.iter().map(Connector::path).collect()
    }
}

/// Outcome of laying out a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    /// Every value is zero; shown as a message rather than an empty chart.
    NoData,
    Chart(ChartLayout),
}

pub fn compute_layout(loaded: &LoadedDataset, config: &ChartConfig) -> ChartView {
    let raw = &loaded.raw;
    let Some(scale) = select_scale(raw, config) else {
        return ChartView::NoData;
    };

    // Group totals in the active domain. On the log scale each total is
    // transformed as a whole and its segments share it by raw proportion.
    let domain_totals = match scale {
        Scale::Linear => raw.totals(),
        Scale::Logarithmic => loaded.transformed.totals(),
    };
    let max_group_height = domain_totals.iter().copied().fold(0.0, f64::max);
    let Some(mapper) = HeightMapper::new(max_group_height, config) else {
        return ChartView::NoData;
    };

    let groups: Vec<GroupLayout> = GroupKind::ALL
        .iter()
        .enumerate()
        .map(|(slot, &kind)| {
            let domain_total = domain_totals[slot];
            let segments = match raw.group(kind) {
                GroupValue::Breakdown(parts) => {
                    let raw_total = parts.total();
                    Component::ALL
                        .iter()
                        .map(|&component| {
                            let value = parts.get(component);
                            let domain_value = match scale {
                                Scale::Linear => value,
                                Scale::Logarithmic if raw_total > 0.0 => {
                                    domain_total * value / raw_total
                                }
                                Scale::Logarithmic => 0.0,
                            };
                            Segment {
                                component: Some(component),
                                bar: mapper.bar(domain_value, value),
                            }
                        })
                        .collect()
                }
                GroupValue::Scalar(value) => vec![Segment {
                    component: None,
                    bar: mapper.bar(domain_total, value),
                }],
            };

            GroupLayout {
                kind,
                slot,
                x_center: config.slot_center(slot),
                height_px: mapper
                    .scale_height(domain_total)
                    .max(config.min_visible_height),
                total: raw.group(kind).total(),
                segments,
            }
        })
        .collect();

    let heights: Vec<f64> = groups.iter().map(|group| group.height_px).collect();
    let environments = groups.iter().filter(|group| group.kind.is_environment()).count();
    let connectors = connectors(&heights, environments, config);

    ChartView::Chart(ChartLayout {
        title: raw.title.clone(),
        scale,
        groups,
        connectors,
        deltas: deltas(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, EnvironmentBreakdown as B};

    fn layout(dataset: Dataset) -> ChartLayout {
        match compute_layout(&LoadedDataset::new(dataset), &ChartConfig::default()) {
            ChartView::Chart(layout) => layout,
            ChartView::NoData => panic!("expected a chart"),
        }
    }

    fn sample() -> Dataset {
        Dataset {
            title: "OS Doors".into(),
            dev: B::new(66.0, 100.0, 31.0),
            test: B::new(60.0, 80.0, 85.0),
            prod: B::new(66.0, 83.0, 31.0),
            norm: 150.0,
        }
    }

    #[test]
    fn all_zero_yields_no_data() {
        let view = compute_layout(&LoadedDataset::new(Dataset::default()), &ChartConfig::default());
        assert_eq!(view, ChartView::NoData);
    }

    #[test]
    fn linear_layout_scales_to_tallest_group() {
        let chart = layout(sample());
        assert_eq!(chart.scale, Scale::Linear);
        assert_eq!(chart.groups.len(), 4);
        assert_eq!(chart.groups[1].height_px, 265.0);
        assert!(chart.groups.iter().all(|g| g.height_px <= 265.0));
    }

    #[test]
    fn segments_show_raw_values_in_key_order() {
        let chart = layout(sample());
        let dev = &chart.groups[0];
        let values: Vec<_> = dev.segments.iter().map(|s| s.bar.display_value).collect();
        assert_eq!(values, [66.0, 100.0, 31.0]);
        assert_eq!(dev.segments[0].component, Some(Component::Front));

        let norm = &chart.groups[3];
        assert_eq!(norm.segments.len(), 1);
        assert_eq!(norm.segments[0].component, None);
        assert_eq!(norm.segments[0].bar.display_value, 150.0);
    }

    #[test]
    fn log_scale_still_fills_column_with_largest_group() {
        let chart = layout(Dataset {
            title: "outlier".into(),
            dev: B::new(1.0, 0.0, 0.0),
            test: B::new(400.0, 300.0, 300.0),
            prod: B::new(1.0, 1.0, 0.0),
            norm: 5.0,
        });
        assert_eq!(chart.scale, Scale::Logarithmic);
        assert_eq!(chart.groups[1].height_px, 265.0);
        // Displayed numbers are never log values.
        assert_eq!(chart.groups[1].segments[0].bar.display_value, 400.0);
        assert_eq!(chart.groups[1].total, 1000.0);
    }

    #[test]
    fn log_heights_follow_raw_total_order() {
        let chart = layout(Dataset {
            title: "skewed".into(),
            dev: B::new(10.0, 10.0, 10.0),
            test: B::new(1000.0, 0.0, 0.0),
            prod: B::new(20.0, 0.0, 0.0),
            norm: 5.0,
        });
        assert_eq!(chart.scale, Scale::Logarithmic);
        let h = chart.group_heights();
        assert_eq!(h[1], 265.0);
        assert!(h[1] > h[0] && h[0] > h[2] && h[2] > h[3], "{h:?}");
    }

    #[test]
    fn log_segments_stack_to_group_height() {
        let chart = layout(Dataset {
            title: String::new(),
            dev: B::new(10.0, 10.0, 10.0),
            test: B::new(400.0, 300.0, 300.0),
            prod: B::new(1.0, 1.0, 0.0),
            norm: 5.0,
        });
        assert_eq!(chart.scale, Scale::Logarithmic);
        let test = &chart.groups[1];
        let stacked: f64 = test.segments.iter().map(|s| s.bar.height_px).sum();
        assert!((stacked - test.height_px).abs() < 1e-9);
        let dev = &chart.groups[0];
        assert!((dev.segments[0].bar.height_px - dev.segments[1].bar.height_px).abs() < 1e-9);
    }

    #[test]
    fn zero_segments_are_listed_below() {
        let chart = layout(Dataset {
            title: String::new(),
            dev: B::new(50.0, 0.0, 50.0),
            test: B::new(50.0, 50.0, 50.0),
            prod: B::new(50.0, 50.0, 50.0),
            norm: 100.0,
        });
        let below: Vec<_> = chart.groups[0]
            .below_labels()
            .map(|segment| segment.component)
            .collect();
        assert_eq!(below, [Some(Component::Back)]);
        assert_eq!(chart.groups[0].segments[1].bar.height_px, 2.0);
    }

    #[test]
    fn connectors_skip_norm_group() {
        let chart = layout(sample());
        assert_eq!(chart.connector_paths().len(), 2);
        assert!(chart.connectors.iter().all(|c| c.from < 3 && c.to < 3));
    }

    #[test]
    fn deltas_ignore_active_scale() {
        let data = Dataset {
            title: String::new(),
            dev: B::new(1.0, 1.0, 1.0),
            test: B::new(100.0, 100.0, 100.0),
            prod: B::new(100.0, 100.0, 100.0),
            norm: 1000.0,
        };
        let chart = layout(data);
        assert_eq!(chart.scale, Scale::Logarithmic);
        assert_eq!(chart.deltas[0].raw_diff, 297);
    }
}
