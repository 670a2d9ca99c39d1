//! Value to pixel mapping for bars.

use crate::core::ChartConfig;

/// Where a bar's numeric label goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlacement {
    InBar,
    /// Listed as a text line under the bar group; used for thin and zero bars.
    BelowGroup,
}

/// A rendered bar (or bar segment).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarHeight {
    /// Height after the visibility floor.
    pub height_px: f64,
    /// Untransformed value shown to the user.
    pub display_value: f64,
    pub placement: LabelPlacement,
    pub is_zero: bool,
}

/// Maps values of the active domain onto `[0, column_max_height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightMapper {
    max_group_height: f64,
    column_max_height: f64,
    min_visible_height: f64,
    label_threshold: f64,
}

impl HeightMapper {
    /// `None` when there is nothing to scale against (all data absent).
    pub fn new(max_group_height: f64, config: &ChartConfig) -> Option<Self> {
        if !(max_group_height.is_finite() && max_group_height > 0.0) {
            return None;
        }
        Some(Self {
            max_group_height,
            column_max_height: config.column_max_height,
            min_visible_height: config.min_visible_height,
            label_threshold: config.label_threshold,
        })
    }

    /// Proportional height without the visibility floor.
    pub fn scale_height(&self, value: f64) -> f64 {
        if !(value.is_finite() && value > 0.0) {
            return 0.0;
        }
        (value / self.max_group_height * self.column_max_height).min(self.column_max_height)
    }

    /// Rendered bar for a domain value (linear or log) and its raw value.
    pub fn bar(&self, domain_value: f64, display_value: f64) -> BarHeight {
        let is_zero = display_value == 0.0;
        let height_px = self.scale_height(domain_value).max(self.min_visible_height);
        let placement = if !is_zero && height_px >= self.label_threshold {
            LabelPlacement::InBar
        } else {
            LabelPlacement::BelowGroup
        };
        BarHeight {
            height_px,
            display_value,
            placement,
            is_zero,
        }
    }
}
