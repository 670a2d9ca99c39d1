//! Change between consecutive environments, always in real (untransformed) units.

use crate::data::{Dataset, GroupKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Growth or no change.
    Favorable,
    Unfavorable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub from: GroupKind,
    pub to: GroupKind,
    pub raw_diff: i64,
    pub trend: Trend,
}

impl Delta {
    pub fn between(dataset: &Dataset, from: GroupKind, to: GroupKind) -> Self {
        let earlier = dataset.group(from).total();
        let later = dataset.group(to).total();
        let raw_diff = (later - earlier).round() as i64;
        let trend = if raw_diff >= 0 {
            Trend::Favorable
        } else {
            Trend::Unfavorable
        };
        Self {
            from,
            to,
            raw_diff,
            trend,
        }
    }

    /// No glyph when nothing changed.
    pub fn shows_arrow(&self) -> bool {
        self.raw_diff != 0
    }

    pub fn arrow_glyph(&self) -> Option<&'static str> {
        match self.raw_diff {
            0 => None,
            d if d > 0 => Some("↑"),
            _ => Some("↓"),
        }
    }

    /// `+297`, `-12` or `0`.
    pub fn label(&self) -> String {
        if self.raw_diff > 0 {
            format!("+{}", self.raw_diff)
        } else {
            self.raw_diff.to_string()
        }
    }

    pub fn css_modifier(&self) -> &'static str {
        match self.trend {
            Trend::Favorable => "delta--up",
            Trend::Unfavorable => "delta--down",
        }
    }
}

/// dev→test and test→prod.
pub fn deltas(dataset: &Dataset) -> [Delta; 2] {
    let [dev, test, prod] = GroupKind::ENVIRONMENTS;
    [
        Delta::between(dataset, dev, test),
        Delta::between(dataset, test, prod),
    ]
}
