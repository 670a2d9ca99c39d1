//! Trend connectors between consecutive environment columns.
//!
//! Each connector rises from the top of its source bar to a shared rail,
//! runs along it and descends onto the next bar:
//!
//! ```text
//!   rail ┌──────────┐
//!        │          ▼
//!        █          █
//! ```
//!
//! Connectors sharing the rail therefore never cross. Where a column both
//! receives and emits a connector, the incoming end is nudged left so the two
//! endpoints stay apart.

use crate::core::format::format_coord;
use crate::core::ChartConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    /// Slot index of the source column.
    pub from: usize,
    /// Slot index of the target column.
    pub to: usize,
    /// Start, rail corner, rail corner, end (the arrowhead sits on the end).
    pub points: [Point; 4],
}

impl Connector {
    /// SVG path data, e.g. `M40,71 L40,9 L170,9 L170,96`.
    pub fn path(&self) -> String {
        let [start, up, across, end] = self.points;
        format!(
            "M{},{} L{},{} L{},{} L{},{}",
            format_coord(start.x),
            format_coord(start.y),
            format_coord(up.x),
            format_coord(up.y),
            format_coord(across.x),
            format_coord(across.y),
            format_coord(end.x),
            format_coord(end.y),
        )
    }
}

/// Connectors joining `heights[i]` to `heights[i + 1]` for the first
/// `environments` columns; anything after them (the norm) is left alone.
pub fn connectors(heights: &[f64], environments: usize, config: &ChartConfig) -> Vec<Connector> {
    let linked = environments.min(heights.len());
    let rail = config.rail_y();

    (0..linked.saturating_sub(1))
        .map(|from| {
            let to = from + 1;
            let target_emits = to + 1 < linked;
            let nudge = if target_emits {
                -config.connector_nudge
            } else {
                0.0
            };

            let x1 = config.slot_center(from);
            let y1 = config.chart_height - heights[from];
            let x2 = config.slot_center(to) + nudge;
            let y2 = config.chart_height - heights[to] - config.arrowhead_clearance;

            Connector {
                from,
                to,
                points: [
                    Point { x: x1, y: y1 },
                    Point { x: x1, y: rail },
                    Point { x: x2, y: rail },
                    Point { x: x2, y: y2 },
                ],
            }
        })
        .collect()
}
