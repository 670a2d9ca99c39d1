//! Chart scaling and layout engine.
//!
//! Pipeline per render: [`scale::select_scale`] decides linear vs log,
//! [`height::HeightMapper`] turns values into pixels, [`connector`] routes the
//! trend arrows and [`delta`] reports the raw change between environments.
//! [`layout::compute_layout`] runs all of them; [`svg`] draws the result.

pub mod connector;
pub mod delta;
pub mod height;
pub mod layout;
pub mod scale;
pub mod svg;

pub use connector::{Connector, Point};
pub use delta::{Delta, Trend};
pub use height::{BarHeight, HeightMapper, LabelPlacement};
pub use layout::{compute_layout, ChartLayout, ChartView, GroupLayout, Segment};
pub use scale::{select_scale, Scale};
