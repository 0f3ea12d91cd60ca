//! Graphic items that block placement.

use crate::geom::{Point, Rect};
use crate::layer::LayerSet;
use pcbplace_common::Length;
use serde::{Deserialize, Serialize};

/// A stroked graphic shape that is not part of the board edge.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drawing {
    /// Straight line.
    Segment {
        /// First end.
        start: Point,
        /// Second end.
        end: Point,
        /// Stroke width.
        width: Length,
        /// Copper sides blocked by the line.
        #[serde(default = "all_layers")]
        layers: LayerSet,
    },
    /// Circular arc starting at `start` and sweeping by `sweep` degrees.
    Arc {
        /// Arc centre.
        centre: Point,
        /// Start point on the arc.
        start: Point,
        /// Sweep in degrees, positive towards increasing `atan2(dy, dx)` in
        /// board coordinates (clockwise on screen, y pointing down).
        sweep: f64,
        /// Stroke width.
        width: Length,
        /// Copper sides blocked by the arc.
        #[serde(default = "all_layers")]
        layers: LayerSet,
    },
    /// Full circle outline.
    Circle {
        /// Circle centre.
        centre: Point,
        /// Radius.
        radius: Length,
        /// Stroke width.
        width: Length,
        /// Copper sides blocked by the circle.
        #[serde(default = "all_layers")]
        layers: LayerSet,
    },
}

fn all_layers() -> LayerSet {
    LayerSet::ALL_CU
}

impl Drawing {
    /// Copper sides the drawing blocks.
    pub fn layers(&self) -> LayerSet {
        match self {
            Drawing::Segment { layers, .. }
            | Drawing::Arc { layers, .. }
            | Drawing::Circle { layers, .. } => *layers,
        }
    }

    /// Stroke width.
    pub fn width(&self) -> Length {
        match self {
            Drawing::Segment { width, .. }
            | Drawing::Arc { width, .. }
            | Drawing::Circle { width, .. } => *width,
        }
    }

    /// Conservative bounding box of the stroke centre line.
    pub fn bounding_box(&self) -> Rect {
        match *self {
            Drawing::Segment { start, end, .. } => Rect::from_corners(start, end),
            Drawing::Arc { centre, start, .. } => {
                let r = centre.distance(start).round() as i64;
                Rect::from_corners(centre - Point::new(r, r), centre + Point::new(r, r))
            }
            Drawing::Circle { centre, radius, .. } => {
                let r = radius.nm();
                Rect::from_corners(centre - Point::new(r, r), centre + Point::new(r, r))
            }
        }
    }
}
