//! Footprint pads.

use crate::geom::{Angle, Point};
use crate::ids::NetId;
use crate::layer::LayerSet;
use pcbplace_common::Length;
use serde::{Deserialize, Serialize};

/// Pad copper shape.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PadShape {
    /// Round pad; `size.x` is the diameter.
    Circle,
    /// Rectangular pad.
    #[default]
    Rect,
    /// Obround pad.
    Oval,
    /// Trapezoid; `delta` shortens one pair of opposite edges and lengthens the other.
    Trapezoid {
        /// Edge length delta in x and y.
        delta: Point,
    },
    /// Rectangle with rounded corners.
    RoundRect,
    /// Arbitrary copper shape, approximated by its size box.
    Custom,
}

/// A copper pad, positioned relative to its footprint anchor.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Pad {
    /// Pad number or name.
    pub name: String,
    /// Offset from the footprint anchor at footprint orientation 0.
    #[serde(default)]
    pub offset: Point,
    /// Pad width and height before rotation.
    pub size: Point,
    /// Copper shape.
    #[serde(default)]
    pub shape: PadShape,
    /// Rotation relative to the footprint.
    #[serde(default)]
    pub rotation: Angle,
    /// Copper layers the pad occupies.
    #[serde(default = "default_pad_layers")]
    pub layers: LayerSet,
    /// Connected net, if any.
    #[serde(default)]
    pub net: Option<NetId>,
    /// Pad-specific clearance added around the copper.
    #[serde(default)]
    pub clearance: Length,
}

fn default_pad_layers() -> LayerSet {
    LayerSet::FRONT_CU
}

impl Pad {
    /// Creates a rectangular front-side pad with no net.
    pub fn new(name: impl Into<String>, offset: Point, size: Point) -> Self {
        Self {
            name: name.into(),
            offset,
            size,
            shape: PadShape::Rect,
            rotation: Angle::ZERO,
            layers: LayerSet::FRONT_CU,
            net: None,
            clearance: Length::ZERO,
        }
    }

    /// Sets the net.
    pub fn with_net(mut self, net: NetId) -> Self {
        self.net = Some(net);
        self
    }

    /// Sets the shape.
    pub fn with_shape(mut self, shape: PadShape) -> Self {
        self.shape = shape;
        self
    }

    /// Sets the copper layers.
    pub fn with_layers(mut self, layers: LayerSet) -> Self {
        self.layers = layers;
        self
    }

    /// Sets the local rotation.
    pub fn with_rotation(mut self, rotation: Angle) -> Self {
        self.rotation = rotation;
        self
    }

    /// Half extents of the copper in the pad's own frame, widened for trapezoids.
    pub fn half_extent(&self) -> Point {
        match self.shape {
            PadShape::Circle => Point::new(self.size.x / 2, self.size.x / 2),
            PadShape::Trapezoid { delta } => Point::new(
                self.size.x / 2 + delta.y.abs() / 2,
                self.size.y / 2 + delta.x.abs() / 2,
            ),
            _ => Point::new(self.size.x / 2, self.size.y / 2),
        }
    }
}
