//! Footprints: placed or placeable components.

use crate::geom::{Angle, Point, Rect};
use crate::layer::{LayerSet, Side};
use crate::pad::Pad;
use pcbplace_common::NM_PER_MM;
use serde::{Deserialize, Serialize};

/// Largest value accepted for `cost90` and `cost180`.
pub const MAX_ROTATION_COST: u8 = 10;

/// Where a footprint stands with respect to automatic placement.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStatus {
    /// Position is given and acts as an obstacle.
    #[default]
    Fixed,
    /// Waiting for the placer.
    Pending,
    /// Positioned by the placer during this or an earlier run.
    Placed,
}

/// A component instance on the board.
///
/// Pads, body and courtyard are stored in the footprint's local frame. Their
/// board coordinates follow from `position` and `orientation`, so rotating or
/// moving a footprint never rewrites its children.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Footprint {
    /// Reference designator, unique on the board.
    pub reference: String,
    /// Anchor position in board coordinates.
    #[serde(default)]
    pub position: Point,
    /// Rotation about the anchor.
    #[serde(default)]
    pub orientation: Angle,
    /// Mounting side.
    #[serde(default)]
    pub side: Side,
    /// Copper pads.
    #[serde(default)]
    pub pads: Vec<Pad>,
    /// Local body outline, if known.
    #[serde(default)]
    pub body: Option<Rect>,
    /// Local courtyard outline (closed ring, last point not repeated).
    #[serde(default)]
    pub courtyard: Option<Vec<Point>>,
    /// Locked footprints are never moved by the placer.
    #[serde(default)]
    pub locked: bool,
    /// Reluctance to rotate by 90° or 270° (0 forbids the rotation, 10 is free).
    #[serde(default)]
    pub cost90: u8,
    /// Reluctance to rotate by 180° (0 forbids the rotation, 10 is free).
    #[serde(default)]
    pub cost180: u8,
    /// Placement state.
    #[serde(default)]
    pub status: PlacementStatus,
}

impl Footprint {
    /// Creates a fixed, unrotated top-side footprint with no pads.
    pub fn new(reference: impl Into<String>, position: Point) -> Self {
        Self {
            reference: reference.into(),
            position,
            orientation: Angle::ZERO,
            side: Side::Top,
            pads: Vec::new(),
            body: None,
            courtyard: None,
            locked: false,
            cost90: 0,
            cost180: 0,
            status: PlacementStatus::Fixed,
        }
    }

    /// Adds a pad.
    pub fn with_pad(mut self, pad: Pad) -> Self {
        self.pads.push(pad);
        self
    }

    /// Sets the local body rectangle.
    pub fn with_body(mut self, body: Rect) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the local courtyard ring.
    pub fn with_courtyard(mut self, ring: Vec<Point>) -> Self {
        self.courtyard = Some(ring);
        self
    }

    /// Sets the placement status.
    pub fn with_status(mut self, status: PlacementStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the rotation costs.
    pub fn with_rotation_costs(mut self, cost90: u8, cost180: u8) -> Self {
        self.cost90 = cost90;
        self.cost180 = cost180;
        self
    }

    /// Returns `true` while the footprint waits for the placer.
    pub fn needs_placement(&self) -> bool {
        self.status == PlacementStatus::Pending
    }

    /// Number of pads.
    pub fn pad_count(&self) -> usize {
        self.pads.len()
    }

    /// Maps a local point to board coordinates.
    pub fn to_board(&self, local: Point) -> Point {
        self.position + self.orientation.rotate(local)
    }

    /// Board position of a pad centre.
    pub fn pad_position(&self, pad: &Pad) -> Point {
        self.to_board(pad.offset)
    }

    /// Board orientation of a pad.
    pub fn pad_orientation(&self, pad: &Pad) -> Angle {
        self.orientation + pad.rotation
    }

    /// Board positions of every pad centre, in pad order.
    pub fn pad_positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.pads.iter().map(|p| self.pad_position(p))
    }

    /// Axis-aligned box enclosing a pad's copper in board coordinates.
    pub fn pad_bounding_box(&self, pad: &Pad) -> Rect {
        let centre = self.pad_position(pad);
        let half = pad.half_extent();
        let rot = self.pad_orientation(pad);
        let corners = [
            Point::new(-half.x, -half.y),
            Point::new(half.x, -half.y),
            Point::new(half.x, half.y),
            Point::new(-half.x, half.y),
        ];
        Rect::bounding(corners.iter().map(|c| centre + rot.rotate(*c)))
            .unwrap_or_else(|| Rect::new(centre, Point::ZERO))
    }

    /// Body rectangle corners in board coordinates.
    pub fn body_corners(&self) -> Option<[Point; 4]> {
        self.body.map(|b| b.corners().map(|c| self.to_board(c)))
    }

    /// Courtyard ring in board coordinates.
    pub fn courtyard_polygon(&self) -> Option<Vec<Point>> {
        self.courtyard
            .as_ref()
            .filter(|ring| ring.len() >= 3)
            .map(|ring| ring.iter().map(|p| self.to_board(*p)).collect())
    }

    /// Box enclosing body, pads and courtyard in board coordinates.
    ///
    /// A footprint with none of those collapses to its anchor.
    pub fn bounding_box(&self) -> Rect {
        let mut points: Vec<Point> = Vec::new();
        if let Some(corners) = self.body_corners() {
            points.extend(corners);
        }
        if let Some(ring) = self.courtyard_polygon() {
            points.extend(ring);
        }
        for pad in &self.pads {
            let r = self.pad_bounding_box(pad);
            points.push(r.origin);
            points.push(r.end());
        }
        Rect::bounding(points).unwrap_or_else(|| Rect::new(self.position, Point::ZERO))
    }

    /// Bounding box relative to the anchor position.
    pub fn local_bounding_box(&self) -> Rect {
        self.bounding_box().moved(-self.position)
    }

    /// Bounding box area in square millimetres.
    pub fn area(&self) -> f64 {
        let mm = NM_PER_MM as f64;
        let r = self.bounding_box();
        (r.width() as f64 / mm) * (r.height() as f64 / mm)
    }

    /// Union of the copper layers of every pad.
    pub fn pad_layers(&self) -> LayerSet {
        self.pads
            .iter()
            .fold(LayerSet::EMPTY, |acc, p| acc.union(p.layers))
    }

    /// Returns `true` if any pad reaches the copper of the side opposite to
    /// the mounting side.
    pub fn reaches_other_side(&self) -> bool {
        self.pads
            .iter()
            .any(|p| p.layers.has_side(self.side.opposite()))
    }

    /// Rotates the footprint about its anchor.
    pub fn rotate(&mut self, delta: Angle) {
        self.orientation = self.orientation + delta;
    }
}
