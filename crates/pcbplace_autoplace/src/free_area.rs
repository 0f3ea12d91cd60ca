//! Per-side free area: the board outline minus every placed footprint area.

use geo::{Area, BooleanOps, Polygon};
use pcbplace_board::polygon::{self, PolySet};
use pcbplace_board::{Footprint, Side};

/// Residual area below which a boolean result counts as empty, in nm².
///
/// Absorbs slivers left by floating point booleans along shared edges.
const AREA_EPSILON: f64 = 1.0e4;

/// Board area not yet covered by placed footprints, tracked per side.
///
/// Both sides start as the board outline and only ever shrink.
#[derive(Debug, Clone)]
pub struct FreeArea {
    top: PolySet,
    bottom: PolySet,
}

impl FreeArea {
    /// Starts both sides from the board outline.
    pub fn new(outline: &Polygon<f64>) -> Self {
        let mut free = Self {
            top: polygon::empty(),
            bottom: polygon::empty(),
        };
        free.reset(outline);
        free
    }

    /// Resets both sides to the full board outline.
    pub fn reset(&mut self, outline: &Polygon<f64>) {
        self.top = polygon::single(outline.clone());
        self.bottom = self.top.clone();
    }

    /// Drops both polygon sets.
    pub fn release(&mut self) {
        self.top = polygon::empty();
        self.bottom = polygon::empty();
    }

    /// Free polygons of one side.
    pub fn get(&self, side: Side) -> &PolySet {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }

    fn get_mut(&mut self, side: Side) -> &mut PolySet {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        }
    }

    /// Free area of one side in nm².
    pub fn area(&self, side: Side) -> f64 {
        self.get(side).unsigned_area()
    }

    /// Removes `shape` from the free area of `side`.
    ///
    /// Shapes without area or outside the free area leave it unchanged.
    pub fn subtract(&mut self, shape: &PolySet, side: Side) {
        if shape.unsigned_area() <= AREA_EPSILON {
            return;
        }
        let free = self.get_mut(side);
        *free = free.difference(shape);
    }

    /// Returns `true` if `candidate` lies entirely inside the free area of `side`.
    pub fn test_fully_free(&self, candidate: &PolySet, side: Side) -> bool {
        if candidate.unsigned_area() <= AREA_EPSILON {
            return true;
        }
        candidate.difference(self.get(side)).unsigned_area() <= AREA_EPSILON
    }
}

/// The area a footprint claims on each side.
///
/// Made of the courtyard (on the mounting side), the footprint bounding box
/// grown by the body margin (on the mounting side) and every pad box grown by
/// half a cell plus the pad clearance (on each side the pad reaches).
#[derive(Debug, Clone)]
pub struct FootprintArea {
    /// Area claimed on the top side.
    pub top: PolySet,
    /// Area claimed on the bottom side.
    pub bottom: PolySet,
}

impl FootprintArea {
    /// Builds the area of `footprint` at its current position and orientation.
    pub fn build(footprint: &Footprint, cell_size: i64, clearance: i64) -> Self {
        let mut area = Self {
            top: polygon::empty(),
            bottom: polygon::empty(),
        };
        let side = footprint.side;
        if let Some(ring) = footprint.courtyard_polygon() {
            area.add(side, polygon::polygon(&ring, &[]));
        }
        let body = footprint.bounding_box().inflate(cell_size / 2 + clearance);
        area.add(side, polygon::rect_polygon(&body));
        for pad in &footprint.pads {
            let grow = cell_size / 2 + pad.clearance.nm();
            let rect = footprint.pad_bounding_box(pad).inflate(grow);
            for s in Side::ALL {
                if pad.layers.has_side(s) {
                    area.add(s, polygon::rect_polygon(&rect));
                }
            }
        }
        area
    }

    /// Area claimed on one side.
    pub fn side(&self, side: Side) -> &PolySet {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
        }
    }

    fn add(&mut self, side: Side, poly: Polygon<f64>) {
        let shape = polygon::single(poly);
        if shape.0.is_empty() {
            return;
        }
        let target = match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
        };
        *target = if target.0.is_empty() {
            shape
        } else {
            target.union(&shape)
        };
    }
}
