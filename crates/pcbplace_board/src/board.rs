//! The board: outline, obstacles, nets and footprints.

use crate::drawing::Drawing;
use crate::footprint::Footprint;
use crate::geom::{Point, Rect};
use crate::ids::{FootprintId, NetId};
use crate::polygon;
use geo::{Area, Polygon};
use serde::{Deserialize, Serialize};

/// The board edge (Edge.Cuts): an outer ring with optional cut-outs.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Outline {
    /// Outer boundary, closed implicitly.
    #[serde(default)]
    pub outer: Vec<Point>,
    /// Cut-outs inside the outer boundary.
    #[serde(default)]
    pub holes: Vec<Vec<Point>>,
}

impl Outline {
    /// A rectangular outline without cut-outs.
    pub fn rectangle(rect: Rect) -> Self {
        Self {
            outer: rect.corners().to_vec(),
            holes: Vec::new(),
        }
    }

    /// Every ring, outer first.
    pub fn rings(&self) -> impl Iterator<Item = &[Point]> {
        std::iter::once(self.outer.as_slice()).chain(self.holes.iter().map(Vec::as_slice))
    }

    /// Returns `true` if no outer ring is defined.
    pub fn is_empty(&self) -> bool {
        self.outer.len() < 3
    }
}

/// A named electrical net.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Net {
    /// Net name.
    pub name: String,
}

/// A printed circuit board as seen by the placer.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Board {
    /// Board edge.
    #[serde(default)]
    pub outline: Outline,
    /// Graphic obstacles that are not part of the edge.
    #[serde(default)]
    pub obstacles: Vec<Drawing>,
    /// Nets indexed by [`NetId`].
    #[serde(default)]
    pub nets: Vec<Net>,
    /// Footprints indexed by [`FootprintId`].
    #[serde(default)]
    pub footprints: Vec<Footprint>,
}

impl Board {
    /// Creates an empty board with the given outline.
    pub fn new(outline: Outline) -> Self {
        Self {
            outline,
            ..Self::default()
        }
    }

    /// Adds a net and returns its ID.
    pub fn add_net(&mut self, name: impl Into<String>) -> NetId {
        let id = NetId::from_raw(self.nets.len() as u32);
        self.nets.push(Net { name: name.into() });
        id
    }

    /// Adds a footprint and returns its ID.
    pub fn add_footprint(&mut self, footprint: Footprint) -> FootprintId {
        let id = FootprintId::from_raw(self.footprints.len() as u32);
        self.footprints.push(footprint);
        id
    }

    /// Returns a footprint by ID.
    pub fn footprint(&self, id: FootprintId) -> &Footprint {
        &self.footprints[id.index()]
    }

    /// Returns a footprint mutably by ID.
    pub fn footprint_mut(&mut self, id: FootprintId) -> &mut Footprint {
        &mut self.footprints[id.index()]
    }

    /// All footprint IDs in board order.
    pub fn footprint_ids(&self) -> impl Iterator<Item = FootprintId> {
        (0..self.footprints.len() as u32).map(FootprintId::from_raw)
    }

    /// Finds a footprint by reference designator.
    pub fn find_footprint(&self, reference: &str) -> Option<FootprintId> {
        self.footprints
            .iter()
            .position(|f| f.reference == reference)
            .map(|i| FootprintId::from_raw(i as u32))
    }

    /// Net name, if the ID is known.
    pub fn net_name(&self, id: NetId) -> Option<&str> {
        self.nets.get(id.index()).map(|n| n.name.as_str())
    }

    /// Bounding box of the board edge, `None` without an outline.
    pub fn edge_bounding_box(&self) -> Option<Rect> {
        if self.outline.is_empty() {
            return None;
        }
        Rect::bounding(self.outline.outer.iter().copied())
    }

    /// The board edge as a polygon with holes.
    pub fn outline_polygon(&self) -> Polygon<f64> {
        polygon::polygon(&self.outline.outer, &self.outline.holes)
    }

    /// Area enclosed by the board edge, in square nanometres.
    pub fn outline_area(&self) -> f64 {
        if self.outline.is_empty() {
            return 0.0;
        }
        self.outline_polygon().unsigned_area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::PlacementStatus;

    fn board() -> Board {
        Board::new(Outline::rectangle(Rect::new(
            Point::new(0, 0),
            Point::new(100_000_000, 80_000_000),
        )))
    }

    #[test]
    fn ids_are_table_indices() {
        let mut b = board();
        let gnd = b.add_net("GND");
        let vcc = b.add_net("VCC");
        assert_eq!(gnd.index(), 0);
        assert_eq!(b.net_name(vcc), Some("VCC"));
        let r1 = b.add_footprint(Footprint::new("R1", Point::ZERO));
        let r2 = b.add_footprint(Footprint::new("R2", Point::ZERO));
        assert_eq!(b.find_footprint("R2"), Some(r2));
        assert_eq!(b.find_footprint("R3"), None);
        b.footprint_mut(r1).status = PlacementStatus::Pending;
        assert!(b.footprint(r1).needs_placement());
        assert_eq!(b.footprint_ids().count(), 2);
    }

    #[test]
    fn edge_box_and_area() {
        let b = board();
        let bb = b.edge_bounding_box().unwrap();
        assert_eq!(bb.end(), Point::new(100_000_000, 80_000_000));
        assert_eq!(b.outline_area(), 8.0e15);
    }

    #[test]
    fn no_outline() {
        let b = Board::default();
        assert!(b.edge_bounding_box().is_none());
        assert_eq!(b.outline_area(), 0.0);
    }

    #[test]
    fn rings_iterate_outer_first() {
        let mut b = board();
        b.outline.holes.push(vec![Point::new(1, 1), Point::new(2, 1), Point::new(2, 2)]);
        let rings: Vec<_> = b.outline.rings().collect();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].len(), 4);
    }
}
