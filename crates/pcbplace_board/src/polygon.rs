//! Conversions from board geometry to `geo` polygons.
//!
//! Polygon booleans run in floating point nanometres. Board coordinates stay
//! well inside the 2^53 exact range of `f64`.

use crate::geom::{Point, Rect};
use geo::{Area, Coord, LineString, MultiPolygon, Polygon};

/// A set of polygons with holes, the unit of free-area bookkeeping.
pub type PolySet = MultiPolygon<f64>;

/// Converts a closed ring (last point not repeated) to a `geo` line string.
pub fn ring(points: &[Point]) -> LineString<f64> {
    points
        .iter()
        .map(|p| Coord {
            x: p.x as f64,
            y: p.y as f64,
        })
        .collect()
}

/// Builds a polygon from an outer ring and hole rings.
pub fn polygon(outer: &[Point], holes: &[Vec<Point>]) -> Polygon<f64> {
    Polygon::new(ring(outer), holes.iter().map(|h| ring(h)).collect())
}

/// Polygon covering a rectangle.
pub fn rect_polygon(rect: &Rect) -> Polygon<f64> {
    polygon(&rect.corners(), &[])
}

/// Wraps one polygon into a set, dropping it if it has no area.
pub fn single(poly: Polygon<f64>) -> PolySet {
    if poly.unsigned_area() > 0.0 {
        MultiPolygon::new(vec![poly])
    } else {
        MultiPolygon::new(Vec::new())
    }
}

/// An empty polygon set.
pub fn empty() -> PolySet {
    MultiPolygon::new(Vec::new())
}

/// Total area of a polygon set, in square nanometres.
pub fn area(set: &PolySet) -> f64 {
    set.unsigned_area()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_polygon_area() {
        let r = Rect::new(Point::new(0, 0), Point::new(10, 20));
        assert_eq!(rect_polygon(&r).unsigned_area(), 200.0);
    }

    #[test]
    fn polygon_with_hole() {
        let outer = Rect::new(Point::new(0, 0), Point::new(10, 10)).corners();
        let hole = Rect::new(Point::new(2, 2), Point::new(2, 2)).corners().to_vec();
        let p = polygon(&outer, &[hole]);
        assert_eq!(p.unsigned_area(), 96.0);
    }

    #[test]
    fn degenerate_polygon_dropped() {
        let r = Rect::new(Point::new(0, 0), Point::new(10, 0));
        assert!(single(rect_polygon(&r)).0.is_empty());
        assert_eq!(area(&empty()), 0.0);
    }
}
