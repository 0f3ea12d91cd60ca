//! Integer board geometry: points, rectangles and angles.
//!
//! All coordinates are nanometres with the y axis pointing down, matching the
//! usual PCB editor convention. Positive angles rotate counter-clockwise as
//! seen on screen.

use pcbplace_common::NM_PER_MM;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A board coordinate or displacement in nanometres.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i64,
    /// Vertical coordinate (grows downwards).
    pub y: i64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0, y: 0 };

    /// Creates a point from nanometre coordinates.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Creates a point from millimetre coordinates, rounded to the nearest nanometre.
    pub fn from_mm(x: f64, y: f64) -> Self {
        Self {
            x: (x * NM_PER_MM as f64).round() as i64,
            y: (y * NM_PER_MM as f64).round() as i64,
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    /// Squared Euclidean distance to `other`, exact.
    pub fn distance_squared(self, other: Point) -> i128 {
        let dx = (self.x - other.x) as i128;
        let dy = (self.y - other.y) as i128;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.3}, {:.3})",
            self.x as f64 / NM_PER_MM as f64,
            self.y as f64 / NM_PER_MM as f64
        )
    }
}

/// An axis-aligned rectangle given by its origin (top-left) and size.
///
/// The size is kept non-negative; [`Rect::from_corners`] normalizes.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Width and height.
    pub size: Point,
}

impl Rect {
    /// Creates a rectangle from origin and size.
    pub fn new(origin: Point, size: Point) -> Self {
        Self::from_corners(origin, origin + size)
    }

    /// Creates a normalized rectangle spanning two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let origin = Point::new(a.x.min(b.x), a.y.min(b.y));
        let end = Point::new(a.x.max(b.x), a.y.max(b.y));
        Self {
            origin,
            size: end - origin,
        }
    }

    /// Smallest rectangle containing every point; `None` for an empty iterator.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Rect> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let (mut min, mut max) = (first, first);
        for p in it {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        Some(Rect::from_corners(min, max))
    }

    /// Left edge.
    pub fn x(&self) -> i64 {
        self.origin.x
    }

    /// Top edge.
    pub fn y(&self) -> i64 {
        self.origin.y
    }

    /// Right edge.
    pub fn right(&self) -> i64 {
        self.origin.x + self.size.x
    }

    /// Bottom edge.
    pub fn bottom(&self) -> i64 {
        self.origin.y + self.size.y
    }

    /// Bottom-right corner.
    pub fn end(&self) -> Point {
        self.origin + self.size
    }

    /// Width.
    pub fn width(&self) -> i64 {
        self.size.x
    }

    /// Height.
    pub fn height(&self) -> i64 {
        self.size.y
    }

    /// Centre point, rounded towards the origin.
    pub fn centre(&self) -> Point {
        Point::new(
            self.origin.x + self.size.x / 2,
            self.origin.y + self.size.y / 2,
        )
    }

    /// Area in square nanometres.
    pub fn area(&self) -> f64 {
        self.size.x as f64 * self.size.y as f64
    }

    /// Returns `true` if either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.size.x == 0 || self.size.y == 0
    }

    /// Grows the rectangle by `d` on every side. A negative `d` shrinks it,
    /// collapsing to the centre line rather than inverting.
    pub fn inflate(&self, d: i64) -> Rect {
        let mut x0 = self.origin.x - d;
        let mut x1 = self.right() + d;
        let mut y0 = self.origin.y - d;
        let mut y1 = self.bottom() + d;
        if x0 > x1 {
            let c = self.origin.x + self.size.x / 2;
            x0 = c;
            x1 = c;
        }
        if y0 > y1 {
            let c = self.origin.y + self.size.y / 2;
            y0 = c;
            y1 = c;
        }
        Rect::from_corners(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Returns the rectangle translated by `delta`.
    pub fn moved(&self, delta: Point) -> Rect {
        Rect {
            origin: self.origin + delta,
            size: self.size,
        }
    }

    /// Returns the smallest rectangle containing both.
    pub fn merge(&self, other: &Rect) -> Rect {
        Rect::from_corners(
            Point::new(self.x().min(other.x()), self.y().min(other.y())),
            Point::new(
                self.right().max(other.right()),
                self.bottom().max(other.bottom()),
            ),
        )
    }

    /// Returns `true` if `p` lies inside or on the border.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x() && p.x <= self.right() && p.y >= self.y() && p.y <= self.bottom()
    }

    /// Returns `true` if `other` lies entirely inside or on the border.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.origin) && self.contains(other.end())
    }

    /// The four corners, clockwise from the origin.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.origin,
            Point::new(self.right(), self.y()),
            self.end(),
            Point::new(self.x(), self.bottom()),
        ]
    }
}

/// An angle in degrees, normalized to `[0, 360)`.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd, Debug, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Angle(f64);

impl Angle {
    /// No rotation.
    pub const ZERO: Angle = Angle(0.0);

    /// Creates a normalized angle from degrees.
    pub fn degrees(deg: f64) -> Self {
        let mut d = deg % 360.0;
        if d < 0.0 {
            d += 360.0;
        }
        // Fold -0.0 and values that round up to 360
        if d >= 360.0 || d == 0.0 {
            d = 0.0;
        }
        Self(d)
    }

    /// Returns the angle in degrees.
    pub fn as_degrees(self) -> f64 {
        self.0
    }

    /// Returns the number of quarter turns if the angle is a multiple of 90°.
    pub fn quarter_turns(self) -> Option<u8> {
        let q = self.0 / 90.0;
        let r = q.round();
        if (q - r).abs() < 1e-9 {
            Some((r as i64).rem_euclid(4) as u8)
        } else {
            None
        }
    }

    /// Returns `true` for 0°, 90°, 180° and 270°.
    pub fn is_cardinal(self) -> bool {
        self.quarter_turns().is_some()
    }

    /// Rotates `p` about the origin by this angle.
    ///
    /// Cardinal angles are applied exactly; other angles round to the nearest
    /// nanometre.
    pub fn rotate(self, p: Point) -> Point {
        match self.quarter_turns() {
            Some(0) => p,
            Some(1) => Point::new(p.y, -p.x),
            Some(2) => Point::new(-p.x, -p.y),
            Some(3) => Point::new(-p.y, p.x),
            _ => {
                let (s, c) = self.0.to_radians().sin_cos();
                let x = p.x as f64;
                let y = p.y as f64;
                Point::new((x * c + y * s).round() as i64, (-x * s + y * c).round() as i64)
            }
        }
    }

    /// Rotates `p` about `centre` by this angle.
    pub fn rotate_about(self, p: Point, centre: Point) -> Point {
        self.rotate(p - centre) + centre
    }
}

impl From<f64> for Angle {
    fn from(deg: f64) -> Self {
        Angle::degrees(deg)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.0
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::degrees(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::degrees(self.0 - rhs.0)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}
