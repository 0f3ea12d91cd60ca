//! Board locations that diagnostics point at.

use pcbplace_common::Length;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where on the board a diagnostic applies.
///
/// Either part may be absent: a board-wide problem has neither, a problem with
/// a footprint that has no meaningful position carries only the reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Reference designator of the footprint involved (e.g., `U3`).
    pub footprint: Option<String>,
    /// Board coordinate `(x, y)`.
    pub point: Option<(Length, Length)>,
}

impl Location {
    /// A location that points nowhere in particular.
    pub const NONE: Location = Location {
        footprint: None,
        point: None,
    };

    /// A location naming a footprint.
    pub fn footprint(reference: impl Into<String>) -> Self {
        Self {
            footprint: Some(reference.into()),
            point: None,
        }
    }

    /// Attaches a board coordinate.
    pub fn at(mut self, x: Length, y: Length) -> Self {
        self.point = Some((x, y));
        self
    }

    /// Returns `true` if the location carries no information.
    pub fn is_none(&self) -> bool {
        self.footprint.is_none() && self.point.is_none()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.footprint, self.point) {
            (Some(r), Some((x, y))) => write!(f, "{r} at ({:.3}, {:.3}) mm", x.mm(), y.mm()),
            (Some(r), None) => write!(f, "{r}"),
            (None, Some((x, y))) => write!(f, "({:.3}, {:.3}) mm", x.mm(), y.mm()),
            (None, None) => write!(f, "<board>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_none() {
        assert!(Location::NONE.is_none());
        assert_eq!(format!("{}", Location::NONE), "<board>");
    }

    #[test]
    fn display_with_point() {
        let loc = Location::footprint("U1").at(Length::from_mm(10.0), Length::from_mm(2.5));
        assert_eq!(format!("{loc}"), "U1 at (10.000, 2.500) mm");
    }

    #[test]
    fn display_reference_only() {
        assert_eq!(format!("{}", Location::footprint("J4")), "J4");
    }
}
