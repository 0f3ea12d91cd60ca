//! Copper sides and layer sets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two outer copper sides of the board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Front copper (`F.Cu`).
    #[default]
    Top,
    /// Back copper (`B.Cu`).
    Bottom,
}

impl Side {
    /// Both sides, top first.
    pub const ALL: [Side; 2] = [Side::Top, Side::Bottom];

    /// Returns the other side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Returns the copper layer set of this side.
    pub fn copper(self) -> LayerSet {
        match self {
            Side::Top => LayerSet::FRONT_CU,
            Side::Bottom => LayerSet::BACK_CU,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Top => write!(f, "top"),
            Side::Bottom => write!(f, "bottom"),
        }
    }
}

/// A set of copper layers, serialized as a list of layer names.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "Vec<String>", try_from = "Vec<String>")]
pub struct LayerSet(u8);

impl LayerSet {
    /// No layers.
    pub const EMPTY: LayerSet = LayerSet(0);
    /// Front copper.
    pub const FRONT_CU: LayerSet = LayerSet(1);
    /// Back copper.
    pub const BACK_CU: LayerSet = LayerSet(2);
    /// Both copper layers (through-hole).
    pub const ALL_CU: LayerSet = LayerSet(3);

    const NAMES: [(&'static str, LayerSet); 2] =
        [("F.Cu", LayerSet::FRONT_CU), ("B.Cu", LayerSet::BACK_CU)];

    /// Returns `true` if every layer in `other` is also in `self`.
    pub fn contains(self, other: LayerSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if the sets share a layer.
    pub fn intersects(self, other: LayerSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if the set holds the copper layer of `side`.
    pub fn has_side(self, side: Side) -> bool {
        self.intersects(side.copper())
    }

    /// Returns `true` if no layer is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of both sets.
    pub fn union(self, other: LayerSet) -> LayerSet {
        LayerSet(self.0 | other.0)
    }

    /// Mirrors the set to the other board side.
    pub fn flipped(self) -> LayerSet {
        let mut out = LayerSet::EMPTY;
        if self.contains(LayerSet::FRONT_CU) {
            out = out.union(LayerSet::BACK_CU);
        }
        if self.contains(LayerSet::BACK_CU) {
            out = out.union(LayerSet::FRONT_CU);
        }
        out
    }

    /// Parses a single layer name.
    pub fn from_name(name: &str) -> Option<LayerSet> {
        match name {
            "*.Cu" => Some(LayerSet::ALL_CU),
            _ => Self::NAMES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, l)| *l),
        }
    }

    /// Returns the layer names in this set.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(_, l)| self.contains(*l))
            .map(|(n, _)| *n)
            .collect()
    }
}

impl fmt::Debug for LayerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerSet({:?})", self.names())
    }
}

impl From<LayerSet> for Vec<String> {
    fn from(set: LayerSet) -> Self {
        set.names().into_iter().map(str::to_string).collect()
    }
}

impl TryFrom<Vec<String>> for LayerSet {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names.iter().try_fold(LayerSet::EMPTY, |acc, name| {
            LayerSet::from_name(name)
                .map(|l| acc.union(l))
                .ok_or_else(|| format!("unknown copper layer '{name}'"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Top.opposite(), Side::Bottom);
        assert_eq!(Side::Bottom.opposite(), Side::Top);
    }

    #[test]
    fn layer_set_queries() {
        assert!(LayerSet::ALL_CU.contains(LayerSet::FRONT_CU));
        assert!(!LayerSet::FRONT_CU.contains(LayerSet::ALL_CU));
        assert!(LayerSet::ALL_CU.has_side(Side::Bottom));
        assert!(!LayerSet::FRONT_CU.has_side(Side::Bottom));
        assert!(LayerSet::EMPTY.is_empty());
    }

    #[test]
    fn flip_swaps_copper() {
        assert_eq!(LayerSet::FRONT_CU.flipped(), LayerSet::BACK_CU);
        assert_eq!(LayerSet::ALL_CU.flipped(), LayerSet::ALL_CU);
    }

    #[test]
    fn serde_as_names() {
        let json = serde_json::to_string(&LayerSet::ALL_CU).unwrap();
        assert_eq!(json, r#"["F.Cu","B.Cu"]"#);
        let back: LayerSet = serde_json::from_str(r#"["*.Cu"]"#).unwrap();
        assert_eq!(back, LayerSet::ALL_CU);
        let back: LayerSet = serde_json::from_str(r#"["B.Cu"]"#).unwrap();
        assert_eq!(back, LayerSet::BACK_CU);
    }

    #[test]
    fn unknown_layer_rejected() {
        assert!(serde_json::from_str::<LayerSet>(r#"["In1.Cu"]"#).is_err());
    }
}
