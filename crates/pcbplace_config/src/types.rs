//! Configuration types deserialized from `autoplace.toml`.

use pcbplace_common::Length;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// The top-level placer configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoplaceConfig {
    /// Routing matrix settings.
    #[serde(default)]
    pub grid: GridConfig,
    /// Placement behaviour.
    #[serde(default)]
    pub placement: PlacementConfig,
}

/// Routing matrix settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Matrix cell edge length.
    #[serde(default = "default_cell_size", deserialize_with = "deserialize_length")]
    pub cell_size: Length,
    /// Number of board sides modelled (1 or 2).
    #[serde(default = "default_layers")]
    pub layers: u8,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            layers: default_layers(),
        }
    }
}

/// Placement behaviour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementConfig {
    /// Also place footprints whose anchor lies outside the board box.
    #[serde(default)]
    pub place_off_board: bool,
    /// Peak keep-out cost stamped around placed footprints.
    #[serde(default = "default_keepout_cost")]
    pub keepout_cost: u32,
    /// Keep-out margin divisor: margin = cell size × pad count / gain.
    #[serde(default = "default_keepout_gain")]
    pub keepout_gain: u32,
    /// Run the exact free-area polygon test after the grid test.
    #[serde(default)]
    pub polygon_check: bool,
    /// Hard keep-out band along the board edge.
    #[serde(default, deserialize_with = "deserialize_length")]
    pub edge_clearance: Length,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            place_off_board: false,
            keepout_cost: default_keepout_cost(),
            keepout_gain: default_keepout_gain(),
            polygon_check: false,
            edge_clearance: Length::ZERO,
        }
    }
}

fn default_cell_size() -> Length {
    Length::from_mm(1.0)
}

fn default_layers() -> u8 {
    2
}

fn default_keepout_cost() -> u32 {
    500
}

fn default_keepout_gain() -> u32 {
    16
}

/// Deserializes a [`Length`] from a unit string (`"1mm"`, `"40mil"`) or a bare
/// number of millimetres.
fn deserialize_length<'de, D>(deserializer: D) -> Result<Length, D::Error>
where
    D: Deserializer<'de>,
{
    struct LengthVisitor;

    impl<'de> Visitor<'de> for LengthVisitor {
        type Value = Length;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a length such as \"1mm\" or a number of millimetres")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.parse().map_err(E::custom)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Length::from_mm(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Length::from_mm(v as f64))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Length::from_mm(v as f64))
        }
    }

    deserializer.deserialize_any(LengthVisitor)
}
