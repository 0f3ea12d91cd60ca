//! Labels that annotate board locations within a diagnostic.

use crate::location::Location;
use serde::{Deserialize, Serialize};

/// The visual style of a diagnostic label.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// The primary label highlighting the main problem location.
    Primary,
    /// A secondary label providing additional context.
    Secondary,
}

/// An annotated board location within a diagnostic.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// The location this label annotates.
    pub location: Location,
    /// The message displayed next to the location.
    pub message: String,
    /// Whether this is a primary or secondary label.
    pub style: LabelStyle,
}

impl Label {
    /// Creates a primary label (the main problem location).
    pub fn primary(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    /// Creates a secondary label (additional context).
    pub fn secondary(location: Location, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_label() {
        let label = Label::primary(Location::footprint("U1"), "no free cell");
        assert_eq!(label.style, LabelStyle::Primary);
        assert_eq!(label.message, "no free cell");
    }

    #[test]
    fn secondary_label() {
        let label = Label::secondary(Location::NONE, "board outline");
        assert_eq!(label.style, LabelStyle::Secondary);
    }
}
