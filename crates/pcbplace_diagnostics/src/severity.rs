//! How bad a diagnostic is.

use crate::code::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic, ordered from `Note` to `Error`.
///
/// An error always means the placement run failed. Warnings describe input
/// the placer worked around (a locked footprint, a clamped grid).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, e.g. a cancelled run.
    Note,
    /// The run continued with an adjusted input.
    Warning,
    /// The run failed.
    Error,
}

impl Severity {
    /// All severities, least severe first.
    pub const ALL: [Severity; 3] = [Severity::Note, Severity::Warning, Severity::Error];

    /// The severity implied by a code's category.
    pub const fn of(category: Category) -> Severity {
        match category {
            Category::Error => Severity::Error,
            Category::Warning => Severity::Warning,
            Category::Note => Severity::Note,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_category() {
        assert_eq!(Severity::of(Category::Error), Severity::Error);
        assert_eq!(Severity::of(Category::Warning), Severity::Warning);
        assert_eq!(Severity::of(Category::Note), Severity::Note);
    }

    #[test]
    fn ordered_and_indexed() {
        assert!(Severity::Note < Severity::Warning && Severity::Warning < Severity::Error);
        let idx: Vec<usize> = Severity::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn lowercase_in_json() {
        assert_eq!(serde_json::to_string(&Severity::Warning).unwrap(), "\"warning\"");
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
