//! Stable diagnostic codes such as `E302` or `W301`.

use crate::severity::Severity;
use serde::{Serialize, Serializer};
use std::fmt;

/// Code family; the prefix letter and the implied severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    /// `E`: the run failed.
    Error,
    /// `W`: the run adjusted its input.
    Warning,
    /// `N`: informational.
    Note,
}

impl Category {
    fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Note => 'N',
        }
    }
}

/// A category letter plus a three-digit number.
///
/// Placement codes live in the 3xx range. Codes serialize as their display
/// string so JSON reports carry `"E302"` rather than a nested object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DiagnosticCode {
    /// Code family.
    pub category: Category,
    /// Number within the family.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// Severity a diagnostic with this code is reported at.
    pub const fn severity(self) -> Severity {
        Severity::of(self.category)
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
