//! Shared foundational types used across the pcbplace workspace.
//!
//! This crate provides the board length unit and the common internal result
//! type. Everything else builds on top of these.

#![warn(missing_docs)]

pub mod length;
pub mod result;

pub use length::{Length, ParseLengthError, NM_PER_INCH, NM_PER_MIL, NM_PER_MM, NM_PER_UM};
pub use result::{InternalError, PlaceResult};
