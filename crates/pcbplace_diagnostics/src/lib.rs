//! Diagnostic creation, severity management, and terminal rendering.
//!
//! This crate provides structured [`Diagnostic`] messages with severity levels,
//! codes, board locations and labels. The thread-safe [`DiagnosticSink`]
//! accumulates diagnostics during a placement run, and [`TerminalRenderer`]
//! formats them for the command line. JSON output goes through `serde`.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod location;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use location::Location;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
