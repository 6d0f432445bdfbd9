//! Diagnostic infrastructure for arkmirror.
//!
//! Every failure of the mirror layer is a consistency error that aborts
//! the current compilation attempt. This crate gives those failures a
//! stable code and renders them for humans or tools:
//! - Diagnostic codes with default severities
//! - A fluent builder for messages, help text and notes
//! - Terminal, JSON and plain-text emitters
//!
//! # Example
//!
//! ```
//! use arkmirror_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticEmitter, SimpleEmitter};
//!
//! let diag = Diagnostic::error(DiagnosticCode::UnknownNodeKind, "no wrapper for discriminant 4242")
//!     .with_note("operation: resolve")
//!     .build();
//!
//! let mut out = Vec::new();
//! SimpleEmitter::new(&mut out).emit(&diag).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("[M003]"));
//! ```

pub mod diagnostic;
pub mod emitter;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Diagnostics, Severity};
pub use emitter::{DiagnosticEmitter, JsonEmitter, SimpleEmitter, TerminalEmitter};
