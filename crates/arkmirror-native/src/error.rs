//! Consistency errors raised by the mirror layer.
//!
//! None of these are recoverable: they signal a host/native desync or a
//! programming error, and abort the current compilation attempt.

use arkmirror_diagnostics::{Diagnostic, DiagnosticCode};
use arkmirror_types::{describe_discriminant, Discriminant, NodeKind};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MirrorError {
    #[error("{operation}: null or dangling node handle")]
    InvalidHandle { operation: &'static str },

    #[error("{operation}: handle belongs to a native context that is gone")]
    StaleHandle { operation: &'static str },

    #[error("no wrapper registered for node kind {}", kind_name(.discriminant))]
    UnknownNodeKind { discriminant: Discriminant },

    #[error("expected {expected} node, found {}", kind_name(.actual))]
    KindMismatch {
        expected: NodeKind,
        actual: Discriminant,
    },

    #[error("{} nodes have no `{attribute}` attribute", kind_name(.kind))]
    UnsupportedAttribute {
        attribute: &'static str,
        kind: Discriminant,
    },

    #[error("{operation}: no program root has been committed")]
    MissingProgram { operation: &'static str },

    #[error("native context is full ({allocated} nodes)")]
    ArenaExhausted { allocated: usize },
}

pub type Result<T, E = MirrorError> = std::result::Result<T, E>;

fn kind_name(discriminant: &Discriminant) -> String {
    describe_discriminant(*discriminant)
}

impl MirrorError {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            MirrorError::InvalidHandle { .. } => DiagnosticCode::InvalidHandle,
            MirrorError::StaleHandle { .. } => DiagnosticCode::StaleHandle,
            MirrorError::UnknownNodeKind { .. } => DiagnosticCode::UnknownNodeKind,
            MirrorError::KindMismatch { .. } => DiagnosticCode::KindMismatch,
            MirrorError::UnsupportedAttribute { .. } => DiagnosticCode::UnsupportedAttribute,
            MirrorError::MissingProgram { .. } => DiagnosticCode::MissingProgram,
            MirrorError::ArenaExhausted { .. } => DiagnosticCode::ArenaExhausted,
        }
    }

    /// Render as a user-facing diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let builder = Diagnostic::new(self.code(), self.to_string());
        match self {
            MirrorError::UnknownNodeKind { .. } => builder
                .with_help("the host node-kind set is out of sync with the native compiler")
                .build(),
            MirrorError::StaleHandle { .. } => builder
                .with_help("wrappers must not outlive the compilation context that produced them")
                .build(),
            _ => builder.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_operation_and_kind() {
        let err = MirrorError::InvalidHandle {
            operation: "MemberExpression::update",
        };
        assert_eq!(
            err.to_string(),
            "MemberExpression::update: null or dangling node handle"
        );

        let err = MirrorError::KindMismatch {
            expected: NodeKind::Identifier,
            actual: NodeKind::MemberExpression.discriminant(),
        };
        assert_eq!(
            err.to_string(),
            "expected Identifier node, found MemberExpression (67)"
        );

        let err = MirrorError::UnknownNodeKind { discriminant: 4242 };
        assert_eq!(
            err.to_string(),
            "no wrapper registered for node kind <unknown> (4242)"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let diag = MirrorError::UnknownNodeKind { discriminant: 7777 }.to_diagnostic();
        assert_eq!(diag.code.as_str(), "M003");
        assert!(diag.is_error());
        assert!(diag.explanation.is_some());
    }
}
