use arkmirror_ast::MirrorError;
use arkmirror_diagnostics::{Diagnostic, DiagnosticCode};
use arkmirror_types::NodeKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed tree dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Mirror(#[from] MirrorError),

    #[error("tree dump root is a {found} node, expected ETSModule")]
    NotAModule { found: NodeKind },
}

impl LoadError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LoadError::Json(err) => Diagnostic::new(DiagnosticCode::MalformedDump, self.to_string())
                .with_note(format!("line {}, column {}", err.line(), err.column()))
                .build(),
            LoadError::Mirror(err) => err.to_diagnostic(),
            LoadError::NotAModule { .. } => {
                Diagnostic::new(DiagnosticCode::NotAModule, self.to_string())
                    .with_help("dump a whole program, not a subtree")
                    .build()
            }
        }
    }
}
