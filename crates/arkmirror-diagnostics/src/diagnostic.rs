//! Diagnostic types for mirror-layer failures and driver warnings.

use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational hint
    Hint,
    /// Warning (the run continues)
    Warning,
    /// Error (the compilation attempt is aborted)
    Error,
}

impl Severity {
    /// Get the string representation for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Hint => "hint",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // Mirror consistency errors (M001-M099)
    /// Null or out-of-range handle where a live node was required
    InvalidHandle,
    /// Handle belonging to a torn-down or different native context
    StaleHandle,
    /// Native discriminant with no host wrapper
    UnknownNodeKind,
    /// Wrapper built over a handle of an incompatible kind
    KindMismatch,
    /// Post-construction attribute set on a kind that lacks it
    UnsupportedAttribute,
    /// No program root has been committed
    MissingProgram,
    /// Native arena ran out of addressable node slots
    ArenaExhausted,

    // Input errors (L001-L099)
    /// Malformed tree dump
    MalformedDump,
    /// Tree dump whose root is not a module
    NotAModule,

    // Driver warnings (W001-W099)
    /// Input directory contained no tree dumps
    NoInputs,
    /// Pipeline rerun reallocated nodes
    NotAFixedPoint,

    // Configuration (C001-C099)
    /// Configuration file could not be read or parsed
    InvalidConfig,

    // Internal errors (I001-I099)
    /// Internal error
    InternalError,
}

impl DiagnosticCode {
    /// All codes, in display order
    pub const ALL: &'static [DiagnosticCode] = &[
        Self::InvalidHandle,
        Self::StaleHandle,
        Self::UnknownNodeKind,
        Self::KindMismatch,
        Self::UnsupportedAttribute,
        Self::MissingProgram,
        Self::ArenaExhausted,
        Self::MalformedDump,
        Self::NotAModule,
        Self::NoInputs,
        Self::NotAFixedPoint,
        Self::InvalidConfig,
        Self::InternalError,
    ];

    /// Get the error code string (e.g., "M001").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidHandle => "M001",
            Self::StaleHandle => "M002",
            Self::UnknownNodeKind => "M003",
            Self::KindMismatch => "M004",
            Self::UnsupportedAttribute => "M005",
            Self::MissingProgram => "M006",
            Self::ArenaExhausted => "M007",

            Self::MalformedDump => "L001",
            Self::NotAModule => "L002",

            Self::NoInputs => "W001",
            Self::NotAFixedPoint => "W002",

            Self::InvalidConfig => "C001",

            Self::InternalError => "I001",
        }
    }

    /// Look a code up by its string form (case-insensitive).
    pub fn parse(code: &str) -> Option<DiagnosticCode> {
        let upper = code.to_ascii_uppercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == upper)
    }

    /// Get the default severity for this code.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::InvalidHandle
            | Self::StaleHandle
            | Self::UnknownNodeKind
            | Self::KindMismatch
            | Self::UnsupportedAttribute
            | Self::MissingProgram
            | Self::ArenaExhausted
            | Self::MalformedDump
            | Self::NotAModule
            | Self::InvalidConfig
            | Self::InternalError => Severity::Error,

            Self::NotAFixedPoint => Severity::Warning,

            Self::NoInputs => Severity::Hint,
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A diagnostic with a code, a message and optional context.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Unique code
    pub code: DiagnosticCode,
    /// Severity level
    pub severity: Severity,
    /// Short message (single line)
    pub message: String,
    /// Longer explanation (optional)
    pub explanation: Option<String>,
    /// Where the failure was observed (input file, pass name)
    pub origin: Option<String>,
    /// Additional context lines (operation, node kind, ...)
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, Severity::Warning, message)
    }

    /// Create a new hint diagnostic.
    pub fn hint(code: DiagnosticCode, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, Severity::Hint, message)
    }

    /// Create a diagnostic with the code's default severity.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code, code.default_severity(), message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }

    pub fn is_hint(&self) -> bool {
        self.severity == Severity::Hint
    }
}

/// Builder for constructing diagnostics fluently.
pub struct DiagnosticBuilder {
    inner: Diagnostic,
}

impl DiagnosticBuilder {
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            inner: Diagnostic {
                code,
                severity,
                message: message.into(),
                explanation: None,
                origin: None,
                notes: Vec::new(),
            },
        }
    }

    /// Add help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.inner.explanation = Some(help.into());
        self
    }

    /// Record where the diagnostic was produced.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.inner.origin = Some(origin.into());
        self
    }

    /// Add a context note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.inner.notes.push(note.into());
        self
    }

    /// Build the diagnostic.
    pub fn build(self) -> Diagnostic {
        self.inner
    }
}

/// Collection of diagnostics with summary statistics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(diagnostics);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_warning()).count()
    }

    pub fn hint_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_hint()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings_unique() {
        let mut codes: Vec<&str> = DiagnosticCode::ALL.iter().map(|c| c.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), DiagnosticCode::ALL.len());
    }

    #[test]
    fn test_parse_code() {
        assert_eq!(DiagnosticCode::parse("m003"), Some(DiagnosticCode::UnknownNodeKind));
        assert_eq!(DiagnosticCode::parse("X999"), None);
    }

    #[test]
    fn test_builder_and_counts() {
        let mut diags = Diagnostics::new();
        diags.push(
            Diagnostic::new(DiagnosticCode::KindMismatch, "expected Identifier")
                .with_origin("main.json")
                .with_note("operation: Identifier::from_raw")
                .build(),
        );
        diags.push(Diagnostic::new(DiagnosticCode::NotAFixedPoint, "rerun changed 2 nodes").build());

        assert!(diags.has_errors());
        assert_eq!(diags.error_count(), 1);
        assert_eq!(diags.warning_count(), 1);
        let first = diags.iter().next().unwrap();
        assert_eq!(first.origin.as_deref(), Some("main.json"));
        assert_eq!(first.notes.len(), 1);
    }
}
