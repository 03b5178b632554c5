//! Diagnostic sink port.

use crate::domain::diagnostic::Diagnostic;

/// Receives screening diagnostics. Implementations must not influence the
/// screening outcome.
pub trait DiagnosticPort {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiagnostics;

impl DiagnosticPort for NullDiagnostics {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}
