//! Diagnostic sink backed by the `log` facade.

use crate::domain::diagnostic::Diagnostic;
use crate::ports::diagnostic_port::DiagnosticPort;
use log::Level;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnosticAdapter;

impl LogDiagnosticAdapter {
    pub fn level_for(diagnostic: &Diagnostic) -> Level {
        match diagnostic {
            Diagnostic::FetchFailed { .. } => Level::Error,
            d if d.is_data_problem() => Level::Warn,
            _ => Level::Info,
        }
    }
}

impl DiagnosticPort for LogDiagnosticAdapter {
    fn emit(&self, diagnostic: &Diagnostic) {
        log::log!(Self::level_for(diagnostic), "{}", diagnostic);
    }
}
