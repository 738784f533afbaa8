//! Error adapter for converting Brickdraw errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Import warnings
//! are rendered the same way, with warning severity.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, Severity};

use brickdraw::{BrickdrawError, ImportWarning};

/// Adapter for [`BrickdrawError`] values.
pub struct ErrorAdapter<'a>(pub &'a BrickdrawError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BrickdrawError::Io(_) => "brickdraw::io",
            BrickdrawError::Rdf(_) => "brickdraw::rdf",
            BrickdrawError::Catalog(_) => "brickdraw::catalog",
            BrickdrawError::Connection(_) => "brickdraw::connection",
            BrickdrawError::Config(_) => "brickdraw::config",
            BrickdrawError::Extract(_) => "brickdraw::extract",
            BrickdrawError::Export(_) => "brickdraw::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            BrickdrawError::Rdf(_) => "the input must be a Turtle document",
            BrickdrawError::Config(_) => {
                "check the configuration file, or remove it to use the defaults"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// Adapter for a single [`ImportWarning`].
pub struct WarningAdapter<'a>(pub &'a ImportWarning);

impl fmt::Debug for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for WarningAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for WarningAdapter<'_> {}

impl MietteDiagnostic for WarningAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("brickdraw::import"))
    }

    fn severity(&self) -> Option<Severity> {
        Some(Severity::Warning)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            ImportWarning::UnknownEntityType { .. } => {
                "only types from the entity library can be placed"
            }
            ImportWarning::DuplicateInstance { .. } => {
                "the existing entity was kept; start a new document to reload it"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable problem that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A failure that stopped the run.
    Error(ErrorAdapter<'a>),
    /// A record the import skipped or repaired.
    Warning(WarningAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Error(e) => fmt::Display::fmt(e, f),
            Reportable::Warning(w) => fmt::Display::fmt(w, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Error(e) => e.source(),
            Reportable::Warning(_) => None,
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.code(),
            Reportable::Warning(w) => w.code(),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Reportable::Error(e) => e.severity(),
            Reportable::Warning(w) => w.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Error(e) => e.help(),
            Reportable::Warning(w) => w.help(),
        }
    }
}

/// Convert a [`BrickdrawError`] into a reportable error.
pub fn to_reportable(err: &BrickdrawError) -> Reportable<'_> {
    Reportable::Error(ErrorAdapter(err))
}

/// Convert import warnings into reportables, one per warning.
pub fn warnings_to_reportables(warnings: &[ImportWarning]) -> Vec<Reportable<'_>> {
    warnings
        .iter()
        .map(|warning| Reportable::Warning(WarningAdapter(warning)))
        .collect()
}

#[cfg(test)]
mod tests {
    use brickdraw::vocab::BRICK;

    use super::*;

    #[test]
    fn test_error_code_and_help() {
        let err = BrickdrawError::Config("bad grid".to_string());
        let reportable = to_reportable(&err);

        assert_eq!(reportable.to_string(), "Configuration error: bad grid");
        assert_eq!(
            reportable.code().map(|code| code.to_string()).as_deref(),
            Some("brickdraw::config")
        );
        assert!(reportable.help().is_some());
        assert_eq!(reportable.severity(), None);
    }

    #[test]
    fn test_warnings_are_separate_reportables() {
        let warnings = vec![
            ImportWarning::DuplicateInstance {
                subject: BRICK.iri("Valve"),
            },
            ImportWarning::UnknownRelationship {
                record: "_:c0".to_string(),
            },
        ];
        let reportables = warnings_to_reportables(&warnings);

        assert_eq!(reportables.len(), 2);
        assert!(
            reportables
                .iter()
                .all(|r| r.severity() == Some(Severity::Warning))
        );
        assert!(reportables[0].help().is_some());
        assert!(reportables[1].help().is_none());
        assert_eq!(
            reportables[1].to_string(),
            "connection record _:c0 has no recognized relationship type"
        );
    }
}
