//! Diagnostics returned by read functions

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single problem reported to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
}

/// Ordered list of diagnostics; a read succeeds unless one is an error
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Append a warning
    pub fn warn(&mut self, summary: impl Into<String>) {
        self.push(Diagnostic {
            severity: Severity::Warning,
            summary: summary.into(),
        });
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summaries: Vec<&str> = self.0.iter().map(|d| d.summary.as_str()).collect();
        write!(f, "{}", summaries.join("; "))
    }
}

/// Wrap an error as a single error diagnostic
pub fn diag_from_err(err: impl fmt::Display) -> Diagnostics {
    Diagnostics(vec![Diagnostic {
        severity: Severity::Error,
        summary: err.to_string(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diag_from_err() {
        let diags = diag_from_err("getting network failed: timeout");
        assert!(diags.has_error());
        assert_eq!(diags.to_string(), "getting network failed: timeout");
    }

    #[test]
    fn test_warnings_are_not_errors() {
        let mut diags = Diagnostics::new();
        diags.warn("utilization not reported");
        assert!(!diags.is_empty());
        assert!(!diags.has_error());
    }

    #[test]
    fn test_serializes_for_the_host() {
        let mut diags = diag_from_err("getting network failed: timeout");
        diags.warn("network network/abc has no CIDR, est_available_ip not computed");

        assert_eq!(
            serde_json::to_value(&diags).unwrap(),
            serde_json::json!([
                { "severity": "error", "summary": "getting network failed: timeout" },
                {
                    "severity": "warning",
                    "summary": "network network/abc has no CIDR, est_available_ip not computed"
                }
            ])
        );
    }
}
