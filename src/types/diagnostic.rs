//! Diagnostic and severity types

use crate::types::Location;
use serde::Serialize;
use std::fmt;

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Purely cosmetic / whitespace-level finding
    Style,
    /// Non-fatal but notable finding
    Warning,
    /// Serious finding (mandatory rule violation)
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Style => write!(f, "style"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single reported style violation.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Which rule produced this diagnostic
    pub rule: &'static str,
    /// Human-readable message
    pub message: String,
    /// Where in the source this applies
    #[serde(skip)]
    pub location: Location,
    /// Reported severity
    pub severity: Severity,
    /// True once the engine has applied this diagnostic's fix directive
    pub fixed: bool,
    /// 1-based line number, flattened for formatters that don't want the
    /// full `Location`
    pub line: usize,
    /// 1-based, inclusive start column
    pub col_start: usize,
    /// 1-based, exclusive end column
    pub col_end: usize,
}

impl Diagnostic {
    /// Build a diagnostic from a token's location.
    pub fn new(
        rule: &'static str,
        message: impl Into<String>,
        location: &Location,
        severity: Severity,
    ) -> Self {
        Self {
            rule,
            message: message.into(),
            location: location.clone(),
            severity,
            fixed: false,
            line: location.line,
            col_start: location.col_start,
            col_end: location.col_end,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.location.file, self.line, self.severity, self.rule, self.message
        )
    }
}

/// All diagnostics produced for a single source file.
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    /// File name as given on the command line / in the request
    pub file: String,
    /// Emitted diagnostics, in emission order
    pub diagnostics: Vec<Diagnostic>,
    /// The (possibly rewritten) file contents, when `--fix` was requested
    pub rewritten: Option<String>,
}

impl FileReport {
    /// Number of `Severity::Error` diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Number of `Severity::Warning` diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// True if no diagnostics were reported at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Results for a batch of files, keyed by file name.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResults {
    /// Per-file reports, in the order files were submitted
    pub reports: Vec<FileReport>,
}

impl AnalysisResults {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total diagnostics across every file.
    pub fn total_diagnostics(&self) -> usize {
        self.reports.iter().map(|r| r.diagnostics.len()).sum()
    }

    /// Total `Severity::Error` diagnostics across every file.
    pub fn error_count(&self) -> usize {
        self.reports.iter().map(FileReport::error_count).sum()
    }

    /// True if every file's report is empty.
    pub fn is_empty(&self) -> bool {
        self.reports.iter().all(FileReport::is_empty)
    }

    /// Files that have at least one diagnostic.
    pub fn files_with_diagnostics(&self) -> Vec<&str> {
        self.reports
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.file.as_str())
            .collect()
    }
}
