//! GitHub Actions workflow command formatter
//!
//! Outputs diagnostics as GitHub Actions annotation commands:
//! `::error file={file},line={line},col={col},endLine={line},endColumn={endCol},title={rule}::{message}`
//!
//! These are picked up by GitHub Actions runners and displayed as PR
//! annotations in the Files Changed view.

use crate::types::{AnalysisResults, Severity};

/// Format analysis results as GitHub Actions workflow annotation commands.
pub fn format_github(results: &AnalysisResults) -> String {
    let mut lines: Vec<String> = Vec::new();

    for report in &results.reports {
        for d in &report.diagnostics {
            let level = match d.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Style => "notice",
            };

            lines.push(format!(
                "::{level} file={},line={},col={},endLine={},endColumn={},title={}::{}",
                report.file, d.line, d.col_start, d.line, d.col_end, d.rule, d.message
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analyze;
    use crate::types::AnalyzeOptions;

    #[test]
    fn test_format_github_error() {
        let options = AnalyzeOptions::new().with_string("foo.m", "x=1;\n");
        let results = analyze(&options).unwrap();
        let output = format_github(&results);
        assert!(output.contains("file=foo.m"));
        assert!(output.contains("line=1"));
    }

    #[test]
    fn test_format_github_empty() {
        let results = AnalysisResults::new();
        assert_eq!(format_github(&results), "");
    }
}
