//! Plain text output formatter

use crate::types::AnalysisResults;
use std::collections::HashMap;

/// Format analysis results as plain text, one diagnostic per line.
pub fn format_text(results: &AnalysisResults) -> String {
    format_text_with_context(results, &HashMap::new())
}

/// Format analysis results as plain text, underlining the offending column
/// range with `^` beneath a line of source context when available.
pub fn format_text_with_context(
    results: &AnalysisResults,
    sources: &HashMap<String, String>,
) -> String {
    let mut out = Vec::new();

    for report in &results.reports {
        for d in &report.diagnostics {
            out.push(format!(
                "{}:{}:{}: {} [{}] {}",
                report.file, d.line, d.col_start, d.severity, d.rule, d.message
            ));

            if let Some(source) = sources.get(&report.file)
                && let Some(line_text) = source.lines().nth(d.line.saturating_sub(1))
            {
                out.push(format!("  {}", line_text));
                let width = d.col_end.saturating_sub(d.col_start).max(1);
                out.push(format!(
                    "  {}{}",
                    " ".repeat(d.col_start.saturating_sub(1)),
                    "^".repeat(width)
                ));
            }
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalyzeOptions, Diagnostic, Location, Severity};
    use std::sync::Arc;

    fn loc(line: usize) -> Location {
        Location {
            file: Arc::from("test.m"),
            line,
            col_start: 1,
            col_end: 2,
            line_text: Arc::from("x=1;"),
        }
    }

    #[test]
    fn test_format_text_empty() {
        let results = AnalysisResults::new();
        assert_eq!(format_text(&results), "");
    }

    #[test]
    fn test_format_text_with_errors() {
        use crate::engine::analyze;
        let options = AnalyzeOptions::new().with_string("test.m", "x=1;\n");
        let results = analyze(&options).unwrap();
        let output = format_text(&results);
        assert!(output.contains("test.m"));
    }

    #[test]
    fn test_format_text_underlines_context() {
        let mut results = AnalysisResults::new();
        results.reports.push(crate::types::FileReport {
            file: "test.m".to_string(),
            diagnostics: vec![Diagnostic::new(
                "whitespace_punctuation",
                "missing whitespace",
                &loc(1),
                Severity::Style,
            )],
            rewritten: None,
        });
        let mut sources = HashMap::new();
        sources.insert("test.m".to_string(), "x=1;\n".to_string());
        let output = format_text_with_context(&results, &sources);
        assert!(output.contains("x=1;"));
        assert!(output.contains('^'));
    }
}
