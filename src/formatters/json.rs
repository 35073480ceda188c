//! JSON output formatter

use crate::types::AnalysisResults;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct JsonReport<'a> {
    results: BTreeMap<&'a str, &'a [crate::types::Diagnostic]>,
}

/// Format analysis results as JSON, keyed by file name.
pub fn format_json(results: &AnalysisResults) -> String {
    let report = JsonReport {
        results: results
            .reports
            .iter()
            .map(|r| (r.file.as_str(), r.diagnostics.as_slice()))
            .collect(),
    };
    serde_json::to_string_pretty(&report)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize results: {}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analyze;
    use crate::types::AnalyzeOptions;

    #[test]
    fn test_format_json_empty() {
        let results = AnalysisResults::new();
        let output = format_json(&results);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["results"].is_object());
    }

    #[test]
    fn test_format_json_with_errors() {
        let options = AnalyzeOptions::new().with_string("test.m", "x=1;\n");
        let results = analyze(&options).unwrap();
        let output = format_json(&results);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let diagnostics = &parsed["results"]["test.m"];
        assert!(diagnostics.as_array().unwrap().len() > 0);
        assert_eq!(diagnostics[0]["line"], 1);
    }
}
