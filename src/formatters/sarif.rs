//! SARIF v2.1.0 output formatter

use crate::types::{AnalysisResults, Severity};

/// Convert a file path to a SARIF `artifactLocation.uri`.
///
/// Absolute paths become `file:///...` URIs; relative paths are kept as-is
/// (SARIF allows relative URIs resolved against `originalUriBaseIds`).
fn path_to_uri(path: &str) -> String {
    let p = std::path::Path::new(path);
    let is_abs = p.is_absolute() || path.starts_with('/');
    if is_abs {
        let encoded = path.replace('\\', "/").replace(' ', "%20");
        format!("file://{encoded}")
    } else {
        path.to_string()
    }
}

/// Format analysis results as SARIF v2.1.0 JSON.
pub fn format_sarif(results: &AnalysisResults) -> String {
    let mut sarif_results = Vec::new();
    let mut rule_map: std::collections::BTreeMap<&str, (usize, serde_json::Value)> =
        std::collections::BTreeMap::new();

    for report in &results.reports {
        let uri = path_to_uri(&report.file);

        for d in &report.diagnostics {
            let rule_index = if let Some((idx, _)) = rule_map.get(d.rule) {
                *idx
            } else {
                let idx = rule_map.len();
                let descriptor = crate::types::find_rule(d.rule);
                let rule_entry = serde_json::json!({
                    "id": d.rule,
                    "name": d.rule,
                    "shortDescription": {
                        "text": descriptor.map(|r| r.description).unwrap_or(d.rule)
                    },
                    "properties": {
                        "autofix": descriptor.map(|r| r.autofix).unwrap_or(false)
                    }
                });
                rule_map.insert(d.rule, (idx, rule_entry));
                idx
            };

            let level = match d.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Style => "note",
            };

            let result = serde_json::json!({
                "ruleId": d.rule,
                "ruleIndex": rule_index,
                "level": level,
                "message": { "text": d.message },
                "locations": [{
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": uri,
                            "uriBaseId": "%SRCROOT%"
                        },
                        "region": {
                            "startLine": d.line,
                            "startColumn": d.col_start,
                            "endColumn": d.col_end
                        }
                    }
                }]
            });

            sarif_results.push(result);
        }
    }

    let rules: Vec<_> = rule_map.into_values().map(|(_, v)| v).collect();

    let sarif = serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "mstyle",
                    "version": crate::VERSION,
                    "informationUri": "https://github.com/192d-Wing/mstyle",
                    "rules": rules
                }
            },
            "originalUriBaseIds": {
                "%SRCROOT%": { "uri": "file:///" }
            },
            "results": sarif_results
        }]
    });

    serde_json::to_string_pretty(&sarif)
        .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize SARIF: {}\"}}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::analyze;
    use crate::types::AnalyzeOptions;

    #[test]
    fn test_format_sarif_structure() {
        let options = AnalyzeOptions::new().with_string("test.m", "x=1;\n");
        let results = analyze(&options).unwrap();
        let output = format_sarif(&results);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["version"], "2.1.0");
        assert_eq!(parsed["runs"][0]["tool"]["driver"]["name"], "mstyle");
        assert!(!parsed["runs"][0]["results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_sarif_absolute_path_uses_file_uri() {
        let options = AnalyzeOptions::new().with_string("/home/user/docs/t.m", "x=1;\n");
        let results = analyze(&options).unwrap();
        let output = format_sarif(&results);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        let uri = parsed["runs"][0]["results"][0]["locations"][0]["physicalLocation"]
            ["artifactLocation"]["uri"]
            .as_str()
            .unwrap();
        assert!(uri.starts_with("file://"));
    }

    #[test]
    fn test_format_sarif_empty() {
        let results = AnalysisResults::new();
        let output = format_sarif(&results);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["runs"][0]["results"].as_array().unwrap().len(), 0);
        assert!(parsed["runs"][0]["originalUriBaseIds"].is_object());
    }
}
