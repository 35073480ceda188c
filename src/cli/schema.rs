//! `--generate-schema` handler — emit a JSON Schema for mstyle config files

use mstyle::types::RULE_TABLE;

/// Generate a JSON Schema for the mstyle configuration file.
///
/// Describes the top-level config keys (`default`, `extends`, `preset`,
/// `file_length`, `line_length`, `tab_width`, `copyright_entity`, `octave`,
/// `ignore_pragmas`) plus every rule name as a known property.
pub(crate) fn generate_config_schema() -> String {
    let mut rule_props = serde_json::Map::new();
    for rule in RULE_TABLE {
        let prop = serde_json::json!({
            "description": format!(
                "{}{}",
                rule.description,
                if rule.autofix { " [auto-fixable]" } else { "" }
            ),
            "oneOf": [
                { "type": "boolean", "description": "Enable or disable the rule" },
                {
                    "type": "string",
                    "enum": ["style", "warning", "error"],
                    "description": "Set severity level"
                },
                {
                    "type": "object",
                    "description": "Rule-specific options",
                    "additionalProperties": true
                }
            ]
        });
        rule_props.insert(rule.name.to_string(), prop);
    }

    let mut properties = serde_json::Map::new();
    properties.insert(
        "default".to_string(),
        serde_json::json!({
            "description": "Default enabled/disabled state for all rules not explicitly configured",
            "type": "boolean"
        }),
    );
    properties.insert(
        "extends".to_string(),
        serde_json::json!({
            "description": "Path to another config file to extend",
            "type": "string"
        }),
    );
    properties.insert(
        "preset".to_string(),
        serde_json::json!({
            "description": "Named preset to apply",
            "type": "string",
            "enum": ["octave", "strict"]
        }),
    );
    properties.insert(
        "file_length".to_string(),
        serde_json::json!({ "description": "Maximum physical lines per file", "type": "integer" }),
    );
    properties.insert(
        "line_length".to_string(),
        serde_json::json!({ "description": "Maximum characters per physical line", "type": "integer" }),
    );
    properties.insert(
        "tab_width".to_string(),
        serde_json::json!({ "description": "Number of spaces a tab expands to", "type": "integer" }),
    );
    properties.insert(
        "copyright_entity".to_string(),
        serde_json::json!({
            "description": "Accepted copyright holder names/aliases",
            "type": "array",
            "items": { "type": "string" }
        }),
    );
    properties.insert(
        "octave".to_string(),
        serde_json::json!({ "description": "Enable the Octave dialect", "type": "boolean" }),
    );
    properties.insert(
        "ignore_pragmas".to_string(),
        serde_json::json!({
            "description": "Ignore %#... in-code pragma annotations when checking comment hygiene",
            "type": "boolean"
        }),
    );
    for (k, v) in rule_props {
        properties.insert(k, v);
    }

    let final_schema = serde_json::json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "mstyle configuration",
        "description": "Configuration file for mstyle (https://github.com/192d-Wing/mstyle)",
        "type": "object",
        "properties": serde_json::Value::Object(properties),
        "additionalProperties": {
            "description": "Rule name (true/false/severity/options)",
            "oneOf": [
                { "type": "boolean" },
                { "type": "string", "enum": ["style", "warning", "error"] },
                { "type": "object", "additionalProperties": true }
            ]
        }
    });

    serde_json::to_string_pretty(&final_schema)
        .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}
