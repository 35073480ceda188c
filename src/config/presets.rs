//! Named rule presets for common dialects and use cases.

use crate::config::{Config, RuleConfig};
use std::collections::HashMap;

/// Resolve a named preset to a `Config` overlay.
///
/// Returns `None` if the preset name is unknown.
pub fn resolve_preset(name: &str) -> Option<Config> {
    match name {
        "octave" => Some(octave_preset()),
        "strict" => Some(strict_preset()),
        _ => None,
    }
}

/// Returns a list of known preset names (for help text / `--list-presets`).
pub fn preset_names() -> &'static [&'static str] {
    &["octave", "strict"]
}

/// Octave preset — relaxes the dialect for `#`-led line comments and turns
/// on the `octave` flag consumed by the lexer.
fn octave_preset() -> Config {
    let mut config = Config::new();
    config.octave = true;
    config
}

/// Strict preset — turns on every optional (non-mandatory) rule at its
/// default parameters.
fn strict_preset() -> Config {
    let mut rules: HashMap<String, RuleConfig> = HashMap::new();
    for rule in crate::types::RULE_TABLE.iter().filter(|r| !r.mandatory) {
        rules.insert(rule.name.to_string(), RuleConfig::Enabled(true));
    }
    Config {
        rules,
        ..Config::new()
    }
}
