//! Configuration parsing and management

pub mod presets;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::types::{Result, Severity};

/// Configuration for a style-checking run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default setting for all rules (true, false, or unset = rule's own
    /// default)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,

    /// Path to a config file to extend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Named preset to apply (e.g. `"octave"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    /// Maximum number of physical lines per file (`file_length` rule)
    #[serde(default = "default_file_length")]
    pub file_length: usize,

    /// Maximum number of characters per physical line (`line_length` rule)
    #[serde(default = "default_line_length")]
    pub line_length: usize,

    /// Number of spaces a tab expands to
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Accepted copyright holder names/aliases for the copyright-notice rule
    #[serde(default)]
    pub copyright_entity: Vec<String>,

    /// Whether embedded code samples inside comments must also carry a
    /// copyright notice
    #[serde(default)]
    pub copyright_in_embedded_code: bool,

    /// Enable the Octave dialect (`#`-led line comments, relaxed keyword set)
    #[serde(default)]
    pub octave: bool,

    /// Ignore `%#...` in-code pragma annotations when checking comment
    /// hygiene
    #[serde(default)]
    pub ignore_pragmas: bool,

    /// Per-rule configuration, addressed by `RuleDescriptor::name`
    #[serde(flatten)]
    pub rules: HashMap<String, RuleConfig>,
}

fn default_file_length() -> usize {
    10_000
}
fn default_line_length() -> usize {
    100
}
fn default_tab_width() -> usize {
    4
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default: None,
            extends: None,
            preset: None,
            file_length: default_file_length(),
            line_length: default_line_length(),
            tab_width: default_tab_width(),
            copyright_entity: Vec::new(),
            copyright_in_embedded_code: false,
            octave: false,
            ignore_pragmas: false,
            rules: HashMap::new(),
        }
    }
}

/// Configuration for an individual rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleConfig {
    /// Simple boolean (enabled/disabled)
    Enabled(bool),

    /// String severity (`"style"`, `"warning"`, or `"error"`)
    Severity(String),

    /// Detailed configuration with options (may include `"severity"` and/or
    /// `"enabled"` alongside rule-specific parameters)
    Options(HashMap<String, serde_json::Value>),
}

impl Config {
    /// Create a new, default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from a file, auto-detecting its format from the
    /// extension (falling back to trying each format in turn).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path.extension().and_then(|e| e.to_str());

        match ext {
            Some("json") => Self::from_json_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("toml") => Self::from_toml_file(path),
            _ => Self::from_json_file(path)
                .or_else(|_| Self::from_yaml_file(path))
                .or_else(|_| Self::from_toml_file(path)),
        }
    }

    /// Config file names to search for during auto-discovery.
    const DISCOVERY_NAMES: [&'static str; 5] = [
        ".mstyle.json",
        ".mstyle.yaml",
        ".mstyle.yml",
        ".mstyle.toml",
        ".mstylerc",
    ];

    /// Walk up from `start_dir` looking for a config file.
    pub fn discover(start_dir: impl AsRef<Path>) -> Option<Self> {
        let mut dir = start_dir.as_ref().to_path_buf();
        loop {
            for name in &Self::DISCOVERY_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file()
                    && let Ok(config) = Self::from_file(&candidate)
                {
                    return Some(config);
                }
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Apply the named preset (if any) as a base, then re-apply explicit
    /// rules on top (explicit config always wins over preset defaults).
    pub fn apply_preset(&mut self) {
        if let Some(ref name) = self.preset.clone()
            && let Some(mut base) = presets::resolve_preset(name)
        {
            base.merge(self.clone());
            *self = base;
            self.preset = Some(name.clone());
        }
    }

    /// Resolve the `extends` chain: load the parent config and merge self on
    /// top, then apply any named preset.
    pub fn resolve_extends(&self) -> Result<Self> {
        if let Some(ref extends_path) = self.extends {
            let parent = Config::from_file(extends_path)?;
            let mut resolved = parent.resolve_extends()?;
            resolved.merge(self.clone());
            resolved.extends = None;
            resolved.apply_preset();
            Ok(resolved)
        } else {
            let mut resolved = self.clone();
            resolved.apply_preset();
            Ok(resolved)
        }
    }

    /// Merge another configuration into this one; `other` wins on conflicts.
    pub fn merge(&mut self, other: Config) {
        if other.default.is_some() {
            self.default = other.default;
        }
        if other.file_length != default_file_length() {
            self.file_length = other.file_length;
        }
        if other.line_length != default_line_length() {
            self.line_length = other.line_length;
        }
        if other.tab_width != default_tab_width() {
            self.tab_width = other.tab_width;
        }
        if !other.copyright_entity.is_empty() {
            self.copyright_entity = other.copyright_entity;
        }
        self.copyright_in_embedded_code = other.copyright_in_embedded_code;
        self.octave = other.octave;
        self.ignore_pragmas = other.ignore_pragmas;
        self.rules.extend(other.rules);
    }

    /// Get effective configuration for a rule.
    pub fn get_rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Check if a rule is enabled. Mandatory rules (per `RuleDescriptor`)
    /// should be checked separately and always treated as enabled; this
    /// only reflects the user-facing enable/disable/default logic.
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        match self.get_rule_config(rule_name) {
            Some(RuleConfig::Enabled(enabled)) => *enabled,
            Some(RuleConfig::Severity(_)) => true,
            Some(RuleConfig::Options(opts)) => opts
                .get("enabled")
                .and_then(|v| v.as_bool())
                .unwrap_or(true),
            None => self.default.unwrap_or(true),
        }
    }

    /// Get the configured severity for a rule, if one is set explicitly.
    pub fn get_rule_severity(&self, rule_name: &str) -> Option<Severity> {
        match self.get_rule_config(rule_name) {
            Some(RuleConfig::Severity(s)) => parse_severity(s),
            Some(RuleConfig::Options(opts)) => opts
                .get("severity")
                .and_then(|v| v.as_str())
                .and_then(parse_severity),
            _ => None,
        }
    }

    /// Get a rule-specific usize parameter, falling back to `default` when
    /// unset or not an integer.
    pub fn get_rule_param_usize(&self, rule_name: &str, param: &str, default: usize) -> usize {
        match self.get_rule_config(rule_name) {
            Some(RuleConfig::Options(opts)) => opts
                .get(param)
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(default),
            _ => default,
        }
    }
}

fn parse_severity(s: &str) -> Option<Severity> {
    match s.to_lowercase().as_str() {
        "style" => Some(Severity::Style),
        "warning" | "warn" => Some(Severity::Warning),
        "error" => Some(Severity::Error),
        _ => None,
    }
}

/// Configuration parser trait for custom formats.
pub trait ConfigParser {
    /// Parse configuration from a string.
    fn parse(&self, content: &str) -> Result<Config>;
}
