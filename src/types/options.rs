//! Options for configuring analysis runs

use crate::config::Config;
use crate::types::{BoxedFileRule, BoxedLineRuleFactory};
use std::collections::HashMap;

/// Options for analyzing source files.
#[derive(Default)]
pub struct AnalyzeOptions {
    /// Files to analyze (paths)
    pub files: Vec<String>,

    /// In-memory sources to analyze, keyed by a display name
    pub strings: HashMap<String, String>,

    /// Effective configuration; `Config::default()` when `None`
    pub config: Option<Config>,

    /// Additional file-scope rules beyond the built-in table
    pub custom_file_rules: Vec<BoxedFileRule>,

    /// Additional line-scope rule factories beyond the built-in table
    pub custom_line_rules: Vec<BoxedLineRuleFactory>,

    /// When true, `mh:ignore_style` justification markers are ignored and
    /// every diagnostic is reported regardless of suppression comments
    pub no_inline_config: bool,
}

impl AnalyzeOptions {
    /// Create a new, empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to analyze.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Add an in-memory source to analyze.
    pub fn with_string(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.strings.insert(name.into(), content.into());
        self
    }

    /// Set the effective configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Disable `mh:ignore_style` justification-marker suppression.
    pub fn no_inline_config(mut self) -> Self {
        self.no_inline_config = true;
        self
    }
}
