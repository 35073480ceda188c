//! Built-in rule implementations and factories.
//!
//! File- and line-scope rules are instantiable trait objects; token-scope
//! rules have no factory here because Stage 3 (`crate::stage3`) is the
//! single cohesive walk that implements every token-scope check directly,
//! gated by `RuleDescriptor`/`Config` rather than dispatched per-rule.

mod file;
mod line;

use crate::types::{BoxedFileRule, FileRule, LineRule};
use std::sync::Arc;

pub use file::{EofNewlines, FileLength};
pub use line::{ConsecutiveBlanks, LineLength, Tabs, TrailingWhitespace};

/// Every built-in `FileRule`, ready to use.
pub fn file_rules() -> Vec<BoxedFileRule> {
    vec![Arc::new(FileLength), Arc::new(EofNewlines)]
}

/// Factories for every built-in `LineRule` — a fresh instance per file,
/// since some (`ConsecutiveBlanks`) carry state across lines.
pub fn line_rule_factories() -> Vec<Box<dyn Fn() -> Box<dyn LineRule> + Send + Sync>> {
    vec![
        Box::new(|| Box::new(LineLength) as Box<dyn LineRule>),
        Box::new(|| Box::new(ConsecutiveBlanks::default()) as Box<dyn LineRule>),
        Box::new(|| Box::new(Tabs) as Box<dyn LineRule>),
        Box::new(|| Box::new(TrailingWhitespace) as Box<dyn LineRule>),
    ]
}

/// Find a built-in file rule by its descriptor name.
pub fn find_file_rule(name: &str) -> Option<BoxedFileRule> {
    file_rules().into_iter().find(|r| r.name() == name)
}
