//! Rule traits and the compile-time rule registry

use crate::config::Config;
use crate::types::Diagnostic;
use std::sync::Arc;

/// Read-only view of a whole file, passed to `FileRule` and to line-rule
/// construction.
pub struct FileContext<'a> {
    /// File name as given on the command line / in the request
    pub file: &'a str,
    /// Full file contents, unmodified
    pub full_text: &'a str,
    /// Physical lines, without line endings
    pub lines: &'a [&'a str],
    /// Effective configuration
    pub config: &'a Config,
}

/// A single physical line, passed to `LineRule::check_line`.
pub struct LineContext<'a> {
    /// 1-based line number
    pub number: usize,
    /// Line text, without line ending
    pub text: &'a str,
    /// True when this is the file's last physical line
    pub is_last: bool,
    /// Effective configuration
    pub config: &'a Config,
}

/// A rule that inspects the file as a whole (Stage 1).
pub trait FileRule: Send + Sync {
    /// Stable rule name, matching a `RuleDescriptor::name` entry
    fn name(&self) -> &'static str;
    /// Run the check, returning zero or more diagnostics
    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic>;
}

/// A rule that inspects physical lines one at a time, carrying state across
/// lines within one file (Stage 2). A fresh instance is created per file.
pub trait LineRule: Send + Sync {
    /// Stable rule name, matching a `RuleDescriptor::name` entry
    fn name(&self) -> &'static str;
    /// Inspect one line, returning zero or more diagnostics
    fn check_line(&mut self, ctx: &LineContext) -> Vec<Diagnostic>;
    /// Called once after the last line, for rules whose violations can only
    /// be determined at end-of-file (e.g. a trailing run of blank lines)
    fn finish(&mut self, _ctx: &FileContext) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Which analysis stage a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Stage 1: whole-file rules
    File,
    /// Stage 2: per-line, stateful rules
    Line,
    /// Stage 3: token-buffer rules, dispatched from the single analyzer
    /// function rather than through a trait object
    Token,
}

/// A parameter a rule accepts, with its default value.
#[derive(Debug, Clone, Copy)]
pub struct RuleParameter {
    /// Parameter name as it appears in config and `--<rule>-<name>` flags
    pub name: &'static str,
    /// Default value
    pub default: ParamDefault,
}

/// Default value for a rule parameter (kept const-constructible).
#[derive(Debug, Clone, Copy)]
pub enum ParamDefault {
    /// An unsigned integer default
    Usize(usize),
    /// A boolean default
    Bool(bool),
    /// A string default
    Str(&'static str),
}

/// Static metadata describing one rule, independent of whether it is
/// currently enabled.
#[derive(Debug, Clone, Copy)]
pub struct RuleDescriptor {
    /// Stable, unique rule name (e.g. `"trailing_whitespace"`)
    pub name: &'static str,
    /// One-line description, shown by `--list-rules` and `--explain`
    pub description: &'static str,
    /// Which analysis stage the rule belongs to
    pub scope: RuleScope,
    /// Whether the rule is always active regardless of config
    pub mandatory: bool,
    /// Whether `--fix` can automatically repair violations
    pub autofix: bool,
    /// Rule-specific parameters and their defaults
    pub parameters: &'static [RuleParameter],
}

/// The compile-time table of every rule this crate knows about.
///
/// File- and line-scope rules are additionally backed by a constructor in
/// `crate::rules::file_rule_factories` / `crate::rules::line_rule_factories`.
/// Token-scope entries describe the (single, monolithic) Stage-3 analyzer's
/// checks purely for config/listing/schema purposes — Stage 3 is never
/// dispatched through a trait object.
pub static RULE_TABLE: &[RuleDescriptor] = &[
    RuleDescriptor {
        name: "file_length",
        description: "Limit the number of physical lines in a file",
        scope: RuleScope::File,
        mandatory: false,
        autofix: false,
        parameters: &[RuleParameter {
            name: "limit",
            default: ParamDefault::Usize(10_000),
        }],
    },
    RuleDescriptor {
        name: "eof_newlines",
        description: "A file must end in exactly one newline",
        scope: RuleScope::File,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "line_length",
        description: "Limit the number of characters on a physical line",
        scope: RuleScope::Line,
        mandatory: false,
        autofix: false,
        parameters: &[RuleParameter {
            name: "limit",
            default: ParamDefault::Usize(100),
        }],
    },
    RuleDescriptor {
        name: "consecutive_blanks",
        description: "Limit the number of consecutive blank lines",
        scope: RuleScope::Line,
        mandatory: true,
        autofix: true,
        parameters: &[RuleParameter {
            name: "limit",
            default: ParamDefault::Usize(1),
        }],
    },
    RuleDescriptor {
        name: "tabs",
        description: "Tabs must be expanded to spaces",
        scope: RuleScope::Line,
        mandatory: true,
        autofix: true,
        parameters: &[RuleParameter {
            name: "tab_width",
            default: ParamDefault::Usize(4),
        }],
    },
    RuleDescriptor {
        name: "trailing_whitespace",
        description: "Lines must not end in whitespace",
        scope: RuleScope::Line,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "copyright_notice",
        description: "The file must carry a recognised copyright header",
        scope: RuleScope::Token,
        mandatory: false,
        autofix: false,
        parameters: &[RuleParameter {
            name: "entity",
            default: ParamDefault::Str(""),
        }],
    },
    RuleDescriptor {
        name: "whitespace_punctuation",
        description: "Commas, colons, assignments, and brackets must be \
                       surrounded by the expected whitespace",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "whitespace_keywords",
        description: "Reserved words must be surrounded by whitespace",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "annotation_whitespace",
        description: "In-code annotations must be preceded by whitespace",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "whitespace_comments",
        description: "Comments must start with whitespace or a block \
                       delimiter and contain sane content",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "whitespace_continuation",
        description: "A line continuation must be preceded by whitespace",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "operator_after_continuation",
        description: "A binary operator should not start the line a \
                       continuation joins onto",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: false,
        parameters: &[],
    },
    RuleDescriptor {
        name: "useless_continuation",
        description: "A continuation followed by a blank line, a comment, \
                       or a statement terminator serves no purpose",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "dangerous_continuation",
        description: "A continuation directly after a statement \
                       terminator is dangerously misleading",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "operator_whitespace",
        description: "Binary operators need surrounding whitespace; unary \
                       and power operators must not",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "no_starting_newline",
        description: "A file must not begin with a blank line",
        scope: RuleScope::Token,
        mandatory: true,
        autofix: true,
        parameters: &[],
    },
    RuleDescriptor {
        name: "indentation",
        description: "Statements must be indented according to block \
                       nesting depth",
        scope: RuleScope::Token,
        mandatory: false,
        autofix: true,
        parameters: &[RuleParameter {
            name: "indent_width",
            default: ParamDefault::Usize(4),
        }],
    },
];

/// Look up a rule descriptor by name (case-insensitive).
pub fn find_rule(name: &str) -> Option<&'static RuleDescriptor> {
    RULE_TABLE
        .iter()
        .find(|r| r.name.eq_ignore_ascii_case(name))
}

/// A type-erased custom file rule supplied through `AnalyzeOptions`.
pub type BoxedFileRule = Arc<dyn FileRule>;
/// A type-erased custom line rule factory supplied through `AnalyzeOptions`.
pub type BoxedLineRuleFactory = Arc<dyn Fn() -> Box<dyn LineRule> + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_no_duplicate_names() {
        let mut names: Vec<&str> = RULE_TABLE.iter().map(|r| r.name).collect();
        names.sort_unstable();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn find_rule_is_case_insensitive() {
        assert!(find_rule("TRAILING_WHITESPACE").is_some());
        assert!(find_rule("trailing_whitespace").is_some());
        assert!(find_rule("nonexistent").is_none());
    }

    #[test]
    fn mandatory_rules_have_no_disable_path_assumptions() {
        let mandatory: Vec<_> = RULE_TABLE.iter().filter(|r| r.mandatory).collect();
        assert!(!mandatory.is_empty());
    }
}
