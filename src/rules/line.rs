//! Stage-2 per-line rules. Each is constructed fresh for every file so any
//! internal state (e.g. a run-length counter) never leaks between files.

use crate::types::{Diagnostic, FileContext, LineContext, LineRule, Location, Severity};
use std::sync::Arc;

/// `line_length` — limit the number of characters on a physical line.
#[derive(Default)]
pub struct LineLength;

impl LineRule for LineLength {
    fn name(&self) -> &'static str {
        "line_length"
    }

    fn check_line(&mut self, ctx: &LineContext) -> Vec<Diagnostic> {
        let limit = ctx
            .config
            .get_rule_param_usize("line_length", "limit", ctx.config.line_length);
        let len = ctx.text.chars().count();
        if len <= limit {
            return Vec::new();
        }
        let loc = Location {
            file: Arc::from(""),
            line: ctx.number,
            col_start: limit + 1,
            col_end: len + 1,
            line_text: Arc::from(ctx.text),
        };
        vec![Diagnostic::new(
            "line_length",
            format!("line has {len} characters, exceeding the limit of {limit}"),
            &loc,
            Severity::Style,
        )]
    }
}

/// `consecutive_blanks` — limit the number of consecutive blank lines.
/// Stateful: tracks the current run length across `check_line` calls.
#[derive(Default)]
pub struct ConsecutiveBlanks {
    run: usize,
}

impl LineRule for ConsecutiveBlanks {
    fn name(&self) -> &'static str {
        "consecutive_blanks"
    }

    fn check_line(&mut self, ctx: &LineContext) -> Vec<Diagnostic> {
        let limit = ctx
            .config
            .get_rule_param_usize("consecutive_blanks", "limit", 1);
        if ctx.text.trim().is_empty() {
            self.run += 1;
            if self.run == limit + 1 {
                let loc = Location {
                    file: Arc::from(""),
                    line: ctx.number,
                    col_start: 1,
                    col_end: 1,
                    line_text: Arc::from(""),
                };
                return vec![Diagnostic::new(
                    "consecutive_blanks",
                    format!("more than {limit} consecutive blank line(s)"),
                    &loc,
                    Severity::Style,
                )];
            }
        } else {
            self.run = 0;
        }
        Vec::new()
    }
}

/// `tabs` — tabs must be expanded to spaces.
///
/// Detection only; the actual rewrite is a direct text-level transform
/// (`crate::lexer::correct_tabs`) the engine applies before lexing, mirroring
/// `mh_style.py`'s own "tab correction" step that runs ahead of the lexer
/// rather than through the token-buffer replayer.
#[derive(Default)]
pub struct Tabs;

impl LineRule for Tabs {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn check_line(&mut self, ctx: &LineContext) -> Vec<Diagnostic> {
        if !ctx.text.contains('\t') {
            return Vec::new();
        }
        let col = ctx.text.find('\t').unwrap() + 1;
        let loc = Location {
            file: Arc::from(""),
            line: ctx.number,
            col_start: col,
            col_end: col + 1,
            line_text: Arc::from(ctx.text),
        };
        vec![Diagnostic::new(
            "tabs",
            "tab character must be expanded to spaces",
            &loc,
            Severity::Style,
        )]
    }
}

/// `trailing_whitespace` — lines must not end in whitespace.
#[derive(Default)]
pub struct TrailingWhitespace;

impl LineRule for TrailingWhitespace {
    fn name(&self) -> &'static str {
        "trailing_whitespace"
    }

    fn check_line(&mut self, ctx: &LineContext) -> Vec<Diagnostic> {
        let trimmed = ctx.text.trim_end();
        if trimmed.len() == ctx.text.len() {
            return Vec::new();
        }
        let col = trimmed.chars().count() + 1;
        let loc = Location {
            file: Arc::from(""),
            line: ctx.number,
            col_start: col,
            col_end: ctx.text.chars().count() + 1,
            line_text: Arc::from(ctx.text),
        };
        vec![Diagnostic::new(
            "trailing_whitespace",
            "line has trailing whitespace",
            &loc,
            Severity::Style,
        )]
    }
}

/// No-op `finish` default is used by every rule above except
/// `ConsecutiveBlanks`, whose violation, once the threshold is crossed, is
/// reported immediately rather than held until end of file — included here
/// so `FileContext` stays a documented part of the trait's contract.
#[allow(dead_code)]
fn _finish_contract(_ctx: &FileContext) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn lc<'a>(number: usize, text: &'a str, config: &'a Config, is_last: bool) -> LineContext<'a> {
        LineContext {
            number,
            text,
            is_last,
            config,
        }
    }

    #[test]
    fn line_length_flags_long_line() {
        let mut config = Config::new();
        config.line_length = 5;
        let mut rule = LineLength;
        let diags = rule.check_line(&lc(1, "abcdefgh", &config, false));
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn line_length_allows_short_line() {
        let config = Config::new();
        let mut rule = LineLength;
        assert!(rule.check_line(&lc(1, "short", &config, false)).is_empty());
    }

    #[test]
    fn consecutive_blanks_flags_after_limit() {
        let config = Config::new();
        let mut rule = ConsecutiveBlanks::default();
        assert!(rule.check_line(&lc(1, "", &config, false)).is_empty());
        let diags = rule.check_line(&lc(2, "", &config, false));
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn consecutive_blanks_resets_on_content() {
        let config = Config::new();
        let mut rule = ConsecutiveBlanks::default();
        rule.check_line(&lc(1, "", &config, false));
        rule.check_line(&lc(2, "x", &config, false));
        assert!(rule.check_line(&lc(3, "", &config, false)).is_empty());
    }

    #[test]
    fn tabs_rule_flags_tab() {
        let config = Config::new();
        let mut rule = Tabs;
        assert_eq!(rule.check_line(&lc(1, "a\tb", &config, false)).len(), 1);
        assert!(rule.check_line(&lc(1, "a b", &config, false)).is_empty());
    }

    #[test]
    fn trailing_whitespace_detects_spaces() {
        let config = Config::new();
        let mut rule = TrailingWhitespace;
        assert_eq!(rule.check_line(&lc(1, "a  ", &config, false)).len(), 1);
        assert!(rule.check_line(&lc(1, "a", &config, false)).is_empty());
    }
}
