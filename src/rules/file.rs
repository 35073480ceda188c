//! Stage-1 whole-file rules.

use crate::types::{Diagnostic, FileContext, FileRule, Location, Severity};
use std::sync::Arc;

/// `file_length` — limit the number of physical lines in a file.
pub struct FileLength;

impl FileRule for FileLength {
    fn name(&self) -> &'static str {
        "file_length"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        let limit = ctx.config.get_rule_param_usize("file_length", "limit", ctx.config.file_length);
        if ctx.lines.len() <= limit {
            return Vec::new();
        }
        let last_line = ctx.lines.len();
        let loc = Location {
            file: Arc::from(ctx.file),
            line: last_line,
            col_start: 1,
            col_end: 1,
            line_text: Arc::from(*ctx.lines.last().unwrap_or(&"")),
        };
        vec![Diagnostic::new(
            "file_length",
            format!("file has {} lines, exceeding the limit of {limit}", ctx.lines.len()),
            &loc,
            Severity::Style,
        )]
    }
}

/// `eof_newlines` — a file must end in exactly one newline: no trailing
/// blank lines, and a final newline must be present.
///
/// Resolves the EOF-newline Open Question (SPEC_FULL.md §9) against
/// `full_text`'s trailing bytes directly rather than a line splitter's
/// boundary convention.
pub struct EofNewlines;

impl FileRule for EofNewlines {
    fn name(&self) -> &'static str {
        "eof_newlines"
    }

    fn check(&self, ctx: &FileContext) -> Vec<Diagnostic> {
        if ctx.full_text.is_empty() {
            return Vec::new();
        }

        let last_line_no = ctx.lines.len().max(1);
        let loc = |line: usize| Location {
            file: Arc::from(ctx.file),
            line,
            col_start: 1,
            col_end: 1,
            line_text: Arc::from(*ctx.lines.get(line.saturating_sub(1)).unwrap_or(&"")),
        };

        if !ctx.full_text.ends_with('\n') {
            return vec![Diagnostic::new(
                "eof_newlines",
                "file must end with a newline",
                &loc(last_line_no),
                Severity::Style,
            )];
        }

        let trailing_blanks = ctx
            .lines
            .iter()
            .rev()
            .take_while(|l| l.trim().is_empty())
            .count();
        if trailing_blanks > 0 {
            return vec![Diagnostic::new(
                "eof_newlines",
                "file must not end with blank lines",
                &loc(last_line_no),
                Severity::Style,
            )];
        }

        Vec::new()
    }
}
