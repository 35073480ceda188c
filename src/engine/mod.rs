//! Analysis engine — ties the lexer, parser, rule stages, and replayer into
//! the single entry point `analyze`.
//!
//! Per-file work is read sequentially (for accurate file-not-found
//! reporting) then processed in parallel with `rayon`; an async sibling
//! mirrors this with `tokio::spawn_blocking` for CPU-bound work, grounded
//! on the teacher's `lint::lint_sync`/`lint::lint_async` split.

use crate::config::Config;
use crate::lexer::{self, LexOptions};
use crate::parser;
use crate::rules;
use crate::stage3;
use crate::types::{
    AnalysisResults, AnalyzeOptions, Diagnostic, FileContext, FileReport, LineContext,
    MStyleError, Result, Severity,
};
use rayon::prelude::*;
use std::collections::HashSet;

/// Number of re-analyze/re-replay passes the CLI's fix-convergence loop
/// attempts before giving up on a stable fixed point.
pub const DEFAULT_FIX_PASSES: usize = 10;

/// Run Stage 1, Stage 2, the lexer/parser collaborators, Stage 3, and the
/// replayer over every file and in-memory string named in `options`.
pub fn analyze(options: &AnalyzeOptions) -> Result<AnalysisResults> {
    let config = resolve_config(options)?;
    let inputs = read_inputs(options)?;

    let reports: Vec<FileReport> = inputs
        .par_iter()
        .map(|(name, content)| analyze_one(name, content, &config, options))
        .collect();

    Ok(AnalysisResults { reports })
}

/// Async counterpart of [`analyze`]: files are read concurrently with
/// `tokio::fs`, then each analysis (CPU-bound) runs via `spawn_blocking`.
#[cfg(feature = "async")]
pub async fn analyze_async(options: &AnalyzeOptions) -> Result<AnalysisResults> {
    use std::sync::Arc;
    use tokio::fs;

    let config = Arc::new(resolve_config(options)?);

    let read_handles: Vec<_> = options
        .files
        .iter()
        .map(|path| {
            let path = path.clone();
            tokio::spawn(async move {
                let content = fs::read_to_string(&path)
                    .await
                    .map_err(|_| MStyleError::FileNotFound(path.clone()));
                (path, content)
            })
        })
        .collect();

    let mut inputs: Vec<(String, String)> = Vec::new();
    for handle in read_handles {
        let (path, content) = handle
            .await
            .map_err(|e| MStyleError::AsyncRuntime(format!("task join error: {e}")))?;
        inputs.push((path, content?));
    }
    for (name, content) in &options.strings {
        inputs.push((name.clone(), content.clone()));
    }

    let no_inline_config = options.no_inline_config;
    let custom_file_rules = options.custom_file_rules.clone();
    let custom_line_rules = options.custom_line_rules.clone();

    let handles: Vec<_> = inputs
        .into_iter()
        .map(|(name, content)| {
            let config = Arc::clone(&config);
            let custom_file_rules = custom_file_rules.clone();
            let custom_line_rules = custom_line_rules.clone();
            tokio::task::spawn_blocking(move || {
                analyze_text(&name, &content, &config, no_inline_config, &custom_file_rules, &custom_line_rules)
            })
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    for handle in handles {
        reports.push(
            handle
                .await
                .map_err(|e| MStyleError::AsyncRuntime(format!("task join error: {e}")))?,
        );
    }

    Ok(AnalysisResults { reports })
}

fn resolve_config(options: &AnalyzeOptions) -> Result<Config> {
    let config = options.config.clone().unwrap_or_default();
    config.resolve_extends()
}

fn read_inputs(options: &AnalyzeOptions) -> Result<Vec<(String, String)>> {
    let mut inputs = Vec::new();
    for path in &options.files {
        let content =
            std::fs::read_to_string(path).map_err(|_| MStyleError::FileNotFound(path.clone()))?;
        inputs.push((path.clone(), content));
    }
    for (name, content) in &options.strings {
        inputs.push((name.clone(), content.clone()));
    }
    Ok(inputs)
}

fn analyze_one(name: &str, content: &str, config: &Config, options: &AnalyzeOptions) -> FileReport {
    analyze_text(
        name,
        content,
        config,
        options.no_inline_config,
        &options.custom_file_rules,
        &options.custom_line_rules,
    )
}

/// Split `text` into physical lines the same way the lexer does: no phantom
/// trailing empty element when `text` ends in `\n`.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = text.split('\n').collect();
    if text.ends_with('\n') {
        lines.pop();
    }
    lines
}

fn analyze_text(
    name: &str,
    content: &str,
    config: &Config,
    no_inline_config: bool,
    custom_file_rules: &[crate::types::BoxedFileRule],
    custom_line_rules: &[crate::types::BoxedLineRuleFactory],
) -> FileReport {
    let mut diagnostics = Vec::new();

    let original_lines = split_lines(content);
    let file_ctx = FileContext {
        file: name,
        full_text: content,
        lines: &original_lines,
        config,
    };

    diagnostics.extend(run_file_rules(&file_ctx, custom_file_rules));
    diagnostics.extend(run_line_rules(&file_ctx, custom_line_rules));

    let corrected = apply_prelex_fixes(content, config);

    let lex_opts = LexOptions {
        octave: config.octave,
        tab_width: config.tab_width,
    };

    let mut tokens = match lexer::lex(name, &corrected, &lex_opts) {
        Ok(tokens) => tokens,
        Err(MStyleError::LexError { location, message }) => {
            diagnostics.push(Diagnostic::new(
                "lexer",
                message,
                &location,
                Severity::Error,
            ));
            return finish_report(name, content, &corrected, diagnostics, no_inline_config, &[]);
        }
        Err(_) => return finish_report(name, content, &corrected, diagnostics, no_inline_config, &[]),
    };

    let nodes = match parser::parse(&mut tokens) {
        Ok(parsed) => parsed.nodes,
        Err(_) => {
            for t in &mut tokens {
                t.ast_link = None;
            }
            Vec::new()
        }
    };

    let stage3_result = stage3::analyze(name, &mut tokens, &nodes, config);
    diagnostics.extend(stage3_result.diagnostics);

    finish_report(name, content, &corrected, diagnostics, no_inline_config, &tokens)
        .with_suppressed(stage3_result.suppressed_lines, no_inline_config)
}

fn finish_report(
    name: &str,
    original: &str,
    corrected: &str,
    mut diagnostics: Vec<Diagnostic>,
    _no_inline_config: bool,
    tokens: &[crate::types::Token],
) -> FileReport {
    // `tabs`/`trailing_whitespace`/`consecutive_blanks`/`eof_newlines` are
    // repaired by the unconditional pre-lex text passes rather than by a
    // token fix directive, so every diagnostic they raise is honored by
    // construction. Every other rule's `fixed` must point at an actual
    // directive the replayer acted on, per the fixed-diagnostic invariant.
    const TEXT_LEVEL_AUTOFIXED: &[&str] =
        &["tabs", "trailing_whitespace", "consecutive_blanks", "eof_newlines"];
    for d in &mut diagnostics {
        d.fixed = TEXT_LEVEL_AUTOFIXED.contains(&d.rule)
            || tokens.iter().any(|t| {
                t.location.line == d.line && t.location.col_start == d.col_start && !t.fix.is_empty()
            });
    }
    diagnostics.sort_by_key(|d| (d.line, d.col_start));

    let rewritten = if tokens.is_empty() {
        if corrected != original {
            Some(corrected.to_string())
        } else {
            None
        }
    } else {
        let replayed = crate::replay::replay(tokens);
        if replayed != original {
            Some(replayed)
        } else {
            None
        }
    };

    FileReport {
        file: name.to_string(),
        diagnostics,
        rewritten,
    }
}

fn run_file_rules(ctx: &FileContext, custom: &[crate::types::BoxedFileRule]) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for rule in rules::file_rules().iter().chain(custom) {
        if !rule_active(ctx.config, rule.name()) {
            continue;
        }
        for mut d in rule.check(ctx) {
            apply_severity_override(ctx.config, &mut d);
            out.push(d);
        }
    }
    out
}

fn run_line_rules(
    ctx: &FileContext,
    custom: &[crate::types::BoxedLineRuleFactory],
) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let factories = rules::line_rule_factories();
    let mut instances: Vec<Box<dyn crate::types::LineRule>> = factories.iter().map(|f| f()).collect();
    instances.extend(custom.iter().map(|f| (f.as_ref())()));

    instances.retain(|r| rule_active(ctx.config, r.name()));

    for (idx, line) in ctx.lines.iter().enumerate() {
        let line_ctx = LineContext {
            number: idx + 1,
            text: line,
            is_last: idx + 1 == ctx.lines.len(),
            config: ctx.config,
        };
        for rule in instances.iter_mut() {
            for mut d in rule.check_line(&line_ctx) {
                apply_severity_override(ctx.config, &mut d);
                out.push(d);
            }
        }
    }
    for rule in instances.iter_mut() {
        for mut d in rule.finish(ctx) {
            apply_severity_override(ctx.config, &mut d);
            out.push(d);
        }
    }
    out
}

fn rule_active(config: &Config, name: &str) -> bool {
    crate::types::find_rule(name)
        .map(|r| r.mandatory)
        .unwrap_or(false)
        || config.is_rule_enabled(name)
}

fn apply_severity_override(config: &Config, d: &mut Diagnostic) {
    if let Some(sev) = config.get_rule_severity(d.rule) {
        d.severity = sev;
    }
}

/// Apply the mandatory, always-on text-level fixes that run ahead of
/// lexing: tab expansion, trailing-whitespace trimming, consecutive-blank
/// collapsing, and the final end-of-file newline contract. Mirrors
/// `mh_style.py`'s own tab-correction step, which runs before the lexer
/// sees the text at all.
fn apply_prelex_fixes(content: &str, config: &Config) -> String {
    let expanded = lexer::correct_tabs(content, config.tab_width);
    let trimmed = strip_trailing_whitespace(&expanded);
    let limit = config.get_rule_param_usize("consecutive_blanks", "limit", 1);
    let collapsed = collapse_consecutive_blanks(&trimmed, limit);
    fix_eof_newline(&collapsed)
}

fn strip_trailing_whitespace(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let had_trailing_newline = text.ends_with('\n');
    let lines = split_lines(text);
    let mut out = lines
        .iter()
        .map(|l| l.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n");
    if had_trailing_newline {
        out.push('\n');
    }
    out
}

fn collapse_consecutive_blanks(text: &str, limit: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let had_trailing_newline = text.ends_with('\n');
    let lines = split_lines(text);
    let mut out_lines: Vec<&str> = Vec::with_capacity(lines.len());
    let mut run = 0usize;
    for line in &lines {
        if line.trim().is_empty() {
            run += 1;
            if run > limit {
                continue;
            }
        } else {
            run = 0;
        }
        out_lines.push(line);
    }
    let mut out = out_lines.join("\n");
    if had_trailing_newline {
        out.push('\n');
    }
    out
}

fn fix_eof_newline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let mut trimmed = text.trim_end_matches(['\n', ' ', '\t']).to_string();
    trimmed.push('\n');
    trimmed
}

impl FileReport {
    /// Drop diagnostics reported on a `mh:ignore_style`-justified line,
    /// unless the caller asked to bypass inline-config suppression.
    fn with_suppressed(mut self, suppressed: HashSet<usize>, no_inline_config: bool) -> Self {
        if no_inline_config || suppressed.is_empty() {
            return self;
        }
        self.diagnostics.retain(|d| !suppressed.contains(&d.line));
        self
    }
}
