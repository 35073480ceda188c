//! Stage 3 — the single, cohesive token-buffer analyzer.
//!
//! Grounded directly on `mh_style.py`'s `stage_3_analysis()`: one pass over
//! the token buffer implementing every token-scope check, gated per-check by
//! `Config`/`RuleDescriptor::mandatory` rather than dispatched through a
//! trait object (see `crate::types::rule::RULE_TABLE`'s token-scope entries
//! and `DESIGN.md`).

use crate::config::Config;
use crate::parser::AstNode;
use crate::types::{Diagnostic, Severity, Token, TokenKind};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Reserved words that must be surrounded by whitespace (a subset of
/// `crate::lexer::KEYWORDS` — control-flow and declaration keywords that
/// read naturally as standalone words; block terminators like `end` are
/// included, loop/condition sub-keywords like `case` too).
pub const KEYWORDS_WITH_WS: &[&str] = &[
    "case", "catch", "classdef", "elseif", "for", "function", "global", "if", "parfor",
    "persistent", "switch", "while", "properties", "methods", "events",
];

/// Operators that bind tightly and must NOT be surrounded by whitespace
/// (power and transpose).
const TIGHT_OPERATORS: &[&str] = &["^", ".^", "'", ".'"];

static JUSTIFICATION_MARKER: &str = "mh:ignore_style";

static COPYRIGHT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\(c\) )?Copyright (\d{4}-)?\d{4} *(?P<org>.*)").unwrap()
});

static PRAGMA_HASH_SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^%# +[a-zA-Z]").unwrap());
static PRAGMA_SPACE_HASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^% +#[a-zA-Z]").unwrap());

/// Result of a Stage-3 pass: the diagnostics it produced, plus the set of
/// physical lines a `mh:ignore_style` justification comment suppresses.
#[derive(Debug, Default)]
pub struct Stage3Result {
    /// Diagnostics produced, in emission order
    pub diagnostics: Vec<Diagnostic>,
    /// Lines suppressed by a justification comment
    pub suppressed_lines: HashSet<usize>,
}

/// Run the Stage-3 analyzer over `tokens`, mutating each token's `fix`
/// in place and returning the diagnostics/justifications collected.
///
/// `nodes` is the arena produced by `crate::parser::parse` for the same
/// token buffer (empty if parsing failed — indentation checking is then
/// skipped, since every `ast_link` is `None` in that degraded mode).
pub fn analyze(file: &str, tokens: &mut [Token], nodes: &[AstNode], config: &Config) -> Stage3Result {
    let mut result = Stage3Result::default();

    collect_justifications(tokens, &mut result.suppressed_lines);
    check_copyright_notice(file, tokens, config, &mut result.diagnostics);
    check_no_starting_newline(tokens, config, &mut result.diagnostics);

    for i in 0..tokens.len() {
        if tokens[i].anonymous {
            continue;
        }
        match tokens[i].kind {
            TokenKind::Comma | TokenKind::Colon | TokenKind::Assignment => {
                check_punctuation(tokens, i, config, &mut result.diagnostics)
            }
            TokenKind::Bra | TokenKind::ABra | TokenKind::MBra => {
                check_opening_bracket(tokens, i, config, &mut result.diagnostics)
            }
            TokenKind::Ket | TokenKind::AKet | TokenKind::MKet => {
                check_closing_bracket(tokens, i, config, &mut result.diagnostics)
            }
            TokenKind::Keyword => check_keyword(tokens, i, config, &mut result.diagnostics),
            TokenKind::Annotation => {
                check_annotation(tokens, i, config, &mut result.diagnostics)
            }
            // The lexer does not yet emit a distinct `Annotation` kind for
            // `%#pragma`-style comments; until it does, annotation spacing
            // is checked by inspecting `Comment` tokens whose raw text
            // starts with the annotation leader.
            TokenKind::Comment if tokens[i].raw_text.starts_with("%#") => {
                check_annotation(tokens, i, config, &mut result.diagnostics);
                check_comment(tokens, i, config, &mut result.diagnostics);
            }
            TokenKind::Comment => check_comment(tokens, i, config, &mut result.diagnostics),
            TokenKind::Continuation => {
                check_whitespace_continuation(tokens, i, config, &mut result.diagnostics);
                check_operator_after_continuation(tokens, i, config, &mut result.diagnostics);
                check_useless_continuation(tokens, i, config, &mut result.diagnostics);
                check_dangerous_continuation(tokens, i, config, &mut result.diagnostics);
            }
            TokenKind::Operator => check_operator(tokens, i, config, &mut result.diagnostics),
            _ => {}
        }
    }

    check_indentation(tokens, nodes, config, &mut result.diagnostics);

    result
}

fn collect_justifications(tokens: &[Token], suppressed: &mut HashSet<usize>) {
    for t in tokens {
        if t.kind == TokenKind::Comment && t.raw_text.contains(JUSTIFICATION_MARKER) {
            suppressed.insert(t.location.line);
        }
    }
}

fn check_no_starting_newline(tokens: &mut [Token], config: &Config, out: &mut Vec<Diagnostic>) {
    if !config.is_rule_enabled("no_starting_newline") && !rule_mandatory("no_starting_newline") {
        return;
    }
    let flagged = tokens
        .first()
        .map(|first| first.kind == TokenKind::Newline && first.location.line_text.is_empty())
        .unwrap_or(false);
    if flagged {
        out.push(Diagnostic::new(
            "no_starting_newline",
            "file must not start with a blank line",
            &tokens[0].location,
            Severity::Style,
        ));
        tokens[0].fix.delete = true;
    }
}

fn check_copyright_notice(file: &str, tokens: &[Token], config: &Config, out: &mut Vec<Diagnostic>) {
    if !config.is_rule_enabled("copyright_notice") {
        return;
    }
    let header: Vec<&Token> = tokens
        .iter()
        .take_while(|t| matches!(t.kind, TokenKind::Comment | TokenKind::Newline))
        .filter(|t| t.kind == TokenKind::Comment)
        .collect();

    let loc = match tokens.first() {
        Some(t) => t.location.clone(),
        None => return,
    };

    // Scenario 1: no leading comment block at all.
    if header.is_empty() {
        out.push(Diagnostic::new(
            "copyright_notice",
            format!("{file} is missing a copyright header"),
            &loc,
            Severity::Style,
        ));
        return;
    }

    // Scenarios 2/3: a conforming "Copyright YYYY <org>" line somewhere in
    // the header. Entity membership here is exact and case-sensitive.
    for c in &header {
        if let Some(caps) = COPYRIGHT_RE.captures(&c.raw_text) {
            let org = caps.name("org").map(|m| m.as_str().trim()).unwrap_or("");
            if config.copyright_entity.is_empty()
                || config.copyright_entity.iter().any(|e| e == org)
            {
                return;
            }
            out.push(Diagnostic::new(
                "copyright_notice",
                format!(
                    "Copyright does not mention one of {}",
                    config.copyright_entity.join(" or ")
                ),
                &c.location,
                Severity::Style,
            ));
            return;
        }
    }

    // Scenario 4: no conforming header, but something that looks like a
    // botched attempt at one (mentions a configured entity, "(c)", or
    // "copyright", case-insensitively).
    for c in &header {
        let text_lower = c.raw_text.to_lowercase();
        let entity_hit = config
            .copyright_entity
            .iter()
            .any(|e| text_lower.contains(&e.to_lowercase()));
        if entity_hit || text_lower.contains("(c)") || text_lower.contains("copyright") {
            out.push(Diagnostic::new(
                "copyright_notice",
                format!("{file}'s copyright header does not conform to the expected format"),
                &c.location,
                Severity::Style,
            ));
            return;
        }
    }

    // Scenario 5: a leading comment block that doesn't mention copyright at all.
    out.push(Diagnostic::new(
        "copyright_notice",
        format!("{file}'s leading comment block does not mention a copyright"),
        &loc,
        Severity::Style,
    ));
}

fn check_punctuation(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "whitespace_punctuation") {
        return;
    }
    let t = &tokens[i];
    let loc = t.location.clone();
    let kind = t.kind;
    let ws_before = t.ws_before.clone();
    let ws_after = t.ws_after.clone();
    let next_is_closer = tokens
        .get(i + 1)
        .map(|n| matches!(n.kind, TokenKind::Ket | TokenKind::AKet | TokenKind::MKet))
        .unwrap_or(false);
    let at_line_end = tokens
        .get(i + 1)
        .map(|n| matches!(n.kind, TokenKind::Newline | TokenKind::Comment | TokenKind::Continuation))
        .unwrap_or(true);

    match kind {
        TokenKind::Comma => {
            if !ws_before.is_empty() {
                out.push(Diagnostic::new(
                    "whitespace_punctuation",
                    "no whitespace expected before ','",
                    &loc,
                    Severity::Style,
                ));
                tokens[i].fix.ensure_trim_before = true;
            }
            if ws_after.is_empty() && !next_is_closer && !at_line_end {
                out.push(Diagnostic::new(
                    "whitespace_punctuation",
                    "expected whitespace after ','",
                    &loc,
                    Severity::Style,
                ));
                tokens[i].fix.ensure_ws_after = true;
            }
        }
        // A colon directly preceded by a comma on the same line (e.g.
        // `a(1, :)`) is the comma rule's concern, not the colon rule's;
        // checking both here fights over the same whitespace and never
        // converges under `--fix`.
        TokenKind::Colon
            if i > 0
                && tokens[i - 1].kind == TokenKind::Comma
                && tokens[i - 1].location.line == loc.line => {}
        TokenKind::Colon => {
            if !ws_before.is_empty() {
                tokens[i].fix.ensure_trim_before = true;
                out.push(Diagnostic::new(
                    "whitespace_punctuation",
                    "no whitespace expected before ':'",
                    &loc,
                    Severity::Style,
                ));
            }
            if !ws_after.is_empty() && !at_line_end {
                tokens[i].fix.ensure_trim_after = true;
                out.push(Diagnostic::new(
                    "whitespace_punctuation",
                    "no whitespace expected after ':'",
                    &loc,
                    Severity::Style,
                ));
            }
        }
        TokenKind::Assignment => {
            if ws_before.is_empty() {
                tokens[i].fix.ensure_ws_before = true;
                out.push(Diagnostic::new(
                    "whitespace_punctuation",
                    "expected whitespace before '='",
                    &loc,
                    Severity::Style,
                ));
            }
            if ws_after.is_empty() && !at_line_end {
                tokens[i].fix.ensure_ws_after = true;
                out.push(Diagnostic::new(
                    "whitespace_punctuation",
                    "expected whitespace after '='",
                    &loc,
                    Severity::Style,
                ));
            }
        }
        _ => {}
    }
}

fn check_opening_bracket(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "whitespace_punctuation") {
        return;
    }
    // A continuation right after the bracket (`f( ...\n  1)`) is a
    // legitimate line-continued call, not stray whitespace to trim.
    let next_is_continuation = tokens
        .get(i + 1)
        .map(|n| n.kind == TokenKind::Continuation)
        .unwrap_or(false);
    if next_is_continuation {
        return;
    }
    let ws_after = tokens[i].ws_after.clone();
    if !ws_after.is_empty() {
        tokens[i].fix.ensure_trim_after = true;
        out.push(Diagnostic::new(
            "whitespace_punctuation",
            "no whitespace expected after opening bracket",
            &tokens[i].location,
            Severity::Style,
        ));
    }
}

fn check_closing_bracket(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "whitespace_punctuation") {
        return;
    }
    let ws_before = tokens[i].ws_before.clone();
    let prev_is_open = i > 0
        && matches!(
            tokens[i - 1].kind,
            TokenKind::Bra | TokenKind::ABra | TokenKind::MBra
        );
    if !ws_before.is_empty() && !prev_is_open {
        tokens[i].fix.ensure_trim_before = true;
        out.push(Diagnostic::new(
            "whitespace_punctuation",
            "no whitespace expected before closing bracket",
            &tokens[i].location,
            Severity::Style,
        ));
    }
}

fn check_keyword(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "whitespace_keywords") {
        return;
    }
    let kw = tokens[i].value.clone().unwrap_or_default();
    if !KEYWORDS_WITH_WS.contains(&kw.as_str()) {
        return;
    }
    let ws_before = tokens[i].ws_before.clone();
    let ws_after = tokens[i].ws_after.clone();
    let next_is_punct = tokens
        .get(i + 1)
        .map(|n| matches!(n.kind, TokenKind::Bra | TokenKind::SemiColon | TokenKind::Comma))
        .unwrap_or(false);
    let at_line_end = tokens
        .get(i + 1)
        .map(|n| matches!(n.kind, TokenKind::Newline | TokenKind::Comment))
        .unwrap_or(true);

    if ws_before.is_empty() && !tokens[i].first_in_line {
        tokens[i].fix.ensure_ws_before = true;
        out.push(Diagnostic::new(
            "whitespace_keywords",
            format!("expected whitespace before '{kw}'"),
            &tokens[i].location,
            Severity::Style,
        ));
    }
    if ws_after.is_empty() && !at_line_end && !next_is_punct {
        tokens[i].fix.ensure_ws_after = true;
        out.push(Diagnostic::new(
            "whitespace_keywords",
            format!("expected whitespace after '{kw}'"),
            &tokens[i].location,
            Severity::Style,
        ));
    }
}

fn check_annotation(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "annotation_whitespace") {
        return;
    }
    if tokens[i].ws_before.is_empty() && !tokens[i].first_in_line {
        tokens[i].fix.ensure_ws_before = true;
        out.push(Diagnostic::new(
            "annotation_whitespace",
            "annotation must be preceded by whitespace",
            &tokens[i].location,
            Severity::Style,
        ));
    }
}

fn check_comment(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "whitespace_comments") {
        return;
    }
    if tokens[i].block_comment {
        return;
    }
    // `%|` marks an unprocessed internal pragma; never touched by style
    // checking.
    if tokens[i].raw_text.starts_with("%|") {
        return;
    }
    if config.ignore_pragmas
        && tokens[i].raw_text.trim_start_matches(['%', '#']).starts_with('#')
    {
        return;
    }

    // A pragma annotation (`%#foo`) must have no whitespace between the
    // leader and `#`, and none between `#` and its name; both malformed
    // variants are auto-corrected into the canonical form.
    if PRAGMA_HASH_SPACE_RE.is_match(&tokens[i].raw_text) {
        let rest = tokens[i].raw_text[2..].trim_start().to_string();
        tokens[i].raw_text = format!("%#{rest}");
        out.push(Diagnostic::new(
            "whitespace_comments",
            "pragma annotation must not have whitespace after '%#'",
            &tokens[i].location,
            Severity::Style,
        ));
        return;
    }
    if PRAGMA_SPACE_HASH_RE.is_match(&tokens[i].raw_text) {
        let rest = tokens[i]
            .raw_text
            .trim_start_matches('%')
            .trim_start()
            .to_string();
        tokens[i].raw_text = format!("%{rest}");
        out.push(Diagnostic::new(
            "whitespace_comments",
            "pragma annotation must not have whitespace before '#'",
            &tokens[i].location,
            Severity::Style,
        ));
        return;
    }

    // A comment sharing a line with preceding code needs a space of its own.
    if !tokens[i].first_in_line && tokens[i].ws_before.is_empty() {
        tokens[i].fix.ensure_ws_before = true;
        out.push(Diagnostic::new(
            "whitespace_comments",
            "expected whitespace before comment",
            &tokens[i].location,
            Severity::Style,
        ));
    }

    let body = tokens[i].raw_text.trim_start_matches(['%', '#']);
    if body.is_empty() {
        return;
    }
    if !body.starts_with(' ') && !body.starts_with('!') {
        out.push(Diagnostic::new(
            "whitespace_comments",
            "comment text should start with a space after the leader",
            &tokens[i].location,
            Severity::Style,
        ));
    }
}

/// `whitespace_continuation` — a continuation must be preceded by one
/// space, same as any other token that isn't first on its line.
fn check_whitespace_continuation(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "whitespace_continuation") {
        return;
    }
    if tokens[i].ws_before.is_empty() && !tokens[i].first_in_line {
        tokens[i].fix.ensure_ws_before = true;
        out.push(Diagnostic::new(
            "whitespace_continuation",
            "expected one space of whitespace before '...'",
            &tokens[i].location,
            Severity::Style,
        ));
    }
}

/// `operator_after_continuation` — a binary operator starting the line a
/// continuation joins onto reads as though it belongs to the next
/// statement; flagged but not auto-fixed, since there's no single correct
/// rewrite.
fn check_operator_after_continuation(tokens: &[Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "operator_after_continuation") {
        return;
    }
    if let Some(next) = tokens.get(i + 1)
        && next.first_in_line
        && next.kind == TokenKind::Operator
        && next.fix.binary_operator
    {
        out.push(Diagnostic::new(
            "operator_after_continuation",
            "binary operator should not start the line a continuation joins onto",
            &next.location,
            Severity::Style,
        ));
    }
}

/// `useless_continuation` — a continuation joining onto nothing (a blank
/// line, a comment) or following a statement that already terminated
/// serves no purpose.
fn check_useless_continuation(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "useless_continuation") {
        return;
    }
    let joins_nothing = tokens
        .get(i + 1)
        .map(|next| {
            (next.kind == TokenKind::Newline && next.location.line_text.trim().is_empty())
                || next.kind == TokenKind::Comment
        })
        .unwrap_or(false);
    if joins_nothing {
        out.push(Diagnostic::new(
            "useless_continuation",
            "useless line continuation before a blank line or comment",
            &tokens[i].location,
            Severity::Style,
        ));
        tokens[i].fix.replace_with_newline = true;
        return;
    }
    if i > 0 && tokens[i - 1].fix.statement_terminator {
        out.push(Diagnostic::new(
            "useless_continuation",
            "continuation immediately follows a statement terminator",
            &tokens[i].location,
            Severity::Style,
        ));
        tokens[i].fix.delete = true;
    }
}

/// `dangerous_continuation` — a continuation directly following a
/// statement-terminator-shaped token on the same physical line (`x = 1;
/// ...`) reads as though it continues the statement it actually ends.
fn check_dangerous_continuation(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "dangerous_continuation") {
        return;
    }
    if i > 0
        && tokens[i - 1].fix.flag_continuations
        && tokens[i - 1].location.line == tokens[i].location.line
    {
        tokens[i].fix.replace_with_newline = true;
        out.push(Diagnostic::new(
            "dangerous_continuation",
            "this continuation is dangerously misleading",
            &tokens[i].location,
            Severity::Style,
        ));
    }
}

fn check_operator(tokens: &mut [Token], i: usize, config: &Config, out: &mut Vec<Diagnostic>) {
    if !enabled_or_mandatory(config, "operator_whitespace") {
        return;
    }
    let op = tokens[i].value.clone().unwrap_or_default();
    let ws_before = tokens[i].ws_before.clone();
    let ws_after = tokens[i].ws_after.clone();
    let at_line_end = tokens
        .get(i + 1)
        .map(|n| matches!(n.kind, TokenKind::Newline | TokenKind::Comment | TokenKind::Continuation))
        .unwrap_or(true);

    if TIGHT_OPERATORS.contains(&op.as_str()) {
        if !ws_before.is_empty() && op != "^" && op != ".^" {
            tokens[i].fix.ensure_trim_before = true;
            out.push(Diagnostic::new(
                "operator_whitespace",
                format!("no whitespace expected before '{op}'"),
                &tokens[i].location,
                Severity::Style,
            ));
        }
        if !ws_after.is_empty() {
            tokens[i].fix.ensure_trim_after = true;
            out.push(Diagnostic::new(
                "operator_whitespace",
                format!("no whitespace expected after '{op}'"),
                &tokens[i].location,
                Severity::Style,
            ));
        }
        return;
    }

    if tokens[i].fix.unary_operator {
        if !ws_after.is_empty() {
            tokens[i].fix.ensure_trim_after = true;
            out.push(Diagnostic::new(
                "operator_whitespace",
                format!("no whitespace expected between unary '{op}' and its operand"),
                &tokens[i].location,
                Severity::Style,
            ));
        }
        return;
    }

    // Binary operator: needs whitespace on both sides.
    if ws_before.is_empty() {
        tokens[i].fix.ensure_ws_before = true;
        out.push(Diagnostic::new(
            "operator_whitespace",
            format!("expected whitespace before binary '{op}'"),
            &tokens[i].location,
            Severity::Style,
        ));
    }
    if ws_after.is_empty() && !at_line_end {
        tokens[i].fix.ensure_ws_after = true;
        out.push(Diagnostic::new(
            "operator_whitespace",
            format!("expected whitespace after binary '{op}'"),
            &tokens[i].location,
            Severity::Style,
        ));
    }
}

fn check_indentation(tokens: &mut [Token], nodes: &[AstNode], config: &Config, out: &mut Vec<Diagnostic>) {
    if !config.is_rule_enabled("indentation") {
        return;
    }
    let indent_width = config.get_rule_param_usize("indentation", "indent_width", 4);

    for i in 0..tokens.len() {
        if tokens[i].anonymous || !tokens[i].first_in_line {
            continue;
        }

        let expected_cols = if tokens[i].first_in_statement {
            let Some(node_idx) = tokens[i].ast_link else {
                continue;
            };
            let Some(node) = nodes.get(node_idx) else {
                continue;
            };
            node.get_indentation() * indent_width
        } else {
            // A physical line that continues a statement begun earlier
            // (a `...` continuation, or an unfinished bracket list):
            // indent relative to the column the statement itself started
            // at, not to the block's own nesting depth.
            let anchor = tokens[i].statement_start_col as isize;
            let mut offset = tokens[i].location.col_start as isize - anchor;
            if offset <= 0 {
                offset = (indent_width / 2) as isize;
            }
            tokens[i].current_indent * indent_width + offset as usize
        };

        let actual = tokens[i]
            .location
            .line_text
            .chars()
            .take_while(|c| *c == ' ')
            .count();
        if actual != expected_cols {
            tokens[i].fix.correct_indent = Some(expected_cols);
            out.push(Diagnostic::new(
                "indentation",
                format!("expected {expected_cols} columns of indentation, found {actual}"),
                &tokens[i].location,
                Severity::Style,
            ));
        }
    }
}

fn enabled_or_mandatory(config: &Config, rule: &str) -> bool {
    rule_mandatory(rule) || config.is_rule_enabled(rule)
}

fn rule_mandatory(rule: &str) -> bool {
    crate::types::find_rule(rule).map(|r| r.mandatory).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{LexOptions, lex};
    use crate::parser::parse;

    fn run(src: &str, config: &Config) -> Stage3Result {
        let mut tokens = lex("t.m", src, &LexOptions::default()).unwrap();
        let parsed = parse(&mut tokens).unwrap_or_default();
        analyze("t.m", &mut tokens, &parsed.nodes, config)
    }

    #[test]
    fn flags_missing_space_after_comma() {
        let config = Config::new();
        let r = run("x = [1,2];\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "whitespace_punctuation"));
    }

    #[test]
    fn clean_comma_spacing_is_quiet() {
        let config = Config::new();
        let r = run("x = [1, 2];\n", &config);
        assert!(!r.diagnostics.iter().any(|d| d.rule == "whitespace_punctuation"));
    }

    #[test]
    fn flags_missing_space_around_assignment() {
        let config = Config::new();
        let r = run("x=1;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "whitespace_punctuation"));
    }

    #[test]
    fn flags_missing_space_around_binary_operator() {
        let config = Config::new();
        let r = run("x = a+b;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "operator_whitespace"));
    }

    #[test]
    fn tight_power_operator_flagged_when_spaced() {
        let config = Config::new();
        let r = run("x = a ^ b;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "operator_whitespace"));
    }

    #[test]
    fn justification_marker_is_collected() {
        let config = Config::new();
        let r = run("x=1; % mh:ignore_style\n", &config);
        assert!(r.suppressed_lines.contains(&1));
    }

    #[test]
    fn no_starting_newline_detected() {
        let config = Config::new();
        let r = run("\nx = 1;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "no_starting_newline"));
    }

    #[test]
    fn missing_copyright_header_is_flagged() {
        let mut config = Config::new();
        config.rules.insert(
            "copyright_notice".to_string(),
            crate::config::RuleConfig::Enabled(true),
        );
        let r = run("x = 1;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "copyright_notice"));
    }

    #[test]
    fn copyright_with_matching_entity_is_quiet() {
        let mut config = Config::new();
        config.rules.insert(
            "copyright_notice".to_string(),
            crate::config::RuleConfig::Enabled(true),
        );
        config.copyright_entity = vec!["Acme".to_string()];
        let r = run("% Copyright (C) 2024 Acme Corp\nx = 1;\n", &config);
        assert!(!r.diagnostics.iter().any(|d| d.rule == "copyright_notice"));
    }

    #[test]
    fn copyright_entity_mismatch_names_expected_entities() {
        let mut config = Config::new();
        config.rules.insert(
            "copyright_notice".to_string(),
            crate::config::RuleConfig::Enabled(true),
        );
        config.copyright_entity = vec!["Acme".to_string(), "Widgets Inc".to_string()];
        let r = run("% Copyright 2024 Someone Else\nx = 1;\n", &config);
        let d = r
            .diagnostics
            .iter()
            .find(|d| d.rule == "copyright_notice")
            .expect("expected a copyright_notice diagnostic");
        assert_eq!(d.message, "Copyright does not mention one of Acme or Widgets Inc");
    }

    #[test]
    fn copyright_header_missing_year_is_nonconforming() {
        let mut config = Config::new();
        config.rules.insert(
            "copyright_notice".to_string(),
            crate::config::RuleConfig::Enabled(true),
        );
        let r = run("% Copyright Acme Corp\nx = 1;\n", &config);
        let d = r
            .diagnostics
            .iter()
            .find(|d| d.rule == "copyright_notice")
            .expect("expected a copyright_notice diagnostic");
        assert!(d.message.contains("does not conform to the expected format"));
    }

    #[test]
    fn leading_comment_without_copyright_mention_is_flagged() {
        let mut config = Config::new();
        config.rules.insert(
            "copyright_notice".to_string(),
            crate::config::RuleConfig::Enabled(true),
        );
        let r = run("% just a file description\nx = 1;\n", &config);
        let d = r
            .diagnostics
            .iter()
            .find(|d| d.rule == "copyright_notice")
            .expect("expected a copyright_notice diagnostic");
        assert!(d.message.contains("does not mention a copyright"));
    }

    #[test]
    fn indentation_mismatch_is_flagged() {
        let mut config = Config::new();
        config
            .rules
            .insert("indentation".to_string(), crate::config::RuleConfig::Enabled(true));
        let r = run("if x\ny = 1;\nend\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "indentation"));
    }

    #[test]
    fn indentation_continuation_line_uses_statement_anchor() {
        let mut config = Config::new();
        config
            .rules
            .insert("indentation".to_string(), crate::config::RuleConfig::Enabled(true));
        let r = run("y = 1 + ...\n  2;\n", &config);
        assert!(!r.diagnostics.iter().any(|d| d.rule == "indentation"));
    }

    #[test]
    fn whitespace_continuation_flags_missing_space() {
        let config = Config::new();
        let r = run("y = 1 +...\n  2;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "whitespace_continuation"));
    }

    #[test]
    fn whitespace_continuation_is_quiet_when_spaced() {
        let config = Config::new();
        let r = run("y = 1 + ...\n  2;\n", &config);
        assert!(!r.diagnostics.iter().any(|d| d.rule == "whitespace_continuation"));
    }

    #[test]
    fn operator_after_continuation_is_flagged_not_autofixed() {
        let config = Config::new();
        let r = run("y = 1 ...\n  + 2;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "operator_after_continuation"));
        let cont = r
            .diagnostics
            .iter()
            .find(|d| d.rule == "operator_after_continuation")
            .unwrap();
        assert_eq!(cont.severity, Severity::Style);
    }

    #[test]
    fn useless_continuation_before_comment_is_flagged() {
        let config = Config::new();
        let r = run("y = 1 ...\n% comment\n  + 2;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "useless_continuation"));
    }

    #[test]
    fn useless_continuation_after_terminator_is_flagged() {
        let config = Config::new();
        let r = run("x = 1; ...\ny = 2;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "useless_continuation"));
    }

    #[test]
    fn dangerous_continuation_is_flagged() {
        let config = Config::new();
        let r = run("x = 1; ...\ny = 2;\n", &config);
        assert!(r.diagnostics.iter().any(|d| d.rule == "dangerous_continuation"));
    }

    #[test]
    fn pragma_passthrough_is_never_flagged() {
        let config = Config::new();
        let r = run("x = 1; %|raw internal marker\n", &config);
        assert!(!r.diagnostics.iter().any(|d| d.rule == "whitespace_comments"));
    }

    #[test]
    fn pragma_hash_space_is_autofixed() {
        let config = Config::new();
        let mut tokens = crate::lexer::lex("t.m", "%#  on\nx = 1;\n", &crate::lexer::LexOptions::default()).unwrap();
        let parsed = crate::parser::parse(&mut tokens).unwrap_or_default();
        let result = analyze("t.m", &mut tokens, &parsed.nodes, &config);
        assert!(result.diagnostics.iter().any(|d| d.rule == "whitespace_comments"));
        let comment = tokens.iter().find(|t| t.kind == TokenKind::Comment).unwrap();
        assert_eq!(comment.raw_text, "%#on");
    }

    #[test]
    fn pragma_space_hash_is_autofixed() {
        let config = Config::new();
        let mut tokens = crate::lexer::lex("t.m", "%  #on\nx = 1;\n", &crate::lexer::LexOptions::default()).unwrap();
        let parsed = crate::parser::parse(&mut tokens).unwrap_or_default();
        let result = analyze("t.m", &mut tokens, &parsed.nodes, &config);
        assert!(result.diagnostics.iter().any(|d| d.rule == "whitespace_comments"));
        let comment = tokens.iter().find(|t| t.kind == TokenKind::Comment).unwrap();
        assert_eq!(comment.raw_text, "%#on");
    }

    #[test]
    fn comment_sharing_line_with_code_needs_space() {
        let config = Config::new();
        let mut tokens = crate::lexer::lex("t.m", "x = 1;% trailing\n", &crate::lexer::LexOptions::default()).unwrap();
        let parsed = crate::parser::parse(&mut tokens).unwrap_or_default();
        let result = analyze("t.m", &mut tokens, &parsed.nodes, &config);
        assert!(result.diagnostics.iter().any(|d| d.rule == "whitespace_comments"));
    }
}
