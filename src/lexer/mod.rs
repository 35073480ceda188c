//! Hand-written lexer for the target dynamic array-oriented language.
//!
//! No off-the-shelf crate parses this language, so the lexer is written
//! from scratch, line-oriented, mirroring the expectations
//! `crate::stage3` and `crate::parser` place on the token stream (keyword
//! set, continuation/comment handling, string-literal quoting).

use crate::types::{Location, MStyleError, Result, Token, TokenKind};
use std::sync::Arc;

/// Reserved words recognised by the lexer.
pub const KEYWORDS: &[&str] = &[
    "function",
    "endfunction",
    "if",
    "elseif",
    "else",
    "endif",
    "for",
    "endfor",
    "parfor",
    "endparfor",
    "while",
    "endwhile",
    "switch",
    "case",
    "otherwise",
    "endswitch",
    "classdef",
    "endclassdef",
    "properties",
    "endproperties",
    "methods",
    "endmethods",
    "events",
    "endevents",
    "enumeration",
    "endenumeration",
    "try",
    "catch",
    "end",
    "return",
    "break",
    "continue",
    "global",
    "persistent",
    "do",
    "until",
];

/// Options controlling lexical analysis.
#[derive(Debug, Clone, Copy)]
pub struct LexOptions {
    /// Accept `#`-led line comments (Octave dialect)
    pub octave: bool,
    /// Number of spaces a tab character expands to
    pub tab_width: usize,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            octave: false,
            tab_width: 4,
        }
    }
}

/// Expand every tab character in `text` to `tab_width` spaces.
///
/// Deliberately applied before tokenizing, including inside string and
/// comment text — rewriting tabs that happen to sit inside a string literal
/// is an acknowledged, accepted limitation (see SPEC_FULL.md §9).
pub fn correct_tabs(text: &str, tab_width: usize) -> String {
    let pad = " ".repeat(tab_width.max(1));
    text.replace('\t', &pad)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct LineLexer<'a> {
    file: Arc<str>,
    line_no: usize,
    chars: Vec<char>,
    line_text: Arc<str>,
    pos: usize,
    tokens: Vec<Token>,
    at_line_start: bool,
    prev_kind: Option<TokenKind>,
    pending_ws: String,
    _marker: std::marker::PhantomData<&'a ()>,
}

impl<'a> LineLexer<'a> {
    fn loc(&self, col_start: usize, col_end: usize) -> Location {
        Location {
            file: self.file.clone(),
            line: self.line_no,
            col_start,
            col_end,
            line_text: self.line_text.clone(),
        }
    }

    fn push(&mut self, kind: TokenKind, value: Option<String>, raw: String, start: usize) {
        let end = start + raw.chars().count();
        let first_in_line = self.at_line_start;
        self.at_line_start = false;
        self.prev_kind = Some(kind);
        let ws_before = std::mem::take(&mut self.pending_ws);
        self.tokens.push(Token {
            kind,
            value,
            raw_text: raw,
            location: self.loc(start, end),
            first_in_line,
            first_in_statement: false,
            anonymous: false,
            ast_link: None,
            block_comment: false,
            statement_start_col: 1,
            current_indent: 0,
            ws_before,
            ws_after: String::new(),
            fix: Default::default(),
        });
    }

    fn remaining(&self) -> &[char] {
        &self.chars[self.pos..]
    }

    fn starts_with(&self, s: &str) -> bool {
        let sc: Vec<char> = s.chars().collect();
        self.remaining().starts_with(sc.as_slice())
    }
}

/// Tokenize `text` (already tab-corrected) into a flat token buffer.
pub fn lex(file: &str, text: &str, opts: &LexOptions) -> Result<Vec<Token>> {
    let file: Arc<str> = Arc::from(file);
    let mut tokens = Vec::new();
    let mut in_block_comment = false;

    let lines: Vec<&str> = if text.is_empty() {
        Vec::new()
    } else {
        let mut v: Vec<&str> = text.split('\n').collect();
        if text.ends_with('\n') {
            v.pop();
        }
        v
    };

    for (idx, raw_line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_text: Arc<str> = Arc::from(*raw_line);
        let chars: Vec<char> = raw_line.chars().collect();

        if in_block_comment {
            let trimmed = raw_line.trim();
            let loc = Location {
                file: file.clone(),
                line: line_no,
                col_start: 1,
                col_end: chars.len() + 1,
                line_text: line_text.clone(),
            };
            tokens.push(Token {
                kind: TokenKind::Comment,
                value: Some(raw_line.to_string()),
                raw_text: raw_line.to_string(),
                location: loc,
                first_in_line: true,
                first_in_statement: false,
                anonymous: false,
                ast_link: None,
                block_comment: true,
                statement_start_col: 1,
                current_indent: 0,
                ws_before: String::new(),
                ws_after: String::new(),
                fix: Default::default(),
            });
            if trimmed == "%}" {
                in_block_comment = false;
            }
            continue;
        }

        let mut lexer = LineLexer {
            file: file.clone(),
            line_no,
            chars,
            line_text,
            pos: 0,
            tokens: Vec::new(),
            at_line_start: true,
            prev_kind: None,
            pending_ws: String::new(),
            _marker: std::marker::PhantomData,
        };

        let mut hit_continuation = false;

        while lexer.pos < lexer.chars.len() {
            let ws_start = lexer.pos;
            while lexer.pos < lexer.chars.len() && lexer.chars[lexer.pos] == ' ' {
                lexer.pos += 1;
            }
            let ws_run: String = lexer.chars[ws_start..lexer.pos].iter().collect();
            if !ws_run.is_empty() {
                if let Some(last) = lexer.tokens.last_mut() {
                    last.ws_after.push_str(&ws_run);
                }
                lexer.pending_ws = ws_run;
            }
            if lexer.pos >= lexer.chars.len() {
                break;
            }

            let start_col = lexer.pos + 1;
            let c = lexer.chars[lexer.pos];

            // Comments
            if c == '%' || (opts.octave && c == '#') {
                let raw: String = lexer.chars[lexer.pos..].iter().collect();
                let trimmed_whole = raw_line.trim();
                if trimmed_whole == "%{" {
                    lexer.push(TokenKind::Comment, Some(raw.clone()), raw, start_col);
                    if let Some(t) = lexer.tokens.last_mut() {
                        t.block_comment = true;
                    }
                    in_block_comment = true;
                    lexer.pos = lexer.chars.len();
                    break;
                }
                lexer.push(TokenKind::Comment, Some(raw.clone()), raw, start_col);
                lexer.pos = lexer.chars.len();
                break;
            }

            // Line continuation
            if lexer.starts_with("...") {
                lexer.push(TokenKind::Continuation, None, "...".to_string(), start_col);
                lexer.pos += 3;
                let rest: String = lexer.chars[lexer.pos..].iter().collect();
                if !rest.trim().is_empty() {
                    let rest_start = lexer.pos + 1;
                    lexer.push(TokenKind::Comment, Some(rest.clone()), rest, rest_start);
                }
                hit_continuation = true;
                lexer.pos = lexer.chars.len();
                break;
            }

            // String literals
            if c == '\'' || c == '"' {
                let is_transpose = c == '\''
                    && matches!(
                        lexer.prev_kind,
                        Some(
                            TokenKind::Identifier
                                | TokenKind::Number
                                | TokenKind::String
                                | TokenKind::Ket
                                | TokenKind::AKet
                                | TokenKind::MKet
                        )
                    );
                if is_transpose {
                    lexer.push(TokenKind::Operator, Some("'".to_string()), "'".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                let quote = c;
                let mut j = lexer.pos + 1;
                let mut raw = String::new();
                raw.push(quote);
                let mut closed = false;
                while j < lexer.chars.len() {
                    let cur = lexer.chars[j];
                    raw.push(cur);
                    if cur == quote {
                        if j + 1 < lexer.chars.len() && lexer.chars[j + 1] == quote {
                            raw.push(quote);
                            j += 2;
                            continue;
                        }
                        closed = true;
                        j += 1;
                        break;
                    }
                    j += 1;
                }
                if !closed {
                    return Err(MStyleError::LexError {
                        location: Box::new(lexer.loc(start_col, lexer.chars.len() + 1)),
                        message: "unterminated string literal".to_string(),
                    });
                }
                lexer.push(TokenKind::String, Some(raw.clone()), raw, start_col);
                lexer.pos = j;
                continue;
            }

            // Numbers
            if c.is_ascii_digit() || (c == '.' && lexer.chars.get(lexer.pos + 1).is_some_and(|d| d.is_ascii_digit())) {
                let mut j = lexer.pos;
                while j < lexer.chars.len() && lexer.chars[j].is_ascii_digit() {
                    j += 1;
                }
                if j < lexer.chars.len() && lexer.chars[j] == '.' {
                    j += 1;
                    while j < lexer.chars.len() && lexer.chars[j].is_ascii_digit() {
                        j += 1;
                    }
                }
                if j < lexer.chars.len() && matches!(lexer.chars[j], 'e' | 'E') {
                    let mut k = j + 1;
                    if k < lexer.chars.len() && matches!(lexer.chars[k], '+' | '-') {
                        k += 1;
                    }
                    if k < lexer.chars.len() && lexer.chars[k].is_ascii_digit() {
                        j = k;
                        while j < lexer.chars.len() && lexer.chars[j].is_ascii_digit() {
                            j += 1;
                        }
                    }
                }
                if j < lexer.chars.len() && matches!(lexer.chars[j], 'i' | 'j' | 'I' | 'J') {
                    j += 1;
                }
                let raw: String = lexer.chars[lexer.pos..j].iter().collect();
                lexer.push(TokenKind::Number, Some(raw.clone()), raw, start_col);
                lexer.pos = j;
                continue;
            }

            // Identifiers / keywords
            if is_ident_start(c) {
                let mut j = lexer.pos;
                while j < lexer.chars.len() && is_ident_continue(lexer.chars[j]) {
                    j += 1;
                }
                let raw: String = lexer.chars[lexer.pos..j].iter().collect();
                let kind = if KEYWORDS.contains(&raw.as_str()) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                };
                lexer.push(kind, Some(raw.clone()), raw, start_col);
                lexer.pos = j;
                continue;
            }

            // Punctuation
            match c {
                ',' => {
                    lexer.push(TokenKind::Comma, None, ",".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                ':' => {
                    lexer.push(TokenKind::Colon, None, ":".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                ';' => {
                    lexer.push(TokenKind::SemiColon, None, ";".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                '(' => {
                    lexer.push(TokenKind::Bra, None, "(".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                ')' => {
                    lexer.push(TokenKind::Ket, None, ")".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                '[' => {
                    lexer.push(TokenKind::ABra, None, "[".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                ']' => {
                    lexer.push(TokenKind::AKet, None, "]".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                '{' => {
                    lexer.push(TokenKind::MBra, None, "{".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                '}' => {
                    lexer.push(TokenKind::MKet, None, "}".to_string(), start_col);
                    lexer.pos += 1;
                    continue;
                }
                '=' => {
                    if lexer.starts_with("==") {
                        lexer.push(TokenKind::Operator, Some("==".to_string()), "==".to_string(), start_col);
                        lexer.pos += 2;
                    } else {
                        lexer.push(TokenKind::Assignment, None, "=".to_string(), start_col);
                        lexer.pos += 1;
                    }
                    continue;
                }
                _ => {}
            }

            // Multi- and single-char operators, longest match first.
            const OPS: &[&str] = &[
                "&&", "||", "~=", "<=", ">=", ".*", "./", ".\\", ".^", ".'", "+", "-", "*", "/",
                "\\", "^", "<", ">", "&", "|", "~", "@",
            ];
            if let Some(op) = OPS.iter().find(|op| lexer.starts_with(op)) {
                lexer.push(TokenKind::Operator, Some(op.to_string()), op.to_string(), start_col);
                lexer.pos += op.chars().count();
                continue;
            }

            return Err(MStyleError::LexError {
                location: Box::new(lexer.loc(start_col, start_col + 1)),
                message: format!("unexpected character '{c}'"),
            });
        }

        tokens.extend(lexer.tokens);

        if !hit_continuation {
            tokens.push(Token {
                kind: TokenKind::Newline,
                value: None,
                raw_text: "\n".to_string(),
                location: Location {
                    file: file.clone(),
                    line: line_no,
                    col_start: raw_line.chars().count() + 1,
                    col_end: raw_line.chars().count() + 1,
                    line_text: Arc::from(*raw_line),
                },
                first_in_line: raw_line.is_empty(),
                first_in_statement: false,
                anonymous: true,
                ast_link: None,
                block_comment: false,
                statement_start_col: 1,
                current_indent: 0,
                ws_before: String::new(),
                ws_after: String::new(),
                fix: Default::default(),
            });
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        value: None,
        raw_text: String::new(),
        location: Location {
            file: file.clone(),
            line: lines.len().max(1),
            col_start: 1,
            col_end: 1,
            line_text: Arc::from(""),
        },
        first_in_line: true,
        first_in_statement: true,
        anonymous: true,
        ast_link: None,
        block_comment: false,
        statement_start_col: 1,
        current_indent: 0,
        ws_before: String::new(),
        ws_after: String::new(),
        fix: Default::default(),
    });

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(toks: &[Token]) -> Vec<TokenKind> {
        toks.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_simple_assignment() {
        let toks = lex("t.m", "x = 1;\n", &LexOptions::default()).unwrap();
        assert_eq!(
            kinds(&toks),
            vec![
                TokenKind::Identifier,
                TokenKind::Assignment,
                TokenKind::Number,
                TokenKind::SemiColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_keyword_vs_identifier() {
        let toks = lex("t.m", "if x\nend\n", &LexOptions::default()).unwrap();
        assert_eq!(toks[0].kind, TokenKind::Keyword);
        assert_eq!(toks[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn distinguishes_transpose_from_string() {
        let toks = lex("t.m", "y = x';\n", &LexOptions::default()).unwrap();
        assert_eq!(toks[2].kind, TokenKind::Operator);
        assert_eq!(toks[2].value.as_deref(), Some("'"));
    }

    #[test]
    fn string_literal_with_escaped_quote() {
        let toks = lex("t.m", "s = 'it''s';\n", &LexOptions::default()).unwrap();
        let s = toks.iter().find(|t| t.kind == TokenKind::String).unwrap();
        assert_eq!(s.raw_text, "'it''s'");
    }

    #[test]
    fn unterminated_string_is_lex_error() {
        let res = lex("t.m", "s = 'oops\n", &LexOptions::default());
        assert!(res.is_err());
    }

    #[test]
    fn continuation_suppresses_newline() {
        let toks = lex("t.m", "x = 1 + ...\n    2;\n", &LexOptions::default()).unwrap();
        assert!(toks.iter().any(|t| t.kind == TokenKind::Continuation));
        // Only one NEWLINE (end of logical statement), not two
        assert_eq!(
            toks.iter().filter(|t| t.kind == TokenKind::Newline).count(),
            1
        );
    }

    #[test]
    fn block_comment_spans_lines() {
        let src = "%{\nhello\n%}\nx = 1;\n";
        let toks = lex("t.m", src, &LexOptions::default()).unwrap();
        let comments: Vec<_> = toks.iter().filter(|t| t.kind == TokenKind::Comment).collect();
        assert_eq!(comments.len(), 3);
        assert!(comments.iter().all(|c| c.block_comment));
    }

    #[test]
    fn octave_hash_comment_only_in_octave_mode() {
        let opts = LexOptions {
            octave: true,
            tab_width: 4,
        };
        let toks = lex("t.m", "# comment\n", &opts).unwrap();
        assert_eq!(toks[0].kind, TokenKind::Comment);
    }

    #[test]
    fn correct_tabs_expands() {
        assert_eq!(correct_tabs("a\tb", 2), "a  b");
    }
}
