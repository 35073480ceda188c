//! Minimal block-structure parser.
//!
//! Not a full expression/statement grammar (explicitly out of scope, see
//! SPEC_FULL.md §1/§11) — just enough structure for Stage 3's indentation
//! rule and operator-spacing rule: block nesting depth per statement, and
//! unary/binary/statement-terminator classification per token.

use crate::types::{Location, MStyleError, Result, Token, TokenKind};

const OPENERS: &[&str] = &[
    "if", "for", "parfor", "while", "switch", "function", "classdef", "properties", "methods",
    "events", "try", "do", "enumeration",
];
const BRANCHES: &[&str] = &["else", "elseif", "case", "otherwise", "catch"];
const CLOSERS: &[&str] = &[
    "end",
    "endif",
    "endfor",
    "endparfor",
    "endwhile",
    "endswitch",
    "endfunction",
    "endclassdef",
    "endproperties",
    "endmethods",
    "endevents",
    "endenumeration",
    "until",
];
const TRANSPOSE: &[&str] = &["'", ".'"];

/// An arena-resident AST node. Indices into the arena are the only way
/// tokens reference nodes (`Token::ast_link`), avoiding cyclic references.
#[derive(Debug, Clone)]
pub struct AstNode {
    /// Statement keyword this node represents, or `"statement"` for
    /// ordinary (non-keyword-led) statements
    pub kind: &'static str,
    causes_indentation: bool,
    indentation: usize,
}

impl AstNode {
    /// Whether a line starting with this node's statement opens a new
    /// level of block nesting for the lines that follow it.
    pub fn causes_indentation(&self) -> bool {
        self.causes_indentation
    }

    /// The nesting depth this statement itself should be indented at.
    pub fn get_indentation(&self) -> usize {
        self.indentation
    }
}

/// Output of a parse pass.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Arena of statement-start AST nodes
    pub nodes: Vec<AstNode>,
}

fn is_unary_context(prev: Option<(TokenKind, Option<&str>)>) -> bool {
    match prev {
        None => true,
        Some((TokenKind::Operator, Some(v))) => !TRANSPOSE.contains(&v),
        Some((TokenKind::Operator, None)) => true,
        Some((
            TokenKind::Newline
            | TokenKind::Bra
            | TokenKind::ABra
            | TokenKind::MBra
            | TokenKind::Comma
            | TokenKind::SemiColon
            | TokenKind::Assignment
            | TokenKind::Colon
            | TokenKind::Keyword,
            _,
        )) => true,
        _ => false,
    }
}

/// Walk the token buffer once, assigning `ast_link`, operator
/// unary/binary classification, and statement-terminator/continuation
/// flags. Returns the arena of `AstNode`s produced.
///
/// On an unbalanced block (a closer with nothing open, or blocks still
/// open at EOF) returns `Err`; per SPEC_FULL.md §7 the caller should leave
/// every `ast_link` as `None` and proceed into Stage 3 regardless.
pub fn parse(tokens: &mut [Token]) -> Result<ParseResult> {
    let mut nodes = Vec::new();
    let mut stack: Vec<&'static str> = Vec::new();
    let mut bracket_depth: i32 = 0;

    // significant = not a Comment token
    let mut prev_significant: Option<(TokenKind, Option<String>)> = None;
    let mut at_statement_start = true;
    let mut last_terminator_idx: Option<usize> = None;
    let mut stmt_start_col: usize = 1;
    let mut stmt_indent: usize = 0;

    for i in 0..tokens.len() {
        let kind = tokens[i].kind;
        let value = tokens[i].value.clone();

        if kind == TokenKind::Comment {
            // A comment can't open or close a block itself, but one sitting
            // first inside a just-opened block (e.g. right after `if x`)
            // still needs an indentation target of its own, since the next
            // real statement hasn't set `at_statement_start` back to false.
            if at_statement_start {
                tokens[i].first_in_statement = true;
                tokens[i].ast_link = Some(nodes.len());
                nodes.push(AstNode {
                    kind: "comment",
                    causes_indentation: false,
                    indentation: stack.len(),
                });
            }
            tokens[i].statement_start_col = stmt_start_col;
            tokens[i].current_indent = stmt_indent;
            continue;
        }

        match kind {
            TokenKind::Bra | TokenKind::ABra | TokenKind::MBra => bracket_depth += 1,
            TokenKind::Ket | TokenKind::AKet | TokenKind::MKet => {
                bracket_depth = (bracket_depth - 1).max(0)
            }
            _ => {}
        }

        if at_statement_start && !matches!(kind, TokenKind::Newline | TokenKind::Continuation) {
            tokens[i].first_in_statement = true;

            let node = if kind == TokenKind::Keyword {
                let kw = value.as_deref().unwrap_or("");
                if OPENERS.contains(&kw) {
                    let indentation = stack.len();
                    stack.push(leak_keyword(kw));
                    AstNode {
                        kind: leak_keyword(kw),
                        causes_indentation: true,
                        indentation,
                    }
                } else if BRANCHES.contains(&kw) {
                    AstNode {
                        kind: leak_keyword(kw),
                        causes_indentation: false,
                        indentation: stack.len().saturating_sub(1),
                    }
                } else if CLOSERS.contains(&kw) {
                    if stack.pop().is_none() {
                        return Err(MStyleError::ParseError {
                            location: Box::new(tokens[i].location.clone()),
                            message: format!("unmatched block terminator '{kw}'"),
                        });
                    }
                    AstNode {
                        kind: leak_keyword(kw),
                        causes_indentation: false,
                        indentation: stack.len(),
                    }
                } else {
                    AstNode {
                        kind: "statement",
                        causes_indentation: false,
                        indentation: stack.len(),
                    }
                }
            } else {
                AstNode {
                    kind: "statement",
                    causes_indentation: false,
                    indentation: stack.len(),
                }
            };

            stmt_start_col = tokens[i].location.col_start;
            stmt_indent = node.indentation;
            tokens[i].ast_link = Some(nodes.len());
            nodes.push(node);
            at_statement_start = false;
        }

        tokens[i].statement_start_col = stmt_start_col;
        tokens[i].current_indent = stmt_indent;

        // Operator unary/binary classification and suffix handling.
        if kind == TokenKind::Operator {
            let v = value.as_deref().unwrap_or("");
            if TRANSPOSE.contains(&v) {
                tokens[i].fix.unary_operator = true;
            } else if is_unary_context(prev_significant.as_ref().map(|(k, v)| (*k, v.as_deref())))
            {
                tokens[i].fix.unary_operator = true;
            } else {
                tokens[i].fix.binary_operator = true;
            }
        }

        // Statement terminators and continuation flagging.
        let is_terminator = matches!(kind, TokenKind::SemiColon if bracket_depth == 0)
            || matches!(kind, TokenKind::Newline if bracket_depth == 0);
        if is_terminator {
            tokens[i].fix.statement_terminator = true;
            last_terminator_idx = Some(i);
            at_statement_start = true;
        }
        if kind == TokenKind::Comma && bracket_depth == 0 {
            at_statement_start = true;
        }
        if kind == TokenKind::Continuation
            && let Some(idx) = last_terminator_idx
            && idx + 1 == i
        {
            tokens[idx].fix.flag_continuations = true;
        }

        prev_significant = Some((kind, value));
    }

    if !stack.is_empty() {
        let loc = tokens
            .last()
            .map(|t| t.location.clone())
            .unwrap_or_else(|| Location {
                file: std::sync::Arc::from(""),
                line: 1,
                col_start: 1,
                col_end: 1,
                line_text: std::sync::Arc::from(""),
            });
        return Err(MStyleError::ParseError {
            location: Box::new(loc),
            message: format!("unterminated block(s): {}", stack.join(", ")),
        });
    }

    Ok(ParseResult { nodes })
}

fn leak_keyword(kw: &str) -> &'static str {
    match kw {
        "function" => "function",
        "if" => "if",
        "elseif" => "elseif",
        "else" => "else",
        "for" => "for",
        "parfor" => "parfor",
        "while" => "while",
        "switch" => "switch",
        "case" => "case",
        "otherwise" => "otherwise",
        "classdef" => "classdef",
        "properties" => "properties",
        "methods" => "methods",
        "events" => "events",
        "enumeration" => "enumeration",
        "try" => "try",
        "catch" => "catch",
        "do" => "do",
        "until" => "until",
        "end" => "end",
        "endfunction" => "endfunction",
        "endif" => "endif",
        "endfor" => "endfor",
        "endparfor" => "endparfor",
        "endwhile" => "endwhile",
        "endswitch" => "endswitch",
        "endclassdef" => "endclassdef",
        "endproperties" => "endproperties",
        "endmethods" => "endmethods",
        "endevents" => "endevents",
        "endenumeration" => "endenumeration",
        _ => "statement",
    }
}
