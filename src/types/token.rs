//! Token and fix-record data model

use std::sync::Arc;

/// The closed set of token kinds the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    SemiColon,
    /// `=` (not `==`)
    Assignment,
    /// `(`
    Bra,
    /// `[`
    ABra,
    /// `{`
    MBra,
    /// `)`
    Ket,
    /// `]`
    AKet,
    /// `}`
    MKet,
    /// Reserved word (`if`, `function`, `end`, ...)
    Keyword,
    /// Any operator other than comma/colon/assignment (`+`, `==`, `'`, ...)
    Operator,
    /// In-code annotation pragma (`%#codegen` and similar)
    Annotation,
    /// `%` or `#` comment, including `%{ ... %}` block comments
    Comment,
    /// `...` line continuation marker
    Continuation,
    /// End of physical line
    Newline,
    /// Identifier / name
    Identifier,
    /// Numeric literal
    Number,
    /// String literal
    String,
    /// End of file (synthetic, always anonymous)
    Eof,
}

/// A 1-based source location, carrying the full text of its own line for
/// diagnostic rendering.
#[derive(Debug, Clone)]
pub struct Location {
    /// File name as given on the command line / in the request
    pub file: Arc<str>,
    /// 1-based line number
    pub line: usize,
    /// 1-based, inclusive start column
    pub col_start: usize,
    /// 1-based, exclusive end column
    pub col_end: usize,
    /// Full physical-line text the token belongs to (no line ending)
    pub line_text: Arc<str>,
}

impl Location {
    /// Width of the token's column range.
    pub fn width(&self) -> usize {
        self.col_end.saturating_sub(self.col_start)
    }
}

/// The bag of fix directives a Stage-3 rule may attach to a token.
///
/// Directives are plain data; `crate::replay` is the only code that
/// interprets them. Precedence when multiple directives on the same token
/// conflict: `delete` > `replace_with_newline` > `correct_indent` >
/// `ensure_trim_*` > `ensure_ws_*` > `add_newline`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixRecord {
    /// Ensure exactly one space of whitespace precedes this token
    pub ensure_ws_before: bool,
    /// Ensure exactly one space of whitespace follows this token
    pub ensure_ws_after: bool,
    /// Ensure no whitespace precedes this token
    pub ensure_trim_before: bool,
    /// Ensure no whitespace follows this token
    pub ensure_trim_after: bool,
    /// Insert a newline immediately after this token
    pub add_newline: bool,
    /// Replace the whitespace run following this token with a single newline
    pub replace_with_newline: bool,
    /// Delete this token (and its trailing whitespace) entirely
    pub delete: bool,
    /// Rewrite the leading whitespace of this token's line to this many
    /// columns of indentation
    pub correct_indent: Option<usize>,
    /// Set by the parser: this operator occurs in unary position
    pub unary_operator: bool,
    /// Set by the parser: this operator occurs in binary position
    pub binary_operator: bool,
    /// Set by the parser: this token ends a statement
    pub statement_terminator: bool,
    /// Set by the parser: a continuation immediately follows this
    /// statement-terminator-shaped token
    pub flag_continuations: bool,
}

impl FixRecord {
    /// True if any directive that the replayer must act on is set.
    pub fn is_empty(&self) -> bool {
        !(self.ensure_ws_before
            || self.ensure_ws_after
            || self.ensure_trim_before
            || self.ensure_trim_after
            || self.add_newline
            || self.replace_with_newline
            || self.delete
            || self.correct_indent.is_some())
    }
}

/// A lexical token, optionally linked to an AST node and carrying a fix
/// record filled in by Stage 3.
#[derive(Debug, Clone)]
pub struct Token {
    /// Which kind of token this is
    pub kind: TokenKind,
    /// Normalized value (keyword text, operator text, unescaped string
    /// contents, ...), when meaningful
    pub value: Option<String>,
    /// The raw source text this token was lexed from
    pub raw_text: String,
    /// Source location
    pub location: Location,
    /// True when no other token on this physical line precedes this one
    pub first_in_line: bool,
    /// True when this token opens a new statement
    pub first_in_statement: bool,
    /// True when this token was synthesized by the lexer/parser rather than
    /// read from source; anonymous tokens are never diagnosed
    pub anonymous: bool,
    /// Index into the parser's AST arena, when linked
    pub ast_link: Option<usize>,
    /// True when this comment token is part of a `%{ ... %}` block comment
    pub block_comment: bool,
    /// Column at which the statement enclosing this token began (itself,
    /// when this token starts the statement). Used by the indentation
    /// check for physical lines that continue a statement started earlier.
    pub statement_start_col: usize,
    /// Nesting depth of the statement enclosing this token, in the same
    /// units as `AstNode::get_indentation`.
    pub current_indent: usize,
    /// Whitespace text immediately preceding this token on its line
    pub ws_before: String,
    /// Whitespace text immediately following this token on its line
    pub ws_after: String,
    /// Fix directives accumulated by Stage 3
    pub fix: FixRecord,
}

impl Token {
    /// Whether this token carries no diagnosable content.
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }
}
