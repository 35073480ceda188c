//! Token-Buffer Replayer.
//!
//! Serializes a mutated token buffer back into source text, honoring the
//! fix directives Stage 3 attached to each token. Pure with respect to the
//! token buffer: reads `fix` records, writes nothing back. Grounded on
//! `mh_style.py`'s own replay step (it rebuilds file content from the same
//! token stream it diagnosed) and on SPEC_FULL.md §4.5's directive
//! precedence: `delete` > `replace_with_newline` > `correct_indent` >
//! `ensure_trim_*` > `ensure_ws_*` > `add_newline`.

use crate::types::{Token, TokenKind};

/// Rebuild source text from `tokens`, applying every fix directive exactly
/// once. When no token carries a directive, the output is byte-identical to
/// the text the tokens were lexed from (module tab expansion, which runs
/// ahead of lexing and is therefore outside the replayer's contract).
pub fn replay(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev_visible: Option<&Token> = None;

    for t in tokens {
        if t.kind == TokenKind::Eof {
            continue;
        }
        // `delete` wins outright: the token contributes nothing, and the
        // gap it would have occupied is absorbed by its neighbours.
        if t.fix.delete {
            continue;
        }

        let gap = if t.first_in_line && t.fix.correct_indent.is_some() {
            " ".repeat(t.fix.correct_indent.unwrap())
        } else {
            gap_text(prev_visible, t)
        };
        out.push_str(&gap);

        if t.fix.replace_with_newline {
            out.push('\n');
        } else {
            out.push_str(&t.raw_text);
        }

        if t.fix.add_newline {
            out.push('\n');
        }

        prev_visible = Some(t);
    }

    enforce_eof_newline(out)
}

/// The whitespace to emit between `prev` (the last emitted token, if any)
/// and `cur`. A spacing directive may live on either side — the check that
/// ran over `cur` set `ensure_*_before`, while a check that ran over `prev`
/// (e.g. "no whitespace after an opening bracket") set `ensure_*_after` —
/// so both are consulted before falling back to the text actually lexed.
fn gap_text(prev: Option<&Token>, cur: &Token) -> String {
    let trim = prev.map(|p| p.fix.ensure_trim_after).unwrap_or(false) || cur.fix.ensure_trim_before;
    if trim {
        return String::new();
    }
    let want_ws = prev.map(|p| p.fix.ensure_ws_after).unwrap_or(false) || cur.fix.ensure_ws_before;
    if want_ws {
        return " ".to_string();
    }
    if !cur.ws_before.is_empty() {
        return cur.ws_before.clone();
    }
    prev.map(|p| p.ws_after.clone()).unwrap_or_default()
}

/// A non-empty file must end in exactly one newline, with no trailing
/// blank lines — enforced here rather than by the `eof_newlines` rule
/// itself, since that rule has no token-level fix directive to carry the
/// intent through Stage 3.
fn enforce_eof_newline(mut out: String) -> String {
    if out.is_empty() {
        return out;
    }
    while out.ends_with('\n') {
        out.pop();
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{LexOptions, lex};
    use crate::parser::parse;
    use crate::stage3;
    use crate::config::Config;

    fn fixed(src: &str, config: &Config) -> String {
        let mut tokens = lex("t.m", src, &LexOptions::default()).unwrap();
        let parsed = parse(&mut tokens).unwrap_or_default();
        stage3::analyze("t.m", &mut tokens, &parsed.nodes, config);
        replay(&tokens)
    }

    #[test]
    fn unmodified_buffer_round_trips() {
        let tokens = lex("t.m", "x = 1;\n", &LexOptions::default()).unwrap();
        assert_eq!(replay(&tokens), "x = 1;\n");
    }

    #[test]
    fn fixes_missing_space_around_assignment() {
        let config = Config::new();
        assert_eq!(fixed("x=1;\n", &config), "x = 1;\n");
    }

    #[test]
    fn fixes_comma_spacing() {
        let config = Config::new();
        assert_eq!(fixed("f(1 , 2);\n", &config), "f(1, 2);\n");
    }

    #[test]
    fn fixes_opening_bracket_spacing() {
        let config = Config::new();
        assert_eq!(fixed("f( 1, 2);\n", &config), "f(1, 2);\n");
    }

    #[test]
    fn deletes_leading_blank_line() {
        let config = Config::new();
        assert_eq!(fixed("\nx = 1;\n", &config), "x = 1;\n");
    }

    #[test]
    fn enforces_single_trailing_newline() {
        let tokens = lex("t.m", "x = 1;\n\n\n", &LexOptions::default()).unwrap();
        assert_eq!(replay(&tokens), "x = 1;\n");
    }

    #[test]
    fn fixes_binary_operator_spacing() {
        let config = Config::new();
        assert_eq!(fixed("x = a+b;\n", &config), "x = a + b;\n");
    }
}
