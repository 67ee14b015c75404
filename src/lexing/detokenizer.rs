//! Detokenizer for positioned token streams
//!
//! This module provides functionality to convert a stream of tokens back into
//! a string. It is the inverse of lexing: for a freshly lexed stream the
//! result is byte-identical to the input, and for a rewritten stream the
//! recorded coordinates decide where padding and line breaks go.
//!
//! The cursor rules mirror the coordinate conventions of the lexer: a
//! `Newline`/`Nl` token moves the cursor to the start of the next line even
//! when its text is empty (the synthetic end-of-input newline), and gaps
//! (lines whose tokens were consumed by the rewriter) come out as plain
//! newlines.

use crate::token::{Position, Token, TokenKind};

/// Serialize a token stream back to source text.
pub fn detokenize(tokens: &[Token]) -> String {
    let mut result = String::new();
    let mut cursor = Position::START;

    for token in tokens {
        if token.begin.line > cursor.line {
            for _ in 0..(token.begin.line - cursor.line) {
                result.push('\n');
            }
            cursor = Position::new(token.begin.line, 0);
        }
        if token.begin.line == cursor.line && token.begin.col > cursor.col {
            for _ in 0..(token.begin.col - cursor.col) {
                result.push(' ');
            }
        }
        result.push_str(&token.text);
        cursor = token.end;
        if matches!(token.kind, TokenKind::Newline | TokenKind::Nl) {
            cursor = Position::new(token.end.line + 1, 0);
        }
    }

    result
}
