//! Base tokenization implementation for the logcraft lexer
//!
//! This module provides the raw tokenization using the logos lexer library.
//! This is the entry point where captured source strings become token streams.
//!
//! Raw tokens carry byte spans only. Line/column tagging, logical-line
//! classification, and the semantic Indent/Dedent markers are produced by the
//! [line_structure](super::line_structure) transformation, which operates on
//! the stream returned here.

use crate::error::ExpandError;
use crate::token::Position;
use logos::Logos;

/// Raw tokens over Python-shaped source text.
///
/// The patterns jointly cover every character of previously-valid source;
/// anything logos rejects (an unterminated string, a stray backslash or
/// quote) is reported as a lex error with its position.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken {
    /// Physical line break.
    #[regex(r"\r?\n")]
    Newline,

    /// Backslash-newline continuation; treated as whitespace glue so logical
    /// lines can span physical lines.
    #[regex(r"\\\r?\n")]
    Continuation,

    /// Horizontal whitespace runs.
    #[regex(r"[ \t]+")]
    Whitespace,

    /// A `#` comment running to the end of the line.
    #[regex(r"#[^\r\n]*")]
    Comment,

    /// String literals, with optional prefix letters (`f`, `r`, `b`, `u` and
    /// their pairings). Triple-quoted strings may span lines; the whole
    /// literal is one token, the same way a continuation glues lines.
    #[regex(r#"[fFrRbBuU]{0,2}"([^"\\\r\n]|\\[^\r\n])*""#)]
    #[regex(r"[fFrRbBuU]{0,2}'([^'\\\r\n]|\\[^\r\n])*'")]
    #[regex(r#"[fFrRbBuU]{0,2}""""#, |lexer| scan_to_terminator(lexer, "\"\"\""))]
    #[regex(r"[fFrRbBuU]{0,2}'''", |lexer| scan_to_terminator(lexer, "'''"))]
    Str,

    /// Numeric literals.
    #[regex(r"[0-9][0-9_]*(\.[0-9][0-9_]*)?([eE][+-]?[0-9]+)?")]
    Number,

    /// Identifiers and keywords.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    /// Operator runs and single delimiters.
    #[regex(r"[+\-*/%@&|^=<>!]+")]
    #[regex(r"[(){}\[\],:.;~]")]
    Op,
}

/// Extend a triple-quoted string token up to and including its closing
/// delimiter. A backslash escapes the following character, newlines
/// included. Returns `false` (a lex error) when the string never closes.
fn scan_to_terminator(lexer: &mut logos::Lexer<RawToken>, terminator: &str) -> bool {
    let rest = lexer.remainder();
    let mut chars = rest.char_indices();
    while let Some((offset, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
        } else if rest[offset..].starts_with(terminator) {
            lexer.bump(offset + terminator.len());
            return true;
        }
    }
    false
}

/// Tokenize source text into raw tokens with byte spans.
///
/// The stream covers the input contiguously: the spans of consecutive tokens
/// touch, which is what makes the downstream position tagging exact.
pub fn tokenize(source: &str) -> Result<Vec<(RawToken, logos::Span)>, ExpandError> {
    let mut lexer = RawToken::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let at = position_at(source, lexer.span().start);
                return Err(ExpandError::Lex {
                    line: at.line,
                    col: at.col,
                });
            }
        }
    }

    Ok(tokens)
}

/// Line/column of a byte offset, for error reporting.
fn position_at(source: &str, offset: usize) -> Position {
    Position::START.advance(&source[..offset])
}
