//! Core token types shared across the lexing and rewriting pipeline.
//!
//!     Logcraft opts for handling more complexity in the lexing stage in order to keep
//!     the rewriting stage very simple. The rewriter only needs to tell three things
//!     apart: directive comments, the filler around them, and everything else. All the
//!     position bookkeeping that makes the final reassembly exact lives in the tokens
//!     themselves.
//!
//! Token Layers
//!
//!     Raw Tokens:
//!         Character/word level tokens produced by the logos lexer. See
//!         [base_tokenization](crate::lexing::base_tokenization). They carry byte spans
//!         only; no line/column information.
//!
//!     Positioned Tokens:
//!         The [Token] type below: a raw token (or a synthetic structural token) tagged
//!         with exact begin/end line-column coordinates and the physical source line it
//!         came from. Produced by [line_structure](crate::lexing::line_structure).
//!
//!     Structural Tokens:
//!         Indent, Dedent. Semantic tokens that represent indentation level changes on
//!         code lines, similar to open/close braces in c-style languages. An Indent
//!         carries the full leading whitespace of its line; a Dedent carries no text.
//!
//! Losslessness
//!
//!     Every character of the input belongs to exactly one token, so concatenating the
//!     texts of a freshly lexed stream reproduces the input. Synthetic tokens (Dedent,
//!     EndMarker, the end-of-input Newline) have empty text and do not disturb this.

use serde::{Deserialize, Serialize};

/// A line/column coordinate. Lines are 1-based, columns 0-based, both counted
/// in characters (a tab is one column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    /// The start of a source unit: line 1, column 0.
    pub const START: Position = Position { line: 1, col: 0 };

    pub fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }

    /// The position reached after emitting `text` from `self`.
    pub fn advance(self, text: &str) -> Position {
        let mut pos = self;
        for ch in text.chars() {
            if ch == '\n' {
                pos.line += 1;
                pos.col = 0;
            } else {
                pos.col += 1;
            }
        }
        pos
    }
}

/// Classification of a positioned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Identifier or keyword.
    Name,
    /// Numeric literal.
    Number,
    /// String literal, including any prefix letters (`f"..."`).
    Str,
    /// Operator or delimiter run.
    Op,
    /// A `#` comment running to the end of the line.
    Comment,
    /// Ordinary whitespace: intra-line runs, the leading whitespace of blank,
    /// comment-only, and continuation lines, and backslash-newline glue.
    Whitespace,
    /// The newline terminating a logical (code-carrying) line.
    Newline,
    /// The newline of a blank or comment-only line, or a newline inside open
    /// brackets. These never terminate a statement.
    Nl,
    /// Indentation increase on a code line; text is the full leading whitespace.
    Indent,
    /// Indentation decrease; empty text, positioned at the new indentation column.
    Dedent,
    /// End of the token stream; empty text.
    EndMarker,
}

/// A token with exact source coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub begin: Position,
    pub end: Position,
    /// The full physical line the token starts on (empty for end-of-stream
    /// markers past the last line). Carried for diagnostics.
    pub source_line: String,
}

impl Token {
    /// Filler tokens separate sibling directive lines without closing their
    /// group: blank/comment-line newlines and ordinary whitespace.
    pub fn is_filler(&self) -> bool {
        matches!(self.kind, TokenKind::Nl | TokenKind::Whitespace)
    }

    /// Check if this token carries code (as opposed to layout or comments).
    pub fn is_code(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Name | TokenKind::Number | TokenKind::Str | TokenKind::Op
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_single_line() {
        let pos = Position::START.advance("hello");
        assert_eq!(pos, Position::new(1, 5));
    }

    #[test]
    fn test_advance_across_lines() {
        let pos = Position::new(3, 7).advance("\\\n  ");
        assert_eq!(pos, Position::new(4, 2));
    }

    #[test]
    fn test_positions_order_by_line_then_col() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }

    #[test]
    fn test_filler_predicate() {
        let token = Token {
            kind: TokenKind::Nl,
            text: "\n".to_string(),
            begin: Position::new(1, 0),
            end: Position::new(1, 1),
            source_line: "\n".to_string(),
        };
        assert!(token.is_filler());
        assert!(!token.is_code());
    }
}
