//! Lexer
//!
//! This module orchestrates the tokenization pipeline for captured source:
//!
//! 1. Core tokenization using the logos lexer (./lexing/base_tokenization.rs)
//! 2. Line structure transformation: position tagging, logical-line
//!    classification, semantic Indent/Dedent tokens (./lexing/line_structure.rs)
//! 3. Detokenization back to text (./lexing/detokenizer.rs)
//!
//! Indentation Handling
//!
//!     Indentation ultimately gets transformed into semantic indent and dedent
//!     tokens, which map nicely to brace tokens for more standard syntaxes.
//!     The raw logos pass stays vanilla and all stateful line logic lives in
//!     the structure transformation; this split keeps each half testable on
//!     its own and mirrors how the rewriter consumes the stream.

pub mod base_tokenization;
pub mod detokenizer;
pub mod line_structure;

pub use base_tokenization::{tokenize, RawToken};
pub use detokenizer::detokenize;
pub use line_structure::structure;

use crate::error::ExpandError;
use crate::token::Token;

/// Lex source text into positioned tokens.
pub fn lex(source: &str) -> Result<Vec<Token>, ExpandError> {
    let raw = tokenize(source)?;
    structure(source, &raw)
}
