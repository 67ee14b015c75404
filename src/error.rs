//! Error taxonomy for the expansion pipeline.
//!
//! Every error is surfaced to the immediate caller; none are retried. The
//! transformation is a pure function of its input text, so retrying without
//! changing the input cannot succeed.

use thiserror::Error;

/// Errors that can occur while expanding a captured definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// The `@log` rewrite marker was not the first, outermost decorator of
    /// the captured text.
    #[error("the @log marker must be the first, outermost decorator")]
    DecoratorOrder,

    /// The input contains a character sequence the lexer cannot tokenize
    /// (for example an unterminated string literal).
    #[error("unlexable source at line {line}, column {col}")]
    Lex { line: u32, col: u32 },

    /// A code line dedents to a width that is not on the indentation stack.
    #[error("unindent at line {line} does not match any outer indentation level")]
    Indentation { line: u32 },

    /// The reassembled output failed to re-lex. This is an internal
    /// consistency guard; it indicates a defect in the rewriter or the
    /// normalizer, never in the input.
    #[error("reassembled source failed to re-lex: {0}")]
    Reassembly(Box<ExpandError>),
}
