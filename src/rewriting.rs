//! Rewriting
//!
//! The passes that turn a captured definition into its expanded form, in the
//! order the pipeline runs them:
//!
//! 1. Marker stripping: drop the annotation line that triggered the rewrite
//!    (./rewriting/stripper.rs)
//! 2. Directive rewriting: merge directive comment runs into synthesized call
//!    statements (./rewriting/directive_rewriter.rs), using the statement
//!    builder in ./rewriting/synthesis.rs
//! 3. Indentation normalization: strip the ambient indentation of nested
//!    definitions (./rewriting/indentation.rs)
//!
//! Each pass is a plain function over the positioned token stream (or, for
//! the stripper, over raw text), so they compose with the lexer and
//! detokenizer without shared state.

pub mod directive_rewriter;
pub mod indentation;
pub mod stripper;
pub mod synthesis;

pub use directive_rewriter::rewrite;
pub use indentation::remove_indent;
pub use stripper::{strip_marker, MARKER, MARKER_CALL};
pub use synthesis::{synthesize_call, CallBindings};
