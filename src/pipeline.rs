//! The end-to-end expansion pipeline.
//!
//! Two entry points cover the two capture shapes:
//!
//!     - [expand_definition] takes one annotated definition, exactly as
//!       captured from its enclosing scope: marker line on top, ambient
//!       indentation still attached. It strips the marker, rewrites the
//!       directives, and normalizes the result to top level.
//!     - [expand_file] takes a whole source file and only rewrites the
//!       directives; there is no marker to strip and the file's indentation
//!       is already authoritative.
//!
//! Both verify that the reassembled text lexes again before returning it.
//! That guard is about the rewriter, not the input: the input was lexable or
//! we would not have gotten this far.

use crate::error::ExpandError;
use crate::lexing::{detokenize, lex};
use crate::registry::DirectiveRegistry;
use crate::rewriting::{remove_indent, rewrite, strip_marker, CallBindings};

/// Knobs for one expansion run.
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    /// Names bound in the synthesized calls.
    pub bindings: CallBindings,
    /// The directive prefixes in force.
    pub registry: DirectiveRegistry,
    /// Echo the original and expanded text to stderr.
    pub echo: bool,
}

/// Expand one captured, marker-annotated definition.
pub fn expand_definition(source: &str, options: &ExpandOptions) -> Result<String, ExpandError> {
    if options.echo {
        echo("original", source);
    }
    let body = strip_marker(source)?;
    let tokens = lex(body)?;
    let rewritten = rewrite(tokens, &options.registry, &options.bindings)?;
    let normalized = remove_indent(rewritten);
    let updated = detokenize(&normalized);
    verify_relexable(&updated)?;
    if options.echo {
        echo("expanded", &updated);
    }
    Ok(updated)
}

/// Expand the directive comments of a whole source file.
pub fn expand_file(source: &str, options: &ExpandOptions) -> Result<String, ExpandError> {
    if options.echo {
        echo("original", source);
    }
    let tokens = lex(source)?;
    let rewritten = rewrite(tokens, &options.registry, &options.bindings)?;
    let updated = detokenize(&rewritten);
    verify_relexable(&updated)?;
    if options.echo {
        echo("expanded", &updated);
    }
    Ok(updated)
}

/// Confirm the reassembled text round-trips through the lexer.
fn verify_relexable(updated: &str) -> Result<(), ExpandError> {
    match lex(updated) {
        Ok(_) => Ok(()),
        Err(err) => Err(ExpandError::Reassembly(Box::new(err))),
    }
}

fn echo(label: &str, text: &str) {
    eprintln!("---- {label} ----");
    eprintln!("{text}");
}
