//! The central single-pass rewrite scan.
//!
//! The scan walks the positioned token stream once, accumulating maximal runs
//! of same-kind directive comments and replacing each closed run with one
//! synthesized call statement. Everything that is not a directive comment or
//! the filler between sibling directive lines passes through untouched.
//!
//! Tie-break rules, in the order the scan applies them:
//!
//!     - A token whose kind equals the previous one continues the run (for
//!       non-directives, "run" just means ordinary passthrough).
//!     - While a run is open, filler tokens (the newline after a comment
//!       line, blank lines, the leading whitespace of the next sibling line)
//!       are dropped without touching any scan state. This is what makes
//!       groups maximal across blank separators.
//!     - Any other token closes the run: the synthesized statement is
//!       positioned at the begin coordinate of the run's last comment, and
//!       the closing token either starts a new run (a directive of another
//!       kind) or passes through.

use crate::error::ExpandError;
use crate::registry::{DirectiveKind, DirectiveRegistry};
use crate::rewriting::synthesis::{synthesize_call, CallBindings};
use crate::token::{Position, Token, TokenKind};

/// Merge directive comment runs into synthesized call statements.
pub fn rewrite(
    tokens: Vec<Token>,
    registry: &DirectiveRegistry,
    bindings: &CallBindings,
) -> Result<Vec<Token>, ExpandError> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut group: Vec<String> = Vec::new();
    let mut previous_kind = DirectiveKind::None;
    let mut previous_begin = Position::START;

    for token in tokens {
        let kind = if token.kind == TokenKind::Comment {
            registry.classify(&token.text)
        } else {
            DirectiveKind::None
        };
        let begin = token.begin;

        if kind != previous_kind && previous_kind != DirectiveKind::None {
            if token.is_filler() {
                // A separator between sibling directive lines; dropping it
                // without updating the scan state keeps the group open.
                continue;
            }
            out.extend(synthesize_call(
                &group,
                previous_kind,
                previous_begin,
                registry,
                bindings,
            )?);
            group.clear();
            if kind == DirectiveKind::None {
                out.push(token);
            } else {
                group.push(token.text);
            }
        } else if kind != DirectiveKind::None {
            group.push(token.text);
        } else {
            out.push(token);
        }

        previous_kind = kind;
        previous_begin = begin;
    }

    // The EndMarker closes any open group above; this flush only fires for
    // streams without one.
    if previous_kind != DirectiveKind::None {
        out.extend(synthesize_call(
            &group,
            previous_kind,
            previous_begin,
            registry,
            bindings,
        )?);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::{detokenize, lex};

    fn expand(source: &str) -> String {
        let tokens = lex(source).expect("source should lex");
        let rewritten = rewrite(
            tokens,
            DirectiveRegistry::standard(),
            &CallBindings::default(),
        )
        .expect("rewrite should succeed");
        detokenize(&rewritten)
    }

    #[test]
    fn test_passthrough_without_directives() {
        let source = "def f():\n    # plain comment\n    return 1\n";
        assert_eq!(expand(source), source);
    }

    #[test]
    fn test_single_directive() {
        assert_eq!(
            expand("def f():\n    #: print this\n    return 1\n"),
            "def f():\n    print(\"print this\")\n    return 1\n"
        );
    }

    #[test]
    fn test_adjacent_same_kind_comments_merge() {
        // The run's statement sits at the last comment's coordinates; the
        // first comment's line keeps only its leading whitespace.
        assert_eq!(
            expand("def f():\n    #i: one\n    #i: two\n    return 1\n"),
            "def f():\n    \n    logging.info(\"one two\")\n    return 1\n"
        );
    }

    #[test]
    fn test_blank_line_does_not_split_a_group() {
        assert_eq!(
            expand("def f():\n    #i: one\n\n    #i: two\n    return 1\n"),
            "def f():\n    \n\n    logging.info(\"one two\")\n    return 1\n"
        );
    }

    #[test]
    fn test_code_between_comments_splits_groups() {
        assert_eq!(
            expand("def f():\n    #i: one\n    x = 1\n    #i: two\n    return x\n"),
            "def f():\n    logging.info(\"one\")\n    x = 1\n    logging.info(\"two\")\n    return x\n"
        );
    }

    #[test]
    fn test_kind_change_closes_the_previous_group() {
        assert_eq!(
            expand("def f():\n    #i: info first\n    #e: then error\n    return 1\n"),
            "def f():\n    logging.info(\"info first\")\n    logging.error(\"then error\")\n    return 1\n"
        );
    }

    #[test]
    fn test_directive_at_end_of_stream_is_flushed() {
        assert_eq!(expand("#: tail"), "print(\"tail\")\n");
    }

    #[test]
    fn test_ordinary_comments_are_untouched_between_directives() {
        assert_eq!(
            expand("def f():\n    #i: logged\n    # not a directive\n    return 1\n"),
            "def f():\n    logging.info(\"logged\")\n    # not a directive\n    return 1\n"
        );
    }
}
