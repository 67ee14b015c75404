//! Statement synthesis for closed comment groups.
//!
//! A closed group becomes one call statement: the comments are stripped of
//! their prefixes, joined with single spaces, wrapped in a string literal
//! (an f-string when the message interpolates values), and handed to the
//! call form of the group's kind. The one-line statement is lexed with the
//! same lexer as everything else and its tokens are re-tagged onto the line
//! and column of the group's last comment, so they slot into the stream
//! without colliding with the coordinates of later tokens.

use crate::error::ExpandError;
use crate::lexing::lex;
use crate::registry::{DirectiveKind, DirectiveRegistry};
use crate::token::{Position, Token, TokenKind};

/// Names the synthesized calls are bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallBindings {
    /// Receiver of the logging-kind calls (`logging.info(...)`).
    pub logger: String,
    /// Callable invoked by the `#:` directive (`print(...)`).
    pub callable: String,
}

impl Default for CallBindings {
    fn default() -> Self {
        CallBindings {
            logger: "logging".to_string(),
            callable: "print".to_string(),
        }
    }
}

/// Build the token run for one closed group, positioned at `at`.
///
/// An empty message (a directive with nothing after its prefix) is legal and
/// synthesizes a call with an empty string literal.
pub fn synthesize_call(
    comments: &[String],
    kind: DirectiveKind,
    at: Position,
    registry: &DirectiveRegistry,
    bindings: &CallBindings,
) -> Result<Vec<Token>, ExpandError> {
    if kind == DirectiveKind::None {
        return Ok(Vec::new());
    }

    let message = comments
        .iter()
        .map(|comment| registry.strip_prefix(comment))
        .collect::<Vec<_>>()
        .join(" ");

    // A message mentioning both braces interpolates values from the lexical
    // scope of the rewritten definition at statement-execution time.
    let literal = if message.contains('{') && message.contains('}') {
        format!("f\"{message}\"")
    } else {
        format!("\"{message}\"")
    };

    let statement = match kind.method_name() {
        Some(method) => format!("{}.{}({})\n", bindings.logger, method, literal),
        None => format!("{}({})\n", bindings.callable, literal),
    };

    // Lex the one-line statement independently, then shift it onto the
    // group's coordinates. The statement is a single line, so only columns
    // move; the trailing newline token keeps later lines where they were.
    let tokens = lex(&statement)?;
    Ok(tokens
        .into_iter()
        .filter(|token| token.kind != TokenKind::EndMarker)
        .map(|mut token| {
            token.begin = Position::new(at.line, at.col + token.begin.col);
            token.end = Position::new(at.line, at.col + token.end.col);
            token
        })
        .collect())
}
