//! Ambient indentation removal.
//!
//! A definition captured from inside an enclosing scope (a method inside a
//! class) carries that scope's indentation on every line. Its token stream
//! then starts with an `Indent` whose width is exactly the ambient amount,
//! because the captured text is lexed standalone. Removing that amount from
//! every line turns the stream into a definition compilable at top level.
//!
//! Column bookkeeping per token kind:
//!
//!     - `Indent` and line-leading `Whitespace` (column 0) carry the line's
//!       leading whitespace in their text, so the text itself is trimmed and
//!       only the end column moves.
//!     - `EndMarker` and `Dedent`s sitting at column 0 carry no horizontal
//!       position worth shifting.
//!     - Everything else shifts both coordinates left by the ambient width,
//!       saturating at column 0 (blank lines shorter than the ambient width).

use crate::token::{Token, TokenKind};

/// Strip the ambient indentation of a nested definition.
///
/// If the stream does not start with an `Indent` token the definition was
/// already at top level and the stream is returned unchanged.
pub fn remove_indent(tokens: Vec<Token>) -> Vec<Token> {
    let width = match tokens.first() {
        Some(first) if first.kind == TokenKind::Indent => first.end.col,
        _ => return tokens,
    };

    tokens
        .into_iter()
        .map(|mut token| {
            match token.kind {
                TokenKind::Indent => trim_leading(&mut token, width),
                TokenKind::Whitespace if token.begin.col == 0 => trim_leading(&mut token, width),
                TokenKind::EndMarker => {}
                TokenKind::Dedent if token.begin.col == 0 && token.end.col == 0 => {}
                _ => {
                    token.begin.col = token.begin.col.saturating_sub(width);
                    token.end.col = token.end.col.saturating_sub(width);
                }
            }
            token
        })
        .collect()
}

/// Drop up to `width` leading characters from a whitespace-carrying token.
fn trim_leading(token: &mut Token, width: u32) {
    let removed = token.text.chars().take(width as usize).count() as u32;
    token.text = token.text.chars().skip(width as usize).collect();
    token.end.col = token.end.col.saturating_sub(removed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::{detokenize, lex};

    fn normalized(source: &str) -> String {
        let tokens = lex(source).expect("source should lex");
        detokenize(&remove_indent(tokens))
    }

    #[test]
    fn test_top_level_definition_is_unchanged() {
        let source = "def f():\n    return 1\n";
        assert_eq!(normalized(source), source);
    }

    #[test]
    fn test_nested_definition_becomes_standalone() {
        assert_eq!(
            normalized("    def m(self):\n        return self\n"),
            "def m(self):\n    return self\n"
        );
    }

    #[test]
    fn test_two_levels_of_body_keep_relative_indentation() {
        assert_eq!(
            normalized("    def m(self):\n        if self.x:\n            return 1\n        return 0\n"),
            "def m(self):\n    if self.x:\n        return 1\n    return 0\n"
        );
    }

    #[test]
    fn test_comment_lines_shift_with_the_body() {
        assert_eq!(
            normalized("    def m(self):\n        # note\n        return self\n"),
            "def m(self):\n    # note\n    return self\n"
        );
    }

    #[test]
    fn test_blank_lines_survive() {
        assert_eq!(
            normalized("    def m(self):\n\n        return self\n"),
            "def m(self):\n\n    return self\n"
        );
    }

    #[test]
    fn test_short_blank_line_whitespace_is_trimmed_to_empty() {
        // A blank line carrying less whitespace than the ambient width loses
        // what it has and stays blank.
        assert_eq!(
            normalized("    def m(self):\n  \n        return self\n"),
            "def m(self):\n\n    return self\n"
        );
    }
}
