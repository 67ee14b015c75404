//! Line structure transformation: raw tokens to positioned tokens.
//!
//! This pass walks the raw token stream once and produces the positioned
//! [Token] stream the rewriter operates on. It is where the distinctions the
//! rewriter and normalizer rely on are made:
//!
//!     - `Newline` vs `Nl`: the newline of a code-carrying line terminates a
//!       logical line; the newline of a blank or comment-only line (or any
//!       newline inside open brackets) is mere filler.
//!     - `Indent`/`Dedent` vs `Whitespace`: indentation is tracked on code
//!       lines only. Blank and comment-only lines never change the level and
//!       keep their leading whitespace as an ordinary token, so a directive
//!       comment sitting above the first statement of a block does not
//!       disturb the block structure.
//!
//! The rationale for keeping this separate from the logos pass is the same as
//! for brace-like syntaxes lowered from indentation elsewhere: the raw lexer
//! stays vanilla, and all stateful line logic lives in one transformation.

use crate::error::ExpandError;
use crate::lexing::base_tokenization::RawToken;
use crate::token::{Position, Token, TokenKind};

/// Tag raw tokens with exact positions and classify line structure.
///
/// `raw` must be the contiguous stream produced by
/// [tokenize](super::base_tokenization::tokenize) over the same `source`.
pub fn structure(source: &str, raw: &[(RawToken, logos::Span)]) -> Result<Vec<Token>, ExpandError> {
    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let line_text = |line: u32| -> String {
        lines
            .get(line as usize - 1)
            .map(|text| text.to_string())
            .unwrap_or_default()
    };

    let mut out: Vec<Token> = Vec::new();
    let mut stack: Vec<u32> = vec![0];
    let mut depth: usize = 0;
    let mut pos = Position::START;
    let mut line_has_code = false;
    let mut at_line_start = true;
    let mut i = 0;

    let push = |out: &mut Vec<Token>, pos: &mut Position, kind: TokenKind, text: &str| {
        let begin = *pos;
        let end = begin.advance(text);
        out.push(Token {
            kind,
            text: text.to_string(),
            begin,
            end,
            source_line: line_text(begin.line),
        });
        *pos = end;
    };

    while i < raw.len() {
        let (token, span) = &raw[i];
        let text = &source[span.clone()];

        if at_line_start && depth == 0 {
            at_line_start = false;

            // Split off the line's leading whitespace, then classify the line
            // by what follows it.
            let (leading, head_index) = if matches!(token, RawToken::Whitespace) {
                (Some(text), i + 1)
            } else {
                (None, i)
            };
            let head = raw.get(head_index).map(|(kind, _)| *kind);
            let width = leading.map(|ws| ws.chars().count() as u32).unwrap_or(0);

            match head {
                // Blank line, or trailing whitespace at end of input: the
                // indentation level is untouched.
                None | Some(RawToken::Newline) => {
                    if let Some(ws) = leading {
                        push(&mut out, &mut pos, TokenKind::Whitespace, ws);
                        i += 1;
                    }
                    continue;
                }
                // Comment-only lines never change the indentation level.
                Some(RawToken::Comment) => {
                    if let Some(ws) = leading {
                        push(&mut out, &mut pos, TokenKind::Whitespace, ws);
                        i += 1;
                    }
                    continue;
                }
                // A code line: reconcile the indentation stack.
                Some(_) => {
                    let current = *stack.last().expect("indentation stack is never empty");
                    if width > current {
                        stack.push(width);
                        push(
                            &mut out,
                            &mut pos,
                            TokenKind::Indent,
                            leading.expect("an indent implies leading whitespace"),
                        );
                        i += 1;
                    } else {
                        if let Some(ws) = leading {
                            push(&mut out, &mut pos, TokenKind::Whitespace, ws);
                            i += 1;
                        }
                        while *stack.last().expect("stack keeps its base") > width {
                            stack.pop();
                            out.push(Token {
                                kind: TokenKind::Dedent,
                                text: String::new(),
                                begin: pos,
                                end: pos,
                                source_line: line_text(pos.line),
                            });
                        }
                        if *stack.last().expect("stack keeps its base") != width {
                            return Err(ExpandError::Indentation { line: pos.line });
                        }
                    }
                    continue;
                }
            }
        }

        match token {
            RawToken::Newline => {
                let kind = if depth > 0 || !line_has_code {
                    TokenKind::Nl
                } else {
                    TokenKind::Newline
                };
                let begin = pos;
                // Newline tokens end on their own line; the cursor moves to
                // the next line afterwards. This keeps the coordinate
                // arithmetic of synthesized statements one-dimensional.
                let end = Position::new(begin.line, begin.col + text.chars().count() as u32);
                out.push(Token {
                    kind,
                    text: text.to_string(),
                    begin,
                    end,
                    source_line: line_text(begin.line),
                });
                pos = Position::new(begin.line + 1, 0);
                line_has_code = false;
                if depth == 0 {
                    at_line_start = true;
                }
            }
            RawToken::Whitespace | RawToken::Continuation => {
                push(&mut out, &mut pos, TokenKind::Whitespace, text);
            }
            RawToken::Comment => {
                push(&mut out, &mut pos, TokenKind::Comment, text);
            }
            RawToken::Name => {
                line_has_code = true;
                push(&mut out, &mut pos, TokenKind::Name, text);
            }
            RawToken::Number => {
                line_has_code = true;
                push(&mut out, &mut pos, TokenKind::Number, text);
            }
            RawToken::Str => {
                line_has_code = true;
                push(&mut out, &mut pos, TokenKind::Str, text);
            }
            RawToken::Op => {
                line_has_code = true;
                for ch in text.chars() {
                    match ch {
                        '(' | '[' | '{' => depth += 1,
                        ')' | ']' | '}' => depth = depth.saturating_sub(1),
                        _ => {}
                    }
                }
                push(&mut out, &mut pos, TokenKind::Op, text);
            }
        }
        i += 1;
    }

    // A non-empty last line without its newline gets a synthetic, empty one,
    // so every logical line is terminated.
    if pos.col > 0 {
        let kind = if depth > 0 || !line_has_code {
            TokenKind::Nl
        } else {
            TokenKind::Newline
        };
        out.push(Token {
            kind,
            text: String::new(),
            begin: pos,
            end: Position::new(pos.line, pos.col + 1),
            source_line: line_text(pos.line),
        });
        pos = Position::new(pos.line + 1, 0);
    }

    while stack.len() > 1 {
        stack.pop();
        out.push(Token {
            kind: TokenKind::Dedent,
            text: String::new(),
            begin: pos,
            end: pos,
            source_line: String::new(),
        });
    }
    out.push(Token {
        kind: TokenKind::EndMarker,
        text: String::new(),
        begin: pos,
        end: pos,
        source_line: String::new(),
    });

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexing::lex;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .expect("source should lex")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn concat(source: &str) -> String {
        lex(source)
            .expect("source should lex")
            .iter()
            .map(|token| token.text.as_str())
            .collect()
    }

    #[test]
    fn test_simple_definition() {
        use TokenKind::*;
        assert_eq!(
            kinds("def f():\n    return 1\n"),
            vec![
                Name, Whitespace, Name, Op, Op, Op, Newline, // def f():
                Indent, Name, Whitespace, Number, Newline, // return 1
                Dedent, EndMarker,
            ]
        );
    }

    #[test]
    fn test_comment_only_line_is_nl_and_keeps_plain_whitespace() {
        use TokenKind::*;
        assert_eq!(
            kinds("def f():\n    # note\n    return 1\n"),
            vec![
                Name, Whitespace, Name, Op, Op, Op, Newline, // def f():
                Whitespace, Comment, Nl, // comment line: no Indent
                Indent, Name, Whitespace, Number, Newline, // return 1
                Dedent, EndMarker,
            ]
        );
    }

    #[test]
    fn test_blank_lines_do_not_change_indentation() {
        use TokenKind::*;
        assert_eq!(
            kinds("def f():\n    x = 1\n\n    return x\n"),
            vec![
                Name, Whitespace, Name, Op, Op, Op, Newline, // def f():
                Indent, Name, Whitespace, Op, Whitespace, Number, Newline, // x = 1
                Nl, // blank line
                Whitespace, Name, Whitespace, Name, Newline, // return x
                Dedent, EndMarker,
            ]
        );
    }

    #[test]
    fn test_indent_token_carries_full_leading_whitespace() {
        let tokens = lex("if x:\n        y\n").unwrap();
        let indent = tokens
            .iter()
            .find(|token| token.kind == TokenKind::Indent)
            .expect("stream should contain an Indent");
        assert_eq!(indent.text, "        ");
        assert_eq!(indent.begin, Position::new(2, 0));
        assert_eq!(indent.end, Position::new(2, 8));
    }

    #[test]
    fn test_dedent_positions() {
        let tokens = lex("if x:\n    y\nz\n").unwrap();
        let dedent = tokens
            .iter()
            .find(|token| token.kind == TokenKind::Dedent)
            .expect("stream should contain a Dedent");
        assert_eq!(dedent.begin, Position::new(3, 0));
        assert_eq!(dedent.text, "");
    }

    #[test]
    fn test_docstring_is_one_code_token_across_lines() {
        use TokenKind::*;
        let tokens = lex("def f():\n    \"\"\"Doc.\n    \"\"\"\n    return 1\n").unwrap();
        assert_eq!(
            tokens.iter().map(|token| token.kind).collect::<Vec<_>>(),
            vec![
                Name, Whitespace, Name, Op, Op, Op, Newline, // def f():
                Indent, Str, Newline, // the docstring, lines 2-3
                Whitespace, Name, Whitespace, Number, Newline, // return 1
                Dedent, EndMarker,
            ]
        );
        let docstring = &tokens[8];
        assert_eq!(docstring.begin, Position::new(2, 4));
        assert_eq!(docstring.end, Position::new(3, 7));
    }

    #[test]
    fn test_newline_inside_brackets_is_nl() {
        use TokenKind::*;
        assert_eq!(
            kinds("f(\n    1,\n)\n"),
            vec![
                Name, Op, Nl, // f(
                Whitespace, Number, Op, Nl, // 1,
                Op, Newline, // )
                EndMarker,
            ]
        );
    }

    #[test]
    fn test_missing_final_newline_gets_synthetic_one() {
        let tokens = lex("return 1").unwrap();
        let newline = &tokens[tokens.len() - 2];
        assert_eq!(newline.kind, TokenKind::Newline);
        assert_eq!(newline.text, "");
        assert_eq!(newline.begin, Position::new(1, 8));
        assert_eq!(tokens.last().unwrap().kind, TokenKind::EndMarker);
    }

    #[test]
    fn test_inconsistent_dedent_is_an_error() {
        let err = lex("if x:\n        y\n    z\n").unwrap_err();
        assert_eq!(err, ExpandError::Indentation { line: 3 });
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let sources = [
            "def f():\n    #: print this\n    return 1\n",
            "class C:\n\n    def m(self):\n        pass\n",
            "x = [\n    1,\n    2,\n]\n",
            "a = 1 \\\n    + 2\n",
            "def f():\n    \"\"\"Summary.\n\n    Details.\n    \"\"\"\n    return 1\n",
            "   \n\t\n# only comments\n",
            "",
        ];
        for source in sources {
            assert_eq!(concat(source), source, "round-trip failed for {source:?}");
        }
    }

    #[test]
    fn test_tokens_are_ordered_by_begin() {
        let tokens = lex("def f():\n    # c\n    if x:\n        y\n    return 1\n").unwrap();
        for pair in tokens.windows(2) {
            assert!(
                pair[0].begin <= pair[1].begin,
                "tokens out of order: {pair:?}"
            );
        }
    }

    #[test]
    fn test_source_line_is_the_physical_line() {
        let tokens = lex("a = 1\nb = 2\n").unwrap();
        let b = tokens
            .iter()
            .find(|token| token.text == "b")
            .expect("token b");
        assert_eq!(b.source_line, "b = 2\n");
    }
}
