//! Rewrite marker stripping.
//!
//! Captured text arrives with the annotation that triggered the rewrite still
//! on top. The marker must be the outermost decorator: if any other decorator
//! sits above it, the captured text would start with that decorator instead,
//! and expanding it would silently re-wrap an already-wrapped definition.

use crate::error::ExpandError;

/// The bare rewrite marker.
pub const MARKER: &str = "@log";
/// The head of the parameterized invocation.
pub const MARKER_CALL: &str = "@log(";

/// Remove the marker line from captured text.
///
/// Leading blank lines are skipped and removed together with the marker. The
/// first non-blank line, trimmed, must be exactly [MARKER] or start with
/// [MARKER_CALL]; anything else raises [ExpandError::DecoratorOrder].
pub fn strip_marker(source: &str) -> Result<&str, ExpandError> {
    let mut rest = source;
    loop {
        let (line, tail) = match rest.split_once('\n') {
            Some((line, tail)) => (line, tail),
            None => (rest, ""),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if tail.is_empty() {
                return Err(ExpandError::DecoratorOrder);
            }
            rest = tail;
            continue;
        }
        return if trimmed == MARKER || trimmed.starts_with(MARKER_CALL) {
            Ok(tail)
        } else {
            Err(ExpandError::DecoratorOrder)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bare_marker() {
        assert_eq!(
            strip_marker("@log\ndef f():\n    pass\n").unwrap(),
            "def f():\n    pass\n"
        );
    }

    #[test]
    fn test_strips_parameterized_marker() {
        assert_eq!(
            strip_marker("@log(logger=app_log)\ndef f():\n    pass\n").unwrap(),
            "def f():\n    pass\n"
        );
    }

    #[test]
    fn test_strips_indented_marker() {
        // A method captured inside a class keeps its indentation; the marker
        // line is trimmed before comparison but the body is untouched.
        assert_eq!(
            strip_marker("    @log\n    def m(self):\n        pass\n").unwrap(),
            "    def m(self):\n        pass\n"
        );
    }

    #[test]
    fn test_skips_leading_blank_lines() {
        assert_eq!(strip_marker("\n   \n@log\ndef f():\n").unwrap(), "def f():\n");
    }

    #[test]
    fn test_other_decorator_first_is_an_order_error() {
        let err = strip_marker("@cached\n@log\ndef f():\n    pass\n").unwrap_err();
        assert_eq!(err, ExpandError::DecoratorOrder);
    }

    #[test]
    fn test_similarly_named_decorator_is_rejected() {
        assert_eq!(
            strip_marker("@log_me\ndef f():\n").unwrap_err(),
            ExpandError::DecoratorOrder
        );
        assert_eq!(
            strip_marker("@logx\ndef f():\n").unwrap_err(),
            ExpandError::DecoratorOrder
        );
    }

    #[test]
    fn test_blank_input_is_an_order_error() {
        assert_eq!(strip_marker("").unwrap_err(), ExpandError::DecoratorOrder);
        assert_eq!(
            strip_marker("\n  \n").unwrap_err(),
            ExpandError::DecoratorOrder
        );
    }
}
