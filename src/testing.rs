//! Helpers for writing fixtures in tests.

/// Turn an indented raw-string fixture into real source text.
///
/// Leading and trailing blank lines go away, the common leading margin of the
/// non-blank lines is stripped, and the text always ends with a newline. This
/// lets fixtures sit indented inside test functions without the indentation
/// leaking into the lexed text.
pub fn declare(source: &str) -> String {
    let mut lines: Vec<&str> = source.lines().collect();
    while lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let margin = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    let mut out = String::new();
    for line in &lines {
        if line.trim().is_empty() {
            out.push('\n');
        } else {
            out.push_str(&line[margin..]);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_the_common_margin() {
        let source = declare(
            r#"
            def f():
                return 1
        "#,
        );
        assert_eq!(source, "def f():\n    return 1\n");
    }

    #[test]
    fn test_keeps_relative_indentation_above_the_margin() {
        let source = declare(
            r#"
                @log
                def m(self):
                    pass
        "#,
        );
        assert_eq!(source, "@log\ndef m(self):\n    pass\n");
    }

    #[test]
    fn test_blank_interior_lines_become_empty() {
        let source = declare("\n    a = 1\n\n    b = 2\n");
        assert_eq!(source, "a = 1\n\nb = 2\n");
    }
}
