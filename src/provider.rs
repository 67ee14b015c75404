//! Source retrieval for declaration spans.
//!
//! The pipeline works on text it is handed; something still has to fetch
//! that text given "lines 14..=20 of this file". [SourceProvider] is that
//! seam, so tests can feed captured text from memory while the CLI reads
//! real files.

use std::fs;
use std::io;
use std::path::PathBuf;

/// A contiguous run of lines in one file, 1-based and inclusive at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationSpan {
    pub path: PathBuf,
    pub first_line: u32,
    pub last_line: u32,
}

impl DeclarationSpan {
    pub fn new(path: impl Into<PathBuf>, first_line: u32, last_line: u32) -> Self {
        DeclarationSpan {
            path: path.into(),
            first_line,
            last_line,
        }
    }
}

/// Fetches the text a span points at.
pub trait SourceProvider {
    fn retrieve(&self, span: &DeclarationSpan) -> io::Result<String>;
}

/// Retrieves spans from files on disk.
#[derive(Debug, Default)]
pub struct FileSource;

impl SourceProvider for FileSource {
    fn retrieve(&self, span: &DeclarationSpan) -> io::Result<String> {
        let contents = fs::read_to_string(&span.path)?;
        let first = span.first_line.saturating_sub(1) as usize;
        let count = (span.last_line.saturating_sub(span.first_line) as usize).saturating_add(1);
        Ok(contents
            .split_inclusive('\n')
            .skip(first)
            .take(count)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn spanned(contents: &str, first: u32, last: u32) -> String {
        let dir = std::env::temp_dir();
        let path = dir.join(format!(
            "logcraft-span-{}-{first}-{last}.py",
            std::process::id()
        ));
        File::create(&path)
            .and_then(|mut f| f.write_all(contents.as_bytes()))
            .expect("fixture file should be writable");
        let text = FileSource
            .retrieve(&DeclarationSpan::new(&path, first, last))
            .expect("span should be readable");
        let _ = std::fs::remove_file(&path);
        text
    }

    #[test]
    fn test_retrieves_an_inner_span() {
        let text = spanned("a = 1\n@log\ndef f():\n    pass\nb = 2\n", 2, 4);
        assert_eq!(text, "@log\ndef f():\n    pass\n");
    }

    #[test]
    fn test_single_line_span() {
        assert_eq!(spanned("a = 1\nb = 2\n", 2, 2), "b = 2\n");
    }

    #[test]
    fn test_span_past_the_end_stops_at_the_end() {
        assert_eq!(spanned("a = 1\nb = 2\n", 2, 9), "b = 2\n");
    }
}
