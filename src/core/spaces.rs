//! Space counting primitives shared by both strategies

use std::fs;
use std::path::Path;

use crate::core::model::FileCount;

/// The only character that counts. Tabs, newlines and other whitespace do not.
pub const SPACE: char = ' ';

/// Count occurrences of U+0020 in a piece of text
#[inline]
pub fn count_spaces(text: &str) -> u64 {
    text.chars().filter(|&c| c == SPACE).count() as u64
}

/// Read a whole file as strict UTF-8 and count its spaces.
///
/// Any read or decode failure collapses to [`FileCount::Failed`].
pub fn count_file(path: &Path) -> FileCount {
    match fs::read_to_string(path) {
        Ok(content) => FileCount::Counted(count_spaces(&content)),
        Err(e) => FileCount::Failed(e.to_string()),
    }
}

/// Byte ranges of each line in `text`, split on `\n` or `\r\n`.
/// Mirrors [`str::lines`], but yields ranges so line tasks can share one buffer.
pub fn line_ranges(text: &str) -> Vec<std::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for (idx, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            let end = if idx > start && text.as_bytes()[idx - 1] == b'\r' {
                idx - 1
            } else {
                idx
            };
            ranges.push(start..end);
            start = idx + 1;
        }
    }

    if start < text.len() {
        ranges.push(start..text.len());
    }

    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_spaces_literal_only() {
        assert_eq!(count_spaces("a b c"), 2);
        assert_eq!(count_spaces("  "), 2);
        assert_eq!(count_spaces(""), 0);
        // tab, newline, carriage return, NBSP, em space
        assert_eq!(count_spaces("\t\n\r\u{00A0}\u{2003}"), 0);
    }

    #[test]
    fn test_count_spaces_multibyte() {
        assert_eq!(count_spaces("你好 世界 "), 2);
    }

    #[test]
    fn test_line_ranges_match_str_lines() {
        let cases = [
            "",
            "one",
            "one\n",
            "one\ntwo",
            "a b\r\nc d\r\n",
            "\n\n",
            " x \n  y  \n",
        ];
        for text in cases {
            let from_ranges: Vec<&str> = line_ranges(text).into_iter().map(|r| &text[r]).collect();
            let expected: Vec<&str> = text.lines().collect();
            assert_eq!(from_ranges, expected, "case {:?}", text);
        }
    }

    #[test]
    fn test_count_file_counts_spaces() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("a.txt");
        fs::write(&path, "a b c\n d \n").unwrap();
        assert_eq!(count_file(&path), FileCount::Counted(4));
    }

    #[test]
    fn test_count_file_invalid_utf8_is_failed() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bin.dat");
        fs::write(&path, [0xff, 0xfe, b' ', b' ']).unwrap();

        let count = count_file(&path);
        assert!(count.failure().is_some());
        assert_eq!(count.contribution(), 0);
    }

    #[test]
    fn test_count_file_missing_is_failed() {
        let count = count_file(Path::new("/nonexistent/spacebench.txt"));
        assert!(count.failure().is_some());
        assert_eq!(count.contribution(), 0);
    }
}
