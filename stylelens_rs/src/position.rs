//! Byte offset to line/column conversion shared by every adapter.

use crate::types::{FileId, SourceRange};

/// Line-start table for one document.
pub(crate) struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(idx, _)| idx + 1),
        );
        Self { text, line_starts }
    }

    /// 0-based line and UTF-16 column of a byte offset.
    ///
    /// Offsets past the end clamp to the end; offsets inside a multi-byte
    /// character snap back to its start.
    pub(crate) fn position(&self, offset: usize) -> (usize, usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let col = self.text[self.line_starts[line]..offset]
            .encode_utf16()
            .count();
        (line, col)
    }

    pub(crate) fn range(&self, file: &FileId, start: usize, end: usize) -> SourceRange {
        let (start_line, start_col) = self.position(start);
        let (end_line, end_col) = self.position(end);
        SourceRange {
            file: file.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_first_line() {
        let index = LineIndex::new("abc\ndef");
        assert_eq!(index.position(0), (0, 0));
        assert_eq!(index.position(2), (0, 2));
    }

    #[test]
    fn test_position_after_newline() {
        let index = LineIndex::new("abc\ndef\n");
        assert_eq!(index.position(3), (0, 3));
        assert_eq!(index.position(4), (1, 0));
        assert_eq!(index.position(6), (1, 2));
        assert_eq!(index.position(8), (2, 0));
    }

    #[test]
    fn test_position_counts_utf16_units() {
        // 'é' is 2 bytes / 1 unit, '😀' is 4 bytes / 2 units
        let text = "é😀x";
        let index = LineIndex::new(text);
        let x = text.find('x').expect("x present");
        assert_eq!(index.position(x), (0, 3));
    }

    #[test]
    fn test_position_clamps_past_end() {
        let index = LineIndex::new("ab");
        assert_eq!(index.position(99), (0, 2));
    }

    #[test]
    fn test_range_spans_lines() {
        let file = FileId::new("a.vue");
        let index = LineIndex::new("one\ntwo\nthree");
        let range = index.range(&file, 4, 11);
        assert_eq!(range.start_line, 1);
        assert_eq!(range.start_col, 0);
        assert_eq!(range.end_line, 2);
        assert_eq!(range.end_col, 3);
    }
}
