//! Line/column bookkeeping for a single source file.
//!
//! Precomputed line-start table with binary search for offset-to-line-
//! column translation, trimmed to the single-file case every
//! `validate*`/`parse*` entry point operates on.

/// Maximum length of an `error_text` snippet.
pub const MAX_ERROR_TEXT_LEN: usize = 80;

/// A source buffer with a precomputed line-start table.
#[derive(Clone, Debug)]
pub struct SourceFile {
    content: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Builds a `SourceFile`, normalizing CRLF to LF for line counting and
    /// stripping a leading UTF-8 BOM.
    pub fn new(content: impl Into<String>) -> Self {
        let mut content = content.into();
        if content.starts_with('\u{feff}') {
            content = content.trim_start_matches('\u{feff}').to_string();
        }
        if content.contains('\r') {
            content = content.replace("\r\n", "\n").replace('\r', "\n");
        }
        let line_starts = Self::compute_line_starts(&content);
        Self { content, line_starts }
    }

    fn compute_line_starts(content: &str) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, ch) in content.char_indices() {
            if ch == '\n' {
                starts.push(i + 1);
            }
        }
        starts
    }

    /// The (possibly normalized) source text.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Total number of lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into 1-based `(line, column)`.
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.content.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line_idx];
        let column = (offset - line_start + 1) as u32;
        (line_idx as u32 + 1, column)
    }

    /// The content of a single 1-based line, without its trailing newline.
    pub fn line_text(&self, line: u32) -> &str {
        let idx = (line as usize).saturating_sub(1);
        let start = match self.line_starts.get(idx) {
            Some(&s) => s,
            None => return "",
        };
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(self.content.len());
        let end = end.max(start);
        self.content[start..end.min(self.content.len())]
            .trim_end_matches('\n')
    }

    /// Extracts a bounded-width snippet around `offset`, for a
    /// diagnostic's `error_text` field. The snippet is
    /// drawn from the offending line only, truncated to
    /// [`MAX_ERROR_TEXT_LEN`] characters, keeping the offending column
    /// centered when the line is longer than the budget.
    pub fn snippet_at(&self, offset: usize) -> String {
        let (line, column) = self.offset_to_line_col(offset);
        let text = self.line_text(line);
        if text.chars().count() <= MAX_ERROR_TEXT_LEN {
            return text.to_string();
        }
        let col0 = (column as usize).saturating_sub(1);
        let half = MAX_ERROR_TEXT_LEN / 2;
        let start = col0.saturating_sub(half);
        let chars: Vec<char> = text.chars().collect();
        let end = (start + MAX_ERROR_TEXT_LEN).min(chars.len());
        let start = end.saturating_sub(MAX_ERROR_TEXT_LEN).min(start);
        chars[start..end].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_normalizes_crlf() {
        let f = SourceFile::new("\u{feff}a\r\nb\r\n");
        assert_eq!(f.content(), "a\nb\n");
    }

    #[test]
    fn offset_to_line_col_basic() {
        let f = SourceFile::new("ab\ncd\nef");
        assert_eq!(f.offset_to_line_col(0), (1, 1));
        assert_eq!(f.offset_to_line_col(3), (2, 1));
        assert_eq!(f.offset_to_line_col(7), (3, 2));
    }

    #[test]
    fn line_text_returns_line_without_newline() {
        let f = SourceFile::new("first\nsecond\nthird");
        assert_eq!(f.line_text(2), "second");
        assert_eq!(f.line_text(3), "third");
    }

    #[test]
    fn snippet_truncates_long_lines() {
        let long = "x".repeat(200);
        let f = SourceFile::new(long.clone());
        let snippet = f.snippet_at(100);
        assert!(snippet.chars().count() <= MAX_ERROR_TEXT_LEN);
    }
}
