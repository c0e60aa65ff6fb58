//! Diagnostic labels and editor highlight ranges.

use std::fmt;

use serde::Serialize;

use crate::response::Diagnostic;

/// Editor-space range: 0-based lines and start column, exclusive end column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightRange {
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl HighlightRange {
    /// Convert a 1-based inclusive span. The last column is kept as is so the
    /// last character stays inside the highlight.
    pub fn from_span(first_line: u32, first_column: u32, last_line: u32, last_column: u32) -> Self {
        Self {
            start_line: first_line.saturating_sub(1),
            start_column: first_column.saturating_sub(1),
            end_line: last_line.saturating_sub(1),
            end_column: last_column,
        }
    }
}

impl From<&Diagnostic> for HighlightRange {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self::from_span(
            diagnostic.first_line,
            diagnostic.first_column,
            diagnostic.last_line,
            diagnostic.last_column,
        )
    }
}

/// "Line N" or "Lines N-M"
pub fn line_label(diagnostic: &Diagnostic) -> String {
    if diagnostic.is_multiline() {
        format!("Lines {}-{}", diagnostic.first_line, diagnostic.last_line)
    } else {
        format!("Line {}", diagnostic.last_line)
    }
}

/// The "ERROR @" banner shown next to the source heading for the selected diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentError {
    pub index: usize,
    pub label: String,
    pub message: String,
}

impl From<&Diagnostic> for CurrentError {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            index: diagnostic.index,
            label: line_label(diagnostic),
            message: diagnostic.message.clone(),
        }
    }
}

impl fmt::Display for CurrentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR @ {}: {}", self.label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(first_line: u32, first_column: u32, last_line: u32, last_column: u32) -> Diagnostic {
        Diagnostic {
            index: 1,
            first_line,
            last_line,
            first_column,
            last_column,
            message: "element \"foo\" not allowed here".to_string(),
            extract: String::new(),
        }
    }

    #[test]
    fn test_range_shifts_all_but_last_column() {
        let range = HighlightRange::from(&diagnostic(5, 3, 7, 10));
        assert_eq!(
            range,
            HighlightRange {
                start_line: 4,
                start_column: 2,
                end_line: 6,
                end_column: 10,
            }
        );
    }

    #[test]
    fn test_range_never_underflows() {
        let range = HighlightRange::from_span(0, 0, 0, 0);
        assert_eq!(range.start_line, 0);
        assert_eq!(range.start_column, 0);
    }

    #[test]
    fn test_labels() {
        assert_eq!(line_label(&diagnostic(3, 1, 3, 4)), "Line 3");
        assert_eq!(line_label(&diagnostic(3, 1, 8, 4)), "Lines 3-8");
    }

    #[test]
    fn test_current_error_display() {
        let current = CurrentError::from(&diagnostic(2, 1, 2, 4));
        assert_eq!(
            current.to_string(),
            "ERROR @ Line 2: element \"foo\" not allowed here"
        );
    }
}
