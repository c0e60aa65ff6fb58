//! In-memory editor buffer.

use std::collections::BTreeMap;

use crate::highlight::HighlightRange;

use super::{EditorSettings, MarkerId, SourceEditor};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub range: HighlightRange,
    pub class: String,
}

/// Plain text buffer tracking cursor, scroll position and markers
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    settings: EditorSettings,
    read_only: bool,
    scroll_line: u32,
    cursor: (u32, u32),
    markers: BTreeMap<MarkerId, Marker>,
    next_marker: u32,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// (line, column) as last passed to `goto_line`
    pub fn cursor(&self) -> (u32, u32) {
        self.cursor
    }

    pub fn scroll_line(&self) -> u32 {
        self.scroll_line
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Text covered by a marker, lines joined with '\n'
    pub fn marked_text(&self, id: MarkerId) -> Option<String> {
        let range = self.markers.get(&id)?.range;
        Some(self.slice(range))
    }

    /// Characters inside a range. Columns count chars, the end column is exclusive.
    pub fn slice(&self, range: HighlightRange) -> String {
        let mut out = Vec::new();

        for (idx, line) in self.text.lines().enumerate() {
            let idx = idx as u32;
            if idx < range.start_line || idx > range.end_line {
                continue;
            }
            let chars: Vec<char> = line.chars().collect();
            let start = if idx == range.start_line {
                (range.start_column as usize).min(chars.len())
            } else {
                0
            };
            let end = if idx == range.end_line {
                (range.end_column as usize).min(chars.len())
            } else {
                chars.len()
            };
            out.push(chars[start..end.max(start)].iter().collect::<String>());
        }

        out.join("\n")
    }
}

impl SourceEditor for TextBuffer {
    fn load(&mut self, text: &str) {
        self.text = text.to_string();
        self.markers.clear();
        self.cursor = (1, 0);
        self.scroll_line = 1;
    }

    fn configure(&mut self, settings: &EditorSettings) {
        self.settings = settings.clone();
        self.read_only = settings.read_only;
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn scroll_to_line(&mut self, line: u32) {
        self.scroll_line = line;
    }

    fn goto_line(&mut self, line: u32, column: u32) {
        self.cursor = (line, column);
    }

    fn add_marker(&mut self, range: HighlightRange, class: &str) -> MarkerId {
        self.next_marker += 1;
        let id = MarkerId(self.next_marker);
        self.markers.insert(
            id,
            Marker {
                range,
                class: class.to_string(),
            },
        );
        id
    }

    fn remove_marker(&mut self, id: MarkerId) -> bool {
        self.markers.remove(&id).is_some()
    }
}
