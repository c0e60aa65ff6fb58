//! Source Editor
//!
//! The capabilities the session needs from a code editor, and an in-memory
//! buffer implementing them.

pub mod buffer;

pub use buffer::TextBuffer;

use serde::Serialize;

use crate::highlight::HighlightRange;

/// CSS class the selection marker is drawn with
pub const SELECTION_MARKER_CLASS: &str = "ace_selection";

/// Handle to an installed highlight marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MarkerId(pub u32);

/// A key binding with per-platform chords
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyBinding {
    pub name: String,
    pub win: String,
    pub mac: String,
}

/// Editor configuration applied whenever source is loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorSettings {
    pub read_only: bool,
    pub wrap: bool,
    pub highlight_active_line: bool,
    pub theme: String,
    pub mode: String,
    pub save_binding: KeyBinding,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            read_only: false,
            wrap: true,
            highlight_active_line: true,
            theme: "ace/theme/eclipse".to_string(),
            mode: "ace/mode/xml".to_string(),
            save_binding: KeyBinding {
                name: "saveFile".to_string(),
                win: "Ctrl-S".to_string(),
                mac: "Command-S".to_string(),
            },
        }
    }
}

/// Editor widget contract
pub trait SourceEditor {
    /// Replace the whole buffer
    fn load(&mut self, text: &str);

    fn configure(&mut self, settings: &EditorSettings);

    fn set_read_only(&mut self, read_only: bool);

    fn text(&self) -> String;

    /// Bring a 1-based line into view
    fn scroll_to_line(&mut self, line: u32);

    /// Move the cursor to a 1-based line
    fn goto_line(&mut self, line: u32, column: u32);

    fn add_marker(&mut self, range: HighlightRange, class: &str) -> MarkerId;

    /// Returns false if the marker was not installed
    fn remove_marker(&mut self, id: MarkerId) -> bool;
}
