//! Content-editable text binding.
//!
//! While the user edits, the display may drift from the document. Nothing is
//! written until blur (or Enter on a single-line field), and a model push
//! only overwrites the display when the document value itself moved.

use flyer_document::FieldPath;
use tracing::debug;

use super::EditSink;
use crate::errors::EditorError;
use crate::host::Clipboard;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Synced,
    Editing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBinding {
    path: FieldPath,
    multiline: bool,

    /// Text on screen
    display: String,

    /// Caret position in chars
    caret: usize,

    /// Document value as of the last sync
    last_known: String,

    state: EditState,
}

impl TextBinding {
    pub fn new(path: FieldPath, multiline: bool, value: &str) -> Self {
        Self {
            path,
            multiline,
            display: value.to_string(),
            caret: value.chars().count(),
            last_known: value.to_string(),
            state: EditState::Synced,
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Display differs from the document
    pub fn is_dirty(&self) -> bool {
        self.display != self.last_known
    }

    /// Model to view. Returns true when the display was overwritten.
    pub fn sync(&mut self, value: &str) -> bool {
        if value == self.last_known {
            return false;
        }

        self.last_known = value.to_string();
        self.display = value.to_string();
        self.caret = self.char_len();
        true
    }

    pub fn focus(&mut self) {
        self.state = EditState::Editing;
        self.caret = self.char_len();
    }

    /// Host reports the whole edited content
    pub fn input(&mut self, text: &str) {
        self.state = EditState::Editing;
        self.display = self.clean(text);
        self.caret = self.char_len();
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.char_len());
    }

    /// Typed text at the caret
    pub fn insert_text(&mut self, text: &str) {
        self.state = EditState::Editing;
        let text = self.clean(text);
        let at = self.byte_offset(self.caret);
        self.display.insert_str(at, &text);
        self.caret += text.chars().count();
    }

    /// Inserts the plain-text flavour only. Returns false when the
    /// clipboard has nothing plain to offer.
    pub fn paste(&mut self, clipboard: &Clipboard) -> bool {
        let Some(plain) = clipboard.plain.as_deref() else {
            return false;
        };

        self.insert_text(plain);
        true
    }

    /// Enter commits a single-line field and breaks the line in a paragraph.
    /// Returns true when a commit happened.
    pub fn key_enter(&mut self, sink: &mut dyn EditSink) -> Result<bool, EditorError> {
        if self.multiline {
            self.insert_text("\n");
            return Ok(false);
        }
        self.blur(sink)
    }

    /// Leaves edit mode and commits once if the text changed
    pub fn blur(&mut self, sink: &mut dyn EditSink) -> Result<bool, EditorError> {
        self.state = EditState::Synced;
        if !self.is_dirty() {
            return Ok(false);
        }

        debug!(path = %self.path, "committing text");
        sink.set_field(&self.path, self.display.clone())?;
        Ok(true)
    }

    /// Line endings become `\n`; a single-line field holds no line break at all
    fn clean(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if self.multiline {
            text
        } else {
            text.replace('\n', " ")
        }
    }

    fn char_len(&self) -> usize {
        self.display.chars().count()
    }

    fn byte_offset(&self, caret: usize) -> usize {
        self.display
            .char_indices()
            .nth(caret)
            .map(|(offset, _)| offset)
            .unwrap_or(self.display.len())
    }
}
