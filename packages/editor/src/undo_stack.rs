//! # Undo/Redo Stack
//!
//! Snapshot history of the document.
//!
//! ## Design
//!
//! - Every replacement records the document it replaced
//! - Snapshots are cheap: sections are `Arc`-shared, so a snapshot only owns
//!   the sections its edit touched
//! - Undo swaps the current document for the last snapshot and keeps the
//!   current one for redo
//! - New edits clear the redo stack
//!
//! ## Example
//!
//! ```rust
//! use flyer_document::{set, FieldPath, FlyerDocument};
//! use flyer_editor::UndoStack;
//!
//! let mut stack = UndoStack::new();
//! let before = FlyerDocument::default();
//! let path = FieldPath::parse("footer.title").unwrap();
//! let after = set(&before, &path, "Inscriptions").unwrap();
//! stack.record(before.clone(), "edit footer.title");
//!
//! let restored = stack.undo(&after).unwrap();
//! assert_eq!(restored, before);
//! assert_eq!(stack.redo(&restored).unwrap(), after);
//! ```

use flyer_document::FlyerDocument;

/// A document state plus what replaced it
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub document: FlyerDocument,
    pub description: String,
}

#[derive(Debug)]
pub struct UndoStack {
    /// Most recent last
    undo_stack: Vec<Snapshot>,

    /// Most recent last
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl UndoStack {
    /// Undo stack with the default 100 levels
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the document that is about to be replaced
    pub fn record(&mut self, previous: FlyerDocument, description: impl Into<String>) {
        self.undo_stack.push(Snapshot {
            document: previous,
            description: description.into(),
        });

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Previous document, if any. `current` moves to the redo stack.
    pub fn undo(&mut self, current: &FlyerDocument) -> Option<FlyerDocument> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description,
        });
        Some(snapshot.document)
    }

    /// Most recently undone document, if any
    pub fn redo(&mut self, current: &FlyerDocument) -> Option<FlyerDocument> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description,
        });
        Some(snapshot.document)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Description of the step `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().map(|s| s.description.as_str())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().map(|s| s.description.as_str())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
