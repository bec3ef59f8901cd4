//! # Field Bindings
//!
//! One binding per bindable leaf. A binding mirrors the leaf's value on
//! screen, tracks local edits and hands commits to an [`EditSink`].
//!
//! ```text
//!   document ──sync(value)──▶ binding ──commit(path, value)──▶ EditSink
//!                               │
//!              focus / input / paste / Enter / blur / pick
//! ```
//!
//! Bindings never write the document themselves.

mod image;
mod text;

pub use image::ImageBinding;
pub use text::{EditState, TextBinding};

use flyer_document::{FieldKind, FieldPath};

use crate::errors::EditorError;

/// Receiver of committed edits
pub trait EditSink {
    fn set_field(&mut self, path: &FieldPath, value: String) -> Result<(), EditorError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Text(TextBinding),
    Image(ImageBinding),
}

impl Binding {
    /// Fresh binding already showing `value`
    pub fn new(path: FieldPath, kind: FieldKind, value: &str) -> Self {
        match kind {
            FieldKind::Text { multiline } => Binding::Text(TextBinding::new(path, multiline, value)),
            FieldKind::Image => Binding::Image(ImageBinding::new(path, value)),
        }
    }

    pub fn path(&self) -> &FieldPath {
        match self {
            Binding::Text(text) => text.path(),
            Binding::Image(image) => image.path(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Binding::Text(text) => FieldKind::Text {
                multiline: text.is_multiline(),
            },
            Binding::Image(_) => FieldKind::Image,
        }
    }

    /// What the user currently sees
    pub fn display(&self) -> &str {
        match self {
            Binding::Text(text) => text.display(),
            Binding::Image(image) => image.src(),
        }
    }

    /// Push the document value; returns true when the display was overwritten
    pub fn sync(&mut self, value: &str) -> bool {
        match self {
            Binding::Text(text) => text.sync(value),
            Binding::Image(image) => image.sync(value),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Sink that records every commit
    #[derive(Default)]
    pub struct RecordingSink {
        pub commits: Vec<(FieldPath, String)>,
    }

    impl EditSink for RecordingSink {
        fn set_field(&mut self, path: &FieldPath, value: String) -> Result<(), EditorError> {
            self.commits.push((path.clone(), value));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_kind_follows_field_kind() {
        let path = FieldPath::parse("about.description").unwrap();
        let paragraph = Binding::new(path.clone(), FieldKind::PARAGRAPH, "Texte");
        let image = Binding::new(path, FieldKind::Image, "images/a.png");

        assert_eq!(paragraph.kind(), FieldKind::PARAGRAPH);
        assert_eq!(paragraph.display(), "Texte");
        assert_eq!(image.kind(), FieldKind::Image);
        assert_eq!(image.display(), "images/a.png");
    }
}
