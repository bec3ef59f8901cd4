//! # Flyer View
//!
//! The set of bindings for the current document, rebuilt from the schema on
//! every render. Bindings whose path and kind survive a render are kept, so
//! an edit in progress on one field is not lost when another field commits.

use std::collections::HashMap;

use flyer_document::{get, FieldPath, FlyerDocument};
use tracing::{debug, error};

use crate::binding::{Binding, ImageBinding, TextBinding};
use crate::errors::EditorError;

#[derive(Debug, Default)]
pub struct FlyerView {
    /// Paths in layout order
    order: Vec<FieldPath>,

    bindings: HashMap<FieldPath, Binding>,

    renders: usize,
}

impl FlyerView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sync every binding with `doc`. Returns how many displays were
    /// overwritten.
    pub fn render(&mut self, doc: &FlyerDocument) -> usize {
        let specs = doc.fields();
        let mut order = Vec::with_capacity(specs.len());
        let mut bindings = HashMap::with_capacity(specs.len());
        let mut overwritten = 0;

        for spec in specs {
            let value = match get(doc, &spec.path) {
                Ok(value) => value,
                Err(err) => {
                    error!(path = %spec.path, error = %err, "schema field does not resolve");
                    continue;
                }
            };

            let mut binding = match self.bindings.remove(&spec.path) {
                Some(existing) if existing.kind() == spec.kind => existing,
                _ => Binding::new(spec.path.clone(), spec.kind, value),
            };
            if binding.sync(value) {
                overwritten += 1;
            }

            order.push(spec.path.clone());
            bindings.insert(spec.path, binding);
        }

        self.order = order;
        self.bindings = bindings;
        self.renders += 1;

        debug!(fields = self.order.len(), overwritten, "view rendered");
        overwritten
    }

    pub fn get(&self, path: &FieldPath) -> Option<&Binding> {
        self.bindings.get(path)
    }

    pub fn text(&self, path: &FieldPath) -> Result<&TextBinding, EditorError> {
        match self.lookup(path)? {
            Binding::Text(text) => Ok(text),
            Binding::Image(_) => Err(wrong_kind(path, "text")),
        }
    }

    pub fn text_mut(&mut self, path: &FieldPath) -> Result<&mut TextBinding, EditorError> {
        match self.lookup_mut(path)? {
            Binding::Text(text) => Ok(text),
            Binding::Image(_) => Err(wrong_kind(path, "text")),
        }
    }

    pub fn image(&self, path: &FieldPath) -> Result<&ImageBinding, EditorError> {
        match self.lookup(path)? {
            Binding::Image(image) => Ok(image),
            Binding::Text(_) => Err(wrong_kind(path, "image")),
        }
    }

    pub fn image_mut(&mut self, path: &FieldPath) -> Result<&mut ImageBinding, EditorError> {
        match self.lookup_mut(path)? {
            Binding::Image(image) => Ok(image),
            Binding::Text(_) => Err(wrong_kind(path, "image")),
        }
    }

    /// Bindings in layout order
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.order.iter().filter_map(|path| self.bindings.get(path))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of renders so far
    pub fn renders(&self) -> usize {
        self.renders
    }

    fn lookup(&self, path: &FieldPath) -> Result<&Binding, EditorError> {
        self.bindings
            .get(path)
            .ok_or_else(|| EditorError::UnknownBinding(path.to_string()))
    }

    fn lookup_mut(&mut self, path: &FieldPath) -> Result<&mut Binding, EditorError> {
        self.bindings
            .get_mut(path)
            .ok_or_else(|| EditorError::UnknownBinding(path.to_string()))
    }
}

fn wrong_kind(path: &FieldPath, expected: &'static str) -> EditorError {
    EditorError::WrongBindingKind {
        path: path.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use flyer_document::set;

    use super::*;

    fn path(source: &str) -> FieldPath {
        FieldPath::parse(source).unwrap()
    }

    #[test]
    fn test_render_binds_every_field() {
        let doc = FlyerDocument::default();
        let mut view = FlyerView::new();

        assert_eq!(view.render(&doc), 0);
        assert_eq!(view.len(), doc.fields().len());
        assert_eq!(view.renders(), 1);

        let first = view.iter().next().unwrap();
        assert_eq!(first.path(), &doc.fields()[0].path);
    }

    #[test]
    fn test_render_keeps_edit_in_progress() {
        let doc = FlyerDocument::default();
        let mut view = FlyerView::new();
        view.render(&doc);

        let title = path("header.titleLine1");
        view.text_mut(&title).unwrap().focus();
        view.text_mut(&title).unwrap().input("Brouillon");

        // Another field commits; the draft on the title stays
        let next = set(&doc, &path("footer.email"), "contact@exemple.fr").unwrap();
        assert_eq!(view.render(&next), 1);
        assert_eq!(view.text(&title).unwrap().display(), "Brouillon");
        assert_eq!(
            view.text(&path("footer.email")).unwrap().display(),
            "contact@exemple.fr"
        );
    }

    #[test]
    fn test_lookup_errors() {
        let mut view = FlyerView::new();
        view.render(&FlyerDocument::default());

        assert!(matches!(
            view.text(&path("header.nope")),
            Err(EditorError::UnknownBinding(_))
        ));
        assert!(matches!(
            view.text(&path("header.mainImage")),
            Err(EditorError::WrongBindingKind { expected: "text", .. })
        ));
        assert!(matches!(
            view.image_mut(&path("header.date")),
            Err(EditorError::WrongBindingKind { expected: "image", .. })
        ));
        assert!(view.image(&path("gallery.image3")).is_ok());
    }
}
