//! # Path Mutator
//!
//! A small interpreter that walks a [`FieldPath`] over the typed document.
//!
//! ## Semantics
//!
//! - `set` never touches its input: it clones the root (cheap, sections are
//!   `Arc`s) and copies-on-write each section on the way to the leaf via
//!   [`Arc::make_mut`]. Sections off the path stay shared.
//! - Resolution is strict. A key on a sequence, an index on a record, a path
//!   ending at a section, or a path continuing past a leaf all fail with a
//!   [`PathError`] instead of writing somewhere unexpected.
//! - Trainer ids are not addressable for writing.

use std::sync::Arc;

use crate::document::{About, Footer, FlyerDocument, Gallery, Header, Trainer, Trainers};
use crate::error::{PathError, PathResult};
use crate::path::{FieldPath, Segment};

/// Return a new document with the leaf at `path` replaced by `value`.
pub fn set(doc: &FlyerDocument, path: &FieldPath, value: impl Into<String>) -> PathResult<FlyerDocument> {
    let mut next = doc.clone();
    *next.leaf_mut(path.segments(), path)? = value.into();
    Ok(next)
}

/// Read the leaf at `path`.
pub fn get<'a>(doc: &'a FlyerDocument, path: &FieldPath) -> PathResult<&'a str> {
    doc.leaf(path.segments(), path).map(String::as_str)
}

/// A node of the document tree that can resolve the remainder of a path.
trait Node {
    fn leaf(&self, rest: &[Segment], path: &FieldPath) -> PathResult<&String>;
    fn leaf_mut(&mut self, rest: &[Segment], path: &FieldPath) -> PathResult<&mut String>;
}

impl Node for String {
    fn leaf(&self, rest: &[Segment], path: &FieldPath) -> PathResult<&String> {
        if rest.is_empty() {
            Ok(self)
        } else {
            Err(PathError::too_deep(path))
        }
    }

    fn leaf_mut(&mut self, rest: &[Segment], path: &FieldPath) -> PathResult<&mut String> {
        if rest.is_empty() {
            Ok(self)
        } else {
            Err(PathError::too_deep(path))
        }
    }
}

impl<T: Node> Node for Vec<T> {
    fn leaf(&self, rest: &[Segment], path: &FieldPath) -> PathResult<&String> {
        let (index, tail) = split_index(rest, path)?;
        let len = self.len();
        self.get(index)
            .ok_or_else(|| out_of_bounds(path, index, len))?
            .leaf(tail, path)
    }

    fn leaf_mut(&mut self, rest: &[Segment], path: &FieldPath) -> PathResult<&mut String> {
        let (index, tail) = split_index(rest, path)?;
        let len = self.len();
        self.get_mut(index)
            .ok_or_else(|| out_of_bounds(path, index, len))?
            .leaf_mut(tail, path)
    }
}

impl<T: Node + Clone> Node for Arc<T> {
    fn leaf(&self, rest: &[Segment], path: &FieldPath) -> PathResult<&String> {
        self.as_ref().leaf(rest, path)
    }

    fn leaf_mut(&mut self, rest: &[Segment], path: &FieldPath) -> PathResult<&mut String> {
        // Resolve read-only first so a bad path does not copy the section.
        self.as_ref().leaf(rest, path)?;
        Arc::make_mut(self).leaf_mut(rest, path)
    }
}

/// Implements [`Node`] for a record by dispatching its field names.
macro_rules! record_node {
    ($ty:ty { $($key:literal => $field:ident),* $(,)? }) => {
        impl Node for $ty {
            fn leaf(&self, rest: &[Segment], path: &FieldPath) -> PathResult<&String> {
                let (key, tail) = split_key(rest, path)?;
                match key {
                    $($key => self.$field.leaf(tail, path),)*
                    other => Err(PathError::unknown_key(path, other)),
                }
            }

            fn leaf_mut(&mut self, rest: &[Segment], path: &FieldPath) -> PathResult<&mut String> {
                let (key, tail) = split_key(rest, path)?;
                match key {
                    $($key => self.$field.leaf_mut(tail, path),)*
                    other => Err(PathError::unknown_key(path, other)),
                }
            }
        }
    };
}

record_node!(FlyerDocument {
    "header" => header,
    "about" => about,
    "gallery" => gallery,
    "trainers" => trainers,
    "footer" => footer,
});

record_node!(Header {
    "subtitle" => subtitle,
    "titleLine1" => title_line1,
    "titleLine2" => title_line2,
    "date" => date,
    "location" => location,
    "mainImage" => main_image,
});

record_node!(About {
    "title" => title,
    "description" => description,
    "benefits" => benefits,
});

record_node!(Gallery {
    "image1" => image1,
    "image2" => image2,
    "image3" => image3,
});

record_node!(Trainers {
    "title" => title,
    "list" => list,
});

record_node!(Footer {
    "title" => title,
    "subtitle" => subtitle,
    "whatsapp" => whatsapp,
    "email" => email,
});

impl Node for Trainer {
    fn leaf(&self, rest: &[Segment], path: &FieldPath) -> PathResult<&String> {
        let (key, tail) = split_key(rest, path)?;
        match key {
            "name" => self.name.leaf(tail, path),
            "title" => self.title.leaf(tail, path),
            "image" => self.image.leaf(tail, path),
            "id" => Err(PathError::ImmutableField {
                path: path.to_string(),
            }),
            other => Err(PathError::unknown_key(path, other)),
        }
    }

    fn leaf_mut(&mut self, rest: &[Segment], path: &FieldPath) -> PathResult<&mut String> {
        let (key, tail) = split_key(rest, path)?;
        match key {
            "name" => self.name.leaf_mut(tail, path),
            "title" => self.title.leaf_mut(tail, path),
            "image" => self.image.leaf_mut(tail, path),
            "id" => Err(PathError::ImmutableField {
                path: path.to_string(),
            }),
            other => Err(PathError::unknown_key(path, other)),
        }
    }
}

fn split_key<'a>(rest: &'a [Segment], path: &FieldPath) -> PathResult<(&'a str, &'a [Segment])> {
    match rest.split_first() {
        Some((Segment::Key(key), tail)) => Ok((key.as_str(), tail)),
        Some((Segment::Index(_), _)) => Err(PathError::ExpectedKey {
            path: path.to_string(),
            index: path.len() - rest.len(),
        }),
        None => Err(PathError::not_a_leaf(path)),
    }
}

fn split_index<'a>(rest: &'a [Segment], path: &FieldPath) -> PathResult<(usize, &'a [Segment])> {
    match rest.split_first() {
        Some((Segment::Index(index), tail)) => Ok((*index, tail)),
        Some((Segment::Key(key), _)) => Err(PathError::NotIndexable {
            path: path.to_string(),
            segment: key.clone(),
        }),
        None => Err(PathError::not_a_leaf(path)),
    }
}

fn out_of_bounds(path: &FieldPath, index: usize, len: usize) -> PathError {
    PathError::IndexOutOfBounds {
        path: path.to_string(),
        index,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    #[test]
    fn test_set_then_get() {
        let doc = FlyerDocument::default();
        let next = set(&doc, &path("header.titleLine1"), "Nouveau Titre").unwrap();

        assert_eq!(get(&next, &path("header.titleLine1")).unwrap(), "Nouveau Titre");
        assert_eq!(get(&doc, &path("header.titleLine1")).unwrap(), "Ennéagramme");
    }

    #[test]
    fn test_set_shares_untouched_sections() {
        let doc = FlyerDocument::default();
        let next = set(&doc, &path("footer.email"), "contact@example.org").unwrap();

        assert!(!Arc::ptr_eq(&doc.footer, &next.footer));
        assert!(Arc::ptr_eq(&doc.header, &next.header));
        assert!(Arc::ptr_eq(&doc.about, &next.about));
        assert!(Arc::ptr_eq(&doc.gallery, &next.gallery));
        assert!(Arc::ptr_eq(&doc.trainers, &next.trainers));
    }

    #[test]
    fn test_set_nested_record_in_list() {
        let doc = FlyerDocument::default();
        let next = set(&doc, &path("trainers.list.1.name"), "C. Z.").unwrap();

        assert_eq!(next.trainers.list[1].name, "C. Z.");
        assert_eq!(next.trainers.list[1].id, 2);
        assert_eq!(next.trainers.list[0], doc.trainers.list[0]);
        assert_eq!(next.trainers.list[2], doc.trainers.list[2]);
    }

    #[test]
    fn test_unknown_key() {
        let doc = FlyerDocument::default();
        let err = set(&doc, &path("header.nope"), "x").unwrap_err();
        assert_eq!(err, PathError::unknown_key("header.nope", "nope"));
    }

    #[test]
    fn test_index_out_of_bounds() {
        let doc = FlyerDocument::default();
        let err = set(&doc, &path("about.benefits.4"), "x").unwrap_err();
        assert!(matches!(err, PathError::IndexOutOfBounds { index: 4, len: 4, .. }));
    }

    #[test]
    fn test_kind_mismatches() {
        let doc = FlyerDocument::default();

        assert!(matches!(
            set(&doc, &path("about.benefits.first"), "x"),
            Err(PathError::NotIndexable { .. })
        ));
        assert!(matches!(
            set(&doc, &path("header.0"), "x"),
            Err(PathError::ExpectedKey { index: 1, .. })
        ));
    }

    #[test]
    fn test_non_leaf_paths() {
        let doc = FlyerDocument::default();

        assert!(matches!(get(&doc, &path("header")), Err(PathError::NotALeaf { .. })));
        assert!(matches!(get(&doc, &path("about.benefits")), Err(PathError::NotALeaf { .. })));
        assert!(matches!(
            set(&doc, &path("header.date.day"), "x"),
            Err(PathError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_trainer_id_is_immutable() {
        let doc = FlyerDocument::default();
        assert!(matches!(
            set(&doc, &path("trainers.list.0.id"), "9"),
            Err(PathError::ImmutableField { .. })
        ));
    }

    #[test]
    fn test_failed_set_leaves_input_intact() {
        let doc = FlyerDocument::default();
        let before = doc.clone();

        let _ = set(&doc, &path("trainers.list.7.name"), "x");

        assert_eq!(doc, before);
        assert!(Arc::ptr_eq(&doc.trainers, &before.trainers));
    }

    #[test]
    fn test_every_field_resolves() {
        let doc = FlyerDocument::default();
        for field in doc.fields() {
            assert!(get(&doc, &field.path).is_ok(), "{} should resolve", field.path);
        }
    }
}
