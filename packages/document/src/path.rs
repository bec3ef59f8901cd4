//! # Field Paths
//!
//! A path addresses exactly one leaf of a [`FlyerDocument`](crate::FlyerDocument).
//!
//! The textual form is dot-delimited (`trainers.list.1.name`). Segments made
//! only of ASCII digits address sequence positions, every other segment names
//! a field:
//!
//! ```text
//! trainers . list . 1 . name
//!   Key      Key   Index Key
//! ```
//!
//! Paths are built from the schema (see [`FlyerDocument::fields`](crate::FlyerDocument::fields)),
//! never from free-form user input, so resolution failures are defects.

use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Named field of a section or record
    Key(String),

    /// Position in an ordered sequence
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(key) => f.write_str(key),
            Segment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Address of a single document leaf
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Empty path (the document root)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the dotted form
    pub fn parse(source: &str) -> Result<Self, PathError> {
        let mut segments = Vec::new();

        for raw in source.split('.') {
            if raw.is_empty() {
                return Err(PathError::Empty {
                    path: source.to_string(),
                });
            }

            let segment = if raw.bytes().all(|b| b.is_ascii_digit()) {
                match raw.parse::<usize>() {
                    Ok(index) => Segment::Index(index),
                    Err(_) => Segment::Key(raw.to_string()),
                }
            } else {
                Segment::Key(raw.to_string())
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Append a field-name segment
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    /// Append a sequence-index segment
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
