//! # Flyer Document
//!
//! Canonical data model of an editable flyer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: FlyerDocument (Arc'd sections)    │
//! │  - built-in default content                 │
//! │  - JSON text form (store + project file)    │
//! │  - schema-derived field list                │
//! └─────────────────────────────────────────────┘
//!                     ↑
//! ┌─────────────────────────────────────────────┐
//! │ mutator: set / get over FieldPath           │
//! │  - copy-on-write along the path             │
//! │  - checked resolution errors                │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use flyer_document::{set, get, FieldPath, FlyerDocument};
//!
//! let doc = FlyerDocument::default();
//! let path = FieldPath::parse("trainers.list.1.name").unwrap();
//! let next = set(&doc, &path, "Christelle Z.").unwrap();
//!
//! assert_eq!(get(&next, &path).unwrap(), "Christelle Z.");
//! assert_eq!(get(&doc, &path).unwrap(), "Christelle ZAMARON");
//! ```

mod document;
mod error;
pub mod image_ref;
mod mutator;
mod path;

pub use document::{About, FieldKind, FieldSpec, FlyerDocument, Footer, Gallery, Header, Trainer, Trainers};
pub use error::{DocumentError, PathError, PathResult};
pub use mutator::{get, set};
pub use path::{FieldPath, Segment};
