use thiserror::Error;

pub type PathResult<T> = Result<T, PathError>;

/// Failure to resolve a [`FieldPath`](crate::FieldPath) against a document.
///
/// Paths are generated from the document schema, so any of these indicates a
/// wiring defect rather than bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Empty path segment in `{path}`")]
    Empty { path: String },

    #[error("Unknown field `{segment}` in path `{path}`")]
    UnknownKey { path: String, segment: String },

    #[error("Index {index} out of bounds (len {len}) in path `{path}`")]
    IndexOutOfBounds {
        path: String,
        index: usize,
        len: usize,
    },

    #[error("Segment `{segment}` of path `{path}` indexes into a non-sequence")]
    NotIndexable { path: String, segment: String },

    #[error("Segment {index} of path `{path}` must be a field name")]
    ExpectedKey { path: String, index: usize },

    #[error("Path `{path}` does not address a leaf")]
    NotALeaf { path: String },

    #[error("Path `{path}` continues past a leaf")]
    TooDeep { path: String },

    #[error("Field at `{path}` is immutable")]
    ImmutableField { path: String },
}

impl PathError {
    pub fn unknown_key(path: impl ToString, segment: impl Into<String>) -> Self {
        Self::UnknownKey {
            path: path.to_string(),
            segment: segment.into(),
        }
    }

    pub fn not_a_leaf(path: impl ToString) -> Self {
        Self::NotALeaf {
            path: path.to_string(),
        }
    }

    pub fn too_deep(path: impl ToString) -> Self {
        Self::TooDeep {
            path: path.to_string(),
        }
    }
}

/// Failure to read a document from its textual representation.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Malformed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate trainer id {0}")]
    DuplicateTrainerId(u32),
}
