//! Error types for the editor

use flyer_document::{DocumentError, PathError};
use thiserror::Error;

use crate::export::ExportError;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Serialization error: {0}")]
    Document(#[from] DocumentError),

    #[error("Invalid project file: {0}")]
    InvalidProjectFile(DocumentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read picked file: {0}")]
    FileRead(std::io::Error),

    #[error("Picked file `{name}` is not an image ({mime})")]
    NotAnImage { name: String, mime: String },

    #[error("No binding for `{0}`")]
    UnknownBinding(String),

    #[error("Binding `{path}` is not a {expected} field")]
    WrongBindingKind { path: String, expected: &'static str },

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("An export is in progress")]
    Busy,
}
