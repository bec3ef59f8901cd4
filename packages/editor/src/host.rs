//! # Host Services
//!
//! Everything the engine needs from its environment, expressed as traits.
//! A browser host backs these with the DOM; the CLI backs them with the
//! terminal and the filesystem; tests back them with in-memory fakes.

use std::future::Future;
use std::io;

use flyer_document::image_ref;

/// Accept filter passed to the chooser by image bindings
pub const ACCEPT_IMAGES: &str = "image/*";

/// Accept filter passed to the chooser when loading a project
pub const ACCEPT_PROJECT: &str = ".json";

/// Download names. Fixed, never taken from configuration or user input.
pub const PROJECT_FILE_NAME: &str = "flyer-data.json";
pub const PNG_FILE_NAME: &str = "flyer-export.png";
pub const PDF_FILE_NAME: &str = "flyer-export.pdf";

pub const INVALID_PROJECT_MESSAGE: &str = "Le fichier de sauvegarde est invalide ou corrompu.";

pub const RESET_CONFIRMATION_MESSAGE: &str =
    "Êtes-vous sûr de vouloir réinitialiser le flyer ? Toutes les modifications non sauvegardées seront perdues.";

pub const EXPORT_FAILED_MESSAGE: &str = "Une erreur est survenue pendant l'exportation.";

/// A client-side download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Triggers downloads (anchor click in a browser, file write elsewhere)
pub trait DownloadSink {
    fn download(&self, download: Download) -> io::Result<()>;
}

/// Blocking user dialogs
pub trait UserPrompt {
    /// Yes/no question; `true` means proceed
    fn confirm(&self, message: &str) -> bool;

    /// User-visible error notice
    fn alert(&self, message: &str);
}

/// A file the user picked, already read into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,

    /// MIME type reported by the host, if any
    pub mime: Option<String>,

    pub bytes: Vec<u8>,
}

impl PickedFile {
    /// Reported MIME type, falling back to a guess from the file name
    pub fn mime(&self) -> Option<&str> {
        self.mime
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| image_ref::mime_for_path(&self.name))
    }
}

/// File chooser plus asynchronous read of the chosen file.
///
/// Resolves to `Ok(None)` when the chooser is dismissed.
pub trait FilePicker {
    fn pick(&self, accept: &str) -> impl Future<Output = io::Result<Option<PickedFile>>>;
}

/// Clipboard payload offered to a paste
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    pub plain: Option<String>,
    pub html: Option<String>,
}

impl Clipboard {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            plain: Some(text.into()),
            html: None,
        }
    }

    pub fn rich(html: impl Into<String>, plain: impl Into<String>) -> Self {
        Self {
            plain: Some(plain.into()),
            html: Some(html.into()),
        }
    }
}
