use flyer_document::{image_ref, FieldPath};
use tracing::{debug, warn};

use super::EditSink;
use crate::errors::EditorError;
use crate::host::{FilePicker, ACCEPT_IMAGES};

/// Image leaf replaced by picking a local file
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBinding {
    path: FieldPath,
    src: String,
    last_known: String,
}

impl ImageBinding {
    pub fn new(path: FieldPath, value: &str) -> Self {
        Self {
            path,
            src: value.to_string(),
            last_known: value.to_string(),
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Image source currently displayed
    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn sync(&mut self, value: &str) -> bool {
        if value == self.last_known {
            return false;
        }

        self.last_known = value.to_string();
        self.src = value.to_string();
        true
    }

    /// Ask the host for an image and commit it as a `data:` URL.
    ///
    /// Returns `Ok(false)` when the chooser was dismissed. On any error the
    /// display and the document are left as they were.
    pub async fn replace<P: FilePicker>(
        &mut self,
        picker: &P,
        sink: &mut dyn EditSink,
    ) -> Result<bool, EditorError> {
        let picked = picker.pick(ACCEPT_IMAGES).await.map_err(|err| {
            warn!(path = %self.path, error = %err, "could not read picked file");
            EditorError::FileRead(err)
        })?;

        let Some(file) = picked else {
            debug!(path = %self.path, "image chooser dismissed");
            return Ok(false);
        };

        let mime = match file.mime() {
            Some(mime) if mime.starts_with("image/") => mime.to_string(),
            other => {
                return Err(EditorError::NotAnImage {
                    name: file.name.clone(),
                    mime: other.unwrap_or("unknown").to_string(),
                })
            }
        };

        let url = image_ref::to_data_url(&mime, &file.bytes);
        sink.set_field(&self.path, url.clone())?;
        self.src = url;

        debug!(path = %self.path, name = %file.name, bytes = file.bytes.len(), "image replaced");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::binding::testing::RecordingSink;
    use crate::host::PickedFile;

    enum FakePicker {
        Dismissed,
        Fails,
        Picks(PickedFile),
    }

    impl FilePicker for FakePicker {
        async fn pick(&self, accept: &str) -> io::Result<Option<PickedFile>> {
            assert_eq!(accept, ACCEPT_IMAGES);
            match self {
                FakePicker::Dismissed => Ok(None),
                FakePicker::Fails => Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
                FakePicker::Picks(file) => Ok(Some(file.clone())),
            }
        }
    }

    fn binding() -> ImageBinding {
        ImageBinding::new(FieldPath::parse("gallery.image2").unwrap(), "images/Fleurs.png")
    }

    #[tokio::test]
    async fn test_replace_commits_data_url() {
        let picker = FakePicker::Picks(PickedFile {
            name: "photo.png".to_string(),
            mime: None,
            bytes: vec![1, 2, 3],
        });
        let mut sink = RecordingSink::default();
        let mut binding = binding();

        assert!(binding.replace(&picker, &mut sink).await.unwrap());
        assert_eq!(sink.commits.len(), 1);
        assert_eq!(sink.commits[0].1, "data:image/png;base64,AQID");
        assert_eq!(binding.src(), "data:image/png;base64,AQID");
    }

    #[tokio::test]
    async fn test_dismissed_chooser_changes_nothing() {
        let mut sink = RecordingSink::default();
        let mut binding = binding();

        assert!(!binding.replace(&FakePicker::Dismissed, &mut sink).await.unwrap());
        assert!(sink.commits.is_empty());
        assert_eq!(binding.src(), "images/Fleurs.png");
    }

    #[tokio::test]
    async fn test_read_failure_leaves_display() {
        let mut sink = RecordingSink::default();
        let mut binding = binding();

        let err = binding.replace(&FakePicker::Fails, &mut sink).await.unwrap_err();
        assert!(matches!(err, EditorError::FileRead(_)));
        assert!(sink.commits.is_empty());
        assert_eq!(binding.src(), "images/Fleurs.png");
    }

    #[tokio::test]
    async fn test_non_image_is_rejected() {
        let picker = FakePicker::Picks(PickedFile {
            name: "notes.txt".to_string(),
            mime: Some("text/plain".to_string()),
            bytes: b"hello".to_vec(),
        });
        let mut sink = RecordingSink::default();
        let mut binding = binding();

        let err = binding.replace(&picker, &mut sink).await.unwrap_err();
        assert!(matches!(err, EditorError::NotAnImage { ref mime, .. } if mime == "text/plain"));
        assert!(sink.commits.is_empty());
    }
}
