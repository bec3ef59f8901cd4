//! # Flyer Document
//!
//! Canonical content of a flyer. Sections sit behind [`Arc`] so that a new
//! snapshot produced by [`set`](crate::set) shares every section the edit did
//! not touch with the snapshot it was derived from.
//!
//! ## Lifecycle
//!
//! ```text
//! durable store ──parse──┐
//!                        ├──→ FlyerDocument ──set──→ FlyerDocument ──→ ...
//! built-in default ──────┘          ↑
//!                     load / reset ─┘ (wholesale replacement)
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::path::FieldPath;

/// Editable flyer content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlyerDocument {
    pub header: Arc<Header>,
    pub about: Arc<About>,
    pub gallery: Arc<Gallery>,
    pub trainers: Arc<Trainers>,
    pub footer: Arc<Footer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub subtitle: String,
    pub title_line1: String,
    pub title_line2: String,
    pub date: String,
    pub location: String,
    pub main_image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    pub image1: String,
    pub image2: String,
    pub image3: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainers {
    pub title: String,
    pub list: Vec<Trainer>,
}

/// Trainer card. `id` is stable across reorders and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: u32,
    pub name: String,
    pub title: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    pub title: String,
    pub subtitle: String,
    pub whatsapp: String,
    pub email: String,
}

/// How a leaf is presented for editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Content-editable text; single-line fields commit on Enter
    Text { multiline: bool },

    /// Image reference replaced through a file chooser
    Image,
}

impl FieldKind {
    pub const LINE: FieldKind = FieldKind::Text { multiline: false };
    pub const PARAGRAPH: FieldKind = FieldKind::Text { multiline: true };

    pub fn is_image(&self) -> bool {
        matches!(self, FieldKind::Image)
    }
}

/// A bindable leaf of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub path: FieldPath,
    pub kind: FieldKind,
    pub label: String,
}

impl FieldSpec {
    fn new(path: FieldPath, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            label: label.into(),
        }
    }
}

impl FlyerDocument {
    /// Every editable leaf, in layout order.
    ///
    /// List entries produce one field per position, so the result tracks the
    /// current list lengths.
    pub fn fields(&self) -> Vec<FieldSpec> {
        let header = FieldPath::new().key("header");
        let about = FieldPath::new().key("about");
        let gallery = FieldPath::new().key("gallery");
        let trainers = FieldPath::new().key("trainers");
        let footer = FieldPath::new().key("footer");

        let mut fields = vec![
            FieldSpec::new(header.clone().key("subtitle"), FieldKind::LINE, "Header subtitle"),
            FieldSpec::new(header.clone().key("titleLine1"), FieldKind::LINE, "Title, first line"),
            FieldSpec::new(header.clone().key("titleLine2"), FieldKind::LINE, "Title, second line"),
            FieldSpec::new(header.clone().key("date"), FieldKind::LINE, "Event date"),
            FieldSpec::new(header.clone().key("location"), FieldKind::LINE, "Event location"),
            FieldSpec::new(header.key("mainImage"), FieldKind::Image, "Main image"),
            FieldSpec::new(about.clone().key("title"), FieldKind::LINE, "About title"),
            FieldSpec::new(about.clone().key("description"), FieldKind::PARAGRAPH, "About description"),
        ];

        for i in 0..self.about.benefits.len() {
            fields.push(FieldSpec::new(
                about.clone().key("benefits").index(i),
                FieldKind::LINE,
                format!("Benefit {}", i + 1),
            ));
        }

        for (i, key) in ["image1", "image2", "image3"].into_iter().enumerate() {
            fields.push(FieldSpec::new(
                gallery.clone().key(key),
                FieldKind::Image,
                format!("Gallery image {}", i + 1),
            ));
        }

        fields.push(FieldSpec::new(trainers.clone().key("title"), FieldKind::LINE, "Trainers title"));
        for (i, trainer) in self.trainers.list.iter().enumerate() {
            let entry = trainers.clone().key("list").index(i);
            fields.push(FieldSpec::new(
                entry.clone().key("image"),
                FieldKind::Image,
                format!("Trainer #{} photo", trainer.id),
            ));
            fields.push(FieldSpec::new(
                entry.clone().key("name"),
                FieldKind::LINE,
                format!("Trainer #{} name", trainer.id),
            ));
            fields.push(FieldSpec::new(
                entry.key("title"),
                FieldKind::LINE,
                format!("Trainer #{} title", trainer.id),
            ));
        }

        fields.extend([
            FieldSpec::new(footer.clone().key("title"), FieldKind::LINE, "Footer title"),
            FieldSpec::new(footer.clone().key("subtitle"), FieldKind::PARAGRAPH, "Footer subtitle"),
            FieldSpec::new(footer.clone().key("whatsapp"), FieldKind::LINE, "WhatsApp number"),
            FieldSpec::new(footer.key("email"), FieldKind::LINE, "Contact email"),
        ]);

        fields
    }

    /// Compact JSON, as written to the durable store
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, as offered for download
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Strict parse: every field must be present
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        let document: FlyerDocument = serde_json::from_str(source)?;
        document.validate()?;
        Ok(document)
    }

    /// Parse raw file contents (must be UTF-8 JSON)
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DocumentError> {
        let document: FlyerDocument = serde_json::from_slice(bytes)?;
        document.validate()?;
        Ok(document)
    }

    fn validate(&self) -> Result<(), DocumentError> {
        let mut seen = HashSet::new();
        for trainer in &self.trainers.list {
            if !seen.insert(trainer.id) {
                return Err(DocumentError::DuplicateTrainerId(trainer.id));
            }
        }
        Ok(())
    }
}

impl Default for FlyerDocument {
    fn default() -> Self {
        Self {
            header: Arc::new(Header {
                subtitle: "FORMATION CERTIFIANTE POUR PRATICIENS DE L'ACCOMPAGNEMENT EN :".to_string(),
                title_line1: "Ennéagramme".to_string(),
                title_line2: "Évolutif".to_string(),
                date: "29-30 Janvier & 01 Février 2026".to_string(),
                location: "Improvway – Casablanca".to_string(),
                main_image: "images/Casablanca.png".to_string(),
            }),
            about: Arc::new(About {
                title: "Le cycle complet pour maîtriser un outil puissant.".to_string(),
                description: "Rejoignez-nous pour une formation immersive et certifiante. Découvrez les fondements de l'Ennéagramme Évolutif, transformez votre vision et décuplez l'impact de vos accompagnements.".to_string(),
                benefits: vec![
                    "Accès aux eLearnings complets".to_string(),
                    "Séminaires pratiques en groupe".to_string(),
                    "Expérience personnelle transformatrice".to_string(),
                    "Certification reconnue".to_string(),
                ],
            }),
            gallery: Arc::new(Gallery {
                image1: "/images/interagir.jpg".to_string(),
                image2: "/images/dynamique.jpg".to_string(),
                image3: "/images/Se-connaitre.jpg".to_string(),
            }),
            trainers: Arc::new(Trainers {
                title: "Vos enseignements en Ennéagramme Évolutif".to_string(),
                list: vec![
                    Trainer {
                        id: 1,
                        name: "J. Philippe VIDAL".to_string(),
                        title: "Expert Formateur".to_string(),
                        image: "images/Jean.png".to_string(),
                    },
                    Trainer {
                        id: 2,
                        name: "Christelle ZAMARON".to_string(),
                        title: "Experte Formatrice".to_string(),
                        image: "images/christelle.png".to_string(),
                    },
                    Trainer {
                        id: 3,
                        name: "Hassan AYADI".to_string(),
                        title: "Expert Formateur".to_string(),
                        image: "images/Hassan-AYADI.png".to_string(),
                    },
                ],
            }),
            footer: Arc::new(Footer {
                title: "Prêt(e) à Transformer Votre Pratique ?".to_string(),
                subtitle: "Contactez-nous pour réserver votre place et commencer votre voyage.".to_string(),
                whatsapp: "06 61 30 59 68".to_string(),
                email: "hassan.ayadi.pac@gmail.com".to_string(),
            }),
        }
    }
}
