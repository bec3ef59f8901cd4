//! # Flyer Editor
//!
//! Editing engine for the flyer: bindings, persistence, export and the
//! coordinator that ties them to one document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: FlyerDocument + set/get           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: FlyerEditor                        │
//! │  - owns the live document and history       │
//! │  - routes binding commits through `set`     │
//! │  - auto-saves and re-renders on change      │
//! └─────────────────────────────────────────────┘
//!        ↓                ↓                ↓
//! ┌────────────┐  ┌────────────────┐  ┌──────────────┐
//! │ view +     │  │ persistence:   │  │ export:      │
//! │ bindings   │  │ store + files  │  │ raster → PNG │
//! │            │  │                │  │ / PDF        │
//! └────────────┘  └────────────────┘  └──────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: downloads, prompts, file chooser,     │
//! │       rasterizer, export surface (traits)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **One document**: only the coordinator holds it; bindings hold views
//! 2. **Commit on blur**: typing never writes, leaving the field does
//! 3. **Every change is saved**: one store write per document replacement
//! 4. **Export always cleans up**: the surface is restored on every exit path
//!
//! ## Usage
//!
//! ```rust
//! use flyer_document::{get, FieldPath};
//! use flyer_editor::{EditorConfig, FlyerEditor, MemoryStore};
//!
//! let mut editor = FlyerEditor::new(EditorConfig::default(), MemoryStore::new());
//! let title = FieldPath::parse("header.titleLine1").unwrap();
//!
//! editor.focus(&title).unwrap();
//! editor.input(&title, "Nouveau Titre").unwrap();
//! editor.blur(&title).unwrap();
//!
//! assert_eq!(get(editor.document(), &title).unwrap(), "Nouveau Titre");
//! assert!(editor.store().peek("flyerData").unwrap().contains("\"titleLine1\":\"Nouveau Titre\""));
//! ```

pub mod binding;
mod config;
mod errors;
pub mod export;
pub mod host;
pub mod persistence;
mod session;
mod undo_stack;
mod view;

pub use binding::{Binding, EditSink, EditState, ImageBinding, TextBinding};
pub use config::EditorConfig;
pub use errors::EditorError;
pub use export::{
    ExportController, ExportError, ExportFormat, ExportPhase, ExportSettings, ExportSurface, RasterOptions,
    RasterizeError, Rasterizer,
};
pub use host::{Clipboard, Download, DownloadSink, FilePicker, PickedFile, UserPrompt};
pub use persistence::{DirectoryStore, DurableStore, MemoryStore, Persistence};
pub use session::FlyerEditor;
pub use undo_stack::{Snapshot, UndoStack};
pub use view::FlyerView;

pub use flyer_export::Bitmap;
