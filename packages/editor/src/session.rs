//! # Flyer Editor
//!
//! Root coordinator. Owns the only live document and routes every edit
//! through the same pipeline:
//!
//! ```text
//!   binding commit / apply / load / reset / undo
//!        │
//!        ▼
//!   set(doc, path, value) ──▶ replace document ──▶ record history
//!                                    │
//!                                    ├──▶ auto-save (durable store)
//!                                    └──▶ render (sync every binding)
//! ```
//!
//! Actions other than text entry are refused with [`EditorError::Busy`]
//! while an export is running.

use flyer_document::{set, FieldPath, FlyerDocument};
use tracing::{debug, error, info, warn};

use crate::binding::EditSink;
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::export::{ExportController, ExportFormat, ExportPhase, ExportSettings, ExportSurface, Rasterizer};
use crate::host::{
    Clipboard, DownloadSink, FilePicker, UserPrompt, ACCEPT_PROJECT, INVALID_PROJECT_MESSAGE,
    RESET_CONFIRMATION_MESSAGE,
};
use crate::persistence::{DurableStore, Persistence};
use crate::undo_stack::UndoStack;
use crate::view::FlyerView;

pub struct FlyerEditor<S: DurableStore> {
    config: EditorConfig,
    document: FlyerDocument,
    view: FlyerView,
    store: S,
    persistence: Persistence,
    exporter: ExportController,
    history: UndoStack,
}

/// Commit target handed to bindings: one replacement, one history entry and
/// one store write per commit
struct DocumentSink<'a, S: DurableStore> {
    document: &'a mut FlyerDocument,
    store: &'a mut S,
    persistence: &'a Persistence,
    history: &'a mut UndoStack,
}

impl<S: DurableStore> EditSink for DocumentSink<'_, S> {
    fn set_field(&mut self, path: &FieldPath, value: String) -> Result<(), EditorError> {
        let next = set(self.document, path, value).map_err(|err| {
            error!(%path, error = %err, "edit targets a field that does not resolve");
            err
        })?;

        let previous = std::mem::replace(self.document, next);
        self.history.record(previous, format!("edit {}", path));
        self.persistence.autosave(&mut *self.store, self.document);

        debug!(%path, "field committed");
        Ok(())
    }
}

impl<S: DurableStore> FlyerEditor<S> {
    /// Restore the stored document (or the default) and render it
    pub fn new(config: EditorConfig, store: S) -> Self {
        let persistence = Persistence::new(&config);
        let document = persistence.restore(&store);
        let exporter = ExportController::new(ExportSettings::from(&config));
        let history = UndoStack::with_max_levels(config.undo_levels);

        let mut editor = Self {
            config,
            document,
            view: FlyerView::new(),
            store,
            persistence,
            exporter,
            history,
        };
        editor.render();
        editor
    }

    pub fn document(&self) -> &FlyerDocument {
        &self.document
    }

    pub fn view(&self) -> &FlyerView {
        &self.view
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn export_phase(&self) -> ExportPhase {
        self.exporter.phase()
    }

    /// False while an export is running
    pub fn controls_enabled(&self) -> bool {
        !self.exporter.is_busy()
    }

    /// Commit `value` at `path` directly, bypassing any binding
    pub fn apply(&mut self, path: &FieldPath, value: impl Into<String>) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let (_, mut sink) = self.parts();
        sink.set_field(path, value.into())?;
        self.render();
        Ok(())
    }

    pub fn focus(&mut self, path: &FieldPath) -> Result<(), EditorError> {
        self.view.text_mut(path)?.focus();
        Ok(())
    }

    pub fn input(&mut self, path: &FieldPath, text: &str) -> Result<(), EditorError> {
        self.view.text_mut(path)?.input(text);
        Ok(())
    }

    pub fn insert_text(&mut self, path: &FieldPath, text: &str) -> Result<(), EditorError> {
        self.view.text_mut(path)?.insert_text(text);
        Ok(())
    }

    pub fn paste(&mut self, path: &FieldPath, clipboard: &Clipboard) -> Result<bool, EditorError> {
        Ok(self.view.text_mut(path)?.paste(clipboard))
    }

    /// Returns true when Enter committed the field
    pub fn key_enter(&mut self, path: &FieldPath) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let (view, mut sink) = self.parts();
        let committed = view.text_mut(path)?.key_enter(&mut sink)?;
        if committed {
            self.render();
        }
        Ok(committed)
    }

    /// Returns true when leaving the field committed it
    pub fn blur(&mut self, path: &FieldPath) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let (view, mut sink) = self.parts();
        let committed = view.text_mut(path)?.blur(&mut sink)?;
        if committed {
            self.render();
        }
        Ok(committed)
    }

    /// Pick a local image for `path`. Returns false when the chooser was
    /// dismissed.
    pub async fn replace_image<P: FilePicker>(&mut self, path: &FieldPath, picker: &P) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let (view, mut sink) = self.parts();
        let replaced = view.image_mut(path)?.replace(picker, &mut sink).await?;
        if replaced {
            self.render();
        }
        Ok(replaced)
    }

    /// Offer the current document as a project file download
    pub fn save_project(&self, downloads: &dyn DownloadSink) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let download = self.persistence.project_download(&self.document)?;
        let file_name = download.file_name.clone();
        downloads.download(download)?;

        info!(file = %file_name, "project saved");
        Ok(())
    }

    /// Replace the whole document from project file bytes. Invalid input
    /// alerts the user and leaves the document untouched.
    pub fn load_project(&mut self, bytes: &[u8], prompt: &dyn UserPrompt) -> Result<(), EditorError> {
        self.ensure_idle()?;
        let document = match Persistence::parse_project(bytes) {
            Ok(document) => document,
            Err(err) => {
                warn!(error = %err, "rejected project file");
                prompt.alert(INVALID_PROJECT_MESSAGE);
                return Err(err);
            }
        };

        self.replace_document(document, "load project");
        info!("project loaded");
        Ok(())
    }

    /// Ask the host for a project file, then [`load_project`](Self::load_project) it.
    /// Returns false when the chooser was dismissed.
    pub async fn load_project_from<P: FilePicker>(
        &mut self,
        picker: &P,
        prompt: &dyn UserPrompt,
    ) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let picked = picker.pick(ACCEPT_PROJECT).await.map_err(|err| {
            warn!(error = %err, "could not read project file");
            EditorError::FileRead(err)
        })?;
        let Some(file) = picked else {
            return Ok(false);
        };

        debug!(name = %file.name, bytes = file.bytes.len(), "project file picked");
        self.load_project(&file.bytes, prompt)?;
        Ok(true)
    }

    /// Back to the built-in flyer after confirmation. The stored copy is
    /// removed rather than overwritten.
    pub fn reset(&mut self, prompt: &dyn UserPrompt) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        if !prompt.confirm(RESET_CONFIRMATION_MESSAGE) {
            debug!("reset cancelled");
            return Ok(false);
        }

        let previous = std::mem::take(&mut self.document);
        self.history.record(previous, "reset");
        self.persistence.clear(&mut self.store);
        self.render();

        info!("flyer reset to default");
        Ok(true)
    }

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let Some(previous) = self.history.undo(&self.document) else {
            return Ok(false);
        };

        self.document = previous;
        self.persistence.autosave(&mut self.store, &self.document);
        self.render();
        Ok(true)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.ensure_idle()?;
        let Some(next) = self.history.redo(&self.document) else {
            return Ok(false);
        };

        self.document = next;
        self.persistence.autosave(&mut self.store, &self.document);
        self.render();
        Ok(true)
    }

    pub async fn export<R: Rasterizer>(
        &self,
        format: ExportFormat,
        surface: &dyn ExportSurface,
        rasterizer: &R,
        downloads: &dyn DownloadSink,
        prompt: &dyn UserPrompt,
    ) -> Result<(), EditorError> {
        self.exporter
            .export(format, surface, rasterizer, downloads, prompt)
            .await
    }

    fn replace_document(&mut self, document: FlyerDocument, description: &str) {
        let previous = std::mem::replace(&mut self.document, document);
        self.history.record(previous, description);
        self.persistence.autosave(&mut self.store, &self.document);
        self.render();
    }

    fn render(&mut self) -> usize {
        self.view.render(&self.document)
    }

    fn parts(&mut self) -> (&mut FlyerView, DocumentSink<'_, S>) {
        (
            &mut self.view,
            DocumentSink {
                document: &mut self.document,
                store: &mut self.store,
                persistence: &self.persistence,
                history: &mut self.history,
            },
        )
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        if self.exporter.is_busy() {
            debug!(phase = ?self.exporter.phase(), "action refused during export");
            return Err(EditorError::Busy);
        }
        Ok(())
    }
}
