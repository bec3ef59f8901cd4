//! In-memory host fakes shared by the integration tests

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::time::Duration;

use flyer_editor::{
    Bitmap, Download, DownloadSink, ExportSurface, FilePicker, PickedFile, RasterOptions, RasterizeError,
    Rasterizer, UserPrompt,
};
use image::Rgba;

#[derive(Default)]
pub struct RecordingDownloads {
    pub files: RefCell<Vec<Download>>,
}

impl RecordingDownloads {
    pub fn count(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn last(&self) -> Option<Download> {
        self.files.borrow().last().cloned()
    }
}

impl DownloadSink for RecordingDownloads {
    fn download(&self, download: Download) -> io::Result<()> {
        self.files.borrow_mut().push(download);
        Ok(())
    }
}

/// Answers every confirmation with a fixed reply and records alerts
pub struct ScriptedPrompt {
    pub answer: bool,
    pub confirmations: RefCell<Vec<String>>,
    pub alerts: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirmations: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn alert_count(&self) -> usize {
        self.alerts.borrow().len()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.confirmations.borrow_mut().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// Export surface state, observable from the rasterizer
#[derive(Debug)]
pub struct SurfaceState {
    pub controls_visible: Cell<bool>,
    pub export_mode: Cell<bool>,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            controls_visible: Cell::new(true),
            export_mode: Cell::new(false),
        }
    }
}

#[derive(Default, Clone)]
pub struct RecordingSurface {
    pub state: Rc<SurfaceState>,
}

impl RecordingSurface {
    pub fn controls_visible(&self) -> bool {
        self.state.controls_visible.get()
    }

    pub fn export_mode(&self) -> bool {
        self.state.export_mode.get()
    }
}

impl ExportSurface for RecordingSurface {
    fn set_controls_visible(&self, visible: bool) {
        self.state.controls_visible.set(visible);
    }

    fn set_export_mode(&self, enabled: bool) {
        self.state.export_mode.set(enabled);
    }
}

pub enum Behaviour {
    Succeed,
    Fail,
    /// Sleep before succeeding
    Slow(Duration),
}

/// Rasterizer that records what the surface looked like during capture
pub struct FakeRasterizer {
    pub surface: Rc<SurfaceState>,
    pub behaviour: Behaviour,
    pub captures: RefCell<Vec<(bool, bool)>>,
}

impl FakeRasterizer {
    pub fn new(surface: &RecordingSurface, behaviour: Behaviour) -> Self {
        Self {
            surface: Rc::clone(&surface.state),
            behaviour,
            captures: RefCell::new(Vec::new()),
        }
    }
}

impl Rasterizer for FakeRasterizer {
    async fn rasterize(&self, options: &RasterOptions) -> Result<Bitmap, RasterizeError> {
        self.captures
            .borrow_mut()
            .push((self.surface.controls_visible.get(), self.surface.export_mode.get()));

        match self.behaviour {
            Behaviour::Succeed => {}
            Behaviour::Fail => return Err(RasterizeError("canvas is tainted".to_string())),
            Behaviour::Slow(delay) => tokio::time::sleep(delay).await,
        }

        let scale = options.scale as u32;
        Ok(Bitmap::from_pixel(60 * scale, 85 * scale, Rgba([20, 60, 140, 255])))
    }
}

pub enum PickerReply {
    Dismiss,
    Fail,
    File(PickedFile),
}

pub struct FakePicker {
    pub reply: PickerReply,
    pub requests: RefCell<Vec<String>>,
}

impl FakePicker {
    pub fn new(reply: PickerReply) -> Self {
        Self {
            reply,
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn file(name: &str, mime: Option<&str>, bytes: &[u8]) -> Self {
        Self::new(PickerReply::File(PickedFile {
            name: name.to_string(),
            mime: mime.map(str::to_string),
            bytes: bytes.to_vec(),
        }))
    }
}

impl FilePicker for FakePicker {
    async fn pick(&self, accept: &str) -> io::Result<Option<PickedFile>> {
        self.requests.borrow_mut().push(accept.to_string());
        tokio::task::yield_now().await;

        match &self.reply {
            PickerReply::Dismiss => Ok(None),
            PickerReply::Fail => Err(io::Error::new(io::ErrorKind::Other, "read aborted")),
            PickerReply::File(file) => Ok(Some(file.clone())),
        }
    }
}
