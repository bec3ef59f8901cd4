//! Terminal and filesystem implementations of the editor's host services

use std::cell::{Cell, RefCell};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Component, Path, PathBuf};

use colored::Colorize;
use flyer_editor::{
    Bitmap, Download, DownloadSink, ExportSurface, FilePicker, PickedFile, RasterOptions, RasterizeError,
    Rasterizer, UserPrompt,
};
use image::imageops::FilterType;
use tracing::debug;

/// Writes each download into a directory
pub struct DirectoryDownloads {
    dir: PathBuf,
    written: RefCell<Vec<PathBuf>>,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: RefCell::new(Vec::new()),
        }
    }

    pub fn written(&self) -> Vec<PathBuf> {
        self.written.borrow().clone()
    }
}

impl DownloadSink for DirectoryDownloads {
    fn download(&self, download: Download) -> io::Result<()> {
        if !is_plain_file_name(&download.file_name) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("refusing to write download outside {}: {}", self.dir.display(), download.file_name),
            ));
        }

        fs::create_dir_all(&self.dir)?;
        let target = self.dir.join(&download.file_name);
        fs::write(&target, &download.bytes)?;

        debug!(path = %target.display(), mime = download.mime, bytes = download.bytes.len(), "download written");
        self.written.borrow_mut().push(target);
        Ok(())
    }
}

/// Exactly one normal path component: no separators, no `..`, not absolute
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Confirmations on stdin, alerts on stderr
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl UserPrompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} {} ", message, "[o/N]".dimmed());
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{} {}", "⚠️".yellow(), message.yellow());
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}

/// "Picks" a file given on the command line
pub struct PathPicker {
    path: PathBuf,
}

impl PathPicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FilePicker for PathPicker {
    async fn pick(&self, accept: &str) -> io::Result<Option<PickedFile>> {
        debug!(path = %self.path.display(), accept, "reading picked file");
        let bytes = tokio::fs::read(&self.path).await?;

        Ok(Some(PickedFile {
            name: file_name(&self.path),
            mime: None,
            bytes,
        }))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Uses a pre-rendered image of the flyer as the capture, upscaled by the
/// requested factor
pub struct SnapshotRasterizer {
    path: PathBuf,
}

impl SnapshotRasterizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Rasterizer for SnapshotRasterizer {
    async fn rasterize(&self, options: &RasterOptions) -> Result<Bitmap, RasterizeError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| RasterizeError(format!("{}: {}", self.path.display(), err)))?;
        let snapshot = image::load_from_memory(&bytes)
            .map_err(|err| RasterizeError(format!("{}: {}", self.path.display(), err)))?
            .to_rgba8();

        if options.scale <= 0.0 {
            return Err(RasterizeError(format!("invalid raster scale {}", options.scale)));
        }
        if options.scale == 1.0 {
            return Ok(snapshot);
        }

        let width = (snapshot.width() as f32 * options.scale).round().max(1.0) as u32;
        let height = (snapshot.height() as f32 * options.scale).round().max(1.0) as u32;
        debug!(width, height, scale = options.scale, "scaling snapshot");
        Ok(image::imageops::resize(&snapshot, width, height, FilterType::Triangle))
    }
}

/// Surface with no screen behind it; tracks state for logging
#[derive(Debug)]
pub struct HeadlessSurface {
    controls_visible: Cell<bool>,
    export_mode: Cell<bool>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            controls_visible: Cell::new(true),
            export_mode: Cell::new(false),
        }
    }
}

impl HeadlessSurface {
    pub fn controls_visible(&self) -> bool {
        self.controls_visible.get()
    }

    pub fn export_mode(&self) -> bool {
        self.export_mode.get()
    }
}

impl ExportSurface for HeadlessSurface {
    fn set_controls_visible(&self, visible: bool) {
        debug!(visible, "controls");
        self.controls_visible.set(visible);
    }

    fn set_export_mode(&self, enabled: bool) {
        debug!(enabled, "export mode");
        self.export_mode.set(enabled);
    }
}
