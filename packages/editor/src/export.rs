//! # Export Controller
//!
//! Drives one export through its phases and guarantees the surface is put
//! back afterwards, whatever happens in between.
//!
//! ```text
//!   Idle ──▶ Preparing ──▶ Rendering ──▶ Finalizing ──▶ Idle
//!            hide controls   rasterize     encode +
//!            export mode     (scale 2)     download
//!                 │                                    ▲
//!                 └──────── ExportGuard::drop ─────────┘
//! ```
//!
//! The phase cell doubles as the busy flag: any phase other than `Idle`
//! means an export is running and new requests are refused.

use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::io;
use std::str::FromStr;
use std::time::Duration;

use flyer_export::{encode_png, render_pdf, Bitmap, EncodeError, PageGeometry};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::host::{Download, DownloadSink, UserPrompt, EXPORT_FAILED_MESSAGE, PDF_FILE_NAME, PNG_FILE_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
}

impl ExportFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => f.write_str("png"),
            ExportFormat::Pdf => f.write_str("pdf"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("unknown export format `{}` (expected png or pdf)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportPhase {
    #[default]
    Idle,
    Preparing,
    Rendering,
    Finalizing,
}

/// Options handed to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Upscale factor applied to the flyer's CSS size
    pub scale: f32,

    /// Fetch cross-origin images with CORS
    pub cross_origin_images: bool,

    /// Accept tainted canvases
    pub allow_taint: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            cross_origin_images: true,
            allow_taint: true,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RasterizeError(pub String);

/// Produces a bitmap of the flyer region as currently displayed
pub trait Rasterizer {
    fn rasterize(&self, options: &RasterOptions) -> impl Future<Output = Result<Bitmap, RasterizeError>>;
}

/// The visible flyer, as far as export is concerned
pub trait ExportSurface {
    /// Edit controls (buttons, file inputs)
    fn set_controls_visible(&self, visible: bool);

    /// Export-only styling on the flyer region
    fn set_export_mode(&self, enabled: bool);
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Rasterization failed: {0}")]
    Rasterize(#[from] RasterizeError),

    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Download failed: {0}")]
    Download(io::Error),

    #[error("Rasterization timed out after {0:?}")]
    TimedOut(Duration),
}

/// Export parameters derived from [`EditorConfig`]. Raster scale and page
/// geometry are fixed at 2x and A4 portrait.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub raster: RasterOptions,
    pub jpeg_quality: u8,
    pub page: PageGeometry,
    pub timeout: Option<Duration>,
}

impl From<&EditorConfig> for ExportSettings {
    fn from(config: &EditorConfig) -> Self {
        Self {
            raster: RasterOptions::default(),
            jpeg_quality: config.jpeg_quality,
            page: PageGeometry::a4_portrait(),
            timeout: config.export_timeout(),
        }
    }
}

#[derive(Debug)]
pub struct ExportController {
    phase: Cell<ExportPhase>,
    settings: ExportSettings,
}

impl ExportController {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            phase: Cell::new(ExportPhase::Idle),
            settings,
        }
    }

    pub fn phase(&self) -> ExportPhase {
        self.phase.get()
    }

    pub fn is_busy(&self) -> bool {
        self.phase.get() != ExportPhase::Idle
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Run one export. Refused with [`EditorError::Busy`] while another is in
    /// flight; failures alert the user once the surface is restored.
    pub async fn export<R: Rasterizer>(
        &self,
        format: ExportFormat,
        surface: &dyn ExportSurface,
        rasterizer: &R,
        downloads: &dyn DownloadSink,
        prompt: &dyn UserPrompt,
    ) -> Result<(), EditorError> {
        if self.is_busy() {
            debug!(%format, phase = ?self.phase(), "export refused, already running");
            return Err(EditorError::Busy);
        }

        info!(%format, "export started");
        let result = {
            let _guard = ExportGuard::engage(&self.phase, surface);
            self.run(format, rasterizer, downloads).await
        };

        match result {
            Ok(file_name) => {
                info!(%format, file = %file_name, "export finished");
                Ok(())
            }
            Err(err) => {
                error!(%format, error = %err, "export failed");
                prompt.alert(EXPORT_FAILED_MESSAGE);
                Err(err.into())
            }
        }
    }

    async fn run<R: Rasterizer>(
        &self,
        format: ExportFormat,
        rasterizer: &R,
        downloads: &dyn DownloadSink,
    ) -> Result<String, ExportError> {
        self.phase.set(ExportPhase::Rendering);
        let options = self.settings.raster;
        let bitmap = match self.settings.timeout {
            Some(limit) => tokio::time::timeout(limit, rasterizer.rasterize(&options))
                .await
                .map_err(|_| ExportError::TimedOut(limit))??,
            None => rasterizer.rasterize(&options).await?,
        };
        debug!(width = bitmap.width(), height = bitmap.height(), "flyer rasterized");

        self.phase.set(ExportPhase::Finalizing);
        let download = self.encode(format, &bitmap)?;
        let file_name = download.file_name.clone();
        downloads.download(download).map_err(ExportError::Download)?;
        Ok(file_name)
    }

    /// Turn a captured bitmap into the download for `format`
    pub fn encode(&self, format: ExportFormat, bitmap: &Bitmap) -> Result<Download, ExportError> {
        let (file_name, bytes) = match format {
            ExportFormat::Png => (PNG_FILE_NAME, encode_png(bitmap)?),
            ExportFormat::Pdf => (
                PDF_FILE_NAME,
                render_pdf(bitmap, self.settings.jpeg_quality, &self.settings.page)?,
            ),
        };

        Ok(Download {
            file_name: file_name.to_string(),
            mime: format.mime(),
            bytes,
        })
    }
}

/// Holds the surface in export state; restores it on drop
struct ExportGuard<'a> {
    phase: &'a Cell<ExportPhase>,
    surface: &'a dyn ExportSurface,
}

impl<'a> ExportGuard<'a> {
    fn engage(phase: &'a Cell<ExportPhase>, surface: &'a dyn ExportSurface) -> Self {
        phase.set(ExportPhase::Preparing);
        surface.set_controls_visible(false);
        surface.set_export_mode(true);
        Self { phase, surface }
    }
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.surface.set_export_mode(false);
        self.surface.set_controls_visible(true);
        self.phase.set(ExportPhase::Idle);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use image::Rgba;

    use super::*;

    #[derive(Default)]
    struct Surface {
        log: RefCell<Vec<String>>,
    }

    impl ExportSurface for Surface {
        fn set_controls_visible(&self, visible: bool) {
            self.log.borrow_mut().push(format!("controls:{}", visible));
        }

        fn set_export_mode(&self, enabled: bool) {
            self.log.borrow_mut().push(format!("export-mode:{}", enabled));
        }
    }

    #[derive(Default)]
    struct Downloads {
        files: RefCell<Vec<Download>>,
    }

    impl DownloadSink for Downloads {
        fn download(&self, download: Download) -> io::Result<()> {
            self.files.borrow_mut().push(download);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Prompt {
        alerts: RefCell<Vec<String>>,
    }

    impl UserPrompt for Prompt {
        fn confirm(&self, _message: &str) -> bool {
            true
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    struct Solid;

    impl Rasterizer for Solid {
        async fn rasterize(&self, options: &RasterOptions) -> Result<Bitmap, RasterizeError> {
            assert_eq!(*options, RasterOptions::default());
            Ok(Bitmap::from_pixel(40, 56, Rgba([200, 30, 30, 255])))
        }
    }

    struct Broken;

    impl Rasterizer for Broken {
        async fn rasterize(&self, _options: &RasterOptions) -> Result<Bitmap, RasterizeError> {
            Err(RasterizeError("tainted canvas".to_string()))
        }
    }

    fn controller() -> ExportController {
        ExportController::new(ExportSettings::from(&EditorConfig::default()))
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!("gif".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }

    #[tokio::test]
    async fn test_pdf_export_downloads_once() {
        let controller = controller();
        let (surface, downloads, prompt) = (Surface::default(), Downloads::default(), Prompt::default());

        controller
            .export(ExportFormat::Pdf, &surface, &Solid, &downloads, &prompt)
            .await
            .unwrap();

        let files = downloads.files.borrow();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name, "flyer-export.pdf");
        assert_eq!(files[0].mime, "application/pdf");
        assert!(files[0].bytes.starts_with(b"%PDF"));
        assert!(prompt.alerts.borrow().is_empty());
        assert_eq!(controller.phase(), ExportPhase::Idle);
    }

    #[tokio::test]
    async fn test_failure_restores_surface_and_alerts() {
        let controller = controller();
        let (surface, downloads, prompt) = (Surface::default(), Downloads::default(), Prompt::default());

        let err = controller
            .export(ExportFormat::Png, &surface, &Broken, &downloads, &prompt)
            .await
            .unwrap_err();

        assert!(matches!(err, EditorError::Export(ExportError::Rasterize(_))));
        assert_eq!(
            *surface.log.borrow(),
            vec!["controls:false", "export-mode:true", "export-mode:false", "controls:true"]
        );
        assert_eq!(*prompt.alerts.borrow(), vec![EXPORT_FAILED_MESSAGE.to_string()]);
        assert!(downloads.files.borrow().is_empty());
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_encode_png_download() {
        let bitmap = Bitmap::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
        let download = controller().encode(ExportFormat::Png, &bitmap).unwrap();
        assert_eq!(download.file_name, "flyer-export.png");
        assert_eq!(download.mime, "image/png");
        assert!(download.bytes.starts_with(b"\x89PNG"));
    }
}
