use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Editor settings. Every field has a default, so a partial JSON object is
/// a valid configuration. Download names, raster scale and page geometry are
/// fixed and not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Durable store key holding the auto-saved document
    pub storage_key: String,

    /// JPEG quality used inside the PDF (1..=100)
    pub jpeg_quality: u8,

    /// Maximum undo levels (0 = unlimited)
    pub undo_levels: usize,

    /// Abort a rasterization that takes longer than this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_timeout_ms: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: "flyerData".to_string(),
            jpeg_quality: 95,
            undo_levels: 100,
            export_timeout_ms: None,
        }
    }
}

impl EditorConfig {
    pub fn export_timeout(&self) -> Option<Duration> {
        self.export_timeout_ms.map(Duration::from_millis)
    }
}
