//! Export pipeline: rasterize whichever renderer is currently mounted,
//! then save a PNG locally or forward it to the document-conversion
//! collaborator. Export never mutates chart configuration or data.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::RgbaImage;
use serde::Serialize;
use tracing::warn;

use crate::error::ChartResult;
use crate::render::RenderSurface;

#[cfg(feature = "remote-export")]
mod http;
#[cfg(feature = "remote-export")]
pub use http::HttpDocumentConverter;

/// Derives a filesystem-safe filename stem from a chart title.
///
/// Every run of non-alphanumeric characters collapses to a single `_`,
/// leading and trailing separators are dropped, and an empty stem falls
/// back to `chart`: `"Sales Q1"` becomes `Sales_Q1`.
#[must_use]
pub fn filename_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    let mut pending_separator = false;
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !stem.is_empty() {
                stem.push('_');
            }
            pending_separator = false;
            stem.push(ch);
        } else {
            pending_separator = true;
        }
    }
    if stem.is_empty() {
        "chart".to_owned()
    } else {
        stem
    }
}

#[must_use]
pub fn chart_filename(title: &str, extension: &str) -> String {
    format!("{}.{extension}", filename_stem(title))
}

/// Host file-save mechanism.
pub trait FileSink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> ChartResult<()>;
}

/// Saves exported files into one directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskSink {
    directory: PathBuf,
}

impl DiskSink {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl FileSink for DiskSink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> ChartResult<()> {
        std::fs::write(self.directory.join(filename), bytes)?;
        Ok(())
    }
}

/// In-memory sink used by tests and buffering hosts.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl FileSink for MemorySink {
    fn save(&mut self, filename: &str, bytes: &[u8]) -> ChartResult<()> {
        self.files.push((filename.to_owned(), bytes.to_vec()));
        Ok(())
    }
}

fn encode_png(raster: &RgbaImage) -> ChartResult<Vec<u8>> {
    let mut bytes = Vec::new();
    raster.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )?;
    Ok(bytes)
}

/// Rasterizes the mounted surface and saves it as a PNG named after the
/// chart title. Returns the filename handed to the sink.
pub fn export_png<S: RenderSurface>(
    surface: &S,
    title: &str,
    sink: &mut dyn FileSink,
) -> ChartResult<String> {
    let raster = surface.capture()?;
    let bytes = encode_png(&raster)?;
    let filename = chart_filename(title, "png");
    sink.save(&filename, &bytes)?;
    Ok(filename)
}

/// Request of the document-conversion collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertRequest {
    pub upload_id: String,
    /// PNG raster as a base64 data URL.
    pub image: String,
    pub title: String,
}

/// Collaborator that turns a rasterized chart into a binary document.
pub trait DocumentConverter {
    /// Returns the binary document payload, or `ChartError::Conversion`
    /// carrying a human-readable detail.
    fn convert(&self, request: &ConvertRequest) -> ChartResult<Vec<u8>>;
}

/// Rasterizes the mounted surface, submits it for document conversion and
/// saves the returned payload as `<stem>.pdf`.
///
/// One outstanding request, no retry: a failed conversion saves nothing,
/// leaves prior state unchanged, and must be re-triggered by the user.
pub fn export_document<S, C>(
    surface: &S,
    upload_id: &str,
    title: &str,
    converter: &C,
    sink: &mut dyn FileSink,
) -> ChartResult<String>
where
    S: RenderSurface,
    C: DocumentConverter + ?Sized,
{
    let raster = surface.capture()?;
    let bytes = encode_png(&raster)?;
    let request = ConvertRequest {
        upload_id: upload_id.to_owned(),
        image: format!("data:image/png;base64,{}", BASE64.encode(&bytes)),
        title: title.to_owned(),
    };
    let document = converter
        .convert(&request)
        .inspect_err(|error| warn!(error = %error, "document conversion failed"))?;
    let filename = chart_filename(title, "pdf");
    sink.save(&filename, &document)?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::filename_stem;

    #[test]
    fn stems_collapse_non_alphanumeric_runs() {
        assert_eq!(filename_stem("Sales Q1"), "Sales_Q1");
        assert_eq!(filename_stem("Revenue — by  region!"), "Revenue_by_region");
        assert_eq!(filename_stem("  (draft)  "), "draft");
        assert_eq!(filename_stem("***"), "chart");
    }
}
