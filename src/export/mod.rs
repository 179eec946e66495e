//! Encodes the composed surface. Only a thin adapter: the editor core never depends on it.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

pub const DEFAULT_EXPORT_FILE: &str = "canvas-image.png";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export path is empty")]
    MissingPath,
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

pub trait SurfaceExporter {
    type Output;

    fn export(&self, surface: &RgbaImage) -> ExportResult<Self::Output>;
}

pub fn encode_png(surface: &RgbaImage) -> ExportResult<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    surface.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PngBytesExporter;

impl SurfaceExporter for PngBytesExporter {
    type Output = Vec<u8>;

    fn export(&self, surface: &RgbaImage) -> ExportResult<Vec<u8>> {
        encode_png(surface)
    }
}

#[derive(Debug, Clone)]
pub struct PngFileExporter {
    path: PathBuf,
}

impl PngFileExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Exporter writing `canvas-image.png` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_EXPORT_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SurfaceExporter for PngFileExporter {
    type Output = PathBuf;

    fn export(&self, surface: &RgbaImage) -> ExportResult<PathBuf> {
        if self.path.as_os_str().is_empty() {
            return Err(ExportError::MissingPath);
        }
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let bytes = encode_png(surface)?;
        fs::write(&self.path, bytes)?;
        tracing::info!(path = %self.path.display(), "surface exported");
        Ok(self.path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn encode_png_produces_decodable_png() {
        let surface = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));
        let bytes = encode_png(&surface).expect("encoding should succeed");
        assert_eq!(&bytes[1..4], b"PNG");

        let decoded = image::load_from_memory(&bytes)
            .expect("png should decode")
            .to_rgba8();
        assert_eq!(decoded, surface);
    }

    #[test]
    fn file_exporter_writes_default_name_and_creates_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let nested = dir.path().join("out");
        let exporter = PngFileExporter::in_dir(&nested);
        let surface = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));

        let path = exporter.export(&surface).expect("export should succeed");
        assert_eq!(path, nested.join(DEFAULT_EXPORT_FILE));
        assert!(path.exists());
    }

    #[test]
    fn file_exporter_rejects_empty_path() {
        let err = PngFileExporter::new("")
            .export(&RgbaImage::new(1, 1))
            .expect_err("empty path should fail");
        assert!(matches!(err, ExportError::MissingPath));
    }
}
