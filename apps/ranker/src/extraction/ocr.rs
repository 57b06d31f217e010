//! OCR fallback via the poppler `pdftoppm` rasteriser and the `tesseract` CLI.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info, warn};

use crate::extraction::{ExtractionError, OcrEngine};

const DEFAULT_DPI: u32 = 300;
const DEFAULT_LANG: &str = "eng";

/// Renders every page to PNG and runs tesseract on each, in page order.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    pub dpi: u32,
    pub lang: String,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

impl TesseractOcr {
    /// Both binaries must be on PATH.
    pub fn is_available() -> bool {
        let pdftoppm = Command::new("pdftoppm").arg("-v").output().is_ok();
        let tesseract = Command::new("tesseract").arg("--version").output().is_ok();

        if !pdftoppm {
            debug!("pdftoppm not found - install poppler-utils for OCR support");
        }
        if !tesseract {
            debug!("tesseract not found - install tesseract-ocr for OCR support");
        }

        pdftoppm && tesseract
    }

    fn render_pages(&self, pdf_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(pdf_path)
            .arg(out_dir.join("page"))
            .output()
            .map_err(|e| ExtractionError::Ocr(format!("Failed to run pdftoppm: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Ocr(format!("pdftoppm failed: {stderr}")));
        }

        collect_page_images(out_dir).map_err(ExtractionError::from)
    }

    fn recognize_page(&self, image: &Path, page_num: usize) -> Result<String, ExtractionError> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(&self.lang)
            .output()
            .map_err(|e| {
                ExtractionError::Ocr(format!("Failed to run tesseract on page {page_num}: {e}"))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Tesseract warning on page {page_num}: {stderr}");
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// PNGs in `dir`, sorted. pdftoppm zero-pads page numbers, so lexical order is page order.
fn collect_page_images(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut pages: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
        .collect();
    pages.sort();
    Ok(pages)
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, pdf: &[u8]) -> Result<String, ExtractionError> {
        if !Self::is_available() {
            return Err(ExtractionError::OcrUnavailable);
        }

        let work_dir = tempfile::tempdir()?;
        let pdf_path = work_dir.path().join("input.pdf");
        std::fs::write(&pdf_path, pdf)?;

        let image_dir = work_dir.path().join("pages");
        std::fs::create_dir(&image_dir)?;

        let pages = self.render_pages(&pdf_path, &image_dir)?;
        if pages.is_empty() {
            return Err(ExtractionError::Ocr("pdftoppm produced no images".to_string()));
        }
        info!("Rendered {} pages, starting OCR", pages.len());

        let mut text = String::new();
        for (i, page) in pages.iter().enumerate() {
            text.push_str(&self.recognize_page(page, i + 1)?);
            text.push('\n');
        }

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tesseract_conventions() {
        let ocr = TesseractOcr::default();
        assert_eq!(ocr.dpi, 300);
        assert_eq!(ocr.lang, "eng");
    }

    #[test]
    fn test_page_images_are_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-02.png", "page-01.png", "page-10.png", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        let pages = collect_page_images(dir.path()).unwrap();
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["page-01.png", "page-02.png", "page-10.png"]);
    }
}
