//! Text Extractor — turns an uploaded PDF into plain text.
//!
//! The embedded text layer is read with `pdf-extract`. Scanned resumes have
//! no text layer, so an empty result (or a parse failure) falls back to OCR.
//! `pdf-extract` panics on some valid PDFs (missing `/Resources`, unknown
//! fonts); a panic counts as a parse failure.
//! Extraction is blocking; async callers run it on `spawn_blocking`.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::{debug, info};

pub mod ocr;

pub use ocr::TesseractOcr;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parse error: {0}")]
    Pdf(String),

    #[error("OCR requires pdftoppm (poppler-utils) and tesseract-ocr to be installed")]
    OcrUnavailable,

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The Text Extractor seam.
pub trait TextExtractor: Send + Sync {
    /// Returns trimmed text; an empty string means nothing was recoverable.
    fn extract(&self, pdf: &[u8]) -> Result<String, ExtractionError>;
}

/// Something that can read text off rendered page images.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, pdf: &[u8]) -> Result<String, ExtractionError>;
}

type TextLayerFn = fn(&[u8]) -> Result<String, ExtractionError>;

/// Text layer first, OCR when the text layer is empty or unreadable.
pub struct PdfTextExtractor<O = TesseractOcr> {
    ocr: O,
    text_layer: TextLayerFn,
}

impl PdfTextExtractor<TesseractOcr> {
    pub fn new() -> Self {
        Self::with_ocr(TesseractOcr::default())
    }
}

impl Default for PdfTextExtractor<TesseractOcr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: OcrEngine> PdfTextExtractor<O> {
    pub fn with_ocr(ocr: O) -> Self {
        Self {
            ocr,
            text_layer: extract_text_layer,
        }
    }
}

impl<O: OcrEngine> TextExtractor for PdfTextExtractor<O> {
    fn extract(&self, pdf: &[u8]) -> Result<String, ExtractionError> {
        match read_text_layer(self.text_layer, pdf) {
            Ok(text) if !text.trim().is_empty() => return Ok(text.trim().to_string()),
            Ok(_) => info!("PDF has no text layer, falling back to OCR"),
            Err(e) => info!("Text layer unreadable ({e}), falling back to OCR"),
        }

        let text = self.ocr.recognize(pdf)?;
        debug!("OCR recovered {} chars", text.len());
        Ok(text.trim().to_string())
    }
}

fn extract_text_layer(pdf: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(pdf).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

/// Runs `layer`, turning a panic into `ExtractionError::Pdf`.
fn read_text_layer(layer: TextLayerFn, pdf: &[u8]) -> Result<String, ExtractionError> {
    panic::catch_unwind(AssertUnwindSafe(|| layer(pdf))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(ExtractionError::Pdf(format!("pdf-extract panicked: {message}")))
    })
}
