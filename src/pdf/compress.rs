//! Re-save "compression": reload a document and recompress its streams

use std::path::Path;
use lopdf::Document;
use crate::error::{Error, Result};

/// Byte counts before and after a re-save
#[derive(Debug, Clone, Copy)]
pub struct CompressionStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl CompressionStats {
    /// Size reduction as a fraction (negative when the output grew)
    pub fn reduction(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        1.0 - self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Re-save a PDF with its streams recompressed
///
/// This is light-weight compression: no image downsampling or font
/// subsetting, just a clean re-serialization with FlateDecode applied to
/// every compressible stream. Files that are already tightly packed may
/// grow slightly.
pub fn compress_pdf(input: &Path, output: &Path) -> Result<CompressionStats> {
    if !input.exists() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }

    let mut doc = Document::load(input)?;
    if doc.get_pages().is_empty() {
        return Err(Error::EmptyPdf(input.to_path_buf()));
    }

    doc.compress();
    doc.save(output)?;

    Ok(CompressionStats {
        input_bytes: std::fs::metadata(input)?.len(),
        output_bytes: std::fs::metadata(output)?.len(),
    })
}
