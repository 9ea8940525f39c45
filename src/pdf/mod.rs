//! PDF manipulation module

pub mod compress;
pub mod convert;
pub mod merge;
pub mod metadata;
pub mod pages;
pub mod rotate;
pub mod watermark;

// Re-export commonly used items
pub use compress::{compress_pdf, CompressionStats};
pub use convert::{images_to_pdf, text_to_pdf, ImageEncoding, ImageOptions, TextOptions};
pub use merge::{merge_pdfs, MergeOptions};
pub use metadata::{count_pages, extract_metadata, PdfMetadata};
pub use pages::{delete_page, extract_pages};
pub use rotate::rotate_pdf;
pub use watermark::{stamp_watermark, WatermarkOptions};

/// Escape special characters in PDF literal strings
pub(crate) fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
        .replace('\r', "\\r")
        .replace('\n', "\\n")
}
