//! Page-level operations: splitting out a page range and deleting pages

use std::path::Path;
use lopdf::Document;
use crate::error::{Error, Result};

/// Extract an inclusive, 1-indexed page range into a new PDF
///
/// `end` may exceed the document length; it is clamped to the last page.
/// A single page is extracted when `start == end`.
pub fn extract_pages(input: &Path, output: &Path, start: u32, end: u32) -> Result<()> {
    if start == 0 || end < start {
        return Err(Error::InvalidArgument(format!(
            "invalid page range {}-{} (1-indexed, inclusive)",
            start, end
        )));
    }

    let mut doc = load_document(input)?;
    let total = doc.get_pages().len() as u32;

    if start > total {
        return Err(Error::PageOutOfRange { page: start, total });
    }
    let end = end.min(total);

    // Keep the range by dropping everything outside it
    let to_drop: Vec<u32> = (1..=total).filter(|p| *p < start || *p > end).collect();
    if !to_drop.is_empty() {
        doc.delete_pages(&to_drop);
    }

    doc.compress();
    doc.save(output)?;

    Ok(())
}

/// Delete a single 1-indexed page from a PDF
///
/// Refuses to delete the only remaining page, since the result would be a
/// document with no pages.
pub fn delete_page(input: &Path, output: &Path, page: u32) -> Result<()> {
    if page == 0 {
        return Err(Error::InvalidArgument(
            "page numbers are 1-indexed".to_string(),
        ));
    }

    let mut doc = load_document(input)?;
    let total = doc.get_pages().len() as u32;

    if page > total {
        return Err(Error::PageOutOfRange { page, total });
    }
    if total == 1 {
        return Err(Error::General(
            "Cannot delete the only page of a document".to_string(),
        ));
    }

    doc.delete_pages(&[page]);
    doc.compress();
    doc.save(output)?;

    Ok(())
}

fn load_document(input: &Path) -> Result<Document> {
    if !input.exists() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }
    let doc = Document::load(input)?;
    if doc.get_pages().is_empty() {
        return Err(Error::EmptyPdf(input.to_path_buf()));
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_zero_page_rejected() {
        let result = extract_pages(Path::new("in.pdf"), Path::new("out.pdf"), 0, 1);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result = delete_page(Path::new("in.pdf"), Path::new("out.pdf"), 0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = extract_pages(Path::new("in.pdf"), Path::new("out.pdf"), 5, 2);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_input_rejected() {
        let missing = PathBuf::from("does-not-exist.pdf");
        let result = extract_pages(&missing, Path::new("out.pdf"), 1, 1);
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
