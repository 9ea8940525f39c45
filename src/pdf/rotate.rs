//! Page rotation via the /Rotate page attribute

use std::path::Path;
use lopdf::{Document, Object};
use crate::error::{Error, Result};
use crate::pdf::metadata::inherited_page_attr;

/// Rotate every page of a PDF by `degrees`, added to each page's current
/// rotation.
///
/// `degrees` must be a multiple of 90 (positive or negative) because the
/// PDF /Rotate entry only admits quarter turns. The resulting value is
/// normalized into `0..360` before being written back.
pub fn rotate_pdf(input: &Path, output: &Path, degrees: i64) -> Result<()> {
    if degrees % 90 != 0 {
        return Err(Error::InvalidArgument(format!(
            "rotation must be a multiple of 90 degrees, got {}",
            degrees
        )));
    }
    if !input.exists() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }

    let mut doc = Document::load(input)?;
    let pages: Vec<_> = doc.get_pages().into_values().collect();
    if pages.is_empty() {
        return Err(Error::EmptyPdf(input.to_path_buf()));
    }

    for page_id in pages {
        // Current rotation may be inherited from a Pages ancestor
        let current = inherited_page_attr(&doc, page_id, b"Rotate")
            .and_then(|object| object.as_i64().ok())
            .unwrap_or(0);
        let rotation = (current + degrees).rem_euclid(360);

        if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
            dict.set("Rotate", Object::Integer(rotation));
        }
    }

    doc.save(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_quarter_turn_rejected() {
        let result = rotate_pdf(Path::new("in.pdf"), Path::new("out.pdf"), 45);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_input_rejected() {
        let result = rotate_pdf(Path::new("does-not-exist.pdf"), Path::new("out.pdf"), 90);
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
