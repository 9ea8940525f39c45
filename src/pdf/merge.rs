//! PDF merging functionality using lopdf

use std::collections::BTreeMap;
use std::path::PathBuf;
use lopdf::{dictionary, Document, Object, ObjectId};
use crate::error::{Error, Result};

/// Options for merging PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Input PDF file paths in the order they should be merged
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

/// Merge multiple PDF files into a single PDF
///
/// All objects from every input are renumbered into one object space, the
/// page order follows the input order, and a fresh Pages/Catalog pair is
/// written on top.
///
/// # Example
///
/// ```no_run
/// use pdf_toolbox::pdf::{MergeOptions, merge_pdfs};
/// use std::path::PathBuf;
///
/// let options = MergeOptions {
///     input_paths: vec![
///         PathBuf::from("1. first.pdf"),
///         PathBuf::from("2. second.pdf"),
///     ],
///     output_path: PathBuf::from("merged.pdf"),
/// };
///
/// merge_pdfs(&options).expect("Failed to merge");
/// ```
pub fn merge_pdfs(options: &MergeOptions) -> Result<()> {
    if options.input_paths.is_empty() {
        return Err(Error::General("No input files provided".to_string()));
    }

    for path in &options.input_paths {
        if !path.exists() {
            return Err(Error::FileNotFound(path.clone()));
        }
    }

    let mut documents = Vec::new();
    for path in &options.input_paths {
        let doc = Document::load(path)?;
        if doc.get_pages().is_empty() {
            return Err(Error::EmptyPdf(path.clone()));
        }
        documents.push(doc);
    }

    // Renumber every document into a shared object space, collecting the
    // page objects in input order
    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        page_ids.extend(doc.get_pages().into_values());
        objects.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    merged.objects.extend(objects);
    // new_object_id() hands out max_id + 1, so it must reflect the objects
    // we just inserted or fresh IDs would collide
    merged.max_id = max_id - 1;

    let pages_id = merged.new_object_id();
    let kids: Vec<Object> = page_ids.iter().map(|&id| Object::Reference(id)).collect();

    let pages = dictionary! {
        "Type" => "Pages",
        "Count" => page_ids.len() as i64,
        "Kids" => kids,
    };
    merged.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    merged.trailer.set("Root", Object::Reference(catalog_id));

    // Reparent every page onto the new Pages node
    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(ref mut dict)) = merged.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    merged.compress();
    merged.save(&options.output_path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_list_rejected() {
        let options = MergeOptions {
            input_paths: vec![],
            output_path: PathBuf::from("merged.pdf"),
        };
        assert!(matches!(merge_pdfs(&options), Err(Error::General(_))));
    }

    #[test]
    fn test_missing_input_rejected() {
        let options = MergeOptions {
            input_paths: vec![PathBuf::from("does-not-exist.pdf")],
            output_path: PathBuf::from("merged.pdf"),
        };
        assert!(matches!(merge_pdfs(&options), Err(Error::FileNotFound(_))));
    }

    // End-to-end merges with real documents live in tests/integration.rs
}
