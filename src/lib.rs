//! PDF Toolbox Library
//!
//! An all-in-one library for everyday PDF manipulation. It provides
//! functionality to:
//! - Convert plain text and raster images to PDF
//! - Merge multiple PDF files
//! - Split out page ranges and delete pages
//! - Stamp text watermarks with anchored placement
//! - Rotate pages
//! - Re-save documents with recompressed streams
//! - Extract metadata (page counts, title, author)
//!
//! # Example
//!
//! ```no_run
//! use pdf_toolbox::pdf::{MergeOptions, merge_pdfs};
//! use std::path::PathBuf;
//!
//! let options = MergeOptions {
//!     input_paths: vec![
//!         PathBuf::from("1. intro.pdf"),
//!         PathBuf::from("2. appendix.pdf"),
//!     ],
//!     output_path: PathBuf::from("merged.pdf"),
//! };
//!
//! merge_pdfs(&options).expect("Failed to merge PDFs");
//! ```

pub mod color;
pub mod error;
pub mod pdf;
pub mod placement;

// Re-export commonly used items
pub use error::{Error, Result};
