//! Text watermark stamping using lopdf
//!
//! Stamps a piece of text onto every page of an existing PDF. The draw
//! origin comes from the placement module, styling (color, opacity,
//! rotation) is applied through content-stream operators and an ExtGState,
//! and the watermark content is appended after the original page content
//! so it renders on top.

use std::path::Path;
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::pdf::escape_pdf_string;
use crate::pdf::metadata::{inherited_page_attr, object_as_number};
use crate::placement::{place, PageGeometry, WatermarkSpec};

/// Options for stamping a text watermark onto a PDF
#[derive(Debug, Clone)]
pub struct WatermarkOptions {
    /// Text, font size, rotation, anchor and margin
    pub spec: WatermarkSpec,
    /// Fill color
    pub color: Rgb,
    /// Opacity in 0.0..=1.0 (applied via ExtGState)
    pub opacity: f64,
}

impl WatermarkOptions {
    pub fn new(spec: WatermarkSpec) -> Self {
        Self {
            spec,
            color: Rgb::BLACK,
            opacity: 1.0,
        }
    }
}

/// Stamp the watermark described by `options` onto every page of `input`
/// and save the result to `output`.
///
/// Each page's geometry is read from its (possibly inherited) MediaBox, so
/// mixed page sizes anchor correctly. Rotation happens around the draw
/// origin, exactly as the underlying `Tm` operator rotates.
///
/// # Example
///
/// ```no_run
/// use pdf_toolbox::pdf::{stamp_watermark, WatermarkOptions};
/// use pdf_toolbox::placement::{Anchor, WatermarkSpec};
/// use std::path::Path;
///
/// let mut spec = WatermarkSpec::new("CONFIDENTIAL", 48.0);
/// spec.anchor = Anchor::Center;
/// spec.rotation_degrees = 45.0;
///
/// let mut options = WatermarkOptions::new(spec);
/// options.opacity = 0.3;
///
/// stamp_watermark(Path::new("input.pdf"), Path::new("output.pdf"), &options)
///     .expect("Failed to watermark");
/// ```
pub fn stamp_watermark(input: &Path, output: &Path, options: &WatermarkOptions) -> Result<()> {
    if !(0.0..=1.0).contains(&options.opacity) {
        return Err(Error::InvalidArgument(format!(
            "opacity must be within 0.0..=1.0, got {}",
            options.opacity
        )));
    }
    if !input.exists() {
        return Err(Error::FileNotFound(input.to_path_buf()));
    }

    let mut doc = Document::load(input)?;
    let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();
    if pages.is_empty() {
        return Err(Error::EmptyPdf(input.to_path_buf()));
    }

    // One shared font and graphics state for all pages
    let font_id = doc.add_object(helvetica_font());
    let gstate_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => options.opacity as f32,
        "CA" => options.opacity as f32,
    });

    for page_id in pages {
        let geometry = page_geometry(&doc, page_id)?;
        let placement = place(&geometry, &options.spec)?;

        let content = watermark_content(placement.x, placement.y, options);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        add_page_resource(&mut doc, page_id, b"Font", "Fwm", font_id)?;
        add_page_resource(&mut doc, page_id, b"ExtGState", "GSwm", gstate_id)?;
        append_content_to_page(&mut doc, page_id, content_id)?;
    }

    doc.compress();
    doc.save(output)?;

    Ok(())
}

/// Read a page's width and height from its MediaBox
fn page_geometry(doc: &Document, page_id: ObjectId) -> Result<PageGeometry> {
    let media_box = inherited_page_attr(doc, page_id, b"MediaBox")
        .ok_or_else(|| Error::General("Page has no MediaBox".to_string()))?;

    let corners: Vec<f64> = media_box
        .as_array()
        .map_err(|_| Error::General("MediaBox is not an array".to_string()))?
        .iter()
        .filter_map(object_as_number)
        .collect();

    if corners.len() != 4 {
        return Err(Error::General("MediaBox must have four numbers".to_string()));
    }

    Ok(PageGeometry::new(
        corners[2] - corners[0],
        corners[3] - corners[1],
    ))
}

/// Standard Helvetica, one of the 14 built-in PDF fonts, so nothing needs
/// to be embedded
fn helvetica_font() -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    }
}

/// Generate the content stream operators for one watermark stamp
fn watermark_content(x: f64, y: f64, options: &WatermarkOptions) -> String {
    let radians = options.spec.rotation_degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    let Rgb { r, g, b } = options.color;

    let mut content = String::new();
    content.push_str("q\n");
    content.push_str("/GSwm gs\n");
    content.push_str(&format!("{:.4} {:.4} {:.4} rg\n", r, g, b));
    content.push_str("BT\n");
    content.push_str(&format!("/Fwm {:.2} Tf\n", options.spec.font_size));
    // Rotation around the draw origin, translation to the placement point
    content.push_str(&format!(
        "{:.4} {:.4} {:.4} {:.4} {:.2} {:.2} Tm\n",
        cos, sin, -sin, cos, x, y
    ));
    content.push_str(&format!("({}) Tj\n", escape_pdf_string(&options.spec.text)));
    content.push_str("ET\n");
    content.push_str("Q\n");
    content
}

/// Register an object under a page's Resources subdictionary
/// (e.g. Font or ExtGState), dereferencing a shared Resources entry so the
/// page gets its own copy.
fn add_page_resource(
    doc: &mut Document,
    page_id: ObjectId,
    category: &[u8],
    name: &str,
    object_id: ObjectId,
) -> Result<()> {
    let mut resources = {
        let page_dict = doc.get_dictionary(page_id)?;
        match page_dict.get(b"Resources") {
            Ok(Object::Dictionary(dict)) => dict.clone(),
            Ok(Object::Reference(id)) => doc
                .get_dictionary(*id)
                .map(|dict| dict.clone())
                .unwrap_or_else(|_| lopdf::Dictionary::new()),
            _ => lopdf::Dictionary::new(),
        }
    };

    let mut entries = match resources.get(category) {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        _ => lopdf::Dictionary::new(),
    };
    entries.set(name, Object::Reference(object_id));
    resources.set(category.to_vec(), Object::Dictionary(entries));

    if let Ok(Object::Dictionary(ref mut page_dict)) = doc.get_object_mut(page_id) {
        page_dict.set("Resources", Object::Dictionary(resources));
    }

    Ok(())
}

/// Append a content stream to a page's Contents so the watermark is drawn
/// on top of the existing content
fn append_content_to_page(
    doc: &mut Document,
    page_id: ObjectId,
    content_id: ObjectId,
) -> Result<()> {
    if let Ok(Object::Dictionary(ref mut page_dict)) = doc.get_object_mut(page_id) {
        let existing = page_dict.get(b"Contents").ok().cloned();

        match existing {
            Some(Object::Reference(id)) => {
                page_dict.set(
                    "Contents",
                    Object::Array(vec![
                        Object::Reference(id),
                        Object::Reference(content_id),
                    ]),
                );
            }
            Some(Object::Array(mut array)) => {
                array.push(Object::Reference(content_id));
                page_dict.set("Contents", Object::Array(array));
            }
            _ => {
                page_dict.set("Contents", Object::Array(vec![Object::Reference(content_id)]));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Anchor;

    #[test]
    fn test_opacity_out_of_range_rejected() {
        let options = WatermarkOptions {
            spec: WatermarkSpec::new("DRAFT", 36.0),
            color: Rgb::BLACK,
            opacity: 1.5,
        };
        let result = stamp_watermark(Path::new("in.pdf"), Path::new("out.pdf"), &options);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_content_stream_rotation_matrix() {
        let mut spec = WatermarkSpec::new("DRAFT", 36.0);
        spec.anchor = Anchor::Center;
        spec.rotation_degrees = 90.0;
        let options = WatermarkOptions::new(spec);

        let content = watermark_content(100.0, 200.0, &options);
        // cos(90°) = 0, sin(90°) = 1
        assert!(content.contains("0.0000 1.0000 -1.0000 0.0000 100.00 200.00 Tm"));
        assert!(content.contains("(DRAFT) Tj"));
        assert!(content.contains("/GSwm gs"));
    }

    #[test]
    fn test_escape_pdf_string() {
        assert_eq!(escape_pdf_string("a(b)c"), "a\\(b\\)c");
        assert_eq!(escape_pdf_string("back\\slash"), "back\\\\slash");
        assert_eq!(escape_pdf_string("two\nlines"), "two\\nlines");
        assert_eq!(escape_pdf_string("cr\rhere"), "cr\\rhere");
    }
}
