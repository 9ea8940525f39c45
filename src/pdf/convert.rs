//! Document generation: plain text and images to PDF

use std::io::Write;
use std::path::{Path, PathBuf};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::DynamicImage;
use lopdf::{dictionary, Document, Object, Stream};
use crate::error::{Error, Result};
use crate::pdf::escape_pdf_string;
use crate::placement::PageGeometry;

/// Options for text-to-PDF conversion
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Font size in points
    pub font_size: f64,
    /// Page margin on all sides, in points
    pub margin: f64,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            margin: 50.0,
        }
    }
}

/// How raster images are stored inside the generated PDF
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// DCTDecode stream with the given JPEG quality (1-100)
    Jpeg(u8),
    /// FlateDecode stream of raw RGB samples
    Lossless,
}

impl ImageEncoding {
    /// Parse "lossless" or a JPEG quality between 1 and 100
    pub fn parse(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("lossless") {
            return Ok(ImageEncoding::Lossless);
        }
        let quality: u8 = s.parse().map_err(|_| {
            Error::InvalidArgument(format!(
                "encoding must be 'lossless' or a JPEG quality 1-100, got '{}'",
                s
            ))
        })?;
        if !(1..=100).contains(&quality) {
            return Err(Error::InvalidArgument(format!(
                "JPEG quality must be between 1 and 100, got {}",
                quality
            )));
        }
        Ok(ImageEncoding::Jpeg(quality))
    }
}

/// Options for image-to-PDF conversion
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub encoding: ImageEncoding,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            encoding: ImageEncoding::Jpeg(85),
        }
    }
}

/// Convert plain text into a multi-page US Letter PDF
///
/// Lines are word-wrapped to the printable width using the same
/// average-glyph-width heuristic the watermark placement uses, then split
/// into pages. The built-in Helvetica font is referenced, so nothing is
/// embedded.
pub fn text_to_pdf(text: &str, output: &Path, options: &TextOptions) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "text to convert must not be empty".to_string(),
        ));
    }
    if !(options.font_size > 0.0) {
        return Err(Error::InvalidArgument(format!(
            "font size must be positive, got {}",
            options.font_size
        )));
    }

    let page = PageGeometry::letter();
    let lines = wrap_text(text, page.width - 2.0 * options.margin, options.font_size);

    let leading = options.font_size * 1.2;
    let lines_per_page = (((page.height - 2.0 * options.margin) / leading) as usize).max(1);

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_lines in lines.chunks(lines_per_page) {
        let content = page_content(page_lines, options, leading, &page);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => Object::Reference(font_id),
                },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    finish_document(&mut doc, pages_id, kids, output)
}

/// Convert one or more raster images into a PDF, one page per image
///
/// Each image is scaled to the full page width (aspect preserved) and
/// drawn from the top of a US Letter page.
pub fn images_to_pdf(inputs: &[PathBuf], output: &Path, options: &ImageOptions) -> Result<()> {
    if inputs.is_empty() {
        return Err(Error::InvalidArgument(
            "no input images provided".to_string(),
        ));
    }
    for path in inputs {
        if !path.exists() {
            return Err(Error::FileNotFound(path.clone()));
        }
    }

    let page = PageGeometry::letter();
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::new();

    for path in inputs {
        let img = image::open(path)?;
        let (px_w, px_h) = (img.width() as f64, img.height() as f64);

        let img_id = doc.add_object(encode_image_stream(&img, options.encoding)?);

        // Fit to page width, draw from the top edge down
        let draw_w = page.width;
        let draw_h = px_h * draw_w / px_w;
        let draw_y = page.height - draw_h;

        let content = format!(
            "q\n{:.2} 0 0 {:.2} 0 {:.2} cm\n/Im0 Do\nQ\n",
            draw_w, draw_h, draw_y
        );
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), page.width.into(), page.height.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    "Im0" => Object::Reference(img_id),
                },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    finish_document(&mut doc, pages_id, kids, output)
}

/// Write the Pages node, catalog and trailer, then save
fn finish_document(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    kids: Vec<Object>,
    output: &Path,
) -> Result<()> {
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    doc.compress();
    doc.save(output)?;
    Ok(())
}

/// Content stream for one page of wrapped text lines
fn page_content(
    lines: &[String],
    options: &TextOptions,
    leading: f64,
    page: &PageGeometry,
) -> String {
    let mut content = String::new();
    content.push_str("BT\n");
    content.push_str(&format!("/F1 {:.2} Tf\n", options.font_size));
    content.push_str(&format!("{:.2} TL\n", leading));
    content.push_str(&format!(
        "{:.2} {:.2} Td\n",
        options.margin,
        page.height - options.margin - options.font_size
    ));

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push_str("T*\n");
        }
        content.push_str(&format!("({}) Tj\n", escape_pdf_string(line)));
    }

    content.push_str("ET\n");
    content
}

/// Word-wrap text to fit `max_width` using the average-glyph-width
/// heuristic (half the font size per character)
fn wrap_text(text: &str, max_width: f64, font_size: f64) -> Vec<String> {
    let max_chars = ((max_width / (font_size * 0.5)) as usize).max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate_len = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };

            if candidate_len <= max_chars {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            } else {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                // Hard-split words longer than a full line
                let mut rest: Vec<char> = word.chars().collect();
                while rest.len() > max_chars {
                    lines.push(rest[..max_chars].iter().collect());
                    rest.drain(..max_chars);
                }
                current = rest.into_iter().collect();
            }
        }
        lines.push(current);
    }

    lines
}

/// Encode an image as a PDF XObject stream (JPEG or lossless Flate)
fn encode_image_stream(img: &DynamicImage, encoding: ImageEncoding) -> Result<Stream> {
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();

    match encoding {
        ImageEncoding::Lossless => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(&rgb.into_raw())?;
            let compressed = encoder.finish()?;

            Ok(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => w as i64,
                    "Height" => h as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8_i64,
                    "Filter" => "FlateDecode",
                },
                compressed,
            ))
        }
        ImageEncoding::Jpeg(quality) => {
            let mut buf = Vec::new();
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, quality);
            DynamicImage::ImageRgb8(rgb).write_with_encoder(encoder)?;

            Ok(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => w as i64,
                    "Height" => h as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8_i64,
                    "Filter" => "DCTDecode",
                },
                buf,
            ))
        }
    }
}
