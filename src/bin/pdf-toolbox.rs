//! PDF Toolbox CLI tool
//!
//! A command-line tool for everyday PDF manipulation: conversion, merging,
//! splitting, watermarking, rotation, page deletion and compression.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;
use std::path::PathBuf;
use std::process;

use pdf_toolbox::color::Rgb;
use pdf_toolbox::pdf::{
    compress_pdf, delete_page, extract_pages, images_to_pdf, merge_pdfs, rotate_pdf,
    stamp_watermark, text_to_pdf, ImageEncoding, ImageOptions, MergeOptions, TextOptions,
    WatermarkOptions,
};
use pdf_toolbox::placement::{Anchor, WatermarkSpec, DEFAULT_MARGIN};

/// PDF Toolbox - convert, merge, split, watermark, rotate and compress PDFs
#[derive(Parser)]
#[command(name = "pdf-toolbox")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Convert a text file to PDF
    pdf-toolbox text notes.txt -o notes.pdf

    # Turn photos into a PDF, one page per image
    pdf-toolbox image -o album.pdf *.jpg

    # Merge PDFs in order
    pdf-toolbox merge -o combined.pdf \"[0-9]*.pdf\"

    # Extract pages 3-7
    pdf-toolbox split report.pdf -o chapter.pdf --from 3 --to 7

    # Stamp a red diagonal watermark
    pdf-toolbox watermark draft.pdf -o stamped.pdf --text CONFIDENTIAL \\
        --color \"#cc0000\" --opacity 0.3 --rotation 45 --position center

    # Rotate all pages a quarter turn and open the result
    pdf-toolbox rotate scan.pdf -o upright.pdf --degrees 90 --open")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a plain text file to PDF
    Text {
        /// Input text file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Font size in points
        #[arg(long, default_value_t = 12.0)]
        font_size: f64,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Convert images to a PDF, one page per image
    Image {
        /// Input image files (JPEG/PNG). Supports glob patterns like "*.jpg"
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Image encoding: "lossless" or a JPEG quality 1-100
        #[arg(long, default_value = "85")]
        encoding: String,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Merge multiple PDF files into one
    Merge {
        /// Input PDF files (in order). Supports glob patterns like "*.pdf"
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Extract a page range into a new PDF
    Split {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// First page to keep (1-indexed)
        #[arg(long)]
        from: u32,

        /// Last page to keep (inclusive; defaults to --from for one page)
        #[arg(long)]
        to: Option<u32>,
    },

    /// Stamp a text watermark onto every page
    Watermark {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Watermark text
        #[arg(long)]
        text: String,

        /// Font size in points
        #[arg(long, default_value_t = 36.0)]
        font_size: f64,

        /// Fill color as a hex string, e.g. "#cc0000"
        #[arg(long, default_value = "#000000")]
        color: String,

        /// Opacity between 0.0 and 1.0
        #[arg(long, default_value_t = 0.5)]
        opacity: f64,

        /// Rotation in degrees (about the draw origin)
        #[arg(long, default_value_t = 0.0)]
        rotation: f64,

        /// Position: top-left, top-right, bottom-left, bottom-right or
        /// center (unknown values fall back to center)
        #[arg(long, default_value = "center")]
        position: String,

        /// Margin from the page edge in points
        #[arg(long, default_value_t = DEFAULT_MARGIN)]
        margin: f64,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Rotate every page by a multiple of 90 degrees
    Rotate {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Degrees to add to each page's rotation (multiple of 90)
        #[arg(long, default_value_t = 90)]
        degrees: i64,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Delete a single page from a PDF
    Delete {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Page number to delete (1-indexed)
        #[arg(long)]
        page: u32,
    },

    /// Re-save a PDF with recompressed streams
    Compress {
        /// Input PDF file
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Text { input, output, font_size, open } => {
            cmd_text(input, output, font_size, open)
        }
        Commands::Image { inputs, output, encoding, open } => {
            cmd_image(inputs, output, encoding, open)
        }
        Commands::Merge { inputs, output, open } => cmd_merge(inputs, output, open),
        Commands::Split { input, output, from, to } => cmd_split(input, output, from, to),
        Commands::Watermark {
            input, output, text, font_size, color, opacity, rotation, position, margin, open,
        } => cmd_watermark(
            input, output, text, font_size, color, opacity, rotation, position, margin, open,
        ),
        Commands::Rotate { input, output, degrees, open } => {
            cmd_rotate(input, output, degrees, open)
        }
        Commands::Delete { input, output, page } => cmd_delete(input, output, page),
        Commands::Compress { input, output } => cmd_compress(input, output),
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Expand glob patterns in input paths
fn expand_globs(patterns: Vec<String>) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let mut matched = false;
            for entry in glob(&pattern)? {
                match entry {
                    Ok(path) => {
                        paths.push(path);
                        matched = true;
                    }
                    Err(e) => eprintln!("Warning: glob error for {}: {}", pattern, e),
                }
            }
            if !matched {
                bail!("No files matched pattern: {}", pattern);
            }
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    paths.sort();
    Ok(paths)
}

/// Open a file with the system default application
fn open_file(path: &PathBuf) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

fn cmd_text(input: PathBuf, output: PathBuf, font_size: f64, open: bool) -> Result<()> {
    let text = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let options = TextOptions {
        font_size,
        ..Default::default()
    };
    text_to_pdf(&text, &output, &options)?;

    eprintln!("Output: {}", output.display());
    if open {
        open_file(&output)?;
    }
    Ok(())
}

fn cmd_image(inputs: Vec<String>, output: PathBuf, encoding: String, open: bool) -> Result<()> {
    let inputs = expand_globs(inputs)?;

    let options = ImageOptions {
        encoding: ImageEncoding::parse(&encoding)?,
    };

    eprintln!("Converting {} image(s)...", inputs.len());
    images_to_pdf(&inputs, &output, &options)?;

    eprintln!("Output: {}", output.display());
    if open {
        open_file(&output)?;
    }
    Ok(())
}

fn cmd_merge(inputs: Vec<String>, output: PathBuf, open: bool) -> Result<()> {
    let inputs = expand_globs(inputs)?;

    for path in &inputs {
        if !path.exists() {
            bail!("Input file not found: {}", path.display());
        }
    }

    eprintln!("Merging {} PDF files...", inputs.len());

    let options = MergeOptions {
        input_paths: inputs,
        output_path: output.clone(),
    };
    merge_pdfs(&options)?;

    eprintln!("Merged to: {}", output.display());
    if open {
        open_file(&output)?;
    }
    Ok(())
}

fn cmd_split(input: PathBuf, output: PathBuf, from: u32, to: Option<u32>) -> Result<()> {
    let to = to.unwrap_or(from);
    extract_pages(&input, &output, from, to)?;
    eprintln!("Extracted pages {}-{} to: {}", from, to, output.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_watermark(
    input: PathBuf,
    output: PathBuf,
    text: String,
    font_size: f64,
    color: String,
    opacity: f64,
    rotation: f64,
    position: String,
    margin: f64,
    open: bool,
) -> Result<()> {
    let spec = WatermarkSpec {
        text,
        font_size,
        rotation_degrees: rotation,
        anchor: Anchor::from_name(&position),
        margin,
    };
    let options = WatermarkOptions {
        spec,
        color: Rgb::from_hex(&color)?,
        opacity,
    };

    eprintln!(
        "Stamping \"{}\" at {}...",
        options.spec.text,
        options.spec.anchor.name()
    );
    stamp_watermark(&input, &output, &options)?;

    eprintln!("Output: {}", output.display());
    if open {
        open_file(&output)?;
    }
    Ok(())
}

fn cmd_rotate(input: PathBuf, output: PathBuf, degrees: i64, open: bool) -> Result<()> {
    rotate_pdf(&input, &output, degrees)?;
    eprintln!("Rotated by {} degrees: {}", degrees, output.display());
    if open {
        open_file(&output)?;
    }
    Ok(())
}

fn cmd_delete(input: PathBuf, output: PathBuf, page: u32) -> Result<()> {
    delete_page(&input, &output, page)?;
    eprintln!("Deleted page {}: {}", page, output.display());
    Ok(())
}

fn cmd_compress(input: PathBuf, output: PathBuf) -> Result<()> {
    let stats = compress_pdf(&input, &output)?;
    eprintln!(
        "Compressed: {:.2} KB -> {:.2} KB ({:.1}% reduction)",
        stats.input_bytes as f64 / 1024.0,
        stats.output_bytes as f64 / 1024.0,
        stats.reduction() * 100.0
    );
    Ok(())
}

fn cmd_info(input: PathBuf) -> Result<()> {
    let metadata = pdf_toolbox::pdf::extract_metadata(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    Ok(())
}
