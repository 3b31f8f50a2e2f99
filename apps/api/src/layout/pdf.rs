//! PDF assembly: one pass over the classified blocks, then a paint pass into printpdf.
//!
//! # Architecture
//! - `layout_pages` is pure: blocks in, positioned marks per page out. All geometry
//!   is in PDF points with the origin at the bottom-left corner.
//! - `render_pdf` decodes the optional photo, lays the content out, and paints the
//!   marks with the built-in Helvetica faces.
//!
//! The whole thing is CPU-bound; HTTP handlers run it inside `spawn_blocking`.

use printpdf::image_crate::{self, DynamicImage};
use printpdf::{
    BuiltinFont, Image, ImageTransform, Line, Mm, PdfDocument, PdfLayerReference, Point,
};
use thiserror::Error;
use tracing::debug;

use crate::layout::document::{parse_blocks, Block};
use crate::layout::font_metrics::{get_metrics, wrap_text, Face};

// US letter, 1" side margins, 0.5" top/bottom margins.
const PAGE_WIDTH_PT: f32 = 612.0;
const PAGE_HEIGHT_PT: f32 = 792.0;
const SIDE_MARGIN_PT: f32 = 72.0;
const VERTICAL_MARGIN_PT: f32 = 36.0;
const TEXT_WIDTH_PT: f32 = PAGE_WIDTH_PT - 2.0 * SIDE_MARGIN_PT;

/// Gap inserted after every block (0.1").
const BLOCK_SPACER_PT: f32 = 7.2;
/// Profile photo edge (1") and the gap below it (0.2").
const PHOTO_SIZE_PT: f32 = 72.0;
const PHOTO_SPACER_PT: f32 = 14.4;
const RULE_THICKNESS_PT: f32 = 0.5;
const RULE_PADDING_PT: f32 = 4.0;
/// DPI the photo is placed at before scaling to `PHOTO_SIZE_PT`.
const PHOTO_DPI: f32 = 300.0;

const DOCUMENT_TITLE: &str = "Resume";
const LAYER_NAME: &str = "Content";

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF library error: {0}")]
    Library(String),

    #[error("Could not decode profile photo: {0}")]
    Photo(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Styles
// ────────────────────────────────────────────────────────────────────────────

/// Typographic settings for one kind of block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub face: Face,
    pub font_size_pt: f32,
    pub leading_pt: f32,
    pub space_before_pt: f32,
    pub space_after_pt: f32,
}

pub const TITLE_STYLE: ParagraphStyle = ParagraphStyle {
    face: Face::Bold,
    font_size_pt: 16.0,
    leading_pt: 20.0,
    space_before_pt: 0.0,
    space_after_pt: 12.0,
};

pub const HEADING_STYLE: ParagraphStyle = ParagraphStyle {
    face: Face::Bold,
    font_size_pt: 14.0,
    leading_pt: 17.0,
    space_before_pt: 12.0,
    space_after_pt: 6.0,
};

pub const BODY_STYLE: ParagraphStyle = ParagraphStyle {
    face: Face::Regular,
    font_size_pt: 10.0,
    leading_pt: 12.0,
    space_before_pt: 0.0,
    space_after_pt: 8.0,
};

pub const BOLD_BODY_STYLE: ParagraphStyle = ParagraphStyle {
    face: Face::Bold,
    ..BODY_STYLE
};

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Something drawn at a fixed position on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Text {
        text: String,
        face: Face,
        font_size_pt: f32,
        x_pt: f32,
        /// Baseline.
        y_pt: f32,
    },
    Rule {
        x1_pt: f32,
        x2_pt: f32,
        y_pt: f32,
    },
    Photo {
        x_pt: f32,
        /// Bottom edge.
        y_pt: f32,
        size_pt: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub marks: Vec<Mark>,
}

/// Running state of the single layout pass.
struct Cursor {
    pages: Vec<PageLayout>,
    /// Top of the free space on the current page.
    y_pt: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y_pt: PAGE_HEIGHT_PT - VERTICAL_MARGIN_PT,
        }
    }

    fn at_page_top(&self) -> bool {
        self.y_pt >= PAGE_HEIGHT_PT - VERTICAL_MARGIN_PT
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y_pt = PAGE_HEIGHT_PT - VERTICAL_MARGIN_PT;
    }

    /// Reserves `height` points, breaking the page first if they do not fit.
    fn reserve(&mut self, height: f32) {
        if self.y_pt - height < VERTICAL_MARGIN_PT && !self.at_page_top() {
            self.new_page();
        }
    }

    /// Moves down, never past the bottom margin. Space does not carry onto the next page.
    fn advance(&mut self, height: f32) {
        self.y_pt = (self.y_pt - height).max(VERTICAL_MARGIN_PT);
    }

    fn push(&mut self, mark: Mark) {
        if let Some(page) = self.pages.last_mut() {
            page.marks.push(mark);
        }
    }
}

/// Lays blocks out top to bottom, flowing onto new pages as needed.
pub fn layout_pages(blocks: &[Block], with_photo: bool) -> Vec<PageLayout> {
    let mut cursor = Cursor::new();

    if with_photo {
        cursor.push(Mark::Photo {
            x_pt: SIDE_MARGIN_PT,
            y_pt: cursor.y_pt - PHOTO_SIZE_PT,
            size_pt: PHOTO_SIZE_PT,
        });
        cursor.advance(PHOTO_SIZE_PT + PHOTO_SPACER_PT);
    }

    for block in blocks {
        match block {
            Block::Title(text) => place_paragraph(&mut cursor, text, &TITLE_STYLE),
            Block::Heading(text) => place_paragraph(&mut cursor, text, &HEADING_STYLE),
            Block::Paragraph { text, bold } => {
                let style = if *bold { &BOLD_BODY_STYLE } else { &BODY_STYLE };
                place_paragraph(&mut cursor, text, style);
            }
            Block::Rule => {
                cursor.reserve(2.0 * RULE_PADDING_PT);
                cursor.advance(RULE_PADDING_PT);
                let y_pt = cursor.y_pt;
                cursor.push(Mark::Rule {
                    x1_pt: SIDE_MARGIN_PT,
                    x2_pt: PAGE_WIDTH_PT - SIDE_MARGIN_PT,
                    y_pt,
                });
                cursor.advance(RULE_PADDING_PT + BLOCK_SPACER_PT);
            }
            Block::Blank => cursor.advance(BLOCK_SPACER_PT),
        }
    }

    cursor.pages
}

fn place_paragraph(cursor: &mut Cursor, text: &str, style: &ParagraphStyle) {
    let metrics = get_metrics(style.face);
    let lines = wrap_text(text, metrics, style.font_size_pt, TEXT_WIDTH_PT);

    if !cursor.at_page_top() {
        cursor.advance(style.space_before_pt);
    }

    for line in lines {
        cursor.reserve(style.leading_pt);
        cursor.advance(style.leading_pt);
        // Baseline sits a descender's depth above the bottom of the line box.
        let y_pt = cursor.y_pt + (style.leading_pt - style.font_size_pt) + 0.2 * style.font_size_pt;
        cursor.push(Mark::Text {
            text: line,
            face: style.face,
            font_size_pt: style.font_size_pt,
            x_pt: SIDE_MARGIN_PT,
            y_pt,
        });
    }

    cursor.advance(style.space_after_pt + BLOCK_SPACER_PT);
}

// ────────────────────────────────────────────────────────────────────────────
// Painting
// ────────────────────────────────────────────────────────────────────────────

/// Builds a PDF of the rendered resume text, with an optional PNG/JPEG photo on top.
pub fn render_pdf(content: &str, photo: Option<&[u8]>) -> Result<Vec<u8>, PdfError> {
    let photo = photo.map(decode_photo).transpose()?;
    let blocks = parse_blocks(content);
    let pages = layout_pages(&blocks, photo.is_some());
    debug!("PDF layout: {} blocks on {} page(s)", blocks.len(), pages.len());

    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        pt_to_mm(PAGE_WIDTH_PT),
        pt_to_mm(PAGE_HEIGHT_PT),
        LAYER_NAME,
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(library_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(library_error)?;

    let mut photo = photo;
    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) =
                doc.add_page(pt_to_mm(PAGE_WIDTH_PT), pt_to_mm(PAGE_HEIGHT_PT), LAYER_NAME);
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        for mark in &page.marks {
            match mark {
                Mark::Text {
                    text,
                    face,
                    font_size_pt,
                    x_pt,
                    y_pt,
                } => {
                    let font = match face {
                        Face::Regular => &regular,
                        Face::Bold => &bold,
                    };
                    layer.use_text(
                        text.as_str(),
                        *font_size_pt,
                        pt_to_mm(*x_pt),
                        pt_to_mm(*y_pt),
                        font,
                    );
                }
                Mark::Rule { x1_pt, x2_pt, y_pt } => paint_rule(&layer, *x1_pt, *x2_pt, *y_pt),
                Mark::Photo {
                    x_pt,
                    y_pt,
                    size_pt,
                } => {
                    if let Some(image) = photo.take() {
                        paint_photo(&layer, &image, *x_pt, *y_pt, *size_pt);
                    }
                }
            }
        }
    }

    doc.save_to_bytes().map_err(library_error)
}

fn paint_rule(layer: &PdfLayerReference, x1_pt: f32, x2_pt: f32, y_pt: f32) {
    layer.set_outline_thickness(RULE_THICKNESS_PT);
    layer.add_line(Line {
        points: vec![
            (Point::new(pt_to_mm(x1_pt), pt_to_mm(y_pt)), false),
            (Point::new(pt_to_mm(x2_pt), pt_to_mm(y_pt)), false),
        ],
        is_closed: false,
    });
}

/// Stretches the photo to a `size_pt` square, matching a fixed-size image box.
fn paint_photo(layer: &PdfLayerReference, image: &DynamicImage, x_pt: f32, y_pt: f32, size_pt: f32) {
    let width_px = image.width().max(1) as f32;
    let height_px = image.height().max(1) as f32;
    // Native size at PHOTO_DPI is px / dpi inches; scale that to size_pt / 72 inches.
    let target_in = size_pt / 72.0;
    let transform = ImageTransform {
        translate_x: Some(pt_to_mm(x_pt)),
        translate_y: Some(pt_to_mm(y_pt)),
        dpi: Some(PHOTO_DPI),
        scale_x: Some(target_in * PHOTO_DPI / width_px),
        scale_y: Some(target_in * PHOTO_DPI / height_px),
        ..Default::default()
    };
    Image::from_dynamic_image(image).add_to_layer(layer.clone(), transform);
}

/// Decodes PNG or JPEG bytes. Alpha is dropped; the page background is white.
fn decode_photo(bytes: &[u8]) -> Result<DynamicImage, PdfError> {
    let image =
        image_crate::load_from_memory(bytes).map_err(|e| PdfError::Photo(e.to_string()))?;
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

fn library_error<E: std::fmt::Debug>(e: E) -> PdfError {
    PdfError::Library(format!("{e:?}"))
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Small encoded photos for tests.
#[cfg(test)]
pub mod testing {
    use std::io::Cursor;

    use printpdf::image_crate::{DynamicImage, ImageFormat, Rgb, RgbImage};

    /// A 4x4 solid-colour image encoded as `format`.
    pub fn encode_photo(format: ImageFormat) -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([180, 40, 60])));
        let mut buf = Vec::new();
        image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    /// Whether the PDF carries an image XObject.
    pub fn has_image_xobject(pdf: &[u8]) -> bool {
        pdf.windows(b"/Image".len()).any(|w| w == b"/Image")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
