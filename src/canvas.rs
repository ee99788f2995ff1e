//! Cursor-based drawing context over a narrow rendering surface.
//!
//! The host application lays out its documents FPDF-style: a cursor in
//! millimetres from the top-left corner, cells that advance the cursor,
//! flowing text with word wrap. [`Canvas`] owns that cursor arithmetic and
//! the text measurement; the [`Surface`] trait underneath is stateless and
//! takes absolute coordinates only, so backends stay small and tests can
//! record operations instead of rasterizing.

use image::{DynamicImage, GenericImageView, RgbImage, Rgba};
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, CustomPdfConformance, Image, ImageTransform,
    ImageXObject, IndirectFontRef, Line, Mm, OffsetDateTime, PdfConformance, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Px, Rgb,
};

use crate::error::CardError;
use crate::metrics::{self, MM_PER_PT};

/// A4 portrait dimensions in mm
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const DEFAULT_MARGIN_MM: f32 = 10.0;

/// Bounding box for the header logo
const LOGO_MAX_WIDTH_MM: f32 = 30.0;
const LOGO_MAX_HEIGHT_MM: f32 = 16.0;

const HEADER_NAME_FONT_SIZE: f32 = 14.0;
const HEADER_TITLE_FONT_SIZE: f32 = 12.0;
const HEADER_LINE_HEIGHT_MM: f32 = 6.0;

/// Fixed document id; together with the epoch dates in [`PdfSurface::new`]
/// and the trailer rewrite in [`pin_trailer_id`] it keeps two runs over the
/// same inputs byte-identical.
const DOCUMENT_ID: &str = "c4a96f215d8e37b04a1f08c27d9b6e35";

/// Built-in faces available on every surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// Horizontal alignment of text inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Stateless rendering backend. Coordinates are absolute millimetres with
/// the origin at the top-left corner of the page.
pub trait Surface {
    fn set_text_color(&mut self, r: u8, g: u8, b: u8);
    fn set_draw_color(&mut self, r: u8, g: u8, b: u8);
    fn set_line_width(&mut self, width_mm: f32);
    /// Draws `text` with its baseline at `y_mm`.
    fn text(&mut self, text: &str, style: FontStyle, size_pt: f32, x_mm: f32, y_mm: f32);
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Rectangle outline with its top-left corner at (`x`, `y`).
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Places `image` scaled into the given box.
    fn image(&mut self, image: &DynamicImage, x: f32, y: f32, width: f32, height: f32);
}

/// Stateful drawing context: cursor position, current font, margins.
///
/// Cells print at the cursor and then advance it, either past their own
/// width or to the start of the next line. A cell width of zero stretches
/// the cell to the right margin.
pub struct Canvas<S> {
    surface: S,
    x: f32,
    y: f32,
    left_margin: f32,
    top_margin: f32,
    right_margin: f32,
    font_style: FontStyle,
    font_size: f32,
    /// Height of the last printed cell, reused by `ln(None)`.
    last_cell_height: f32,
}

impl<S: Surface> Canvas<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            x: DEFAULT_MARGIN_MM,
            y: DEFAULT_MARGIN_MM,
            left_margin: DEFAULT_MARGIN_MM,
            top_margin: DEFAULT_MARGIN_MM,
            right_margin: DEFAULT_MARGIN_MM,
            font_style: FontStyle::Regular,
            font_size: 10.0,
            last_cell_height: 0.0,
        }
    }

    /// Sets the left/top margins and resets the cursor to them. The right
    /// margin mirrors the left one.
    pub fn set_margins(&mut self, left: f32, top: f32) {
        self.left_margin = left;
        self.top_margin = top;
        self.right_margin = left;
        self.x = left;
        self.y = top;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.x = x;
    }

    /// Moves the cursor to `y` and returns x to the left margin.
    pub fn set_y(&mut self, y: f32) {
        self.x = self.left_margin;
        self.y = y;
    }

    pub fn set_font(&mut self, style: FontStyle, size_pt: f32) {
        self.font_style = style;
        self.font_size = size_pt;
    }

    pub fn set_text_color(&mut self, r: u8, g: u8, b: u8) {
        self.surface.set_text_color(r, g, b);
    }

    pub fn set_draw_color(&mut self, r: u8, g: u8, b: u8) {
        self.surface.set_draw_color(r, g, b);
    }

    pub fn set_line_width(&mut self, width_mm: f32) {
        self.surface.set_line_width(width_mm);
    }

    /// Width of `text` in millimetres under the current font.
    pub fn text_width(&self, text: &str) -> f32 {
        metrics::text_width_mm(self.font_style, self.font_size, text)
    }

    fn font_size_mm(&self) -> f32 {
        self.font_size * MM_PER_PT
    }

    fn right_limit(&self) -> f32 {
        PAGE_WIDTH_MM - self.right_margin
    }

    /// Baseline for text vertically centered in a row of height `h`.
    fn cell_baseline(&self, y: f32, h: f32) -> f32 {
        y + 0.5 * h + 0.3 * self.font_size_mm()
    }

    fn put_text(&mut self, text: &str, x: f32, baseline_y: f32) {
        if !text.is_empty() {
            self.surface
                .text(text, self.font_style, self.font_size, x, baseline_y);
        }
    }

    /// Prints one cell at the cursor. With `break_after` the cursor moves
    /// to the start of the next line, otherwise it advances past the cell.
    pub fn cell(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        border: bool,
        break_after: bool,
        align: Align,
    ) {
        let width = if width == 0.0 {
            self.right_limit() - self.x
        } else {
            width
        };
        if border {
            self.surface.rect(self.x, self.y, width, height);
        }
        let text_x = match align {
            Align::Left => self.x,
            Align::Center => self.x + (width - self.text_width(text)) / 2.0,
            Align::Right => self.x + width - self.text_width(text),
        };
        let baseline = self.cell_baseline(self.y, height);
        self.put_text(text, text_x, baseline);
        self.last_cell_height = height;
        if break_after {
            self.x = self.left_margin;
            self.y += height;
        } else {
            self.x += width;
        }
    }

    /// Prints flowing text at the cursor, wrapping on spaces at the right
    /// margin and continuing from the left margin. The cursor ends just
    /// after the last fragment.
    pub fn write(&mut self, line_height: f32, text: &str) {
        for (i, paragraph) in text.split('\n').enumerate() {
            if i > 0 {
                self.x = self.left_margin;
                self.y += line_height;
            }
            self.write_flow(line_height, paragraph);
        }
    }

    fn write_flow(&mut self, line_height: f32, text: &str) {
        let mut line = String::new();
        for word in text.split(' ') {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if !line.is_empty() && self.x + self.text_width(&candidate) > self.right_limit() {
                let baseline = self.cell_baseline(self.y, line_height);
                self.put_text(&line, self.x, baseline);
                self.x = self.left_margin;
                self.y += line_height;
                line = word.to_string();
            } else {
                line = candidate;
            }
        }
        let baseline = self.cell_baseline(self.y, line_height);
        let advance = self.text_width(&line);
        self.put_text(&line, self.x, baseline);
        self.x += advance;
        self.last_cell_height = line_height;
    }

    /// Prints a wrapped block of equal-height lines starting at the cursor.
    /// Afterwards the cursor sits on the line below the block, back at the
    /// left margin.
    pub fn multi_cell(&mut self, width: f32, line_height: f32, text: &str, align: Align) {
        let width = if width == 0.0 {
            self.right_limit() - self.x
        } else {
            width
        };
        let block_x = self.x;
        for paragraph in text.split('\n') {
            for line in self.wrap(paragraph, width) {
                let text_x = match align {
                    Align::Left => block_x,
                    Align::Center => block_x + (width - self.text_width(&line)) / 2.0,
                    Align::Right => block_x + width - self.text_width(&line),
                };
                let baseline = self.cell_baseline(self.y, line_height);
                self.put_text(&line, text_x, baseline);
                self.y += line_height;
            }
        }
        self.x = self.left_margin;
        self.last_cell_height = line_height;
    }

    fn wrap(&self, text: &str, width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        for word in text.split(' ') {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", line, word)
            };
            if !line.is_empty() && self.text_width(&candidate) > width {
                lines.push(line);
                line = word.to_string();
            } else {
                line = candidate;
            }
        }
        lines.push(line);
        lines
    }

    /// Line break: back to the left margin, down by `height` or by the last
    /// printed cell's height.
    pub fn ln(&mut self, height: Option<f32>) {
        self.x = self.left_margin;
        self.y += height.unwrap_or(self.last_cell_height);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.surface.line(x1, y1, x2, y2);
    }

    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.surface.rect(x, y, width, height);
    }

    /// Shared page header: the association name and an optional document
    /// title centered in bold, with the logo fitted into its box at the
    /// top-left corner. Restores the caller's font before returning.
    pub fn page_header(
        &mut self,
        association: &str,
        title: Option<&str>,
        logo: Option<&DynamicImage>,
    ) {
        if let Some(img) = logo {
            let (px_w, px_h) = img.dimensions();
            let ratio = px_w as f32 / px_h as f32;
            let (w, h) = if LOGO_MAX_WIDTH_MM / LOGO_MAX_HEIGHT_MM > ratio {
                (LOGO_MAX_HEIGHT_MM * ratio, LOGO_MAX_HEIGHT_MM)
            } else {
                (LOGO_MAX_WIDTH_MM, LOGO_MAX_WIDTH_MM / ratio)
            };
            self.surface.image(img, self.left_margin, self.top_margin, w, h);
        }
        let (style, size) = (self.font_style, self.font_size);
        self.set_y(self.top_margin);
        self.set_font(FontStyle::Bold, HEADER_NAME_FONT_SIZE);
        self.cell(0.0, HEADER_LINE_HEIGHT_MM, association, false, true, Align::Center);
        if let Some(title) = title {
            self.set_font(FontStyle::Bold, HEADER_TITLE_FONT_SIZE);
            self.cell(0.0, HEADER_LINE_HEIGHT_MM, title, false, true, Align::Center);
        }
        self.set_font(style, size);
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Production surface writing through `printpdf` with the built-in fonts.
pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfSurface {
    /// Opens a one-page A4 portrait document. Dates are pinned to the epoch
    /// and the document id is fixed, so identical drawing sequences produce
    /// identical bytes.
    pub fn new(title: &str) -> Result<Self, CardError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let doc = doc
            .with_conformance(PdfConformance::Custom(CustomPdfConformance {
                requires_icc_profile: false,
                requires_xmp_metadata: false,
                ..Default::default()
            }))
            .with_creation_date(OffsetDateTime::UNIX_EPOCH)
            .with_mod_date(OffsetDateTime::UNIX_EPOCH)
            .with_metadata_date(OffsetDateTime::UNIX_EPOCH)
            .with_document_id(DOCUMENT_ID.to_string());
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CardError::Pdf(format!("Font loading failed: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CardError::Pdf(format!("Font loading failed: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
        })
    }

    /// Finishes the document and returns the PDF bytes.
    pub fn into_bytes(self) -> Result<Vec<u8>, CardError> {
        let mut bytes = self
            .doc
            .save_to_bytes()
            .map_err(|e| CardError::Pdf(format!("Save failed: {}", e)))?;
        pin_trailer_id(&mut bytes);
        Ok(bytes)
    }

    fn font(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }

    /// printpdf's origin is the bottom-left corner.
    fn flip(y: f32) -> f32 {
        PAGE_HEIGHT_MM - y
    }
}

impl Surface for PdfSurface {
    fn set_text_color(&mut self, r: u8, g: u8, b: u8) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            None,
        )));
    }

    fn set_draw_color(&mut self, r: u8, g: u8, b: u8) {
        self.layer.set_outline_color(Color::Rgb(Rgb::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            None,
        )));
    }

    fn set_line_width(&mut self, width_mm: f32) {
        self.layer.set_outline_thickness(width_mm / MM_PER_PT);
    }

    fn text(&mut self, text: &str, style: FontStyle, size_pt: f32, x_mm: f32, y_mm: f32) {
        let font = self.font(style);
        self.layer
            .use_text(text, size_pt, Mm(x_mm), Mm(Self::flip(y_mm)), font);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(Self::flip(y1))), false),
                (Point::new(Mm(x2), Mm(Self::flip(y2))), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let top = Self::flip(y);
        let bottom = Self::flip(y + height);
        let outline = Line {
            points: vec![
                (Point::new(Mm(x), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(top)), false),
                (Point::new(Mm(x + width), Mm(bottom)), false),
                (Point::new(Mm(x), Mm(bottom)), false),
            ],
            is_closed: true,
        };
        self.layer.add_line(outline);
    }

    fn image(&mut self, image: &DynamicImage, x: f32, y: f32, width: f32, height: f32) {
        let rgba = image.to_rgba8();
        let (px_w, px_h) = rgba.dimensions();
        // Composite onto white; the XObject carries no alpha channel.
        let mut rgb = RgbImage::new(px_w, px_h);
        for (px, py, pixel) in rgba.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let alpha = f32::from(a) / 255.0;
            let blend = |c: u8| (f32::from(c) * alpha + 255.0 * (1.0 - alpha)) as u8;
            rgb.put_pixel(px, py, image::Rgb([blend(r), blend(g), blend(b)]));
        }
        let xobject = ImageXObject {
            width: Px(px_w as usize),
            height: Px(px_h as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        };
        // dpi chosen so px_w pixels span exactly `width` millimetres
        let dpi = px_w as f32 / (width / 25.4);
        Image::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(Self::flip(y + height))),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }
}

/// Overwrites the trailer `/ID` strings with [`DOCUMENT_ID`].
///
/// printpdf regenerates the trailer identifier pair on every save, so two
/// saves inside one process differ in exactly those bytes. The rewrite
/// preserves every string length, keeping the cross-reference offsets
/// valid.
fn pin_trailer_id(bytes: &mut [u8]) {
    let marker = b"/ID";
    let Some(start) = bytes.windows(marker.len()).rposition(|w| w == marker) else {
        return;
    };
    let id = DOCUMENT_ID.as_bytes();
    let mut in_string = false;
    let mut k = 0;
    for b in &mut bytes[start + marker.len()..] {
        match *b {
            b'(' if !in_string => {
                in_string = true;
                k = 0;
            }
            b')' if in_string => in_string = false,
            b']' if !in_string => break,
            _ if in_string => {
                *b = id[k % id.len()];
                k += 1;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use image::DynamicImage;

    use super::{FontStyle, Surface};

    /// One captured surface call.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Op {
        TextColor(u8, u8, u8),
        DrawColor(u8, u8, u8),
        LineWidth(f32),
        Text {
            text: String,
            style: FontStyle,
            size: f32,
            x: f32,
            y: f32,
        },
        Line {
            x1: f32,
            y1: f32,
            x2: f32,
            y2: f32,
        },
        Rect {
            x: f32,
            y: f32,
            w: f32,
            h: f32,
        },
        Image {
            x: f32,
            y: f32,
            w: f32,
            h: f32,
        },
    }

    /// Surface that records operations instead of rendering them.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSurface {
        pub(crate) ops: Vec<Op>,
    }

    impl RecordingSurface {
        /// Text operations as (text, x, y) tuples, in draw order.
        pub(crate) fn text_ops(&self) -> Vec<(&str, f32, f32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
                    _ => None,
                })
                .collect()
        }

        /// Position of the first text operation matching `needle` exactly.
        pub(crate) fn find_text(&self, needle: &str) -> Option<(f32, f32)> {
            self.text_ops()
                .into_iter()
                .find(|(t, _, _)| *t == needle)
                .map(|(_, x, y)| (x, y))
        }

        /// Rectangles as (x, y, w, h) tuples, in draw order.
        pub(crate) fn rects(&self) -> Vec<(f32, f32, f32, f32)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Rect { x, y, w, h } => Some((*x, *y, *w, *h)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn set_text_color(&mut self, r: u8, g: u8, b: u8) {
            self.ops.push(Op::TextColor(r, g, b));
        }

        fn set_draw_color(&mut self, r: u8, g: u8, b: u8) {
            self.ops.push(Op::DrawColor(r, g, b));
        }

        fn set_line_width(&mut self, width_mm: f32) {
            self.ops.push(Op::LineWidth(width_mm));
        }

        fn text(&mut self, text: &str, style: FontStyle, size_pt: f32, x_mm: f32, y_mm: f32) {
            self.ops.push(Op::Text {
                text: text.to_string(),
                style,
                size: size_pt,
                x: x_mm,
                y: y_mm,
            });
        }

        fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
            self.ops.push(Op::Line { x1, y1, x2, y2 });
        }

        fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
            self.ops.push(Op::Rect {
                x,
                y,
                w: width,
                h: height,
            });
        }

        fn image(&mut self, _image: &DynamicImage, x: f32, y: f32, width: f32, height: f32) {
            self.ops.push(Op::Image {
                x,
                y,
                w: width,
                h: height,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::{self, RecordingSurface};
    use super::*;

    fn canvas() -> Canvas<RecordingSurface> {
        let mut c = Canvas::new(RecordingSurface::default());
        c.set_margins(10.0, 10.0);
        c
    }

    #[test]
    fn cell_advances_past_its_width() {
        let mut c = canvas();
        c.cell(30.0, 7.0, "Name", false, false, Align::Left);
        assert_eq!(c.x(), 40.0);
        assert_eq!(c.y(), 10.0);
    }

    #[test]
    fn cell_break_returns_to_left_margin() {
        let mut c = canvas();
        c.set_x(40.0);
        c.cell(30.0, 7.0, "Name", false, true, Align::Left);
        assert_eq!(c.x(), 10.0);
        assert_eq!(c.y(), 17.0);
    }

    #[test]
    fn zero_width_cell_extends_to_right_margin() {
        let mut c = canvas();
        c.set_x(100.0);
        c.cell(0.0, 7.0, "value", false, false, Align::Left);
        assert_eq!(c.x(), 200.0);
    }

    #[test]
    fn empty_cell_advances_without_text() {
        let mut c = canvas();
        c.cell(30.0, 7.0, "", false, false, Align::Left);
        assert_eq!(c.x(), 40.0);
        assert!(c.into_surface().text_ops().is_empty());
    }

    #[test]
    fn centered_cell_positions_text_around_the_middle() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 10.0);
        c.cell(3.0, 5.0, "X", false, false, Align::Center);
        let glyph = metrics::text_width_mm(FontStyle::Regular, 10.0, "X");
        let (x, _) = c.into_surface().find_text("X").unwrap();
        assert!((x - (10.0 + (3.0 - glyph) / 2.0)).abs() < 1e-4);
    }

    #[test]
    fn right_aligned_cell_ends_at_the_cell_edge() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 6.0);
        c.cell(0.0, 3.0, "* Only for companies", false, true, Align::Right);
        let w = metrics::text_width_mm(FontStyle::Regular, 6.0, "* Only for companies");
        let (x, _) = c.into_surface().find_text("* Only for companies").unwrap();
        assert!((x + w - 200.0).abs() < 1e-3);
    }

    #[test]
    fn cell_baseline_sits_inside_the_row() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 8.0);
        c.cell(30.0, 7.0, "Name", false, false, Align::Left);
        let (_, y) = c.into_surface().find_text("Name").unwrap();
        let expected = 10.0 + 3.5 + 0.3 * 8.0 * MM_PER_PT;
        assert!((y - expected).abs() < 1e-4);
    }

    #[test]
    fn bordered_cell_draws_its_outline() {
        let mut c = canvas();
        c.cell(30.0, 7.0, "", true, false, Align::Left);
        assert_eq!(c.into_surface().rects(), vec![(10.0, 10.0, 30.0, 7.0)]);
    }

    #[test]
    fn set_y_returns_x_to_the_left_margin() {
        let mut c = canvas();
        c.set_x(60.0);
        c.set_y(100.0);
        assert_eq!(c.x(), 10.0);
        assert_eq!(c.y(), 100.0);
    }

    #[test]
    fn ln_without_height_reuses_the_last_cell_height() {
        let mut c = canvas();
        c.write(5.0, "Donation");
        c.ln(None);
        assert_eq!(c.x(), 10.0);
        assert_eq!(c.y(), 15.0);
    }

    #[test]
    fn write_advances_the_cursor_by_the_text_width() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 10.0);
        c.write(5.0, "Required membership:");
        let w = metrics::text_width_mm(FontStyle::Regular, 10.0, "Required membership:");
        assert!((c.x() - (10.0 + w)).abs() < 1e-3);
        assert_eq!(c.y(), 10.0);
    }

    #[test]
    fn write_wraps_at_the_right_margin() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 8.0);
        c.set_x(150.0);
        c.write(
            4.0,
            "The minimum contribution for each type of membership are \
             defined on the website of the association.",
        );
        let surface = c.into_surface();
        let texts = surface.text_ops();
        assert!(texts.len() > 1);
        // first fragment starts where the cursor was
        assert_eq!(texts[0].1, 150.0);
        // continuation restarts at the left margin, one line down
        assert_eq!(texts[1].1, 10.0);
        assert!(texts[1].2 > texts[0].2);
    }

    #[test]
    fn write_preserves_space_runs() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 8.0);
        c.write(5.0, "On     /     /     ");
        let surface = c.into_surface();
        assert_eq!(surface.text_ops()[0].0, "On     /     /     ");
    }

    #[test]
    fn multi_cell_keeps_the_block_x_and_breaks_after() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 8.0);
        c.set_x(100.0);
        c.multi_cell(0.0, 4.0, "10 rue Principale\n99999 Somewhere", Align::Left);
        assert_eq!(c.x(), 10.0);
        assert_eq!(c.y(), 18.0);
        let surface = c.into_surface();
        for (_, x, _) in surface.text_ops() {
            assert_eq!(x, 100.0);
        }
    }

    #[test]
    fn multi_cell_wraps_long_lines_to_the_cell_width() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 7.0);
        c.multi_cell(
            60.0,
            4.0,
            "Complete the following form and send it with your funds, in \
             order to complete your subscription.",
            Align::Left,
        );
        let surface = c.into_surface();
        let texts = surface.text_ops();
        assert!(texts.len() > 1);
        for (line, x, _) in texts {
            assert_eq!(x, 10.0);
            assert!(metrics::text_width_mm(FontStyle::Regular, 7.0, line) <= 60.0);
        }
    }

    #[test]
    fn page_header_centers_the_association_name() {
        let mut c = canvas();
        c.page_header("Les Zydeco", Some("Adhesion form"), None);
        let w = metrics::text_width_mm(FontStyle::Bold, HEADER_NAME_FONT_SIZE, "Les Zydeco");
        let surface = c.into_surface();
        let (x, _) = surface.find_text("Les Zydeco").unwrap();
        assert!((x - (10.0 + (190.0 - w) / 2.0)).abs() < 1e-3);
        let (_, title_y) = surface.find_text("Adhesion form").unwrap();
        let (_, name_y) = surface.find_text("Les Zydeco").unwrap();
        assert!(title_y > name_y);
    }

    #[test]
    fn page_header_restores_the_caller_font() {
        let mut c = canvas();
        c.set_font(FontStyle::Regular, 8.0);
        c.page_header("Les Zydeco", None, None);
        assert_eq!(c.font_style, FontStyle::Regular);
        assert_eq!(c.font_size, 8.0);
    }

    #[test]
    fn repeated_saves_in_one_process_match_byte_for_byte() {
        let draw = || {
            let mut c = Canvas::new(PdfSurface::new("Member's full card").unwrap());
            c.set_margins(10.0, 10.0);
            c.cell(30.0, 7.0, "Name", false, true, Align::Left);
            c.into_surface().into_bytes().unwrap()
        };
        assert_eq!(draw(), draw());
    }

    #[test]
    fn trailer_id_is_pinned_to_the_fixed_document_id() {
        let bytes = PdfSurface::new("Member's full card")
            .unwrap()
            .into_bytes()
            .unwrap();
        let hits = bytes
            .windows(DOCUMENT_ID.len())
            .filter(|w| *w == DOCUMENT_ID.as_bytes())
            .count();
        assert!(hits >= 2, "trailer /ID pair not rewritten ({} hits)", hits);
        // the rewrite must leave the document parseable
        lopdf::Document::load_mem(&bytes).unwrap();
    }

    #[test]
    fn page_header_fits_the_logo_into_its_box() {
        let mut c = canvas();
        let wide = DynamicImage::new_rgb8(100, 40);
        c.page_header("Les Zydeco", None, Some(&wide));
        let surface = c.into_surface();
        let fitted = surface.ops.iter().find_map(|op| match op {
            recording::Op::Image { x, y, w, h } => Some((*x, *y, *w, *h)),
            _ => None,
        });
        // 100x40 is wider than 30x16, so width binds: 30 x 12
        assert_eq!(fitted, Some((10.0, 10.0, 30.0, 12.0)));
    }
}
