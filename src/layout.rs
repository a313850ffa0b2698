use crate::configuration::LayoutConfiguration;
use crate::error::ContextError;
use crate::metrics;
use crate::pdf::{millimeters_to_points, PdfDocument};
use crate::text::encode_win_ansi;

pub use crate::pdf::FontFace;

/// Horizontal alignment of the text inside of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// The drawing capability the résumé is composed onto: a cursor which moves down the page while
/// cells of text and horizontal rules are emitted. Units are millimeters, measured from the
/// top-left corner of the page.
///
/// This is implemented by `PageLayout` for real documents; the section and header renderers only
/// ever talk to this trait.
pub trait LayoutSink {
    /// Sets the face and size (in points) used by the following cells.
    fn set_font(&mut self, font_face: FontFace, font_size: f32);

    /// Sets the grey level (0 is black) used for the text of the following cells.
    fn set_text_color(&mut self, grey: u8);

    /// Sets the grey level (0 is black) used for the following rules.
    fn set_draw_color(&mut self, grey: u8);

    /// Emits a cell at the cursor. A `width` of zero extends the cell up to the right margin.
    /// With `line_break` the cursor moves to the left margin of the next line, otherwise
    /// it moves right by the width of the cell.
    fn cell(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        line_break: bool,
        alignment: Alignment,
    ) -> Result<(), ContextError>;

    /// Draws a horizontal rule at the current height between the given abscissas.
    fn horizontal_rule(&mut self, x_start: f32, x_end: f32) -> Result<(), ContextError>;

    /// Moves the cursor to the left margin, `height` millimeters further down.
    fn line_feed(&mut self, height: f32);

    /// The current height of the cursor from the top of the page.
    fn current_y(&self) -> f32;

    /// The number of pages started so far.
    fn page_count(&self) -> usize;
}

/// A cursor-based layout over a `PdfDocument`, with automatic page breaks.
pub struct PageLayout {
    pdf_document: PdfDocument,
    configuration: LayoutConfiguration,
    page_index: usize,
    x: f32,
    y: f32,
    font_face: FontFace,
    font_size: f32,
    text_grey: u8,
    draw_grey: u8,
}

impl PageLayout {
    /// Creates the layout together with its first page.
    pub fn new(configuration: &LayoutConfiguration) -> Self {
        let mut pdf_document = PdfDocument::new(configuration.document_identifier.clone());
        pdf_document.title = configuration.title.clone();
        let page_index =
            pdf_document.add_page(configuration.page_width, configuration.page_height);

        PageLayout {
            pdf_document,
            configuration: configuration.clone(),
            page_index,
            x: configuration.margins.left,
            y: configuration.margins.top,
            font_face: FontFace::Regular,
            font_size: configuration.body_font_size,
            text_grey: 0,
            draw_grey: 0,
        }
    }

    /// The abscissa of the right margin.
    fn right_edge(&self) -> f32 {
        self.configuration.page_width - self.configuration.margins.right
    }

    /// Below this height a cell no longer fits and a new page has to be started.
    fn page_break_trigger(&self) -> f32 {
        self.configuration.page_height - self.configuration.margins.bottom
    }

    fn add_page(&mut self) {
        self.page_index = self
            .pdf_document
            .add_page(self.configuration.page_width, self.configuration.page_height);
        self.x = self.configuration.margins.left;
        self.y = self.configuration.margins.top;
        log::debug!("Started page {}", self.page_index + 1);
    }

    /// Writes the document and returns its bytes.
    pub fn finish(mut self) -> Result<Vec<u8>, ContextError> {
        self.pdf_document
            .write_all(self.configuration.instance_identifier.clone())?;
        self.pdf_document.save_to_bytes()
    }
}

impl LayoutSink for PageLayout {
    fn set_font(&mut self, font_face: FontFace, font_size: f32) {
        self.font_face = font_face;
        self.font_size = font_size;
    }

    fn set_text_color(&mut self, grey: u8) {
        self.text_grey = grey;
    }

    fn set_draw_color(&mut self, grey: u8) {
        self.draw_grey = grey;
    }

    fn cell(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        line_break: bool,
        alignment: Alignment,
    ) -> Result<(), ContextError> {
        if self.y + height > self.page_break_trigger() {
            let x = self.x;
            self.add_page();
            // A cell continuing a line keeps its abscissa on the new page
            self.x = x;
        }

        let width = if width == 0.0 {
            self.right_edge() - self.x
        } else {
            width
        };

        if !text.is_empty() {
            let encoded_text = encode_win_ansi(text)?;
            let padding = self.configuration.cell_padding;
            // The metrics are in points, the layout is in millimeters
            let text_width = metrics::text_width(self.font_face, self.font_size, &encoded_text)
                / millimeters_to_points(1.0);
            let text_x = match alignment {
                Alignment::Left => self.x + padding,
                Alignment::Center => self.x + (width - text_width) / 2.0,
            };
            let font_height = self.font_size / millimeters_to_points(1.0);
            let baseline_y = self.y + 0.5 * height + 0.3 * font_height;

            self.pdf_document.write_text(
                self.page_index,
                self.font_face,
                self.font_size,
                self.text_grey,
                [text_x, self.configuration.page_height - baseline_y],
                encoded_text,
            )?;
        }

        if line_break {
            self.x = self.configuration.margins.left;
            self.y += height;
        } else {
            self.x += width;
        }

        Ok(())
    }

    fn horizontal_rule(&mut self, x_start: f32, x_end: f32) -> Result<(), ContextError> {
        let y = self.configuration.page_height - self.y;
        self.pdf_document.draw_line(
            self.page_index,
            self.draw_grey,
            self.configuration.line_width,
            [x_start, y],
            [x_end, y],
        )
    }

    fn line_feed(&mut self, height: f32) {
        self.x = self.configuration.margins.left;
        self.y += height;
    }

    fn current_y(&self) -> f32 {
        self.y
    }

    fn page_count(&self) -> usize {
        self.pdf_document.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_move_the_cursor() {
        let configuration = LayoutConfiguration::default();
        let mut layout = PageLayout::new(&configuration);
        assert_eq!(layout.current_y(), configuration.margins.top);

        layout
            .cell(5.0, 5.0, "•", false, Alignment::Left)
            .unwrap();
        assert_eq!(layout.x, configuration.margins.left + 5.0);
        assert_eq!(layout.current_y(), configuration.margins.top);

        layout
            .cell(0.0, 5.0, "Text", true, Alignment::Left)
            .unwrap();
        assert_eq!(layout.x, configuration.margins.left);
        assert_eq!(layout.current_y(), configuration.margins.top + 5.0);

        layout.line_feed(3.0);
        assert_eq!(layout.current_y(), configuration.margins.top + 8.0);
    }

    #[test]
    fn overflowing_cells_start_a_new_page() {
        let configuration = LayoutConfiguration::default();
        let mut layout = PageLayout::new(&configuration);

        // The 272 millimeters between the top margin and the page-break trigger hold 54 lines
        for _ in 0..54 {
            layout
                .cell(0.0, 5.0, "Line", true, Alignment::Left)
                .unwrap();
        }
        assert_eq!(layout.page_count(), 1);

        layout
            .cell(0.0, 5.0, "Line", true, Alignment::Left)
            .unwrap();
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.current_y(), configuration.margins.top + 5.0);
    }

    #[test]
    fn unsanitized_text_is_rejected() {
        let mut layout = PageLayout::new(&LayoutConfiguration::default());
        assert!(layout
            .cell(0.0, 5.0, "🚀", true, Alignment::Left)
            .is_err());
    }

    #[test]
    fn finished_layouts_are_complete_documents() {
        let layout = PageLayout::new(&LayoutConfiguration::default());
        let pdf_document_bytes = layout.finish().unwrap();

        assert!(pdf_document_bytes.starts_with(b"%PDF-1.5"));
        let parsed_document = lopdf::Document::load_mem(&pdf_document_bytes).unwrap();
        assert_eq!(parsed_document.get_pages().len(), 1);
    }
}
