use lopdf::{content::Operation, Object, StringFormat};
use serde::{Deserialize, Serialize};
use std::{io::BufWriter, mem};
use time::OffsetDateTime;

use crate::error::ContextError;

/// The two faces the documents are typeset with. Both of them are standard Type1 fonts,
/// which every PDF reader provides, so they never need to be embedded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontFace {
    /// Helvetica, used for the body text and the contact line.
    Regular,
    /// Helvetica-Bold, used for the name and the section titles.
    Bold,
}

impl FontFace {
    /// All the faces, in the order they are registered into the document.
    pub const ALL: [FontFace; 2] = [FontFace::Regular, FontFace::Bold];

    /// The name under which the font is registered in the resources of every page.
    fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    /// The PostScript name of the standard font.
    fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    /// Constructs the font dictionary. The `WinAnsiEncoding` is what allows the text of
    /// the content streams to be single-byte strings (see the `text` module).
    fn dictionary(self) -> lopdf::Dictionary {
        use lopdf::Object::*;

        lopdf::Dictionary::from_iter(vec![
            ("Type", Name("Font".into())),
            ("Subtype", Name("Type1".into())),
            ("BaseFont", Name(self.base_font().into())),
            ("Encoding", Name("WinAnsiEncoding".into())),
        ])
    }
}

/// The representation of a PDF page, which is a list of content-stream operations together with
/// the size of the page in points.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// The number of the page in the document, starting from one.
    pub(crate) number: usize,
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    /// The operations which will form the content stream of the page.
    pub(crate) operations: Vec<Operation>,
}

impl PdfPage {
    /// Encodes the operations of the page into an uncompressed stream. The operations are wrapped
    /// in a q/Q pair, which isolates the graphics state of the page.
    fn to_stream(&self) -> Result<lopdf::Stream, ContextError> {
        let mut operations = Vec::with_capacity(self.operations.len() + 2);
        operations.push(Operation::new("q", vec![]));
        operations.extend(self.operations.iter().cloned());
        operations.push(Operation::new("Q", vec![]));

        let stream_content = lopdf::content::Content { operations }
            .encode()
            .map_err(|error| {
                ContextError::with_error(
                    format!("Failed to encode the content of page {}", self.number),
                    &error,
                )
            })?;

        Ok(lopdf::Stream::new(lopdf::Dictionary::new(), stream_content).with_compression(false))
    }
}

/// Converts millimeters to points. The layout is reasoned about in millimeters, while the
/// PDF specification expects points.
pub(crate) fn millimeters_to_points(millimeters: f32) -> f32 {
    millimeters * 2.834646
}

/// Converts a grey level between 0 (black) and 255 (white) into the color operands of the
/// `rg`/`RG` operators.
fn grey_operands(grey: u8) -> Vec<Object> {
    let level = f32::from(grey) / 255.0;
    vec![level, level, level]
        .into_iter()
        .map(lopdf::Object::Real)
        .collect()
}

/// This struct represents the actual PDF document on a high-level. It is an interface to the underlying
/// `lopdf::Document` with the addition of the pages and the identifier of the document.
///
/// The document is built by adding pages with `add_page`, drawing on them with `write_text` and
/// `draw_line`, then finalizing it with `write_all` and serializing it with `save_to_bytes`.
pub struct PdfDocument {
    /// The underlying PDF document: this is a low-level interface and shouldn't be directly interacted with
    /// unless strictly necessary.
    pub inner_document: lopdf::Document,
    /// The identifier of the document, it is used in order to set the PDF `ID` tag.
    pub identifier: String,
    /// The title written in the document information dictionary.
    pub title: String,
    /// The pages of the PDF document.
    pub(crate) pages: Vec<PdfPage>,
}

impl PdfDocument {
    /// Create a new `PdfDocument` by defaulting the underlying PDF document to version 1.5
    /// of the PDF specification and customly specifying the PDF identifier.
    pub fn new(pdf_document_identifier: String) -> Self {
        PdfDocument {
            inner_document: lopdf::Document::with_version("1.5"),
            identifier: pdf_document_identifier,
            title: "Untitled".into(),
            pages: Vec::new(),
        }
    }

    /// Adds an empty page of given width and height in millimeters and returns its index, which is
    /// to be passed to `write_text` and `draw_line`.
    pub fn add_page(&mut self, page_width: f32, page_height: f32) -> usize {
        self.pages.push(PdfPage {
            number: self.pages.len() + 1,
            width: millimeters_to_points(page_width),
            height: millimeters_to_points(page_height),
            operations: Vec::new(),
        });

        self.pages.len() - 1
    }

    /// The number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Writes a single-byte `WinAnsiEncoding` string on the given page.
    ///
    /// # Arguments
    ///
    /// * `page_index` - The index of the page to write the text to (should be previously obtained).
    /// * `font_face` - The face the text is set in.
    /// * `font_size` - The size of the font in points.
    /// * `grey` - The grey level used for filling the text, from 0 (black) to 255 (white).
    /// * `caret_position` - The position of the baseline origin in millimeters, from the bottom-left corner.
    /// * `encoded_text` - The text, already encoded (see `text::encode_win_ansi`).
    pub fn write_text(
        &mut self,
        page_index: usize,
        font_face: FontFace,
        font_size: f32,
        grey: u8,
        caret_position: [f32; 2],
        encoded_text: Vec<u8>,
    ) -> Result<(), ContextError> {
        let [x, y] = caret_position;

        self.add_operations_to_page(
            page_index,
            vec![
                Operation::new("BT", vec![]), // Begin text section
                Operation::new(
                    "Tf",
                    vec![
                        Object::Name(font_face.resource_name().into()),
                        font_size.into(),
                    ],
                ), // Set the font and the font size
                Operation::new(
                    "Td",
                    vec![
                        millimeters_to_points(x).into(),
                        millimeters_to_points(y).into(),
                    ],
                ), // Set the position where the text begins to be written
                Operation::new("rg", grey_operands(grey)), // Set the filling color of the text
                Operation::new(
                    "Tj",
                    vec![Object::String(encoded_text, StringFormat::Literal)],
                ),
                Operation::new("ET", vec![]), // End text section
            ],
        )
    }

    /// Strokes a straight line between two points given in millimeters from the bottom-left corner.
    pub fn draw_line(
        &mut self,
        page_index: usize,
        grey: u8,
        line_width: f32,
        from: [f32; 2],
        to: [f32; 2],
    ) -> Result<(), ContextError> {
        let ([x1, y1], [x2, y2]) = (from, to);

        self.add_operations_to_page(
            page_index,
            vec![
                Operation::new("q", vec![]),
                Operation::new("RG", grey_operands(grey)), // Set the stroking color
                Operation::new("w", vec![millimeters_to_points(line_width).into()]),
                Operation::new(
                    "m",
                    vec![
                        millimeters_to_points(x1).into(),
                        millimeters_to_points(y1).into(),
                    ],
                ),
                Operation::new(
                    "l",
                    vec![
                        millimeters_to_points(x2).into(),
                        millimeters_to_points(y2).into(),
                    ],
                ),
                Operation::new("S", vec![]), // Stroke the path
                Operation::new("Q", vec![]),
            ],
        )
    }

    /// Write the pages so far constructed to the underlying document and finalize it.
    ///
    /// The creation and modification dates are pinned to the Unix epoch, so that two documents
    /// built from the same operations and identifiers are byte-identical.
    pub fn write_all(&mut self, instance_id: String) -> Result<(), ContextError> {
        use lopdf::Object::*;
        use lopdf::StringFormat::*;

        if self.pages.is_empty() {
            return Err(ContextError::with_context(
                "Unable to write a PDF document without pages",
            ));
        }

        let epoch_timestamp = to_pdf_timestamp_format(&OffsetDateTime::UNIX_EPOCH);
        let document_info = lopdf::Dictionary::from_iter(vec![
            ("Trapped", "False".into()),
            (
                "CreationDate",
                String(epoch_timestamp.clone().into_bytes(), Literal),
            ),
            ("ModDate", String(epoch_timestamp.into_bytes(), Literal)),
            ("Title", String(self.title.clone().into_bytes(), Literal)),
            ("Creator", String("resumr".to_string().into_bytes(), Literal)),
            ("Producer", String("resumr".to_string().into_bytes(), Literal)),
            (
                "Identifier",
                String(self.identifier.clone().into_bytes(), Literal),
            ),
        ]);
        let document_info_id = self.inner_document.add_object(Dictionary(document_info));

        // Construct the catalog, required by the PDF specification
        let pages_id = self.inner_document.new_object_id();
        let catalog = lopdf::Dictionary::from_iter(vec![
            ("Type", "Catalog".into()),
            ("PageLayout", "OneColumn".into()),
            ("PageMode", "UseNone".into()),
            ("Pages", Reference(pages_id)),
        ]);
        let catalog_id = self.inner_document.add_object(catalog);

        self.inner_document
            .trailer
            .set("Root", Reference(catalog_id));
        self.inner_document
            .trailer
            .set("Info", Reference(document_info_id));
        self.inner_document.trailer.set(
            "ID",
            Array(vec![
                String(self.identifier.clone().into_bytes(), Literal),
                String(instance_id.into_bytes(), Literal),
            ]),
        );

        // Register the fonts once, every page refers to the same dictionary
        let mut fonts_dictionary = lopdf::Dictionary::new();
        for font_face in FontFace::ALL {
            let font_id = self.inner_document.add_object(font_face.dictionary());
            fonts_dictionary.set(font_face.resource_name(), Reference(font_id));
        }
        let fonts_dictionary_id = self.inner_document.add_object(fonts_dictionary);

        let mut page_ids = Vec::<lopdf::Object>::new();
        for page in self.pages.iter() {
            let page_content_id = self.inner_document.add_object(page.to_stream()?);
            let resources = lopdf::Dictionary::from_iter(vec![(
                "Font",
                Reference(fonts_dictionary_id),
            )]);
            let page_dictionary = lopdf::Dictionary::from_iter(vec![
                ("Type", "Page".into()),
                ("Rotate", Integer(0)),
                (
                    "MediaBox",
                    vec![0.into(), 0.into(), page.width.into(), page.height.into()].into(),
                ),
                (
                    "CropBox",
                    vec![0.into(), 0.into(), page.width.into(), page.height.into()].into(),
                ),
                ("Parent", Reference(pages_id)),
                ("Resources", Dictionary(resources)),
                ("Contents", Reference(page_content_id)),
            ]);

            let page_id = self.inner_document.add_object(page_dictionary);
            page_ids.push(Reference(page_id))
        }

        // Use all the collected page references in order to set the "Kids" field of the pages dictionary
        // and then insert it into the document itself as a last operation
        let pages = lopdf::Dictionary::from_iter(vec![
            ("Type", "Pages".into()),
            ("Count", Integer(self.pages.len() as i64)),
            ("Kids", Array(page_ids)),
        ]);
        self.inner_document
            .objects
            .insert(pages_id, Dictionary(pages));

        Ok(())
    }

    /// Save the `PdfDocument` to bytes in order for it to be written to a file or further processed.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, ContextError> {
        let mut pdf_document_bytes = Vec::new();
        let mut writer = BufWriter::new(&mut pdf_document_bytes);
        self.inner_document.save_to(&mut writer).map_err(|error| {
            ContextError::with_error("Error while saving the PDF document to bytes", &error)
        })?;
        mem::drop(writer);

        Ok(pdf_document_bytes)
    }

    /// This function is responsible for adding the given operations to the specified page.
    fn add_operations_to_page(
        &mut self,
        page_index: usize,
        operations: Vec<Operation>,
    ) -> Result<(), ContextError> {
        let pdf_page = self
            .pages
            .get_mut(page_index)
            .ok_or(ContextError::with_context(format!(
                "Failed to find the page with index {}",
                page_index
            )))?;
        pdf_page.operations.extend(operations);

        Ok(())
    }
}

/// Formats the given time so that it matches what the PDF specification expects.
/// An example of it is the following: D:20170505150224+02'00'.
fn to_pdf_timestamp_format(date: &OffsetDateTime) -> String {
    let offset = date.offset();
    let offset_sign = if offset.is_negative() { '-' } else { '+' };
    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}{offset_sign}{:02}'{:02}'",
        date.year(),
        u8::from(date.month()),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        offset.whole_hours().abs(),
        offset.minutes_past_hour().abs(),
    )
}
