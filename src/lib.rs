//! Resumr turns a structured résumé record into a single-column A4 PDF document, and offers a
//! few AI-assisted tools around it: rewriting the sections of the résumé, career guidance,
//! performance review reports and a wellness chat.
//!
//! The composition is entirely deterministic: the same `ResumeRecord` with the same
//! `LayoutConfiguration` always gives the same bytes, since the document identifiers and dates
//! are fixed instead of being randomly generated. The entry point is `composer::compose`.
//!
//! Everything that needs the network goes through the `ChatCompletion` trait of the `chat`
//! module, so that the rest of the crate can be exercised without it.

/// This module contains the `ContextError` type which is the error type used by the composition
/// side of this library, and the `CompositionError` which is the only error `compose` returns.
///
/// A `ContextError` always comes with an explanation of what was being done, and, if the failure
/// was propagated from another library, with the message of this source error.
pub mod error;

/// Reduction of arbitrary Unicode text to what the standard PDF fonts are able to display,
/// that is the Windows-1252 (WinAnsi) character set.
pub mod text;

/// Advance widths of the glyphs of the standard Helvetica faces, needed for centering text.
pub mod metrics;

/// The module were the `PdfDocument` interface for working with PDF documents is presented.
///
/// # Introduction
///
/// The main component of this module is the struct `PdfDocument`. It offers the convenience
/// functions `add_page`, `write_text`, `draw_line`, `write_all` and `save_to_bytes`, which allow
/// the end user to build a PDF document in a meaningful way while keeping the details of the
/// format hidden in private methods. Only the standard Type1 faces Helvetica and
/// Helvetica-Bold are used, so that no font file has to be embedded.
pub mod pdf;

/// The page layout primitive: a cursor which places text cells and rules on the pages, breaking
/// to a new page when the content reaches the bottom margin. The `LayoutSink` trait is what the
/// renderers write to.
pub mod layout;

/// The `LayoutConfiguration`, which gathers the geometry, the font sizes, the greys and the
/// identifiers of the produced documents. It can be loaded from a JSON file.
pub mod configuration;

/// The `ResumeRecord` and its six sections, together with the contact line and the naming of
/// the exported files.
pub mod resume;

/// Rendering of a single section, with the recognition of the bullet lines.
pub mod section;

/// Composition of the whole document from a `ResumeRecord`.
pub mod composer;

/// The client of the chat-completion API and its typed errors.
pub mod chat;

/// Rewriting of the résumé sections through the chat-completion API.
pub mod enhance;

/// Career path, skills gap, performance review and wellness chat.
pub mod guidance;

/// HTML preview of the résumé.
pub mod preview;

pub use composer::{compose, compose_with};
pub use configuration::LayoutConfiguration;
pub use error::{CompositionError, ContextError};
pub use resume::{ResumeRecord, SectionKey};
