use crate::configuration::LayoutConfiguration;
use crate::error::{CompositionError, ContextError};
use crate::layout::{Alignment, FontFace, LayoutSink, PageLayout};
use crate::resume::{ResumeRecord, SectionKey};
use crate::section::{render_section, SectionOutcome};
use crate::text::sanitize;

/// Height of the cell holding the name, in millimeters.
const NAME_HEIGHT: f32 = 15.0;
/// Height of the cell holding the contact line, in millimeters.
const CONTACT_HEIGHT: f32 = 6.0;
const GAP_BEFORE_HEADER_RULE: f32 = 5.0;
const GAP_AFTER_HEADER_RULE: f32 = 10.0;

/// Composes the résumé into a PDF document with the default layout.
pub fn compose(resume: &ResumeRecord) -> Result<Vec<u8>, CompositionError> {
    compose_with(resume, &LayoutConfiguration::default())
}

/// Composes the résumé into a PDF document: the header (when there is a name), then the six
/// sections in their fixed order. Only a failure to produce the document itself is an error,
/// everything wrong with the content is degraded gracefully.
///
/// The output only depends on the arguments, two calls with the same arguments produce the
/// same bytes.
pub fn compose_with(
    resume: &ResumeRecord,
    configuration: &LayoutConfiguration,
) -> Result<Vec<u8>, CompositionError> {
    configuration.validate()?;
    let mut layout = PageLayout::new(configuration);
    render_resume(resume, &mut layout, configuration);

    let page_count = layout.page_count();
    let pdf_document_bytes = layout.finish()?;
    log::debug!(
        "Composed a document of {} pages and {} bytes",
        page_count,
        pdf_document_bytes.len()
    );

    Ok(pdf_document_bytes)
}

/// Emits the header (when there is a name) and the sections in their fixed order. A fault in
/// the header or in a section is logged and the following blocks are still emitted.
fn render_resume(
    resume: &ResumeRecord,
    sink: &mut impl LayoutSink,
    configuration: &LayoutConfiguration,
) {
    if resume.has_name() {
        if let Err(error) = render_header(resume, sink, configuration) {
            log::warn!("The header stopped early: {}", error);
        }
    }

    for section_key in SectionKey::ALL {
        let outcome = render_section(
            section_key.title(),
            resume.section(section_key),
            sink,
            configuration,
        );
        match outcome {
            SectionOutcome::Skipped => {
                log::debug!("Skipped the empty section {:?}", section_key.title())
            }
            SectionOutcome::Rendered { lines_rendered } => log::debug!(
                "Rendered the section {:?} with {} lines",
                section_key.title(),
                lines_rendered
            ),
            // Already reported by the section renderer
            SectionOutcome::Partial { .. } => {}
        }
    }
}

/// Emits the centered name, the contact line below it (unless it is empty) and a rule.
fn render_header(
    resume: &ResumeRecord,
    sink: &mut impl LayoutSink,
    configuration: &LayoutConfiguration,
) -> Result<(), ContextError> {
    sink.set_font(FontFace::Bold, configuration.name_font_size);
    sink.set_text_color(0);
    sink.cell(
        0.0,
        NAME_HEIGHT,
        &sanitize(resume.name.trim()),
        true,
        Alignment::Center,
    )?;

    let contact_line = resume.contact_line();
    if !contact_line.is_empty() {
        sink.set_font(FontFace::Regular, configuration.contact_font_size);
        sink.set_text_color(configuration.contact_grey);
        sink.cell(0.0, CONTACT_HEIGHT, &contact_line, true, Alignment::Center)?;
    }

    sink.line_feed(GAP_BEFORE_HEADER_RULE);
    sink.set_draw_color(configuration.header_rule_grey);
    sink.horizontal_rule(configuration.rule_start, configuration.rule_end)?;
    sink.line_feed(GAP_AFTER_HEADER_RULE);

    Ok(())
}
