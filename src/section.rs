use crate::configuration::LayoutConfiguration;
use crate::error::ContextError;
use crate::layout::{Alignment, FontFace, LayoutSink};
use crate::text::sanitize;

/// The glyph drawn in front of the bullet lines.
pub const BULLET_GLYPH: &str = "•";

/// Height of a line of body text, in millimeters.
const BODY_LINE_HEIGHT: f32 = 5.0;
/// Width of the cell holding the bullet glyph, in millimeters.
const BULLET_CELL_WIDTH: f32 = 5.0;
/// Height of the cell holding the section title, in millimeters.
const TITLE_HEIGHT: f32 = 8.0;
/// Gap between the rule under the title and the first line.
const GAP_AFTER_RULE: f32 = 3.0;
/// Gap after the last line of a section.
const GAP_AFTER_SECTION: f32 = 5.0;

/// A line of content, once its (optional) bullet marker has been recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub is_bullet: bool,
    pub text: String,
}

/// Recognizes the lines starting with `•` or `-`. Only the first character of the trimmed line is
/// looked at: numbered lists or nested markers are plain lines.
pub fn classify_line(line: &str) -> ClassifiedLine {
    let line = line.trim();

    match line.strip_prefix(['•', '-']) {
        Some(rest) => ClassifiedLine {
            is_bullet: true,
            text: rest.trim_start().to_string(),
        },
        None => ClassifiedLine {
            is_bullet: false,
            text: line.to_string(),
        },
    }
}

/// What rendering a section amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionOutcome {
    /// The content was blank, nothing has been emitted.
    Skipped,
    /// The title and all the lines have been emitted.
    Rendered { lines_rendered: usize },
    /// Rendering stopped on an error. What was emitted before it is kept.
    Partial {
        lines_rendered: usize,
        error: ContextError,
    },
}

/// Emits a section: its upper-cased title, a rule and one line per non-blank line of `content`.
///
/// This never fails: an error of the sink stops the section, is logged and is reported
/// through `SectionOutcome::Partial`, leaving in place what has already been emitted.
pub fn render_section(
    title: &str,
    content: &str,
    sink: &mut impl LayoutSink,
    configuration: &LayoutConfiguration,
) -> SectionOutcome {
    if content.trim().is_empty() {
        return SectionOutcome::Skipped;
    }

    let mut lines_rendered = 0;
    match emit_section(title, content, sink, configuration, &mut lines_rendered) {
        Ok(()) => SectionOutcome::Rendered { lines_rendered },
        Err(error) => {
            log::warn!(
                "The section {:?} stopped after {} lines: {}",
                title,
                lines_rendered,
                error
            );
            SectionOutcome::Partial {
                lines_rendered,
                error,
            }
        }
    }
}

fn emit_section(
    title: &str,
    content: &str,
    sink: &mut impl LayoutSink,
    configuration: &LayoutConfiguration,
    lines_rendered: &mut usize,
) -> Result<(), ContextError> {
    sink.set_font(FontFace::Bold, configuration.section_title_font_size);
    sink.set_text_color(0);
    sink.cell(
        0.0,
        TITLE_HEIGHT,
        &sanitize(&title.to_uppercase()),
        true,
        Alignment::Left,
    )?;

    sink.set_draw_color(configuration.section_rule_grey);
    sink.horizontal_rule(configuration.rule_start, configuration.rule_end)?;
    sink.line_feed(GAP_AFTER_RULE);

    sink.set_font(FontFace::Regular, configuration.body_font_size);
    sink.set_text_color(0);

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let classified_line = classify_line(line);
        let text = sanitize(&classified_line.text);
        if classified_line.is_bullet {
            sink.cell(
                BULLET_CELL_WIDTH,
                BODY_LINE_HEIGHT,
                BULLET_GLYPH,
                false,
                Alignment::Left,
            )?;
        }
        sink.cell(0.0, BODY_LINE_HEIGHT, &text, true, Alignment::Left)?;
        *lines_rendered += 1;
    }

    sink.line_feed(GAP_AFTER_SECTION);

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every call a sink can receive, recorded in order.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum SinkEvent {
        Font(FontFace, f32),
        TextColor(u8),
        DrawColor(u8),
        Cell {
            width: f32,
            height: f32,
            text: String,
            line_break: bool,
            alignment: Alignment,
        },
        Rule(f32, f32),
        LineFeed(f32),
    }

    /// A sink which records the calls, and fails on the cell number `fail_at_cell` if set.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingSink {
        pub(crate) events: Vec<SinkEvent>,
        pub(crate) fail_at_cell: Option<usize>,
        pub(crate) cells: usize,
        pub(crate) y: f32,
    }

    impl RecordingSink {
        pub(crate) fn texts(&self) -> Vec<String> {
            self.events
                .iter()
                .filter_map(|event| match event {
                    SinkEvent::Cell { text, .. } => Some(text.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl LayoutSink for RecordingSink {
        fn set_font(&mut self, font_face: FontFace, font_size: f32) {
            self.events.push(SinkEvent::Font(font_face, font_size));
        }

        fn set_text_color(&mut self, grey: u8) {
            self.events.push(SinkEvent::TextColor(grey));
        }

        fn set_draw_color(&mut self, grey: u8) {
            self.events.push(SinkEvent::DrawColor(grey));
        }

        fn cell(
            &mut self,
            width: f32,
            height: f32,
            text: &str,
            line_break: bool,
            alignment: Alignment,
        ) -> Result<(), ContextError> {
            let cell_index = self.cells;
            self.cells += 1;
            if self.fail_at_cell == Some(cell_index) {
                return Err(ContextError::with_context("Injected failure"));
            }
            if line_break {
                self.y += height;
            }
            self.events.push(SinkEvent::Cell {
                width,
                height,
                text: text.to_string(),
                line_break,
                alignment,
            });
            Ok(())
        }

        fn horizontal_rule(&mut self, x_start: f32, x_end: f32) -> Result<(), ContextError> {
            self.events.push(SinkEvent::Rule(x_start, x_end));
            Ok(())
        }

        fn line_feed(&mut self, height: f32) {
            self.y += height;
            self.events.push(SinkEvent::LineFeed(height));
        }

        fn current_y(&self) -> f32 {
            self.y
        }

        fn page_count(&self) -> usize {
            1
        }
    }

    #[test]
    fn bullet_lines_lose_their_marker() {
        assert_eq!(
            classify_line("- Built a service"),
            ClassifiedLine {
                is_bullet: true,
                text: "Built a service".into()
            }
        );
        assert_eq!(
            classify_line("  •   Led a team  "),
            ClassifiedLine {
                is_bullet: true,
                text: "Led a team".into()
            }
        );
        assert_eq!(
            classify_line("Regular line"),
            ClassifiedLine {
                is_bullet: false,
                text: "Regular line".into()
            }
        );
    }

    #[test]
    fn only_the_first_character_is_a_marker() {
        assert!(!classify_line("1. Numbered").is_bullet);
        assert!(!classify_line("* Starred").is_bullet);
        assert!(!classify_line("Well-known").is_bullet);
        assert_eq!(classify_line("--double").text, "-double");
        assert_eq!(classify_line("-").text, "");
    }

    #[test]
    fn blank_sections_emit_nothing() {
        let mut sink = RecordingSink::default();
        let outcome = render_section(
            "Skills",
            "   \n  \n",
            &mut sink,
            &LayoutConfiguration::default(),
        );

        assert_eq!(outcome, SectionOutcome::Skipped);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn sections_emit_title_rule_and_lines() {
        let configuration = LayoutConfiguration::default();
        let mut sink = RecordingSink::default();
        let outcome = render_section(
            "Experience",
            "Engineer at Acme\n\n  - Shipped the billing system  \n• Cut latency by 40%\n",
            &mut sink,
            &configuration,
        );

        assert_eq!(outcome, SectionOutcome::Rendered { lines_rendered: 3 });
        similar_asserts::assert_eq!(
            sink.events,
            vec![
                SinkEvent::Font(FontFace::Bold, 12.0),
                SinkEvent::TextColor(0),
                SinkEvent::Cell {
                    width: 0.0,
                    height: 8.0,
                    text: "EXPERIENCE".into(),
                    line_break: true,
                    alignment: Alignment::Left,
                },
                SinkEvent::DrawColor(100),
                SinkEvent::Rule(20.0, 190.0),
                SinkEvent::LineFeed(3.0),
                SinkEvent::Font(FontFace::Regular, 10.0),
                SinkEvent::TextColor(0),
                SinkEvent::Cell {
                    width: 0.0,
                    height: 5.0,
                    text: "Engineer at Acme".into(),
                    line_break: true,
                    alignment: Alignment::Left,
                },
                SinkEvent::Cell {
                    width: 5.0,
                    height: 5.0,
                    text: "•".into(),
                    line_break: false,
                    alignment: Alignment::Left,
                },
                SinkEvent::Cell {
                    width: 0.0,
                    height: 5.0,
                    text: "Shipped the billing system".into(),
                    line_break: true,
                    alignment: Alignment::Left,
                },
                SinkEvent::Cell {
                    width: 5.0,
                    height: 5.0,
                    text: "•".into(),
                    line_break: false,
                    alignment: Alignment::Left,
                },
                SinkEvent::Cell {
                    width: 0.0,
                    height: 5.0,
                    text: "Cut latency by 40%".into(),
                    line_break: true,
                    alignment: Alignment::Left,
                },
                SinkEvent::LineFeed(5.0),
            ]
        );
    }

    #[test]
    fn section_text_is_sanitized() {
        let mut sink = RecordingSink::default();
        render_section(
            "Projects",
            "- Rocket 🚀 launcher",
            &mut sink,
            &LayoutConfiguration::default(),
        );

        assert_eq!(sink.texts(), vec!["PROJECTS", "•", "Rocket  launcher"]);
    }

    #[test]
    fn failures_keep_the_partial_output() {
        let mut sink = RecordingSink {
            fail_at_cell: Some(2),
            ..RecordingSink::default()
        };
        let outcome = render_section(
            "Skills",
            "Rust\nGo\nZig",
            &mut sink,
            &LayoutConfiguration::default(),
        );

        match outcome {
            SectionOutcome::Partial {
                lines_rendered,
                error,
            } => {
                assert_eq!(lines_rendered, 1);
                assert_eq!(error.context, "Injected failure");
            }
            other => panic!("Unexpected outcome {:?}", other),
        }
        assert_eq!(sink.texts(), vec!["SKILLS", "Rust"]);
        assert!(!sink
            .events
            .iter()
            .any(|event| matches!(event, SinkEvent::LineFeed(height) if *height == 5.0)));
    }
}
