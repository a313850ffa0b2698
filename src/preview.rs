//! An HTML rendition of the résumé, shown while it is being edited.

use crate::resume::{ResumeRecord, SectionKey};

/// Shown in place of the empty fields when they are included.
pub const NOT_PROVIDED: &str = "Not provided";

/// Escapes the text and turns it into HTML: one `<br>` per line break, and the bullet markers at
/// the start of a line replaced by `• `.
pub fn format_text_for_html(text: &str) -> String {
    if text.trim().is_empty() {
        return NOT_PROVIDED.to_string();
    }

    text.lines()
        .map(|line| {
            let line = match line.strip_prefix(['•', '-']) {
                Some(rest) => format!("• {}", rest.trim_start()),
                None => line.to_string(),
            };
            html_escape::encode_text(&line).into_owned()
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Renders the header and the sections in their fixed order. The blank sections are left out
/// unless `include_empty` is set, in which case they read "Not provided".
pub fn render_preview(resume: &ResumeRecord, include_empty: bool) -> String {
    let mut html = String::from("<div class=\"resume-preview\">\n");

    if resume.has_name() {
        html.push_str(&format!(
            "<h1>{}</h1>\n",
            html_escape::encode_text(resume.name.trim())
        ));
    }
    let contact_line = resume.contact_line();
    if !contact_line.is_empty() {
        html.push_str(&format!(
            "<p class=\"contact\">{}</p>\n",
            html_escape::encode_text(&contact_line)
        ));
    }

    for section_key in SectionKey::ALL {
        let content = resume.section(section_key);
        if content.trim().is_empty() && !include_empty {
            continue;
        }
        html.push_str(&format!(
            "<h2>{}</h2>\n<p>{}</p>\n",
            section_key.title().to_uppercase(),
            format_text_for_html(content)
        ));
    }

    html.push_str("</div>\n");
    html
}
