use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ContextError;
use crate::text::sanitize;

/// MIME type under which the composed documents are to be served.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// The file name used when the name of the person cannot be used.
pub const DEFAULT_FILE_NAME: &str = "Resume.pdf";

/// The separator placed between the items of the contact line.
pub const CONTACT_SEPARATOR: &str = " | ";

/// The complete content of a résumé. Every field may be empty.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub education: String,
    pub experience: String,
    pub skills: String,
    pub projects: String,
    pub achievements: String,
    pub certificates: String,
}

/// One of the six content sections of a résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    Education,
    Experience,
    Skills,
    Projects,
    Achievements,
    Certificates,
}

impl SectionKey {
    /// The order in which the sections always appear in a document.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Education,
        SectionKey::Experience,
        SectionKey::Skills,
        SectionKey::Projects,
        SectionKey::Achievements,
        SectionKey::Certificates,
    ];

    /// The title displayed above the section.
    pub fn title(self) -> &'static str {
        match self {
            SectionKey::Education => "Education",
            SectionKey::Experience => "Experience",
            SectionKey::Skills => "Skills",
            SectionKey::Projects => "Projects",
            SectionKey::Achievements => "Achievements",
            SectionKey::Certificates => "Certificates",
        }
    }

    /// The name of the field holding the section in the session file.
    pub fn field_name(self) -> &'static str {
        match self {
            SectionKey::Education => "education",
            SectionKey::Experience => "experience",
            SectionKey::Skills => "skills",
            SectionKey::Projects => "projects",
            SectionKey::Achievements => "achievements",
            SectionKey::Certificates => "certificates",
        }
    }
}

impl ResumeRecord {
    /// Loads the record from a JSON session file.
    pub fn from_path(resume_path: &Path) -> Result<ResumeRecord, ContextError> {
        let resume_content = std::fs::read_to_string(resume_path).map_err(|error| {
            ContextError::with_error(format!("Unable to read the résumé {:?}", resume_path), &error)
        })?;
        let resume: ResumeRecord = serde_json::from_str(&resume_content).map_err(|error| {
            ContextError::with_error(format!("Unable to parse the résumé {:?}", resume_path), &error)
        })?;

        Ok(resume)
    }

    /// Stores the record as a pretty-printed JSON session file.
    pub fn save_to_path(&self, resume_path: &Path) -> Result<(), ContextError> {
        let resume_content = serde_json::to_string_pretty(self)
            .map_err(|error| ContextError::with_error("Unable to serialize the résumé", &error))?;
        std::fs::write(resume_path, resume_content).map_err(|error| {
            ContextError::with_error(format!("Unable to write the résumé {:?}", resume_path), &error)
        })
    }

    /// The content of the given section.
    pub fn section(&self, section_key: SectionKey) -> &str {
        match section_key {
            SectionKey::Education => &self.education,
            SectionKey::Experience => &self.experience,
            SectionKey::Skills => &self.skills,
            SectionKey::Projects => &self.projects,
            SectionKey::Achievements => &self.achievements,
            SectionKey::Certificates => &self.certificates,
        }
    }

    /// Mutable access to the content of the given section.
    pub fn section_mut(&mut self, section_key: SectionKey) -> &mut String {
        match section_key {
            SectionKey::Education => &mut self.education,
            SectionKey::Experience => &mut self.experience,
            SectionKey::Skills => &mut self.skills,
            SectionKey::Projects => &mut self.projects,
            SectionKey::Achievements => &mut self.achievements,
            SectionKey::Certificates => &mut self.certificates,
        }
    }

    /// Whether the header block is to be emitted.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// The contact line shown under the name. Each field is sanitized on its own before
    /// joining, so a field made only of unprintable glyphs leaves no separator behind.
    pub fn contact_line(&self) -> String {
        compose_contact_line(
            &sanitize(&self.email),
            &sanitize(&self.phone),
            &sanitize(&self.location),
        )
    }
}

/// Joins the non-blank contact fields with `" | "`, in the order email, phone, location.
/// Returns an empty string when there is nothing to show, in which case the line is omitted.
pub fn compose_contact_line(email: &str, phone: &str, location: &str) -> String {
    [email, phone, location]
        .iter()
        .map(|contact_item| contact_item.trim())
        .filter(|contact_item| !contact_item.is_empty())
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

/// The name under which the document is offered for download, such as `Jane_Doe_Resume.pdf`.
/// A name with nothing printable left gives `Resume.pdf`.
pub fn export_file_name(name: &str) -> String {
    let sanitized_name = sanitize(name);
    let sanitized_name = sanitized_name.trim();
    if sanitized_name.is_empty() {
        return DEFAULT_FILE_NAME.to_string();
    }

    let file_stem: String = sanitized_name
        .chars()
        .map(|character| match character {
            ' ' | '/' | '\\' => '_',
            _ => character,
        })
        .collect();

    format!("{}_Resume.pdf", file_stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_line_skips_the_blank_fields() {
        assert_eq!(compose_contact_line("a@b.com", "", "NYC"), "a@b.com | NYC");
        assert_eq!(
            compose_contact_line(" a@b.com ", "555-0100", "NYC"),
            "a@b.com | 555-0100 | NYC"
        );
        assert_eq!(compose_contact_line("", "  ", "Rome"), "Rome");
        assert_eq!(compose_contact_line("", " ", ""), "");
    }

    #[test]
    fn sections_map_to_their_fields() {
        let mut resume = ResumeRecord::default();
        *resume.section_mut(SectionKey::Projects) = "Compiler".into();

        assert_eq!(resume.projects, "Compiler");
        assert_eq!(resume.section(SectionKey::Projects), "Compiler");
        assert_eq!(resume.section(SectionKey::Skills), "");
    }

    #[test]
    fn missing_fields_default_to_empty_strings() {
        let resume: ResumeRecord =
            serde_json::from_str(r#"{ "skills": "Rust", "name": "Ada" }"#).unwrap();

        assert_eq!(resume.name, "Ada");
        assert_eq!(resume.skills, "Rust");
        assert!(resume.email.is_empty());
        assert!(resume.has_name());
        assert!(!ResumeRecord::default().has_name());
    }

    #[test]
    fn export_file_names_replace_the_spaces() {
        assert_eq!(export_file_name("Jane Doe"), "Jane_Doe_Resume.pdf");
        assert_eq!(export_file_name(" José / Ng "), "José___Ng_Resume.pdf");
    }

    #[test]
    fn unprintable_names_give_the_default_file_name() {
        assert_eq!(export_file_name("🚀"), DEFAULT_FILE_NAME);
        assert_eq!(export_file_name("  🚀 \t"), DEFAULT_FILE_NAME);
        assert_eq!(export_file_name("🚀 Ada"), "Ada_Resume.pdf");
    }

    #[test]
    fn unprintable_contacts_leave_no_separator() {
        let resume = ResumeRecord {
            email: "📧".into(),
            phone: "555-0100".into(),
            location: "Zürich 🏔".into(),
            ..ResumeRecord::default()
        };

        assert_eq!(resume.contact_line(), "555-0100 | Zürich");
    }
}
