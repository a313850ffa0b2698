use crate::chat::{ChatCompletion, ChatError, DEFAULT_SYSTEM_PROMPT};
use crate::resume::{ResumeRecord, SectionKey};

/// The instruction sent in front of the content of each section.
pub fn enhancement_instruction(section_key: SectionKey) -> &'static str {
    match section_key {
        SectionKey::Education => {
            "Enhance this education section for a professional resume. Make it concise and impactful"
        }
        SectionKey::Experience => {
            "Enhance this work experience section for a professional resume. Use action verbs and quantify achievements where possible"
        }
        SectionKey::Skills => {
            "Organize and enhance this skills section for a professional resume. Group similar skills and present them professionally"
        }
        SectionKey::Projects => {
            "Enhance this projects section for a professional resume. Focus on impact and technologies used"
        }
        SectionKey::Achievements => {
            "Enhance this achievements section for a professional resume. Make them quantifiable and impactful"
        }
        SectionKey::Certificates => {
            "Enhance this certificates section for a professional resume. Present them professionally with dates if available"
        }
    }
}

pub fn enhancement_prompt(section_key: SectionKey, content: &str) -> String {
    format!("{}: {}", enhancement_instruction(section_key), content)
}

/// The result of asking for a section to be rewritten.
#[derive(Debug)]
pub enum EnhanceOutcome {
    /// The section has been replaced by the rewritten text.
    Enhanced,
    /// The section is blank, nothing has been requested.
    Empty,
    /// The request failed, the section is untouched.
    Failed(ChatError),
}

/// Rewrites one section of the record through the chat client. The stored content is only
/// replaced on success, a failure leaves the record exactly as it was.
pub fn enhance_section(
    client: &impl ChatCompletion,
    resume: &mut ResumeRecord,
    section_key: SectionKey,
) -> EnhanceOutcome {
    let content = resume.section(section_key);
    if content.trim().is_empty() {
        return EnhanceOutcome::Empty;
    }

    let prompt = enhancement_prompt(section_key, content);
    match client.complete(&prompt, DEFAULT_SYSTEM_PROMPT) {
        Ok(enhanced_content) => {
            log::info!(
                "Enhanced the {} section ({} characters)",
                section_key.field_name(),
                enhanced_content.chars().count()
            );
            *resume.section_mut(section_key) = enhanced_content;
            EnhanceOutcome::Enhanced
        }
        Err(error) => {
            log::warn!(
                "Kept the {} section as it was: {}",
                section_key.field_name(),
                error
            );
            EnhanceOutcome::Failed(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::tests::ScriptedClient;

    fn resume_with_experience() -> ResumeRecord {
        ResumeRecord {
            name: "Ada".into(),
            experience: "- wrote programs".into(),
            ..ResumeRecord::default()
        }
    }

    #[test]
    fn successful_enhancements_replace_the_section() {
        let client = ScriptedClient::replying(vec![Ok("- Wrote the first program".into())]);
        let mut resume = resume_with_experience();

        let outcome = enhance_section(&client, &mut resume, SectionKey::Experience);

        assert!(matches!(outcome, EnhanceOutcome::Enhanced));
        assert_eq!(resume.experience, "- Wrote the first program");
        let requests = client.requests.borrow();
        assert_eq!(
            requests[0].0,
            "Enhance this work experience section for a professional resume. Use action verbs and quantify achievements where possible: - wrote programs"
        );
        assert_eq!(requests[0].1, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn failed_enhancements_keep_the_original_content() {
        let client = ScriptedClient::replying(vec![Err(ChatError::RateLimited)]);
        let mut resume = resume_with_experience();
        let original_resume = resume.clone();

        let outcome = enhance_section(&client, &mut resume, SectionKey::Experience);

        assert!(matches!(
            outcome,
            EnhanceOutcome::Failed(ChatError::RateLimited)
        ));
        assert_eq!(resume, original_resume);
    }

    #[test]
    fn blank_sections_are_not_sent() {
        let client = ScriptedClient::default();
        let mut resume = ResumeRecord {
            skills: " \n ".into(),
            ..ResumeRecord::default()
        };

        let outcome = enhance_section(&client, &mut resume, SectionKey::Skills);

        assert!(matches!(outcome, EnhanceOutcome::Empty));
        assert!(client.requests.borrow().is_empty());
        assert_eq!(resume.skills, " \n ");
    }
}
