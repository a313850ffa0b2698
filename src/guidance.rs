//! The chat panels next to the résumé builder: career path and skills gap analyses, the
//! performance review report and the wellness chat. Each of them validates its input, builds a
//! prompt and forwards it to a `ChatCompletion`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::{ChatCompletion, ChatError, DEFAULT_SYSTEM_PROMPT};
use crate::error::ContextError;

pub const WELLNESS_SYSTEM_PROMPT: &str = "You are a compassionate mental health assistant and career counselor. \
Provide supportive, empathetic responses focused on mental well-being, stress management, \
and career guidance. Always prioritize the person's emotional well-being and provide practical advice.";

#[derive(Debug, Error)]
pub enum GuidanceError {
    #[error("{0}")]
    MissingInput(&'static str),

    #[error("the rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error(transparent)]
    Chat(#[from] ChatError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ExperienceLevel {
    #[value(name = "0-1")]
    UpToOneYear,
    #[value(name = "2-5")]
    TwoToFiveYears,
    #[value(name = "5-10")]
    FiveToTenYears,
    #[value(name = "10+")]
    OverTenYears,
}

impl ExperienceLevel {
    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::UpToOneYear => "0-1 years",
            ExperienceLevel::TwoToFiveYears => "2-5 years",
            ExperienceLevel::FiveToTenYears => "5-10 years",
            ExperienceLevel::OverTenYears => "10+ years",
        }
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

pub fn career_path_prompt(
    current_role: &str,
    dream_role: &str,
    experience_level: ExperienceLevel,
) -> Result<String, GuidanceError> {
    if is_blank(current_role) || is_blank(dream_role) {
        return Err(GuidanceError::MissingInput("please fill in both roles"));
    }

    Ok(format!(
        "Provide a detailed career path from {} to {} for someone with {} experience. \
Include specific steps, timeline, and required skills.",
        current_role.trim(),
        dream_role.trim(),
        experience_level.label()
    ))
}

pub fn career_path(
    client: &impl ChatCompletion,
    current_role: &str,
    dream_role: &str,
    experience_level: ExperienceLevel,
) -> Result<String, GuidanceError> {
    let prompt = career_path_prompt(current_role, dream_role, experience_level)?;
    Ok(client.complete(&prompt, DEFAULT_SYSTEM_PROMPT)?)
}

pub fn skills_gap_prompt(current_skills: &str, target_role: &str) -> Result<String, GuidanceError> {
    if is_blank(current_skills) || is_blank(target_role) {
        return Err(GuidanceError::MissingInput(
            "please fill in the current skills and the target role",
        ));
    }

    Ok(format!(
        "Analyze the skills gap for transitioning to {} with current skills: {}. \
Provide specific recommendations for skills to develop.",
        target_role.trim(),
        current_skills.trim()
    ))
}

pub fn skills_gap(
    client: &impl ChatCompletion,
    current_skills: &str,
    target_role: &str,
) -> Result<String, GuidanceError> {
    let prompt = skills_gap_prompt(current_skills, target_role)?;
    Ok(client.complete(&prompt, DEFAULT_SYSTEM_PROMPT)?)
}

/// The self assessment a performance review report is generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceReview {
    /// Overall rating, from 1 to 5.
    pub rating: u8,
    pub achievements: String,
    pub improvements: String,
    pub goals: String,
    pub manager_comments: String,
    pub recommendations: String,
}

impl Default for PerformanceReview {
    fn default() -> Self {
        PerformanceReview {
            rating: 3,
            achievements: String::new(),
            improvements: String::new(),
            goals: String::new(),
            manager_comments: String::new(),
            recommendations: String::new(),
        }
    }
}

impl PerformanceReview {
    pub fn prompt(&self) -> Result<String, GuidanceError> {
        if !(1..=5).contains(&self.rating) {
            return Err(GuidanceError::InvalidRating(self.rating));
        }
        if is_blank(&self.achievements) && is_blank(&self.improvements) && is_blank(&self.goals) {
            return Err(GuidanceError::MissingInput(
                "please fill in at least one of the achievements, the areas for improvement or the goals",
            ));
        }

        Ok(format!(
            "Generate a comprehensive performance review report based on this data:\n\
- Overall Rating: {}/5\n\
- Key Achievements: {}\n\
- Areas for Improvement: {}\n\
- Goals: {}\n\
- Manager Comments: {}\n\
- Recommendations: {}\n\
\n\
Provide a professional summary and action plan.",
            self.rating,
            self.achievements.trim(),
            self.improvements.trim(),
            self.goals.trim(),
            self.manager_comments.trim(),
            self.recommendations.trim()
        ))
    }

    pub fn report(&self, client: &impl ChatCompletion) -> Result<String, GuidanceError> {
        let prompt = self.prompt()?;
        Ok(client.complete(&prompt, DEFAULT_SYSTEM_PROMPT)?)
    }
}

/// One message of the user together with the reply it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user_message: String,
    pub reply: String,
}

/// The history of the wellness chat. Only the exchanges which received a reply are kept.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessChat {
    pub history: Vec<ChatExchange>,
}

impl WellnessChat {
    /// Loads the history from a JSON file, a missing file being an empty history.
    pub fn from_path(history_path: &Path) -> Result<WellnessChat, ContextError> {
        if !history_path.exists() {
            return Ok(WellnessChat::default());
        }

        let history_content = std::fs::read_to_string(history_path).map_err(|error| {
            ContextError::with_error(
                format!("Unable to read the chat history {:?}", history_path),
                &error,
            )
        })?;
        serde_json::from_str(&history_content).map_err(|error| {
            ContextError::with_error(
                format!("Unable to parse the chat history {:?}", history_path),
                &error,
            )
        })
    }

    pub fn save_to_path(&self, history_path: &Path) -> Result<(), ContextError> {
        let history_content = serde_json::to_string_pretty(self).map_err(|error| {
            ContextError::with_error("Unable to serialize the chat history", &error)
        })?;
        std::fs::write(history_path, history_content).map_err(|error| {
            ContextError::with_error(
                format!("Unable to write the chat history {:?}", history_path),
                &error,
            )
        })
    }

    /// Sends the message and records the exchange if a reply came back.
    pub fn send(
        &mut self,
        client: &impl ChatCompletion,
        user_message: &str,
    ) -> Result<&ChatExchange, GuidanceError> {
        if is_blank(user_message) {
            return Err(GuidanceError::MissingInput("please enter a message"));
        }

        let reply = client.complete(user_message, WELLNESS_SYSTEM_PROMPT)?;
        self.history.push(ChatExchange {
            user_message: user_message.to_string(),
            reply,
        });

        Ok(&self.history[self.history.len() - 1])
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::tests::ScriptedClient;

    #[test]
    fn career_paths_need_both_roles() {
        assert!(matches!(
            career_path_prompt("Developer", " ", ExperienceLevel::TwoToFiveYears),
            Err(GuidanceError::MissingInput(_))
        ));

        let prompt =
            career_path_prompt("Developer", "Tech Lead", ExperienceLevel::TwoToFiveYears).unwrap();
        assert!(prompt.starts_with(
            "Provide a detailed career path from Developer to Tech Lead for someone with 2-5 years experience."
        ));
    }

    #[test]
    fn skills_gap_forwards_the_prompt() {
        let client = ScriptedClient::replying(vec![Ok("Learn SQL".into())]);
        let reply = skills_gap(&client, "HTML, CSS", "Full Stack Developer").unwrap();

        assert_eq!(reply, "Learn SQL");
        assert!(client.requests.borrow()[0]
            .0
            .contains("transitioning to Full Stack Developer with current skills: HTML, CSS"));
    }

    #[test]
    fn reviews_are_validated() {
        let review = PerformanceReview {
            rating: 6,
            goals: "Ship v2".into(),
            ..PerformanceReview::default()
        };
        assert!(matches!(review.prompt(), Err(GuidanceError::InvalidRating(6))));

        let review = PerformanceReview {
            manager_comments: "Great".into(),
            ..PerformanceReview::default()
        };
        assert!(matches!(review.prompt(), Err(GuidanceError::MissingInput(_))));

        let review = PerformanceReview {
            rating: 4,
            goals: "Ship v2".into(),
            ..PerformanceReview::default()
        };
        let prompt = review.prompt().unwrap();
        assert!(prompt.contains("- Overall Rating: 4/5\n"));
        assert!(prompt.contains("- Goals: Ship v2\n"));
    }

    #[test]
    fn only_answered_messages_enter_the_history() {
        let client = ScriptedClient::replying(vec![
            Ok("That sounds stressful.".into()),
            Err(ChatError::Timeout),
        ]);
        let mut chat = WellnessChat::default();

        let exchange = chat.send(&client, "Work is a lot lately").unwrap();
        assert_eq!(exchange.reply, "That sounds stressful.");
        assert!(matches!(
            chat.send(&client, "Still there?"),
            Err(GuidanceError::Chat(ChatError::Timeout))
        ));
        assert_eq!(chat.history.len(), 1);
        assert_eq!(client.requests.borrow()[0].1, WELLNESS_SYSTEM_PROMPT);

        chat.clear();
        assert!(chat.history.is_empty());
    }
}
