#![warn(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use resumr::chat::{ChatConfiguration, GroqClient};
use resumr::enhance::{enhance_section, EnhanceOutcome};
use resumr::guidance::{self, ExperienceLevel, PerformanceReview, WellnessChat};
use resumr::preview::render_preview;
use resumr::resume::{export_file_name, ResumeRecord, SectionKey, PDF_MIME_TYPE};
use resumr::{compose_with, ContextError, LayoutConfiguration};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct CliArguments {
    /// Log at the debug level, unless `RUST_LOG` says otherwise.
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composes the résumé into a PDF document.
    Export {
        #[arg(short = 'r', long = "resume", value_name = "json_file")]
        resume_path: PathBuf,
        #[arg(short = 'l', long = "layout", value_name = "json_file")]
        layout_path: Option<PathBuf>,
        /// Defaults to `<Name>_Resume.pdf` in the current directory.
        #[arg(short = 'o', long = "output", value_name = "file_path")]
        output_file_path: Option<PathBuf>,
    },
    /// Prints the HTML preview of the résumé.
    Preview {
        #[arg(short = 'r', long = "resume", value_name = "json_file")]
        resume_path: PathBuf,
        #[arg(long = "include-empty")]
        include_empty: bool,
        #[arg(short = 'o', long = "output", value_name = "file_path")]
        output_file_path: Option<PathBuf>,
    },
    /// Rewrites a section of the résumé and stores it back into the file.
    Enhance {
        #[arg(short = 'r', long = "resume", value_name = "json_file")]
        resume_path: PathBuf,
        #[arg(short = 's', long = "section", value_enum)]
        section_key: SectionKey,
    },
    /// Suggests a career path between two roles.
    CareerPath {
        #[arg(long = "current-role")]
        current_role: String,
        #[arg(long = "dream-role")]
        dream_role: String,
        #[arg(long = "experience", value_enum, default_value = "0-1")]
        experience_level: ExperienceLevel,
    },
    /// Analyzes the skills missing for a target role.
    SkillsGap {
        #[arg(long = "current-skills")]
        current_skills: String,
        #[arg(long = "target-role")]
        target_role: String,
    },
    /// Generates a performance review report.
    Review {
        #[arg(long = "rating", default_value_t = 3)]
        rating: u8,
        #[arg(long = "achievements", default_value = "")]
        achievements: String,
        #[arg(long = "improvements", default_value = "")]
        improvements: String,
        #[arg(long = "goals", default_value = "")]
        goals: String,
        #[arg(long = "manager-comments", default_value = "")]
        manager_comments: String,
        #[arg(long = "recommendations", default_value = "")]
        recommendations: String,
    },
    /// Sends a message to the wellness chat.
    Chat {
        #[arg(long = "history", value_name = "json_file", default_value = "chat_history.json")]
        history_path: PathBuf,
        message: String,
    },
    /// Forgets the wellness chat history.
    ClearChat {
        #[arg(long = "history", value_name = "json_file", default_value = "chat_history.json")]
        history_path: PathBuf,
    },
}

fn main() {
    if let Err(error) = fallible_main() {
        log::error!("{}", error);
        std::process::exit(1);
    }
}

fn fallible_main() -> Result<(), ContextError> {
    let arguments = CliArguments::parse();
    let mut logger_builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if arguments.verbose && std::env::var_os("RUST_LOG").is_none() {
        logger_builder.filter_level(log::LevelFilter::Debug);
    }
    logger_builder.init();
    log::debug!("{:?}", arguments);

    match arguments.command {
        Command::Export {
            resume_path,
            layout_path,
            output_file_path,
        } => export(&resume_path, layout_path.as_deref(), output_file_path),
        Command::Preview {
            resume_path,
            include_empty,
            output_file_path,
        } => {
            let resume = ResumeRecord::from_path(&resume_path)?;
            let html = render_preview(&resume, include_empty);
            match output_file_path {
                Some(output_file_path) => {
                    std::fs::write(&output_file_path, html).map_err(|error| {
                        ContextError::with_error("Failed to write the preview", &error)
                    })?;
                    log::info!("Saved the preview to the path: {:?}", output_file_path);
                }
                None => print!("{}", html),
            }
            Ok(())
        }
        Command::Enhance {
            resume_path,
            section_key,
        } => {
            let mut resume = ResumeRecord::from_path(&resume_path)?;
            let client = chat_client()?;
            match enhance_section(&client, &mut resume, section_key) {
                EnhanceOutcome::Enhanced => {
                    resume.save_to_path(&resume_path)?;
                    log::info!("The {} section has been enhanced", section_key.field_name());
                    println!("{}", resume.section(section_key));
                    Ok(())
                }
                EnhanceOutcome::Empty => Err(ContextError::with_context(format!(
                    "Please enter the {} section first",
                    section_key.field_name()
                ))),
                EnhanceOutcome::Failed(error) => Err(ContextError::with_error(
                    format!("Failed to enhance the {} section", section_key.field_name()),
                    &error,
                )),
            }
        }
        Command::CareerPath {
            current_role,
            dream_role,
            experience_level,
        } => {
            let reply = guidance::career_path(
                &chat_client()?,
                &current_role,
                &dream_role,
                experience_level,
            )
            .map_err(|error| ContextError::with_error("Failed to suggest a career path", &error))?;
            println!("{}", reply);
            Ok(())
        }
        Command::SkillsGap {
            current_skills,
            target_role,
        } => {
            let reply = guidance::skills_gap(&chat_client()?, &current_skills, &target_role)
                .map_err(|error| {
                    ContextError::with_error("Failed to analyze the skills gap", &error)
                })?;
            println!("{}", reply);
            Ok(())
        }
        Command::Review {
            rating,
            achievements,
            improvements,
            goals,
            manager_comments,
            recommendations,
        } => {
            let review = PerformanceReview {
                rating,
                achievements,
                improvements,
                goals,
                manager_comments,
                recommendations,
            };
            // Validated before the client, so that a bad input never needs a key
            review.prompt().map_err(|error| {
                ContextError::with_error("Invalid performance review", &error)
            })?;
            let report = review.report(&chat_client()?).map_err(|error| {
                ContextError::with_error("Failed to generate the review report", &error)
            })?;
            println!("{}", report);
            Ok(())
        }
        Command::Chat {
            history_path,
            message,
        } => {
            let mut wellness_chat = WellnessChat::from_path(&history_path)?;
            let exchange = wellness_chat
                .send(&chat_client()?, &message)
                .map_err(|error| ContextError::with_error("Failed to send the message", &error))?;
            println!("{}", exchange.reply);
            wellness_chat.save_to_path(&history_path)
        }
        Command::ClearChat { history_path } => {
            let mut wellness_chat = WellnessChat::from_path(&history_path)?;
            wellness_chat.clear();
            wellness_chat.save_to_path(&history_path)?;
            log::info!("Cleared the chat history {:?}", history_path);
            Ok(())
        }
    }
}

fn export(
    resume_path: &Path,
    layout_path: Option<&Path>,
    output_file_path: Option<PathBuf>,
) -> Result<(), ContextError> {
    let resume = ResumeRecord::from_path(resume_path)?;
    if !resume.has_name() {
        return Err(ContextError::with_context("Please enter your name first"));
    }
    let configuration = match layout_path {
        Some(layout_path) => LayoutConfiguration::from_path(layout_path)?,
        None => LayoutConfiguration::default(),
    };

    let pdf_document_bytes = compose_with(&resume, &configuration)
        .map_err(|error| ContextError::with_error("Failed to render the résumé", &error))?;
    let output_file_path =
        output_file_path.unwrap_or_else(|| PathBuf::from(export_file_name(&resume.name)));
    std::fs::write(&output_file_path, &pdf_document_bytes)
        .map_err(|error| ContextError::with_error("Failed to save the output file", &error))?;
    log::info!(
        "Saved the output file ({}) to the path: {:?}",
        PDF_MIME_TYPE,
        output_file_path
    );

    Ok(())
}

fn chat_client() -> Result<GroqClient, ContextError> {
    GroqClient::new(ChatConfiguration::from_env())
        .map_err(|error| ContextError::with_error("Failed to create the chat client", &error))
}
