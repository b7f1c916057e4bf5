//! CLI command implementations

use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::args::{ConfigCommand, PromptCommand};
use crate::config::Settings;
use crate::llm::{check_template, DEFAULT_PROMPT};
use crate::pipeline::{LessonsPipeline, Session};
use crate::LessonsError;

/// Run the full pipeline for one URL and print the lessons
pub async fn extract_lessons(
    settings: &Settings,
    url: &str,
    api_key: Option<String>,
    prompt_file: Option<&Path>,
    show_transcript: bool,
    verbose: bool,
) -> Result<()> {
    // An explicit file wins, so a broken `prompt.template_file` is never read.
    let template = match prompt_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt template: {}", path.display()))?,
        None => settings.initial_prompt()?,
    };
    let api_key = api_key.unwrap_or_else(|| settings.llm.api_key.clone());
    let mut session = Session::new(api_key.trim().to_string(), template);

    if !session.has_api_key() {
        eprintln!(
            "warning: no Gemini API key set; pass --api-key or set {}",
            crate::config::API_KEY_ENV
        );
    }

    for issue in check_template(&session.custom_prompt) {
        eprintln!("warning: {}", issue.message());
    }

    let pipeline = LessonsPipeline::from_settings(settings)?;

    eprintln!("Getting transcript...");
    let transcript = match pipeline.fetch_transcript(&mut session, url).await {
        Ok(transcript) => transcript,
        Err(e) => return Err(stage_failure(Stage::Transcript, &e, verbose)),
    };

    if show_transcript {
        println!("{}", transcript);
        println!();
    }

    eprintln!("Extracting lessons...");
    match pipeline.extract_lessons(&session, &transcript).await {
        Ok(lessons) => {
            println!("{}", lessons);
            Ok(())
        }
        Err(e) => Err(stage_failure(Stage::Extraction, &e, verbose)),
    }
}

/// Fetch and print a video's transcript
pub async fn print_transcript(
    settings: &Settings,
    url: &str,
    timestamps: bool,
    verbose: bool,
) -> Result<()> {
    let pipeline = LessonsPipeline::from_settings(settings)?;

    let fragments = match pipeline.fetch_fragments(url).await {
        Ok(fragments) => fragments,
        Err(e) => return Err(stage_failure(Stage::Transcript, &e, verbose)),
    };

    if timestamps {
        for fragment in &fragments {
            println!("[{}] {}", format_timestamp(fragment.start), fragment.text);
        }
    } else {
        println!("{}", crate::youtube::join_fragments(&fragments));
    }

    Ok(())
}

/// Handle prompt subcommands
pub fn prompt_command(cmd: PromptCommand) -> Result<()> {
    match cmd {
        PromptCommand::Show => {
            print!("{}", DEFAULT_PROMPT);
        }
        PromptCommand::Check { file } => {
            let template = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read prompt template: {}", file.display()))?;

            let issues = check_template(&template);
            if issues.is_empty() {
                println!("{}: ok", file.display());
                return Ok(());
            }

            for issue in &issues {
                println!("{}: {}", file.display(), issue.message());
            }
            anyhow::bail!("Template has {} issue(s)", issues.len());
        }
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = mask_key(&shown.llm.api_key);
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

// Helper functions

/// Pipeline stage a command failed in.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Transcript,
    Extraction,
}

/// Turn a stage failure into the error `main` reports.
fn stage_failure(stage: Stage, err: &LessonsError, verbose: bool) -> anyhow::Error {
    let mut message = match (stage, err) {
        (_, LessonsError::InvalidUrl(_)) => err.to_string(),
        (Stage::Transcript, _) => "Could not get the transcript.".to_string(),
        (Stage::Extraction, _) => "Could not extract the lessons.".to_string(),
    };

    if let Some(reason) = err.reason().filter(|_| verbose) {
        message.push_str(&format!(" ({})", reason));
    }

    anyhow::anyhow!(message)
}

/// Hide all but the last four characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "********".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("********{}", tail)
}

fn format_timestamp(secs: f64) -> String {
    let total_secs = secs as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
