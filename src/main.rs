//! yt-lessons - Turn YouTube video transcripts into structured lessons
//!
//! Entry point for the yt-lessons CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use yt_lessons::cli::{Cli, Commands};
use yt_lessons::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration only for runtime commands.
    let settings = match &cli.command {
        Commands::Completions { .. } | Commands::Prompt(_) => Settings::default(),
        _ => Settings::load()?,
    };

    // Log lines would draw over the alternate screen, so the TUI stays quiet
    // unless RUST_LOG asks otherwise.
    let default_filter = match (&cli.command, cli.verbose) {
        (Commands::Tui, _) => "off".to_string(),
        (_, true) => "debug".to_string(),
        (_, false) => settings.general.log_level.clone(),
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Extract {
            url,
            api_key,
            prompt_file,
            show_transcript,
        } => {
            yt_lessons::cli::commands::extract_lessons(
                &settings,
                &url,
                api_key,
                prompt_file.as_deref(),
                show_transcript,
                cli.verbose,
            )
            .await?;
        }
        Commands::Transcript { url, timestamps } => {
            yt_lessons::cli::commands::print_transcript(&settings, &url, timestamps, cli.verbose)
                .await?;
        }
        Commands::Prompt(prompt_cmd) => {
            yt_lessons::cli::commands::prompt_command(prompt_cmd)?;
        }
        Commands::Tui => {
            yt_lessons::tui::run(&settings).await?;
        }
        Commands::Config(config_cmd) => {
            yt_lessons::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { shell } => {
            yt_lessons::cli::completions::print(shell);
        }
    }

    Ok(())
}
