//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// yt-lessons - Turn YouTube video transcripts into structured lessons
#[derive(Parser, Debug)]
#[command(name = "yt-lessons")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract lessons from a video and print them as markdown
    Extract {
        /// YouTube video URL (must contain v=<id>)
        url: String,

        /// Gemini API key (overrides config and environment)
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Prompt template file to use instead of the configured one
        #[arg(short, long)]
        prompt_file: Option<PathBuf>,

        /// Also print the fetched transcript before the lessons
        #[arg(long)]
        show_transcript: bool,
    },

    /// Fetch and print a video's transcript
    Transcript {
        /// YouTube video URL (must contain v=<id>)
        url: String,

        /// Print one timestamped line per caption instead of joined text
        #[arg(short, long)]
        timestamps: bool,
    },

    /// Prompt template helpers
    #[command(subcommand)]
    Prompt(PromptCommand),

    /// Launch the interactive TUI
    Tui,

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum PromptCommand {
    /// Print the built-in prompt template
    Show,

    /// Check a template file for the {transcript} and <markdown> conventions
    Check {
        /// Template file to check
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
