//! CLI argument parsing using clap v4

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CliOverrides;
use crate::quiz::QuizVariant;

/// Cyber persona quiz
///
/// Asks four short questions, tells you which cyber persona fits you best, and
/// records your answers to the results sheet (or a local CSV file when the
/// sheet cannot be reached).
#[derive(Parser, Debug)]
#[command(name = "persona-quiz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Take the quiz interactively
    Take {
        #[command(flatten)]
        options: SubmitOptions,
    },

    /// Score and record answers given on the command line
    Submit {
        /// One letter per question, e.g. "A,B,C,D"
        #[arg(short, long)]
        answers: String,

        /// Participant name (optional)
        #[arg(long)]
        name: Option<String>,

        /// Participant department (optional)
        #[arg(long)]
        department: Option<String>,

        #[command(flatten)]
        options: SubmitOptions,
    },

    /// Export every locally saved response (admin)
    Export {
        /// Write the log to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long, env = "PERSONA_QUIZ_CONFIG")]
        config: Option<String>,

        /// Local response log to read
        #[arg(long)]
        responses_file: Option<String>,
    },

    /// Print the question sheet of a quiz variant
    Questions {
        /// Quiz variant: leadership or awareness
        #[arg(long)]
        variant: Option<QuizVariant>,

        /// Path to configuration file
        #[arg(short, long, env = "PERSONA_QUIZ_CONFIG")]
        config: Option<String>,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Options shared by the commands that record a submission
#[derive(Args, Debug, Clone, Default)]
pub struct SubmitOptions {
    /// Path to configuration file
    #[arg(short, long, env = "PERSONA_QUIZ_CONFIG")]
    pub config: Option<String>,

    /// Quiz variant: leadership or awareness
    #[arg(long)]
    pub variant: Option<QuizVariant>,

    /// Webhook endpoint override
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Local response log used when the webhook fails
    #[arg(long)]
    pub responses_file: Option<String>,

    /// Skip the webhook and save to the local log only
    #[arg(long)]
    pub offline: bool,
}

impl SubmitOptions {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            variant: self.variant,
            webhook_url: self.webhook_url.clone(),
            responses_file: self.responses_file.clone(),
            offline: self.offline,
        }
    }
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the effective configuration
    Show {
        /// Path to configuration file
        #[arg(short, long, env = "PERSONA_QUIZ_CONFIG")]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long, env = "PERSONA_QUIZ_CONFIG")]
        config: Option<String>,
    },
}
