//! persona-quiz - cyber persona quiz for the terminal
//!
//! Asks a short multiple-choice quiz, resolves the respondent's persona,
//! posts the response to the results sheet webhook and keeps a local CSV log
//! whenever that post does not succeed.

mod cli;
mod config;
mod error;
mod logging;
mod quiz;
mod render;
mod session;
mod submission;
mod version;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Cli, Commands, SubmitOptions};
use crate::config::{CliOverrides, QuizConfig};
use crate::error::Result;
use crate::quiz::{parse_answers, Letter, Quiz};
use crate::session::Session;
use crate::submission::{ResponseLog, SubmissionRecord, SubmissionSink};

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => {
            version::print_version();
            Ok(())
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            handle_config_command(subcommand)
        }
        Commands::Questions { variant, config } => {
            logging::init_simple(tracing::Level::WARN)?;
            let variant = match variant {
                Some(v) => v,
                None => QuizConfig::load(config.as_deref())?.quiz.variant,
            };
            let stdout = io::stdout();
            render::question_sheet(&mut stdout.lock(), Quiz::for_variant(variant))?;
            Ok(())
        }
        Commands::Export {
            output,
            config,
            responses_file,
        } => {
            logging::init_simple(log_level(cli.verbose, cli.quiet))?;
            let overrides = CliOverrides {
                responses_file,
                ..CliOverrides::default()
            };
            let cfg = QuizConfig::load_for_storage(config.as_deref(), &overrides)?;
            export_responses(&ResponseLog::new(cfg.responses_file()), output)
        }
        Commands::Take { options } => {
            let (cfg, _log_guards) = load_for_submission(&options, cli.verbose, cli.quiet)?;
            let quiz = Quiz::for_variant(cfg.quiz.variant);

            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut session = Session::new(quiz, stdin.lock(), stdout.lock());
            let answers = session.run()?;

            record_submission(
                session.output(),
                &cfg,
                quiz,
                answers.name,
                answers.department,
                answers.letters,
            )
        }
        Commands::Submit {
            answers,
            name,
            department,
            options,
        } => {
            let (cfg, _log_guards) = load_for_submission(&options, cli.verbose, cli.quiet)?;
            let quiz = Quiz::for_variant(cfg.quiz.variant);
            let letters = parse_answers(&answers)?;

            let stdout = io::stdout();
            record_submission(&mut stdout.lock(), &cfg, quiz, name, department, letters)
        }
    }
}

fn log_level(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Load configuration with CLI overrides and start full logging.
/// The guards must be kept alive until the command finishes.
fn load_for_submission(
    options: &SubmitOptions,
    verbose: u8,
    quiet: bool,
) -> Result<(QuizConfig, logging::LogGuards)> {
    let cfg = QuizConfig::load_with(options.config.as_deref(), &options.overrides())?;
    let guards = logging::init_logging(&cfg.logging, verbose, quiet)?;

    let build = version::build_info();
    debug!(
        version = %build.full_version(),
        variant = %cfg.quiz.variant,
        webhook_enabled = cfg.webhook.enabled,
        "Configuration loaded"
    );

    Ok((cfg, guards))
}

/// Score, show the persona, then deliver or save the response
fn record_submission<W: Write>(
    out: &mut W,
    cfg: &QuizConfig,
    quiz: &'static Quiz,
    name: Option<String>,
    department: Option<String>,
    answers: Vec<Letter>,
) -> Result<()> {
    let scored = quiz.score(&answers)?;
    info!(
        tally = %scored.tally,
        letter = %scored.letter,
        persona = %scored.persona.title,
        "Response scored"
    );

    render::result(out, quiz, name.as_deref(), &scored)?;

    let record = SubmissionRecord::new(name, department, answers, scored.persona.title);
    let sink = SubmissionSink::from_config(cfg)?;

    match sink.submit_blocking(&record) {
        Ok(outcome) => {
            render::outcome(out, quiz, &outcome)?;
            render::footer(out)?;
            out.flush()?;
            Ok(())
        }
        Err(e) => {
            render::not_saved(out)?;
            render::footer(out)?;
            out.flush()?;
            Err(e)
        }
    }
}

/// Emit the raw local log to stdout or to `output`
fn export_responses(log: &ResponseLog, output: Option<PathBuf>) -> Result<()> {
    let Some(contents) = log.read_raw()? else {
        println!("No local responses yet.");
        return Ok(());
    };

    match output {
        Some(path) => {
            let rows = log.count_records(&contents)?;
            fs::write(&path, &contents)?;
            info!(path = %path.display(), bytes = contents.len(), rows, "Responses exported");
            println!(
                "Exported {} {} from {} to {}",
                rows,
                if rows == 1 { "response" } else { "responses" },
                log.path().display(),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(&contents)?;
            out.flush()?;
        }
    }

    Ok(())
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: cli::ConfigSubcommand) -> Result<()> {
    use cli::ConfigSubcommand;

    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = QuizConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration written to {}", written.display());
        }
        ConfigSubcommand::Validate { config } => {
            QuizConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
