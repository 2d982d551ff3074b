//! Fill a JSON form definition in the terminal and print the stored answers.

use std::{fs::File, path::PathBuf, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use formstep::{
    FormDefinition, FormFiller, ShapePolicy, StepperConfig, SubmissionError, Validator,
    check_submission,
};
use formstep_wizard_ratatui::{RatatuiFiller, WizardError};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "formstep-wizard", version, about)]
struct Args {
    /// Path to a JSON form definition.
    form: PathBuf,

    /// Reject answers whose shape does not match the field type.
    #[arg(long)]
    strict: bool,

    /// Step transition window in milliseconds (0 disables it).
    #[arg(long, default_value_t = formstep::stepper::DEFAULT_TRANSITION_MS)]
    transition_ms: u64,

    /// Write logs here; the terminal belongs to the wizard.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("formstep=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_ref())?;

    let form = FormDefinition::from_path(&args.form)?;
    info!(title = %form.title, questions = form.len(), "loaded form");

    let policy = if args.strict {
        ShapePolicy::Strict
    } else {
        ShapePolicy::Permissive
    };
    let validator = Validator::new(policy);
    info!(policy = ?validator.policy(), transition_ms = args.transition_ms, "starting wizard");
    let filler = RatatuiFiller::new()
        .with_config(StepperConfig {
            transition_ms: args.transition_ms,
        })
        .with_validator(validator);

    let answers = match filler.fill(&form) {
        Ok(answers) => answers,
        Err(WizardError::Cancelled) => {
            eprintln!("Cancelled.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    match check_submission(&form, &answers, &validator) {
        Ok(stored) => {
            println!("{}", serde_json::to_string_pretty(&stored)?);
            Ok(())
        }
        Err(SubmissionError::Invalid { errors }) => {
            for (id, message) in &errors {
                eprintln!("{id}: {message}");
            }
            anyhow::bail!("{} question(s) failed validation", errors.len())
        }
        Err(err) => Err(err.into()),
    }
}
