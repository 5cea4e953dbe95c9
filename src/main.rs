//! Sleepcheck: sleep apnea risk screening CLI
//!
//! `assess` scores a set of vitals, `chat` answers sleep apnea questions.
//! Command output goes to stdout as JSON; logs never do.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sleepcheck::adapters::sanitize::SanitizingMakeWriter;
use sleepcheck::adapters::{AdviceTable, ChaChaChoice, NoAdviceModel, SnoreSeverityAdapter};
use sleepcheck::config::{AppConfig, LogMode};
use sleepcheck::domain::{ChatQuery, Gender, VitalsInput};
use sleepcheck::ports::AdviceModel;
use sleepcheck::{AssessmentService, ChatService};

#[derive(Parser, Debug)]
#[command(name = "sleepcheck", version, about = "Sleep apnea risk screening and Q&A")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate sleep apnea risk from vital signs
    Assess(AssessArgs),
    /// Answer sleep apnea questions (reads stdin when no message is given)
    Chat {
        message: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// Age in years
    #[arg(long)]
    age: f64,
    /// male or female
    #[arg(long)]
    gender: Gender,
    /// Weight in kilograms
    #[arg(long)]
    weight_kg: f64,
    /// Height in centimetres
    #[arg(long)]
    height_cm: f64,
    /// Oxygen saturation (SpO2) in percent
    #[arg(long)]
    oxygen: f64,
    /// Pulse in beats per minute
    #[arg(long)]
    pulse: f64,
    /// Systolic blood pressure in mmHg
    #[arg(long)]
    bp_sys: f64,
    /// Diastolic blood pressure in mmHg
    #[arg(long)]
    bp_dia: f64,
    /// Snoring severity from an external audio classifier
    #[arg(long)]
    snore_score: Option<f64>,
    /// Advice table JSON (overrides SLEEPCHECK_ADVICE_TABLE)
    #[arg(long)]
    advice_table: Option<PathBuf>,
    /// Fail when no personalized advice is available
    #[arg(long)]
    require_advice: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (config, warnings) = AppConfig::from_lookup_with_warnings(|key| std::env::var(key).ok());

    let (writer, _guard) = match config.log_mode {
        LogMode::File => {
            if let Some(parent) = config.log_file.parent() {
                // Best-effort: a missing directory surfaces as the open error below.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .with_context(|| format!("Cannot open log file {}", config.log_file.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    for warning in &warnings {
        tracing::warn!("Ignoring configuration value: {warning}");
    }

    match cli.command {
        Command::Assess(args) => run_assess(args, &config),
        Command::Chat { message } => run_chat(&message, &config),
    }
}

fn run_assess(args: AssessArgs, config: &AppConfig) -> Result<()> {
    let vitals = VitalsInput::from_measurements(
        args.age,
        args.gender,
        args.weight_kg,
        args.height_cm,
        args.oxygen,
        args.pulse,
        args.bp_sys,
        args.bp_dia,
    );
    let snore = SnoreSeverityAdapter::resolve(args.snore_score);

    let model: Box<dyn AdviceModel> = match args.advice_table.as_ref().or(config.advice_table.as_ref()) {
        Some(path) => Box::new(
            AdviceTable::load(path).with_context(|| format!("Cannot load advice table {}", path.display()))?,
        ),
        None => Box::new(NoAdviceModel),
    };

    let report = AssessmentService::new(model).assess_checked(&vitals, snore)?;
    if args.require_advice {
        report.require_advice()?;
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_chat(message: &[String], config: &AppConfig) -> Result<()> {
    let choice = match config.chat_seed {
        Some(seed) => ChaChaChoice::seeded(seed),
        None => ChaChaChoice::from_entropy(),
    };
    let service = ChatService::new(choice);

    if !message.is_empty() {
        let reply = service.respond_to_query(&ChatQuery::new(message.join(" ")));
        println!("{}", serde_json::to_string(&reply)?);
        return Ok(());
    }

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = service.respond_to_query(&ChatQuery::new(line));
        println!("{}", serde_json::to_string(&reply)?);
    }
    Ok(())
}
