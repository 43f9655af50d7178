//! Vitalsim CLI - Command-line interface for the synthetic vitals engine
//!
//! Commands:
//! - generate: Emit synthetic daily history for an archetype (batch mode)
//! - advise: Evaluate advisory rules over stored samples read from input
//! - run: Drive the sampling scheduler against an in-memory store
//! - archetypes: Print the archetype registry

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, Utc};
use vitalsim::store::{GoalStore, MetricStore};
use vitalsim::{
    Advisory, AdvisoryEngine, Archetype, DataSource, Goal, MemoryStore, MetricSample,
    SamplingScheduler, SimulationConfig, StoreError, VitalsSimulator, VITALSIM_VERSION,
};

/// Vitalsim - Synthetic health-data engine with rule-based recommendations
#[derive(Parser)]
#[command(name = "vitalsim")]
#[command(author = "IMSIT Health")]
#[command(version = VITALSIM_VERSION)]
#[command(about = "Generate synthetic vitals and evaluate advisories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit synthetic daily history for an archetype (batch mode)
    Generate {
        /// Number of past days to cover, in addition to today
        #[arg(long, default_value = "7")]
        days: u64,

        /// Archetype to simulate
        #[arg(long, value_enum, default_value = "active")]
        archetype: ArchetypeArg,

        /// Source stamped onto every sample
        #[arg(long, value_enum, default_value = "simulation")]
        source: SourceArg,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Evaluate advisory rules over samples read from input
    Advise {
        /// Input file path with NDJSON samples (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Daily steps goal to evaluate against
        #[arg(long)]
        steps_goal: Option<f64>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Drive the sampling scheduler against an in-memory store
    Run {
        /// Archetype to simulate
        #[arg(long, value_enum, default_value = "active")]
        archetype: ArchetypeArg,

        /// Source stamped onto every sample
        #[arg(long, value_enum, default_value = "simulation")]
        source: SourceArg,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Sampling period in seconds (wall clock, for demo runs)
        #[arg(long, default_value = "5")]
        period_secs: u64,

        /// How long to keep the scheduler running, in seconds
        #[arg(long, default_value = "15")]
        duration_secs: u64,

        /// Seed this many days of history before starting the timer
        #[arg(long, default_value = "0")]
        history_days: u64,
    },

    /// Print the archetype registry
    Archetypes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ArchetypeArg {
    Sedentary,
    Active,
    Athlete,
    Recovery,
}

impl From<ArchetypeArg> for Archetype {
    fn from(arg: ArchetypeArg) -> Self {
        match arg {
            ArchetypeArg::Sedentary => Archetype::Sedentary,
            ArchetypeArg::Active => Archetype::Active,
            ArchetypeArg::Athlete => Archetype::Athlete,
            ArchetypeArg::Recovery => Archetype::Recovery,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Simulation,
    Device,
    ImsitWatch,
}

impl From<SourceArg> for DataSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Simulation => DataSource::Simulation,
            SourceArg::Device => DataSource::Device,
            SourceArg::ImsitWatch => DataSource::ImsitWatch,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array
    Json,
    /// Pretty-printed JSON array
    JsonPretty,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), VitalsimCliError> {
    match cli.command {
        Commands::Generate {
            days,
            archetype,
            source,
            seed,
            output,
            output_format,
        } => cmd_generate(days, archetype.into(), source.into(), seed, &output, output_format),

        Commands::Advise {
            input,
            steps_goal,
            output_format,
        } => cmd_advise(&input, steps_goal, output_format).await,

        Commands::Run {
            archetype,
            source,
            seed,
            period_secs,
            duration_secs,
            history_days,
        } => {
            cmd_run(
                archetype.into(),
                source.into(),
                seed,
                period_secs,
                duration_secs,
                history_days,
            )
            .await
        }

        Commands::Archetypes { json } => cmd_archetypes(json),
    }
}

fn cmd_generate(
    days: u64,
    archetype: Archetype,
    source: DataSource,
    seed: Option<u64>,
    output: &PathBuf,
    output_format: OutputFormat,
) -> Result<(), VitalsimCliError> {
    let mut simulator = match seed {
        Some(seed) => VitalsSimulator::with_seed(archetype, seed),
        None => VitalsSimulator::new(archetype),
    };

    let today = Utc::now().date_naive();
    let mut samples: Vec<MetricSample> = Vec::new();

    for offset in (0..=days).rev() {
        let date = today
            .checked_sub_days(Days::new(offset))
            .ok_or(VitalsimCliError::DateOutOfRange)?
            .and_hms_opt(12, 0, 0)
            .ok_or(VitalsimCliError::DateOutOfRange)?
            .and_utc();
        samples.extend(simulator.generate_daily(date, source));
    }

    let output_data = format_output(&samples, output_format)?;
    write_output(output, &output_data)
}

async fn cmd_advise(
    input: &PathBuf,
    steps_goal: Option<f64>,
    output_format: OutputFormat,
) -> Result<(), VitalsimCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let store = Arc::new(MemoryStore::new());
    let metrics: &dyn MetricStore = store.as_ref();

    let mut count = 0usize;
    for line in input_data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let sample: MetricSample = serde_json::from_str(line)?;
        metrics.insert(sample).await?;
        count += 1;
    }

    if count == 0 {
        return Err(VitalsimCliError::NoSamples);
    }

    if let Some(target) = steps_goal {
        let goals: &dyn GoalStore = store.as_ref();
        goals
            .insert(Goal {
                metric_type: vitalsim::MetricType::Steps,
                target_value: target,
                current_value: 0.0,
                deadline: None,
                achieved: false,
            })
            .await?;
    }

    let engine = AdvisoryEngine::new(
        Arc::clone(&store) as Arc<dyn MetricStore>,
        Arc::clone(&store) as Arc<dyn GoalStore>,
    );
    let advisories: Vec<Advisory> = engine.generate().await?;

    println!("{}", format_output(&advisories, output_format)?);
    Ok(())
}

async fn cmd_run(
    archetype: Archetype,
    source: DataSource,
    seed: Option<u64>,
    period_secs: u64,
    duration_secs: u64,
    history_days: u64,
) -> Result<(), VitalsimCliError> {
    let store = Arc::new(MemoryStore::new());
    let config = SimulationConfig {
        archetype,
        data_source: source,
        ..SimulationConfig::default()
    };

    let mut scheduler = match seed {
        Some(seed) => {
            SamplingScheduler::with_seed(config, seed, Arc::clone(&store) as Arc<dyn MetricStore>)
        }
        None => SamplingScheduler::new(config, Arc::clone(&store) as Arc<dyn MetricStore>),
    };

    if history_days > 0 {
        scheduler.seed_history(history_days).await?;
    }

    scheduler.start_with_period(Duration::from_secs(period_secs)).await;
    tokio::time::sleep(Duration::from_secs(duration_secs)).await;
    scheduler.stop().await;

    let samples = MetricStore::query(store.as_ref(), None, None, None).await?;
    eprintln!("collected {} samples", samples.len());
    for stored in samples.iter().rev() {
        println!("{}", serde_json::to_string(stored)?);
    }
    Ok(())
}

fn cmd_archetypes(json: bool) -> Result<(), VitalsimCliError> {
    if json {
        let registry: Vec<serde_json::Value> = Archetype::ALL
            .iter()
            .map(|a| {
                serde_json::json!({
                    "archetype": a.as_str(),
                    "profile": a.profile(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }

    println!("Archetype Registry");
    println!("==================");
    for archetype in Archetype::ALL {
        let profile = archetype.profile();
        println!("\n{}", archetype.as_str());
        println!(
            "  heart_rate: {} bpm [{}, {}]",
            profile.heart_rate.base, profile.heart_rate.min, profile.heart_rate.max
        );
        println!(
            "  steps:      {} [{}, {}]",
            profile.steps.base, profile.steps.min, profile.steps.max
        );
        println!(
            "  weight:     {} kg [{}, {}]",
            profile.weight.base, profile.weight.min, profile.weight.max
        );
        println!(
            "  sleep:      {} h [{}, {}]",
            profile.sleep.base, profile.sleep.min, profile.sleep.max
        );
        println!(
            "  water:      {} ml [{}, {}]",
            profile.water.base, profile.water.min, profile.water.max
        );
        println!(
            "  calories:   {} kcal [{}, {}]",
            profile.calories.base, profile.calories.min, profile.calories.max
        );
    }
    Ok(())
}

fn format_output<T: serde::Serialize>(
    records: &[T],
    format: OutputFormat,
) -> Result<String, VitalsimCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines = Vec::with_capacity(records.len());
            for record in records {
                lines.push(serde_json::to_string(record)?);
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(records)?),
    }
}

fn write_output(output: &PathBuf, data: &str) -> Result<(), VitalsimCliError> {
    if output.to_string_lossy() == "-" {
        println!("{}", data);
        Ok(())
    } else {
        fs::write(output, data)?;
        Ok(())
    }
}

enum VitalsimCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Store(StoreError),
    NoSamples,
    DateOutOfRange,
}

impl From<io::Error> for VitalsimCliError {
    fn from(e: io::Error) -> Self {
        VitalsimCliError::Io(e)
    }
}

impl From<serde_json::Error> for VitalsimCliError {
    fn from(e: serde_json::Error) -> Self {
        VitalsimCliError::Json(e)
    }
}

impl From<StoreError> for VitalsimCliError {
    fn from(e: StoreError) -> Self {
        VitalsimCliError::Store(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<VitalsimCliError> for CliError {
    fn from(e: VitalsimCliError) -> Self {
        match e {
            VitalsimCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            VitalsimCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure input is one JSON sample per line".to_string()),
            },
            VitalsimCliError::Store(e) => CliError {
                code: "STORE_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            VitalsimCliError::NoSamples => CliError {
                code: "NO_SAMPLES".to_string(),
                message: "Input contained no samples".to_string(),
                hint: Some("Feed NDJSON produced by `vitalsim generate`".to_string()),
            },
            VitalsimCliError::DateOutOfRange => CliError {
                code: "DATE_OUT_OF_RANGE".to_string(),
                message: "Requested history window predates the calendar".to_string(),
                hint: Some("Use a smaller --days value".to_string()),
            },
        }
    }
}
