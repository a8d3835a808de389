//! Nutri CLI - Command-line interface for the nutrition engine
//!
//! Commands:
//! - targets: Calculate daily and per-meal targets from a profile
//! - normalize: Convert a stored target to the canonical shape
//! - score: Score food totals against a target
//! - comments: Generate meal-relative advisory comments
//! - process: Run the full pipeline on a raw recognition result
//! - tables: Print the built-in lookup tables

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use nutrition_engine::comments::{fallback_meal_fraction, generate_all_comments};
use nutrition_engine::normalizer::TargetNormalizer;
use nutrition_engine::pipeline::{parse_profile, NutritionProcessor};
use nutrition_engine::score::{calculate_combined_score, score_food, score_interpretation};
use nutrition_engine::targets::meal_split_for_goal;
use nutrition_engine::types::{
    parse_date, ActivityLevel, DietType, FoodNutritionTotals, Goal, MealType, Nutrient, RawFood,
};
use nutrition_engine::{ComputeError, ENGINE_VERSION, PRODUCER_NAME};

/// Nutri - Deterministic compute engine for nutrition targets and food scoring
#[derive(Parser)]
#[command(name = "nutri")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Compute nutrition targets, food scores and advisory comments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate daily and per-meal targets from a profile
    Targets {
        /// Profile JSON file (use - for stdin)
        #[arg(short, long)]
        profile: PathBuf,

        /// Reference date for age and target date (YYYY-MM-DD, defaults to today UTC)
        #[arg(long)]
        today: Option<String>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Convert a stored target (canonical or legacy flat) to the canonical shape
    Normalize {
        /// Target JSON file (use - for stdin)
        #[arg(short, long)]
        target: PathBuf,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Score food totals against a target
    Score {
        /// Food totals JSON file; an array scores the combined meal (use - for stdin)
        #[arg(short, long)]
        food: PathBuf,

        /// Target JSON file; defaults are used when omitted
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Generate advisory comments for food totals eaten in a meal
    Comments {
        /// Food totals JSON file (use - for stdin)
        #[arg(short, long)]
        food: PathBuf,

        /// Target JSON file; defaults are used when omitted
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Meal type (breakfast, lunch, dinner, snack, default)
        #[arg(short, long, default_value = "default")]
        meal: String,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Run the full pipeline on a raw recognition result
    Process {
        /// Raw food JSON file (use - for stdin)
        #[arg(short, long)]
        food: PathBuf,

        /// Target JSON file; defaults are used when omitted
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Meal type (breakfast, lunch, dinner, snack, default)
        #[arg(short, long, default_value = "default")]
        meal: String,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Print the built-in lookup tables
    Tables,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Log filter from `NUTRI_LOG`, then `RUST_LOG`, defaulting to `warn`
fn init_tracing() {
    let log_env = std::env::var("NUTRI_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_new(&log_env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
}

fn run(cli: Cli) -> Result<(), NutriCliError> {
    match cli.command {
        Commands::Targets {
            profile,
            today,
            output_format,
        } => cmd_targets(&profile, today.as_deref(), &output_format),

        Commands::Normalize {
            target,
            output_format,
        } => {
            let raw: serde_json::Value = serde_json::from_str(&read_input(&target)?)?;
            print_output(&TargetNormalizer::normalize(&raw), &output_format)
        }

        Commands::Score {
            food,
            target,
            output_format,
        } => cmd_score(&food, target.as_deref(), &output_format),

        Commands::Comments {
            food,
            target,
            meal,
            output_format,
        } => {
            let totals: FoodNutritionTotals = serde_json::from_str(&read_input(&food)?)?;
            let target = read_target(target.as_deref())?;
            let comments = generate_all_comments(&totals, &target, MealType::from_token(&meal));
            print_output(&comments, &output_format)
        }

        Commands::Process {
            food,
            target,
            meal,
            output_format,
        } => {
            let raw_food: RawFood = serde_json::from_str(&read_input(&food)?)?;
            let raw_target = match target {
                Some(path) => Some(serde_json::from_str::<serde_json::Value>(&read_input(&path)?)?),
                None => None,
            };
            let processed = NutritionProcessor::new().process(
                &raw_food,
                raw_target.as_ref(),
                MealType::from_token(&meal),
            );
            print_output(&processed, &output_format)
        }

        Commands::Tables => print_output(&lookup_tables(), &OutputFormat::JsonPretty),
    }
}

fn cmd_targets(
    profile: &Path,
    today: Option<&str>,
    output_format: &OutputFormat,
) -> Result<(), NutriCliError> {
    let processor = match today {
        Some(raw) => NutritionProcessor::with_reference_date(parse_date(raw)?),
        None => NutritionProcessor::new(),
    };

    let profile = parse_profile(&read_input(profile)?)?;
    tracing::debug!(today = %processor.reference_date(), "Calculating targets");

    print_output(&processor.targets_for(&profile), output_format)
}

fn cmd_score(
    food: &Path,
    target: Option<&Path>,
    output_format: &OutputFormat,
) -> Result<(), NutriCliError> {
    let input: serde_json::Value = serde_json::from_str(&read_input(food)?)?;
    let target = read_target(target)?;

    if input.is_array() {
        let items: Vec<FoodNutritionTotals> = serde_json::from_value(input)?;
        let score = calculate_combined_score(&items, &target);
        let report = CombinedScoreReport {
            items: items.len(),
            score,
            interpretation: score_interpretation(score),
        };
        print_output(&report, output_format)
    } else {
        let totals: FoodNutritionTotals = serde_json::from_value(input)?;
        print_output(&score_food(&totals, &target), output_format)
    }
}

// Helper functions

fn read_input(path: &Path) -> Result<String, NutriCliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn read_target(
    path: Option<&Path>,
) -> Result<nutrition_engine::types::NutritionTarget, NutriCliError> {
    let raw = match path {
        Some(path) => Some(serde_json::from_str::<serde_json::Value>(&read_input(path)?)?),
        None => None,
    };
    Ok(TargetNormalizer::normalize_optional(raw.as_ref()))
}

fn print_output<T: Serialize>(value: &T, format: &OutputFormat) -> Result<(), NutriCliError> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
    };
    println!("{}", output);
    Ok(())
}

fn lookup_tables() -> TablesReport {
    TablesReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        activity_multipliers: ActivityLevel::ALL
            .iter()
            .map(|level| (level.as_str(), level.multiplier()))
            .collect(),
        diet_macro_ratios: DietType::ALL
            .iter()
            .map(|diet| {
                let ratio = diet.macro_ratio();
                (diet.as_str(), [ratio.carbs_pct, ratio.protein_pct, ratio.fat_pct])
            })
            .collect(),
        meal_distributions: [Goal::LoseWeight, Goal::MaintainWeight, Goal::GainWeight]
            .iter()
            .map(|goal| {
                let split = meal_split_for_goal(*goal);
                (goal.as_str(), [split.breakfast, split.lunch, split.dinner, split.snack])
            })
            .collect(),
        comment_fallback_fractions: Nutrient::ALL
            .iter()
            .map(|nutrient| {
                let fractions = MealType::MEALS
                    .iter()
                    .map(|meal| (meal.as_str(), fallback_meal_fraction(*nutrient, *meal)))
                    .collect();
                (nutrient.as_str(), fractions)
            })
            .collect(),
    }
}

// Error types

#[derive(Debug)]
enum NutriCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
}

impl From<io::Error> for NutriCliError {
    fn from(e: io::Error) -> Self {
        NutriCliError::Io(e)
    }
}

impl From<ComputeError> for NutriCliError {
    fn from(e: ComputeError) -> Self {
        NutriCliError::Compute(e)
    }
}

impl From<serde_json::Error> for NutriCliError {
    fn from(e: serde_json::Error) -> Self {
        NutriCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<NutriCliError> for CliError {
    fn from(e: NutriCliError) -> Self {
        match e {
            NutriCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            NutriCliError::Compute(ComputeError::InvalidProfile(msg)) => CliError {
                code: "INVALID_PROFILE".to_string(),
                message: msg,
                hint: Some(
                    "Profiles need gender, birthday, height, currentWeight, targetWeight, targetDate and goal"
                        .to_string(),
                ),
            },
            NutriCliError::Compute(ComputeError::DateParseError(msg)) => CliError {
                code: "DATE_ERROR".to_string(),
                message: msg,
                hint: Some("Use YYYY-MM-DD dates".to_string()),
            },
            NutriCliError::Compute(e) => CliError {
                code: "COMPUTE_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            NutriCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
        }
    }
}

// Report types

#[derive(Serialize)]
struct CombinedScoreReport {
    items: usize,
    score: u8,
    interpretation: nutrition_engine::types::ScoreInterpretation,
}

#[derive(Serialize)]
struct TablesReport {
    producer: String,
    version: String,
    activity_multipliers: Vec<(&'static str, f64)>,
    /// carbs, protein, fat percentages
    diet_macro_ratios: Vec<(&'static str, [f64; 3])>,
    /// breakfast, lunch, dinner, snack fractions
    meal_distributions: Vec<(&'static str, [f64; 4])>,
    comment_fallback_fractions: Vec<(&'static str, Vec<(&'static str, f64)>)>,
}
