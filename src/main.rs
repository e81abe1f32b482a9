use clap::Parser;
use log::{error, info};
use std::io;
use std::process::ExitCode;

use recipe_roulette::{
    DifficultyFilter, DifficultyPolicy, LookupFailurePolicy, RecipeRoulette, RefreshOutcome,
    RouletteConfig, RouletteError, TextPresenter, TotalFailurePolicy,
};

/// Pick random recipes by ingredient and difficulty
#[derive(Debug, Parser)]
#[command(name = "recipe-roulette", version, about)]
struct Cli {
    /// Ingredient to search for (repeatable). Overrides the configured list.
    #[arg(short, long = "ingredient")]
    ingredients: Vec<String>,

    /// Difficulty filter: all, easy, medium or hard
    #[arg(short, long, default_value = "all")]
    difficulty: DifficultyFilter,

    /// Number of recipes to pick
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty policy: by_instruction_length or by_ingredient_count
    #[arg(long)]
    policy: Option<DifficultyPolicy>,

    /// Fail the whole refresh when any lookup fails
    #[arg(long)]
    fail_fast: bool,

    /// Report fetch failures instead of using the built-in recipes
    #[arg(long)]
    no_fallback: bool,

    /// Truncate instructions after this many characters
    #[arg(long)]
    max_instruction_chars: Option<usize>,
}

async fn run(cli: Cli) -> Result<(), RouletteError> {
    let config = RouletteConfig::load()?;
    let max_instruction_chars = cli
        .max_instruction_chars
        .or(config.display.max_instruction_chars);

    let mut builder = RecipeRoulette::builder().with_config(config);
    if !cli.ingredients.is_empty() {
        builder = builder.ingredients(cli.ingredients);
    }
    if let Some(seed) = cli.seed {
        builder = builder.seed(seed);
    }
    if let Some(policy) = cli.policy {
        builder = builder.difficulty_policy(policy);
    }
    if cli.fail_fast {
        builder = builder.lookup_failure(LookupFailurePolicy::FailFast);
    }
    if cli.no_fallback {
        builder = builder.total_failure(TotalFailurePolicy::Error);
    }
    let roulette = builder.build()?;

    match roulette.refresh().await? {
        RefreshOutcome::Fetched(count) => info!("Loaded {} recipes", count),
        RefreshOutcome::BuiltIn { count, reason } => {
            eprintln!("Could not fetch recipes ({}), using {} built-in ones", reason, count);
        }
    }

    roulette.set_filter(cli.difficulty);
    let mut presenter =
        TextPresenter::new(io::stdout().lock()).with_max_instruction_chars(max_instruction_chars);
    for _ in 0..cli.count {
        roulette.show_one(&mut presenter)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
