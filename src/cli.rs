use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::error;

use crate::config::Config;
use crate::data::generate::{generate_assets, write_assets_csv, GeneratorConfig};
use crate::data::loader::load_assets;
use crate::data::validate::validate_assets;
use crate::data::Asset;
use crate::logging::init_logging;
use crate::menu;
use crate::optimizer::{compare, AlgorithmChoice};
use crate::report::{
    render_comparison_table, render_json, render_run_summary, result_path, write_selection,
};

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Pick the most profitable set of assets that fits a budget"
)]
pub struct Cli {
    /// TOML config file (defaults to ./folio.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log filter, e.g. `info` or `folio=debug`. RUST_LOG wins when set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one or both selectors on a CSV file and write result files.
    Run(RunArgs),
    /// Check a CSV file for dropped rows, duplicate ids and size limits.
    Validate(ValidateArgs),
    /// Write a random asset file.
    Generate(GenerateArgs),
    /// Interactive menu over the CSV files of the data directory.
    Menu(MenuArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgoArg {
    All,
    #[value(alias = "brute")]
    Exhaustive,
    #[value(alias = "optimized")]
    Greedy,
}

impl From<AlgoArg> for AlgorithmChoice {
    fn from(arg: AlgoArg) -> Self {
        match arg {
            AlgoArg::All => Self::Both,
            AlgoArg::Exhaustive => Self::Exhaustive,
            AlgoArg::Greedy => Self::Greedy,
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    pub input: PathBuf,
    #[arg(long, allow_negative_numbers = true)]
    pub budget: Option<f64>,
    #[arg(long, value_enum, default_value_t = AlgoArg::All)]
    pub algo: AlgoArg,
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
    /// Print the comparison report as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    pub input: PathBuf,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    pub output: PathBuf,
    #[arg(long, default_value_t = 20)]
    pub count: usize,
    #[arg(long, default_value_t = 1000.0)]
    pub max_cost: f64,
    #[arg(long, default_value_t = 20.0)]
    pub max_profit: f64,
    /// Seed for reproducible files; derived from the clock when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct MenuArgs {
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Parse `args` (including the program name) and run the command.
/// Returns the process exit code: 0 success, 1 failure, 2 usage error.
pub fn run_with_args(args: &[String]) -> i32 {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return 1;
        }
    };
    init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));

    match cli.command {
        Command::Run(args) => handle_run(&config, args),
        Command::Validate(args) => handle_validate(&config, args),
        Command::Generate(args) => handle_generate(args),
        Command::Menu(args) => {
            let mut config = config;
            if let Some(data_dir) = args.data_dir {
                config.data_dir = data_dir;
            }
            menu::run_menu(&config)
        }
    }
}

/// What a single selection session needs besides the assets themselves.
#[derive(Debug, Clone)]
pub(crate) struct Session<'a> {
    pub input: &'a Path,
    pub budget: f64,
    pub choice: AlgorithmChoice,
    pub output_dir: &'a Path,
    pub max_exhaustive_assets: usize,
    pub json: bool,
}

fn handle_run(config: &Config, args: RunArgs) -> i32 {
    let load = match load_assets(&args.input) {
        Ok(load) => load,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    if !args.json {
        println!(
            "{} assets loaded from {} ({} rows dropped)",
            load.assets.len(),
            args.input.display(),
            load.dropped.len()
        );
    }

    let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir.clone());
    let session = Session {
        input: &args.input,
        budget: args.budget.unwrap_or(config.budget),
        choice: args.algo.into(),
        output_dir: &output_dir,
        max_exhaustive_assets: config.max_exhaustive_assets,
        json: args.json,
    };
    run_session(&session, &load.assets)
}

/// Run the comparison driver, write one result file per finished selector and
/// print summaries. Shared by `run` and the interactive menu.
pub(crate) fn run_session(session: &Session<'_>, assets: &[Asset]) -> i32 {
    let report = match compare(
        assets,
        session.budget,
        session.choice,
        session.max_exhaustive_assets,
    ) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("selection failed: {err}");
            return 1;
        }
    };

    let mut exit_code = 0;
    for run in report.runs.values() {
        let path = result_path(session.output_dir, run.algorithm, session.input);
        if let Err(err) = write_selection(&path, &run.result) {
            error!(error = %err, "could not save result");
            eprintln!("{err}");
            exit_code = 1;
        } else if !session.json {
            print!("\n{}", render_run_summary(run));
            println!("  Results saved to {}", path.display());
        }
    }

    if session.json {
        match render_json(&report) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("{err}");
                return 1;
            }
        }
    } else {
        for (algorithm, reason) in &report.skipped {
            eprintln!("{algorithm} skipped: {reason}");
        }
        if report.comparison.is_some() {
            print!("\n{}", render_comparison_table(&report));
        }
    }

    if report.runs.is_empty() {
        return 1;
    }
    exit_code
}

fn handle_validate(config: &Config, args: ValidateArgs) -> i32 {
    let load = match load_assets(&args.input) {
        Ok(load) => load,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    let report = validate_assets(&load, config.max_exhaustive_assets);

    if report.has_errors() {
        eprintln!(
            "validation failed: {} issue(s)",
            report.diagnostics.len()
        );
        for diagnostic in &report.diagnostics {
            eprintln!("- {diagnostic}");
        }
        return 1;
    }

    println!(
        "validation passed: {} ({} assets)",
        args.input.display(),
        load.assets.len()
    );
    for diagnostic in &report.diagnostics {
        println!("- {diagnostic}");
    }
    0
}

fn handle_generate(args: GenerateArgs) -> i32 {
    let seed = args.seed.unwrap_or_else(seed_from_clock);
    let config = GeneratorConfig {
        count: args.count,
        max_cost: args.max_cost,
        max_profit_pct: args.max_profit,
    };
    let assets = generate_assets(&config, seed);
    match write_assets_csv(&args.output, &assets) {
        Ok(()) => {
            println!(
                "generated {} assets into {} (seed {seed})",
                assets.len(),
                args.output.display()
            );
            0
        }
        Err(err) => {
            eprintln!("failed to write '{}': {err}", args.output.display());
            1
        }
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
