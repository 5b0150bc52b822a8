//! Interactive menu: pick a CSV file from the data directory, then run the
//! selectors on it until the user quits.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use inquire::{InquireError, Select};
use tracing::warn;

use crate::cli::{run_session, Session};
use crate::config::Config;
use crate::data::loader::load_assets;
use crate::optimizer::AlgorithmChoice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    RunExhaustive,
    RunGreedy,
    RunBoth,
    ChangeFile,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        Self::RunExhaustive,
        Self::RunGreedy,
        Self::RunBoth,
        Self::ChangeFile,
        Self::Quit,
    ];

    /// Selectors to run for this action, if it runs any.
    pub fn choice(&self) -> Option<AlgorithmChoice> {
        match self {
            Self::RunExhaustive => Some(AlgorithmChoice::Exhaustive),
            Self::RunGreedy => Some(AlgorithmChoice::Greedy),
            Self::RunBoth => Some(AlgorithmChoice::Both),
            Self::ChangeFile | Self::Quit => None,
        }
    }
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RunExhaustive => "Run the exhaustive search",
            Self::RunGreedy => "Run the greedy heuristic",
            Self::RunBoth => "Run both and compare",
            Self::ChangeFile => "Change data file",
            Self::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// CSV files directly under `dir`, sorted by name.
pub fn list_data_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

fn pick_data_file(dir: &Path) -> Result<Option<PathBuf>, InquireError> {
    let files = list_data_files(dir).map_err(InquireError::IO)?;
    if files.is_empty() {
        return Ok(None);
    }
    let names: Vec<String> = files
        .iter()
        .map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect();
    let picked = Select::new("Data file:", names.clone()).prompt()?;
    let index = names.iter().position(|name| *name == picked).unwrap_or(0);
    Ok(Some(files[index].clone()))
}

/// Line printed after each run; the menu keeps going either way.
fn run_status(exit_code: i32) -> &'static str {
    if exit_code == 0 {
        "Run finished."
    } else {
        "Run failed: no selector finished or a result file could not be written."
    }
}

pub fn run_menu(config: &Config) -> i32 {
    let mut current: Option<PathBuf> = None;

    loop {
        let path = match current.clone() {
            Some(path) => path,
            None => match pick_data_file(&config.data_dir) {
                Ok(Some(path)) => {
                    current = Some(path.clone());
                    path
                }
                Ok(None) => {
                    eprintln!("no CSV file found in '{}'", config.data_dir.display());
                    return 1;
                }
                Err(err) if is_cancel(&err) => return 0,
                Err(err) => {
                    eprintln!("menu error: {err}");
                    return 1;
                }
            },
        };

        let load = match load_assets(&path) {
            Ok(load) => load,
            Err(err) => {
                warn!(error = %err, "could not load data file");
                eprintln!("{err}");
                current = None;
                continue;
            }
        };
        println!(
            "\nCurrent file: {} ({} assets, budget {})",
            path.display(),
            load.assets.len(),
            config.budget
        );

        let prompt = Select::new("What do you want to do?", MenuAction::ALL.to_vec());
        let action = match prompt.prompt() {
            Ok(action) => action,
            Err(err) if is_cancel(&err) => return 0,
            Err(err) => {
                eprintln!("menu error: {err}");
                return 1;
            }
        };

        match action {
            MenuAction::Quit => {
                println!("Goodbye.");
                return 0;
            }
            MenuAction::ChangeFile => current = None,
            run => {
                if let Some(choice) = run.choice() {
                    let session = Session {
                        input: &path,
                        budget: config.budget,
                        choice,
                        output_dir: &config.output_dir,
                        max_exhaustive_assets: config.max_exhaustive_assets,
                        json: false,
                    };
                    let code = run_session(&session, &load.assets);
                    if code != 0 {
                        warn!(exit_code = code, path = %path.display(), "menu run failed");
                    }
                    println!("{}", run_status(code));
                }
            }
        }
    }
}
