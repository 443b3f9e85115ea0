//! CLI front end: reads one puzzle file, or every `*.txt` file in a
//! directory, solves each, and prints the rendered result. Spec section 6.3.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use numberlink_sat::{parse, render, solve};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Solve Numberlink / Flow Free puzzles given as dense-row text files.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// A puzzle file, or a directory of `*.txt` puzzle files.
    path: PathBuf,

    /// Give up after this many cycle-repair rounds instead of looping
    /// indefinitely.
    #[arg(long)]
    repair_budget: Option<usize>,
}

fn collect_puzzle_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(path)
            .with_context(|| format!("reading directory {}", path.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();
        Ok(files)
    } else {
        Ok(vec![path.to_path_buf()])
    }
}

/// How solving a single puzzle file turned out, so the caller can fold the
/// worst outcome across every file into the process exit code (spec 6.3:
/// 0 solved, 1 unsolvable, 2 parse error).
enum Outcome {
    Solved,
    Unsolvable,
    ParseError,
}

fn run_one(path: &Path, repair_budget: Option<usize>) -> Result<Outcome> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let grid = match parse(&text) {
        Ok(grid) => grid,
        Err(err) => {
            error!("{}: {err}", path.display());
            return Ok(Outcome::ParseError);
        }
    };

    info!("{}: parsed {}x{} grid, {} labels", path.display(), grid.height(), grid.width(), grid.num_labels());

    match solve(&grid, repair_budget) {
        Ok(solution) => {
            info!("{}: solved after {} repair(s)", path.display(), solution.repairs);
            print!("{}", render(&solution.decoded, &grid));
            Ok(Outcome::Solved)
        }
        Err(err) => {
            error!("{}: {err}", path.display());
            Ok(Outcome::Unsolvable)
        }
    }
}

fn main() -> Result<ExitCode> {
    TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let cli = Cli::parse();
    let files = collect_puzzle_files(&cli.path)?;

    let mut any_parse_error = false;
    let mut any_unsolved = false;

    for file in &files {
        match run_one(file, cli.repair_budget)? {
            Outcome::Solved => {}
            Outcome::Unsolvable => any_unsolved = true,
            Outcome::ParseError => any_parse_error = true,
        }
    }

    Ok(if any_parse_error {
        ExitCode::from(2)
    } else if any_unsolved {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
