mod board;
mod error;
mod search;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{info, warn};

use board::Board;
use search::{a_star, Outcome, SearchReport, Solution};

/// Weighted A* solver for (n*m)-1 sliding-tile puzzles.
#[derive(Parser)]
struct Args {
    /// Directory of puzzle files (start board then goal board,
    /// whitespace-separated, row-major)
    #[arg(short, long, default_value = "Input")]
    input: PathBuf,

    /// Directory where solution files are written
    #[arg(short, long, default_value = "Output")]
    output: PathBuf,

    /// Board width
    #[arg(long, default_value_t = 4)]
    width: usize,

    /// Board height
    #[arg(long, default_value_t = 3)]
    height: usize,

    /// Heuristic weights; each puzzle is solved once per weight
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![1.0, 1.2, 1.4])]
    weights: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut puzzles: Vec<PathBuf> = fs::read_dir(&args.input)
        .with_context(|| format!("reading input directory {}", args.input.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .collect();
    puzzles.sort();
    ensure!(
        !puzzles.is_empty(),
        "no puzzle files in {}",
        args.input.display()
    );
    info!("found {} puzzle file(s)", puzzles.len());

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    for (number, path) in puzzles.iter().enumerate() {
        let (start, goal) = read_puzzle(path, args.width, args.height)
            .with_context(|| format!("loading puzzle {}", path.display()))?;

        for (run, &weight) in args.weights.iter().enumerate() {
            info!("solving {} with weight {:?}", path.display(), weight);
            let report = a_star(&start, &goal, weight)?;
            let solution = report.trace_back(weight);
            match report.outcome {
                Outcome::GoalFound => info!(
                    "solved at depth {} with {} nodes generated",
                    solution.depth, report.generated
                ),
                Outcome::Exhausted => warn!(
                    "frontier exhausted after {} nodes, reporting closest approach",
                    report.generated
                ),
            }

            let name = format!("output{}{}.txt", number + 1, run_letter(run));
            let out_path = args.output.join(name);
            write_solution(&out_path, &start, &report, &solution, weight)
                .with_context(|| format!("writing {}", out_path.display()))?;
        }
    }
    Ok(())
}

/// a, b, c... suffix distinguishing the per-weight runs of one puzzle.
fn run_letter(run: usize) -> char {
    (b'a' + (run % 26) as u8) as char
}

/// Parse a puzzle file: width*height start values followed by
/// width*height goal values, in any whitespace arrangement.
fn read_puzzle(path: &Path, width: usize, height: usize) -> Result<(Board, Board)> {
    let text = fs::read_to_string(path)?;
    let values: Vec<u32> = text
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .context("puzzle files must contain only whitespace-separated integers")?;

    let cells = width * height;
    ensure!(
        values.len() == 2 * cells,
        "expected {} values ({} per board), found {}",
        2 * cells,
        cells,
        values.len()
    );

    let mut start = Board::new(width, height);
    start.fill(&values[..cells])?;
    let mut goal = Board::new(width, height);
    goal.fill(&values[cells..])?;
    ensure!(start.is_valid(), "start board is not a valid puzzle");
    ensure!(goal.is_valid(), "goal board is not a valid puzzle");
    Ok((start, goal))
}

/// One result file: start board, solved (or closest) board, then the
/// weight, depth, generated-node count, action symbols, and f(n) trace.
fn write_solution(
    path: &Path,
    start: &Board,
    report: &SearchReport,
    solution: &Solution,
    weight: f64,
) -> Result<()> {
    let actions: Vec<String> = solution
        .actions
        .iter()
        .map(|m| m.symbol().to_string())
        .collect();
    let trace: Vec<String> = solution.f_trace.iter().map(|f| format!("{:?}", f)).collect();

    let body = format!(
        "{}\n{}\n{:?}\n{}\n{}\n{}\n{}\n",
        start,
        report.result().state,
        weight,
        solution.depth,
        report.generated,
        actions.join(" "),
        trace.join(" "),
    );
    fs::write(path, body)?;
    Ok(())
}
