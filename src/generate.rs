// Krucvorto – A crossword generator
// Copyright (C) 2025  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use krucvorto::{Config, Crossword, Dimension, Layout, Stats};
use krucvorto::{batch, logger};
use krucvorto::crossword::is_better;
use krucvorto::solution::SolutionCells;

/// Lays the answers of a word list onto a crossword grid and writes
/// the result as JSON
#[derive(Parser, Debug)]
#[command(name = "generate-crossword", version)]
struct Args {
    /// JSON file containing a list of ["answer", "clue"] pairs, or “-”
    /// to read from stdin
    #[arg(value_name = "WORDLIST")]
    wordlist: PathBuf,

    /// JSON file with the placement options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of columns or “auto”
    #[arg(short, long)]
    cols: Option<Dimension>,

    /// Number of rows or “auto”
    #[arg(short, long)]
    rows: Option<Dimension>,

    /// Make this many attempts and keep the best
    #[arg(short, long)]
    best_of: Option<usize>,

    /// Number of passes over the word list in each attempt
    #[arg(long)]
    rounds: Option<usize>,

    /// Keep trying until every word is placed
    #[arg(long)]
    force_solved: bool,

    /// Maximum number of tries before giving up
    #[arg(long)]
    max_loops: Option<usize>,

    /// Stop making new attempts after this many seconds
    #[arg(long, value_name = "SECONDS")]
    time_permitted: Option<f64>,

    /// Seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// Generate this many crosswords and output the best one
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Number of threads to use when generating several crosswords
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Phrase to mark on the grid using letters of the placed words
    #[arg(short, long)]
    solution: Option<String>,

    /// Print statistics about the crossword to stderr
    #[arg(long)]
    stats: bool,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Show debug messages
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    layout: Layout<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<SolutionCells>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<Stats>,
}

fn load_config(args: &Args) -> Result<Config, String> {
    let mut config = match args.config {
        Some(ref filename) => Config::load(filename).map_err(|e| {
            format!("{}: {}", filename.to_string_lossy(), e)
        })?,
        None => Config::default(),
    };

    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(best_of) = args.best_of {
        config.best_of = best_of;
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(max_loops) = args.max_loops {
        config.max_loops = max_loops;
    }
    if args.time_permitted.is_some() {
        config.time_permitted = args.time_permitted;
    }
    if args.force_solved {
        config.force_solved = true;
    }

    config.validate().map_err(|e| e.to_string())?;

    Ok(config)
}

fn load_wordlist(filename: &Path) -> Result<Vec<(String, String)>, String> {
    let result = if filename.as_os_str() == "-" {
        serde_json::from_reader(io::stdin().lock())
    } else {
        std::fs::File::open(filename)
            .map_err(serde_json::Error::io)
            .and_then(|f| serde_json::from_reader(io::BufReader::new(f)))
    };

    result.map_err(|e| format!("{}: {}", filename.to_string_lossy(), e))
}

fn generate(
    template: &Crossword,
    args: &Args,
    rng: &mut StdRng,
) -> Result<Crossword, krucvorto::Error> {
    if args.count <= 1 {
        let mut crossword = template.clone();
        crossword.compute(rng)?;
        return Ok(crossword);
    }

    let n_threads = args.threads.unwrap_or_else(batch::available_threads);

    log::info!(
        "generating {} crosswords on {} threads",
        args.count,
        n_threads,
    );

    let mut results = batch::generate_parallel(
        template,
        args.count,
        n_threads,
        rng,
    ).into_iter();

    // There is one result per job and there are at least two jobs
    let (mut best, mut best_score) = results.next()
        .expect("batch should return a result for every job")?;

    for result in results {
        let (crossword, score) = result?;

        if is_better(crossword.n_placed(), score, best.n_placed(), best_score) {
            best = crossword;
            best_score = score;
        }
    }

    Ok(best)
}

fn write_output(args: &Args, output: &Output) -> Result<(), String> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| e.to_string())?;

    match args.output {
        Some(ref filename) => {
            std::fs::write(filename, json + "\n").map_err(|e| {
                format!("{}: {}", filename.to_string_lossy(), e)
            })
        },
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json).map_err(|e| e.to_string())
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    logger::init_logger(args.verbose);

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let wordlist = match load_wordlist(&args.wordlist) {
        Ok(wordlist) => wordlist,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let template = match Crossword::new(config, wordlist) {
        Ok(crossword) => crossword,
        Err(e) => {
            eprintln!("{}: {}", args.wordlist.to_string_lossy(), e);
            return ExitCode::FAILURE;
        },
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut crossword = match generate(&template, &args, &mut rng) {
        Ok(crossword) => crossword,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        },
    };

    let unplaced = crossword.unplaced_words()
        .map(|word| word.answer())
        .collect::<Vec<_>>();

    if !unplaced.is_empty() {
        log::warn!(
            "couldn’t place some words, probably the grid is too small or \
             --best-of is too low: {}",
            unplaced.join(", "),
        );
    }

    crossword.number_words();

    let solution = match args.solution {
        Some(ref solution) => match crossword.solution_cells(solution, &mut rng) {
            Ok(cells) => Some(cells),
            Err(e) => {
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            },
        },
        None => None,
    };

    let stats = crossword.stats();

    if args.stats {
        eprintln!("{}", stats);
    }

    let output = Output {
        layout: crossword.layout(),
        solution,
        stats: args.stats.then_some(stats),
    };

    match write_output(&args, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        },
    }
}
