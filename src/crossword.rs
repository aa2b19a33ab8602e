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

use std::fmt;
use std::time::Instant;
use rand::Rng;
use serde::Serialize;
use super::attempt::Attempt;
use super::config::{Config, ConfigError};
use super::error::{Error, WordListError};
use super::grid::Grid;
use super::sizing;
use super::solution::{self, SolutionCells};
use super::word::Word;

pub const MIN_WORDS: usize = 3;

// Largest number of cells that can be allocated for a grid
const MAX_CELLS: usize =
    isize::MAX as usize / std::mem::size_of::<Option<char>>();

#[derive(Debug, Clone)]
pub struct Crossword {
    config: Config,
    cols: usize,
    rows: usize,
    words: Vec<Word>,
    best: Attempt,
    counter: usize,
    score: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub placed: usize,
    pub total: usize,
    pub unplaced: Vec<String>,
    pub rounds: usize,
    pub score: u32,
    pub crosses: usize,
    pub crosses_per_word: f64,
    pub cells: usize,
    pub letter_cells: usize,
    pub empty_cells: usize,
}

/// Everything needed to draw a finished crossword
#[derive(Debug, Clone, Serialize)]
pub struct Layout<'a> {
    pub cols: usize,
    pub rows: usize,
    pub empty: char,
    pub grid: Vec<String>,
    pub words: Vec<&'a Word>,
    pub unplaced: Vec<&'a str>,
    pub score: Option<u32>,
}

/// Whether a new attempt should replace the best one so far. Placing
/// more words always wins, otherwise the score has to be at least as
/// good.
pub fn is_better(
    placed: usize,
    score: u32,
    best_placed: usize,
    best_score: u32,
) -> bool {
    (placed >= best_placed && score >= best_score) || placed > best_placed
}

impl Crossword {
    pub fn new<I, A, C>(config: Config, wordlist: I) -> Result<Crossword, Error>
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: AsRef<str>,
    {
        config.validate()?;

        let words = wordlist.into_iter()
            .map(|(answer, clue)| Word::new(answer.as_ref(), clue.as_ref()))
            .collect::<Vec<_>>();

        if words.len() < MIN_WORDS {
            return Err(WordListError::TooFewEntries(words.len()).into());
        }

        if let Some(entry_num) = words.iter().position(Word::is_empty) {
            return Err(WordListError::EmptyAnswer(entry_num).into());
        }

        let (cols, rows) = sizing::grid_size(&words, config.cols, config.rows);

        if !cols.checked_mul(rows).is_some_and(|cells| cells <= MAX_CELLS) {
            return Err(ConfigError::GridTooBig { cols, rows }.into());
        }

        log::debug!("grid size: {}×{}", cols, rows);

        Ok(Crossword {
            best: Attempt::new(cols, rows, &words),
            config,
            cols,
            rows,
            words,
            counter: 0,
            score: None,
        })
    }

    /// Runs randomized attempts and keeps the best one. Normally this
    /// makes `best_of` attempts. In force-solved mode it keeps going
    /// until every word is placed, giving up after `max_loops`
    /// attempts or when `time_permitted` runs out. If that fails the
    /// best attempt so far is still available.
    pub fn compute<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<u32, Error> {
        let started = Instant::now();
        let time_limit = self.config.time_limit();

        self.best = Attempt::new(self.cols, self.rows, &self.words);
        self.score = Some(0);

        let mut best_score = 0;
        let mut cycle = 0;

        loop {
            if let Some(limit) = time_limit {
                if cycle > 0 && started.elapsed() >= limit {
                    if self.config.force_solved {
                        return Err(Error::TimeOut(limit));
                    }

                    log::debug!("time limit reached after {} attempts", cycle);

                    break;
                }
            }

            self.counter += 1;

            let mut attempt = Attempt::shuffled(
                self.cols,
                self.rows,
                &self.words,
                rng,
            );

            let score = attempt.run_rounds(
                self.config.rounds,
                rng,
                self.config.max_loops,
            )?;

            log::debug!(
                "attempt {}: placed {} of {} words, score {}",
                cycle + 1,
                attempt.n_placed(),
                self.words.len(),
                score,
            );

            if is_better(
                attempt.n_placed(),
                score,
                self.best.n_placed(),
                best_score,
            ) {
                self.best = attempt;
                best_score = score;
                self.score = Some(best_score);
            }

            cycle += 1;

            if self.config.force_solved {
                if self.best.is_solved() {
                    break;
                }

                if cycle >= self.config.max_loops {
                    return Err(Error::MaxLoop {
                        loops: self.config.max_loops,
                        word: None,
                    });
                }
            } else if cycle >= self.config.best_of {
                break;
            }
        }

        Ok(best_score)
    }

    pub fn number_words(&mut self) {
        self.best.number_words(self.config.numbering);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn grid(&self) -> &Grid {
        self.best.grid()
    }

    // The words as they were given, none of them placed
    pub fn wordlist(&self) -> &[Word] {
        &self.words
    }

    pub fn words(&self) -> &[Word] {
        self.best.words()
    }

    pub fn placed_words(&self) -> impl Iterator<Item = &Word> {
        self.best.placed_words()
    }

    pub fn unplaced_words(&self) -> impl Iterator<Item = &Word> {
        self.best.unplaced_words()
    }

    pub fn n_placed(&self) -> usize {
        self.best.n_placed()
    }

    pub fn is_solved(&self) -> bool {
        self.best.is_solved()
    }

    // Number of attempts made over all calls to `compute`
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn solution_cells<R: Rng + ?Sized>(
        &self,
        solution: &str,
        rng: &mut R,
    ) -> Result<SolutionCells, Error> {
        Ok(solution::pick_cells(self.grid(), solution, rng)?)
    }

    pub fn stats(&self) -> Stats {
        let placed = self.n_placed();
        let crosses = self.grid().index().crosses().len();
        let cells = self.cols * self.rows;
        let letter_cells = self.grid().n_letters();

        Stats {
            placed,
            total: self.words.len(),
            unplaced: self.unplaced_words()
                .map(|word| word.answer().to_string())
                .collect(),
            rounds: self.counter,
            score: self.score.unwrap_or(0),
            crosses,
            crosses_per_word: if placed > 0 {
                crosses as f64 / placed as f64
            } else {
                0.0
            },
            cells,
            letter_cells,
            empty_cells: cells - letter_cells,
        }
    }

    pub fn layout(&self) -> Layout {
        Layout {
            cols: self.cols,
            rows: self.rows,
            empty: self.config.empty,
            grid: self.grid().row_strings(self.config.empty),
            words: self.placed_words().collect(),
            unplaced: self.unplaced_words().map(Word::answer).collect(),
            score: self.score,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} out of {}", self.placed, self.total)?;

        if !self.unplaced.is_empty() {
            writeln!(f, "Missing words: {}", self.unplaced.join(", "))?;
        }

        writeln!(f, "Needed {} rounds", self.rounds)?;
        writeln!(f, "{:.6} crosses per word", self.crosses_per_word)?;

        if self.empty_cells == 0 {
            return write!(
                f,
                "total-cells/empty-cells quotient: full grid ({}, 0)",
                self.cells,
            );
        }

        write!(
            f,
            "total-cells/empty-cells quotient: {:.1}/1 ({}, {})",
            self.cells as f64 / self.empty_cells as f64,
            self.cells,
            self.empty_cells,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::sizing::Dimension;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    const SMALL_LIST: [(&str, &str); 3] = [
        ("cat", "feline"),
        ("car", "vehicle"),
        ("art", "craft"),
    ];

    // No two words have a letter in common
    const UNRELATED_LIST: [(&str, &str); 3] = [
        ("cat", "feline"),
        ("dog", "canine"),
        ("pun", "wordplay"),
    ];

    const LARGE_LIST: [(&str, &str); 12] = [
        ("crossword", "Puzzle with a grid"),
        ("puzzle", "Brain teaser"),
        ("clue", "Hint"),
        ("answer", "Reply"),
        ("grid", "Lattice"),
        ("letter", "Character"),
        ("across", "Horizontal direction"),
        ("down", "Vertical direction"),
        ("square", "Box on the grid"),
        ("number", "Label for a clue"),
        ("Ice Cream", "Frozen dessert"),
        ("pencil", "Writing tool"),
    ];

    fn fixed_config(cols: usize, rows: usize) -> Config {
        Config {
            cols: Dimension::Fixed(cols),
            rows: Dimension::Fixed(rows),
            ..Config::default()
        }
    }

    fn check_grid(crossword: &Crossword) {
        let grid = crossword.grid();
        let mut covered = HashMap::new();

        for word in crossword.placed_words() {
            let placement = word.placement().unwrap();

            assert_eq!(
                grid.read(&placement, word.len()).as_deref(),
                Some(word.answer()),
            );

            for (letter_num, cell) in placement.cells(word.len()).enumerate() {
                let letter = word.letters()[letter_num];
                let count = covered.entry(cell).or_insert((letter, 0));

                assert_eq!(count.0, letter);
                count.1 += 1;
            }
        }

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                match (grid.get(col, row), covered.get(&(col, row))) {
                    (None, None) => (),
                    (Some(letter), Some(&(expected, count))) => {
                        assert_eq!(letter, expected);
                        assert!(count == 1 || count == 2);
                        assert_eq!(
                            count == 2,
                            grid.index().is_cross((col, row)),
                        );
                    },
                    other => panic!("cell {},{}: {:?}", col, row, other),
                }
            }
        }
    }

    #[test]
    fn small_list_all_placed() {
        let config = Config {
            force_solved: true,
            ..fixed_config(5, 5)
        };
        let mut crossword = Crossword::new(config, SMALL_LIST).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let score = crossword.compute(&mut rng).unwrap();

        assert_eq!(crossword.n_placed(), 3);
        assert!(crossword.is_solved());
        assert!(!crossword.grid().index().crosses().is_empty());
        // Both words after the first cross at least one letter
        assert!(score >= 4);
        assert_eq!(crossword.score(), Some(score));

        check_grid(&crossword);
    }

    #[test]
    fn small_list_best_of() {
        let config = Config { best_of: 60, ..fixed_config(5, 5) };
        let mut crossword = Crossword::new(config, SMALL_LIST).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        crossword.compute(&mut rng).unwrap();

        assert_eq!(crossword.n_placed(), 3);
        assert_eq!(crossword.counter(), 60);

        check_grid(&crossword);
    }

    #[test]
    fn too_few_words() {
        let result = Crossword::new(
            Config::default(),
            [("cat", "feline"), ("car", "vehicle")],
        );

        assert!(matches!(
            result,
            Err(Error::WordList(WordListError::TooFewEntries(2))),
        ));
    }

    #[test]
    fn empty_answer() {
        let result = Crossword::new(
            Config::default(),
            [("cat", "feline"), (" \t", "nothing"), ("art", "craft")],
        );

        assert!(matches!(
            result,
            Err(Error::WordList(WordListError::EmptyAnswer(1))),
        ));
    }

    #[test]
    fn bad_config() {
        let config = Config { best_of: 0, ..Config::default() };

        assert!(matches!(
            Crossword::new(config, SMALL_LIST),
            Err(Error::Config(_)),
        ));

        let config = Config {
            time_permitted: Some(1e30),
            ..Config::default()
        };

        assert!(matches!(
            Crossword::new(config, SMALL_LIST),
            Err(Error::Config(ConfigError::BadTimePermitted(_))),
        ));
    }

    #[test]
    fn grid_too_big() {
        let huge = usize::MAX / 2;

        assert!(matches!(
            Crossword::new(fixed_config(huge, 3), SMALL_LIST),
            Err(Error::Config(ConfigError::GridTooBig { rows: 3, .. })),
        ));
        assert!(matches!(
            Crossword::new(fixed_config(huge, 1), SMALL_LIST),
            Err(Error::Config(ConfigError::GridTooBig { rows: 1, .. })),
        ));

        let config = Config {
            cols: Dimension::Fixed(huge),
            ..Config::default()
        };

        assert!(matches!(
            Crossword::new(config, SMALL_LIST),
            Err(Error::Config(ConfigError::GridTooBig { .. })),
        ));
        assert_eq!(
            &ConfigError::GridTooBig { cols: 7, rows: 8 }.to_string(),
            "a 7×8 grid is too big",
        );
    }

    #[test]
    fn force_solved_gives_up() {
        let config = Config {
            force_solved: true,
            max_loops: 20,
            ..fixed_config(3, 3)
        };
        let mut crossword = Crossword::new(config, UNRELATED_LIST).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        assert!(matches!(
            crossword.compute(&mut rng),
            Err(Error::MaxLoop { loops: 20, word: None }),
        ));

        // The best effort is still there
        assert_eq!(crossword.counter(), 20);
        assert_eq!(crossword.n_placed(), 1);
        assert_eq!(crossword.unplaced_words().count(), 2);
        check_grid(&crossword);
    }

    #[test]
    fn first_word_too_long() {
        let config = fixed_config(3, 3);
        let words = [("abcd", "a"), ("abc", "b"), ("ab", "c")];
        let mut crossword = Crossword::new(config, words).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        assert!(matches!(
            crossword.compute(&mut rng),
            Err(Error::MaxLoop { word: Some(_), .. }),
        ));
    }

    #[test]
    fn auto_size_terminates() {
        for seed in 0..5 {
            let mut crossword = Crossword::new(
                Config::default(),
                LARGE_LIST,
            ).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);

            let score = crossword.compute(&mut rng).unwrap();

            assert!(crossword.cols() > "crossword".len());
            assert_eq!(crossword.cols(), crossword.rows());
            assert!(crossword.n_placed() >= 1);
            assert_eq!(crossword.counter(), 3);

            let n_crosses = crossword.grid().index().crosses().len() as u32;
            assert_eq!(score, crossword.n_placed() as u32 - 1 + n_crosses);

            check_grid(&crossword);
        }
    }

    #[test]
    fn best_is_kept() {
        let mut crossword = Crossword::new(
            Config { best_of: 10, ..Config::default() },
            LARGE_LIST,
        ).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let score = crossword.compute(&mut rng).unwrap();

        // Replay the same attempts and check none of them beat the one
        // that was kept
        let mut rng = StdRng::seed_from_u64(11);
        let mut best = (0, 0);

        for _ in 0..10 {
            let mut attempt = Attempt::shuffled(
                crossword.cols(),
                crossword.rows(),
                crossword.wordlist(),
                &mut rng,
            );
            let attempt_score = attempt.run_rounds(2, &mut rng, 2000).unwrap();

            if is_better(attempt.n_placed(), attempt_score, best.0, best.1) {
                best = (attempt.n_placed(), attempt_score);
            }
        }

        assert_eq!(best, (crossword.n_placed(), score));
    }

    #[test]
    fn comparison() {
        // More words wins even with a worse score
        assert!(is_better(5, 1, 4, 10));
        // Same number of words needs at least the same score
        assert!(is_better(4, 10, 4, 10));
        assert!(is_better(4, 11, 4, 10));
        assert!(!is_better(4, 9, 4, 10));
        // Fewer words never wins
        assert!(!is_better(3, 20, 4, 10));
    }

    #[test]
    fn time_limit() {
        let config = Config {
            best_of: 1000,
            time_permitted: Some(1e-9),
            ..Config::default()
        };
        let mut crossword = Crossword::new(config, LARGE_LIST).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        crossword.compute(&mut rng).unwrap();

        assert_eq!(crossword.counter(), 1);
        assert!(crossword.n_placed() >= 1);
    }

    #[test]
    fn force_solved_time_out() {
        let config = Config {
            force_solved: true,
            time_permitted: Some(1e-9),
            ..fixed_config(3, 3)
        };
        let mut crossword = Crossword::new(config, UNRELATED_LIST).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(matches!(
            crossword.compute(&mut rng),
            Err(Error::TimeOut(_)),
        ));
        assert_eq!(crossword.counter(), 1);
    }

    #[test]
    fn numbering() {
        for seed in 0..5 {
            let mut crossword = Crossword::new(
                Config::default(),
                LARGE_LIST,
            ).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);

            crossword.compute(&mut rng).unwrap();
            crossword.number_words();

            let words = crossword.placed_words().collect::<Vec<_>>();

            for a in words.iter() {
                assert!(a.number().is_some());

                for b in words.iter() {
                    let a_start = a.placement().map(|p| (p.col, p.row));
                    let b_start = b.placement().map(|p| (p.col, p.row));

                    assert_eq!(a_start == b_start, a.number() == b.number());
                }
            }

            assert_eq!(words[0].number(), Some(1));

            assert!(crossword.unplaced_words().all(|w| w.number().is_none()));
        }
    }

    #[test]
    fn recompute_starts_again() {
        let mut crossword = Crossword::new(
            Config { best_of: 1, ..Config::default() },
            LARGE_LIST,
        ).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        crossword.compute(&mut rng).unwrap();
        crossword.number_words();
        crossword.compute(&mut rng).unwrap();

        assert_eq!(crossword.counter(), 2);
        assert!(crossword.placed_words().all(|w| w.number().is_none()));
        check_grid(&crossword);
    }

    #[test]
    fn stats() {
        let config = Config { best_of: 1, ..fixed_config(3, 3) };
        let mut crossword = Crossword::new(config, UNRELATED_LIST).unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        crossword.compute(&mut rng).unwrap();

        let stats = crossword.stats();

        assert_eq!(stats.placed, 1);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.unplaced.len(), 2);
        assert_eq!(stats.rounds, 1);
        assert_eq!(stats.crosses, 0);
        assert_eq!(stats.cells, 9);
        assert_eq!(stats.letter_cells, 3);
        assert_eq!(stats.empty_cells, 6);

        let report = stats.to_string();

        assert!(report.starts_with("1 out of 3\nMissing words: "));
        assert!(report.ends_with(
            "Needed 1 rounds\n\
             0.000000 crosses per word\n\
             total-cells/empty-cells quotient: 1.5/1 (9, 6)"
        ));
    }

    #[test]
    fn stats_full_grid() {
        let stats = Stats {
            placed: 2,
            total: 2,
            unplaced: Vec::new(),
            rounds: 1,
            score: 2,
            crosses: 1,
            crosses_per_word: 0.5,
            cells: 3,
            letter_cells: 3,
            empty_cells: 0,
        };

        assert_eq!(
            &stats.to_string(),
            "2 out of 2\n\
             Needed 1 rounds\n\
             0.500000 crosses per word\n\
             total-cells/empty-cells quotient: full grid (3, 0)",
        );
    }

    #[test]
    fn layout() {
        let config = Config {
            force_solved: true,
            empty: ' ',
            ..fixed_config(5, 5)
        };
        let mut crossword = Crossword::new(config, SMALL_LIST).unwrap();
        let mut rng = StdRng::seed_from_u64(4);

        crossword.compute(&mut rng).unwrap();
        crossword.number_words();

        let value = serde_json::to_value(crossword.layout()).unwrap();

        assert_eq!(value["cols"], 5);
        assert_eq!(value["rows"], 5);
        assert_eq!(value["empty"], " ");
        assert_eq!(value["grid"].as_array().unwrap().len(), 5);
        assert_eq!(value["words"].as_array().unwrap().len(), 3);
        assert!(value["unplaced"].as_array().unwrap().is_empty());

        let word = &value["words"][0];

        assert!(word["answer"].is_string());
        assert!(word["clue"].is_string());
        assert_eq!(word["number"], 1);
        assert!(word["placement"]["col"].is_u64());
        assert!(
            word["placement"]["orientation"] == "horizontal"
                || word["placement"]["orientation"] == "vertical"
        );
    }
}
