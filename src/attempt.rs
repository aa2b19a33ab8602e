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

use rand::Rng;
use rand::seq::SliceRandom;
use super::error::Error;
use super::grid::Grid;
use super::word::{Word, Placement, Orientation};
use super::config::NumberingOrder;
use super::{scorer, numbering};

/// One try at filling a grid. Words are only ever added, so an
/// attempt that turns out badly is thrown away as a whole.
#[derive(Debug, Clone)]
pub struct Attempt {
    grid: Grid,
    words: Vec<Word>,
    // Indices into `words` in the order they were placed
    placed: Vec<usize>,
    score: u32,
}

// Position of a word of the given length in the middle of the grid,
// or None if it is longer than the grid
fn centred_placement(
    cols: usize,
    rows: usize,
    length: usize,
    orientation: Orientation,
) -> Option<Placement> {
    match orientation {
        Orientation::Horizontal => {
            let col = cols.checked_sub(length)? / 2;
            Some(Placement::new(col, rows / 2, orientation))
        },
        Orientation::Vertical => {
            let row = rows.checked_sub(length)? / 2;
            Some(Placement::new(cols / 2, row, orientation))
        },
    }
}

impl Attempt {
    pub fn new(cols: usize, rows: usize, words: &[Word]) -> Attempt {
        Attempt {
            grid: Grid::new(cols, rows),
            words: words.iter().map(Word::unplaced).collect(),
            placed: Vec::new(),
            score: 0,
        }
    }

    /// Creates an empty attempt where the words are sorted with the
    /// longest first. Words with the same length are in a random
    /// order so that a different word can start the grid each time.
    pub fn shuffled<R: Rng + ?Sized>(
        cols: usize,
        rows: usize,
        words: &[Word],
        rng: &mut R,
    ) -> Attempt {
        let mut attempt = Attempt::new(cols, rows, words);

        attempt.words.shuffle(rng);
        attempt.words.sort_by(|a, b| b.len().cmp(&a.len()));

        attempt
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn placed_words(&self) -> impl Iterator<Item = &Word> {
        self.placed.iter().map(|&word_num| &self.words[word_num])
    }

    pub fn unplaced_words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(|word| !word.is_placed())
    }

    pub fn n_placed(&self) -> usize {
        self.placed.len()
    }

    pub fn is_solved(&self) -> bool {
        self.placed.len() == self.words.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn commit(&mut self, word_num: usize, placement: Placement) {
        let word = &mut self.words[word_num];

        self.grid.write_word(&placement, word.letters());
        word.place(placement);
        self.placed.push(word_num);
    }

    fn place_first<R: Rng + ?Sized>(
        &mut self,
        word_num: usize,
        rng: &mut R,
        max_loops: usize,
    ) -> Result<u32, Error> {
        for _ in 0..max_loops {
            let orientation = if rng.gen_bool(0.5) {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };

            let Some(placement) = centred_placement(
                self.grid.cols(),
                self.grid.rows(),
                self.words[word_num].len(),
                orientation,
            )
            else {
                continue;
            };

            let letters = self.words[word_num].letters();

            if scorer::fit_score(&self.grid, letters, &placement) > 0 {
                self.commit(word_num, placement);
                // Nothing to cross yet
                return Ok(0);
            }
        }

        Err(Error::MaxLoop {
            loops: max_loops,
            word: Some(self.words[word_num].answer().to_string()),
        })
    }

    /// Puts a word on the grid at the best place that crosses the
    /// words already there. The first word goes in the middle. Returns
    /// the fit score, or 0 if the word couldn’t be placed.
    pub fn place_word<R: Rng + ?Sized>(
        &mut self,
        word_num: usize,
        rng: &mut R,
        max_loops: usize,
    ) -> Result<u32, Error> {
        assert!(!self.words[word_num].is_placed());

        if self.placed.is_empty() {
            return self.place_first(word_num, rng, max_loops);
        }

        let letters = self.words[word_num].letters();

        let Some(candidate) = scorer::best_candidate(&self.grid, letters, rng)
        else {
            return Ok(0);
        };

        self.commit(word_num, candidate.placement);

        Ok(candidate.score)
    }

    /// Tries each unplaced word in turn, `rounds` times over. Returns
    /// the sum of the scores of the words placed.
    pub fn run_rounds<R: Rng + ?Sized>(
        &mut self,
        rounds: usize,
        rng: &mut R,
        max_loops: usize,
    ) -> Result<u32, Error> {
        for _ in 0..rounds {
            if self.is_solved() {
                break;
            }

            for word_num in 0..self.words.len() {
                if !self.words[word_num].is_placed() {
                    self.score += self.place_word(word_num, rng, max_loops)?;
                }
            }
        }

        Ok(self.score)
    }

    pub fn number_words(&mut self, order: NumberingOrder) {
        numbering::number_words(&mut self.words, &mut self.placed, order);
    }
}
