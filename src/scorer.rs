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
use super::grid::{Grid, neighbour};
use super::word::{Placement, Orientation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub placement: Placement,
    pub score: u32,
}

/// Works out how well a word fits at the given placement.
///
/// Returns 0 if the word doesn’t fit. Otherwise the score is one more
/// than the number of cells where the word crosses a letter that is
/// already on the grid.
pub fn fit_score(grid: &Grid, letters: &[char], placement: &Placement) -> u32 {
    if !grid.fits(placement, letters.len()) {
        return 0;
    }

    let orientation = placement.orientation;
    let mut score = 1;
    let mut last_occupied = false;

    for (letter_num, &letter) in letters.iter().enumerate() {
        let cell = placement.cell(letter_num);
        let existing = grid.get(cell.0, cell.1);

        // Two filled cells in a row would mean running along a word
        // that is already on the grid, eg “nose” inside “nosebear”
        if last_occupied && existing.is_some() {
            return 0;
        }

        last_occupied = existing.is_some();

        match existing {
            Some(ch) if ch != letter => return 0,
            Some(_) => score += 1,
            None => {
                // Words can only touch sideways where they cross
                let across = orientation.other();

                if !grid.is_empty_at(neighbour(cell, across, false))
                    || !grid.is_empty_at(neighbour(cell, across, true))
                {
                    return 0;
                }
            },
        }

        if letter_num == 0
            && !grid.is_empty_at(neighbour(cell, orientation, false))
        {
            return 0;
        }

        if letter_num + 1 == letters.len()
            && !grid.is_empty_at(neighbour(cell, orientation, true))
        {
            return 0;
        }
    }

    score
}

/// Finds every placement where one of the word’s letters lands on the
/// same letter already on the grid and the word fits.
pub fn candidates(grid: &Grid, letters: &[char]) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (letter_num, &letter) in letters.iter().enumerate() {
        for &(col, row) in grid.index().positions(letter) {
            let starts = [
                row.checked_sub(letter_num)
                    .map(|row| Placement::new(col, row, Orientation::Vertical)),
                col.checked_sub(letter_num)
                    .map(|col| Placement::new(col, row, Orientation::Horizontal)),
            ];

            for placement in starts.into_iter().flatten() {
                if !grid.fits(&placement, letters.len()) {
                    continue;
                }

                let score = fit_score(grid, letters, &placement);

                if score > 0 {
                    candidates.push(Candidate { placement, score });
                }
            }
        }
    }

    candidates
}

/// Returns the candidates with the best first. Candidates with the
/// same score come out in a random order.
pub fn ranked_candidates<R: Rng + ?Sized>(
    grid: &Grid,
    letters: &[char],
    rng: &mut R,
) -> Vec<Candidate> {
    let mut candidates = candidates(grid, letters);

    candidates.shuffle(rng);
    // The sort is stable so the shuffle decides the order of ties
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    candidates
}

pub fn best_candidate<R: Rng + ?Sized>(
    grid: &Grid,
    letters: &[char],
    rng: &mut R,
) -> Option<Candidate> {
    ranked_candidates(grid, letters, rng).into_iter().next()
}
