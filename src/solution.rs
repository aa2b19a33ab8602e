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

use std::collections::{HashMap, HashSet};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use super::error::SolutionError;
use super::grid::{Grid, Coord};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SolutionCell {
    pub letter: char,
    pub col: usize,
    pub row: usize,
    // Index of the word within the solution phrase
    pub group: usize,
}

/// Cells to highlight so that their letters spell out a solution
/// phrase
#[derive(Clone, Debug, Serialize)]
pub struct SolutionCells {
    pub solution: String,
    pub cells: Vec<SolutionCell>,
}

pub fn normalize_solution(solution: &str) -> String {
    solution.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Picks a different grid cell for each letter of the solution. Cells
/// where two words cross are never used.
pub fn pick_cells<R: Rng + ?Sized>(
    grid: &Grid,
    solution: &str,
    rng: &mut R,
) -> Result<SolutionCells, SolutionError> {
    let solution = normalize_solution(solution);
    let mut counts = HashMap::<char, usize>::new();

    for letter in solution.chars().filter(|&ch| ch != ' ') {
        *counts.entry(letter).or_default() += 1;
    }

    for letter in solution.chars().filter(|&ch| ch != ' ') {
        let available = grid.index().count(letter);

        if available == 0 {
            return Err(SolutionError::MissingLetter(letter));
        }

        let wanted = counts.get(&letter).copied().unwrap_or(0);

        if wanted > available {
            return Err(SolutionError::NotEnoughLetters {
                letter,
                wanted,
                available,
            });
        }
    }

    let mut used = HashSet::<Coord>::new();
    let mut cells = Vec::new();
    let mut group = 0;

    for letter in solution.chars() {
        if letter == ' ' {
            group += 1;
            continue;
        }

        let free = grid.index()
            .positions(letter)
            .iter()
            .filter(|&&cell| !used.contains(&cell))
            .copied()
            .collect::<Vec<_>>();

        let Some(&(col, row)) = free.choose(rng)
        else {
            return Err(SolutionError::MissingLetter(letter));
        };

        used.insert((col, row));
        cells.push(SolutionCell { letter, col, row, group });
    }

    Ok(SolutionCells { solution, cells })
}
