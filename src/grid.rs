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
use std::collections::HashMap;
use super::word::{Placement, Orientation};

pub type Coord = (usize, usize);

// Maps each letter to the cells that hold it so that the candidate
// search doesn’t have to scan the whole grid. Cells where two words
// cross are moved to a separate list because no other word can use
// them.
#[derive(Debug, Clone, Default)]
pub struct LetterIndex {
    letters: HashMap<char, Vec<Coord>>,
    crosses: Vec<Coord>,
}

#[derive(Debug, Clone)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Box<[Option<char>]>,
    index: LetterIndex,
}

impl LetterIndex {
    pub fn new() -> LetterIndex {
        let mut letters = HashMap::new();

        for letter in 'a'..='z' {
            letters.insert(letter, Vec::new());
        }

        LetterIndex { letters, crosses: Vec::new() }
    }

    pub fn positions(&self, letter: char) -> &[Coord] {
        self.letters.get(&letter).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn crosses(&self) -> &[Coord] {
        &self.crosses
    }

    pub fn is_cross(&self, coord: Coord) -> bool {
        self.crosses.contains(&coord)
    }

    // Number of cells of each letter that aren’t crosses
    pub fn count(&self, letter: char) -> usize {
        self.positions(letter).len()
    }

    fn add(&mut self, letter: char, coord: Coord) {
        if self.crosses.contains(&coord) {
            return;
        }

        let positions = self.letters.entry(letter).or_default();

        match positions.iter().position(|&c| c == coord) {
            Some(pos) => {
                positions.remove(pos);
                self.crosses.push(coord);
            },
            None => positions.push(coord),
        }
    }
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Grid {
        Grid {
            cols,
            rows,
            cells: vec![None; cols * rows].into_boxed_slice(),
            index: LetterIndex::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn index(&self) -> &LetterIndex {
        &self.index
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    // Cells outside of the grid count as empty
    pub fn is_empty_at(&self, cell: Option<Coord>) -> bool {
        cell.map(|(col, row)| self.get(col, row).is_none()).unwrap_or(true)
    }

    pub fn fits(&self, placement: &Placement, length: usize) -> bool {
        if length == 0 {
            return false;
        }

        let (end_col, end_row) = placement.cell(length - 1);

        end_col < self.cols && end_row < self.rows
    }

    /// Writes the letters of a word along the given placement and
    /// keeps the letter index in sync with the cells. Any letters
    /// already on the path must be the same as the ones being written.
    pub fn write_word(&mut self, placement: &Placement, letters: &[char]) {
        assert!(self.fits(placement, letters.len()));

        for (letter_num, &letter) in letters.iter().enumerate() {
            let (col, row) = placement.cell(letter_num);
            let cell = &mut self.cells[row * self.cols + col];

            if let Some(existing) = *cell {
                assert_eq!(existing, letter);
            }

            *cell = Some(letter);
            self.index.add(letter, (col, row));
        }
    }

    /// Reads back the letters along a placement. Returns `None` if the
    /// path leaves the grid or crosses an empty cell.
    pub fn read(&self, placement: &Placement, length: usize) -> Option<String> {
        if !self.fits(placement, length) {
            return None;
        }

        placement.cells(length)
            .map(|(col, row)| self.get(col, row))
            .collect()
    }

    pub fn n_letters(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn row_string(&self, row: usize, empty: char) -> String {
        (0..self.cols)
            .map(|col| self.get(col, row).unwrap_or(empty))
            .collect()
    }

    pub fn row_strings(&self, empty: char) -> Vec<String> {
        (0..self.rows).map(|row| self.row_string(row, empty)).collect()
    }
}

// Returns the cell next to the given one in the given orientation,
// either forwards or backwards
pub fn neighbour(
    (col, row): Coord,
    orientation: Orientation,
    forwards: bool,
) -> Option<Coord> {
    match (orientation, forwards) {
        (Orientation::Horizontal, true) => Some((col + 1, row)),
        (Orientation::Horizontal, false) => {
            col.checked_sub(1).map(|col| (col, row))
        },
        (Orientation::Vertical, true) => Some((col, row + 1)),
        (Orientation::Vertical, false) => {
            row.checked_sub(1).map(|row| (col, row))
        },
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }

            write!(f, "{}", self.row_string(row, '.'))?;
        }

        Ok(())
    }
}
