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

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub col: usize,
    pub row: usize,
    pub orientation: Orientation,
}

#[derive(Clone, Debug, Serialize)]
pub struct Word {
    answer: String,
    #[serde(skip)]
    letters: Vec<char>,
    clue: String,
    placement: Option<Placement>,
    number: Option<u32>,
}

impl Orientation {
    pub fn other(self) -> Orientation {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    // Returns the cell `distance` steps along this orientation from
    // the given cell
    pub fn advance(
        self,
        col: usize,
        row: usize,
        distance: usize,
    ) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (col + distance, row),
            Orientation::Vertical => (col, row + distance),
        }
    }
}

impl Placement {
    pub fn new(col: usize, row: usize, orientation: Orientation) -> Placement {
        Placement { col, row, orientation }
    }

    pub fn cell(&self, letter_num: usize) -> (usize, usize) {
        self.orientation.advance(self.col, self.row, letter_num)
    }

    pub fn cells(&self, length: usize) -> impl Iterator<Item = (usize, usize)> {
        let placement = *self;

        (0..length).map(move |letter_num| placement.cell(letter_num))
    }
}

/// Lower-cases the answer and removes all whitespace from it so that
/// “Ice Cream” and “icecream” end up as the same letters on the grid.
pub fn normalize_answer(answer: &str) -> String {
    answer.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

impl Word {
    pub fn new(answer: &str, clue: &str) -> Word {
        let answer = normalize_answer(answer);
        let letters = answer.chars().collect();

        Word {
            answer,
            letters,
            clue: clue.trim().to_string(),
            placement: None,
            number: None,
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn clue(&self) -> &str {
        &self.clue
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub(crate) fn place(&mut self, placement: Placement) {
        assert!(self.placement.is_none());

        self.placement = Some(placement);
    }

    pub(crate) fn set_number(&mut self, number: u32) {
        assert!(self.placement.is_some());

        self.number = Some(number);
    }

    // Copy of the word as it was before being put on any grid
    pub(crate) fn unplaced(&self) -> Word {
        Word {
            answer: self.answer.clone(),
            letters: self.letters.clone(),
            clue: self.clue.clone(),
            placement: None,
            number: None,
        }
    }
}
