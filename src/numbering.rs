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
use super::config::NumberingOrder;
use super::word::Word;

fn start(word: &Word) -> (usize, usize) {
    word.placement()
        .map(|placement| (placement.col, placement.row))
        .unwrap_or((usize::MAX, usize::MAX))
}

fn sort_key(word: &Word, order: NumberingOrder) -> (usize, usize) {
    let (col, row) = start(word);

    match order {
        NumberingOrder::Diagonal => (col.saturating_add(row), 0),
        NumberingOrder::Reading => (row, col),
    }
}

/// Gives a clue number to every placed word that doesn’t have one.
///
/// `placed` is re-sorted into numbering order. Words that start on the
/// same cell, such as 1 across and 1 down, share a number. Numbers
/// that are already in use are skipped.
pub fn number_words(
    words: &mut [Word],
    placed: &mut [usize],
    order: NumberingOrder,
) {
    // Stable so that ties stay in the order the words were placed
    placed.sort_by_key(|&word_num| sort_key(&words[word_num], order));

    let mut numbers_by_start = placed.iter()
        .filter_map(|&word_num| {
            let word = &words[word_num];
            word.number().map(|number| (start(word), number))
        })
        .collect::<HashMap<_, _>>();
    let mut used = numbers_by_start.values().copied().collect::<HashSet<_>>();
    let mut next_number = 1;

    for &word_num in placed.iter() {
        let word = &mut words[word_num];

        if word.number().is_some() {
            continue;
        }

        let cell = start(word);

        let number = match numbers_by_start.get(&cell) {
            Some(&number) => number,
            None => {
                while used.contains(&next_number) {
                    next_number += 1;
                }

                used.insert(next_number);
                numbers_by_start.insert(cell, next_number);

                next_number
            },
        };

        word.set_number(number);
    }
}
