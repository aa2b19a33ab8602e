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
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::word::Word;

// Word lists longer than this get a grid that is a bit smaller than
// the estimate so that the words are packed more tightly
const LARGE_LIST_THRESHOLD: usize = 75;
const LARGE_LIST_SHRINK: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "DimensionRepr", into = "DimensionRepr")]
pub enum Dimension {
    #[default]
    Auto,
    Fixed(usize),
}

#[derive(Debug, PartialEq, Eq)]
pub enum DimensionParseError {
    Zero,
    Invalid(String),
}

// How a dimension is written in a config file, either a number or
// the string “auto”
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Fixed(usize),
    Named(String),
}

impl FromStr for Dimension {
    type Err = DimensionParseError;

    fn from_str(s: &str) -> Result<Dimension, DimensionParseError> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("auto") {
            return Ok(Dimension::Auto);
        }

        match s.parse::<usize>() {
            Ok(0) => Err(DimensionParseError::Zero),
            Ok(n) => Ok(Dimension::Fixed(n)),
            Err(_) => Err(DimensionParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = DimensionParseError;

    fn try_from(repr: DimensionRepr) -> Result<Dimension, DimensionParseError> {
        match repr {
            DimensionRepr::Fixed(0) => Err(DimensionParseError::Zero),
            DimensionRepr::Fixed(n) => Ok(Dimension::Fixed(n)),
            DimensionRepr::Named(s) => s.parse(),
        }
    }
}

impl From<Dimension> for DimensionRepr {
    fn from(dimension: Dimension) -> DimensionRepr {
        match dimension {
            Dimension::Auto => DimensionRepr::Named("auto".to_string()),
            Dimension::Fixed(n) => DimensionRepr::Fixed(n),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dimension::Auto => write!(f, "auto"),
            Dimension::Fixed(n) => write!(f, "{}", n),
        }
    }
}

impl fmt::Display for DimensionParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DimensionParseError::Zero => {
                write!(f, "grid dimension must be greater than zero")
            },
            DimensionParseError::Invalid(s) => {
                write!(
                    f,
                    "invalid grid dimension “{}”, expected a number or “auto”",
                    s,
                )
            },
        }
    }
}

impl std::error::Error for DimensionParseError {
}

/// Estimates the side of a square grid big enough for the word list.
/// The result is always longer than the longest word.
pub fn auto_size(words: &[Word]) -> usize {
    let Some(longest) = words.iter().map(Word::len).max()
    else {
        return 1;
    };

    let total = words.iter().map(Word::len).sum::<usize>();
    let average = total / words.len();

    let mut size = ((average * words.len() * 4) as f64).sqrt() as usize;

    if words.len() > LARGE_LIST_THRESHOLD {
        size = (size as f64 * LARGE_LIST_SHRINK) as usize;
    }

    while size <= longest {
        size += 1;
    }

    log::debug!(
        "longest word: {}, average length: {}, grid size: {}",
        longest,
        average,
        size,
    );

    size
}

/// Works out the number of columns and rows. An automatic dimension
/// takes the estimated size while a fixed one is used as is.
pub fn grid_size(
    words: &[Word],
    cols: Dimension,
    rows: Dimension,
) -> (usize, usize) {
    let auto = if cols == Dimension::Auto || rows == Dimension::Auto {
        auto_size(words)
    } else {
        0
    };

    let resolve = |dimension| match dimension {
        Dimension::Auto => auto,
        Dimension::Fixed(n) => n,
    };

    (resolve(cols), resolve(rows))
}
