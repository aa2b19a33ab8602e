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
use std::time::Duration;
use super::config::ConfigError;

#[derive(Debug)]
pub enum WordListError {
    TooFewEntries(usize),
    EmptyAnswer(usize),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SolutionError {
    MissingLetter(char),
    NotEnoughLetters {
        letter: char,
        wanted: usize,
        available: usize,
    },
}

#[derive(Debug)]
pub enum Error {
    WordList(WordListError),
    MaxLoop {
        loops: usize,
        word: Option<String>,
    },
    TimeOut(Duration),
    Solution(SolutionError),
    Config(ConfigError),
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WordListError::TooFewEntries(count) => {
                write!(
                    f,
                    "need at least {} entries but the word list has {}",
                    super::crossword::MIN_WORDS,
                    count,
                )
            },
            WordListError::EmptyAnswer(entry_num) => {
                write!(f, "entry {}: the answer is empty", entry_num + 1)
            },
        }
    }
}

impl fmt::Display for SolutionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolutionError::MissingLetter(letter) => {
                write!(
                    f,
                    "cannot mark solution letter “{}”: there is no “{}” \
                     in this crossword",
                    letter,
                    letter,
                )
            },
            SolutionError::NotEnoughLetters { letter, wanted, available } => {
                write!(
                    f,
                    "the solution needs {} × “{}” but the crossword only has {}",
                    wanted,
                    letter,
                    available,
                )
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::WordList(e) => write!(f, "{}", e),
            Error::MaxLoop { loops, word: Some(word) } => {
                write!(
                    f,
                    "couldn’t place “{}” within {} tries",
                    word,
                    loops,
                )
            },
            Error::MaxLoop { loops, word: None } => {
                write!(f, "couldn’t solve the crossword within {} tries", loops)
            },
            Error::TimeOut(duration) => {
                write!(
                    f,
                    "couldn’t solve the crossword within {:.1} seconds",
                    duration.as_secs_f64(),
                )
            },
            Error::Solution(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for WordListError {
}

impl std::error::Error for SolutionError {
}

impl std::error::Error for Error {
}

impl From<WordListError> for Error {
    fn from(e: WordListError) -> Error {
        Error::WordList(e)
    }
}

impl From<SolutionError> for Error {
    fn from(e: SolutionError) -> Error {
        Error::Solution(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Error {
        Error::Config(e)
    }
}
