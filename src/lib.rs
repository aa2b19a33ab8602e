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

pub mod word;
pub mod grid;
pub mod sizing;
pub mod scorer;
pub mod attempt;
pub mod numbering;
pub mod crossword;
pub mod solution;
pub mod batch;
pub mod config;
pub mod error;
pub mod logger;

pub use config::{Config, NumberingOrder};
pub use crossword::{Crossword, Layout, Stats};
pub use error::{Error, WordListError, SolutionError};
pub use sizing::Dimension;
pub use word::{Word, Placement, Orientation};
