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
use std::io;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use super::sizing::Dimension;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingOrder {
    // By the sum of the column and row of the first letter
    #[default]
    Diagonal,
    // Row by row, then by column within a row
    Reading,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cols: Dimension,
    pub rows: Dimension,
    pub empty: char,
    pub max_loops: usize,
    pub rounds: usize,
    pub best_of: usize,
    pub force_solved: bool,
    // Seconds
    pub time_permitted: Option<f64>,
    pub numbering: NumberingOrder,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Json(serde_json::Error),
    ZeroBestOf,
    ZeroRounds,
    ZeroMaxLoops,
    BadTimePermitted(f64),
    LetterAsEmpty(char),
    GridTooBig {
        cols: usize,
        rows: usize,
    },
}

impl Default for Config {
    fn default() -> Config {
        Config {
            cols: Dimension::Auto,
            rows: Dimension::Auto,
            empty: '-',
            max_loops: 2000,
            rounds: 2,
            best_of: 3,
            force_solved: false,
            time_permitted: None,
            numbering: NumberingOrder::Diagonal,
        }
    }
}

impl Config {
    pub fn from_json_reader<R: io::Read>(reader: R) -> Result<Config, ConfigError> {
        let config = serde_json::from_reader::<_, Config>(reader)?;

        config.validate()?;

        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = std::fs::File::open(path)?;

        Config::from_json_reader(io::BufReader::new(file))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.best_of == 0 {
            return Err(ConfigError::ZeroBestOf);
        }

        if self.rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }

        if self.max_loops == 0 {
            return Err(ConfigError::ZeroMaxLoops);
        }

        if let Some(seconds) = self.time_permitted {
            if seconds <= 0.0 || Duration::try_from_secs_f64(seconds).is_err() {
                return Err(ConfigError::BadTimePermitted(seconds));
            }
        }

        if self.empty.is_alphabetic() {
            return Err(ConfigError::LetterAsEmpty(self.empty));
        }

        Ok(())
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_permitted
            .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "{}", e),
            ConfigError::Json(e) => write!(f, "{}", e),
            ConfigError::ZeroBestOf => write!(f, "best_of must be at least 1"),
            ConfigError::ZeroRounds => write!(f, "rounds must be at least 1"),
            ConfigError::ZeroMaxLoops => {
                write!(f, "max_loops must be at least 1")
            },
            ConfigError::BadTimePermitted(seconds) => {
                write!(f, "invalid time_permitted: {}", seconds)
            },
            ConfigError::LetterAsEmpty(ch) => {
                write!(f, "the empty marker “{}” can’t be a letter", ch)
            },
            ConfigError::GridTooBig { cols, rows } => {
                write!(f, "a {}×{} grid is too big", cols, rows)
            },
        }
    }
}

impl std::error::Error for ConfigError {
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> ConfigError {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> ConfigError {
        ConfigError::Json(e)
    }
}
