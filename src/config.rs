// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! What to carve, and how.

use crate::error::SeamError;
use crate::executor::Executor;
use std::fmt;
use std::str::FromStr;

/// The strategy used to find each seam.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Recompute every cost and the full table for every seam.
    Standard,
    /// Compute the costs once, then patch them around each removed
    /// seam.  Same seams as `Standard`, less work.
    Update,
    /// Greedy chains instead of a full table.  Faster, not optimal.
    Approximate,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Standard
    }
}

impl FromStr for Mode {
    type Err = SeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "s" => Ok(Mode::Standard),
            "update" | "u" => Ok(Mode::Update),
            "approximate" | "approx" | "a" => Ok(Mode::Approximate),
            _ => Err(SeamError::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Mode::Standard => "standard",
            Mode::Update => "update",
            Mode::Approximate => "approximate",
        };
        write!(f, "{}", name)
    }
}

/// A carving run: how many seams, which strategy, and where the
/// kernels run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CarveConfig {
    pub seams: usize,
    pub mode: Mode,
    pub executor: Executor,
}

impl CarveConfig {
    pub fn new(seams: usize) -> Self {
        CarveConfig {
            seams,
            mode: Mode::default(),
            executor: Executor::default(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    /// Checked once, before any work: at least one column must
    /// survive.
    pub fn validate(&self, width: usize) -> Result<(), SeamError> {
        if self.seams >= width {
            return Err(SeamError::SeamCountOutOfRange {
                seams: self.seams,
                width,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_by_name_or_initial() {
        assert_eq!("standard".parse::<Mode>(), Ok(Mode::Standard));
        assert_eq!("U".parse::<Mode>(), Ok(Mode::Update));
        assert_eq!("approx".parse::<Mode>(), Ok(Mode::Approximate));
        assert_eq!(
            "sideways".parse::<Mode>(),
            Err(SeamError::UnknownMode("sideways".to_string()))
        );
    }

    #[test]
    fn modes_print_their_names() {
        for mode in &[Mode::Standard, Mode::Update, Mode::Approximate] {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(*mode));
        }
    }

    #[test]
    fn seam_count_must_leave_a_column() {
        assert!(CarveConfig::new(0).validate(1).is_ok());
        assert!(CarveConfig::new(9).validate(10).is_ok());
        assert_eq!(
            CarveConfig::new(10).validate(10),
            Err(SeamError::SeamCountOutOfRange {
                seams: 10,
                width: 10
            })
        );
    }
}
