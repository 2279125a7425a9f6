// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seams, and tracing them back out of the cumulative table.

use crate::costs::CostField;
use crate::cq;
use crate::cumulative::{cheapest_entry, CumulativeCostTable};
use itertools::Itertools;
use std::ops::Index;

/// One column index per row, top to bottom, each within one column
/// of the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<usize>);

impl Seam {
    pub fn from_columns(columns: Vec<usize>) -> Self {
        Seam(columns)
    }

    pub fn columns(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if no two consecutive rows are more than a column apart.
    pub fn is_connected(&self) -> bool {
        self.0
            .iter()
            .tuple_windows()
            .all(|(a, b)| cq!(a > b, a - b, b - a) <= 1)
    }
}

impl Index<usize> for Seam {
    type Output = usize;

    fn index(&self, row: usize) -> &usize {
        &self.0[row]
    }
}

/// Walk the table from `(start, height - 1)` back up to the top row,
/// asking at every row which parent the table builder would have
/// chosen.  A column outside the grid means the table or the
/// reduction is broken, and that is not something to paper over.
pub fn trace_seam(table: &CumulativeCostTable, costs: &CostField, start: usize) -> Seam {
    let (width, height) = (table.width(), table.height());
    let mut seam_col = start;

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    let columns: Vec<usize> = (0..height)
        .rev()
        .fold(Vec::<usize>::with_capacity(height), |mut acc, y| {
            assert!(
                seam_col < width,
                "seam traced to column {} of {} at row {}",
                seam_col,
                width,
                y
            );
            acc.push(seam_col);
            if y > 0 {
                let (_, step) = cheapest_entry(table.row(y - 1), &costs[(seam_col, y)], seam_col);
                seam_col = step.parent_of(seam_col);
            }
            acc
        })
        .into_iter()
        .rev()
        .collect();
    Seam(columns)
}
