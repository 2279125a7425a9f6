// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The cumulative cost table
//!
//! `M(x,y)` is the cheapest way to reach pixel `(x, y)` from the top
//! row, one row at a time:
//!
//! ```text
//!           ⎧ M(x−1,y−1)+CL(x,y)
//! M(x,y)=min⎨ M(x,y−1)+CU(x,y)
//!           ⎩ M(x+1,y−1)+CR(x,y)
//! ```
//!
//! with `M(x,0) = CU(x,0)`.  Every cell of a row depends only on the
//! row above it, so a row is one kernel dispatch and the dispatches
//! are issued strictly top to bottom.
//!
//! The direction each cell chose is not stored.  The tracer asks
//! `cheapest_entry` again with the same inputs and gets the same
//! answer, so there is exactly one place where ties are broken.

use crate::costs::{CostField, CostTriple};
use crate::error::SeamError;
use crate::executor::Executor;
use crate::twodmap::TwoDimensionalMap;

pub type CumulativeCostTable = TwoDimensionalMap<i32>;

/// Which pixel in the row above a seam came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    /// From the upper-left, `x - 1`.
    Left,
    /// From straight above.
    Up,
    /// From the upper-right, `x + 1`.
    Right,
}

impl Step {
    /// The column in the row above this step leads back to.
    pub fn parent_of(self, x: usize) -> usize {
        match self {
            Step::Left => x - 1,
            Step::Up => x,
            Step::Right => x + 1,
        }
    }
}

/// The cheapest way into column `x`, given the finished row above.
/// Ties go to straight up, then the upper-left, then the upper-right:
/// a later candidate only wins if it is strictly cheaper.
#[inline]
pub fn cheapest_entry(above: &[i32], cost: &CostTriple, x: usize) -> (i32, Step) {
    let mut best = (above[x] + i32::from(cost.up), Step::Up);
    if x > 0 {
        let candidate = above[x - 1] + i32::from(cost.left);
        if candidate < best.0 {
            best = (candidate, Step::Left);
        }
    }
    if x + 1 < above.len() {
        let candidate = above[x + 1] + i32::from(cost.right);
        if candidate < best.0 {
            best = (candidate, Step::Right);
        }
    }
    best
}

/// Fill `table` from the cost field, top row first.
pub fn build_table(
    exec: &Executor,
    costs: &CostField,
    table: &mut CumulativeCostTable,
) -> Result<(), SeamError> {
    let (width, height) = (costs.width(), costs.height());
    table.set_width(width);

    let top = costs.row(0);
    exec.dispatch_row(table.row_mut(0), |x, m| *m = i32::from(top[x].up))?;

    // Row y must not start until row y - 1 is complete; returning from
    // the dispatch is that guarantee.
    for y in 1..height {
        let (above, current) = table.split_rows_mut(y);
        let row_costs = costs.row(y);
        exec.dispatch_row(current, |x, m| {
            *m = cheapest_entry(above, &row_costs[x], x).0
        })?;
    }
    Ok(())
}
