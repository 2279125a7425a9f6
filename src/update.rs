// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Patching the cost field after a seam comes out.
//!
//! A pixel's costs only look at its two horizontal neighbours and the
//! pixel above it.  After a removal, the only pixels whose
//! neighbourhood changed are the two that closed over the seam, at
//! columns `seam[y] - 1` and `seam[y]` of the narrower grid: because a
//! seam moves at most one column per row, the pixel above anything
//! further away is still the same pixel.  Everything outside a small
//! window around the seam is copied over, shifted left when it sat to
//! the right of the seam, and everything inside is recomputed.

use crate::costs::{cost_of_pixel, CostField};
use crate::cq;
use crate::error::SeamError;
use crate::executor::Executor;
use crate::pixelgrid::PixelGrid;
use crate::seam::Seam;

/// Columns recomputed on each side of the seam.
pub const UPDATE_WINDOW: usize = 2;

/// True when column `x` of the narrowed grid is recomputed rather than
/// copied.
#[inline]
pub fn in_window(x: usize, seam_col: usize) -> bool {
    x + UPDATE_WINDOW >= seam_col && x < seam_col + UPDATE_WINDOW
}

/// Fill `new` with the costs of `grid`, the grid that just lost
/// `seam`, reusing what can be reused from `old`, the costs from
/// before the removal.
pub fn update_costs(
    exec: &Executor,
    grid: &PixelGrid,
    seam: &Seam,
    old: &CostField,
    new: &mut CostField,
) -> Result<(), SeamError> {
    assert_eq!(old.width(), grid.width() + 1, "costs are not one seam behind the grid");
    new.set_width(grid.width());
    exec.dispatch(new, |x, y, cost| {
        let seam_col = seam[y];
        *cost = if in_window(x, seam_col) {
            cost_of_pixel(grid, x, y)
        } else {
            old[(cq!(x < seam_col, x, x + 1), y)]
        };
    })
}
