// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The forward-energy cost field.
//!
//! Removing a pixel makes its left and right neighbours adjacent and
//! tears down the two edges it had with them.  Depending on which way
//! the seam came from above, one more pair of pixels becomes adjacent
//! vertically.  The cost of each of the three ways a seam can enter a
//! pixel is the energy of the edges created less the energy of the
//! edges destroyed:
//!
//! ```text
//! CU(x,y) = D[(x−1,y),(x+1,y)] − D[(x−1,y),(x,y)] − D[(x,y),(x+1,y)]
//! CL(x,y) = CU(x,y) + D[(x,y−1),(x−1,y)]
//! CR(x,y) = CU(x,y) + D[(x,y−1),(x+1,y)]
//! ```
//!
//! Costs are signed: carving a dark pixel out of a bright field
//! lowers the energy of the image.  Pixels past the border of the
//! grid, including the row above the top row, contribute no edge.

use crate::cq;
use crate::error::SeamError;
use crate::executor::Executor;
use crate::pixelgrid::PixelGrid;
use crate::pixelpairs::energy_of_edge;
use crate::twodmap::TwoDimensionalMap;

/// The cost of entering one pixel from the upper-left, straight
/// above, or the upper-right.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct CostTriple {
    pub left: i16,
    pub up: i16,
    pub right: i16,
}

pub type CostField = TwoDimensionalMap<CostTriple>;

/// The three entering costs of the pixel at `(x, y)`.
pub fn cost_of_pixel(grid: &PixelGrid, x: usize, y: usize) -> CostTriple {
    let current = Some(&grid[(x, y)]);
    let (left, right, up) = (
        cq!(x == 0, None, Some(&grid[(x - 1, y)])),
        cq!(x + 1 >= grid.width(), None, Some(&grid[(x + 1, y)])),
        cq!(y == 0, None, Some(&grid[(x, y - 1)])),
    );

    let cost_up = energy_of_edge(left, right)
        - energy_of_edge(left, current)
        - energy_of_edge(current, right);
    CostTriple {
        left: cost_up + energy_of_edge(up, left),
        up: cost_up,
        right: cost_up + energy_of_edge(up, right),
    }
}

/// Recompute the entire cost field for the grid as it stands.
pub fn compute_costs(
    exec: &Executor,
    grid: &PixelGrid,
    costs: &mut CostField,
) -> Result<(), SeamError> {
    costs.set_width(grid.width());
    exec.dispatch(costs, |x, y, cost| *cost = cost_of_pixel(grid, x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixelgrid::Pixel;

    fn grey(v: u8) -> Pixel {
        Pixel::new(v, v, v)
    }

    #[test]
    fn interior_costs_follow_the_forward_energy_rules() {
        // 3x2, checking the middle pixel of the bottom row.
        let grid = TwoDimensionalMap::from_vec(
            3,
            2,
            vec![grey(0), grey(10), grey(0), grey(1), grey(50), grey(5)],
        );
        let cost = cost_of_pixel(&grid, 1, 1);
        // 3 * (|1 - 5| - |1 - 50| - |50 - 5|)
        assert_eq!(cost.up, -270);
        // + 3 * |10 - 1|
        assert_eq!(cost.left, -270 + 27);
        // + 3 * |10 - 5|
        assert_eq!(cost.right, -270 + 15);
    }

    #[test]
    fn edges_past_the_border_do_not_count() {
        let grid = TwoDimensionalMap::from_vec(2, 1, vec![grey(0), grey(2)]);
        let only_the_inner_edge = CostTriple {
            left: -6,
            up: -6,
            right: -6,
        };
        assert_eq!(cost_of_pixel(&grid, 0, 0), only_the_inner_edge);
        assert_eq!(cost_of_pixel(&grid, 1, 0), only_the_inner_edge);
    }

    #[test]
    fn a_single_column_costs_nothing() {
        let grid = TwoDimensionalMap::from_vec(1, 2, vec![grey(0), grey(200)]);
        assert_eq!(cost_of_pixel(&grid, 0, 1), CostTriple::default());
    }

    #[test]
    fn the_field_matches_pixel_by_pixel_costs() {
        let data: Vec<Pixel> = (0..40u8).map(|v| Pixel::new(v * 3, v, 255 - v)).collect();
        let grid = TwoDimensionalMap::from_vec(8, 5, data);
        for exec in &[Executor::Sequential, Executor::with_lanes(3)] {
            let mut costs = CostField::new(8, 5);
            compute_costs(exec, &grid, &mut costs).unwrap();
            for y in 0..5 {
                for x in 0..8 {
                    assert_eq!(costs[(x, y)], cost_of_pixel(&grid, x, y));
                }
            }
        }
    }
}
