// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Approximate seams from greedy chains
//!
//! Instead of a full table, every pixel simply picks the cheapest
//! pixel to step down to in the row below.  That produces one greedy
//! chain from every pixel of the top row to the bottom.  The cost of
//! each chain is summed with pointer jumping: after round `k`, every
//! pixel knows the sum of the next `2^k` steps of its chain and where
//! those steps end, so the sums are complete after `⌈log2 h⌉` rounds
//! instead of `h` dependent rows.  The cheapest chain from the top row
//! is the seam.
//!
//! The chains are only locally optimal.  They are connected by
//! construction, since each step moves at most one column.
//!
//! The maps are rebuilt from the grid on every call and never carried
//! over to the next seam.

use crate::costs::cost_of_pixel;
use crate::cq;
use crate::error::SeamError;
use crate::executor::Executor;
use crate::pingpong::PingPong;
use crate::pixelgrid::PixelGrid;
use crate::reduce::min_index;
use crate::seam::Seam;
use crate::twodmap::TwoDimensionalMap;
use log::trace;

/// Where a pixel's greedy chain goes next, and what that step costs.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Successor {
    pub column: usize,
    pub cost: i32,
}

/// A pointer-jumping cell: the flat offset the chain has reached so
/// far, and the cost accumulated along the way.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Jump {
    pub target: usize,
    pub sum: i32,
}

/// For every pixel, the column its chain steps to in the next row.
pub type IndexMap = TwoDimensionalMap<Successor>;

/// For every pixel, how far its chain has been summed.
pub type OffsetMap = TwoDimensionalMap<Jump>;

/// The cheapest step down from `(x, y)`.  The candidates are straight
/// down, down-right, and down-left, each costing whatever it costs to
/// enter that pixel from `(x, y)`.  Ties go the same way the exact
/// table breaks them: straight, then the pixel entered from its
/// upper-left, then the one entered from its upper-right.
pub fn cheapest_successor(grid: &PixelGrid, x: usize, y: usize) -> Successor {
    let below = y + 1;
    let mut best = Successor {
        column: x,
        cost: i32::from(cost_of_pixel(grid, x, below).up),
    };
    if x + 1 < grid.width() {
        let cost = i32::from(cost_of_pixel(grid, x + 1, below).left);
        if cost < best.cost {
            best = Successor { column: x + 1, cost };
        }
    }
    if x > 0 {
        let cost = i32::from(cost_of_pixel(grid, x - 1, below).right);
        if cost < best.cost {
            best = Successor { column: x - 1, cost };
        }
    }
    best
}

/// The scratch space of the approximate mode, allocated once at the
/// original image size.
#[derive(Debug)]
pub struct ApproxEngine {
    index_map: IndexMap,
    offsets: PingPong<OffsetMap>,
}

impl ApproxEngine {
    pub fn new(width: usize, height: usize) -> Self {
        ApproxEngine {
            index_map: IndexMap::new(width, height),
            offsets: PingPong::new(OffsetMap::new(width, height), OffsetMap::new(width, height)),
        }
    }

    /// Build the index map and seed the offset map with single steps.
    /// The bottom row points at itself at no cost, so chains that
    /// have arrived stay put.  A top-row seed also carries the cost of
    /// removing its own pixel, as row 0 of the exact table does.
    pub fn setup(&mut self, exec: &Executor, grid: &PixelGrid) -> Result<(), SeamError> {
        let (width, height) = (grid.width(), grid.height());
        let last = height - 1;
        self.index_map.set_width(width);
        exec.dispatch(&mut self.index_map, |x, y, successor| {
            *successor = if y == last {
                Successor { column: x, cost: 0 }
            } else {
                cheapest_successor(grid, x, y)
            };
        })?;

        let index_map = &self.index_map;
        let seeds = self.offsets.current_mut();
        seeds.set_width(width);
        exec.dispatch(seeds, |x, y, jump| {
            let successor = index_map[(x, y)];
            let row = cq!(y == last, y, y + 1);
            let own = cq!(y == 0, i32::from(cost_of_pixel(grid, x, 0).up), 0);
            *jump = Jump {
                target: index_map.offset_of(successor.column, row),
                sum: own + successor.cost,
            };
        })
    }

    /// Sum every chain by pointer jumping.  Each round reads one
    /// buffer and writes the other, so no round sees its own output.
    pub fn accumulate(&mut self, exec: &Executor) -> Result<(), SeamError> {
        let height = self.index_map.height();
        let mut span = 1;
        while span < height - 1 {
            {
                let (current, next) = self.offsets.split();
                next.set_width(current.width());
                let cells = current.raw();
                exec.dispatch(next, |x, y, jump| {
                    let own = cells[current.offset_of(x, y)];
                    let ahead = cells[own.target];
                    *jump = Jump {
                        target: ahead.target,
                        sum: own.sum + ahead.sum,
                    };
                })?;
            }
            self.offsets.flip();
            span *= 2;
            trace!("approximate chains summed over {} rows", span.min(height - 1));
        }
        Ok(())
    }

    /// The summed cost of the chain starting at every top-row pixel.
    pub fn chain_costs(&self) -> Vec<i32> {
        self.offsets.current().row(0).iter().map(|j| j.sum).collect()
    }

    /// Follow the index map down from `(start, 0)`.
    pub fn seam(&self, start: usize) -> Seam {
        let (width, height) = (self.index_map.width(), self.index_map.height());
        let mut seam_col = start;
        let columns = (0..height)
            .map(|y| {
                assert!(
                    seam_col < width,
                    "approximate seam reached column {} of {} at row {}",
                    seam_col,
                    width,
                    y
                );
                let here = seam_col;
                seam_col = self.index_map[(seam_col, y)].column;
                here
            })
            .collect();
        Seam::from_columns(columns)
    }

    /// Setup, accumulate, reduce, and follow: one approximate seam.
    pub fn find_seam(&mut self, exec: &Executor, grid: &PixelGrid) -> Result<Seam, SeamError> {
        self.setup(exec, grid)?;
        self.accumulate(exec)?;
        let start = min_index(exec, &self.chain_costs())?;
        Ok(self.seam(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixelgrid::Pixel;

    fn grey(v: u8) -> Pixel {
        Pixel::new(v, v, v)
    }

    fn diagonal(width: usize, height: usize, columns: &[usize]) -> PixelGrid {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| cq!(columns[y] == x, grey(0), grey(255)))
            .collect();
        TwoDimensionalMap::from_vec(width, height, data)
    }

    /// Walk every chain one row at a time.
    fn slow_chain_costs(engine: &ApproxEngine, grid: &PixelGrid) -> Vec<i32> {
        let map = &engine.index_map;
        (0..map.width())
            .map(|start| {
                let mut x = start;
                let steps: i32 = (0..map.height() - 1)
                    .map(|y| {
                        let step = map[(x, y)];
                        x = step.column;
                        step.cost
                    })
                    .sum();
                i32::from(cost_of_pixel(grid, start, 0).up) + steps
            })
            .collect()
    }

    #[test]
    fn successors_prefer_straight_down_on_ties() {
        let grid = TwoDimensionalMap::from_vec(3, 2, vec![grey(9); 6]);
        assert_eq!(
            cheapest_successor(&grid, 1, 0),
            Successor { column: 1, cost: 0 }
        );
    }

    #[test]
    fn chains_follow_the_dark_trail() {
        let grid = diagonal(4, 3, &[0, 1, 2]);
        let mut engine = ApproxEngine::new(4, 3);
        let seam = engine.find_seam(&Executor::Sequential, &grid).unwrap();
        assert_eq!(seam.columns(), &[0, 1, 2]);
    }

    #[test]
    fn pointer_jumping_matches_walking_the_chains() {
        for height in 1..12 {
            let columns: Vec<usize> = (0..height).map(|y| (y * 7 + 3) % 5).collect();
            let grid = diagonal(6, height, &columns);
            for exec in &[Executor::Sequential, Executor::with_lanes(3)] {
                let mut engine = ApproxEngine::new(6, height);
                engine.setup(exec, &grid).unwrap();
                engine.accumulate(exec).unwrap();
                assert_eq!(
                    engine.chain_costs(),
                    slow_chain_costs(&engine, &grid),
                    "height {}",
                    height
                );
                let seam = engine.seam(min_index(exec, &engine.chain_costs()).unwrap());
                assert_eq!(seam.len(), height);
                assert!(seam.is_connected());
            }
        }
    }

    #[test]
    fn a_single_row_takes_its_darkest_pixel() {
        let grid = diagonal(3, 1, &[2]);
        let mut engine = ApproxEngine::new(3, 1);
        let seam = engine.find_seam(&Executor::Sequential, &grid).unwrap();
        assert_eq!(seam.columns(), &[2]);
        assert_eq!(engine.chain_costs(), vec![0, 0, -765]);
    }

    #[test]
    fn chains_pay_for_their_top_pixel() {
        // Only the top row has a dark pixel; every step below it is free.
        let data = (0..6)
            .map(|i| cq!(i == 2, grey(0), grey(255)))
            .collect();
        let grid = TwoDimensionalMap::from_vec(3, 2, data);
        let mut engine = ApproxEngine::new(3, 2);
        let seam = engine.find_seam(&Executor::Sequential, &grid).unwrap();
        assert_eq!(seam.columns(), &[2, 2]);
        assert_eq!(engine.chain_costs(), vec![0, 0, -765]);
    }
}
