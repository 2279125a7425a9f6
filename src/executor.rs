// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pixel-parallel kernel dispatch
//!
//! The carver only ever asks one thing of its compute device: run
//! this per-pixel operation over a 2-D domain, and don't come back
//! until every pixel is written.  Returning from `dispatch` *is* the
//! barrier; nothing downstream can observe a half-written buffer.
//!
//! The target buffer is broken into blocks with `chunks_mut`, so every
//! lane owns a disjoint piece of the output and nothing unsafe is
//! needed.  With the `threaded` feature the blocks go into a
//! work-stealing injector drained by scoped threads; without it, or
//! for small domains, they are simply run in order.

#[cfg(feature = "threaded")]
use crate::cq;
use crate::error::SeamError;
use crate::twodmap::TwoDimensionalMap;

#[cfg(feature = "threaded")]
use crossbeam_deque::{Injector, Steal};

/// Rows handed to a lane as one unit of work.
const ROWS_PER_BLOCK: usize = 16;

/// Columns handed to a lane as one unit of work, for single-row
/// kernels.
const COLUMNS_PER_BLOCK: usize = 256;

/// Below this many cells, waking up threads costs more than the work.
#[cfg(feature = "threaded")]
const PARALLEL_THRESHOLD: usize = 4096;

/// Where kernels run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Executor {
    /// Every block runs on the calling thread, in order.
    Sequential,
    /// Blocks are stolen by `lanes` scoped worker threads.
    #[cfg(feature = "threaded")]
    Threaded { lanes: usize },
}

impl Default for Executor {
    #[cfg(feature = "threaded")]
    fn default() -> Self {
        Executor::with_lanes(num_cpus::get())
    }

    #[cfg(not(feature = "threaded"))]
    fn default() -> Self {
        Executor::Sequential
    }
}

impl Executor {
    /// An executor with the given number of lanes.  Zero or one lane
    /// means sequential.
    #[cfg(feature = "threaded")]
    pub fn with_lanes(lanes: usize) -> Self {
        cq!(lanes <= 1, Executor::Sequential, Executor::Threaded { lanes })
    }

    #[cfg(not(feature = "threaded"))]
    pub fn with_lanes(_lanes: usize) -> Self {
        Executor::Sequential
    }

    pub fn lanes(&self) -> usize {
        match *self {
            Executor::Sequential => 1,
            #[cfg(feature = "threaded")]
            Executor::Threaded { lanes } => lanes,
        }
    }

    /// Run `op(x, y, cell)` for every live cell of `out`.
    pub fn dispatch<T, F>(&self, out: &mut TwoDimensionalMap<T>, op: F) -> Result<(), SeamError>
    where
        T: Default + Copy + Send,
        F: Fn(usize, usize, &mut T) + Sync,
    {
        let (width, height, stride) = (out.width(), out.height(), out.stride());
        if width == 0 || height == 0 {
            return Ok(());
        }
        let blocks: Vec<(usize, &mut [T])> = out
            .raw_mut()
            .chunks_mut(stride * ROWS_PER_BLOCK)
            .enumerate()
            .collect();
        self.run_blocks(width * height, blocks, |(block, cells)| {
            let first_row = block * ROWS_PER_BLOCK;
            for (i, row) in cells.chunks_mut(stride).enumerate() {
                let y = first_row + i;
                for (x, cell) in row[..width].iter_mut().enumerate() {
                    op(x, y, cell);
                }
            }
        })
    }

    /// Run `op(x, cell)` over a single row.  Used where rows depend on
    /// each other and must be issued one at a time.
    pub fn dispatch_row<T, F>(&self, row: &mut [T], op: F) -> Result<(), SeamError>
    where
        T: Send,
        F: Fn(usize, &mut T) + Sync,
    {
        let cells = row.len();
        let blocks: Vec<(usize, &mut [T])> =
            row.chunks_mut(COLUMNS_PER_BLOCK).enumerate().collect();
        self.run_blocks(cells, blocks, |(block, cells)| {
            let first = block * COLUMNS_PER_BLOCK;
            for (i, cell) in cells.iter_mut().enumerate() {
                op(first + i, cell);
            }
        })
    }

    #[cfg(feature = "threaded")]
    fn run_blocks<B, W>(&self, cells: usize, blocks: Vec<B>, work: W) -> Result<(), SeamError>
    where
        B: Send,
        W: Fn(B) + Sync,
    {
        let lanes = match *self {
            Executor::Threaded { lanes } if cells >= PARALLEL_THRESHOLD => lanes.min(blocks.len()),
            _ => 1,
        };
        if lanes <= 1 {
            blocks.into_iter().for_each(work);
            return Ok(());
        }

        let queue = Injector::new();
        blocks.into_iter().for_each(|block| queue.push(block));
        crossbeam::scope(|scope| {
            for _ in 0..lanes {
                let (queue, work) = (&queue, &work);
                scope.spawn(move |_| loop {
                    match queue.steal() {
                        Steal::Success(block) => work(block),
                        Steal::Retry => continue,
                        Steal::Empty => break,
                    }
                });
            }
        })
        .map_err(|_| SeamError::Execution("a compute lane panicked".to_string()))
    }

    #[cfg(not(feature = "threaded"))]
    fn run_blocks<B, W>(&self, _cells: usize, blocks: Vec<B>, work: W) -> Result<(), SeamError>
    where
        B: Send,
        W: Fn(B) + Sync,
    {
        blocks.into_iter().for_each(work);
        Ok(())
    }
}
