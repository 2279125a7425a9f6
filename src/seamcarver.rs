// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! One iteration per seam, always in the same order:
//!
//!   costs -> table -> reduce -> trace -> remove [-> patch costs]
//!
//! In standard mode the costs are recomputed at the top of every
//! iteration.  In update mode they are computed once, before the
//! first iteration, and patched at the bottom of each one.  In
//! approximate mode the costs and the table are replaced by the
//! greedy chains of `ApproxEngine`.
//!
//! The pixels and the costs live in ping-pong pairs allocated at the
//! original size; carving never reallocates.

use crate::approx::ApproxEngine;
use crate::config::{CarveConfig, Mode};
use crate::costs::{compute_costs, CostField};
use crate::cq;
use crate::cumulative::{build_table, CumulativeCostTable};
use crate::error::SeamError;
use crate::pingpong::PingPong;
use crate::pixelgrid::PixelGrid;
use crate::reduce::min_index;
use crate::remove::remove_seam;
use crate::seam::{trace_seam, Seam};
use crate::update::update_costs;
use log::{debug, info, trace};
use std::time::Instant;

/// A carving run in progress.  Owns every buffer it touches for as
/// long as it lives.
pub struct SeamCarver {
    config: CarveConfig,
    pixels: PingPong<PixelGrid>,
    costs: PingPong<CostField>,
    table: CumulativeCostTable,
    approx: Option<ApproxEngine>,
    iterations_done: usize,
}

impl SeamCarver {
    /// Takes ownership of the grid.  The configuration is checked
    /// here, once; a bad one means no work is done at all.
    pub fn new(grid: PixelGrid, config: CarveConfig) -> Result<Self, SeamError> {
        config.validate(grid.width())?;
        let (width, height) = (grid.width(), grid.height());
        let exec = config.executor;

        let scratch = grid.clone();
        let mut costs = PingPong::new(CostField::new(width, height), CostField::new(width, height));
        if config.mode == Mode::Update {
            compute_costs(&exec, &grid, costs.current_mut())?;
        }
        let approx = cq!(
            config.mode == Mode::Approximate,
            Some(ApproxEngine::new(width, height)),
            None
        );

        Ok(SeamCarver {
            config,
            pixels: PingPong::new(grid, scratch),
            costs,
            table: CumulativeCostTable::new(width, height),
            approx,
            iterations_done: 0,
        })
    }

    /// The current width of the image.
    pub fn width(&self) -> usize {
        self.pixels.current().width()
    }

    pub fn height(&self) -> usize {
        self.pixels.current().height()
    }

    pub fn iterations_done(&self) -> usize {
        self.iterations_done
    }

    pub fn is_done(&self) -> bool {
        self.iterations_done == self.config.seams
    }

    /// The image as it stands.
    pub fn grid(&self) -> &PixelGrid {
        self.pixels.current()
    }

    /// Find and remove one seam, and hand it back.
    pub fn step(&mut self) -> Result<Seam, SeamError> {
        assert!(!self.is_done(), "every requested seam is already gone");
        let exec = self.config.executor;
        let height = self.height();

        let seam = match self.approx {
            Some(ref mut approx) => {
                trace!("approximating");
                approx.find_seam(&exec, self.pixels.current())?
            }
            None => {
                if self.config.mode == Mode::Standard {
                    trace!("computing costs");
                    compute_costs(&exec, self.pixels.current(), self.costs.current_mut())?;
                }
                trace!("building the cumulative table");
                build_table(&exec, self.costs.current(), &mut self.table)?;
                trace!("reducing");
                let start = min_index(&exec, self.table.row(height - 1))?;
                trace!("tracing from column {}", start);
                trace_seam(&self.table, self.costs.current(), start)
            }
        };

        trace!("removing");
        {
            let (src, dst) = self.pixels.split();
            remove_seam(&exec, src, dst, &seam)?;
        }
        self.pixels.flip();

        if self.config.mode == Mode::Update {
            trace!("patching costs");
            let (old, new) = self.costs.split();
            update_costs(&exec, self.pixels.current(), &seam, old, new)?;
            self.costs.flip();
        }

        self.iterations_done += 1;
        debug!(
            "seam {} of {} removed, starting at column {}; width now {}",
            self.iterations_done,
            self.config.seams,
            seam[0],
            self.width()
        );
        Ok(seam)
    }

    /// Remove every remaining seam and give back the narrowed image.
    pub fn run(mut self) -> Result<PixelGrid, SeamError> {
        let started = Instant::now();
        info!(
            "carving {} seams from {}x{} in {} mode on {} lane(s)",
            self.config.seams,
            self.width(),
            self.height(),
            self.config.mode,
            self.config.executor.lanes()
        );
        while !self.is_done() {
            self.step()?;
        }
        info!(
            "carved to {}x{} in {:.3} ms",
            self.width(),
            self.height(),
            started.elapsed().as_secs_f64() * 1e3
        );
        Ok(self.pixels.into_current())
    }
}

/// Carve `config.seams` vertical seams out of `grid`.
pub fn seamcarve(grid: PixelGrid, config: CarveConfig) -> Result<PixelGrid, SeamError> {
    SeamCarver::new(grid, config)?.run()
}

/// The codec-facing form: an interleaved buffer in, an interleaved
/// buffer and its new width out.  The height never changes.
pub fn seamcarve_interleaved(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    config: CarveConfig,
) -> Result<(Vec<u8>, usize), SeamError> {
    let grid = PixelGrid::from_interleaved(data, width, height, channels)?;
    let carved = seamcarve(grid, config)?;
    Ok((carved.to_interleaved(), carved.width()))
}
