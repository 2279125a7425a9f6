// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware narrowing of RGB images, one vertical seam at a time.

// #![deny(missing_docs)]

extern crate image;

mod ternary;

pub mod approx;
pub mod config;
pub mod costs;
pub mod cumulative;
pub mod error;
pub mod executor;
pub mod pingpong;
pub mod pixelgrid;
pub mod pixelpairs;
pub mod reduce;
pub mod remove;
pub mod seam;
pub mod seamcarver;
pub mod twodmap;
pub mod update;

pub use config::{CarveConfig, Mode};
pub use error::SeamError;
pub use executor::Executor;
pub use pixelgrid::{Pixel, PixelGrid};
pub use seam::Seam;
pub use seamcarver::{seamcarve, seamcarve_interleaved, SeamCarver};
