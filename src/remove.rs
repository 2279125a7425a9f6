// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Take a seam out of the grid.

use crate::cq;
use crate::error::SeamError;
use crate::executor::Executor;
use crate::pixelgrid::PixelGrid;
use crate::seam::Seam;

/// Write `src` minus the seam into `dst`, one column narrower.  Every
/// pixel left of the seam stays put and every pixel right of it moves
/// one column left, so rows and the order within rows survive.
pub fn remove_seam(
    exec: &Executor,
    src: &PixelGrid,
    dst: &mut PixelGrid,
    seam: &Seam,
) -> Result<(), SeamError> {
    assert_eq!(seam.len(), src.height(), "a seam needs one column per row");
    assert!(src.width() > 1, "cannot carve the last column");
    dst.set_width(src.width() - 1);
    exec.dispatch(dst, |x, y, pixel| {
        *pixel = src[(cq!(x < seam[y], x, x + 1), y)];
    })
}
