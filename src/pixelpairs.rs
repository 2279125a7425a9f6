// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a pixel pair
//!
//! Given two pixels, the energy between them is the distance between
//! the colors that make them up, measured channel by channel:
//!
//! ```text
//! D(p1, p2) = |Δr| + |Δg| + |Δb|
//! ```
//!
//! The result never exceeds 3 × 255, so a cost built from a handful
//! of them still fits in an `i16`.  An edge with a pixel missing,
//! because it lies past the border of the grid, has no energy.

use crate::pixelgrid::Pixel;
use num_traits::abs;

/// (Pixel, Pixel) -> Energy
#[inline]
pub fn energy_of_pair(p1: &Pixel, p2: &Pixel) -> i16 {
    p1.channels()
        .iter()
        .zip(p2.channels().iter())
        .map(|(c1, c2)| abs(i16::from(*c1) - i16::from(*c2)))
        .sum()
}

/// The energy of an edge that may not exist.
#[inline]
pub fn energy_of_edge(p1: Option<&Pixel>, p2: Option<&Pixel>) -> i16 {
    match (p1, p2) {
        (Some(p1), Some(p2)) => energy_of_pair(p1, p2),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric_and_bounded() {
        let (black, white) = (Pixel::new(0, 0, 0), Pixel::new(255, 255, 255));
        assert_eq!(energy_of_pair(&black, &white), 765);
        assert_eq!(energy_of_pair(&white, &black), 765);
        assert_eq!(energy_of_pair(&white, &white), 0);
    }

    #[test]
    fn channels_add_up() {
        let p1 = Pixel::new(10, 20, 30);
        let p2 = Pixel::new(13, 15, 30);
        assert_eq!(energy_of_pair(&p1, &p2), 8);
    }

    #[test]
    fn missing_pixels_make_no_edge() {
        let p = Pixel::new(200, 0, 0);
        assert_eq!(energy_of_edge(None, Some(&p)), 0);
        assert_eq!(energy_of_edge(Some(&p), None), 0);
        assert_eq!(energy_of_edge(Some(&p), Some(&Pixel::default())), 200);
    }
}
