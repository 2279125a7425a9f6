// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The image being carved.
//!
//! Pixels arrive from the codec as a flat, interleaved RGB buffer and
//! leave the same way.  In between they live in a strided map whose
//! live width drops by one with every removed seam.

use crate::error::SeamError;
use crate::twodmap::TwoDimensionalMap;
use image::RgbImage;
use itertools::iproduct;

/// The only channel layout the carver accepts.
pub const CHANNELS: usize = 3;

/// One RGB pixel.  The fourth byte is padding, so a pixel is a single
/// aligned word.
#[repr(C, align(4))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pad: u8,
}

impl Pixel {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Pixel { r, g, b, pad: 0 }
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A row-major grid of pixels, `width × height`, rectangular at all
/// times.
pub type PixelGrid = TwoDimensionalMap<Pixel>;

impl TwoDimensionalMap<Pixel> {
    /// Build a grid from an interleaved buffer, as delivered by a
    /// decoder.  Anything other than three channels is a configuration
    /// error.
    pub fn from_interleaved(
        data: &[u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<PixelGrid, SeamError> {
        if channels != CHANNELS {
            return Err(SeamError::InvalidChannels { channels });
        }
        if width == 0 || height == 0 {
            return Err(SeamError::EmptyImage);
        }
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(SeamError::BufferSize {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(CHANNELS)
            .map(|c| Pixel::new(c[0], c[1], c[2]))
            .collect();
        Ok(TwoDimensionalMap::from_vec(width, height, pixels))
    }

    /// Flatten the live region back into an interleaved RGB buffer of
    /// `width × height × 3` bytes.
    pub fn to_interleaved(&self) -> Vec<u8> {
        iproduct!(0..self.height(), 0..self.width())
            .flat_map(|(y, x)| self[(x, y)].channels().to_vec())
            .collect()
    }

    pub fn from_rgb_image(image: &RgbImage) -> Result<PixelGrid, SeamError> {
        let (width, height) = image.dimensions();
        Self::from_interleaved(image, width as usize, height as usize, CHANNELS)
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_raw(
            self.width() as u32,
            self.height() as u32,
            self.to_interleaved(),
        )
        .expect("an interleaved grid always fills its own dimensions")
    }
}
