// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field backing every per-pixel
/// product of the carver: the pixels themselves, the cost triples,
/// the cumulative cost table, and the approximation maps.
///
/// The storage is allocated once at the original width (the
/// `stride`) and never reallocated.  Carving only lowers `width`, so
/// the live region of each row is `[0, width)` and the tail of the
/// row is dead space.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map filled with `P::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            data: vec![P::default(); width * height],
        }
    }

    /// Wrap an existing row-major vector.
    pub fn from_vec(width: usize, height: usize, data: Vec<P>) -> Self {
        assert_eq!(data.len(), width * height, "map data does not fit its dimensions");
        TwoDimensionalMap {
            width,
            height,
            stride: width,
            data,
        }
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    #[inline]
    fn get_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.stride + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Change the live width.  Never grows past the allocation.
    pub fn set_width(&mut self, width: usize) {
        assert!(width <= self.stride, "a map cannot grow past its allocation");
        self.width = width;
    }

    /// The live part of row `y`.
    pub fn row(&self, y: usize) -> &[P] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [P] {
        let start = y * self.stride;
        let width = self.width;
        &mut self.data[start..start + width]
    }

    /// Row `y - 1` for reading and row `y` for writing, at once.
    pub fn split_rows_mut(&mut self, y: usize) -> (&[P], &mut [P]) {
        assert!(y > 0 && y < self.height);
        let (width, stride) = (self.width, self.stride);
        let (above, rest) = self.data.split_at_mut(y * stride);
        let above = &above[(y - 1) * stride..(y - 1) * stride + width];
        (above, &mut rest[..width])
    }

    /// The whole strided backing store, dead space included.
    pub fn raw(&self) -> &[P] {
        &self.data
    }

    pub fn raw_mut(&mut self) -> &mut [P] {
        &mut self.data
    }

    /// Flat address of a pixel inside the backing store.
    pub fn offset_of(&self, x: usize, y: usize) -> usize {
        self.get_index(x, y)
    }

    /// The live region, row after row, without the dead tails.
    pub fn to_packed(&self) -> Vec<P> {
        (0..self.height).flat_map(|y| self.row(y).iter().copied()).collect()
    }
}

impl<P: Default + Copy> Index<(usize, usize)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (usize, usize)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(usize, usize)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}
