// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors the carver reports to its caller.
//!
//! Only configuration problems and execution failures are values.
//! A seam that walks off the grid or a broken row dependency is a bug
//! in the engine, and those panic instead.

use failure::Fail;

/// Everything that can go wrong before or during a carving run.
#[derive(Debug, Fail, PartialEq)]
pub enum SeamError {
    /// The pixel source was not three-channel RGB.
    #[fail(display = "image has {} channels; only 3-channel RGB can be carved", channels)]
    InvalidChannels { channels: usize },

    /// Asked for more seams than the image can give up.
    #[fail(
        display = "cannot remove {} seams from an image {} pixels wide",
        seams, width
    )]
    SeamCountOutOfRange { seams: usize, width: usize },

    /// The flat pixel buffer does not match the stated dimensions.
    #[fail(display = "pixel buffer holds {} bytes, expected {}", actual, expected)]
    BufferSize { expected: usize, actual: usize },

    #[fail(display = "image has no pixels")]
    EmptyImage,

    #[fail(
        display = "unknown carving mode \"{}\" (expected standard, update, or approximate)",
        _0
    )]
    UnknownMode(String),

    /// A compute lane died while a kernel was running.
    #[fail(display = "kernel dispatch failed: {}", _0)]
    Execution(String),
}
