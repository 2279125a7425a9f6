// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parallel argmin over one row of the cumulative table.
//!
//! Each pass of the reduction pairs up neighbouring candidates and
//! keeps the better of each pair, halving the field until one
//! candidate is left.  Pairs are always (lower index, higher index),
//! and the lower index keeps a tie, so the answer is the same one a
//! plain left-to-right scan gives, whatever the number of lanes.

use crate::error::SeamError;
use crate::executor::Executor;

#[inline]
fn better<T: Ord + Copy>(low: (T, usize), high: (T, usize)) -> (T, usize) {
    if high.0 < low.0 {
        high
    } else {
        low
    }
}

/// The index of the smallest value in `row`, lowest index on ties.
pub fn min_index<T>(exec: &Executor, row: &[T]) -> Result<usize, SeamError>
where
    T: Ord + Copy + Send + Sync,
{
    assert!(!row.is_empty(), "cannot reduce an empty row");
    let mut candidates: Vec<(T, usize)> = row.iter().copied().zip(0..).collect();

    while candidates.len() > 1 {
        let count = candidates.len();
        let mut next = candidates[..(count + 1) / 2].to_vec();
        {
            let current = &candidates;
            exec.dispatch_row(&mut next, |i, slot| {
                let low = current[2 * i];
                *slot = match current.get(2 * i + 1) {
                    Some(high) => better(low, *high),
                    None => low,
                };
            })?;
        }
        candidates = next;
    }
    Ok(candidates[0].1)
}

/// The reference answer: a left-to-right scan.
pub fn linear_min_index<T: Ord + Copy>(row: &[T]) -> usize {
    row.iter()
        .enumerate()
        .min_by_key(|(_, v)| **v)
        .map(|(i, _)| i)
        .expect("cannot scan an empty row")
}
