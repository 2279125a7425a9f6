// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::mem;

/// Two buffers of the same shape: one holding the current state, and
/// one to write the next state into.  After the write the two trade
/// names, so nothing is reallocated and no kernel ever reads the
/// buffer it is writing.
#[derive(Debug)]
pub struct PingPong<T> {
    current: T,
    next: T,
}

impl<T> PingPong<T> {
    pub fn new(current: T, next: T) -> Self {
        PingPong { current, next }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut T {
        &mut self.current
    }

    /// The current buffer to read, and the next one to write.
    pub fn split(&mut self) -> (&T, &mut T) {
        (&self.current, &mut self.next)
    }

    /// The next buffer becomes the current one.
    pub fn flip(&mut self) {
        mem::swap(&mut self.current, &mut self.next);
    }

    pub fn into_current(self) -> T {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_relabels_the_slots() {
        let mut slots = PingPong::new(vec![1], vec![0]);
        {
            let (current, next) = slots.split();
            next[0] = current[0] + 1;
        }
        slots.flip();
        assert_eq!(slots.current(), &vec![2]);
        slots.flip();
        assert_eq!(slots.into_current(), vec![1]);
    }
}
