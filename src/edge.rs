//! Edge detection over a polled boolean level stream.
//!
//! Each channel owns one [`EdgeDetector`]. The supervisor feeds it the level
//! sampled this tick; the detector compares against the previous sample and
//! reports the transition, if any. Edges are transient values — computed,
//! consumed by the state machine, and discarded within the same tick.

/// A transition between two consecutive samples of a boolean line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Low → high.
    Rising,
    /// High → low.
    Falling,
    /// No change.
    None,
}

/// Per-channel level comparator.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    /// Level seen on the previous tick. `None` until the first sample.
    prev: Option<bool>,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self { prev: None }
    }

    /// Classify the newly sampled level against the previous one and store
    /// it. The first sample establishes the baseline and reports no edge.
    pub fn sample(&mut self, level: bool) -> Edge {
        let edge = match self.prev {
            Some(prev) if !prev && level => Edge::Rising,
            Some(prev) if prev && !level => Edge::Falling,
            _ => Edge::None,
        };
        self.prev = Some(level);
        edge
    }

    /// The last sampled level, if any sample has been taken.
    pub fn level(&self) -> Option<bool> {
        self.prev
    }
}

impl Default for EdgeDetector {
    fn default() -> Self {
        Self::new()
    }
}
