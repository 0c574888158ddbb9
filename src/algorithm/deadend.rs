use std::collections::VecDeque;

use tracing::warn;

use crate::io::configuration::MAX_RECORDED_DEADENDS;
use crate::spatial::tiles::{EdgeCode, Side};

/// Tile index substituted when propagation would leave a cell with nothing
pub const SENTINEL_TILE: usize = 0;

/// Record of one sentinel substitution
///
/// A deadend is repaired in place and generation continues. Nothing is rolled
/// back, so the event is the only trace that the neighbor's constraints were
/// violated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeadendEvent {
    /// Cell whose constraints were being propagated
    pub source: (usize, usize),
    /// Neighbor whose possibility set ran empty
    pub target: (usize, usize),
    /// Side of the neighbor that was checked
    pub side: Side,
    /// Edge codes the source allowed on that side
    pub allowed: Vec<EdgeCode>,
}

/// Running tally of deadends seen since creation or the last reset
///
/// The count covers every deadend. Only the most recent
/// `MAX_RECORDED_DEADENDS` events are kept, so a long scrolling run stays
/// within a fixed footprint.
#[derive(Clone, Debug, Default)]
pub struct DeadendLog {
    total: usize,
    recent: VecDeque<DeadendEvent>,
}

impl DeadendLog {
    /// Create an empty log
    pub const fn new() -> Self {
        Self {
            total: 0,
            recent: VecDeque::new(),
        }
    }

    /// Store an event and emit a warning for it
    ///
    /// The oldest kept event is dropped once the buffer is full.
    pub fn record(&mut self, event: DeadendEvent) {
        warn!(
            source = ?event.source,
            target = ?event.target,
            side = ?event.side,
            allowed = ?event.allowed,
            "deadend: substituted sentinel tile {SENTINEL_TILE}"
        );
        self.total += 1;
        if self.recent.len() == MAX_RECORDED_DEADENDS {
            self.recent.pop_front();
        }
        self.recent.push_back(event);
    }

    /// Number of deadends recorded, including dropped events
    pub const fn count(&self) -> usize {
        self.total
    }

    /// Whether no deadend has been recorded
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Kept events, oldest first
    pub fn events(&self) -> impl Iterator<Item = &DeadendEvent> + '_ {
        self.recent.iter()
    }

    /// Whether a kept event targets the given cell
    pub fn touched(&self, position: (usize, usize)) -> bool {
        self.recent.iter().any(|event| event.target == position)
    }

    /// Forget all recorded events and reset the count
    pub fn clear(&mut self) {
        self.total = 0;
        self.recent.clear();
    }
}
