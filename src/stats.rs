use core::time::Duration;
use std::time::Instant;

use crate::observe::{Observer, Rotation};

/// An [`Observer`] which counts balancing work and times rebalancing.
///
/// ```
/// use boxed_avl::{Avl, AvlTree, Rotation, SearchTree, Stats};
///
/// let mut tree: AvlTree<u32, Stats> = SearchTree::with_balancer(Avl::with_observer(Stats::new()));
/// tree.extend([1, 2, 3]);
///
/// let stats = tree.balancer().observer();
/// assert_eq!(stats.rotations(Rotation::Left), 1);
/// assert!(stats.probes() > 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Stats {
    probes: u64,
    compares: u64,
    rotations: [u64; 4],
    elapsed: Duration,
    started: Option<Instant>,
}

impl Stats {
    pub fn new() -> Stats {
        Stats::default()
    }

    /// Returns the number of cached heights read by the balancer.
    pub fn probes(&self) -> u64 {
        self.probes
    }

    /// Returns the number of height comparisons made by the balancer.
    pub fn compares(&self) -> u64 {
        self.compares
    }

    /// Returns the number of times `rotation` was applied.
    pub fn rotations(&self, rotation: Rotation) -> u64 {
        self.rotations[rotation as usize]
    }

    /// Returns the total number of rotations of any kind.
    pub fn total_rotations(&self) -> u64 {
        self.rotations.iter().sum()
    }

    /// Returns the total time spent rebalancing.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Resets every counter and the elapsed time to zero.
    pub fn reset(&mut self) {
        *self = Stats::default();
    }
}

impl Observer for Stats {
    fn heights_read(&mut self, count: u32) {
        self.probes += u64::from(count);
    }

    fn compared(&mut self) {
        self.compares += 1;
    }

    fn rotated(&mut self, rotation: Rotation) {
        self.rotations[rotation as usize] += 1;
    }

    fn rebalance_started(&mut self) {
        self.started = Some(Instant::now());
    }

    fn rebalance_finished(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed += started.elapsed();
        }
    }
}
