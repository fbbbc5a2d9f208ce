/// The four AVL rotation cases.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Single right rotation (left-left case).
    Right = 0,
    /// Single left rotation (right-right case).
    Left = 1,
    /// Double left-right rotation (left-right case).
    LeftRight = 2,
    /// Double right-left rotation (right-left case).
    RightLeft = 3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Right,
        Rotation::Left,
        Rotation::LeftRight,
        Rotation::RightLeft,
    ];
}

/// Instrumentation hooks called by [`Avl`](crate::Avl) while rebalancing.
///
/// Every method has an empty default, so an observer only implements the events it cares about.
/// The unit type `()` is the no-op observer.
pub trait Observer {
    /// `count` cached heights were read to make a balancing decision.
    fn heights_read(&mut self, count: u32) {
        let _ = count;
    }

    /// Two heights were compared to make a balancing decision.
    fn compared(&mut self) {}

    /// A rotation was applied.
    fn rotated(&mut self, rotation: Rotation) {
        let _ = rotation;
    }

    /// A subtree is about to be rebalanced.
    fn rebalance_started(&mut self) {}

    /// The subtree passed to the matching [`rebalance_started`](Observer::rebalance_started) call
    /// has been rebalanced.
    fn rebalance_finished(&mut self) {}
}

impl Observer for () {}
