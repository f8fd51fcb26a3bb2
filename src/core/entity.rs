//! Card instance identification.
//!
//! Every physical card in a match gets a fresh `InstanceId` when the
//! starting decks are built. Ids are never reused within a match, and zone
//! slots refer to cards by id rather than by pointer.
//!
//! ```
//! use duel_kernel::core::{InstanceAllocator, InstanceId};
//!
//! let mut ids = InstanceAllocator::default();
//! let first = ids.alloc();
//! let second = ids.alloc();
//!
//! assert_eq!(first, InstanceId(1));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Create an instance ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for instance ids.
///
/// Starts at 1 so that 0 never names a real card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceAllocator {
    next: u32,
}

impl Default for InstanceAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl InstanceAllocator {
    /// Allocate the next id.
    pub fn alloc(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_id_display() {
        assert_eq!(format!("{}", InstanceId::new(7)), "#7");
        assert_eq!(InstanceId::new(7).raw(), 7);
    }

    #[test]
    fn test_allocator_is_monotonic() {
        let mut ids = InstanceAllocator::default();
        let allocated: Vec<_> = (0..5).map(|_| ids.alloc()).collect();

        assert_eq!(allocated, vec![
            InstanceId(1),
            InstanceId(2),
            InstanceId(3),
            InstanceId(4),
            InstanceId(5),
        ]);
        assert_eq!(ids.allocated(), 5);
    }
}
