//! Side identification and per-side data storage.
//!
//! ## SideId
//!
//! A duel always has exactly two sides. `SideId::A` moves first.
//!
//! ## SideMap
//!
//! Per-side storage indexed by `SideId`, the two-seat counterpart of a
//! per-player map.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two duelists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SideId {
    /// The side that takes the first turn.
    A,
    /// The side that moves second.
    B,
}

impl SideId {
    /// Both sides in seating order.
    pub const BOTH: [SideId; 2] = [SideId::A, SideId::B];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            SideId::A => SideId::B,
            SideId::B => SideId::A,
        }
    }

    /// Seat index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            SideId::A => 0,
            SideId::B => 1,
        }
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideId::A => write!(f, "A"),
            SideId::B => write!(f, "B"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use duel_kernel::core::{SideId, SideMap};
///
/// let mut life: SideMap<i64> = SideMap::with_value(8000);
/// life[SideId::B] -= 1500;
///
/// assert_eq!(life[SideId::A], 8000);
/// assert_eq!(life[SideId::B], 6500);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    a: T,
    b: T,
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(SideId) -> T) -> Self {
        let a = factory(SideId::A);
        let b = factory(SideId::B);
        Self { a, b }
    }

    /// Create a map from explicit values.
    pub const fn from_pair(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            a: value.clone(),
            b: value,
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: SideId) -> &T {
        match side {
            SideId::A => &self.a,
            SideId::B => &self.b,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: SideId) -> &mut T {
        match side {
            SideId::A => &mut self.a,
            SideId::B => &mut self.b,
        }
    }

    /// Iterate over (SideId, &T) pairs in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (SideId, &T)> {
        [(SideId::A, &self.a), (SideId::B, &self.b)].into_iter()
    }

    /// Map both entries into a new `SideMap`.
    pub fn map<U>(&self, mut f: impl FnMut(SideId, &T) -> U) -> SideMap<U> {
        SideMap {
            a: f(SideId::A, &self.a),
            b: f(SideId::B, &self.b),
        }
    }
}

impl<T> Index<SideId> for SideMap<T> {
    type Output = T;

    fn index(&self, side: SideId) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<SideId> for SideMap<T> {
    fn index_mut(&mut self, side: SideId) -> &mut Self::Output {
        self.get_mut(side)
    }
}
