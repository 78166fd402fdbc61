//! State index implementation for transition systems.
//!
//! This module provides the [`StateIndex`] type, a strongly-typed handle for vertices
//! of a [`StateSpace`](crate::StateSpace). Indices are supplied by whoever generates the
//! states and are sparse: they need not be contiguous, and the reserved value
//! [`StateIndex::UNDEFINED`] (`-1`) denotes "no such state".

use std::fmt;

/// A strongly-typed, sparse identifier for states within a state space.
///
/// `StateIndex` wraps an `i32`, mirroring the signed indices produced by state space
/// generators. Unlike graph node identifiers, indices are never assigned by the
/// [`StateSpace`](crate::StateSpace) itself: every [`State`](crate::State) value carries
/// its own index.
///
/// # Examples
///
/// ```rust
/// use statespace::StateIndex;
///
/// let index = StateIndex::new(7);
/// assert_eq!(index.value(), 7);
/// assert!(index.is_defined());
/// assert!(StateIndex::UNDEFINED.is_undefined());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateIndex(pub(crate) i32);

/// The sentinel index denoting an absent state (e.g. an initial state that was never set).
pub const UNDEFINED: StateIndex = StateIndex::UNDEFINED;

impl StateIndex {
    /// The reserved sentinel value `-1`.
    pub const UNDEFINED: StateIndex = StateIndex(-1);

    /// Creates a new `StateIndex` from a raw index value.
    ///
    /// # Arguments
    ///
    /// * `index` - The raw index value; `-1` yields [`StateIndex::UNDEFINED`]
    #[must_use]
    #[inline]
    pub const fn new(index: i32) -> Self {
        StateIndex(index)
    }

    /// Returns the raw index value.
    #[must_use]
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns `true` if this is the [`StateIndex::UNDEFINED`] sentinel.
    #[must_use]
    #[inline]
    pub const fn is_undefined(self) -> bool {
        self.0 == Self::UNDEFINED.0
    }

    /// Returns `true` if this index refers to an actual state.
    #[must_use]
    #[inline]
    pub const fn is_defined(self) -> bool {
        !self.is_undefined()
    }
}

impl Default for StateIndex {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl fmt::Debug for StateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateIndex({})", self.0)
    }
}

impl fmt::Display for StateIndex {
    /// Formats the raw index, as used in dumps and DOT node names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for StateIndex {
    #[inline]
    fn from(index: i32) -> Self {
        StateIndex(index)
    }
}

impl From<StateIndex> for i32 {
    #[inline]
    fn from(index: StateIndex) -> Self {
        index.0
    }
}
