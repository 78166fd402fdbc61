//! State identity layer.
//!
//! This module defines the vocabulary shared by every part of the crate:
//!
//! - [`StateIndex`] - sparse vertex handle with the [`UNDEFINED`] sentinel
//! - [`State`] - the trait a vertex payload has to implement
//! - [`InstanceInfo`] - shared, read-only context states are interpreted against
//! - [`PlanningState`] - reference [`State`] implementation over ground atoms
//!
//! It also names the containers used throughout the crate. All of them are
//! insertion-ordered, which keeps traversal order, dumps and DOT output reproducible.

mod index;
mod instance;

pub use index::{StateIndex, UNDEFINED};
pub use instance::{same_instance, InstanceInfo, PlanningState, State};

use indexmap::{IndexMap, IndexSet};

/// A set of state indices.
pub type StateIndices = IndexSet<StateIndex>;

/// Directed edge relation: state index to the set of its successor indices.
pub type AdjacencyList = IndexMap<StateIndex, StateIndices>;

/// Length of a shortest path, in number of transitions.
pub type Distance = u32;

/// Distances keyed by state index. Absence of an entry means "unreachable".
pub type Distances = IndexMap<StateIndex, Distance>;

/// State index to state payload.
pub type StateMapping<S> = IndexMap<StateIndex, S>;
