// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # statespace
//!
//! Sparse-indexed transition systems for classical planning, with breadth-first analyses
//! on top: shortest distances from any set of states, goal distances, deadend detection and
//! reachability.
//!
//! ## Features
//!
//! - **Sparse indices** - states keep the indices their generator assigned, gaps included
//! - **Bidirectional adjacency** - the transition relation and its transpose are maintained
//!   together, so backward searches need no reconstruction
//! - **Incremental construction** - add states and transitions one at a time, merge state
//!   spaces, or cut out fragments for partial expansion algorithms
//! - **Self-contained snapshots** - [`GoalDistanceInformation`] and [`StateInformation`]
//!   own their data and outlive the state space they were computed from
//! - **Reproducible output** - insertion-ordered containers make traversal order, dumps and
//!   DOT output deterministic
//!
//! ## Quick Start
//!
//! ```rust
//! use statespace::prelude::*;
//!
//! let instance = InstanceInfo::shared("gripper-1", vec!["at-robby(a)".into(), "at-robby(b)".into()]);
//! let at_a = PlanningState::new(&instance, vec![0], StateIndex::new(0));
//! let at_b = PlanningState::new(&instance, vec![1], StateIndex::new(1));
//!
//! let mut forward = AdjacencyList::new();
//! forward.entry(StateIndex::new(0)).or_default().insert(StateIndex::new(1));
//! forward.entry(StateIndex::new(1)).or_default().insert(StateIndex::new(0));
//!
//! let space = StateSpace::new(
//!     instance,
//!     vec![at_a, at_b],
//!     StateIndex::new(0),
//!     forward,
//!     [StateIndex::new(1)].into_iter().collect(),
//! )?;
//!
//! let info = space.compute_goal_distance_information();
//! assert_eq!(info.get_goal_distance(StateIndex::new(0)), Some(1));
//! assert!(info.is_goal(StateIndex::new(1)));
//! assert!(info.get_deadend_state_indices().is_empty());
//! # Ok::<(), statespace::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`state`] - state indices, the [`State`] trait, instances and planning states
//! - [`space`] - the [`StateSpace`] itself, its searches, snapshots and renderings
//! - [`utils`] - DOT escaping
//! - [`prelude`] - convenient re-exports
//! - [`Error`] and [`Result`] - error handling
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, Error>`](Result) and validate their input before
//! changing anything:
//!
//! ```rust
//! use statespace::{Error, InstanceInfo, PlanningState, StateIndex, StateSpace};
//!
//! let instance = InstanceInfo::shared("empty", Vec::new());
//! let mut space: StateSpace<PlanningState> = StateSpace::empty(&instance);
//!
//! match space.add_transition(StateIndex::new(0), StateIndex::new(1)) {
//!     Err(Error::OutOfBounds(index)) => println!("state {index} does not exist"),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
//!
//! ## Logging
//!
//! With the `log` feature enabled, construction, merges and searches emit records through
//! the [`log`](https://docs.rs/log) facade. Without it, the crate does not log at all.

#[macro_use]
pub(crate) mod error;
mod log;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use statespace::prelude::*;
///
/// let instance = InstanceInfo::shared("empty", Vec::new());
/// let space: StateSpace<PlanningState> = StateSpace::empty(&instance);
/// assert_eq!(space.get_num_states(), 0);
/// ```
pub mod prelude;

/// State indices, planning instances and states.
///
/// See [`state::State`] for what a state space requires of its vertices.
pub mod state;

/// The state space, its breadth-first searches, analysis snapshots and renderings.
pub mod space;

/// Helpers shared across modules.
pub mod utils;

/// `statespace` Result type.
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`]. This is used consistently throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// `statespace` Error type.
///
/// All fallible operations of the crate return this error. See [`Error`] for the variants.
pub use error::Error;

/// The transition system and its analysis snapshots.
pub use space::{
    Bfs, Direction, GoalDistanceInformation, StateInformation, StateSpace, Verbosity,
};

/// State identity layer.
pub use state::{
    AdjacencyList, Distance, Distances, InstanceInfo, PlanningState, State, StateIndex,
    StateIndices, StateMapping, UNDEFINED,
};
