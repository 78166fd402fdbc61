//! Sparse-indexed transition systems.
//!
//! This module provides [`StateSpace`], the aggregate root of the crate. A state space owns
//! its vertices (states, keyed by their own [`StateIndex`]), the directed transition
//! relation stored twice (forward and as its transpose, backward), the distinguished initial
//! state and the set of goal states.
//!
//! # Architecture
//!
//! - [`StateSpace`] (this file) - construction, fragment copies, mutation, merge, queries
//! - [`search`] - multi-source breadth-first search over either direction
//! - [`information`] - immutable analysis snapshots ([`GoalDistanceInformation`],
//!   [`StateInformation`])
//! - [`render`] - human-readable dumps and DOT export
//!
//! # Invariants
//!
//! Every public operation preserves the following:
//!
//! - every index in either adjacency map is a vertex of the state space
//! - `v ∈ forward[u]` if and only if `u ∈ backward[v]`
//! - goal indices are vertices
//! - the initial index is either [`UNDEFINED`](crate::state::UNDEFINED) or a vertex
//!
//! Operations that could break an invariant validate their input first and return an
//! [`Error`] without touching the state space.

mod information;
mod render;
mod search;

pub use information::{GoalDistanceInformation, StateInformation};
pub use render::Verbosity;
pub use search::{Bfs, Direction};

use std::{ops::BitOrAssign, sync::Arc};

use indexmap::map::{Entry, Keys, Values};

use crate::{
    log::{debug, trace, warn},
    state::{
        same_instance, AdjacencyList, InstanceInfo, State, StateIndex, StateIndices,
        StateMapping,
    },
    Error, Result,
};

/// A transition system over states of type `S`.
///
/// Vertices are identified by the index each state carries, so the set of vertex indices
/// and the set of stored states always describe the same vertices. Indices are sparse and
/// supplied by the states themselves; the state space never assigns them.
///
/// Cloning a `StateSpace` deep-copies its containers and shares the
/// [`InstanceInfo`] handle.
///
/// # Examples
///
/// ```rust
/// use statespace::{InstanceInfo, PlanningState, StateIndex, StateSpace};
///
/// let instance = InstanceInfo::shared("chain", vec!["p".into(), "q".into()]);
/// let mut space = StateSpace::empty(&instance);
///
/// space.add_state(PlanningState::new(&instance, vec![], StateIndex::new(0)))?;
/// space.add_state(PlanningState::new(&instance, vec![0], StateIndex::new(1)))?;
/// space.add_transition(StateIndex::new(0), StateIndex::new(1))?;
/// space.set_initial_state_index(StateIndex::new(0))?;
/// space.set_goal_state_indices([StateIndex::new(1)].into_iter().collect())?;
///
/// let info = space.compute_goal_distance_information();
/// assert_eq!(info.get_goal_distance(StateIndex::new(0)), Some(1));
/// # Ok::<(), statespace::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StateSpace<S: State> {
    /// The planning instance all states belong to.
    instance_info: Arc<InstanceInfo>,
    /// Vertices, keyed by the index of the stored state.
    states: StateMapping<S>,
    /// `UNDEFINED` or a vertex.
    initial_state_index: StateIndex,
    /// Subset of the vertices.
    goal_state_indices: StateIndices,
    /// Transition relation.
    forward_successor_state_indices: AdjacencyList,
    /// Transpose of `forward_successor_state_indices`, kept in lock-step.
    backward_successor_state_indices: AdjacencyList,
}

impl<S: State> StateSpace<S> {
    /// Creates a fully formed state space.
    ///
    /// The forward transition relation and the goal set are moved in; the backward relation
    /// is derived from the forward one.
    ///
    /// # Arguments
    ///
    /// * `instance_info` - The planning instance all `states` belong to
    /// * `states` - The vertices; duplicates (by value) are collapsed
    /// * `initial_state_index` - The initial state, or `UNDEFINED`
    /// * `forward_successor_state_indices` - The transition relation
    /// * `goal_state_indices` - The goal states
    ///
    /// # Errors
    ///
    /// - [`Error::InstanceMismatch`] if a state belongs to another instance
    /// - [`Error::UndefinedIndex`] if a state carries the `UNDEFINED` index
    /// - [`Error::IndexConflict`] if two different states carry the same index
    /// - [`Error::Malformed`] if the initial state, a goal state or a transition endpoint is
    ///   not one of `states`
    pub fn new(
        instance_info: Arc<InstanceInfo>,
        states: impl IntoIterator<Item = S>,
        initial_state_index: StateIndex,
        forward_successor_state_indices: AdjacencyList,
        goal_state_indices: StateIndices,
    ) -> Result<Self> {
        let mut mapping = StateMapping::new();
        for state in states {
            check_state(&instance_info, &state)?;
            match mapping.entry(state.index()) {
                Entry::Occupied(entry) => {
                    if *entry.get() != state {
                        return Err(Error::IndexConflict(state.index()));
                    }
                }
                Entry::Vacant(entry) => {
                    entry.insert(state);
                }
            }
        }

        if initial_state_index.is_defined() && !mapping.contains_key(&initial_state_index) {
            return Err(malformed_error!(
                "initial state {} is not a state of the state space",
                initial_state_index
            ));
        }

        if let Some(goal) = goal_state_indices
            .iter()
            .find(|goal| !mapping.contains_key(*goal))
        {
            return Err(malformed_error!(
                "goal state {} is not a state of the state space",
                goal
            ));
        }

        let mut backward_successor_state_indices = AdjacencyList::new();
        for (&source, targets) in &forward_successor_state_indices {
            if !mapping.contains_key(&source) {
                return Err(malformed_error!(
                    "transition source {} is not a state of the state space",
                    source
                ));
            }
            for &target in targets {
                if !mapping.contains_key(&target) {
                    return Err(malformed_error!(
                        "transition {} -> {} leaves the state space",
                        source,
                        target
                    ));
                }
                backward_successor_state_indices
                    .entry(target)
                    .or_default()
                    .insert(source);
            }
        }

        let state_space = Self {
            instance_info,
            states: mapping,
            initial_state_index,
            goal_state_indices,
            forward_successor_state_indices,
            backward_successor_state_indices,
        };
        debug!(
            "Created state space for '{}' with {} states, {} transitions and {} goals",
            state_space.instance_info.get_name(),
            state_space.get_num_states(),
            state_space.get_num_transitions(),
            state_space.goal_state_indices.len()
        );
        Ok(state_space)
    }

    /// Creates a state space without states, transitions or goals.
    ///
    /// The initial state index is `UNDEFINED`. States and transitions are added
    /// incrementally with [`StateSpace::add_state`] and [`StateSpace::add_transition`].
    #[must_use]
    pub fn empty(instance_info: &Arc<InstanceInfo>) -> Self {
        Self {
            instance_info: Arc::clone(instance_info),
            states: StateMapping::new(),
            initial_state_index: StateIndex::UNDEFINED,
            goal_state_indices: StateIndices::new(),
            forward_successor_state_indices: AdjacencyList::new(),
            backward_successor_state_indices: AdjacencyList::new(),
        }
    }

    /// Creates a copy of `other` restricted to a fragment of its states.
    ///
    /// The new vertex set is `expanded_fragment ∪ generated_fragment`. States of the expanded
    /// fragment keep their outgoing transitions as far as the targets lie within the new
    /// vertex set. States of the generated fragment keep no outgoing transitions, but may
    /// still be targets of transitions from expanded states. The initial state is kept if it
    /// lies in the fragment and becomes `UNDEFINED` otherwise; goals outside the fragment are
    /// dropped.
    ///
    /// # Arguments
    ///
    /// * `other` - The state space to copy from
    /// * `expanded_fragment` - States whose outgoing transitions are copied
    /// * `generated_fragment` - States copied as vertices only
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if a fragment index is not a state of `other`.
    pub fn from_fragment(
        other: &StateSpace<S>,
        expanded_fragment: &StateIndices,
        generated_fragment: &StateIndices,
    ) -> Result<Self> {
        if let Some(&index) = expanded_fragment
            .iter()
            .chain(generated_fragment)
            .find(|index| !other.contains_state_index(**index))
        {
            return Err(Error::OutOfBounds(index));
        }

        let states: StateMapping<S> = expanded_fragment
            .iter()
            .chain(generated_fragment)
            .filter_map(|index| other.states.get_key_value(index))
            .map(|(&index, state)| (index, state.clone()))
            .collect();

        let initial_state_index = if states.contains_key(&other.initial_state_index) {
            other.initial_state_index
        } else {
            StateIndex::UNDEFINED
        };

        let goal_state_indices = other
            .goal_state_indices
            .iter()
            .filter(|goal| states.contains_key(*goal))
            .copied()
            .collect();

        let mut fragment = Self {
            instance_info: Arc::clone(&other.instance_info),
            states,
            initial_state_index,
            goal_state_indices,
            forward_successor_state_indices: AdjacencyList::new(),
            backward_successor_state_indices: AdjacencyList::new(),
        };

        for &source in expanded_fragment {
            for target in other.forward_successors(source) {
                if fragment.contains_state_index(target) {
                    fragment.insert_transition(source, target);
                }
            }
        }

        debug!(
            "Created fragment with {} states ({} expanded) and {} transitions",
            fragment.get_num_states(),
            expanded_fragment.len(),
            fragment.get_num_transitions()
        );
        Ok(fragment)
    }

    /// Adds a state, or returns the stored state if an equal one is already present.
    ///
    /// The state's own index becomes a vertex of the state space. No transitions are created.
    ///
    /// # Arguments
    ///
    /// * `state` - The state to add
    ///
    /// # Returns
    ///
    /// A reference to the canonical stored copy of `state`.
    ///
    /// # Errors
    ///
    /// - [`Error::InstanceMismatch`] if `state` belongs to another instance
    /// - [`Error::UndefinedIndex`] if `state` carries the `UNDEFINED` index
    /// - [`Error::IndexConflict`] if a different state is stored under the same index
    pub fn add_state(&mut self, state: S) -> Result<&S> {
        check_state(&self.instance_info, &state)?;

        match self.states.entry(state.index()) {
            Entry::Occupied(entry) => {
                if *entry.get() != state {
                    warn!("Rejected state {:?}: index is already bound", state);
                    return Err(Error::IndexConflict(state.index()));
                }
                let stored: &S = entry.into_mut();
                Ok(stored)
            }
            Entry::Vacant(entry) => {
                trace!("Added state {}", state.index());
                let stored: &S = entry.insert(state);
                Ok(stored)
            }
        }
    }

    /// Adds the transition `source -> target`.
    ///
    /// Both adjacency maps are updated together; the bounds check happens before either is
    /// touched.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the transition is new, `Ok(false)` if it already existed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `source` or `target` is not a state of the state
    /// space.
    pub fn add_transition(&mut self, source: StateIndex, target: StateIndex) -> Result<bool> {
        for index in [source, target] {
            if !self.contains_state_index(index) {
                warn!("Rejected transition {} -> {}: {} is out of bounds", source, target, index);
                return Err(Error::OutOfBounds(index));
            }
        }

        Ok(self.insert_transition(source, target))
    }

    /// Sets the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `index` is neither `UNDEFINED` nor a state of the
    /// state space.
    pub fn set_initial_state_index(&mut self, index: StateIndex) -> Result<()> {
        if index.is_defined() && !self.contains_state_index(index) {
            return Err(Error::OutOfBounds(index));
        }

        self.initial_state_index = index;
        Ok(())
    }

    /// Replaces the set of goal states.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for the first index that is not a state of the state
    /// space; the goal set is left unchanged in that case.
    pub fn set_goal_state_indices(&mut self, goal_state_indices: StateIndices) -> Result<()> {
        if let Some(&goal) = goal_state_indices
            .iter()
            .find(|goal| !self.contains_state_index(**goal))
        {
            return Err(Error::OutOfBounds(goal));
        }

        self.goal_state_indices = goal_state_indices;
        Ok(())
    }

    /// Merges `other` into this state space.
    ///
    /// States, goal states and transitions become the union of both operands. The initial
    /// state of `self` is kept; the one of `other` is discarded.
    ///
    /// # Returns
    ///
    /// `self`, to allow chaining.
    ///
    /// # Errors
    ///
    /// - [`Error::InstanceMismatch`] if the operands belong to different instances
    /// - [`Error::IndexConflict`] if both operands store different states under one index
    ///
    /// Nothing is merged if an error is returned.
    pub fn merge(&mut self, other: &StateSpace<S>) -> Result<&mut Self> {
        if !same_instance(&self.instance_info, &other.instance_info) {
            return Err(Error::InstanceMismatch);
        }

        if let Some((&index, _)) = other
            .states
            .iter()
            .find(|(index, state)| self.states.get(*index).is_some_and(|own| own != *state))
        {
            return Err(Error::IndexConflict(index));
        }

        self.union_with(other);
        Ok(self)
    }

    fn union_with(&mut self, other: &StateSpace<S>) {
        for (&index, state) in &other.states {
            self.states.entry(index).or_insert_with(|| state.clone());
        }

        self.goal_state_indices
            .extend(other.goal_state_indices.iter().copied());

        for (&source, targets) in &other.forward_successor_state_indices {
            for &target in targets {
                self.insert_transition(source, target);
            }
        }

        debug!(
            "Merged state space: now {} states, {} transitions and {} goals",
            self.get_num_states(),
            self.get_num_transitions(),
            self.goal_state_indices.len()
        );
    }

    /// Inserts a transition into both adjacency maps. Endpoints must be vertices.
    fn insert_transition(&mut self, source: StateIndex, target: StateIndex) -> bool {
        let added = self
            .forward_successor_state_indices
            .entry(source)
            .or_default()
            .insert(target);
        self.backward_successor_state_indices
            .entry(target)
            .or_default()
            .insert(source);
        added
    }

    /// Returns the shared instance handle.
    #[must_use]
    pub fn get_instance_info(&self) -> &Arc<InstanceInfo> {
        &self.instance_info
    }

    /// Returns the stored states, in insertion order.
    pub fn get_states(&self) -> Values<'_, StateIndex, S> {
        self.states.values()
    }

    /// Returns the indices of all states, in insertion order.
    pub fn get_state_indices(&self) -> Keys<'_, StateIndex, S> {
        self.states.keys()
    }

    /// Returns the index to state mapping backing this state space.
    #[must_use]
    pub fn get_state_mapping(&self) -> &StateMapping<S> {
        &self.states
    }

    /// Returns the state stored under `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateNotFound`] if there is no such state.
    pub fn get_state(&self, index: StateIndex) -> Result<&S> {
        self.states.get(&index).ok_or(Error::StateNotFound(index))
    }

    /// Returns the number of states.
    #[must_use]
    pub fn get_num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transitions.
    #[must_use]
    pub fn get_num_transitions(&self) -> usize {
        self.forward_successor_state_indices
            .values()
            .map(StateIndices::len)
            .sum()
    }

    /// Returns `true` if `index` is a state of this state space.
    #[must_use]
    pub fn contains_state_index(&self, index: StateIndex) -> bool {
        self.states.contains_key(&index)
    }

    /// Returns the initial state index, which may be `UNDEFINED`.
    #[must_use]
    pub fn get_initial_state_index(&self) -> StateIndex {
        self.initial_state_index
    }

    /// Returns the initial state, if one is set.
    #[must_use]
    pub fn get_initial_state(&self) -> Option<&S> {
        self.states.get(&self.initial_state_index)
    }

    /// Returns the goal states.
    #[must_use]
    pub fn get_goal_state_indices(&self) -> &StateIndices {
        &self.goal_state_indices
    }

    /// Returns `true` if `index` is a goal state.
    #[must_use]
    pub fn is_goal(&self, index: StateIndex) -> bool {
        self.goal_state_indices.contains(&index)
    }

    /// Returns `true` if `index` is not a goal state.
    #[must_use]
    pub fn is_nongoal(&self, index: StateIndex) -> bool {
        !self.is_goal(index)
    }

    /// Returns the forward transition relation.
    #[must_use]
    pub fn get_forward_successor_state_indices(&self) -> &AdjacencyList {
        &self.forward_successor_state_indices
    }

    /// Returns the backward transition relation (the transpose of the forward one).
    #[must_use]
    pub fn get_backward_successor_state_indices(&self) -> &AdjacencyList {
        &self.backward_successor_state_indices
    }

    /// Returns an iterator over the successors of `index`.
    pub fn forward_successors(&self, index: StateIndex) -> impl Iterator<Item = StateIndex> + '_ {
        successors_in(&self.forward_successor_state_indices, index)
    }

    /// Returns an iterator over the predecessors of `index`.
    pub fn backward_successors(&self, index: StateIndex) -> impl Iterator<Item = StateIndex> + '_ {
        successors_in(&self.backward_successor_state_indices, index)
    }

    /// Calls `f` once for every state index.
    pub fn for_each_state_index<F: FnMut(StateIndex)>(&self, f: F) {
        self.states.keys().copied().for_each(f);
    }

    /// Calls `f` once for every successor of `index`.
    pub fn for_each_forward_successor_state_index<F: FnMut(StateIndex)>(
        &self,
        index: StateIndex,
        f: F,
    ) {
        self.forward_successors(index).for_each(f);
    }

    /// Calls `f` once for every predecessor of `index`.
    pub fn for_each_backward_successor_state_index<F: FnMut(StateIndex)>(
        &self,
        index: StateIndex,
        f: F,
    ) {
        self.backward_successors(index).for_each(f);
    }
}

impl<S: State> BitOrAssign<&StateSpace<S>> for StateSpace<S> {
    /// Unchecked union, see [`StateSpace::merge`].
    ///
    /// Index collisions between different states keep the state of `self`. Operands of
    /// different instances are merged anyway; use [`StateSpace::merge`] to reject both.
    fn bitor_assign(&mut self, other: &StateSpace<S>) {
        if !same_instance(&self.instance_info, &other.instance_info) {
            warn!(
                "Merging state spaces of different instances '{}' and '{}'",
                self.instance_info.get_name(),
                other.instance_info.get_name()
            );
        }
        self.union_with(other);
    }
}

fn successors_in(
    adjacency: &AdjacencyList,
    index: StateIndex,
) -> impl Iterator<Item = StateIndex> + '_ {
    adjacency.get(&index).into_iter().flatten().copied()
}

fn check_state<S: State>(instance_info: &Arc<InstanceInfo>, state: &S) -> Result<()> {
    if !same_instance(instance_info, state.instance_info()) {
        return Err(Error::InstanceMismatch);
    }
    if state.index().is_undefined() {
        return Err(Error::UndefinedIndex);
    }
    Ok(())
}
