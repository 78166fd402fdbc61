//! Immutable analysis snapshots of a [`StateSpace`].
//!
//! Both snapshot types own deep copies of the data they were computed from. The originating
//! state space may be mutated or dropped afterwards without affecting them; only the
//! read-only [`InstanceInfo`] handle is shared.

use std::{fmt, sync::Arc};

use crate::{
    log::debug,
    space::StateSpace,
    state::{Distance, Distances, InstanceInfo, State, StateIndex, StateIndices, StateMapping},
    Error, Result,
};

/// Goal distances and deadends of a state space.
///
/// Every state of the originating state space falls into exactly one class:
///
/// - **goal** - distance 0
/// - **alive** - finite, positive distance to the nearest goal
/// - **deadend** - no goal is reachable
///
/// Created by [`StateSpace::compute_goal_distance_information`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalDistanceInformation {
    goal_distances: Distances,
    deadend_state_indices: StateIndices,
}

impl GoalDistanceInformation {
    pub(crate) fn new(goal_distances: Distances, deadend_state_indices: StateIndices) -> Self {
        Self {
            goal_distances,
            deadend_state_indices,
        }
    }

    /// Returns the distance to the nearest goal of every state that can reach one.
    #[must_use]
    pub fn get_goal_distances(&self) -> &Distances {
        &self.goal_distances
    }

    /// Returns the states from which no goal is reachable.
    #[must_use]
    pub fn get_deadend_state_indices(&self) -> &StateIndices {
        &self.deadend_state_indices
    }

    /// Returns the distance from `index` to the nearest goal, or `None` if there is none.
    #[must_use]
    pub fn get_goal_distance(&self, index: StateIndex) -> Option<Distance> {
        self.goal_distances.get(&index).copied()
    }

    /// Returns the number of deadend states.
    #[must_use]
    pub fn get_num_deadends(&self) -> usize {
        self.deadend_state_indices.len()
    }

    /// Returns the largest finite goal distance, or `None` if no state reaches a goal.
    #[must_use]
    pub fn max_goal_distance(&self) -> Option<Distance> {
        self.goal_distances.values().copied().max()
    }

    /// Returns `true` if `index` has goal distance 0.
    #[must_use]
    pub fn is_goal(&self, index: StateIndex) -> bool {
        self.get_goal_distance(index) == Some(0)
    }

    /// Returns `true` if `index` is not a goal.
    #[must_use]
    pub fn is_nongoal(&self, index: StateIndex) -> bool {
        !self.is_goal(index)
    }

    /// Returns `true` if no goal is reachable from `index`.
    #[must_use]
    pub fn is_deadend(&self, index: StateIndex) -> bool {
        self.deadend_state_indices.contains(&index)
    }

    /// Returns `true` if `index` is neither a goal nor a deadend.
    #[must_use]
    pub fn is_alive(&self, index: StateIndex) -> bool {
        !self.is_goal(index) && !self.is_deadend(index)
    }

    /// Returns `true` if a goal is reachable from `initial_state_index`.
    #[must_use]
    pub fn is_solvable(&self, initial_state_index: StateIndex) -> bool {
        self.goal_distances.contains_key(&initial_state_index)
    }
}

impl fmt::Display for GoalDistanceInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GoalDistanceInformation(goal_distances={")?;
        for (position, (index, distance)) in self.goal_distances.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{index}: {distance}")?;
        }
        f.write_str("}, deadend_state_indices=[")?;
        for (position, index) in self.deadend_state_indices.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{index}")?;
        }
        f.write_str("])")
    }
}

/// Standalone index to state mapping of a state space.
///
/// Created by [`StateSpace::compute_state_information`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateInformation<S: State> {
    instance_info: Arc<InstanceInfo>,
    state_mapping: StateMapping<S>,
}

impl<S: State> StateInformation<S> {
    /// Returns the state with the given index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StateNotFound`] if the snapshot holds no such state.
    pub fn get_state(&self, index: StateIndex) -> Result<&S> {
        self.state_mapping
            .get(&index)
            .ok_or(Error::StateNotFound(index))
    }

    /// Returns `true` if the snapshot holds a state with the given index.
    #[must_use]
    pub fn contains(&self, index: StateIndex) -> bool {
        self.state_mapping.contains_key(&index)
    }

    /// Returns the full index to state mapping.
    #[must_use]
    pub fn get_state_mapping(&self) -> &StateMapping<S> {
        &self.state_mapping
    }

    /// Returns the number of states.
    #[must_use]
    pub fn get_num_states(&self) -> usize {
        self.state_mapping.len()
    }

    /// Returns the instance the states belong to.
    #[must_use]
    pub fn get_instance_info(&self) -> &Arc<InstanceInfo> {
        &self.instance_info
    }
}

impl<S: State + fmt::Display> fmt::Display for StateInformation<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StateInformation({}) {{", self.instance_info.get_name())?;
        for (index, state) in &self.state_mapping {
            writeln!(f, "    {index}: {state}")?;
        }
        f.write_str("}")
    }
}

impl<S: State> StateSpace<S> {
    /// Computes goal distances and deadends.
    ///
    /// Runs one backward breadth-first search from all goal states at once. Every state not
    /// reached by it is a deadend. Without goal states, every state is a deadend.
    #[must_use]
    pub fn compute_goal_distance_information(&self) -> GoalDistanceInformation {
        let goal_distances = self.compute_distances(self.get_goal_state_indices(), false, false);
        let deadend_state_indices: StateIndices = self
            .get_state_indices()
            .filter(|index| !goal_distances.contains_key(*index))
            .copied()
            .collect();

        debug!(
            "Goal distance information: {} solvable state(s), {} deadend(s)",
            goal_distances.len(),
            deadend_state_indices.len()
        );
        GoalDistanceInformation::new(goal_distances, deadend_state_indices)
    }

    /// Computes a standalone copy of the index to state mapping.
    #[must_use]
    pub fn compute_state_information(&self) -> StateInformation<S> {
        StateInformation {
            instance_info: Arc::clone(self.get_instance_info()),
            state_mapping: self.get_state_mapping().clone(),
        }
    }
}
