//! Shared fixtures for unit tests.
//!
//! Every fixture state is a [`PlanningState`] of a fresh test instance whose only true atom
//! is the one at the position of the state's index, so states with different indices never
//! compare equal.

use std::sync::Arc;

use crate::{
    space::StateSpace,
    state::{AdjacencyList, InstanceInfo, PlanningState, StateIndex, StateIndices},
};

/// Create a fresh instance with 16 atoms `at(c0)` .. `at(c15)`.
pub fn test_instance() -> Arc<InstanceInfo> {
    InstanceInfo::shared("test", (0..16).map(|cell| format!("at(c{cell})")).collect())
}

/// Create the canonical fixture state for `index`.
pub fn create_state(instance: &Arc<InstanceInfo>, index: i32) -> PlanningState {
    PlanningState::new(instance, vec![index.unsigned_abs()], StateIndex::new(index))
}

/// Shorthand for [`StateIndex::new`].
pub fn idx(value: i32) -> StateIndex {
    StateIndex::new(value)
}

/// Collect raw values into a set of state indices, keeping their order.
pub fn indices(values: &[i32]) -> StateIndices {
    values.iter().copied().map(StateIndex::new).collect()
}

/// Build a state space over a fresh instance.
///
/// Transitions are inserted in the given order, so adjacency iteration order is predictable.
pub fn create_state_space(
    states: &[i32],
    transitions: &[(i32, i32)],
    initial: i32,
    goals: &[i32],
) -> StateSpace<PlanningState> {
    let instance = test_instance();
    let vertices: Vec<PlanningState> = states
        .iter()
        .map(|&index| create_state(&instance, index))
        .collect();

    let mut forward = AdjacencyList::new();
    for &(source, target) in transitions {
        forward
            .entry(StateIndex::new(source))
            .or_default()
            .insert(StateIndex::new(target));
    }

    StateSpace::new(
        instance,
        vertices,
        StateIndex::new(initial),
        forward,
        indices(goals),
    )
    .expect("fixture state space must be consistent")
}

/// A chain `0 -> 1 -> .. -> n-1` with initial state 0 and goal `n-1`.
pub fn create_chain(n: i32) -> StateSpace<PlanningState> {
    let states: Vec<i32> = (0..n).collect();
    let transitions: Vec<(i32, i32)> = (1..n).map(|target| (target - 1, target)).collect();
    create_state_space(&states, &transitions, 0, &[n - 1])
}
