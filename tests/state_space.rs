//! Integration tests for state space construction and analysis.
//!
//! These tests drive the public API end to end: a state space is built from a small
//! planning instance, mutated, merged and fragmented, and the searches and snapshots are
//! checked against distances worked out by hand.

use std::sync::Arc;

use statespace::{prelude::*, Result};

fn idx(value: i32) -> StateIndex {
    StateIndex::new(value)
}

fn indices(values: &[i32]) -> StateIndices {
    values.iter().copied().map(StateIndex::new).collect()
}

/// A corridor of `n` cells with one robot. Atom `i` is `at(c<i>)`.
fn corridor_instance(n: u32) -> Arc<InstanceInfo> {
    InstanceInfo::shared(
        format!("corridor-{n}"),
        (0..n).map(|cell| format!("at(c{cell})")).collect(),
    )
}

fn robot_at(instance: &Arc<InstanceInfo>, cell: i32) -> PlanningState {
    PlanningState::new(instance, vec![cell.unsigned_abs()], idx(cell))
}

/// Build the state space from raw parts, inserting transitions in the given order.
fn build(
    instance: &Arc<InstanceInfo>,
    states: &[i32],
    transitions: &[(i32, i32)],
    initial: i32,
    goals: &[i32],
) -> Result<StateSpace<PlanningState>> {
    let mut forward = AdjacencyList::new();
    for &(source, target) in transitions {
        forward
            .entry(idx(source))
            .or_default()
            .insert(idx(target));
    }

    StateSpace::new(
        Arc::clone(instance),
        states.iter().map(|&cell| robot_at(instance, cell)),
        idx(initial),
        forward,
        indices(goals),
    )
}

/// Move-left/move-right corridor with the robot starting at cell 0 and the goal at the end.
fn corridor(n: i32) -> Result<StateSpace<PlanningState>> {
    let instance = corridor_instance(n.unsigned_abs());
    let states: Vec<i32> = (0..n).collect();
    let mut transitions = Vec::new();
    for cell in 1..n {
        transitions.push((cell - 1, cell));
        transitions.push((cell, cell - 1));
    }
    build(&instance, &states, &transitions, 0, &[n - 1])
}

fn assert_adjacency_symmetric(space: &StateSpace<PlanningState>) {
    for (&source, targets) in space.get_forward_successor_state_indices() {
        assert!(space.contains_state_index(source));
        for &target in targets {
            assert!(space.contains_state_index(target));
            assert!(
                space.get_backward_successor_state_indices()[&target].contains(&source),
                "backward relation misses {target} <- {source}"
            );
        }
    }
    for (&target, sources) in space.get_backward_successor_state_indices() {
        for &source in sources {
            assert!(
                space.get_forward_successor_state_indices()[&source].contains(&target),
                "forward relation misses {source} -> {target}"
            );
        }
    }
}

fn assert_goals_are_states(space: &StateSpace<PlanningState>) {
    for &goal in space.get_goal_state_indices() {
        assert!(space.contains_state_index(goal), "goal {goal} is not a state");
    }
}

#[test]
fn test_linear_chain_goal_distances() -> Result<()> {
    let instance = corridor_instance(4);
    let space = build(&instance, &[0, 1, 2, 3], &[(0, 1), (1, 2), (2, 3)], 0, &[3])?;

    let info = space.compute_goal_distance_information();

    for (cell, distance) in [(0, 3), (1, 2), (2, 1), (3, 0)] {
        assert_eq!(info.get_goal_distance(idx(cell)), Some(distance));
    }
    assert!(info.get_deadend_state_indices().is_empty());
    assert!(info.is_goal(idx(3)));
    assert!(info.is_alive(idx(0)));
    for index in space.get_state_indices().copied() {
        assert!(!info.is_deadend(index), "state {index} reaches the goal");
    }
    assert!(info.is_solvable(space.get_initial_state_index()));
    Ok(())
}

#[test]
fn test_deadend_branch() -> Result<()> {
    // 0 -> 1 -> 2 (goal), 0 -> 3, 3 -> 3
    let instance = corridor_instance(4);
    let space = build(
        &instance,
        &[0, 1, 2, 3],
        &[(0, 1), (1, 2), (0, 3), (3, 3)],
        0,
        &[2],
    )?;

    let info = space.compute_goal_distance_information();

    assert_eq!(info.get_goal_distance(idx(0)), Some(2));
    assert_eq!(info.get_goal_distance(idx(1)), Some(1));
    assert_eq!(info.get_goal_distance(idx(2)), Some(0));
    assert_eq!(info.get_goal_distance(idx(3)), None);
    assert_eq!(info.get_deadend_state_indices(), &indices(&[3]));
    Ok(())
}

#[test]
fn test_sparse_indices_survive_construction() -> Result<()> {
    let instance = corridor_instance(600);
    let space = build(&instance, &[10, 500], &[(10, 500)], 10, &[500])?;

    let state_indices: Vec<StateIndex> = space.get_state_indices().copied().collect();
    assert_eq!(state_indices, vec![idx(10), idx(500)]);
    assert_eq!(space.get_forward_successor_state_indices()[&idx(10)], indices(&[500]));
    assert_eq!(space.get_backward_successor_state_indices()[&idx(500)], indices(&[10]));
    assert_eq!(space.get_state(idx(500))?.get_atom_indices(), &[500]);
    Ok(())
}

#[test]
fn test_merge_union_keeps_left_initial_state() -> Result<()> {
    let instance = corridor_instance(4);
    let mut lhs = build(&instance, &[0, 1], &[(0, 1)], 0, &[])?;
    let rhs = build(&instance, &[1, 2], &[(1, 2)], 1, &[2])?;

    lhs.merge(&rhs)?;

    assert_eq!(lhs.get_num_states(), 3);
    assert_eq!(lhs.get_num_transitions(), 2);
    assert!(lhs.get_forward_successor_state_indices()[&idx(0)].contains(&idx(1)));
    assert!(lhs.get_forward_successor_state_indices()[&idx(1)].contains(&idx(2)));
    assert_eq!(lhs.get_goal_state_indices(), &indices(&[2]));
    assert_eq!(lhs.get_initial_state_index(), idx(0));
    assert_adjacency_symmetric(&lhs);
    Ok(())
}

#[test]
fn test_merge_operator_matches_checked_merge() -> Result<()> {
    let instance = corridor_instance(4);
    let mut checked = build(&instance, &[0, 1], &[(0, 1)], 0, &[])?;
    let mut unchecked = checked.clone();
    let rhs = build(&instance, &[1, 2, 3], &[(1, 2), (2, 3), (3, 1)], 2, &[3])?;

    checked.merge(&rhs)?;
    unchecked |= &rhs;

    assert_eq!(checked.get_state_mapping(), unchecked.get_state_mapping());
    assert_eq!(
        checked.get_forward_successor_state_indices(),
        unchecked.get_forward_successor_state_indices()
    );
    assert_eq!(checked.get_goal_state_indices(), unchecked.get_goal_state_indices());
    assert_eq!(unchecked.get_initial_state_index(), idx(0));
    Ok(())
}

#[test]
fn test_add_transition_out_of_bounds_leaves_space_unchanged() -> Result<()> {
    let instance = corridor_instance(2);
    let mut space = build(&instance, &[0, 1], &[(0, 1)], 0, &[1])?;
    let forward = space.get_forward_successor_state_indices().clone();
    let backward = space.get_backward_successor_state_indices().clone();

    let result = space.add_transition(idx(5), idx(1));

    assert!(matches!(result, Err(Error::OutOfBounds(index)) if index == idx(5)));
    assert_eq!(space.get_forward_successor_state_indices(), &forward);
    assert_eq!(space.get_backward_successor_state_indices(), &backward);
    Ok(())
}

#[test]
fn test_no_goals_every_state_is_deadend() -> Result<()> {
    let instance = corridor_instance(3);
    let space = build(&instance, &[0, 1, 2], &[(0, 1), (1, 2)], 0, &[])?;

    let info = space.compute_goal_distance_information();

    assert!(info.get_goal_distances().is_empty());
    assert_eq!(info.get_deadend_state_indices(), &indices(&[0, 1, 2]));
    Ok(())
}

#[test]
fn test_incremental_construction_matches_bulk() -> Result<()> {
    let bulk = corridor(5)?;
    let instance = Arc::clone(bulk.get_instance_info());

    let mut incremental = StateSpace::empty(&instance);
    for state in bulk.get_states() {
        incremental.add_state(state.clone())?;
    }
    for (&source, targets) in bulk.get_forward_successor_state_indices() {
        for &target in targets {
            assert!(incremental.add_transition(source, target)?);
        }
    }
    incremental.set_initial_state_index(bulk.get_initial_state_index())?;
    incremental.set_goal_state_indices(bulk.get_goal_state_indices().clone())?;

    assert_eq!(incremental.get_num_transitions(), bulk.get_num_transitions());
    assert_eq!(
        incremental.get_backward_successor_state_indices(),
        bulk.get_backward_successor_state_indices()
    );
    assert_eq!(
        incremental.compute_goal_distance_information(),
        bulk.compute_goal_distance_information()
    );
    Ok(())
}

#[test]
fn test_bfs_distances_are_shortest() -> Result<()> {
    // Two routes from 0 to 5: 0-1-2-3-4-5 and the shortcut 0-6-5
    let instance = corridor_instance(7);
    let space = build(
        &instance,
        &[0, 1, 2, 3, 4, 5, 6],
        &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (0, 6), (6, 5)],
        0,
        &[5],
    )?;

    let distances = space.compute_distances(&indices(&[0]), true, false);

    assert_eq!(distances[&idx(0)], 0);
    assert_eq!(distances[&idx(5)], 2);
    assert_eq!(distances[&idx(4)], 4);

    // Every discovered non-seed state has a predecessor one step closer
    for (&index, &distance) in &distances {
        if distance == 0 {
            continue;
        }
        let has_parent = space
            .backward_successors(index)
            .any(|parent| distances.get(&parent) == Some(&(distance - 1)));
        assert!(has_parent, "state {index} at distance {distance} has no parent");
    }
    Ok(())
}

#[test]
fn test_backward_bfs_mirrors_forward_bfs() -> Result<()> {
    let space = corridor(6)?;

    let forward = space.compute_distances(&indices(&[0]), true, false);
    let backward = space.compute_distances(&indices(&[0]), false, false);

    // Corridor moves are reversible, so both directions agree
    assert_eq!(forward.len(), 6);
    for (index, distance) in &forward {
        assert_eq!(backward.get(index), Some(distance));
    }
    Ok(())
}

#[test]
fn test_stop_if_goal_leaves_goal_unexpanded() -> Result<()> {
    let space = corridor(6)?;
    let mut goals_space = space.clone();
    goals_space.set_goal_state_indices(indices(&[2]))?;

    let distances = goals_space.compute_distances(&indices(&[0]), true, true);

    assert_eq!(distances.get(&idx(2)), Some(&2));
    assert!(!distances.contains_key(&idx(3)));
    Ok(())
}

#[test]
fn test_goal_distance_partition() -> Result<()> {
    let instance = corridor_instance(8);
    let space = build(
        &instance,
        &[0, 1, 2, 3, 4, 5, 6, 7],
        &[(0, 1), (1, 2), (2, 0), (2, 3), (4, 5), (5, 4), (6, 3), (7, 7)],
        0,
        &[3],
    )?;

    let info = space.compute_goal_distance_information();

    for index in space.get_state_indices().copied() {
        let in_distances = info.get_goal_distances().contains_key(&index);
        let in_deadends = info.get_deadend_state_indices().contains(&index);
        assert!(in_distances != in_deadends, "state {index} is not classified exactly once");
    }
    assert_eq!(
        info.get_goal_distances().len() + info.get_num_deadends(),
        space.get_num_states()
    );
    assert_eq!(info.get_deadend_state_indices(), &indices(&[4, 5, 7]));
    assert_eq!(info.get_goal_distance(idx(6)), Some(1));
    assert_eq!(info.max_goal_distance(), Some(3));
    Ok(())
}

#[test]
fn test_fragment_copies_expanded_transitions_only() -> Result<()> {
    let space = corridor(5)?;

    let expanded = indices(&[0, 1]);
    let generated = indices(&[2]);
    let fragment = StateSpace::from_fragment(&space, &expanded, &generated)?;

    assert_eq!(fragment.get_num_states(), 3);
    for (&source, targets) in fragment.get_forward_successor_state_indices() {
        assert!(expanded.contains(&source), "{source} was not expanded");
        for target in targets {
            assert!(space.get_forward_successor_state_indices()[&source].contains(target));
        }
    }
    // 0 -> 1, 1 -> 0, 1 -> 2
    assert_eq!(fragment.get_num_transitions(), 3);
    assert_eq!(fragment.get_initial_state_index(), idx(0));
    assert!(fragment.get_goal_state_indices().is_empty());
    assert_adjacency_symmetric(&fragment);
    assert_goals_are_states(&fragment);
    Ok(())
}

#[test]
fn test_reachability_after_growth() -> Result<()> {
    let instance = corridor_instance(4);
    let mut space = build(&instance, &[0, 1, 2], &[(0, 1)], 0, &[2])?;
    assert_eq!(space.compute_reachable_state_indices(), indices(&[0, 1]));
    assert!(space.compute_goal_distance_information().is_deadend(idx(0)));

    space.add_state(robot_at(&instance, 3))?;
    space.add_transition(idx(1), idx(3))?;
    space.add_transition(idx(3), idx(2))?;

    assert_eq!(space.compute_reachable_state_indices(), indices(&[0, 1, 3, 2]));
    let info = space.compute_goal_distance_information();
    assert_eq!(info.get_goal_distance(idx(0)), Some(3));
    assert_adjacency_symmetric(&space);
    Ok(())
}

#[test]
fn test_state_information_snapshot() -> Result<()> {
    let space = corridor(3)?;
    let info = space.compute_state_information();

    assert_eq!(info.get_num_states(), 3);
    assert_eq!(info.get_state(idx(1))?, space.get_state(idx(1))?);
    assert!(matches!(info.get_state(idx(9)), Err(Error::StateNotFound(_))));
    assert_eq!(info.get_state(idx(2))?.to_string(), "(at(c2))");
    Ok(())
}

#[test]
fn test_dot_export_lists_every_transition() -> Result<()> {
    let space = corridor(3)?;
    let dot = space.to_dot(Verbosity::Normal);

    for (&source, targets) in space.get_forward_successor_state_indices() {
        for target in targets {
            assert!(dot.contains(&format!("s{source} -> s{target};")));
        }
    }
    assert!(dot.contains("label=\"corridor-3\""));
    assert!(dot.contains("s2 [label=\"2\", shape=doublecircle];"));
    Ok(())
}

#[test]
fn test_merge_single_state_spaces() -> Result<()> {
    // The transition 0 -> 1 needs both endpoints, so the right operand carries state 0 too
    let instance = corridor_instance(2);
    let mut lhs = build(&instance, &[0], &[], 0, &[])?;
    let rhs = build(&instance, &[0, 1], &[(0, 1)], 1, &[1])?;

    lhs |= &rhs;

    assert_eq!(lhs.get_state_indices().copied().collect::<StateIndices>(), indices(&[0, 1]));
    assert_eq!(lhs.get_forward_successor_state_indices()[&idx(0)], indices(&[1]));
    assert_eq!(lhs.get_goal_state_indices(), &indices(&[1]));
    assert_eq!(lhs.get_initial_state_index(), idx(0));
    assert_adjacency_symmetric(&lhs);
    Ok(())
}

#[test]
fn test_fragment_of_chain() -> Result<()> {
    let instance = corridor_instance(3);
    let space = build(&instance, &[0, 1, 2], &[(0, 1), (1, 2)], 0, &[2])?;

    let fragment = StateSpace::from_fragment(&space, &indices(&[0]), &indices(&[1]))?;

    assert_eq!(
        fragment.get_state_indices().copied().collect::<StateIndices>(),
        indices(&[0, 1])
    );
    assert_eq!(fragment.get_num_transitions(), 1);
    assert_eq!(fragment.get_forward_successor_state_indices()[&idx(0)], indices(&[1]));
    assert!(fragment.forward_successors(idx(1)).next().is_none());
    assert!(fragment.get_goal_state_indices().is_empty());
    assert_adjacency_symmetric(&fragment);
    Ok(())
}
