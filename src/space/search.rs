//! Breadth-first search over a [`StateSpace`].
//!
//! The traversal is multi-source: every seed starts at distance 0, and a state is reached
//! at distance `d + 1` from the first state at distance `d` that has it as a neighbor.
//! Neighbors are taken from the forward relation ([`Direction::Forward`]) or from its
//! transpose ([`Direction::Backward`]), so goal distances are computed without building a
//! reversed graph.
//!
//! All containers are insertion-ordered, which makes the visiting order, and therefore the
//! point at which an early goal exit happens, reproducible.

use std::collections::VecDeque;

use crate::{
    log::debug,
    space::StateSpace,
    state::{AdjacencyList, Distance, Distances, State, StateIndex, StateIndices},
};

/// The transition relation a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow transitions from source to target.
    Forward,
    /// Follow transitions from target to source.
    Backward,
}

impl Direction {
    /// `Forward` if `forward` is `true`, `Backward` otherwise.
    #[must_use]
    pub const fn from_forward(forward: bool) -> Self {
        if forward {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Breadth-first iterator over the states of a [`StateSpace`].
///
/// Yields every reachable state exactly once together with its distance from the nearest
/// seed, in order of non-decreasing distance. A yielded state is expanded lazily, when the
/// next item is requested, so stopping the iteration after a state leaves its neighbors
/// undiscovered.
///
/// # Examples
///
/// ```rust
/// use statespace::{Direction, InstanceInfo, PlanningState, StateIndex, StateSpace};
///
/// let instance = InstanceInfo::shared("pair", Vec::new());
/// let mut space = StateSpace::empty(&instance);
/// for index in 0..3 {
///     space.add_state(PlanningState::new(&instance, vec![], StateIndex::new(index)))?;
/// }
/// space.add_transition(StateIndex::new(0), StateIndex::new(1))?;
/// space.add_transition(StateIndex::new(1), StateIndex::new(2))?;
///
/// let order: Vec<(StateIndex, u32)> = space
///     .bfs([StateIndex::new(0)], Direction::Forward)
///     .collect();
/// assert_eq!(order.len(), 3);
/// assert_eq!(order[2], (StateIndex::new(2), 2));
/// # Ok::<(), statespace::Error>(())
/// ```
pub struct Bfs<'s, S: State> {
    state_space: &'s StateSpace<S>,
    direction: Direction,
    queue: VecDeque<(StateIndex, Distance)>,
    distances: Distances,
    pending: Option<(StateIndex, Distance)>,
}

impl<'s, S: State> Bfs<'s, S> {
    fn new(
        state_space: &'s StateSpace<S>,
        seeds: impl IntoIterator<Item = StateIndex>,
        direction: Direction,
    ) -> Self {
        let mut queue = VecDeque::new();
        let mut distances = Distances::new();

        // Seeds that are not states of the space are ignored
        for seed in seeds {
            if state_space.contains_state_index(seed) && !distances.contains_key(&seed) {
                distances.insert(seed, 0);
                queue.push_back((seed, 0));
            }
        }

        Bfs {
            state_space,
            direction,
            queue,
            distances,
            pending: None,
        }
    }

    /// Returns the distances discovered so far, including queued but not yet yielded states.
    #[must_use]
    pub fn distances(&self) -> &Distances {
        &self.distances
    }

    /// Consumes the iterator and returns the distances discovered so far.
    #[must_use]
    pub fn into_distances(self) -> Distances {
        self.distances
    }

    fn expand(&mut self, index: StateIndex, distance: Distance) {
        let adjacency = self.state_space.adjacency(self.direction);
        let next_distance = distance + 1;
        for &neighbor in adjacency.get(&index).into_iter().flatten() {
            if !self.distances.contains_key(&neighbor) {
                self.distances.insert(neighbor, next_distance);
                self.queue.push_back((neighbor, next_distance));
            }
        }
    }
}

impl<S: State> Iterator for Bfs<'_, S> {
    type Item = (StateIndex, Distance);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((index, distance)) = self.pending.take() {
            self.expand(index, distance);
        }

        let item = self.queue.pop_front()?;
        self.pending = Some(item);
        Some(item)
    }
}

impl<S: State> StateSpace<S> {
    /// Returns a breadth-first iterator starting from all `seeds` at once.
    ///
    /// Seeds that are not states of this state space are ignored.
    pub fn bfs(
        &self,
        seeds: impl IntoIterator<Item = StateIndex>,
        direction: Direction,
    ) -> Bfs<'_, S> {
        Bfs::new(self, seeds, direction)
    }

    /// Computes shortest-path distances from a set of seed states.
    ///
    /// # Arguments
    ///
    /// * `state_indices` - The seed states, all at distance 0
    /// * `forward` - Follow the forward relation if `true`, the backward relation otherwise
    /// * `stop_if_goal` - Stop as soon as a goal state is dequeued
    ///
    /// # Returns
    ///
    /// The distance of every discovered state. States without an entry are unreachable from
    /// the seeds. With `stop_if_goal` the result only covers the states discovered up to the
    /// first dequeued goal state; that state's own neighbors are not discovered.
    ///
    /// # Complexity
    ///
    /// - Time: O(V + E)
    /// - Space: O(V)
    #[must_use]
    pub fn compute_distances(
        &self,
        state_indices: &StateIndices,
        forward: bool,
        stop_if_goal: bool,
    ) -> Distances {
        let direction = Direction::from_forward(forward);
        let mut bfs = self.bfs(state_indices.iter().copied(), direction);

        for (index, _) in bfs.by_ref() {
            if stop_if_goal && self.is_goal(index) {
                debug!("BFS stopped at goal state {}", index);
                break;
            }
        }

        let distances = bfs.into_distances();
        debug!(
            "BFS ({:?}) from {} seed(s) reached {} state(s)",
            direction,
            state_indices.len(),
            distances.len()
        );
        distances
    }

    /// Computes the states reachable from the initial state, the initial state included.
    ///
    /// Returns an empty set if no initial state is set.
    #[must_use]
    pub fn compute_reachable_state_indices(&self) -> StateIndices {
        self.bfs([self.get_initial_state_index()], Direction::Forward)
            .map(|(index, _)| index)
            .collect()
    }

    pub(crate) fn adjacency(&self, direction: Direction) -> &AdjacencyList {
        match direction {
            Direction::Forward => &self.forward_successor_state_indices,
            Direction::Backward => &self.backward_successor_state_indices,
        }
    }
}
