//! # statespace Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! of the statespace library. Import this module to get quick access to everything needed
//! to build a state space and analyse it.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all statespace operations
pub use crate::Error;

/// The result type used throughout statespace
pub use crate::Result;

// ================================================================================================
// State Identity
// ================================================================================================

/// Sparse state handle and its sentinel
pub use crate::state::{StateIndex, UNDEFINED};

/// Vertex payload trait and the planning implementation of it
pub use crate::state::{InstanceInfo, PlanningState, State};

/// Containers shared across the crate
pub use crate::state::{AdjacencyList, Distance, Distances, StateIndices, StateMapping};

// ================================================================================================
// State Space and Analyses
// ================================================================================================

/// The transition system itself
pub use crate::space::StateSpace;

/// Breadth-first traversal
pub use crate::space::{Bfs, Direction};

/// Analysis snapshots
pub use crate::space::{GoalDistanceInformation, StateInformation};

/// Output detail for dumps and DOT export
pub use crate::space::Verbosity;
