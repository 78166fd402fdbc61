//! Planning instances and the states that belong to them.
//!
//! A [`StateSpace`](crate::StateSpace) never looks inside its states. All it needs is
//! value equality, hashing, the index a state was generated with, and the shared
//! [`InstanceInfo`] it is interpreted against. These requirements are captured by the
//! [`State`] trait. [`PlanningState`] is the reference implementation: a set of true
//! ground atoms of a planning instance.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::state::StateIndex;

/// Read-only description of the planning instance a group of states belongs to.
///
/// Instances are shared between state spaces and their states through
/// [`Arc<InstanceInfo>`]. Two handles denote the same instance only if they point to the
/// same allocation; structurally equal but separately allocated instances are distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    name: String,
    atoms: Vec<String>,
}

impl InstanceInfo {
    /// Creates a new instance description.
    ///
    /// # Arguments
    ///
    /// * `name` - Human-readable instance name, used in dumps
    /// * `atoms` - The ground atoms of the instance, addressed by position
    #[must_use]
    pub fn new(name: impl Into<String>, atoms: Vec<String>) -> Self {
        Self {
            name: name.into(),
            atoms,
        }
    }

    /// Creates a new shared instance handle.
    #[must_use]
    pub fn shared(name: impl Into<String>, atoms: Vec<String>) -> Arc<Self> {
        Arc::new(Self::new(name, atoms))
    }

    /// Returns the instance name.
    #[must_use]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Returns all ground atoms of the instance.
    #[must_use]
    pub fn get_atoms(&self) -> &[String] {
        &self.atoms
    }

    /// Returns the name of the atom at `atom_index`, if it exists.
    #[must_use]
    pub fn get_atom_name(&self, atom_index: u32) -> Option<&str> {
        self.atoms.get(atom_index as usize).map(String::as_str)
    }

    /// Returns the number of ground atoms.
    #[must_use]
    pub fn get_num_atoms(&self) -> usize {
        self.atoms.len()
    }
}

/// Returns `true` if both handles refer to the same shared instance.
#[must_use]
#[inline]
pub fn same_instance(lhs: &Arc<InstanceInfo>, rhs: &Arc<InstanceInfo>) -> bool {
    Arc::ptr_eq(lhs, rhs)
}

/// Opaque vertex payload of a [`StateSpace`](crate::StateSpace).
///
/// Implementors must keep [`State::index`] stable for the lifetime of the value; the
/// state space uses it to pair vertices with their payload.
pub trait State: Clone + Eq + Hash + fmt::Debug {
    /// The index this state was generated with.
    fn index(&self) -> StateIndex;

    /// The instance this state is interpreted against.
    fn instance_info(&self) -> &Arc<InstanceInfo>;
}

/// A planning state: the set of ground atoms that hold, identified by its index.
///
/// Atom indices are kept sorted and free of duplicates, so two states holding the same
/// atoms compare equal regardless of the order they were listed in.
///
/// # Examples
///
/// ```rust
/// use statespace::{InstanceInfo, PlanningState, State, StateIndex};
///
/// let instance = InstanceInfo::shared("blocks-1", vec!["clear(a)".into(), "on(a,b)".into()]);
/// let state = PlanningState::new(&instance, vec![1, 0, 1], StateIndex::new(0));
///
/// assert_eq!(state.get_atom_indices(), &[0, 1]);
/// assert_eq!(state.index(), StateIndex::new(0));
/// assert_eq!(state.to_string(), "(clear(a), on(a,b))");
/// ```
#[derive(Clone)]
pub struct PlanningState {
    instance_info: Arc<InstanceInfo>,
    atom_indices: Vec<u32>,
    index: StateIndex,
}

impl PlanningState {
    /// Creates a new state of `instance_info`.
    ///
    /// # Arguments
    ///
    /// * `instance_info` - The shared instance this state belongs to
    /// * `atom_indices` - Positions of the true atoms in [`InstanceInfo::get_atoms`]
    /// * `index` - The index the generator assigned to this state
    #[must_use]
    pub fn new(
        instance_info: &Arc<InstanceInfo>,
        mut atom_indices: Vec<u32>,
        index: StateIndex,
    ) -> Self {
        atom_indices.sort_unstable();
        atom_indices.dedup();
        Self {
            instance_info: Arc::clone(instance_info),
            atom_indices,
            index,
        }
    }

    /// Returns the sorted indices of the true atoms.
    #[must_use]
    pub fn get_atom_indices(&self) -> &[u32] {
        &self.atom_indices
    }

    /// Returns the index of this state.
    #[must_use]
    pub fn get_index(&self) -> StateIndex {
        self.index
    }

    /// Returns `true` if the atom at `atom_index` holds in this state.
    #[must_use]
    pub fn contains_atom(&self, atom_index: u32) -> bool {
        self.atom_indices.binary_search(&atom_index).is_ok()
    }
}

impl State for PlanningState {
    fn index(&self) -> StateIndex {
        self.index
    }

    fn instance_info(&self) -> &Arc<InstanceInfo> {
        &self.instance_info
    }
}

impl PartialEq for PlanningState {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.atom_indices == other.atom_indices
            && same_instance(&self.instance_info, &other.instance_info)
    }
}

impl Eq for PlanningState {}

impl Hash for PlanningState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.instance_info).hash(state);
        self.atom_indices.hash(state);
        self.index.hash(state);
    }
}

impl fmt::Debug for PlanningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanningState")
            .field("instance", &self.instance_info.get_name())
            .field("index", &self.index)
            .field("atom_indices", &self.atom_indices)
            .finish()
    }
}

impl fmt::Display for PlanningState {
    /// Formats the state as the parenthesized list of its true atoms.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (position, &atom_index) in self.atom_indices.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            match self.instance_info.get_atom_name(atom_index) {
                Some(name) => f.write_str(name)?,
                None => write!(f, "#{atom_index}")?,
            }
        }
        f.write_str(")")
    }
}
