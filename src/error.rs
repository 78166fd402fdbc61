use thiserror::Error;

use crate::state::StateIndex;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// All errors are caller contract violations detected before any mutation takes place: when an
/// operation on a [`StateSpace`](crate::StateSpace) returns an error, the state space is left
/// exactly as it was.
///
/// # Error Categories
///
/// ## Index Errors
/// - [`Error::OutOfBounds`] - An index that is not a vertex of the state space was used
/// - [`Error::UndefinedIndex`] - The `UNDEFINED` sentinel was used where a state is required
/// - [`Error::IndexConflict`] - Two different states claim the same index
///
/// ## Lookup Errors
/// - [`Error::StateNotFound`] - A snapshot or state space was queried for an absent index
///
/// ## Consistency Errors
/// - [`Error::InstanceMismatch`] - Operands belong to different planning instances
/// - [`Error::Malformed`] - Structurally inconsistent constructor input
///
/// # Examples
///
/// ```rust
/// use statespace::{Error, InstanceInfo, PlanningState, StateIndex, StateSpace};
///
/// let instance = InstanceInfo::shared("empty", Vec::new());
/// let mut space: StateSpace<PlanningState> = StateSpace::empty(&instance);
///
/// match space.add_transition(StateIndex::new(5), StateIndex::new(1)) {
///     Err(Error::OutOfBounds(index)) => assert_eq!(index, StateIndex::new(5)),
///     other => panic!("unexpected result: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An index is not a vertex of the state space.
    ///
    /// Raised by [`StateSpace::add_transition`](crate::StateSpace::add_transition), the
    /// validating setters and the fragment constructor. The associated value is the first
    /// offending index found.
    #[error("State index {0} is out of bounds")]
    OutOfBounds(StateIndex),

    /// The `UNDEFINED` sentinel was used where a concrete state index is required.
    ///
    /// This occurs when adding a state whose own index is `UNDEFINED`.
    #[error("The undefined state index can not be used here")]
    UndefinedIndex,

    /// Two different states claim the same index.
    ///
    /// An index maps to at most one state. This error occurs when adding a state, or merging
    /// a state space, whose state differs from the one already stored under that index.
    #[error("State index {0} is already bound to a different state")]
    IndexConflict(StateIndex),

    /// No state is stored under the requested index.
    ///
    /// Raised by [`StateInformation::get_state`](crate::StateInformation::get_state) and
    /// [`StateSpace::get_state`](crate::StateSpace::get_state).
    #[error("No state with index {0}")]
    StateNotFound(StateIndex),

    /// The operands refer to different planning instances.
    ///
    /// States and state spaces are only compatible if they share the very same
    /// [`InstanceInfo`](crate::InstanceInfo) handle.
    #[error("The operands belong to different planning instances")]
    InstanceMismatch,

    /// The constructor input is inconsistent.
    ///
    /// The error includes the source location where the inconsistency was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was inconsistent
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
