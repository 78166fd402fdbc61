//! Human-readable dumps and DOT export of a [`StateSpace`].
//!
//! Output is presentation only and is controlled by a [`Verbosity`] level. Since all
//! containers are insertion-ordered, rendering the same state space twice yields the same
//! text.

use std::fmt::{self, Write};

use crate::{
    space::StateSpace,
    state::{AdjacencyList, State, StateIndex},
    utils::escape_dot,
};

/// Amount of detail in dumps and DOT output.
///
/// Parses from its lowercase name (`"minimal"`, `"normal"`, `"detailed"`) and converts from
/// a numeric level with [`Verbosity::from_level`].
///
/// # Examples
///
/// ```rust
/// use statespace::Verbosity;
///
/// let verbosity: Verbosity = "detailed".parse().unwrap();
/// assert_eq!(verbosity, Verbosity::Detailed);
/// assert_eq!(Verbosity::from_level(0), Verbosity::Minimal);
/// assert_eq!(Verbosity::Normal.to_string(), "normal");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[strum(serialize_all = "lowercase")]
pub enum Verbosity {
    /// Structure only: counts, initial state, goals, transitions without styling.
    Minimal,
    /// Adds the instance name, the forward relation and initial/goal highlighting.
    #[default]
    Normal,
    /// Adds the backward relation and the rendered states.
    Detailed,
}

impl Verbosity {
    /// Converts a numeric level: `0` is minimal, `1` normal, anything above detailed.
    #[must_use]
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Minimal,
            1 => Verbosity::Normal,
            _ => Verbosity::Detailed,
        }
    }
}

/// DOT node ID of a state: `s<index>`, with a negative sign spelled `m` (`s_m5` for `-5`).
struct DotNode(StateIndex);

impl fmt::Display for DotNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0.value();
        if value < 0 {
            write!(f, "s_m{}", value.unsigned_abs())
        } else {
            write!(f, "s{value}")
        }
    }
}

fn write_indices<'a>(out: &mut String, indices: impl IntoIterator<Item = &'a StateIndex>) {
    out.push('[');
    for (position, index) in indices.into_iter().enumerate() {
        if position > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{index}");
    }
    out.push(']');
}

fn write_adjacency(out: &mut String, adjacency: &AdjacencyList) {
    out.push('{');
    for (position, (source, targets)) in adjacency.iter().enumerate() {
        if position > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{source}: ");
        write_indices(out, targets);
    }
    out.push('}');
}

impl<S: State + fmt::Display> StateSpace<S> {
    /// Renders a human-readable description of the state space.
    ///
    /// # Arguments
    ///
    /// * `verbosity` - How much detail to include
    #[must_use]
    pub fn str(&self, verbosity: Verbosity) -> String {
        let mut out = String::new();

        out.push_str("StateSpace(\n");
        if verbosity >= Verbosity::Normal {
            let _ = writeln!(out, "    instance={},", self.get_instance_info().get_name());
        }
        let _ = writeln!(out, "    num_states={},", self.get_num_states());
        let _ = writeln!(out, "    num_transitions={},", self.get_num_transitions());
        let _ = writeln!(out, "    initial_state_index={},", self.get_initial_state_index());
        out.push_str("    goal_state_indices=");
        write_indices(&mut out, self.get_goal_state_indices());
        out.push_str(",\n");

        if verbosity >= Verbosity::Normal {
            out.push_str("    forward_successor_state_indices=");
            write_adjacency(&mut out, self.get_forward_successor_state_indices());
            out.push_str(",\n");
        }

        if verbosity >= Verbosity::Detailed {
            out.push_str("    backward_successor_state_indices=");
            write_adjacency(&mut out, self.get_backward_successor_state_indices());
            out.push_str(",\n");
            out.push_str("    states=[\n");
            for (index, state) in self.get_state_mapping() {
                let _ = writeln!(out, "        {index}: {state},");
            }
            out.push_str("    ],\n");
        }

        out.push(')');
        out
    }

    /// Generates a DOT format representation of this state space.
    ///
    /// Nodes are named `s<index>`, or `s_m<magnitude>` for negative indices. From
    /// [`Verbosity::Normal`] on, the initial state is marked by an arrow from an invisible
    /// `init` node and goal states are drawn as double circles. At [`Verbosity::Detailed`] node labels include the rendered state.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use statespace::{InstanceInfo, PlanningState, StateIndex, StateSpace, Verbosity};
    ///
    /// let instance = InstanceInfo::shared("single", vec!["p".into()]);
    /// let mut space = StateSpace::empty(&instance);
    /// space.add_state(PlanningState::new(&instance, vec![0], StateIndex::new(0)))?;
    /// space.add_transition(StateIndex::new(0), StateIndex::new(0))?;
    ///
    /// let dot = space.to_dot(Verbosity::Minimal);
    /// assert!(dot.starts_with("digraph StateSpace {"));
    /// assert!(dot.contains("s0 -> s0;"));
    /// # Ok::<(), statespace::Error>(())
    /// ```
    #[must_use]
    pub fn to_dot(&self, verbosity: Verbosity) -> String {
        let mut dot = String::new();

        dot.push_str("digraph StateSpace {\n");
        if verbosity >= Verbosity::Normal {
            let _ = writeln!(
                dot,
                "    label=\"{}\";",
                escape_dot(self.get_instance_info().get_name())
            );
            dot.push_str("    labelloc=t;\n");
        }
        dot.push_str("    rankdir=LR;\n");
        dot.push_str("    node [shape=circle, fontname=\"Courier\", fontsize=10];\n\n");

        if verbosity >= Verbosity::Normal && self.get_initial_state().is_some() {
            dot.push_str("    init [label=\"\", shape=none, width=0, height=0];\n");
            let _ = writeln!(
                dot,
                "    init -> {};",
                DotNode(self.get_initial_state_index())
            );
        }

        // Nodes
        for (index, state) in self.get_state_mapping() {
            let node = DotNode(*index);
            let mut attributes = Vec::new();
            match verbosity {
                Verbosity::Minimal => {}
                Verbosity::Normal => attributes.push(format!("label=\"{index}\"")),
                Verbosity::Detailed => attributes.push(format!(
                    "label=\"{}\\n{}\"",
                    index,
                    escape_dot(&state.to_string())
                )),
            }
            if verbosity >= Verbosity::Normal && self.is_goal(*index) {
                attributes.push("shape=doublecircle".to_string());
            }

            if attributes.is_empty() {
                let _ = writeln!(dot, "    {node};");
            } else {
                let _ = writeln!(dot, "    {node} [{}];", attributes.join(", "));
            }
        }

        dot.push('\n');

        // Transitions
        for (source, targets) in self.get_forward_successor_state_indices() {
            for target in targets {
                let _ = writeln!(dot, "    {} -> {};", DotNode(*source), DotNode(*target));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

impl<S: State + fmt::Display> fmt::Display for StateSpace<S> {
    /// Formats the state space at [`Verbosity::Normal`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.str(Verbosity::Normal))
    }
}
