//! Shared helpers that are not specific to state spaces.

mod dot;

pub use dot::escape_dot;
