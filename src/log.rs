//! Conditional logging.
//!
//! Provides [`log`](https://github.com/rust-lang/log)-macro counterparts that only emit
//! records if the crate is compiled with the `log` feature. Without the feature the
//! macros expand to nothing, so the library carries no logging dependency by default.

/// Mirrors the `warn!()`-macro from the `log`-crate.
///
/// With the `log`-feature enabled, this macro has exactly the same behaviour.
#[cfg(feature = "log")]
macro_rules! warning {
    ($($t:tt)*) => {
        ::log::warn!($($t)*)
    };
}
/// Mirrors the `warn!()`-macro from the `log`-crate.
///
/// With the `log`-feature disabled, this macro does nothing.
#[cfg(not(feature = "log"))]
macro_rules! warning {
    ($($t:tt)*) => {};
}
pub(crate) use warning as warn;

/// Mirrors the `debug!()`-macro from the `log`-crate.
///
/// With the `log`-feature enabled, this macro has exactly the same behaviour.
#[cfg(feature = "log")]
macro_rules! debug {
    ($($t:tt)*) => {
        ::log::debug!($($t)*)
    };
}
/// Mirrors the `debug!()`-macro from the `log`-crate.
///
/// With the `log`-feature disabled, this macro does nothing.
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($t:tt)*) => {};
}
pub(crate) use debug;

/// Mirrors the `trace!()`-macro from the `log`-crate.
///
/// With the `log`-feature enabled, this macro has exactly the same behaviour.
#[cfg(feature = "log")]
macro_rules! trace {
    ($($t:tt)*) => {
        ::log::trace!($($t)*)
    };
}
/// Mirrors the `trace!()`-macro from the `log`-crate.
///
/// With the `log`-feature disabled, this macro does nothing.
#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($t:tt)*) => {};
}
pub(crate) use trace;
