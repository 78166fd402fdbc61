//! DOT format helpers for state space visualization.
//!
//! The output of [`StateSpace::to_dot`](crate::StateSpace::to_dot) embeds instance names and
//! rendered states in quoted DOT strings; this module makes those strings safe to embed.

/// Escapes a string for safe use inside a quoted DOT label.
///
/// Quotes and backslashes are escaped, line feeds become the DOT line break `\n` and
/// carriage returns are dropped. Angle brackets are left alone; they are only special in
/// record labels, which state nodes do not use.
///
/// # Arguments
///
/// * `s` - The string to escape
///
/// # Returns
///
/// A new string with all special characters escaped.
///
/// # Examples
///
/// ```rust
/// use statespace::utils::escape_dot;
///
/// assert_eq!(escape_dot("on(a,b)"), "on(a,b)");
/// assert_eq!(escape_dot("say \"hi\""), "say \\\"hi\\\"");
/// ```
#[must_use]
pub fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_dot_atoms_untouched() {
        assert_eq!(escape_dot("(clear(a), on(a,b))"), "(clear(a), on(a,b))");
    }

    #[test]
    fn test_escape_dot_quoted_instance_name() {
        assert_eq!(escape_dot("blocks \"4ops\""), "blocks \\\"4ops\\\"");
    }

    #[test]
    fn test_escape_dot_backslash_before_quote() {
        // Backslashes must be escaped first, or escaped quotes would be doubled
        assert_eq!(escape_dot("a\\\"b"), "a\\\\\\\"b");
    }

    #[test]
    fn test_escape_dot_multiline_state() {
        assert_eq!(escape_dot("at(p1)\r\nat(p2)"), "at(p1)\\nat(p2)");
    }

    #[test]
    fn test_escape_dot_angle_brackets_untouched() {
        assert_eq!(escape_dot("holding<block>"), "holding<block>");
    }
}
