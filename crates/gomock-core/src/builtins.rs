//! Go predeclared types and their zero values.
//!
//! The table is a `const` slice, so it is shared by every caller without
//! initialization or locking.

/// The Go null sentinel.
pub const NIL: &str = "nil";

/// Predeclared Go types paired with their zero-value literal.
pub const BUILTIN_ZERO_VALUES: &[(&str, &str)] = &[
    ("bool", "false"),
    ("string", "\"\""),
    ("int", "0"),
    ("int8", "0"),
    ("int16", "0"),
    ("int32", "0"),
    ("int64", "0"),
    ("uint", "0"),
    ("uint8", "0"),
    ("uint16", "0"),
    ("uint32", "0"),
    ("uint64", "0"),
    ("uintptr", "0"),
    ("byte", "0"),
    ("rune", "0"),
    ("float32", "0"),
    ("float64", "0"),
    ("complex64", "0"),
    ("complex128", "0"),
    ("error", NIL),
    ("any", NIL),
];

/// Zero-value literal for a predeclared type name, if `name` is one.
#[must_use]
pub fn builtin_zero(name: &str) -> Option<&'static str> {
    BUILTIN_ZERO_VALUES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, zero)| *zero)
}

/// Returns `true` if `name` (or its pointer form `*name`) is a predeclared type.
///
/// # Examples
///
/// ```
/// use gomock_core::builtins::is_builtin;
/// assert!(is_builtin("int64"));
/// assert!(is_builtin("*string"));
/// assert!(!is_builtin("Widget"));
/// ```
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    let bare = name.strip_prefix('*').unwrap_or(name);
    builtin_zero(bare).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_types_are_zero() {
        for name in ["int", "int8", "uint64", "uintptr", "float32", "complex128"] {
            assert_eq!(builtin_zero(name), Some("0"), "type {name}");
        }
    }

    #[test]
    fn string_and_bool_zeros() {
        assert_eq!(builtin_zero("string"), Some("\"\""));
        assert_eq!(builtin_zero("bool"), Some("false"));
    }

    #[test]
    fn error_maps_to_nil() {
        assert_eq!(builtin_zero("error"), Some(NIL));
    }

    #[test]
    fn user_types_are_not_builtin() {
        assert_eq!(builtin_zero("Widget"), None);
        assert!(!is_builtin("time.Time"));
        assert!(!is_builtin("*Widget"));
    }

    #[test]
    fn pointer_forms_are_builtin() {
        assert!(is_builtin("*int"));
        assert!(is_builtin("*error"));
    }
}
