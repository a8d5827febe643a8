//! Error types for fallible container operations.

/// The relational operator that a comparison attempted to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    /// Equality comparison (`==`).
    Eq,
    /// Strict less-than comparison (`<`).
    Lt,
}

impl core::fmt::Display for Operator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Operator::Eq => f.write_str("=="),
            Operator::Lt => f.write_str("<"),
        }
    }
}

/// Errors returned by the fallible operations on [`Variant`](crate::Variant).
///
/// All failures are reported synchronously through `Result` returns. The
/// container never panics on a failed retrieval or comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VariantError {
    /// A typed retrieval was attempted against a container that holds a
    /// different type.
    ///
    /// `found` is `None` when the container was empty.
    TypeMismatch {
        /// The type name the caller asked for.
        expected: &'static str,
        /// The type name of the stored value, or `None` if the container was
        /// empty.
        found: Option<&'static str>,
    },
    /// A comparison was attempted between two containers holding the same
    /// type, but that type's handler does not support the requested operator.
    OperatorUnsupported {
        /// The operator that was requested.
        operator: Operator,
        /// The type name of the stored values.
        type_name: &'static str,
    },
    /// A comparison was attempted between two containers holding different
    /// types.
    IncompatibleTypes {
        /// The type name stored in the left-hand container.
        left: &'static str,
        /// The type name stored in the right-hand container.
        right: &'static str,
    },
}

impl core::fmt::Display for VariantError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            VariantError::TypeMismatch {
                expected,
                found: Some(found),
            } => {
                write!(
                    f,
                    "type mismatch: requested `{expected}`, but the container holds `{found}`"
                )
            }
            VariantError::TypeMismatch {
                expected,
                found: None,
            } => {
                write!(
                    f,
                    "type mismatch: requested `{expected}`, but the container is empty"
                )
            }
            VariantError::OperatorUnsupported {
                operator,
                type_name,
            } => {
                write!(
                    f,
                    "operator `{operator}` is not supported by the stored type `{type_name}`"
                )
            }
            VariantError::IncompatibleTypes { left, right } => {
                write!(
                    f,
                    "cannot compare containers holding different types `{left}` and `{right}`"
                )
            }
        }
    }
}

impl core::error::Error for VariantError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn test_display_type_mismatch() {
        let error = VariantError::TypeMismatch {
            expected: "i32",
            found: Some("f64"),
        };
        assert_eq!(
            error.to_string(),
            "type mismatch: requested `i32`, but the container holds `f64`"
        );

        let error = VariantError::TypeMismatch {
            expected: "i32",
            found: None,
        };
        assert_eq!(
            error.to_string(),
            "type mismatch: requested `i32`, but the container is empty"
        );
    }

    #[test]
    fn test_display_operator_unsupported() {
        let error = VariantError::OperatorUnsupported {
            operator: Operator::Lt,
            type_name: "Foo",
        };
        assert_eq!(
            error.to_string(),
            "operator `<` is not supported by the stored type `Foo`"
        );
    }

    #[test]
    fn test_display_incompatible_types() {
        let error = VariantError::IncompatibleTypes {
            left: "i32",
            right: "f64",
        };
        assert_eq!(
            error.to_string(),
            "cannot compare containers holding different types `i32` and `f64`"
        );
    }
}
