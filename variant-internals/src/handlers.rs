//! The handler trait that defines comparison behavior for stored values.
//!
//! A handler decides, per concrete value type, whether equality and ordering
//! are available and how they are computed. The handler is chosen when a cell
//! is created and is baked into the cell's vtable, so the comparison behavior
//! of a cell depends on nothing but the static type information captured at
//! creation time.

/// Trait for implementing the comparison capabilities of a stored value type.
///
/// This trait defines whether a value type supports equality and ordering
/// comparisons, and how those comparisons are performed. Returning `None` from
/// an operation signals that the operation is not supported by the type,
/// which the container layer surfaces as an "operator not supported" error.
///
/// # When to Implement
///
/// You typically don't need to implement this trait directly. The variant
/// library provides built-in handlers (`Ordered`, `Equatable`, `Opaque`) that
/// cover most use cases.
///
/// Implement this trait when you need comparison behavior that differs from
/// the type's own `PartialEq`/`PartialOrd` implementations, such as comparing
/// only a subset of fields, or exposing equality for a type while
/// deliberately withholding ordering.
///
/// # Contract
///
/// Each method must be consistent for a given `V`: either it always returns
/// `Some` or it always returns `None`. The container layer relies on this to
/// map `None` to a deterministic error rather than a value-dependent one.
///
/// # Examples
///
/// ```
/// use variant_internals::handlers::CompareHandler;
///
/// struct CaseInsensitive;
///
/// impl CompareHandler<String> for CaseInsensitive {
///     fn eq(left: &String, right: &String) -> Option<bool> {
///         Some(left.eq_ignore_ascii_case(right))
///     }
///
///     fn lt(_left: &String, _right: &String) -> Option<bool> {
///         None
///     }
/// }
/// ```
pub trait CompareHandler<V>: 'static {
    /// Compares two values of type `V` for equality.
    ///
    /// Returns `Some(result)` if the type supports equality comparison, and
    /// `None` if it does not. Value-dependent `None` results are not allowed;
    /// see the trait-level contract.
    fn eq(left: &V, right: &V) -> Option<bool>;

    /// Compares two values of type `V` for strict less-than ordering.
    ///
    /// Returns `Some(result)` if the type supports ordering comparison, and
    /// `None` if it does not. For partially ordered types the result follows
    /// the type's own `<` semantics (e.g. `NAN < x` is `Some(false)` for
    /// floats, not `None`).
    fn lt(left: &V, right: &V) -> Option<bool>;
}
