//! Handlers that control how stored values are compared.
//!
//! Handlers determine which relational operators a [`Variant`](crate::Variant)
//! supports for its stored value. The variant library provides several
//! built-in handlers that cover common use cases.
//!
//! # What Are Handlers?
//!
//! Handlers are types that implement the [`CompareHandler`] trait. They define
//! how to compare two values of the stored type, including:
//! - Whether equality comparison is available (via [`PartialEq`])
//! - Whether ordering comparison is available (via [`PartialOrd`])
//!
//! The handler is chosen once, when the value is stored, and is baked into the
//! cell alongside the value. It cannot change for the lifetime of the cell. A
//! comparison on a container whose handler lacks the requested operator fails
//! at runtime with
//! [`VariantError::OperatorUnsupported`](crate::VariantError::OperatorUnsupported).
//!
//! # Built-in Handlers
//!
//! ## [`Ordered`]
//!
//! For types implementing [`PartialEq`] and [`PartialOrd`]. Both equality and
//! ordering comparisons delegate to the type's own operators. This is the
//! default handler for comparable types.
//!
//! ## [`Equatable`]
//!
//! For types implementing [`PartialEq`] but not [`PartialOrd`]. Equality
//! delegates to the type's operator; ordering is unsupported.
//!
//! ## [`Opaque`]
//!
//! For any type. Both operators are unsupported. Used when no comparison is
//! available, or when comparisons should be deliberately disabled.
//!
//! # When Handlers Are Selected
//!
//! Handlers are typically selected automatically by the
//! [`variant!`](crate::variant!) macro based on the traits implemented by the
//! stored type. You can also specify a handler explicitly using
//! [`Variant::new_custom`](crate::Variant::new_custom).
//!
//! # Examples
//!
//! ```rust
//! use variant::prelude::*;
//!
//! // Ordered handler (automatic for PartialEq + PartialOrd types)
//! let a = variant!(10);
//! let b = variant!(20);
//! assert_eq!(a.try_lt(&b), Ok(true));
//!
//! // Opaque handler (automatic for types with no comparison operators)
//! struct Sensor {
//!     reading: f64,
//! }
//! let v = variant!(Sensor { reading: 1.5 });
//! assert!(v.try_eq(&v).is_err());
//! ```

pub use variant_internals::handlers::CompareHandler;

/// Handler for types implementing [`PartialEq`] and [`PartialOrd`].
///
/// This handler delegates both comparison operators to the type's existing
/// implementations. This is the default handler for any type that supports
/// both equality and ordering.
///
/// # When to Use
///
/// This handler is automatically selected by the [`variant!`](crate::variant!)
/// macro when you create a container from a type implementing `PartialEq` and
/// `PartialOrd`. You rarely need to specify it explicitly.
///
/// # Example
///
/// ```rust
/// use variant::prelude::*;
///
/// let a = variant!(1);
/// let b = variant!(2);
/// assert_eq!(a.try_eq(&b), Ok(false));
/// assert_eq!(a.try_lt(&b), Ok(true));
/// ```
#[derive(Copy, Clone)]
pub struct Ordered;

impl<V> CompareHandler<V> for Ordered
where
    V: PartialEq + PartialOrd,
{
    fn eq(left: &V, right: &V) -> Option<bool> {
        Some(left == right)
    }

    fn lt(left: &V, right: &V) -> Option<bool> {
        Some(left < right)
    }
}

/// Handler for types implementing [`PartialEq`] but not [`PartialOrd`].
///
/// Equality comparison delegates to the type's `PartialEq` implementation,
/// while ordering comparison is unsupported and fails at runtime with
/// [`VariantError::OperatorUnsupported`](crate::VariantError::OperatorUnsupported).
///
/// # When to Use
///
/// This handler is automatically selected for types that implement `PartialEq`
/// but not `PartialOrd`, such as hash maps or types with deliberately
/// unordered semantics.
///
/// # Example
///
/// ```rust
/// use variant::prelude::*;
///
/// #[derive(PartialEq)]
/// struct Tag(&'static str);
///
/// let a = variant!(Tag("alpha"));
/// let b = variant!(Tag("alpha"));
/// assert_eq!(a.try_eq(&b), Ok(true));
/// assert!(a.try_lt(&b).is_err());
/// ```
#[derive(Copy, Clone)]
pub struct Equatable;

impl<V> CompareHandler<V> for Equatable
where
    V: PartialEq,
{
    fn eq(left: &V, right: &V) -> Option<bool> {
        Some(left == right)
    }

    fn lt(_left: &V, _right: &V) -> Option<bool> {
        None
    }
}

/// Handler for any type, regardless of implemented traits.
///
/// This is the most generic handler, working with any type without requiring
/// `PartialEq` or `PartialOrd` implementations. Both comparison operators are
/// unsupported and fail at runtime with
/// [`VariantError::OperatorUnsupported`](crate::VariantError::OperatorUnsupported).
///
/// # When to Use
///
/// This handler is a fallback for types that don't implement any comparison
/// traits. It's automatically selected when no more specific handler applies,
/// or can be used explicitly when you want to store a comparable type without
/// exposing its operators.
///
/// # Example
///
/// ```rust
/// use variant::{Variant, handlers};
///
/// // Use the Opaque handler explicitly to disable comparisons
/// let v = Variant::new_custom::<handlers::Opaque, _>(42);
/// assert!(v.try_eq(&v).is_err());
/// ```
#[derive(Copy, Clone)]
pub struct Opaque;

impl<V> CompareHandler<V> for Opaque {
    fn eq(_left: &V, _right: &V) -> Option<bool> {
        None
    }

    fn lt(_left: &V, _right: &V) -> Option<bool> {
        None
    }
}
