/// Macro to create a [`Variant`] with automatic handler selection.
///
/// This macro accepts any expression and stores its value in a new
/// [`Variant`]. It is mostly equivalent to calling [`Variant::new`], however
/// it has one important benefit: it automatically infers the most capable
/// comparison handler based on the operators the value's type implements.
///
/// The selection is resolved statically at the call site:
///
/// - [`PartialEq`] + [`PartialOrd`] → [`handlers::Ordered`]
/// - [`PartialEq`] only → [`handlers::Equatable`]
/// - neither → [`handlers::Opaque`]
///
/// This means the macro works for types without any comparison operators,
/// where [`Variant::new`] would not compile; comparisons on such containers
/// fail at runtime instead.
///
/// [`Variant`]: crate::Variant
/// [`Variant::new`]: crate::Variant::new
/// [`handlers::Ordered`]: crate::handlers::Ordered
/// [`handlers::Equatable`]: crate::handlers::Equatable
/// [`handlers::Opaque`]: crate::handlers::Opaque
///
/// # Examples
///
/// ```
/// use variant::prelude::*;
///
/// // Fully comparable type: both operators work
/// let a = variant!(0);
/// let b = variant!(10);
/// assert_eq!(a.try_lt(&b), Ok(true));
///
/// // Equality-only type: `==` works, `<` fails at runtime
/// #[derive(PartialEq)]
/// struct Tag(u32);
/// let a = variant!(Tag(1));
/// let b = variant!(Tag(1));
/// assert_eq!(a.try_eq(&b), Ok(true));
/// assert!(a.try_lt(&b).is_err());
///
/// // Operator-less type: storage works, comparisons fail at runtime
/// struct Foo {
///     field: i32,
/// }
/// let a = variant!(Foo { field: 10 });
/// let b = variant!(Foo { field: 20 });
/// assert!(a.try_eq(&b).is_err());
/// ```
#[macro_export]
macro_rules! variant {
    ($value:expr $(,)?) => {{
        use $crate::__private::kind::*;
        let value = $value;
        let handler = (&&&Wrap(&value)).handler();
        macro_helper_new_variant(handler, value)
    }};
}
