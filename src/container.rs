//! The [`Variant`] container and its comparison semantics.

use core::any::TypeId;

use variant_internals::{RawCell, RawCellRef};

use crate::{
    error::{Operator, VariantError},
    handlers::{self, CompareHandler},
};

/// Controls how two containers decide whether they hold the same type during
/// a comparison.
///
/// The identity of a stored type is the pair of its [`TypeId`] and its
/// [`core::any::type_name`]. The two modes compare different halves of that
/// pair:
///
/// - [`Named`](IdentityMode::Named) performs a full content comparison of the
///   type names. This is the standard mode and the default.
/// - [`Interned`](IdentityMode::Interned) compares the [`TypeId`] tokens
///   directly. The tokens are interned process-wide, so this is a cheap
///   identity comparison.
///
/// Regardless of mode, the actual value access during a comparison is gated
/// on exact [`TypeId`] equality, so the mode only affects how a mismatch is
/// detected and reported, never soundness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum IdentityMode {
    /// Compare type names by content. The standard mode.
    #[default]
    Named,
    /// Compare interned [`TypeId`] tokens by identity. The optimized mode.
    Interned,
}

/// A type-erased container holding zero or one value of arbitrary `'static`
/// type.
///
/// A `Variant` is created empty or from a value, queried for the runtime
/// identity of its contents, and read back through strict or lenient typed
/// retrieval. Two containers can be compared with the fallible relational
/// methods; whether a comparison is possible depends on the operators the
/// stored type implements, captured at storage time by a
/// [`CompareHandler`].
///
/// # Sharing
///
/// Cloning a `Variant` is cheap: it duplicates the *reference* to the stored
/// cell, not the cell itself. Both containers then observe the same value
/// until one of them is reassigned, at which point only that container is
/// redirected to a fresh cell.
///
/// ```
/// use variant::prelude::*;
///
/// let a = variant!(10);
/// let mut b = a.clone();
/// assert_eq!(a.try_eq(&b), Ok(true));
///
/// b.set(20);
/// assert_eq!(a.value_ref::<i32>(), Ok(&10));
/// assert_eq!(b.value_ref::<i32>(), Ok(&20));
/// ```
///
/// # Comparisons
///
/// Comparison is fallible: `Variant` deliberately does not implement
/// [`PartialEq`] or [`PartialOrd`], because a comparison can fail with
/// [`VariantError::OperatorUnsupported`] or
/// [`VariantError::IncompatibleTypes`] and the built-in operators have no way
/// to report that. Use [`try_eq`](Variant::try_eq),
/// [`try_lt`](Variant::try_lt) and friends instead.
pub struct Variant {
    /// The ownership slot. `None` is the empty state.
    cell: Option<RawCell>,
}

impl Variant {
    /// Creates a new container holding `value`.
    ///
    /// The value type must support both equality and ordering; the
    /// [`Ordered`](handlers::Ordered) handler is selected. To store a type
    /// without comparison operators, use [`Variant::new_custom`] or the
    /// [`variant!`](crate::variant!) macro, which picks the most capable
    /// handler automatically.
    ///
    /// # Example
    ///
    /// ```
    /// use variant::Variant;
    ///
    /// let v = Variant::new(10);
    /// assert!(v.is_type::<i32>());
    /// ```
    #[must_use]
    pub fn new<V>(value: V) -> Self
    where
        V: PartialEq + PartialOrd + 'static,
    {
        Self::new_custom::<handlers::Ordered, V>(value)
    }

    /// Creates a new container holding `value`, using the handler `H` for all
    /// comparison operations.
    ///
    /// # Example
    ///
    /// ```
    /// use variant::{Variant, handlers};
    ///
    /// struct Sensor {
    ///     reading: f64,
    /// }
    ///
    /// let v = Variant::new_custom::<handlers::Opaque, _>(Sensor { reading: 1.5 });
    /// assert!(v.is_type::<Sensor>());
    /// ```
    #[must_use]
    pub fn new_custom<H, V>(value: V) -> Self
    where
        V: 'static,
        H: CompareHandler<V>,
    {
        Self {
            cell: Some(RawCell::new::<V, H>(value)),
        }
    }

    /// Creates a new container holding `value`.
    ///
    /// Named-constructor form of [`Variant::new`].
    #[must_use]
    pub fn from_value<V>(value: V) -> Self
    where
        V: PartialEq + PartialOrd + 'static,
    {
        Self::new(value)
    }

    /// Creates a new empty container.
    ///
    /// Equivalent to [`Variant::default`].
    #[must_use]
    pub const fn empty() -> Self {
        Self { cell: None }
    }

    /// Replaces the held value with `value`, allocating a fresh cell.
    ///
    /// If the previous cell was shared with a clone of this container, the
    /// clone keeps observing the old value; only this container is redirected.
    pub fn set<V>(&mut self, value: V)
    where
        V: PartialEq + PartialOrd + 'static,
    {
        *self = Self::new(value);
    }

    /// Replaces the held value with `value`, using the handler `H` for all
    /// comparison operations on the fresh cell.
    pub fn set_custom<H, V>(&mut self, value: V)
    where
        V: 'static,
        H: CompareHandler<V>,
    {
        *self = Self::new_custom::<H, V>(value);
    }

    /// Returns `true` if the container holds a value whose type is exactly
    /// `V`.
    ///
    /// Returns `false` on an empty container; this method never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use variant::Variant;
    ///
    /// let v = Variant::new(10);
    /// assert!(v.is_type::<i32>());
    /// assert!(!v.is_type::<f32>());
    /// assert!(!Variant::empty().is_type::<i32>());
    /// ```
    #[must_use]
    pub fn is_type<V: 'static>(&self) -> bool {
        self.type_id() == Some(TypeId::of::<V>())
    }

    /// Returns `true` if the container holds no value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cell.is_none()
    }

    /// Returns `true` if the container holds a value.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.cell.is_some()
    }

    /// Releases the held cell reference, returning the container to the empty
    /// state.
    ///
    /// If this container held the last reference to a shared cell, the cell
    /// is destroyed.
    pub fn clear(&mut self) {
        self.cell = None;
    }

    /// Returns the [`TypeId`] of the stored value, or `None` if the container
    /// is empty.
    #[must_use]
    pub fn type_id(&self) -> Option<TypeId> {
        self.cell.as_ref().map(|cell| cell.as_ref().value_type_id())
    }

    /// Returns the [`core::any::type_name`] of the stored value, or `None` if
    /// the container is empty.
    ///
    /// Names are meant for diagnostics. Within one program run they are
    /// stable, but two distinct types are not guaranteed to have distinct
    /// names; exact identity checks go through [`Variant::type_id`].
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.cell
            .as_ref()
            .map(|cell| cell.as_ref().value_type_name())
    }

    /// Returns the number of containers currently sharing the held cell, or
    /// `None` if the container is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use variant::Variant;
    ///
    /// let a = Variant::new(10);
    /// assert_eq!(a.strong_count(), Some(1));
    /// let b = a.clone();
    /// assert_eq!(a.strong_count(), Some(2));
    /// drop(b);
    /// assert_eq!(a.strong_count(), Some(1));
    /// ```
    #[must_use]
    pub fn strong_count(&self) -> Option<usize> {
        self.cell.as_ref().map(|cell| cell.as_ref().strong_count())
    }

    /// Strict retrieval: returns a reference to the stored value of type `V`.
    ///
    /// # Errors
    ///
    /// Fails with [`VariantError::TypeMismatch`] if the container is empty or
    /// holds a value of a different type.
    ///
    /// # Example
    ///
    /// ```
    /// use variant::Variant;
    ///
    /// let v = Variant::new(10);
    /// assert_eq!(v.value_ref::<i32>(), Ok(&10));
    /// assert!(v.value_ref::<f32>().is_err());
    /// assert!(Variant::empty().value_ref::<i32>().is_err());
    /// ```
    pub fn value_ref<V: 'static>(&self) -> Result<&V, VariantError> {
        let Some(cell) = &self.cell else {
            return Err(VariantError::TypeMismatch {
                expected: core::any::type_name::<V>(),
                found: None,
            });
        };
        let cell = cell.as_ref();
        if cell.value_type_id() != TypeId::of::<V>() {
            return Err(VariantError::TypeMismatch {
                expected: core::any::type_name::<V>(),
                found: Some(cell.value_type_name()),
            });
        }
        // SAFETY: We just checked that the stored type is `V`
        Ok(unsafe { cell.value_downcast_unchecked::<V>() })
    }

    /// Lenient retrieval: returns a copy of the stored value of type `V`, or
    /// a default-constructed `V` if the container is empty.
    ///
    /// Only emptiness is forgiven, not type mismatch.
    ///
    /// # Errors
    ///
    /// Fails with [`VariantError::TypeMismatch`] if the container is
    /// non-empty and holds a value of a different type.
    ///
    /// # Example
    ///
    /// ```
    /// use variant::Variant;
    ///
    /// assert_eq!(Variant::empty().value::<i32>(), Ok(0));
    /// assert_eq!(Variant::new(10).value::<i32>(), Ok(10));
    /// assert!(Variant::new(10).value::<f32>().is_err());
    /// ```
    pub fn value<V>(&self) -> Result<V, VariantError>
    where
        V: Clone + Default + 'static,
    {
        if self.cell.is_none() {
            return Ok(V::default());
        }
        self.value_ref::<V>().cloned()
    }

    /// Non-throwing retrieval: returns a reference to the stored value of
    /// type `V`, or `None` if the container is empty or holds a different
    /// type.
    #[must_use]
    pub fn try_value<V: 'static>(&self) -> Option<&V> {
        self.value_ref::<V>().ok()
    }

    /// Non-throwing mutable retrieval: returns a mutable reference to the
    /// stored value of type `V`.
    ///
    /// Returns `None` if the container is empty, holds a different type, or
    /// shares its cell with a clone. In-place mutation is only granted on a
    /// uniquely-owned cell; reassign via [`Variant::set`] to change a shared
    /// container.
    ///
    /// # Example
    ///
    /// ```
    /// use variant::Variant;
    ///
    /// let mut v = Variant::new(10);
    /// if let Some(value) = v.try_value_mut::<i32>() {
    ///     *value = 11;
    /// }
    /// assert_eq!(v.value_ref::<i32>(), Ok(&11));
    ///
    /// let shared = v.clone();
    /// assert!(v.try_value_mut::<i32>().is_none());
    /// drop(shared);
    /// assert!(v.try_value_mut::<i32>().is_some());
    /// ```
    #[must_use]
    pub fn try_value_mut<V: 'static>(&mut self) -> Option<&mut V> {
        let cell = self.cell.as_mut()?;
        {
            let cell = cell.as_ref();
            if cell.value_type_id() != TypeId::of::<V>() || cell.strong_count() != 1 {
                return None;
            }
        }
        // SAFETY: The strong count is 1 and we hold the only handle behind an
        // exclusive borrow of `self`, so no other reference to the cell exists
        let cell = unsafe { cell.as_mut() };
        // SAFETY: We just checked that the stored type is `V`
        Some(unsafe { cell.into_value_downcast_unchecked::<V>() })
    }

    /// Equality comparison using the default [`IdentityMode::Named`].
    ///
    /// Both containers empty compares equal; exactly one empty compares
    /// unequal.
    ///
    /// # Errors
    ///
    /// - [`VariantError::IncompatibleTypes`] if the containers hold values of
    ///   different types.
    /// - [`VariantError::OperatorUnsupported`] if the stored type's handler
    ///   does not support equality.
    pub fn try_eq(&self, other: &Variant) -> Result<bool, VariantError> {
        self.try_eq_in(other, IdentityMode::default())
    }

    /// Equality comparison using the given [`IdentityMode`].
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_eq`].
    pub fn try_eq_in(&self, other: &Variant, mode: IdentityMode) -> Result<bool, VariantError> {
        let (left, right) = match (&self.cell, &other.cell) {
            (None, None) => return Ok(true),
            (None, Some(_)) | (Some(_), None) => return Ok(false),
            (Some(left), Some(right)) => (left.as_ref(), right.as_ref()),
        };
        check_identity(left, right, mode)?;
        // SAFETY: `check_identity` verified that both cells store the same
        // concrete type
        let result = unsafe { left.value_eq(right) };
        result.ok_or(VariantError::OperatorUnsupported {
            operator: Operator::Eq,
            type_name: left.value_type_name(),
        })
    }

    /// Inequality comparison using the default [`IdentityMode::Named`].
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_eq`].
    pub fn try_ne(&self, other: &Variant) -> Result<bool, VariantError> {
        self.try_ne_in(other, IdentityMode::default())
    }

    /// Inequality comparison using the given [`IdentityMode`].
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_eq`].
    pub fn try_ne_in(&self, other: &Variant, mode: IdentityMode) -> Result<bool, VariantError> {
        Ok(!self.try_eq_in(other, mode)?)
    }

    /// Strict less-than comparison using the default [`IdentityMode::Named`].
    ///
    /// An empty container orders before any non-empty container; two empty
    /// containers are not less than each other.
    ///
    /// # Errors
    ///
    /// - [`VariantError::IncompatibleTypes`] if the containers hold values of
    ///   different types.
    /// - [`VariantError::OperatorUnsupported`] if the stored type's handler
    ///   does not support ordering.
    pub fn try_lt(&self, other: &Variant) -> Result<bool, VariantError> {
        self.try_lt_in(other, IdentityMode::default())
    }

    /// Strict less-than comparison using the given [`IdentityMode`].
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_lt`].
    pub fn try_lt_in(&self, other: &Variant, mode: IdentityMode) -> Result<bool, VariantError> {
        let (left, right) = match (&self.cell, &other.cell) {
            (None, None) => return Ok(false),
            (None, Some(_)) => return Ok(true),
            (Some(_), None) => return Ok(false),
            (Some(left), Some(right)) => (left.as_ref(), right.as_ref()),
        };
        check_identity(left, right, mode)?;
        // SAFETY: `check_identity` verified that both cells store the same
        // concrete type
        let result = unsafe { left.value_lt(right) };
        result.ok_or(VariantError::OperatorUnsupported {
            operator: Operator::Lt,
            type_name: left.value_type_name(),
        })
    }

    /// Strict greater-than comparison using the default
    /// [`IdentityMode::Named`].
    ///
    /// Defined as `other < self`.
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_lt`].
    pub fn try_gt(&self, other: &Variant) -> Result<bool, VariantError> {
        self.try_gt_in(other, IdentityMode::default())
    }

    /// Strict greater-than comparison using the given [`IdentityMode`].
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_lt`].
    pub fn try_gt_in(&self, other: &Variant, mode: IdentityMode) -> Result<bool, VariantError> {
        other.try_lt_in(self, mode)
    }

    /// Less-than-or-equal comparison using the default
    /// [`IdentityMode::Named`].
    ///
    /// Defined as `!(self < other)`, not as a reflexive total-order
    /// operator. For partially ordered types the negation-based definition
    /// can disagree with an element-wise `<=`.
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_lt`].
    pub fn try_le(&self, other: &Variant) -> Result<bool, VariantError> {
        self.try_le_in(other, IdentityMode::default())
    }

    /// Less-than-or-equal comparison using the given [`IdentityMode`].
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_lt`].
    pub fn try_le_in(&self, other: &Variant, mode: IdentityMode) -> Result<bool, VariantError> {
        Ok(!self.try_lt_in(other, mode)?)
    }

    /// Greater-than-or-equal comparison using the default
    /// [`IdentityMode::Named`].
    ///
    /// Defined as `!(other < self)`.
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_lt`].
    pub fn try_ge(&self, other: &Variant) -> Result<bool, VariantError> {
        self.try_ge_in(other, IdentityMode::default())
    }

    /// Greater-than-or-equal comparison using the given [`IdentityMode`].
    ///
    /// # Errors
    ///
    /// Same as [`Variant::try_lt`].
    pub fn try_ge_in(&self, other: &Variant, mode: IdentityMode) -> Result<bool, VariantError> {
        Ok(!other.try_lt_in(self, mode)?)
    }
}

/// Checks that two non-empty cells hold values of the same type under the
/// given [`IdentityMode`].
///
/// In [`IdentityMode::Named`] the decision is made by content comparison of
/// the type names, but the subsequent value access still requires exact
/// [`TypeId`] equality. If two distinct types ever share a name, the
/// comparison is rejected instead of downcasting.
fn check_identity(
    left: RawCellRef<'_>,
    right: RawCellRef<'_>,
    mode: IdentityMode,
) -> Result<(), VariantError> {
    let matches = match mode {
        IdentityMode::Named => left.value_type_name() == right.value_type_name(),
        IdentityMode::Interned => left.value_type_id() == right.value_type_id(),
    };
    if !matches || left.value_type_id() != right.value_type_id() {
        return Err(VariantError::IncompatibleTypes {
            left: left.value_type_name(),
            right: right.value_type_name(),
        });
    }
    Ok(())
}

impl Clone for Variant {
    fn clone(&self) -> Self {
        let cell = self.cell.as_ref().map(|cell| {
            // SAFETY: No method on `Variant` assumes unique ownership of the
            // cell except `try_value_mut`, which re-checks the strong count
            // under an exclusive borrow
            unsafe { cell.as_ref().clone_arc() }
        });
        Self { cell }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::empty()
    }
}

impl core::fmt::Debug for Variant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.type_name() {
            Some(name) => write!(f, "Variant({name})"),
            None => f.write_str("Variant(empty)"),
        }
    }
}
