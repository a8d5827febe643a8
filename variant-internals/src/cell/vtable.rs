//! Vtable for type-erased cell operations.
//!
//! This module contains the [`CellVtable`] which enables calling handler
//! methods on cells when their concrete value type `V` and handler type `H`
//! have been erased. The vtable stores function pointers that dispatch to the
//! correct typed implementations.
//!
//! This module encapsulates the fields of [`CellVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameters must match the actual value
//! type and handler stored in the `CellData`**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via [`CellVtable::new`], which pairs the function pointers
//! with specific types `V` and `H` at compile time.

use core::{any::TypeId, ptr::NonNull};

use crate::{
    cell::{
        data::CellData,
        raw::{RawCell, RawCellRef},
    },
    handlers::CompareHandler,
    util::Erased,
};

/// Vtable for type-erased cell operations.
///
/// Contains function pointers for performing operations on cells without
/// knowing their concrete type at compile time.
///
/// # Safety
///
/// The following safety invariants are guaranteed to be upheld as long as this
/// struct exists:
///
/// * The fields `drop`, `clone_arc`, `strong_count`, `eq`, and `lt` all
///   point to the functions defined below
/// * The concrete pointers are all instantiated with the same value type `V`
///   and handler type `H` that were used to create this `CellVtable`.
pub(crate) struct CellVtable {
    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`CellVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the value type that was used to
    /// create this [`CellVtable`].
    type_name: fn() -> &'static str,
    /// Gets the [`TypeId`] of the handler that was used to create this
    /// [`CellVtable`].
    handler_type_id: fn() -> TypeId,
    /// Method to drop the [`triomphe::Arc<CellData<V>>`] instance pointed to
    /// by this pointer.
    drop: unsafe fn(NonNull<CellData<Erased>>),
    /// Clones the `triomphe::Arc<CellData<V>>` pointed to by this pointer.
    clone_arc: unsafe fn(NonNull<CellData<Erased>>) -> RawCell,
    /// Gets the strong count of the [`triomphe::Arc<CellData<V>>`] pointed to
    /// by this pointer.
    strong_count: unsafe fn(NonNull<CellData<Erased>>) -> usize,
    /// Compares the values of two cells for equality using the `eq` method
    /// on the handler.
    eq: unsafe fn(RawCellRef<'_>, RawCellRef<'_>) -> Option<bool>,
    /// Compares the values of two cells for strict less-than ordering using
    /// the `lt` method on the handler.
    lt: unsafe fn(RawCellRef<'_>, RawCellRef<'_>) -> Option<bool>,
}

impl CellVtable {
    /// Creates a new [`CellVtable`] for the value type `V` and the handler
    /// type `H`.
    pub(super) const fn new<V: 'static, H: CompareHandler<V>>() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<V>,
                type_name: core::any::type_name::<V>,
                handler_type_id: TypeId::of::<H>,
                drop: drop::<V>,
                clone_arc: clone_arc::<V>,
                strong_count: strong_count::<V>,
                eq: eq::<V, H>,
                lt: lt::<V, H>,
            }
        }
    }

    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`CellVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the value type that was used to
    /// create this [`CellVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Gets the [`TypeId`] of the handler that was used to create this
    /// [`CellVtable`].
    #[inline]
    pub(super) fn handler_type_id(&self) -> TypeId {
        (self.handler_type_id)()
    }

    /// Drops the `triomphe::Arc<CellData<V>>` instance pointed to by this
    /// pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The pointer comes from a [`triomphe::Arc<CellData<V>>`] turned into
    ///    a pointer via [`triomphe::Arc::into_raw`]
    /// 2. This [`CellVtable`] must be a vtable for the value type stored in
    ///    the [`CellData`].
    /// 3. The pointer is not used after calling this method. Storing the
    ///    pointer in structures that claim ownership of it, such as another
    ///    `Arc` counts as using after calling this method.
    #[inline]
    pub(super) unsafe fn drop(&self, ptr: NonNull<CellData<Erased>>) {
        // SAFETY: We know that `self.drop` points to the function `drop::<V>` below.
        // That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe {
            (self.drop)(ptr);
        }
    }

    /// Clones the [`triomphe::Arc<CellData<V>>`] pointed to by this pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The pointer comes from a [`triomphe::Arc<CellData<V>>`] turned into
    ///    a pointer via [`triomphe::Arc::into_raw`]
    /// 2. This [`CellVtable`] must be a vtable for the value type stored in
    ///    the [`CellData`].
    /// 3. All other references to this cell are compatible with shared
    ///    ownership. Specifically none of them assume that the strong_count is
    ///    `1`.
    #[inline]
    pub(super) unsafe fn clone_arc(&self, ptr: NonNull<CellData<Erased>>) -> RawCell {
        // SAFETY: We know that `self.clone_arc` points to the function `clone_arc::<V>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe { (self.clone_arc)(ptr) }
    }

    /// Gets the strong count of the [`triomphe::Arc<CellData<V>>`] pointed to
    /// by this pointer.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The pointer comes from [`triomphe::Arc<CellData<V>>`] via
    ///    [`triomphe::Arc::into_raw`]
    /// 2. This [`CellVtable`] must be a vtable for the value type stored in
    ///    the [`CellData`].
    #[inline]
    pub(super) unsafe fn strong_count(&self, ptr: NonNull<CellData<Erased>>) -> usize {
        // SAFETY: We know that `self.strong_count` points to the function
        // `strong_count::<V>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.strong_count)(ptr) }
    }

    /// Compares the values of two cells for equality using the [`H::eq`]
    /// function used when creating this [`CellVtable`].
    ///
    /// [`H::eq`]: CompareHandler::eq
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`CellVtable`] must be a vtable for the value type stored in
    ///    the left [`RawCellRef`].
    /// 2. The value type stored in the right [`RawCellRef`] is the same
    ///    concrete type as the value type stored in the left one.
    #[inline]
    pub(super) unsafe fn eq(&self, left: RawCellRef<'_>, right: RawCellRef<'_>) -> Option<bool> {
        // SAFETY: We know that `self.eq` points to the function `eq::<V, H>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.eq)(left, right) }
    }

    /// Compares the values of two cells for strict less-than ordering using
    /// the [`H::lt`] function used when creating this [`CellVtable`].
    ///
    /// [`H::lt`]: CompareHandler::lt
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`CellVtable`] must be a vtable for the value type stored in
    ///    the left [`RawCellRef`].
    /// 2. The value type stored in the right [`RawCellRef`] is the same
    ///    concrete type as the value type stored in the left one.
    #[inline]
    pub(super) unsafe fn lt(&self, left: RawCellRef<'_>, right: RawCellRef<'_>) -> Option<bool> {
        // SAFETY: We know that `self.lt` points to the function `lt::<V, H>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.lt)(left, right) }
    }
}

/// Drops the [`triomphe::Arc<CellData<V>>`] instance pointed to by this
/// pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The pointer comes from [`triomphe::Arc<CellData<V>>`] via
///    [`triomphe::Arc::into_raw`]
/// 2. The value type `V` matches the actual value type stored in the
///    [`CellData`]
/// 3. The pointer is not used after calling this method. Storing the
///    pointer in structures that claim ownership of it, such as another
///    `Arc` counts as using after calling this method.
pub(super) unsafe fn drop<V: 'static>(ptr: NonNull<CellData<Erased>>) {
    let ptr: NonNull<CellData<V>> = ptr.cast();
    let ptr = ptr.as_ptr();
    // SAFETY:
    // 1. The pointer has the correct type and came from `Arc::into_raw` (guaranteed
    //    by caller)
    // 2. After `from_raw`, the pointer is consumed and not accessed again
    let arc = unsafe { triomphe::Arc::from_raw(ptr) };
    core::mem::drop(arc);
}

/// Clones the [`triomphe::Arc<CellData<V>>`] pointed to by this pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The pointer comes from a [`triomphe::Arc<CellData<V>>`] turned into a
///    pointer via [`triomphe::Arc::into_raw`]
/// 2. The value type `V` matches the actual value type stored in the
///    [`CellData`]
/// 3. All other references to this cell are compatible with shared ownership.
///    Specifically none of them assume that the strong_count is `1`.
unsafe fn clone_arc<V: 'static>(ptr: NonNull<CellData<Erased>>) -> RawCell {
    let ptr: *const CellData<V> = ptr.cast::<CellData<V>>().as_ptr();

    // SAFETY: The pointer is valid and came from `Arc::into_raw` with the correct
    // type (guaranteed by the caller), which fulfills the requirements for
    // `ArcBorrow::from_ptr`.
    let arc_borrow = unsafe { triomphe::ArcBorrow::from_ptr(ptr) };

    let arc = arc_borrow.clone_arc();
    RawCell::from_arc(arc)
}

/// Gets the strong count of the [`triomphe::Arc<CellData<V>>`] pointed to by
/// this pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The pointer comes from [`triomphe::Arc<CellData<V>>`] via
///    [`triomphe::Arc::into_raw`]
/// 2. The value type `V` matches the actual value type stored in the
///    [`CellData`]
unsafe fn strong_count<V: 'static>(ptr: NonNull<CellData<Erased>>) -> usize {
    let ptr: *const CellData<V> = ptr.cast::<CellData<V>>().as_ptr();

    // SAFETY: The pointer is valid and came from `Arc::into_raw` with the correct
    // type (guaranteed by the caller), which fulfills the requirements for
    // `ArcBorrow::from_ptr`.
    let arc_borrow = unsafe { triomphe::ArcBorrow::from_ptr(ptr) };

    triomphe::ArcBorrow::strong_count(&arc_borrow)
}

/// Compares the values of two cells for equality using the handler's eq
/// implementation.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `V` matches the actual value type stored in the left
///    [`CellData`]
/// 2. The type `V` matches the actual value type stored in the right
///    [`CellData`]
unsafe fn eq<V: 'static, H: CompareHandler<V>>(
    left: RawCellRef<'_>,
    right: RawCellRef<'_>,
) -> Option<bool> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let left: &V = unsafe { left.value_downcast_unchecked::<V>() };
    // SAFETY:
    // 1. Guaranteed by the caller
    let right: &V = unsafe { right.value_downcast_unchecked::<V>() };
    H::eq(left, right)
}

/// Compares the values of two cells for strict less-than ordering using the
/// handler's lt implementation.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `V` matches the actual value type stored in the left
///    [`CellData`]
/// 2. The type `V` matches the actual value type stored in the right
///    [`CellData`]
unsafe fn lt<V: 'static, H: CompareHandler<V>>(
    left: RawCellRef<'_>,
    right: RawCellRef<'_>,
) -> Option<bool> {
    // SAFETY:
    // 1. Guaranteed by the caller
    let left: &V = unsafe { left.value_downcast_unchecked::<V>() };
    // SAFETY:
    // 1. Guaranteed by the caller
    let right: &V = unsafe { right.value_downcast_unchecked::<V>() };
    H::lt(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cell::RawCell, handlers::CompareHandler};

    struct HandlerI32;
    impl CompareHandler<i32> for HandlerI32 {
        fn eq(left: &i32, right: &i32) -> Option<bool> {
            Some(left == right)
        }

        fn lt(left: &i32, right: &i32) -> Option<bool> {
            Some(left < right)
        }
    }

    #[test]
    fn test_cell_vtable_interned() {
        // Test that vtables have proper static lifetime and can be safely shared
        let vtable1 = CellVtable::new::<i32, HandlerI32>();
        let vtable2 = CellVtable::new::<i32, HandlerI32>();

        // Both should be the exact same static instance
        assert!(core::ptr::eq(vtable1, vtable2));
    }

    #[test]
    fn test_cell_type_identity() {
        let vtable = CellVtable::new::<i32, HandlerI32>();
        assert_eq!(vtable.type_id(), TypeId::of::<i32>());
        assert_eq!(vtable.type_name(), core::any::type_name::<i32>());
        assert_eq!(vtable.handler_type_id(), TypeId::of::<HandlerI32>());
    }

    #[test]
    fn test_cell_clone_shares_data() {
        let cell = RawCell::new::<i32, HandlerI32>(42);

        // SAFETY: There are no assumptions about single ownership
        let cloned_cell = unsafe { cell.as_ref().clone_arc() };

        // Both cells should point to the same underlying data
        assert!(core::ptr::eq(
            cell.as_ref().as_ptr(),
            cloned_cell.as_ref().as_ptr()
        ));
    }
}
