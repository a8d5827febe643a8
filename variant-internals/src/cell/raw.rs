//! Type-erased cell pointer types.
//!
//! This module encapsulates the `ptr` field of [`RawCell`], [`RawCellRef`],
//! and [`RawCellMut`], ensuring it is only visible within this module. This
//! visibility restriction guarantees the safety invariant: **the pointer
//! always comes from `Arc<CellData<V>>`**.
//!
//! # Safety Invariant
//!
//! Since the `ptr` field can only be set via [`RawCell::new`] or
//! [`RawCell::from_arc`] (which create it from `Arc::into_raw`), and cannot
//! be modified afterward (no `pub` or `pub(crate)` fields), the pointer
//! provenance remains valid throughout the value's lifetime.
//!
//! The [`RawCell::drop`] implementation and reference counting operations
//! rely on this invariant to safely reconstruct the `Arc` and manage memory.
//!
//! # Type Erasure
//!
//! The concrete type parameter `V` is erased by casting to `CellData<Erased>`.
//! The vtable stored within the `CellData` provides the runtime type
//! information needed to safely downcast and compare values.
//!
//! # Allocation Strategy
//!
//! Cells use `triomphe::Arc` for storage. This enables:
//! - Cheap cloning through reference counting
//! - Shared ownership across multiple containers
//! - Copy-on-reassign container semantics without deep copies

use core::{any::TypeId, ptr::NonNull};

use crate::{
    cell::data::CellData,
    handlers::CompareHandler,
    util::Erased,
};

/// A pointer to a [`CellData`] that is guaranteed to point to an initialized
/// instance of a [`CellData<V>`] for some specific `V`, though we do not know
/// which actual `V` it is.
///
/// However, the pointer is allowed to transition into a non-initialized state
/// inside the [`RawCell::drop`] method.
///
/// The pointer is guaranteed to have been created using
/// [`triomphe::Arc::into_raw`].
///
/// We cannot use a [`triomphe::Arc<CellData<V>>`] directly, because that does
/// not allow us to type-erase the `V`.
#[repr(transparent)]
pub struct RawCell {
    /// Pointer to the inner cell data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a
    ///    `triomphe::Arc<CellData<V>>` for some `V` using
    ///    `triomphe::Arc::into_raw`.
    /// 2. The pointer retains full provenance over the `Arc` for the entire
    ///    lifetime of this object (i.e., it was not derived from a `&T`)
    /// 3. The pointer will point to the same `CellData<V>` for the entire
    ///    lifetime of this object.
    ptr: NonNull<CellData<Erased>>,
}

impl RawCell {
    /// Creates a new [`RawCell`] from a [`triomphe::Arc<CellData<V>>`].
    #[inline]
    pub(super) fn from_arc<V: 'static>(data: triomphe::Arc<CellData<V>>) -> Self {
        let ptr: *const CellData<V> = triomphe::Arc::into_raw(data);
        let ptr: *mut CellData<Erased> = ptr.cast::<CellData<Erased>>().cast_mut();

        // SAFETY:
        // 1. Triomphe guarantees that `Arc::into_raw` returns a non-null pointer.
        let ptr: NonNull<CellData<Erased>> = unsafe { NonNull::new_unchecked(ptr) };

        Self {
            // SAFETY:
            // 1. We just created the pointer using `triomphe::Arc::into_raw`.
            // 2. We have provenance and we are not locally changing that here
            // 3. We are creating the object here and we are not changing the pointer.
            ptr,
        }
    }

    /// Creates a new [`RawCell`] with the specified handler and value.
    ///
    /// The created cell will capture the value type's runtime identity and
    /// use the specified handler for all comparison operations. It will have
    /// a strong count of 1.
    #[inline]
    pub fn new<V, H>(value: V) -> Self
    where
        V: 'static,
        H: CompareHandler<V>,
    {
        let data = triomphe::Arc::new(CellData::new::<H>(value));
        Self::from_arc(data)
    }

    /// Returns a reference to the [`CellData`] instance.
    #[inline]
    pub fn as_ref(&self) -> RawCellRef<'_> {
        RawCellRef {
            // SAFETY:
            // 1. Guaranteed by the invariants on `RawCell`
            // 2. Guaranteed by the invariants on `RawCell` and
            //    the fact that we are taking a shared reference to `self`
            // 3. We are creating the `RawCellRef` here, and we are
            //    not changing the pointer
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }

    /// Returns a mutable reference to the [`CellData`] instance.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This is the only existing reference pointing to the inner
    ///    [`CellData`]. Specifically the strong count of the inner
    ///    [`triomphe::Arc`] must be `1`.
    #[inline]
    pub unsafe fn as_mut(&mut self) -> RawCellMut<'_> {
        RawCellMut {
            // SAFETY:
            // 1. The pointer comes from `Arc::into_raw` (guaranteed by `RawCell`'s invariant)
            // 2. We are creating the `RawCellMut` here, and we are
            //    not changing the pointer
            // 3. Exclusive mutable access is guaranteed by the caller's obligation that no
            //    other references to the inner `CellData` exist
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }
}

impl Drop for RawCell {
    #[inline]
    fn drop(&mut self) {
        let vtable = self.as_ref().vtable();

        // SAFETY:
        // 1. The pointer comes from `Arc::into_raw` (guaranteed by `RawCell::new`)
        // 2. The vtable returned by `self.as_ref().vtable()` is guaranteed to match the
        //    data in the `CellData`.
        // 3. The pointer is not used after this call (we're in the drop function)
        unsafe {
            vtable.drop(self.ptr);
        }
    }
}

/// A lifetime-bound pointer to a [`CellData`] that is guaranteed to point
/// to an initialized instance of a [`CellData<V>`] for some specific `V`,
/// though we do not know which actual `V` it is.
///
/// We cannot use a [`&'a CellData<V>`] directly, because that would require
/// us to know the actual type of the value, which we do not.
///
/// [`&'a CellData<V>`]: CellData
///
/// # Safety invariants
///
/// This reference behaves like a `&'a CellData<V>` for some unknown
/// `V` and upholds the usual safety invariants of shared references:
///
/// 1. The pointee is properly initialized for the entire lifetime `'a`.
/// 2. The pointee is not mutated for the entire lifetime `'a`.
#[derive(Clone, Copy)]
#[repr(transparent)]
pub struct RawCellRef<'a> {
    /// Pointer to the inner cell data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a
    ///    `triomphe::Arc<CellData<V>>` for some `V` using
    ///    `triomphe::Arc::into_raw`.
    /// 2. The pointer retains full provenance over the `Arc` for the entire
    ///    lifetime of this object (i.e., it was not derived from a `&T`)
    /// 3. The pointer will point to the same `CellData<V>` for the entire
    ///    lifetime of this object.
    ptr: NonNull<CellData<Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a CellData<Erased>`
    _marker: core::marker::PhantomData<&'a CellData<Erased>>,
}

impl<'a> RawCellRef<'a> {
    /// Casts the [`RawCellRef`] to a [`CellData<V>`] reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `V` matches the actual value type stored in the
    ///    [`CellData`]
    #[inline]
    pub(super) unsafe fn cast_inner<V>(self) -> &'a CellData<V> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.vtable().type_id(), TypeId::of::<V>());

        let this = self.ptr.cast::<CellData<V>>();
        // SAFETY: Converting the NonNull pointer to a reference is sound because:
        // - The pointer is non-null, properly aligned, and dereferenceable (guaranteed
        //   by RawCellRef's type invariants)
        // - The pointee is properly initialized (RawCellRef's doc comment guarantees
        //   it points to an initialized CellData<V> for some V)
        // - The type `V` matches the actual value type (guaranteed by caller)
        // - Shared access is allowed
        // - The reference lifetime 'a is valid (tied to RawCellRef<'a>'s lifetime)
        unsafe { this.as_ref() }
    }

    /// Returns a [`NonNull`] pointer to the [`CellData`] instance.
    #[inline]
    pub(super) fn as_ptr(self) -> *const CellData<Erased> {
        self.ptr.as_ptr()
    }

    /// Returns the [`TypeId`] of the stored value.
    #[inline]
    pub fn value_type_id(self) -> TypeId {
        self.vtable().type_id()
    }

    /// Returns the [`core::any::type_name`] of the stored value.
    #[inline]
    pub fn value_type_name(self) -> &'static str {
        self.vtable().type_name()
    }

    /// Returns the [`TypeId`] of the handler that was used to create the cell.
    #[inline]
    pub fn handler_type_id(self) -> TypeId {
        self.vtable().handler_type_id()
    }

    /// Compares the values of two cells for equality by using the
    /// [`CompareHandler::eq`] method specified by the handler used to create
    /// this cell.
    ///
    /// Returns `None` if the stored type does not support equality comparison.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The value type stored in `other` is the same concrete type as the
    ///    value type stored in `self`.
    #[inline]
    pub unsafe fn value_eq(self, other: RawCellRef<'_>) -> Option<bool> {
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `CellData`.
        // 2. The type of `other` matches the type of `self` (guaranteed by the caller)
        unsafe { vtable.eq(self, other) }
    }

    /// Compares the values of two cells for strict less-than ordering by using
    /// the [`CompareHandler::lt`] method specified by the handler used to
    /// create this cell.
    ///
    /// Returns `None` if the stored type does not support ordering comparison.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The value type stored in `other` is the same concrete type as the
    ///    value type stored in `self`.
    #[inline]
    pub unsafe fn value_lt(self, other: RawCellRef<'_>) -> Option<bool> {
        let vtable = self.vtable();
        // SAFETY:
        // 1. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `CellData`.
        // 2. The type of `other` matches the type of `self` (guaranteed by the caller)
        unsafe { vtable.lt(self, other) }
    }

    /// Clones the inner [`triomphe::Arc`] and returns a new [`RawCell`]
    /// pointing to the same data.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. All other references to this cell are compatible with shared
    ///    ownership. Specifically none of them assume that the strong_count is
    ///    `1`.
    #[inline]
    pub unsafe fn clone_arc(self) -> RawCell {
        let vtable = self.vtable();
        // SAFETY:
        // 1. Guaranteed by invariants on this type
        // 2. Guaranteed by invariants on this type
        // 3. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `CellData`.
        // 4. Guaranteed by the caller
        unsafe { vtable.clone_arc(self.ptr) }
    }

    /// Gets the strong_count of the inner [`triomphe::Arc`].
    #[inline]
    pub fn strong_count(self) -> usize {
        let vtable = self.vtable();
        // SAFETY:
        // 1. Guaranteed by invariants on this type
        // 2. The vtable returned by `self.vtable()` is guaranteed to match the data in
        //    the `CellData`.
        unsafe { vtable.strong_count(self.ptr) }
    }

    /// Returns the address of the vtable, for use in tests.
    #[cfg(test)]
    pub(crate) fn vtable_addr(self) -> *const () {
        (self.vtable() as *const crate::cell::vtable::CellVtable).cast::<()>()
    }
}

/// A mutable lifetime-bound pointer to a [`CellData`] that is guaranteed to
/// point to an initialized instance of a [`CellData<V>`] for some specific
/// `V`, though we do not know which actual `V` it is.
///
/// We cannot use a [`&'a mut CellData<V>`] directly, because that would
/// require us to know the actual type of the value, which we do not.
///
/// [`&'a mut CellData<V>`]: CellData
///
/// # Safety invariants
///
/// This reference behaves like a `&'a mut CellData<V>` for some unknown
/// `V` and upholds the usual safety invariants of mutable references:
///
/// 1. The pointee is properly initialized for the entire lifetime `'a`.
/// 2. The pointee is not aliased for the entire lifetime `'a`.
/// 3. Like a `&'a mut T`, it is possible to reborrow this reference to a
///    shorter lifetime. The borrow checker will ensure that original longer
///    lifetime is not used while the shorter lifetime exists.
#[repr(transparent)]
pub struct RawCellMut<'a> {
    /// Pointer to the inner cell data
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. The pointer must have been created from a
    ///    `triomphe::Arc<CellData<V>>` for some `V` using
    ///    `triomphe::Arc::into_raw`.
    /// 2. The pointer will point to the same `CellData<V>` for the entire
    ///    lifetime of this object.
    /// 3. This pointer is valid for exclusive mutable access to the
    ///    `CellData` with the same semantics as a `&'a mut CellData<V>`.
    ptr: NonNull<CellData<Erased>>,

    /// Marker to tell the compiler that we should
    /// behave the same as a `&'a mut CellData<Erased>`
    _marker: core::marker::PhantomData<&'a mut CellData<Erased>>,
}

impl<'a> RawCellMut<'a> {
    /// Casts the [`RawCellMut`] to a mutable [`CellData<V>`] reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The type `V` matches the actual value type stored in the
    ///    [`CellData`]
    #[inline]
    pub(super) unsafe fn cast_inner<V>(self) -> &'a mut CellData<V> {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.as_ref().vtable().type_id(), TypeId::of::<V>());

        let mut this = self.ptr.cast::<CellData<V>>();

        // SAFETY: Converting the NonNull pointer to a mutable reference is sound
        // because:
        // - The pointer is non-null, properly aligned, and dereferenceable (guaranteed
        //   by RawCellMut's type invariants)
        // - The pointee is properly initialized (RawCellMut's doc comment guarantees
        //   it points to an initialized CellData<V> for some V)
        // - The type `V` matches the actual value type (guaranteed by caller)
        // - Exclusive access is guaranteed
        // - The reference lifetime 'a is valid (tied to RawCellMut<'a>'s lifetime)
        unsafe { this.as_mut() }
    }

    /// Reborrows the mutable reference to the [`CellData`] with a shorter
    /// lifetime.
    #[inline]
    pub fn reborrow<'b>(&'b mut self) -> RawCellMut<'b> {
        RawCellMut {
            // SAFETY:
            // 1. Guaranteed by invariant on `self`
            // 2. We are creating the `RawCellMut` here, and we are
            //    not changing the pointer
            // 3. Upheld by mutable borrow of `self`
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }

    /// Returns a reference to the [`CellData`] instance.
    #[inline]
    pub fn as_ref(&self) -> RawCellRef<'_> {
        RawCellRef {
            // SAFETY:
            // 1. Guaranteed by the invariants on `RawCellMut`
            // 2. Guaranteed by the invariants on `RawCellMut` and
            //    the fact that we are taking a shared reference to `self`
            // 3. We are creating the `RawCellRef` here, and we are
            //    not changing the pointer
            ptr: self.ptr,
            _marker: core::marker::PhantomData,
        }
    }
}
