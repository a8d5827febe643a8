//! This module encapsulates the fields of the [`CellData`]. Since this is the only place
//! they are visible, this means that the type of the [`CellVtable`] is guaranteed to always be in sync
//! with the type of the actual value. This follows from the fact that they are in sync
//! when created and that the API offers no way to change the [`CellVtable`] or value type after
//! creation.

use crate::{
    cell::{
        raw::{RawCellMut, RawCellRef},
        vtable::CellVtable,
    },
    handlers::CompareHandler,
};

/// Type-erased cell data structure with vtable-based dispatch.
///
/// This struct uses `#[repr(C)]` to enable safe field access in type-erased contexts,
/// allowing access to the vtable even when the concrete value type `V` is unknown.
#[repr(C)]
pub(super) struct CellData<V: 'static> {
    /// Reference to the vtable of this cell
    vtable: &'static CellVtable,
    /// The value stored in this cell
    value: V,
}

impl<V: 'static> CellData<V> {
    /// Creates a new [`CellData`] with the specified handler and value.
    ///
    /// This method creates the vtable for type-erased dispatch and pairs it with the value.
    pub(super) fn new<H: CompareHandler<V>>(value: V) -> Self {
        Self {
            vtable: CellVtable::new::<V, H>(),
            value,
        }
    }
}

impl<'a> RawCellRef<'a> {
    /// Returns a reference to the [`CellVtable`] of the [`CellData`] instance.
    pub(super) fn vtable(self) -> &'static CellVtable {
        let ptr = self.as_ptr();
        // SAFETY: We don't know the actual inner value type, but we do know
        // that it points to an instance of `CellData<V>` for some specific `V`.
        // Since `CellData<V>` is `#[repr(C)]`, that means we can access
        // the fields before the actual value.
        //
        // We need to take care to avoid creating an actual reference to
        // the `CellData` itself though, as that would still be undefined behavior
        // since we don't have the right type.
        let vtable_ptr: *const &'static CellVtable = unsafe { &raw const (*ptr).vtable };

        // SAFETY: Deferencing the pointer and getting out the `&'static CellVtable` is valid
        // for the same reasons
        unsafe { *vtable_ptr }
    }

    /// Accesses the inner value of the [`CellData`] instance as a reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `V` matches the actual value type stored in the [`CellData`].
    pub unsafe fn value_downcast_unchecked<V: 'static>(self) -> &'a V {
        // SAFETY: The inner function requires that `V` matches the type stored, but that is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<V>() };
        &this.value
    }
}

impl<'a> RawCellMut<'a> {
    /// Accesses the inner value of the [`CellData`] instance as a mutable reference to the specified type.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the type `V` matches the actual value type stored in the [`CellData`].
    pub unsafe fn into_value_downcast_unchecked<V: 'static>(self) -> &'a mut V {
        // SAFETY: The inner function requires that `V` matches the type stored, but that is guaranteed by our caller.
        let this = unsafe { self.cast_inner::<V>() };
        &mut this.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_data_field_offsets() {
        // Test that fields are accessible in the expected order for type-erased access
        use core::mem::{offset_of, size_of};

        fn check<T>() {
            // Verify field order: vtable, value
            assert_eq!(offset_of!(CellData<T>, vtable), 0);
            assert!(offset_of!(CellData<T>, value) >= size_of::<&'static CellVtable>());
        }

        #[repr(align(32))]
        struct LargeAlignment {
            _value: u8,
        }

        check::<u8>();
        check::<i32>();
        check::<[u64; 4]>();
        check::<LargeAlignment>();
    }
}
