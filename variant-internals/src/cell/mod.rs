//! Module containing the type-erased storage cell.

mod data;
mod raw;
mod vtable;

pub use raw::{RawCell, RawCellMut, RawCellRef};
