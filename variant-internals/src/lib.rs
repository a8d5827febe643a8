#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`variant`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased storage cell and the unsafe
//! operations that power the [`variant`] container library. It provides the
//! foundation for zero-cost type erasure through vtable-based dispatch.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`variant`] crate, not
//! this one.
//!
//! # Architecture
//!
//! The crate is organized around a single type hierarchy for storage cells:
//!
//! - **[`cell`]**: Type-erased value storage
//!   - [`RawCell`]: Owned cell with [`Arc`]-based allocation
//!   - [`RawCellRef`]/[`RawCellMut`]: Borrowed references (shared/mutable)
//!   - [`CellData`]: `#[repr(C)]` wrapper enabling field access on erased types
//!   - [`CellVtable`]: Function pointers for type-erased dispatch
//!
//! - **[`handlers`]**: The comparison capability trait
//!   - [`CompareHandler`]: Defines whether and how a stored type is compared
//!
//! The cell uses [`triomphe::Arc`] for storage, which enables cheap cloning
//! through reference counting: copying a container duplicates the reference to
//! the cell, not the cell itself.
//!
//! # Safety Strategy
//!
//! Type erasure requires careful handling to maintain Rust's type safety
//! guarantees. When we erase a type like `CellData<MyValue>` to
//! `CellData<Erased>`, we must ensure that the vtable function pointers still
//! match the actual concrete type stored in memory.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: Safety-critical types keep fields
//!   module-private, making invariants locally verifiable within a single file
//! - **`#[repr(C)]` layout**: Enables safe field projection on type-erased
//!   pointers without constructing invalid references
//! - **Documented vtable contracts**: Each vtable method specifies exactly when
//!   it can be safely called
//!
//! See the [`cell`] module documentation for how these patterns are applied.
//!
//! [`variant`]: https://docs.rs/variant/latest/variant/
//! [`CellData`]: cell::data::CellData
//! [`CellVtable`]: cell::vtable::CellVtable
//! [`CompareHandler`]: handlers::CompareHandler
//! [`Arc`]: triomphe::Arc

extern crate alloc;

mod cell;
pub mod handlers;
mod util;

pub use cell::{RawCell, RawCellMut, RawCellRef};
