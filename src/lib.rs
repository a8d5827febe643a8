#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A type-erased single-value container with runtime type identity and
//! fallible comparison.
//!
//! ## Overview
//!
//! This crate provides [`Variant`], a container that holds zero or one value
//! of arbitrary `'static` type behind a uniform interface. The stored type is
//! checked at runtime: you can query it, extract the value strictly or
//! leniently, and compare two containers with each other when the stored
//! types support it.
//!
//! Unlike an enum over a closed set of types, the set of storable types is
//! open-ended and determined purely by what the caller stores. Unlike
//! `Box<dyn Any>`, a `Variant` also remembers *how to compare* its contents:
//! the comparison capability of the stored type is captured statically when
//! the value is stored, and replayed at runtime when two containers meet.
//!
//! ## Quick Example
//!
//! ```
//! use variant::prelude::*;
//!
//! let a = variant!(10);
//! let b = variant!(20);
//!
//! assert!(a.is_type::<i32>());
//! assert_eq!(a.value_ref::<i32>(), Ok(&10));
//! assert_eq!(a.try_lt(&b), Ok(true));
//! assert_eq!(a.try_eq(&b), Ok(false));
//! ```
//!
//! ## Core Concepts
//!
//! On a mechanical level, a non-empty [`Variant`] owns a reference to a
//! **storage cell**. Each cell contains three things:
//! - The stored **value** itself.
//! - The runtime **type identity** of the value, captured at creation.
//! - A **comparison handler**, baked in at creation, which knows whether and
//!   how the value type supports `==` and `<`.
//!
//! The **type identity** is the pair of the type's [`TypeId`] and its
//! [`type_name`]. Retrieval methods like [`Variant::value_ref`] check it
//! before handing out a typed reference, and comparisons check it before
//! touching the values ([`IdentityMode`] selects which half of the pair
//! drives that check).
//!
//! The **comparison handler** is the interesting part: whether `==` or `<`
//! is available depends on the operators the stored type implements, which is
//! a compile-time property, but the comparison happens between two
//! type-erased containers at runtime. The [`variant!`] macro resolves this by
//! probing the type's traits at the call site and baking the most capable
//! [handler](crate::handlers) into the cell. A comparison on a type without
//! the needed operator fails with
//! [`VariantError::OperatorUnsupported`] instead of failing to compile.
//!
//! [`TypeId`]: core::any::TypeId
//! [`type_name`]: core::any::type_name
//!
//! ## Sharing
//!
//! Cloning a [`Variant`] is cheap and shares the cell:
//!
//! ```
//! use variant::prelude::*;
//!
//! let a = variant!(10);
//! let mut b = a.clone();
//! assert_eq!(a.try_eq(&b), Ok(true));
//! assert_eq!(a.strong_count(), Some(2));
//!
//! // Reassignment redirects only `b`; `a` is unaffected
//! b.set(20);
//! assert_eq!(a.value_ref::<i32>(), Ok(&10));
//! ```
//!
//! ## Fallible Comparison
//!
//! [`Variant`] deliberately does not implement [`PartialEq`] or
//! [`PartialOrd`]: a comparison between containers can fail (different
//! stored types, or a stored type without the operator), and the built-in
//! operators have no way to report that. The `try_*` methods return
//! `Result<bool, VariantError>` instead:
//!
//! ```
//! use variant::prelude::*;
//!
//! let int = variant!(10);
//! let float = variant!(10.0);
//!
//! // Cross-type comparison is an error, not `false`
//! assert!(matches!(
//!     int.try_eq(&float),
//!     Err(VariantError::IncompatibleTypes { .. })
//! ));
//! ```
//!
//! For implementation details, see the [`variant-internals`] crate.
//!
//! [`variant-internals`]: variant_internals

extern crate alloc;

#[macro_use]
mod macros;

pub mod handlers;

pub mod prelude;

mod container;
mod error;

pub use self::{
    container::{IdentityMode, Variant},
    error::{Operator, VariantError},
};

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub mod kind {
        use crate::{Variant, handlers};

        #[doc(hidden)]
        pub struct Wrap<'a, T>(pub &'a T);

        #[doc(hidden)]
        pub trait HandlerOrderedKind {
            #[inline(always)]
            fn handler(&self) -> handlers::Ordered {
                handlers::Ordered
            }
        }

        impl<V> HandlerOrderedKind for &&Wrap<'_, V> where
            handlers::Ordered: handlers::CompareHandler<V>
        {
        }

        #[doc(hidden)]
        pub trait HandlerEquatableKind {
            #[inline(always)]
            fn handler(&self) -> handlers::Equatable {
                handlers::Equatable
            }
        }

        impl<V> HandlerEquatableKind for &Wrap<'_, V> where
            handlers::Equatable: handlers::CompareHandler<V>
        {
        }

        #[doc(hidden)]
        pub trait HandlerOpaqueKind {
            #[inline(always)]
            fn handler(&self) -> handlers::Opaque {
                handlers::Opaque
            }
        }

        impl<V> HandlerOpaqueKind for Wrap<'_, V> where handlers::Opaque: handlers::CompareHandler<V> {}

        #[doc(hidden)]
        #[must_use]
        pub fn macro_helper_new_variant<H, V>(_handler: H, value: V) -> Variant
        where
            V: 'static,
            H: handlers::CompareHandler<V>,
        {
            Variant::new_custom::<H, V>(value)
        }
    }
}
