//! Commonly used items for convenient importing.
//!
//! The prelude module re-exports the most frequently used types, traits, and
//! macros from this crate, allowing you to import them all with a single use
//! statement:
//!
//! ```
//! use variant::prelude::*;
//!
//! let v = variant!(10);
//! assert_eq!(v.value_ref::<i32>(), Ok(&10));
//! ```

pub use crate::{IdentityMode, Variant, VariantError, variant};
