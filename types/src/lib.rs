//! Type expression model for generic type resolution.
//!
//! This crate provides the immutable representation of declared (possibly
//! generic) type signatures: nominal types, type variables, parameterized
//! types, wildcards and generic arrays. Storage is pluggable through
//! [`TypeBuilder`] (arena, RC-based).
//!
//! # Example
//!
//! ```
//! use generis_types::{ArenaBuilder, TyDisplay, TypeBuilder};
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let builder = ArenaBuilder::new(&arena);
//!
//! let elem = builder.variable("E", "List");
//! let list = builder.parameterized("List", [elem]);
//! assert_eq!(builder.array(list).display(builder), "List<E>[]");
//! ```

#![no_std]
extern crate alloc;

// Intermediate Representation - generic type expressions
pub mod ir;

// Concrete builder implementations
pub mod arena_builder;
pub mod box_builder;

// Re-export IR types for convenience
pub use ir::{
    ARRAY_SUFFIX, TOP_TYPE, Ty, TyData, TyDisplay, TypeBuilder, TypeFlags, TypeFormatter,
    TypeKind, TypeKindDisplay, TypeView, TypeVisitor, VariableCollector, array_identity,
    convert_ty, types_equal,
};

// Re-export concrete builders
pub use arena_builder::ArenaBuilder;
pub use box_builder::BoxBuilder;
