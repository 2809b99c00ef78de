//! Intermediate Representation (IR) for declared type expressions.
//!
//! This module contains the generic, builder-agnostic representation of types.
//! The IR is parameterized by the `TypeBuilder` trait, which allows different
//! implementations to choose how types are built and stored in memory.
//!
//! ## Structure
//!
//! - **Core types**: `TypeKind`, `Ty` - the logical structure of types
//! - **TypeBuilder trait**: Abstract interface for type construction and storage
//! - **TypeView trait**: Unified view over types from different builders
//! - **Generic algorithms**: Visitor pattern, cross-builder equality and conversion
//! - **Display**: Pretty-printing support

pub mod builder;
pub mod display;
pub mod ty;
pub mod view;
pub mod visit;

pub use builder::TypeBuilder;
pub use display::{TyDisplay, TypeFormatter, TypeKindDisplay};
pub use ty::{ARRAY_SUFFIX, TOP_TYPE, Ty, TyData, TypeFlags, TypeKind, array_identity};
pub use view::{TypeView, convert_ty, types_equal};
pub use visit::{TypeVisitor, VariableCollector};
