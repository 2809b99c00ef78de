//! Cross-builder operations for types.
//!
//! This module provides functions for:
//! - Structural comparison of types across different builders
//! - Type conversion between builder representations
//!
//! These operations work by recursively traversing type structures and
//! comparing/converting them independently of the builder used.

use super::{TOP_TYPE, Ty, TyData, TypeBuilder, TypeFlags, TypeKind};
use alloc::vec::Vec;

/// Structurally compare two types from potentially different builders.
///
/// Returns `true` if the types have the same structure, regardless of
/// which builders were used to create them.
///
/// # Example
///
/// ```
/// use generis_types::{types_equal, TypeBuilder, ArenaBuilder, BoxBuilder};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let in_arena = ArenaBuilder::new(&arena);
/// let boxed = BoxBuilder::new();
///
/// let a = in_arena.parameterized("List", [in_arena.variable("T", "Holder")]);
/// let b = boxed.parameterized("List", [boxed.variable("T", "Holder")]);
///
/// assert!(types_equal(a, in_arena, b, boxed));
/// ```
pub fn types_equal<B1: TypeBuilder, B2: TypeBuilder>(
    ty1: B1::TypeView,
    builder1: B1,
    ty2: B2::TypeView,
    builder2: B2,
) -> bool {
    fn lists_equal<B1: TypeBuilder, B2: TypeBuilder>(
        list1: &[B1::TypeView],
        builder1: B1,
        list2: &[B2::TypeView],
        builder2: B2,
    ) -> bool {
        list1.len() == list2.len()
            && list1
                .iter()
                .zip(list2.iter())
                .all(|(t1, t2)| types_equal(t1.clone(), builder1, t2.clone(), builder2))
    }

    match (ty1.view(builder1), ty2.view(builder2)) {
        (TypeKind::Concrete(n1), TypeKind::Concrete(n2)) => n1.as_ref() == n2.as_ref(),

        (
            TypeKind::Variable {
                name: n1,
                owner: o1,
            },
            TypeKind::Variable {
                name: n2,
                owner: o2,
            },
        ) => n1.as_ref() == n2.as_ref() && o1.as_ref() == o2.as_ref(),

        // Raw identities must match and arguments must align positionally
        (
            TypeKind::Parameterized { raw: r1, args: a1 },
            TypeKind::Parameterized { raw: r2, args: a2 },
        ) => {
            r1.as_ref() == r2.as_ref()
                && lists_equal(
                    builder1.types_data(a1),
                    builder1,
                    builder2.types_data(a2),
                    builder2,
                )
        }

        (
            TypeKind::Wildcard {
                lower: l1,
                upper: u1,
            },
            TypeKind::Wildcard {
                lower: l2,
                upper: u2,
            },
        ) => {
            lists_equal(
                builder1.types_data(l1),
                builder1,
                builder2.types_data(l2),
                builder2,
            ) && lists_equal(
                builder1.types_data(u1),
                builder1,
                builder2.types_data(u2),
                builder2,
            )
        }

        (TypeKind::ArrayOf(c1), TypeKind::ArrayOf(c2)) => {
            types_equal(c1.clone(), builder1, c2.clone(), builder2)
        }

        // Different kinds are not equal
        _ => false,
    }
}

/// Convert a type from one builder to another.
///
/// This creates a structurally equivalent type in the target builder
/// by traversing the source type and reconstructing it.
///
/// # Example
///
/// ```
/// use generis_types::{convert_ty, types_equal, TypeBuilder, ArenaBuilder, BoxBuilder};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let in_arena = ArenaBuilder::new(&arena);
/// let boxed = BoxBuilder::new();
///
/// let map = in_arena.parameterized("Map", [in_arena.concrete("String"), in_arena.variable("V", "Cache")]);
/// let converted = convert_ty(map, in_arena, boxed);
///
/// assert!(types_equal(map, in_arena, converted, boxed));
/// ```
pub fn convert_ty<B1: TypeBuilder, B2: TypeBuilder>(
    ty: B1::TypeView,
    from_builder: B1,
    to_builder: B2,
) -> B2::TypeView {
    let convert_all = |types: &B1::InternedTypes| -> Vec<B2::TypeView> {
        from_builder
            .types_data(types)
            .iter()
            .map(|t| convert_ty(t.clone(), from_builder, to_builder))
            .collect()
    };

    match ty.view(from_builder) {
        TypeKind::Concrete(name) => to_builder.concrete(name.as_ref()),
        TypeKind::Variable { name, owner } => to_builder.variable(name.as_ref(), owner.as_ref()),
        TypeKind::Parameterized { raw, args } => {
            to_builder.parameterized(raw.as_ref(), convert_all(args))
        }
        TypeKind::Wildcard { lower, upper } => {
            to_builder.wildcard(convert_all(lower), convert_all(upper))
        }
        TypeKind::ArrayOf(component) => {
            to_builder.array(convert_ty(component.clone(), from_builder, to_builder))
        }
    }
}

/// TypeView trait for viewing types uniformly across different builders.
///
/// This trait provides a common interface for accessing type structure
/// regardless of which TypeBuilder was used to create the type.
pub trait TypeView<B: TypeBuilder>: Sized + Clone {
    /// View the structure of this type.
    fn view(&self, builder: B) -> &TypeKind<B>;

    /// Get the full type data including flags.
    fn data(&self, builder: B) -> &TyData<B>;

    /// Check if this type mentions no type variable anywhere.
    fn is_fully_concrete(&self, builder: B) -> bool {
        !self.data(builder).flags.contains(TypeFlags::HAS_VARIABLE)
    }

    /// Check if this is the universal top type.
    fn is_top(&self, builder: B) -> bool {
        matches!(self.view(builder), TypeKind::Concrete(name) if name.as_ref() == TOP_TYPE)
    }

    /// The nominal identity behind a raw or parameterized type.
    fn raw_name<'a>(&'a self, builder: B) -> Option<&'a str>
    where
        B: 'a,
        B::InternedStr: 'a,
    {
        match self.view(builder) {
            TypeKind::Concrete(name) => Some(name.as_ref()),
            TypeKind::Parameterized { raw, .. } => Some(raw.as_ref()),
            TypeKind::Variable { .. } | TypeKind::Wildcard { .. } | TypeKind::ArrayOf(_) => None,
        }
    }
}

/// Implementation of TypeView for `Ty<B>`.
impl<B: TypeBuilder> TypeView<B> for Ty<B> {
    fn view(&self, builder: B) -> &TypeKind<B> {
        self.kind(builder)
    }

    fn data(&self, builder: B) -> &TyData<B> {
        self.data(builder)
    }
}
