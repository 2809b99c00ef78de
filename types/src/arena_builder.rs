use crate::ir::{TyData, TypeBuilder, TypeKind};
use alloc::vec::Vec;
use bumpalo::Bump;

/// Builder that uses arena allocation.
///
/// Types are allocated in a `Bump` arena. No deduplication is performed,
/// just allocation; equality stays structural.
///
/// Following Chalk's design, we compute type flags during interning and
/// wrap the TypeKind in TyData.
///
/// # Example
///
/// ```
/// use generis_types::{TypeBuilder, TypeView, ArenaBuilder};
/// use bumpalo::Bump;
///
/// let arena = Bump::new();
/// let builder = ArenaBuilder::new(&arena);
///
/// let string = builder.concrete("String");
/// let array = builder.array_of(string);
/// assert_eq!(array.raw_name(builder), Some("String[]"));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct ArenaBuilder<'arena> {
    arena: &'arena Bump,
}

// Manual implementations since Bump doesn't implement PartialEq/Eq/Hash
// We use pointer equality - two builders are equal if they point to the same arena
impl<'arena> PartialEq for ArenaBuilder<'arena> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.arena, other.arena)
    }
}

impl<'arena> Eq for ArenaBuilder<'arena> {}

impl<'arena> core::hash::Hash for ArenaBuilder<'arena> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::ptr::hash(self.arena, state)
    }
}

impl<'arena> ArenaBuilder<'arena> {
    /// Create a new arena builder.
    pub fn new(arena: &'arena Bump) -> Self {
        Self { arena }
    }
}

impl<'arena> TypeBuilder for ArenaBuilder<'arena> {
    type TypeView = crate::Ty<Self>;
    type InternedTy = &'arena TyData<Self>;
    type InternedStr = &'arena str;
    type InternedTypes = &'arena [crate::Ty<Self>];

    // ========================================================================
    // High-level type constructors
    // ========================================================================

    fn concrete(self, name: impl AsRef<str>) -> Self::TypeView {
        TypeKind::Concrete(self.intern_str(name)).intern(self)
    }

    fn variable(self, name: impl AsRef<str>, owner: impl AsRef<str>) -> Self::TypeView {
        TypeKind::Variable {
            name: self.intern_str(name),
            owner: self.intern_str(owner),
        }
        .intern(self)
    }

    fn parameterized(
        self,
        raw: impl AsRef<str>,
        args: impl IntoIterator<Item = Self::TypeView>,
    ) -> Self::TypeView {
        TypeKind::Parameterized {
            raw: self.intern_str(raw),
            args: self.intern_types(args),
        }
        .intern(self)
    }

    fn wildcard(
        self,
        lower: impl IntoIterator<Item = Self::TypeView>,
        upper: impl IntoIterator<Item = Self::TypeView>,
    ) -> Self::TypeView {
        TypeKind::Wildcard {
            lower: self.intern_types(lower),
            upper: self.intern_types(upper),
        }
        .intern(self)
    }

    fn array(self, component: Self::TypeView) -> Self::TypeView {
        TypeKind::ArrayOf(component).intern(self)
    }

    // ========================================================================
    // Low-level internals
    // ========================================================================

    fn intern_ty(self, kind: TypeKind<Self>) -> Self::InternedTy {
        let flags = kind.compute_flags(self);
        self.arena.alloc(TyData { kind, flags })
    }

    fn ty_data(self, ty: &Self::InternedTy) -> &TyData<Self> {
        ty
    }

    fn intern_str(self, s: impl AsRef<str>) -> Self::InternedStr {
        self.arena.alloc_str(s.as_ref())
    }

    fn intern_types<E>(self, data: impl IntoIterator<Item = E>) -> Self::InternedTypes
    where
        E: Into<crate::Ty<Self>>,
    {
        let types: Vec<_> = data.into_iter().map(|e| e.into()).collect();
        self.arena.alloc_slice_copy(&types)
    }

    fn types_data(self, types: &Self::InternedTypes) -> &[crate::Ty<Self>] {
        types
    }
}
