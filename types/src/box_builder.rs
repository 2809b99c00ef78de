use crate::ir::{TyData, TypeBuilder, TypeKind};
use alloc::rc::Rc;
use alloc::vec::Vec;

/// Builder that uses reference counting (no deduplication).
///
/// Types are allocated with `Rc` and no interning is performed.
/// This is useful for:
/// - Catalogs that outlive any single arena
/// - Testing (simpler than arena)
///
/// Following Chalk's design, we compute type flags during interning and
/// wrap the TypeKind in TyData.
///
/// # Example
///
/// ```
/// use generis_types::{TypeBuilder, TypeView, BoxBuilder};
///
/// let builder = BoxBuilder::new();
/// let elem = builder.variable("E", "List");
/// let list = builder.parameterized("List", [elem]);
/// assert!(!list.is_fully_concrete(builder));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoxBuilder;

impl BoxBuilder {
    /// Create a new box builder.
    pub fn new() -> Self {
        Self
    }
}

impl TypeBuilder for BoxBuilder {
    type TypeView = crate::Ty<Self>;
    type InternedTy = Rc<TyData<Self>>;
    type InternedStr = Rc<str>;
    type InternedTypes = Rc<[crate::Ty<Self>]>;

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
        Rc::new(TyData { kind, flags })
    }

    fn ty_data(self, ty: &Self::InternedTy) -> &TyData<Self> {
        ty
    }

    fn intern_str(self, s: impl AsRef<str>) -> Self::InternedStr {
        Rc::from(s.as_ref())
    }

    fn intern_types<E>(self, data: impl IntoIterator<Item = E>) -> Self::InternedTypes
    where
        E: Into<crate::Ty<Self>>,
    {
        let types: Vec<_> = data.into_iter().map(|e| e.into()).collect();
        types.into()
    }

    fn types_data(self, types: &Self::InternedTypes) -> &[crate::Ty<Self>] {
        types
    }
}
