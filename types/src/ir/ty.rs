use super::TypeBuilder;
use crate::TypeView;
use core::fmt;

use bitflags::bitflags;

/// Name of the universal top type every hierarchy is implicitly rooted at.
pub const TOP_TYPE: &str = "Object";

/// Suffix appended to a component identity to name its array type.
pub const ARRAY_SUFFIX: &str = "[]";

bitflags! {
    /// Flags indicating various properties of a type.
    ///
    /// These flags are computed once when a type is interned and cached
    /// for efficient queries. This avoids repeated recursive traversals.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        /// Some node of the type is a `Variable`.
        const HAS_VARIABLE = 1;
        /// Some node of the type is a `Wildcard`.
        const HAS_WILDCARD = 1 << 1;
        /// Some node of the type is an `ArrayOf`.
        const HAS_GENERIC_ARRAY = 1 << 2;
    }
}

/// Data for a type: kind + cached flags.
///
/// Following Chalk's design, this separates the type structure (kind)
/// from cached metadata (flags). The builder computes flags once
/// during interning.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct TyData<B: TypeBuilder> {
    /// The actual type structure
    pub kind: TypeKind<B>,

    /// Cached properties for efficient queries
    pub flags: TypeFlags,
}

/// Logical structure of a declared type expression.
///
/// This is generic over the `TypeBuilder` so the same type kind works
/// with different storage strategies.
///
/// The variant set is closed: every algorithm over types matches it
/// exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind<B: TypeBuilder> {
    /// A nominal, non-generic type identity.
    ///
    /// Arrays of concrete components are nominal too; their identity is
    /// the component name followed by `[]` (see [`array_identity`]).
    Concrete(B::InternedStr),

    /// A reference to the type parameter `name` declared by `owner`.
    ///
    /// The ordinal position of the parameter lives in the owner's
    /// declaration, not in the variable.
    Variable {
        name: B::InternedStr,
        owner: B::InternedStr,
    },

    /// A generic type instantiated with positional arguments.
    Parameterized {
        raw: B::InternedStr,
        args: B::InternedTypes,
    },

    /// An unknown type constrained by bounds.
    ///
    /// `?` has no lower bound and the top type as upper bound.
    Wildcard {
        lower: B::InternedTypes,
        upper: B::InternedTypes,
    },

    /// An array whose element type is still generic.
    ArrayOf(B::TypeView),
}

impl<B: TypeBuilder> TypeKind<B> {
    /// Compute type flags for this type kind.
    ///
    /// This is called by the builder during type creation to build
    /// the TyData. Flags are cached to avoid repeated traversals.
    pub fn compute_flags(&self, builder: B) -> TypeFlags {
        match self {
            TypeKind::Concrete(_) => TypeFlags::empty(),

            TypeKind::Variable { .. } => TypeFlags::HAS_VARIABLE,

            // Parameterized types inherit flags from their arguments
            TypeKind::Parameterized { args, .. } => {
                let mut flags = TypeFlags::empty();
                for arg in builder.types_data(args) {
                    flags |= arg.data(builder).flags;
                }
                flags
            }

            TypeKind::Wildcard { lower, upper } => {
                let mut flags = TypeFlags::HAS_WILDCARD;
                for bound in builder
                    .types_data(lower)
                    .iter()
                    .chain(builder.types_data(upper))
                {
                    flags |= bound.data(builder).flags;
                }
                flags
            }

            TypeKind::ArrayOf(component) => {
                component.data(builder).flags | TypeFlags::HAS_GENERIC_ARRAY
            }
        }
    }

    /// Intern this type kind into a Ty handle.
    ///
    /// This is a convenience method that computes flags and calls
    /// the builder's intern_ty method.
    pub fn intern(self, builder: B) -> Ty<B> {
        Ty::new(builder.intern_ty(self))
    }
}

/// Nominal identity of an array whose component is the nominal type `component`.
///
/// ```
/// assert_eq!(generis_types::array_identity("String"), "String[]");
/// ```
pub fn array_identity(component: &str) -> alloc::string::String {
    let mut name = alloc::string::String::with_capacity(component.len() + ARRAY_SUFFIX.len());
    name.push_str(component);
    name.push_str(ARRAY_SUFFIX);
    name
}

/// Handle to an interned type.
///
/// This is a lightweight wrapper around the builder's representation.
/// It can be cloned and used to retrieve the full type data.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ty<B: TypeBuilder> {
    interned: B::InternedTy,
}

// Implement Copy when InternedTy is Copy (e.g., for ArenaBuilder)
impl<B: TypeBuilder> Copy for Ty<B> where B::InternedTy: Copy {}

impl<B: TypeBuilder> Ty<B> {
    /// Create a new type from an interned handle.
    pub fn new(interned: B::InternedTy) -> Self {
        Self { interned }
    }

    /// Get the interned representation (for internal use).
    pub fn interned(&self) -> &B::InternedTy {
        &self.interned
    }

    /// Get the full type data (kind + flags) by looking up in the builder.
    pub fn data(&self, builder: B) -> &TyData<B> {
        builder.ty_data(&self.interned)
    }

    /// Get the type kind by looking up in the builder.
    pub fn kind(&self, builder: B) -> &TypeKind<B> {
        &self.data(builder).kind
    }

    pub fn is_concrete(&self, builder: B) -> bool {
        matches!(self.kind(builder), TypeKind::Concrete(_))
    }

    pub fn is_variable(&self, builder: B) -> bool {
        matches!(self.kind(builder), TypeKind::Variable { .. })
    }

    pub fn is_parameterized(&self, builder: B) -> bool {
        matches!(self.kind(builder), TypeKind::Parameterized { .. })
    }

    pub fn is_wildcard(&self, builder: B) -> bool {
        matches!(self.kind(builder), TypeKind::Wildcard { .. })
    }

    pub fn is_array(&self, builder: B) -> bool {
        matches!(self.kind(builder), TypeKind::ArrayOf(_))
    }
}

impl<B: TypeBuilder> fmt::Debug for Ty<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ty({:?})", self.interned)
    }
}
