//! TypeBuilder trait - unified type construction and storage abstraction.
//!
//! This trait combines:
//! - High-level type constructors (concrete(), parameterized(), array_of(), etc.)
//! - Low-level storage management (interning)
//! - Pluggable storage strategies (arena, RC, etc.)

use crate::{TOP_TYPE, TyData, TypeKind, TypeView, array_identity};
use core::fmt::Debug;
use core::hash::Hash;

/// Abstraction over type construction and storage.
///
/// This trait allows different implementations to choose how types
/// are built and stored in memory (arena, reference counting, etc.)
/// while keeping the resolution logic generic.
///
/// # Design
///
/// The builder pattern separates:
/// - **What a type is** (`TypeKind<B>`) - the logical structure
/// - **How types are stored** (`B::InternedTy`) - the representation
/// - **How to construct types** (`B::concrete()`, `B::array()`, etc.) - the API
///
/// Builders must be `Copy` so they can be passed around cheaply.
///
/// # Example
///
/// ```
/// use generis_types::{BoxBuilder, TyDisplay, TypeBuilder};
///
/// let builder = BoxBuilder::new();
/// let list = builder.parameterized("List", [builder.concrete("String")]);
/// assert_eq!(list.display(builder), "List<String>");
/// ```
pub trait TypeBuilder: Copy + Clone + Debug + Eq {
    /// The type handle returned by this builder.
    ///
    /// This is what users interact with - it implements `TypeView`.
    type TypeView: crate::TypeView<Self> + Clone + Debug + Eq + Hash;

    /// The internal interned representation of a type.
    ///
    /// This is opaque to generic code - could be:
    /// - `&'arena TyData<B>` (arena)
    /// - `Rc<TyData<B>>` (box/rc)
    type InternedTy: Clone + Debug + Eq + Hash;

    /// The interned representation of a name (type identities, variable names).
    type InternedStr: Clone + Debug + Eq + Hash + AsRef<str> + core::fmt::Display;

    /// Interned list of types (type arguments, wildcard bounds).
    type InternedTypes: Clone + Debug + Eq + Hash;

    // ========================================================================
    // High-level type constructors (ergonomic API)
    // ========================================================================

    /// Construct a nominal, non-generic type.
    fn concrete(self, name: impl AsRef<str>) -> Self::TypeView;

    /// Construct a reference to type parameter `name` declared by `owner`.
    fn variable(self, name: impl AsRef<str>, owner: impl AsRef<str>) -> Self::TypeView;

    /// Construct a generic type instantiated with `args`.
    fn parameterized(
        self,
        raw: impl AsRef<str>,
        args: impl IntoIterator<Item = Self::TypeView>,
    ) -> Self::TypeView;

    /// Construct a wildcard with the given lower and upper bounds.
    fn wildcard(
        self,
        lower: impl IntoIterator<Item = Self::TypeView>,
        upper: impl IntoIterator<Item = Self::TypeView>,
    ) -> Self::TypeView;

    /// Construct a generic array, whatever the component is.
    fn array(self, component: Self::TypeView) -> Self::TypeView;

    /// The universal top type.
    fn top(self) -> Self::TypeView {
        self.concrete(TOP_TYPE)
    }

    /// Construct an array, collapsing it to a nominal identity when the
    /// component is itself a `Concrete` type.
    fn array_of(self, component: Self::TypeView) -> Self::TypeView {
        let collapsed = match component.view(self) {
            TypeKind::Concrete(name) => Some(array_identity(name.as_ref())),
            _ => None,
        };
        match collapsed {
            Some(name) => self.concrete(name),
            None => self.array(component),
        }
    }

    // ========================================================================
    // Low-level internals (implementation details)
    // ========================================================================

    /// Intern a type kind, returning a handle.
    ///
    /// The implementation is responsible for:
    /// 1. Computing the type flags via `kind.compute_flags(self)`
    /// 2. Wrapping the kind in TyData { kind, flags }
    /// 3. Storing the TyData and returning a handle
    fn intern_ty(self, kind: TypeKind<Self>) -> Self::InternedTy;

    /// Retrieve the type data (kind + flags) for an interned type.
    fn ty_data(self, ty: &Self::InternedTy) -> &TyData<Self>;

    /// Intern a name.
    fn intern_str(self, s: impl AsRef<str>) -> Self::InternedStr;

    /// Intern a list of types (e.g., for type arguments).
    fn intern_types<E>(self, data: impl IntoIterator<Item = E>) -> Self::InternedTypes
    where
        E: Into<Self::TypeView>;

    /// Retrieve the interned type list.
    fn types_data(self, types: &Self::InternedTypes) -> &[Self::TypeView];
}
