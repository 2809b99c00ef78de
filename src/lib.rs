//! # Generis
//!
//! Resolves the effective type of generic members when they are viewed
//! through a subtype.
//!
//! A method `get(index: Integer): E` declared in `List<E>` returns `String`
//! when seen through `class Names implements List<String>`. Generis answers that
//! question for fields, method return types and method parameter types, given
//! a [`Catalog`] of type declarations.
//!
//! ## Example
//!
//! ```
//! use generis::{BoxBuilder, Catalog, DeclarationLookup, Resolver, TyDisplay, parse_type};
//!
//! let b = BoxBuilder::new();
//! let mut catalog = Catalog::with_prelude(b).unwrap();
//! catalog
//!     .load("class Scores implements Map<String, Long> { }")
//!     .unwrap();
//!
//! let resolver = Resolver::new(&catalog);
//! let values = catalog.find_method("Scores", "values").unwrap();
//! let viewing = parse_type(b, "Scores").unwrap();
//! let ty = resolver.resolve_return_type(values, &viewing).unwrap();
//! assert_eq!(ty.display(b), "Collection<Long>");
//! ```
//!
//! Errors from any stage render with [`render_error`] and friends.

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export the public API from generis_core
pub use generis_core::{
    Catalog, CatalogError, ConstructorDecl, DeclKind, DeclarationLookup, DefaultObjectFactory,
    Error, Fallback, FieldDecl, Instance, InstantiationCause, InstantiationError, MethodDecl,
    ObjectFactory, ParamDecl, ResolveError, ResolveOptions, Resolver, Span, TypeDeclaration,
    TypeParam, Value, Visibility, parse_catalog, parse_type,
};

// Re-export the type expression model
pub use generis_types::{
    self as types, ArenaBuilder, BoxBuilder, TOP_TYPE, Ty, TyDisplay, TypeBuilder, TypeKind,
    TypeView,
};
