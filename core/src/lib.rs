//! Generic type resolution over a catalog of declared types.
//!
//! A [`Catalog`] holds type declarations (loaded from catalog source text or
//! built programmatically). A [`Resolver`] computes the effective type of a
//! field, method return or method parameter when its declaring type is viewed
//! through a concrete subtype. A [`DefaultObjectFactory`] instantiates the
//! resolved types.

pub mod catalog;
pub mod errors;
pub mod factory;
pub mod options;
pub mod parser;
pub mod resolver;

pub use catalog::{
    Catalog, ConstructorDecl, DeclKind, DeclarationLookup, FieldDecl, MethodDecl, ParamDecl,
    TypeDeclaration, TypeParam, Visibility,
};
pub use errors::{
    CatalogError, Error, InstantiationCause, InstantiationError, ResolveError, Span,
};
pub use factory::{DefaultObjectFactory, Instance, ObjectFactory, Value};
pub use options::{Fallback, ResolveOptions};
pub use parser::{parse_catalog, parse_type};
pub use resolver::Resolver;
