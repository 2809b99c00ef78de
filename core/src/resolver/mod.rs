//! Resolution of declared member types against a viewing type.
//!
//! A declared type expression is written in terms of its declaring type's
//! parameters. Viewing the member through a subtype such as
//! `StringList implements List<String>` substitutes what the subtype binds
//! those parameters to, climbing the inheritance graph as needed.

mod dispatch;
mod variable;


use core::marker::PhantomData;

use generis_types::{TypeBuilder, TypeFormatter};

use crate::catalog::{DeclarationLookup, FieldDecl, MethodDecl};
use crate::errors::ResolveError;
use crate::options::ResolveOptions;

/// Resolves member types against viewing types using the declarations of a
/// catalog.
///
/// Resolution is a pure function of its inputs: the resolver holds no state
/// besides the catalog reference and its options.
///
/// Results assume a validated catalog, see
/// [`Catalog::validate`](crate::Catalog::validate). A catalog filled with
/// [`Catalog::insert`](crate::Catalog::insert) alone may hold an inheritance
/// cycle; the climb then skips edges leading back to a type it already
/// passed through, so such a catalog yields fallback results instead of
/// looping.
///
/// # Example
///
/// ```
/// use generis_core::{Catalog, DeclarationLookup, Resolver, parse_type};
/// use generis_types::{BoxBuilder, TyDisplay};
///
/// let b = BoxBuilder::new();
/// let mut catalog = Catalog::with_prelude(b).unwrap();
/// catalog.load("class Names implements List<String> { }").unwrap();
/// let resolver = Resolver::new(&catalog);
///
/// let get = catalog.find_method("Names", "get").unwrap();
/// let viewing = parse_type(b, "Names").unwrap();
/// let ty = resolver.resolve_return_type(get, &viewing).unwrap();
/// assert_eq!(ty.display(b), "String");
/// ```
pub struct Resolver<'c, B: TypeBuilder, C: DeclarationLookup<B> + ?Sized> {
    catalog: &'c C,
    options: ResolveOptions,
    _builder: PhantomData<fn() -> B>,
}

impl<'c, B: TypeBuilder, C: DeclarationLookup<B> + ?Sized> Resolver<'c, B, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self::with_options(catalog, ResolveOptions::default())
    }

    pub fn with_options(catalog: &'c C, options: ResolveOptions) -> Self {
        Self {
            catalog,
            options,
            _builder: PhantomData,
        }
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Type of `field` when its declaring type is viewed through `viewing`.
    pub fn resolve_field_type(
        &self,
        field: &FieldDecl<B>,
        viewing: &B::TypeView,
    ) -> Result<B::TypeView, ResolveError> {
        tracing::debug!(
            field = %field.name,
            declaring = %field.declaring,
            viewing = %self.show(viewing),
            "resolving field type"
        );
        self.resolve(&field.ty, viewing, field.declaring.as_ref())
    }

    /// Return type of `method` when viewed through `viewing`.
    pub fn resolve_return_type(
        &self,
        method: &MethodDecl<B>,
        viewing: &B::TypeView,
    ) -> Result<B::TypeView, ResolveError> {
        tracing::debug!(
            method = %method.name,
            declaring = %method.declaring,
            viewing = %self.show(viewing),
            "resolving return type"
        );
        self.resolve(&method.ret, viewing, method.declaring.as_ref())
    }

    /// Parameter types of `method`, in order, when viewed through `viewing`.
    pub fn resolve_param_types(
        &self,
        method: &MethodDecl<B>,
        viewing: &B::TypeView,
    ) -> Result<Vec<B::TypeView>, ResolveError> {
        tracing::debug!(
            method = %method.name,
            declaring = %method.declaring,
            viewing = %self.show(viewing),
            "resolving parameter types"
        );
        method
            .params
            .iter()
            .map(|param| self.resolve(&param.ty, viewing, method.declaring.as_ref()))
            .collect()
    }

    fn builder(&self) -> B {
        self.catalog.builder()
    }

    fn show(&self, ty: &B::TypeView) -> String {
        TypeFormatter::format(ty.clone(), self.builder())
    }
}
