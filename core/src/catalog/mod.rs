//! Declarations of classes and interfaces, and the lookup interface the
//! resolver and factory query.

mod declaration;
mod validate;

#[cfg(test)]
mod catalog_test;

pub use declaration::{
    ConstructorDecl, DeclKind, FieldDecl, MethodDecl, ParamDecl, TypeDeclaration, TypeParam,
    Visibility,
};

use generis_types::TypeBuilder;
use hashbrown::{HashMap, HashSet};

use crate::errors::CatalogError;
use crate::parser::parse_catalog;

/// Catalog source of the standard collection and value types.
pub const PRELUDE: &str = include_str!("prelude.gcat");

/// Read access to type declarations.
///
/// The resolver and the object factory only see declarations through this
/// trait, so any source of declarations can back them.
pub trait DeclarationLookup<B: TypeBuilder> {
    /// The builder the declarations' types were built with.
    fn builder(&self) -> B;

    fn declaration(&self, name: &str) -> Option<&TypeDeclaration<B>>;

    /// Whether `descendant` is `ancestor` or inherits from it.
    ///
    /// Types that are not declared have no ancestors but themselves.
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        walk_ancestors(self, descendant, |name, _| (name == ancestor).then_some(())).is_some()
    }

    /// Find a field on `type_name` or, failing that, on its ancestors.
    ///
    /// Ancestors are searched depth-first, superclass before interfaces.
    fn find_field(&self, type_name: &str, field: &str) -> Option<&FieldDecl<B>> {
        walk_ancestors(self, type_name, |_, decl| decl?.field(field))
    }

    /// Find a method on `type_name` or, failing that, on its ancestors.
    fn find_method(&self, type_name: &str, method: &str) -> Option<&MethodDecl<B>> {
        walk_ancestors(self, type_name, |_, decl| decl?.method(method))
    }
}

/// Visit `start` and then its ancestors depth-first, superclass before
/// interfaces, until `visit` returns a value.
///
/// Each name is visited once, so an unvalidated catalog with an inheritance
/// cycle still terminates.
fn walk_ancestors<'a, 's, B, C, T>(
    lookup: &'a C,
    start: &'s str,
    mut visit: impl FnMut(&'s str, Option<&'a TypeDeclaration<B>>) -> Option<T>,
) -> Option<T>
where
    'a: 's,
    B: TypeBuilder + 'a,
    C: DeclarationLookup<B> + ?Sized,
{
    let builder = lookup.builder();
    let mut seen = HashSet::new();
    let mut pending = vec![start];
    while let Some(name) = pending.pop() {
        if !seen.insert(name) {
            continue;
        }
        let decl = lookup.declaration(name);
        if let Some(found) = visit(name, decl) {
            return Some(found);
        }
        if let Some(decl) = decl {
            let parents: Vec<&'a str> = decl.supertype_names(builder).collect();
            pending.extend(parents.into_iter().rev());
        }
    }
    None
}

/// In-memory store of type declarations, keyed by identity.
///
/// # Example
///
/// ```
/// use generis_core::{Catalog, DeclarationLookup};
/// use generis_types::BoxBuilder;
///
/// let mut catalog = Catalog::with_prelude(BoxBuilder::new()).unwrap();
/// catalog
///     .load("class Names implements List<String> { }")
///     .unwrap();
///
/// assert!(catalog.is_ancestor("Collection", "Names"));
/// assert!(catalog.find_method("Names", "get").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Catalog<B: TypeBuilder> {
    builder: B,
    declarations: Vec<TypeDeclaration<B>>,
    index: HashMap<String, usize>,
}

impl<B: TypeBuilder> Catalog<B> {
    /// Create an empty catalog.
    pub fn new(builder: B) -> Self {
        Self {
            builder,
            declarations: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a catalog holding the standard declarations of [`PRELUDE`].
    pub fn with_prelude(builder: B) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(builder);
        catalog.load(PRELUDE)?;
        Ok(catalog)
    }

    /// Add one declaration.
    ///
    /// The declaration is not validated; call [`validate`](Self::validate)
    /// once the whole hierarchy is in place.
    pub fn insert(&mut self, declaration: TypeDeclaration<B>) -> Result<(), CatalogError> {
        let name = declaration.name.as_ref();
        if self.index.contains_key(name) {
            return Err(CatalogError::Duplicate {
                name: name.to_string(),
            });
        }
        self.index.insert(name.to_string(), self.declarations.len());
        self.declarations.push(declaration);
        Ok(())
    }

    /// Parse catalog source, add its declarations and validate the result.
    ///
    /// Returns the number of declarations added. On error the catalog is
    /// left unchanged.
    pub fn load(&mut self, source: &str) -> Result<usize, CatalogError> {
        let parsed = parse_catalog(self.builder, source)?;
        let count = parsed.len();

        let mut staged = self.clone();
        for declaration in parsed {
            staged.insert(declaration)?;
        }
        staged.validate()?;

        tracing::debug!(count, total = staged.len(), "loaded catalog declarations");
        *self = staged;
        Ok(count)
    }

    /// Check that every referenced type is declared and used with the right
    /// number of arguments, that variables are bound by their declaration,
    /// that supertypes are raw or parameterized, and that inheritance is
    /// acyclic.
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate::validate(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDeclaration<B>> {
        self.declarations.iter()
    }
}

impl<B: TypeBuilder> DeclarationLookup<B> for Catalog<B> {
    fn builder(&self) -> B {
        self.builder
    }

    fn declaration(&self, name: &str) -> Option<&TypeDeclaration<B>> {
        self.index.get(name).map(|&i| &self.declarations[i])
    }
}
