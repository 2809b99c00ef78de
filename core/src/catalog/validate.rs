use generis_types::{ARRAY_SUFFIX, TOP_TYPE, TypeBuilder, TypeFormatter, TypeKind, TypeView};
use hashbrown::HashMap;

use super::{Catalog, DeclarationLookup, TypeDeclaration};
use crate::errors::CatalogError;

pub(super) fn validate<B: TypeBuilder>(catalog: &Catalog<B>) -> Result<(), CatalogError> {
    for decl in catalog.iter() {
        let checker = Checker {
            catalog,
            builder: catalog.builder(),
            decl,
        };
        checker.check_declaration()?;
    }
    check_acyclic(catalog)
}

/// Checks the type expressions written inside one declaration.
struct Checker<'a, B: TypeBuilder> {
    catalog: &'a Catalog<B>,
    builder: B,
    decl: &'a TypeDeclaration<B>,
}

impl<B: TypeBuilder> Checker<'_, B> {
    fn check_declaration(&self) -> Result<(), CatalogError> {
        for param in &self.decl.params {
            for bound in &param.bounds {
                self.check(bound)?;
            }
        }

        for supertype in self.decl.supertypes() {
            match supertype.view(self.builder) {
                TypeKind::Concrete(_) | TypeKind::Parameterized { .. } => self.check(supertype)?,
                TypeKind::Variable { .. } | TypeKind::Wildcard { .. } | TypeKind::ArrayOf(_) => {
                    return Err(CatalogError::InvalidSupertype {
                        name: self.referenced_by(),
                        supertype: TypeFormatter::format(supertype.clone(), self.builder),
                    });
                }
            }
        }

        for field in &self.decl.fields {
            self.check(&field.ty)?;
        }
        for method in &self.decl.methods {
            for param in &method.params {
                self.check(&param.ty)?;
            }
            self.check(&method.ret)?;
        }
        for constructor in &self.decl.constructors {
            for param in &constructor.params {
                self.check_identity(param)?;
            }
        }
        Ok(())
    }

    fn check(&self, ty: &B::TypeView) -> Result<(), CatalogError> {
        match ty.view(self.builder) {
            TypeKind::Concrete(name) => self.check_identity(name.as_ref()),

            TypeKind::Variable { name, owner } => {
                let bound = owner.as_ref() == self.decl.name.as_ref()
                    && self.decl.param_position(name.as_ref()).is_some();
                if bound {
                    Ok(())
                } else {
                    Err(CatalogError::UnboundVariable {
                        name: name.to_string(),
                        owner: owner.to_string(),
                        referenced_by: self.referenced_by(),
                    })
                }
            }

            TypeKind::Parameterized { raw, args } => {
                let Some(target) = self.catalog.declaration(raw.as_ref()) else {
                    return Err(self.unknown(raw.as_ref()));
                };
                let args = self.builder.types_data(args);
                if target.params.len() != args.len() {
                    return Err(CatalogError::ArityMismatch {
                        name: raw.to_string(),
                        expected: target.params.len(),
                        found: args.len(),
                        referenced_by: self.referenced_by(),
                    });
                }
                args.iter().try_for_each(|arg| self.check(arg))
            }

            TypeKind::Wildcard { lower, upper } => self
                .builder
                .types_data(lower)
                .iter()
                .chain(self.builder.types_data(upper))
                .try_for_each(|bound| self.check(bound)),

            TypeKind::ArrayOf(component) => self.check(component),
        }
    }

    /// Nominal identities may name arrays of declared types.
    fn check_identity(&self, name: &str) -> Result<(), CatalogError> {
        let mut base = name;
        while let Some(component) = base.strip_suffix(ARRAY_SUFFIX) {
            base = component;
        }
        if base == TOP_TYPE || self.catalog.contains(base) {
            Ok(())
        } else {
            Err(self.unknown(base))
        }
    }

    fn unknown(&self, name: &str) -> CatalogError {
        CatalogError::UnknownType {
            name: name.to_string(),
            referenced_by: self.referenced_by(),
        }
    }

    fn referenced_by(&self) -> String {
        self.decl.name.to_string()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

fn check_acyclic<B: TypeBuilder>(catalog: &Catalog<B>) -> Result<(), CatalogError> {
    fn visit<'a, B: TypeBuilder>(
        catalog: &'a Catalog<B>,
        name: &'a str,
        marks: &mut HashMap<&'a str, Mark>,
    ) -> Result<(), CatalogError> {
        match marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                return Err(CatalogError::Cycle {
                    name: name.to_string(),
                });
            }
            None => {}
        }
        let Some(decl) = catalog.declaration(name) else {
            return Ok(());
        };
        marks.insert(name, Mark::Visiting);
        for parent in decl.supertype_names(catalog.builder()) {
            visit(catalog, parent, marks)?;
        }
        marks.insert(name, Mark::Done);
        Ok(())
    }

    let mut marks = HashMap::new();
    for decl in catalog.iter() {
        visit(catalog, decl.name.as_ref(), &mut marks)?;
    }
    Ok(())
}
