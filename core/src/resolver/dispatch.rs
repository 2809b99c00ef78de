use generis_types::{TypeBuilder, TypeKind, TypeView};

use super::Resolver;
use crate::catalog::DeclarationLookup;
use crate::errors::ResolveError;

impl<B: TypeBuilder, C: DeclarationLookup<B> + ?Sized> Resolver<'_, B, C> {
    /// Resolve `ty`, written inside `declaring`, as seen from `viewing`.
    ///
    /// Types that mention no type variable are returned unchanged, whatever
    /// their shape.
    pub fn resolve(
        &self,
        ty: &B::TypeView,
        viewing: &B::TypeView,
        declaring: &str,
    ) -> Result<B::TypeView, ResolveError> {
        let builder = self.builder();
        if ty.is_fully_concrete(builder) {
            return Ok(ty.clone());
        }
        tracing::trace!(ty = %self.show(ty), declaring, "resolve");

        match ty.view(builder) {
            TypeKind::Concrete(_) => Ok(ty.clone()),
            TypeKind::Variable { name, owner } => {
                self.resolve_variable(name.as_ref(), owner.as_ref(), viewing, declaring)
            }
            TypeKind::Parameterized { raw, args } => {
                self.resolve_parameterized(raw, args, viewing, declaring)
            }
            TypeKind::Wildcard { lower, upper } => {
                self.resolve_wildcard(lower, upper, viewing, declaring)
            }
            TypeKind::ArrayOf(component) => self.resolve_array(component, viewing, declaring),
        }
    }

    /// Rebuild `raw<args>` with each variable, parameterized or wildcard
    /// argument resolved. Concrete arguments and generic arrays are kept as
    /// declared.
    fn resolve_parameterized(
        &self,
        raw: &B::InternedStr,
        args: &B::InternedTypes,
        viewing: &B::TypeView,
        declaring: &str,
    ) -> Result<B::TypeView, ResolveError> {
        let builder = self.builder();
        let resolved = builder
            .types_data(args)
            .iter()
            .map(|arg| match arg.view(builder) {
                TypeKind::Variable { name, owner } => {
                    self.resolve_variable(name.as_ref(), owner.as_ref(), viewing, declaring)
                }
                TypeKind::Parameterized { raw, args } => {
                    self.resolve_parameterized(raw, args, viewing, declaring)
                }
                TypeKind::Wildcard { lower, upper } => {
                    self.resolve_wildcard(lower, upper, viewing, declaring)
                }
                TypeKind::Concrete(_) | TypeKind::ArrayOf(_) => Ok(arg.clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(builder.parameterized(raw.as_ref(), resolved))
    }

    /// Resolve both bound lists of a wildcard, keeping their order.
    fn resolve_wildcard(
        &self,
        lower: &B::InternedTypes,
        upper: &B::InternedTypes,
        viewing: &B::TypeView,
        declaring: &str,
    ) -> Result<B::TypeView, ResolveError> {
        let builder = self.builder();
        let lower = self.resolve_all(lower, viewing, declaring)?;
        let upper = self.resolve_all(upper, viewing, declaring)?;
        Ok(builder.wildcard(lower, upper))
    }

    /// Resolve the component of a generic array. An array whose component
    /// resolves to a concrete type collapses to that type's array identity.
    fn resolve_array(
        &self,
        component: &B::TypeView,
        viewing: &B::TypeView,
        declaring: &str,
    ) -> Result<B::TypeView, ResolveError> {
        let builder = self.builder();
        let resolved = match component.view(builder) {
            TypeKind::Variable { name, owner } => {
                self.resolve_variable(name.as_ref(), owner.as_ref(), viewing, declaring)?
            }
            TypeKind::ArrayOf(inner) => self.resolve_array(inner, viewing, declaring)?,
            TypeKind::Parameterized { raw, args } => {
                self.resolve_parameterized(raw, args, viewing, declaring)?
            }
            TypeKind::Concrete(_) | TypeKind::Wildcard { .. } => component.clone(),
        };
        Ok(builder.array_of(resolved))
    }

    fn resolve_all(
        &self,
        types: &B::InternedTypes,
        viewing: &B::TypeView,
        declaring: &str,
    ) -> Result<Vec<B::TypeView>, ResolveError> {
        let builder = self.builder();
        builder
            .types_data(types)
            .iter()
            .map(|ty| self.resolve(ty, viewing, declaring))
            .collect()
    }
}
