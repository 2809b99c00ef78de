use generis_types::{TypeBuilder, TypeKind, TypeView};

use super::Resolver;
use crate::catalog::{DeclarationLookup, TypeDeclaration};
use crate::errors::ResolveError;
use crate::options::Fallback;

/// The type variable being looked up while climbing the hierarchy.
struct Target<'a, B: TypeBuilder> {
    name: &'a str,
    declaring: &'a TypeDeclaration<B>,
    /// Ordinal position of the variable among `declaring`'s parameters.
    position: usize,
}

/// A viewing type split into its declaration and actual arguments.
struct View<'a, B: TypeBuilder> {
    ty: &'a B::TypeView,
    decl: &'a TypeDeclaration<B>,
    /// `None` for a raw view.
    args: Option<&'a [B::TypeView]>,
}

impl<B: TypeBuilder, C: DeclarationLookup<B> + ?Sized> Resolver<'_, B, C> {
    /// Resolve the variable `name` of `owner`, found in a type expression
    /// declared by `declaring`, as seen from `viewing`.
    pub(super) fn resolve_variable(
        &self,
        name: &str,
        owner: &str,
        viewing: &B::TypeView,
        declaring: &str,
    ) -> Result<B::TypeView, ResolveError> {
        self.split_view(viewing)?;

        let declaring = self.lookup(declaring)?;
        let position = (owner == declaring.name.as_ref())
            .then(|| declaring.param_position(name))
            .flatten()
            .ok_or_else(|| ResolveError::UnknownVariable {
                name: name.to_string(),
                declaring: declaring.name.to_string(),
            })?;

        let target = Target {
            name,
            declaring,
            position,
        };
        self.climb(&target, viewing, &mut Vec::new())
    }

    /// Look for `target` starting at `viewing`, walking up the inheritance
    /// graph superclass first.
    ///
    /// `trail` holds the types climbed through to reach `viewing`.
    fn climb(
        &self,
        target: &Target<'_, B>,
        viewing: &B::TypeView,
        trail: &mut Vec<String>,
    ) -> Result<B::TypeView, ResolveError> {
        let builder = self.builder();
        let (clazz, args) = self.split_view(viewing)?;

        if clazz == target.declaring.name.as_ref() {
            return match args {
                Some(args) => {
                    self.check_arity(target.declaring, args, viewing)?;
                    Ok(args[target.position].clone())
                }
                // A raw view erases the variable to its first bound
                None => Ok(target.declaring.params[target.position]
                    .bounds
                    .first()
                    .cloned()
                    .unwrap_or_else(|| builder.top())),
            };
        }

        let decl = self.lookup(clazz)?;
        if let Some(args) = args {
            self.check_arity(decl, args, viewing)?;
        }
        let view = View {
            ty: viewing,
            decl,
            args,
        };

        trail.push(clazz.to_string());
        for edge in decl.supertypes() {
            if let Some(found) = self.scan_supertype(target, &view, edge, trail)? {
                trail.pop();
                return Ok(found);
            }
        }
        trail.pop();
        self.fallback(target, viewing)
    }

    /// Examine one direct supertype edge of the viewing type.
    ///
    /// Returns `None` when the edge does not lead to the variable's
    /// declaring type, or leads there without an answer.
    fn scan_supertype(
        &self,
        target: &Target<'_, B>,
        view: &View<'_, B>,
        edge: &B::TypeView,
        trail: &mut Vec<String>,
    ) -> Result<Option<B::TypeView>, ResolveError> {
        let builder = self.builder();
        let declaring = target.declaring.name.as_ref();

        match edge.view(builder) {
            TypeKind::Parameterized { raw, args } if raw.as_ref() == declaring => {
                let args = builder.types_data(args);
                let Some(arg) = args.get(target.position) else {
                    return Err(ResolveError::ArityMismatch {
                        raw: declaring.to_string(),
                        expected: target.declaring.params.len(),
                        found: args.len(),
                        context: self.show(edge),
                    });
                };
                self.translate_argument(target, view, arg)
            }

            TypeKind::Parameterized { raw, .. } => {
                if on_trail(trail, raw.as_ref())
                    || !self.catalog.is_ancestor(declaring, raw.as_ref())
                {
                    return Ok(None);
                }
                let parent = if self.options.translate_inherited {
                    self.resolve(edge, view.ty, view.decl.name.as_ref())?
                } else {
                    edge.clone()
                };
                tracing::trace!(via = %self.show(&parent), variable = target.name, "climbing");
                self.climb(target, &parent, trail).map(Some)
            }

            TypeKind::Concrete(name) => {
                if on_trail(trail, name.as_ref())
                    || !self.catalog.is_ancestor(declaring, name.as_ref())
                {
                    return Ok(None);
                }
                self.climb(target, edge, trail).map(Some)
            }

            // Supertypes of a validated catalog are raw or parameterized
            TypeKind::Variable { .. } | TypeKind::Wildcard { .. } | TypeKind::ArrayOf(_) => {
                Ok(None)
            }
        }
    }

    /// Map the argument an edge passes to the variable's declaring type into
    /// the viewing type's terms.
    fn translate_argument(
        &self,
        target: &Target<'_, B>,
        view: &View<'_, B>,
        arg: &B::TypeView,
    ) -> Result<Option<B::TypeView>, ResolveError> {
        let builder = self.builder();
        match arg.view(builder) {
            // Declared as one of the viewing type's own parameters
            TypeKind::Variable { name, owner } if owner.as_ref() == view.decl.name.as_ref() => {
                let index = view.decl.param_position(name.as_ref()).ok_or_else(|| {
                    ResolveError::UnknownVariable {
                        name: name.to_string(),
                        declaring: view.decl.name.to_string(),
                    }
                })?;
                match view.args {
                    Some(args) => Ok(Some(args[index].clone())),
                    None => {
                        tracing::debug!(
                            variable = target.name,
                            viewing = %self.show(view.ty),
                            "raw view leaves variable unbound"
                        );
                        Ok(None)
                    }
                }
            }
            TypeKind::Variable { .. } => Ok(None),
            _ if self.options.translate_inherited && !arg.is_fully_concrete(builder) => self
                .resolve(arg, view.ty, view.decl.name.as_ref())
                .map(Some),
            _ => Ok(Some(arg.clone())),
        }
    }

    fn fallback(
        &self,
        target: &Target<'_, B>,
        viewing: &B::TypeView,
    ) -> Result<B::TypeView, ResolveError> {
        match self.options.fallback {
            Fallback::TopType => {
                tracing::debug!(
                    variable = target.name,
                    declaring = %target.declaring.name,
                    viewing = %self.show(viewing),
                    "no inheritance edge binds the variable; using the top type"
                );
                Ok(self.builder().top())
            }
            Fallback::Error => Err(ResolveError::Unresolved {
                name: target.name.to_string(),
                declaring: target.declaring.name.to_string(),
                viewing: self.show(viewing),
            }),
        }
    }

    /// Identity and actual arguments of a viewing type.
    fn split_view<'v>(
        &self,
        viewing: &'v B::TypeView,
    ) -> Result<(&'v str, Option<&'v [B::TypeView]>), ResolveError>
    where
        B: 'v,
    {
        let builder = self.builder();
        match viewing.view(builder) {
            TypeKind::Concrete(name) => Ok((name.as_ref(), None)),
            TypeKind::Parameterized { raw, args } => {
                Ok((raw.as_ref(), Some(builder.types_data(args))))
            }
            TypeKind::Variable { .. } | TypeKind::Wildcard { .. } | TypeKind::ArrayOf(_) => {
                Err(ResolveError::InvalidArgument {
                    found: self.show(viewing),
                })
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<&TypeDeclaration<B>, ResolveError> {
        self.catalog
            .declaration(name)
            .ok_or_else(|| ResolveError::UnknownType {
                name: name.to_string(),
            })
    }

    fn check_arity(
        &self,
        decl: &TypeDeclaration<B>,
        args: &[B::TypeView],
        viewing: &B::TypeView,
    ) -> Result<(), ResolveError> {
        if decl.params.len() == args.len() {
            Ok(())
        } else {
            Err(ResolveError::ArityMismatch {
                raw: decl.name.to_string(),
                expected: decl.params.len(),
                found: args.len(),
                context: self.show(viewing),
            })
        }
    }
}

/// Whether `name` was already climbed through, which only happens when an
/// unvalidated catalog has an inheritance cycle.
fn on_trail(trail: &[String], name: &str) -> bool {
    trail.iter().any(|seen| seen == name)
}
