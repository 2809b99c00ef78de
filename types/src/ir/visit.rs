use super::{TypeBuilder, TypeFlags, TypeKind};
use crate::TypeView;
use alloc::vec::Vec;

/// Trait for visiting types.
///
/// Implement this trait to traverse types without mutation.
/// The default implementation handles recursion automatically.
///
/// # Example
///
/// ```
/// use generis_types::{TypeBuilder, TypeVisitor, BoxBuilder};
///
/// struct DepthCalculator {
///     max_depth: usize,
///     current_depth: usize,
/// }
///
/// impl<B: TypeBuilder> TypeVisitor<B> for DepthCalculator {
///     fn visit_ty(&mut self, ty: B::TypeView, builder: B) {
///         self.current_depth += 1;
///         self.max_depth = self.max_depth.max(self.current_depth);
///
///         self.super_visit_ty(ty, builder);
///
///         self.current_depth -= 1;
///     }
/// }
///
/// let builder = BoxBuilder::new();
/// let nested = builder.parameterized(
///     "List",
///     [builder.parameterized("List", [builder.concrete("String")])],
/// );
///
/// let mut calc = DepthCalculator { max_depth: 0, current_depth: 0 };
/// calc.visit_ty(nested, builder);
/// assert_eq!(calc.max_depth, 3); // List -> List -> String
/// ```
pub trait TypeVisitor<B: TypeBuilder> {
    /// Visit a type.
    ///
    /// Override this to customize behavior for all types.
    /// Call `super_visit_ty` to recurse into nested types.
    fn visit_ty(&mut self, ty: B::TypeView, builder: B) {
        self.super_visit_ty(ty, builder)
    }

    /// Default recursion into nested types.
    ///
    /// Override `visit_ty` instead of this method.
    fn super_visit_ty(&mut self, ty: B::TypeView, builder: B) {
        match ty.view(builder) {
            // Base cases - no recursion
            TypeKind::Concrete(_) | TypeKind::Variable { .. } => {}

            TypeKind::Parameterized { args, .. } => {
                for arg in builder.types_data(args) {
                    self.visit_ty(arg.clone(), builder);
                }
            }

            // Lower bounds first, then upper bounds
            TypeKind::Wildcard { lower, upper } => {
                for bound in builder.types_data(lower) {
                    self.visit_ty(bound.clone(), builder);
                }
                for bound in builder.types_data(upper) {
                    self.visit_ty(bound.clone(), builder);
                }
            }

            TypeKind::ArrayOf(component) => {
                self.visit_ty(component.clone(), builder);
            }
        }
    }
}

/// Visitor that collects the type variables mentioned by a type, in
/// first-occurrence order and without duplicates.
///
/// # Example
///
/// ```
/// use generis_types::{TypeBuilder, TypeVisitor, BoxBuilder, VariableCollector};
///
/// let builder = BoxBuilder::new();
/// let k = builder.variable("K", "Map");
/// let v = builder.variable("V", "Map");
/// let ty = builder.parameterized("Map", [k.clone(), builder.array(v), k]);
///
/// let mut collector = VariableCollector::default();
/// collector.visit_ty(ty, builder);
/// assert_eq!(collector.names(), ["K", "V"]);
/// ```
#[derive(Debug, Default)]
pub struct VariableCollector {
    found: Vec<(alloc::string::String, alloc::string::String)>,
}

impl VariableCollector {
    /// `(name, owner)` pairs of the variables seen so far.
    pub fn variables(&self) -> &[(alloc::string::String, alloc::string::String)] {
        &self.found
    }

    /// Names of the variables seen so far.
    pub fn names(&self) -> Vec<&str> {
        self.found.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl<B: TypeBuilder> TypeVisitor<B> for VariableCollector {
    fn visit_ty(&mut self, ty: B::TypeView, builder: B) {
        // Skip subtrees without variables
        if !ty.data(builder).flags.contains(TypeFlags::HAS_VARIABLE) {
            return;
        }
        if let TypeKind::Variable { name, owner } = ty.view(builder) {
            let seen = self
                .found
                .iter()
                .any(|(n, o)| n == name.as_ref() && o == owner.as_ref());
            if !seen {
                self.found.push((name.as_ref().into(), owner.as_ref().into()));
            }
        }
        self.super_visit_ty(ty, builder);
    }
}
