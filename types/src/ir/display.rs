use super::{Ty, TypeBuilder, TypeKind, TypeVisitor};
use crate::TypeView;
use alloc::string::String;
use core::fmt::Write;

/// Visitor that formats types into strings.
///
/// Types print the way they are written in a catalog: `List<? extends T>`,
/// `Map<String, V>[]`.
pub struct TypeFormatter {
    output: String,
}

impl TypeFormatter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    pub fn format<B: TypeBuilder>(ty: B::TypeView, builder: B) -> String {
        let mut formatter = Self::new();
        formatter.visit_ty(ty, builder);
        formatter.output
    }

    fn write_list<B: TypeBuilder>(&mut self, types: &[B::TypeView], builder: B) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                let _ = write!(self.output, ", ");
            }
            self.visit_ty(ty.clone(), builder);
        }
    }
}

impl Default for TypeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TypeBuilder> TypeVisitor<B> for TypeFormatter {
    fn visit_ty(&mut self, ty: B::TypeView, builder: B) {
        match ty.view(builder) {
            TypeKind::Concrete(name) => {
                let _ = write!(self.output, "{}", name);
            }
            TypeKind::Variable { name, .. } => {
                let _ = write!(self.output, "{}", name);
            }
            TypeKind::Parameterized { raw, args } => {
                let _ = write!(self.output, "{}<", raw);
                self.write_list(builder.types_data(args), builder);
                let _ = write!(self.output, ">");
            }
            TypeKind::Wildcard { lower, upper } => {
                let _ = write!(self.output, "?");
                let lower = builder.types_data(lower);
                // The implicit top bound of `?` and `? super L` is not printed
                let upper: alloc::vec::Vec<_> = builder
                    .types_data(upper)
                    .iter()
                    .filter(|bound| {
                        !matches!(bound.view(builder), TypeKind::Concrete(name) if name.as_ref() == crate::TOP_TYPE)
                    })
                    .cloned()
                    .collect();
                if !lower.is_empty() {
                    let _ = write!(self.output, " super ");
                    self.write_list(lower, builder);
                } else if !upper.is_empty() {
                    let _ = write!(self.output, " extends ");
                    self.write_list(&upper, builder);
                }
            }
            TypeKind::ArrayOf(component) => {
                self.visit_ty(component.clone(), builder);
                let _ = write!(self.output, "{}", crate::ARRAY_SUFFIX);
            }
        }
    }
}

/// Extension trait to add display methods to TypeKind.
pub trait TypeKindDisplay<B: TypeBuilder> {
    fn display(&self, builder: B) -> String;
}

impl<B: TypeBuilder<TypeView = Ty<B>>> TypeKindDisplay<B> for TypeKind<B> {
    fn display(&self, builder: B) -> String {
        // Just use the intern and format pattern for simplicity
        TypeFormatter::format(self.clone().intern(builder), builder)
    }
}

/// Extension trait to add display methods to type handles.
pub trait TyDisplay<B: TypeBuilder> {
    fn display(&self, builder: B) -> String;
}

impl<B: TypeBuilder<TypeView = Ty<B>>> TyDisplay<B> for Ty<B> {
    fn display(&self, builder: B) -> String {
        TypeFormatter::format(self.clone(), builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoxBuilder, TypeBuilder, TypeKind};

    #[test]
    fn test_format_concrete() {
        let builder = BoxBuilder::new();
        let ty = builder.concrete("String");
        assert_eq!(TypeFormatter::format(ty, builder), "String");
    }

    #[test]
    fn test_format_variable() {
        let builder = BoxBuilder::new();
        let ty = builder.variable("T", "Box");
        assert_eq!(TypeFormatter::format(ty, builder), "T");
    }

    #[test]
    fn test_format_parameterized() {
        let builder = BoxBuilder::new();
        let ty = builder.parameterized(
            "Map",
            [builder.concrete("String"), builder.variable("V", "Cache")],
        );
        assert_eq!(TypeFormatter::format(ty, builder), "Map<String, V>");
    }

    #[test]
    fn test_format_wildcards() {
        let builder = BoxBuilder::new();
        let unbounded = builder.wildcard([], [builder.top()]);
        let extends = builder.wildcard([], [builder.variable("T", "Box")]);
        let sup = builder.wildcard([builder.concrete("Integer")], [builder.top()]);
        assert_eq!(unbounded.display(builder), "?");
        assert_eq!(extends.display(builder), "? extends T");
        assert_eq!(sup.display(builder), "? super Integer");
    }

    #[test]
    fn test_format_generic_array() {
        let builder = BoxBuilder::new();
        let inner = builder.parameterized("List", [builder.variable("E", "Bag")]);
        let ty = builder.array(builder.array(inner));
        assert_eq!(ty.display(builder), "List<E>[][]");
    }

    #[test]
    fn test_kind_display_extension() {
        let builder = BoxBuilder::new();
        let kind = TypeKind::ArrayOf(builder.variable("T", "Box"));
        assert_eq!(kind.display(builder), "T[]");
    }
}
