use core::marker::PhantomData;

use generis_types::{TypeBuilder, TypeFormatter, TypeView};

use super::{Instance, ObjectFactory, Value};
use crate::catalog::{DeclarationLookup, Visibility};
use crate::errors::{InstantiationCause, InstantiationError};

/// Interfaces that are instantiated through a standard implementation.
const DEFAULT_IMPLEMENTATIONS: &[(&str, &str)] = &[
    ("List", "ArrayList"),
    ("Collection", "ArrayList"),
    ("Iterable", "ArrayList"),
    ("Map", "HashMap"),
    ("SortedSet", "TreeSet"),
    ("Set", "HashSet"),
];

/// Root of the collection hierarchy.
const COLLECTION: &str = "Collection";

/// Object factory backed by catalog declarations.
///
/// # Example
///
/// ```
/// use generis_core::{Catalog, DefaultObjectFactory, ObjectFactory, parse_type};
/// use generis_types::BoxBuilder;
///
/// let b = BoxBuilder::new();
/// let catalog = Catalog::with_prelude(b).unwrap();
/// let factory = DefaultObjectFactory::new(&catalog);
///
/// let list = factory.create(&parse_type(b, "List<String>").unwrap()).unwrap();
/// assert_eq!(list.class, "ArrayList");
/// assert!(factory.is_collection("ArrayList"));
/// ```
pub struct DefaultObjectFactory<'c, B: TypeBuilder, C: DeclarationLookup<B> + ?Sized> {
    catalog: &'c C,
    _builder: PhantomData<fn() -> B>,
}

impl<'c, B: TypeBuilder, C: DeclarationLookup<B> + ?Sized> DefaultObjectFactory<'c, B, C> {
    pub fn new(catalog: &'c C) -> Self {
        Self {
            catalog,
            _builder: PhantomData,
        }
    }

    /// The class actually instantiated for `name`.
    pub fn resolve_interface<'n>(&self, name: &'n str) -> &'n str {
        DEFAULT_IMPLEMENTATIONS
            .iter()
            .find(|(interface, _)| *interface == name)
            .map_or(name, |&(_, implementation)| implementation)
    }

    fn instantiate(
        &self,
        class: &str,
        arg_types: Option<&[&str]>,
        arg_values: Option<&[Value]>,
    ) -> Result<Instance, InstantiationCause> {
        let decl = self
            .catalog
            .declaration(class)
            .ok_or(InstantiationCause::UnknownType)?;
        if !decl.is_instantiable() {
            return Err(InstantiationCause::Abstract);
        }

        let (types, values) = match (arg_types, arg_values) {
            (Some(types), Some(values)) => (types, values),
            _ => (&[][..], &[][..]),
        };

        let constructor = decl
            .effective_constructors()
            .into_iter()
            .find(|c| c.takes(types))
            .ok_or_else(|| InstantiationCause::NoSuchConstructor(types.join(",")))?;
        if constructor.visibility == Visibility::Private {
            return Err(InstantiationCause::Inaccessible(constructor.signature()));
        }
        if values.len() != types.len() {
            return Err(InstantiationCause::ArgumentCount {
                expected: types.len(),
                found: values.len(),
            });
        }

        tracing::debug!(class, args = values.len(), "instantiating");
        Ok(Instance {
            class: class.to_string(),
            args: values.to_vec(),
        })
    }
}

impl<B: TypeBuilder, C: DeclarationLookup<B> + ?Sized> ObjectFactory<B>
    for DefaultObjectFactory<'_, B, C>
{
    fn create_with(
        &self,
        ty: &B::TypeView,
        arg_types: Option<&[&str]>,
        arg_values: Option<&[Value]>,
    ) -> Result<Instance, InstantiationError> {
        let builder = self.catalog.builder();
        let failure = |type_name: &str, cause| InstantiationError {
            type_name: type_name.to_string(),
            arg_types: arg_types
                .unwrap_or_default()
                .iter()
                .map(ToString::to_string)
                .collect(),
            arg_values: arg_values.unwrap_or_default().to_vec(),
            cause,
        };

        let Some(requested) = ty.raw_name(builder) else {
            let shown = TypeFormatter::format(ty.clone(), builder);
            return Err(failure(&shown, InstantiationCause::NotConcrete(shown.clone())));
        };
        let class = self.resolve_interface(requested);
        self.instantiate(class, arg_types, arg_values)
            .map_err(|cause| failure(class, cause))
    }

    fn is_collection(&self, type_name: &str) -> bool {
        self.catalog.is_ancestor(COLLECTION, type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::parser::parse_type;
    use generis_types::BoxBuilder;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog<BoxBuilder> {
        let mut catalog = Catalog::with_prelude(BoxBuilder::new()).unwrap();
        catalog
            .load(indoc! {"
                class Point {
                    new(Integer, Integer);
                    private new(String);
                }
                abstract class Shape { }
                class Empty { }
            "})
            .unwrap();
        catalog
    }

    fn factory(
        catalog: &Catalog<BoxBuilder>,
    ) -> DefaultObjectFactory<'_, BoxBuilder, Catalog<BoxBuilder>> {
        DefaultObjectFactory::new(catalog)
    }

    fn create(catalog: &Catalog<BoxBuilder>, source: &str) -> Result<Instance, InstantiationError> {
        factory(catalog).create(&parse_type(BoxBuilder::new(), source).unwrap())
    }

    #[test]
    fn test_interfaces_use_default_implementations() {
        let catalog = catalog();
        for (requested, class) in [
            ("List<String>", "ArrayList"),
            ("Collection<String>", "ArrayList"),
            ("Iterable<String>", "ArrayList"),
            ("Map<String, Integer>", "HashMap"),
            ("SortedSet<Long>", "TreeSet"),
            ("Set<Long>", "HashSet"),
            ("HashSet<Long>", "HashSet"),
        ] {
            assert_eq!(create(&catalog, requested).unwrap().class, class);
        }
    }

    #[test]
    fn test_implicit_no_arg_constructor() {
        let catalog = catalog();
        let empty = create(&catalog, "Empty").unwrap();
        assert_eq!(
            empty,
            Instance {
                class: "Empty".to_string(),
                args: vec![]
            }
        );
    }

    #[test]
    fn test_constructor_selection() {
        let catalog = catalog();
        let b = catalog.builder();
        let point = factory(&catalog)
            .create_with(
                &b.concrete("Point"),
                Some(&["Integer", "Integer"]),
                Some(&[Value::Int(1), Value::Int(2)]),
            )
            .unwrap();
        assert_eq!(point.args, vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(point.to_string(), "Point(1, 2)");
    }

    #[test]
    fn test_missing_values_fall_back_to_no_arg_constructor() {
        let catalog = catalog();
        let b = catalog.builder();
        let list = factory(&catalog)
            .create_with(&b.concrete("ArrayList"), Some(&["Integer"]), None)
            .unwrap();
        assert!(list.args.is_empty());

        let err = factory(&catalog)
            .create_with(&b.concrete("Point"), Some(&["Integer", "Integer"]), None)
            .unwrap_err();
        assert_eq!(err.cause, InstantiationCause::NoSuchConstructor(String::new()));
    }

    #[test]
    fn test_no_matching_constructor() {
        let catalog = catalog();
        let b = catalog.builder();
        let err = factory(&catalog)
            .create_with(
                &b.concrete("Point"),
                Some(&["Long"]),
                Some(&[Value::Int(1)]),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error instantiating Point with invalid types (Long) or values (1). \
             Cause: no constructor takes (Long)"
        );
    }

    #[test]
    fn test_private_constructor() {
        let catalog = catalog();
        let b = catalog.builder();
        let err = factory(&catalog)
            .create_with(
                &b.concrete("Point"),
                Some(&["String"]),
                Some(&[Value::from("origin")]),
            )
            .unwrap_err();
        assert_eq!(err.cause, InstantiationCause::Inaccessible("String".to_string()));
        assert_eq!(err.arg_values, vec![Value::Str("origin".to_string())]);
    }

    #[test]
    fn test_argument_count_mismatch() {
        let catalog = catalog();
        let b = catalog.builder();
        let err = factory(&catalog)
            .create_with(
                &b.concrete("Point"),
                Some(&["Integer", "Integer"]),
                Some(&[Value::Int(1)]),
            )
            .unwrap_err();
        assert_eq!(
            err.cause,
            InstantiationCause::ArgumentCount {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_abstract_and_unknown_types() {
        let catalog = catalog();
        assert_eq!(
            create(&catalog, "Shape").unwrap_err().cause,
            InstantiationCause::Abstract
        );
        assert_eq!(
            create(&catalog, "Comparable<String>").unwrap_err().cause,
            InstantiationCause::Abstract
        );
        let err = create(&catalog, "Widget").unwrap_err();
        assert_eq!(err.type_name, "Widget");
        assert_eq!(err.cause, InstantiationCause::UnknownType);
    }

    #[test]
    fn test_generic_array_is_not_concrete() {
        let catalog = catalog();
        let b = catalog.builder();
        let array = b.array(b.parameterized("List", [b.concrete("String")]));
        let err = factory(&catalog).create(&array).unwrap_err();
        assert_eq!(
            err.cause,
            InstantiationCause::NotConcrete("List<String>[]".to_string())
        );
    }

    #[test]
    fn test_is_collection() {
        let catalog = catalog();
        let factory = factory(&catalog);
        assert!(factory.is_collection("Collection"));
        assert!(factory.is_collection("List"));
        assert!(factory.is_collection("TreeSet"));
        assert!(!factory.is_collection("Map"));
        assert!(!factory.is_collection("HashMap"));
        assert!(!factory.is_collection("Widget"));
    }

    #[test]
    fn test_nested_instances_display() {
        let inner = Instance {
            class: "Point".to_string(),
            args: vec![Value::Int(0), Value::Null],
        };
        let outer = Value::from(Instance {
            class: "Box".to_string(),
            args: vec![inner.into(), true.into()],
        });
        assert_eq!(outer.to_string(), "Box(Point(0, null), true)");
    }
}
