//! End-to-end resolution through a three-level mapper hierarchy.

use generis::{
    BoxBuilder, Catalog, DeclarationLookup, DefaultObjectFactory, Fallback, ObjectFactory,
    ResolveError, ResolveOptions, Resolver, TyDisplay, parse_type,
};
use indoc::indoc;
use pretty_assertions::assert_eq;

const MAPPERS: &str = indoc! {"
    class Date { }
    interface Serializable { }

    interface Level0Mapper<L, M, N> {
        method select(param: N): N;
        method selectList(first: M, second: N): List<L>;
        method selectArray(param: List<L>[]): L[];
        method selectMap(): Map<N, M>;
        method selectWildcard(): List<? extends N>;
        method selectSuper(): List<? super M>;
        method selectNested(): Map<N, List<L>>;
    }

    interface Level1Mapper<E, F> extends Level0Mapper<E, F, String> { }

    interface Level2Mapper extends Level1Mapper<Date, Integer>, Serializable { }

    interface GenericMapper<G> extends Level1Mapper<G, Long> { }

    class Calculator<T> {
        field id: String;
        field value: T;
    }

    class IntegerCalculator extends Calculator<Integer> { }
"};

type B = BoxBuilder;

fn catalog() -> Catalog<B> {
    let mut catalog = Catalog::with_prelude(BoxBuilder::new()).unwrap();
    catalog.load(MAPPERS).unwrap();
    catalog
}

fn resolver(catalog: &Catalog<B>, options: ResolveOptions) -> Resolver<'_, B, Catalog<B>> {
    Resolver::with_options(catalog, options)
}

fn return_type(
    catalog: &Catalog<B>,
    options: ResolveOptions,
    viewing: &str,
    method: &str,
) -> String {
    let b = catalog.builder();
    let method = catalog.find_method("Level0Mapper", method).unwrap();
    let viewing = parse_type(b, viewing).unwrap();
    resolver(catalog, options)
        .resolve_return_type(method, &viewing)
        .unwrap()
        .display(b)
        .to_string()
}

fn param_types(
    catalog: &Catalog<B>,
    options: ResolveOptions,
    viewing: &str,
    method: &str,
) -> Vec<String> {
    let b = catalog.builder();
    let method = catalog.find_method("Level0Mapper", method).unwrap();
    let viewing = parse_type(b, viewing).unwrap();
    resolver(catalog, options)
        .resolve_param_types(method, &viewing)
        .unwrap()
        .into_iter()
        .map(|ty| ty.display(b).to_string())
        .collect()
}

#[test]
fn test_one_level_through_parameterized_view() {
    let catalog = catalog();
    let options = ResolveOptions::default;
    let viewing = "Level1Mapper<Date, Integer>";

    assert_eq!(return_type(&catalog, options(), viewing, "select"), "String");
    assert_eq!(return_type(&catalog, options(), viewing, "selectList"), "List<Date>");
    assert_eq!(return_type(&catalog, options(), viewing, "selectArray"), "Date[]");
    assert_eq!(
        return_type(&catalog, options(), viewing, "selectMap"),
        "Map<String, Integer>"
    );
    assert_eq!(
        return_type(&catalog, options(), viewing, "selectWildcard"),
        "List<? extends String>"
    );
    assert_eq!(
        return_type(&catalog, options(), viewing, "selectSuper"),
        "List<? super Integer>"
    );
    assert_eq!(
        return_type(&catalog, options(), viewing, "selectNested"),
        "Map<String, List<Date>>"
    );
    assert_eq!(
        param_types(&catalog, options(), viewing, "selectList"),
        vec!["Integer", "String"]
    );
    assert_eq!(
        param_types(&catalog, options(), viewing, "selectArray"),
        vec!["List<Date>[]"]
    );
}

#[test]
fn test_two_levels_with_constant_bindings() {
    let catalog = catalog();
    for options in [
        ResolveOptions::default(),
        ResolveOptions::default().with_translate_inherited(true),
    ] {
        assert_eq!(
            return_type(&catalog, options.clone(), "Level2Mapper", "select"),
            "String"
        );
        assert_eq!(
            return_type(&catalog, options.clone(), "Level2Mapper", "selectList"),
            "List<Date>"
        );
        assert_eq!(
            return_type(&catalog, options, "Level2Mapper", "selectMap"),
            "Map<String, Integer>"
        );
    }
}

#[test]
fn test_intermediate_variables_leak_by_default() {
    let catalog = catalog();
    let options = ResolveOptions::default;
    let viewing = "GenericMapper<Date>";

    assert_eq!(return_type(&catalog, options(), viewing, "select"), "String");
    // `Level1Mapper<G, Long>` is walked as written, so its `G` comes back.
    assert_eq!(return_type(&catalog, options(), viewing, "selectList"), "List<G>");
    assert_eq!(
        return_type(&catalog, options(), viewing, "selectMap"),
        "Map<String, Long>"
    );
}

#[test]
fn test_inherited_translation() {
    let catalog = catalog();
    let options = || ResolveOptions::default().with_translate_inherited(true);
    let viewing = "GenericMapper<Date>";

    assert_eq!(return_type(&catalog, options(), viewing, "selectList"), "List<Date>");
    assert_eq!(
        return_type(&catalog, options(), viewing, "selectNested"),
        "Map<String, List<Date>>"
    );
    assert_eq!(
        param_types(&catalog, options(), viewing, "selectArray"),
        vec!["List<Date>[]"]
    );
    assert_eq!(
        param_types(&catalog, options(), viewing, "selectList"),
        vec!["Long", "String"]
    );
}

#[test]
fn test_raw_view_uses_top_type_or_fails_strictly() {
    let catalog = catalog();
    assert_eq!(
        return_type(&catalog, ResolveOptions::default(), "Level0Mapper", "selectList"),
        "List<Object>"
    );

    let b = catalog.builder();
    let method = catalog.find_method("Level0Mapper", "selectList").unwrap();
    let viewing = parse_type(b, "Serializable").unwrap();
    let err = resolver(&catalog, ResolveOptions::default().with_fallback(Fallback::Error))
        .resolve_return_type(method, &viewing)
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::Unresolved {
            name: "L".to_string(),
            declaring: "Level0Mapper".to_string(),
            viewing: "Serializable".to_string(),
        }
    );
}

#[test]
fn test_field_through_subclass() {
    let catalog = catalog();
    let b = catalog.builder();
    let viewing = parse_type(b, "IntegerCalculator").unwrap();
    let resolver = resolver(&catalog, ResolveOptions::default());

    let value = catalog.find_field("IntegerCalculator", "value").unwrap();
    assert_eq!(
        resolver.resolve_field_type(value, &viewing).unwrap().display(b).to_string(),
        "Integer"
    );
    let id = catalog.find_field("IntegerCalculator", "id").unwrap();
    assert_eq!(
        resolver.resolve_field_type(id, &viewing).unwrap().display(b).to_string(),
        "String"
    );
}

#[test]
fn test_resolve_then_create() {
    let catalog = catalog();
    let b = catalog.builder();
    let method = catalog.find_method("Level0Mapper", "selectMap").unwrap();
    let viewing = parse_type(b, "Level1Mapper<Date, Integer>").unwrap();
    let ty = resolver(&catalog, ResolveOptions::default())
        .resolve_return_type(method, &viewing)
        .unwrap();

    let factory = DefaultObjectFactory::new(&catalog);
    let map = factory.create(&ty).unwrap();
    assert_eq!(map.class, "HashMap");
    assert!(!factory.is_collection(&map.class));

    let list = factory.create(&parse_type(b, "List<Date>").unwrap()).unwrap();
    assert!(factory.is_collection(&list.class));
}
