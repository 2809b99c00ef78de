use generis_types::{BoxBuilder, TypeBuilder};
use indoc::indoc;
use pretty_assertions::assert_eq;

use super::*;

fn prelude() -> Catalog<BoxBuilder> {
    Catalog::with_prelude(BoxBuilder::new()).unwrap()
}

#[test]
fn test_prelude_loads_and_validates() {
    let catalog = prelude();
    for name in [
        "Object", "String", "Integer", "Comparable", "List", "Set", "SortedSet", "Map",
        "ArrayList", "HashSet", "TreeSet", "HashMap",
    ] {
        assert!(catalog.contains(name), "missing {name}");
    }
    assert!(catalog.validate().is_ok());
}

#[test]
fn test_is_ancestor() {
    let catalog = prelude();
    assert!(catalog.is_ancestor("List", "List"));
    assert!(catalog.is_ancestor("Collection", "ArrayList"));
    assert!(catalog.is_ancestor("Iterable", "TreeSet"));
    assert!(catalog.is_ancestor("Comparable", "String"));
    assert!(!catalog.is_ancestor("Collection", "HashMap"));
    assert!(!catalog.is_ancestor("List", "Collection"));
    // Undeclared types only relate to themselves
    assert!(catalog.is_ancestor("Nope", "Nope"));
    assert!(!catalog.is_ancestor("Object", "Nope"));
}

#[test]
fn test_find_members_through_ancestors() {
    let catalog = prelude();
    let get = catalog.find_method("ArrayList", "get").unwrap();
    assert_eq!(get.declaring.as_ref(), "List");
    let iterator = catalog.find_method("TreeSet", "iterator").unwrap();
    assert_eq!(iterator.declaring.as_ref(), "Iterable");
    assert!(catalog.find_method("ArrayList", "nope").is_none());
    assert!(catalog.find_field("Nope", "x").is_none());
}

#[test]
fn test_superclass_members_shadow_interface_members() {
    let mut catalog = prelude();
    catalog
        .load(indoc! {"
            interface Named { field name: String; }
            class Base { field name: Integer; }
            class Leaf extends Base implements Named { }
        "})
        .unwrap();
    let field = catalog.find_field("Leaf", "name").unwrap();
    assert_eq!(field.declaring.as_ref(), "Base");
}

#[test]
fn test_duplicate_declaration() {
    let mut catalog = prelude();
    let err = catalog.load("class List { }").unwrap_err();
    assert_eq!(
        err,
        CatalogError::Duplicate {
            name: "List".to_string()
        }
    );
}

#[test]
fn test_failed_load_leaves_catalog_unchanged() {
    let mut catalog = prelude();
    let before = catalog.len();
    assert!(catalog.load("class Fine { } class Broken extends Missing { }").is_err());
    assert_eq!(catalog.len(), before);
    assert!(!catalog.contains("Fine"));
}

#[test]
fn test_unknown_type() {
    let mut catalog = prelude();
    let err = catalog
        .load("class Holder { field items: List<Widget>; }")
        .unwrap_err();
    assert_eq!(
        err,
        CatalogError::UnknownType {
            name: "Widget".to_string(),
            referenced_by: "Holder".to_string(),
        }
    );
}

#[test]
fn test_unknown_array_component() {
    let mut catalog = prelude();
    let err = catalog.load("class Holder { new(Widget[]); }").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownType { ref name, .. } if name == "Widget"));
    assert!(catalog.load("class Holder { new(String[][]); }").is_ok());
}

#[test]
fn test_arity_mismatch() {
    let mut catalog = prelude();
    let err = catalog
        .load("class Holder { field pairs: Map<String>; }")
        .unwrap_err();
    assert_eq!(
        err,
        CatalogError::ArityMismatch {
            name: "Map".to_string(),
            expected: 2,
            found: 1,
            referenced_by: "Holder".to_string(),
        }
    );
}

#[test]
fn test_raw_generic_types_are_allowed() {
    let mut catalog = prelude();
    assert!(catalog.load("class Legacy { field items: List; }").is_ok());
}

#[test]
fn test_unbound_variable() {
    let b = BoxBuilder::new();
    let mut catalog = Catalog::new(b);
    let decl = TypeDeclaration::class(b, "Holder").with_field(b, "value", b.variable("T", "Other"));
    catalog.insert(decl).unwrap();
    assert_eq!(
        catalog.validate(),
        Err(CatalogError::UnboundVariable {
            name: "T".to_string(),
            owner: "Other".to_string(),
            referenced_by: "Holder".to_string(),
        })
    );
}

#[test]
fn test_invalid_supertype() {
    let b = BoxBuilder::new();
    let mut catalog = Catalog::new(b);
    let decl = TypeDeclaration::class(b, "Weird")
        .with_param(b, "T", [])
        .extends(b.variable("T", "Weird"));
    catalog.insert(decl).unwrap();
    assert_eq!(
        catalog.validate(),
        Err(CatalogError::InvalidSupertype {
            name: "Weird".to_string(),
            supertype: "T".to_string(),
        })
    );
}

#[test]
fn test_inheritance_cycle() {
    let b = BoxBuilder::new();
    let mut catalog = Catalog::new(b);
    let err = catalog
        .load(indoc! {"
            interface A extends C { }
            interface B extends A { }
            interface C extends B { }
        "})
        .unwrap_err();
    assert_eq!(
        err,
        CatalogError::Cycle {
            name: "A".to_string()
        }
    );
}

#[test]
fn test_lookups_terminate_on_unvalidated_cycle() {
    let b = BoxBuilder::new();
    let mut catalog = Catalog::new(b);
    catalog
        .insert(
            TypeDeclaration::class(b, "A")
                .extends(b.concrete("B"))
                .with_field(b, "a", b.concrete("A")),
        )
        .unwrap();
    catalog
        .insert(TypeDeclaration::class(b, "B").extends(b.concrete("A")))
        .unwrap();

    assert!(catalog.is_ancestor("B", "A"));
    assert!(catalog.is_ancestor("A", "B"));
    assert!(!catalog.is_ancestor("Other", "A"));
    assert_eq!(catalog.find_field("B", "a").unwrap().declaring.as_ref(), "A");
    assert!(catalog.find_field("A", "missing").is_none());
    assert!(catalog.find_method("B", "missing").is_none());
    assert_eq!(
        catalog.validate(),
        Err(CatalogError::Cycle {
            name: "A".to_string()
        })
    );
}

#[test]
fn test_top_type_is_always_known() {
    let b = BoxBuilder::new();
    let mut catalog = Catalog::new(b);
    // `?` carries the top type as its upper bound even without a prelude
    assert!(catalog.load("class Bag<T> { field any: Bag<?>; }").is_ok());
}

#[test]
fn test_programmatic_declarations() {
    let b = BoxBuilder::new();
    let mut catalog = Catalog::new(b);
    catalog
        .insert(TypeDeclaration::interface(b, "Source").with_param(b, "T", []))
        .unwrap();
    catalog
        .insert(
            TypeDeclaration::class(b, "Numbers")
                .implements(b.parameterized("Source", [b.concrete("Integer")]))
                .with_constructor(ConstructorDecl::new(["Integer"]).private()),
        )
        .unwrap();
    catalog.insert(TypeDeclaration::class(b, "Integer")).unwrap();

    assert!(catalog.validate().is_ok());
    assert!(catalog.is_ancestor("Source", "Numbers"));
    let numbers = catalog.declaration("Numbers").unwrap();
    assert_eq!(numbers.constructors[0].visibility, Visibility::Private);
    assert_eq!(
        catalog.iter().map(|d| d.name.as_ref()).collect::<Vec<_>>(),
        ["Source", "Numbers", "Integer"]
    );
}

#[test]
fn test_implicit_constructor() {
    let catalog = prelude();
    let object = catalog.declaration("Object").unwrap();
    assert_eq!(object.effective_constructors(), vec![ConstructorDecl::default()]);
    let list = catalog.declaration("List").unwrap();
    assert!(list.effective_constructors().is_empty());
}
