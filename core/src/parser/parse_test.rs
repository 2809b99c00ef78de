use generis_types::{BoxBuilder, TyDisplay, TypeBuilder, TypeKind, TypeView};
use indoc::indoc;
use pretty_assertions::assert_eq;

use super::{parse_catalog, parse_type};
use crate::catalog::{DeclKind, Visibility};
use crate::errors::CatalogError;

fn display(source: &str) -> String {
    let b = BoxBuilder::new();
    parse_type(b, source).unwrap().display(b)
}

#[test]
fn test_parse_standalone_types() {
    assert_eq!(display("String"), "String");
    assert_eq!(display("List<String>"), "List<String>");
    assert_eq!(display("Map<String, List<Integer>>"), "Map<String, List<Integer>>");
    assert_eq!(display("List<?>"), "List<?>");
    assert_eq!(display("List<? extends Number>"), "List<? extends Number>");
    assert_eq!(display("List<? super Integer>"), "List<? super Integer>");
    assert_eq!(display("  List < String >  "), "List<String>");
}

#[test]
fn test_concrete_arrays_are_nominal() {
    let b = BoxBuilder::new();
    let ty = parse_type(b, "String[][]").unwrap();
    assert_eq!(ty.view(b), &TypeKind::Concrete("String[][]".into()));

    let generic = parse_type(b, "List<String>[]").unwrap();
    assert!(generic.is_array(b));
}

#[test]
fn test_wildcard_bounds() {
    let b = BoxBuilder::new();

    let unbounded = parse_type(b, "?").unwrap();
    let TypeKind::Wildcard { lower, upper } = unbounded.view(b) else {
        panic!("expected a wildcard");
    };
    assert!(b.types_data(lower).is_empty());
    assert_eq!(b.types_data(upper), [b.top()]);

    let sup = parse_type(b, "? super Integer").unwrap();
    let TypeKind::Wildcard { lower, upper } = sup.view(b) else {
        panic!("expected a wildcard");
    };
    assert_eq!(b.types_data(lower), [b.concrete("Integer")]);
    assert_eq!(b.types_data(upper), [b.top()]);
}

#[test]
fn test_declaration_params_become_variables() {
    let b = BoxBuilder::new();
    let decls = parse_catalog(
        b,
        indoc! {"
            class Pair<A, B extends Comparable<B>> extends Base<A> {
                field first: A;
                field second: B[];
                field raw: String;
            }
        "},
    )
    .unwrap();

    assert_eq!(decls.len(), 1);
    let pair = &decls[0];
    assert_eq!(pair.name.as_ref(), "Pair");
    assert_eq!(pair.kind, DeclKind::Class);
    assert_eq!(pair.params.len(), 2);
    assert_eq!(
        pair.params[1].bounds,
        vec![b.parameterized("Comparable", [b.variable("B", "Pair")])]
    );
    assert_eq!(
        pair.superclass,
        Some(b.parameterized("Base", [b.variable("A", "Pair")]))
    );

    let first = pair.field("first").unwrap();
    assert_eq!(first.ty, b.variable("A", "Pair"));
    assert_eq!(first.declaring.as_ref(), "Pair");
    assert_eq!(pair.field("second").unwrap().ty, b.array(b.variable("B", "Pair")));
    assert_eq!(pair.field("raw").unwrap().ty, b.concrete("String"));
}

#[test]
fn test_methods_and_constructors() {
    let b = BoxBuilder::new();
    let decls = parse_catalog(
        b,
        indoc! {"
            // a comment
            abstract class Box<T> implements Holder<T>, Marker {
                method get(): T;
                method put(value: T, replace: Boolean): Box<T>;
                new();
                private new(String, Integer[]);
            }
        "},
    )
    .unwrap();

    let decl = &decls[0];
    assert!(decl.is_abstract);
    assert_eq!(decl.superclass, None);
    assert_eq!(decl.interfaces.len(), 2);

    let put = decl.method("put").unwrap();
    assert_eq!(put.params.len(), 2);
    assert_eq!(put.params[0].name.as_ref(), "value");
    assert_eq!(put.params[0].ty, b.variable("T", "Box"));
    assert_eq!(put.ret, b.parameterized("Box", [b.variable("T", "Box")]));

    assert_eq!(decl.constructors.len(), 2);
    assert!(decl.constructors[0].params.is_empty());
    assert_eq!(decl.constructors[1].params, ["String", "Integer[]"]);
    assert_eq!(decl.constructors[1].visibility, Visibility::Private);
}

#[test]
fn test_interfaces_extend_many() {
    let b = BoxBuilder::new();
    let decls = parse_catalog(b, "interface Both<T> extends Left<T>, Right { }").unwrap();
    assert_eq!(decls[0].kind, DeclKind::Interface);
    assert_eq!(decls[0].superclass, None);
    assert_eq!(
        decls[0].interfaces,
        vec![b.parameterized("Left", [b.variable("T", "Both")]), b.concrete("Right")]
    );
}

#[test]
fn test_class_cannot_extend_two_types() {
    let b = BoxBuilder::new();
    let err = parse_catalog(b, "class C extends A, B { }").unwrap_err();
    assert!(matches!(err, CatalogError::Parse { ref message, .. } if message.contains("only one")));
}

#[test]
fn test_interface_cannot_implement() {
    let b = BoxBuilder::new();
    let err = parse_catalog(b, "interface I implements J { }").unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn test_keywords_are_not_names() {
    let b = BoxBuilder::new();
    assert!(parse_catalog(b, "class class { }").is_err());
    // A keyword prefix is still a name
    let decls = parse_catalog(b, "class newer { field classes: String; }").unwrap();
    assert_eq!(decls[0].name.as_ref(), "newer");
}

#[test]
fn test_parse_error_span_points_at_problem() {
    let b = BoxBuilder::new();
    let source = "class A { field x String; }";
    let err = parse_catalog(b, source).unwrap_err();
    let CatalogError::Parse { span, message } = err else {
        panic!("expected a parse error");
    };
    assert!(span.0.start >= source.find("field").unwrap(), "{span:?}");
    assert!(span.0.end <= source.len());
    assert!(message.starts_with("expected"), "{message}");
}

#[test]
fn test_declaration_span_is_recorded() {
    let b = BoxBuilder::new();
    let source = "class A { }\nclass B { }";
    let decls = parse_catalog(b, source).unwrap();
    let span = decls[1].span.clone().unwrap();
    assert_eq!(&source[span.0], "class B { }");
}

#[test]
fn test_empty_catalog() {
    let b = BoxBuilder::new();
    assert!(parse_catalog(b, "  // nothing here\n").unwrap().is_empty());
}
