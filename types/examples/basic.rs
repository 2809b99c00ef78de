//! Basic example demonstrating both ArenaBuilder and BoxBuilder.
//!
//! Run with: cargo run --example basic

use bumpalo::Bump;
use generis_types::{
    ArenaBuilder, BoxBuilder, TyDisplay, TypeBuilder, TypeVisitor, VariableCollector, convert_ty,
    types_equal,
};

fn main() {
    println!("=== Generis Types Example ===\n");

    // Example 1: Using BoxBuilder (simple, Rc-based)
    println!("1. BoxBuilder (reference counting):");
    let box_builder = BoxBuilder::new();

    let string = box_builder.concrete("String");
    let elem = box_builder.variable("E", "List");
    let list = box_builder.parameterized("List", [elem.clone()]);
    let bounded = box_builder.parameterized(
        "List",
        [box_builder.wildcard([], [box_builder.concrete("Number")])],
    );

    println!("   String: {}", string.display(box_builder));
    println!("   List<E>: {}", list.display(box_builder));
    println!("   List<? extends Number>: {}", bounded.display(box_builder));
    println!(
        "   String[] (nominal): {}",
        box_builder.array_of(string).display(box_builder)
    );
    println!(
        "   E[] (generic): {}",
        box_builder.array_of(elem).display(box_builder)
    );

    // Example 2: Using ArenaBuilder (arena allocation)
    println!("\n2. ArenaBuilder (arena allocation):");
    let arena = Bump::new();
    let arena_builder = ArenaBuilder::new(&arena);

    let map = arena_builder.parameterized(
        "Map",
        [
            arena_builder.variable("K", "Map"),
            arena_builder.variable("V", "Map"),
        ],
    );
    println!("   Map<K, V>: {}", map.display(arena_builder));

    // Example 3: Using the visitor pattern
    println!("\n3. Visitor Pattern - Collecting variables:");
    let mut collector = VariableCollector::default();
    collector.visit_ty(map, arena_builder);
    println!("   Variables in Map<K, V>: {:?}", collector.names());

    // Example 4: Moving a type between builders
    println!("\n4. Cross-builder conversion:");
    let boxed_map = convert_ty(map, arena_builder, box_builder);
    println!(
        "   Structurally equal after conversion: {}",
        types_equal(map, arena_builder, boxed_map, box_builder)
    );

    println!("\n=== Example Complete ===");
}
