#![allow(dead_code)]

use ombu_types::{RecordDecl, TypeTable, VariantDecl, ty};
use ombu_values::{CallError, CodeTable, Cons, Heap, Program, Value};

/// Declarations and code shared by the integration tests.
pub fn program() -> Program {
    let mut types = TypeTable::new();
    types
        .add_record(
            RecordDecl::new("Point")
                .field("x", ty!(Number))
                .field("y", ty!(Number)),
        )
        .unwrap();
    types
        .add_record(
            RecordDecl::new("Node")
                .field("name", ty!(Str))
                .mutable_field("links", ty!(List[@"Node"])),
        )
        .unwrap();
    types
        .add_variant(
            VariantDecl::new("Tree")
                .params(1)
                .case("Leaf", [])
                .case("Branch", [ty!([a] => @"Tree"[a]), ty!([a] => a), ty!([a] => @"Tree"[a])]),
        )
        .unwrap();
    types
        .add_variant(
            VariantDecl::new("Shape")
                .case("Empty", [])
                .case("Circle", [ty!(Number)])
                .case("Rect", [ty!(@"Point"), ty!(@"Point")]),
        )
        .unwrap();
    types
        .add_record(
            RecordDecl::new("Sketch")
                .field("title", ty!(Str))
                .field("outline", ty!(@"Shape"))
                .field("anchor", ty!(Tuple(@"Point", @"Shape"))),
        )
        .unwrap();
    // `Nest` wraps a `Nested[List[a]]`, so each level adds a list.
    types
        .add_variant(
            VariantDecl::new("Nested")
                .params(1)
                .case("Flat", [ty!([a] => a)])
                .case("Nest", [ty!([a] => @"Nested"[List[a]])]),
        )
        .unwrap();
    types.validate().unwrap();

    let mut code = CodeTable::new();
    code.register("greeting", 0, 1, greeting).unwrap();
    code.register("add", 1, 1, add).unwrap();

    Program::new(types, code)
}

fn greeting<'a>(
    _heap: &Heap<'a>,
    captures: &[Value<'a>],
    _args: &[Value<'a>],
) -> Result<Value<'a>, CallError> {
    Ok(captures.first().copied().unwrap_or(Value::Unit))
}

fn add<'a>(
    _heap: &Heap<'a>,
    captures: &[Value<'a>],
    args: &[Value<'a>],
) -> Result<Value<'a>, CallError> {
    let sum = captures[0].as_i64().unwrap() + args[0].as_i64().unwrap();
    Ok(Value::int(sum))
}

pub fn point<'a>(program: &'a Program, heap: &Heap<'a>, x: i64, y: i64) -> Value<'a> {
    let shape = program.types.record_named("Point").unwrap();
    heap.record(shape, &[Value::int(x), Value::int(y)]).unwrap()
}

/// `Branch(left, item, right)` or `Leaf`.
pub fn tree<'a>(program: &'a Program, heap: &Heap<'a>, items: &[i64]) -> Value<'a> {
    let shape = program.types.variant_named("Tree").unwrap();
    let Some((mid, rest)) = items.split_first() else {
        return heap.variant(shape, 0, &[]).unwrap();
    };
    let (left, right) = rest.split_at(rest.len() / 2);
    let left = tree(program, heap, left);
    let right = tree(program, heap, right);
    heap.variant(shape, 1, &[left, Value::int(*mid), right]).unwrap()
}

pub fn first_cell<'a>(list: Value<'a>) -> &'a Cons<'a> {
    match list {
        Value::List(Some(cell)) => cell,
        other => panic!("expected a non-empty list, got {other:?}"),
    }
}
