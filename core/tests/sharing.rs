mod common;

use bumpalo::Bump;
use ombu_core::{inspect, marshal, unmarshal};
use ombu_values::{Heap, Value};
use pretty_assertions::assert_eq;

use common::{first_cell, point, program};

#[test]
fn shared_object_is_written_once() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    let p = point(&program, &heap, 1, 2);
    let value = heap.tuple(&[p, p, p]);

    let bytes = marshal(value);
    assert_eq!(ombu_core::header(&bytes).unwrap().object_count, 2);

    let back = unmarshal(&program, &heap, &bytes).unwrap();
    let items: Vec<_> = back.as_tuple().unwrap().iter().collect();
    assert_eq!(items[0].identity(), items[1].identity());
    assert_eq!(items[1].identity(), items[2].identity());
    assert_ne!(items[0].identity(), p.identity());
}

#[test]
fn equal_but_distinct_objects_stay_distinct() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    let value = heap.tuple(&[point(&program, &heap, 1, 2), point(&program, &heap, 1, 2)]);
    let back = unmarshal(&program, &heap, &marshal(value)).unwrap();

    let items = back.as_tuple().unwrap();
    assert_eq!(items.get(0), items.get(1));
    assert_ne!(items.get(0).unwrap().identity(), items.get(1).unwrap().identity());
}

#[test]
fn shared_list_tail() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    let tail = heap.list(&[Value::I32(2), Value::I32(3)]);
    let a = heap.list_with_tail(&[Value::I32(1)], Some(first_cell(tail)));
    let b = heap.list_with_tail(&[Value::I32(0)], Some(first_cell(tail)));
    let value = heap.tuple(&[a, b, tail]);

    let back = unmarshal(&program, &heap, &marshal(value)).unwrap();
    assert_eq!(back, value);

    let items = back.as_tuple().unwrap();
    let tail_of = |i: usize| first_cell(items.get(i).unwrap()).tail().map(|cell| cell.id());
    let shared = first_cell(items.get(2).unwrap()).id();
    assert_eq!(tail_of(0), Some(shared));
    assert_eq!(tail_of(1), Some(shared));
}

#[test]
fn many_lists_sharing_a_long_tail() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    let tail = heap.list(&vec![Value::Unit; 20_000]);
    let mut items = vec![tail];
    for i in 0..20_000u32 {
        items.push(heap.list_with_tail(&[Value::U32(i)], Some(first_cell(tail))));
    }
    let value = heap.tuple(&items);

    let back = unmarshal(&program, &heap, &marshal(value)).unwrap();
    let items = back.as_tuple().unwrap();
    let shared = first_cell(items.get(0).unwrap()).id();
    for i in 1..items.len() {
        let cell = first_cell(items.get(i).unwrap());
        assert_eq!(cell.tail().map(|cell| cell.id()), Some(shared));
    }
}

#[test]
fn list_tail_into_list_being_written() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    // The suffix is reached first as the tail of the outer list's own spine.
    let suffix = heap.list(&[Value::U8(9)]);
    let outer = heap.list_with_tail(&[Value::U8(1), suffix], Some(first_cell(suffix)));

    let back = unmarshal(&program, &heap, &marshal(outer)).unwrap();
    assert_eq!(back, outer);

    let cells: Vec<_> = first_cell(back).cells().collect();
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[1].head().identity(), Some(cells[2].id()));
}

#[test]
fn cycle_through_a_mutable_field() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    let shape = program.types.record_named("Node").unwrap();
    let node = heap.record(shape, &[heap.str("self"), Value::NIL]).unwrap();
    let links = heap.list(&[node, node, node]);
    node.as_record().unwrap().set_named("links", links).unwrap();

    let bytes = marshal(node);
    let back = unmarshal(&program, &heap, &bytes).unwrap();
    assert_eq!(back, node);

    let record = back.as_record().unwrap();
    assert_eq!(record.get_named("name").and_then(|v| v.as_str()), Some("self"));
    let links: Vec<_> = record.get_named("links").unwrap().as_list().unwrap().collect();
    assert_eq!(links.len(), 3);
    for link in links {
        assert_eq!(link.identity(), back.identity());
    }
}

#[test]
fn mutual_cycle() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    let shape = program.types.record_named("Node").unwrap();
    let a = heap.record(shape, &[heap.str("a"), Value::NIL]).unwrap();
    let b = heap.record(shape, &[heap.str("b"), heap.list(&[a])]).unwrap();
    a.as_record().unwrap().set_named("links", heap.list(&[b])).unwrap();

    fn next(node: Value<'_>) -> Value<'_> {
        let links = node.as_record().unwrap().get_named("links").unwrap();
        first_cell(links).head()
    }

    let back = unmarshal(&program, &heap, &marshal(a)).unwrap();
    let b_back = next(back);
    assert_eq!(b_back.as_record().unwrap().get_named("name").and_then(|v| v.as_str()), Some("b"));
    assert_eq!(next(b_back).identity(), back.identity());

    // Cycles are still listed as a finite token tree.
    assert!(inspect(&marshal(a)).is_ok());
}
