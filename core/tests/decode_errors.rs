mod common;

use bumpalo::Bump;
use ombu_core::{
    DecodeError, DecodeOptions, HeaderFault, Mismatch, PayloadFault, ShapeKey, inspect, marshal,
    unmarshal, unmarshal_prefix, unmarshal_with,
};
use ombu_values::{Heap, Program, Value};
use pretty_assertions::assert_eq;

use common::{point, program, tree};

fn decode(bytes: &[u8]) -> Result<(), DecodeError> {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);
    unmarshal(&program, &heap, bytes).map(|_| ())
}

/// Header for a payload of `len` bytes introducing `objects` objects.
fn framed(payload: &[u8], objects: u8) -> Vec<u8> {
    assert!(payload.len() < 0x80);
    let mut out = b"OMBU\x01".to_vec();
    out.push(payload.len() as u8);
    out.push(objects);
    out.extend_from_slice(payload);
    out
}

// =============================================================================
// Framing
// =============================================================================

#[test]
fn empty_input() {
    assert_eq!(decode(&[]), Err(DecodeError::EmptyInput));
}

#[test]
fn bad_magic() {
    assert_eq!(
        decode(b"NOPE\x01\x01\x00\x00"),
        Err(DecodeError::BadHeader(HeaderFault::Magic))
    );
    assert_eq!(decode(b"X"), Err(DecodeError::BadHeader(HeaderFault::Magic)));
}

#[test]
fn unsupported_version() {
    assert_eq!(
        decode(b"OMBU\x09\x01\x00\x00"),
        Err(DecodeError::BadHeader(HeaderFault::Version(9)))
    );
}

#[test]
fn wrong_object_count() {
    assert_eq!(
        decode(&framed(&[0x00], 5)),
        Err(DecodeError::BadHeader(HeaderFault::ObjectCount {
            declared: 5,
            actual: 0
        }))
    );
}

#[test]
fn trailing_bytes() {
    let mut bytes = marshal(Value::Unit);
    assert_eq!(bytes.len(), 8);
    bytes.push(0);
    assert_eq!(
        decode(&bytes),
        Err(DecodeError::TrailingBytes {
            offset: 8,
            remaining: 1
        })
    );

    let program = Program::default();
    let arena = Bump::new();
    let heap = Heap::new(&arena);
    let (value, consumed) =
        unmarshal_prefix(&DecodeOptions::default(), &program, &heap, &bytes).unwrap();
    assert!(matches!(value, Value::Unit));
    assert_eq!(consumed, 8);
}

#[test]
fn payload_shorter_than_declared() {
    // Declares one payload byte, then the token spills past it.
    let bytes = b"OMBU\x01\x01\x00\x04\x07\x00\x00\x00";
    assert!(matches!(decode(bytes), Err(DecodeError::UnexpectedEnd { offset: 8, .. })));
}

// =============================================================================
// Truncation
// =============================================================================

#[test]
fn truncated_string() {
    let arena = Bump::new();
    let heap = Heap::new(&arena);
    let bytes = marshal(heap.str("a string that does not fit in sixteen bytes"));

    assert!(matches!(
        decode(&bytes[..16]),
        Err(DecodeError::UnexpectedEnd { .. })
    ));
}

#[test]
fn truncated_at_every_prefix() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);
    let bytes = marshal(tree(&program, &heap, &[4, 2, 6, 1, 3, 5, 7]));
    assert!(bytes.len() > 64);

    assert!(matches!(
        decode(&bytes[..64]),
        Err(DecodeError::UnexpectedEnd { .. })
    ));
    for end in 1..bytes.len() {
        assert!(decode(&bytes[..end]).is_err(), "prefix of {end} bytes decoded");
    }
}

#[test]
fn oversized_lengths() {
    let huge_str = framed(&[0x0C, 0xFF, 0xFF, 0xFF, 0xFF], 0);
    assert!(matches!(decode(&huge_str), Err(DecodeError::UnexpectedEnd { .. })));

    let huge_tuple = framed(&[0x10, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F], 1);
    assert!(matches!(decode(&huge_tuple), Err(DecodeError::UnexpectedEnd { .. })));

    let huge_list = framed(&[0x12, 0xFF, 0xFF, 0x03, 0x13], 1);
    assert!(matches!(decode(&huge_list), Err(DecodeError::UnexpectedEnd { .. })));
}

#[test]
fn overlong_varint() {
    let payload = [0x17, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
    assert_eq!(
        decode(&framed(&payload, 0)),
        Err(DecodeError::InvalidVarint { offset: 8 })
    );
}

// =============================================================================
// Tokens
// =============================================================================

#[test]
fn unrecognized_tag() {
    assert_eq!(
        decode(&framed(&[0xFF], 0)),
        Err(DecodeError::UnrecognizedTag {
            tag: 0xFF,
            offset: 7
        })
    );
    assert!(matches!(
        decode(&framed(&[0x0A, 0x09], 0)),
        Err(DecodeError::UnrecognizedTag { tag: 0x09, .. })
    ));
}

#[test]
fn invalid_payloads() {
    let fault = |payload: &[u8]| match decode(&framed(payload, 0)) {
        Err(DecodeError::InvalidPayload { fault, .. }) => fault,
        other => panic!("expected an invalid payload, got {other:?}"),
    };

    assert_eq!(fault(&[0x01, 0x02]), PayloadFault::Bool(2));
    assert_eq!(fault(&[0x0B, 0x00, 0xD8, 0x00, 0x00]), PayloadFault::Char(0xD800));
    assert_eq!(fault(&[0x0C, 0x01, 0x00, 0x00, 0x00, 0xFF]), PayloadFault::Utf8);
    assert_eq!(fault(&[0x0A, 0x00, 0x07, 0x00]), PayloadFault::Sign(7));
    assert_eq!(
        fault(&[0x0A, 0x01, 0x00, 0x01, 0x01, 0x00, 0x00]),
        PayloadFault::ZeroDenominator
    );
}

#[test]
fn forward_back_reference() {
    assert_eq!(
        decode(&framed(&[0x17, 0x00], 0)),
        Err(DecodeError::InvalidBackReference {
            index: 0,
            introduced: 0,
            offset: 7
        })
    );
    // A tuple may refer to itself, but not to the object after it.
    assert!(decode(&framed(&[0x10, 0x01, 0x17, 0x00], 1)).is_ok());
    assert!(matches!(
        decode(&framed(&[0x10, 0x02, 0x17, 0x01, 0x10, 0x00], 2)),
        Err(DecodeError::InvalidBackReference { index: 1, introduced: 1, .. })
    ));
}

// =============================================================================
// Lists
// =============================================================================

/// Both the decoder and the inspector reject `bytes` with `expected`.
fn assert_rejected(bytes: &[u8], expected: DecodeError) {
    assert_eq!(decode(bytes), Err(expected.clone()));
    assert_eq!(inspect(bytes).map(|_| ()), Err(expected));
}

#[test]
fn list_tail_must_be_nil_or_reference() {
    assert_rejected(
        &framed(&[0x12, 0x01, 0x06, 0x01, 0x06, 0x02], 1),
        DecodeError::ShapeMismatch {
            offset: 11,
            detail: Mismatch::ListTail { tag: 0x06 },
        },
    );
}

#[test]
fn list_tail_must_be_a_cell() {
    assert_rejected(
        &framed(&[0x10, 0x01, 0x12, 0x01, 0x00, 0x17, 0x00], 2),
        DecodeError::ShapeMismatch {
            offset: 12,
            detail: Mismatch::TailTarget { index: 0 },
        },
    );
}

#[test]
fn list_without_cells() {
    assert!(matches!(
        decode(&framed(&[0x12, 0x00, 0x13], 0)),
        Err(DecodeError::ShapeMismatch {
            detail: Mismatch::EmptySpine,
            ..
        })
    ));
}

#[test]
fn list_tail_into_its_own_spine() {
    assert_rejected(
        &framed(&[0x12, 0x02, 0x00, 0x00, 0x17, 0x01], 2),
        DecodeError::ShapeMismatch {
            offset: 11,
            detail: Mismatch::CyclicSpine,
        },
    );
}

#[test]
fn list_tail_into_its_own_spine_through_another_list() {
    // The inner list's tail is the outer cell; the outer tail is the inner cell.
    assert_rejected(
        &framed(&[0x12, 0x01, 0x12, 0x01, 0x00, 0x17, 0x00, 0x17, 0x01], 2),
        DecodeError::ShapeMismatch {
            offset: 14,
            detail: Mismatch::CyclicSpine,
        },
    );
}

#[test]
fn list_tail_into_an_enclosing_list() {
    // Same shape as above, but the outer list ends at nil.
    let bytes = framed(&[0x12, 0x01, 0x12, 0x01, 0x00, 0x17, 0x00, 0x13], 2);
    assert_eq!(decode(&bytes), Ok(()));
    assert!(inspect(&bytes).is_ok());
}

// =============================================================================
// Program metadata
// =============================================================================

#[test]
fn unknown_shape() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);
    let value = point(&program, &heap, 1, 2);
    let id = value.as_record().unwrap().shape().id();

    let empty = Program::default();
    assert_eq!(
        unmarshal(&empty, &heap, &marshal(value)).map(|_| ()),
        Err(DecodeError::UnknownShape {
            shape: ShapeKey::Type(id),
            offset: 7
        })
    );
}

#[test]
fn field_count_disagrees() {
    let program = program();
    let id = program.types.record_named("Point").unwrap().id();

    let mut payload = vec![0x14];
    payload.extend_from_slice(&id.0.to_le_bytes());
    payload.extend_from_slice(&[0x01, 0x00]);
    assert_eq!(
        decode(&framed(&payload, 1)),
        Err(DecodeError::ShapeMismatch {
            offset: 7,
            detail: Mismatch::FieldCount {
                shape: id,
                expected: 2,
                found: 1
            }
        })
    );
}

#[test]
fn unknown_case() {
    let program = program();
    let id = program.types.variant_named("Shape").unwrap().id();

    let mut payload = vec![0x15];
    payload.extend_from_slice(&id.0.to_le_bytes());
    payload.extend_from_slice(&[0x09, 0x00]);
    assert!(matches!(
        decode(&framed(&payload, 1)),
        Err(DecodeError::ShapeMismatch {
            detail: Mismatch::UnknownCase { case: 9, .. },
            ..
        })
    ));
}

#[test]
fn closure_from_another_build() {
    let program = program();
    let arena = Bump::new();
    let heap = Heap::new(&arena);
    let entry = program.code.named("greeting").unwrap();
    let bytes = marshal(heap.closure(entry, &[Value::Unit]).unwrap());

    // Same index, different signature.
    let mut code = ombu_values::CodeTable::new();
    code.register("greeting", 1, 1, |_, _, _| Ok(Value::Unit)).unwrap();
    let other = Program::new(ombu_types::TypeTable::new(), code);

    assert!(matches!(
        unmarshal(&other, &heap, &bytes),
        Err(DecodeError::UnknownShape {
            shape: ShapeKey::Code { index: 0, .. },
            offset: 7
        })
    ));
}

// =============================================================================
// Limits
// =============================================================================

#[test]
fn depth_limit() {
    let program = Program::default();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    let mut value = Value::Unit;
    for _ in 0..10 {
        value = heap.tuple(&[value]);
    }
    let bytes = marshal(value);

    let options = DecodeOptions::default().with_max_depth(4);
    assert_eq!(
        unmarshal_with(&options, &program, &heap, &bytes).map(|_| ()),
        Err(DecodeError::DepthExceeded {
            limit: 4,
            offset: 15
        })
    );
    let options = DecodeOptions::default().with_max_depth(10);
    assert!(unmarshal_with(&options, &program, &heap, &bytes).is_ok());
}

#[test]
fn default_depth_limit_stops_hostile_nesting() {
    let payload: Vec<u8> = [0x10, 0x01].repeat(5000).into_iter().chain([0x00]).collect();
    let mut bytes = b"OMBU\x01".to_vec();
    ombu_core::wire::write_varint(&mut bytes, payload.len() as u64);
    ombu_core::wire::write_varint(&mut bytes, 5000);
    bytes.extend_from_slice(&payload);

    assert!(matches!(
        decode(&bytes),
        Err(DecodeError::DepthExceeded { limit: 4096, .. })
    ));
}

#[test]
fn object_limit() {
    let program = Program::default();
    let arena = Bump::new();
    let heap = Heap::new(&arena);

    let value = heap.tuple(&[heap.tuple(&[]), heap.tuple(&[])]);
    let bytes = marshal(value);

    let options = DecodeOptions::default().with_max_objects(2);
    assert!(matches!(
        unmarshal_with(&options, &program, &heap, &bytes),
        Err(DecodeError::ObjectLimit { limit: 2, .. })
    ));
    let options = DecodeOptions::default().with_max_objects(3);
    assert!(unmarshal_with(&options, &program, &heap, &bytes).is_ok());
}

#[test]
fn errors_display() {
    assert_eq!(
        DecodeError::UnrecognizedTag {
            tag: 0xFE,
            offset: 9
        }
        .to_string(),
        "unrecognized tag 0xfe at offset 9"
    );
    assert_eq!(
        DecodeError::ShapeMismatch {
            offset: 3,
            detail: Mismatch::EmptySpine
        }
        .to_string(),
        "shape mismatch at offset 3: list without cells"
    );
}
