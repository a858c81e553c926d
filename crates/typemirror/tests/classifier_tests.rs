use super::*;
use serde_json::json;
use typemirror_schema::JsonReflection;

fn registry(document: Value) -> NodeRegistry {
    let document: JsonReflection = serde_json::from_value(document).expect("valid document");
    NodeRegistry::build(document)
}

fn single(kind: u32, extra: Value) -> NodeRegistry {
    let mut node = json!({ "id": 1, "name": "node", "kind": kind });
    if let (Some(node), Value::Object(extra)) = (node.as_object_mut(), extra) {
        node.extend(extra);
    }
    registry(json!({ "id": 0, "name": "root", "kind": 0, "children": [node] }))
}

fn classify(kind: u32) -> MirrorResult<MirrorKind> {
    let registry = single(kind, json!({}));
    classify_declaration(registry.get(DeclId(1)).expect("registered"))
}

fn desc(value: Value) -> TypeDesc {
    let document = registry(json!({
        "id": 0, "name": "root", "kind": 0,
        "children": [{ "id": 1, "name": "holder", "kind": 32, "type": value }]
    }));
    document
        .get(DeclId(1))
        .and_then(|node| node.ty.clone())
        .expect("descriptor recorded")
}

fn shape_of(registry: &NodeRegistry, value: Value) -> MirrorResult<String> {
    let desc = desc(value);
    classify_type(registry, &desc, DeclId(1)).map(|shape| format!("{shape:?}"))
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn test_classify_declaration_table() {
    let cases = [
        (1, MirrorKind::Module),
        (2, MirrorKind::Namespace),
        (4, MirrorKind::Enum),
        (16, MirrorKind::EnumMember),
        (32, MirrorKind::Variable),
        (64, MirrorKind::Callable),
        (128, MirrorKind::Class),
        (256, MirrorKind::Interface),
        (512, MirrorKind::Callable),
        (1024, MirrorKind::Property),
        (2048, MirrorKind::Callable),
        (4096, MirrorKind::Signature),
        (8192, MirrorKind::Signature),
        (16384, MirrorKind::Signature),
        (32768, MirrorKind::Parameter),
        (65536, MirrorKind::InterfaceLiteral),
        (131072, MirrorKind::TypeParameter),
        (262144, MirrorKind::Property),
        (524288, MirrorKind::Signature),
        (1048576, MirrorKind::Signature),
        (2097152, MirrorKind::InterfaceLiteral),
        (4194304, MirrorKind::TypeAlias),
        (8388608, MirrorKind::Property),
    ];

    for (raw, expected) in cases {
        assert_eq!(classify(raw), Ok(expected), "kind {raw}");
    }
}

#[test]
fn test_type_literal_with_only_signatures_is_callable() {
    let callable = single(
        65536,
        json!({ "signatures": [{ "id": 2, "name": "__call", "kind": 4096 }] }),
    );
    let node = callable.get(DeclId(1)).expect("registered");
    assert_eq!(classify_declaration(node), Ok(MirrorKind::Callable));

    let mixed = single(
        65536,
        json!({
            "signatures": [{ "id": 2, "name": "__call", "kind": 4096 }],
            "children": [{ "id": 3, "name": "x", "kind": 1024 }]
        }),
    );
    let node = mixed.get(DeclId(1)).expect("registered");
    assert_eq!(classify_declaration(node), Ok(MirrorKind::InterfaceLiteral));

    let empty = single(65536, json!({}));
    let node = empty.get(DeclId(1)).expect("registered");
    assert_eq!(classify_declaration(node), Ok(MirrorKind::InterfaceLiteral));
}

#[test]
fn test_kind_wins_over_structure() {
    // an empty class is still a class
    assert_eq!(classify(128), Ok(MirrorKind::Class));

    // an interface-shaped literal is never an interface
    let literal = single(
        65536,
        json!({ "children": [{ "id": 2, "name": "a", "kind": 1024 }] }),
    );
    let node = literal.get(DeclId(1)).expect("registered");
    assert_eq!(classify_declaration(node), Ok(MirrorKind::InterfaceLiteral));
}

#[test]
fn test_unknown_kinds_are_rejected() {
    for raw in [0, 8, 384, 1 << 30] {
        assert_eq!(
            classify(raw),
            Err(SchemaError::UnsupportedKind { id: DeclId(1), kind: raw }),
            "kind {raw}"
        );
    }
}

#[test]
fn test_mirror_kind_predicates() {
    assert!(MirrorKind::Class.is_complex());
    assert!(MirrorKind::Enum.is_complex());
    assert!(MirrorKind::Module.is_complex());
    assert!(!MirrorKind::TypeAlias.is_complex());
    assert!(!MirrorKind::Union.is_complex());
    assert!(!MirrorKind::Builtin(BuiltinKind::String).is_complex());

    assert!(MirrorKind::InterfaceLiteral.is_interface_like());
    assert!(!MirrorKind::Enum.is_interface_like());
    assert!(MirrorKind::Namespace.is_container());
    assert!(MirrorKind::TypeAlias.is_named_type());
    assert!(!MirrorKind::Callable.is_named_type());

    assert_eq!(MirrorKind::ExternalTypeReference.to_string(), "external type reference");
}

// =============================================================================
// Type descriptors
// =============================================================================

#[test]
fn test_classify_intrinsics() {
    let registry = NodeRegistry::default();

    for kind in BuiltinKind::ALL {
        let shape = shape_of(&registry, json!({ "type": "intrinsic", "name": kind.name() }));
        assert_eq!(shape, Ok(format!("Builtin({kind:?})")));
    }

    assert_eq!(
        shape_of(&registry, json!({ "type": "intrinsic", "name": "float" })),
        Err(SchemaError::UnknownIntrinsic {
            id: DeclId(1),
            name: "float".to_string()
        })
    );
    assert_eq!(
        shape_of(&registry, json!({ "type": "intrinsic" })).map_err(|err| err.to_string()),
        Err("declaration #1 has a malformed `intrinsic` type: missing name".to_string())
    );
}

#[test]
fn test_reference_inside_and_outside_document() {
    let document = single(256, json!({}));

    let internal = desc(json!({ "type": "reference", "name": "node", "id": 1 }));
    match classify_type(&document, &internal, DeclId(1)) {
        Ok(TypeShape::Reference { target, is_array, .. }) => {
            assert_eq!(target, DeclId(1));
            assert!(!is_array);
        }
        other => panic!("expected reference, got {other:?}"),
    }

    // ids that are not in the document behave like unresolved references
    let dangling = desc(json!({ "type": "reference", "name": "Gone", "id": 77, "isArray": true }));
    match classify_type(&document, &dangling, DeclId(1)) {
        Ok(TypeShape::External { name, is_array, .. }) => {
            assert_eq!(name, "Gone");
            assert!(is_array);
        }
        other => panic!("expected external, got {other:?}"),
    }

    let external = desc(json!({
        "type": "reference",
        "name": "Promise",
        "typeArguments": [{ "type": "intrinsic", "name": "void" }]
    }));
    match classify_type(&document, &external, DeclId(1)) {
        Ok(TypeShape::External { name, type_arguments, .. }) => {
            assert_eq!(name, "Promise");
            assert_eq!(type_arguments.len(), 1);
        }
        other => panic!("expected external, got {other:?}"),
    }
}

#[test]
fn test_structural_tags() {
    let registry = NodeRegistry::default();
    let string = json!({ "type": "intrinsic", "name": "string" });

    let union = desc(json!({ "type": "union", "types": [string, string] }));
    assert!(matches!(
        classify_type(&registry, &union, DeclId(1)),
        Ok(TypeShape::Union(types)) if types.len() == 2
    ));

    let intersection = desc(json!({ "type": "intersection", "types": [string] }));
    assert!(matches!(
        classify_type(&registry, &intersection, DeclId(1)),
        Ok(TypeShape::Intersection(types)) if types.len() == 1
    ));

    let tuple = desc(json!({ "type": "tuple", "elements": [string, string, string] }));
    assert!(matches!(
        classify_type(&registry, &tuple, DeclId(1)),
        Ok(TypeShape::Tuple(elements)) if elements.len() == 3
    ));

    let array = desc(json!({ "type": "array", "elementType": string }));
    assert!(matches!(
        classify_type(&registry, &array, DeclId(1)),
        Ok(TypeShape::Array(element)) if element.tag == "intrinsic"
    ));

    let parameter = desc(json!({ "type": "typeParameter", "name": "T", "constraint": string }));
    assert!(matches!(
        classify_type(&registry, &parameter, DeclId(1)),
        Ok(TypeShape::TypeParameter { name: "T", constraint: Some(_) })
    ));

    assert_eq!(
        shape_of(&registry, json!({ "type": "array" })),
        Err(SchemaError::MalformedType {
            id: DeclId(1),
            tag: "array".to_string(),
            reason: "missing elementType"
        })
    );
}

#[test]
fn test_reflection_registers_declaration() {
    let document = registry(json!({
        "id": 0, "name": "root", "kind": 0,
        "children": [{
            "id": 1, "name": "holder", "kind": 32,
            "type": {
                "type": "reflection",
                "declaration": { "id": 2, "name": "__type", "kind": 65536 }
            }
        }]
    }));
    let holder = document.get(DeclId(1)).expect("registered");
    let desc = holder.ty.as_ref().expect("typed");

    assert!(matches!(
        classify_type(&document, desc, holder.id),
        Ok(TypeShape::Reflection(DeclId(2)))
    ));
    assert_eq!(document.get(DeclId(2)).and_then(|node| node.parent), Some(DeclId(1)));
}

#[test]
fn test_unknown_tag_names_the_owner() {
    let registry = NodeRegistry::default();

    let err = shape_of(&registry, json!({ "type": "conditional" })).expect_err("unsupported");
    assert_eq!(
        err,
        SchemaError::UnsupportedType {
            id: DeclId(1),
            tag: "conditional".to_string()
        }
    );
    assert_eq!(err.decl_id(), DeclId(1));
}

// =============================================================================
// Literals
// =============================================================================

#[test]
fn test_literal_descriptors() {
    let registry = NodeRegistry::default();
    let literal = |value: Value| {
        let desc = desc(value);
        match classify_type(&registry, &desc, DeclId(1)) {
            Ok(TypeShape::Literal(value)) => value,
            other => panic!("expected literal, got {other:?}"),
        }
    };

    assert_eq!(
        literal(json!({ "type": "stringLiteral", "value": "idle" })),
        LiteralValue::String("idle".to_string())
    );
    assert_eq!(
        literal(json!({ "type": "literal", "value": 42 })),
        LiteralValue::Number("42".to_string())
    );
    assert_eq!(
        literal(json!({ "type": "literal", "value": false })),
        LiteralValue::Boolean(false)
    );
    assert_eq!(literal(json!({ "type": "literal", "value": null })), LiteralValue::Null);
    assert_eq!(
        literal(json!({ "type": "literal", "value": { "negative": true, "value": "12" } })),
        LiteralValue::BigInt("-12".to_string())
    );
}

#[test]
fn test_literal_source_text() {
    assert_eq!(LiteralValue::String("say \"hi\"".to_string()).to_source(), r#""say \"hi\"""#);
    assert_eq!(LiteralValue::Number("1.5".to_string()).to_source(), "1.5");
    assert_eq!(LiteralValue::Boolean(true).to_source(), "true");
    assert_eq!(LiteralValue::BigInt("10".to_string()).to_source(), "10n");
    assert_eq!(LiteralValue::Null.to_string(), "null");

    assert_eq!(LiteralValue::from_json(&json!([1, 2])), None);
    assert_eq!(LiteralValue::from_json(&json!({ "negative": false })), None);
}

#[test]
fn test_builtin_names_round_trip() {
    for kind in BuiltinKind::ALL {
        assert_eq!(BuiltinKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(BuiltinKind::from_name("String"), None);
    assert_eq!(BuiltinKind::ALL[BuiltinKind::Null as usize], BuiltinKind::Null);
}
