use super::*;
use crate::mirror::{InterfaceMirror, Mirror};
use serde_json::{Value, json};
use typemirror_schema::DeclId;

fn type_parameter(name: &str) -> Value {
    json!({ "type": "typeParameter", "name": name })
}

fn reference(name: &str, id: u32, args: &[Value]) -> Value {
    json!({ "type": "reference", "name": name, "id": id, "typeArguments": args })
}

fn intrinsic(name: &str) -> Value {
    json!({ "type": "intrinsic", "name": name })
}

/// `Box<T>`, `Maybe<T> = undefined | T`, `identity<U extends string>` and a
/// `Holder` interface applying them.
fn generic_reflector() -> Reflector {
    let meta = json!({
        "id": 14, "name": "meta", "kind": 1024,
        "type": {
            "type": "reflection",
            "declaration": {
                "id": 15, "name": "__type", "kind": 65536,
                "children": [{ "id": 16, "name": "tag", "kind": 1024, "type": type_parameter("T") }]
            }
        }
    });
    let boxed = json!({
        "id": 10, "name": "Box", "kind": 256,
        "typeParameter": [{ "id": 11, "name": "T", "kind": 131072 }],
        "children": [
            { "id": 12, "name": "value", "kind": 1024, "type": type_parameter("T") },
            {
                "id": 13, "name": "items", "kind": 1024,
                "type": { "type": "array", "elementType": type_parameter("T") }
            },
            meta
        ]
    });
    let maybe = json!({
        "id": 20, "name": "Maybe", "kind": 4194304,
        "typeParameter": [{ "id": 21, "name": "T", "kind": 131072 }],
        "type": { "type": "union", "types": [intrinsic("undefined"), type_parameter("T")] }
    });
    let holder = json!({
        "id": 30, "name": "Holder", "kind": 256,
        "children": [
            { "id": 31, "name": "boxed", "kind": 1024, "type": reference("Box", 10, &[intrinsic("string")]) },
            { "id": 32, "name": "numbers", "kind": 1024, "type": reference("Box", 10, &[intrinsic("number")]) },
            { "id": 33, "name": "maybe", "kind": 1024, "type": reference("Maybe", 20, &[intrinsic("number")]) },
            { "id": 34, "name": "plain", "kind": 1024, "type": reference("Box", 10, &[]) },
            { "id": 35, "name": "again", "kind": 1024, "type": reference("Box", 10, &[intrinsic("string")]) }
        ]
    });
    let signature = json!({
        "id": 41, "name": "identity", "kind": 4096,
        "typeParameter": [{ "id": 42, "name": "U", "kind": 131072, "type": intrinsic("string") }],
        "parameters": [{ "id": 43, "name": "x", "kind": 32768, "type": type_parameter("U") }],
        "type": type_parameter("U")
    });
    let identity = json!({ "id": 40, "name": "identity", "kind": 64, "signatures": [signature] });

    let document = json!({
        "id": 0, "name": "project", "kind": 0,
        "children": [{
            "id": 1, "name": "\"generic\"", "kind": 1,
            "children": [boxed, maybe, holder, identity]
        }]
    });
    Reflector::from_value(document).expect("document loads")
}

fn interface(reflector: &Reflector, decl: u32) -> InterfaceMirror<'_> {
    reflector
        .mirror_for(DeclId(decl))
        .expect("classifies")
        .as_interface()
        .expect("interface")
}

fn property_type<'r>(owner: InterfaceMirror<'r>, name: &str) -> Mirror<'r> {
    owner
        .describe_property(name)
        .expect("lookup")
        .unwrap_or_else(|| panic!("property {name} declared"))
        .ty()
        .expect("type resolves")
}

#[test]
fn test_application_of_generic_interface() {
    let reflector = generic_reflector();
    let holder = interface(&reflector, 30);
    let generic = reflector.mirror_for(DeclId(10)).expect("classifies");

    let boxed = property_type(holder, "boxed");
    assert!(boxed.is_application());
    assert!(boxed.is_interface());
    assert_eq!(boxed.name(), "Box");
    assert_eq!(boxed.type_arguments(), [reflector.builtin_string()]);
    assert_eq!(boxed.generic_target(), generic);
    assert_ne!(boxed, generic);
    assert_eq!(boxed.decl_id(), Some(DeclId(10)));

    // no arguments: the declaration itself
    assert_eq!(property_type(holder, "plain"), generic);
    assert!(!generic.is_application());
    assert_eq!(generic.generic_target(), generic);
}

#[test]
fn test_equal_applications_share_identity() {
    let reflector = generic_reflector();
    let holder = interface(&reflector, 30);

    let boxed = property_type(holder, "boxed");
    assert_eq!(property_type(holder, "again"), boxed);
    assert_ne!(property_type(holder, "numbers"), boxed);
}

#[test]
fn test_members_see_type_arguments() {
    let reflector = generic_reflector();
    let holder = interface(&reflector, 30);

    let boxed = property_type(holder, "boxed").as_interface().expect("interface");
    assert_eq!(property_type(boxed, "value"), reflector.builtin_string());

    let items = property_type(boxed, "items");
    assert_eq!(items.name(), "Array");
    assert_eq!(items.type_arguments(), [reflector.builtin_string()]);

    let numbers = property_type(holder, "numbers").as_interface().expect("interface");
    assert_eq!(property_type(numbers, "value"), reflector.builtin_number());

    // same member, same application: same mirror
    let first = boxed.describe_property("value").expect("lookup");
    let second = boxed.describe_property("value").expect("lookup");
    assert_eq!(first, second);
}

#[test]
fn test_inline_literal_members_see_type_arguments() {
    let reflector = generic_reflector();
    let holder = interface(&reflector, 30);

    let boxed = property_type(holder, "boxed").as_interface().expect("interface");
    let meta = property_type(boxed, "meta");
    assert!(meta.is_interface_literal());
    let meta = meta.as_interface().expect("interface-like");
    assert_eq!(property_type(meta, "tag"), reflector.builtin_string());

    let numbers = property_type(holder, "numbers").as_interface().expect("interface");
    let meta = property_type(numbers, "meta").as_interface().expect("interface-like");
    assert_eq!(property_type(meta, "tag"), reflector.builtin_number());
}

#[test]
fn test_generic_declaration_is_never_mutated() {
    let reflector = generic_reflector();
    let holder = interface(&reflector, 30);

    // instantiate first, then look at the generic declaration
    let boxed = property_type(holder, "boxed").as_interface().expect("interface");
    assert_eq!(property_type(boxed, "value"), reflector.builtin_string());

    let generic = interface(&reflector, 10);
    let value = property_type(generic, "value");
    assert!(value.is_type_parameter());
    assert_eq!(value.name(), "T");

    let items = property_type(generic, "items");
    assert_eq!(items.type_arguments(), [value]);

    let params = generic.type_parameters().expect("type parameters");
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name(), "T");
    assert_eq!(params[0].constraint().expect("constraint"), None);
}

#[test]
fn test_alias_application_instantiates_body() {
    let reflector = generic_reflector();
    let holder = interface(&reflector, 30);

    let maybe = property_type(holder, "maybe");
    assert!(maybe.is_application());
    assert_eq!(maybe.display().expect("prints"), "Maybe<number>");

    let alias = maybe.as_type_alias().expect("alias");
    let body = alias.target_definition().expect("target");
    let union = body.as_union().expect("union");
    assert_eq!(
        union.types(),
        [reflector.builtin_undefined(), reflector.builtin_number()]
    );

    let generic = reflector
        .mirror_for(DeclId(20))
        .expect("classifies")
        .as_type_alias()
        .expect("alias");
    let generic_body = generic.target_definition().expect("target");
    assert_eq!(generic_body.display().expect("prints"), "undefined | T");
    assert_ne!(generic_body, body);
}

#[test]
fn test_signature_type_parameter_constraint() {
    let reflector = generic_reflector();
    let identity = reflector
        .mirror_for(DeclId(40))
        .expect("classifies")
        .as_callable()
        .expect("callable");

    let signature = identity.signatures().expect("signatures")[0];
    let params = signature.type_parameters().expect("type parameters");
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name(), "U");
    assert_eq!(
        params[0].constraint().expect("constraint"),
        Some(reflector.builtin_string())
    );

    let returns = signature.return_type().expect("return");
    assert!(returns.is_type_parameter());
    assert_eq!(returns.name(), "U");
    assert_eq!(
        signature.parameters().expect("parameters")[0].ty().expect("type"),
        returns
    );
}

#[test]
fn test_substitution_bindings() {
    let reflector = generic_reflector();
    let holder = interface(&reflector, 30);
    let boxed = property_type(holder, "boxed");

    let substitution = reflector.substitution(boxed.id()).expect("bindings");
    assert_eq!(substitution.get("T"), Some(MirrorId::STRING));
    assert_eq!(substitution.get("U"), None);

    // a plain declaration binds nothing
    let generic = reflector.mirror_for(DeclId(10)).expect("classifies");
    assert!(reflector.substitution(generic.id()).expect("bindings").is_empty());
    assert_eq!(
        reflector.instantiate(MirrorId::NUMBER, boxed.id()).expect("rewrites"),
        MirrorId::NUMBER
    );
}
