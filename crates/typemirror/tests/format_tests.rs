use super::*;
use crate::{BuiltinKind, PropertyMirror};
use serde_json::json;
use typemirror_schema::DeclId;

const SAMPLE: &str = include_str!("fixtures/types-sample.json");

fn sample() -> Reflector {
    Reflector::from_json_str(SAMPLE).expect("fixture parses")
}

fn property(reflector: &Reflector, decl: u32) -> PropertyMirror<'_> {
    reflector
        .mirror_for(DeclId(decl))
        .expect("classifies")
        .as_property()
        .expect("property")
}

fn format_property(reflector: &Reflector, decl: u32) -> String {
    let ty = property(reflector, decl).ty().expect("type resolves");
    TypeFormatter::new(reflector).format(ty).expect("prints")
}

#[test]
fn test_format_builtins() {
    let reflector = sample();
    let formatter = TypeFormatter::new(&reflector);

    for kind in BuiltinKind::ALL {
        assert_eq!(formatter.format(reflector.builtin(kind)).expect("prints"), kind.name());
    }
}

#[test]
fn test_format_props_members() {
    let reflector = sample();

    assert_eq!(format_property(&reflector, 31), "string");
    assert_eq!(format_property(&reflector, 32), "LayoutInfo");
    assert_eq!(
        format_property(&reflector, 33),
        "undefined | ((nodeName: string, id: number) => void)"
    );
    assert_eq!(format_property(&reflector, 38), "any");
    assert_eq!(format_property(&reflector, 39), "StageInfo");
    assert_eq!(format_property(&reflector, 40), "StageInfo[]");
    assert_eq!(format_property(&reflector, 41), "Signal<TrafficState>");
}

#[test]
fn test_format_class_members() {
    let reflector = sample();

    assert_eq!(format_property(&reflector, 17), "{ [key: string]: ReactInstance }");
    assert_eq!(format_property(&reflector, 22), "SignalBinding[]");
    assert_eq!(format_property(&reflector, 198), "string");

    let graph = reflector.mirror_for(DeclId(11)).expect("classifies");
    let component = graph
        .as_class()
        .expect("class")
        .extended_types()
        .expect("extends")[0];
    assert_eq!(
        reflector.display_type(component).expect("prints"),
        "Component<Props, State>"
    );
    // named declarations print their name, never their members
    assert_eq!(reflector.display_type(graph).expect("prints"), "PipelineGraph");
}

#[test]
fn test_format_alias_target_object() {
    let reflector = sample();
    let alias = reflector
        .mirror_for(DeclId(102))
        .expect("classifies")
        .as_type_alias()
        .expect("alias");
    let target = alias.target_definition().expect("target");

    let text = target.display().expect("prints");
    assert!(text.starts_with("{ connectorStrokeWidth: number; "), "{text}");
    assert!(text.ends_with("; ypStart: number }"), "{text}");
    assert_eq!(text.matches(": number").count(), 10);
}

#[test]
fn test_format_callables() {
    let reflector = sample();

    let describe = reflector.mirror_for(DeclId(141)).expect("classifies");
    assert_eq!(
        describe.display().expect("prints"),
        "(x: number, y: number, radius: number, startAngle: number, endAngle: number) => string"
    );

    let layout = reflector.mirror_for(DeclId(51)).expect("classifies");
    assert_eq!(
        layout.display().expect("prints"),
        "(newStageNodes: StageInfo[], layout: LayoutInfo) => PositionedGraph"
    );
}

#[test]
fn test_format_wrapped_members_print_their_type() {
    let reflector = sample();

    let variable = reflector.mirror_for(DeclId(56)).expect("classifies");
    assert_eq!(variable.display().expect("prints"), "LayoutInfo");

    let param = reflector.mirror_for(DeclId(36)).expect("classifies");
    assert_eq!(param.display().expect("prints"), "string");
}

#[test]
fn test_format_structural_types() {
    let string = json!({ "type": "intrinsic", "name": "string" });
    let number = json!({ "type": "intrinsic", "name": "number" });
    let numbers = json!({ "type": "array", "elementType": number });

    let overloads = json!([
        {
            "id": 8, "name": "__call", "kind": 4096,
            "parameters": [{ "id": 9, "name": "x", "kind": 32768, "type": string }],
            "type": number
        },
        {
            "id": 10, "name": "__call", "kind": 4096,
            "parameters": [{ "id": 11, "name": "xs", "kind": 32768, "flags": { "isRest": true }, "type": numbers }],
            "type": number
        }
    ]);
    let bag = json!([
        { "id": 14, "name": "id", "kind": 1024, "flags": { "isReadonly": true }, "type": number },
        {
            "id": 15, "name": "note", "kind": 1024,
            "flags": { "isOptional": true },
            "type": { "type": "union", "types": [{ "type": "intrinsic", "name": "undefined" }, string] }
        },
        {
            "id": 16, "name": "touch", "kind": 2048,
            "signatures": [{ "id": 17, "name": "touch", "kind": 4096, "type": { "type": "intrinsic", "name": "void" } }]
        }
    ]);
    let members = json!([
        {
            "id": 2, "name": "nested", "kind": 1024,
            "type": {
                "type": "array",
                "elementType": { "type": "union", "types": [string, { "type": "intrinsic", "name": "null" }] }
            }
        },
        {
            "id": 3, "name": "pair", "kind": 1024,
            "type": {
                "type": "tuple",
                "elements": [{ "type": "stringLiteral", "value": "a" }, { "type": "literal", "value": 1 }]
            }
        },
        { "id": 4, "name": "empty", "kind": 1024, "type": { "type": "union", "types": [] } },
        { "id": 5, "name": "everything", "kind": 1024, "type": { "type": "intersection", "types": [] } },
        {
            "id": 6, "name": "overloaded", "kind": 1024,
            "type": {
                "type": "reflection",
                "declaration": { "id": 7, "name": "__type", "kind": 65536, "signatures": overloads }
            }
        },
        {
            "id": 12, "name": "bag", "kind": 1024,
            "type": {
                "type": "reflection",
                "declaration": { "id": 13, "name": "__type", "kind": 65536, "children": bag }
            }
        },
        {
            "id": 18, "name": "blank", "kind": 1024,
            "type": { "type": "reflection", "declaration": { "id": 19, "name": "__type", "kind": 65536 } }
        }
    ]);
    let reflector = Reflector::from_value(json!({
        "id": 0, "name": "p", "kind": 0,
        "children": [{ "id": 1, "name": "Shapes", "kind": 256, "children": members }]
    }))
    .expect("loads");

    assert_eq!(format_property(&reflector, 2), "(string | null)[]");
    assert_eq!(format_property(&reflector, 3), "[\"a\", 1]");
    assert_eq!(format_property(&reflector, 4), "never");
    assert_eq!(format_property(&reflector, 5), "unknown");
    assert_eq!(
        format_property(&reflector, 6),
        "{ (x: string): number; (...xs: number[]): number }"
    );
    assert_eq!(
        format_property(&reflector, 12),
        "{ readonly id: number; note?: undefined | string; touch(): void }"
    );
    assert_eq!(format_property(&reflector, 18), "{}");
}

#[test]
fn test_format_is_stable_on_cycles() {
    let reflector = sample();

    // StageInfo refers to itself through children and nextSibling
    let stage = reflector.mirror_for(DeclId(93)).expect("classifies");
    let children = property(&reflector, 94).ty().expect("type");
    assert_eq!(reflector.display_type(children).expect("prints"), "StageInfo[]");
    assert_eq!(reflector.display_type(stage).expect("prints"), "StageInfo");
}
