//! Serde wire model of the TypeDoc JSON document.
//!
//! The structs here mirror the producer's layout one-to-one and are only
//! consumed by [`NodeRegistry::build`](crate::NodeRegistry::build). Two
//! layout generations are accepted:
//!
//! | Field | Legacy | Newer |
//! |-------|--------|-------|
//! | reference target | `id` | `target` |
//! | type parameters | `typeParameter` | `typeParameters` |
//! | index signatures | `indexSignature` (array) | `indexSignature(s)` (object or array) |
//! | accessor signatures | `getSignature: [..]` | `getSignature: {..}` |
//! | comments | `shortText` / `text` / `tags` | `summary` / `blockTags` |
//! | arrays | `isArray: true` on a reference | `{ "type": "array" }` |
//!
//! Kind numbers always follow the legacy `ReflectionKind` numbering; see
//! [`ReflectionKind`](crate::ReflectionKind).

use crate::DeclId;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

// =============================================================================
// Declarations
// =============================================================================

/// One declaration node, with its nested declarations still inline.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReflection {
    pub id: DeclId,

    #[serde(default)]
    pub name: String,

    /// Raw `ReflectionKind` bit value. `0` is the project root.
    #[serde(default)]
    pub kind: u32,

    pub kind_string: Option<String>,

    #[serde(default)]
    pub flags: JsonFlags,

    /// Source path recorded for external modules.
    pub original_name: Option<String>,

    pub comment: Option<JsonComment>,

    #[serde(default)]
    pub children: Vec<JsonReflection>,

    #[serde(default)]
    pub signatures: Vec<JsonReflection>,

    #[serde(default)]
    pub parameters: Vec<JsonReflection>,

    #[serde(default, alias = "typeParameters")]
    pub type_parameter: Vec<JsonReflection>,

    #[serde(default, alias = "indexSignatures", deserialize_with = "one_or_many")]
    pub index_signature: Vec<JsonReflection>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub get_signature: Vec<JsonReflection>,

    #[serde(default, deserialize_with = "one_or_many")]
    pub set_signature: Vec<JsonReflection>,

    #[serde(rename = "type")]
    pub ty: Option<JsonType>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub default_value: Option<String>,

    #[serde(default)]
    pub extended_types: Vec<JsonType>,

    #[serde(default)]
    pub implemented_types: Vec<JsonType>,

    pub inherited_from: Option<JsonType>,

    #[serde(default)]
    pub sources: Vec<JsonSource>,
}

/// Modifier flags. Unknown flag names are kept in `other`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFlags {
    #[serde(default)]
    pub is_exported: bool,
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default)]
    pub is_rest: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_protected: bool,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_let: bool,
    #[serde(default)]
    pub is_readonly: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_export_assignment: bool,
    #[serde(default)]
    pub is_constructor_property: bool,

    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSource {
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub character: u32,
}

// =============================================================================
// Type descriptors
// =============================================================================

/// Inline type descriptor, discriminated by `type`.
///
/// Kept as a flat record rather than a tagged enum so that an unknown tag
/// survives deserialization and can be reported by the classifier against
/// the declaration that owns it.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonType {
    #[serde(rename = "type", default)]
    pub tag: String,

    pub name: Option<String>,

    #[serde(default, alias = "target", deserialize_with = "lenient_decl_id")]
    pub id: Option<DeclId>,

    #[serde(default)]
    pub type_arguments: Vec<JsonType>,

    #[serde(default)]
    pub types: Vec<JsonType>,

    pub element_type: Option<Box<JsonType>>,

    #[serde(default)]
    pub elements: Vec<JsonType>,

    pub declaration: Option<Box<JsonReflection>>,

    pub value: Option<Value>,

    #[serde(default)]
    pub is_array: bool,

    pub constraint: Option<Box<JsonType>>,
}

// =============================================================================
// Comments
// =============================================================================

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonComment {
    pub short_text: Option<String>,
    pub text: Option<String>,
    pub returns: Option<String>,
    #[serde(default)]
    pub tags: Vec<JsonCommentTag>,
    #[serde(default)]
    pub summary: Vec<JsonCommentPart>,
    #[serde(default)]
    pub block_tags: Vec<JsonBlockTag>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCommentTag {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub text: String,
    pub param_name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct JsonCommentPart {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct JsonBlockTag {
    #[serde(default)]
    pub tag: String,
    pub name: Option<String>,
    #[serde(default)]
    pub content: Vec<JsonCommentPart>,
}

// =============================================================================
// Entry points and lenient field helpers
// =============================================================================

/// Parse a TypeDoc JSON document from text.
pub fn parse_document(text: &str) -> serde_json::Result<JsonReflection> {
    serde_json::from_str(text)
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<JsonReflection>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<JsonReflection>),
        One(Box<JsonReflection>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![*item],
    })
}

/// `target` is a number for references but an object for type operators.
fn lenient_decl_id<'de, D>(deserializer: D) -> Result<Option<DeclId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|raw| u32::try_from(raw).ok())
        .map(DeclId))
}

/// Default values are strings in every known producer version, but keep
/// numbers and booleans readable if one shows up.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}
