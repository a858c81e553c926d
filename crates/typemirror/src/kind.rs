//! Kind Classifier
//!
//! Maps the producer's kind/flag vocabulary onto the closed set of mirror
//! variants. Classification happens exactly once per declaration (when its
//! mirror shell is created) and once per type descriptor (when it is
//! resolved); everything downstream branches on [`MirrorKind`] and
//! [`TypeShape`] only, never on raw kinds or tags.
//!
//! # Declarations
//!
//! | Raw kind | Variant |
//! |----------|---------|
//! | External module | `Module` |
//! | Module | `Namespace` |
//! | Function, Method, Constructor | `Callable` |
//! | Property, Accessor, Event | `Property` |
//! | Call/Index/Constructor/Get/Set signature | `Signature` |
//! | Type literal, Object literal | `Callable` if it only has signatures, else `InterfaceLiteral` |
//! | anything else unknown | `SchemaError::UnsupportedKind` |
//!
//! The kind always wins over structure: a class with no members is still a
//! class, and an interface-shaped type literal is never an interface.

use crate::error::{MirrorResult, SchemaError};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use typemirror_schema::{DeclId, DeclNode, NodeRegistry, ReflectionKind, TypeDesc};

// =============================================================================
// BuiltinKind
// =============================================================================

/// Primitive types with no structure. One singleton mirror exists per kind.
///
/// The discriminant doubles as the reserved [`MirrorId`](crate::MirrorId)
/// of the singleton.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
#[repr(u32)]
pub enum BuiltinKind {
    Any = 0,
    Unknown = 1,
    Never = 2,
    Void = 3,
    Undefined = 4,
    Null = 5,
    String = 6,
    Number = 7,
    Boolean = 8,
    BigInt = 9,
    Symbol = 10,
    Object = 11,
    This = 12,
    True = 13,
    False = 14,
}

impl BuiltinKind {
    /// Every builtin, in discriminant order.
    pub const ALL: [Self; 15] = [
        Self::Any,
        Self::Unknown,
        Self::Never,
        Self::Void,
        Self::Undefined,
        Self::Null,
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::BigInt,
        Self::Symbol,
        Self::Object,
        Self::This,
        Self::True,
        Self::False,
    ];

    /// TypeScript spelling of the builtin.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Unknown => "unknown",
            Self::Never => "never",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Symbol => "symbol",
            Self::Object => "object",
            Self::This => "this",
            Self::True => "true",
            Self::False => "false",
        }
    }

    /// Parse an `intrinsic` descriptor name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for BuiltinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// MirrorKind
// =============================================================================

/// The closed set of mirror variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MirrorKind {
    /// One source file (TypeDoc "external module").
    Module,
    /// `namespace` inside a module.
    Namespace,
    Class,
    Interface,
    /// Anonymous inline structural type (`{ a: string }`).
    InterfaceLiteral,
    /// Function, method, constructor, or function-typed literal.
    Callable,
    Signature,
    Parameter,
    Property,
    Variable,
    Enum,
    EnumMember,
    TypeAlias,
    TypeParameter,
    Union,
    Intersection,
    Tuple,
    Literal,
    /// Reference to a declaration outside the document.
    ExternalTypeReference,
    Builtin(BuiltinKind),
}

impl MirrorKind {
    /// Structural types with members.
    pub const fn is_complex(self) -> bool {
        matches!(
            self,
            Self::Module
                | Self::Namespace
                | Self::Class
                | Self::Interface
                | Self::InterfaceLiteral
                | Self::Enum
        )
    }

    /// Variants that answer `propertyNames` / `describeProperty`.
    pub const fn is_interface_like(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::InterfaceLiteral)
    }

    /// Variants that contain top-level declarations.
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Module | Self::Namespace)
    }

    /// Variants that name a type (searchable by name).
    pub const fn is_named_type(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::TypeAlias
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::InterfaceLiteral => "interface literal",
            Self::Callable => "callable",
            Self::Signature => "signature",
            Self::Parameter => "parameter",
            Self::Property => "property",
            Self::Variable => "variable",
            Self::Enum => "enum",
            Self::EnumMember => "enum member",
            Self::TypeAlias => "type alias",
            Self::TypeParameter => "type parameter",
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Tuple => "tuple",
            Self::Literal => "literal",
            Self::ExternalTypeReference => "external type reference",
            Self::Builtin(_) => "builtin",
        }
    }
}

impl fmt::Display for MirrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a raw declaration node.
pub fn classify_declaration(node: &DeclNode) -> MirrorResult<MirrorKind> {
    let unsupported = || SchemaError::UnsupportedKind {
        id: node.id,
        kind: node.kind,
    };
    let kind = ReflectionKind::from_raw(node.kind).ok_or_else(unsupported)?;

    if kind.intersects(ReflectionKind::SOME_SIGNATURE) {
        return Ok(MirrorKind::Signature);
    }
    if kind.intersects(ReflectionKind::SOME_CALLABLE) {
        return Ok(MirrorKind::Callable);
    }
    if kind.intersects(ReflectionKind::SOME_MEMBER) {
        return Ok(MirrorKind::Property);
    }
    if kind.intersects(ReflectionKind::SOME_LITERAL) {
        let only_signatures = !node.signatures.is_empty() && node.children.is_empty();
        return Ok(if only_signatures {
            MirrorKind::Callable
        } else {
            MirrorKind::InterfaceLiteral
        });
    }

    DECLARATION_KINDS
        .iter()
        .find(|(raw, _)| *raw == kind)
        .map(|(_, variant)| *variant)
        .ok_or_else(unsupported)
}

/// Kinds that map one-to-one onto a variant.
const DECLARATION_KINDS: [(ReflectionKind, MirrorKind); 10] = [
    (ReflectionKind::EXTERNAL_MODULE, MirrorKind::Module),
    (ReflectionKind::MODULE, MirrorKind::Namespace),
    (ReflectionKind::ENUM, MirrorKind::Enum),
    (ReflectionKind::ENUM_MEMBER, MirrorKind::EnumMember),
    (ReflectionKind::VARIABLE, MirrorKind::Variable),
    (ReflectionKind::CLASS, MirrorKind::Class),
    (ReflectionKind::INTERFACE, MirrorKind::Interface),
    (ReflectionKind::PARAMETER, MirrorKind::Parameter),
    (ReflectionKind::TYPE_PARAMETER, MirrorKind::TypeParameter),
    (ReflectionKind::TYPE_ALIAS, MirrorKind::TypeAlias),
];

// =============================================================================
// Literal values
// =============================================================================

/// Value of a literal type. Numbers keep their source text so the value is
/// hashable and prints exactly as declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(String),
    Number(String),
    Boolean(bool),
    BigInt(String),
    Null,
}

impl LiteralValue {
    /// Decode a descriptor `value`.
    ///
    /// Bigints arrive either as text or as `{ negative, value }`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(flag) => Some(Self::Boolean(*flag)),
            Value::Number(number) => Some(Self::Number(number.to_string())),
            Value::String(text) => Some(Self::String(text.clone())),
            Value::Object(fields) => {
                let digits = fields.get("value")?.as_str()?;
                let negative = fields
                    .get("negative")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let sign = if negative { "-" } else { "" };
                Some(Self::BigInt(format!("{sign}{digits}")))
            }
            Value::Array(_) => None,
        }
    }

    /// TypeScript source spelling: strings are double-quoted and escaped.
    pub fn to_source(&self) -> String {
        match self {
            Self::String(text) => Value::String(text.clone()).to_string(),
            Self::Number(text) => text.clone(),
            Self::Boolean(flag) => flag.to_string(),
            Self::BigInt(text) => format!("{text}n"),
            Self::Null => "null".to_string(),
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_source())
    }
}

// =============================================================================
// TypeShape
// =============================================================================

/// Classified view of a type descriptor.
#[derive(Clone, Debug)]
pub enum TypeShape<'a> {
    Builtin(BuiltinKind),
    /// Reference whose target is in the registry.
    Reference {
        target: DeclId,
        type_arguments: &'a [TypeDesc],
        is_array: bool,
    },
    /// Reference whose target is outside the document.
    External {
        name: &'a str,
        type_arguments: &'a [TypeDesc],
        is_array: bool,
    },
    Array(&'a TypeDesc),
    Union(&'a [TypeDesc]),
    Intersection(&'a [TypeDesc]),
    Tuple(&'a [TypeDesc]),
    /// Inline anonymous declaration.
    Reflection(DeclId),
    Literal(LiteralValue),
    TypeParameter {
        name: &'a str,
        constraint: Option<&'a TypeDesc>,
    },
}

/// Classify a type descriptor owned by declaration `owner`.
///
/// The registry is consulted only to decide whether a reference target is
/// part of the document.
pub fn classify_type<'a>(
    registry: &NodeRegistry,
    desc: &'a TypeDesc,
    owner: DeclId,
) -> MirrorResult<TypeShape<'a>> {
    let malformed = |reason: &'static str| SchemaError::MalformedType {
        id: owner,
        tag: desc.tag.clone(),
        reason,
    };

    match desc.tag.as_str() {
        "intrinsic" => {
            let name = desc.name.as_deref().ok_or_else(|| malformed("missing name"))?;
            BuiltinKind::from_name(name)
                .map(TypeShape::Builtin)
                .ok_or_else(|| SchemaError::UnknownIntrinsic {
                    id: owner,
                    name: name.to_string(),
                })
        }
        "reference" => match desc.target.filter(|target| registry.contains(*target)) {
            Some(target) => Ok(TypeShape::Reference {
                target,
                type_arguments: &desc.type_arguments,
                is_array: desc.is_array,
            }),
            None => Ok(TypeShape::External {
                name: desc.name.as_deref().ok_or_else(|| malformed("missing name"))?,
                type_arguments: &desc.type_arguments,
                is_array: desc.is_array,
            }),
        },
        "array" => desc
            .element_type
            .as_deref()
            .map(TypeShape::Array)
            .ok_or_else(|| malformed("missing elementType")),
        "union" => Ok(TypeShape::Union(&desc.types)),
        "intersection" => Ok(TypeShape::Intersection(&desc.types)),
        "tuple" => Ok(TypeShape::Tuple(&desc.elements)),
        "reflection" => {
            let declaration = desc
                .declaration
                .ok_or_else(|| malformed("missing declaration"))?;
            Ok(TypeShape::Reflection(declaration))
        }
        "stringLiteral" => {
            let text = desc
                .value
                .as_ref()
                .and_then(Value::as_str)
                .ok_or_else(|| malformed("missing string value"))?;
            Ok(TypeShape::Literal(LiteralValue::String(text.to_string())))
        }
        "literal" => match &desc.value {
            // serde maps `"value": null` to an absent value
            None => Ok(TypeShape::Literal(LiteralValue::Null)),
            Some(value) => LiteralValue::from_json(value)
                .map(TypeShape::Literal)
                .ok_or_else(|| malformed("unsupported literal value")),
        },
        "typeParameter" => {
            let name = desc.name.as_deref().ok_or_else(|| malformed("missing name"))?;
            Ok(TypeShape::TypeParameter {
                name,
                constraint: desc.constraint.as_deref(),
            })
        }
        _ => Err(SchemaError::UnsupportedType {
            id: owner,
            tag: desc.tag.clone(),
        }),
    }
}

#[cfg(test)]
#[path = "../tests/classifier_tests.rs"]
mod tests;
