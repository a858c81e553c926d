//! Producer vocabulary: reflection kinds and modifier flags.
//!
//! TypeDoc encodes a declaration's kind as a single bit of `ReflectionKind`
//! and its modifiers as a bag of boolean flags. Both are captured here as
//! bitflags so that the classifier can check membership cheaply; mapping them
//! onto mirror variants is the classifier's job, not this module's.

use crate::JsonFlags;
use bitflags::bitflags;

bitflags! {
    /// Legacy TypeDoc `ReflectionKind` bit values.
    ///
    /// | Value | Kind |
    /// |-------|------|
    /// | 0 | Global (project root, no bit set) |
    /// | 1 | External module (one per source file) |
    /// | 2 | Module (`namespace`) |
    /// | 4 | Enum |
    /// | 16 | Enum member |
    /// | 65536 | Type literal (`__type`) |
    /// | 4194304 | Type alias |
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ReflectionKind: u32 {
        const EXTERNAL_MODULE = 1;
        const MODULE = 1 << 1;
        const ENUM = 1 << 2;
        const ENUM_MEMBER = 1 << 4;
        const VARIABLE = 1 << 5;
        const FUNCTION = 1 << 6;
        const CLASS = 1 << 7;
        const INTERFACE = 1 << 8;
        const CONSTRUCTOR = 1 << 9;
        const PROPERTY = 1 << 10;
        const METHOD = 1 << 11;
        const CALL_SIGNATURE = 1 << 12;
        const INDEX_SIGNATURE = 1 << 13;
        const CONSTRUCTOR_SIGNATURE = 1 << 14;
        const PARAMETER = 1 << 15;
        const TYPE_LITERAL = 1 << 16;
        const TYPE_PARAMETER = 1 << 17;
        const ACCESSOR = 1 << 18;
        const GET_SIGNATURE = 1 << 19;
        const SET_SIGNATURE = 1 << 20;
        const OBJECT_LITERAL = 1 << 21;
        const TYPE_ALIAS = 1 << 22;
        const EVENT = 1 << 23;

        const SOME_SIGNATURE = Self::CALL_SIGNATURE.bits()
            | Self::INDEX_SIGNATURE.bits()
            | Self::CONSTRUCTOR_SIGNATURE.bits()
            | Self::GET_SIGNATURE.bits()
            | Self::SET_SIGNATURE.bits();
        const SOME_CALLABLE = Self::FUNCTION.bits()
            | Self::METHOD.bits()
            | Self::CONSTRUCTOR.bits();
        const SOME_MEMBER = Self::PROPERTY.bits()
            | Self::ACCESSOR.bits()
            | Self::EVENT.bits();
        const SOME_LITERAL = Self::TYPE_LITERAL.bits() | Self::OBJECT_LITERAL.bits();
    }
}

impl ReflectionKind {
    /// Decode a raw kind value that names exactly one known kind.
    ///
    /// Returns `None` for `0` (the project root), for unknown bits and for
    /// values with more than one bit set.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::from_bits(raw).filter(|kind| kind.bits().count_ones() == 1)
    }

    /// Human-readable name, matching the producer's `kindString`.
    pub fn display_name(self) -> &'static str {
        KIND_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("Unknown", |(_, name)| *name)
    }
}

const KIND_NAMES: &[(ReflectionKind, &str)] = &[
    (ReflectionKind::EXTERNAL_MODULE, "External module"),
    (ReflectionKind::MODULE, "Module"),
    (ReflectionKind::ENUM, "Enumeration"),
    (ReflectionKind::ENUM_MEMBER, "Enumeration member"),
    (ReflectionKind::VARIABLE, "Variable"),
    (ReflectionKind::FUNCTION, "Function"),
    (ReflectionKind::CLASS, "Class"),
    (ReflectionKind::INTERFACE, "Interface"),
    (ReflectionKind::CONSTRUCTOR, "Constructor"),
    (ReflectionKind::PROPERTY, "Property"),
    (ReflectionKind::METHOD, "Method"),
    (ReflectionKind::CALL_SIGNATURE, "Call signature"),
    (ReflectionKind::INDEX_SIGNATURE, "Index signature"),
    (ReflectionKind::CONSTRUCTOR_SIGNATURE, "Constructor signature"),
    (ReflectionKind::PARAMETER, "Parameter"),
    (ReflectionKind::TYPE_LITERAL, "Type literal"),
    (ReflectionKind::TYPE_PARAMETER, "Type parameter"),
    (ReflectionKind::ACCESSOR, "Accessor"),
    (ReflectionKind::GET_SIGNATURE, "Get signature"),
    (ReflectionKind::SET_SIGNATURE, "Set signature"),
    (ReflectionKind::OBJECT_LITERAL, "Object literal"),
    (ReflectionKind::TYPE_ALIAS, "Type alias"),
    (ReflectionKind::EVENT, "Event"),
];

bitflags! {
    /// Declaration modifier flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeclFlags: u32 {
        const EXPORTED = 1;
        const OPTIONAL = 1 << 1;
        const REST = 1 << 2;
        const PRIVATE = 1 << 3;
        const PROTECTED = 1 << 4;
        const PUBLIC = 1 << 5;
        const STATIC = 1 << 6;
        const EXTERNAL = 1 << 7;
        const CONST = 1 << 8;
        const LET = 1 << 9;
        const READONLY = 1 << 10;
        const ABSTRACT = 1 << 11;
        const EXPORT_ASSIGNMENT = 1 << 12;
        const CONSTRUCTOR_PROPERTY = 1 << 13;
    }
}

impl DeclFlags {
    /// Convert the wire flag bag, returning unrecognized flags that are set.
    pub fn from_json(flags: &JsonFlags) -> (Self, Vec<String>) {
        let table = [
            (flags.is_exported, Self::EXPORTED),
            (flags.is_optional, Self::OPTIONAL),
            (flags.is_rest, Self::REST),
            (flags.is_private, Self::PRIVATE),
            (flags.is_protected, Self::PROTECTED),
            (flags.is_public, Self::PUBLIC),
            (flags.is_static, Self::STATIC),
            (flags.is_external, Self::EXTERNAL),
            (flags.is_const, Self::CONST),
            (flags.is_let, Self::LET),
            (flags.is_readonly, Self::READONLY),
            (flags.is_abstract, Self::ABSTRACT),
            (flags.is_export_assignment, Self::EXPORT_ASSIGNMENT),
            (flags.is_constructor_property, Self::CONSTRUCTOR_PROPERTY),
        ];

        let mut result = Self::empty();
        for (set, flag) in table {
            if set {
                result |= flag;
            }
        }

        let unrecognized = flags
            .other
            .iter()
            .filter(|(_, value)| value.as_bool() == Some(true))
            .map(|(name, _)| name.clone())
            .collect();

        (result, unrecognized)
    }
}
