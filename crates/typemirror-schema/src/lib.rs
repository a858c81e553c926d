//! Wire model and declaration registry for TypeDoc JSON documents.
//!
//! This crate owns everything that touches the producer's raw shape:
//! - Serde wire types for the document (`JsonReflection`, `JsonType`, ...)
//! - The producer's kind/flag vocabulary (`ReflectionKind`, `DeclFlags`)
//! - Comment normalization across both TypeDoc comment layouts
//! - The flat `NodeRegistry` (declaration id -> raw node), built once
//!
//! Nothing here interprets what a declaration *means*; classification and
//! resolution live in the `typemirror` crate.

// Declaration identifiers
pub mod id;
pub use id::DeclId;

// Serde wire model of the TypeDoc document
pub mod json;
pub use json::{
    JsonBlockTag, JsonComment, JsonCommentPart, JsonCommentTag, JsonFlags, JsonReflection,
    JsonSource, JsonType, parse_document,
};

// Producer vocabulary: reflection kinds and modifier flags
pub mod kind;
pub use kind::{DeclFlags, ReflectionKind};

// Normalized comment blocks
pub mod comment;
pub use comment::{Comment, CommentTag};

// Flat id -> node arena
pub mod registry;
pub use registry::{DeclNode, NodeRegistry, SourceRef, TypeDesc};
