//! Error types for mirror construction and document loading.

use typemirror_schema::DeclId;

/// The input document uses a shape there is no contract for.
///
/// This is the only hard failure of the resolution core. Every variant names
/// the declaration that owns the offending node or type descriptor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Raw kind value that maps to no mirror variant.
    #[error("declaration {id} has unsupported kind {kind}")]
    UnsupportedKind { id: DeclId, kind: u32 },

    /// Type descriptor tag that maps to no mirror variant.
    #[error("declaration {id} uses unsupported type descriptor `{tag}`")]
    UnsupportedType { id: DeclId, tag: String },

    /// `intrinsic` descriptor naming a type that is not a builtin.
    #[error("declaration {id} names unknown intrinsic type `{name}`")]
    UnknownIntrinsic { id: DeclId, name: String },

    /// Descriptor missing a field its tag requires.
    #[error("declaration {id} has a malformed `{tag}` type: {reason}")]
    MalformedType {
        id: DeclId,
        tag: String,
        reason: &'static str,
    },

    /// Caller asked for an id that is not in the registry.
    #[error("declaration {id} is not in the document")]
    UnknownDeclaration { id: DeclId },
}

impl SchemaError {
    /// The declaration the error is reported against.
    pub const fn decl_id(&self) -> DeclId {
        match self {
            Self::UnsupportedKind { id, .. }
            | Self::UnsupportedType { id, .. }
            | Self::UnknownIntrinsic { id, .. }
            | Self::MalformedType { id, .. }
            | Self::UnknownDeclaration { id } => *id,
        }
    }
}

/// Failure to turn JSON text into a reflector.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse TypeDoc JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MirrorResult<T> = Result<T, SchemaError>;
