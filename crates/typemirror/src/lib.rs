//! Typed reflection mirrors over TypeDoc JSON.
//!
//! [`Reflector`] is built once from a TypeDoc document and answers structural
//! questions about the declarations in it: which properties a class has and
//! what their types are, whether a type is a union and what its branches are,
//! what an alias stands for. Every answer is a [`Mirror`], a typed handle into
//! a lazily-populated, memoizing store.
//!
//! ```ignore
//! let reflector = Reflector::from_json_str(&text)?;
//! let graph = &reflector.find_classes_by_name("PipelineGraph")?[0];
//! let props = graph.describe_property("props")?.expect("declared");
//! assert_eq!(props.ty()?.name(), "Props");
//! ```
//!
//! # Guarantees
//!
//! - Resolving the same declaration twice yields the same mirror.
//! - Builtins (`string`, `void`, ...) are one singleton each per reflector.
//! - Resolution terminates on cyclic declaration graphs.
//! - The only hard failure is [`SchemaError`]: the document uses a kind or
//!   type shape there is no mirror variant for.

pub mod error;
pub mod format;
mod instantiate;
pub mod kind;
pub mod mirror;
mod query_trace;
pub mod reflector;
mod resolve;
pub mod store;

pub use error::{LoadError, MirrorResult, SchemaError};
pub use format::TypeFormatter;
pub use kind::{BuiltinKind, LiteralValue, MirrorKind};
pub use mirror::{
    BuiltinMirror, CallableMirror, EnumMemberMirror, EnumMirror, ExternalTypeReferenceMirror,
    InterfaceMirror, IntersectionMirror, LiteralMirror, Mirror, ModuleMirror, ParameterMirror,
    PropertyMirror, SignatureMirror, TupleMirror, TypeAliasMirror, TypeParameterMirror,
    UnionMirror, VariableMirror, Visibility,
};
pub use reflector::{OptionalityMismatch, Reflector};
pub use store::MirrorId;
pub use typemirror_schema::{Comment, CommentTag, DeclId};
