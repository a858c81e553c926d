//! Declaration identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a declaration node, as assigned by the producer.
///
/// Unique and stable within one document. The root project node is
/// conventionally `DeclId(0)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

impl DeclId {
    /// Id TypeDoc assigns to the project root.
    pub const ROOT: Self = Self(0);

    /// Retrieve the underlying integer value.
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
