//! Mirror Store: handle allocation, declaration cache, and structural interning.
//!
//! Every mirror is addressed by a [`MirrorId`]. Handles are allocated from an
//! append-only arena and never reused, so handle equality *is* mirror
//! identity for the lifetime of the store.
//!
//! ## Allocation
//!
//! | Origin | Cached by | Identity |
//! |--------|-----------|----------|
//! | Builtin | reserved id | one per primitive |
//! | Declaration | `DeclId` | one per declaration |
//! | Structural (union, tuple, ...) | [`MirrorKey`] | one per structure |
//! | Member in generic context | [`MirrorKey::Member`] | one per (member, application) |
//! | Anonymous literal | nothing | fresh per resolution |
//!
//! A declaration shell is inserted before anything about the declaration is
//! resolved. Member types live in the per-mirror [`MirrorData::resolved`]
//! slot and are computed later, so a type that refers back to its own
//! declaration finds the shell instead of recursing.

use crate::kind::{BuiltinKind, LiteralValue, MirrorKind};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxBuildHasher;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::trace;
use typemirror_schema::DeclId;

/// Global counter for assigning unique instance IDs to `MirrorStore` instances.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// MirrorId
// =============================================================================

/// Handle of one mirror inside a reflector.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MirrorId(pub u32);

impl MirrorId {
    pub const ANY: Self = Self(BuiltinKind::Any as u32);
    pub const UNKNOWN: Self = Self(BuiltinKind::Unknown as u32);
    pub const NEVER: Self = Self(BuiltinKind::Never as u32);
    pub const VOID: Self = Self(BuiltinKind::Void as u32);
    pub const UNDEFINED: Self = Self(BuiltinKind::Undefined as u32);
    pub const NULL: Self = Self(BuiltinKind::Null as u32);
    pub const STRING: Self = Self(BuiltinKind::String as u32);
    pub const NUMBER: Self = Self(BuiltinKind::Number as u32);
    pub const BOOLEAN: Self = Self(BuiltinKind::Boolean as u32);
    pub const BIGINT: Self = Self(BuiltinKind::BigInt as u32);
    pub const SYMBOL: Self = Self(BuiltinKind::Symbol as u32);
    pub const OBJECT: Self = Self(BuiltinKind::Object as u32);
    pub const THIS: Self = Self(BuiltinKind::This as u32);
    pub const TRUE: Self = Self(BuiltinKind::True as u32);
    pub const FALSE: Self = Self(BuiltinKind::False as u32);

    /// First id handed out for non-builtin mirrors.
    pub const FIRST_USER: u32 = BuiltinKind::ALL.len() as u32;

    /// Reserved handle of a builtin singleton.
    pub const fn builtin(kind: BuiltinKind) -> Self {
        Self(kind as u32)
    }

    pub const fn is_builtin(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

impl fmt::Debug for MirrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MirrorId({})", self.0)
    }
}

impl fmt::Display for MirrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

// =============================================================================
// Origins and keys
// =============================================================================

/// Structural identity of an interned mirror.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MirrorKey {
    Union(Vec<MirrorId>),
    Intersection(Vec<MirrorId>),
    Tuple(Vec<MirrorId>),
    Literal(LiteralValue),
    TypeParameter {
        name: String,
        constraint: Option<MirrorId>,
    },
    /// Reference to a declaration outside the document (`Array<T>` included).
    External { name: String, args: Vec<MirrorId> },
    /// A generic declaration applied to type arguments.
    Application { target: MirrorId, args: Vec<MirrorId> },
    /// A member declaration seen through a generic application.
    Member { decl: DeclId, context: MirrorId },
}

/// Where a mirror came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MirrorOrigin {
    Builtin(BuiltinKind),
    /// Cached per declaration id.
    Declaration(DeclId),
    /// Inline literal from a `reflection` descriptor; never cached.
    Anonymous(DeclId),
    Interned(MirrorKey),
}

impl MirrorOrigin {
    /// Declaration backing this mirror, if any.
    pub fn decl(&self) -> Option<DeclId> {
        match self {
            Self::Declaration(decl)
            | Self::Anonymous(decl)
            | Self::Interned(MirrorKey::Member { decl, .. }) => Some(*decl),
            _ => None,
        }
    }
}

/// Stored record of one mirror.
#[derive(Debug)]
pub struct MirrorData {
    pub kind: MirrorKind,
    pub origin: MirrorOrigin,
    /// Compute-once slot for the mirror's primary type: declared type of a
    /// property, parameter or variable, return type of a signature, alias
    /// target, or type-parameter constraint.
    pub resolved: OnceLock<MirrorId>,
    /// Compute-once slot for the `extends` and `implements` clauses.
    pub heritage: OnceLock<Heritage>,
}

impl MirrorData {
    fn new(kind: MirrorKind, origin: MirrorOrigin) -> Self {
        Self {
            kind,
            origin,
            resolved: OnceLock::new(),
            heritage: OnceLock::new(),
        }
    }
}

/// Resolved heritage clauses of a class or interface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Heritage {
    pub extended: Vec<MirrorId>,
    pub implemented: Vec<MirrorId>,
}

// =============================================================================
// MirrorStore
// =============================================================================

/// Thread-safe storage for mirrors.
///
/// The arena is append-only behind an `RwLock`; the declaration cache and
/// intern table are `DashMap`s whose entry API gives compute-once-per-key.
/// No lock is held while a type is being resolved.
pub struct MirrorStore {
    /// Unique instance ID for debugging.
    instance_id: u64,
    arena: RwLock<Vec<Arc<MirrorData>>>,
    by_decl: DashMap<DeclId, MirrorId, FxBuildHasher>,
    by_key: DashMap<MirrorKey, MirrorId, FxBuildHasher>,
}

impl Default for MirrorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MirrorStore {
    /// Create a store holding only the builtin singletons.
    pub fn new() -> Self {
        let instance_id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::SeqCst);
        trace!(instance_id, "MirrorStore::new - creating new instance");
        let builtins = BuiltinKind::ALL
            .into_iter()
            .map(|kind| {
                Arc::new(MirrorData::new(
                    MirrorKind::Builtin(kind),
                    MirrorOrigin::Builtin(kind),
                ))
            })
            .collect();
        Self {
            instance_id,
            arena: RwLock::new(builtins),
            by_decl: DashMap::default(),
            by_key: DashMap::default(),
        }
    }

    fn allocate(&self, kind: MirrorKind, origin: MirrorOrigin) -> MirrorId {
        let mut arena = self.arena.write().unwrap_or_else(PoisonError::into_inner);
        let id = MirrorId(arena.len() as u32);
        trace!(
            instance_id = self.instance_id,
            mirror_id = id.0,
            kind = %kind,
            "MirrorStore::allocate"
        );
        arena.push(Arc::new(MirrorData::new(kind, origin)));
        id
    }

    /// Cached mirror shell for a declaration, created on first request.
    ///
    /// Returns the handle and whether it was a cache hit.
    pub fn declaration(&self, decl: DeclId, kind: MirrorKind) -> (MirrorId, bool) {
        match self.by_decl.entry(decl) {
            Entry::Occupied(entry) => (*entry.get(), true),
            Entry::Vacant(entry) => {
                let id = self.allocate(kind, MirrorOrigin::Declaration(decl));
                entry.insert(id);
                (id, false)
            }
        }
    }

    /// Look up a declaration shell without creating it.
    pub fn cached_declaration(&self, decl: DeclId) -> Option<MirrorId> {
        self.by_decl.get(&decl).map(|entry| *entry)
    }

    /// Fresh, uncached mirror for an inline literal.
    pub fn anonymous(&self, decl: DeclId, kind: MirrorKind) -> MirrorId {
        self.allocate(kind, MirrorOrigin::Anonymous(decl))
    }

    /// Interned mirror for a structural key.
    ///
    /// Returns the handle and whether the structure already existed.
    pub fn intern(&self, key: MirrorKey, kind: MirrorKind) -> (MirrorId, bool) {
        if let Some(existing) = self.by_key.get(&key) {
            return (*existing, true);
        }
        match self.by_key.entry(key) {
            Entry::Occupied(entry) => (*entry.get(), true),
            Entry::Vacant(entry) => {
                let origin = MirrorOrigin::Interned(entry.key().clone());
                let id = self.allocate(kind, origin);
                entry.insert(id);
                (id, false)
            }
        }
    }

    /// Stored record for a handle.
    pub fn get(&self, id: MirrorId) -> Option<Arc<MirrorData>> {
        self.arena
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id.0 as usize)
            .cloned()
    }

    /// Stored record for a handle this store allocated.
    ///
    /// Handles are only minted by the store and never freed, so indexing
    /// cannot go out of bounds for ids reached through a reflector.
    pub(crate) fn record(&self, id: MirrorId) -> Arc<MirrorData> {
        let arena = self.arena.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&arena[id.0 as usize])
    }

    /// Check if a handle was allocated by this store.
    pub fn contains(&self, id: MirrorId) -> bool {
        (id.0 as usize) < self.len()
    }

    /// Number of mirrors, builtins included.
    pub fn len(&self) -> usize {
        self.arena
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if only builtins exist.
    pub fn is_empty(&self) -> bool {
        self.len() <= MirrorId::FIRST_USER as usize
    }

    /// Number of cached declaration mirrors.
    pub fn declaration_count(&self) -> usize {
        self.by_decl.len()
    }
}

impl fmt::Debug for MirrorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MirrorStore")
            .field("instance_id", &self.instance_id)
            .field("mirrors", &self.len())
            .field("declarations", &self.by_decl.len())
            .field("interned", &self.by_key.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../tests/store_tests.rs"]
mod tests;
