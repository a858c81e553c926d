//! Type Resolver
//!
//! Turns declaration ids and raw type descriptors into mirror handles.
//!
//! 1. `intrinsic` resolves to the builtin singleton.
//! 2. `union`, `intersection`, `tuple`, literals and type parameters are
//!    interned by structure from their already-resolved parts.
//! 3. A `reference` whose target is registered resolves to the cached
//!    declaration mirror; with type arguments it becomes an interned
//!    application over that mirror, which is never mutated.
//! 4. A `reference` whose target is absent becomes an external reference.
//! 5. `array` (and the legacy `isArray` flag) normalizes to `Array<T>`.
//! 6. `reflection` produces a fresh, uncached literal mirror.
//!
//! Member types (property, parameter and variable types, signature return
//! types, alias targets, constraints) are not computed when a mirror is
//! created. They are filled into the mirror's compute-once slot on first
//! request by [`Reflector::resolved`].

use crate::error::{MirrorResult, SchemaError};
use crate::kind::{MirrorKind, TypeShape, classify_declaration, classify_type};
use crate::query_trace;
use crate::reflector::Reflector;
use crate::store::{MirrorData, MirrorId, MirrorKey, MirrorOrigin};
use std::sync::Arc;
use tracing::warn;
use typemirror_schema::{DeclFlags, DeclId, DeclNode, TypeDesc};

impl Reflector {
    // =========================================================================
    // Registry access
    // =========================================================================

    pub(crate) fn node(&self, decl: DeclId) -> MirrorResult<&DeclNode> {
        self.registry()
            .get(decl)
            .ok_or(SchemaError::UnknownDeclaration { id: decl })
    }

    pub(crate) fn record(&self, id: MirrorId) -> Arc<MirrorData> {
        self.store().record(id)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Cached mirror for a declaration.
    ///
    /// Only the kind is computed here; the shell is in the cache before any
    /// member of the declaration is looked at.
    pub(crate) fn mirror_for_decl(&self, decl: DeclId) -> MirrorResult<MirrorId> {
        let trace_enabled = query_trace::enabled();
        let query_id = trace_enabled.then(|| {
            let query_id = query_trace::next_query_id();
            query_trace::decl_start(query_id, "mirror_for_decl", decl);
            query_id
        });

        let classified = self.node(decl).and_then(classify_declaration);
        let kind = match classified {
            Ok(kind) => kind,
            Err(err) => {
                if let Some(query_id) = query_id {
                    query_trace::failed(query_id, "mirror_for_decl", decl);
                }
                return Err(err);
            }
        };

        let (id, cache_hit) = self.store().declaration(decl, kind);
        if let Some(query_id) = query_id {
            query_trace::end(query_id, "mirror_for_decl", id, cache_hit);
        }
        Ok(id)
    }

    /// Mirror for a member declaration, seen through `context` when the
    /// owner was reached via a generic application.
    pub(crate) fn member(&self, decl: DeclId, context: Option<MirrorId>) -> MirrorResult<MirrorId> {
        let Some(context) = context else {
            return self.mirror_for_decl(decl);
        };
        let kind = classify_declaration(self.node(decl)?)?;
        Ok(self.store().intern(MirrorKey::Member { decl, context }, kind).0)
    }

    // =========================================================================
    // Type descriptors
    // =========================================================================

    /// Resolve a type descriptor owned by declaration `owner`.
    pub(crate) fn resolve_type(&self, desc: &TypeDesc, owner: DeclId) -> MirrorResult<MirrorId> {
        let trace_enabled = query_trace::enabled();
        let query_id = trace_enabled.then(|| {
            let query_id = query_trace::next_query_id();
            query_trace::type_start(query_id, "resolve_type", owner, &desc.tag);
            query_id
        });

        let result = self.resolve_shape(desc, owner);
        if let Some(query_id) = query_id {
            match &result {
                Ok((id, cache_hit)) => query_trace::end(query_id, "resolve_type", *id, *cache_hit),
                Err(err) => query_trace::failed(query_id, "resolve_type", err.decl_id()),
            }
        }
        result.map(|(id, _)| id)
    }

    fn resolve_shape(&self, desc: &TypeDesc, owner: DeclId) -> MirrorResult<(MirrorId, bool)> {
        let shape = classify_type(self.registry(), desc, owner)?;
        let store = self.store();

        match shape {
            TypeShape::Builtin(kind) => Ok((MirrorId::builtin(kind), true)),
            TypeShape::Reference {
                target,
                type_arguments,
                is_array,
            } => {
                let base = self.mirror_for_decl(target)?;
                let applied = if type_arguments.is_empty() {
                    (base, true)
                } else {
                    let args = self.resolve_all(type_arguments, owner)?;
                    let kind = self.record(base).kind;
                    store.intern(MirrorKey::Application { target: base, args }, kind)
                };
                Ok(if is_array {
                    self.array_of(applied.0)
                } else {
                    applied
                })
            }
            TypeShape::External {
                name,
                type_arguments,
                is_array,
            } => {
                let args = self.resolve_all(type_arguments, owner)?;
                let key = MirrorKey::External {
                    name: name.to_string(),
                    args,
                };
                let external = store.intern(key, MirrorKind::ExternalTypeReference);
                Ok(if is_array {
                    self.array_of(external.0)
                } else {
                    external
                })
            }
            TypeShape::Array(element) => {
                let element = self.resolve_type(element, owner)?;
                Ok(self.array_of(element))
            }
            TypeShape::Union(types) => {
                let types = self.resolve_all(types, owner)?;
                Ok(store.intern(MirrorKey::Union(types), MirrorKind::Union))
            }
            TypeShape::Intersection(types) => {
                let types = self.resolve_all(types, owner)?;
                Ok(store.intern(MirrorKey::Intersection(types), MirrorKind::Intersection))
            }
            TypeShape::Tuple(elements) => {
                let elements = self.resolve_all(elements, owner)?;
                Ok(store.intern(MirrorKey::Tuple(elements), MirrorKind::Tuple))
            }
            TypeShape::Reflection(decl) => {
                let kind = classify_declaration(self.node(decl)?)?;
                Ok((store.anonymous(decl, kind), false))
            }
            TypeShape::Literal(value) => {
                Ok(store.intern(MirrorKey::Literal(value), MirrorKind::Literal))
            }
            TypeShape::TypeParameter { name, constraint } => {
                let constraint = constraint
                    .map(|constraint| self.resolve_type(constraint, owner))
                    .transpose()?;
                let key = MirrorKey::TypeParameter {
                    name: name.to_string(),
                    constraint,
                };
                Ok(store.intern(key, MirrorKind::TypeParameter))
            }
        }
    }

    pub(crate) fn resolve_all(&self, descs: &[TypeDesc], owner: DeclId) -> MirrorResult<Vec<MirrorId>> {
        descs
            .iter()
            .map(|desc| self.resolve_type(desc, owner))
            .collect()
    }

    /// `T[]` is modelled as the external reference `Array<T>`.
    pub(crate) fn array_of(&self, element: MirrorId) -> (MirrorId, bool) {
        let key = MirrorKey::External {
            name: "Array".to_string(),
            args: vec![element],
        };
        self.store().intern(key, MirrorKind::ExternalTypeReference)
    }

    // =========================================================================
    // Compute-once slots
    // =========================================================================

    /// The mirror's primary type, computed on first request and memoized.
    ///
    /// `None` for variants that have no such type (containers, unions, ...)
    /// and for type parameters without a constraint.
    pub(crate) fn resolved(&self, id: MirrorId) -> MirrorResult<Option<MirrorId>> {
        let data = self.record(id);
        if let Some(resolved) = data.resolved.get() {
            return Ok(Some(*resolved));
        }

        let Some(computed) = self.compute_resolved(id, &data)? else {
            return Ok(None);
        };
        // Concurrent callers compute the same value; the first write wins.
        Ok(Some(*data.resolved.get_or_init(|| computed)))
    }

    fn compute_resolved(&self, id: MirrorId, data: &MirrorData) -> MirrorResult<Option<MirrorId>> {
        match &data.origin {
            MirrorOrigin::Builtin(_) => Ok(None),
            MirrorOrigin::Declaration(decl) | MirrorOrigin::Anonymous(decl) => {
                self.declared_type(*decl, data.kind)
            }
            MirrorOrigin::Interned(MirrorKey::Member { decl, context }) => {
                let Some(declared) = self.declared_type(*decl, data.kind)? else {
                    return Ok(None);
                };
                self.instantiate(declared, *context).map(Some)
            }
            MirrorOrigin::Interned(MirrorKey::Application { target, .. }) => {
                if self.record(*target).kind != MirrorKind::TypeAlias {
                    return Ok(None);
                }
                let Some(body) = self.resolved(*target)? else {
                    return Ok(None);
                };
                // The application itself is the substitution context.
                self.instantiate(body, id).map(Some)
            }
            MirrorOrigin::Interned(MirrorKey::TypeParameter { constraint, .. }) => Ok(*constraint),
            MirrorOrigin::Interned(_) => Ok(None),
        }
    }

    /// Resolve the type a declaration declares for itself.
    fn declared_type(&self, decl: DeclId, kind: MirrorKind) -> MirrorResult<Option<MirrorId>> {
        let node = self.node(decl)?;
        match kind {
            MirrorKind::Property | MirrorKind::Parameter | MirrorKind::Variable => {
                let resolved = match self.value_type_desc(node) {
                    Some((desc, owner)) => self.resolve_type(desc, owner)?,
                    None => MirrorId::ANY,
                };
                if kind == MirrorKind::Property {
                    self.check_optionality(node, resolved);
                }
                Ok(Some(resolved))
            }
            MirrorKind::Signature => match &node.ty {
                Some(desc) => self.resolve_type(desc, decl).map(Some),
                None => Ok(Some(MirrorId::ANY)),
            },
            MirrorKind::TypeAlias => match &node.ty {
                Some(desc) => self.resolve_type(desc, decl).map(Some),
                None => Ok(Some(MirrorId::ANY)),
            },
            MirrorKind::TypeParameter => node
                .ty
                .as_ref()
                .map(|desc| self.resolve_type(desc, decl))
                .transpose(),
            _ => Ok(None),
        }
    }

    /// The descriptor holding a property's value type.
    ///
    /// Accessors carry it on the getter, or on the setter's sole parameter.
    fn value_type_desc<'a>(&'a self, node: &'a DeclNode) -> Option<(&'a TypeDesc, DeclId)> {
        if let Some(desc) = &node.ty {
            return Some((desc, node.id));
        }
        if let Some(getter) = self.registry().nodes(&node.get_signatures).next() {
            return getter.ty.as_ref().map(|desc| (desc, getter.id));
        }
        let setter = self.registry().nodes(&node.set_signatures).next()?;
        let value = self.registry().nodes(&setter.parameters).next()?;
        value.ty.as_ref().map(|desc| (desc, value.id))
    }

    /// True when `id` is a union whose first branch is `undefined`.
    pub(crate) fn starts_with_undefined(&self, id: MirrorId) -> bool {
        matches!(
            &self.record(id).origin,
            MirrorOrigin::Interned(MirrorKey::Union(types)) if types.first() == Some(&MirrorId::UNDEFINED)
        )
    }

    fn check_optionality(&self, node: &DeclNode, resolved: MirrorId) {
        let flagged = node.flags.contains(DeclFlags::OPTIONAL);
        let shaped = self.starts_with_undefined(resolved);
        if flagged != shaped {
            warn!(
                decl_id = node.id.0,
                name = %node.name,
                flagged,
                undefined_first = shaped,
                "optional flag disagrees with union shape"
            );
        }
    }
}
