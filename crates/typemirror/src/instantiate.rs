//! Generic instantiation: substituting an application's type arguments.
//!
//! A member reached through `Box<string>` is resolved against the generic
//! declaration `Box<T>` and then rewritten with `T := string`. Structural
//! mirrors are rebuilt through the intern table, so the rewritten type has
//! the same identity as the equivalent type written out by hand. The
//! generic declaration and its cached members are never touched.

use crate::error::MirrorResult;
use crate::kind::MirrorKind;
use crate::reflector::Reflector;
use crate::store::{MirrorId, MirrorKey, MirrorOrigin};
use rustc_hash::FxHashMap;

/// Type-parameter bindings of one application.
#[derive(Clone, Debug, Default)]
pub(crate) struct Substitution {
    /// The application the bindings come from.
    context: Option<MirrorId>,
    bindings: FxHashMap<String, MirrorId>,
}

impl Substitution {
    pub(crate) fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn get(&self, name: &str) -> Option<MirrorId> {
        self.bindings.get(name).copied()
    }
}

impl Reflector {
    /// Bindings introduced by `context`.
    ///
    /// Parameters without an argument stay unbound and print as themselves.
    pub(crate) fn substitution(&self, context: MirrorId) -> MirrorResult<Substitution> {
        let MirrorOrigin::Interned(MirrorKey::Application { target, args }) =
            &self.record(context).origin
        else {
            return Ok(Substitution::default());
        };
        let Some(decl) = self.record(*target).origin.decl() else {
            return Ok(Substitution::default());
        };

        let node = self.node(decl)?;
        let bindings = self
            .registry()
            .nodes(&node.type_parameters)
            .zip(args.iter().copied())
            .map(|(param, arg)| (param.name.clone(), arg))
            .collect();
        Ok(Substitution {
            context: Some(context),
            bindings,
        })
    }

    /// Rewrite `id` under the bindings of `context`.
    pub(crate) fn instantiate(&self, id: MirrorId, context: MirrorId) -> MirrorResult<MirrorId> {
        let substitution = self.substitution(context)?;
        if substitution.is_empty() {
            return Ok(id);
        }
        self.substitute(id, &substitution)
    }

    fn substitute(&self, id: MirrorId, substitution: &Substitution) -> MirrorResult<MirrorId> {
        let data = self.record(id);
        let rebuilt = match &data.origin {
            MirrorOrigin::Builtin(_) => return Ok(id),
            MirrorOrigin::Declaration(decl) => {
                if data.kind != MirrorKind::TypeParameter {
                    return Ok(id);
                }
                let name = &self.node(*decl)?.name;
                return Ok(substitution.get(name).unwrap_or(id));
            }
            // Inline literals are viewed through the application so their
            // members see the same bindings.
            MirrorOrigin::Anonymous(decl) => match substitution.context {
                Some(context) => return self.member(*decl, Some(context)),
                None => return Ok(id),
            },
            MirrorOrigin::Interned(key) => match key {
                MirrorKey::TypeParameter { name, .. } => {
                    return Ok(substitution.get(name).unwrap_or(id));
                }
                MirrorKey::Literal(_) | MirrorKey::Member { .. } => return Ok(id),
                MirrorKey::Union(types) => MirrorKey::Union(self.substitute_all(types, substitution)?),
                MirrorKey::Intersection(types) => {
                    MirrorKey::Intersection(self.substitute_all(types, substitution)?)
                }
                MirrorKey::Tuple(elements) => {
                    MirrorKey::Tuple(self.substitute_all(elements, substitution)?)
                }
                MirrorKey::External { name, args } => MirrorKey::External {
                    name: name.clone(),
                    args: self.substitute_all(args, substitution)?,
                },
                MirrorKey::Application { target, args } => MirrorKey::Application {
                    target: *target,
                    args: self.substitute_all(args, substitution)?,
                },
            },
        };
        Ok(self.store().intern(rebuilt, data.kind).0)
    }

    fn substitute_all(&self, ids: &[MirrorId], substitution: &Substitution) -> MirrorResult<Vec<MirrorId>> {
        ids.iter()
            .map(|id| self.substitute(*id, substitution))
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/instantiate_tests.rs"]
mod tests;
