//! Reflector facade: the single entry point over one TypeDoc document.
//!
//! Construction parses the document and builds the node registry; no mirror
//! exists until a query asks for one. Queries take `&self` and the reflector
//! is `Send + Sync`, so one instance can serve concurrent readers.

use crate::error::{LoadError, MirrorResult};
use crate::format::TypeFormatter;
use crate::kind::{BuiltinKind, MirrorKind, classify_declaration};
use crate::mirror::{InterfaceMirror, Mirror, ModuleMirror, strip_module_quotes};
use crate::store::{MirrorId, MirrorStore};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info_span};
use typemirror_schema::{DeclFlags, DeclId, JsonReflection, NodeRegistry, parse_document};

/// Read-only reflection over one TypeDoc JSON document.
#[derive(Debug)]
pub struct Reflector {
    registry: NodeRegistry,
    store: MirrorStore,
}

/// A property whose `isOptional` flag disagrees with its union shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalityMismatch {
    pub decl_id: DeclId,
    /// `Owner.property`, or just the property name at the top level.
    pub path: String,
    /// The producer's `isOptional` flag.
    pub flagged: bool,
    /// Whether the resolved type is a union starting with `undefined`.
    pub undefined_first: bool,
}

impl Reflector {
    // =========================================================================
    // Construction
    // =========================================================================

    pub fn new(document: JsonReflection) -> Self {
        Self::from_registry(NodeRegistry::build(document))
    }

    pub fn from_registry(registry: NodeRegistry) -> Self {
        debug!(declarations = registry.len(), "Reflector::from_registry");
        Self {
            registry,
            store: MirrorStore::new(),
        }
    }

    /// Parse TypeDoc JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        Ok(Self::new(parse_document(text)?))
    }

    /// Build from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        Ok(Self::new(serde_json::from_value(value)?))
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub(crate) fn store(&self) -> &MirrorStore {
        &self.store
    }

    /// Number of mirrors materialized so far, builtins included.
    pub fn mirror_count(&self) -> usize {
        self.store.len()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Mirror for a declaration id. Repeated calls return the same mirror.
    pub fn mirror_for(&self, decl: DeclId) -> MirrorResult<Mirror<'_>> {
        self.mirror_for_decl(decl).map(|id| Mirror::new(self, id))
    }

    /// Mirror for a handle previously obtained from this reflector.
    pub fn mirror(&self, id: MirrorId) -> Option<Mirror<'_>> {
        self.store.contains(id).then(|| Mirror::new(self, id))
    }

    /// Top-level modules in document order.
    pub fn modules(&self) -> MirrorResult<Vec<ModuleMirror<'_>>> {
        let Some(root) = self.registry.root() else {
            return Ok(Vec::new());
        };
        let mut modules = Vec::new();
        for node in self.registry.nodes(&root.children) {
            if classify_declaration(node)? == MirrorKind::Module {
                modules.push(ModuleMirror(self.mirror_for(node.id)?));
            }
        }
        Ok(modules)
    }

    /// Names of all top-level modules, without the producer's quotes.
    pub fn module_names(&self) -> MirrorResult<Vec<&str>> {
        let Some(root) = self.registry.root() else {
            return Ok(Vec::new());
        };
        let mut names = Vec::new();
        for node in self.registry.nodes(&root.children) {
            if classify_declaration(node)? == MirrorKind::Module {
                names.push(strip_module_quotes(&node.name));
            }
        }
        Ok(names)
    }

    /// Module by name, with or without the producer's quotes.
    pub fn describe_module(&self, name: &str) -> MirrorResult<Option<ModuleMirror<'_>>> {
        let name = strip_module_quotes(name);
        let Some(root) = self.registry.root() else {
            return Ok(None);
        };
        for node in self.registry.nodes(&root.children) {
            if strip_module_quotes(&node.name) == name
                && classify_declaration(node)? == MirrorKind::Module
            {
                return self.mirror_for(node.id).map(|mirror| Some(ModuleMirror(mirror)));
            }
        }
        Ok(None)
    }

    /// Every class named exactly `name`, in document order.
    pub fn find_classes_by_name(&self, name: &str) -> MirrorResult<Vec<InterfaceMirror<'_>>> {
        let matches = self.find_declarations(name, |kind| kind == MirrorKind::Class)?;
        Ok(matches.into_iter().map(InterfaceMirror).collect())
    }

    /// Every class, interface, enum or type alias named exactly `name`.
    pub fn find_types_by_name(&self, name: &str) -> MirrorResult<Vec<Mirror<'_>>> {
        self.find_declarations(name, MirrorKind::is_named_type)
    }

    fn find_declarations(
        &self,
        name: &str,
        keep: impl Fn(MirrorKind) -> bool,
    ) -> MirrorResult<Vec<Mirror<'_>>> {
        let mut matches = Vec::new();
        // The project root is not a declaration mirror.
        let candidates = self
            .registry
            .iter()
            .filter(|node| node.parent.is_some() && node.name == name);
        for node in candidates {
            if keep(classify_declaration(node)?) {
                matches.push(self.mirror_for(node.id)?);
            }
        }
        Ok(matches)
    }

    // =========================================================================
    // Builtins
    // =========================================================================

    /// Singleton mirror of a builtin.
    pub fn builtin(&self, kind: BuiltinKind) -> Mirror<'_> {
        Mirror::new(self, MirrorId::builtin(kind))
    }

    pub fn builtin_any(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Any)
    }

    pub fn builtin_unknown(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Unknown)
    }

    pub fn builtin_never(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Never)
    }

    pub fn builtin_void(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Void)
    }

    pub fn builtin_undefined(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Undefined)
    }

    pub fn builtin_null(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Null)
    }

    pub fn builtin_string(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::String)
    }

    pub fn builtin_number(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Number)
    }

    pub fn builtin_boolean(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Boolean)
    }

    pub fn builtin_bigint(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::BigInt)
    }

    pub fn builtin_symbol(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Symbol)
    }

    pub fn builtin_object(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::Object)
    }

    pub fn builtin_this(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::This)
    }

    pub fn builtin_true(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::True)
    }

    pub fn builtin_false(&self) -> Mirror<'_> {
        self.builtin(BuiltinKind::False)
    }

    // =========================================================================
    // Formatting and whole-document passes
    // =========================================================================

    /// Render a mirror as TypeScript type syntax.
    pub fn display_type(&self, mirror: Mirror<'_>) -> MirrorResult<String> {
        TypeFormatter::new(self).format(mirror)
    }

    /// Build the mirror of every declaration below the root and resolve
    /// every type it declares. Returns the number of declarations visited.
    pub fn materialize_all(&self) -> MirrorResult<usize> {
        let _span = info_span!("materialize_all", declarations = self.registry.len()).entered();
        let mut visited = 0usize;
        for node in self.registry.iter().filter(|node| node.parent.is_some()) {
            let id = self.mirror_for_decl(node.id)?;
            self.resolved(id)?;
            Mirror::new(self, id).heritage()?;
            if let Some(inherited) = &node.inherited_from {
                self.resolve_type(inherited, node.id)?;
            }
            visited += 1;
        }
        debug!(visited, mirrors = self.store.len(), "materialize_all complete");
        Ok(visited)
    }

    /// Properties whose optional flag and union shape disagree, in
    /// document order.
    pub fn optionality_mismatches(&self) -> MirrorResult<Vec<OptionalityMismatch>> {
        let mut mismatches = Vec::new();
        for node in self.registry.iter().filter(|node| node.parent.is_some()) {
            if classify_declaration(node)? != MirrorKind::Property {
                continue;
            }
            let id = self.mirror_for_decl(node.id)?;
            let resolved = self.resolved(id)?.unwrap_or(MirrorId::ANY);
            let flagged = node.flags.contains(DeclFlags::OPTIONAL);
            let undefined_first = self.starts_with_undefined(resolved);
            if flagged != undefined_first {
                let owner = node
                    .parent
                    .and_then(|parent| self.registry.get(parent))
                    .filter(|parent| parent.parent.is_some());
                let path = match owner {
                    Some(owner) => format!("{}.{}", owner.name, node.name),
                    None => node.name.clone(),
                };
                mismatches.push(OptionalityMismatch {
                    decl_id: node.id,
                    path,
                    flagged,
                    undefined_first,
                });
            }
        }
        Ok(mismatches)
    }
}

macro_rules! facade_guards {
    ($($is:ident, $as:ident -> $view:ident;)*) => {
        impl Reflector {
            $(
                pub fn $is(&self, mirror: Mirror<'_>) -> bool {
                    mirror.$is()
                }

                pub fn $as<'r>(&self, mirror: Mirror<'r>) -> Option<crate::mirror::$view<'r>> {
                    mirror.$as()
                }
            )*
        }
    };
}

facade_guards! {
    is_module, as_module -> ModuleMirror;
    is_namespace, as_namespace -> ModuleMirror;
    is_class, as_class -> InterfaceMirror;
    is_interface, as_interface -> InterfaceMirror;
    is_interface_literal, as_interface_literal -> InterfaceMirror;
    is_enum, as_enum -> EnumMirror;
    is_enum_member, as_enum_member -> EnumMemberMirror;
    is_union, as_union -> UnionMirror;
    is_intersection, as_intersection -> IntersectionMirror;
    is_tuple, as_tuple -> TupleMirror;
    is_literal, as_literal -> LiteralMirror;
    is_callable, as_callable -> CallableMirror;
    is_signature, as_signature -> SignatureMirror;
    is_property, as_property -> PropertyMirror;
    is_parameter, as_parameter -> ParameterMirror;
    is_type_alias, as_type_alias -> TypeAliasMirror;
    is_type_parameter, as_type_parameter -> TypeParameterMirror;
    is_variable, as_variable -> VariableMirror;
    is_external_type_reference, as_external_type_reference -> ExternalTypeReferenceMirror;
    is_builtin, as_builtin -> BuiltinMirror;
}

#[cfg(test)]
#[path = "../tests/reflector_tests.rs"]
mod tests;
