//! Node Registry: a flat arena of raw declarations addressed by id.
//!
//! The producer nests declarations several ways (children, signatures,
//! parameters, type parameters, accessor/index signatures, and inline
//! `reflection` type descriptors). The registry walks all of them once and
//! flattens the tree: every node is stored by its [`DeclId`], nested nodes
//! are replaced by their ids, and inline type descriptors point at the id of
//! the declaration they carry.
//!
//! Nothing is interpreted here. Kinds stay raw numbers and type descriptor
//! tags stay raw strings; the registry is immutable once built.

use crate::{Comment, DeclFlags, DeclId, JsonReflection, JsonSource, JsonType};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

// =============================================================================
// Flattened records
// =============================================================================

/// A raw declaration with nested declarations replaced by ids.
#[derive(Clone, Debug, Default)]
pub struct DeclNode {
    pub id: DeclId,
    pub name: String,
    /// Raw `ReflectionKind` value, uninterpreted.
    pub kind: u32,
    pub kind_string: Option<String>,
    pub flags: DeclFlags,
    /// Declaration this node was nested in (`None` for the root).
    pub parent: Option<DeclId>,
    pub original_name: Option<String>,
    pub comment: Option<Comment>,
    pub children: Vec<DeclId>,
    pub signatures: Vec<DeclId>,
    pub parameters: Vec<DeclId>,
    pub type_parameters: Vec<DeclId>,
    pub index_signatures: Vec<DeclId>,
    pub get_signatures: Vec<DeclId>,
    pub set_signatures: Vec<DeclId>,
    pub ty: Option<TypeDesc>,
    pub default_value: Option<String>,
    pub extended_types: Vec<TypeDesc>,
    pub implemented_types: Vec<TypeDesc>,
    pub inherited_from: Option<TypeDesc>,
    pub sources: Vec<SourceRef>,
}

impl DeclNode {
    /// True when a non-empty comment is attached.
    pub fn has_comment(&self) -> bool {
        self.comment.as_ref().is_some_and(|comment| !comment.is_empty())
    }
}

/// A raw type descriptor whose inline declaration (if any) lives in the
/// registry under `declaration`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeDesc {
    /// Raw `type` discriminator.
    pub tag: String,
    pub name: Option<String>,
    /// Reference target, which may or may not be present in the registry.
    pub target: Option<DeclId>,
    pub type_arguments: Vec<TypeDesc>,
    pub types: Vec<TypeDesc>,
    pub element_type: Option<Box<TypeDesc>>,
    pub elements: Vec<TypeDesc>,
    pub declaration: Option<DeclId>,
    pub value: Option<Value>,
    pub is_array: bool,
    pub constraint: Option<Box<TypeDesc>>,
}

/// Source location of a declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceRef {
    pub file_name: String,
    pub line: u32,
    pub character: u32,
}

impl From<JsonSource> for SourceRef {
    fn from(source: JsonSource) -> Self {
        Self {
            file_name: source.file_name,
            line: source.line,
            character: source.character,
        }
    }
}

// =============================================================================
// NodeRegistry
// =============================================================================

type Pending = (JsonReflection, Option<DeclId>);

/// Flat, immutable `DeclId -> DeclNode` mapping in document order.
#[derive(Clone, Debug, Default)]
pub struct NodeRegistry {
    nodes: IndexMap<DeclId, DeclNode>,
}

impl NodeRegistry {
    /// Walk the whole document once and record every declaration by id.
    ///
    /// Traversal is pre-order, so `iter()` yields declarations in the order
    /// they appear in the document. A duplicate id keeps the first node.
    pub fn build(document: JsonReflection) -> Self {
        let mut nodes = IndexMap::new();
        let mut pending: Vec<Pending> = vec![(document, None)];
        let mut duplicates = 0usize;

        while let Some((reflection, parent)) = pending.pop() {
            let id = reflection.id;
            if nodes.contains_key(&id) {
                warn!(
                    id = id.0,
                    name = %reflection.name,
                    "NodeRegistry::build - duplicate declaration id, keeping first"
                );
                duplicates += 1;
                continue;
            }

            let mut nested = Vec::new();
            let node = lower_declaration(reflection, parent, &mut nested);
            nodes.insert(id, node);
            pending.extend(nested.into_iter().rev());
        }

        debug!(
            declarations = nodes.len(),
            duplicates, "NodeRegistry::build - registry complete"
        );
        Self { nodes }
    }

    /// The project root (the first node recorded).
    pub fn root(&self) -> Option<&DeclNode> {
        self.nodes.get_index(0).map(|(_, node)| node)
    }

    /// Look up a declaration by id.
    pub fn get(&self, id: DeclId) -> Option<&DeclNode> {
        self.nodes.get(&id)
    }

    /// Check if a declaration id is present.
    pub fn contains(&self, id: DeclId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All declarations in document order.
    pub fn iter(&self) -> impl Iterator<Item = &DeclNode> {
        self.nodes.values()
    }

    /// Resolve a list of ids (e.g. `node.children`) to nodes, skipping
    /// ids that were dropped as duplicates.
    pub fn nodes<'a>(&'a self, ids: &'a [DeclId]) -> impl Iterator<Item = &'a DeclNode> + 'a {
        ids.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Direct children of a declaration, in declared order.
    pub fn children_of(&self, id: DeclId) -> impl Iterator<Item = &DeclNode> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter_map(|child| self.nodes.get(child))
    }
}

// =============================================================================
// Lowering
// =============================================================================

fn lower_declaration(
    reflection: JsonReflection,
    parent: Option<DeclId>,
    nested: &mut Vec<Pending>,
) -> DeclNode {
    let JsonReflection {
        id,
        name,
        kind,
        kind_string,
        flags,
        original_name,
        comment,
        children,
        signatures,
        parameters,
        type_parameter,
        index_signature,
        get_signature,
        set_signature,
        ty,
        default_value,
        extended_types,
        implemented_types,
        inherited_from,
        sources,
    } = reflection;

    let (flags, unrecognized) = DeclFlags::from_json(&flags);
    if !unrecognized.is_empty() {
        debug!(id = id.0, flags = ?unrecognized, "ignoring unrecognized flags");
    }

    let children = enqueue(children, id, nested);
    let signatures = enqueue(signatures, id, nested);
    let parameters = enqueue(parameters, id, nested);
    let type_parameters = enqueue(type_parameter, id, nested);
    let index_signatures = enqueue(index_signature, id, nested);
    let get_signatures = enqueue(get_signature, id, nested);
    let set_signatures = enqueue(set_signature, id, nested);

    DeclNode {
        id,
        name,
        kind,
        kind_string,
        flags,
        parent,
        original_name,
        comment: comment.as_ref().map(Comment::from_json),
        children,
        signatures,
        parameters,
        type_parameters,
        index_signatures,
        get_signatures,
        set_signatures,
        ty: ty.map(|ty| lower_type(ty, id, nested)),
        default_value,
        extended_types: lower_types(extended_types, id, nested),
        implemented_types: lower_types(implemented_types, id, nested),
        inherited_from: inherited_from.map(|ty| lower_type(ty, id, nested)),
        sources: sources.into_iter().map(SourceRef::from).collect(),
    }
}

fn enqueue(items: Vec<JsonReflection>, parent: DeclId, nested: &mut Vec<Pending>) -> Vec<DeclId> {
    let ids = items.iter().map(|item| item.id).collect();
    nested.extend(items.into_iter().map(|item| (item, Some(parent))));
    ids
}

fn lower_types(types: Vec<JsonType>, owner: DeclId, nested: &mut Vec<Pending>) -> Vec<TypeDesc> {
    types
        .into_iter()
        .map(|ty| lower_type(ty, owner, nested))
        .collect()
}

fn lower_type(ty: JsonType, owner: DeclId, nested: &mut Vec<Pending>) -> TypeDesc {
    let declaration = ty.declaration.map(|declaration| {
        let id = declaration.id;
        nested.push((*declaration, Some(owner)));
        id
    });

    TypeDesc {
        tag: ty.tag,
        name: ty.name,
        target: ty.id,
        type_arguments: lower_types(ty.type_arguments, owner, nested),
        types: lower_types(ty.types, owner, nested),
        element_type: ty
            .element_type
            .map(|element| Box::new(lower_type(*element, owner, nested))),
        elements: lower_types(ty.elements, owner, nested),
        declaration,
        value: ty.value,
        is_array: ty.is_array,
        constraint: ty
            .constraint
            .map(|constraint| Box::new(lower_type(*constraint, owner, nested))),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[path = "../tests/registry_tests.rs"]
mod tests;
