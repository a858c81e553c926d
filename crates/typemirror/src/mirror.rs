//! Mirror views.
//!
//! A [`Mirror`] is a `(reflector, handle)` pair: cheap to copy, compared by
//! handle, and valid for as long as the reflector. Each variant has a view
//! newtype (`ModuleMirror`, `InterfaceMirror`, ...) obtained through the
//! `as_*` narrowing methods; views deref to [`Mirror`] so the base contract
//! is available everywhere.
//!
//! Members are always resolved through [`Mirror::child`], so a member of a
//! generic application is seen with the application's type arguments.

use crate::error::MirrorResult;
use crate::format::TypeFormatter;
use crate::kind::{
    BuiltinKind, LiteralValue, MirrorKind, TypeShape, classify_declaration, classify_type,
};
use crate::reflector::Reflector;
use crate::store::{Heritage, MirrorData, MirrorId, MirrorKey, MirrorOrigin};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use typemirror_schema::{Comment, DeclFlags, DeclId, DeclNode, TypeDesc};

// =============================================================================
// Mirror
// =============================================================================

/// Typed facade over one declaration or type descriptor.
#[derive(Clone, Copy)]
pub struct Mirror<'r> {
    reflector: &'r Reflector,
    id: MirrorId,
}

impl PartialEq for Mirror<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.reflector, other.reflector)
    }
}

impl Eq for Mirror<'_> {}

impl fmt::Debug for Mirror<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mirror")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

impl<'r> Mirror<'r> {
    pub(crate) const fn new(reflector: &'r Reflector, id: MirrorId) -> Self {
        Self { reflector, id }
    }

    pub const fn id(self) -> MirrorId {
        self.id
    }

    pub const fn reflector(self) -> &'r Reflector {
        self.reflector
    }

    fn data(self) -> Arc<MirrorData> {
        self.reflector.record(self.id)
    }

    fn wrap(self, id: MirrorId) -> Self {
        Self::new(self.reflector, id)
    }

    fn wrap_all(self, ids: &[MirrorId]) -> Vec<Self> {
        ids.iter().map(|id| self.wrap(*id)).collect()
    }

    pub fn kind(self) -> MirrorKind {
        self.data().kind
    }

    /// Declaration backing this mirror. Applications report their generic
    /// declaration.
    pub fn decl_id(self) -> Option<DeclId> {
        match &self.data().origin {
            MirrorOrigin::Interned(MirrorKey::Application { target, .. }) => {
                self.wrap(*target).decl_id()
            }
            origin => origin.decl(),
        }
    }

    /// Raw declaration node backing this mirror.
    pub fn decl(self) -> Option<&'r DeclNode> {
        self.decl_id()
            .and_then(|decl| self.reflector.registry().get(decl))
    }

    fn flags(self) -> DeclFlags {
        self.decl().map(|node| node.flags).unwrap_or_default()
    }

    /// Name of the mirror.
    ///
    /// Declarations report their declared name (anonymous literals report
    /// `__type`, modules drop their surrounding quotes), external references
    /// and type parameters their referenced name, literals their source
    /// text, and other structural types their formatted TypeScript.
    pub fn name(self) -> Cow<'r, str> {
        let data = self.data();
        match &data.origin {
            MirrorOrigin::Builtin(kind) => Cow::Borrowed(kind.name()),
            MirrorOrigin::Interned(MirrorKey::External { name, .. })
            | MirrorOrigin::Interned(MirrorKey::TypeParameter { name, .. }) => {
                Cow::Owned(name.clone())
            }
            MirrorOrigin::Interned(MirrorKey::Literal(value)) => Cow::Owned(value.to_source()),
            MirrorOrigin::Interned(
                MirrorKey::Union(_) | MirrorKey::Intersection(_) | MirrorKey::Tuple(_),
            ) => Cow::Owned(
                self.display()
                    .unwrap_or_else(|_| data.kind.label().to_string()),
            ),
            _ => match self.decl() {
                Some(node) if data.kind == MirrorKind::Module => {
                    Cow::Borrowed(strip_module_quotes(&node.name))
                }
                Some(node) => Cow::Borrowed(node.name.as_str()),
                None => Cow::Borrowed(data.kind.label()),
            },
        }
    }

    /// Structural types with members.
    pub fn is_complex(self) -> bool {
        self.kind().is_complex()
    }

    pub fn has_comment(self) -> bool {
        self.decl().is_some_and(DeclNode::has_comment)
    }

    /// Normalized comment, if one is attached.
    pub fn comment(self) -> Option<&'r Comment> {
        self.decl()
            .and_then(|node| node.comment.as_ref())
            .filter(|comment| !comment.is_empty())
    }

    /// Resolved type arguments of an external reference or a generic
    /// application; empty otherwise.
    pub fn type_arguments(self) -> Vec<Self> {
        match &self.data().origin {
            MirrorOrigin::Interned(
                MirrorKey::External { args, .. } | MirrorKey::Application { args, .. },
            ) => self.wrap_all(args),
            _ => Vec::new(),
        }
    }

    /// True for a generic declaration applied to type arguments.
    pub fn is_application(self) -> bool {
        matches!(
            self.data().origin,
            MirrorOrigin::Interned(MirrorKey::Application { .. })
        )
    }

    /// The un-parameterized mirror of an application; `self` otherwise.
    pub fn generic_target(self) -> Self {
        match &self.data().origin {
            MirrorOrigin::Interned(MirrorKey::Application { target, .. }) => self.wrap(*target),
            _ => self,
        }
    }

    /// The mirror rendered as TypeScript type syntax.
    pub fn display(self) -> MirrorResult<String> {
        TypeFormatter::new(self.reflector).format(self)
    }

    // =========================================================================
    // Member plumbing
    // =========================================================================

    /// Application whose bindings apply to this mirror's members.
    fn context(self) -> Option<MirrorId> {
        match &self.data().origin {
            MirrorOrigin::Interned(MirrorKey::Member { context, .. }) => Some(*context),
            MirrorOrigin::Interned(MirrorKey::Application { .. }) => Some(self.id),
            _ => None,
        }
    }

    /// Mirror for a nested declaration of this one.
    pub(crate) fn child(self, decl: DeclId) -> MirrorResult<Self> {
        self.reflector
            .member(decl, self.context())
            .map(|id| self.wrap(id))
    }

    fn children_ids(self, pick: impl FnOnce(&'r DeclNode) -> &'r [DeclId]) -> &'r [DeclId] {
        self.decl().map(pick).unwrap_or_default()
    }

    /// Nested declarations from `ids` whose variant satisfies `keep`, as
    /// mirrors in declared order.
    fn members_where(
        self,
        ids: &'r [DeclId],
        keep: impl Fn(&DeclNode, MirrorKind) -> bool,
    ) -> MirrorResult<Vec<Self>> {
        let mut members = Vec::new();
        for node in self.reflector.registry().nodes(ids) {
            if keep(node, classify_declaration(node)?) {
                members.push(self.child(node.id)?);
            }
        }
        Ok(members)
    }

    /// Names of nested declarations from `ids` whose variant satisfies `keep`.
    fn names_where(
        self,
        ids: &'r [DeclId],
        keep: impl Fn(&DeclNode, MirrorKind) -> bool,
    ) -> MirrorResult<Vec<&'r str>> {
        let mut names = Vec::new();
        for node in self.reflector.registry().nodes(ids) {
            if keep(node, classify_declaration(node)?) {
                names.push(node.name.as_str());
            }
        }
        Ok(names)
    }

    /// First nested declaration named `name` whose variant satisfies `keep`.
    fn find_member(
        self,
        ids: &'r [DeclId],
        name: &str,
        keep: impl Fn(&DeclNode, MirrorKind) -> bool,
    ) -> MirrorResult<Option<Self>> {
        for node in self.reflector.registry().nodes(ids) {
            if node.name == name && keep(node, classify_declaration(node)?) {
                return self.child(node.id).map(Some);
            }
        }
        Ok(None)
    }

    /// Resolve a descriptor owned by this mirror's declaration, under the
    /// mirror's generic context.
    fn resolve_owned(self, desc: &TypeDesc) -> MirrorResult<Self> {
        let owner = self.decl_id().unwrap_or_default();
        let resolved = self.reflector.resolve_type(desc, owner)?;
        let resolved = match self.context() {
            Some(context) => self.reflector.instantiate(resolved, context)?,
            None => resolved,
        };
        Ok(self.wrap(resolved))
    }

    /// The compute-once heritage clauses of this mirror's declaration.
    pub(crate) fn heritage(self) -> MirrorResult<Heritage> {
        let data = self.data();
        if let Some(heritage) = data.heritage.get() {
            return Ok(heritage.clone());
        }

        let resolve_all = |descs: &[TypeDesc]| {
            descs
                .iter()
                .map(|desc| self.resolve_owned(desc).map(Mirror::id))
                .collect::<MirrorResult<Vec<_>>>()
        };
        let computed = match self.decl() {
            Some(node) => Heritage {
                extended: resolve_all(node.extended_types.as_slice())?,
                implemented: resolve_all(node.implemented_types.as_slice())?,
            },
            None => Heritage::default(),
        };
        // First writer wins; a racing computation is discarded.
        Ok(data.heritage.get_or_init(|| computed).clone())
    }

    /// The compute-once primary type, or `any` when none is declared.
    fn resolved_or_any(self) -> MirrorResult<Self> {
        let resolved = self.reflector.resolved(self.id)?;
        Ok(self.wrap(resolved.unwrap_or(MirrorId::ANY)))
    }

    fn type_parameter_mirrors(self) -> MirrorResult<Vec<TypeParameterMirror<'r>>> {
        let ids = self.children_ids(|node| node.type_parameters.as_slice());
        let members = self.members_where(ids, |_, kind| kind == MirrorKind::TypeParameter)?;
        Ok(members.into_iter().map(TypeParameterMirror).collect())
    }

    fn signature_mirrors(self, ids: &'r [DeclId]) -> MirrorResult<Vec<SignatureMirror<'r>>> {
        let members = self.members_where(ids, |_, kind| kind == MirrorKind::Signature)?;
        Ok(members.into_iter().map(SignatureMirror).collect())
    }
}

pub(crate) fn strip_module_quotes(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(name)
}

// =============================================================================
// Views
// =============================================================================

macro_rules! mirror_views {
    ($($(#[$meta:meta])* $view:ident;)*) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $view<'r>(pub(crate) Mirror<'r>);

        impl<'r> $view<'r> {
            pub const fn mirror(self) -> Mirror<'r> {
                self.0
            }
        }

        impl<'r> Deref for $view<'r> {
            type Target = Mirror<'r>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<'r> From<$view<'r>> for Mirror<'r> {
            fn from(view: $view<'r>) -> Self {
                view.0
            }
        }
    )*};
}

mirror_views! {
    /// Module (one source file) or namespace.
    ModuleMirror;
    /// Class, interface, or inline interface literal.
    InterfaceMirror;
    PropertyMirror;
    UnionMirror;
    IntersectionMirror;
    TupleMirror;
    /// Function, method, constructor, or function-typed literal.
    CallableMirror;
    SignatureMirror;
    ParameterMirror;
    EnumMirror;
    EnumMemberMirror;
    TypeAliasMirror;
    TypeParameterMirror;
    VariableMirror;
    LiteralMirror;
    ExternalTypeReferenceMirror;
    BuiltinMirror;
}

macro_rules! mirror_guards {
    ($($(#[$meta:meta])* $is:ident, $as:ident -> $view:ident($pattern:pat);)*) => {
        impl<'r> Mirror<'r> {
            $(
                $(#[$meta])*
                pub fn $is(self) -> bool {
                    matches!(self.kind(), $pattern)
                }

                pub fn $as(self) -> Option<$view<'r>> {
                    self.$is().then_some($view(self))
                }
            )*
        }
    };
}

mirror_guards! {
    is_module, as_module -> ModuleMirror(MirrorKind::Module);
    is_namespace, as_namespace -> ModuleMirror(MirrorKind::Namespace);
    /// Module or namespace.
    is_container, as_container -> ModuleMirror(MirrorKind::Module | MirrorKind::Namespace);
    is_class, as_class -> InterfaceMirror(MirrorKind::Class);
    /// True for classes, interfaces and interface literals.
    is_interface, as_interface -> InterfaceMirror(
        MirrorKind::Class | MirrorKind::Interface | MirrorKind::InterfaceLiteral
    );
    is_interface_literal, as_interface_literal -> InterfaceMirror(MirrorKind::InterfaceLiteral);
    is_enum, as_enum -> EnumMirror(MirrorKind::Enum);
    is_enum_member, as_enum_member -> EnumMemberMirror(MirrorKind::EnumMember);
    is_union, as_union -> UnionMirror(MirrorKind::Union);
    is_intersection, as_intersection -> IntersectionMirror(MirrorKind::Intersection);
    is_tuple, as_tuple -> TupleMirror(MirrorKind::Tuple);
    is_literal, as_literal -> LiteralMirror(MirrorKind::Literal);
    is_callable, as_callable -> CallableMirror(MirrorKind::Callable);
    is_signature, as_signature -> SignatureMirror(MirrorKind::Signature);
    is_property, as_property -> PropertyMirror(MirrorKind::Property);
    is_parameter, as_parameter -> ParameterMirror(MirrorKind::Parameter);
    is_type_alias, as_type_alias -> TypeAliasMirror(MirrorKind::TypeAlias);
    is_type_parameter, as_type_parameter -> TypeParameterMirror(MirrorKind::TypeParameter);
    is_variable, as_variable -> VariableMirror(MirrorKind::Variable);
    is_external_type_reference, as_external_type_reference -> ExternalTypeReferenceMirror(
        MirrorKind::ExternalTypeReference
    );
    is_builtin, as_builtin -> BuiltinMirror(MirrorKind::Builtin(_));
}

// =============================================================================
// Containers
// =============================================================================

impl<'r> ModuleMirror<'r> {
    /// Source path recorded by the producer, passed through untouched.
    pub fn original_name(self) -> Option<&'r str> {
        self.decl().and_then(|node| node.original_name.as_deref())
    }

    /// Contained namespaces, in declared order.
    pub fn namespaces(self) -> MirrorResult<Vec<ModuleMirror<'r>>> {
        self.of_kind(|kind| kind == MirrorKind::Namespace, ModuleMirror)
    }

    /// Names of all direct children, in declared order.
    pub fn child_names(self) -> Vec<&'r str> {
        self.decl()
            .map(|node| {
                self.reflector()
                    .registry()
                    .nodes(&node.children)
                    .map(|child| child.name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Mirror for the direct child named `name`.
    pub fn describe_child(self, name: &str) -> MirrorResult<Option<Mirror<'r>>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        self.find_member(ids, name, |_, _| true)
    }

    pub fn classes(self) -> MirrorResult<Vec<InterfaceMirror<'r>>> {
        self.of_kind(|kind| kind == MirrorKind::Class, InterfaceMirror)
    }

    pub fn interfaces(self) -> MirrorResult<Vec<InterfaceMirror<'r>>> {
        self.of_kind(|kind| kind == MirrorKind::Interface, InterfaceMirror)
    }

    pub fn enums(self) -> MirrorResult<Vec<EnumMirror<'r>>> {
        self.of_kind(|kind| kind == MirrorKind::Enum, EnumMirror)
    }

    pub fn type_aliases(self) -> MirrorResult<Vec<TypeAliasMirror<'r>>> {
        self.of_kind(|kind| kind == MirrorKind::TypeAlias, TypeAliasMirror)
    }

    pub fn functions(self) -> MirrorResult<Vec<CallableMirror<'r>>> {
        self.of_kind(|kind| kind == MirrorKind::Callable, CallableMirror)
    }

    pub fn variables(self) -> MirrorResult<Vec<VariableMirror<'r>>> {
        self.of_kind(|kind| kind == MirrorKind::Variable, VariableMirror)
    }

    fn of_kind<V>(
        self,
        keep: impl Fn(MirrorKind) -> bool,
        view: impl Fn(Mirror<'r>) -> V,
    ) -> MirrorResult<Vec<V>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        let members = self.members_where(ids, |_, kind| keep(kind))?;
        Ok(members.into_iter().map(view).collect())
    }
}

// =============================================================================
// Interface-likes
// =============================================================================

impl<'r> InterfaceMirror<'r> {
    /// Own and inherited property names. Order is not part of the contract.
    pub fn property_names(self) -> MirrorResult<Vec<&'r str>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        self.names_where(ids, |_, kind| kind == MirrorKind::Property)
    }

    /// Property named exactly `name`.
    pub fn describe_property(self, name: &str) -> MirrorResult<Option<PropertyMirror<'r>>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        let found = self.find_member(ids, name, |_, kind| kind == MirrorKind::Property)?;
        Ok(found.map(PropertyMirror))
    }

    pub fn properties(self) -> MirrorResult<Vec<PropertyMirror<'r>>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        let members = self.members_where(ids, |_, kind| kind == MirrorKind::Property)?;
        Ok(members.into_iter().map(PropertyMirror).collect())
    }

    /// Method names, excluding the constructor.
    pub fn method_names(self) -> MirrorResult<Vec<&'r str>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        self.names_where(ids, is_method)
    }

    pub fn describe_method(self, name: &str) -> MirrorResult<Option<CallableMirror<'r>>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        let found = self.find_member(ids, name, is_method)?;
        Ok(found.map(CallableMirror))
    }

    pub fn methods(self) -> MirrorResult<Vec<CallableMirror<'r>>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        let members = self.members_where(ids, is_method)?;
        Ok(members.into_iter().map(CallableMirror).collect())
    }

    /// The class constructor, if declared.
    pub fn constructor(self) -> MirrorResult<Option<CallableMirror<'r>>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        let found = self.find_member(ids, CONSTRUCTOR, |_, kind| kind == MirrorKind::Callable)?;
        Ok(found.map(CallableMirror))
    }

    /// `[key: K]: V` signatures.
    pub fn index_signatures(self) -> MirrorResult<Vec<SignatureMirror<'r>>> {
        self.signature_mirrors(self.children_ids(|node| node.index_signatures.as_slice()))
    }

    /// Call signatures of an interface literal that also has members.
    pub fn call_signatures(self) -> MirrorResult<Vec<SignatureMirror<'r>>> {
        self.signature_mirrors(self.children_ids(|node| node.signatures.as_slice()))
    }

    pub fn type_parameters(self) -> MirrorResult<Vec<TypeParameterMirror<'r>>> {
        self.type_parameter_mirrors()
    }

    /// `extends` clause, resolved once and memoized.
    pub fn extended_types(self) -> MirrorResult<Vec<Mirror<'r>>> {
        Ok(self.wrap_all(&self.heritage()?.extended))
    }

    /// `implements` clause, resolved once and memoized. Empty for non-classes.
    pub fn implemented_types(self) -> MirrorResult<Vec<Mirror<'r>>> {
        Ok(self.wrap_all(&self.heritage()?.implemented))
    }
}

const CONSTRUCTOR: &str = "constructor";

fn is_method(node: &DeclNode, kind: MirrorKind) -> bool {
    kind == MirrorKind::Callable && node.name != CONSTRUCTOR
}

// =============================================================================
// Members
// =============================================================================

/// Declared member visibility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    fn from_flags(flags: DeclFlags) -> Self {
        if flags.contains(DeclFlags::PRIVATE) {
            Self::Private
        } else if flags.contains(DeclFlags::PROTECTED) {
            Self::Protected
        } else {
            Self::Public
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'r> PropertyMirror<'r> {
    /// The property's type, fully resolved. Missing types resolve to `any`.
    pub fn ty(self) -> MirrorResult<Mirror<'r>> {
        self.resolved_or_any()
    }

    /// Optional by flag, or by a union whose first branch is `undefined`.
    pub fn is_optional(self) -> MirrorResult<bool> {
        if self.is_flagged_optional() {
            return Ok(true);
        }
        let ty = self.ty()?;
        Ok(self.reflector().starts_with_undefined(ty.id()))
    }

    /// The producer's `isOptional` flag alone.
    pub fn is_flagged_optional(self) -> bool {
        self.flags().contains(DeclFlags::OPTIONAL)
    }

    pub fn is_readonly(self) -> bool {
        let node = self.decl();
        self.flags().contains(DeclFlags::READONLY)
            || node.is_some_and(|node| !node.get_signatures.is_empty() && node.set_signatures.is_empty())
    }

    pub fn is_static(self) -> bool {
        self.flags().contains(DeclFlags::STATIC)
    }

    pub fn visibility(self) -> Visibility {
        Visibility::from_flags(self.flags())
    }

    /// Declared on a base type and copied down by the producer.
    pub fn is_inherited(self) -> bool {
        self.decl().is_some_and(|node| node.inherited_from.is_some())
    }
}

impl<'r> VariableMirror<'r> {
    pub fn ty(self) -> MirrorResult<Mirror<'r>> {
        self.resolved_or_any()
    }

    pub fn is_const(self) -> bool {
        self.flags().contains(DeclFlags::CONST)
    }
}

// =============================================================================
// Structural types
// =============================================================================

impl<'r> UnionMirror<'r> {
    /// Branches in declared order.
    pub fn types(self) -> Vec<Mirror<'r>> {
        match &self.data().origin {
            MirrorOrigin::Interned(MirrorKey::Union(types)) => self.wrap_all(types),
            _ => Vec::new(),
        }
    }
}

impl<'r> IntersectionMirror<'r> {
    pub fn types(self) -> Vec<Mirror<'r>> {
        match &self.data().origin {
            MirrorOrigin::Interned(MirrorKey::Intersection(types)) => self.wrap_all(types),
            _ => Vec::new(),
        }
    }
}

impl<'r> TupleMirror<'r> {
    pub fn elements(self) -> Vec<Mirror<'r>> {
        match &self.data().origin {
            MirrorOrigin::Interned(MirrorKey::Tuple(elements)) => self.wrap_all(elements),
            _ => Vec::new(),
        }
    }
}

impl LiteralMirror<'_> {
    pub fn value(self) -> Option<LiteralValue> {
        match &self.data().origin {
            MirrorOrigin::Interned(MirrorKey::Literal(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Value as TypeScript source (`"text"`, `42`, `true`, `10n`, `null`).
    pub fn text(self) -> String {
        self.value()
            .map(|value| value.to_source())
            .unwrap_or_default()
    }
}

impl BuiltinMirror<'_> {
    pub fn builtin_kind(self) -> Option<BuiltinKind> {
        match self.kind() {
            MirrorKind::Builtin(kind) => Some(kind),
            _ => None,
        }
    }
}

// =============================================================================
// Callables
// =============================================================================

impl<'r> CallableMirror<'r> {
    /// Overloads in declared order.
    pub fn signatures(self) -> MirrorResult<Vec<SignatureMirror<'r>>> {
        self.signature_mirrors(self.children_ids(|node| node.signatures.as_slice()))
    }
}

impl<'r> SignatureMirror<'r> {
    pub fn parameters(self) -> MirrorResult<Vec<ParameterMirror<'r>>> {
        let ids = self.children_ids(|node| node.parameters.as_slice());
        let members = self.members_where(ids, |_, kind| kind == MirrorKind::Parameter)?;
        Ok(members.into_iter().map(ParameterMirror).collect())
    }

    /// Declared return type; `any` when the producer omitted it.
    pub fn return_type(self) -> MirrorResult<Mirror<'r>> {
        self.resolved_or_any()
    }

    pub fn type_parameters(self) -> MirrorResult<Vec<TypeParameterMirror<'r>>> {
        self.type_parameter_mirrors()
    }
}

impl<'r> ParameterMirror<'r> {
    pub fn ty(self) -> MirrorResult<Mirror<'r>> {
        self.resolved_or_any()
    }

    /// Flagged optional, or has a default value.
    pub fn is_optional(self) -> bool {
        self.flags().contains(DeclFlags::OPTIONAL) || self.default_value().is_some()
    }

    pub fn is_rest(self) -> bool {
        self.flags().contains(DeclFlags::REST)
    }

    /// Default value as source text.
    pub fn default_value(self) -> Option<&'r str> {
        self.decl().and_then(|node| node.default_value.as_deref())
    }
}

// =============================================================================
// Enums, aliases, type parameters
// =============================================================================

impl<'r> EnumMirror<'r> {
    /// Members in declared order.
    pub fn children(self) -> MirrorResult<Vec<EnumMemberMirror<'r>>> {
        let ids = self.children_ids(|node| node.children.as_slice());
        let members = self.members_where(ids, |_, kind| kind == MirrorKind::EnumMember)?;
        Ok(members.into_iter().map(EnumMemberMirror).collect())
    }
}

impl EnumMemberMirror<'_> {
    /// Initializer as declared, string literals quoted.
    ///
    /// Falls back to the member's literal type when the producer records
    /// the value there instead of in `defaultValue`.
    pub fn default_value(self) -> Option<String> {
        let node = self.decl()?;
        if let Some(value) = &node.default_value {
            return Some(value.clone());
        }
        let ty = node.ty.as_ref()?;
        match classify_type(self.reflector().registry(), ty, node.id).ok()? {
            TypeShape::Literal(value) => Some(value.to_source()),
            _ => None,
        }
    }
}

impl<'r> TypeAliasMirror<'r> {
    /// The aliased type, resolved on first call and memoized.
    pub fn target_definition(self) -> MirrorResult<Mirror<'r>> {
        self.resolved_or_any()
    }

    pub fn type_parameters(self) -> MirrorResult<Vec<TypeParameterMirror<'r>>> {
        self.type_parameter_mirrors()
    }
}

impl<'r> TypeParameterMirror<'r> {
    /// `extends` constraint, if any.
    pub fn constraint(self) -> MirrorResult<Option<Mirror<'r>>> {
        let resolved = self.reflector().resolved(self.id())?;
        Ok(resolved.map(|id| self.wrap(id)))
    }
}

#[cfg(test)]
#[path = "../tests/mirror_tests.rs"]
mod tests;
