//! Serializable views of mirrors.
//!
//! Reports are plain data: they are built once from the reflector and then
//! either serialized with `serde_json` or rendered as text.

use serde::Serialize;
use typemirror::{
    InterfaceMirror, Mirror, MirrorKind, MirrorResult, ModuleMirror, OptionalityMismatch,
    Reflector, SchemaError, Visibility,
};

/// A module or namespace.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub namespaces: Vec<String>,
    pub members: Vec<MemberSummary>,
}

#[derive(Debug, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub kind: MirrorKind,
}

/// A named type: class, interface, enum or type alias.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReport {
    pub name: String,
    pub kind: MirrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constructor: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<EnumMemberReport>,
    /// Aliased type of a type alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyReport {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub optional: bool,
    pub readonly: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub visibility: Visibility,
    pub inherited: bool,
}

#[derive(Debug, Serialize)]
pub struct MethodReport {
    pub name: String,
    pub signatures: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EnumMemberReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Result of the whole-document `check` pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub ok: bool,
    pub declarations: usize,
    pub mirrors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CheckError>,
    pub optionality_mismatches: Vec<OptionalityMismatch>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckError {
    pub decl_id: u32,
    pub message: String,
}

impl From<&SchemaError> for CheckError {
    fn from(err: &SchemaError) -> Self {
        Self {
            decl_id: err.decl_id().to_raw(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Builders
// =============================================================================

pub fn module_report(module: ModuleMirror<'_>) -> MirrorResult<ModuleReport> {
    let mut members = Vec::new();
    for name in module.child_names() {
        if let Some(child) = module.describe_child(name)? {
            members.push(MemberSummary {
                name: child.name().into_owned(),
                kind: child.kind(),
            });
        }
    }

    Ok(ModuleReport {
        name: module.name().into_owned(),
        original_name: module.original_name().map(str::to_string),
        namespaces: module
            .namespaces()?
            .iter()
            .map(|namespace| namespace.name().into_owned())
            .collect(),
        members,
    })
}

pub fn type_report(reflector: &Reflector, mirror: Mirror<'_>) -> MirrorResult<TypeReport> {
    let mut report = TypeReport {
        name: mirror.name().into_owned(),
        kind: mirror.kind(),
        comment: mirror.comment().map(|comment| comment.text()),
        type_parameters: Vec::new(),
        extends: Vec::new(),
        implements: Vec::new(),
        constructor: Vec::new(),
        properties: Vec::new(),
        methods: Vec::new(),
        members: Vec::new(),
        target: None,
    };

    if let Some(interface) = mirror.as_interface() {
        fill_interface(reflector, interface, &mut report)?;
    } else if let Some(enumeration) = mirror.as_enum() {
        for member in enumeration.children()? {
            report.members.push(EnumMemberReport {
                name: member.name().into_owned(),
                value: member.default_value(),
            });
        }
    } else if let Some(alias) = mirror.as_type_alias() {
        report.type_parameters = names(alias.type_parameters()?.iter().map(|param| **param));
        report.target = Some(reflector.display_type(alias.target_definition()?)?);
    }

    Ok(report)
}

fn fill_interface(
    reflector: &Reflector,
    interface: InterfaceMirror<'_>,
    report: &mut TypeReport,
) -> MirrorResult<()> {
    report.type_parameters = names(interface.type_parameters()?.iter().map(|param| **param));
    report.extends = display_all(reflector, interface.extended_types()?)?;
    report.implements = display_all(reflector, interface.implemented_types()?)?;

    if let Some(constructor) = interface.constructor()? {
        for signature in constructor.signatures()? {
            report.constructor.push(reflector.display_type(*signature)?);
        }
    }

    for property in interface.properties()? {
        report.properties.push(PropertyReport {
            name: property.name().into_owned(),
            ty: reflector.display_type(property.ty()?)?,
            optional: property.is_optional()?,
            readonly: property.is_readonly(),
            is_static: property.is_static(),
            visibility: property.visibility(),
            inherited: property.is_inherited(),
        });
    }

    for method in interface.methods()? {
        let signatures = method
            .signatures()?
            .into_iter()
            .map(|signature| reflector.display_type(*signature))
            .collect::<MirrorResult<Vec<_>>>()?;
        report.methods.push(MethodReport {
            name: method.name().into_owned(),
            signatures,
        });
    }

    Ok(())
}

fn names<'r>(mirrors: impl Iterator<Item = Mirror<'r>>) -> Vec<String> {
    mirrors.map(|mirror| mirror.name().into_owned()).collect()
}

fn display_all(reflector: &Reflector, mirrors: Vec<Mirror<'_>>) -> MirrorResult<Vec<String>> {
    mirrors
        .into_iter()
        .map(|mirror| reflector.display_type(mirror))
        .collect()
}

/// Resolve the whole document. A schema error is reported, not returned.
pub fn check_report(reflector: &Reflector) -> CheckReport {
    let materialized = reflector.materialize_all().and_then(|declarations| {
        reflector
            .optionality_mismatches()
            .map(|mismatches| (declarations, mismatches))
    });

    match materialized {
        Ok((declarations, optionality_mismatches)) => CheckReport {
            ok: true,
            declarations,
            mirrors: reflector.mirror_count(),
            error: None,
            optionality_mismatches,
        },
        Err(err) => CheckReport {
            ok: false,
            declarations: 0,
            mirrors: reflector.mirror_count(),
            error: Some(CheckError::from(&err)),
            optionality_mismatches: Vec::new(),
        },
    }
}
