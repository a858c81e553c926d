//! Type Formatter - Convert mirrors to TypeScript syntax
//!
//! Named declarations print as their name, so formatting never follows a
//! reference into another declaration's members and always terminates on
//! cyclic graphs. Only anonymous literals are expanded inline.

use crate::error::MirrorResult;
use crate::kind::MirrorKind;
use crate::mirror::{
    CallableMirror, InterfaceMirror, IntersectionMirror, LiteralMirror, Mirror, ParameterMirror,
    PropertyMirror, SignatureMirror, TupleMirror, UnionMirror, VariableMirror,
};
use crate::reflector::Reflector;

/// Prints mirrors as TypeScript type syntax.
///
/// # Examples
///
/// ```ignore
/// let formatter = TypeFormatter::new(&reflector);
/// assert_eq!(formatter.format(reflector.builtin_string())?, "string");
/// ```
pub struct TypeFormatter<'r> {
    reflector: &'r Reflector,
}

impl<'r> TypeFormatter<'r> {
    pub const fn new(reflector: &'r Reflector) -> Self {
        Self { reflector }
    }

    /// Convert a mirror to TypeScript syntax.
    pub fn format(&self, mirror: Mirror<'r>) -> MirrorResult<String> {
        debug_assert!(std::ptr::eq(mirror.reflector(), self.reflector));

        if mirror.is_application() {
            return self.format_reference(&mirror.name(), &mirror.type_arguments());
        }

        match mirror.kind() {
            MirrorKind::Builtin(kind) => Ok(kind.name().to_string()),

            MirrorKind::Literal => Ok(LiteralMirror(mirror).text()),

            MirrorKind::Union => self.format_union(UnionMirror(mirror)),

            MirrorKind::Intersection => self.format_intersection(IntersectionMirror(mirror)),

            MirrorKind::Tuple => self.format_tuple(TupleMirror(mirror)),

            MirrorKind::ExternalTypeReference => {
                let args = mirror.type_arguments();
                match args.as_slice() {
                    [element] if mirror.name() == "Array" => self.format_array(*element),
                    _ => self.format_reference(&mirror.name(), &args),
                }
            }

            MirrorKind::InterfaceLiteral => self.format_object(InterfaceMirror(mirror)),

            MirrorKind::Callable => self.format_callable(CallableMirror(mirror)),

            MirrorKind::Signature => self.format_signature(SignatureMirror(mirror), true),

            MirrorKind::Property => self.format(PropertyMirror(mirror).ty()?),

            MirrorKind::Variable => self.format(VariableMirror(mirror).ty()?),

            MirrorKind::Parameter => self.format(ParameterMirror(mirror).ty()?),

            MirrorKind::Module
            | MirrorKind::Namespace
            | MirrorKind::Class
            | MirrorKind::Interface
            | MirrorKind::Enum
            | MirrorKind::EnumMember
            | MirrorKind::TypeAlias
            | MirrorKind::TypeParameter => Ok(mirror.name().into_owned()),
        }
    }

    fn format_all(&self, mirrors: &[Mirror<'r>], separator: &str) -> MirrorResult<String> {
        let parts = mirrors
            .iter()
            .map(|mirror| self.format(*mirror))
            .collect::<MirrorResult<Vec<_>>>()?;
        Ok(parts.join(separator))
    }

    fn format_reference(&self, name: &str, args: &[Mirror<'r>]) -> MirrorResult<String> {
        if args.is_empty() {
            return Ok(name.to_string());
        }
        Ok(format!("{name}<{}>", self.format_all(args, ", ")?))
    }

    fn format_array(&self, element: Mirror<'r>) -> MirrorResult<String> {
        let inner = self.format(element)?;
        Ok(if needs_parens(element) {
            format!("({inner})[]")
        } else {
            format!("{inner}[]")
        })
    }

    fn format_union(&self, union: UnionMirror<'r>) -> MirrorResult<String> {
        let types = union.types();
        if types.is_empty() {
            return Ok("never".to_string());
        }
        self.format_operands(&types, " | ")
    }

    fn format_intersection(&self, intersection: IntersectionMirror<'r>) -> MirrorResult<String> {
        let types = intersection.types();
        if types.is_empty() {
            return Ok("unknown".to_string());
        }
        self.format_operands(&types, " & ")
    }

    fn format_operands(&self, operands: &[Mirror<'r>], separator: &str) -> MirrorResult<String> {
        let mut parts = Vec::with_capacity(operands.len());
        for operand in operands {
            let text = self.format(*operand)?;
            parts.push(if needs_parens(*operand) {
                format!("({text})")
            } else {
                text
            });
        }
        Ok(parts.join(separator))
    }

    fn format_tuple(&self, tuple: TupleMirror<'r>) -> MirrorResult<String> {
        Ok(format!("[{}]", self.format_all(&tuple.elements(), ", ")?))
    }

    fn format_callable(&self, callable: CallableMirror<'r>) -> MirrorResult<String> {
        let signatures = callable.signatures()?;
        match signatures.as_slice() {
            [] => Ok("Function".to_string()),
            [signature] => self.format_signature(*signature, true),
            overloads => {
                let members = overloads
                    .iter()
                    .map(|signature| self.format_signature(*signature, false))
                    .collect::<MirrorResult<Vec<_>>>()?;
                Ok(format!("{{ {} }}", members.join("; ")))
            }
        }
    }

    /// `(a: T) => R` as an arrow, or `(a: T): R` as an object member.
    fn format_signature(&self, signature: SignatureMirror<'r>, arrow: bool) -> MirrorResult<String> {
        let params = self.format_parameters(signature)?;
        let returns = self.format(signature.return_type()?)?;
        Ok(if arrow {
            format!("({params}) => {returns}")
        } else {
            format!("({params}): {returns}")
        })
    }

    fn format_parameters(&self, signature: SignatureMirror<'r>) -> MirrorResult<String> {
        let mut params = Vec::new();
        for param in signature.parameters()? {
            let ty = self.format(param.ty()?)?;
            let name = param.name();
            params.push(if param.is_rest() {
                format!("...{name}: {ty}")
            } else if param.is_optional() {
                format!("{name}?: {ty}")
            } else {
                format!("{name}: {ty}")
            });
        }
        Ok(params.join(", "))
    }

    fn format_object(&self, object: InterfaceMirror<'r>) -> MirrorResult<String> {
        let mut members = Vec::new();

        for signature in object.call_signatures()? {
            members.push(self.format_signature(signature, false)?);
        }

        for signature in object.index_signatures()? {
            let params = self.format_parameters(signature)?;
            let value = self.format(signature.return_type()?)?;
            members.push(format!("[{params}]: {value}"));
        }

        for property in object.properties()? {
            let marker = if property.is_flagged_optional() { "?" } else { "" };
            let readonly = if property.is_readonly() { "readonly " } else { "" };
            let ty = self.format(property.ty()?)?;
            members.push(format!("{readonly}{}{marker}: {ty}", property.name()));
        }

        for method in object.methods()? {
            for signature in method.signatures()? {
                let text = self.format_signature(signature, false)?;
                members.push(format!("{}{text}", method.name()));
            }
        }

        if members.is_empty() {
            return Ok("{}".to_string());
        }
        Ok(format!("{{ {} }}", members.join("; ")))
    }
}

/// Operands that must be parenthesized inside `|`, `&` and `[]`.
fn needs_parens(mirror: Mirror<'_>) -> bool {
    if mirror.is_application() {
        return false;
    }
    match mirror.kind() {
        MirrorKind::Union | MirrorKind::Intersection | MirrorKind::Signature => true,
        MirrorKind::Callable => mirror
            .as_callable()
            .and_then(|callable| callable.signatures().ok())
            .is_some_and(|signatures| signatures.len() == 1),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
