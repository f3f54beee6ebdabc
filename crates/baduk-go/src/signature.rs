//! Signature resolution: parameter and result lists to ordered [`Type`]s.

use baduk_core::{ResolveError, Type};
use tree_sitter::Node;

use crate::shape::TypeResolver;
use crate::syntax::{field, named_children};

/// Parameter and result shapes of one function, method or method-set entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// One entry per declared parameter name (or per unnamed parameter).
    pub params: Vec<Type>,
    /// One entry per result.
    pub results: Vec<Type>,
}

/// Resolves the `parameters` and `result` fields of `decl`.
///
/// Works for `function_declaration`, `method_declaration` and
/// `method_elem` nodes alike. Missing lists resolve to empty vectors.
///
/// # Errors
///
/// Any [`ResolveError`] from an entry rejects the whole signature.
pub fn resolve_signature(
    resolver: &TypeResolver<'_>,
    decl: Node<'_>,
) -> Result<Signature, ResolveError> {
    let params = match decl.child_by_field_name("parameters") {
        Some(list) => resolve_list(resolver, list, true)?,
        None => Vec::new(),
    };

    let results = match decl.child_by_field_name("result") {
        None => Vec::new(),
        Some(list) if list.kind() == "parameter_list" => resolve_list(resolver, list, false)?,
        // unparenthesized single result
        Some(ty) => vec![resolver.resolve(ty)?],
    };

    Ok(Signature { params, results })
}

fn resolve_list(
    resolver: &TypeResolver<'_>,
    list: Node<'_>,
    allow_variadic: bool,
) -> Result<Vec<Type>, ResolveError> {
    let entries = named_children(list);
    let last = entries.len().saturating_sub(1);
    let mut types = Vec::with_capacity(entries.len());

    for (i, entry) in entries.into_iter().enumerate() {
        match entry.kind() {
            "parameter_declaration" => {
                let ty = resolver.resolve(field(entry, "type")?)?;
                let mut cursor = entry.walk();
                let names = entry.children_by_field_name("name", &mut cursor).count();
                types.extend(std::iter::repeat(ty).take(names.max(1)));
            }
            "variadic_parameter_declaration" => {
                if !allow_variadic || i != last {
                    return Err(ResolveError::MisplacedVariadic {
                        position: types.len(),
                    });
                }
                types.push(resolver.resolve(entry)?);
            }
            other => return Err(ResolveError::unsupported(other)),
        }
    }

    Ok(types)
}
