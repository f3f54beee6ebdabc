//! Top-level declaration dispatch.
//!
//! Each top-level node is classified once into a [`Declaration`] and each
//! arm collects its entities without touching the [`File`]; [`walk`] is the
//! only place that appends, so source order carries through unchanged.

use baduk_core::{DeclarationError, File, Interface, Method, ResolveError};
use std::path::Path;
use tracing::{debug, warn};
use tree_sitter::Node;

use crate::shape::TypeResolver;
use crate::signature::resolve_signature;
use crate::syntax::{field, location, named_children, operand, text};
use crate::type_decl::collect_interfaces;

/// Per-file state shared by every arm.
pub(crate) struct Context<'a> {
    pub(crate) src: &'a [u8],
    pub(crate) path: &'a Path,
    pub(crate) resolver: TypeResolver<'a>,
    pub(crate) exported_only: bool,
}

/// What a top-level node is, as far as the model cares.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Declaration<'tree> {
    PackageClause(Node<'tree>),
    TypeGroup(Node<'tree>),
    Function(Node<'tree>),
    Method {
        node: Node<'tree>,
        receiver: Node<'tree>,
    },
    Other,
}

/// One entity produced by a declaration.
#[derive(Debug)]
pub(crate) enum Collected {
    PackageName(String),
    PublicFunc(String),
    Method(Method),
    Interface(Interface),
}

impl<'tree> Declaration<'tree> {
    pub(crate) fn classify(node: Node<'tree>) -> Self {
        match node.kind() {
            "package_clause" => Self::PackageClause(node),
            "type_declaration" => Self::TypeGroup(node),
            "function_declaration" => Self::Function(node),
            "method_declaration" => match node.child_by_field_name("receiver") {
                Some(receiver) if !named_children(receiver).is_empty() => {
                    Self::Method { node, receiver }
                }
                // `func () F()` has no receiver to bind to
                _ => Self::Function(node),
            },
            _ => Self::Other,
        }
    }

    pub(crate) fn collect(self, ctx: &Context<'_>) -> Vec<Result<Collected, DeclarationError>> {
        match self {
            Self::PackageClause(node) => operand(node)
                .ok()
                .map(|name| Ok(Collected::PackageName(text(name, ctx.src).to_owned())))
                .into_iter()
                .collect(),
            Self::TypeGroup(node) => collect_interfaces(ctx, node)
                .into_iter()
                .map(|result| result.map(Collected::Interface))
                .collect(),
            Self::Function(node) => collect_function(ctx, node)
                .map(|name| Ok(Collected::PublicFunc(name)))
                .into_iter()
                .collect(),
            Self::Method { node, receiver } => {
                vec![collect_method(ctx, node, receiver).map(Collected::Method)]
            }
            Self::Other => Vec::new(),
        }
    }
}

/// Walks the top-level declarations of `root` into `file`.
///
/// Returns the declarations that were rejected; they are absent from `file`.
pub(crate) fn walk(ctx: &Context<'_>, root: Node<'_>, file: &mut File) -> Vec<DeclarationError> {
    let mut failures = Vec::new();
    for node in named_children(root) {
        for collected in Declaration::classify(node).collect(ctx) {
            match collected {
                Ok(Collected::PackageName(name)) => file.package_name = Some(name),
                Ok(Collected::PublicFunc(name)) => file.public_funcs.push(name),
                Ok(Collected::Method(method)) => file.methods.push(method),
                Ok(Collected::Interface(interface)) => file.interfaces.push(interface),
                Err(err) => {
                    warn!("{err}");
                    failures.push(err);
                }
            }
        }
    }
    failures
}

fn collect_function(ctx: &Context<'_>, node: Node<'_>) -> Option<String> {
    let name = text(node.child_by_field_name("name")?, ctx.src);
    if ctx.exported_only && !is_exported(name) {
        debug!("Skipping unexported func {name}");
        return None;
    }
    debug!("Collected func {name}");
    Some(name.to_owned())
}

fn collect_method(
    ctx: &Context<'_>,
    node: Node<'_>,
    receiver: Node<'_>,
) -> Result<Method, DeclarationError> {
    let name = node
        .child_by_field_name("name")
        .map_or("", |n| text(n, ctx.src));
    let reject = |declaration: String, source| {
        DeclarationError::new(location(node, ctx.path), declaration, source)
    };

    let (recv, pointer) =
        receiver_of(ctx, receiver).map_err(|source| reject(name.to_owned(), source))?;
    let sig = resolve_signature(&ctx.resolver, node)
        .map_err(|source| reject(format!("{recv}.{name}"), source))?;

    debug!("Collected method {recv}.{name}");
    Ok(Method::new(name, sig.params, sig.results).with_receiver(recv, pointer))
}

/// Receiver's base type name and whether it was declared as a pointer.
fn receiver_of(ctx: &Context<'_>, receiver: Node<'_>) -> Result<(String, bool), ResolveError> {
    let params = named_children(receiver);
    let param = match params.as_slice() {
        [param] => *param,
        many => return Err(ResolveError::MultipleReceivers { count: many.len() }),
    };
    if param.kind() != "parameter_declaration" {
        return Err(ResolveError::UnsupportedReceiver {
            kind: param.kind().to_owned(),
        });
    }

    let mut cursor = param.walk();
    let names = param.children_by_field_name("name", &mut cursor).count();
    if names > 1 {
        return Err(ResolveError::MultipleReceivers { count: names });
    }

    receiver_base(ctx, field(param, "type")?, false)
}

fn receiver_base(
    ctx: &Context<'_>,
    node: Node<'_>,
    pointer: bool,
) -> Result<(String, bool), ResolveError> {
    match node.kind() {
        "type_identifier" => Ok((text(node, ctx.src).to_owned(), pointer)),
        "pointer_type" if !pointer => receiver_base(ctx, operand(node)?, true),
        // `List[T]` records as `List`
        "generic_type" => receiver_base(ctx, field(node, "type")?, pointer),
        "parenthesized_type" => receiver_base(ctx, operand(node)?, pointer),
        other => Err(ResolveError::UnsupportedReceiver {
            kind: other.to_owned(),
        }),
    }
}

fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_names_start_upper_case() {
        assert!(is_exported("New"));
        assert!(is_exported("Ĥello"));
        assert!(!is_exported("helper"));
        assert!(!is_exported("_Hidden"));
        assert!(!is_exported(""));
    }
}
