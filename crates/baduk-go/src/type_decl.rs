//! `type` declarations: interfaces and their method sets.

use baduk_core::{DeclarationError, Interface, Method, ResolveError};
use tracing::debug;
use tree_sitter::Node;

use crate::dispatch::Context;
use crate::signature::resolve_signature;
use crate::syntax::{field, location, named_children, text};

/// Collects one [`Interface`] per interface-typed spec in a `type` group.
///
/// Aliases, struct and other non-interface specs are skipped. A failing
/// interface is rejected whole without affecting its siblings.
pub(crate) fn collect_interfaces(
    ctx: &Context<'_>,
    group: Node<'_>,
) -> Vec<Result<Interface, DeclarationError>> {
    named_children(group)
        .into_iter()
        .filter_map(|spec| interface_spec(ctx, spec))
        .collect()
}

fn interface_spec(ctx: &Context<'_>, spec: Node<'_>) -> Option<Result<Interface, DeclarationError>> {
    if spec.kind() != "type_spec" {
        return None;
    }
    let name = text(spec.child_by_field_name("name")?, ctx.src);
    let ty = spec.child_by_field_name("type")?;
    if ty.kind() != "interface_type" {
        debug!("Skipping non-interface type {name} ({})", ty.kind());
        return None;
    }
    if spec.child_by_field_name("type_parameters").is_some() {
        debug!("Skipping generic interface {name}");
        return None;
    }

    let methods = method_set(ctx, ty).map_err(|source| {
        DeclarationError::new(location(spec, ctx.path), name, source)
    });
    Some(methods.map(|methods| {
        debug!("Collected interface {name} with {} method(s)", methods.len());
        Interface {
            name: name.to_owned(),
            methods,
        }
    }))
}

fn method_set(ctx: &Context<'_>, interface: Node<'_>) -> Result<Vec<Method>, ResolveError> {
    let mut methods = Vec::new();
    for elem in named_children(interface) {
        match elem.kind() {
            // `method_spec` in older grammar releases
            "method_elem" | "method_spec" => {
                let name = text(field(elem, "name")?, ctx.src);
                let sig = resolve_signature(&ctx.resolver, elem)?;
                methods.push(Method::new(name, sig.params, sig.results));
            }
            other => debug!("Skipping interface element {other}"),
        }
    }
    Ok(methods)
}
