//! Small helpers over tree-sitter nodes.

use baduk_core::{Location, ResolveError};
use std::path::Path;
use tree_sitter::Node;

pub(crate) fn text<'a>(node: Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Named children, comments excluded.
pub(crate) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// The single operand of a prefix node such as `pointer_type`.
pub(crate) fn operand(node: Node<'_>) -> Result<Node<'_>, ResolveError> {
    named_children(node)
        .into_iter()
        .next()
        .ok_or_else(|| ResolveError::unsupported(format!("empty {}", node.kind())))
}

pub(crate) fn field<'tree>(node: Node<'tree>, name: &str) -> Result<Node<'tree>, ResolveError> {
    node.child_by_field_name(name)
        .ok_or_else(|| ResolveError::unsupported(format!("{} without {name}", node.kind())))
}

pub(crate) fn location(node: Node<'_>, path: &Path) -> Location {
    let pos = node.start_position();
    Location::new(path, pos.row + 1, pos.column + 1)
}
