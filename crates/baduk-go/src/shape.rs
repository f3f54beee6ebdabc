//! Type shape resolution: Go type expressions to [`Type`].

use baduk_core::{ResolveError, Type, DEFAULT_MAX_TYPE_DEPTH};
use tree_sitter::Node;

use crate::syntax::{field, operand, text};

/// Resolves type-expression nodes of one source file.
///
/// Each step recurses into exactly one child, so depth equals the number
/// of modifiers written in source. The cap only guards adversarial input.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'src> {
    src: &'src [u8],
    max_depth: usize,
}

impl<'src> TypeResolver<'src> {
    /// Creates a resolver over `src` with the default depth cap.
    #[must_use]
    pub fn new(src: &'src [u8]) -> Self {
        Self {
            src,
            max_depth: DEFAULT_MAX_TYPE_DEPTH,
        }
    }

    /// Sets the maximum number of nested modifiers.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolves a type expression, or the `...T` of a
    /// `variadic_parameter_declaration`.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnsupportedTypeShape`] for maps, channels, function
    /// types, inline struct/interface literals, generic instantiations and
    /// non-literal array lengths; [`ResolveError::TooDeeplyNested`] past the cap.
    pub fn resolve(&self, node: Node<'_>) -> Result<Type, ResolveError> {
        self.resolve_at(node, 0)
    }

    fn resolve_at(&self, node: Node<'_>, depth: usize) -> Result<Type, ResolveError> {
        if depth > self.max_depth {
            return Err(ResolveError::TooDeeplyNested {
                limit: self.max_depth,
            });
        }

        match node.kind() {
            "type_identifier" | "identifier" => Ok(Type::named(text(node, self.src))),
            "qualified_type" => {
                let package = field(node, "package")?;
                let name = field(node, "name")?;
                Ok(Type::qualified(
                    text(package, self.src),
                    text(name, self.src),
                ))
            }
            "pointer_type" => Ok(Type::pointer(self.resolve_at(operand(node)?, depth + 1)?)),
            "slice_type" => Ok(Type::slice(
                self.resolve_at(field(node, "element")?, depth + 1)?,
            )),
            "array_type" => {
                let len = self.array_length(field(node, "length")?)?;
                Ok(Type::array(
                    len,
                    self.resolve_at(field(node, "element")?, depth + 1)?,
                ))
            }
            "variadic_parameter_declaration" => Ok(Type::variadic(
                self.resolve_at(field(node, "type")?, depth + 1)?,
            )),
            // `(T)` is the same shape as `T`
            "parenthesized_type" => self.resolve_at(operand(node)?, depth + 1),
            other => Err(ResolveError::unsupported(other)),
        }
    }

    fn array_length(&self, node: Node<'_>) -> Result<u64, ResolveError> {
        let literal = text(node, self.src);
        if node.kind() != "int_literal" {
            return Err(ResolveError::unsupported(format!(
                "array length `{literal}` ({})",
                node.kind()
            )));
        }
        parse_int_literal(literal)
            .ok_or_else(|| ResolveError::unsupported(format!("array length `{literal}`")))
    }
}

/// Parses a Go integer literal: decimal, `0x`, `0o`, legacy `0` octal, `0b`, with `_` separators.
fn parse_int_literal(literal: &str) -> Option<u64> {
    let digits: String = literal.chars().filter(|&c| c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(body) = lower.strip_prefix("0x") {
        (16, body)
    } else if let Some(body) = lower.strip_prefix("0b") {
        (2, body)
    } else if let Some(body) = lower.strip_prefix("0o") {
        (8, body)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };
    u64::from_str_radix(body, radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::named_children;
    use tree_sitter::Parser;

    /// Resolves the type of `var _ <expr>`.
    fn resolve_with(expr: &str, max_depth: usize) -> Result<Type, ResolveError> {
        let src = format!("package p\n\nvar _ {expr}\n");
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .unwrap();
        let tree = parser.parse(&src, None).unwrap();
        let root = tree.root_node();
        assert!(!root.has_error(), "fixture does not parse: {expr}");

        let decl = named_children(root)
            .into_iter()
            .find(|n| n.kind() == "var_declaration")
            .unwrap();
        let spec = named_children(decl)
            .into_iter()
            .find(|n| n.kind() == "var_spec")
            .unwrap();
        let ty = spec.child_by_field_name("type").unwrap();
        TypeResolver::new(src.as_bytes())
            .with_max_depth(max_depth)
            .resolve(ty)
    }

    fn resolve(expr: &str) -> Result<Type, ResolveError> {
        resolve_with(expr, DEFAULT_MAX_TYPE_DEPTH)
    }

    #[test]
    fn resolves_named_and_qualified() {
        assert_eq!(resolve("int").unwrap(), Type::named("int"));
        assert_eq!(resolve("io.Reader").unwrap(), Type::qualified("io", "Reader"));
    }

    #[test]
    fn deepest_fixture_round_trips() {
        let ty = resolve("**[]**[2]**int").unwrap();
        assert_eq!(
            ty,
            Type::pointer(Type::pointer(Type::slice(Type::pointer(Type::pointer(
                Type::array(2, Type::pointer(Type::pointer(Type::named("int"))))
            )))))
        );
        assert_eq!(ty.to_string(), "**[]**[2]**int");
    }

    #[test]
    fn modifiers_round_trip_in_any_order() {
        for expr in [
            "*int",
            "[]string",
            "[3]string",
            "[]*int",
            "[]***string",
            "*[]io.Reader",
            "[4][]*[8]bytes.Buffer",
            "***[1][2][3]T",
            "[]*[]*[]*[]*x.Y",
        ] {
            assert_eq!(resolve(expr).unwrap().to_string(), expr);
        }
    }

    #[test]
    fn array_lengths_accept_go_literal_forms() {
        assert_eq!(resolve("[0x10]byte").unwrap(), Type::array(16, Type::named("byte")));
        assert_eq!(resolve("[1_000]byte").unwrap().to_string(), "[1000]byte");
        assert_eq!(resolve("[0b11]byte").unwrap().to_string(), "[3]byte");
        assert_eq!(resolve("[0o17]byte").unwrap().to_string(), "[15]byte");
        assert_eq!(resolve("[017]byte").unwrap().to_string(), "[15]byte");
        assert_eq!(resolve("[0]byte").unwrap().to_string(), "[0]byte");
    }

    #[test]
    fn unsupported_shapes_name_their_kind() {
        for (expr, kind) in [
            ("map[string]int", "map_type"),
            ("chan int", "channel_type"),
            ("func(int) error", "function_type"),
            ("struct{}", "struct_type"),
            ("interface{}", "interface_type"),
            ("[]map[string]int", "map_type"),
        ] {
            assert_eq!(
                resolve(expr).unwrap_err(),
                ResolveError::unsupported(kind),
                "{expr}"
            );
        }
    }

    #[test]
    fn constant_array_length_is_unsupported() {
        let err = resolve("[N]int").unwrap_err();
        assert!(
            matches!(&err, ResolveError::UnsupportedTypeShape { kind } if kind.contains("array length `N`")),
            "{err:?}"
        );
    }

    #[test]
    fn depth_cap_is_enforced() {
        assert_eq!(resolve_with("**int", 2).unwrap().to_string(), "**int");
        assert_eq!(
            resolve_with("***int", 2).unwrap_err(),
            ResolveError::TooDeeplyNested { limit: 2 }
        );
    }

    #[test]
    fn parse_int_literal_rejects_garbage() {
        assert_eq!(parse_int_literal("12"), Some(12));
        assert_eq!(parse_int_literal("0x"), None);
        assert_eq!(parse_int_literal("09"), None);
    }
}
