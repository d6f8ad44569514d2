//! Type expression normalization.
//!
//! A Go type node is first lifted into a closed [`TypeExpr`] and then rendered
//! to its canonical string. The same renderer serves both the plain and the
//! package-qualified output; the [`Qualifier`] decides which.

use std::fmt;

use ast_grep_core::Node;
use gomock_core::builtins::is_builtin;

/// Package qualification applied while rendering a [`TypeExpr`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Qualifier<'a> {
    package: Option<&'a str>,
}

impl<'a> Qualifier<'a> {
    /// Render local names as written.
    #[must_use]
    pub const fn none() -> Self {
        Self { package: None }
    }

    /// Prefix unqualified, non-builtin names with `package`.
    #[must_use]
    pub const fn package(package: &'a str) -> Self {
        Self {
            package: Some(package),
        }
    }

    fn apply(self, name: &str) -> String {
        match self.package {
            Some(package) if !is_builtin(name) && !name.contains('.') => {
                format!("{package}.{name}")
            }
            _ => name.to_string(),
        }
    }
}

/// The type expression shapes the generator understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A plain identifier: `int`, `Widget`.
    Named(String),
    /// A package-qualified identifier: `time.Time`.
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    /// A fixed-size array; the length expression is kept as written.
    Array { len: String, elem: Box<TypeExpr> },
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    /// A trailing `...T` parameter.
    Variadic(Box<TypeExpr>),
    /// Any other shape, printed from source with whitespace collapsed.
    Verbatim(String),
}

impl TypeExpr {
    /// Lift a Go type node into a `TypeExpr`.
    ///
    /// Shapes without a dedicated variant (channels, function types, inline
    /// interfaces and structs, generic instantiations) become `Verbatim`.
    pub fn from_node<D: ast_grep_core::Doc>(node: &Node<D>) -> Self {
        let kind = node.kind();
        match kind.as_ref() {
            "type_identifier" | "identifier" => Self::Named(node.text().to_string()),
            "qualified_type" => match (node.field("package"), node.field("name")) {
                (Some(package), Some(name)) => Self::Qualified {
                    package: package.text().to_string(),
                    name: name.text().to_string(),
                },
                _ => Self::verbatim(node),
            },
            "pointer_type" => node.children().last().map_or_else(
                || Self::verbatim(node),
                |inner| Self::Pointer(Box::new(Self::from_node(&inner))),
            ),
            "slice_type" => node.field("element").map_or_else(
                || Self::verbatim(node),
                |elem| Self::Slice(Box::new(Self::from_node(&elem))),
            ),
            "array_type" => match (node.field("length"), node.field("element")) {
                (Some(len), Some(elem)) => Self::Array {
                    len: collapse_whitespace(&len.text()),
                    elem: Box::new(Self::from_node(&elem)),
                },
                _ => Self::verbatim(node),
            },
            "map_type" => match (node.field("key"), node.field("value")) {
                (Some(key), Some(value)) => Self::Map {
                    key: Box::new(Self::from_node(&key)),
                    value: Box::new(Self::from_node(&value)),
                },
                _ => Self::verbatim(node),
            },
            _ => Self::verbatim(node),
        }
    }

    /// Wrap `elem` as the element type of a variadic parameter.
    #[must_use]
    pub fn variadic(elem: Self) -> Self {
        Self::Variadic(Box::new(elem))
    }

    fn verbatim<D: ast_grep_core::Doc>(node: &Node<D>) -> Self {
        Self::Verbatim(collapse_whitespace(&node.text()))
    }

    /// Canonical string for this type under `qualifier`.
    #[must_use]
    pub fn render(&self, qualifier: Qualifier<'_>) -> String {
        match self {
            Self::Named(name) => qualifier.apply(name),
            Self::Qualified { package, name } => format!("{package}.{name}"),
            Self::Pointer(inner) => format!("*{}", inner.render(qualifier)),
            Self::Slice(elem) => format!("[]{}", elem.render(qualifier)),
            Self::Array { len, elem } => format!("[{len}]{}", elem.render(qualifier)),
            Self::Map { key, value } => {
                format!("map[{}]{}", key.render(qualifier), value.render(qualifier))
            }
            Self::Variadic(elem) => format!("...{}", elem.render(qualifier)),
            Self::Verbatim(text) => text.clone(),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(Qualifier::none()))
    }
}

/// Normalize a Go type node in one step.
pub fn normalize_node<D: ast_grep_core::Doc>(node: &Node<D>, qualifier: Qualifier<'_>) -> String {
    TypeExpr::from_node(node).render(qualifier)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use ast_grep_language::{LanguageExt, SupportLang};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Parse `var x <ty>` and return the declared type lifted into a `TypeExpr`.
    fn lift(ty: &str) -> TypeExpr {
        let source = format!("package shapes\n\nvar x {ty}\n");
        let root = SupportLang::Go.ast_grep(&source);
        let spec = root
            .root()
            .find(ast_grep_core::matcher::KindMatcher::new(
                "var_spec",
                SupportLang::Go,
            ))
            .expect("var_spec should parse");
        let ty_node = spec.field("type").expect("var_spec should have a type");
        TypeExpr::from_node(&ty_node)
    }

    fn plain(ty: &str) -> String {
        lift(ty).render(Qualifier::none())
    }

    fn qualified(ty: &str) -> String {
        lift(ty).render(Qualifier::package("shapes"))
    }

    #[test]
    fn named_type_unchanged_without_qualifier() {
        assert_eq!(plain("Widget"), "Widget");
        assert_eq!(plain("int"), "int");
    }

    #[test]
    fn shapes_lift_to_dedicated_variants() {
        assert_eq!(
            lift("*Widget"),
            TypeExpr::Pointer(Box::new(TypeExpr::Named("Widget".to_string())))
        );
        assert_eq!(
            lift("time.Time"),
            TypeExpr::Qualified {
                package: "time".to_string(),
                name: "Time".to_string()
            }
        );
        assert!(matches!(lift("[]int"), TypeExpr::Slice(_)));
        assert!(matches!(lift("[4]byte"), TypeExpr::Array { .. }));
        assert!(matches!(lift("map[string]int"), TypeExpr::Map { .. }));
    }

    #[test]
    fn composite_shapes_render_canonically() {
        assert_eq!(plain("*Widget"), "*Widget");
        assert_eq!(plain("[]int"), "[]int");
        assert_eq!(plain("[4]byte"), "[4]byte");
        assert_eq!(plain("map[string][]*Widget"), "map[string][]*Widget");
        assert_eq!(plain("time.Time"), "time.Time");
    }

    #[test]
    fn qualification_prefixes_local_types_only() {
        assert_eq!(qualified("Widget"), "shapes.Widget");
        assert_eq!(qualified("int"), "int");
        assert_eq!(qualified("error"), "error");
        assert_eq!(qualified("time.Time"), "time.Time");
    }

    #[test]
    fn qualification_recurses_into_composites() {
        assert_eq!(qualified("*Widget"), "*shapes.Widget");
        assert_eq!(qualified("[]Widget"), "[]shapes.Widget");
        assert_eq!(
            qualified("map[Key]*Widget"),
            "map[shapes.Key]*shapes.Widget"
        );
        assert_eq!(qualified("map[string]int"), "map[string]int");
    }

    #[test]
    fn variadic_wraps_element() {
        let v = TypeExpr::variadic(TypeExpr::Named("Option".to_string()));
        assert_eq!(v.render(Qualifier::none()), "...Option");
        assert_eq!(v.render(Qualifier::package("shapes")), "...shapes.Option");
    }

    #[test]
    fn unhandled_shapes_fall_back_to_source_text() {
        assert_eq!(plain("chan   int"), "chan int");
        assert_eq!(plain("func(a int) error"), "func(a int) error");
        assert_eq!(qualified("chan Widget"), "chan Widget");
        assert!(matches!(lift("interface{}"), TypeExpr::Verbatim(_)));
    }

    #[test]
    fn display_renders_unqualified() {
        assert_eq!(lift("[]*Widget").to_string(), "[]*Widget");
    }
}
