//! Interface resolution: find a named interface and flatten its method set.
//!
//! Embedded interfaces declared in the same file are expanded in place, at the
//! position of the embedding line. References that cannot be expanded
//! (qualified `io.Reader`, undeclared names, cycles) are skipped with a warning.

use std::collections::BTreeMap;
use std::path::Path;

use gomock_core::{MethodSig, MockModel, Param};

use crate::error::ParserError;
use crate::normalize::{Qualifier, TypeExpr};
use crate::parser::{AstTree, GoNode, package_name, parse_checked};

/// Options controlling how signatures are extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Prefix local type names with the source file's package name.
    pub qualify: bool,
}

/// A top-level type declaration.
#[derive(Clone)]
struct TypeEntry<'r> {
    /// The declared type (the `type` field of the spec).
    ty: GoNode<'r>,
    generic: bool,
}

impl TypeEntry<'_> {
    fn is_interface(&self) -> bool {
        self.ty.kind().as_ref() == "interface_type"
    }
}

/// Outcome of looking a name up in a [`SourceIndex`].
pub enum Lookup<'r> {
    Interface(GoNode<'r>),
    /// Declared, but not a (non-generic) interface.
    NotInterface,
    Missing,
}

/// Index of the top-level type declarations of one parsed file.
pub struct SourceIndex<'r> {
    package: Option<String>,
    types: BTreeMap<String, TypeEntry<'r>>,
}

impl<'r> SourceIndex<'r> {
    #[must_use]
    pub fn build(tree: &'r AstTree) -> Self {
        let mut types = BTreeMap::new();
        for decl in tree.root().children() {
            if decl.kind().as_ref() != "type_declaration" {
                continue;
            }
            for spec in decl.children() {
                let k = spec.kind();
                if k.as_ref() != "type_spec" && k.as_ref() != "type_alias" {
                    continue;
                }
                let (Some(name), Some(ty)) = (spec.field("name"), spec.field("type")) else {
                    continue;
                };
                let generic = spec.field("type_parameters").is_some();
                types
                    .entry(name.text().to_string())
                    .or_insert(TypeEntry { ty, generic });
            }
        }

        Self {
            package: package_name(tree),
            types,
        }
    }

    /// The file's package name.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Names of every interface declared at the top level, sorted.
    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .filter(|(_, entry)| entry.is_interface())
            .map(|(name, _)| name.as_str())
    }

    /// Every non-generic declaration with its declared type, sorted by name.
    pub fn declared_types(&self) -> impl Iterator<Item = (&str, &GoNode<'r>)> {
        self.types
            .iter()
            .filter(|(_, entry)| !entry.generic)
            .map(|(name, entry)| (name.as_str(), &entry.ty))
    }

    #[must_use]
    pub fn interface_count(&self) -> usize {
        self.interface_names().count()
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Lookup<'r> {
        match self.types.get(name) {
            Some(entry) if entry.is_interface() && !entry.generic => {
                Lookup::Interface(entry.ty.clone())
            }
            Some(_) => Lookup::NotInterface,
            None => Lookup::Missing,
        }
    }
}

/// Resolve interface `name` declared in the Go file at `path`.
///
/// # Errors
/// Returns `ParserError::Io` if the file cannot be read and
/// `ParserError::ParseFailed` if it is not valid Go.
pub fn resolve_file(
    path: &Path,
    name: &str,
    options: ResolveOptions,
) -> Result<MockModel, ParserError> {
    let source = std::fs::read_to_string(path)?;
    resolve_named(&source, &path.display().to_string(), name, options)
}

/// Resolve interface `name` declared in `source`.
///
/// A missing name, or a name that is not an interface, yields a model with
/// no methods rather than an error.
///
/// # Errors
/// Returns `ParserError::ParseFailed` if `source` is not valid Go.
pub fn resolve_source(
    source: &str,
    name: &str,
    options: ResolveOptions,
) -> Result<MockModel, ParserError> {
    resolve_named(source, "<source>", name, options)
}

fn resolve_named(
    source: &str,
    origin: &str,
    name: &str,
    options: ResolveOptions,
) -> Result<MockModel, ParserError> {
    let tree = parse_checked(source, origin)?;
    let index = SourceIndex::build(&tree);

    let qualifier = match index.package() {
        Some(package) if options.qualify => Qualifier::package(package),
        _ => Qualifier::none(),
    };

    let mut model = MockModel::new(name, index.package().map(str::to_string));
    model.qualify = options.qualify && model.package.is_some();
    model.nil_types = index
        .interface_names()
        .map(|iface| TypeExpr::Named(iface.to_string()).render(qualifier))
        .collect();
    model.underlying = index
        .declared_types()
        .map(|(declared, ty)| {
            (
                TypeExpr::Named(declared.to_string()).render(qualifier),
                TypeExpr::from_node(ty).render(qualifier),
            )
        })
        .collect();

    match index.lookup(name) {
        Lookup::Interface(node) => {
            let mut resolver = Resolver {
                index: &index,
                qualifier,
                expanding: Vec::new(),
            };
            resolver.collect_methods(name, &node, &mut model.methods);
            tracing::debug!(
                interface = name,
                methods = model.methods.len(),
                "resolved interface"
            );
        }
        Lookup::NotInterface => {
            tracing::debug!(interface = name, %origin, "type is not a non-generic interface");
        }
        Lookup::Missing => {
            tracing::debug!(interface = name, %origin, "no type declaration with this name");
        }
    }

    model.validate()?;
    Ok(model)
}

struct Resolver<'i, 'r> {
    index: &'i SourceIndex<'r>,
    qualifier: Qualifier<'i>,
    /// Interfaces currently being expanded, outermost first.
    expanding: Vec<String>,
}

impl<'r> Resolver<'_, 'r> {
    fn collect_methods(&mut self, name: &str, iface: &GoNode<'r>, out: &mut Vec<MethodSig>) {
        self.expanding.push(name.to_string());
        for member in iface.children() {
            let k = member.kind();
            match k.as_ref() {
                "method_elem" | "method_spec" => {
                    if let Some(method) = self.method(&member) {
                        out.push(method);
                    }
                }
                "type_elem" | "constraint_elem" => self.embed_elem(&member, out),
                "type_identifier" | "qualified_type" => self.embed(&member, out),
                _ => {}
            }
        }
        self.expanding.pop();
    }

    fn embed_elem(&mut self, elem: &GoNode<'r>, out: &mut Vec<MethodSig>) {
        let terms: Vec<_> = elem
            .children()
            .filter(|c| !matches!(c.kind().as_ref(), "|" | "comment"))
            .collect();
        match terms.as_slice() {
            [single] => self.embed(single, out),
            _ => tracing::debug!(
                element = %elem.text(),
                "skipping type-set element; it contributes no methods"
            ),
        }
    }

    fn embed(&mut self, reference: &GoNode<'r>, out: &mut Vec<MethodSig>) {
        let embedder = self.expanding.last().cloned().unwrap_or_default();
        let k = reference.kind();
        match k.as_ref() {
            "type_identifier" => {
                let target = reference.text().to_string();
                if self.expanding.contains(&target)
                    || self.expanding.len() > self.index.interface_count()
                {
                    tracing::warn!(
                        interface = %embedder,
                        embedded = %target,
                        "cyclic interface embedding; skipping"
                    );
                    return;
                }
                match self.index.lookup(&target) {
                    Lookup::Interface(node) => self.collect_methods(&target, &node, out),
                    Lookup::NotInterface | Lookup::Missing => tracing::warn!(
                        interface = %embedder,
                        embedded = %target,
                        "embedded interface is not declared in this file; its methods are skipped"
                    ),
                }
            }
            "qualified_type" => tracing::warn!(
                interface = %embedder,
                embedded = %reference.text(),
                "embedded interface from another package; its methods are skipped"
            ),
            _ => tracing::debug!(
                interface = %embedder,
                element = %reference.text(),
                "skipping non-interface embedded element"
            ),
        }
    }

    fn method(&self, member: &GoNode<'r>) -> Option<MethodSig> {
        let name = member
            .field("name")
            .or_else(|| {
                member
                    .children()
                    .find(|c| c.kind().as_ref() == "field_identifier")
            })?
            .text()
            .to_string();

        let mut sig = MethodSig::new(name);
        if let Some(params) = member.field("parameters") {
            sig.params = self.slots(&params);
        }
        if let Some(result) = member.field("result") {
            sig.returns = if result.kind().as_ref() == "parameter_list" {
                self.slots(&result)
            } else {
                vec![Param::unnamed(self.render(&result))]
            };
        }
        sig.fill_synthesized_names();
        Some(sig)
    }

    /// Flatten a `parameter_list` into one slot per declared name.
    fn slots(&self, list: &GoNode<'r>) -> Vec<Param> {
        let mut slots = Vec::new();
        for decl in list.children() {
            let k = decl.kind();
            match k.as_ref() {
                "parameter_declaration" => {
                    let Some(ty_node) = decl.field("type") else {
                        continue;
                    };
                    let ty = self.render(&ty_node);
                    let names: Vec<String> = decl
                        .children()
                        .filter(|c| c.kind().as_ref() == "identifier")
                        .map(|c| c.text().to_string())
                        .collect();
                    if names.is_empty() {
                        slots.push(Param::unnamed(ty));
                    } else {
                        slots.extend(names.into_iter().map(|n| Param::new(n, ty.clone())));
                    }
                }
                "variadic_parameter_declaration" => {
                    let Some(ty_node) = decl.field("type") else {
                        continue;
                    };
                    let ty = TypeExpr::variadic(TypeExpr::from_node(&ty_node)).render(self.qualifier);
                    let name = decl
                        .field("name")
                        .map(|n| n.text().to_string())
                        .unwrap_or_default();
                    slots.push(Param::new(name, ty));
                }
                _ => {}
            }
        }
        slots
    }

    fn render(&self, node: &GoNode<'r>) -> String {
        TypeExpr::from_node(node).render(self.qualifier)
    }
}
