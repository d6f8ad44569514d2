//! The resolved mock model handed from the resolver to the emitter.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Prefix for synthesized names of unnamed parameters.
pub const PARAM_PREFIX: &str = "paramVar";

/// Prefix for synthesized names of unnamed return slots.
pub const RETURN_PREFIX: &str = "retVar";

/// A parameter or return slot: a (possibly synthesized) name and a canonical type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// A slot with no name yet. The name is synthesized later.
    pub fn unnamed(ty: impl Into<String>) -> Self {
        Self::new(String::new(), ty)
    }

    /// `true` for a trailing `...T` parameter.
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        self.ty.starts_with("...")
    }
}

/// One method of the flattened interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Vec<Param>,
}

impl MethodSig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: Vec::new(),
        }
    }

    /// Assign `paramVar<i>` / `retVar<i>` to every slot that has no name.
    ///
    /// `i` is the 0-based slot position. The blank identifier `_` counts as no
    /// name, since a forwarding call cannot pass it on.
    pub fn fill_synthesized_names(&mut self) {
        fill_names(&mut self.params, PARAM_PREFIX);
        fill_names(&mut self.returns, RETURN_PREFIX);
    }

    fn validate(&self) -> Result<(), CoreError> {
        for (index, slot) in self.params.iter().chain(&self.returns).enumerate() {
            if slot.ty.trim().is_empty() {
                return Err(CoreError::EmptyType {
                    method: self.name.clone(),
                    index,
                });
            }
        }
        if let Some(pos) = self.params.iter().position(Param::is_variadic)
            && pos + 1 != self.params.len()
        {
            return Err(CoreError::Validation(format!(
                "method {}: variadic parameter must be last",
                self.name
            )));
        }
        Ok(())
    }
}

fn fill_names(slots: &mut [Param], prefix: &str) {
    for (index, slot) in slots.iter_mut().enumerate() {
        if slot.name.is_empty() || slot.name == "_" {
            slot.name = format!("{prefix}{index}");
        }
    }
}

/// Everything the emitter needs to render one mock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockModel {
    /// Name of the mocked interface; the mock struct is derived from it.
    pub struct_name: String,
    /// Package clause of the source file.
    pub package: Option<String>,
    /// Whether local type names were qualified with `package`.
    pub qualify: bool,
    /// Flattened method set in declaration order.
    pub methods: Vec<MethodSig>,
    /// Canonical names of types known to be interfaces; their zero value is `nil`.
    pub nil_types: BTreeSet<String>,
    /// Underlying type of each non-generic type declared in the source file,
    /// both sides canonical. `Status` -> `int`, `Handler` -> `func(int)`.
    pub underlying: BTreeMap<String, String>,
}

impl MockModel {
    pub fn new(struct_name: impl Into<String>, package: Option<String>) -> Self {
        Self {
            struct_name: struct_name.into(),
            package,
            ..Self::default()
        }
    }

    /// No methods: the interface was not found or is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// The interface name as it must be written outside its package.
    #[must_use]
    pub fn interface_ref(&self) -> String {
        match (&self.package, self.qualify) {
            (Some(package), true) => format!("{package}.{}", self.struct_name),
            _ => self.struct_name.clone(),
        }
    }

    /// Check model invariants: every method is named and every slot has a type.
    ///
    /// # Errors
    /// Returns the first `CoreError` found.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (index, method) in self.methods.iter().enumerate() {
            if method.name.is_empty() {
                return Err(CoreError::UnnamedMethod {
                    interface: self.struct_name.clone(),
                    index,
                });
            }
            method.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn method(params: Vec<Param>, returns: Vec<Param>) -> MethodSig {
        MethodSig {
            name: "Do".to_string(),
            params,
            returns,
        }
    }

    #[test]
    fn synthesized_names_fill_only_empty_slots() {
        let mut m = method(
            vec![
                Param::unnamed("[]int"),
                Param::new("b", "string"),
                Param::new("_", "int"),
            ],
            vec![Param::unnamed("error")],
        );
        m.fill_synthesized_names();
        assert_eq!(m.params[0].name, "paramVar0");
        assert_eq!(m.params[1].name, "b");
        assert_eq!(m.params[2].name, "paramVar2");
        assert_eq!(m.returns[0].name, "retVar0");
    }

    #[test]
    fn variadic_detection() {
        assert!(Param::new("args", "...interface{}").is_variadic());
        assert!(!Param::new("n", "[]int").is_variadic());
    }

    #[test]
    fn validate_rejects_empty_type() {
        let mut model = MockModel::new("Store", None);
        model.methods.push(method(vec![Param::new("a", " ")], vec![]));
        let err = model.validate().expect_err("empty type must fail");
        assert!(matches!(err, CoreError::EmptyType { index: 0, .. }));
    }

    #[test]
    fn validate_rejects_non_trailing_variadic() {
        let mut model = MockModel::new("Store", None);
        model.methods.push(method(
            vec![Param::new("a", "...int"), Param::new("b", "int")],
            vec![],
        ));
        assert!(matches!(model.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn validate_rejects_unnamed_method() {
        let mut model = MockModel::new("Store", None);
        model.methods.push(MethodSig::new(""));
        assert!(matches!(
            model.validate(),
            Err(CoreError::UnnamedMethod { index: 0, .. })
        ));
    }

    #[test]
    fn interface_ref_respects_qualification() {
        let mut model = MockModel::new("Store", Some("shapes".to_string()));
        assert_eq!(model.interface_ref(), "Store");
        model.qualify = true;
        assert_eq!(model.interface_ref(), "shapes.Store");
    }

    #[test]
    fn model_serializes_methods_in_order() {
        let mut model = MockModel::new("Store", Some("demo".to_string()));
        model.methods.push(MethodSig::new("First"));
        model.methods.push(MethodSig::new("Second"));
        let value = serde_json::to_value(&model).expect("serialize model");
        assert_eq!(value["methods"][0]["name"], "First");
        assert_eq!(value["methods"][1]["name"], "Second");
        assert_eq!(value["package"], "demo");
    }
}
