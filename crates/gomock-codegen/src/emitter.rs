//! Mock source emission.
//!
//! Renders a resolved [`MockModel`] as Go source: an optional wrapper
//! interface and constructor, the mock struct with one callback field per
//! method, and a forwarding method per callback.

use gomock_core::{MethodSig, MockModel, Param};

use crate::zero::ZeroValues;

/// Fallback prefix for a parameter that still has no name at render time.
const FALLBACK_PARAM_PREFIX: &str = "param";

const RECEIVER: &str = "m";

/// Options controlling what [`render`] emits around the mock struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Emit `<Mock>Interface` and the `Mock()` accessor.
    pub wrapper: bool,
    /// Emit `New<Mock>()`.
    pub constructor: bool,
    /// Emit a generated-code notice and a `package` clause.
    pub header: bool,
    /// Prefix of every callback field name.
    pub callback_prefix: String,
    /// Appended to the interface name to name the mock struct.
    pub mock_suffix: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            wrapper: true,
            constructor: true,
            header: false,
            callback_prefix: "Callback".to_string(),
            mock_suffix: "Mock".to_string(),
        }
    }
}

/// Render the mock for `model`.
///
/// Returns an empty string when the model has no methods, which is how an
/// interface that was not found surfaces.
#[must_use]
pub fn render(model: &MockModel, options: &EmitOptions) -> String {
    if model.is_empty() {
        tracing::debug!(interface = %model.struct_name, "nothing to render");
        return String::new();
    }

    let emitter = Emitter {
        model,
        options,
        mock: format!("{}{}", model.struct_name, options.mock_suffix),
        zeros: ZeroValues::for_model(model),
    };

    let mut blocks = Vec::new();
    if options.header {
        blocks.push(emitter.header());
    }
    if options.wrapper {
        blocks.push(emitter.wrapper());
        blocks.push(emitter.accessor());
    }
    if options.constructor {
        blocks.push(emitter.constructor());
    }
    blocks.push(emitter.mock_struct());
    blocks.extend(model.methods.iter().map(|method| emitter.method(method)));

    tracing::debug!(
        interface = %model.struct_name,
        methods = model.methods.len(),
        "rendered mock"
    );
    blocks.join("\n\n") + "\n"
}

struct Emitter<'a> {
    model: &'a MockModel,
    options: &'a EmitOptions,
    mock: String,
    zeros: ZeroValues<'a>,
}

impl Emitter<'_> {
    fn header(&self) -> String {
        let notice = "// Code generated by gomock. DO NOT EDIT.";
        match self.package() {
            Some(package) => format!("{notice}\n\npackage {package}"),
            None => notice.to_string(),
        }
    }

    /// Package of the generated file: the source package, or `<pkg>mock`
    /// when types are qualified and the mock lives outside it.
    fn package(&self) -> Option<String> {
        let package = self.model.package.as_deref()?;
        Some(if self.model.qualify {
            format!("{package}mock")
        } else {
            package.to_string()
        })
    }

    fn wrapper_name(&self) -> String {
        format!("{}Interface", self.mock)
    }

    fn wrapper(&self) -> String {
        let wrapper = self.wrapper_name();
        format!(
            "// {wrapper} is {iface} plus access to the underlying mock.\n\
             type {wrapper} interface {{\n\
             \t{iface}\n\
             \tMock() *{mock}\n\
             }}",
            iface = self.model.interface_ref(),
            mock = self.mock,
        )
    }

    fn accessor(&self) -> String {
        format!(
            "// Mock returns the mock itself so callbacks can be set through {wrapper}.\n\
             func ({RECEIVER} *{mock}) Mock() *{mock} {{\n\
             \treturn {RECEIVER}\n\
             }}",
            wrapper = self.wrapper_name(),
            mock = self.mock,
        )
    }

    fn constructor(&self) -> String {
        let returns = if self.options.wrapper {
            self.wrapper_name()
        } else {
            format!("*{}", self.mock)
        };
        format!(
            "// New{mock} returns a {mock} with no callbacks set.\n\
             func New{mock}() {returns} {{\n\
             \treturn &{mock}{{}}\n\
             }}",
            mock = self.mock,
        )
    }

    fn mock_struct(&self) -> String {
        let callbacks: Vec<String> = self
            .model
            .methods
            .iter()
            .map(|method| self.callback(method))
            .collect();
        let width = callbacks.iter().map(String::len).max().unwrap_or_default();
        let fields: Vec<String> = callbacks
            .iter()
            .zip(&self.model.methods)
            .map(|(callback, method)| {
                let names = SlotNames::for_method(method);
                format!("\t{callback:<width$} func{}", signature(method, &names))
            })
            .collect();
        format!(
            "// {mock} implements {iface}. Each method calls its {prefix} field when set\n\
             // and returns zero values otherwise.\n\
             type {mock} struct {{\n\
             {fields}\n\
             }}",
            mock = self.mock,
            iface = self.model.interface_ref(),
            prefix = self.options.callback_prefix,
            fields = fields.join("\n"),
        )
    }

    fn method(&self, method: &MethodSig) -> String {
        let names = SlotNames::for_method(method);
        let receiver = &names.receiver;
        let field = self.callback(method);
        let callback = format!("{receiver}.{field}");
        let args: Vec<String> = names
            .params
            .iter()
            .zip(&method.params)
            .map(|(name, param)| {
                if param.is_variadic() {
                    format!("{name}...")
                } else {
                    name.clone()
                }
            })
            .collect();
        let call = format!("{callback}({})", args.join(", "));

        let body = if method.returns.is_empty() {
            format!("\tif {callback} != nil {{\n\t\t{call}\n\t}}")
        } else {
            let zeros: Vec<String> = method
                .returns
                .iter()
                .map(|slot| self.zeros.value_for(&slot.ty))
                .collect();
            format!(
                "\tif {callback} != nil {{\n\t\treturn {call}\n\t}}\n\treturn {}",
                zeros.join(", ")
            )
        };

        format!(
            "// {name} calls {field} when it is set.\n\
             func ({receiver} *{mock}) {name}{sig} {{\n{body}\n}}",
            mock = self.mock,
            name = method.name,
            sig = signature(method, &names),
        )
    }

    fn callback(&self, method: &MethodSig) -> String {
        format!("{}{}", self.options.callback_prefix, method.name)
    }
}

/// Identifiers used inside one emitted method.
///
/// Parameter and return names never shadow a package referenced by the
/// method's types, since the zero-value body may spell `pkg.T{}`.
struct SlotNames {
    params: Vec<String>,
    returns: Vec<String>,
    receiver: String,
}

impl SlotNames {
    fn for_method(method: &MethodSig) -> Self {
        let mut taken: Vec<String> = method
            .params
            .iter()
            .chain(&method.returns)
            .flat_map(|slot| packages_in(&slot.ty))
            .map(str::to_string)
            .collect();

        let params = method
            .params
            .iter()
            .enumerate()
            .map(|(index, param)| {
                let name = if param.name.is_empty() {
                    format!("{FALLBACK_PARAM_PREFIX}{index}")
                } else {
                    param.name.clone()
                };
                claim(name, &mut taken)
            })
            .collect();
        let returns = method
            .returns
            .iter()
            .map(|slot| {
                if slot.name.is_empty() {
                    String::new()
                } else {
                    claim(slot.name.clone(), &mut taken)
                }
            })
            .collect();
        let receiver = claim(RECEIVER.to_string(), &mut taken);

        Self {
            params,
            returns,
            receiver,
        }
    }
}

/// Append `_` to `name` until it is unused, then mark it used.
fn claim(mut name: String, taken: &mut Vec<String>) -> String {
    while taken.contains(&name) {
        name.push('_');
    }
    taken.push(name.clone());
    name
}

/// Package names referenced by a canonical type string (`pkg` in `pkg.T`).
fn packages_in(ty: &str) -> Vec<&str> {
    let is_ident = |c: char| c == '_' || c.is_alphanumeric();
    let mut packages = Vec::new();
    for (dot, _) in ty.match_indices('.') {
        let before = &ty[..dot];
        let after = &ty[dot + 1..];
        if !after.starts_with(|c: char| c == '_' || c.is_alphabetic()) {
            continue;
        }
        let start = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_ident(*c))
            .last()
            .map_or(dot, |(index, _)| index);
        let package = &ty[start..dot];
        if package.starts_with(|c: char| c == '_' || c.is_alphabetic()) && !packages.contains(&package) {
            packages.push(package);
        }
    }
    packages
}

/// `(params) (returns)`, with the return list omitted when empty.
fn signature(method: &MethodSig, names: &SlotNames) -> String {
    let params: Vec<String> = names
        .params
        .iter()
        .zip(&method.params)
        .map(|(name, param)| format!("{name} {}", param.ty))
        .collect();
    let params = format!("({})", params.join(", "));
    if method.returns.is_empty() {
        return params;
    }
    format!("{params} ({})", returns(&method.returns, &names.returns))
}

fn returns(slots: &[Param], names: &[String]) -> String {
    slots
        .iter()
        .zip(names)
        .map(|(slot, name)| {
            if name.is_empty() {
                slot.ty.clone()
            } else {
                format!("{name} {}", slot.ty)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
