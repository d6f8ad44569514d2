//! Zero-value synthesis.
//!
//! Maps a canonical type string (as produced by the normalizer) to a Go
//! expression that is a valid zero value of that type.

use std::collections::{BTreeMap, BTreeSet};

use gomock_core::MockModel;
use gomock_core::builtins::{NIL, builtin_zero};

/// Prefixes of type strings that can only be zeroed with `nil`.
const NIL_PREFIXES: &[&str] = &["func(", "func (", "chan ", "chan<-", "<-chan", "interface{", "interface {"];

/// Zero value of `ty` with no knowledge of the types declared around it.
#[must_use]
pub fn default_value(ty: &str) -> String {
    ZeroValues::default().value_for(ty)
}

/// Zero-value synthesizer aware of interface names and of the underlying
/// types of locally declared names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroValues<'a> {
    nil_types: Option<&'a BTreeSet<String>>,
    underlying: Option<&'a BTreeMap<String, String>>,
}

/// How a bare (pointer-stripped) type is zeroed.
enum Zero {
    Nil,
    /// A constant expression: `0`, `""`, `Status(0)`.
    Literal(String),
    Composite(String),
}

impl<'a> ZeroValues<'a> {
    /// Treat every name in `nil_types` as an interface.
    #[must_use]
    pub const fn new(nil_types: &'a BTreeSet<String>) -> Self {
        Self {
            nil_types: Some(nil_types),
            underlying: None,
        }
    }

    /// Use everything `model` knows about the source file's types.
    #[must_use]
    pub const fn for_model(model: &'a MockModel) -> Self {
        Self {
            nil_types: Some(&model.nil_types),
            underlying: Some(&model.underlying),
        }
    }

    /// Zero-value expression for `ty`.
    ///
    /// ```
    /// use gomock_codegen::default_value;
    /// assert_eq!(default_value("int"), "0");
    /// assert_eq!(default_value("*Widget"), "&Widget{}");
    /// assert_eq!(default_value("pkg.Counter"), "pkg.Counter{}");
    /// ```
    #[must_use]
    pub fn value_for(&self, ty: &str) -> String {
        let ty = ty.trim();
        if let Some(elem) = ty.strip_prefix("...") {
            return format!("[]{elem}{{}}");
        }

        match ty.strip_prefix('*') {
            Some(inner) => match self.bare(inner, 0) {
                Zero::Nil => NIL.to_string(),
                Zero::Literal(_) => format!("new({inner})"),
                Zero::Composite(literal) => format!("&{literal}"),
            },
            None => match self.bare(ty, 0) {
                Zero::Nil => NIL.to_string(),
                Zero::Literal(literal) | Zero::Composite(literal) => literal,
            },
        }
    }

    fn bare(&self, ty: &str, depth: usize) -> Zero {
        if is_identifier_path(ty)
            && let Some((_, last)) = ty.rsplit_once('.')
            && let Some(zero) = builtin_zero(last)
        {
            return literal(zero);
        }
        if let Some(zero) = builtin_zero(ty) {
            return literal(zero);
        }
        if ty.starts_with('*')
            || NIL_PREFIXES.iter().any(|prefix| ty.starts_with(prefix))
            || self.nil_types.is_some_and(|set| set.contains(ty))
        {
            return Zero::Nil;
        }
        if let Some(declared) = self.underlying
            && depth < declared.len()
            && let Some(under) = declared.get(ty)
        {
            return match self.bare(under, depth + 1) {
                Zero::Nil => Zero::Nil,
                Zero::Literal(zero) => Zero::Literal(format!("{ty}({zero})")),
                Zero::Composite(_) => Zero::Composite(format!("{ty}{{}}")),
            };
        }
        Zero::Composite(format!("{ty}{{}}"))
    }
}

fn literal(zero: &'static str) -> Zero {
    if zero == NIL {
        Zero::Nil
    } else {
        Zero::Literal(zero.to_string())
    }
}

/// `true` for `Name` or `pkg.Name`.
fn is_identifier_path(ty: &str) -> bool {
    !ty.is_empty()
        && ty
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c == '_' || c.is_alphanumeric()))
}
