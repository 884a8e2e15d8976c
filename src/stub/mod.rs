//! Source emission for typed substitute types.
//!
//! The core mock is dynamic; this module is the thin bridge toward
//! statically-typed substitutes. A caller describes the public operations of
//! a target type with [`TypeSpec`] (Rust has no runtime reflection, so the
//! description is supplied or loaded from JSON — the spec types derive serde
//! traits), and [`StubGenerator`] emits Rust source for a struct that wraps a
//! [`Mock`](crate::mock::Mock) and delegates every described method to it.
//!
//! # Example
//!
//! ```rust
//! use doublekit::stub::{MethodSpec, ParamSpec, StubGenerator, TypeSpec};
//!
//! let target = TypeSpec {
//!     name: "UserRepo".to_string(),
//!     methods: vec![MethodSpec {
//!         name: "find".to_string(),
//!         params: vec![ParamSpec {
//!             name: "id".to_string(),
//!             position: 0,
//!             default: None,
//!             type_hint: Some("u64".to_string()),
//!         }],
//!         is_static: false,
//!     }],
//! };
//!
//! let source = StubGenerator::new().generate(&target, Some("UserRepoStub"));
//! assert!(source.contains("pub struct UserRepoStub"));
//! assert!(source.contains("self.mock.call(\"find\""));
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One parameter of a stubbed method.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name.
    pub name: String,
    /// Zero-based position in the parameter list.
    pub position: usize,
    /// Declared default value, when the target declares one.
    #[serde(default)]
    pub default: Option<Value>,
    /// Declared type, when the target names one.
    #[serde(default)]
    pub type_hint: Option<String>,
}

/// One public operation of the target type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MethodSpec {
    /// Method name.
    pub name: String,
    /// Parameters, in declaration order.
    pub params: Vec<ParamSpec>,
    /// Whether the operation is associated rather than instance-bound.
    #[serde(default)]
    pub is_static: bool,
}

/// Everything the generator needs to know about the target type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TypeSpec {
    /// Name of the type being substituted.
    pub name: String,
    /// Its public operations.
    pub methods: Vec<MethodSpec>,
}

// Suffix for generated names when the caller does not pick one.
static STUB_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Emits Rust source for a substitute type backed by a mock.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubGenerator;

impl StubGenerator {
    /// Create a generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emit source for a substitute of `target`.
    ///
    /// With `new_name` unset, a process-unique name is derived from the
    /// target's name.
    #[must_use]
    pub fn generate(&self, target: &TypeSpec, new_name: Option<&str>) -> String {
        let struct_name = match new_name {
            Some(name) => name.to_string(),
            None => format!("{}Stub{}", target.name, STUB_SEQ.fetch_add(1, Ordering::Relaxed)),
        };

        let mut out = String::new();
        out.push_str(&format!(
            "/// Generated substitute for `{}`.\npub struct {struct_name} {{\n    mock: doublekit::Mock,\n}}\n\n",
            target.name
        ));
        out.push_str(&format!("impl {struct_name} {{\n"));
        out.push_str(
            "    pub fn from_mock(mock: doublekit::Mock) -> Self {\n        Self { mock }\n    }\n",
        );
        for method in &target.methods {
            out.push('\n');
            out.push_str(&Self::emit_method(method));
        }
        out.push_str("}\n");
        out
    }

    fn emit_method(method: &MethodSpec) -> String {
        let mut params = method.params.clone();
        params.sort_by_key(|param| param.position);

        let mut out = String::new();
        for param in &params {
            if param.type_hint.is_some() || param.default.is_some() {
                out.push_str(&format!(
                    "    /// `{}`: {}{}\n",
                    param.name,
                    param.type_hint.as_deref().unwrap_or("untyped"),
                    param
                        .default
                        .as_ref()
                        .map(|default| format!(", default {default}"))
                        .unwrap_or_default(),
                ));
            }
        }

        let receiver = if method.is_static {
            "mock: &doublekit::Mock"
        } else {
            "&self"
        };
        let mock_expr = if method.is_static { "mock" } else { "self.mock" };
        let param_list: Vec<String> = params
            .iter()
            .map(|param| format!("{}: serde_json::Value", param.name))
            .collect();
        let arg_list: Vec<String> = params.iter().map(|param| param.name.clone()).collect();

        out.push_str(&format!(
            "    pub fn {name}({receiver}{sep}{params}) -> doublekit::Result<doublekit::mock::Outcome> {{\n        {mock_expr}.call(\"{name}\", &[{args}])\n    }}\n",
            name = method.name,
            sep = if param_list.is_empty() { "" } else { ", " },
            params = param_list.join(", "),
            args = arg_list.join(", "),
        ));
        out
    }
}
