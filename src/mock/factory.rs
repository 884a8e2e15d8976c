//! Convenience factory for preconfigured mocks.
//!
//! [`mock`] hands out an empty learning-mode root. [`MockBuilder`] seeds a
//! root with default members before handing it over: a value binding installs
//! a no-args child that returns the value on access (the property
//! convention), a callback binding installs a no-args child that delegates to
//! the callback unconditionally.

use serde_json::Value;

use crate::error::Result;

use super::double::Mock;

type BoxedCallback = Box<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

enum Binding {
    Value(Value),
    Callback(BoxedCallback),
}

/// Builder that populates a fresh [`Mock`] with default members.
///
/// The built mock is still in learning mode, so further expectations can be
/// recorded before freezing.
///
/// # Example
///
/// ```rust
/// use doublekit::mock::MockBuilder;
/// use serde_json::json;
///
/// let user = MockBuilder::new()
///     .value("id", json!(7))
///     .callback("greet", |_| Ok(json!("hello")))
///     .build()?;
/// user.freeze();
///
/// assert_eq!(user.get("id")?.into_value(), Some(json!(7)));
/// assert_eq!(user.call("greet", &[])?.into_value(), Some(json!("hello")));
/// # Ok::<(), doublekit::Error>(())
/// ```
#[derive(Default)]
pub struct MockBuilder {
    bindings: Vec<(String, Binding)>,
}

impl MockBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `member` as a plain property returning `value` on access.
    #[must_use]
    pub fn value(mut self, member: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bindings
            .push((member.into(), Binding::Value(value.into())));
        self
    }

    /// Install `member` as an unconditional callback invoked with the
    /// original argument list.
    #[must_use]
    pub fn callback<F>(mut self, member: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.bindings
            .push((member.into(), Binding::Callback(Box::new(callback))));
        self
    }

    /// Record every binding on a fresh root mock and return it, still in
    /// learning mode. Within the builder, the last binding for a member wins.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature follows [`Mock::expect`].
    pub fn build(self) -> Result<Mock> {
        let mock = Mock::new();
        for (member, binding) in self.bindings {
            let child = mock.expect(&member, &[])?;
            match binding {
                Binding::Value(value) => {
                    child.and_return(value);
                }
                Binding::Callback(callback) => {
                    child.and_callback(callback);
                }
            }
        }
        Ok(mock)
    }
}

/// Create a fresh mock with nothing recorded, in learning mode.
#[must_use]
pub fn mock() -> Mock {
    Mock::new()
}
