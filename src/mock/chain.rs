//! Permissive placeholder for deep configuration chains.
//!
//! A [`ChainProxy`] stands in for an access path that has no recorded state
//! yet. A call whose name has a bound handler is forwarded to that handler's
//! mock; any other call or property access resolves to the proxy itself, so an
//! intermediate unset step never fails the chain.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::Result;

use super::double::{Mock, Outcome};

/// What a [`ChainProxy`] call resolved to.
#[derive(Clone, Debug)]
pub enum ChainOutcome {
    /// The call name had a bound handler; carries the handler's result.
    Forwarded(Outcome),
    /// No handler was bound; the proxy hands itself back so the chain can
    /// continue.
    Chain(ChainProxy),
}

/// No-op-safe wrapper for chained accesses on unset paths.
#[derive(Clone, Debug, Default)]
pub struct ChainProxy {
    handlers: Arc<Mutex<HashMap<String, Mock>>>,
}

impl ChainProxy {
    /// Create a proxy with no handlers bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` as the mock that receives calls named `method`.
    /// Rebinding the same name replaces the previous handler.
    pub fn bind(&self, method: impl Into<String>, handler: Mock) -> &Self {
        self.handlers.lock().insert(method.into(), handler);
        self
    }

    /// Forward `method` to its bound handler, or hand the proxy back when no
    /// handler was bound.
    ///
    /// # Errors
    ///
    /// Propagates whatever the bound handler's [`Mock::call`] returns;
    /// unbound calls never fail.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<ChainOutcome> {
        let handler = self.handlers.lock().get(method).cloned();
        match handler {
            Some(mock) => Ok(ChainOutcome::Forwarded(mock.call(method, args)?)),
            None => Ok(ChainOutcome::Chain(self.clone())),
        }
    }

    /// Property-style access always resolves to the proxy itself.
    #[must_use]
    pub fn get(&self, _property: &str) -> ChainProxy {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unbound_call_returns_proxy() {
        let proxy = ChainProxy::new();
        let outcome = proxy.call("anything", &[json!(1)]).unwrap();
        assert!(matches!(outcome, ChainOutcome::Chain(_)));
    }

    #[test]
    fn test_bound_call_forwards_to_mock() {
        let mock = Mock::new();
        mock.expect("status", &[]).unwrap().and_return(json!("ok"));
        mock.freeze();

        let proxy = ChainProxy::new();
        proxy.bind("status", mock);

        match proxy.call("status", &[]).unwrap() {
            ChainOutcome::Forwarded(outcome) => {
                assert_eq!(outcome.into_value(), Some(json!("ok")));
            }
            ChainOutcome::Chain(_) => panic!("expected forwarded outcome"),
        }
    }

    #[test]
    fn test_property_access_keeps_chaining() {
        let proxy = ChainProxy::new();
        let deep = proxy.get("a").get("b").get("c");
        assert!(matches!(
            deep.call("still_fine", &[]).unwrap(),
            ChainOutcome::Chain(_)
        ));
    }

    #[test]
    fn test_rebinding_replaces_handler() {
        let first = Mock::new();
        first.expect("load", &[]).unwrap().and_return(json!("first"));
        first.freeze();
        let second = Mock::new();
        second.expect("load", &[]).unwrap().and_return(json!("second"));
        second.freeze();

        let proxy = ChainProxy::new();
        proxy.bind("load", first).bind("load", second);

        match proxy.call("load", &[]).unwrap() {
            ChainOutcome::Forwarded(outcome) => {
                assert_eq!(outcome.into_value(), Some(json!("second")));
            }
            ChainOutcome::Chain(_) => panic!("expected forwarded outcome"),
        }
    }
}
