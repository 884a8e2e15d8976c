// Allow must_use_candidate since fluent configuration methods are routinely
// called for their side effect on the expectation node
#![allow(clippy::must_use_candidate)]

//! The dual-mode mock object at the heart of the crate.
//!
//! A [`Mock`] is a node in an expectation tree. While in [`Mode::Learning`],
//! every call recorded through it creates a child node representing "this
//! method called with these arguments"; the child is returned so count
//! expectations and an invocation strategy can be configured fluently. After
//! [`Mock::freeze`] flips the tree to [`Mode::Collecting`], calls are
//! dispatched to the matching recorded child instead, and
//! [`Mock::assert_expectations`] verifies call counts over the whole tree.
//!
//! # Example
//!
//! ```rust
//! use doublekit::mock::Mock;
//! use serde_json::json;
//!
//! let api = Mock::new();
//! api.expect("fetch", &[json!("users")])?.twice().and_return(json!([1, 2]));
//! api.freeze();
//!
//! for _ in 0..2 {
//!     let users = api.call("fetch", &[json!("users")])?.into_value();
//!     assert_eq!(users, Some(json!([1, 2])));
//! }
//! api.assert_expectations()?;
//! # Ok::<(), doublekit::Error>(())
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{Error, Result};

use super::key::{render_args, ArgKey};

/// Phase of a [`Mock`]'s record/replay state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Calls are interpreted as expectation recordings.
    Learning,
    /// Calls are dispatched against previously recorded expectations.
    Collecting,
}

/// Kind of a configured call-count expectation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountKind {
    /// The actual count must equal the configured count.
    Exactly,
    /// The actual count must be at least the configured count.
    AtLeast,
    /// The actual count must be at most the configured count.
    NoMoreThan,
}

#[derive(Clone, Copy, Debug)]
struct CountRule {
    kind: CountKind,
    count: usize,
}

/// Callback installed with [`Mock::and_callback`].
///
/// Receives the original argument list of the dispatched call; any error it
/// returns propagates unchanged to the caller.
pub type CallbackFn = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

#[derive(Clone)]
enum Strategy {
    Return(Value),
    Throw(Value),
    Callback(CallbackFn),
}

impl Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Return(value) => f.debug_tuple("Return").field(value).finish(),
            Self::Throw(value) => f.debug_tuple("Throw").field(value).finish(),
            Self::Callback(_) => f.debug_tuple("Callback").finish(),
        }
    }
}

/// What a dispatched or recorded call produced.
#[derive(Clone, Debug)]
pub enum Outcome {
    /// A plain value, produced by a `Return` or `Callback` strategy.
    Value(Value),
    /// A mock handle: the freshly recorded child in learning mode, or the
    /// dispatched node itself when no strategy was configured.
    Mock(Mock),
}

impl Outcome {
    /// Extract the value, if the outcome carries one.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Mock(_) => None,
        }
    }

    /// Extract the mock handle, if the outcome carries one.
    #[must_use]
    pub fn into_mock(self) -> Option<Mock> {
        match self {
            Self::Mock(mock) => Some(mock),
            Self::Value(_) => None,
        }
    }

    /// Check whether the outcome carries a mock handle.
    #[must_use]
    pub fn is_mock(&self) -> bool {
        matches!(self, Self::Mock(_))
    }
}

struct Inner {
    mode: Mode,
    methods: HashMap<String, HashMap<ArgKey, Mock>>,
    rule: Option<CountRule>,
    strategy: Option<Strategy>,
    name: String,
    recorded_args: Vec<Value>,
    calls: usize,
}

impl Inner {
    fn check_own_rule(&self) -> Result<()> {
        let Some(rule) = self.rule else {
            return Ok(());
        };
        let passed = match rule.kind {
            CountKind::Exactly => self.calls == rule.count,
            CountKind::AtLeast => self.calls >= rule.count,
            CountKind::NoMoreThan => self.calls <= rule.count,
        };
        if passed {
            return Ok(());
        }
        let method = self.name.clone();
        Err(match rule.kind {
            CountKind::Exactly => Error::ExpectedExactly {
                method,
                expected: rule.count,
                actual: self.calls,
            },
            CountKind::AtLeast => Error::ExpectedAtLeast {
                method,
                expected: rule.count,
                actual: self.calls,
            },
            CountKind::NoMoreThan => Error::ExpectedNoMoreThan {
                method,
                expected: rule.count,
                actual: self.calls,
            },
        })
    }

    fn children(&self) -> Vec<Mock> {
        self.methods
            .values()
            .flat_map(|by_args| by_args.values().cloned())
            .collect()
    }
}

/// A record-and-replay test double.
///
/// `Mock` is a cheap cloneable handle: clones share the same underlying
/// expectation node, so the child returned while recording is the same node
/// later resolved during dispatch.
///
/// The node is either the root double for a collaborator or a recorded
/// expectation for one specific (method name, argument combination) pair,
/// created lazily the first time that pair is recorded.
#[derive(Clone)]
pub struct Mock {
    inner: Arc<Mutex<Inner>>,
}

impl Mock {
    /// Create a root mock with nothing recorded, in learning mode.
    #[must_use]
    pub fn new() -> Self {
        Self::node(String::new(), Vec::new())
    }

    fn node(name: String, recorded_args: Vec<Value>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                mode: Mode::Learning,
                methods: HashMap::new(),
                rule: None,
                strategy: None,
                name,
                recorded_args,
                calls: 0,
            })),
        }
    }

    /// Current phase of this node.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.inner.lock().mode
    }

    /// Method name this node was recorded for (empty for a root).
    #[must_use]
    pub fn name(&self) -> String {
        self.inner.lock().name.clone()
    }

    /// Argument list this node was recorded for (empty for a root).
    #[must_use]
    pub fn recorded_args(&self) -> Vec<Value> {
        self.inner.lock().recorded_args.clone()
    }

    /// Number of completed invocations dispatched to this node.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.inner.lock().calls
    }

    /// The generic call entry point.
    ///
    /// In learning mode this records a child for `(method, args)` — replacing
    /// any earlier recording for the identical argument combination — and
    /// returns it as [`Outcome::Mock`]. In collecting mode it resolves the
    /// recorded child (exact argument match first, then the no-args entry as a
    /// wildcard) and dispatches to it; a call with no match fails with
    /// [`Error::UnexpectedCall`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedCall`] for an unmatched collecting-mode
    /// call, [`Error::Thrown`] when the resolved expectation is configured to
    /// throw, or whatever error a configured callback returns.
    pub fn call(&self, method: &str, args: &[Value]) -> Result<Outcome> {
        let key = ArgKey::for_args(args);
        let mut inner = self.inner.lock();
        match inner.mode {
            Mode::Learning => {
                trace!(method, "recording expectation");
                let child = Mock::node(method.to_string(), args.to_vec());
                inner
                    .methods
                    .entry(method.to_string())
                    .or_default()
                    .insert(key, child.clone());
                Ok(Outcome::Mock(child))
            }
            Mode::Collecting => {
                let target = inner.methods.get(method).and_then(|by_args| {
                    by_args.get(&key).or_else(|| by_args.get(&ArgKey::Any)).cloned()
                });
                // Release the lock before invoking the child so strategies may
                // re-enter this mock.
                drop(inner);
                match target {
                    Some(child) => child.dispatch(args),
                    None => Err(Error::UnexpectedCall {
                        method: method.to_string(),
                        args: render_args(args),
                    }),
                }
            }
        }
    }

    /// Property-read convention: a zero-argument call.
    ///
    /// # Errors
    ///
    /// Same contract as [`Mock::call`].
    pub fn get(&self, property: &str) -> Result<Outcome> {
        self.call(property, &[])
    }

    /// Learning-phase sugar: record `(method, args)` and return the child
    /// directly for fluent configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when called on a frozen mock,
    /// where dispatch has replaced recording.
    pub fn expect(&self, method: &str, args: &[Value]) -> Result<Mock> {
        if self.mode() == Mode::Collecting {
            return Err(Error::invalid_configuration(format!(
                "cannot record `{method}` on a frozen mock"
            )));
        }
        match self.call(method, args)? {
            Outcome::Mock(child) => Ok(child),
            Outcome::Value(_) => Err(Error::invalid_configuration(format!(
                "recording `{method}` did not produce an expectation"
            ))),
        }
    }

    /// Flip this node and every already-recorded descendant to collecting
    /// mode. Idempotent; there is no way back to learning mode.
    pub fn freeze(&self) -> &Self {
        let children = {
            let mut inner = self.inner.lock();
            if inner.mode == Mode::Learning {
                debug!(name = %inner.name, "freezing mock subtree");
            }
            inner.mode = Mode::Collecting;
            inner.children()
        };
        for child in children {
            child.freeze();
        }
        self
    }

    /// Verify call-count expectations over this node and every recorded
    /// descendant, whether or not it was ever dispatched to.
    ///
    /// # Errors
    ///
    /// Returns the first failing node's count mismatch: one of
    /// [`Error::ExpectedExactly`], [`Error::ExpectedAtLeast`], or
    /// [`Error::ExpectedNoMoreThan`]. Nodes with no configured rule always
    /// pass.
    pub fn assert_expectations(&self) -> Result<()> {
        let children = {
            let inner = self.inner.lock();
            inner.check_own_rule()?;
            inner.children()
        };
        for child in children {
            child.assert_expectations()?;
        }
        Ok(())
    }

    fn dispatch(&self, args: &[Value]) -> Result<Outcome> {
        let strategy = {
            let mut inner = self.inner.lock();
            inner.calls += 1;
            debug!(method = %inner.name, calls = inner.calls, "dispatching recorded call");
            inner.strategy.clone()
        };
        match strategy {
            Some(Strategy::Return(value)) => Ok(Outcome::Value(value)),
            Some(Strategy::Throw(value)) => Err(Error::Thrown(value)),
            // The lock is already released, so the callback may re-enter
            // this mock.
            Some(Strategy::Callback(callback)) => callback(args).map(Outcome::Value),
            // No strategy: hand this same node back so unconfigured chained
            // calls keep resolving against its own method table.
            None => Ok(Outcome::Mock(self.clone())),
        }
    }

    fn set_rule(&self, kind: CountKind, count: usize) -> &Self {
        self.inner.lock().rule = Some(CountRule { kind, count });
        self
    }

    fn set_strategy(&self, strategy: Strategy) -> &Self {
        self.inner.lock().strategy = Some(strategy);
        self
    }

    /// Expect exactly one call.
    pub fn once(&self) -> &Self {
        self.set_rule(CountKind::Exactly, 1)
    }

    /// Expect exactly two calls.
    pub fn twice(&self) -> &Self {
        self.set_rule(CountKind::Exactly, 2)
    }

    /// Expect no calls at all.
    pub fn never(&self) -> &Self {
        self.set_rule(CountKind::Exactly, 0)
    }

    /// Expect exactly `count` calls.
    pub fn exactly(&self, count: usize) -> &Self {
        self.set_rule(CountKind::Exactly, count)
    }

    /// Expect at least one call.
    pub fn at_least_once(&self) -> &Self {
        self.set_rule(CountKind::AtLeast, 1)
    }

    /// Expect at least `count` calls.
    pub fn at_least(&self, count: usize) -> &Self {
        self.set_rule(CountKind::AtLeast, count)
    }

    /// Expect at most one call.
    pub fn no_more_than_once(&self) -> &Self {
        self.set_rule(CountKind::NoMoreThan, 1)
    }

    /// Expect at most `count` calls.
    pub fn no_more_than(&self, count: usize) -> &Self {
        self.set_rule(CountKind::NoMoreThan, count)
    }

    /// Dispatched calls produce `value`.
    pub fn and_return(&self, value: impl Into<Value>) -> &Self {
        self.set_strategy(Strategy::Return(value.into()))
    }

    /// Dispatched calls fail with [`Error::Thrown`] carrying `error`.
    pub fn and_throw(&self, error: impl Into<Value>) -> &Self {
        self.set_strategy(Strategy::Throw(error.into()))
    }

    /// Dispatched calls delegate to `callback` with the original arguments.
    pub fn and_callback<F>(&self, callback: F) -> &Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.set_strategy(Strategy::Callback(Arc::new(callback)))
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Mock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Mock")
            .field("name", &inner.name)
            .field("mode", &inner.mode)
            .field("calls", &inner.calls)
            .field("rule", &inner.rule)
            .field("strategy", &inner.strategy)
            .field("methods", &inner.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}
