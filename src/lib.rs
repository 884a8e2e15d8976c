//! # doublekit 🎭
//!
//! > Record-and-replay test doubles for Rust
//!
//! **doublekit** lets a test author stand in for any collaborator: record the
//! calls you expect (and what they should produce) while the mock is in its
//! *learning* phase, freeze it, then let the system under test make real calls
//! that are dispatched against the recorded expectations in the *collecting*
//! phase, and finally verify call counts.
//!
//! ## Quick Start
//!
//! ```rust
//! use doublekit::mock::mock;
//! use serde_json::json;
//!
//! let storage = mock();
//!
//! // Learning phase: record expectations with fluent configuration.
//! storage.expect("load", &[json!(1)])?.once().and_return(json!("row one"));
//!
//! // Freeze flips the whole recorded tree to collecting mode.
//! storage.freeze();
//!
//! // Collecting phase: real calls dispatch to the recorded expectation.
//! let row = storage.call("load", &[json!(1)])?.into_value();
//! assert_eq!(row, Some(json!("row one")));
//!
//! // Verification walks the entire recorded tree.
//! storage.assert_expectations()?;
//! # Ok::<(), doublekit::Error>(())
//! ```
//!
//! ## Features
//!
//! - 🎭 **Dual-Mode Mocks** - Record expectations, then replay and verify
//! - 🔢 **Count Expectations** - `once`, `exactly(n)`, `at_least(n)`, `no_more_than(n)`
//! - 🎬 **Invocation Strategies** - Return a value, raise an error, or delegate to a callback
//! - 🌳 **Recursive Composition** - Stubbed calls return mocks, freezable and verifiable as a tree
//! - 🔗 **Chain Proxies** - Deep fluent configuration chains that never fail midway

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod mock;
pub mod stub;

/// Prelude for convenient imports
///
/// ```rust
/// use doublekit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::mock::{mock, ChainProxy, Mock, MockBuilder, Mode, Outcome};
}

// Re-exports
pub use error::{Error, Result};
pub use mock::{mock, Mock};

#[cfg(test)]
mod tests {
    #[test]
    fn test_placeholder() {
        // Placeholder test
        assert_eq!(2 + 2, 4);
    }
}
