//! Record-and-replay test doubles.
//!
//! This module is the heart of the crate:
//!
//! - [`Mock`] - The dual-mode double: record expectations, then replay and verify
//! - [`MockBuilder`] / [`mock`] - Factories for fresh or defaults-populated mocks
//! - [`ChainProxy`] - Permissive placeholder for deep configuration chains
//! - [`ArgKey`] - Argument-combination fingerprinting used for dispatch
//!
//! # Recording and replaying
//!
//! ```rust
//! use doublekit::mock::mock;
//! use serde_json::json;
//!
//! let mailer = mock();
//! mailer
//!     .expect("send", &[json!("bob@example.com")])?
//!     .once()
//!     .and_return(json!(true));
//! mailer.freeze();
//!
//! let sent = mailer.call("send", &[json!("bob@example.com")])?.into_value();
//! assert_eq!(sent, Some(json!(true)));
//! mailer.assert_expectations()?;
//! # Ok::<(), doublekit::Error>(())
//! ```

mod chain;
mod double;
mod factory;
mod key;

pub use chain::{ChainOutcome, ChainProxy};
pub use double::{CallbackFn, CountKind, Mock, Mode, Outcome};
pub use factory::{mock, MockBuilder};
pub use key::ArgKey;
