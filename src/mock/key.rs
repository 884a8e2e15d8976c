//! Argument fingerprinting for expectation lookup.
//!
//! Two argument lists select the same recorded expectation iff their structural
//! JSON serializations are byte-identical. The empty argument list maps to
//! [`ArgKey::Any`], which also serves as the wildcard entry during
//! collecting-mode dispatch.

use serde_json::Value;

/// Key identifying one argument combination for a method.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArgKey {
    /// Sentinel for the empty argument list; doubles as the catch-all entry
    /// when dispatch finds no exact match.
    Any,
    /// Structural fingerprint of a non-empty argument list.
    Exact(String),
}

impl ArgKey {
    /// Compute the key for an argument list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use doublekit::mock::ArgKey;
    /// use serde_json::json;
    ///
    /// assert_eq!(ArgKey::for_args(&[]), ArgKey::Any);
    /// assert_eq!(
    ///     ArgKey::for_args(&[json!(1), json!("a")]),
    ///     ArgKey::for_args(&[json!(1), json!("a")]),
    /// );
    /// ```
    #[must_use]
    pub fn for_args(args: &[Value]) -> Self {
        if args.is_empty() {
            ArgKey::Any
        } else {
            ArgKey::Exact(render_args(args))
        }
    }
}

/// Structural rendering of an argument list, used both as the fingerprint and
/// in diagnostics.
///
/// `serde_json::Value` objects store keys sorted, so serialization is
/// deterministic: equal-by-value argument lists always render identically.
/// A list that fails to serialize falls back to its `Debug` rendering.
pub(crate) fn render_args(args: &[Value]) -> String {
    serde_json::to_string(args).unwrap_or_else(|_| format!("{args:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_empty_args_use_sentinel() {
        assert_eq!(ArgKey::for_args(&[]), ArgKey::Any);
    }

    #[test]
    fn test_equal_args_share_key() {
        let a = ArgKey::for_args(&[json!(1), json!({"x": true})]);
        let b = ArgKey::for_args(&[json!(1), json!({"x": true})]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_argument_order_matters() {
        let a = ArgKey::for_args(&[json!(1), json!(2)]);
        let b = ArgKey::for_args(&[json!(2), json!(1)]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_key_order_is_irrelevant() {
        // serde_json sorts object keys, so these are the same combination.
        let a: Value = serde_json::from_str(r#"{"a": 1, "b": 2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b": 2, "a": 1}"#).unwrap();
        assert_eq!(ArgKey::for_args(&[a]), ArgKey::for_args(&[b]));
    }

    #[test]
    fn test_nested_structures_fingerprint() {
        let a = ArgKey::for_args(&[json!({"rows": [1, 2, {"id": 3}]})]);
        let b = ArgKey::for_args(&[json!({"rows": [1, 2, {"id": 4}]})]);
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn equal_lists_always_share_a_key(n in any::<i64>(), s in ".*") {
            let a = ArgKey::for_args(&[json!(n), json!(s.clone())]);
            let b = ArgKey::for_args(&[json!(n), json!(s)]);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn distinct_integers_get_distinct_keys(a in any::<i64>(), b in any::<i64>()) {
            prop_assume!(a != b);
            prop_assert_ne!(ArgKey::for_args(&[json!(a)]), ArgKey::for_args(&[json!(b)]));
        }

        #[test]
        fn non_empty_lists_never_collide_with_the_sentinel(n in any::<i64>()) {
            prop_assert_ne!(ArgKey::for_args(&[json!(n)]), ArgKey::Any);
        }
    }
}
