//! Typed accessors over dynamically-typed documents.
//!
//! Every persisted file is read into a [`serde_json::Value`] tree first and
//! picked apart with the accessors below. The contract throughout the save
//! layer is that a missing key is a default, never an error: documents written
//! by older or newer engine versions stay readable.

use serde_json::Value;

/// Default-preserving accessors for structured documents.
pub trait DocumentExt {
    /// Returns the string at `key`, or `None` if absent or not a string.
    fn str_of(&self, key: &str) -> Option<&str>;

    /// Returns the unsigned integer at `key`, or `default` if absent or
    /// not an unsigned integer.
    fn u64_of_or(&self, key: &str, default: u64) -> u64;

    /// Returns the signed integer at `key`, or `default`.
    fn i64_of_or(&self, key: &str, default: i64) -> i64;

    /// Returns the float at `key`, or `default`. Integers coerce to float.
    fn f64_of_or(&self, key: &str, default: f64) -> f64;

    /// Returns the boolean at `key`, or `default`.
    fn bool_of_or(&self, key: &str, default: bool) -> bool;

    /// Returns the array at `key` as a slice, empty if absent or not an array.
    fn entries_of(&self, key: &str) -> &[Value];
}

impl DocumentExt for Value {
    fn str_of(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn u64_of_or(&self, key: &str, default: u64) -> u64 {
        self.get(key).and_then(Value::as_u64).unwrap_or(default)
    }

    fn i64_of_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(default)
    }

    fn f64_of_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).and_then(Value::as_f64).unwrap_or(default)
    }

    fn bool_of_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    fn entries_of(&self, key: &str) -> &[Value] {
        self.get(key)
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }
}
