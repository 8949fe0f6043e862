//! Log payload values
//!
//! `LogValue` is a JSON-like value whose arrays and objects are shared
//! handles. A handle can be stored inside itself (directly or through other
//! containers), so payloads may form arbitrary graphs, cycles included.
//! Rendering such a graph is the job of [`crate::core::serializer`].

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Ordered property storage for object nodes
pub type ObjectMap = IndexMap<String, LogValue>;

/// Shared, mutable object node
#[derive(Clone, Default)]
pub struct SharedObject(Arc<RwLock<ObjectMap>>);

/// Shared, mutable array node
#[derive(Clone, Default)]
pub struct SharedArray(Arc<RwLock<Vec<LogValue>>>);

#[derive(Clone, Default)]
pub enum LogValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(SharedArray),
    Object(SharedObject),
}

impl SharedObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property, keeping the original position on replace
    pub fn insert(&self, key: impl Into<String>, value: impl Into<LogValue>) -> Option<LogValue> {
        self.0.write().insert(key.into(), value.into())
    }

    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<LogValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<LogValue> {
        self.0.read().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    pub fn remove(&self, key: &str) -> Option<LogValue> {
        self.0.write().shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Snapshot of the properties in insertion order.
    ///
    /// The lock is released before the caller sees the entries, so walking a
    /// cyclic graph never re-enters a held lock.
    pub fn entries(&self) -> Vec<(String, LogValue)> {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &SharedObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl SharedArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, value: impl Into<LogValue>) {
        self.0.write().push(value.into());
    }

    #[must_use]
    pub fn with(self, value: impl Into<LogValue>) -> Self {
        self.push(value);
        self
    }

    pub fn get(&self, index: usize) -> Option<LogValue> {
        self.0.read().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Snapshot of the elements
    pub fn items(&self) -> Vec<LogValue> {
        self.0.read().clone()
    }

    pub fn ptr_eq(&self, other: &SharedArray) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl LogValue {
    /// A fresh, empty object node
    pub fn object() -> SharedObject {
        SharedObject::new()
    }

    /// A fresh, empty array node
    pub fn array() -> SharedArray {
        SharedArray::new()
    }

    /// Build an error-shaped object: exactly `name`, `message` and `stack`.
    pub fn error(
        name: impl Into<String>,
        message: impl Into<String>,
        stack: impl Into<String>,
    ) -> LogValue {
        LogValue::Object(
            SharedObject::new()
                .with("name", name.into())
                .with("message", message.into())
                .with("stack", stack.into()),
        )
    }

    /// Capture a Rust error as an error-shaped object.
    ///
    /// `name` is the error's type name, `stack` lists the `source()` chain.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> LogValue {
        let name = short_type_name::<E>();
        let message = err.to_string();
        let mut stack = format!("{}: {}", name, message);
        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        LogValue::error(name, message, stack)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, LogValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&SharedObject> {
        match self {
            LogValue::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&SharedArray> {
        match self {
            LogValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Strict identity: primitives compare by value (numbers numerically),
    /// containers only when they are the same node.
    pub fn same_value(&self, other: &LogValue) -> bool {
        match (self, other) {
            (LogValue::Null, LogValue::Null) => true,
            (LogValue::Bool(a), LogValue::Bool(b)) => a == b,
            (LogValue::Number(a), LogValue::Number(b)) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
            (LogValue::String(a), LogValue::String(b)) => a == b,
            (LogValue::Array(a), LogValue::Array(b)) => a.ptr_eq(b),
            (LogValue::Object(a), LogValue::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// True for objects carrying `name`, `message` and `stack` properties
    pub fn is_error_shaped(&self) -> bool {
        match self {
            LogValue::Object(o) => {
                let map = o.0.read();
                map.contains_key("name") && map.contains_key("message") && map.contains_key("stack")
            }
            _ => false,
        }
    }

    /// Plain JSON snapshot; cyclic references become circular markers.
    pub fn to_json(&self) -> serde_json::Value {
        crate::core::serializer::snapshot(self)
    }

    pub(crate) fn container_addr(&self) -> Option<usize> {
        match self {
            LogValue::Array(a) => Some(a.addr()),
            LogValue::Object(o) => Some(o.addr()),
            _ => None,
        }
    }
}

fn short_type_name<E: ?Sized>() -> String {
    let full = std::any::type_name::<E>();
    if full.starts_with("dyn ") {
        return "Error".to_string();
    }
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

impl fmt::Debug for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl fmt::Debug for SharedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&LogValue::Object(self.clone()), f)
    }
}

impl fmt::Debug for SharedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&LogValue::Array(self.clone()), f)
    }
}

impl Serialize for LogValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LogValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(LogValue::from)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LogValue {
                fn from(n: $t) -> Self {
                    LogValue::Number(n.into())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        serde_json::Number::from_f64(f)
            .map(LogValue::Number)
            .unwrap_or(LogValue::Null)
    }
}

impl From<f32> for LogValue {
    fn from(f: f32) -> Self {
        LogValue::from(f as f64)
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::String(s)
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::String(s.to_string())
    }
}

impl From<SharedObject> for LogValue {
    fn from(o: SharedObject) -> Self {
        LogValue::Object(o)
    }
}

impl From<SharedArray> for LogValue {
    fn from(a: SharedArray) -> Self {
        LogValue::Array(a)
    }
}

impl From<Vec<LogValue>> for LogValue {
    fn from(items: Vec<LogValue>) -> Self {
        LogValue::Array(SharedArray(Arc::new(RwLock::new(items))))
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(LogValue::Null)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => LogValue::Null,
            serde_json::Value::Bool(b) => LogValue::Bool(b),
            serde_json::Value::Number(n) => LogValue::Number(n),
            serde_json::Value::String(s) => LogValue::String(s),
            serde_json::Value::Array(items) => {
                LogValue::from(items.into_iter().map(LogValue::from).collect::<Vec<_>>())
            }
            serde_json::Value::Object(map) => {
                let object: ObjectMap = map
                    .into_iter()
                    .map(|(k, v)| (k, LogValue::from(v)))
                    .collect();
                LogValue::Object(SharedObject(Arc::new(RwLock::new(object))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "disk unplugged")
        }
    }

    impl StdError for Inner {}

    #[derive(Debug)]
    struct SaveFailed(Inner);

    impl fmt::Display for SaveFailed {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "could not save profile")
        }
    }

    impl StdError for SaveFailed {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_from_json_keeps_order() {
        let value = LogValue::from(json!({"z": 1, "a": [true, null], "m": "x"}));
        let obj = value.as_object().unwrap();
        let keys: Vec<String> = obj.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(value.to_json(), json!({"z": 1, "a": [true, null], "m": "x"}));
    }

    #[test]
    fn test_same_value_identity() {
        let a = LogValue::object();
        let b = LogValue::object();
        assert!(LogValue::from(a.clone()).same_value(&LogValue::from(a.clone())));
        assert!(!LogValue::from(a).same_value(&LogValue::from(b)));
        assert!(LogValue::from("x").same_value(&LogValue::from("x")));
        assert!(LogValue::from(1).same_value(&LogValue::from(1.0)));
        assert!(!LogValue::from("1").same_value(&LogValue::from(1)));
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(LogValue::from(f64::NAN).is_null());
        assert!(LogValue::from(f64::INFINITY).is_null());
    }

    #[test]
    fn test_from_error_is_error_shaped() {
        let value = LogValue::from_error(&SaveFailed(Inner));
        assert!(value.is_error_shaped());
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("name").unwrap().as_str(), Some("SaveFailed"));
        assert_eq!(obj.get("message").unwrap().as_str(), Some("could not save profile"));
        let stack = obj.get("stack").unwrap();
        assert!(stack.as_str().unwrap().contains("caused by: disk unplugged"));
    }

    #[test]
    fn test_debug_survives_cycle() {
        let obj = LogValue::object();
        obj.insert("me", obj.clone());
        let rendered = format!("{:?}", obj);
        assert!(rendered.contains("[Circular ~]"));
    }
}
