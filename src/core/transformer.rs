//! Field transformers
//!
//! A transformer looks at one key/value pair during serialization and returns
//! the value to emit, or `None` to omit the field. Omitting the root drops the
//! whole line; omitting an array element leaves `null` in its slot.

use super::value::{LogValue, SharedObject};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Where a key/value pair sits in the graph being serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// The top-level value; its key is `""`
    Root,
    /// An object property
    Property,
    /// An array element; its key is the decimal index
    Element,
}

/// Position of the pair handed to a transformer
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub key: &'a str,
    pub kind: FieldKind,
    /// Keys from the root down to the container holding this field
    pub path: &'a [String],
}

impl<'a> Field<'a> {
    pub fn root() -> Field<'static> {
        Field {
            key: "",
            kind: FieldKind::Root,
            path: &[],
        }
    }

    pub fn property(key: &'a str, path: &'a [String]) -> Self {
        Field {
            key,
            kind: FieldKind::Property,
            path,
        }
    }

    pub fn element(key: &'a str, path: &'a [String]) -> Self {
        Field {
            key,
            kind: FieldKind::Element,
            path,
        }
    }

    pub fn is_root(&self) -> bool {
        self.kind == FieldKind::Root
    }
}

/// Caller-supplied transformation function
pub type FieldFn = Arc<dyn Fn(&Field<'_>, LogValue) -> Option<LogValue> + Send + Sync>;

/// What a blacklisted value turns into
#[derive(Clone, Default)]
pub enum Redaction {
    /// Drop the field entirely
    #[default]
    Omit,
    /// Emit this value in place of the match
    Replace(LogValue),
}

impl Redaction {
    fn apply(&self) -> Option<LogValue> {
        match self {
            Redaction::Omit => None,
            Redaction::Replace(v) => Some(v.clone()),
        }
    }
}

impl fmt::Debug for Redaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Redaction::Omit => write!(f, "Omit"),
            Redaction::Replace(v) => write!(f, "Replace({:?})", v),
        }
    }
}

/// One step of a transformer chain
#[derive(Clone)]
pub enum FieldTransformer {
    Function(FieldFn),
    /// Keep only listed properties. `keys` also keep their whole subtree;
    /// `pinned` keys pass but do not open their subtree.
    IncludeList {
        keys: HashSet<String>,
        pinned: HashSet<String>,
    },
    ExcludeList(HashSet<String>),
    ErrorNormalizer,
    ValueBlacklist {
        values: Vec<LogValue>,
        placeholder: Redaction,
    },
}

impl FieldTransformer {
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Field<'_>, LogValue) -> Option<LogValue> + Send + Sync + 'static,
    {
        FieldTransformer::Function(Arc::new(f))
    }

    pub fn include_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldTransformer::IncludeList {
            keys: keys.into_iter().map(Into::into).collect(),
            pinned: HashSet::new(),
        }
    }

    /// Add keys that always pass an include list
    #[must_use]
    pub fn with_pinned<I, S>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self {
            FieldTransformer::IncludeList { keys, mut pinned } => {
                pinned.extend(extra.into_iter().map(Into::into));
                FieldTransformer::IncludeList { keys, pinned }
            }
            other => other,
        }
    }

    pub fn exclude_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldTransformer::ExcludeList(keys.into_iter().map(Into::into).collect())
    }

    pub fn error_normalizer() -> Self {
        FieldTransformer::ErrorNormalizer
    }

    pub fn value_blacklist(values: Vec<LogValue>, placeholder: Redaction) -> Self {
        FieldTransformer::ValueBlacklist {
            values,
            placeholder,
        }
    }

    pub fn apply(&self, field: &Field<'_>, value: LogValue) -> Option<LogValue> {
        match self {
            FieldTransformer::Function(f) => f(field, value),
            FieldTransformer::IncludeList { keys, pinned } => {
                if field.kind != FieldKind::Property
                    || keys.contains(field.key)
                    || pinned.contains(field.key)
                    || field.path.iter().any(|ancestor| keys.contains(ancestor))
                {
                    Some(value)
                } else {
                    None
                }
            }
            FieldTransformer::ExcludeList(keys) => {
                if field.kind == FieldKind::Property && keys.contains(field.key) {
                    None
                } else {
                    Some(value)
                }
            }
            FieldTransformer::ErrorNormalizer => Some(normalize_error(value)),
            FieldTransformer::ValueBlacklist {
                values,
                placeholder,
            } => {
                if values.iter().any(|v| v.same_value(&value)) {
                    placeholder.apply()
                } else {
                    Some(value)
                }
            }
        }
    }
}

/// Flatten an error-shaped object to a fresh `{name, message, stack}` object
fn normalize_error(value: LogValue) -> LogValue {
    if !value.is_error_shaped() {
        return value;
    }
    let Some(source) = value.as_object() else {
        return value;
    };
    let plain = SharedObject::new();
    for key in ["name", "message", "stack"] {
        plain.insert(key, source.get(key).unwrap_or_default());
    }
    LogValue::Object(plain)
}

impl fmt::Debug for FieldTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTransformer::Function(_) => write!(f, "Function(..)"),
            FieldTransformer::IncludeList { keys, pinned } => f
                .debug_struct("IncludeList")
                .field("keys", keys)
                .field("pinned", pinned)
                .finish(),
            FieldTransformer::ExcludeList(keys) => f.debug_tuple("ExcludeList").field(keys).finish(),
            FieldTransformer::ErrorNormalizer => write!(f, "ErrorNormalizer"),
            FieldTransformer::ValueBlacklist {
                values,
                placeholder,
            } => f
                .debug_struct("ValueBlacklist")
                .field("values", values)
                .field("placeholder", placeholder)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop<'a>(key: &'a str, path: &'a [String]) -> Field<'a> {
        Field::property(key, path)
    }

    #[test]
    fn test_include_passes_root_and_listed() {
        let t = FieldTransformer::include_keys(["a"]);
        assert!(t.apply(&Field::root(), LogValue::from(1)).is_some());
        assert!(t.apply(&prop("a", &[]), LogValue::from(1)).is_some());
        assert!(t.apply(&prop("b", &[]), LogValue::from(1)).is_none());
    }

    #[test]
    fn test_include_opens_subtree_of_listed_key_only() {
        let t = FieldTransformer::include_keys(["a"]).with_pinned(["log"]);
        let under_a = vec!["log".to_string(), "a".to_string()];
        let under_log = vec!["log".to_string()];
        assert!(t.apply(&prop("deep", &under_a), LogValue::Null).is_some());
        assert!(t.apply(&prop("b", &under_log), LogValue::Null).is_none());
        assert!(t.apply(&prop("log", &[]), LogValue::Null).is_some());
    }

    #[test]
    fn test_key_lists_ignore_array_elements() {
        let include = FieldTransformer::include_keys(["a"]);
        let exclude = FieldTransformer::exclude_keys(["0"]);
        assert!(include.apply(&Field::element("0", &[]), LogValue::Null).is_some());
        assert!(exclude.apply(&Field::element("0", &[]), LogValue::Null).is_some());
    }

    #[test]
    fn test_exclude() {
        let t = FieldTransformer::exclude_keys(["a", "b"]);
        assert!(t.apply(&prop("a", &[]), LogValue::from(1)).is_none());
        assert!(t.apply(&prop("c", &[]), LogValue::from(1)).is_some());
        assert!(t.apply(&Field::root(), LogValue::from(1)).is_some());
    }

    #[test]
    fn test_error_normalizer_strips_extra_fields() {
        let err = LogValue::error("TypeError", "bad", "TypeError: bad\n    at main");
        err.as_object().unwrap().insert("code", "E_BAD");
        let out = FieldTransformer::error_normalizer()
            .apply(&prop("err", &[]), err.clone())
            .unwrap();
        let obj = out.as_object().unwrap();
        let keys: Vec<String> = obj.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "message", "stack"]);
        assert!(!out.same_value(&err));
    }

    #[test]
    fn test_error_normalizer_passes_plain_values() {
        let plain = LogValue::from(LogValue::object().with("name", "freddy"));
        let out = FieldTransformer::error_normalizer()
            .apply(&prop("x", &[]), plain.clone())
            .unwrap();
        assert!(out.same_value(&plain));
    }

    #[test]
    fn test_value_blacklist() {
        let t = FieldTransformer::value_blacklist(
            vec![LogValue::from("secret")],
            Redaction::Replace(LogValue::from("***REDACTED***")),
        );
        let out = t.apply(&prop("pw", &[]), LogValue::from("secret")).unwrap();
        assert_eq!(out.as_str(), Some("***REDACTED***"));
        let out = t.apply(&prop("pw", &[]), LogValue::from("secrets")).unwrap();
        assert_eq!(out.as_str(), Some("secrets"));

        let omit = FieldTransformer::value_blacklist(vec![LogValue::from(42)], Redaction::Omit);
        assert!(omit.apply(&prop("n", &[]), LogValue::from(42)).is_none());
    }
}
