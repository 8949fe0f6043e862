//! Cycle-tolerant JSON rendering
//!
//! Walks a [`LogValue`] graph depth-first, applying a [`TransformerChain`] to
//! every key/value pair. A container that is already on the current path is a
//! cycle and is replaced by a circular marker naming the path to the repeated
//! ancestor (`[Circular ~]` for the root, `[Circular ~.a.b]` otherwise). A node
//! reached twice along different paths is not a cycle and renders both times.

use super::chain::TransformerChain;
use super::error::{LoggerError, Result};
use super::transformer::Field;
use super::value::LogValue;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Indent width cap, as for JSON.stringify
const MAX_INDENT: usize = 10;

/// Deepest container nesting the walker descends into
pub const MAX_DEPTH: usize = 256;

/// Output indentation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Indent {
    /// Compact, single-line output
    #[default]
    None,
    /// This many spaces per nesting level (capped at 10, `0` is compact)
    Spaces(u64),
    /// Verbatim indent unit (first 10 characters, empty is compact)
    Text(String),
}

impl Indent {
    /// The per-level indent unit, or `None` for compact output
    pub fn unit(&self) -> Option<String> {
        match self {
            Indent::None => None,
            Indent::Spaces(0) => None,
            Indent::Spaces(n) => Some(" ".repeat((*n as usize).min(MAX_INDENT))),
            Indent::Text(s) if s.is_empty() => None,
            Indent::Text(s) => Some(s.chars().take(MAX_INDENT).collect()),
        }
    }
}

impl From<u64> for Indent {
    fn from(n: u64) -> Self {
        Indent::Spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(s: &str) -> Self {
        Indent::Text(s.to_string())
    }
}

/// Marker for a reference back to the ancestor reached through `path`
pub fn circular_marker(path: &[String]) -> String {
    if path.is_empty() {
        "[Circular ~]".to_string()
    } else {
        format!("[Circular ~.{}]", path.join("."))
    }
}

pub struct CycleSafeSerializer<'a> {
    chain: &'a TransformerChain,
    indent: &'a Indent,
}

impl<'a> CycleSafeSerializer<'a> {
    pub fn new(chain: &'a TransformerChain, indent: &'a Indent) -> Self {
        Self { chain, indent }
    }

    /// Transform `value` into a plain JSON tree. `Ok(None)` if the root was
    /// omitted, `Err` if nesting exceeds [`MAX_DEPTH`].
    pub fn to_value(&self, value: &LogValue) -> Result<Option<Value>> {
        Walker::new(self.chain).visit(&Field::root(), value.clone())
    }

    /// Render `value` as JSON text. `Ok(None)` if the root was omitted.
    pub fn to_string(&self, value: &LogValue) -> Result<Option<String>> {
        match self.to_value(value)? {
            Some(json) => render(&json, self.indent).map(Some),
            None => Ok(None),
        }
    }
}

/// Render an already plain JSON tree with the given indentation
pub fn render(json: &Value, indent: &Indent) -> Result<String> {
    match indent.unit() {
        None => Ok(serde_json::to_string(json)?),
        Some(unit) => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(unit.as_bytes());
            let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
            json.serialize(&mut ser)?;
            String::from_utf8(buf).map_err(|e| LoggerError::serialization(e.to_string()))
        }
    }
}

/// Untransformed JSON snapshot of a value
pub(crate) fn snapshot(value: &LogValue) -> Value {
    let chain = TransformerChain::default();
    Walker::new(&chain)
        .visit(&Field::root(), value.clone())
        .ok()
        .flatten()
        .unwrap_or(Value::Null)
}

struct Walker<'c> {
    chain: &'c TransformerChain,
    /// Addresses of the containers on the current path, root first
    stack: Vec<usize>,
    /// `path[i]` is the key of `stack[i + 1]` inside `stack[i]`
    path: Vec<String>,
}

impl<'c> Walker<'c> {
    fn new(chain: &'c TransformerChain) -> Self {
        Self {
            chain,
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    fn visit(&mut self, field: &Field<'_>, value: LogValue) -> Result<Option<Value>> {
        let value = self.break_cycle(value);
        let Some(value) = self.chain.apply(field, value) else {
            return Ok(None);
        };
        // A replacer may hand back a container already on the path
        let value = self.break_cycle(value);

        let json = match value {
            LogValue::Null => Value::Null,
            LogValue::Bool(b) => Value::Bool(b),
            LogValue::Number(n) => Value::Number(n),
            LogValue::String(s) => Value::String(s),
            LogValue::Object(obj) => {
                self.enter(obj.addr(), field)?;
                let parent = self.path.clone();
                let mut map = Map::new();
                for (key, child) in obj.entries() {
                    if let Some(rendered) = self.visit(&Field::property(&key, &parent), child)? {
                        map.insert(key, rendered);
                    }
                }
                self.leave();
                Value::Object(map)
            }
            LogValue::Array(arr) => {
                self.enter(arr.addr(), field)?;
                let parent = self.path.clone();
                let mut items = Vec::with_capacity(arr.len());
                for (index, child) in arr.items().into_iter().enumerate() {
                    let key = index.to_string();
                    let rendered = self.visit(&Field::element(&key, &parent), child)?;
                    items.push(rendered.unwrap_or(Value::Null));
                }
                self.leave();
                Value::Array(items)
            }
        };
        Ok(Some(json))
    }

    fn break_cycle(&self, value: LogValue) -> LogValue {
        let repeated = value
            .container_addr()
            .and_then(|addr| self.stack.iter().position(|&seen| seen == addr));
        match repeated {
            Some(depth) => LogValue::String(circular_marker(&self.path[..depth])),
            None => value,
        }
    }

    fn enter(&mut self, addr: usize, field: &Field<'_>) -> Result<()> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(LoggerError::serialization(format!(
                "value nested deeper than {} levels",
                MAX_DEPTH
            )));
        }
        if !self.stack.is_empty() {
            self.path.push(field.key.to_string());
        }
        self.stack.push(addr);
        Ok(())
    }

    fn leave(&mut self) {
        self.stack.pop();
        if !self.stack.is_empty() {
            self.path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transformer::FieldTransformer;
    use serde_json::json;

    fn compact(value: &LogValue) -> String {
        let chain = TransformerChain::default();
        CycleSafeSerializer::new(&chain, &Indent::None)
            .to_string(value)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_direct_cycle_terminates() {
        let obj = LogValue::object().with("name", "freddy");
        obj.insert("circular", obj.clone());
        assert_eq!(
            compact(&obj.into()),
            r#"{"name":"freddy","circular":"[Circular ~]"}"#
        );
    }

    #[test]
    fn test_nested_cycle_names_path() {
        let inner = LogValue::object();
        let outer = LogValue::object().with("a", inner.clone());
        inner.insert("back", inner.clone());
        inner.insert("top", outer.clone());
        assert_eq!(
            compact(&outer.into()),
            r#"{"a":{"back":"[Circular ~.a]","top":"[Circular ~]"}}"#
        );
    }

    #[test]
    fn test_cycle_through_array() {
        let arr = LogValue::array().with(1);
        let obj = LogValue::object().with("items", arr.clone());
        arr.push(obj.clone());
        arr.push(arr.clone());
        assert_eq!(
            compact(&obj.into()),
            r#"{"items":[1,"[Circular ~]","[Circular ~.items]"]}"#
        );
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let shared = LogValue::object().with("v", 1);
        let root = LogValue::object()
            .with("left", shared.clone())
            .with("right", shared);
        assert_eq!(
            compact(&root.into()),
            r#"{"left":{"v":1},"right":{"v":1}}"#
        );
    }

    #[test]
    fn test_transformer_sees_marker() {
        let obj = LogValue::object();
        obj.insert("me", obj.clone());
        let chain = TransformerChain::compose([Some(FieldTransformer::function(|field, v| {
            let lowered = v.as_str().filter(|_| field.key == "me").map(str::to_lowercase);
            Some(lowered.map(LogValue::from).unwrap_or(v))
        }))]);
        let out = CycleSafeSerializer::new(&chain, &Indent::None)
            .to_string(&obj.into())
            .unwrap()
            .unwrap();
        assert_eq!(out, r#"{"me":"[circular ~]"}"#);
    }

    #[test]
    fn test_omitted_root_and_elements() {
        let chain = TransformerChain::compose([Some(FieldTransformer::function(|field, v| {
            if field.key == "1" || v.as_str() == Some("drop-root") {
                None
            } else {
                Some(v)
            }
        }))]);
        let ser = CycleSafeSerializer::new(&chain, &Indent::None);
        assert!(ser.to_string(&LogValue::from("drop-root")).unwrap().is_none());

        let arr: LogValue = LogValue::from(json!([1, 2, 3]));
        assert_eq!(ser.to_string(&arr).unwrap().unwrap(), "[1,null,3]");
    }

    #[test]
    fn test_indent_variants() {
        let value = LogValue::from(json!({"a": [1]}));
        let chain = TransformerChain::default();
        let two = CycleSafeSerializer::new(&chain, &Indent::Spaces(2))
            .to_string(&value)
            .unwrap()
            .unwrap();
        assert_eq!(two, "{\n  \"a\": [\n    1\n  ]\n}");

        let tab = CycleSafeSerializer::new(&chain, &Indent::from("\t"))
            .to_string(&value)
            .unwrap()
            .unwrap();
        assert_eq!(tab, "{\n\t\"a\": [\n\t\t1\n\t]\n}");

        let zero = CycleSafeSerializer::new(&chain, &Indent::Spaces(0))
            .to_string(&value)
            .unwrap()
            .unwrap();
        assert_eq!(zero, r#"{"a":[1]}"#);
    }

    #[test]
    fn test_replacer_returning_ancestor_is_marked() {
        let root = LogValue::object().with("x", "swap").with("y", 1);
        let swapped = root.clone();
        let chain = TransformerChain::compose([Some(FieldTransformer::function(move |field, v| {
            if field.key == "x" {
                Some(LogValue::from(swapped.clone()))
            } else {
                Some(v)
            }
        }))]);
        let out = CycleSafeSerializer::new(&chain, &Indent::None)
            .to_string(&root.into())
            .unwrap()
            .unwrap();
        assert_eq!(out, r#"{"x":"[Circular ~]","y":1}"#);
    }

    #[test]
    fn test_depth_limit_is_an_error() {
        let chain = TransformerChain::default();
        let ser = CycleSafeSerializer::new(&chain, &Indent::None);

        let mut deep = LogValue::from(0);
        for _ in 0..MAX_DEPTH {
            deep = LogValue::from(vec![deep]);
        }
        assert!(ser.to_string(&deep).unwrap().is_some());

        let deeper = LogValue::from(vec![deep]);
        let err = ser.to_string(&deeper).unwrap_err();
        assert!(matches!(err, LoggerError::Serialization(_)));
    }

    #[test]
    fn test_indent_is_capped() {
        assert_eq!(Indent::Spaces(40).unit().unwrap().len(), 10);
        assert_eq!(Indent::from("--------------").unit().unwrap(), "----------");
        assert_eq!(Indent::from("").unit(), None);
    }
}
