//! Generic data records consumed by [`BlockTree::fill`](crate::template::BlockTree::fill)
//!
//! A [`Record`] maps field names to [`Value`]s. Field names are matched against
//! block and variable tag names after upper-casing. Besides its fields a record
//! carries two reserved members: the variant index handed to the enclosing
//! injection, and an optional hook called after the record has been filled.

mod convert;

use crate::template::{BlockId, BlockTree};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Key that populates [`Record::variant`] when converting from JSON or TOML
pub const VARIANT_KEY: &str = "vari_idx";

/// A field value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<Value>),
    Record(Record),
}

impl Value {
    /// Text, number or boolean
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_)
        )
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => !s.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            Value::Record(record) => record.is_truthy(),
        }
    }

    /// Text substituted into a variable tag
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Value::Text(s) => Cow::Borrowed(s),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(float_text(*f)),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            Value::Null | Value::Record(_) => Cow::Borrowed(""),
            Value::Sequence(items) => Cow::Owned(
                items
                    .iter()
                    .map(|item| item.text().into_owned())
                    .collect::<Vec<_>>()
                    .join(""),
            ),
        }
    }
}

/// Integral floats keep a trailing `.0` so they stay distinguishable from integers
fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

type HookFn = dyn Fn(&mut BlockTree, BlockId, &Record, usize) + Send + Sync;

/// Callback run after a record has been filled into a block.
///
/// Receives the tree, the block just filled, the record, and the index of the
/// record within its enclosing sequence (0 outside sequences).
#[derive(Clone)]
pub struct FillHook(Arc<HookFn>);

impl FillHook {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut BlockTree, BlockId, &Record, usize) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, tree: &mut BlockTree, block: BlockId, record: &Record, index: usize) {
        (self.0)(tree, block, record, index)
    }
}

impl fmt::Debug for FillHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FillHook(..)")
    }
}

impl PartialEq for FillHook {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Field name to value mapping, in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
    variant: Option<i64>,
    on_fill: Option<FillHook>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Record::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_variant(mut self, variant: i64) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn with_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut BlockTree, BlockId, &Record, usize) + Send + Sync + 'static,
    {
        self.on_fill = Some(FillHook::new(f));
        self
    }

    /// Insert a field, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Variant index for the enclosing injection; negative clears the block
    pub fn variant(&self) -> Option<i64> {
        self.variant
    }

    pub fn set_variant(&mut self, variant: Option<i64>) {
        self.variant = variant;
    }

    pub fn hook(&self) -> Option<&FillHook> {
        self.on_fill.as_ref()
    }

    pub fn set_hook(&mut self, hook: Option<FillHook>) {
        self.on_fill = hook;
    }

    /// A record with no fields and no reserved members counts as absent
    pub fn is_truthy(&self) -> bool {
        !self.fields.is_empty() || self.variant.is_some() || self.on_fill.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_forms() {
        assert_eq!(Value::from("abc").text(), "abc");
        assert_eq!(Value::from(42).text(), "42");
        assert_eq!(Value::from(2.5).text(), "2.5");
        assert_eq!(Value::from(1.0).text(), "1.0");
        assert_eq!(Value::from(-3.0).text(), "-3.0");
        assert_eq!(Value::from(true).text(), "true");
        assert_eq!(Value::Null.text(), "");
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(0.0).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Sequence(vec![]).is_truthy());
        assert!(!Value::from(Record::new()).is_truthy());

        assert!(Value::from(1).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::from(vec!["a"]).is_truthy());
        assert!(Value::from(Record::new().with_variant(0)).is_truthy());
    }

    #[test]
    fn test_insert_replaces_and_keeps_order() {
        let mut record = Record::new().with("b", 1).with("a", 2);
        record.insert("b", 3);
        let names: Vec<_> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(record.get("b"), Some(&Value::Int(3)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }
}
