//! Locale data store
//!
//! Locale data is a tree per locale: maps branch, scalars and lists of
//! scalars are leaves. A dotted key resolves to a leaf or to nothing; map
//! nodes never leak out of a lookup.

use crate::{FakerError, Locale, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// A leaf borrowed from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry<'a> {
    /// A single template string
    Scalar(&'a str),
    /// Alternatives, one of which is picked at random
    List(&'a [String]),
}

impl Entry<'_> {
    /// Copy the leaf out of the store.
    pub fn to_raw(&self) -> RawValue {
        match self {
            Entry::Scalar(s) => RawValue::Scalar((*s).to_string()),
            Entry::List(items) => RawValue::List(items.to_vec()),
        }
    }
}

/// An owned leaf, in the shape it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Scalar(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Scalar(s)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        RawValue::List(items)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(items: Vec<&str>) -> Self {
        RawValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Read access to locale data, keyed by locale and dotted key.
///
/// Implementations must be immutable once shared with a
/// [`Faker`](crate::Faker).
pub trait LocaleData: Send + Sync {
    /// Resolve `key` in exactly `locale`, without fallback.
    fn lookup(&self, locale: &Locale, key: &str) -> Option<Entry<'_>>;

    /// Whether any data exists for exactly `locale`.
    fn has_locale(&self, locale: &Locale) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Scalar(String),
    List(Vec<String>),
    Map(BTreeMap<String, Node>),
}

impl Node {
    fn from_json(path: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => {
                let mut children = BTreeMap::new();
                for (name, child) in map {
                    let child_path = join_path(path, &name);
                    children.insert(name, Node::from_json(&child_path, child)?);
                }
                Ok(Node::Map(children))
            }
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    scalar_text(item).ok_or_else(|| {
                        FakerError::malformed(
                            path,
                            format!("list element {i} is not a string, number or boolean"),
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Node::List),
            Value::Null => Err(FakerError::malformed(path, "null value")),
            other => scalar_text(other)
                .map(Node::Scalar)
                .ok_or_else(|| FakerError::malformed(path, "unsupported value")),
        }
    }

    fn get(&self, key: &str) -> Option<&Node> {
        key.split('.').try_fold(self, |node, segment| match node {
            Node::Map(children) => children.get(segment),
            _ => None,
        })
    }

    fn entry(&self) -> Option<Entry<'_>> {
        match self {
            Node::Scalar(s) => Some(Entry::Scalar(s)),
            Node::List(items) if !items.is_empty() => Some(Entry::List(items)),
            _ => None,
        }
    }

    /// Place `node` at `key`, creating intermediate maps and replacing leaves in the way.
    fn insert(&mut self, key: &str, node: Node) {
        if !matches!(self, Node::Map(_)) {
            *self = Node::Map(BTreeMap::new());
        }
        if let Node::Map(children) = self {
            match key.split_once('.') {
                None => {
                    children.insert(key.to_string(), node);
                }
                Some((head, rest)) => children
                    .entry(head.to_string())
                    .or_insert_with(|| Node::Map(BTreeMap::new()))
                    .insert(rest, node),
            }
        }
    }

    fn merge(&mut self, other: Node) {
        match (self, other) {
            (Node::Map(mine), Node::Map(theirs)) => {
                for (name, child) in theirs {
                    match mine.get_mut(&name) {
                        Some(existing) => existing.merge(child),
                        None => {
                            mine.insert(name, child);
                        }
                    }
                }
            }
            (slot, other) => *slot = other,
        }
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// In-memory locale data.
///
/// # Examples
///
/// ```
/// use forgery_core::{Entry, Locale, LocaleData, LocaleStore};
///
/// let mut store = LocaleStore::new();
/// store
///     .insert_json(&Locale::en(), r#"{"name": {"first_name": ["Ada", "Grace"]}}"#)
///     .unwrap();
///
/// let entry = store.lookup(&Locale::en(), "name.first_name");
/// assert!(matches!(entry, Some(Entry::List(names)) if names.len() == 2));
/// assert!(store.lookup(&Locale::en(), "name").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocaleStore {
    locales: HashMap<Locale, Node>,
}

impl LocaleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a JSON document into the data for `locale`.
    pub fn insert_json(&mut self, locale: &Locale, json: &str) -> Result<&mut Self> {
        let value: Value = serde_json::from_str(json)?;
        self.insert_value(locale, value)
    }

    /// Merge an already-parsed JSON value into the data for `locale`.
    ///
    /// The top level must be an object. Nothing is merged if any node is malformed.
    pub fn insert_value(&mut self, locale: &Locale, value: Value) -> Result<&mut Self> {
        if !value.is_object() {
            return Err(FakerError::malformed(
                locale.to_string(),
                "locale data must be an object at the top level",
            ));
        }
        let node = Node::from_json("", value)?;
        self.locales
            .entry(locale.clone())
            .or_insert_with(|| Node::Map(BTreeMap::new()))
            .merge(node);
        Ok(self)
    }

    /// Set a single leaf.
    pub fn set(&mut self, locale: &Locale, key: &str, value: impl Into<RawValue>) -> &mut Self {
        let node = match value.into() {
            RawValue::Scalar(s) => Node::Scalar(s),
            RawValue::List(items) => Node::List(items),
        };
        self.locales
            .entry(locale.clone())
            .or_insert_with(|| Node::Map(BTreeMap::new()))
            .insert(key, node);
        self
    }

    /// Locales with data, in no particular order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.locales.keys()
    }
}

impl LocaleData for LocaleStore {
    fn lookup(&self, locale: &Locale, key: &str) -> Option<Entry<'_>> {
        self.locales.get(locale)?.get(key)?.entry()
    }

    fn has_locale(&self, locale: &Locale) -> bool {
        self.locales.contains_key(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LocaleStore {
        let mut store = LocaleStore::new();
        store
            .insert_json(
                &Locale::en(),
                r#"{
                    "property": {
                        "dummy": ["x", "y", "z"],
                        "simple": "hello",
                        "count": 3,
                        "flag": true,
                        "empty": []
                    }
                }"#,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_lookup_list_and_scalar() {
        let store = sample();
        let en = Locale::en();

        match store.lookup(&en, "property.dummy") {
            Some(Entry::List(items)) => assert_eq!(items, ["x", "y", "z"]),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(store.lookup(&en, "property.simple"), Some(Entry::Scalar("hello")));
    }

    #[test]
    fn test_numbers_and_booleans_become_scalars() {
        let store = sample();
        assert_eq!(store.lookup(&Locale::en(), "property.count"), Some(Entry::Scalar("3")));
        assert_eq!(store.lookup(&Locale::en(), "property.flag"), Some(Entry::Scalar("true")));
    }

    #[test]
    fn test_maps_missing_keys_and_empty_lists_are_absent() {
        let store = sample();
        let en = Locale::en();
        assert_eq!(store.lookup(&en, "property"), None);
        assert_eq!(store.lookup(&en, "property.missing"), None);
        assert_eq!(store.lookup(&en, "property.simple.deeper"), None);
        assert_eq!(store.lookup(&en, "property.empty"), None);
        assert_eq!(store.lookup(&Locale::zh(), "property.simple"), None);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let store = sample();
        assert_eq!(store.lookup(&Locale::en(), "Property.simple"), None);
    }

    #[test]
    fn test_malformed_list_is_rejected() {
        let mut store = LocaleStore::new();
        let err = store
            .insert_json(&Locale::en(), r#"{"a": {"b": ["ok", {"nested": "no"}]}}"#)
            .unwrap_err();
        assert!(matches!(err, FakerError::MalformedData { ref key, .. } if key == "a.b"));
        assert!(!store.has_locale(&Locale::en()));
    }

    #[test]
    fn test_top_level_must_be_object() {
        let mut store = LocaleStore::new();
        assert!(store.insert_json(&Locale::en(), r#"["x"]"#).is_err());
    }

    #[test]
    fn test_insert_merges_documents() {
        let mut store = sample();
        store
            .insert_json(&Locale::en(), r#"{"property": {"other": "new"}}"#)
            .unwrap();
        let en = Locale::en();
        assert_eq!(store.lookup(&en, "property.other"), Some(Entry::Scalar("new")));
        assert_eq!(store.lookup(&en, "property.simple"), Some(Entry::Scalar("hello")));
    }

    #[test]
    fn test_set_creates_intermediate_maps() {
        let mut store = LocaleStore::new();
        store
            .set(&Locale::zh_cn(), "name.first_name", vec!["伟", "芳"])
            .set(&Locale::zh_cn(), "name.title", "先生");

        let zh_cn = Locale::zh_cn();
        assert!(store.has_locale(&zh_cn));
        assert_eq!(store.lookup(&zh_cn, "name.title"), Some(Entry::Scalar("先生")));
        assert_eq!(
            store.lookup(&zh_cn, "name.first_name").map(|e| e.to_raw()),
            Some(RawValue::from(vec!["伟", "芳"]))
        );
    }
}
