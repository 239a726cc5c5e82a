//! Key lookup across the locale chain
//!
//! The first locale in the chain that has a key wins. A list is resolved to
//! one uniformly chosen element, a scalar is returned as is.

use crate::locale::describe_chain;
use crate::random::RandomSource;
use crate::store::{Entry, LocaleData, RawValue};
use crate::{FakerError, Locale, Result};
use forgery_log::trace;
use std::fmt;
use std::sync::Arc;

/// Reads keys from a [`LocaleData`] store through a fixed locale chain.
#[derive(Clone)]
pub struct Fetcher {
    store: Arc<dyn LocaleData>,
    random: Arc<dyn RandomSource>,
    chain: Vec<Locale>,
}

impl Fetcher {
    /// Create a fetcher for `locale`; its chain is computed once here.
    pub fn new(store: Arc<dyn LocaleData>, random: Arc<dyn RandomSource>, locale: &Locale) -> Self {
        Self {
            store,
            random,
            chain: locale.chain(),
        }
    }

    /// The leaf for `key` in the first locale of the chain that has it.
    pub fn lookup(&self, key: &str) -> Option<Entry<'_>> {
        for locale in &self.chain {
            if let Some(entry) = self.store.lookup(locale, key) {
                trace!("{key} found in {locale}");
                return Some(entry);
            }
            trace!("{key} not in {locale}");
        }
        None
    }

    /// Owned copy of the raw leaf, list or scalar.
    pub fn fetch_object(&self, key: &str) -> Option<RawValue> {
        self.lookup(key).map(|entry| entry.to_raw())
    }

    /// One value for `key`, or `None` when no locale in the chain has it.
    pub fn try_fetch(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|entry| match entry {
            Entry::Scalar(s) => s.to_string(),
            Entry::List(items) => items[self.random.pick(items.len())].clone(),
        })
    }

    /// One value for `key`: a random element of a list, or the scalar itself.
    pub fn fetch(&self, key: &str) -> Result<String> {
        self.try_fetch(key).ok_or_else(|| self.not_found(key))
    }

    /// String-typed fetch; same selection as [`fetch`](Self::fetch).
    pub fn fetch_string(&self, key: &str) -> Result<String> {
        self.fetch(key)
    }

    /// The whole list for `key`; a scalar yields a one-element list.
    pub fn fetch_list(&self, key: &str) -> Result<Vec<String>> {
        match self.lookup(key) {
            Some(Entry::List(items)) => Ok(items.to_vec()),
            Some(Entry::Scalar(s)) => Ok(vec![s.to_string()]),
            None => Err(self.not_found(key)),
        }
    }

    /// Like [`fetch`](Self::fetch), returning `default` when the key is absent.
    pub fn safe_fetch(&self, key: &str, default: &str) -> String {
        self.try_fetch(key).unwrap_or_else(|| default.to_string())
    }

    /// Locales probed, most specific first.
    pub fn chain(&self) -> &[Locale] {
        &self.chain
    }

    /// The requested locale, head of the chain.
    pub fn locale(&self) -> &Locale {
        &self.chain[0]
    }

    pub fn random(&self) -> &dyn RandomSource {
        self.random.as_ref()
    }

    pub fn store(&self) -> &dyn LocaleData {
        self.store.as_ref()
    }

    fn not_found(&self, key: &str) -> FakerError {
        FakerError::KeyNotFound {
            key: key.to_string(),
            chain: describe_chain(&self.chain),
        }
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher").field("chain", &self.chain).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{FixedRandom, SequenceRandom};
    use crate::store::LocaleStore;

    fn store() -> Arc<LocaleStore> {
        let mut store = LocaleStore::new();
        store
            .set(&Locale::en(), "property.dummy", vec!["x", "y", "z"])
            .set(&Locale::en(), "property.simple", "hello")
            .set(&Locale::en(), "property.english_only", "en")
            .set(&Locale::zh(), "property.simple", "你好")
            .set(&Locale::zh_cn(), "property.dummy", vec!["甲", "乙"]);
        Arc::new(store)
    }

    fn fetcher(locale: Locale, random: impl RandomSource + 'static) -> Fetcher {
        Fetcher::new(store(), Arc::new(random), &locale)
    }

    #[test]
    fn test_fetch_picks_list_element() {
        let f = fetcher(Locale::en(), FixedRandom::new(1));
        assert_eq!(f.fetch("property.dummy").unwrap(), "y");
        assert_eq!(f.fetch_string("property.dummy").unwrap(), "y");
    }

    struct OutOfRange;

    impl RandomSource for OutOfRange {
        fn next_int(&self, bound: usize) -> usize {
            bound * 2 + 1
        }
    }

    #[test]
    fn test_fetch_clamps_out_of_range_draw() {
        let f = fetcher(Locale::en(), OutOfRange);
        assert_eq!(f.fetch("property.dummy").unwrap(), "z");
    }

    #[test]
    fn test_fetch_scalar_does_not_draw() {
        let random = Arc::new(SequenceRandom::new(vec![0]));
        let f = Fetcher::new(store(), random.clone(), &Locale::en());
        assert_eq!(f.fetch("property.simple").unwrap(), "hello");
        assert_eq!(random.draws(), 0);
    }

    #[test]
    fn test_fallback_through_chain() {
        let f = fetcher(Locale::zh_cn(), FixedRandom::new(0));
        assert_eq!(f.fetch("property.dummy").unwrap(), "甲");
        assert_eq!(f.fetch("property.simple").unwrap(), "你好");
        assert_eq!(f.fetch("property.english_only").unwrap(), "en");
        assert_eq!(f.locale(), &Locale::zh_cn());
    }

    #[test]
    fn test_missing_key_names_chain() {
        let f = fetcher(Locale::zh_cn(), FixedRandom::new(0));
        match f.fetch("property.missing") {
            Err(FakerError::KeyNotFound { key, chain }) => {
                assert_eq!(key, "property.missing");
                assert_eq!(chain, "zh_CN, zh, en");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_fetch_object_and_list() {
        let f = fetcher(Locale::en(), FixedRandom::new(0));
        assert_eq!(
            f.fetch_object("property.dummy"),
            Some(RawValue::from(vec!["x", "y", "z"]))
        );
        assert_eq!(f.fetch_object("property"), None);
        assert_eq!(f.fetch_list("property.dummy").unwrap(), vec!["x", "y", "z"]);
        assert_eq!(f.fetch_list("property.simple").unwrap(), vec!["hello"]);
        assert!(f.fetch_list("nope").is_err());
    }

    #[test]
    fn test_safe_fetch_default() {
        let f = fetcher(Locale::en(), FixedRandom::new(0));
        assert_eq!(f.safe_fetch("property.missing", "fallback"), "fallback");
        assert_eq!(f.safe_fetch("property.simple", "fallback"), "hello");
    }
}
