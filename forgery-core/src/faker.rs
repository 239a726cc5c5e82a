//! The resolution engine
//!
//! [`Faker`] ties together the locale data, the random source and the
//! operation registry. It is immutable once built and can be shared across
//! threads; every method takes `&self`.

use crate::expander::Expander;
use crate::fetcher::Fetcher;
use crate::pattern::{self, LetterCase};
use crate::random::{RandomSource, StdRandom};
use crate::registry::{Namespace, Registry};
use crate::store::{LocaleData, RawValue};
use crate::{FakerConfig, FakerError, Locale, Result, regexify};
use forgery_log::{debug, info};
use std::fmt;
use std::sync::Arc;

/// Fake data generator over locale data and registered operations.
///
/// # Examples
///
/// ```
/// use forgery_core::{Faker, FixedRandom, Locale, LocaleStore, Namespace, Registry};
///
/// let mut store = LocaleStore::new();
/// store
///     .set(&Locale::en(), "name.first_name", vec!["Ada", "Grace"])
///     .set(&Locale::en(), "name.last_name", "Hopper")
///     .set(&Locale::en(), "name.name", "#{first_name} #{last_name}");
///
/// let faker = Faker::builder()
///     .store(store)
///     .random(FixedRandom::new(1))
///     .registry(Registry::new().with(Namespace::new("Name")))
///     .build()
///     .unwrap();
///
/// assert_eq!(faker.expand("#{Name.name}").unwrap(), "Grace Hopper");
/// assert_eq!(faker.bothify("??-##"), "BB-11");
/// ```
pub struct Faker {
    fetcher: Fetcher,
    registry: Arc<Registry>,
    config: FakerConfig,
}

impl Faker {
    pub fn builder() -> FakerBuilder {
        FakerBuilder::default()
    }

    /// Build with default settings for `locale`.
    pub fn new(locale: Locale, store: impl LocaleData + 'static) -> Result<Self> {
        Self::builder().store(store).locale(locale).build()
    }

    /// Fallback chain for any locale.
    pub fn locale_chain(locale: &Locale) -> Vec<Locale> {
        locale.chain()
    }

    /// Chain used by this engine.
    pub fn chain(&self) -> &[Locale] {
        self.fetcher.chain()
    }

    pub fn locale(&self) -> &Locale {
        self.fetcher.locale()
    }

    /// One value for `key`. See [`Fetcher::fetch`].
    pub fn fetch(&self, key: &str) -> Result<String> {
        self.fetcher.fetch(key)
    }

    pub fn fetch_string(&self, key: &str) -> Result<String> {
        self.fetcher.fetch_string(key)
    }

    pub fn fetch_object(&self, key: &str) -> Option<RawValue> {
        self.fetcher.fetch_object(key)
    }

    pub fn fetch_list(&self, key: &str) -> Result<Vec<String>> {
        self.fetcher.fetch_list(key)
    }

    pub fn safe_fetch(&self, key: &str, default: &str) -> String {
        self.fetcher.safe_fetch(key, default)
    }

    /// Fetch `key` and expand the chosen template against `target`.
    pub fn resolve(&self, key: &str, target: &Namespace) -> Result<String> {
        self.resolve_at(key, target, 0)
    }

    pub(crate) fn resolve_at(&self, key: &str, target: &Namespace, depth: usize) -> Result<String> {
        let template = self.fetcher.fetch(key)?;
        self.expression_at(&template, target, depth)
    }

    /// Expand every directive in `template` against `target`.
    pub fn expression(&self, template: &str, target: &Namespace) -> Result<String> {
        self.expression_at(template, target, 0)
    }

    pub(crate) fn expression_at(&self, template: &str, target: &Namespace, depth: usize) -> Result<String> {
        Expander::new(self).expand(template, target, depth)
    }

    /// Expand `template` against the root namespace.
    pub fn expand(&self, template: &str) -> Result<String> {
        self.expression(template, self.registry.root())
    }

    pub fn numerify(&self, pattern: &str) -> String {
        pattern::numerify(pattern, self.random())
    }

    pub fn letterify(&self, pattern: &str, case: LetterCase) -> String {
        pattern::letterify(pattern, case, self.random())
    }

    pub fn bothify(&self, pattern: &str) -> String {
        pattern::bothify(pattern, self.random())
    }

    pub fn bothify_with(&self, pattern: &str, case: LetterCase) -> String {
        pattern::bothify_with(pattern, case, self.random())
    }

    /// Generate a string matching `pattern`. See [`crate::regexify`] for the supported syntax.
    pub fn regexify(&self, pattern: &str) -> Result<String> {
        regexify::regexify(pattern, self.random(), self.config.max_repeat)
    }

    /// Look up a registered namespace by name.
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.registry.namespace(name)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &FakerConfig {
        &self.config
    }

    pub fn random(&self) -> &dyn RandomSource {
        self.fetcher.random()
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}

impl fmt::Debug for Faker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Faker")
            .field("chain", &self.fetcher.chain())
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}

/// Builder for [`Faker`].
#[derive(Default)]
pub struct FakerBuilder {
    store: Option<Arc<dyn LocaleData>>,
    random: Option<Arc<dyn RandomSource>>,
    registry: Option<Arc<Registry>>,
    config: FakerConfig,
}

impl FakerBuilder {
    /// Locale data. Required.
    pub fn store(mut self, store: impl LocaleData + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Locale data already shared with other engines.
    pub fn shared_store(mut self, store: Arc<dyn LocaleData>) -> Self {
        self.store = Some(store);
        self
    }

    /// Random source; defaults to [`StdRandom`], seeded from the config when a seed is set.
    pub fn random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Some(Arc::new(random));
        self
    }

    pub fn shared_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = Some(random);
        self
    }

    /// Operation registry; defaults to [`Registry::new`].
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    pub fn shared_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: FakerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Validate the configuration and the locale, then build.
    ///
    /// Fails with [`FakerError::LocaleUnsupported`] unless the requested
    /// locale or its language-only form has data.
    pub fn build(self) -> Result<Faker> {
        self.config.validate()?;

        let store = self
            .store
            .ok_or_else(|| FakerError::Config("a locale data store is required".to_string()))?;

        let locale = &self.config.locale;
        if !store.has_locale(locale) && !store.has_locale(&locale.language_only()) {
            debug!("no data for {locale} or {}", locale.language_only());
            return Err(FakerError::LocaleUnsupported(locale.to_string()));
        }

        let random: Arc<dyn RandomSource> = match self.random {
            Some(random) => random,
            None => Arc::new(self.config.seed.map_or_else(StdRandom::new, StdRandom::seeded)),
        };
        let registry = self.registry.unwrap_or_else(|| Arc::new(Registry::new()));

        let fetcher = Fetcher::new(store, random, locale);
        info!(
            "faker ready: locale {locale}, chain [{}], {} namespaces",
            crate::locale::describe_chain(fetcher.chain()),
            registry.namespaces().count()
        );

        Ok(Faker {
            fetcher,
            registry,
            config: self.config,
        })
    }
}
