//! Locales and the fallback chain
//!
//! A locale is a language plus an optional country. Lookups probe the
//! requested locale first, then its language-only form, then English.

use crate::{FakerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A language code with an optional country.
///
/// # Examples
///
/// ```
/// use forgery_core::Locale;
///
/// let zh_cn: Locale = "zh-CN".parse().unwrap();
/// assert_eq!(zh_cn.to_string(), "zh_CN");
/// assert_eq!(zh_cn.language_only(), Locale::new("zh", None::<&str>));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    /// Language code, lowercased (e.g., "en", "zh")
    pub language: String,
    /// Optional country code, uppercased (e.g., "CN", "US")
    pub country: Option<String>,
}

impl Locale {
    /// Create a locale without validation.
    pub fn new(language: impl Into<String>, country: Option<impl Into<String>>) -> Self {
        Self {
            language: language.into().to_ascii_lowercase(),
            country: country.map(|c| c.into().to_ascii_uppercase()),
        }
    }

    /// Parse `en`, `zh_CN` or `zh-CN`.
    ///
    /// The language must be 2 to 8 ASCII letters; the country 2 letters or a
    /// 3-digit UN M.49 code.
    pub fn parse(tag: &str) -> Result<Self> {
        let mut parts = tag.trim().split(['-', '_']);
        let language = parts.next().unwrap_or_default();

        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(FakerError::InvalidLocale(tag.to_string()));
        }

        let country = match parts.next() {
            None => None,
            Some(c) if c.len() == 2 && c.chars().all(|ch| ch.is_ascii_alphabetic()) => Some(c),
            Some(c) if c.len() == 3 && c.chars().all(|ch| ch.is_ascii_digit()) => Some(c),
            Some(_) => return Err(FakerError::InvalidLocale(tag.to_string())),
        };

        if parts.next().is_some() {
            return Err(FakerError::InvalidLocale(tag.to_string()));
        }

        Ok(Self::new(language, country))
    }

    /// The same language without a country.
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            country: None,
        }
    }

    /// Whether this is the universal default, language-only English.
    pub fn is_default(&self) -> bool {
        self.language == "en" && self.country.is_none()
    }

    /// Fallback sequence probed for lookups, most specific first.
    ///
    /// ```
    /// use forgery_core::Locale;
    ///
    /// let chain = Locale::zh_cn().chain();
    /// assert_eq!(chain, vec![Locale::zh_cn(), Locale::zh(), Locale::en()]);
    /// assert_eq!(Locale::en().chain(), vec![Locale::en()]);
    /// ```
    pub fn chain(&self) -> Vec<Locale> {
        let mut chain = vec![self.clone()];
        if self.country.is_some() {
            chain.push(self.language_only());
        }
        if !chain.last().is_some_and(Locale::is_default) {
            chain.push(Locale::en());
        }
        chain
    }

    /// English, the universal default
    pub fn en() -> Self {
        Self::new("en", None::<&str>)
    }

    /// English (US)
    pub fn en_us() -> Self {
        Self::new("en", Some("US"))
    }

    /// English (GB)
    pub fn en_gb() -> Self {
        Self::new("en", Some("GB"))
    }

    /// Chinese
    pub fn zh() -> Self {
        Self::new("zh", None::<&str>)
    }

    /// Chinese (China)
    pub fn zh_cn() -> Self {
        Self::new("zh", Some("CN"))
    }

    /// Swedish (Sweden)
    pub fn sv_se() -> Self {
        Self::new("sv", Some("SE"))
    }

    /// German
    pub fn de() -> Self {
        Self::new("de", None::<&str>)
    }

    /// French
    pub fn fr() -> Self {
        Self::new("fr", None::<&str>)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.language, country),
            None => f.write_str(&self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = FakerError;

    fn from_str(s: &str) -> Result<Self> {
        Locale::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = FakerError;

    fn try_from(value: String) -> Result<Self> {
        Locale::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::en()
    }
}

/// Render a chain as `zh_CN, zh, en` for messages.
pub(crate) fn describe_chain(chain: &[Locale]) -> String {
    chain
        .iter()
        .map(Locale::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
