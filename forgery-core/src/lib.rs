//! Directive resolution engine for fake data templates.
//!
//! Provides:
//! - 🌍 Locale fallback chains (`zh_CN` -> `zh` -> `en`)
//! - 🗂️ Dotted key lookup with random choice among list alternatives
//! - 🧩 Recursive `#{...}` directive expansion with a depth guard
//! - 📛 Named operations grouped into namespaces
//! - 🔢 `numerify`, `letterify`, `bothify` and `regexify` pattern expanders
//! - 🎲 Injectable random source for reproducible output
//!
//! ## Quick Start
//!
//! ```
//! use forgery_core::prelude::*;
//!
//! let mut store = LocaleStore::new();
//! store
//!     .insert_json(
//!         &Locale::en(),
//!         r##"{
//!             "superhero": {
//!                 "prefix": ["Captain", "Doctor"],
//!                 "suffix": ["Fire", "Ice"],
//!                 "name": "#{prefix} #{suffix}"
//!             }
//!         }"##,
//!     )
//!     .unwrap();
//!
//! let faker = Faker::builder()
//!     .store(store)
//!     .random(FixedRandom::new(0))
//!     .registry(Registry::new().with(Namespace::new("Superhero")))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(faker.expand("#{Superhero.name}").unwrap(), "Captain Fire");
//! assert_eq!(faker.expand("#{regexify '[45]{2}'}").unwrap(), "44");
//! ```
//!
//! ## Operations
//!
//! ```
//! use forgery_core::prelude::*;
//!
//! let number = Namespace::new("Number").operation("numberBetween", |call| {
//!     let low: i64 = call.args().parse(0)?;
//!     let high: i64 = call.args().parse(1)?;
//!     Ok(((low + high) / 2).to_string())
//! });
//!
//! let mut store = LocaleStore::new();
//! store.set(&Locale::en(), "number.placeholder", "0");
//!
//! let faker = Faker::builder()
//!     .store(store)
//!     .registry(Registry::new().with(number))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(faker.expand("#{Number.number_between '1','9'}").unwrap(), "5");
//! assert!(faker.expand("#{Number.number_between 'x','y'}").is_err());
//! ```

pub mod config;
pub mod directive;
pub mod error;
mod expander;
pub mod faker;
pub mod fetcher;
pub mod locale;
pub mod pattern;
pub mod providers;
pub mod random;
pub mod regexify;
pub mod registry;
pub mod store;

pub use config::FakerConfig;
pub use error::{FakerError, OperationError, Result};
pub use faker::{Faker, FakerBuilder};
pub use fetcher::Fetcher;
pub use locale::Locale;
pub use pattern::LetterCase;
pub use random::{FixedRandom, RandomSource, SequenceRandom, StdRandom};
pub use regexify::Regexify;
pub use registry::{Arguments, Invocation, Namespace, Operation, Registry};
pub use store::{Entry, LocaleData, LocaleStore, RawValue};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::FakerConfig;
    pub use crate::error::{FakerError, OperationError};
    pub use crate::faker::{Faker, FakerBuilder};
    pub use crate::locale::Locale;
    pub use crate::pattern::LetterCase;
    pub use crate::random::{FixedRandom, RandomSource, SequenceRandom, StdRandom};
    pub use crate::registry::{Arguments, Invocation, Namespace, Registry};
    pub use crate::store::{LocaleData, LocaleStore, RawValue};
}
