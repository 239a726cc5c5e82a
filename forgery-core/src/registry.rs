//! Operation registry
//!
//! Operations are named closures grouped into namespaces. A directive such
//! as `#{IdNumber.valid}` looks up the `IdNumber` namespace and calls its
//! `valid` operation; an undotted `#{numerify '##'}` falls through to the
//! root namespace. Names are matched in snake_case, so `numberBetween` and
//! `number_between` are the same operation.

use crate::error::OperationError;
use crate::{Faker, FakerError};
use convert_case::{Boundary, Case, Casing};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Operation body.
pub type Operation =
    Arc<dyn Fn(&Invocation<'_>) -> Result<String, OperationError> + Send + Sync>;

/// Name of the root namespace.
pub const ROOT_NAMESPACE: &str = "Faker";

/// A named group of operations with an optional data-key prefix.
///
/// # Examples
///
/// ```
/// use forgery_core::Namespace;
///
/// let superhero = Namespace::new("Superhero")
///     .operation("power", |_| Ok("flight".to_string()));
///
/// assert_eq!(superhero.key_prefix(), Some("superhero"));
/// assert_eq!(superhero.data_key("name"), "superhero.name");
/// assert!(superhero.get("power").is_some());
/// ```
#[derive(Clone)]
pub struct Namespace {
    name: String,
    key_prefix: Option<String>,
    operations: HashMap<String, Operation>,
}

impl Namespace {
    /// Create a namespace whose data keys live under `snake_case(name)`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let key_prefix = Some(to_snake_case(&name));
        Self {
            name,
            key_prefix,
            operations: HashMap::new(),
        }
    }

    /// The root namespace: no key prefix.
    pub fn root() -> Self {
        Self {
            name: ROOT_NAMESPACE.to_string(),
            key_prefix: None,
            operations: HashMap::new(),
        }
    }

    /// Override the data-key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn operation<F>(mut self, name: &str, operation: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> Result<String, OperationError> + Send + Sync + 'static,
    {
        self.register(name, operation);
        self
    }

    /// Register `operation` under `snake_case(name)`, replacing any previous one.
    pub fn register<F>(&mut self, name: &str, operation: F) -> &mut Self
    where
        F: Fn(&Invocation<'_>) -> Result<String, OperationError> + Send + Sync + 'static,
    {
        self.operations.insert(to_snake_case(name), Arc::new(operation));
        self
    }

    /// Look up an operation by exact or snake_case name.
    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations
            .get(name)
            .or_else(|| self.operations.get(&to_snake_case(name)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_prefix(&self) -> Option<&str> {
        self.key_prefix.as_deref()
    }

    /// Data key for `member` in this namespace: `prefix.member`, or `member` at the root.
    pub fn data_key(&self, member: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{prefix}.{member}"),
            None => member.to_string(),
        }
    }

    /// Registered operation names, sorted.
    pub fn operation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.operations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("key_prefix", &self.key_prefix)
            .field("operations", &self.operation_names())
            .finish()
    }
}

/// Root namespace plus named namespaces, keyed by snake_case name.
#[derive(Debug, Clone)]
pub struct Registry {
    root: Namespace,
    namespaces: HashMap<String, Namespace>,
}

impl Registry {
    /// A registry with the built-in root operations
    /// (`numerify`, `letterify`, `bothify`, `regexify`).
    pub fn new() -> Self {
        let mut root = Namespace::root();
        crate::pattern::register_builtins(&mut root);
        Self {
            root,
            namespaces: HashMap::new(),
        }
    }

    /// Add or replace a namespace.
    pub fn register(&mut self, namespace: Namespace) -> &mut Self {
        self.namespaces
            .insert(to_snake_case(namespace.name()), namespace);
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, namespace: Namespace) -> Self {
        self.register(namespace);
        self
    }

    /// Register an operation on the root namespace.
    pub fn register_root<F>(&mut self, name: &str, operation: F) -> &mut Self
    where
        F: Fn(&Invocation<'_>) -> Result<String, OperationError> + Send + Sync + 'static,
    {
        self.root.register(name, operation);
        self
    }

    /// Find a namespace by `IdNumber` or `id_number` style name.
    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(&to_snake_case(name))
    }

    pub fn root(&self) -> &Namespace {
        &self.root
    }

    /// Named namespaces, in no particular order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.values()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Positional string arguments of a directive, already expanded.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    values: &'a [String],
}

impl<'a> Arguments<'a> {
    pub fn new(values: &'a [String]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.values.get(index).map(String::as_str)
    }

    /// Argument `index`, or an arity error when it is missing.
    pub fn str(&self, index: usize) -> Result<&'a str, OperationError> {
        self.get(index).ok_or_else(|| OperationError::Arity {
            expected: format!("at least {}", index + 1),
            got: self.len(),
        })
    }

    /// Convert argument `index` with [`FromStr`].
    pub fn parse<T: FromStr>(&self, index: usize) -> Result<T, OperationError> {
        let raw = self.str(index)?;
        raw.trim()
            .parse()
            .map_err(|_| OperationError::InvalidArgument {
                index,
                value: raw.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Argument `index` as `true` / `false`, case-insensitive.
    pub fn flag(&self, index: usize) -> Result<bool, OperationError> {
        let raw = self.str(index)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(OperationError::InvalidArgument {
                index,
                value: raw.to_string(),
                expected: "boolean",
            }),
        }
    }

    pub fn expect_len(&self, expected: usize) -> Result<(), OperationError> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(OperationError::Arity {
                expected: expected.to_string(),
                got: self.len(),
            })
        }
    }

    pub fn expect_range(&self, min: usize, max: usize) -> Result<(), OperationError> {
        if (min..=max).contains(&self.len()) {
            Ok(())
        } else {
            Err(OperationError::Arity {
                expected: format!("{min} to {max}"),
                got: self.len(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.values.iter().map(String::as_str)
    }
}

/// Context handed to an operation for one dispatched directive.
///
/// Lives only for the duration of the call.
pub struct Invocation<'a> {
    faker: &'a Faker,
    target: &'a Namespace,
    args: Arguments<'a>,
    depth: usize,
}

impl<'a> Invocation<'a> {
    pub(crate) fn new(
        faker: &'a Faker,
        target: &'a Namespace,
        args: Arguments<'a>,
        depth: usize,
    ) -> Self {
        Self {
            faker,
            target,
            args,
            depth,
        }
    }

    pub fn faker(&self) -> &'a Faker {
        self.faker
    }

    /// Namespace the operation was found in.
    pub fn target(&self) -> &'a Namespace {
        self.target
    }

    pub fn args(&self) -> Arguments<'a> {
        self.args
    }

    /// Expansion depth of this call.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Fetch `key` and expand it against this invocation's target.
    ///
    /// Nested expansion continues from the current depth.
    pub fn resolve(&self, key: &str) -> Result<String, FakerError> {
        self.faker.resolve_at(key, self.target, self.depth)
    }

    /// Expand `template` against this invocation's target, continuing from the current depth.
    pub fn expression(&self, template: &str) -> Result<String, FakerError> {
        self.faker.expression_at(template, self.target, self.depth)
    }
}

impl fmt::Debug for Invocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Invocation")
            .field("target", &self.target.name())
            .field("args", &self.args)
            .field("depth", &self.depth)
            .finish()
    }
}

/// `IdNumber` -> `id_number`, `IDNumber` -> `id_number`, `numberBetween` -> `number_between`.
///
/// Dotted keys convert segment by segment; existing underscores and digits
/// followed by lower case (`line1`, `address2`) are kept as they are.
pub fn to_snake_case(name: &str) -> String {
    const BOUNDARIES: [Boundary; 3] = [Boundary::LowerUpper, Boundary::Acronym, Boundary::DigitUpper];

    name.split('.')
        .map(|segment| segment.with_boundaries(&BOUNDARIES).to_case(Case::Snake))
        .collect::<Vec<_>>()
        .join(".")
}
