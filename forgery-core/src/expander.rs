//! Directive expansion
//!
//! Templates are scanned left to right. Each `#{...}` is parsed, dispatched
//! to an operation or a data key, and replaced by its result; scanning
//! continues after the replacement, so operation output is never rescanned.
//! Data values are themselves templates and are expanded before splicing.

use crate::directive::{self, Directive};
use crate::error::OperationError;
use crate::registry::{Arguments, Invocation, Namespace, Operation, to_snake_case};
use crate::{Faker, FakerError, Result};
use forgery_log::debug;

pub(crate) struct Expander<'a> {
    faker: &'a Faker,
    limit: usize,
}

impl<'a> Expander<'a> {
    pub(crate) fn new(faker: &'a Faker) -> Self {
        Self {
            faker,
            limit: faker.config().max_depth,
        }
    }

    /// Replace every directive in `template`.
    pub(crate) fn expand(&self, template: &str, target: &Namespace, depth: usize) -> Result<String> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(span) = directive::find(rest) {
            out.push_str(&rest[..span.start]);
            let value = self.evaluate(&rest[span.start..span.end], target, depth)?;
            out.push_str(&value);
            rest = &rest[span.end..];
        }

        out.push_str(rest);
        Ok(out)
    }

    fn evaluate(&self, token: &str, target: &Namespace, depth: usize) -> Result<String> {
        if depth >= self.limit {
            return Err(FakerError::ExpansionTooDeep {
                directive: token.to_string(),
                limit: self.limit,
            });
        }

        let Some(directive) = Directive::parse(token) else {
            debug!("malformed directive {token}");
            return Err(FakerError::unresolved(token));
        };

        self.dispatch(&directive, target, depth)
    }

    fn dispatch(&self, directive: &Directive<'_>, target: &Namespace, depth: usize) -> Result<String> {
        let registry = self.faker.registry();

        match directive.reference.split_once('.') {
            None => {
                let member = directive.reference;
                if let Some(operation) = target.get(member) {
                    return self.invoke(operation, target, directive, target, depth);
                }
                if let Some(value) = self.data(&target.data_key(member), target, depth)? {
                    return Ok(value);
                }
                if let Some(operation) = registry.root().get(member) {
                    return self.invoke(operation, registry.root(), directive, target, depth);
                }
            }
            Some((name, member)) => {
                let namespace = registry.namespace(name);
                if let Some(ns) = namespace {
                    if let Some(operation) = ns.get(member) {
                        return self.invoke(operation, ns, directive, target, depth);
                    }
                }
                if let Some(value) = self.data(directive.reference, namespace.unwrap_or(target), depth)? {
                    return Ok(value);
                }
            }
        }

        debug!(
            "no operation or data for {} (target {})",
            directive.token,
            target.name()
        );
        Err(FakerError::unresolved(directive.token))
    }

    /// Fetch `key` (or its snake_case form) and expand the chosen value.
    fn data(&self, key: &str, target: &Namespace, depth: usize) -> Result<Option<String>> {
        let fetcher = self.faker.fetcher();
        let value = fetcher.try_fetch(key).or_else(|| {
            let snake = to_snake_case(key);
            (snake != key).then(|| fetcher.try_fetch(&snake)).flatten()
        });

        match value {
            Some(template) => self.expand(&template, target, depth + 1).map(Some),
            None => Ok(None),
        }
    }

    /// Expand the arguments in the caller's context, then call the operation.
    fn invoke(
        &self,
        operation: &Operation,
        namespace: &Namespace,
        directive: &Directive<'_>,
        caller: &Namespace,
        depth: usize,
    ) -> Result<String> {
        let token = directive.token;
        let args = directive
            .args
            .iter()
            .map(|arg| self.expand(arg, caller, depth + 1))
            .collect::<Result<Vec<_>>>()
            .map_err(|err| fold(token, err.into()))?;

        let invocation = Invocation::new(self.faker, namespace, Arguments::new(&args), depth + 1);
        (**operation)(&invocation).map_err(|err| fold(token, err))
    }
}

/// Map an operation failure to the error reported for `token`.
///
/// Depth overruns keep their identity; anything else becomes an unresolved directive.
fn fold(token: &str, err: OperationError) -> FakerError {
    match err {
        OperationError::Faker(err @ FakerError::ExpansionTooDeep { .. }) => err,
        other => {
            debug!("{token} failed: {other}");
            FakerError::unresolved(token)
        }
    }
}
