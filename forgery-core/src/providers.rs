//! Data-backed providers

use crate::registry::{Invocation, Namespace};

/// `IdNumber` namespace.
///
/// `valid` expands `id_number.valid`; `invalid` expands `id_number.invalid`
/// and numerifies the result.
pub fn id_number() -> Namespace {
    Namespace::new("IdNumber")
        .operation("valid", |call: &Invocation<'_>| {
            call.args().expect_len(0)?;
            Ok(call.resolve("id_number.valid")?)
        })
        .operation("invalid", |call: &Invocation<'_>| {
            call.args().expect_len(0)?;
            let template = call.resolve("id_number.invalid")?;
            Ok(call.faker().numerify(&template))
        })
}
