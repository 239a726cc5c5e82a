//! Fuzz target for directive scanning and token parsing.
//!
//! Every span returned by the scanner must lie on char boundaries and
//! parse or be rejected without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;

use forgery_core::directive::{self, Directive};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut rest = text;
    while let Some(span) = directive::find(rest) {
        assert!(span.start < span.end);
        assert!(span.end <= rest.len());

        let token = &rest[span.start..span.end];
        assert!(token.starts_with(directive::OPEN));
        assert!(token.ends_with('}'));

        if let Some(parsed) = Directive::parse(token) {
            assert!(!parsed.reference.is_empty());
            assert_eq!(parsed.is_dotted(), parsed.reference.contains('.'));
        }

        rest = &rest[span.end..];
    }

    assert_eq!(directive::contains_directive(text), directive::find(text).is_some());
});
