//! Placeholder expanders: `#` becomes a digit, `?` a letter.

use crate::error::OperationError;
use crate::random::RandomSource;
use crate::registry::{Invocation, Namespace};
use std::str::FromStr;

/// Placeholder for a random digit.
pub const DIGIT_PLACEHOLDER: char = '#';

/// Placeholder for a random letter.
pub const LETTER_PLACEHOLDER: char = '?';

/// Case used for generated letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LetterCase {
    #[default]
    Upper,
    Lower,
}

impl LetterCase {
    /// `true` selects upper case, matching the `'true'`/`'false'` directive flag.
    pub fn from_upper(upper: bool) -> Self {
        if upper { LetterCase::Upper } else { LetterCase::Lower }
    }

    fn base(self) -> u8 {
        match self {
            LetterCase::Upper => b'A',
            LetterCase::Lower => b'a',
        }
    }

    fn apply(self, c: char) -> char {
        match self {
            LetterCase::Upper => c.to_ascii_uppercase(),
            LetterCase::Lower => c.to_ascii_lowercase(),
        }
    }
}

impl FromStr for LetterCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upper" | "true" => Ok(LetterCase::Upper),
            "lower" | "false" => Ok(LetterCase::Lower),
            other => Err(format!("unknown letter case: {other}")),
        }
    }
}

fn random_digit(random: &dyn RandomSource) -> char {
    char::from(b'0' + random.pick(10) as u8)
}

fn random_letter(random: &dyn RandomSource, case: LetterCase) -> char {
    char::from(case.base() + random.pick(26) as u8)
}

/// Replace every `#` with an independent random digit.
pub fn numerify(pattern: &str, random: &dyn RandomSource) -> String {
    pattern
        .chars()
        .map(|c| if c == DIGIT_PLACEHOLDER { random_digit(random) } else { c })
        .collect()
}

/// Replace every `?` with an independent random letter in `case`.
pub fn letterify(pattern: &str, case: LetterCase, random: &dyn RandomSource) -> String {
    pattern
        .chars()
        .map(|c| if c == LETTER_PLACEHOLDER { random_letter(random, case) } else { c })
        .collect()
}

/// Replace `#` with digits and `?` with upper-case letters; literal text is untouched.
pub fn bothify(pattern: &str, random: &dyn RandomSource) -> String {
    pattern
        .chars()
        .map(|c| match c {
            DIGIT_PLACEHOLDER => random_digit(random),
            LETTER_PLACEHOLDER => random_letter(random, LetterCase::Upper),
            other => other,
        })
        .collect()
}

/// Like [`bothify`], with letters generated in `case` and literal ASCII
/// letters normalized to the same case.
pub fn bothify_with(pattern: &str, case: LetterCase, random: &dyn RandomSource) -> String {
    pattern
        .chars()
        .map(|c| match c {
            DIGIT_PLACEHOLDER => random_digit(random),
            LETTER_PLACEHOLDER => random_letter(random, case),
            other => case.apply(other),
        })
        .collect()
}

/// Register `numerify`, `letterify`, `bothify` and `regexify` on the root namespace.
pub(crate) fn register_builtins(root: &mut Namespace) {
    root.register("numerify", |call: &Invocation<'_>| {
        call.args().expect_len(1)?;
        Ok(call.faker().numerify(call.args().str(0)?))
    });

    root.register("letterify", |call: &Invocation<'_>| {
        let case = letter_case(call)?;
        Ok(call.faker().letterify(call.args().str(0)?, case))
    });

    root.register("bothify", |call: &Invocation<'_>| {
        let pattern = call.args().str(0)?;
        if call.args().len() == 2 {
            let case = letter_case(call)?;
            Ok(call.faker().bothify_with(pattern, case))
        } else {
            Ok(call.faker().bothify(pattern))
        }
    });

    root.register("regexify", |call: &Invocation<'_>| {
        call.args().expect_len(1)?;
        Ok(call.faker().regexify(call.args().str(0)?)?)
    });
}

fn letter_case(call: &Invocation<'_>) -> Result<LetterCase, OperationError> {
    call.args().expect_range(1, 2)?;
    match call.args().get(1) {
        Some(_) => call.args().flag(1).map(LetterCase::from_upper),
        None => Ok(LetterCase::default()),
    }
}
