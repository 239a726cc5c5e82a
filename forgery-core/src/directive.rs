//! Directive scanning and parsing
//!
//! A directive is `#{reference}` or `#{reference args}`. The reference is a
//! dotted path of `[A-Za-z0-9_]` segments. Arguments are comma separated,
//! optionally wrapped in parentheses, and each one is `'single'`,
//! `"double"`, `/slash/` delimited or a bare token:
//!
//! ```text
//! #{Name.first_name}
//! #{Number.number_between '1','10'}
//! #{Number.number_between(1, 10)}
//! #{regexify /[45]{2}/}
//! #{bothify '#{Name.initial}##'}
//! ```
//!
//! Braces inside a directive must balance; that is how `{2}` in a regex
//! argument or a nested `#{...}` stays inside its parent. Braces inside a
//! quoted argument are not counted, so `#{bothify 'a}#'}` is one directive.
//! `#{` followed by a digit is a regex quantifier such as `#{2}`, not a
//! directive.

/// Opening marker of a directive.
pub const OPEN: &str = "#{";

/// Byte range of a directive token within a template, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Locate the leftmost complete directive in `text`.
///
/// An opening marker without a matching `}` is skipped and left as literal
/// text; scanning resumes right after it.
pub fn find(text: &str) -> Option<Span> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(offset) = text[from..].find(OPEN) {
        let start = from + offset;
        let body = start + OPEN.len();
        let quantifier = bytes.get(body).is_some_and(u8::is_ascii_digit);
        if !quantifier && let Some(close) = matching_brace(bytes, body) {
            return Some(Span {
                start,
                end: close + 1,
            });
        }
        from = body;
    }
    None
}

/// Index of the `}` closing a body that starts at `from`.
///
/// A quote opens a quoted argument only where an argument can start (after
/// whitespace, `,` or `(`); inside it `\` skips the next byte.
fn matching_brace(bytes: &[u8], from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;
    let mut i = from;

    while let Some(&b) = bytes.get(i) {
        match quote {
            Some(_) if b == b'\\' => i += 1,
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b'\'' | b'"' if argument_start(bytes[i - 1]) => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

fn argument_start(prev: u8) -> bool {
    prev.is_ascii_whitespace() || prev == b',' || prev == b'('
}

/// Whether `text` contains at least one complete directive.
pub fn contains_directive(text: &str) -> bool {
    find(text).is_some()
}

/// A parsed directive token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    /// The full token, `#{` and `}` included
    pub token: &'a str,
    /// Dotted reference, e.g. `Name.first_name`
    pub reference: &'a str,
    /// Unquoted argument text, not yet expanded
    pub args: Vec<String>,
}

impl<'a> Directive<'a> {
    /// Parse a full `#{...}` token. Returns `None` for a malformed body.
    pub fn parse(token: &'a str) -> Option<Self> {
        let body = token.strip_prefix(OPEN)?.strip_suffix('}')?.trim();

        let reference_len = body
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(body.len());
        let reference = &body[..reference_len];
        if reference.is_empty()
            || reference.starts_with('.')
            || reference.ends_with('.')
            || reference.contains("..")
        {
            return None;
        }

        let rest = body[reference_len..].trim();
        let args = if rest.is_empty() {
            Vec::new()
        } else if let Some(inner) = rest.strip_prefix('(') {
            parse_args(inner.strip_suffix(')')?)?
        } else {
            parse_args(rest)?
        };

        Some(Self {
            token,
            reference,
            args,
        })
    }

    /// Whether the reference names `Namespace.member` rather than a bare member.
    pub fn is_dotted(&self) -> bool {
        self.reference.contains('.')
    }
}

fn parse_args(input: &str) -> Option<Vec<String>> {
    let mut args = Vec::new();
    let mut cursor = Cursor::new(input);

    cursor.skip_whitespace();
    if cursor.at_end() {
        return Some(args);
    }

    loop {
        cursor.skip_whitespace();
        args.push(cursor.argument()?);
        cursor.skip_whitespace();

        match cursor.bump() {
            None => return Some(args),
            Some(',') => continue,
            Some(_) => return None,
        }
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn argument(&mut self) -> Option<String> {
        match self.peek()? {
            quote @ ('\'' | '"') => {
                self.bump();
                self.quoted(quote)
            }
            '/' => {
                self.bump();
                self.slashed()
            }
            _ => self.bare(),
        }
    }

    /// Text up to the closing `quote`; a backslash escapes the quote character.
    fn quoted(&mut self, quote: char) -> Option<String> {
        let mut out = String::new();
        while let Some(c) = self.bump() {
            if c == quote {
                return Some(out);
            }
            if c == '\\' && self.peek() == Some(quote) {
                self.bump();
                out.push(quote);
            } else {
                out.push(c);
            }
        }
        None
    }

    /// Text up to the `/` that ends the argument (followed by a comma or the end).
    fn slashed(&mut self) -> Option<String> {
        let rest = self.rest();
        let close = rest.char_indices().filter(|&(_, c)| c == '/').find_map(|(i, _)| {
            let after = rest[i + 1..].trim_start();
            (after.is_empty() || after.starts_with(',')).then_some(i)
        })?;
        self.pos += close + 1;
        Some(rest[..close].to_string())
    }

    /// Text up to the next comma outside braces.
    fn bare(&mut self) -> Option<String> {
        let rest = self.rest();
        let mut depth = 0usize;
        let mut end = rest.len();
        for (i, c) in rest.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    end = i;
                    break;
                }
                _ => {}
            }
        }
        let value = rest[..end].trim_end();
        if value.is_empty() {
            return None;
        }
        self.pos += end;
        Some(value.to_string())
    }
}
