//! String generation from a constrained regular-expression subset
//!
//! The pattern is parsed once into a small tree and then walked, picking
//! uniformly at every alternation, class and repetition. There is no
//! matching and no backtracking; the work a pattern may take is bounded
//! when it is parsed.
//!
//! Supported syntax:
//!
//! | Construct                | Meaning                                              |
//! |--------------------------|------------------------------------------------------|
//! | `abc`                    | literal characters                                   |
//! | `.`                      | any printable ASCII character                        |
//! | `[a-z_]`, `[^0-9]`       | class with ranges, optionally negated (printable ASCII) |
//! | `\d` `\w` `\s`           | digit, word character, space (also inside classes)   |
//! | `\D` `\W` `\S`           | their printable ASCII complements                    |
//! | `\.` `\[` ...            | escaped punctuation as a literal                     |
//! | `(a|b)`, `(?:a|b)`       | group with alternatives                              |
//! | `{n}` `{n,m}` `{n,}`     | repetition; `{n,}` allows up to `n + max_repeat`     |
//! | `?` `*` `+`              | `{0,1}`, `{0,max_repeat}`, `{1,1+max_repeat}`        |
//! | `/.../`, `^`, `$`        | stripped when they wrap the whole pattern            |
//!
//! Anything else (backreferences, lookaround, anchors in the middle, bounds
//! above 1000) is rejected with [`FakerError::InvalidPattern`], as are
//! patterns nested deeper than [`MAX_NESTING`] groups, able to produce more
//! than [`MAX_OUTPUT`] characters, or needing more than [`MAX_STEPS`]
//! generation steps (`(){1000}` nested produces nothing but still loops).

use crate::random::RandomSource;
use crate::{FakerError, Result};

/// Largest explicit repetition bound accepted.
pub const MAX_BOUND: u32 = 1000;

/// Deepest group nesting accepted.
pub const MAX_NESTING: usize = 32;

/// Longest output a pattern may be able to produce.
pub const MAX_OUTPUT: usize = 100_000;

/// Most nodes a single generation may visit.
pub const MAX_STEPS: usize = 1_000_000;

const PRINTABLE: std::ops::RangeInclusive<char> = ' '..='~';

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Literal(char),
    Class(Vec<char>),
    Alternation(Vec<Vec<Repeat>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Repeat {
    node: Node,
    min: u32,
    max: u32,
}

/// A parsed pattern, reusable across generations.
///
/// ```
/// use forgery_core::{FixedRandom, Regexify};
///
/// let pattern = Regexify::parse("[45]{2}", 10).unwrap();
/// assert_eq!(pattern.generate(&FixedRandom::new(1)), "55");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regexify {
    root: Node,
}

impl Regexify {
    /// Parse `pattern`; unbounded quantifiers repeat at most `max_repeat` extra times.
    pub fn parse(pattern: &str, max_repeat: u32) -> Result<Self> {
        let body = strip_delimiters(pattern);
        let mut parser = Parser {
            pattern,
            chars: body.chars().collect(),
            pos: 0,
            nesting: 0,
            max_repeat,
        };

        let root = parser.alternation()?;
        if parser.pos < parser.chars.len() {
            return Err(parser.error("unmatched ')'"));
        }
        if max_len(&root) > MAX_OUTPUT {
            return Err(parser.error(format!(
                "pattern may generate more than {MAX_OUTPUT} characters"
            )));
        }
        if max_steps(&root) > MAX_STEPS {
            return Err(parser.error(format!(
                "pattern may take more than {MAX_STEPS} steps to generate"
            )));
        }
        Ok(Self { root })
    }

    /// Produce one string in the language of the pattern.
    pub fn generate(&self, random: &dyn RandomSource) -> String {
        let mut out = String::new();
        emit(&self.root, random, &mut out);
        out
    }
}

/// Parse `pattern` and generate one matching string.
pub fn regexify(pattern: &str, random: &dyn RandomSource, max_repeat: u32) -> Result<String> {
    Ok(Regexify::parse(pattern, max_repeat)?.generate(random))
}

fn strip_delimiters(pattern: &str) -> &str {
    let mut body = pattern.trim();
    if body.len() >= 2 && body.starts_with('/') && body.ends_with('/') {
        body = &body[1..body.len() - 1];
    }
    if let Some(rest) = body.strip_prefix('^') {
        body = rest;
    }
    if body.ends_with('$') && !body.ends_with("\\$") {
        body = &body[..body.len() - 1];
    }
    body
}

fn choose(random: &dyn RandomSource, n: usize) -> usize {
    if n <= 1 { 0 } else { random.pick(n) }
}

fn max_len(node: &Node) -> usize {
    match node {
        Node::Literal(_) | Node::Class(_) => 1,
        Node::Alternation(branches) => branches
            .iter()
            .map(|items| {
                items.iter().fold(0usize, |total, repeat| {
                    total.saturating_add(max_len(&repeat.node).saturating_mul(repeat.max as usize))
                })
            })
            .max()
            .unwrap_or(0),
    }
}

/// Upper bound on the nodes `emit` visits, counting every repetition pass.
fn max_steps(node: &Node) -> usize {
    match node {
        Node::Literal(_) | Node::Class(_) => 1,
        Node::Alternation(branches) => branches
            .iter()
            .map(|items| {
                items.iter().fold(0usize, |total, repeat| {
                    total.saturating_add(max_steps(&repeat.node).saturating_mul(repeat.max as usize))
                })
            })
            .max()
            .unwrap_or(0)
            .saturating_add(1),
    }
}

fn emit(node: &Node, random: &dyn RandomSource, out: &mut String) {
    match node {
        Node::Literal(c) => out.push(*c),
        Node::Class(members) => out.push(members[choose(random, members.len())]),
        Node::Alternation(branches) => {
            for repeat in &branches[choose(random, branches.len())] {
                let span = (repeat.max - repeat.min) as usize + 1;
                let count = repeat.min as usize + choose(random, span);
                for _ in 0..count {
                    emit(&repeat.node, random, out);
                }
            }
        }
    }
}

struct Parser<'a> {
    pattern: &'a str,
    chars: Vec<char>,
    pos: usize,
    nesting: usize,
    max_repeat: u32,
}

impl Parser<'_> {
    fn error(&self, message: impl Into<String>) -> FakerError {
        FakerError::pattern(self.pattern, message)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn alternation(&mut self) -> Result<Node> {
        let mut branches = vec![self.sequence()?];
        while self.eat('|') {
            branches.push(self.sequence()?);
        }
        Ok(Node::Alternation(branches))
    }

    fn sequence(&mut self) -> Result<Vec<Repeat>> {
        let mut items = Vec::new();
        while let Some(c) = self.peek() {
            if c == '|' || c == ')' {
                break;
            }
            let node = self.atom()?;
            let (min, max) = self.quantifier()?;
            items.push(Repeat { node, min, max });
        }
        Ok(items)
    }

    fn atom(&mut self) -> Result<Node> {
        let c = self.bump().ok_or_else(|| self.error("unexpected end of pattern"))?;
        match c {
            '(' => {
                if self.eat('?') && !self.eat(':') {
                    return Err(self.error("only non-capturing groups (?:...) are supported"));
                }
                if self.nesting == MAX_NESTING {
                    return Err(self.error(format!("groups nested deeper than {MAX_NESTING}")));
                }
                self.nesting += 1;
                let inner = self.alternation()?;
                self.nesting -= 1;
                if !self.eat(')') {
                    return Err(self.error("unclosed group"));
                }
                Ok(inner)
            }
            '[' => self.class(),
            '.' => Ok(Node::Class(PRINTABLE.collect())),
            '\\' => match self.escape()? {
                Escaped::Char(c) => Ok(Node::Literal(c)),
                Escaped::Set(set) => Ok(Node::Class(set)),
            },
            '*' | '+' | '?' | '{' => Err(self.error(format!("nothing to repeat before '{c}'"))),
            '^' | '$' => Err(self.error("anchors are only supported at the pattern edges")),
            other => Ok(Node::Literal(other)),
        }
    }

    fn escape(&mut self) -> Result<Escaped> {
        let c = self.bump().ok_or_else(|| self.error("trailing backslash"))?;
        let set = match c {
            'd' => ('0'..='9').collect(),
            'w' => word_chars(),
            's' => vec![' '],
            'D' => complement(&('0'..='9').collect::<Vec<_>>()),
            'W' => complement(&word_chars()),
            'S' => complement(&[' ']),
            'n' => return Ok(Escaped::Char('\n')),
            't' => return Ok(Escaped::Char('\t')),
            c if c.is_ascii_alphanumeric() => {
                return Err(self.error(format!("unsupported escape '\\{c}'")));
            }
            c => return Ok(Escaped::Char(c)),
        };
        Ok(Escaped::Set(set))
    }

    fn class(&mut self) -> Result<Node> {
        let negate = self.eat('^');
        let mut members = Vec::new();
        let mut first = true;

        loop {
            let c = self.bump().ok_or_else(|| self.error("unclosed character class"))?;
            if c == ']' && !first {
                break;
            }
            first = false;

            let start = if c == '\\' {
                match self.escape()? {
                    Escaped::Char(c) => c,
                    Escaped::Set(set) => {
                        members.extend(set);
                        continue;
                    }
                }
            } else {
                c
            };

            let is_range = self.peek() == Some('-')
                && self.chars.get(self.pos + 1).is_some_and(|&next| next != ']');
            if is_range {
                self.pos += 1;
                let end = match self.bump() {
                    Some('\\') => match self.escape()? {
                        Escaped::Char(c) => c,
                        Escaped::Set(_) => {
                            return Err(self.error("class shorthand cannot end a range"));
                        }
                    },
                    Some(c) => c,
                    None => return Err(self.error("unclosed character class")),
                };
                if end < start {
                    return Err(self.error(format!("invalid range {start}-{end}")));
                }
                members.extend(start..=end);
            } else {
                members.push(start);
            }
        }

        members.sort_unstable();
        members.dedup();
        if negate {
            members = complement(&members);
        }
        if members.is_empty() {
            return Err(self.error("character class matches nothing"));
        }
        Ok(Node::Class(members))
    }

    fn quantifier(&mut self) -> Result<(u32, u32)> {
        let bounds = match self.peek() {
            Some('?') => (0, 1),
            Some('*') => (0, self.max_repeat),
            Some('+') => (1, self.max_repeat.saturating_add(1)),
            Some('{') => {
                self.pos += 1;
                return self.braces();
            }
            _ => return Ok((1, 1)),
        };
        self.pos += 1;
        self.skip_lazy_marker();
        Ok(bounds)
    }

    fn braces(&mut self) -> Result<(u32, u32)> {
        let min = self
            .number()?
            .ok_or_else(|| self.error("repetition must start with a number"))?;
        let max = if self.eat(',') {
            self.number()?.unwrap_or(min.saturating_add(self.max_repeat))
        } else {
            min
        };
        if !self.eat('}') {
            return Err(self.error("unclosed repetition"));
        }
        if max < min {
            return Err(self.error(format!("repetition {{{min},{max}}} has max below min")));
        }
        if max > MAX_BOUND.saturating_add(self.max_repeat) || min > MAX_BOUND {
            return Err(self.error(format!("repetition bound above {MAX_BOUND}")));
        }
        self.skip_lazy_marker();
        Ok((min, max))
    }

    fn number(&mut self) -> Result<Option<u32>> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        digits
            .parse()
            .map(Some)
            .map_err(|_| self.error(format!("repetition bound above {MAX_BOUND}")))
    }

    /// Laziness does not change what can be generated.
    fn skip_lazy_marker(&mut self) {
        self.eat('?');
    }
}

enum Escaped {
    Char(char),
    Set(Vec<char>),
}

fn word_chars() -> Vec<char> {
    ('0'..='9')
        .chain('A'..='Z')
        .chain(std::iter::once('_'))
        .chain('a'..='z')
        .collect()
}

fn complement(excluded: &[char]) -> Vec<char> {
    PRINTABLE.filter(|c| !excluded.contains(c)).collect()
}
