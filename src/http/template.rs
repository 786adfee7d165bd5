//! Randomized request templates.
//!
//! A template is tokenized once into literal text and placeholders:
//!
//! - `$RNUM` becomes a uniform integer in `[0, 256)`.
//! - `$RNUM(m)` becomes a uniform integer in `[0, m)`, or nothing when `m <= 0`.
//!   A non-numeric argument counts as `0`. Without a closing `)` the argument
//!   is the rest of the template, which the placeholder consumes.
//! - `$RDICT` becomes one dictionary entry chosen uniformly at random.
//!
//! Rendering walks the segments left to right, so text produced by one
//! placeholder is never scanned for further placeholders.
use rand::Rng;
use rand::seq::SliceRandom;

const RNUM_TOKEN: &str = "$RNUM";
const RDICT_TOKEN: &str = "$RDICT";
/// Exclusive upper bound of a bare `$RNUM`.
const DEFAULT_RNUM_BOUND: i64 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Number { bound: i64 },
    DictionaryEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl RequestTemplate {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = input;

        loop {
            let Some(start) = rest.find('$') else {
                literal.push_str(rest);
                break;
            };
            let (before, from_dollar) = rest.split_at(start);
            literal.push_str(before);

            if let Some(after) = from_dollar.strip_prefix(RDICT_TOKEN) {
                flush_literal(&mut literal, &mut segments);
                segments.push(Segment::DictionaryEntry);
                rest = after;
            } else if let Some(after) = from_dollar.strip_prefix(RNUM_TOKEN) {
                flush_literal(&mut literal, &mut segments);
                match split_bound(after) {
                    Some((bound, remaining)) => {
                        segments.push(Segment::Number { bound });
                        rest = remaining;
                    }
                    None => {
                        segments.push(Segment::Number {
                            bound: DEFAULT_RNUM_BOUND,
                        });
                        rest = after;
                    }
                }
            } else {
                let (dollar, after) = from_dollar.split_at(1);
                literal.push_str(dollar);
                rest = after;
            }
        }
        flush_literal(&mut literal, &mut segments);

        Self {
            source: input.to_owned(),
            segments,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn uses_dictionary(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::DictionaryEntry))
    }

    #[must_use]
    pub fn has_placeholders(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| !matches!(segment, Segment::Literal(_)))
    }

    /// Resolves every placeholder with fresh random values.
    ///
    /// `$RDICT` renders as nothing when `dictionary` is empty; run
    /// configuration rejects that combination before any request is sent.
    pub fn render<R>(&self, rng: &mut R, dictionary: &[String]) -> String
    where
        R: Rng,
    {
        if !self.has_placeholders() {
            return self.source.clone();
        }

        let mut output = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Number { bound } => {
                    if *bound > 0 {
                        let value = rng.gen_range(0..*bound);
                        output.push_str(&value.to_string());
                    }
                }
                Segment::DictionaryEntry => {
                    if let Some(entry) = dictionary.choose(rng) {
                        output.push_str(entry);
                    }
                }
            }
        }
        output
    }
}

/// Parses and renders `input` in one step.
pub fn render_template<R>(input: &str, rng: &mut R, dictionary: &[String]) -> String
where
    R: Rng,
{
    RequestTemplate::parse(input).render(rng, dictionary)
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

/// Splits `(m)` off the text following `$RNUM`. Without a closing `)` the
/// bound runs to the end of the template.
fn split_bound(after_token: &str) -> Option<(i64, &str)> {
    let inner = after_token.strip_prefix('(')?;
    let Some(end) = inner.find(')') else {
        return Some((parse_bound(inner), ""));
    };
    let (argument, closing) = inner.split_at(end);
    let remaining = closing.strip_prefix(')')?;
    Some((parse_bound(argument), remaining))
}

/// Reads a leading signed integer the way C's `atoi` does: surrounding
/// whitespace is ignored, trailing junk is dropped and anything unreadable
/// is `0`.
fn parse_bound(argument: &str) -> i64 {
    let trimmed = argument.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(unsigned) => (true, unsigned),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_len = digits
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(digits.len());
    let (number, _) = digits.split_at(digits_len);
    let magnitude = number.parse::<i64>().unwrap_or(0);
    if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    }
}
