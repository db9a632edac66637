//! Static overlap between glob patterns.
//!
//! Two patterns overlap when some target path matches both. The check works
//! on the pattern text: braces are expanded, each alternative is split into
//! segments, and the two segment sequences are intersected with `**` acting
//! as a run of any number of segments. Within a segment `*` is a run of any
//! characters and `?` / `[...]` stand for one character.
//!
//! The answer errs towards overlap only where the text cannot be analysed
//! exactly (negated classes, brace sets that expand too far).

use super::matcher::build_glob;

/// Upper bound on brace alternatives per pattern before giving up.
const MAX_EXPANSIONS: usize = 64;

/// Whether some target path can match both `a` and `b`.
///
/// Patterns that do not compile only overlap when they are equal.
///
/// # Examples
///
/// ```
/// use strata::layer::overlap::patterns_overlap;
///
/// assert!(patterns_overlap("src/**/*.js", "**/*.test.js"));
/// assert!(patterns_overlap("*", "**/*.test.js"));
/// assert!(!patterns_overlap("src/**/*.js", "src/**/*.ts"));
/// assert!(!patterns_overlap("db/*.js", "db/migrations/**/*.js"));
/// ```
#[must_use]
pub fn patterns_overlap(a: &str, b: &str) -> bool {
    let a = canonical(a);
    let b = canonical(b);
    if a == b {
        return true;
    }
    if build_glob(&a).is_err() || build_glob(&b).is_err() {
        return false;
    }

    let (Some(left), Some(right)) = (expand_braces(&a), expand_braces(&b)) else {
        return true;
    };

    left.iter().any(|x| {
        right.iter().any(|y| match (parse_path(x), parse_path(y)) {
            (Some(p), Some(q)) => sequences_overlap(&p, &q, Segment::is_globstar, segments_share),
            _ => true,
        })
    })
}

/// Same rewriting `build_glob` applies: no leading `./`, a trailing `/`
/// covers everything below.
fn canonical(pattern: &str) -> String {
    let trimmed = pattern.strip_prefix("./").unwrap_or(pattern);
    if trimmed.ends_with('/') {
        format!("{trimmed}**")
    } else {
        trimmed.to_string()
    }
}

// ----------------------------------------------------------------------------
// Brace expansion
// ----------------------------------------------------------------------------

/// All brace alternatives of `pattern`, or `None` past [`MAX_EXPANSIONS`].
fn expand_braces(pattern: &str) -> Option<Vec<String>> {
    let mut out = Vec::new();
    expand_into(pattern, &mut out).then_some(out)
}

fn expand_into(pattern: &str, out: &mut Vec<String>) -> bool {
    let Some((open, close, alternatives)) = first_brace_group(pattern) else {
        out.push(pattern.to_string());
        return out.len() <= MAX_EXPANSIONS;
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    alternatives
        .iter()
        .all(|alt| expand_into(&format!("{prefix}{alt}{suffix}"), out))
}

/// Byte offsets of the first top-level `{`, its matching `}`, and the
/// comma-separated alternatives between them.
fn first_brace_group(pattern: &str) -> Option<(usize, usize, Vec<&str>)> {
    let mut open = None;
    let mut depth = 0usize;
    let mut start = 0;
    let mut alternatives = Vec::new();
    let mut in_class = false;
    let mut escaped = false;

    for (i, c) in pattern.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            _ if in_class => {}
            '{' => {
                if depth == 0 {
                    open = Some(i);
                    start = i + 1;
                }
                depth += 1;
            }
            ',' if depth == 1 => {
                alternatives.push(&pattern[start..i]);
                start = i + 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    alternatives.push(&pattern[start..i]);
                    return open.map(|open| (open, i, alternatives));
                }
            }
            _ => {}
        }
    }
    None
}

// ----------------------------------------------------------------------------
// Segments and tokens
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// `**`: zero or more whole segments.
    Globstar,
    Part(Vec<Token>),
}

impl Segment {
    fn is_globstar(&self) -> bool {
        matches!(self, Self::Globstar)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    /// `*`: any run of characters within a segment.
    Star,
    /// `?`
    Any,
    Literal(char),
    Class {
        negated: bool,
        ranges: Vec<(char, char)>,
    },
}

impl Token {
    fn is_star(&self) -> bool {
        matches!(self, Self::Star)
    }
}

fn parse_path(pattern: &str) -> Option<Vec<Segment>> {
    let mut segments = Vec::new();
    for part in pattern.split('/') {
        if part == "**" {
            if segments.last() != Some(&Segment::Globstar) {
                segments.push(Segment::Globstar);
            }
        } else {
            segments.push(Segment::Part(tokenize(part)?));
        }
    }

    // A trailing `**` needs at least one segment: `src/**` does not match `src`.
    if segments.len() > 1 && segments.last() == Some(&Segment::Globstar) {
        segments.insert(segments.len() - 1, Segment::Part(vec![Token::Star]));
    }
    Some(segments)
}

fn tokenize(segment: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            '*' => {
                if tokens.last() == Some(&Token::Star) {
                    continue;
                }
                Token::Star
            }
            '?' => Token::Any,
            '\\' => Token::Literal(chars.next()?),
            '[' => {
                let negated = matches!(chars.peek(), Some('!' | '^'));
                if negated {
                    chars.next();
                }
                let mut ranges = Vec::new();
                let mut first = true;
                loop {
                    let lo = chars.next()?;
                    if lo == ']' && !first {
                        break;
                    }
                    first = false;
                    let hi = if chars.peek() == Some(&'-') {
                        chars.next();
                        match chars.next()? {
                            ']' => {
                                ranges.push((lo, lo));
                                ranges.push(('-', '-'));
                                break;
                            }
                            hi => hi,
                        }
                    } else {
                        lo
                    };
                    ranges.push((lo, hi));
                }
                Token::Class { negated, ranges }
            }
            other => Token::Literal(other),
        };
        tokens.push(token);
    }
    Some(tokens)
}

fn segments_share(a: &Segment, b: &Segment) -> bool {
    match (a, b) {
        (Segment::Part(x), Segment::Part(y)) => sequences_overlap(x, y, Token::is_star, chars_share),
        _ => true,
    }
}

fn chars_share(a: &Token, b: &Token) -> bool {
    match (a, b) {
        (Token::Any, _) | (_, Token::Any) | (Token::Star, _) | (_, Token::Star) => true,
        (Token::Literal(x), Token::Literal(y)) => x == y,
        (Token::Literal(c), Token::Class { negated, ranges })
        | (Token::Class { negated, ranges }, Token::Literal(c)) => {
            in_ranges(*c, ranges) != *negated
        }
        (
            Token::Class {
                negated: false,
                ranges: x,
            },
            Token::Class {
                negated: false,
                ranges: y,
            },
        ) => x
            .iter()
            .any(|&(lo, hi)| y.iter().any(|&(lo2, hi2)| lo <= hi2 && lo2 <= hi)),
        // A negated class leaves almost every character open.
        _ => true,
    }
}

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi)
}

// ----------------------------------------------------------------------------
// Sequence intersection
// ----------------------------------------------------------------------------

/// Whether two sequences of single-step items and run items (matching zero
/// or more steps) can describe a common word.
fn sequences_overlap<T>(
    a: &[T],
    b: &[T],
    is_run: impl Fn(&T) -> bool,
    compatible: impl Fn(&T, &T) -> bool,
) -> bool {
    let width = b.len() + 1;
    let mut memo: Vec<Option<bool>> = vec![None; (a.len() + 1) * width];
    overlap_from(a, b, 0, 0, &is_run, &compatible, &mut memo, width)
}

#[allow(clippy::too_many_arguments)]
fn overlap_from<T>(
    a: &[T],
    b: &[T],
    i: usize,
    j: usize,
    is_run: &impl Fn(&T) -> bool,
    compatible: &impl Fn(&T, &T) -> bool,
    memo: &mut [Option<bool>],
    width: usize,
) -> bool {
    if let Some(known) = memo[i * width + j] {
        return known;
    }

    let result = if i == a.len() && j == b.len() {
        true
    } else if i < a.len() && is_run(&a[i]) {
        overlap_from(a, b, i + 1, j, is_run, compatible, memo, width)
            || (j < b.len() && overlap_from(a, b, i, j + 1, is_run, compatible, memo, width))
    } else if j < b.len() && is_run(&b[j]) {
        overlap_from(a, b, i, j + 1, is_run, compatible, memo, width)
            || (i < a.len() && overlap_from(a, b, i + 1, j, is_run, compatible, memo, width))
    } else if i == a.len() || j == b.len() {
        false
    } else {
        compatible(&a[i], &b[j]) && overlap_from(a, b, i + 1, j + 1, is_run, compatible, memo, width)
    };

    memo[i * width + j] = Some(result);
    result
}
