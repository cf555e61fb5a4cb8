//! Path pattern grammar.
//!
//! Patterns are literal text split on `/`, where any segment (or a token
//! inside a segment) of the form `:name` or `:name?` binds an argument. A
//! `:` that is not followed by an identifier start is kept as literal text,
//! so `10:30` or `https://host` parse without markers.

use std::collections::HashSet;

use crate::error::PathError;

const SIGIL: char = ':';
const OPTIONAL_MARK: char = '?';
const SEGMENT_SEPARATOR: char = '/';

/// One substitution point in a path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArgumentInfo {
    /// Argument name without sigil or optional mark.
    pub name: String,
    /// Position of the argument in its builder's argument list.
    pub index: usize,
    /// Whether the argument may be omitted.
    pub is_optional: bool,
    /// The marker text as written in the pattern, e.g. `:id?`.
    pub raw: String,
}

impl ArgumentInfo {
    pub(crate) fn new(name: impl Into<String>, index: usize, is_optional: bool) -> Self {
        let name = name.into();
        let raw = if is_optional {
            format!("{SIGIL}{name}{OPTIONAL_MARK}")
        } else {
            format!("{SIGIL}{name}")
        };
        Self {
            name,
            index,
            is_optional,
            raw,
        }
    }
}

/// A piece of one path segment: literal text or a reference into the
/// argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece {
    Literal(String),
    Arg(usize),
}

/// Result of parsing a pattern: non-empty segments plus the argument list
/// their [`Piece::Arg`] entries index into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPattern {
    pub segments: Vec<Vec<Piece>>,
    pub args: Vec<ArgumentInfo>,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parses a pattern like `user/:id?/profile` in a single left-to-right pass.
///
/// Empty segments (leading, trailing or doubled separators) are dropped;
/// boundary separators are a rendering concern handled by
/// [`CombineOptions`](super::CombineOptions).
///
/// ## Errors
///
/// Returns [`PathError::DuplicateArgument`] if a name occurs twice.
pub(crate) fn parse_pattern(pattern: &str) -> Result<ParsedPattern, PathError> {
    let mut segments = Vec::new();
    let mut args: Vec<ArgumentInfo> = Vec::new();
    let mut seen = HashSet::new();

    for raw_segment in pattern.split(SEGMENT_SEPARATOR) {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = raw_segment.chars().peekable();

        while let Some(c) = chars.next() {
            let opens_marker = c == SIGIL && chars.peek().is_some_and(|n| is_ident_start(*n));
            if !opens_marker {
                literal.push(c);
                continue;
            }

            let mut name = String::new();
            while let Some(&n) = chars.peek() {
                if !is_ident_char(n) {
                    break;
                }
                name.push(n);
                chars.next();
            }
            let is_optional = chars.next_if_eq(&OPTIONAL_MARK).is_some();

            if !seen.insert(name.clone()) {
                return Err(PathError::duplicate(name));
            }
            if !literal.is_empty() {
                pieces.push(Piece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(Piece::Arg(args.len()));
            args.push(ArgumentInfo::new(name, args.len(), is_optional));
        }

        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }
        if !pieces.is_empty() {
            segments.push(pieces);
        }
    }

    Ok(ParsedPattern { segments, args })
}
