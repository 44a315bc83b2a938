//! Line grammar for neighborhood and homeowner records.
//!
//! ```text
//! N <id> <code>:<value> ...
//! H <id> <code>:<value> ... [<id>><id>>...]
//! ```
//!
//! Blank lines are ignored. Every configured attribute code must appear
//! exactly once per record, in any order.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;
use tracing::info;

use crate::model::attribute::{AttributeSet, Value};
use crate::model::entity::{Homeowner, Id, Neighborhood, Roster};

pub type LineNo = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Neighborhood,
    Homeowner,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Neighborhood => f.write_str("neighborhood"),
            RecordKind::Homeowner => f.write_str("homeowner"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: LineNo, reason: String },
    #[error("line {line}: duplicate {kind} id `{id}`")]
    DuplicateId { kind: RecordKind, id: Id, line: LineNo },
    #[error("line {line}: homeowner `{homeowner}` prefers unknown neighborhood `{neighborhood}`")]
    UnknownReference { line: LineNo, homeowner: Id, neighborhood: Id },
}

impl ParseError {
    fn malformed(line: LineNo, reason: impl Into<String>) -> ParseError {
        ParseError::MalformedRecord { line, reason: reason.into() }
    }
}

/// One syntactically valid line, before ids are cross-checked.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Neighborhood { id: Id, weights: Vec<Value> },
    Homeowner { id: Id, values: Vec<Value>, preferences: Vec<Id> },
}

/// Parses a single line. Returns `Ok(None)` for blank lines.
pub fn parse_record(line: LineNo, text: &str, attributes: &AttributeSet) -> Result<Option<Record>, ParseError> {
    let mut tokens = text.split_whitespace();
    let kind = match tokens.next() {
        None => return Ok(None),
        Some("N") => RecordKind::Neighborhood,
        Some("H") => RecordKind::Homeowner,
        Some(other) => return Err(ParseError::malformed(line, format!("unknown record marker `{}`", other))),
    };
    let id = tokens.next()
        .ok_or_else(|| ParseError::malformed(line, format!("{} record has no id", kind)))?;
    if id.contains(':') || id.contains('>') {
        return Err(ParseError::malformed(line, format!("invalid id `{}`", id)));
    }

    let rest: Vec<&str> = tokens.collect();
    let (attribute_tokens, preference_token) = match kind {
        RecordKind::Neighborhood => (&rest[..], None),
        RecordKind::Homeowner => match rest.split_last() {
            Some((last, init)) if !last.contains(':') => (init, Some(*last)),
            _ => (&rest[..], None),
        },
    };
    let values = parse_attributes(line, attribute_tokens, attributes)?;

    let record = match kind {
        RecordKind::Neighborhood => Record::Neighborhood { id: id.to_string(), weights: values },
        RecordKind::Homeowner => {
            let preferences = match preference_token {
                Some(token) => parse_preferences(line, token)?,
                None => Vec::new(),
            };
            Record::Homeowner { id: id.to_string(), values, preferences }
        }
    };
    Ok(Some(record))
}

fn parse_attributes(line: LineNo, tokens: &[&str], attributes: &AttributeSet) -> Result<Vec<Value>, ParseError> {
    let mut values: Vec<Option<Value>> = vec![None; attributes.len()];
    for token in tokens {
        let (code, raw) = token.split_once(':')
            .ok_or_else(|| ParseError::malformed(line, format!("expected `code:value`, found `{}`", token)))?;
        let slot = attributes.position(code)
            .ok_or_else(|| ParseError::malformed(line, format!("unknown attribute code `{}` (expected {})", code, attributes)))?;
        let value = raw.parse::<Value>()
            .map_err(|_| ParseError::malformed(line, format!("attribute `{}` has non-integer value `{}`", code, raw)))?;
        if values[slot].replace(value).is_some() {
            return Err(ParseError::malformed(line, format!("attribute `{}` given twice", code)));
        }
    }
    values.into_iter()
        .zip(attributes.codes())
        .map(|(value, code)| value.ok_or_else(|| ParseError::malformed(line, format!("missing attribute `{}`", code))))
        .collect()
}

fn parse_preferences(line: LineNo, token: &str) -> Result<Vec<Id>, ParseError> {
    let mut seen = HashSet::new();
    token.split('>')
        .map(|id| {
            if id.is_empty() {
                Err(ParseError::malformed(line, format!("empty entry in preference list `{}`", token)))
            } else if !seen.insert(id) {
                Err(ParseError::malformed(line, format!("neighborhood `{}` listed twice in preferences", id)))
            } else {
                Ok(id.to_string())
            }
        })
        .collect()
}

/// Parses a whole input into a [`Roster`], keeping file order.
/// Preference ids are resolved after every line is read.
pub fn parse(text: &str, attributes: &AttributeSet) -> Result<Roster, ParseError> {
    let mut roster = Roster::default();
    let mut neighborhood_ids: HashMap<Id, usize> = HashMap::new();
    let mut homeowner_ids: HashSet<Id> = HashSet::new();
    let mut pending: Vec<(LineNo, Id, Vec<Value>, Vec<Id>)> = Vec::new();

    for (offset, raw) in text.lines().enumerate() {
        let line = offset + 1;
        match parse_record(line, raw, attributes)? {
            None => {}
            Some(Record::Neighborhood { id, weights }) => {
                if neighborhood_ids.contains_key(&id) {
                    return Err(ParseError::DuplicateId { kind: RecordKind::Neighborhood, id, line });
                }
                neighborhood_ids.insert(id.clone(), roster.neighborhoods.len());
                roster.neighborhoods.push(Neighborhood::new(id, weights));
            }
            Some(Record::Homeowner { id, values, preferences }) => {
                if !homeowner_ids.insert(id.clone()) {
                    return Err(ParseError::DuplicateId { kind: RecordKind::Homeowner, id, line });
                }
                pending.push((line, id, values, preferences));
            }
        }
    }

    for (line, id, values, preferences) in pending {
        let preferences = preferences.into_iter()
            .map(|neighborhood| match neighborhood_ids.get(&neighborhood) {
                Some(index) => Ok(*index),
                None => Err(ParseError::UnknownReference { line, homeowner: id.clone(), neighborhood }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        roster.homeowners.push(Homeowner::new(id, values, preferences));
    }

    info!(
        neighborhoods = roster.neighborhoods.len(),
        homeowners = roster.homeowners.len(),
        attributes = %attributes,
        "parsed input"
    );
    Ok(roster)
}
