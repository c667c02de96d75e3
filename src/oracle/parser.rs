// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-string parser.
//!
//! ```text
//! query   := clause*
//! clause  := presence? (field ':')? term modifier*
//! presence:= '+' | '-'
//! modifier:= '~' digits | '^' number
//! ```
//!
//! Clauses are separated by whitespace or hyphens; a hyphen opening a clause
//! is the prohibited marker instead. Terms are lower-cased. A term containing
//! `*` skips the pipeline. Double quotes only group, but must balance. `\`
//! escapes the next character.

use crate::error::QueryParseError;
use crate::types::Field;

use super::{Clause, Presence, Query, Wildcard};

#[derive(Debug, Clone, PartialEq)]
enum LexemeKind {
    Term(String),
    Field(String),
    Presence(Presence),
    EditDistance(String),
    Boost(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Lexeme {
    kind: LexemeKind,
    /// Character offset where the lexeme starts.
    start: usize,
}

#[inline]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '"'
}

#[inline]
fn ends_modifier(c: char) -> bool {
    is_separator(c) || c == '~' || c == '^'
}

/// Offset of the first quote left without a partner.
fn unbalanced_quote(chars: &[char]) -> Option<usize> {
    let mut open = None;
    let mut escaped = false;
    for (i, &c) in chars.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => open = if open.is_some() { None } else { Some(i) },
            _ => {}
        }
    }
    open
}

fn lex(chars: &[char]) -> Vec<Lexeme> {
    let mut lexemes = Vec::new();
    let mut buf = String::new();
    let mut buf_start = 0;
    let mut i = 0;

    let flush = |buf: &mut String, start: usize, lexemes: &mut Vec<Lexeme>| {
        if !buf.is_empty() {
            lexemes.push(Lexeme {
                kind: LexemeKind::Term(std::mem::take(buf)),
                start,
            });
        }
    };

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                if buf.is_empty() {
                    buf_start = i;
                }
                if let Some(&next) = chars.get(i + 1) {
                    buf.push(next);
                }
                i += 2;
                continue;
            }
            ':' if !buf.is_empty() => {
                lexemes.push(Lexeme {
                    kind: LexemeKind::Field(std::mem::take(&mut buf)),
                    start: buf_start,
                });
            }
            '~' | '^' => {
                flush(&mut buf, buf_start, &mut lexemes);
                let start = i;
                let mut value = String::new();
                i += 1;
                while i < chars.len() && !ends_modifier(chars[i]) {
                    value.push(chars[i]);
                    i += 1;
                }
                let kind = if c == '~' {
                    LexemeKind::EditDistance(value)
                } else {
                    LexemeKind::Boost(value)
                };
                lexemes.push(Lexeme { kind, start });
                continue;
            }
            '+' if buf.is_empty() => lexemes.push(Lexeme {
                kind: LexemeKind::Presence(Presence::Required),
                start: i,
            }),
            '-' if buf.is_empty() => lexemes.push(Lexeme {
                kind: LexemeKind::Presence(Presence::Prohibited),
                start: i,
            }),
            c if is_separator(c) => flush(&mut buf, buf_start, &mut lexemes),
            c => {
                if buf.is_empty() {
                    buf_start = i;
                }
                buf.push(c);
            }
        }
        i += 1;
    }
    flush(&mut buf, buf_start, &mut lexemes);
    lexemes
}

/// What has been read of the clause under construction.
#[derive(Default)]
struct Pending {
    presence: Option<(Presence, usize)>,
    field: Option<(Field, usize)>,
}

impl Pending {
    fn position(&self) -> Option<usize> {
        match (self.presence, self.field) {
            (_, Some((_, at))) => Some(at),
            (Some((_, at)), None) => Some(at),
            (None, None) => None,
        }
    }
}

/// Parse a query string into clauses.
///
/// An empty or all-separator string parses to an empty query.
pub fn parse_query(input: &str) -> Result<Query, QueryParseError> {
    let chars: Vec<char> = input.chars().collect();
    if let Some(position) = unbalanced_quote(&chars) {
        return Err(QueryParseError::UnbalancedQuote { position });
    }

    let mut clauses: Vec<Clause> = Vec::new();
    let mut pending = Pending::default();
    // Modifiers attach to the clause that was just completed.
    let mut modifiable = false;

    for lexeme in lex(&chars) {
        match lexeme.kind {
            LexemeKind::Presence(presence) => {
                if let Some(at) = pending.position() {
                    return Err(QueryParseError::ExpectingTerm { position: at });
                }
                pending.presence = Some((presence, lexeme.start));
                modifiable = false;
            }
            LexemeKind::Field(name) => {
                if pending.field.is_some() {
                    return Err(QueryParseError::ExpectingTerm {
                        position: lexeme.start,
                    });
                }
                let field = Field::from_name(&name.to_lowercase()).ok_or(
                    QueryParseError::UnrecognisedField {
                        field: name,
                        position: lexeme.start,
                    },
                )?;
                pending.field = Some((field, lexeme.start));
                modifiable = false;
            }
            LexemeKind::Term(raw) => {
                let term = raw.to_lowercase();
                let mut clause = Clause::new(term);
                if clause.has_wildcard() {
                    clause.wildcard = Wildcard::from_flags(
                        clause.term.starts_with('*'),
                        clause.term.ends_with('*'),
                    );
                    clause.use_pipeline = false;
                }
                if let Some((presence, _)) = pending.presence {
                    clause.presence = presence;
                }
                if let Some((field, _)) = pending.field {
                    clause.fields = vec![field];
                }
                clauses.push(clause);
                pending = Pending::default();
                modifiable = true;
            }
            LexemeKind::EditDistance(value) => {
                let clause = match clauses.last_mut() {
                    Some(clause) if modifiable => clause,
                    _ => {
                        return Err(QueryParseError::ExpectingTerm {
                            position: lexeme.start,
                        })
                    }
                };
                clause.edit_distance = value
                    .parse::<usize>()
                    .map_err(|_| QueryParseError::InvalidEditDistance { value })?;
            }
            LexemeKind::Boost(value) => {
                let clause = match clauses.last_mut() {
                    Some(clause) if modifiable => clause,
                    _ => {
                        return Err(QueryParseError::ExpectingTerm {
                            position: lexeme.start,
                        })
                    }
                };
                clause.boost = value
                    .parse::<f64>()
                    .ok()
                    .filter(|b| b.is_finite() && *b >= 0.0)
                    .ok_or(QueryParseError::InvalidBoost { value })?;
            }
        }
    }

    if let Some(position) = pending.position() {
        return Err(QueryParseError::ExpectingTerm { position });
    }
    Ok(Query::new(clauses))
}
