//! Scanner for the first line of a commit message.
//!
//! ```text
//! <header>      ::= <type>, ["(", <scope>, ")"], ":", " ", <description>
//! <type>        ::= <any char except " " or "(" or ")" or ":">*
//! <scope>       ::= <any char except " " or "(" or ")" or ":">*
//! <description> ::= <any char>*
//! ```
//!
//! Positions are counted in `char`s from the start of the line.

use crate::error::{ErrorKind, Field, ParseError};
use crate::Commit;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum State {
    Type,
    Scope,
    /// The scope was closed, only `:` may follow.
    PostScope,
    Description,
}

impl State {
    /// The field named by errors raised in this state.
    fn field(self) -> Field {
        match self {
            State::Type | State::Description => Field::Type,
            State::Scope | State::PostScope => Field::Scope,
        }
    }
}

/// Split `line` into type, scope and description.
///
/// An empty type or description is not a syntax error here.
pub(crate) fn header(line: &str, line_number: usize) -> Result<Commit, ParseError> {
    let mut commit = Commit::default();
    let mut state = State::Type;
    // Byte offset where the text of the current field starts.
    let mut start = 0;

    for (col, (offset, c)) in line.char_indices().enumerate() {
        let field = state.field();
        let illegal = |character| {
            ParseError::new(
                ErrorKind::IllegalCharacter { character, field },
                line_number,
                col,
            )
        };

        match (state, c) {
            (State::Description, _) => break,
            (State::Type, '(') => {
                if offset == start {
                    return Err(illegal(c));
                }
                commit.ty = line[start..offset].to_owned();
                start = offset + 1;
                state = State::Scope;
            }
            (State::Scope | State::PostScope, '(') => return Err(illegal(c)),
            (State::Type, ')') => return Err(illegal(c)),
            (State::Scope, ')') => {
                commit.scope = line[start..offset].to_owned();
                state = State::PostScope;
            }
            (State::Type | State::Scope | State::PostScope, ':') => {
                let missing = |col| {
                    ParseError::new(ErrorKind::MissingSeparator(field), line_number, col)
                };
                if let Some(col) = separator_error(&line[offset + 1..], col) {
                    return Err(missing(col));
                }
                // The scope was never closed.
                if state == State::Scope {
                    return Err(missing(col));
                }
                if state == State::Type {
                    commit.ty = line[start..offset].to_owned();
                }
                // ": " is the separator, the description starts after it.
                start = offset + 2;
                state = State::Description;
            }
            (_, ' ') => return Err(illegal(c)),
            (State::PostScope, _) => {
                return Err(ParseError::new(
                    ErrorKind::MissingSeparator(Field::Scope),
                    line_number,
                    col,
                ));
            }
            (State::Type | State::Scope, _) => {}
        }
    }

    if state != State::Description {
        let last = line.chars().count().saturating_sub(1);
        return Err(ParseError::new(
            ErrorKind::MissingSeparator(state.field()),
            line_number,
            last,
        ));
    }

    commit.description = line[start..].trim().to_owned();
    Ok(commit)
}

/// Check that the text after a header colon starts with exactly one space.
///
/// Returns the column of the offending character, `colon` being the column
/// of the colon itself.
fn separator_error(rest: &str, colon: usize) -> Option<usize> {
    let mut rest = rest.chars();
    match (rest.next(), rest.next()) {
        (None, _) => Some(colon),
        (Some(c), _) if c != ' ' => Some(colon + 1),
        (Some(_), Some(' ')) => Some(colon + 2),
        (Some(_), _) => None,
    }
}
