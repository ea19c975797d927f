//! All errors related to parsing commit messages.

use std::fmt;

/// The header field being scanned when a syntax error was found.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Field {
    /// The commit type, before any `(`.
    Type,

    /// The commit scope, from `(` on.
    Scope,
}

impl Field {
    /// Access `str` representation of the field
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Scope => "scope",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All possible syntax errors in a commit header.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A character that is not allowed in the field being scanned.
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// The field it was found in.
        field: Field,
    },

    /// The field is not followed by exactly `": "`.
    MissingSeparator(Field),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::IllegalCharacter { character, field } => {
                write!(f, "illegal '{character}' character in {field}")
            }
            ErrorKind::MissingSeparator(field) => {
                write!(f, "commit {field} must be followed by a colon and a single space")
            }
        }
    }
}

/// A syntax error in a commit header, positioned at the offending character.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    kind: ErrorKind,
    line: usize,
    char: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, line: usize, char: usize) -> Self {
        Self { kind, line, char }
    }

    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The 1-based line the error was found on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The 0-based index of the offending character within its line.
    ///
    /// Counted in `char`s, not bytes.
    pub fn char(&self) -> usize {
        self.char
    }

    /// The human readable description, without position.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} col {}", self.kind, self.line, self.char)
    }
}

impl std::error::Error for ParseError {}

/// The error returned when parsing a commit message fails.
///
/// Syntax errors carry the position of the offending character; the remaining
/// variants describe a header that is well-formed but incomplete.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// The header does not follow `type(scope): description`.
    Syntax(ParseError),

    /// The header has no type, e.g. `": description"`.
    MissingType,

    /// The header has no description, e.g. `"type: "`.
    MissingDescription,
}

impl Error {
    /// The syntax error, if this error has a position.
    pub fn syntax(&self) -> Option<&ParseError> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::MissingType | Error::MissingDescription => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Syntax(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(err) => err.fmt(f),
            Error::MissingType => f.write_str("commit header must contain a type"),
            Error::MissingDescription => f.write_str("commit header must contain a description"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Syntax(err) => Some(err),
            Error::MissingType | Error::MissingDescription => None,
        }
    }
}

/// The error returned when a [`Config`][crate::Config] holds an invalid pattern.
#[derive(Clone, Debug)]
pub struct ConfigError {
    field: &'static str,
    pattern: String,
    source: regex::Error,
}

impl ConfigError {
    pub(crate) fn new(field: &'static str, pattern: impl Into<String>, source: regex::Error) -> Self {
        Self {
            field,
            pattern: pattern.into(),
            source,
        }
    }

    /// The configuration fields the pattern was taken or built from.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The pattern as it was supplied.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse {} /{}/: {}", self.field, self.pattern, self.source)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
