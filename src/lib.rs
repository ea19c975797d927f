//! A parser library for [Conventional Commit] messages.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! The header line is checked character by character, and a malformed header
//! is reported with the exact line and column of the offending character.
//!
//! # Example
//!
//! ```rust
//! use convcom::{Config, Parser, Type};
//! use indoc::indoc;
//!
//! let parser = Parser::new(Config::default()).unwrap();
//!
//! let message = indoc!("
//!     docs(example): add tested usage example
//!
//!     This example is tested using Rust's doctest capabilities. Having this
//!     example helps people understand how to use the parser.
//!
//!     BREAKING CHANGE: Going from nothing to something, meaning anyone doing
//!     nothing before suddenly has something to do. That sounds like a change
//!     in your break.
//!
//!     Co-Authored-By: Lisa Simpson <lisa@simpsons.fam>
//!     Closes #12
//! ");
//!
//! let commit = parser.parse(message).unwrap();
//!
//! // You can access all components of the header.
//! assert_eq!(commit.type_(), Type::DOCS);
//! assert_eq!(commit.scope().unwrap(), "example");
//! assert_eq!(commit.description(), "add tested usage example");
//!
//! // And the free-form commit body.
//! assert!(commit.body().unwrap().contains("helps people understand"));
//!
//! // A "BREAKING CHANGE" footer marks the commit as breaking, and is kept
//! // as a note.
//! assert!(commit.breaking());
//! assert_eq!(commit.notes()[0].title(), "BREAKING CHANGE");
//!
//! // Footers provide access to their token and value.
//! assert_eq!(commit.footers()[1].token(), "Co-Authored-By");
//! assert_eq!(commit.footers()[1].value(), "Lisa Simpson <lisa@simpsons.fam>");
//!
//! // Issue references are collected from the whole message.
//! assert_eq!(commit.references()[0].issue(), "12");
//!
//! // Malformed headers point at the offending character.
//! let err = parser.parse("docs(example) add usage").unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "illegal ' ' character in scope:1 col 13"
//! );
//! ```

#![warn(missing_docs)]

mod commit;
mod config;
mod error;
mod parser;

pub use commit::{Commit, Footer, FooterSeparator, FooterToken, Note, Reference, Scope, Type};
pub use config::{
    Config, ErrorCallback, DEFAULT_FIELD_PATTERN, DEFAULT_ISSUE_PREFIXES, DEFAULT_NOTE_KEYWORDS,
    DEFAULT_REFERENCE_ACTIONS, DEFAULT_REVERT_GROUPS, DEFAULT_REVERT_PATTERN,
};
pub use error::{ConfigError, Error, ErrorKind, Field, ParseError};
pub use parser::Parser;
