//! The parsed commit and its components.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;

pub(crate) const BREAKING_PHRASE: &str = "BREAKING CHANGE";
pub(crate) const BREAKING_ARROW: &str = "BREAKING-CHANGE";

/// A parsed commit message.
///
/// [`Parser::parse_header`][crate::Parser::parse_header] only fills the
/// type, scope and description; every other field stays empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Commit {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub(crate) ty: String,
    pub(crate) scope: String,
    pub(crate) description: String,
    pub(crate) header: String,
    pub(crate) merge_header: Option<String>,
    pub(crate) body: Option<String>,
    pub(crate) footers: Vec<Footer>,
    pub(crate) mentions: Vec<String>,
    pub(crate) references: Vec<Reference>,
    pub(crate) notes: Vec<Note>,
    pub(crate) reverts: BTreeMap<String, String>,
    pub(crate) fields: BTreeMap<String, String>,
    pub(crate) breaking: bool,
}

impl Commit {
    /// The type of the commit.
    pub fn type_(&self) -> Type<'_> {
        Type::new_unchecked(&self.ty)
    }

    /// The optional scope of the commit.
    pub fn scope(&self) -> Option<Scope<'_>> {
        (!self.scope.is_empty()).then(|| Scope::new_unchecked(&self.scope))
    }

    /// The commit description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The full header line.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The merge line preceding the header, if any.
    pub fn merge_header(&self) -> Option<&str> {
        self.merge_header.as_deref()
    }

    /// The commit body, containing a more detailed explanation of the commit
    /// changes.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Any footer.
    ///
    /// A footer is similar to a Git trailer, with the exception of not
    /// requiring whitespace before newlines.
    ///
    /// See: <https://git-scm.com/docs/git-interpret-trailers>
    pub fn footers(&self) -> &[Footer] {
        &self.footers
    }

    /// People or groups mentioned with `@name`.
    pub fn mentions(&self) -> &[String] {
        &self.mentions
    }

    /// Issues referenced by the commit.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Footers whose token is a note keyword.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// What this commit reverts, keyed by the configured revert groups.
    ///
    /// Empty when the commit is not a revert.
    pub fn reverts(&self) -> &BTreeMap<String, String> {
        &self.reverts
    }

    /// Extra fields and merge header groups, keyed by name.
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// A flag to signal that the commit contains breaking changes.
    ///
    /// This flag is set either when the type ends with an exclamation mark:
    /// ```text
    /// feat(scope)!: this is a breaking change
    /// ```
    ///
    /// Or when the `BREAKING CHANGE: ` footer is defined:
    /// ```text
    /// feat: my commit description
    ///
    /// BREAKING CHANGE: this is a breaking change
    /// ```
    pub fn breaking(&self) -> bool {
        self.breaking
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_().as_str())?;

        if let Some(scope) = &self.scope() {
            write!(f, "({scope})")?;
        }

        write!(f, ": {}", self.description())?;

        if let Some(body) = &self.body() {
            write!(f, "\n\n{body}")?;
        }

        for t in self.footers() {
            write!(f, "\n\n{t}")?;
        }

        Ok(())
    }
}

/// A single footer.
///
/// See: <https://git-scm.com/docs/git-interpret-trailers>
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Footer {
    token: String,
    sep: FooterSeparator,
    value: String,
}

impl Footer {
    /// Piece together a footer.
    pub fn new(token: impl Into<String>, sep: FooterSeparator, value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            sep,
            value: value.into(),
        }
    }

    /// The token of the footer.
    pub fn token(&self) -> FooterToken<'_> {
        FooterToken::new_unchecked(&self.token)
    }

    /// The separator between the footer token and its value.
    pub fn separator(&self) -> FooterSeparator {
        self.sep
    }

    /// The value of the footer.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// A flag to signal that the footer describes a breaking change.
    pub fn breaking(&self) -> bool {
        self.token().breaking()
    }
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sep {
            FooterSeparator::Value => write!(f, "{}: {}", self.token, self.value),
            FooterSeparator::Ref => write!(f, "{} #{}", self.token, self.value),
        }
    }
}

/// The type of separator between the footer token and value.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum FooterSeparator {
    /// ":"
    Value,

    /// " #"
    Ref,
}

impl FooterSeparator {
    /// Access `str` representation of FooterSeparator
    pub fn as_str(self) -> &'static str {
        match self {
            FooterSeparator::Value => ":",
            FooterSeparator::Ref => " #",
        }
    }

    pub(crate) fn from_str_unchecked(sep: &str) -> Self {
        if sep == ":" {
            FooterSeparator::Value
        } else {
            FooterSeparator::Ref
        }
    }
}

impl Deref for FooterSeparator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl PartialEq<&'_ str> for FooterSeparator {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for FooterSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// An important note, taken from a footer whose token is a note keyword.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Note {
    pub(crate) title: String,
    pub(crate) text: String,
}

impl Note {
    /// The note keyword, as written in the message.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The text of the note.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A reference to an issue, e.g. `Closes owner/repo#12`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    pub(crate) action: Option<String>,
    pub(crate) repository: Option<String>,
    pub(crate) prefix: String,
    pub(crate) issue: String,
    pub(crate) raw: String,
}

impl Reference {
    /// The reference action, e.g. `Closes`.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// The `owner/repo` the issue lives in, when not the current one.
    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    /// The issue prefix, e.g. `#`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The issue identifier, without prefix.
    pub fn issue(&self) -> &str {
        &self.issue
    }

    /// The matched text.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

macro_rules! unicase_components {
    ($($ty:ident),+) => (
        $(
            /// A component of the conventional commit.
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $ty<'a>(unicase::UniCase<&'a str>);

            impl<'a> $ty<'a> {
                /// Wrap a `str` without checking it against the header grammar.
                pub const fn new_unchecked(value: &'a str) -> Self {
                    $ty(unicase::UniCase::unicode(value))
                }

                /// Access `str` representation
                pub fn as_str(&self) -> &'a str {
                    self.0.into_inner()
                }
            }

            impl Deref for $ty<'_> {
                type Target = str;

                fn deref(&self) -> &Self::Target {
                    self.as_str()
                }
            }

            impl PartialEq<&'_ str> for $ty<'_> {
                fn eq(&self, other: &&str) -> bool {
                    *self == $ty::new_unchecked(*other)
                }
            }

            impl fmt::Display for $ty<'_> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    self.0.fmt(f)
                }
            }

            #[cfg(feature = "serde")]
            impl serde::Serialize for $ty<'_> {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    serializer.serialize_str(self)
                }
            }
        )+
    )
}

unicase_components![Type, Scope, FooterToken];

/// Common commit types
impl Type<'static> {
    /// Commit type when introducing new features (correlates with `minor` in semver)
    pub const FEAT: Type<'static> = Type::new_unchecked("feat");
    /// Commit type when patching a bug (correlates with `patch` in semver)
    pub const FIX: Type<'static> = Type::new_unchecked("fix");
    /// Possible commit type when reverting changes.
    pub const REVERT: Type<'static> = Type::new_unchecked("revert");
    /// Possible commit type for changing documentation.
    pub const DOCS: Type<'static> = Type::new_unchecked("docs");
    /// Possible commit type for changing code style.
    pub const STYLE: Type<'static> = Type::new_unchecked("style");
    /// Possible commit type for refactoring code structure.
    pub const REFACTOR: Type<'static> = Type::new_unchecked("refactor");
    /// Possible commit type for performance optimizations.
    pub const PERF: Type<'static> = Type::new_unchecked("perf");
    /// Possible commit type for addressing tests.
    pub const TEST: Type<'static> = Type::new_unchecked("test");
    /// Possible commit type for other things.
    pub const CHORE: Type<'static> = Type::new_unchecked("chore");
}

impl Type<'_> {
    /// A flag to signal that the type carries the `!` breaking marker.
    pub fn breaking(&self) -> bool {
        self.as_str().ends_with('!')
    }
}

impl FooterToken<'_> {
    /// A flag to signal that the footer describes a breaking change.
    pub fn breaking(&self) -> bool {
        self == &BREAKING_PHRASE || self == &BREAKING_ARROW
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(feature = "serde")]
    use serde_test::Token;

    fn header(ty: &str, scope: &str, description: &str) -> Commit {
        Commit {
            ty: ty.to_owned(),
            scope: scope.to_owned(),
            description: description.to_owned(),
            ..Commit::default()
        }
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let commit = header("Feat", "", "hello world");

        assert_eq!(Type::FEAT, commit.type_());
        assert_eq!(commit.type_(), "FEAT");
        assert_eq!(commit.type_().as_str(), "Feat");
    }

    #[test]
    fn test_empty_scope_is_absent() {
        assert_eq!(header("fix", "", "x").scope(), None);
        assert_eq!(header("fix", "Parser", "x").scope().unwrap(), "parser");
    }

    #[test]
    fn test_breaking_markers() {
        assert!(Type::new_unchecked("feat!").breaking());
        assert!(!Type::FEAT.breaking());
        assert!(FooterToken::new_unchecked("breaking change").breaking());
        assert!(FooterToken::new_unchecked("BREAKING-CHANGE").breaking());
        assert!(!FooterToken::new_unchecked("Refs").breaking());
    }

    #[test]
    fn test_display() {
        let mut commit = header("fix", "foo", "fixed the foos");
        assert_eq!(commit.to_string(), "fix(foo): fixed the foos");

        commit.body = Some("More words.".to_owned());
        commit.footers = vec![
            Footer::new("Refs", FooterSeparator::Value, "a1b2c3"),
            Footer::new("Closes", FooterSeparator::Ref, "12"),
        ];
        assert_eq!(
            commit.to_string(),
            "fix(foo): fixed the foos\n\nMore words.\n\nRefs: a1b2c3\n\nCloses #12"
        );
    }

    #[test]
    fn test_footer_separator() {
        assert_eq!(FooterSeparator::from_str_unchecked(":"), FooterSeparator::Value);
        assert_eq!(FooterSeparator::from_str_unchecked(" #"), FooterSeparator::Ref);
        assert_eq!(FooterSeparator::Ref, " #");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_commit_serialize() {
        let commit = header("type", "my scope", "hello world");
        serde_test::assert_ser_tokens(
            &commit,
            &[
                Token::Struct {
                    name: "Commit",
                    len: 13,
                },
                Token::Str("type"),
                Token::Str("type"),
                Token::Str("scope"),
                Token::Str("my scope"),
                Token::Str("description"),
                Token::Str("hello world"),
                Token::Str("header"),
                Token::Str(""),
                Token::Str("merge_header"),
                Token::None,
                Token::Str("body"),
                Token::None,
                Token::Str("footers"),
                Token::Seq { len: Some(0) },
                Token::SeqEnd,
                Token::Str("mentions"),
                Token::Seq { len: Some(0) },
                Token::SeqEnd,
                Token::Str("references"),
                Token::Seq { len: Some(0) },
                Token::SeqEnd,
                Token::Str("notes"),
                Token::Seq { len: Some(0) },
                Token::SeqEnd,
                Token::Str("reverts"),
                Token::Map { len: Some(0) },
                Token::MapEnd,
                Token::Str("fields"),
                Token::Map { len: Some(0) },
                Token::MapEnd,
                Token::Str("breaking"),
                Token::Bool(false),
                Token::StructEnd,
            ],
        );
    }
}
