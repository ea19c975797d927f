//! Options controlling how commit messages are parsed.

use std::fmt;
use std::sync::Arc;

use crate::Error;

/// Keywords referencing an issue, matched case insensitively.
pub const DEFAULT_REFERENCE_ACTIONS: &[&str] = &[
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];
/// Prefixes that start an issue.
pub const DEFAULT_ISSUE_PREFIXES: &[&str] = &["#"];
/// Keywords marking important notes, matched case insensitively.
pub const DEFAULT_NOTE_KEYWORDS: &[&str] = &["BREAKING CHANGE"];
/// Matches a line starting an extra field, capturing its name.
pub const DEFAULT_FIELD_PATTERN: &str = r"^-(.*?)-$";
/// Matches what a commit reverts.
pub const DEFAULT_REVERT_PATTERN: &str = r#"^Revert\s"([\s\S]*)"\s*This reverts commit (\w*)\."#;
/// Names of the capture groups of [`DEFAULT_REVERT_PATTERN`].
pub const DEFAULT_REVERT_GROUPS: &[&str] = &["header", "hash"];

/// Configuration for a [`Parser`][crate::Parser].
///
/// Every field is optional; unset fields fall back to the documented
/// defaults when the parser is built. An empty list is not unset: it
/// disables the feature the list drives.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Matches a merge header preceding the conventional header.
    ///
    /// Default: none, merge headers are not detected.
    pub merge_pattern: Option<String>,

    /// Names of the capturing groups of `merge_pattern`, in order.
    pub merge_groups: Vec<String>,

    /// Keywords used to reference an issue.
    ///
    /// Default: [`DEFAULT_REFERENCE_ACTIONS`]
    pub reference_actions: Option<Vec<String>>,

    /// Prefixes that start an issue. Eg. In `gh-123`, `gh-` is the prefix.
    ///
    /// Default: [`DEFAULT_ISSUE_PREFIXES`]
    pub issue_prefixes: Option<Vec<String>>,

    /// Whether `issue_prefixes` are case sensitive.
    pub issue_prefixes_case_sensitive: bool,

    /// Keywords that mark important notes.
    ///
    /// Default: [`DEFAULT_NOTE_KEYWORDS`]
    pub note_keywords: Option<Vec<String>>,

    /// Matches a line starting an extra field.
    ///
    /// Default: [`DEFAULT_FIELD_PATTERN`]
    pub field_pattern: Option<String>,

    /// Matches what a commit reverts.
    ///
    /// Default: [`DEFAULT_REVERT_PATTERN`]
    pub revert_pattern: Option<String>,

    /// Names of the capturing groups of `revert_pattern`, in order.
    ///
    /// Default: [`DEFAULT_REVERT_GROUPS`]
    pub revert_groups: Option<Vec<String>>,

    /// Lines starting with this character are dropped. If unset no comments
    /// are stripped.
    pub comment_character: Option<char>,

    /// Called by [`Parser::parse_many`][crate::Parser::parse_many] when a
    /// message cannot be parsed.
    #[cfg_attr(feature = "serde", serde(skip))]
    #[cfg_attr(feature = "schemars", schemars(skip))]
    pub error_callback: Option<ErrorCallback>,
}

impl Config {
    /// Creates a config where every option uses its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detects merge headers matching `pattern`, naming its groups `groups`.
    pub fn with_merge_pattern<S: Into<String>>(
        mut self,
        pattern: impl Into<String>,
        groups: impl IntoIterator<Item = S>,
    ) -> Self {
        self.merge_pattern = Some(pattern.into());
        self.merge_groups = groups.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the keywords used to reference an issue.
    pub fn with_reference_actions<S: Into<String>>(
        mut self,
        actions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.reference_actions = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the prefixes that start an issue.
    pub fn with_issue_prefixes<S: Into<String>>(
        mut self,
        prefixes: impl IntoIterator<Item = S>,
        case_sensitive: bool,
    ) -> Self {
        self.issue_prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self.issue_prefixes_case_sensitive = case_sensitive;
        self
    }

    /// Sets the keywords that mark important notes.
    pub fn with_note_keywords<S: Into<String>>(
        mut self,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        self.note_keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the pattern of a line starting an extra field.
    pub fn with_field_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.field_pattern = Some(pattern.into());
        self
    }

    /// Sets the revert pattern and the names of its groups.
    pub fn with_revert_pattern<S: Into<String>>(
        mut self,
        pattern: impl Into<String>,
        groups: impl IntoIterator<Item = S>,
    ) -> Self {
        self.revert_pattern = Some(pattern.into());
        self.revert_groups = Some(groups.into_iter().map(Into::into).collect());
        self
    }

    /// Drops lines starting with `comment`.
    pub fn with_comment_character(mut self, comment: char) -> Self {
        self.comment_character = Some(comment);
        self
    }

    /// Sets the callback consulted when a message cannot be parsed.
    pub fn with_error_callback(
        mut self,
        callback: impl Fn(&Error) -> Result<(), Error> + Send + Sync + 'static,
    ) -> Self {
        self.error_callback = Some(ErrorCallback::new(callback));
        self
    }

    /// Fills every unset option with its default.
    ///
    /// Defaults are copied, never shared between configs.
    pub(crate) fn resolve(mut self) -> Self {
        fn owned(defaults: &[&str]) -> Option<Vec<String>> {
            Some(defaults.iter().map(|s| (*s).to_owned()).collect())
        }

        self.merge_pattern = self.merge_pattern.filter(|p| !p.is_empty());
        self.reference_actions = self
            .reference_actions
            .or_else(|| owned(DEFAULT_REFERENCE_ACTIONS));
        self.issue_prefixes = self.issue_prefixes.or_else(|| owned(DEFAULT_ISSUE_PREFIXES));
        self.note_keywords = self.note_keywords.or_else(|| owned(DEFAULT_NOTE_KEYWORDS));
        self.field_pattern = self
            .field_pattern
            .filter(|p| !p.is_empty())
            .or_else(|| Some(DEFAULT_FIELD_PATTERN.to_owned()));
        self.revert_pattern = self
            .revert_pattern
            .filter(|p| !p.is_empty())
            .or_else(|| Some(DEFAULT_REVERT_PATTERN.to_owned()));
        self.revert_groups = self.revert_groups.or_else(|| owned(DEFAULT_REVERT_GROUPS));
        self
    }
}

/// A hook deciding what happens to a message that fails to parse.
///
/// Returning `Ok(())` skips the message, returning an error aborts.
#[derive(Clone)]
pub struct ErrorCallback(Arc<dyn Fn(&Error) -> Result<(), Error> + Send + Sync>);

impl ErrorCallback {
    /// Wraps `callback`.
    pub fn new(callback: impl Fn(&Error) -> Result<(), Error> + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub(crate) fn call(&self, err: &Error) -> Result<(), Error> {
        (self.0)(err)
    }
}

impl fmt::Debug for ErrorCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCallback").finish_non_exhaustive()
    }
}
