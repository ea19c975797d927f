//! Turning commit messages into [`Commit`]s.

mod extract;
mod header;
mod sections;

use std::collections::BTreeMap;

use log::{debug, trace};
use regex::Regex;
use unicase::UniCase;

use crate::commit::{Footer, FooterSeparator, Note};
use crate::config::Config;
use crate::error::{ConfigError, Error, ParseError};
use crate::Commit;

use self::sections::Sections;

/// A reusable commit message parser.
///
/// Built once from a [`Config`], then shared freely: parsing never mutates
/// the parser.
#[derive(Clone, Debug)]
pub struct Parser {
    config: Config,
    merge: Option<Regex>,
    field: Regex,
    revert: Regex,
    references: Option<Regex>,
}

impl Parser {
    /// Build a parser, filling unset options with their defaults.
    ///
    /// # Errors
    ///
    /// Fails if any pattern in `config` is not a valid regular expression.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        fn compile(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
            Regex::new(pattern).map_err(|err| ConfigError::new(field, pattern, err))
        }

        let config = config.resolve();

        let merge = config
            .merge_pattern
            .as_deref()
            .map(|pattern| compile("merge_pattern", pattern))
            .transpose()?;
        let field = compile(
            "field_pattern",
            config.field_pattern.as_deref().unwrap_or_default(),
        )?;
        let revert = compile(
            "revert_pattern",
            config.revert_pattern.as_deref().unwrap_or_default(),
        )?;
        let references = extract::reference_pattern(
            config.reference_actions.as_deref().unwrap_or_default(),
            config.issue_prefixes.as_deref().unwrap_or_default(),
            config.issue_prefixes_case_sensitive,
        )
        .map(|pattern| compile("reference_actions, issue_prefixes", &pattern))
        .transpose()?;

        debug!(
            "commit parser ready (merge headers: {}, references: {}, comments: {:?})",
            merge.is_some(),
            references.is_some(),
            config.comment_character,
        );

        Ok(Self {
            config,
            merge,
            field,
            revert,
            references,
        })
    }

    /// The configuration, with defaults filled in.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a complete commit message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] when the header is malformed, and
    /// [`Error::MissingType`] or [`Error::MissingDescription`] when it is
    /// well-formed but incomplete.
    pub fn parse(&self, message: &str) -> Result<Commit, Error> {
        let mut lines = message
            .split('\n')
            .enumerate()
            .map(|(i, line)| (i + 1, line))
            .filter(|(_, line)| !self.is_comment(line));

        let (mut line_number, mut header) = lines.next().unwrap_or((1, ""));

        let mut merge_header = None;
        let mut fields = BTreeMap::new();
        if let Some(caps) = self.merge.as_ref().and_then(|merge| merge.captures(header)) {
            trace!("merge header on line {line_number}");
            merge_header = Some(header.to_owned());
            fields = extract::named_groups(&caps, &self.config.merge_groups);
            (line_number, header) = lines.next().unwrap_or((line_number + 1, ""));
        }

        let mut commit = self.parse_header(header, line_number)?;
        if commit.ty.is_empty() {
            return Err(Error::MissingType);
        }
        if commit.description.is_empty() {
            return Err(Error::MissingDescription);
        }
        trace!("parsed header {header:?}");

        let rest = lines.map(|(_, line)| line).collect::<Vec<_>>();
        let (content, extra) = extract::fields(&self.field, &rest);
        fields.extend(extra);
        let content = content.join("\n");

        let (body, footers) = Sections::new(self.note_keywords()).split(&content);
        let footers = footers
            .into_iter()
            .map(|f| {
                let separator = FooterSeparator::from_str_unchecked(f.separator);
                Footer::new(f.token, separator, f.value)
            })
            .collect::<Vec<_>>();

        commit.notes = footers
            .iter()
            .filter(|f| self.is_note_keyword(f.token().as_str()))
            .map(|f| Note {
                title: f.token().as_str().to_owned(),
                text: f.value().to_owned(),
            })
            .collect();
        commit.breaking = commit.type_().breaking() || footers.iter().any(Footer::breaking);

        let mut text = body.unwrap_or_default().to_owned();
        for footer in &footers {
            text.push('\n');
            text.push_str(&footer.to_string());
        }
        commit.mentions = extract::mentions(&text);
        if let Some(pattern) = &self.references {
            commit.references = extract::references(pattern, &commit.description);
            commit.references.extend(extract::references(pattern, &text));
        }

        let reverted = format!("{}\n{}", commit.description, rest.join("\n"));
        if let Some(caps) = self.revert.captures(&reverted) {
            commit.reverts = extract::named_groups(&caps, self.revert_groups());
        }

        commit.header = header.to_owned();
        commit.merge_header = merge_header;
        commit.body = body.map(str::to_owned);
        commit.footers = footers;
        commit.fields = fields;
        Ok(commit)
    }

    /// Parse the header line of a commit message.
    ///
    /// Only the type, scope and description are filled in, and either may
    /// be empty; [`Parser::parse`] rejects such headers.
    ///
    /// # Errors
    ///
    /// Returns the position and kind of the first syntax error on the line.
    pub fn parse_header(&self, line: &str, line_number: usize) -> Result<Commit, ParseError> {
        header::header(line, line_number)
    }

    /// Parse each message, consulting the error callback on failure.
    ///
    /// Messages whose error the callback accepts are skipped. Without a
    /// callback the first error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first error not accepted by the callback.
    pub fn parse_many<'m>(
        &self,
        messages: impl IntoIterator<Item = &'m str>,
    ) -> Result<Vec<Commit>, Error> {
        let mut commits = Vec::new();
        for message in messages {
            match self.parse(message) {
                Ok(commit) => commits.push(commit),
                Err(err) => {
                    let Some(callback) = &self.config.error_callback else {
                        return Err(err);
                    };
                    callback.call(&err)?;
                    debug!("skipping commit: {err}");
                }
            }
        }
        Ok(commits)
    }

    fn is_comment(&self, line: &str) -> bool {
        self.config
            .comment_character
            .is_some_and(|comment| line.starts_with(comment))
    }

    fn note_keywords(&self) -> &[String] {
        self.config.note_keywords.as_deref().unwrap_or_default()
    }

    fn is_note_keyword(&self, token: &str) -> bool {
        self.note_keywords()
            .iter()
            .any(|keyword| UniCase::new(keyword.as_str()) == UniCase::new(token))
    }

    fn revert_groups(&self) -> &[String] {
        self.config.revert_groups.as_deref().unwrap_or_default()
    }
}
