//! Splits the lines after the header into body and footers.
//!
//! ```text
//! <content>    ::= <newline>*, [<body>], (<newline>+, <footer>)*
//! <footer>     ::= <token>, <separator>, <whitespace>*, <value>
//! <token>      ::= <note keyword> | "BREAKING CHANGE" | <word>
//! <word>       ::= <any char except whitespace or parens or ":" or "!">+
//! <separator>  ::= ":" | " #"
//! ```

use unicase::UniCase;
use winnow::combinator::{alt, peek};
use winnow::error::ModalResult;
use winnow::stream::Stream;
use winnow::token::take_while;
use winnow::Parser;

use crate::commit::BREAKING_PHRASE;

/// A footer as it appears in the message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct RawFooter<'i> {
    pub(crate) token: &'i str,
    pub(crate) separator: &'i str,
    pub(crate) value: &'i str,
}

/// Footer grammar for one set of note keywords.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Sections<'k> {
    keywords: &'k [String],
}

impl<'k> Sections<'k> {
    pub(crate) fn new(keywords: &'k [String]) -> Self {
        Self { keywords }
    }

    /// Split `content` into its body and footers.
    ///
    /// Footers start at the first footer line that follows a blank line (or
    /// opens the content). From there on every footer line starts a new
    /// footer, and other lines continue the value of the current one.
    pub(crate) fn split<'i>(&self, content: &'i str) -> (Option<&'i str>, Vec<RawFooter<'i>>) {
        let mut footers = Vec::new();
        let mut current: Option<(RawFooter<'i>, usize)> = None;
        let mut body_end = content.len();
        let mut prior_is_empty = true;
        let mut offset = 0;

        for line in content.split_inclusive('\n') {
            let start = if current.is_some() || prior_is_empty {
                self.footer_start(line)
            } else {
                None
            };
            if let Some((token, separator, value_at)) = start {
                if let Some((mut footer, value_start)) = current.take() {
                    footer.value = content[value_start..offset].trim_end();
                    footers.push(footer);
                } else {
                    body_end = offset;
                }
                let footer = RawFooter {
                    token,
                    separator,
                    value: "",
                };
                current = Some((footer, offset + value_at));
            }
            prior_is_empty = line.trim().is_empty();
            offset += line.len();
        }
        if let Some((mut footer, value_start)) = current {
            footer.value = content[value_start..].trim_end();
            footers.push(footer);
        }

        let body = content[..body_end].trim_matches(is_line_ending).trim_end();
        let body = (!body.trim_start().is_empty()).then_some(body);
        (body, footers)
    }

    /// If `line` starts a footer, its token, separator and the byte offset of
    /// its value within `line`.
    fn footer_start<'i>(&self, line: &'i str) -> Option<(&'i str, &'i str, usize)> {
        let trimmed = line.trim_end();
        let mut input = trimmed;
        let token = self.token(&mut input).ok()?;
        let separator = separator(&mut input).ok()?;
        inline_whitespace(&mut input).ok()?;
        if input.is_empty() {
            return None;
        }
        Some((token, separator, trimmed.len() - input.len()))
    }

    fn token<'i>(&self, input: &mut &'i str) -> ModalResult<&'i str> {
        let keywords = std::iter::once(BREAKING_PHRASE)
            .chain(self.keywords.iter().map(String::as_str));
        let text = *input;
        for keyword in keywords.filter(|k| !k.is_empty()) {
            let Some((head, mut rest)) = text
                .is_char_boundary(keyword.len())
                .then(|| text.split_at(keyword.len()))
            else {
                continue;
            };
            // A keyword only counts as the whole token.
            if UniCase::new(head) == UniCase::new(keyword)
                && peek(separator).parse_next(&mut rest).is_ok()
            {
                return Ok(input.next_slice(keyword.len()));
            }
        }
        word(input)
    }
}

fn is_line_ending(c: char) -> bool {
    c == '\n' || c == '\r'
}

fn is_parens(c: char) -> bool {
    c == '(' || c == ')'
}

fn word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !is_parens(c) && c != ':' && c != '!'
    })
    .parse_next(input)
}

fn separator<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((":", " #")).parse_next(input)
}

fn inline_whitespace<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., |c: char| c.is_whitespace() && !is_line_ending(c)).parse_next(input)
}
