//! Pattern driven extraction of fields, references, mentions and reverts.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::commit::Reference;

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)@([\w-]+)").expect("invalid regex"));

/// Build the pattern matching issue references.
///
/// Returns `None` when there are no prefixes, nothing could be referenced.
pub(crate) fn reference_pattern(
    actions: &[String],
    prefixes: &[String],
    case_sensitive: bool,
) -> Option<String> {
    fn alternation(words: &[String]) -> String {
        words
            .iter()
            .filter(|w| !w.is_empty())
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|")
    }

    let prefixes = alternation(prefixes);
    if prefixes.is_empty() {
        return None;
    }
    let prefixes = if case_sensitive {
        format!("(?P<prefix>{prefixes})")
    } else {
        format!("(?P<prefix>(?i:{prefixes}))")
    };

    let actions = alternation(actions);
    let actions = if actions.is_empty() {
        String::new()
    } else {
        format!(r"(?:\b(?P<action>(?i:{actions}))\s+)?")
    };

    Some(format!(
        r"{actions}(?P<repository>[\w.-]+/[\w.-]+)?{prefixes}(?P<issue>[\w-]*\d+)"
    ))
}

/// Every issue referenced in `text`.
pub(crate) fn references(pattern: &Regex, text: &str) -> Vec<Reference> {
    pattern
        .captures_iter(text)
        .map(|caps| {
            let group = |name| caps.name(name).map(|m| m.as_str().to_owned());
            Reference {
                action: group("action"),
                repository: group("repository"),
                prefix: group("prefix").unwrap_or_default(),
                issue: group("issue").unwrap_or_default(),
                raw: caps[0].trim().to_owned(),
            }
        })
        .collect()
}

/// Every `@name` in `text`, in order of appearance.
pub(crate) fn mentions(text: &str) -> Vec<String> {
    MENTION_RE
        .captures_iter(text)
        .map(|caps| caps[1].to_owned())
        .collect()
}

/// Map the capture groups of `caps` onto `names`, in order.
///
/// Groups that did not participate in the match are left out.
pub(crate) fn named_groups(caps: &Captures<'_>, names: &[String]) -> BTreeMap<String, String> {
    names
        .iter()
        .enumerate()
        .filter_map(|(i, name)| {
            caps.get(i + 1)
                .map(|m| (name.clone(), m.as_str().to_owned()))
        })
        .collect()
}

/// Remove the field blocks from `lines`.
///
/// A line matching `pattern` names a field, the lines after it (up to the
/// next field line) hold its value. Returns the remaining content lines and
/// the fields.
pub(crate) fn fields<'i>(
    pattern: &Regex,
    lines: &[&'i str],
) -> (Vec<&'i str>, BTreeMap<String, String>) {
    let mut content = Vec::new();
    let mut fields = BTreeMap::new();
    let mut current: Option<(String, Vec<&'i str>)> = None;

    for &line in lines {
        if let Some(caps) = pattern.captures(line.trim_end()) {
            if let Some((name, value)) = current.take() {
                fields.insert(name, value.join("\n").trim().to_owned());
            }
            let name = caps.get(1).or_else(|| caps.get(0)).map_or("", |m| m.as_str());
            current = Some((name.to_owned(), Vec::new()));
        } else if let Some((_, value)) = current.as_mut() {
            value.push(line);
        } else {
            content.push(line);
        }
    }
    if let Some((name, value)) = current {
        fields.insert(name, value.join("\n").trim().to_owned());
    }

    (content, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_FIELD_PATTERN, DEFAULT_ISSUE_PREFIXES, DEFAULT_REFERENCE_ACTIONS};

    fn owned(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| (*w).to_owned()).collect()
    }

    fn compile(pattern: Option<String>) -> Regex {
        Regex::new(&pattern.unwrap()).unwrap()
    }

    fn default_references() -> Regex {
        compile(reference_pattern(
            &owned(DEFAULT_REFERENCE_ACTIONS),
            &owned(DEFAULT_ISSUE_PREFIXES),
            false,
        ))
    }

    #[test]
    fn test_references() {
        let pattern = default_references();

        let found = references(&pattern, "Closes #12, fixes owner/repo#3 and #7");
        assert_eq!(found.len(), 3);

        assert_eq!(found[0].action(), Some("Closes"));
        assert_eq!(found[0].repository(), None);
        assert_eq!(found[0].prefix(), "#");
        assert_eq!(found[0].issue(), "12");
        assert_eq!(found[0].raw(), "Closes #12");

        assert_eq!(found[1].action(), Some("fixes"));
        assert_eq!(found[1].repository(), Some("owner/repo"));
        assert_eq!(found[1].issue(), "3");

        assert_eq!(found[2].action(), None);
        assert_eq!(found[2].issue(), "7");

        assert!(references(&pattern, "nothing to see").is_empty());
    }

    #[test]
    fn test_reference_prefix_case() {
        let insensitive = compile(reference_pattern(&[], &owned(&["gh-"]), false));
        assert_eq!(references(&insensitive, "see GH-42")[0].issue(), "42");

        let sensitive = compile(reference_pattern(&[], &owned(&["gh-"]), true));
        assert!(references(&sensitive, "see GH-42").is_empty());
        assert_eq!(references(&sensitive, "see gh-42")[0].prefix(), "gh-");
    }

    #[test]
    fn test_reference_without_prefixes() {
        assert_eq!(reference_pattern(&owned(&["closes"]), &[], false), None);
    }

    #[test]
    fn test_mentions() {
        assert_eq!(
            mentions("@alice thanks\nand @bob-the-builder, not lisa@simpsons.fam"),
            vec!["alice".to_owned(), "bob-the-builder".to_owned()]
        );
    }

    #[test]
    fn test_fields() {
        let pattern = Regex::new(DEFAULT_FIELD_PATTERN).unwrap();
        let lines = ["", "body text", "-hash-", "8b45ee3", "-sha-", "", "abc", ""];

        let (content, fields) = fields(&pattern, &lines);
        assert_eq!(content, vec!["", "body text"]);
        assert_eq!(fields.get("hash").map(String::as_str), Some("8b45ee3"));
        assert_eq!(fields.get("sha").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_named_groups() {
        let pattern = Regex::new(r"^Merge pull request #(\d+) from (.*)$").unwrap();
        let caps = pattern
            .captures("Merge pull request #1 from user/branch")
            .unwrap();

        let groups = named_groups(&caps, &owned(&["id", "source", "extra"]));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["id"], "1");
        assert_eq!(groups["source"], "user/branch");
    }
}
