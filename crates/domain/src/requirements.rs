//! Facet visibility requirements.

use crate::facet::{Facet, FacetCollection, Requirement};
use solr_search_shared::{ErrorCode, ErrorEnvelope};
use std::fmt;

/// Requirement value met when the target facet has no selection.
pub const NONE_SELECTED: &str = "__none";
/// Requirement value met when the target facet has any selection.
pub const ANY_SELECTED: &str = "__any";

/// Requirement evaluation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequirementError {
    /// A requirement targets a facet that is not configured.
    UnknownFacet {
        /// Facet declaring the requirement.
        facet: String,
        /// Requirement name.
        requirement: String,
        /// Missing target facet.
        target: String,
    },
}

impl RequirementError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownFacet { .. } => ErrorCode::new("facet", "unknown_requirement_facet"),
        }
    }
}

impl fmt::Display for RequirementError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFacet {
                facet,
                requirement,
                target,
            } => write!(
                formatter,
                "requirement `{requirement}` of facet `{facet}` references unknown facet `{target}`"
            ),
        }
    }
}

impl std::error::Error for RequirementError {}

impl From<RequirementError> for ErrorEnvelope {
    fn from(error: RequirementError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            RequirementError::UnknownFacet {
                facet,
                requirement,
                target,
            } => envelope
                .with_metadata("facet", facet)
                .with_metadata("requirement", requirement)
                .with_metadata("target", target),
        }
    }
}

/// Evaluates facet requirements against the selection state of a collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequirementsService;

impl RequirementsService {
    /// Returns true when every requirement of `facet` is met.
    pub fn all_requirements_met(
        facet: &Facet,
        facets: &FacetCollection,
    ) -> Result<bool, RequirementError> {
        for requirement in &facet.configuration().requirements {
            if !Self::requirement_met(facet.name(), requirement, facets)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Evaluates a single requirement declared by facet `owner`.
    pub fn requirement_met(
        owner: &str,
        requirement: &Requirement,
        facets: &FacetCollection,
    ) -> Result<bool, RequirementError> {
        let target = facets
            .get(&requirement.facet)
            .ok_or_else(|| RequirementError::UnknownFacet {
                facet: owner.to_owned(),
                requirement: requirement.name.clone(),
                target: requirement.facet.clone(),
            })?;

        let selected = target.selected_values();
        let met = requirement
            .values
            .iter()
            .any(|value| value_met(value, &selected));
        Ok(met != requirement.negate)
    }
}

fn value_met(value: &str, selected: &[String]) -> bool {
    match value {
        NONE_SELECTED => selected.is_empty(),
        ANY_SELECTED => !selected.is_empty(),
        _ => {
            selected.iter().any(|candidate| candidate == value)
                || fnmatch(value, &selected.join(", "))
        },
    }
}

/// Shell-style wildcard matching (`*`, `?`, `[...]`, `[!...]`, `\` escape).
///
/// Runs in `O(pattern * subject)`: a mismatch resumes after the most recent
/// `*` instead of trying every split point.
#[must_use]
pub fn fnmatch(pattern: &str, subject: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let subject: Vec<char> = subject.chars().collect();

    let mut position = 0;
    let mut resume: Option<(usize, usize)> = None;
    let mut matched = 0;
    while let Some(&ch) = subject.get(matched) {
        match token(&pattern, position) {
            Some(Token::Star) => {
                position += 1;
                resume = Some((position, matched));
                continue;
            },
            Some(Token::Single { matcher, next }) if matcher.matches(ch) => {
                position = next;
                matched += 1;
                continue;
            },
            _ => {},
        }
        let Some((after_star, start)) = resume else {
            return false;
        };
        position = after_star;
        matched = start + 1;
        resume = Some((after_star, matched));
    }

    while let Some(Token::Star) = token(&pattern, position) {
        position += 1;
    }
    position == pattern.len()
}

enum Token<'a> {
    Star,
    Single { matcher: Matcher<'a>, next: usize },
}

enum Matcher<'a> {
    Any,
    Literal(char),
    Class(CharClass<'a>),
}

impl Matcher<'_> {
    fn matches(&self, ch: char) -> bool {
        match self {
            Self::Any => true,
            Self::Literal(expected) => *expected == ch,
            Self::Class(class) => class.matches(ch),
        }
    }
}

/// Pattern token starting at `position`, with the position after it.
fn token(pattern: &[char], position: usize) -> Option<Token<'_>> {
    let (&head, tail) = pattern.get(position..)?.split_first()?;
    let next = position + 1;
    let single = |matcher, next| Token::Single { matcher, next };
    let token = match head {
        '*' => Token::Star,
        '?' => single(Matcher::Any, next),
        '[' => match parse_class(tail) {
            Some(class) => {
                let after = pattern.len() - class.remaining.len();
                single(Matcher::Class(class), after)
            },
            None => single(Matcher::Literal('['), next),
        },
        '\\' => match tail.first() {
            Some(&escaped) => single(Matcher::Literal(escaped), next + 1),
            None => single(Matcher::Literal('\\'), next),
        },
        other => single(Matcher::Literal(other), next),
    };
    Some(token)
}

struct CharClass<'a> {
    negated: bool,
    ranges: Vec<(char, char)>,
    remaining: &'a [char],
}

impl CharClass<'_> {
    fn matches(&self, ch: char) -> bool {
        let hit = self
            .ranges
            .iter()
            .any(|(low, high)| *low <= ch && ch <= *high);
        hit != self.negated
    }
}

fn parse_class(pattern: &[char]) -> Option<CharClass<'_>> {
    let mut rest = pattern;
    let mut negated = false;
    if let Some((&('!' | '^'), tail)) = rest.split_first() {
        negated = true;
        rest = tail;
    }

    let mut ranges = Vec::new();
    let mut first = true;
    loop {
        let (&ch, tail) = rest.split_first()?;
        if ch == ']' && !first {
            return Some(CharClass {
                negated,
                ranges,
                remaining: tail,
            });
        }
        first = false;

        let (low, tail) = if ch == '\\' {
            let (&escaped, tail) = tail.split_first()?;
            (escaped, tail)
        } else {
            (ch, tail)
        };

        match tail {
            ['-', high, after @ ..] if *high != ']' => {
                ranges.push((low, *high));
                rest = after;
            },
            _ => {
                ranges.push((low, low));
                rest = tail;
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::{FacetConfiguration, FacetItem, FacetItemCollection, FacetType};
    use serde_json::{Value, json};
    use std::error::Error;

    fn facet(name: &str, node: Value, selected: &[&str]) -> Result<Facet, Box<dyn Error>> {
        let Value::Object(node) = node else {
            return Err("fixture is not an object".into());
        };
        let configuration = FacetConfiguration::from_node(name, &node, FacetType::Options)?;
        let mut items: FacetItemCollection = selected
            .iter()
            .map(|value| FacetItem::option(name, *value, *value, 1, true))
            .collect();
        items.add(FacetItem::option(name, "other", "other", 1, false));
        Ok(Facet::new(configuration, items))
    }

    fn gated(values: &str, negate: bool) -> Result<Facet, Box<dyn Error>> {
        facet(
            "category",
            json!({
                "field": "category",
                "requirements.": {
                    "typeGate.": { "facet": "type", "values": values, "negate": negate }
                }
            }),
            &[],
        )
    }

    fn evaluate(values: &str, negate: bool, selected: &[&str]) -> Result<bool, Box<dyn Error>> {
        let gated = gated(values, negate)?;
        let facets: FacetCollection = [facet("type", json!({ "field": "type" }), selected)?, gated.clone()]
            .into_iter()
            .collect();
        Ok(RequirementsService::all_requirements_met(&gated, &facets)?)
    }

    #[test]
    fn no_requirements_are_met() -> Result<(), Box<dyn Error>> {
        let plain = facet("type", json!({ "field": "type" }), &[])?;
        let facets: FacetCollection = std::iter::once(plain.clone()).collect();
        assert!(RequirementsService::all_requirements_met(&plain, &facets)?);
        Ok(())
    }

    #[test]
    fn none_sentinel_requires_empty_selection() -> Result<(), Box<dyn Error>> {
        assert!(evaluate("__none", false, &[])?);
        assert!(!evaluate("__none", false, &["pages"])?);
        Ok(())
    }

    #[test]
    fn any_sentinel_requires_a_selection() -> Result<(), Box<dyn Error>> {
        assert!(!evaluate("__any", false, &[])?);
        assert!(evaluate("__any", false, &["pages"])?);
        Ok(())
    }

    #[test]
    fn exact_and_glob_values_match_selection() -> Result<(), Box<dyn Error>> {
        assert!(evaluate("news, pages", false, &["pages"])?);
        assert!(!evaluate("news", false, &["pages"])?);
        assert!(evaluate("pag*", false, &["pages"])?);
        assert!(evaluate("pages, *", false, &["events", "pages"])?);
        assert!(evaluate("events, p*", false, &["events", "pages"])?);
        Ok(())
    }

    #[test]
    fn negate_inverts_the_outcome() -> Result<(), Box<dyn Error>> {
        assert!(!evaluate("pages", true, &["pages"])?);
        assert!(evaluate("__any", true, &[])?);
        Ok(())
    }

    #[test]
    fn unknown_target_facet_is_fatal() -> Result<(), Box<dyn Error>> {
        let gated = gated("__any", false)?;
        let facets: FacetCollection = std::iter::once(gated.clone()).collect();
        let result = RequirementsService::all_requirements_met(&gated, &facets);

        let Err(error) = result else {
            return Err("expected unknown facet error".into());
        };
        let envelope: ErrorEnvelope = error.into();
        assert_eq!(envelope.code, ErrorCode::new("facet", "unknown_requirement_facet"));
        assert_eq!(envelope.metadata.get("target").map(String::as_str), Some("type"));
        Ok(())
    }

    #[test]
    fn fnmatch_supports_classes_and_escapes() {
        assert!(fnmatch("p?ges", "pages"));
        assert!(fnmatch("[pn]ews", "news"));
        assert!(fnmatch("[!x]ews", "news"));
        assert!(!fnmatch("[!n]ews", "news"));
        assert!(fnmatch("[a-c]at", "bat"));
        assert!(fnmatch("a\\*b", "a*b"));
        assert!(!fnmatch("a\\*b", "axb"));
        assert!(fnmatch("*", ""));
        assert!(!fnmatch("?", ""));
        assert!(fnmatch("[]]", "]"));
    }

    #[test]
    fn fnmatch_stays_linear_on_repeated_stars() {
        let subject = "a".repeat(4_000);
        let started = std::time::Instant::now();

        assert!(!fnmatch("*a*a*a*a*a*a*b", &subject));
        assert!(fnmatch("*a*a*a*a*a*a*", &subject));
        assert!(fnmatch("a*a?a", "abbbaca"));
        assert!(!fnmatch("a*a?a", "abbbac"));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }
}
