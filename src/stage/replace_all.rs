use crate::stage::{Stage, StageError, keep_if_unchanged};
use regex::{Captures, Regex};
use smallvec::SmallVec;
use std::borrow::Cow;

/// Zero-width condition checked around a match before it is rewritten.
///
/// The `regex` crate has no look-around, so rules that need "only when the
/// previous character is X" are written as a plain pattern plus a guard.
/// A match whose guard fails is kept verbatim and the search resumes right
/// after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Guard {
    /// Every match is rewritten.
    #[default]
    Always,
    /// The character right before the match must be whitespace.
    AfterWhitespace,
    /// The character right before the match must exist and not be whitespace.
    AfterNonWhitespace,
    /// The character right after the match must exist and not be whitespace.
    BeforeNonWhitespace,
}

impl Guard {
    #[inline]
    fn admits(self, haystack: &str, start: usize, end: usize) -> bool {
        match self {
            Guard::Always => true,
            Guard::AfterWhitespace => haystack[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace),
            Guard::AfterNonWhitespace => haystack[..start]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_whitespace()),
            Guard::BeforeNonWhitespace => haystack[end..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_whitespace()),
        }
    }
}

/// One pattern → template rule.
///
/// Templates use the `regex` expansion syntax: `${1}` for a numbered group,
/// `${name}` for a named one, `$$` for a literal dollar sign.
#[derive(Debug, Clone)]
pub struct Replacement {
    pattern: Regex,
    template: String,
    guard: Guard,
}

impl Replacement {
    pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self, StageError> {
        let regex = Regex::new(pattern).map_err(|source| StageError::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            pattern: regex,
            template: template.into(),
            guard: Guard::Always,
        })
    }

    /// Restrict the rule to matches whose surroundings satisfy `guard`.
    pub fn guarded(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn guard(&self) -> Guard {
        self.guard
    }

    /// Whether some match in `text` passes the guard.
    pub fn is_match(&self, text: &str) -> bool {
        match self.guard {
            Guard::Always => self.pattern.is_match(text),
            guard => self
                .pattern
                .find_iter(text)
                .any(|m| guard.admits(text, m.start(), m.end())),
        }
    }

    /// Substitute every non-overlapping match, left to right.
    pub fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let rewritten = match self.guard {
            Guard::Always => match self.pattern.replace_all(&text, self.template.as_str()) {
                Cow::Borrowed(_) => None,
                Cow::Owned(s) => Some(s),
            },
            guard => {
                let haystack = text.as_ref();
                let replaced = self.pattern.replace_all(haystack, |caps: &Captures| {
                    let whole = caps.get_match();
                    let mut out = String::new();
                    if guard.admits(haystack, whole.start(), whole.end()) {
                        caps.expand(&self.template, &mut out);
                    } else {
                        out.push_str(whole.as_str());
                    }
                    out
                });
                match replaced {
                    Cow::Borrowed(_) => None,
                    Cow::Owned(s) => Some(s),
                }
            }
        };

        match rewritten {
            None => text,
            Some(s) => {
                let out = keep_if_unchanged(text, s);
                if matches!(out, Cow::Owned(_)) {
                    tracing::trace!(pattern = self.pattern(), "replacement rewrote text");
                }
                out
            }
        }
    }
}

/// Ordered list of replacement rules.
///
/// Rules run in insertion order and each one sees the output of the rule
/// before it, so `[("a", "A"), ("A", "b")]` turns `"ab"` into `"bb"`.
#[derive(Debug, Clone, Default)]
pub struct ReplacementSet {
    rules: SmallVec<[Replacement; 4]>,
}

impl ReplacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile an ordered sequence of `(pattern, template)` pairs.
    pub fn from_pairs<I, P, T>(pairs: I) -> Result<Self, StageError>
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
        T: Into<String>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(), |set, (pattern, template)| {
                set.with(pattern.as_ref(), template)
            })
    }

    /// Append an unguarded rule.
    pub fn with(self, pattern: &str, template: impl Into<String>) -> Result<Self, StageError> {
        Ok(self.push(Replacement::new(pattern, template)?))
    }

    /// Append an already-built rule.
    pub fn push(mut self, rule: Replacement) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replacement> {
        self.rules.iter()
    }

    /// Whether any rule would fire on `text` as given. `false` means
    /// [`ReplacementSet::apply`] leaves it untouched.
    pub fn is_match(&self, text: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(text))
    }

    /// Run every rule in order, feeding each output into the next rule.
    pub fn apply<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        self.rules.iter().fold(text, |current, rule| rule.apply(current))
    }
}

/// Apply `replacements` to `text` in order. An empty set returns `text`
/// borrowed and untouched; patterns that never match are no-ops.
pub fn replace_all<'a>(replacements: &ReplacementSet, text: &'a str) -> Cow<'a, str> {
    replacements.apply(Cow::Borrowed(text))
}

/// Stage wrapper around a caller-supplied [`ReplacementSet`].
#[derive(Debug, Clone, Default)]
pub struct ReplaceAll(pub ReplacementSet);

impl Stage for ReplaceAll {
    fn name(&self) -> &'static str {
        "replace_all"
    }

    // If no rule matches the input, no rule can match any intermediate
    // result either, since nothing was rewritten.
    fn needs_apply(&self, text: &str) -> Result<bool, StageError> {
        Ok(self.0.is_match(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        Ok(self.0.apply(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_a_no_op() {
        let set = ReplacementSet::new();
        let input = "x";
        let out = replace_all(&set, input);
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
        assert_eq!(out, "x");
    }

    #[test]
    fn literal_rules_chain_in_order() {
        let set = ReplacementSet::from_pairs([("a", "A"), ("A", "b")]).unwrap();
        assert_eq!(replace_all(&set, "ab"), "bb");
    }

    #[test]
    fn order_matters() {
        let set = ReplacementSet::from_pairs([("A", "b"), ("a", "A")]).unwrap();
        assert_eq!(replace_all(&set, "ab"), "Ab");
    }

    #[test]
    fn regex_rule_with_group_reference() {
        let set = ReplacementSet::from_pairs([(r"&(\w+)", "${1}")]).unwrap();
        assert_eq!(replace_all(&set, "aa&bb"), "aabb");
    }

    #[test]
    fn digits_collapse_to_marker() {
        let set = ReplacementSet::from_pairs([(r"\d+", "#")]).unwrap();
        assert_eq!(replace_all(&set, "a1"), "a#");
    }

    #[test]
    fn non_matching_pattern_is_borrowed() {
        let set = ReplacementSet::from_pairs([("zzz", "y")]).unwrap();
        let out = replace_all(&set, "abc");
        assert!(matches!(out, Cow::Borrowed("abc")));
    }

    #[test]
    fn identity_rewrite_stays_borrowed() {
        let set = ReplacementSet::from_pairs([("(b)", "${1}")]).unwrap();
        let out = replace_all(&set, "abc");
        assert!(matches!(out, Cow::Borrowed("abc")));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = ReplacementSet::from_pairs([("(unclosed", "x")]).unwrap_err();
        assert!(matches!(err, StageError::Pattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn after_non_whitespace_guard() {
        let rule = Replacement::new("([&(])", " ${1}")
            .unwrap()
            .guarded(Guard::AfterNonWhitespace);
        let set = ReplacementSet::new().push(rule);
        assert_eq!(replace_all(&set, "a&b"), "a &b");
        assert_eq!(replace_all(&set, "a &b"), "a &b");
        assert_eq!(replace_all(&set, "&b"), "&b");
        // Each `&` is judged against the original text, like a look-behind.
        assert_eq!(replace_all(&set, "a&&"), "a & &");
    }

    #[test]
    fn before_non_whitespace_guard() {
        let rule = Replacement::new("([,.])", "${1} ")
            .unwrap()
            .guarded(Guard::BeforeNonWhitespace);
        let set = ReplacementSet::new().push(rule);
        assert_eq!(replace_all(&set, "a,b"), "a, b");
        assert_eq!(replace_all(&set, "a, b"), "a, b");
        assert_eq!(replace_all(&set, "end."), "end.");
        assert_eq!(replace_all(&set, "a.,b"), "a. , b");
    }

    #[test]
    fn after_whitespace_guard() {
        let rule = Replacement::new(r"(?i)of\b", "of")
            .unwrap()
            .guarded(Guard::AfterWhitespace);
        let set = ReplacementSet::new().push(rule);
        assert_eq!(replace_all(&set, "Of Mice Of Men"), "Of Mice of Men");
        assert_eq!(replace_all(&set, "Proof Of"), "Proof of");
    }

    #[test]
    fn guarded_is_match_ignores_rejected_matches() {
        let rule = Replacement::new(r"(?i)of\b", "of")
            .unwrap()
            .guarded(Guard::AfterWhitespace);
        assert!(!rule.is_match("Of Mice"));
        assert!(!rule.is_match("Proof"));
        assert!(rule.is_match("Proof Of"));
    }

    #[test]
    fn stage_needs_apply_only_when_a_rule_matches() {
        let stage = ReplaceAll(ReplacementSet::from_pairs([("x", "y")]).unwrap());
        assert!(stage.needs_apply("axe").unwrap());
        assert!(!stage.needs_apply("abc").unwrap());
        assert_eq!(stage.apply(Cow::Borrowed("axe")).unwrap(), "aye");
    }
}
