use crate::{
    stage::{
        Stage, StageError,
        replace_all::{Guard, Replacement, ReplacementSet},
        squish::{needs_squish, squish_cow},
    },
    testing::stage_contract::StageTestConfig,
};
use once_cell::sync::Lazy;
use std::borrow::Cow;

/// Characters that should not have whitespace before them.
pub const REMOVE_LEADING_SPACE: &[char] = &['.', ',', ':', ';', ')', '!', '?', '/', '-'];
/// Characters that should not have whitespace after them.
pub const REMOVE_TRAILING_SPACE: &[char] = &['(', '/', '-'];
/// Characters that should be preceded by a space.
pub const ADD_LEADING_SPACE: &[char] = &['&', '('];
/// Characters that should be followed by a space.
pub const ADD_TRAILING_SPACE: &[char] = &['&', ')', ',', '.', ':', ';', '!', '?'];

/// Build a regex character class matching exactly the given characters.
fn class(chars: &[char]) -> String {
    let mut out = String::from("[");
    for &c in chars {
        out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
    }
    out.push(']');
    out
}

static SPACING_RULES: Lazy<ReplacementSet> = Lazy::new(|| {
    spacing_rules().expect("built-in punctuation spacing rules are valid regexes")
});

fn spacing_rules() -> Result<ReplacementSet, StageError> {
    Ok(ReplacementSet::new()
        .with(&format!(r"\s({})", class(REMOVE_LEADING_SPACE)), "${1}")?
        .with(&format!(r"({})\s", class(REMOVE_TRAILING_SPACE)), "${1}")?
        .push(
            Replacement::new(&format!("({})", class(ADD_LEADING_SPACE)), " ${1}")?
                .guarded(Guard::AfterNonWhitespace),
        )
        .push(
            Replacement::new(&format!("({})", class(ADD_TRAILING_SPACE)), "${1} ")?
                .guarded(Guard::BeforeNonWhitespace),
        ))
}

/// Squish whitespace, then fix the spacing around punctuation.
///
/// After squishing, four rules run in this exact order, each on the output
/// of the previous one:
///
/// | # | Rule                                   | Characters                 |
/// |---|----------------------------------------|----------------------------|
/// | 1 | drop one space **before**              | `. , : ; ) ! ? / -`        |
/// | 2 | drop one space **after**               | `( / -`                    |
/// | 3 | add a space before, if glued to a word | `& (`                      |
/// | 4 | add a space after, if glued to a word  | `& ) , . : ; ! ?`          |
///
/// The order is part of the contract: rules 1 and 2 run before 3 and 4, so
/// `"c( 1 )"` becomes `"c (1)"` rather than `"c ( 1 )"`. A character may sit
/// in both a remove and an add class (`)` loses its leading space and gains
/// a trailing one) since the two rules look in opposite directions.
///
/// ```text
/// " a ,b c( 1 ) d&e -- f g /h ."  →  "a, b c (1) d & e--f g/h."
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeWhitespace;

impl Stage for NormalizeWhitespace {
    fn name(&self) -> &'static str {
        "normalize_whitespace"
    }

    fn needs_apply(&self, text: &str) -> Result<bool, StageError> {
        Ok(needs_squish(text) || needs_spacing(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        Ok(SPACING_RULES.apply(squish_cow(text)))
    }
}

/// Whether any spacing rule would fire on already squished text: some
/// punctuation has whitespace on a side it should not, or lacks it on a side
/// it should have it.
fn needs_spacing(text: &str) -> bool {
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let next = chars.peek().copied();
        let space_before = prev.is_some_and(char::is_whitespace);
        let glued_before = prev.is_some_and(|p| !p.is_whitespace());
        let space_after = next.is_some_and(char::is_whitespace);
        let glued_after = next.is_some_and(|n| !n.is_whitespace());
        if (space_before && REMOVE_LEADING_SPACE.contains(&c))
            || (space_after && REMOVE_TRAILING_SPACE.contains(&c))
            || (glued_before && ADD_LEADING_SPACE.contains(&c))
            || (glued_after && ADD_TRAILING_SPACE.contains(&c))
        {
            return true;
        }
        prev = Some(c);
    }
    false
}

/// Normalize whitespace and the spacing around punctuation.
pub fn normalize_whitespace(text: &str) -> Cow<'_, str> {
    SPACING_RULES.apply(squish_cow(Cow::Borrowed(text)))
}

impl StageTestConfig for NormalizeWhitespace {
    fn samples() -> &'static [&'static str] {
        &[
            " a ,b c( 1 ) ",
            "a, b c (1)",
            "Hello World 123",
            "x & y",
            "",
        ]
    }

    fn should_pass_through() -> &'static [&'static str] {
        &["hello world", "a, b c (1)", "x & y", "a/b-c", "end.", ""]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[
            (" a ,b c( 1 ) ", "a, b c (1)"),
            (
                " a ,b c( 1 ) d&e -- f g /h .",
                "a, b c (1) d & e--f g/h.",
            ),
            ("( ab)", "(ab)"),
            ("a,b", "a, b"),
            (" a /b ", "a/b"),
            ("a& b", "a & b"),
            ("well ,   then !", "well, then!"),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(NormalizeWhitespace);
    }
}
