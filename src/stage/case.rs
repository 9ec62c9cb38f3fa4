//! Case classification and alignment.

use crate::{
    stage::{Stage, StageError, is_cased, keep_if_unchanged, proper_case::proper_case},
    testing::stage_contract::StageTestConfig,
    value::Value,
};
use std::{borrow::Cow, fmt};

/// Coarse case of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseCategory {
    Upper,
    Lower,
    Mixed,
}

impl CaseCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            CaseCategory::Upper => "upper",
            CaseCategory::Lower => "lower",
            CaseCategory::Mixed => "mixed",
        }
    }
}

impl fmt::Display for CaseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// At least one cased character, and every cased character uppercase.
#[inline]
fn is_all_upper(text: &str) -> bool {
    let mut any = false;
    for c in text.chars().filter(|&c| is_cased(c)) {
        if !c.is_uppercase() {
            return false;
        }
        any = true;
    }
    any
}

/// At least one cased character, and every cased character lowercase.
#[inline]
fn is_all_lower(text: &str) -> bool {
    let mut any = false;
    for c in text.chars().filter(|&c| is_cased(c)) {
        if !c.is_lowercase() {
            return false;
        }
        any = true;
    }
    any
}

/// Classify `text` as upper, lower or mixed case.
///
/// Upper is checked first, then lower. Text without any cased character
/// (`""`, `"123"`) is neither and lands in [`CaseCategory::Mixed`].
pub fn check_case(text: &str) -> CaseCategory {
    if is_all_upper(text) {
        CaseCategory::Upper
    } else if is_all_lower(text) {
        CaseCategory::Lower
    } else {
        CaseCategory::Mixed
    }
}

/// [`check_case`] for loosely typed input. Anything but text is rejected.
pub fn try_check_case(value: &Value) -> Result<CaseCategory, StageError> {
    Ok(check_case(expect_text("check_case", value)?))
}

fn expect_text<'a>(op: &'static str, value: &'a Value) -> Result<&'a str, StageError> {
    value
        .as_text()
        .ok_or(StageError::InvalidArgument(op, value.type_name()))
}

/// Uppercase every character.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCase;

impl Stage for UpperCase {
    fn name(&self) -> &'static str {
        "upper_case"
    }

    fn needs_apply(&self, text: &str) -> Result<bool, StageError> {
        Ok(text.chars().any(|c| c.to_uppercase().ne(std::iter::once(c))))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text)? {
            return Ok(text);
        }
        Ok(Cow::Owned(text.to_uppercase()))
    }
}

/// Lowercase every character.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerCase;

impl Stage for LowerCase {
    fn name(&self) -> &'static str {
        "lower_case"
    }

    fn needs_apply(&self, text: &str) -> Result<bool, StageError> {
        Ok(text.chars().any(|c| c.to_lowercase().ne(std::iter::once(c))))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        if !self.needs_apply(&text)? {
            return Ok(text);
        }
        Ok(Cow::Owned(text.to_lowercase()))
    }
}

/// Rewrite the case of `text` to follow `reference`.
///
/// When both strings fall in the same [`CaseCategory`] `text` comes back
/// untouched, even if both are mixed with different casing. Otherwise the
/// result is `text` uppercased, lowercased, or proper-cased (for a mixed
/// reference), whatever case `text` started in.
pub fn match_case<'a>(text: &'a str, reference: &str) -> Cow<'a, str> {
    let target = check_case(reference);
    if check_case(text) == target {
        return Cow::Borrowed(text);
    }
    match target {
        CaseCategory::Upper => keep_if_unchanged(Cow::Borrowed(text), text.to_uppercase()),
        CaseCategory::Lower => keep_if_unchanged(Cow::Borrowed(text), text.to_lowercase()),
        CaseCategory::Mixed => proper_case(text),
    }
}

/// [`match_case`] for loosely typed input. Both arguments must be text.
pub fn try_match_case<'a>(text: &'a Value, reference: &Value) -> Result<Cow<'a, str>, StageError> {
    let text = expect_text("match_case", text)?;
    let reference = expect_text("match_case", reference)?;
    Ok(match_case(text, reference))
}

impl StageTestConfig for UpperCase {
    fn samples() -> &'static [&'static str] {
        &["abc", "ABC", "Straße", "123", ""]
    }

    fn should_pass_through() -> &'static [&'static str] {
        &["HELLO WORLD 123", "", "!?"]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[("of Mice and Men", "OF MICE AND MEN"), ("straße", "STRASSE")]
    }
}

impl StageTestConfig for LowerCase {
    fn samples() -> &'static [&'static str] {
        &["abc", "ABC", "MiXeD", "123", ""]
    }

    fn should_pass_through() -> &'static [&'static str] {
        &["hello world 123", "", "!?"]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[("OF MICE AND MEN", "of mice and men")]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_upper_lower_mixed() {
        assert_eq!(check_case("LEPAGE"), CaseCategory::Upper);
        assert_eq!(check_case("lepage"), CaseCategory::Lower);
        assert_eq!(check_case("LePage"), CaseCategory::Mixed);
        assert_eq!(check_case("of Mice and Men"), CaseCategory::Mixed);
        assert_eq!(check_case("of mice and men"), CaseCategory::Lower);
    }

    #[test]
    fn uncased_characters_are_ignored() {
        assert_eq!(check_case("ABC 123!"), CaseCategory::Upper);
        assert_eq!(check_case("abc-123"), CaseCategory::Lower);
    }

    #[test]
    fn no_cased_characters_is_mixed() {
        assert_eq!(check_case(""), CaseCategory::Mixed);
        assert_eq!(check_case("123 !?"), CaseCategory::Mixed);
    }

    #[test]
    fn category_names() {
        assert_eq!(CaseCategory::Upper.to_string(), "upper");
        assert_eq!(CaseCategory::Lower.as_str(), "lower");
        assert_eq!(CaseCategory::Mixed.as_str(), "mixed");
    }

    #[test]
    fn non_text_is_rejected() {
        let err = try_check_case(&Value::from(1)).unwrap_err();
        assert!(matches!(err, StageError::InvalidArgument("check_case", "int")));
        assert_eq!(try_check_case(&Value::from("LEPAGE")).unwrap(), CaseCategory::Upper);
    }

    #[test]
    fn match_case_grid() {
        let cases = [
            ("of Mice and Men", "a", "of mice and men"),
            ("of Mice and Men", "A", "OF MICE AND MEN"),
            ("of Mice and Men", "aB", "of Mice and Men"),
            ("OF MICE AND MEN", "a", "of mice and men"),
            ("OF MICE AND MEN", "A", "OF MICE AND MEN"),
            ("OF MICE AND MEN", "aB", "Of Mice and Men"),
            ("of mice and men", "a", "of mice and men"),
            ("of mice and men", "A", "OF MICE AND MEN"),
            ("of mice and men", "aB", "Of Mice and Men"),
        ];
        for (text, reference, expected) in cases {
            assert_eq!(match_case(text, reference), expected, "{text:?} vs {reference:?}");
        }
    }

    #[test]
    fn same_category_is_borrowed() {
        let input = "AbCd";
        let out = match_case(input, "xY");
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
        assert_eq!(match_case("AbCd", "a"), "abcd");
    }

    #[test]
    fn match_case_title_cases_hyphenated_names() {
        assert_eq!(match_case("MARY-JANE SMITH", "Ab"), "Mary-Jane Smith");
        assert_eq!(match_case("o'neil", "McDonald"), "O'Neil");
    }

    #[test]
    fn uncased_text_stays_borrowed_against_upper_reference() {
        // "123" is mixed, so it is rewritten, but uppercasing changes nothing
        let input = "123";
        let out = match_case(input, "A");
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }

    #[test]
    fn match_case_rejects_non_text_on_either_side() {
        assert!(matches!(
            try_match_case(&Value::from(1), &Value::from("a")),
            Err(StageError::InvalidArgument("match_case", "int"))
        ));
        assert!(matches!(
            try_match_case(&Value::from("a"), &Value::Null),
            Err(StageError::InvalidArgument("match_case", "null"))
        ));
        let text = Value::from("OF MICE AND MEN");
        assert_eq!(try_match_case(&text, &Value::from("aB")).unwrap(), "Of Mice and Men");
    }
}
