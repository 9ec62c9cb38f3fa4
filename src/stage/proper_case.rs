use crate::{
    stage::{
        Stage, StageError, is_cased, keep_if_unchanged,
        replace_all::{Guard, Replacement, ReplacementSet},
    },
    testing::stage_contract::StageTestConfig,
};
use once_cell::sync::Lazy;
use std::borrow::Cow;

/// Function words kept lowercase unless they open the string.
pub const ALWAYS_LOWERCASE: &[&str] = &["of", "and", "for"];

static STANDARD: Lazy<ProperCase> = Lazy::new(|| {
    ProperCase::with_exceptions(ALWAYS_LOWERCASE)
        .expect("built-in lowercase exceptions are valid regexes")
});

/// Title case with a small list of words that stay lowercase.
///
/// 1. Title case: a letter is uppercased when the character before it is not
///    a cased letter, and lowercased otherwise. Hyphens, apostrophes, digits
///    and whitespace all start a new word (`"o'neil"` → `"O'Neil"`).
/// 2. Each exception word (matched case-insensitively, ending at a word
///    boundary) is lowercased again when whitespace comes right before it.
///
/// The first word has nothing before it, so it keeps its capital even when
/// it is an exception: `"of mice and men"` → `"Of Mice and Men"`.
#[derive(Debug, Clone)]
pub struct ProperCase {
    exceptions: ReplacementSet,
}

impl Default for ProperCase {
    fn default() -> Self {
        (*STANDARD).clone()
    }
}

impl ProperCase {
    /// Build a proper-caser with a custom list of lowercase exceptions.
    pub fn with_exceptions<I, W>(words: I) -> Result<Self, StageError>
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        let exceptions = words.into_iter().try_fold(ReplacementSet::new(), |set, word| {
            let word = word.as_ref().to_lowercase();
            let rule = Replacement::new(&format!(r"(?i){}\b", regex::escape(&word)), word)?
                .guarded(Guard::AfterWhitespace);
            Ok::<_, StageError>(set.push(rule))
        })?;
        Ok(Self { exceptions })
    }

    fn proper<'a>(&self, text: Cow<'a, str>) -> Cow<'a, str> {
        let Some(titled) = title_case(&text) else {
            return self.exceptions.apply(text);
        };
        // Title casing may capitalize an exception that the rules then undo
        let out = self.exceptions.apply(Cow::Owned(titled)).into_owned();
        keep_if_unchanged(text, out)
    }
}

/// Uppercase every letter that follows a non-letter and lowercase every
/// letter that follows a letter. `None` when nothing would change.
fn title_case(text: &str) -> Option<String> {
    if is_title_cased(text) {
        return None;
    }
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for c in text.chars() {
        if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_cased = is_cased(c);
    }
    Some(out)
}

fn is_title_cased(text: &str) -> bool {
    let mut prev_cased = false;
    text.chars().all(|c| {
        let kept = if prev_cased {
            c.to_lowercase().eq(std::iter::once(c))
        } else {
            c.to_uppercase().eq(std::iter::once(c))
        };
        prev_cased = is_cased(c);
        kept
    })
}

impl Stage for ProperCase {
    fn name(&self) -> &'static str {
        "proper_case"
    }

    fn needs_apply(&self, text: &str) -> Result<bool, StageError> {
        Ok(!is_title_cased(text) || self.exceptions.is_match(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        Ok(self.proper(text))
    }
}

/// Apply proper case using [`ALWAYS_LOWERCASE`] as the exception list.
pub fn proper_case(text: &str) -> Cow<'_, str> {
    STANDARD.proper(Cow::Borrowed(text))
}

impl StageTestConfig for ProperCase {
    fn samples() -> &'static [&'static str] {
        &["of mice and men", "OF MICE AND MEN", "Of Mice and Men", "x", ""]
    }

    fn should_pass_through() -> &'static [&'static str] {
        &["Of Mice and Men", "Hello World 123", "A Tale for Two", ""]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[
            ("of mice and men", "Of Mice and Men"),
            ("OF MICE AND MEN", "Of Mice and Men"),
            ("the lord OF the rings", "The Lord of The Rings"),
            ("war AND peace", "War and Peace"),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(ProperCase::default());
    }
}
