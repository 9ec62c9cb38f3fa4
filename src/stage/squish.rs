use crate::{
    stage::{Stage, StageError},
    testing::stage_contract::StageTestConfig,
};
use std::borrow::Cow;

/// Collapse every run of whitespace into one ASCII space and trim both ends.
///
/// Any Unicode `White_Space` character counts, so a lone tab or NBSP between
/// two words also becomes `' '`. Idempotent, and zero-copy when the input is
/// already squished.
///
/// ```text
/// "  a \t\n b  "  →  "a b"
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Squish;

impl Stage for Squish {
    fn name(&self) -> &'static str {
        "squish"
    }

    fn needs_apply(&self, text: &str) -> Result<bool, StageError> {
        Ok(needs_squish(text))
    }

    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        Ok(squish_cow(text))
    }
}

#[inline]
pub(crate) fn squish_cow(text: Cow<'_, str>) -> Cow<'_, str> {
    if !needs_squish(&text) {
        return text;
    }

    let mut out = String::with_capacity(text.len());
    let mut pending_ws = false;
    for c in text.trim().chars() {
        if c.is_whitespace() {
            pending_ws = true;
            continue;
        }
        if pending_ws {
            out.push(' ');
            pending_ws = false;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

pub(crate) fn needs_squish(text: &str) -> bool {
    let bytes = text.as_bytes();
    // Fast ASCII path: check edges first
    if bytes.first().is_some_and(u8::is_ascii_whitespace)
        || bytes.last().is_some_and(u8::is_ascii_whitespace)
    {
        return true;
    }
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        return true;
    }

    let mut prev_ws = false;
    for c in text.chars() {
        let is_ws = c.is_whitespace();
        // Any non-space whitespace, or a second whitespace in a row
        if is_ws && (c != ' ' || prev_ws) {
            return true;
        }
        prev_ws = is_ws;
    }
    false
}

/// Trim `text` and replace all internal whitespace runs with a single space.
pub fn squish(text: &str) -> Cow<'_, str> {
    squish_cow(Cow::Borrowed(text))
}

impl StageTestConfig for Squish {
    fn samples() -> &'static [&'static str] {
        &["  a   b  ", "a\tb", "\u{00A0}x\u{3000}y\u{2003}", "hello world", ""]
    }

    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[
            ("  a   b  ", "a b"),
            (" a b  c ", "a b c"),
            ("a\tb", "a b"),
            ("line1\r\n\r\nline2", "line1 line2"),
            ("\u{00A0}x\u{3000}y", "x y"),
            ("   ", ""),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(Squish);
    }
}
