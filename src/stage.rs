//! Core text stage abstraction.
//!
//! Every text transformation in this crate is a [`Stage`]: a value that knows
//! how to cheaply decide whether it would touch a string (`needs_apply`) and
//! how to rewrite it (`apply`). Stages take and return `Cow<str>` so a string
//! that is already in shape flows through a whole pipeline without a single
//! allocation.
//!
//! Each stage module also exposes a free function (`squish`,
//! `normalize_whitespace`, `proper_case`, ...) for one-off calls.

pub mod case;
pub mod normalize_whitespace;
pub mod proper_case;
pub mod replace_all;
pub mod squish;

use std::borrow::Cow;
use thiserror::Error;

/// Public error type for every stage.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("invalid replacement pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid argument to `{0}`: expected text, found {1}")]
    InvalidArgument(&'static str, &'static str),
}

/// A single text transformation step.
pub trait Stage: Send + Sync {
    /// Human-readable name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Fast pre-check. Returning `Ok(false)` promises that `apply` would
    /// return the text unchanged, so callers may skip the stage.
    fn needs_apply(&self, text: &str) -> Result<bool, StageError>;

    /// Allocation-aware transformation. Must always be correct, even when
    /// called without consulting `needs_apply` first.
    fn apply<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError>;
}

/// Letters that have an upper or lower case form.
#[inline]
pub(crate) fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

/// Hand back the original `Cow` when a rewrite produced identical text.
#[inline]
pub(crate) fn keep_if_unchanged<'a>(original: Cow<'a, str>, rewritten: String) -> Cow<'a, str> {
    if rewritten == original.as_ref() {
        original
    } else {
        Cow::Owned(rewritten)
    }
}
