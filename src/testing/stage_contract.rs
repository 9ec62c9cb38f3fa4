use crate::stage::Stage;

/// Trait that stages implement to opt into the universal test suite.
pub trait StageTestConfig: Stage + Sized {
    /// General test samples (may or may not trigger changes).
    fn samples() -> &'static [&'static str] {
        &["Hello World 123", " a  b ", "TEST", ""]
    }

    /// Samples that must come back unchanged and borrowed.
    fn should_pass_through() -> &'static [&'static str] {
        &[""]
    }

    /// Input/output pairs that verify correct transformations.
    fn should_transform() -> &'static [(&'static str, &'static str)] {
        &[]
    }
}

/// Assert that a stage satisfies the universal stage contracts.
///
/// 1. `zero_copy_when_no_changes`: untouched text stays `Cow::Borrowed`
/// 2. `stage_is_idempotent`: applying twice yields the same result as once
/// 3. `needs_apply_is_sound`: `needs_apply == false` implies `apply` is a no-op
/// 4. `handles_empty_string`: the empty string survives
/// 5. `no_panic_on_mixed_scripts`: multi-byte input never panics on a char boundary
#[macro_export]
macro_rules! assert_stage_contract {
    ($stage:expr) => {
        $crate::testing::stage_contract::zero_copy_when_no_changes(&$stage);
        $crate::testing::stage_contract::stage_is_idempotent(&$stage);
        $crate::testing::stage_contract::needs_apply_is_sound(&$stage);
        $crate::testing::stage_contract::handles_empty_string(&$stage);
        $crate::testing::stage_contract::no_panic_on_mixed_scripts(&$stage);
    };
}

// ============================================================================
// Universal contract tests
// ============================================================================

#[cfg(test)]
use std::borrow::Cow;

#[cfg(test)]
pub fn zero_copy_when_no_changes<S: StageTestConfig>(stage: &S) {
    for &input in S::samples() {
        let once = stage.apply(Cow::Borrowed(input)).unwrap();
        if once == input {
            assert!(
                matches!(once, Cow::Borrowed(s) if std::ptr::eq(s, input)),
                "stage `{}` allocated for unchanged input `{input}`",
                stage.name()
            );
        }

        // Second pass over the result must never allocate again
        let settled = once.into_owned();
        let twice = stage.apply(Cow::Borrowed(settled.as_str())).unwrap();
        assert!(
            matches!(twice, Cow::Borrowed(s) if std::ptr::eq(s, settled.as_str())),
            "zero-copy violated on second pass of `{}` (input: `{input}`)",
            stage.name()
        );
    }

    for &pass_through in S::should_pass_through() {
        let out = stage.apply(Cow::Borrowed(pass_through)).unwrap();
        assert_eq!(out.as_ref(), pass_through);
        assert!(
            matches!(out, Cow::Borrowed(s) if std::ptr::eq(s, pass_through)),
            "zero-copy violated on pass-through sample `{pass_through}` for `{}`",
            stage.name()
        );
    }

    for &(input, expected) in S::should_transform() {
        let out = stage.apply(Cow::Borrowed(input)).unwrap();
        assert_eq!(
            out.as_ref(),
            expected,
            "stage `{}` on `{input}`",
            stage.name()
        );
    }
}

#[cfg(test)]
pub fn stage_is_idempotent<S: StageTestConfig>(stage: &S) {
    let inputs = S::samples()
        .iter()
        .chain(S::should_transform().iter().map(|(input, _)| input));
    for &input in inputs {
        let once = stage.apply(Cow::Borrowed(input)).unwrap();
        let twice = stage.apply(once.clone()).unwrap();
        assert_eq!(
            once,
            twice,
            "apply() of `{}` not idempotent on `{input}`",
            stage.name()
        );
    }
}

#[cfg(test)]
pub fn needs_apply_is_sound<S: StageTestConfig>(stage: &S) {
    let clean = ["", "hello", "world123", " !@#"];
    let inputs = S::samples()
        .iter()
        .chain(S::should_pass_through())
        .chain(S::should_transform().iter().map(|(input, _)| input))
        .chain(clean.iter());
    for &input in inputs {
        let predicted = stage.needs_apply(input).expect("needs_apply errored");
        // Owned input so stages that always allocate are not penalised
        let output = stage
            .apply(Cow::Owned(input.to_owned()))
            .expect("apply errored");
        if !predicted {
            assert_eq!(
                output,
                input,
                "needs_apply() of `{}` said no change for `{input}`",
                stage.name()
            );
        }
    }
}

#[cfg(test)]
pub fn handles_empty_string<S: StageTestConfig>(stage: &S) {
    let empty: &str = "";
    let result = if stage.needs_apply(empty).unwrap() {
        stage.apply(Cow::Borrowed(empty)).unwrap()
    } else {
        Cow::Borrowed(empty)
    };
    assert_eq!(result.as_ref(), "");
}

#[cfg(test)]
pub fn no_panic_on_mixed_scripts<S: StageTestConfig>(stage: &S) {
    let _ = stage.apply(Cow::Borrowed(
        " Hello ( 世界 ) русский , Türkçe & العربية 简体中文 ! ",
    ));
}
