use crate::{
    pipeline::Pipeline,
    stage::{Stage, StageError, normalize_whitespace::NormalizeWhitespace},
};
use std::{borrow::Cow, sync::Arc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TidyError {
    #[error("stage error: {0}")]
    Stage(#[from] StageError),
}

/// A reusable chain of text stages.
///
/// ```
/// use strtidy::{ProperCase, Squish, Tidy};
/// let tidy = Tidy::builder()
///     .add_stage(Squish)
///     .add_stage(ProperCase::default())
///     .build();
/// assert_eq!(tidy.apply("  of   mice and men ").unwrap(), "Of Mice and Men");
/// ```
#[derive(Clone)]
pub struct Tidy {
    pipeline: Pipeline,
}

impl Tidy {
    pub fn builder() -> TidyBuilder {
        TidyBuilder::default()
    }

    /// Whitespace and punctuation spacing, same as `normalize_whitespace`.
    pub fn standard() -> Self {
        Self::builder().add_stage(NormalizeWhitespace).build()
    }

    pub fn apply<'a>(&self, text: impl Into<Cow<'a, str>>) -> Result<Cow<'a, str>, TidyError> {
        let result = self.pipeline.process(text.into())?;
        Ok(result)
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pipeline.stage_names()
    }
}

#[derive(Default)]
pub struct TidyBuilder {
    stages: Vec<Arc<dyn Stage>>,
}

impl TidyBuilder {
    pub fn add_stage<T: Stage + 'static>(mut self, stage: T) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn build(self) -> Tidy {
        Tidy {
            pipeline: Pipeline::new(self.stages),
        }
    }
}
