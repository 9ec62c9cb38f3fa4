// src/pipeline.rs
use crate::stage::{Stage, StageError};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::sync::Arc;

/// Ordered list of stages run one after another.
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: SmallVec<[Arc<dyn Stage>; 8]>,
}

impl Pipeline {
    pub fn new(stages: impl IntoIterator<Item = Arc<dyn Stage>>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.stages.iter().map(|stage| stage.name())
    }

    pub fn process<'a>(&self, text: Cow<'a, str>) -> Result<Cow<'a, str>, StageError> {
        let mut current = text;

        for stage in &self.stages {
            // Fast path: skip if no mutation needed
            if !stage.needs_apply(&current)? {
                tracing::trace!(stage = stage.name(), "stage skipped");
                continue;
            }

            tracing::debug!(stage = stage.name(), "applying stage");
            current = stage.apply(current)?;
        }

        Ok(current)
    }
}
