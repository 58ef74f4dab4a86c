//! Scripted image classifier.
//!
//! Stands in for the real cat-recognition oracle.  Each call to
//! [`ImageClassifier::image_contains_cat`] pops the next scripted
//! confidence score (percent) and compares it with the threshold; an
//! empty script yields [`ClassifierError::NoVerdict`].

use std::collections::VecDeque;

use log::debug;

use crate::app::ports::{CameraImage, ClassifierError, ImageClassifier};

#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    script: VecDeque<f32>,
    calls: u64,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier that will answer with `scores`, in order.
    pub fn with_script(scores: impl IntoIterator<Item = f32>) -> Self {
        Self {
            script: scores.into_iter().collect(),
            calls: 0,
        }
    }

    /// Queue one more confidence score.
    pub fn push_confidence(&mut self, score: f32) {
        self.script.push_back(score);
    }

    /// Scores not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Number of frames classified so far.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl ImageClassifier for ScriptedClassifier {
    fn image_contains_cat(
        &mut self,
        _image: &CameraImage,
        confidence_threshold: f32,
    ) -> Result<bool, ClassifierError> {
        let score = self.script.pop_front().ok_or(ClassifierError::NoVerdict)?;
        if !score.is_finite() {
            return Err(ClassifierError::Backend(format!("non-finite score {score}")));
        }
        self.calls += 1;
        debug!("ScriptedClassifier: score {:.1}% vs {:.1}%", score, confidence_threshold);
        Ok(score >= confidence_threshold)
    }
}
