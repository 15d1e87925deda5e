//! Resume normalization: raw file to masked text plus extracted features

use crate::config::KeywordMatching;
use crate::input::manager::InputManager;
use crate::processing::features::FeatureExtractor;
use crate::processing::pii::PiiMasker;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResume {
    pub masked_text: String,
    /// Four-digit year or
    /// [`BATCH_YEAR_NOT_FOUND`](crate::processing::features::BATCH_YEAR_NOT_FOUND)
    pub batch_year: String,
    pub ai_experience_lines: Vec<String>,
}

impl NormalizedResume {
    pub fn is_empty(&self) -> bool {
        self.masked_text.is_empty()
    }
}

/// Deterministic load → extract → mask transform.
pub struct ResumeNormalizer {
    input: InputManager,
    masker: PiiMasker,
    features: FeatureExtractor,
}

impl Default for ResumeNormalizer {
    fn default() -> Self {
        Self::new(KeywordMatching::Substring)
    }
}

impl ResumeNormalizer {
    pub fn new(keyword_matching: KeywordMatching) -> Self {
        Self {
            input: InputManager::new(),
            masker: PiiMasker::new(),
            features: FeatureExtractor::new(keyword_matching),
        }
    }

    /// Never fails: an unreadable or unsupported file normalizes to empty
    /// text, the "Not found" year and no experience lines.
    pub async fn normalize(&self, path: &Path) -> NormalizedResume {
        let raw = self.input.load_text(path).await;
        if raw.is_empty() {
            warn!("No text could be read from {}", path.display());
        }
        self.normalize_text(&raw)
    }

    /// Features are read from the raw text, before masking.
    pub fn normalize_text(&self, raw: &str) -> NormalizedResume {
        let batch_year = self.features.batch_year(raw);
        let ai_experience_lines = self.features.ai_experience(raw);
        let masked_text = self.masker.mask(raw);

        debug!(
            "Normalized {} chars: batch year {}, {} AI line(s)",
            raw.len(),
            batch_year,
            ai_experience_lines.len()
        );

        NormalizedResume {
            masked_text,
            batch_year,
            ai_experience_lines,
        }
    }
}
