//! Feature extraction over unmasked resume text: batch year and AI/ML lines

use crate::config::KeywordMatching;
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;

/// Returned by [`extract_batch_year`] when no pattern matches.
pub const BATCH_YEAR_NOT_FOUND: &str = "Not found";

/// Tried in order; the first pattern that matches anywhere wins.
const BATCH_YEAR_PATTERNS: [&str; 4] = [
    r"(?i)Batch\s+of\s+(\d{4})",
    r"(?i)Graduated\s+(\d{4})",
    r"(?i)Class\s+of\s+(\d{4})",
    r"(?i)(\d{4})\s+Batch",
];

pub const AI_KEYWORDS: [&str; 12] = [
    "machine learning",
    "deep learning",
    "artificial intelligence",
    "neural networks",
    "nlp",
    "computer vision",
    "tensorflow",
    "pytorch",
    "scikit-learn",
    "data science",
    "ml",
    "ai",
];

static DEFAULT_EXTRACTOR: Lazy<FeatureExtractor> =
    Lazy::new(|| FeatureExtractor::new(KeywordMatching::Substring));

enum KeywordMatcher {
    /// Plain containment in the lowercased line. "ai" also hits "said" or
    /// "available"; that over-match is the established behavior.
    Substring(AhoCorasick),
    WordBoundary(Regex),
}

pub struct FeatureExtractor {
    batch_patterns: Vec<Regex>,
    keywords: KeywordMatcher,
}

impl FeatureExtractor {
    pub fn new(matching: KeywordMatching) -> Self {
        let batch_patterns = BATCH_YEAR_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("Invalid batch year regex"))
            .collect();

        let keywords = match matching {
            KeywordMatching::Substring => KeywordMatcher::Substring(
                AhoCorasick::new(AI_KEYWORDS).expect("Invalid AI keyword set"),
            ),
            KeywordMatching::WordBoundary => {
                let alternatives: Vec<String> =
                    AI_KEYWORDS.iter().map(|k| regex::escape(k)).collect();
                let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
                KeywordMatcher::WordBoundary(
                    Regex::new(&pattern).expect("Invalid AI keyword regex"),
                )
            }
        };

        Self {
            batch_patterns,
            keywords,
        }
    }

    pub fn batch_year(&self, text: &str) -> String {
        self.batch_patterns
            .iter()
            .find_map(|pattern| pattern.captures(text))
            .and_then(|caps| caps.get(1))
            .map(|year| year.as_str().to_string())
            .unwrap_or_else(|| BATCH_YEAR_NOT_FOUND.to_string())
    }

    /// Trimmed lines mentioning an AI/ML keyword, in document order,
    /// duplicates kept.
    pub fn ai_experience(&self, text: &str) -> Vec<String> {
        text.split('\n')
            .filter(|line| self.mentions_ai(line))
            .map(|line| line.trim().to_string())
            .collect()
    }

    fn mentions_ai(&self, line: &str) -> bool {
        match &self.keywords {
            KeywordMatcher::Substring(matcher) => matcher.is_match(&line.to_lowercase()),
            KeywordMatcher::WordBoundary(regex) => regex.is_match(line),
        }
    }
}

/// Graduation/batch year as written, or [`BATCH_YEAR_NOT_FOUND`].
pub fn extract_batch_year(text: &str) -> String {
    DEFAULT_EXTRACTOR.batch_year(text)
}

/// Lines mentioning AI/ML keywords, matched by substring.
pub fn extract_ai_experience(text: &str) -> Vec<String> {
    DEFAULT_EXTRACTOR.ai_experience(text)
}
