//! Resume normalization and screening

pub mod pii;
pub mod features;
pub mod normalizer;
pub mod screening;

pub use features::{extract_ai_experience, extract_batch_year, BATCH_YEAR_NOT_FOUND};
pub use normalizer::{NormalizedResume, ResumeNormalizer};
pub use pii::mask_pii;
pub use screening::{ResumeOutcome, ScreeningPipeline, ScreeningSummary};
