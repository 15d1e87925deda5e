//! Redaction of personally identifiable information

use once_cell::sync::Lazy;
use regex::Regex;

pub const EMAIL_TOKEN: &str = "[EMAIL]";
pub const NAME_TOKEN: &str = "[NAME]";

static DEFAULT_MASKER: Lazy<PiiMasker> = Lazy::new(PiiMasker::new);

/// Masks email addresses, then probable personal names.
///
/// The name heuristic is any run of two or three whitespace-separated
/// Title-Case words, so headers such as "Work Experience" are masked too.
/// Both tokens are all-caps and can never be re-matched, which keeps the
/// transform idempotent.
pub struct PiiMasker {
    email_regex: Regex,
    name_regex: Regex,
}

impl Default for PiiMasker {
    fn default() -> Self {
        Self::new()
    }
}

impl PiiMasker {
    pub fn new() -> Self {
        let email_regex = Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Invalid email regex");

        let name_regex =
            Regex::new(r"[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,2}").expect("Invalid name regex");

        Self {
            email_regex,
            name_regex,
        }
    }

    pub fn mask(&self, text: &str) -> String {
        // Emails first: a Title-Case local part must not be turned into a name.
        let masked = self.email_regex.replace_all(text, EMAIL_TOKEN);
        self.name_regex.replace_all(&masked, NAME_TOKEN).into_owned()
    }
}

/// [`PiiMasker::mask`] with a shared, lazily compiled masker.
pub fn mask_pii(text: &str) -> String {
    DEFAULT_MASKER.mask(text)
}
