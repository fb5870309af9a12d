//! Live validation of a proposed exercise name against existing records.
//!
//! Order of checks: length, exact key match (as typed, then auto-corrected),
//! fuzzy suggestions against the corrected key, new name.

use serde::{Deserialize, Serialize};

use crate::autocorrect::{AutoCorrector, BUILTIN};
use crate::error::NameError;
use crate::normalize::normalize;
use crate::record::NameRecord;
use crate::similarity::similarity;

/// Default similarity threshold for warning about near-duplicates.
pub const DEFAULT_WARN_THRESHOLD: f64 = 0.7;

/// Default maximum number of suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Default minimum trimmed name length.
pub const DEFAULT_MIN_NAME_LENGTH: usize = 2;

/// An existing name offered in place of the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct Suggestion<P = serde_json::Value> {
    /// Display name of the suggested record
    pub original: String,
    /// Similarity to the (corrected, normalized) input
    pub similarity: f64,
    pub record: NameRecord<P>,
}

/// Outcome of validating a proposed name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "status",
    rename_all = "snake_case",
    bound(deserialize = "P: Deserialize<'de> + Default")
)]
pub enum ValidationResult<P = serde_json::Value> {
    /// Input rejected before any matching
    Rejected { reason: NameError },
    /// A record with the same canonical key exists
    ExactMatch { record: NameRecord<P> },
    /// Near-duplicates exist; the user may still proceed
    Warned {
        suggestions: Vec<Suggestion<P>>,
        can_proceed: bool,
    },
    /// Genuinely new name (after auto-correction)
    New { name: String },
}

impl<P> ValidationResult<P> {
    /// Whether the name can be saved as entered (possibly after a warning).
    pub fn can_proceed(&self) -> bool {
        match self {
            ValidationResult::Rejected { .. } => false,
            ValidationResult::ExactMatch { .. } | ValidationResult::New { .. } => true,
            ValidationResult::Warned { can_proceed, .. } => *can_proceed,
        }
    }

    /// Suggestions, if any.
    pub fn suggestions(&self) -> &[Suggestion<P>] {
        match self {
            ValidationResult::Warned { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

/// Tunables for one validation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationOptions {
    pub warn_threshold: f64,
    pub max_suggestions: usize,
    pub min_name_length: usize,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            warn_threshold: DEFAULT_WARN_THRESHOLD,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            min_name_length: DEFAULT_MIN_NAME_LENGTH,
        }
    }
}

/// Validate a proposed name against existing records using the built-in
/// autocorrect dictionary.
pub fn validate<P: Clone>(
    input: &str,
    existing: &[NameRecord<P>],
    threshold_warn: f64,
) -> ValidationResult<P> {
    validate_with_candidates(input, existing, &[], threshold_warn)
}

/// Validate against existing records followed by external candidates.
///
/// On a simultaneous exact match the first match in existing-then-external
/// order wins.
pub fn validate_with_candidates<P: Clone>(
    input: &str,
    existing: &[NameRecord<P>],
    external: &[NameRecord<P>],
    threshold_warn: f64,
) -> ValidationResult<P> {
    let options = ValidationOptions {
        warn_threshold: threshold_warn,
        ..Default::default()
    };
    validate_internal(
        input,
        existing.iter().chain(external.iter()),
        &options,
        &BUILTIN,
    )
}

pub(crate) fn validate_internal<'a, P, I>(
    input: &str,
    candidates: I,
    options: &ValidationOptions,
    corrector: &AutoCorrector,
) -> ValidationResult<P>
where
    P: Clone + 'a,
    I: IntoIterator<Item = &'a NameRecord<P>>,
{
    let trimmed = input.trim();
    if trimmed.chars().count() < options.min_name_length {
        tracing::debug!(input, "rejected name: too short");
        return ValidationResult::Rejected {
            reason: NameError::InvalidInput(format!(
                "name must be at least {} characters",
                options.min_name_length
            )),
        };
    }

    let raw_key = normalize(trimmed);
    let corrected = corrector.correct(trimmed);
    let key = normalize(&corrected);

    let candidates: Vec<(&NameRecord<P>, String)> = candidates
        .into_iter()
        .map(|record| (record, normalize(&record.name)))
        .collect();

    // The name as typed wins over its corrected form
    let exact = candidates
        .iter()
        .find(|(_, k)| *k == raw_key)
        .or_else(|| candidates.iter().find(|(_, k)| *k == key));
    if let Some((record, _)) = exact {
        tracing::debug!(input, matched = %record.name, "exact match");
        return ValidationResult::ExactMatch {
            record: (*record).clone(),
        };
    }

    let mut suggestions: Vec<Suggestion<P>> = candidates
        .iter()
        .filter_map(|(record, candidate_key)| {
            let score = similarity(&key, candidate_key);
            (score >= options.warn_threshold).then(|| Suggestion {
                original: record.name.clone(),
                similarity: score,
                record: (*record).clone(),
            })
        })
        .collect();

    if suggestions.is_empty() {
        tracing::debug!(input, name = %corrected, "new name");
        return ValidationResult::New { name: corrected };
    }

    // Stable: ties keep candidate order
    suggestions.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    suggestions.truncate(options.max_suggestions);

    tracing::debug!(input, suggestions = suggestions.len(), "near-duplicate warning");
    ValidationResult::Warned {
        suggestions,
        can_proceed: true,
    }
}
